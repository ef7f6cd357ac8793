//! A "snippet" refers to any bit of text to be analyzed.
//!
//! It is most often a poem, but it can also be a single word. Generally, the text in a snippet
//! will have punctuation, capitalization, and other formatting that has to be removed before its
//! words can be looked up in the dictionary. That cleanup happens here.

/// One line of a cleaned poem: its words, normalized and in order.
pub type CleanLine = Vec<String>;

/// A poem reduced to normalized words, line by line. No line is empty and no word is empty.
pub type CleanPoem = Vec<CleanLine>;

/// Characters stripped from both ends of every word (besides ASCII whitespace).
const STRIPPED_PUNCTUATION: &[char] = &[
    '!', '"', '\'', '`', '@', '$', '%', '^', '&', '_', '-', '+', '=', '{', '}', '|', '\\', '/',
    ',', ';', ':', '.', '?', ')', '(', '[', ']', '<', '>', '*', '#', '~', '“', '”', '‘', '’',
];

fn is_stripped(c: char) -> bool {
    c.is_ascii_whitespace() || STRIPPED_PUNCTUATION.contains(&c)
}

/// Normalizes a single word for looking up in the dictionary.
///
/// The words in the dictionary are upper-cased and keep only their essential punctuation (e.g.
/// "LET'S" and "A.M."). This upper-cases `token` and strips punctuation and whitespace from
/// both ends. Anything in the middle is kept as is.
///
/// Normalizing an already normalized word doesn't change it.
///
/// # Examples
///
/// ```
/// use scansion::poet::snippet::normalize_token;
///
/// assert_eq!(normalize_token("Birthday!!!"), "BIRTHDAY");
/// assert_eq!(normalize_token("  \"Quoted?\"\n"), "QUOTED");
/// assert_eq!(normalize_token("let's"), "LET'S");
/// ```
pub fn normalize_token(token: &str) -> String {
    token.to_uppercase().trim_matches(is_stripped).to_string()
}

/// Splits raw poem text into lines of normalized words.
///
/// Words are separated by whitespace and normalized with `normalize_token`. Words that normalize
/// to nothing (a lone dash, say) are dropped, and so is every line left without any words:
/// blank lines, whitespace-only lines and punctuation-only lines all vanish. Line order and word
/// order are kept.
///
/// ```
/// use scansion::poet::snippet::clean_poem;
///
/// let poem = clean_poem("The first line leads off,\n\n\nWith a gap before the next.\n");
/// assert_eq!(poem, vec![
///     vec!["THE", "FIRST", "LINE", "LEADS", "OFF"],
///     vec!["WITH", "A", "GAP", "BEFORE", "THE", "NEXT"],
/// ]);
/// ```
pub fn clean_poem(raw_text: &str) -> CleanPoem {
    raw_text
        .lines()
        .map(|line| {
            line.split_whitespace()
                .map(normalize_token)
                .filter(|word| !word.is_empty())
                .collect::<CleanLine>()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Tidies the contents of a poem file for display.
///
/// Blank and whitespace-only lines are removed, along with the whitespace at the very start and
/// end of the text. Lines in between keep their own indentation.
pub fn read_and_trim_whitespace(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

// mod tests
