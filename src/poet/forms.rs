//! Poetry forms: the expected shape of each line of a named kind of poem.
//!
//! Forms are read from a text file of blocks separated by blank lines. The first line of a block
//! names the form, and every following line gives the syllable count and rhyme tag for one line
//! of the poem:
//!
//! ```text
//! Limerick
//! 8 A
//! 8 A
//! 5 B
//! 5 B
//! 8 A
//!
//! Haiku
//! 5 *
//! 7 *
//! 5 *
//! ```
//!
//! A syllable count of 0 leaves the line's length unconstrained, as does the `*` rhyme tag for
//! its rhyme. Lines that share a letter must rhyme with each other.
//!
//! Nothing here checks a poem against a form; the catalogue only supplies the pattern.
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::poet::error::{read_file, Error, Result};

/// The rhyme rule for one line of a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RhymeTag {
    /// Must rhyme with every other line tagged with the same letter (always `A`-`Z`).
    Letter(char),
    /// The line may end with anything.
    Unconstrained,
}

impl RhymeTag {
    /// Parses `*` or a single uppercase ASCII letter.
    pub fn parse(token: &str) -> Option<RhymeTag> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some('*'), None) => Some(RhymeTag::Unconstrained),
            (Some(c), None) if c.is_ascii_uppercase() => Some(RhymeTag::Letter(c)),
            _ => None,
        }
    }
}

impl fmt::Display for RhymeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RhymeTag::Letter(c) => write!(f, "{}", c),
            RhymeTag::Unconstrained => write!(f, "*"),
        }
    }
}

/// The pattern for one form: parallel per-line syllable counts and rhyme tags.
///
/// Lines are only ever added in pairs, so the two sequences always have the same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoetryForm {
    syllables: Vec<u32>,
    rhyme_tags: Vec<RhymeTag>,
}

impl PoetryForm {
    /// Builds a form from `(syllables, rhyme tag)` pairs, one per line.
    pub fn new<I>(lines: I) -> PoetryForm
    where
        I: IntoIterator<Item = (u32, RhymeTag)>,
    {
        let mut form = PoetryForm::default();
        for (syllables, tag) in lines {
            form.push_line(syllables, tag);
        }
        form
    }

    fn push_line(&mut self, syllables: u32, tag: RhymeTag) {
        self.syllables.push(syllables);
        self.rhyme_tags.push(tag);
    }

    /// Expected syllables per line. 0 means any number.
    pub fn syllables(&self) -> &[u32] {
        &self.syllables
    }

    pub fn rhyme_tags(&self) -> &[RhymeTag] {
        &self.rhyme_tags
    }

    pub fn num_lines(&self) -> usize {
        self.syllables.len()
    }
}

/// All of the known forms, by name.
#[derive(Debug, Default)]
pub struct PoetryFormCatalogue {
    // Sorted so listings come out in a stable order.
    forms: BTreeMap<String, PoetryForm>,
}

impl PoetryFormCatalogue {
    /// Parses the full text of a poetry forms file.
    ///
    /// Lines are trimmed before parsing, so indented files are fine. Fails with `MalformedEntry`
    /// if a header isn't a single token, a body line isn't `<count> <tag>`, or a name repeats.
    pub fn parse(text: &str) -> Result<PoetryFormCatalogue> {
        lazy_static! {
            // A body line, e.g. "8 A" or "5 *". Capture 1 is the count and 2 is the tag.
            static ref BODY_RE: Regex = Regex::new(r"^([0-9]+)\s+(\S+)$").unwrap();
        }

        let mut catalogue = PoetryFormCatalogue::default();
        // The block being read: its name and the lines seen so far.
        let mut current: Option<(String, PoetryForm)> = None;

        for (i, raw_line) in text.lines().enumerate() {
            let line_num = i + 1;
            let line = raw_line.trim();

            if line.is_empty() {
                // Blank lines end the block, if there is one.
                if let Some((name, form)) = current.take() {
                    catalogue.forms.insert(name, form);
                }
                continue;
            }

            let (name, form) = match current.as_mut() {
                Some(block) => (&block.0, &mut block.1),
                None => {
                    let name = parse_header(line, line_num)?;
                    if catalogue.forms.contains_key(&name) {
                        return Err(Error::malformed(
                            line_num,
                            format!("the form {} is defined more than once", name),
                        ));
                    }
                    current = Some((name, PoetryForm::default()));
                    continue;
                }
            };

            let caps = BODY_RE.captures(line).ok_or_else(|| {
                Error::malformed(
                    line_num,
                    format!("expected \"<syllables> <rhyme tag>\" in {}, got {:?}", name, line),
                )
            })?;
            let syllables: u32 = caps[1].parse().map_err(|_| {
                Error::malformed(line_num, format!("syllable count {} is too large", &caps[1]))
            })?;
            let tag = RhymeTag::parse(&caps[2]).ok_or_else(|| {
                Error::malformed(
                    line_num,
                    format!("rhyme tag {:?} is not a letter A-Z or *", &caps[2]),
                )
            })?;
            form.push_line(syllables, tag);
        }
        // Finalize the last block.
        if let Some((name, form)) = current {
            catalogue.forms.insert(name, form);
        }

        debug!(forms = catalogue.len(), "parsed poetry forms");
        Ok(catalogue)
    }

    /// Reads and parses the poetry forms file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<PoetryFormCatalogue> {
        let text = read_file(path.as_ref())?;
        PoetryFormCatalogue::parse(&text)
    }

    /// Returns the form with the given name (case sensitive), or None.
    pub fn get(&self, name: &str) -> Option<&PoetryForm> {
        self.forms.get(name)
    }

    /// Returns the form names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PoetryForm)> {
        self.forms.iter().map(|(name, form)| (name.as_str(), form))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// A header line is the form's name, and names are single tokens.
fn parse_header(line: &str, line_num: usize) -> Result<String> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(name), None) => Ok(name.to_string()),
        _ => Err(Error::malformed(
            line_num,
            format!("expected a single-word form name, got {:?}", line),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::RhymeTag::{Letter, Unconstrained};

    const LIMERICK_AND_HAIKU: &str = "\
        Limerick\n\
        8 A\n\
        8 A\n\
        5 B\n\
        5 B\n\
        8 A\n\
        \n\
        Haiku\n\
        5 *\n\
        7 *\n\
        5 *\n";

    #[test]
    fn test_rhyme_tag_parse() {
        assert_eq!(RhymeTag::parse("A"), Some(Letter('A')));
        assert_eq!(RhymeTag::parse("Z"), Some(Letter('Z')));
        assert_eq!(RhymeTag::parse("*"), Some(Unconstrained));
        assert_eq!(RhymeTag::parse("a"), None);
        assert_eq!(RhymeTag::parse("AB"), None);
        assert_eq!(RhymeTag::parse("1"), None);
        assert_eq!(RhymeTag::parse(""), None);
    }

    #[test]
    fn test_rhyme_tag_display() {
        assert_eq!(Letter('C').to_string(), "C");
        assert_eq!(Unconstrained.to_string(), "*");
    }

    #[test]
    fn test_parse_two_forms() {
        let catalogue = PoetryFormCatalogue::parse(LIMERICK_AND_HAIKU).unwrap();
        assert_eq!(catalogue.len(), 2);

        let limerick = catalogue.get("Limerick").unwrap();
        assert_eq!(limerick.syllables(), [8, 8, 5, 5, 8]);
        assert_eq!(
            limerick.rhyme_tags(),
            [Letter('A'), Letter('A'), Letter('B'), Letter('B'), Letter('A')]
        );

        let haiku = catalogue.get("Haiku").unwrap();
        assert_eq!(haiku.syllables(), [5, 7, 5]);
        assert_eq!(haiku.rhyme_tags(), [Unconstrained; 3]);
        assert_eq!(haiku.num_lines(), 3);
    }

    #[test]
    fn test_names_are_sorted() {
        let catalogue = PoetryFormCatalogue::parse(LIMERICK_AND_HAIKU).unwrap();
        assert_eq!(catalogue.names().collect::<Vec<_>>(), vec!["Haiku", "Limerick"]);
    }

    #[test]
    fn test_zero_syllables_means_unconstrained() {
        let text = "Quintain\n0 A\n0 B\n0 A\n0 B\n0 B\n";
        let catalogue = PoetryFormCatalogue::parse(text).unwrap();
        let quintain = catalogue.get("Quintain").unwrap();
        assert_eq!(quintain.syllables(), [0, 0, 0, 0, 0]);
        assert_eq!(quintain.rhyme_tags().len(), 5);
    }

    #[test]
    fn test_indented_lines_and_several_blank_lines() {
        let text = "  Limerick\n    8 A\n    8 A\n\n   \n\n  Haiku\n    5 *\n    7 * \n    5 *\n    ";
        let catalogue = PoetryFormCatalogue::parse(text).unwrap();
        assert_eq!(catalogue.len(), 2);
        assert_eq!(catalogue.get("Limerick").unwrap().num_lines(), 2);
        assert_eq!(catalogue.get("Haiku").unwrap().syllables(), [5, 7, 5]);
    }

    #[test]
    fn test_header_without_body_is_an_empty_form() {
        let catalogue = PoetryFormCatalogue::parse("Freeform\n").unwrap();
        assert_eq!(catalogue.get("Freeform").unwrap().num_lines(), 0);
    }

    #[test]
    fn test_empty_file() {
        assert!(PoetryFormCatalogue::parse("").unwrap().is_empty());
        assert!(PoetryFormCatalogue::parse("\n\n  \n").unwrap().is_empty());
    }

    fn assert_malformed_at(text: &str, expected_line: usize) {
        match PoetryFormCatalogue::parse(text) {
            Err(Error::MalformedEntry { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("expected MalformedEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_body_lines() {
        assert_malformed_at("Haiku\n5\n", 2);
        assert_malformed_at("Haiku\n5 * extra\n", 2);
        assert_malformed_at("Haiku\nfive *\n", 2);
        assert_malformed_at("Haiku\n-5 *\n", 2);
        assert_malformed_at("Haiku\n5 *\n7 a\n", 3);
        assert_malformed_at("Haiku\n5 *\n7 AB\n", 3);
        assert_malformed_at("Haiku\n99999999999 *\n", 2);
    }

    #[test]
    fn test_rejects_multi_word_header() {
        assert_malformed_at("Shakespearean Sonnet\n10 A\n", 1);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        assert_malformed_at("Haiku\n5 *\n\nHaiku\n5 *\n", 4);
    }

    #[test]
    fn test_new_keeps_sequences_parallel() {
        let form = PoetryForm::new(vec![(10, Letter('A')), (10, Letter('B'))]);
        assert_eq!(form.syllables().len(), form.rhyme_tags().len());
        assert_eq!(form.num_lines(), 2);
    }
} // mod tests
