//! The full analysis of a poem, from raw text to everything worth displaying.
//!
//! This is the top-level analysis object. It is created per poem (per file or per web request)
//! and discarded afterwards; the dictionary it was built with is only borrowed.
use tracing::debug;

use crate::poet::dictionary::PronouncingDictionary;
use crate::poet::error::Result;
use crate::poet::forms::PoetryForm;
use crate::poet::pronunciation::{extract_phonemes, num_syllables, phonemes_to_string, PoemPronunciation};
use crate::poet::rhyme::rhyme_scheme;
use crate::poet::snippet::{clean_poem, CleanPoem};

/// Everything derived from one poem. All of the sequences have one element per line.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    /// The normalized words of each line.
    pub lines: CleanPoem,
    /// The phonemes of each word of each line.
    pub pronunciation: PoemPronunciation,
    /// One letter per line; lines that rhyme share a letter.
    pub rhyme_scheme: Vec<char>,
    /// The number of syllables per line.
    pub syllables: Vec<usize>,
}

/// Runs the whole pipeline over raw poem text.
///
/// Fails if a word isn't in the dictionary, or if a line can't be given a rhyme (its last word
/// has no stressed phoneme). Nothing partial is returned in either case.
pub fn analyze(raw_text: &str, dict: &PronouncingDictionary) -> Result<Analysis> {
    let lines = clean_poem(raw_text);
    let pronunciation = extract_phonemes(&lines, dict)?;
    let rhyme_scheme = rhyme_scheme(&pronunciation)?;
    let syllables = num_syllables(&pronunciation);
    debug!(lines = lines.len(), "analyzed poem");
    Ok(Analysis {
        lines,
        pronunciation,
        rhyme_scheme,
        syllables,
    })
}

impl Analysis {
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// The pronunciation rendered by `phonemes_to_string`.
    pub fn pronunciation_text(&self) -> String {
        phonemes_to_string(&self.pronunciation)
    }

    /// Generates a summary of the analysis in a text format.
    ///
    /// Each line of the poem is printed with its syllable count and rhyme letter. If a `form` is
    /// given, its expected syllables and rhyme tag are printed alongside for comparison; lines
    /// beyond the end of either are left blank. The pronunciation follows at the end. The format
    /// is targeted for printing to a terminal or put in a `<pre>` html block.
    pub fn summarize_to_text(&self, form: Option<&PoetryForm>) -> String {
        let mut out = String::with_capacity(8192); // Arbitrary.

        let num_rows = match form {
            Some(f) => self.num_lines().max(f.num_lines()),
            None => self.num_lines(),
        };

        match form {
            Some(_) => out.push_str(&format!(
                "{:>3}  {:>3}  {:<5}  {:>4}  {:<4}  TEXT\n",
                "#", "SYL", "RHYME", "FORM", "TAG"
            )),
            None => out.push_str(&format!("{:>3}  {:>3}  {:<5}  TEXT\n", "#", "SYL", "RHYME")),
        }
        for i in 0..num_rows {
            let syllables = self.syllables.get(i).map(|n| n.to_string()).unwrap_or_default();
            let rhyme = self.rhyme_scheme.get(i).map(|c| c.to_string()).unwrap_or_default();
            let mut row = format!("{:>3}  {:>3}  {:<5}  ", i + 1, syllables, rhyme);
            if let Some(f) = form {
                let expected = f.syllables().get(i).map(|n| n.to_string()).unwrap_or_default();
                let tag = f.rhyme_tags().get(i).map(|t| t.to_string()).unwrap_or_default();
                row.push_str(&format!("{:>4}  {:<4}  ", expected, tag));
            }
            if let Some(words) = self.lines.get(i) {
                row.push_str(&words.join(" "));
            }
            out.push_str(row.trim_end());
            out.push('\n');
        }

        out.push_str("\nPRONUNCIATION:\n");
        out.push_str(&self.pronunciation_text());
        out.push('\n');
        out
    }
}

// mod tests
