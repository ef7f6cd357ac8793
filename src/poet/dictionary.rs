//! A phonetic dictionary.
//!
//! This reads pronouncing dictionaries in the format of the CMU Pronouncing Dictionary. Each
//! data line holds one word followed by its pronunciation:
//!
//! ```text
//! ;;; Comment lines start with three semicolons and may appear anywhere.
//! ABSINTHE  AE1 B S IH0 N TH
//! HEART  HH AA1 R T
//! ```
//!
//! The phonemes are mostly the ARPABET 2-letter phonemes described here:
//! <https://en.wikipedia.org/wiki/ARPABET>
//!
//! Vowel sounds carry a stress digit, e.g. `AH0`. Zero is unstressed, one is primary stress and
//! two is secondary. Every digit-suffixed phoneme is one syllable, which is what the syllable
//! counter and the rhyme engine key on. Beyond that, phonemes are opaque tokens here; nothing
//! checks them against an inventory.
//!
//! Related references:
//!
//! * <https://github.com/cmusphinx/cmudict>
//! * <http://www.speech.cs.cmu.edu/cgi-bin/cmudict>
//!
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::poet::error::{read_file, Error, Result};

/// The token that marks a whole line as a comment.
const COMMENT_MARKER: &str = ";;;";

/// Returns whether the phoneme carries a stress digit, i.e. whether it's a vowel sound.
pub fn is_stressed(phoneme: &str) -> bool {
    phoneme.ends_with(|c: char| c.is_ascii_digit())
}

/// An Entry represents a single word with its pronunciation.
///
/// This corresponds to one data line in the dictionary file.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// The word as listed in the dictionary, e.g. "FLOWER", "LET'S", "A.M.".
    pub text: String,
    /// The individual phonemes as listed, in the original order e.g. `["SH", "R", "IH1", "M", "P"]`.
    pub phonemes: Vec<String>,
}

impl Entry {
    /// Parses one line of a dictionary file.
    ///
    /// Returns `Ok(None)` for lines with nothing to load: blank lines and `;;;` comments. Every
    /// other token is data; the first is the word as-is and the rest are its phonemes.
    ///
    /// Example inputs:
    /// ```text
    /// A  AH0
    /// A.M.  EY2 EH1 M
    /// 'TWAS  T W AH1 Z
    /// ```
    ///
    /// Arguments:
    /// * `line` - The raw line.
    /// * `line_num` - The 1-indexed line number, used for error reporting.
    pub fn parse(line: &str, line_num: usize) -> Result<Option<Entry>> {
        let mut tokens = line.split_whitespace();
        let word = match tokens.next() {
            Some(word) if word.starts_with(COMMENT_MARKER) => return Ok(None),
            Some(word) => word,
            None => return Ok(None),
        };
        let phonemes: Vec<String> = tokens.map(String::from).collect();
        if phonemes.is_empty() {
            return Err(Error::malformed(
                line_num,
                format!("the word {} has no phonemes", word),
            ));
        }

        Ok(Some(Entry {
            text: word.to_string(),
            phonemes,
        }))
    }

    /// The number of syllables, identified by the number of stressed (vowel) phonemes.
    pub fn syllables(&self) -> usize {
        self.phonemes.iter().filter(|ph| is_stressed(ph)).count()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.text, self.phonemes.join(" "))
    }
}

/// Maps each known word to its pronunciation.
///
/// Built once from a dictionary file and then only read. Analyses borrow it, so one dictionary
/// can serve any number of poems (and threads).
#[derive(Debug, Default)]
pub struct PronouncingDictionary {
    entries: HashMap<String, Entry>,
}

impl PronouncingDictionary {
    /// Creates a new empty dictionary.
    pub fn new() -> PronouncingDictionary {
        PronouncingDictionary {
            entries: HashMap::new(),
        }
    }

    /// Parses the full text of a dictionary file.
    ///
    /// Fails with `MalformedEntry` on the first data line that has a word but no phonemes. If a
    /// word is listed twice, the later pronunciation wins.
    pub fn parse(text: &str) -> Result<PronouncingDictionary> {
        // Files saved by some editors start with a byte order mark.
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut dict = PronouncingDictionary::new();
        for (i, line) in text.lines().enumerate() {
            if let Some(entry) = Entry::parse(line, i + 1)? {
                dict.insert(entry);
            }
        }
        debug!(words = dict.len(), "parsed pronouncing dictionary");
        Ok(dict)
    }

    /// Reads and parses the dictionary file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<PronouncingDictionary> {
        let text = read_file(path.as_ref())?;
        PronouncingDictionary::parse(&text)
    }

    /// Inserts a single entry, replacing any earlier entry for the same word.
    pub fn insert(&mut self, entry: Entry) {
        if let Some(previous) = self.entries.insert(entry.text.clone(), entry) {
            warn!(word = %previous.text, "word defined more than once; keeping the later entry");
        }
    }

    /// Returns the entry for the given word, or None.
    ///
    /// The word must already be normalized (see `snippet::normalize_token`).
    pub fn lookup(&self, word: &str) -> Option<&Entry> {
        self.entries.get(word)
    }

    /// Returns the pronunciation of the given word, or None.
    pub fn phonemes(&self, word: &str) -> Option<&[String]> {
        self.lookup(word).map(|entry| entry.phonemes.as_slice())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Returns the number of words in the dictionary.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// mod tests
