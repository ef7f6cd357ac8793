//! Rhyme scheme detection.
//!
//! Two lines rhyme when the last words share a rime: the phonemes from the word's last stressed
//! vowel through to its end. "SIN" (`S IH0 N`) and "IN" (`IH0 N`) share the rime `IH0 N`;
//! "DIVINE" (`D IH0 V AY1 N`) has the rime `AY1 N` and rhymes with "WINE" (`W AY1 N`).
//!
//! Rimes must match exactly. There is no partial credit for near rhymes.
use crate::poet::dictionary::is_stressed;
use crate::poet::error::{Error, Result};
use crate::poet::pronunciation::LinePronunciation;

/// Returns the rime of a word: everything from its last stressed phoneme on.
///
/// Returns None if no phoneme in the word is stressed.
pub fn rime(word: &[String]) -> Option<&[String]> {
    let last_vowel = word.iter().rposition(|ph| is_stressed(ph))?;
    Some(&word[last_vowel..])
}

/// Assigns a letter to each line so that lines which rhyme share a letter.
///
/// The first distinct rime in the poem is `A`, the next new one `B`, and so on, no matter how far
/// apart the rhyming lines are. Returns one letter per line, e.g. `['A', 'A', 'B', 'B', 'A']` for
/// a limerick.
///
/// Fails with `PreconditionViolation` if a line has no words or its last word has no stressed
/// phoneme, and with `TooManyRimes` if the poem needs more than 26 letters.
pub fn rhyme_scheme(poem: &[LinePronunciation]) -> Result<Vec<char>> {
    // Rimes in order of first appearance. A rime's index here is its letter.
    let mut seen: Vec<&[String]> = vec![];
    let mut scheme = Vec::with_capacity(poem.len());

    for (i, line) in poem.iter().enumerate() {
        let line_num = i + 1;
        let last_word = line.last().ok_or_else(|| Error::PreconditionViolation {
            line: line_num,
            message: "the line has no words".to_string(),
        })?;
        let line_rime = rime(last_word).ok_or_else(|| Error::PreconditionViolation {
            line: line_num,
            message: format!(
                "the last word ({}) has no stressed phoneme",
                last_word.join(" ")
            ),
        })?;

        let index = match seen.iter().position(|r| *r == line_rime) {
            Some(index) => index,
            None => {
                seen.push(line_rime);
                seen.len() - 1
            }
        };
        scheme.push(letter(index).ok_or(Error::TooManyRimes { line: line_num })?);
    }
    Ok(scheme)
}

/// The letter for the `index`-th rime: 0 is 'A', 25 is 'Z', and there's nothing after that.
fn letter(index: usize) -> Option<char> {
    if index < 26 {
        Some((b'A' + index as u8) as char)
    } else {
        None
    }
}

// mod tests
