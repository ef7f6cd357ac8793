//! Converting a cleaned poem to phonemes, and the per-line facts that fall out of them.
use crate::poet::dictionary::{is_stressed, PronouncingDictionary};
use crate::poet::error::{Error, Result};
use crate::poet::snippet::CleanLine;

/// The pronunciation of one word, e.g. `["G", "UW1", "F", "IY0"]`.
pub type WordPhonemes = Vec<String>;

/// The pronunciation of one line: one `WordPhonemes` per word.
pub type LinePronunciation = Vec<WordPhonemes>;

/// The pronunciation of a poem, shaped exactly like the `CleanPoem` it came from.
pub type PoemPronunciation = Vec<LinePronunciation>;

/// Looks up every word of a cleaned poem in the dictionary.
///
/// The result has the same lines, and the same words per line, as the input. There is no
/// best-effort result: the first word missing from the dictionary fails the whole call with
/// `Error::UnknownWord`, and the caller decides what to tell the user.
pub fn extract_phonemes(
    poem: &[CleanLine],
    dict: &PronouncingDictionary,
) -> Result<PoemPronunciation> {
    poem.iter()
        .map(|line| {
            line.iter()
                .map(|word| match dict.phonemes(word) {
                    Some(phonemes) => Ok(phonemes.to_vec()),
                    None => Err(Error::UnknownWord(word.clone())),
                })
                .collect::<Result<LinePronunciation>>()
        })
        .collect()
}

/// Renders a pronunciation for display.
///
/// Phonemes are separated by spaces, words by `" | "` and lines by newlines, e.g.
/// `"Y EH1 S\nN OW1 | Y EH1 S"`.
pub fn phonemes_to_string(poem: &[LinePronunciation]) -> String {
    poem.iter()
        .map(|line| {
            line.iter()
                .map(|word| word.join(" "))
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns the number of syllables on each line.
///
/// Every stressed phoneme is a syllable. Words without one (e.g. "HMM") count for nothing.
pub fn num_syllables(poem: &[LinePronunciation]) -> Vec<usize> {
    poem.iter().map(|line| count_syllables(line)).collect()
}

/// Returns the number of syllables in a single line.
pub fn count_syllables(line: &[WordPhonemes]) -> usize {
    line.iter()
        .flatten()
        .filter(|phoneme| is_stressed(phoneme))
        .count()
}

/// Test helper: builds a pronunciation from string literals.
#[cfg(test)]
pub(crate) fn to_pronunciation(lines: &[&[&[&str]]]) -> PoemPronunciation {
    lines
        .iter()
        .map(|line| {
            line.iter()
                .map(|word| word.iter().map(|ph| ph.to_string()).collect())
                .collect()
        })
        .collect()
}

// mod tests
