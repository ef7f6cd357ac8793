//! Error types shared by the parsers and the analysis pipeline.
//!
//! Every failure aborts the call that raised it. Nothing here is recovered internally; callers
//! (the terminal front end, the web server) report the error and let the user retry.
use std::path::PathBuf;

use thiserror::Error;

/// Result type for everything in `poet`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A line of reference data (dictionary or poetry forms) doesn't have the expected shape.
    ///
    /// `line` is 1-indexed, counting every line of the input including comments and blanks.
    #[error("malformed entry on line {line}: {message}")]
    MalformedEntry { line: usize, message: String },

    /// A poem word that isn't in the pronouncing dictionary. Holds the normalized word.
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// The rhyme scheme was asked for on a line that can't have one, e.g. a line whose last word
    /// has no stressed phoneme. `line` is 1-indexed.
    #[error("cannot find a rime on line {line}: {message}")]
    PreconditionViolation { line: usize, message: String },

    /// More distinct rimes than there are letters to name them.
    #[error("line {line} starts a 27th distinct rime; only A-Z are available")]
    TooManyRimes { line: usize },

    /// Reading an input file failed.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Error {
        Error::MalformedEntry {
            line,
            message: message.into(),
        }
    }
}

/// Reads a whole file to a string, attaching the path to any error.
pub(crate) fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
