//! Metrical analysis of poems: pronunciation, syllable counts and rhyme schemes.
//!
//! Data flows from raw text through `snippet` (normalization) and `pronunciation` (dictionary
//! lookups) to the per-line facts in `pronunciation` and `rhyme`. `analysis` runs the whole
//! pipeline in one call. The reference data, a `dictionary::PronouncingDictionary` and a
//! `forms::PoetryFormCatalogue`, is loaded once and then only borrowed.
pub mod analysis;
pub mod dictionary;
pub mod error;
pub mod forms;
pub mod pronunciation;
pub mod rhyme;
pub mod server;
pub mod snippet;
