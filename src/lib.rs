#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate rocket;

pub mod poet;

pub use poet::analysis::{analyze, Analysis};
pub use poet::dictionary::{Entry, PronouncingDictionary};
pub use poet::error::{Error, Result};
pub use poet::forms::{PoetryForm, PoetryFormCatalogue, RhymeTag};
