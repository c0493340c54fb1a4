//! MCC property files in, textual CTL out.

mod extract;
mod parser;

#[cfg(test)]
mod test;

use ctl::TranslationError;
use thiserror::Error;

pub use extract::{extract_document, extract_properties, TranslatedProperty};
pub use parser::{parse_properties, PropertyEntry};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed document: {0}")]
    MalformedDocument(#[from] roxmltree::Error),
    #[error("property #{index} has no {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("cannot translate property {id}: {source}")]
    Translation {
        id: String,
        source: TranslationError,
    },
}
