//! Translation of MCC CTL formula trees into textual CTL dialects.

mod dialect;
mod index;
mod intern;
mod node;
mod translate;


pub use dialect::Dialect;
pub use intern::{PropId, PropositionKey, PropositionTable};
pub use node::{AtomKind, FormulaNode, NodeKind, Quantifier, Tag, TemporalOp, MCC_NAMESPACE};
pub use translate::{translate, AtomPolicy, TranslationError};
