//! Source analysis helpers shared by the static scorers

mod lexical;
mod outline;

pub use lexical::{MaskedLine, MaskedSource};
pub use outline::{Declaration, DeclarationKind, Outline};
