//! Core docshape types.
//!
//! These types enforce their invariants at construction time.

mod identifier;
mod timestamp;

pub use identifier::IdentifierField;
pub use timestamp::Timestamp;
