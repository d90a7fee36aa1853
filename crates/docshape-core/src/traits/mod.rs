//! Capability traits at the record and store boundaries.

mod document;
mod encode;

pub use document::{Document, StoreDocument};
pub use encode::StoreEncode;
