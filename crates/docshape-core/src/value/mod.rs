//! The two value models a record moves between.
//!
//! [`Value`] is what application code holds; [`StoreValue`] is what the
//! document store accepts and returns.

mod record;
mod store;

pub use record::{Record, Value};
pub use store::{StoreMap, StoreValue};
