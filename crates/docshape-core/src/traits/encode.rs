//! Custom store encoding for opaque record values.

use std::fmt;

use crate::value::StoreValue;

/// A value that knows its own store encoding.
///
/// Record values wrapped in [`Value::Opaque`](crate::Value::Opaque) are
/// replaced by the result of [`to_store_value`](StoreEncode::to_store_value)
/// when encoding. The result is used verbatim; the transformer does not
/// recurse into it.
///
/// # Example
///
/// ```
/// use docshape_core::{StoreEncode, StoreValue};
///
/// #[derive(Debug)]
/// struct Cents(i64);
///
/// impl StoreEncode for Cents {
///     fn to_store_value(&self) -> StoreValue {
///         StoreValue::String(format!("{}.{:02}", self.0 / 100, self.0 % 100))
///     }
/// }
///
/// assert_eq!(Cents(1234).to_store_value(), StoreValue::from("12.34"));
/// ```
pub trait StoreEncode: fmt::Debug + Send + Sync {
    /// Produce the store representation of this value.
    fn to_store_value(&self) -> StoreValue;
}
