//! docshape-core - value model, capability traits, and errors for converting
//! records to and from document-store representation.

pub mod error;
pub mod options;
pub mod traits;
pub mod types;
pub mod value;

pub use error::{DecodeError, Error, InvalidInputError};
pub use options::{TimezoneSource, TransformOptions};
pub use traits::{Document, StoreDocument, StoreEncode};
pub use types::{IdentifierField, Timestamp};
pub use value::{Record, StoreMap, StoreValue, Value};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
