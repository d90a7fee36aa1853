//! docshape - convert nested records to and from document-store representation.
//!
//! Writing: absent values become null, dates become `{seconds, nanoseconds}`
//! timestamps, and values with their own store encoding are replaced by it.
//! Reading: timestamps become dates again and the document's key is attached
//! as an identifier field. Both directions walk nested maps and arrays, and
//! can apply a symmetric timezone shift.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use docshape::{Record, RecordTransformer, TimezoneSource, TransformOptions, Value};
//!
//! # fn example() -> docshape::Result<()> {
//! let options = TransformOptions::new(true).with_timezone(TimezoneSource::fixed(60)?);
//! let transformer = RecordTransformer::new(options);
//!
//! let mut record = Record::new();
//! record.insert("at".to_string(), Value::Date(Utc.timestamp_millis_opt(0).unwrap()));
//!
//! let stored = transformer.to_store_representation(&record);
//! assert_eq!(stored["at"].as_timestamp().unwrap().seconds(), 3_600);
//!
//! let decoded = transformer.from_store_representation(&stored, None)?;
//! assert_eq!(decoded["at"], record["at"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod offset;
pub mod timestamp;
mod transformer;
mod typed;

pub use timestamp::{is_timestamp, timestamp_to_date};
pub use transformer::RecordTransformer;

// Re-export core types at crate root for convenience
pub use docshape_core::{
    DecodeError, Document, Error, IdentifierField, InvalidInputError, Record, Result,
    StoreDocument, StoreEncode, StoreMap, StoreValue, Timestamp, TimezoneSource,
    TransformOptions, Value,
};
