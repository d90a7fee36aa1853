//! Decoding straight into caller-declared types.

use docshape_core::{IdentifierField, Result, StoreDocument};
use serde::de::DeserializeOwned;

use crate::transformer::RecordTransformer;

impl RecordTransformer {
    /// Decode a store document and deserialize the record into `T`.
    ///
    /// Dates reach `T` as RFC 3339 strings, so `chrono::DateTime<Utc>` fields
    /// deserialize directly. The identifier field rule is the same as for
    /// [`from_store_representation`](Self::from_store_representation).
    ///
    /// # Errors
    ///
    /// Returns a decode error as `from_store_representation` does, or
    /// [`Error::Deserialize`](docshape_core::Error::Deserialize) if the
    /// record does not fit `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::{DateTime, Utc};
    /// use docshape::{Document, RecordTransformer, StoreValue, TransformOptions};
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct Task {
    ///     id: String,
    ///     title: String,
    ///     due: DateTime<Utc>,
    /// }
    ///
    /// let fields = StoreValue::from(json!({
    ///     "title": "write docs",
    ///     "due": {"seconds": 60, "nanoseconds": 0}
    /// }));
    /// let document = Document::new("t1", fields.as_map().cloned().unwrap());
    ///
    /// let transformer = RecordTransformer::new(TransformOptions::new(false));
    /// let task: Task = transformer.from_store_representation_as(&document, None).unwrap();
    ///
    /// assert_eq!(task.id, "t1");
    /// assert_eq!(task.title, "write docs");
    /// assert_eq!(task.due.timestamp(), 60);
    /// ```
    pub fn from_store_representation_as<T, D>(
        &self,
        document: &D,
        identifier: Option<&IdentifierField>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        D: StoreDocument + ?Sized,
    {
        let record = self.from_store_representation(document, identifier)?;
        let json = serde_json::to_value(&record)?;
        Ok(serde_json::from_value(json)?)
    }
}
