//! Store document handle.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::value::{StoreMap, StoreValue};

/// A document read from the store.
///
/// Implementors expose the storage-assigned key and materialize the
/// document's fields. Nested maps inside the fields are plain
/// [`StoreValue::Map`]s and carry no identifier of their own.
pub trait StoreDocument {
    /// The storage-assigned key, if any.
    fn id(&self) -> Option<&str>;

    /// The document's fields.
    fn data(&self) -> Cow<'_, StoreMap>;
}

/// A snapshot of a stored document: its key plus its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The storage-assigned key.
    pub id: String,

    /// The document fields in store representation.
    pub fields: StoreMap,
}

impl Document {
    /// Create a new document snapshot.
    pub fn new(id: impl Into<String>, fields: StoreMap) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

impl StoreDocument for Document {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn data(&self) -> Cow<'_, StoreMap> {
        Cow::Borrowed(&self.fields)
    }
}

/// A raw field map acts as its own document; its identifier is its own
/// `id` entry when that entry is a string.
impl StoreDocument for StoreMap {
    fn id(&self) -> Option<&str> {
        match self.get("id") {
            Some(StoreValue::String(id)) => Some(id.as_str()),
            _ => None,
        }
    }

    fn data(&self) -> Cow<'_, StoreMap> {
        Cow::Borrowed(self)
    }
}
