//! Store-side value model.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Timestamp;

/// A document's fields in store representation.
pub type StoreMap = BTreeMap<String, StoreValue>;

/// A value safe to hand to a document-store write API.
///
/// There is no absent marker and no native date: absent values are
/// [`StoreValue::Null`] and dates are [`StoreValue::Timestamp`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StoreValue {
    /// Explicit null.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Store-native timestamp.
    Timestamp(Timestamp),
    /// Ordered sequence of values.
    Array(Vec<StoreValue>),
    /// Nested map.
    Map(StoreMap),
}

impl StoreValue {
    /// Create an empty map.
    pub fn map() -> Self {
        StoreValue::Map(StoreMap::new())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, StoreValue::Null)
    }

    /// Returns the inner map, if this is a map.
    pub fn as_map(&self) -> Option<&StoreMap> {
        match self {
            StoreValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the inner timestamp, if this is a tagged timestamp.
    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            StoreValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Look up a key when this value is a map.
    pub fn get(&self, key: &str) -> Option<&StoreValue> {
        self.as_map()?.get(key)
    }
}

impl From<bool> for StoreValue {
    fn from(v: bool) -> Self {
        StoreValue::Bool(v)
    }
}

impl From<i64> for StoreValue {
    fn from(v: i64) -> Self {
        StoreValue::Integer(v)
    }
}

impl From<i32> for StoreValue {
    fn from(v: i32) -> Self {
        StoreValue::Integer(i64::from(v))
    }
}

impl From<f64> for StoreValue {
    fn from(v: f64) -> Self {
        StoreValue::Float(v)
    }
}

impl From<String> for StoreValue {
    fn from(v: String) -> Self {
        StoreValue::String(v)
    }
}

impl From<&str> for StoreValue {
    fn from(v: &str) -> Self {
        StoreValue::String(v.to_string())
    }
}

impl From<Timestamp> for StoreValue {
    fn from(v: Timestamp) -> Self {
        StoreValue::Timestamp(v)
    }
}

impl From<StoreMap> for StoreValue {
    fn from(v: StoreMap) -> Self {
        StoreValue::Map(v)
    }
}

impl<T: Into<StoreValue>> From<Vec<T>> for StoreValue {
    fn from(v: Vec<T>) -> Self {
        StoreValue::Array(v.into_iter().map(Into::into).collect())
    }
}

/// JSON objects become maps. A `{seconds, nanoseconds}` object stays a map
/// here; recognizing it as a timestamp is a decoding decision.
impl From<serde_json::Value> for StoreValue {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => StoreValue::Null,
            serde_json::Value::Bool(b) => StoreValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    StoreValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    StoreValue::Float(f)
                } else {
                    StoreValue::String(n.to_string())
                }
            }
            serde_json::Value::String(s) => StoreValue::String(s),
            serde_json::Value::Array(arr) => {
                StoreValue::Array(arr.into_iter().map(StoreValue::from).collect())
            }
            serde_json::Value::Object(map) => StoreValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, StoreValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<StoreValue> for serde_json::Value {
    fn from(value: StoreValue) -> Self {
        match value {
            StoreValue::Null => serde_json::Value::Null,
            StoreValue::Bool(b) => serde_json::Value::Bool(b),
            StoreValue::Integer(i) => serde_json::Value::Number(i.into()),
            StoreValue::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            StoreValue::String(s) => serde_json::Value::String(s),
            StoreValue::Timestamp(ts) => serde_json::json!({
                "seconds": ts.seconds(),
                "nanoseconds": ts.nanoseconds(),
            }),
            StoreValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            StoreValue::Map(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for StoreValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            StoreValue::Null => serializer.serialize_unit(),
            StoreValue::Bool(b) => serializer.serialize_bool(*b),
            StoreValue::Integer(i) => serializer.serialize_i64(*i),
            StoreValue::Float(f) => serializer.serialize_f64(*f),
            StoreValue::String(s) => serializer.serialize_str(s),
            StoreValue::Timestamp(ts) => ts.serialize(serializer),
            StoreValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            StoreValue::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for StoreValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(StoreValue::from(json))
    }
}
