//! Recursive conversion between records and store documents.

use chrono::FixedOffset;
use docshape_core::{
    IdentifierField, Record, Result, StoreDocument, StoreMap, StoreValue, Timestamp,
    TransformOptions, Value,
};
use tracing::{debug, instrument};

use crate::offset;
use crate::timestamp::{has_timestamp_shape, timestamp_to_date};

/// Converts records to their store representation and back.
///
/// Holds only configuration; every call works on its own input and returns
/// a freshly built structure.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use docshape::{Document, Record, RecordTransformer, TransformOptions, Value};
///
/// let transformer = RecordTransformer::new(TransformOptions::new(false));
///
/// let mut record = Record::new();
/// record.insert("created".to_string(), Value::Date(Utc.timestamp_millis_opt(1_000).unwrap()));
/// record.insert("note".to_string(), Value::Undefined);
///
/// let stored = transformer.to_store_representation(&record);
/// let document = Document::new("abc", stored);
/// let decoded = transformer.from_store_representation(&document, None).unwrap();
///
/// assert_eq!(decoded["created"], record["created"]);
/// assert_eq!(decoded["note"], Value::Null);
/// assert_eq!(decoded["id"], Value::from("abc"));
/// assert_eq!(decoded["uid"], Value::from("abc"));
/// ```
#[derive(Debug, Clone)]
pub struct RecordTransformer {
    options: TransformOptions,
}

impl RecordTransformer {
    /// Create a transformer with the given options.
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    /// The options this transformer was built with.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Encode a record for a store write.
    ///
    /// Every key of the input is present in the output. Undefined values
    /// become null, dates become timestamps, opaque values are replaced by
    /// their own encoding, and nested maps and arrays are walked.
    #[instrument(skip_all, fields(keys = record.len()))]
    pub fn to_store_representation(&self, record: &Record) -> StoreMap {
        let offset = self.resolve_offset();
        encode_map(record, offset)
    }

    /// Encode a single value.
    pub fn encode_value(&self, value: &Value) -> StoreValue {
        encode_value(value, self.resolve_offset())
    }

    /// Decode a store document into a record.
    ///
    /// Timestamps, tagged or in the two-field `{seconds, nanoseconds}` shape,
    /// become dates; nested maps and arrays are walked. When the document has
    /// a non-empty id it is written to `identifier`, or to both `id` and
    /// `uid` when no field is given.
    ///
    /// # Errors
    ///
    /// Returns a decode error if a two-field timestamp has non-integral or
    /// out-of-range members, or a date cannot be represented.
    #[instrument(skip_all, fields(id = document.id().unwrap_or_default()))]
    pub fn from_store_representation<D>(
        &self,
        document: &D,
        identifier: Option<&IdentifierField>,
    ) -> Result<Record>
    where
        D: StoreDocument + ?Sized,
    {
        let offset = self.resolve_offset();
        let mut record = decode_map(&document.data(), offset)?;

        if let Some(id) = document.id().filter(|id| !id.is_empty()) {
            match identifier {
                Some(field) => {
                    debug!(field = %field, "Attaching document id");
                    record.insert(field.as_str().to_string(), Value::from(id));
                }
                None => {
                    debug!("Attaching document id to default fields");
                    for field in IdentifierField::DEFAULT_FIELDS {
                        record.insert(field.to_string(), Value::from(id));
                    }
                }
            }
        }

        Ok(record)
    }

    /// Decode a single store value. No identifier is attached.
    ///
    /// # Errors
    ///
    /// Same as [`from_store_representation`](Self::from_store_representation).
    pub fn decode_value(&self, value: &StoreValue) -> Result<Value> {
        decode_value(value, self.resolve_offset())
    }

    fn resolve_offset(&self) -> Option<FixedOffset> {
        let offset = self.options.effective_offset();
        if let Some(offset) = offset {
            debug!(offset_seconds = offset.local_minus_utc(), "Resolved timezone offset");
        }
        offset
    }
}

fn encode_map(record: &Record, offset: Option<FixedOffset>) -> StoreMap {
    record
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value, offset)))
        .collect()
}

fn encode_value(value: &Value, offset: Option<FixedOffset>) -> StoreValue {
    match value {
        Value::Undefined | Value::Null => StoreValue::Null,
        Value::Date(date) => {
            StoreValue::Timestamp(Timestamp::from_date(offset::into_store(*date, offset)))
        }
        Value::Opaque(inner) => inner.to_store_value(),
        Value::Array(items) => {
            StoreValue::Array(items.iter().map(|item| encode_value(item, offset)).collect())
        }
        Value::Map(map) => StoreValue::Map(encode_map(map, offset)),
        Value::Bool(b) => StoreValue::Bool(*b),
        Value::Integer(i) => StoreValue::Integer(*i),
        Value::Float(f) => StoreValue::Float(*f),
        Value::String(s) => StoreValue::String(s.clone()),
    }
}

fn decode_map(map: &StoreMap, offset: Option<FixedOffset>) -> Result<Record> {
    map.iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value, offset)?)))
        .collect()
}

fn decode_value(value: &StoreValue, offset: Option<FixedOffset>) -> Result<Value> {
    match value {
        StoreValue::Timestamp(_) => decode_date(value, offset),
        StoreValue::Map(map) if has_timestamp_shape(map) => decode_date(value, offset),
        StoreValue::Map(map) => Ok(Value::Map(decode_map(map, offset)?)),
        StoreValue::Array(items) => Ok(Value::Array(
            items
                .iter()
                .map(|item| decode_value(item, offset))
                .collect::<Result<_>>()?,
        )),
        StoreValue::Null => Ok(Value::Null),
        StoreValue::Bool(b) => Ok(Value::Bool(*b)),
        StoreValue::Integer(i) => Ok(Value::Integer(*i)),
        StoreValue::Float(f) => Ok(Value::Float(*f)),
        StoreValue::String(s) => Ok(Value::String(s.clone())),
    }
}

fn decode_date(value: &StoreValue, offset: Option<FixedOffset>) -> Result<Value> {
    let date = timestamp_to_date(value)?;
    Ok(Value::Date(offset::from_store(date, offset)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use docshape_core::{DecodeError, Document, Error, StoreEncode, TimezoneSource};
    use serde_json::json;

    fn transformer(apply: bool, offset_minutes: i32) -> RecordTransformer {
        RecordTransformer::new(
            TransformOptions::new(apply).with_timezone(TimezoneSource::fixed(offset_minutes).unwrap()),
        )
    }

    fn record(json: serde_json::Value) -> Record {
        match Value::from(json) {
            Value::Map(map) => map,
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[derive(Debug)]
    struct Money {
        cents: i64,
    }

    impl StoreEncode for Money {
        fn to_store_value(&self) -> StoreValue {
            StoreValue::from(json!({"amount": self.cents, "currency": "EUR"}))
        }
    }

    #[test]
    fn undefined_becomes_null() {
        let mut input = Record::new();
        input.insert("a".to_string(), Value::Undefined);

        let out = transformer(false, 0).to_store_representation(&input);
        assert_eq!(out.get("a"), Some(&StoreValue::Null));
    }

    #[test]
    fn every_key_survives_encoding() {
        let mut input = record(json!({"a": 1, "b": null, "c": {"d": [1, 2]}}));
        input.insert("e".to_string(), Value::Undefined);

        let out = transformer(true, 60).to_store_representation(&input);
        let keys: Vec<&String> = out.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c", "e"]);
    }

    #[test]
    fn date_without_shift_keeps_instant() {
        let date = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let mut input = Record::new();
        input.insert("t".to_string(), Value::Date(date));

        let out = transformer(false, 120).to_store_representation(&input);
        let ts = out["t"].as_timestamp().unwrap();
        assert_eq!(ts.millis(), Some(1_700_000_000_123));
    }

    #[test]
    fn date_with_shift_moves_by_offset() {
        let date = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut input = Record::new();
        input.insert("t".to_string(), Value::Date(date));

        let out = transformer(true, 120).to_store_representation(&input);
        let ts = out["t"].as_timestamp().unwrap();
        assert_eq!(ts.millis(), Some(1_700_000_000_000 + 120 * 60 * 1000));
    }

    #[test]
    fn opaque_value_used_verbatim() {
        let mut input = Record::new();
        input.insert("price".to_string(), Value::opaque(Money { cents: 250 }));

        let out = transformer(false, 0).to_store_representation(&input);
        assert_eq!(
            out["price"],
            StoreValue::from(json!({"amount": 250, "currency": "EUR"}))
        );
    }

    #[test]
    fn array_elements_are_encoded() {
        let date = Utc.timestamp_millis_opt(5_000).unwrap();
        let mut inner = Record::new();
        inner.insert("b".to_string(), Value::Date(date));
        let mut input = Record::new();
        input.insert(
            "a".to_string(),
            Value::Array(vec![Value::Map(inner), Value::from("s"), Value::Undefined]),
        );

        let out = transformer(false, 0).to_store_representation(&input);
        let StoreValue::Array(items) = &out["a"] else {
            panic!("expected array");
        };
        assert_eq!(
            items[0].get("b"),
            Some(&StoreValue::Timestamp(Timestamp::new(5, 0).unwrap()))
        );
        assert_eq!(items[1], StoreValue::from("s"));
        assert_eq!(items[2], StoreValue::Null);
    }

    #[test]
    fn encode_does_not_touch_input() {
        let input = record(json!({"a": {"b": 1}}));
        let copy = input.clone();
        let _ = transformer(true, 60).to_store_representation(&input);
        assert_eq!(input, copy);
    }

    #[test]
    fn decode_default_identifier_fields() {
        let doc = Document::new("xyz", StoreMap::new());
        let out = transformer(false, 0).from_store_representation(&doc, None).unwrap();
        assert_eq!(out.get("id"), Some(&Value::from("xyz")));
        assert_eq!(out.get("uid"), Some(&Value::from("xyz")));
    }

    #[test]
    fn decode_explicit_identifier_field() {
        let doc = Document::new("xyz", StoreMap::new());
        let field = IdentifierField::new("docId").unwrap();
        let out = transformer(false, 0)
            .from_store_representation(&doc, Some(&field))
            .unwrap();
        assert_eq!(out.get("docId"), Some(&Value::from("xyz")));
        assert!(!out.contains_key("id"));
        assert!(!out.contains_key("uid"));
    }

    #[test]
    fn decode_empty_id_attaches_nothing() {
        let doc = Document::new("", StoreValue::from(json!({"a": 1})).as_map().cloned().unwrap());
        let out = transformer(false, 0).from_store_representation(&doc, None).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn decode_nested_maps_get_no_identifier() {
        let fields = StoreValue::from(json!({"child": {"id": "inner", "n": 1}}));
        let doc = Document::new("outer", fields.as_map().cloned().unwrap());
        let out = transformer(false, 0).from_store_representation(&doc, None).unwrap();
        let child = out["child"].as_map().unwrap();
        assert_eq!(child.len(), 2);
        assert!(!child.contains_key("uid"));
    }

    #[test]
    fn decode_raw_map_uses_own_id() {
        let fields = StoreValue::from(json!({"id": "abc", "n": 1}));
        let map = fields.as_map().unwrap();
        let out = transformer(false, 0).from_store_representation(map, None).unwrap();
        assert_eq!(out.get("id"), Some(&Value::from("abc")));
        assert_eq!(out.get("uid"), Some(&Value::from("abc")));
        assert_eq!(out.get("n"), Some(&Value::Integer(1)));
    }

    #[test]
    fn decode_three_field_map_recurses() {
        let fields = StoreValue::from(json!({
            "window": {"seconds": 10, "nanoseconds": 0, "label": "x"}
        }));
        let out = transformer(false, 0)
            .from_store_representation(fields.as_map().unwrap(), None)
            .unwrap();
        assert_eq!(out["window"].get("seconds"), Some(&Value::Integer(10)));
    }

    #[test]
    fn decode_malformed_two_field_timestamp_fails() {
        let fields = StoreValue::from(json!({"t": {"seconds": "soon", "nanoseconds": 0}}));
        let result = transformer(false, 0).from_store_representation(fields.as_map().unwrap(), None);
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::UnacceptableTimestamp { .. }))
        ));
    }

    #[test]
    fn decode_value_null_passes_through() {
        assert_eq!(
            transformer(true, 60).decode_value(&StoreValue::Null).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn decode_reverses_shift() {
        let stored = StoreValue::Timestamp(Timestamp::new(7_200, 0).unwrap());
        let out = transformer(true, 120).decode_value(&stored).unwrap();
        assert_eq!(out.as_date().unwrap().timestamp(), 0);
    }
}
