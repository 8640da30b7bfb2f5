//! Name-indexed access to record fields.
//!
//! Templates need to walk arbitrary records without per-field accessors. Any
//! `Serialize` value that serializes as a keyed record can be turned into a
//! [`FieldMap`]; the snapshot records also expose this through [`Describable`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Number, Value};
use thiserror::Error;
use tracing::debug;

/// Field name to field value, ordered by name.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// An opaque field value that can be displayed or reflected again.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<FieldValue>),
    Record(FieldMap),
}

#[derive(Debug, Error)]
pub enum FieldsError {
    #[error("{type_name} is not a struct")]
    NotAStruct { type_name: &'static str },
    #[error("failed to reflect value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Returns the field names and values of `value`.
///
/// References, boxes and `Some(..)` are looked through. Anything that does
/// not end up as a keyed record (scalars, sequences, `None`) is rejected
/// with [`FieldsError::NotAStruct`] naming the offending type.
pub fn fields<T>(value: &T) -> Result<FieldMap, FieldsError>
where
    T: Serialize + ?Sized,
{
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(name, value)| (name, FieldValue::from(value)))
            .collect()),
        _ => Err(FieldsError::NotAStruct {
            type_name: std::any::type_name::<T>(),
        }),
    }
}

/// Records that can list their own fields by name.
pub trait Describable: Serialize {
    /// An empty map when the value does not reflect as a record.
    fn fields(&self) -> FieldMap {
        fields(self).unwrap_or_else(|err| {
            debug!(error = %err, "record has no listable fields");
            FieldMap::new()
        })
    }
}

impl FieldValue {
    pub fn as_record(&self) -> Option<&FieldMap> {
        match self {
            FieldValue::Record(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Number(n) => n.as_u64(),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from).collect())
            }
            Value::Object(map) => FieldValue::Record(
                map.into_iter()
                    .map(|(name, value)| (name, FieldValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            FieldValue::Record(map) => {
                f.write_str("{")?;
                for (i, (name, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Serialize, Default)]
    struct Sample {
        name: String,
        count: u32,
        ratio: f64,
        enabled: bool,
        tags: Vec<String>,
    }

    #[derive(Serialize)]
    struct Outer {
        label: &'static str,
        inner: Sample,
    }

    fn sample() -> Sample {
        Sample {
            name: "eth0".into(),
            count: 7,
            ratio: 0.5,
            enabled: true,
            tags: vec!["a".into(), "b".into()],
        }
    }

    #[test]
    fn test_fields_lists_every_field_by_name() {
        let map = fields(&sample()).unwrap();
        assert_eq!(map.len(), 5);
        assert_eq!(map["name"], FieldValue::Text("eth0".into()));
        assert_eq!(map["count"].as_u64(), Some(7));
        assert_eq!(map["enabled"], FieldValue::Bool(true));
        assert_eq!(
            map["tags"],
            FieldValue::List(vec![FieldValue::Text("a".into()), FieldValue::Text("b".into())])
        );
        assert_eq!(map["ratio"].to_string(), "0.5");
    }

    #[test]
    fn test_fields_zero_value_struct() {
        let map = fields(&Sample::default()).unwrap();
        assert_eq!(map.len(), 5);
        assert_eq!(map["name"], FieldValue::Text(String::new()));
        assert_eq!(map["count"].as_u64(), Some(0));
        assert_eq!(map["tags"], FieldValue::List(Vec::new()));
    }

    #[test]
    fn test_fields_looks_through_pointers() {
        let boxed = Box::new(sample());
        let some = Some(sample());
        assert_eq!(fields(&boxed).unwrap().len(), 5);
        assert_eq!(fields(&some).unwrap().len(), 5);
        assert_eq!(fields(&&sample()).unwrap().len(), 5);
    }

    #[test]
    fn test_fields_nested_records_stay_reflectable() {
        let outer = Outer {
            label: "x",
            inner: sample(),
        };
        let map = fields(&outer).unwrap();
        let inner = map["inner"].as_record().unwrap();
        assert_eq!(inner["name"].as_text(), Some("eth0"));
    }

    #[test]
    fn test_fields_rejects_non_struct() {
        let err = fields(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, FieldsError::NotAStruct { .. }));
        assert!(err.to_string().contains("Vec<i32>"));
        assert!(err.to_string().ends_with("is not a struct"));

        assert!(fields("text").is_err());
        assert!(fields(&42u8).is_err());
        assert!(fields(&(1, 2)).is_err());
    }

    #[test]
    fn test_fields_rejects_none() {
        let none: Option<Sample> = None;
        let err = fields(&none).unwrap_err();
        assert!(err.to_string().contains("Option"));
    }

    #[test]
    fn test_fields_accepts_keyed_maps() {
        let mut map = HashMap::new();
        map.insert("k", 1);
        let out = fields(&map).unwrap();
        assert_eq!(out["k"].as_u64(), Some(1));
    }

    #[derive(Serialize)]
    struct Samples(Vec<u8>);

    impl Describable for Samples {}
    impl Describable for Sample {}

    #[test]
    fn test_describable_lists_fields() {
        assert_eq!(sample().fields().len(), 5);
    }

    #[test]
    fn test_describable_non_record_is_empty() {
        assert!(Samples(vec![1, 2]).fields().is_empty());
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(FieldValue::Null.to_string(), "null");
        let map = fields(&Outer {
            label: "x",
            inner: Sample::default(),
        })
        .unwrap();
        assert_eq!(map["label"].to_string(), "x");
        assert_eq!(
            map["inner"].to_string(),
            "{count: 0, enabled: false, name: , ratio: 0.0, tags: []}"
        );
    }
}
