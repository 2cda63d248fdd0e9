//! Catalog rows and their conversion into validated element sets.

use phaethon_orbits::OrbitalElements;
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys every catalog row must carry, in element order.
pub const ELEMENT_KEYS: [&str; 6] = ["a", "e", "i", "node", "peri", "M"];

/// Reasons a row cannot be turned into an element set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("field `{field}` is not numeric: {value}")]
    NonNumeric { field: &'static str, value: String },
}

/// One row of the input catalog, kept verbatim so it can be enriched on output.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    /// Zero-based position in the source document.
    pub index: usize,
    pub raw: Value,
}

impl CatalogRecord {
    pub fn new(index: usize, raw: Value) -> Self {
        Self { index, raw }
    }

    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.raw.as_object()
    }

    /// Display identifier, opaque to the computation.
    pub fn full_name(&self) -> Option<&str> {
        self.fields()?.get("full_name")?.as_str()
    }

    /// Extract the six numeric elements, rejecting missing or non-numeric fields.
    pub fn elements(&self) -> Result<OrbitalElements, MalformedInput> {
        let fields = self.fields().ok_or(MalformedInput::NotAnObject)?;
        let mut values = [0.0; 6];
        for (slot, key) in values.iter_mut().zip(ELEMENT_KEYS) {
            *slot = numeric_field(fields, key)?;
        }
        let [a, e, i, node, peri, m] = values;
        Ok(OrbitalElements::new(a, e, i, node, peri, m))
    }
}

fn numeric_field(fields: &Map<String, Value>, field: &'static str) -> Result<f64, MalformedInput> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(MalformedInput::MissingField { field }),
        Some(Value::Number(number)) => number.as_f64().ok_or_else(|| MalformedInput::NonNumeric {
            field,
            value: number.to_string(),
        }),
        // CSV-to-JSON converters commonly emit numbers as strings
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| MalformedInput::NonNumeric {
                field,
                value: text.clone(),
            }),
        Some(other) => Err(MalformedInput::NonNumeric {
            field,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_and_string_fields_are_accepted() {
        let record = CatalogRecord::new(
            0,
            json!({"full_name": "1 Ceres", "a": 2.77, "e": "0.0785", "i": 10, "node": 80.3, "peri": 73.6, "M": " 291.4 "}),
        );
        assert_eq!(record.full_name(), Some("1 Ceres"));
        let elements = record.elements().expect("elements");
        assert_eq!(
            elements,
            OrbitalElements::new(2.77, 0.0785, 10.0, 80.3, 73.6, 291.4)
        );
    }

    #[test]
    fn missing_and_null_fields_are_reported() {
        let record = CatalogRecord::new(
            3,
            json!({"a": 1.0, "e": 0.1, "i": 0, "node": 0, "peri": 0}),
        );
        assert_eq!(
            record.elements(),
            Err(MalformedInput::MissingField { field: "M" })
        );
        let record = CatalogRecord::new(
            4,
            json!({"a": null, "e": 0.1, "i": 0, "node": 0, "peri": 0, "M": 0}),
        );
        assert_eq!(
            record.elements(),
            Err(MalformedInput::MissingField { field: "a" })
        );
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        let record = CatalogRecord::new(
            0,
            json!({"a": 1.0, "e": "high", "i": 0, "node": 0, "peri": 0, "M": 0}),
        );
        assert_eq!(
            record.elements(),
            Err(MalformedInput::NonNumeric {
                field: "e",
                value: "high".to_string()
            })
        );
        let record = CatalogRecord::new(
            0,
            json!({"a": 1.0, "e": 0.1, "i": [1], "node": 0, "peri": 0, "M": 0}),
        );
        assert!(matches!(
            record.elements(),
            Err(MalformedInput::NonNumeric { field: "i", .. })
        ));
        let record = CatalogRecord::new(
            0,
            json!({"a": "NaN", "e": 0.1, "i": 0, "node": 0, "peri": 0, "M": 0}),
        );
        assert!(record.elements().is_err());
    }

    #[test]
    fn non_object_rows_are_malformed() {
        let record = CatalogRecord::new(0, json!([1, 2, 3]));
        assert_eq!(record.elements(), Err(MalformedInput::NotAnObject));
        assert_eq!(record.full_name(), None);
    }
}
