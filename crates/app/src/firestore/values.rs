//! Firestore typed values.
//!
//! Firestore's REST surface wraps every field in a single-key object naming
//! its type, e.g. `{"integerValue": "2021"}`. Documents travel through the
//! rest of the crate as plain JSON, so values are converted at the edge.

use autovault::store::Document;
use serde_json::{Map, Number, Value, json};

use crate::firestore::errors::FirestoreError;

/// Wrap a JSON value in its Firestore type.
#[must_use]
pub fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => encode_number(number),
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(values) => json!({
            "arrayValue": { "values": values.iter().map(encode).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

/// Wrap every field of a document.
#[must_use]
pub fn encode_fields(document: &Document) -> Map<String, Value> {
    document
        .iter()
        .map(|(name, value)| (name.clone(), encode(value)))
        .collect()
}

/// Unwrap a Firestore typed value.
///
/// Timestamps, references and bytes become strings. Doubles that JSON cannot
/// carry (`NaN`, `Infinity`, `-Infinity`) become `null`.
///
/// # Errors
///
/// Returns [`FirestoreError::UnsupportedValue`] for an unknown type tag and
/// [`FirestoreError::MalformedValue`] when the payload does not match its tag.
pub fn decode(value: &Value) -> Result<Value, FirestoreError> {
    let Some(object) = value.as_object() else {
        return Err(FirestoreError::MalformedValue(value.to_string()));
    };

    let Some((tag, payload)) = object.iter().next() else {
        return Err(FirestoreError::MalformedValue(value.to_string()));
    };

    match tag.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => payload
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| malformed(tag, payload)),
        "integerValue" => decode_integer(payload).ok_or_else(|| malformed(tag, payload)),
        "doubleValue" => decode_double(payload).ok_or_else(|| malformed(tag, payload)),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => payload
            .as_str()
            .map(|text| Value::String(text.to_string()))
            .ok_or_else(|| malformed(tag, payload)),
        "geoPointValue" => Ok(payload.clone()),
        "arrayValue" => {
            let values = match payload.get("values") {
                None => Vec::new(),
                Some(Value::Array(values)) => {
                    values.iter().map(decode).collect::<Result<_, _>>()?
                }
                Some(_) => return Err(malformed(tag, payload)),
            };

            Ok(Value::Array(values))
        }
        "mapValue" => {
            let fields = match payload.get("fields") {
                None => Map::new(),
                Some(Value::Object(fields)) => decode_fields(fields)?,
                Some(_) => return Err(malformed(tag, payload)),
            };

            Ok(Value::Object(fields))
        }
        other => Err(FirestoreError::UnsupportedValue(other.to_string())),
    }
}

/// Unwrap every field of a document.
///
/// # Errors
///
/// Returns the first field that fails to [`decode`].
pub fn decode_fields(fields: &Map<String, Value>) -> Result<Document, FirestoreError> {
    fields
        .iter()
        .map(|(name, value)| Ok((name.clone(), decode(value)?)))
        .collect()
}

fn encode_number(number: &Number) -> Value {
    if let Some(integer) = number.as_i64() {
        json!({ "integerValue": integer.to_string() })
    } else if let Some(integer) = number.as_u64() {
        json!({ "integerValue": integer.to_string() })
    } else {
        json!({ "doubleValue": number.as_f64() })
    }
}

fn decode_integer(payload: &Value) -> Option<Value> {
    match payload {
        Value::String(text) => text.parse::<i64>().ok().map(Value::from),
        Value::Number(number) if number.is_i64() => Some(payload.clone()),
        _ => None,
    }
}

fn decode_double(payload: &Value) -> Option<Value> {
    match payload {
        Value::Number(_) => Some(payload.clone()),
        Value::String(text) => match text.as_str() {
            "NaN" | "Infinity" | "-Infinity" => Some(Value::Null),
            _ => None,
        },
        _ => None,
    }
}

fn malformed(tag: &str, payload: &Value) -> FirestoreError {
    FirestoreError::MalformedValue(format!("{tag}: {payload}"))
}
