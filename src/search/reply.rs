// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Scalar extraction from raw `redis::Value` replies.
//!
//! RediSearch mixes RESP integers and bulk strings freely (scores arrive as
//! `"0.5"`, counts as integers, field values as bulk strings), so every
//! accessor here accepts both encodings.

use redis::Value;
use serde_json::{Map, Number, Value as JsonValue};

/// True for replies that carry nothing to decode: nil, an empty array or an
/// empty bulk string.
pub fn is_empty_reply(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Array(items) => items.is_empty(),
        Value::BulkString(bytes) => bytes.is_empty(),
        _ => false,
    }
}

pub(crate) fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::BulkString(bytes) => String::from_utf8(bytes.clone()).ok(),
        Value::SimpleString(s) => Some(s.clone()),
        Value::Okay => Some("OK".to_string()),
        Value::Int(v) => Some(v.to_string()),
        Value::Double(v) => Some(v.to_string()),
        Value::VerbatimString { text, .. } => Some(text.clone()),
        _ => None,
    }
}

pub(crate) fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Int(v) => Some(*v),
        other => value_to_string(other).and_then(|s| s.trim().parse().ok()),
    }
}

pub(crate) fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(v) => Some(*v as f64),
        Value::Double(v) => Some(*v),
        other => value_to_string(other).and_then(|s| s.trim().parse().ok()),
    }
}

/// Raw bytes of a payload slot; nil means the document was stored without one.
pub(crate) fn value_to_bytes(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::Nil => None,
        Value::BulkString(bytes) => Some(bytes.clone()),
        other => value_to_string(other).map(String::into_bytes),
    }
}

/// Render bytes the way row-shaped documents expose them: a string when the
/// bytes are UTF-8, otherwise the list of byte values.
pub(crate) fn bytes_to_json(bytes: &[u8]) -> JsonValue {
    match std::str::from_utf8(bytes) {
        Ok(s) => JsonValue::String(s.to_string()),
        Err(_) => JsonValue::Array(bytes.iter().map(|b| JsonValue::from(*b)).collect()),
    }
}

/// Convert any reply value into JSON without losing structure.
pub(crate) fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Nil => JsonValue::Null,
        Value::Int(v) => JsonValue::from(*v),
        Value::Double(v) => Number::from_f64(*v).map(JsonValue::Number).unwrap_or(JsonValue::Null),
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::BulkString(bytes) => bytes_to_json(bytes),
        Value::SimpleString(s) => JsonValue::String(s.clone()),
        Value::Okay => JsonValue::String("OK".to_string()),
        Value::VerbatimString { text, .. } => JsonValue::String(text.clone()),
        Value::Array(items) | Value::Set(items) => {
            JsonValue::Array(items.iter().map(value_to_json).collect())
        }
        Value::Map(pairs) => {
            let mut map = Map::new();
            for (k, v) in pairs {
                let key = value_to_string(k).unwrap_or_else(|| format!("{:?}", k));
                map.insert(key, value_to_json(v));
            }
            JsonValue::Object(map)
        }
        other => JsonValue::String(format!("{:?}", other)),
    }
}
