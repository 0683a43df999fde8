//! Conversion of decoded values into `serde_json` values.
//!
//! Binary payloads are rendered as base64 data URIs. Extensions become a
//! two-element array `[type, "<data uri>"]`. Map keys that are not strings
//! are rendered as their compact JSON text; a repeated key keeps its first
//! position and its last value.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Number, Value as JsonValue};

use crate::value::IntRepr;
use crate::{Integer, Value};

/// Prefix of the data URI used for binary payloads.
pub const BIN_URI_START: &str = "data:application/octet-stream;base64,";

impl Value {
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Nil => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Integer(n) => integer_to_json(*n),
            Value::F32(f) => float_to_json(f64::from(*f)),
            Value::F64(f) => float_to_json(*f),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Binary(b) => JsonValue::String(bin_to_data_uri(b)),
            Value::Array(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(pairs) => {
                let mut obj = Map::with_capacity(pairs.len());
                for (k, v) in pairs {
                    obj.insert(key_to_string(k), v.to_json());
                }
                JsonValue::Object(obj)
            }
            Value::Extension(ext) => JsonValue::Array(vec![
                JsonValue::from(ext.tag),
                JsonValue::String(bin_to_data_uri(&ext.data)),
            ]),
        }
    }
}

impl From<&Value> for JsonValue {
    fn from(v: &Value) -> Self {
        v.to_json()
    }
}

impl From<Value> for JsonValue {
    fn from(v: Value) -> Self {
        v.to_json()
    }
}

fn integer_to_json(n: Integer) -> JsonValue {
    match n.0 {
        IntRepr::PosInt(u) => JsonValue::Number(Number::from(u)),
        IntRepr::NegInt(i) => JsonValue::Number(Number::from(i)),
    }
}

fn float_to_json(f: f64) -> JsonValue {
    Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
}

fn bin_to_data_uri(bytes: &[u8]) -> String {
    let mut uri = String::with_capacity(BIN_URI_START.len() + bytes.len().div_ceil(3) * 4);
    uri.push_str(BIN_URI_START);
    STANDARD.encode_string(bytes, &mut uri);
    uri
}

fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_json().to_string(),
    }
}
