// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON text codec.
//!
//! The engine only needs three operations from a codec plus a cheap
//! syntactic sniff. Decoding yields a generic value (objects become
//! insertion-ordered maps with string keys, arrays become `Vec`s); the
//! caller converts that value to the requested type.

use crate::config::DEFAULT_DATETIME_FORMAT;
use crate::error::{ConvertError, Result};
use crate::value::{MapValue, Value};
use serde_json::{Map as JsonMap, Number, Value as Json};

/// Codec collaborator used for JSON text <-> structural conversion.
pub trait JsonCodec: Send + Sync {
    fn encode(&self, value: &Value) -> Result<String>;

    fn decode(&self, text: &str) -> Result<Value>;

    /// Decode a JSON array into its elements.
    fn decode_list(&self, text: &str) -> Result<Vec<Value>> {
        match self.decode(text)? {
            Value::Collection(c) => Ok(c.into_items()),
            Value::Array(a) => Ok(a.items),
            other => Err(ConvertError::failed(
                text,
                "JSON array",
                format!("decoded {} instead", kind_name(&other)),
            )),
        }
    }

    /// `true` if `text` is delimited like a JSON object or array.
    fn looks_structural(&self, text: &str) -> bool {
        looks_structural(text)
    }
}

/// Delimiter check only; the content is not validated.
pub fn looks_structural(text: &str) -> bool {
    let t = text.trim();
    t.len() >= 2
        && ((t.starts_with('{') && t.ends_with('}')) || (t.starts_with('[') && t.ends_with(']')))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::String(_) => "string",
        Value::Map(_) => "object",
        _ => "number",
    }
}

/// `serde_json` backed codec.
#[derive(Debug, Clone)]
pub struct SerdeJsonCodec {
    datetime_format: String,
}

impl Default for SerdeJsonCodec {
    fn default() -> Self {
        Self::new(DEFAULT_DATETIME_FORMAT)
    }
}

impl SerdeJsonCodec {
    /// `datetime_format` is the chrono layout used to render `DateTime` values.
    pub fn new(datetime_format: impl Into<String>) -> Self {
        Self {
            datetime_format: datetime_format.into(),
        }
    }

    fn to_json(&self, value: &Value) -> Json {
        match value {
            Value::Null => Json::Null,
            Value::Bool(v) => Json::Bool(*v),
            Value::Char(v) => Json::String(v.to_string()),
            Value::I8(v) => Json::from(*v),
            Value::I16(v) => Json::from(*v),
            Value::I32(v) => Json::from(*v),
            Value::I64(v) => Json::from(*v),
            Value::U8(v) => Json::from(*v),
            Value::U16(v) => Json::from(*v),
            Value::U32(v) => Json::from(*v),
            Value::U64(v) => Json::from(*v),
            Value::F32(v) => float(f64::from(*v)),
            Value::F64(v) => float(*v),
            Value::String(v) => Json::String(v.clone()),
            Value::DateTime(v) => Json::String(v.format(&self.datetime_format).to_string()),
            Value::Enum(e) => Json::String(e.name.to_string()),
            Value::Array(a) => Json::Array(a.items.iter().map(|v| self.to_json(v)).collect()),
            Value::Collection(c) => {
                Json::Array(c.items().iter().map(|v| self.to_json(v)).collect())
            }
            Value::Map(m) => {
                let mut out = JsonMap::new();
                for (k, v) in m.iter() {
                    let key = k
                        .key_text()
                        .unwrap_or_else(|| self.to_json(k).to_string());
                    out.insert(key, self.to_json(v));
                }
                for (k, v) in &m.props {
                    out.insert(k.clone(), self.to_json(v));
                }
                Json::Object(out)
            }
            Value::Bean(b) => Json::Object(
                b.props
                    .iter()
                    .map(|(k, v)| (k.clone(), self.to_json(v)))
                    .collect(),
            ),
            Value::Wrapper(w) => w.get().map_or(Json::Null, |v| self.to_json(v)),
        }
    }
}

fn float(v: f64) -> Json {
    Number::from_f64(v).map_or(Json::Null, Json::Number)
}

fn from_json(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(v) => Value::Bool(v),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::I64(i)
            } else if let Some(u) = n.as_u64() {
                Value::U64(u)
            } else {
                Value::F64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) => Value::String(s),
        Json::Array(items) => Value::list(items.into_iter().map(from_json)),
        Json::Object(fields) => {
            let mut map = MapValue::ordered();
            for (k, v) in fields {
                map.insert(Value::String(k), from_json(v));
            }
            Value::Map(map)
        }
    }
}

impl JsonCodec for SerdeJsonCodec {
    fn encode(&self, value: &Value) -> Result<String> {
        serde_json::to_string(&self.to_json(value))
            .map_err(|e| ConvertError::failed(value, "JSON", e))
    }

    fn decode(&self, text: &str) -> Result<Value> {
        let json: Json =
            serde_json::from_str(text).map_err(|e| ConvertError::failed(text, "JSON", e))?;
        Ok(from_json(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassId;
    use crate::value::BeanValue;

    #[test]
    fn test_sniff() {
        assert!(looks_structural(" {\"a\": 1} "));
        assert!(looks_structural("[1, 2]"));
        assert!(!looks_structural("{"));
        assert!(!looks_structural("plain"));
        assert!(!looks_structural("[1, 2"));
    }

    #[test]
    fn test_decode_object_keeps_order() {
        let codec = SerdeJsonCodec::default();
        let value = codec.decode(r#"{"z": 1, "a": [true, "x"], "n": null}"#).expect("decode");
        let map = value.as_map().expect("map");
        let keys: Vec<_> = map.entries().keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "n"]);
        assert_eq!(map.get_str("z"), Some(&Value::I64(1)));
        assert_eq!(map.get_str("a").and_then(Value::len), Some(2));
    }

    #[test]
    fn test_encode_bean_and_map() {
        let codec = SerdeJsonCodec::default();
        let bean = BeanValue::new(ClassId::OBJECT)
            .with("name", "probe")
            .with("level", 3i32)
            .with("ratio", f64::NAN);
        let text = codec.encode(&Value::Bean(bean)).expect("encode");
        assert_eq!(text, r#"{"name":"probe","level":3,"ratio":null}"#);

        let map = Value::map_of([(1i32, "one")]);
        assert_eq!(codec.encode(&map).expect("encode"), r#"{"1":"one"}"#);
    }

    #[test]
    fn test_decode_list() {
        let codec = SerdeJsonCodec::default();
        let items = codec.decode_list("[1, 2, 3]").expect("list");
        assert_eq!(items, vec![Value::I64(1), Value::I64(2), Value::I64(3)]);
        assert!(codec.decode_list("{}").is_err());
        assert!(codec.decode("{broken").is_err());
    }
}
