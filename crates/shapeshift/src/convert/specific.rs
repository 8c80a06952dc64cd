// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in Specific converters: text to and from every scalar, and
//! `DateTime` to and from epoch milliseconds.

use super::number::Number;
use super::SpecificConverter;
use crate::config::FALLBACK_DATETIME_FORMATS;
use crate::error::{ConvertError, Result};
use crate::types::{ClassId, ScalarKind};
use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

type SpecificBody = dyn Fn(Value) -> Result<Value> + Send + Sync;

/// Closure-backed Specific converter.
pub struct SpecificFn {
    source: ClassId,
    target: ClassId,
    body: Box<SpecificBody>,
}

impl SpecificFn {
    pub fn new<F>(source: ClassId, target: ClassId, body: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            source,
            target,
            body: Box::new(body),
        }
    }
}

impl SpecificConverter for SpecificFn {
    fn source(&self) -> ClassId {
        self.source
    }

    fn target(&self) -> ClassId {
        self.target
    }

    fn convert(&self, value: Value) -> Result<Value> {
        (self.body)(value)
    }
}

/// `String` to a scalar kind.
///
/// Booleans accept `true/false`, `1/0`, `yes/no` and `on/off` in any case.
/// Integers accept a decimal float literal and truncate it. Date-times try
/// the configured layout, then the ISO-8601 variants, then a bare date.
#[derive(Debug, Clone)]
pub struct FromText {
    kind: ScalarKind,
    datetime_format: Arc<str>,
}

impl FromText {
    pub fn new(kind: ScalarKind, datetime_format: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            datetime_format: datetime_format.into(),
        }
    }

    fn parse(&self, text: &str) -> std::result::Result<Value, String> {
        match self.kind {
            ScalarKind::String => Ok(Value::String(text.to_string())),
            ScalarKind::Bool => parse_bool(text).map(Value::Bool),
            ScalarKind::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(format!("'{text}' is not a single character")),
                }
            }
            ScalarKind::DateTime => self.parse_datetime(text).map(Value::DateTime),
            kind => Number::parse(text)?.into_kind(kind),
        }
    }

    fn parse_datetime(&self, text: &str) -> std::result::Result<NaiveDateTime, String> {
        let t = text.trim();
        std::iter::once(&*self.datetime_format)
            .chain(FALLBACK_DATETIME_FORMATS.iter().copied())
            .find_map(|fmt| NaiveDateTime::parse_from_str(t, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(t, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(|| format!("'{t}' does not match '{}'", self.datetime_format))
    }
}

fn parse_bool(text: &str) -> std::result::Result<bool, String> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("'{text}' is not a boolean")),
    }
}

impl SpecificConverter for FromText {
    fn source(&self) -> ClassId {
        ClassId::STRING
    }

    fn target(&self) -> ClassId {
        self.kind.class_id()
    }

    fn convert(&self, value: Value) -> Result<Value> {
        let Value::String(text) = &value else {
            return Err(ConvertError::failed(&value, self.kind.name(), "not a string"));
        };
        self.parse(text)
            .map_err(|cause| ConvertError::failed(&value, self.kind.name(), cause))
    }
}

/// Scalar kind to `String`.
#[derive(Debug, Clone)]
pub struct ToText {
    kind: ScalarKind,
    datetime_format: Arc<str>,
}

impl ToText {
    pub fn new(kind: ScalarKind, datetime_format: impl Into<Arc<str>>) -> Self {
        Self {
            kind,
            datetime_format: datetime_format.into(),
        }
    }
}

impl SpecificConverter for ToText {
    fn source(&self) -> ClassId {
        self.kind.class_id()
    }

    fn target(&self) -> ClassId {
        ClassId::STRING
    }

    fn convert(&self, value: Value) -> Result<Value> {
        let text = match &value {
            Value::Bool(v) => v.to_string(),
            Value::Char(v) => v.to_string(),
            Value::I8(v) => v.to_string(),
            Value::I16(v) => v.to_string(),
            Value::I32(v) => v.to_string(),
            Value::I64(v) => v.to_string(),
            Value::U8(v) => v.to_string(),
            Value::U16(v) => v.to_string(),
            Value::U32(v) => v.to_string(),
            Value::U64(v) => v.to_string(),
            Value::F32(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            Value::String(v) => v.clone(),
            Value::DateTime(v) => v.format(&self.datetime_format).to_string(),
            other => {
                return Err(ConvertError::failed(
                    other,
                    "String",
                    format!("not a {} value", self.kind.name()),
                ))
            }
        };
        Ok(Value::String(text))
    }
}

/// `DateTime` (read as UTC) to epoch milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeMillis;

impl SpecificConverter for DateTimeMillis {
    fn source(&self) -> ClassId {
        ClassId::DATETIME
    }

    fn target(&self) -> ClassId {
        ClassId::I64
    }

    fn convert(&self, value: Value) -> Result<Value> {
        match value {
            Value::DateTime(dt) => Ok(Value::I64(dt.and_utc().timestamp_millis())),
            other => Err(ConvertError::failed(other, "i64", "not a date-time")),
        }
    }
}

/// Epoch milliseconds to a UTC `DateTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MillisDateTime;

impl SpecificConverter for MillisDateTime {
    fn source(&self) -> ClassId {
        ClassId::I64
    }

    fn target(&self) -> ClassId {
        ClassId::DATETIME
    }

    fn convert(&self, value: Value) -> Result<Value> {
        let Value::I64(ms) = value else {
            return Err(ConvertError::failed(value, "DateTime", "not epoch milliseconds"));
        };
        chrono::DateTime::from_timestamp_millis(ms)
            .map(|dt| Value::DateTime(dt.naive_utc()))
            .ok_or_else(|| ConvertError::failed(ms, "DateTime", "timestamp out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DATETIME_FORMAT;

    fn from_text(kind: ScalarKind, text: &str) -> Result<Value> {
        FromText::new(kind, DEFAULT_DATETIME_FORMAT).convert(Value::from(text))
    }

    #[test]
    fn test_text_to_numbers() {
        assert_eq!(from_text(ScalarKind::I32, "123").ok(), Some(Value::I32(123)));
        assert_eq!(from_text(ScalarKind::I32, " -7 ").ok(), Some(Value::I32(-7)));
        assert_eq!(from_text(ScalarKind::I64, "12.9").ok(), Some(Value::I64(12)));
        assert_eq!(from_text(ScalarKind::F64, "2.5").ok(), Some(Value::F64(2.5)));

        let err = from_text(ScalarKind::I32, "12x").expect_err("malformed");
        assert!(matches!(err, ConvertError::Failed { .. }));
        assert!(from_text(ScalarKind::U8, "300").is_err());
    }

    #[test]
    fn test_text_to_bool_and_char() {
        assert_eq!(from_text(ScalarKind::Bool, "Yes").ok(), Some(Value::Bool(true)));
        assert_eq!(from_text(ScalarKind::Bool, "off").ok(), Some(Value::Bool(false)));
        assert!(from_text(ScalarKind::Bool, "maybe").is_err());
        assert_eq!(from_text(ScalarKind::Char, "x").ok(), Some(Value::Char('x')));
        assert!(from_text(ScalarKind::Char, "xy").is_err());
    }

    #[test]
    fn test_text_to_datetime() {
        let expected = NaiveDate::from_ymd_opt(2021, 1, 1)
            .and_then(|d| d.and_hms_opt(10, 10, 10))
            .expect("date");
        for text in ["2021-01-01 10:10:10", "2021-01-01T10:10:10"] {
            assert_eq!(
                from_text(ScalarKind::DateTime, text).ok(),
                Some(Value::DateTime(expected))
            );
        }
        let midnight = from_text(ScalarKind::DateTime, "2021-01-01").expect("date only");
        assert_eq!(
            midnight.as_datetime().map(|d| d.date()),
            Some(expected.date())
        );
        assert!(from_text(ScalarKind::DateTime, "yesterday").is_err());
    }

    #[test]
    fn test_datetime_millis_round_trip() {
        let dt = NaiveDate::from_ymd_opt(2021, 1, 1)
            .and_then(|d| d.and_hms_opt(10, 10, 10))
            .expect("date");
        let ms = DateTimeMillis.convert(Value::DateTime(dt)).expect("millis");
        assert_eq!(ms, Value::I64(1_609_495_810_000));
        assert_eq!(MillisDateTime.convert(ms).ok(), Some(Value::DateTime(dt)));
    }

    #[test]
    fn test_to_text() {
        let text = ToText::new(ScalarKind::F64, DEFAULT_DATETIME_FORMAT);
        assert_eq!(text.convert(Value::F64(1.5)).ok(), Some(Value::from("1.5")));
        let text = ToText::new(ScalarKind::I32, DEFAULT_DATETIME_FORMAT);
        assert_eq!(text.convert(Value::I32(-4)).ok(), Some(Value::from("-4")));
    }
}
