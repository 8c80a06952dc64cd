// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Range-checked numeric coercion shared by the leaf converters.

use crate::types::ScalarKind;
use crate::value::Value;

/// Numeric view of a scalar. `bool` reads as 0/1, `char` as its code point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i128),
    Float(f64),
}

macro_rules! int_into {
    ($number:expr, $t:ty, $variant:ident) => {{
        let i = match $number {
            Number::Int(i) => i,
            Number::Float(f) => float_to_int(f)?,
        };
        <$t>::try_from(i)
            .map(Value::$variant)
            .map_err(|_| format!("{i} out of range for {}", stringify!($t)))
    }};
}

fn float_to_int(f: f64) -> Result<i128, String> {
    if !f.is_finite() {
        return Err(format!("{f} has no integer value"));
    }
    // Truncates toward zero; saturation beyond i128 is caught by the
    // target range check.
    Ok(f.trunc() as i128)
}

impl Number {
    pub(crate) fn of(value: &Value) -> Option<Number> {
        let n = match value {
            Value::Bool(b) => Number::Int(i128::from(*b)),
            Value::Char(c) => Number::Int(i128::from(u32::from(*c))),
            Value::I8(v) => Number::Int(i128::from(*v)),
            Value::I16(v) => Number::Int(i128::from(*v)),
            Value::I32(v) => Number::Int(i128::from(*v)),
            Value::I64(v) => Number::Int(i128::from(*v)),
            Value::U8(v) => Number::Int(i128::from(*v)),
            Value::U16(v) => Number::Int(i128::from(*v)),
            Value::U32(v) => Number::Int(i128::from(*v)),
            Value::U64(v) => Number::Int(i128::from(*v)),
            Value::F32(v) => Number::Float(f64::from(*v)),
            Value::F64(v) => Number::Float(*v),
            _ => return None,
        };
        Some(n)
    }

    /// Parse decimal text; a float literal is accepted and truncated when an
    /// integer is wanted later.
    pub(crate) fn parse(text: &str) -> Result<Number, String> {
        let t = text.trim();
        if let Ok(i) = t.parse::<i128>() {
            return Ok(Number::Int(i));
        }
        t.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| format!("'{t}' is not a number"))
    }

    pub(crate) fn into_kind(self, kind: ScalarKind) -> Result<Value, String> {
        match kind {
            ScalarKind::Bool => Ok(Value::Bool(match self {
                Number::Int(i) => i != 0,
                Number::Float(f) => f != 0.0,
            })),
            ScalarKind::Char => {
                let i = match self {
                    Number::Int(i) => i,
                    Number::Float(f) => float_to_int(f)?,
                };
                u32::try_from(i)
                    .ok()
                    .and_then(char::from_u32)
                    .map(Value::Char)
                    .ok_or_else(|| format!("{i} is not a valid char"))
            }
            ScalarKind::I8 => int_into!(self, i8, I8),
            ScalarKind::I16 => int_into!(self, i16, I16),
            ScalarKind::I32 => int_into!(self, i32, I32),
            ScalarKind::I64 => int_into!(self, i64, I64),
            ScalarKind::U8 => int_into!(self, u8, U8),
            ScalarKind::U16 => int_into!(self, u16, U16),
            ScalarKind::U32 => int_into!(self, u32, U32),
            ScalarKind::U64 => int_into!(self, u64, U64),
            ScalarKind::F32 => match self {
                Number::Int(i) => Ok(Value::F32(i as f32)),
                Number::Float(f) => {
                    let v = f as f32;
                    if f.is_finite() && !v.is_finite() {
                        Err(format!("{f} out of range for f32"))
                    } else {
                        Ok(Value::F32(v))
                    }
                }
            },
            ScalarKind::F64 => Ok(Value::F64(match self {
                Number::Int(i) => i as f64,
                Number::Float(f) => f,
            })),
            ScalarKind::String | ScalarKind::DateTime => {
                Err(format!("{} is not numeric", kind.name()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_checks() {
        assert_eq!(Number::Int(127).into_kind(ScalarKind::I8), Ok(Value::I8(127)));
        assert!(Number::Int(128).into_kind(ScalarKind::I8).is_err());
        assert!(Number::Int(-1).into_kind(ScalarKind::U32).is_err());
        assert_eq!(
            Number::Int(i128::from(u64::MAX)).into_kind(ScalarKind::U64),
            Ok(Value::U64(u64::MAX))
        );
    }

    #[test]
    fn test_float_truncates_toward_zero() {
        assert_eq!(Number::Float(-2.9).into_kind(ScalarKind::I32), Ok(Value::I32(-2)));
        assert_eq!(Number::Float(2.9).into_kind(ScalarKind::U8), Ok(Value::U8(2)));
        assert!(Number::Float(f64::NAN).into_kind(ScalarKind::I64).is_err());
        assert!(Number::Float(1e300).into_kind(ScalarKind::F32).is_err());
        assert!(Number::Float(1e300).into_kind(ScalarKind::I64).is_err());
    }

    #[test]
    fn test_bool_and_char() {
        assert_eq!(Number::of(&Value::Bool(true)), Some(Number::Int(1)));
        assert_eq!(Number::Int(65).into_kind(ScalarKind::Char), Ok(Value::Char('A')));
        assert!(Number::Int(0xD800).into_kind(ScalarKind::Char).is_err());
        assert_eq!(Number::Float(0.0).into_kind(ScalarKind::Bool), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Number::parse(" 42 "), Ok(Number::Int(42)));
        assert_eq!(Number::parse("1.5"), Ok(Number::Float(1.5)));
        assert!(Number::parse("12x").is_err());
    }
}
