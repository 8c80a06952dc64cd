// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::convert::{NestedConverter, Session};
use crate::error::Result;
use crate::types::{ClassId, TypeDescriptor};
use crate::value::Value;
use std::sync::Arc;

/// JSON text to structural values and back, through the session codec.
///
/// Only text delimited like an object or array literal is decoded; any other
/// string falls through to the remaining rules. Structural values converted
/// to `String` are always encoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonTextRule;

impl NestedConverter for JsonTextRule {
    fn name(&self) -> &str {
        "json-text"
    }

    fn priority(&self) -> i32 {
        -40
    }

    fn supports(
        &self,
        cx: &Session<'_>,
        value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        let types = cx.types();
        if source.actual_class(types) == ClassId::STRING {
            target.shape(types).is_structural()
                && value.map_or(true, |v| {
                    v.as_str().is_some_and(|s| cx.codec().looks_structural(s))
                })
        } else {
            source.shape(types).is_structural() && target.actual_class(types) == ClassId::STRING
        }
    }

    fn convert(
        &self,
        cx: &mut Session<'_>,
        value: Value,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        match value {
            Value::String(text) => {
                let decoded = cx.codec().decode(&text)?;
                cx.convert(decoded, target)
            }
            other => cx.codec().encode(&other).map(Value::String),
        }
    }
}
