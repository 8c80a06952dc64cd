// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::convert::{NestedConverter, Session};
use crate::error::Result;
use crate::types::{Shape, TypeDescriptor};
use crate::value::{Value, WrapperValue};
use std::sync::Arc;

/// Unwraps, wraps and re-wraps `Option`/`Ref` values.
///
/// The wrapper class itself is never converted as a leaf: the payload is
/// converted against the item type and wrapped again when the target is a
/// wrapper. An empty wrapper stays empty; unwrapped into a plain slot it
/// becomes that slot's zero value.
#[derive(Debug, Default, Clone, Copy)]
pub struct WrapperRule;

impl WrapperRule {
    fn wrap(
        cx: &mut Session<'_>,
        inner: Option<Value>,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        let types = cx.types();
        let Shape::Wrapper(kind) = target.shape(types) else {
            return Ok(inner.unwrap_or_default());
        };
        let item = target.item_descriptor(types);
        let inner = match inner {
            Some(v) if !v.is_null() => Some(cx.convert(v, &item)?),
            _ => None,
        };
        Ok(Value::Wrapper(WrapperValue {
            class: target.actual_class(types),
            kind,
            inner: inner.filter(|v| !v.is_null()).map(Box::new),
        }))
    }
}

impl NestedConverter for WrapperRule {
    fn name(&self) -> &str {
        "wrapper"
    }

    fn priority(&self) -> i32 {
        -50
    }

    fn supports(
        &self,
        cx: &Session<'_>,
        _value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        let types = cx.types();
        source.is_wrapper(types) || target.is_wrapper(types)
    }

    fn convert(
        &self,
        cx: &mut Session<'_>,
        value: Value,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        let types = cx.types();
        match (value, target.is_wrapper(types)) {
            (Value::Wrapper(w), true) => Self::wrap(cx, w.inner.map(|b| *b), target),
            (Value::Wrapper(w), false) => match w.inner {
                Some(inner) => cx.convert(*inner, target),
                None => Ok(types.zero_value(&target.concrete_type(types))),
            },
            (other, _) => Self::wrap(cx, Some(other), target),
        }
    }
}
