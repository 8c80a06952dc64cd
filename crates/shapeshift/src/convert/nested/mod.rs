// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in Nested (structural) rules, in priority order:
//!
//! | rule | priority | handles |
//! |------|----------|---------|
//! | [`NestedIdentityRule`] | -100 | value already of the target type |
//! | [`WrapperRule`] | -50 | `Option`/`Ref` on either side |
//! | [`JsonTextRule`] | -40 | JSON text to and from structural values |
//! | [`ArrayRule`] | -30 | sequence to array |
//! | [`CollectionRule`] | -20 | sequence to collection |
//! | [`MapRule`] | -10 | map or bean to map |
//! | [`SingleElementRule`] | 0 | one-element sequence to and from a leaf |
//! | [`VirtualBeanRule`] | 10 | bean or map to an abstract bean |
//! | [`BeanRule`] | 20 | bean, map or positional record to a bean |
//! | [`FallbackRule`] | `i32::MAX` | leaf tiers |

mod bean;
mod container;
mod text;
mod wrapper;

pub use bean::{BeanRule, VirtualBeanRule};
pub use container::{ArrayRule, CollectionRule, MapRule, SingleElementRule};
pub use text::JsonTextRule;
pub use wrapper::WrapperRule;

use super::{NestedConverter, Session};
use crate::error::Result;
use crate::types::{Shape, TypeDescriptor};
use crate::value::Value;
use std::sync::Arc;

/// Elements of an array or collection, by value.
pub(crate) fn into_items(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(a) => Some(a.items),
        Value::Collection(c) => Some(c.into_items()),
        _ => None,
    }
}

/// Returns the value untouched when it already satisfies the target.
///
/// Containers only short-circuit when the target leaves their element
/// types unconstrained; `Vec<i32>` still converts every element of a `Vec`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NestedIdentityRule;

impl NestedConverter for NestedIdentityRule {
    fn name(&self) -> &str {
        "identity"
    }

    fn priority(&self) -> i32 {
        -100
    }

    fn supports(
        &self,
        cx: &Session<'_>,
        _value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        let types = cx.types();
        let concrete = target.concrete_type(types);
        if !types.is_assignable_type(&concrete, source.actual_type(types)) {
            return false;
        }
        match types.shape_of(&concrete) {
            Shape::Object | Shape::Scalar(_) | Shape::Enum | Shape::Array => true,
            _ => !concrete.has_constrained_args(),
        }
    }

    fn convert(
        &self,
        _cx: &mut Session<'_>,
        value: Value,
        _target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        Ok(value)
    }
}

/// Defers to the Dynamic and Specific tiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackRule;

impl NestedConverter for FallbackRule {
    fn name(&self) -> &str {
        "leaf"
    }

    fn priority(&self) -> i32 {
        i32::MAX
    }

    fn supports(
        &self,
        cx: &Session<'_>,
        value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        let types = cx.types();
        value.is_some()
            || cx
                .registry()
                .has_leaf(types, source.actual_class(types), target.actual_class(types))
    }

    fn convert(
        &self,
        cx: &mut Session<'_>,
        value: Value,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        cx.convert_leaf(value, target)
    }
}
