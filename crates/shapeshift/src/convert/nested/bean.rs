// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bean rules.

use crate::convert::{NestedConverter, Session};
use crate::error::{ConvertError, Result};
use crate::property::copy::{common_mapping, convert_member, copy_into, read_slot, CopyOptions};
use crate::types::{Shape, TypeDescriptor, TypeSystem};
use crate::value::Value;
use std::sync::Arc;

fn is_abstract_bean(types: &TypeSystem, target: &TypeDescriptor) -> bool {
    target.is_bean(types) && types.class(target.actual_class(types)).is_abstract()
}

/// Bean or map to an abstract bean type: a virtual bean tagged with the
/// abstract class, holding every readable property of the source.
///
/// Properties the abstract class declares are converted to their declared
/// type; the others are kept as they are.
#[derive(Debug, Default, Clone, Copy)]
pub struct VirtualBeanRule;

impl NestedConverter for VirtualBeanRule {
    fn name(&self) -> &str {
        "virtual-bean"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn supports(
        &self,
        cx: &Session<'_>,
        _value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        let types = cx.types();
        is_abstract_bean(types, target) && matches!(source.shape(types), Shape::Bean | Shape::Map(_))
    }

    fn convert(
        &self,
        cx: &mut Session<'_>,
        value: Value,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        let types = cx.types();
        let mut out = types.instantiate(&target.concrete_type(types))?;
        let (from, to) = common_mapping::<&str>(types, &value, &out, true, &[]);
        let declared = types.properties(out.class_id());

        let Value::Bean(bean) = &mut out else {
            return Err(cx.unsupported(&value, target));
        };
        for (from, to) in from.into_iter().zip(to) {
            let v = read_slot(&value, &from).unwrap_or_default();
            let v = match declared.get(&to) {
                Some(meta) => convert_member(cx, target, &meta.ty, v)?,
                None => v,
            };
            bean.props.insert(to, v);
        }
        Ok(out)
    }
}

/// Bean, map or positional record to a concrete bean.
///
/// Every common property is copied and converted to the declared type of
/// its target property; a property that fails aborts the conversion.
#[derive(Debug, Default, Clone, Copy)]
pub struct BeanRule;

impl NestedConverter for BeanRule {
    fn name(&self) -> &str {
        "bean"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn supports(
        &self,
        cx: &Session<'_>,
        _value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool {
        let types = cx.types();
        let source_shape = source.shape(types);
        target.is_bean(types)
            && !is_abstract_bean(types, target)
            && (matches!(source_shape, Shape::Bean | Shape::Map(_)) || source_shape.is_sequence())
    }

    fn convert(
        &self,
        cx: &mut Session<'_>,
        value: Value,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        let types = cx.types();
        let mut out = types.instantiate(&target.concrete_type(types))?;
        if !matches!(out, Value::Bean(_)) {
            return Err(ConvertError::unsupported(
                types.display(&value.runtime_type()),
                types.display(target.actual_type(types)),
            ));
        }
        copy_into(cx, &value, &mut out, target, &CopyOptions::default())?;
        Ok(out)
    }
}
