// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-call conversion state.
//!
//! A [`Session`] is created once per top-level conversion and threaded
//! through every recursive step, so nested rules see the same
//! [`ConversionContext`] the outer call entered with. Starting a fresh
//! conversion through the [`Converter`](crate::Converter) facade from inside
//! a rule opens its own session; the outer one is left untouched.

use super::engine::Shared;
use super::registry::ConverterRegistry;
use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::json::JsonCodec;
use crate::types::{Type, TypeDescriptor, TypeSystem};
use crate::value::Value;
use std::sync::Arc;

/// Declaring and declared types of the outermost conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionContext {
    pub source_declaring: Option<Type>,
    pub source_type: Option<Type>,
    pub target_declaring: Option<Type>,
    pub target_type: Option<Type>,
}

impl ConversionContext {
    /// Context for a conversion of `source` into `target`.
    pub fn new(source: &Value, target: &TypeDescriptor) -> Self {
        Self {
            source_declaring: None,
            source_type: (!source.is_null()).then(|| source.runtime_type()),
            target_declaring: target.declaring().cloned(),
            target_type: Some(target.raw().clone()),
        }
    }
}

/// Recursive conversion state: shared tables, context and depth.
pub struct Session<'a> {
    shared: &'a Shared,
    context: ConversionContext,
    depth: usize,
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("context", &self.context)
            .field("depth", &self.depth)
            .finish()
    }
}

impl<'a> Session<'a> {
    pub(crate) fn new(shared: &'a Shared, context: ConversionContext) -> Self {
        Self {
            shared,
            context,
            depth: 0,
        }
    }

    pub fn types(&self) -> &'a TypeSystem {
        &self.shared.types
    }

    pub fn codec(&self) -> &'a dyn JsonCodec {
        self.shared.codec.as_ref()
    }

    pub fn config(&self) -> &'a ConvertConfig {
        &self.shared.config
    }

    pub fn registry(&self) -> &'a ConverterRegistry {
        &self.shared.registry
    }

    pub fn context(&self) -> &ConversionContext {
        &self.context
    }

    /// Nesting level of the rule currently running (0 at the top).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn descriptor(&self, declaring: Option<&Type>, raw: &Type) -> Arc<TypeDescriptor> {
        self.types().descriptor(declaring, raw)
    }

    /// Convert `value` to `target` through the Nested tier.
    ///
    /// A null becomes the target's zero value and an `Object` target keeps
    /// the value as is; neither consults a converter.
    pub fn convert(&mut self, value: Value, target: &Arc<TypeDescriptor>) -> Result<Value> {
        let types = self.types();
        let target = self.contextualize(target);
        if value.is_null() {
            return Ok(types.zero_value(&target.concrete_type(types)));
        }
        if target.is_object(types) {
            return Ok(value);
        }

        let limit = self.config().max_depth;
        if self.depth >= limit {
            return Err(ConvertError::DepthExceeded { limit });
        }

        let source = types.descriptor(None, &value.runtime_type());
        let shared = self.shared;
        let Some(rule) = shared
            .registry
            .nested(self, Some(&value), &source, &target)
        else {
            return Err(self.unsupported(&value, &target));
        };
        log::trace!(
            "[convert] {} -> {} via {}",
            types.display(source.raw()),
            types.display(target.actual_type(types)),
            rule.name()
        );

        self.depth += 1;
        let out = rule.convert(self, value, &target);
        self.depth -= 1;
        out
    }

    /// Convert to a type written without declaring context.
    pub fn convert_to(&mut self, value: Value, target: &Type) -> Result<Value> {
        let target = self.descriptor(None, target);
        self.convert(value, &target)
    }

    /// Hand `value` to the Dynamic and Specific tiers.
    pub fn convert_leaf(&self, value: Value, target: &TypeDescriptor) -> Result<Value> {
        let types = self.types();
        self.registry()
            .convert_leaf(types, value, target.actual_class(types))
    }

    /// `Unsupported` error naming the runtime type of `value` and `target`.
    pub fn unsupported(&self, value: &Value, target: &TypeDescriptor) -> ConvertError {
        let types = self.types();
        ConvertError::unsupported(
            types.display(&value.runtime_type()),
            types.display(target.actual_type(types)),
        )
    }

    // A descriptor built without declaring context picks up the declaring
    // type of the outermost target when it still has free parameters.
    fn contextualize(&self, target: &Arc<TypeDescriptor>) -> Arc<TypeDescriptor> {
        let types = self.types();
        match (&self.context.target_declaring, target.declaring()) {
            (Some(declaring), None) if target.is_unresolved(types) => {
                types.descriptor(Some(declaring), target.raw())
            }
            _ => Arc::clone(target),
        }
    }
}
