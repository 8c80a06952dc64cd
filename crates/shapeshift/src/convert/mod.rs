// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversion pipeline.
//!
//! Conversions resolve through three tiers of converters:
//!
//! - **Nested**: ordered structural rules over `(source, target)`
//!   descriptors. Re-selected on every call since applicability depends on
//!   the live value.
//! - **Dynamic**: ordered leaf rules over `(source class, target class)`.
//! - **Specific**: exact `(source class, target class)` leaf converters.
//!
//! A request always enters the Nested tier; its fallback rule defers to
//! Dynamic and then Specific. Leaf selections are cached per class pair.
//!
//! Converters are contributed by [`ConverterProvider`]s handed to
//! [`Converter::builder`](crate::Converter::builder).

mod builtin;
mod dynamic;
mod engine;
mod func;
mod nested;
mod number;
mod registry;
mod session;
mod specific;

pub use builtin::BuiltinProvider;
pub use dynamic::{EnumRule, FactoryRule, IdentityRule, NumericRule};
pub use engine::{Converter, ConverterBuilder};
pub use func::ConvertFn;
pub use nested::{
    ArrayRule, BeanRule, CollectionRule, FallbackRule, JsonTextRule, MapRule, NestedIdentityRule,
    SingleElementRule, VirtualBeanRule, WrapperRule,
};
pub use registry::{ConverterRegistry, LookupStats, RegistryBuilder};
pub use session::{ConversionContext, Session};
pub use specific::{DateTimeMillis, FromText, MillisDateTime, SpecificFn, ToText};

use crate::error::Result;
use crate::types::{ClassId, TypeDescriptor, TypeSystem};
use crate::value::Value;
use std::sync::Arc;

/// Exact-match leaf converter.
pub trait SpecificConverter: Send + Sync {
    fn source(&self) -> ClassId;
    fn target(&self) -> ClassId;
    fn convert(&self, value: Value) -> Result<Value>;
}

/// Rule-based leaf converter.
pub trait DynamicConverter: Send + Sync {
    fn name(&self) -> &str;

    /// Lower runs first; ties keep registration order.
    fn priority(&self) -> i32 {
        0
    }

    fn supports(&self, types: &TypeSystem, source: ClassId, target: ClassId) -> bool;

    fn convert(&self, types: &TypeSystem, value: Value, target: ClassId) -> Result<Value>;
}

/// Structural converter.
pub trait NestedConverter: Send + Sync {
    fn name(&self) -> &str;

    /// Lower runs first; ties keep registration order.
    fn priority(&self) -> i32 {
        0
    }

    /// `value` is `None` when only the static question is asked
    /// (`Converter::is_supported`); it is never `Value::Null`.
    fn supports(
        &self,
        cx: &Session<'_>,
        value: Option<&Value>,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> bool;

    fn convert(
        &self,
        cx: &mut Session<'_>,
        value: Value,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value>;
}

/// Source of converters, enumerated once when a registry is built.
pub trait ConverterProvider {
    fn specific(&self) -> Vec<Arc<dyn SpecificConverter>> {
        Vec::new()
    }

    fn dynamic(&self) -> Vec<Arc<dyn DynamicConverter>> {
        Vec::new()
    }

    fn nested(&self) -> Vec<Arc<dyn NestedConverter>> {
        Vec::new()
    }
}
