// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::dynamic::{EnumRule, FactoryRule, IdentityRule, NumericRule};
use super::nested::{
    ArrayRule, BeanRule, CollectionRule, FallbackRule, JsonTextRule, MapRule, NestedIdentityRule,
    SingleElementRule, VirtualBeanRule, WrapperRule,
};
use super::specific::{DateTimeMillis, FromText, MillisDateTime, ToText};
use super::{ConverterProvider, DynamicConverter, NestedConverter, SpecificConverter};
use crate::config::ConvertConfig;
use crate::types::ScalarKind;
use std::sync::Arc;

/// Converters every [`Converter`](crate::Converter) starts with.
///
/// Registered ahead of user providers, so a user Specific converter for the
/// same pair replaces the built-in one.
#[derive(Debug, Clone)]
pub struct BuiltinProvider {
    datetime_format: Arc<str>,
}

impl BuiltinProvider {
    pub fn new(config: &ConvertConfig) -> Self {
        Self {
            datetime_format: Arc::from(config.datetime_format.as_str()),
        }
    }
}

impl Default for BuiltinProvider {
    fn default() -> Self {
        Self::new(&ConvertConfig::default())
    }
}

impl ConverterProvider for BuiltinProvider {
    fn specific(&self) -> Vec<Arc<dyn SpecificConverter>> {
        let mut out: Vec<Arc<dyn SpecificConverter>> = Vec::new();
        for kind in ScalarKind::ALL {
            if kind == ScalarKind::String {
                continue;
            }
            out.push(Arc::new(FromText::new(kind, Arc::clone(&self.datetime_format))));
            out.push(Arc::new(ToText::new(kind, Arc::clone(&self.datetime_format))));
        }
        out.push(Arc::new(DateTimeMillis));
        out.push(Arc::new(MillisDateTime));
        out
    }

    fn dynamic(&self) -> Vec<Arc<dyn DynamicConverter>> {
        vec![
            Arc::new(IdentityRule),
            Arc::new(EnumRule),
            Arc::new(NumericRule),
            Arc::new(FactoryRule),
        ]
    }

    fn nested(&self) -> Vec<Arc<dyn NestedConverter>> {
        vec![
            Arc::new(NestedIdentityRule),
            Arc::new(WrapperRule),
            Arc::new(JsonTextRule),
            Arc::new(ArrayRule),
            Arc::new(CollectionRule),
            Arc::new(MapRule),
            Arc::new(SingleElementRule),
            Arc::new(VirtualBeanRule),
            Arc::new(BeanRule),
            Arc::new(FallbackRule),
        ]
    }
}
