// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The [`Converter`] facade.

use super::builtin::BuiltinProvider;
use super::func::ConvertFn;
use super::registry::{ConverterRegistry, RegistryBuilder};
use super::session::{ConversionContext, Session};
use super::ConverterProvider;
use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::json::{JsonCodec, SerdeJsonCodec};
use crate::property::{self, CopyOptions, PropertyPath};
use crate::types::{Type, TypeDescriptor, TypeSystem};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// State shared by every session of a converter.
pub(crate) struct Shared {
    pub(crate) types: Arc<TypeSystem>,
    pub(crate) registry: ConverterRegistry,
    pub(crate) codec: Arc<dyn JsonCodec>,
    pub(crate) config: ConvertConfig,
}

/// Builder for [`Converter`].
pub struct ConverterBuilder {
    types: Arc<TypeSystem>,
    config: ConvertConfig,
    providers: Vec<Box<dyn ConverterProvider>>,
    codec: Option<Arc<dyn JsonCodec>>,
}

impl ConverterBuilder {
    #[must_use]
    pub fn config(mut self, config: ConvertConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a provider after the built-in one. Later providers win on
    /// duplicate Specific pairs.
    #[must_use]
    pub fn provider(mut self, provider: impl ConverterProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Replace the default `serde_json` codec.
    #[must_use]
    pub fn codec(mut self, codec: Arc<dyn JsonCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn build(self) -> Result<Converter> {
        self.config.validate()?;
        Ok(Converter::assemble(
            self.types,
            self.config,
            &self.providers,
            self.codec,
        ))
    }
}

/// Conversion engine: type system, converter registry, codec and config.
///
/// Cheap to clone; clones share every cache.
///
/// # Example
///
/// ```rust
/// use shapeshift::{Converter, Type, TypeSystem, Value};
/// use std::sync::Arc;
///
/// let converter = Converter::new(Arc::new(TypeSystem::new()));
/// let n = converter.convert("123", &Type::I32).unwrap();
/// assert_eq!(n, Value::I32(123));
///
/// let list = converter.convert(vec!["1", "2"], &Type::vec(Type::U8)).unwrap();
/// assert_eq!(list.items().map(<[Value]>::len), Some(2));
/// ```
#[derive(Clone)]
pub struct Converter {
    shared: Arc<Shared>,
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("types", &self.shared.types)
            .field("registry", &self.shared.registry)
            .field("config", &self.shared.config)
            .finish()
    }
}

impl Converter {
    /// Converter with the default configuration and built-in converters.
    pub fn new(types: Arc<TypeSystem>) -> Self {
        Self::assemble(types, ConvertConfig::default(), &[], None)
    }

    pub fn builder(types: Arc<TypeSystem>) -> ConverterBuilder {
        ConverterBuilder {
            types,
            config: ConvertConfig::default(),
            providers: Vec::new(),
            codec: None,
        }
    }

    fn assemble(
        types: Arc<TypeSystem>,
        config: ConvertConfig,
        providers: &[Box<dyn ConverterProvider>],
        codec: Option<Arc<dyn JsonCodec>>,
    ) -> Self {
        let builtin = BuiltinProvider::new(&config);
        let registry = providers
            .iter()
            .fold(
                RegistryBuilder::new()
                    .cache_capacity(config.lookup_cache_capacity)
                    .provider(&builtin),
                |builder, p| builder.provider(p.as_ref()),
            )
            .build();
        let codec = codec.unwrap_or_else(|| {
            Arc::new(SerdeJsonCodec::new(config.datetime_format.clone()))
        });
        log::debug!(
            "[convert] converter ready: {} classes, {} extra providers, max depth {}",
            types.len(),
            providers.len(),
            config.max_depth
        );
        Self {
            shared: Arc::new(Shared {
                types,
                registry,
                codec,
                config,
            }),
        }
    }

    pub fn types(&self) -> &Arc<TypeSystem> {
        &self.shared.types
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.shared.config
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.shared.registry
    }

    fn session(&self, context: ConversionContext) -> Session<'_> {
        Session::new(&self.shared, context)
    }

    /// Convert `value` to `target`.
    pub fn convert(&self, value: impl Into<Value>, target: &Type) -> Result<Value> {
        let target = self.shared.types.descriptor(None, target);
        self.convert_descriptor(value, &target)
    }

    /// Convert `value` to a descriptor carrying its declaring context.
    pub fn convert_descriptor(
        &self,
        value: impl Into<Value>,
        target: &Arc<TypeDescriptor>,
    ) -> Result<Value> {
        let value = value.into();
        let mut cx = self.session(ConversionContext::new(&value, target));
        cx.convert(value, target)
    }

    /// `default` for a null input, a null result or any failure.
    pub fn convert_or(
        &self,
        value: impl Into<Value>,
        target: &Type,
        default: impl Into<Value>,
    ) -> Value {
        let value = value.into();
        if value.is_null() {
            return default.into();
        }
        match self.convert(value, target) {
            Ok(Value::Null) => default.into(),
            Ok(v) => v,
            Err(e) => {
                log::debug!(
                    "[convert] default substituted for {}: {}",
                    self.shared.types.display(target),
                    e
                );
                default.into()
            }
        }
    }

    /// Convert through each type of `path` in turn.
    pub fn convert_chain(&self, value: impl Into<Value>, path: &[Type]) -> Result<Value> {
        if path.is_empty() {
            return Err(ConvertError::invalid("empty conversion chain"));
        }
        path.iter()
            .try_fold(value.into(), |value, target| self.convert(value, target))
    }

    /// Never fails: the target's empty value replaces any failure.
    pub fn convert_ignore(&self, value: impl Into<Value>, target: &Type) -> Value {
        self.convert(value, target).unwrap_or_else(|e| {
            log::debug!(
                "[convert] ignoring failure to {}: {}",
                self.shared.types.display(target),
                e
            );
            self.shared.types.empty_value(target)
        })
    }

    /// On failure, `handler` receives the error and the original value and
    /// decides the outcome.
    pub fn convert_with<H>(&self, value: impl Into<Value>, target: &Type, handler: H) -> Result<Value>
    where
        H: FnOnce(ConvertError, Value) -> Result<Value>,
    {
        let value = value.into();
        let original = value.clone();
        self.convert(value, target)
            .or_else(|e| handler(e, original))
    }

    /// `true` if some rule accepts the pair without looking at a value.
    pub fn is_supported(&self, source: &Type, target: &Type) -> bool {
        if target.is_object() || source == target {
            return true;
        }
        let types = &self.shared.types;
        let (s, t) = (types.descriptor(None, source), types.descriptor(None, target));
        let cx = self.session(ConversionContext::default());
        self.shared.registry.nested(&cx, None, &s, &t).is_some()
    }

    /// Reusable conversion function from `source` to `target`.
    pub fn converter_for(&self, source: &Type, target: &Type) -> Result<ConvertFn> {
        if !self.is_supported(source, target) {
            let types = &self.shared.types;
            return Err(ConvertError::unsupported(
                types.display(source),
                types.display(target),
            ));
        }
        let converter = self.clone();
        let target = self.shared.types.descriptor(None, target);
        Ok(ConvertFn::from_fn(move |v| {
            converter.convert_descriptor(v, &target)
        }))
    }

    /// Decode JSON text and convert the result to `target`.
    pub fn from_json(&self, text: &str, target: &Type) -> Result<Value> {
        let decoded = self.shared.codec.decode(text)?;
        self.convert(decoded, target)
    }

    /// Decode a JSON array, converting each element to `item`.
    pub fn from_json_list(&self, text: &str, item: &Type) -> Result<Vec<Value>> {
        let item = self.shared.types.descriptor(None, item);
        self.shared
            .codec
            .decode_list(text)?
            .into_iter()
            .map(|v| self.convert_descriptor(v, &item))
            .collect()
    }

    pub fn to_json(&self, value: &Value) -> Result<String> {
        self.shared.codec.encode(value)
    }

    /// Copy options seeded from the configured defaults.
    pub fn copy_options(&self) -> CopyOptions {
        CopyOptions::from_defaults(&self.shared.config.copy)
    }

    /// Read a cascading property path. With `ignore_errors` a failed lookup
    /// is logged and reads as `Null`; a malformed path always fails.
    pub fn get_property(&self, value: &Value, path: &str, ignore_errors: bool) -> Result<Value> {
        let path = PropertyPath::parse(path)?;
        match property::get_property(&self.shared.types, value, &path) {
            Err(e) if ignore_errors => {
                log::debug!("[copy] read of '{}' ignored: {}", path, e);
                Ok(Value::Null)
            }
            other => other,
        }
    }

    /// Write a cascading property path. With `ignore_errors` a failed write
    /// is logged and skipped; a malformed path always fails.
    pub fn set_property(
        &self,
        target: &mut Value,
        path: &str,
        value: impl Into<Value>,
        ignore_errors: bool,
    ) -> Result<()> {
        let path = PropertyPath::parse(path)?;
        let mut cx = self.session(ConversionContext::default());
        match property::set_property(&mut cx, target, &path, value.into()) {
            Err(e) if ignore_errors => {
                log::debug!("[copy] write of '{}' ignored: {}", path, e);
                Ok(())
            }
            other => other,
        }
    }

    pub fn common_mapping(
        &self,
        source: &Value,
        target: &Value,
        include_map_keys: bool,
        ignore_names: &[&str],
    ) -> (Vec<String>, Vec<String>) {
        property::common_mapping(
            &self.shared.types,
            source,
            target,
            include_map_keys,
            ignore_names,
        )
    }

    /// Copy every common property of `source` into `target`.
    pub fn copy_properties(
        &self,
        source: &Value,
        target: &mut Value,
        opts: &CopyOptions,
    ) -> Result<()> {
        let mut cx = self.session(ConversionContext::default());
        let owner = cx.descriptor(None, &target.runtime_type());
        property::copy_into(&mut cx, source, target, &owner, opts)
    }

    /// Copy `source_names[i]` to `target_names[i]`.
    pub fn copy_mapped(
        &self,
        source: &Value,
        source_names: &[&str],
        target: &mut Value,
        target_names: &[&str],
        opts: &CopyOptions,
    ) -> Result<()> {
        let mut cx = self.session(ConversionContext::default());
        property::copy_mapped(&mut cx, source, source_names, target, target_names, opts)
    }

    /// New `ty` instance filled from `source`.
    pub fn to_bean(&self, source: &Value, ty: &Type, opts: &CopyOptions) -> Result<Value> {
        let mut cx = self.session(ConversionContext::default());
        property::to_bean(&mut cx, source, ty, opts)
    }

    /// Readable properties of a bean or map as an ordered `String`-keyed map.
    pub fn to_map(&self, source: &Value) -> Result<Value> {
        let opts = self.copy_options();
        let mut cx = self.session(ConversionContext::default());
        property::to_map(&mut cx, source, &opts)
    }
}
