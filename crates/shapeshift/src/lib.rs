// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # shapeshift - generic-aware value conversion
//!
//! Converts dynamic values between shapes (scalars, enums, arrays,
//! collections, maps, beans and wrappers) using explicit class metadata and
//! generic type descriptors, so element and property types declared through
//! a generic parameter resolve to their concrete binding.
//!
//! ## Quick Start
//!
//! ```rust
//! use shapeshift::{ClassBuilder, Converter, Result, Type, TypeSystem, Value};
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let types = Arc::new(TypeSystem::new());
//!     let point = types.define(
//!         ClassBuilder::bean("Point")
//!             .property("x", Type::I32)
//!             .property("y", Type::I32),
//!     )?;
//!     let converter = Converter::new(types);
//!
//!     let p = converter.convert(r#"{"x": 1, "y": "2"}"#, &Type::Class(point))?;
//!     assert_eq!(converter.get_property(&p, "y", false)?, Value::I32(2));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  Converter (facade): convert / convert_or / convert_chain /   |
//! |  is_supported / converter_for / properties / JSON             |
//! +---------------------------------------------------------------+
//! |  Session: conversion context + depth, one per top-level call  |
//! +---------------------------------------------------------------+
//! |  Nested rules  -> Dynamic rules -> Specific converters        |
//! |  (structural)     (leaf, ordered)  (leaf, exact pair)         |
//! +---------------------------------------------------------------+
//! |  TypeSystem: classes, Type, TypeDescriptor, generics resolver |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Converter`] | Entry point; owns the registry, codec and config |
//! | [`TypeSystem`] | Class universe and descriptor/metadata caches |
//! | [`Type`] | Possibly generic type expression |
//! | [`TypeDescriptor`] | Type plus the declaring context it was written in |
//! | [`Value`] | Dynamic value of any shape |
//! | [`ConvertError`] | Error taxonomy |
//!
//! ## Modules Overview
//!
//! - [`convert`] - converter tiers, registry and the facade
//! - [`types`] - class metadata and generics resolution
//! - [`value`] - the dynamic value model
//! - [`property`] - cascading property paths and bean copy
//! - [`json`] - JSON codec collaborator
//! - [`config`] - defaults and runtime configuration

/// Defaults and runtime configuration.
pub mod config;
/// Converter tiers, registry, session and the [`Converter`] facade.
pub mod convert;
/// Error taxonomy.
pub mod error;
/// JSON codec collaborator.
pub mod json;
/// Property metadata, cascading paths and bean copy.
pub mod property;
/// Class universe, type expressions and generics resolution.
pub mod types;
/// Dynamic value model.
pub mod value;

pub use config::{ConvertConfig, CopyDefaults};
pub use convert::{
    ConversionContext, ConvertFn, Converter, ConverterBuilder, ConverterProvider,
    ConverterRegistry, DynamicConverter, NestedConverter, Session, SpecificConverter, SpecificFn,
};
pub use error::{ConvertError, Result};
pub use json::{JsonCodec, SerdeJsonCodec};
pub use property::{CopyOptions, PropertyPath};
pub use types::{ClassBuilder, ClassId, PropertyDef, Shape, Type, TypeDescriptor, TypeSystem};
pub use value::Value;
