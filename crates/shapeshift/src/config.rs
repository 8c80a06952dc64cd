// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Engine configuration.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: compile-time defaults (`DEFAULT_*` constants).
//! - **Level 2 (Runtime)**: [`ConvertConfig`], handed to `Converter::builder()`
//!   and frozen once the converter is built.
//!
//! With the `config-loaders` feature the runtime config can be read from YAML:
//!
//! ```yaml
//! max_depth: 32
//! lookup_cache_capacity: 4096
//! max_index_padding: 256
//! datetime_format: "%Y/%m/%d %H:%M:%S"
//! copy:
//!   ignore_null: true
//! ```

use crate::error::{ConvertError, Result};
use serde::Deserialize;

/// Recursion ceiling for structural conversion.
///
/// Self-referential value graphs are not detected; they hit this limit and
/// fail with `ConvertError::DepthExceeded`.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Capacity of the `(source class, target class)` leaf lookup cache.
pub const DEFAULT_LOOKUP_CACHE_CAPACITY: usize = 1024;

/// Null elements a path write may append to reach an index past the end
/// of a collection.
pub const DEFAULT_MAX_INDEX_PADDING: usize = 4096;

/// Text layout used by the built-in `DateTime` <-> `String` converters.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Additional layouts accepted when parsing a `DateTime` from text.
pub const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Defaults applied by bean-copy operations when the caller does not pass options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CopyDefaults {
    /// Skip source properties whose value is null.
    pub ignore_null: bool,
    /// Log and skip per-property failures instead of raising.
    pub ignore_errors: bool,
}

/// Runtime configuration of a `Converter`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub max_depth: usize,
    pub lookup_cache_capacity: usize,
    pub max_index_padding: usize,
    pub datetime_format: String,
    pub copy: CopyDefaults,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            lookup_cache_capacity: DEFAULT_LOOKUP_CACHE_CAPACITY,
            max_index_padding: DEFAULT_MAX_INDEX_PADDING,
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            copy: CopyDefaults::default(),
        }
    }
}

impl ConvertConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn lookup_cache_capacity(mut self, capacity: usize) -> Self {
        self.lookup_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn max_index_padding(mut self, padding: usize) -> Self {
        self.max_index_padding = padding;
        self
    }

    #[must_use]
    pub fn datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = format.into();
        self
    }

    #[must_use]
    pub fn copy_defaults(mut self, copy: CopyDefaults) -> Self {
        self.copy = copy;
        self
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ConvertError::invalid("max_depth must be > 0"));
        }
        if self.lookup_cache_capacity == 0 {
            return Err(ConvertError::invalid("lookup_cache_capacity must be > 0"));
        }
        if self.datetime_format.trim().is_empty() {
            return Err(ConvertError::invalid("datetime_format must not be empty"));
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| ConvertError::invalid(format!("config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load, parse and validate a YAML file.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConvertError::invalid(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&content)
    }
}
