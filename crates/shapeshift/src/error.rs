// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for conversions and property access.
//!
//! Every public entry point either returns a value, returns a caller-supplied
//! default, or fails with one of these variants. Type and value descriptions
//! are rendered to strings at the failure site so the error stays `'static`
//! and can cross thread boundaries.

use std::error::Error as StdError;
use std::fmt;

/// Boxed cause carried by [`ConvertError::Failed`].
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Conversion and property access failures.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// No converter of any tier accepts the `(from, to)` pair.
    #[error("no converter from {from} to {to}")]
    Unsupported { from: String, to: String },

    /// A matched converter ran and failed.
    #[error("failed to convert {value} to {target}: {cause}")]
    Failed {
        value: String,
        target: String,
        #[source]
        cause: BoxedCause,
    },

    /// Caller error (malformed path, mismatched name lists, bad config).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A multi-element (or empty) container was coerced to a non-container target.
    #[error("cannot convert {len}-element {from} to single value of {to}")]
    Cardinality { len: usize, from: String, to: String },

    /// Property lookup or write failed.
    #[error("property '{path}' of {class}: {reason}")]
    PropertyAccess {
        class: String,
        path: String,
        reason: String,
    },

    /// Recursion ceiling reached (usually a self-referential value graph).
    #[error("conversion exceeded maximum depth {limit}")]
    DepthExceeded { limit: usize },
}

impl ConvertError {
    pub fn unsupported(from: impl fmt::Display, to: impl fmt::Display) -> Self {
        Self::Unsupported {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn failed(
        value: impl fmt::Debug,
        target: impl fmt::Display,
        cause: impl Into<BoxedCause>,
    ) -> Self {
        Self::Failed {
            value: summarize(&value),
            target: target.to_string(),
            cause: cause.into(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn property(
        class: impl fmt::Display,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::PropertyAccess {
            class: class.to_string(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// `true` for caller errors, cardinality violations included.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Cardinality { .. })
    }

    pub fn is_property_access(&self) -> bool {
        matches!(self, Self::PropertyAccess { .. })
    }

    /// Add context to the error.
    ///
    /// Produces `"context: original"` for message-carrying variants; the
    /// structured variants keep their fields and are returned unchanged.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        match self {
            Self::InvalidArgument(msg) => Self::InvalidArgument(format!("{ctx}: {msg}")),
            Self::PropertyAccess {
                class,
                path,
                reason,
            } => Self::PropertyAccess {
                class,
                path,
                reason: format!("{ctx}: {reason}"),
            },
            other => other,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ConvertError>;

const MAX_SUMMARY: usize = 96;

/// Debug rendering clipped to a readable length for diagnostics.
fn summarize(value: &impl fmt::Debug) -> String {
    let mut text = format!("{value:?}");
    if text.len() > MAX_SUMMARY {
        let mut cut = MAX_SUMMARY;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}
