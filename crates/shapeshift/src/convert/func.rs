// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::error::Result;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type Body = dyn Fn(Value) -> Result<Value> + Send + Sync;

/// Reusable, composable conversion function.
///
/// Returned by [`Converter::converter_for`](crate::Converter::converter_for);
/// cheap to clone.
#[derive(Clone)]
pub struct ConvertFn {
    body: Arc<Body>,
}

impl fmt::Debug for ConvertFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConvertFn")
    }
}

impl ConvertFn {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self { body: Arc::new(f) }
    }

    pub fn identity() -> Self {
        Self::from_fn(Ok)
    }

    pub fn apply(&self, value: impl Into<Value>) -> Result<Value> {
        (self.body)(value.into())
    }

    /// `self` first, then `next`.
    #[must_use]
    pub fn and_then(&self, next: &ConvertFn) -> ConvertFn {
        let (first, second) = (Arc::clone(&self.body), Arc::clone(&next.body));
        Self::from_fn(move |v| second(first(v)?))
    }

    /// `before` first, then `self`.
    #[must_use]
    pub fn compose(&self, before: &ConvertFn) -> ConvertFn {
        before.and_then(self)
    }
}
