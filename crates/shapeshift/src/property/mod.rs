// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property metadata, cascading access and bean copy.
//!
//! # Features
//!
//! - **Metadata**: per-class merged property tables, cached on first use
//! - **Paths**: dotted names with bracket indices (`inner.rows[2].id`)
//! - **Accessor**: reads that stop at nulls, writes that create intermediates
//! - **Copy**: common-property mapping between beans, maps and positional records
//!
//! Most callers go through the [`Converter`](crate::Converter) facade, which
//! opens a conversion session and forwards here.

mod accessor;
pub(crate) mod copy;
mod meta;
mod path;

pub use accessor::{get_property, set_property};
pub use copy::{common_mapping, copy_into, copy_mapped, to_bean, to_map, CopyOptions};
pub use meta::{ClassProperties, PropertyMeta};
pub use path::{PropertyPath, Segment};
