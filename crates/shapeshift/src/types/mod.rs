// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type model.
//!
//! # Features
//!
//! - **TypeSystem**: registry of built-in and user classes
//! - **Type**: possibly generic type expressions
//! - **TypeDescriptor**: `(declaring, raw)` handle with cached derived queries
//! - **Resolver**: generic argument recovery through inheritance chains
//!
//! # Example
//!
//! ```rust
//! use shapeshift::types::{ClassBuilder, ClassId, Type, TypeSystem};
//!
//! let types = TypeSystem::new();
//! let page = types
//!     .define(
//!         ClassBuilder::bean("Page")
//!             .type_param("T")
//!             .property("rows", Type::list(Type::param("T"))),
//!     )
//!     .unwrap();
//! let user_page = Type::generic(page, [Type::STRING]);
//!
//! let rows = types.properties(page).get("rows").unwrap().ty.clone();
//! let desc = types.descriptor(Some(&user_page), &rows);
//! assert_eq!(desc.item_type(&types), &Type::STRING);
//! assert_eq!(types.display(&user_page), "Page<String>");
//! assert!(types.is_assignable(ClassId::COLLECTION, ClassId::VEC));
//! ```

mod builtins;
mod class;
mod descriptor;
mod resolver;
mod system;
mod ty;

pub use class::{
    Class, ClassBuilder, ClassId, CollectionKind, Factory, FactoryFn, MapKind, PropertyAccess,
    PropertyDef, ScalarKind, Shape, TypeParamDef, WrapperKind,
};
pub use descriptor::TypeDescriptor;
pub use system::TypeSystem;
pub use ty::Type;

#[cfg(test)]
mod tests;
