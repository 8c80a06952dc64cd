// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors.
//!
//! A descriptor pairs the type a slot was declared with (`raw`, possibly
//! mentioning type parameters) with the type it was declared in
//! (`declaring`). Everything else is derived from those two fields and
//! cached on first access. Descriptors are interned by
//! [`TypeSystem::descriptor`](super::TypeSystem::descriptor).

use super::class::{ClassId, Shape};
use super::{Type, TypeSystem};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// Immutable `(declaring, raw)` handle with lazily derived queries.
pub struct TypeDescriptor {
    declaring: Option<Type>,
    raw: Type,
    actual: OnceLock<Type>,
    item: OnceLock<Type>,
    key: OnceLock<Type>,
    value: OnceLock<Type>,
}

impl TypeDescriptor {
    pub(crate) fn new(declaring: Option<Type>, raw: Type) -> Self {
        Self {
            declaring,
            raw,
            actual: OnceLock::new(),
            item: OnceLock::new(),
            key: OnceLock::new(),
            value: OnceLock::new(),
        }
    }

    pub fn declaring(&self) -> Option<&Type> {
        self.declaring.as_ref()
    }

    pub fn raw(&self) -> &Type {
        &self.raw
    }

    /// `raw` with parameters substituted through the declaring context.
    pub fn actual_type(&self, types: &TypeSystem) -> &Type {
        self.actual
            .get_or_init(|| types.resolve_actual(self.declaring.as_ref(), &self.raw))
    }

    /// Actual type with a top-level variable replaced by its bound.
    pub fn concrete_type(&self, types: &TypeSystem) -> Type {
        let actual = self.actual_type(types);
        match actual {
            Type::Param { .. } | Type::Wildcard { .. } => types.bound_of(actual),
            other => other.clone(),
        }
    }

    /// Class of the actual type; `Object` when nothing constrains it.
    pub fn actual_class(&self, types: &TypeSystem) -> ClassId {
        self.concrete_type(types)
            .raw_class()
            .unwrap_or(ClassId::OBJECT)
    }

    pub fn shape(&self, types: &TypeSystem) -> Shape {
        types.shape_of(&self.concrete_type(types))
    }

    /// `true` if the actual type still mentions an unresolved parameter.
    pub fn is_unresolved(&self, types: &TypeSystem) -> bool {
        self.actual_type(types).has_variables()
    }

    pub fn is_object(&self, types: &TypeSystem) -> bool {
        matches!(self.shape(types), Shape::Object)
    }

    pub fn is_array(&self, types: &TypeSystem) -> bool {
        matches!(self.shape(types), Shape::Array)
    }

    pub fn is_collection(&self, types: &TypeSystem) -> bool {
        matches!(self.shape(types), Shape::Collection(_))
    }

    pub fn is_map(&self, types: &TypeSystem) -> bool {
        self.shape(types).is_map()
    }

    pub fn is_bean(&self, types: &TypeSystem) -> bool {
        self.shape(types).is_bean()
    }

    pub fn is_wrapper(&self, types: &TypeSystem) -> bool {
        self.shape(types).is_wrapper()
    }

    /// Arguments of `ancestor` as seen through the actual type.
    pub fn type_arguments(&self, types: &TypeSystem, ancestor: ClassId) -> Arc<[Type]> {
        types.type_arguments(&self.concrete_type(types), ancestor)
    }

    /// Element type of an array, collection or wrapper; `Object` otherwise.
    pub fn item_type(&self, types: &TypeSystem) -> &Type {
        self.item.get_or_init(|| {
            let concrete = self.concrete_type(types);
            if let Type::Array(component) = &concrete {
                return (**component).clone();
            }
            let ancestor = match types.shape_of(&concrete) {
                Shape::Collection(_) => ClassId::COLLECTION,
                Shape::Wrapper(kind) => kind.base_class(),
                _ => return Type::OBJECT,
            };
            first_or_object(&types.type_arguments(&concrete, ancestor), 0)
        })
    }

    /// Alias of [`item_type`](Self::item_type) for arrays.
    pub fn component_type(&self, types: &TypeSystem) -> &Type {
        self.item_type(types)
    }

    pub fn key_type(&self, types: &TypeSystem) -> &Type {
        self.key
            .get_or_init(|| self.map_argument(types, 0))
    }

    pub fn value_type(&self, types: &TypeSystem) -> &Type {
        self.value
            .get_or_init(|| self.map_argument(types, 1))
    }

    fn map_argument(&self, types: &TypeSystem, pos: usize) -> Type {
        let concrete = self.concrete_type(types);
        if !types.shape_of(&concrete).is_map() {
            return Type::OBJECT;
        }
        first_or_object(&types.type_arguments(&concrete, ClassId::MAP), pos)
    }

    /// Descriptor of the element type, sharing this declaring context.
    pub fn item_descriptor(&self, types: &TypeSystem) -> Arc<TypeDescriptor> {
        types.descriptor(self.declaring.as_ref(), self.item_type(types))
    }

    pub fn key_descriptor(&self, types: &TypeSystem) -> Arc<TypeDescriptor> {
        types.descriptor(self.declaring.as_ref(), self.key_type(types))
    }

    pub fn value_descriptor(&self, types: &TypeSystem) -> Arc<TypeDescriptor> {
        types.descriptor(self.declaring.as_ref(), self.value_type(types))
    }

    /// Descriptor of a property declared with `ty` on this descriptor's type.
    pub fn member_descriptor(&self, types: &TypeSystem, ty: &Type) -> Arc<TypeDescriptor> {
        types.descriptor(Some(&self.concrete_type(types)), ty)
    }
}

fn first_or_object(args: &[Type], pos: usize) -> Type {
    args.get(pos).cloned().unwrap_or(Type::OBJECT)
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.declaring == other.declaring && self.raw == other.raw
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.declaring.hash(state);
        self.raw.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("declaring", &self.declaring)
            .field("raw", &self.raw)
            .finish()
    }
}
