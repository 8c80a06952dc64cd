// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type expressions: classes, parameterized classes, type parameters,
//! wildcards and arrays.

use crate::types::ClassId;
use std::sync::Arc;

/// A (possibly generic) type expression.
///
/// Cheap to clone: nested parts are shared through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Bare class; its own type parameters (if any) are unconstrained.
    Class(ClassId),
    /// Parameterized class, e.g. `Map<String, i32>`.
    Generic { raw: ClassId, args: Arc<[Type]> },
    /// Type parameter of `owner`. `owner` is `None` until the enclosing class
    /// definition binds it.
    Param {
        name: Arc<str>,
        owner: Option<ClassId>,
    },
    /// `?`, `? extends upper` or `? super lower`.
    Wildcard {
        upper: Option<Arc<Type>>,
        lower: Option<Arc<Type>>,
    },
    /// Array of the component type.
    Array(Arc<Type>),
}

impl Type {
    pub const OBJECT: Type = Type::Class(ClassId::OBJECT);
    pub const BOOL: Type = Type::Class(ClassId::BOOL);
    pub const CHAR: Type = Type::Class(ClassId::CHAR);
    pub const I8: Type = Type::Class(ClassId::I8);
    pub const I16: Type = Type::Class(ClassId::I16);
    pub const I32: Type = Type::Class(ClassId::I32);
    pub const I64: Type = Type::Class(ClassId::I64);
    pub const U8: Type = Type::Class(ClassId::U8);
    pub const U16: Type = Type::Class(ClassId::U16);
    pub const U32: Type = Type::Class(ClassId::U32);
    pub const U64: Type = Type::Class(ClassId::U64);
    pub const F32: Type = Type::Class(ClassId::F32);
    pub const F64: Type = Type::Class(ClassId::F64);
    pub const STRING: Type = Type::Class(ClassId::STRING);
    pub const DATETIME: Type = Type::Class(ClassId::DATETIME);

    pub fn class(id: ClassId) -> Self {
        Type::Class(id)
    }

    /// Parameterized class. An empty argument list yields the bare class.
    pub fn generic(raw: ClassId, args: impl IntoIterator<Item = Type>) -> Self {
        let args: Arc<[Type]> = args.into_iter().collect();
        if args.is_empty() {
            Type::Class(raw)
        } else {
            Type::Generic { raw, args }
        }
    }

    /// Type parameter, bound to its owner when the enclosing class is defined.
    pub fn param(name: impl Into<Arc<str>>) -> Self {
        Type::Param {
            name: name.into(),
            owner: None,
        }
    }

    pub fn owned_param(owner: ClassId, name: impl Into<Arc<str>>) -> Self {
        Type::Param {
            name: name.into(),
            owner: Some(owner),
        }
    }

    pub fn array(component: Type) -> Self {
        Type::Array(Arc::new(component))
    }

    /// Unbounded wildcard `?`.
    pub fn wildcard() -> Self {
        Type::Wildcard {
            upper: None,
            lower: None,
        }
    }

    /// `? extends upper`.
    pub fn extends(upper: Type) -> Self {
        Type::Wildcard {
            upper: Some(Arc::new(upper)),
            lower: None,
        }
    }

    /// `? super lower`.
    pub fn super_of(lower: Type) -> Self {
        Type::Wildcard {
            upper: None,
            lower: Some(Arc::new(lower)),
        }
    }

    /// `Seq<T>` (abstract list).
    pub fn list(item: Type) -> Self {
        Self::generic(ClassId::SEQ, [item])
    }

    /// `Vec<T>`.
    pub fn vec(item: Type) -> Self {
        Self::generic(ClassId::VEC, [item])
    }

    /// `Set<T>` (abstract set).
    pub fn set(item: Type) -> Self {
        Self::generic(ClassId::SET, [item])
    }

    /// `Map<K, V>` (abstract map).
    pub fn map(key: Type, value: Type) -> Self {
        Self::generic(ClassId::MAP, [key, value])
    }

    /// `Option<T>`.
    pub fn option(inner: Type) -> Self {
        Self::generic(ClassId::OPTION, [inner])
    }

    /// Class at the root of this type; `None` for parameters and wildcards.
    pub fn raw_class(&self) -> Option<ClassId> {
        match self {
            Type::Class(id) => Some(*id),
            Type::Generic { raw, .. } => Some(*raw),
            Type::Array(_) => Some(ClassId::ARRAY),
            Type::Param { .. } | Type::Wildcard { .. } => None,
        }
    }

    /// Explicit type arguments (empty for bare classes).
    pub fn args(&self) -> &[Type] {
        match self {
            Type::Generic { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    pub fn component(&self) -> Option<&Type> {
        match self {
            Type::Array(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Type::Class(ClassId::OBJECT))
    }

    /// `true` if a type parameter or wildcard appears anywhere inside.
    pub fn has_variables(&self) -> bool {
        match self {
            Type::Class(_) => false,
            Type::Generic { args, .. } => args.iter().any(Type::has_variables),
            Type::Param { .. } | Type::Wildcard { .. } => true,
            Type::Array(c) => c.has_variables(),
        }
    }

    /// `true` if an explicit argument other than `Object` constrains the elements.
    pub fn has_constrained_args(&self) -> bool {
        match self {
            Type::Generic { args, .. } => args.iter().any(|a| !a.is_object()),
            Type::Array(c) => !c.is_object(),
            _ => false,
        }
    }

    /// Replace every type parameter for which `f` returns a type.
    ///
    /// Wildcard bounds and array components are rewritten recursively.
    pub fn substitute<F>(&self, f: &F) -> Type
    where
        F: Fn(&Arc<str>, Option<ClassId>) -> Option<Type>,
    {
        match self {
            Type::Class(_) => self.clone(),
            Type::Generic { raw, args } => Type::Generic {
                raw: *raw,
                args: args.iter().map(|a| a.substitute(f)).collect(),
            },
            Type::Param { name, owner } => f(name, *owner).unwrap_or_else(|| self.clone()),
            Type::Wildcard { upper, lower } => Type::Wildcard {
                upper: upper.as_ref().map(|u| Arc::new(u.substitute(f))),
                lower: lower.as_ref().map(|l| Arc::new(l.substitute(f))),
            },
            Type::Array(c) => Type::Array(Arc::new(c.substitute(f))),
        }
    }
}

impl From<ClassId> for Type {
    fn from(id: ClassId) -> Self {
        Type::Class(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_without_args_is_bare() {
        assert_eq!(Type::generic(ClassId::VEC, []), Type::Class(ClassId::VEC));
        let t = Type::vec(Type::I32);
        assert_eq!(t.raw_class(), Some(ClassId::VEC));
        assert_eq!(t.args(), &[Type::I32]);
    }

    #[test]
    fn test_has_variables() {
        assert!(!Type::map(Type::STRING, Type::I32).has_variables());
        assert!(Type::list(Type::param("T")).has_variables());
        assert!(Type::array(Type::extends(Type::I64)).has_variables());
    }

    #[test]
    fn test_substitute_nested() {
        let t = Type::map(Type::param("K"), Type::array(Type::param("V")));
        let out = t.substitute(&|name: &Arc<str>, _owner| match &**name {
            "K" => Some(Type::STRING),
            "V" => Some(Type::I32),
            _ => None,
        });
        assert_eq!(out, Type::map(Type::STRING, Type::array(Type::I32)));
        assert!(!out.has_variables());
    }

    #[test]
    fn test_constrained_args() {
        assert!(!Type::vec(Type::OBJECT).has_constrained_args());
        assert!(Type::vec(Type::STRING).has_constrained_args());
        assert!(!Type::Class(ClassId::VEC).has_constrained_args());
    }
}
