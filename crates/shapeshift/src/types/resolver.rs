// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic argument resolution.
//!
//! Walks from a concrete type up its superclass/interface chain to a
//! requested ancestor, substituting the declared parameters of each level
//! with the arguments seen at that level. Results are memoized per
//! `(type, ancestor)`.

use super::class::ClassId;
use super::{Type, TypeSystem};
use std::sync::Arc;

/// Guards against absurdly deep hierarchies; real chains are a few levels.
const MAX_CHAIN: usize = 64;

/// Substitution rounds for `actual` types whose arguments themselves
/// mention parameters of an outer declaration.
const MAX_PASSES: usize = 4;

impl TypeSystem {
    /// Concrete arguments of `ancestor` as seen through `ty`.
    ///
    /// Returns an empty list when `ty` does not derive from `ancestor` (or is
    /// an array); callers treat missing arguments as `Object`. Wildcard
    /// arguments resolve to their bound, bare classes default each parameter
    /// to its bound or `Object`.
    pub fn type_arguments(&self, ty: &Type, ancestor: ClassId) -> Arc<[Type]> {
        let key = (ty.clone(), ancestor);
        if let Some(hit) = self.resolved.get(&key) {
            return Arc::clone(hit.value());
        }
        let args: Arc<[Type]> = self
            .find_arguments(ty, ancestor, 0)
            .unwrap_or_default()
            .into();
        self.resolved.insert(key, Arc::clone(&args));
        args
    }

    fn find_arguments(&self, ty: &Type, ancestor: ClassId, depth: usize) -> Option<Vec<Type>> {
        if depth > MAX_CHAIN {
            log::warn!("[types] inheritance chain deeper than {}", MAX_CHAIN);
            return None;
        }
        let (raw, explicit): (ClassId, &[Type]) = match ty {
            Type::Class(id) => (*id, &[][..]),
            Type::Generic { raw, args } => (*raw, &args[..]),
            Type::Param { .. } | Type::Wildcard { .. } => {
                let bound = self.bound_of(ty);
                if bound.is_object() {
                    return None;
                }
                return self.find_arguments(&bound, ancestor, depth + 1);
            }
            Type::Array(_) => return None,
        };

        let class = self.class(raw);
        let args: Vec<Type> = class
            .type_params
            .iter()
            .enumerate()
            .map(|(i, p)| match explicit.get(i) {
                Some(arg) => self.normalize_argument(arg),
                None => self.bound_of(&Type::owned_param(raw, Arc::clone(&p.name))),
            })
            .collect();

        if raw == ancestor {
            return Some(args);
        }

        for sup in class.supertypes() {
            let seen = sup.substitute(&|name: &Arc<str>, owner| {
                if owner != Some(raw) {
                    return None;
                }
                let pos = class.type_params.iter().position(|p| p.name == *name)?;
                args.get(pos).cloned()
            });
            if let Some(found) = self.find_arguments(&seen, ancestor, depth + 1) {
                return Some(found);
            }
        }
        None
    }

    fn normalize_argument(&self, arg: &Type) -> Type {
        match arg {
            Type::Wildcard { .. } => self.bound_of(arg),
            other => other.clone(),
        }
    }

    /// `raw` with every parameter owned by an ancestor of `declaring`
    /// replaced by the argument `declaring` supplies for it.
    pub(crate) fn resolve_actual(&self, declaring: Option<&Type>, raw: &Type) -> Type {
        let Some(declaring) = declaring else {
            return raw.clone();
        };
        let mut current = raw.clone();
        for _ in 0..MAX_PASSES {
            if !current.has_variables() {
                break;
            }
            let next = current.substitute(&|name: &Arc<str>, owner| {
                let owner = owner?;
                let pos = self
                    .class(owner)
                    .type_params
                    .iter()
                    .position(|p| p.name == *name)?;
                let args = self.type_arguments(declaring, owner);
                let arg = args.get(pos)?;
                // The declaring type re-exposing the same parameter adds nothing.
                match arg {
                    Type::Param { name: n, owner: o } if n == name && *o == Some(owner) => None,
                    _ => Some(arg.clone()),
                }
            });
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassBuilder;

    #[test]
    fn test_builtin_chain() {
        let types = TypeSystem::new();
        let list = Type::vec(Type::STRING);
        assert_eq!(
            &*types.type_arguments(&list, ClassId::COLLECTION),
            &[Type::STRING]
        );
        let map = Type::generic(ClassId::BTREE_MAP, [Type::I32, Type::F64]);
        assert_eq!(&*types.type_arguments(&map, ClassId::MAP), &[Type::I32, Type::F64]);
    }

    #[test]
    fn test_bare_class_defaults_to_object() {
        let types = TypeSystem::new();
        let args = types.type_arguments(&Type::Class(ClassId::HASH_SET), ClassId::COLLECTION);
        assert_eq!(&*args, &[Type::OBJECT]);
    }

    #[test]
    fn test_missing_ancestor_is_empty() {
        let types = TypeSystem::new();
        assert!(types.type_arguments(&Type::vec(Type::I32), ClassId::MAP).is_empty());
        assert!(types.type_arguments(&Type::array(Type::I32), ClassId::COLLECTION).is_empty());
        assert!(types.type_arguments(&Type::I32, ClassId::COLLECTION).is_empty());
    }

    #[test]
    fn test_wildcard_resolves_to_bound() {
        let types = TypeSystem::new();
        let list = Type::vec(Type::extends(Type::I64));
        assert_eq!(&*types.type_arguments(&list, ClassId::COLLECTION), &[Type::I64]);
        let list = Type::vec(Type::super_of(Type::I16));
        assert_eq!(&*types.type_arguments(&list, ClassId::COLLECTION), &[Type::I16]);
        let list = Type::vec(Type::wildcard());
        assert_eq!(&*types.type_arguments(&list, ClassId::COLLECTION), &[Type::OBJECT]);
    }

    #[test]
    fn test_user_chain_permutes_parameters() {
        let types = TypeSystem::new();
        // Swapped<A, B> implements Map<B, A>
        let swapped = types
            .define(
                ClassBuilder::bean("Swapped")
                    .type_param("A")
                    .type_param("B")
                    .implements(Type::map(Type::param("B"), Type::param("A"))),
            )
            .expect("define");
        let ty = Type::generic(swapped, [Type::STRING, Type::BOOL]);
        assert_eq!(&*types.type_arguments(&ty, ClassId::MAP), &[Type::BOOL, Type::STRING]);
    }

    #[test]
    fn test_resolve_actual_through_subclass() {
        let types = TypeSystem::new();
        let holder = types
            .define(
                ClassBuilder::bean("Holder")
                    .type_param("T")
                    .property("value", Type::param("T")),
            )
            .expect("define holder");
        let text_holder = types
            .define(
                ClassBuilder::bean("TextHolder")
                    .extends(Type::generic(holder, [Type::STRING])),
            )
            .expect("define text holder");

        let field = Type::owned_param(holder, "T");
        let resolved = types.resolve_actual(Some(&Type::Class(text_holder)), &field);
        assert_eq!(resolved, Type::STRING);

        // No declaring context: parameter stays unresolved.
        assert_eq!(types.resolve_actual(None, &field), field);
    }
}
