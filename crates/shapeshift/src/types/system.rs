// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The class universe.
//!
//! `TypeSystem` owns every class definition plus the caches derived from
//! them (interned descriptors, resolved type arguments, property metadata).
//! Definitions are append-only; caches are populated lazily and may be
//! recomputed redundantly when two threads race on the same key.

use super::builtins::builtin_classes;
use super::class::{
    BuilderKind, Class, ClassBuilder, ClassId, CollectionKind, MapKind, Shape, TypeParamDef,
};
use super::descriptor::TypeDescriptor;
use super::Type;
use crate::error::{ConvertError, Result};
use crate::property::ClassProperties;
use crate::value::{ArrayValue, BeanValue, CollectionValue, MapValue, Value, WrapperValue};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

type DescriptorKey = (Option<Type>, Type);

/// Registry of classes and the caches derived from them.
pub struct TypeSystem {
    classes: RwLock<Vec<Arc<Class>>>,
    by_name: DashMap<Arc<str>, ClassId>,
    descriptors: DashMap<DescriptorKey, Arc<TypeDescriptor>>,
    pub(crate) resolved: DashMap<(Type, ClassId), Arc<[Type]>>,
    pub(crate) properties: DashMap<ClassId, Arc<ClassProperties>>,
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeSystem")
            .field("classes", &self.classes.read().len())
            .field("descriptors", &self.descriptors.len())
            .finish()
    }
}

impl TypeSystem {
    /// Fresh universe holding only the built-in classes.
    pub fn new() -> Self {
        let classes: Vec<Arc<Class>> = builtin_classes().into_iter().map(Arc::new).collect();
        let by_name = DashMap::new();
        for class in &classes {
            by_name.insert(Arc::clone(&class.name), class.id);
        }
        Self {
            classes: RwLock::new(classes),
            by_name,
            descriptors: DashMap::new(),
            resolved: DashMap::new(),
            properties: DashMap::new(),
        }
    }

    /// Number of registered classes (built-ins included).
    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reserve an id for `name` so definitions can refer to each other.
    ///
    /// Returns the existing id if the name is already known.
    pub fn declare(&self, name: &str) -> ClassId {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let mut classes = self.classes.write();
        // Re-check under the write lock.
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let id = ClassId(classes.len() as u32);
        let name: Arc<str> = Arc::from(name);
        classes.push(Arc::new(Class {
            id,
            name: Arc::clone(&name),
            shape: Shape::Bean,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            properties: Vec::new(),
            variants: Vec::new(),
            factories: Vec::new(),
            is_abstract: false,
            defined: false,
        }));
        self.by_name.insert(name, id);
        log::trace!("[types] declared {} as {}", classes[id.index()].name, id);
        id
    }

    /// Register a user class.
    ///
    /// Type parameters referenced without an owner are bound to the new
    /// class. Fails with `InvalidArgument` on duplicate names, unknown
    /// supertypes or parameters, and cyclic inheritance.
    pub fn define(&self, builder: ClassBuilder) -> Result<ClassId> {
        let name = builder.name.clone();
        if name.trim().is_empty() {
            return Err(ConvertError::invalid("class name must not be empty"));
        }
        let placeholder = match self.lookup(&name) {
            Some(id) if self.class(id).defined => {
                return Err(ConvertError::invalid(format!(
                    "class '{name}' is already defined"
                )))
            }
            Some(id) => Some(id),
            None => None,
        };
        let id = placeholder.unwrap_or_else(|| self.declare(&name));
        let class = self
            .build_class(id, builder)
            .map_err(|e| e.with_context(format!("define '{name}'")))?;

        {
            let mut classes = self.classes.write();
            classes[id.index()] = Arc::new(class);
        }
        if placeholder.is_some() {
            // Derived data may have been computed against the placeholder.
            self.descriptors.clear();
            self.resolved.clear();
            self.properties.clear();
        }
        log::debug!("[types] defined {} as {}", name, id);
        Ok(id)
    }

    fn build_class(&self, id: ClassId, builder: ClassBuilder) -> Result<Class> {
        let ClassBuilder {
            name,
            kind,
            type_params,
            superclass,
            interfaces,
            properties,
            factories,
            is_abstract,
        } = builder;

        let mut seen = HashSet::new();
        for p in &type_params {
            if !seen.insert(p.name.clone()) {
                return Err(ConvertError::invalid(format!(
                    "duplicate type parameter '{}'",
                    p.name
                )));
            }
        }

        let bind = |ty: &Type| -> Result<Type> {
            let bound = ty.substitute(&|pname: &Arc<str>, owner| {
                if owner.is_some() {
                    return None;
                }
                if type_params.iter().any(|p| p.name == *pname) {
                    Some(Type::owned_param(id, Arc::clone(pname)))
                } else {
                    None
                }
            });
            match first_unbound(&bound) {
                Some(p) => Err(ConvertError::invalid(format!(
                    "unknown type parameter '{p}'"
                ))),
                None => Ok(bound),
            }
        };

        let type_params = type_params
            .iter()
            .map(|p| {
                Ok(TypeParamDef {
                    name: p.name.clone(),
                    bound: p.bound.as_ref().map(&bind).transpose()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if let Some(p) = bound_cycle(id, &type_params) {
            return Err(ConvertError::invalid(format!(
                "bound of type parameter '{p}' refers back to itself"
            )));
        }

        let superclass = superclass.as_ref().map(&bind).transpose()?;
        let interfaces = interfaces.iter().map(&bind).collect::<Result<Vec<_>>>()?;

        let mut shape = None;
        for sup in superclass.iter().chain(interfaces.iter()) {
            let raw = match sup {
                Type::Class(c) | Type::Generic { raw: c, .. } => *c,
                _ => {
                    return Err(ConvertError::invalid(format!(
                        "supertype of '{name}' must be a class type"
                    )))
                }
            };
            let sup_class = self
                .try_class(raw)
                .ok_or_else(|| ConvertError::invalid(format!("unknown supertype {raw}")))?;
            if raw == id || self.is_assignable(id, raw) {
                return Err(ConvertError::invalid(format!(
                    "cyclic inheritance through '{}'",
                    sup_class.name
                )));
            }
            match sup_class.shape {
                Shape::Scalar(_) | Shape::Enum | Shape::Wrapper(_) | Shape::Array => {
                    return Err(ConvertError::invalid(format!(
                        "cannot extend '{}'",
                        sup_class.name
                    )))
                }
                s @ (Shape::Collection(_) | Shape::Map(_)) => {
                    if shape.is_some_and(|prev| prev != s) {
                        return Err(ConvertError::invalid(format!(
                            "'{name}' mixes container shapes"
                        )));
                    }
                    shape = Some(s);
                }
                Shape::Object | Shape::Bean => {}
            }
        }

        let mut names = HashSet::new();
        let mut props = Vec::with_capacity(properties.len());
        for mut def in properties {
            if !names.insert(def.name.clone()) {
                return Err(ConvertError::invalid(format!(
                    "duplicate property '{}'",
                    def.name
                )));
            }
            def.ty = bind(&def.ty)?;
            props.push(def);
        }

        let (shape, variants) = match kind {
            BuilderKind::Enum(variants) => {
                let mut seen = HashSet::new();
                for v in &variants {
                    if !seen.insert(v.clone()) {
                        return Err(ConvertError::invalid(format!("duplicate variant '{v}'")));
                    }
                }
                (Shape::Enum, variants)
            }
            BuilderKind::Bean | BuilderKind::Interface => (shape.unwrap_or(Shape::Bean), Vec::new()),
        };

        Ok(Class {
            id,
            name,
            shape,
            type_params,
            superclass,
            interfaces,
            properties: props,
            variants,
            factories,
            is_abstract,
            defined: true,
        })
    }

    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).map(|e| *e.value())
    }

    pub fn try_class(&self, id: ClassId) -> Option<Arc<Class>> {
        self.classes.read().get(id.index()).cloned()
    }

    /// Class metadata. An id from another `TypeSystem` is logged and mapped
    /// to `Object`.
    pub fn class(&self, id: ClassId) -> Arc<Class> {
        let classes = self.classes.read();
        match classes.get(id.index()) {
            Some(c) => Arc::clone(c),
            None => {
                log::warn!("[types] unknown class id {}", id);
                Arc::clone(&classes[ClassId::OBJECT.index()])
            }
        }
    }

    pub fn class_name(&self, id: ClassId) -> Arc<str> {
        Arc::clone(&self.class(id).name)
    }

    /// Shape of a type. Unresolved parameters and wildcards are `Object`.
    pub fn shape_of(&self, ty: &Type) -> Shape {
        match ty {
            Type::Array(_) => Shape::Array,
            Type::Class(id) | Type::Generic { raw: id, .. } => self.class(*id).shape,
            Type::Param { .. } | Type::Wildcard { .. } => Shape::Object,
        }
    }

    /// `true` if values of `source` can stand where `target` is expected.
    pub fn is_assignable(&self, target: ClassId, source: ClassId) -> bool {
        if target == source || target == ClassId::OBJECT {
            return true;
        }
        let mut stack = vec![source];
        let mut visited = HashSet::new();
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let class = self.class(id);
            for sup in class.supertypes() {
                if let Some(raw) = sup.raw_class() {
                    if raw == target {
                        return true;
                    }
                    stack.push(raw);
                }
            }
        }
        false
    }

    /// Type-level assignability: arrays also compare their components.
    pub fn is_assignable_type(&self, target: &Type, source: &Type) -> bool {
        match (target, source) {
            (t, _) if t.is_object() => true,
            (Type::Array(tc), Type::Array(sc)) => {
                tc.is_object() || tc == sc || {
                    match (tc.raw_class(), sc.raw_class()) {
                        (Some(t), Some(s)) => {
                            !tc.has_variables()
                                && !tc.has_constrained_args()
                                && self.is_assignable(t, s)
                        }
                        _ => false,
                    }
                }
            }
            (Type::Array(_), _) | (_, Type::Array(_)) => false,
            _ => match (target.raw_class(), source.raw_class()) {
                (Some(t), Some(s)) => self.is_assignable(t, s),
                _ => false,
            },
        }
    }

    /// Human-readable rendering, e.g. `Map<String, Vec<i32>>`.
    pub fn display(&self, ty: &Type) -> String {
        match ty {
            Type::Class(id) => self.class_name(*id).to_string(),
            Type::Generic { raw, args } => {
                let args: Vec<String> = args.iter().map(|a| self.display(a)).collect();
                format!("{}<{}>", self.class_name(*raw), args.join(", "))
            }
            Type::Param { name, .. } => name.to_string(),
            Type::Wildcard { upper, lower } => match (upper, lower) {
                (Some(u), _) => format!("? extends {}", self.display(u)),
                (None, Some(l)) => format!("? super {}", self.display(l)),
                (None, None) => "?".to_string(),
            },
            Type::Array(c) => format!("{}[]", self.display(c)),
        }
    }

    /// Interned descriptor for `raw` declared inside `declaring`.
    pub fn descriptor(&self, declaring: Option<&Type>, raw: &Type) -> Arc<TypeDescriptor> {
        let key = (declaring.cloned(), raw.clone());
        if let Some(hit) = self.descriptors.get(&key) {
            return Arc::clone(hit.value());
        }
        let desc = Arc::new(TypeDescriptor::new(key.0.clone(), key.1.clone()));
        Arc::clone(self.descriptors.entry(key).or_insert(desc).value())
    }

    /// Value a null takes in a slot of type `ty`: the zero of primitive
    /// scalars, an empty wrapper for wrappers, `Null` otherwise.
    pub fn zero_value(&self, ty: &Type) -> Value {
        match self.shape_of(ty) {
            Shape::Scalar(kind) => Value::zero(kind),
            Shape::Wrapper(kind) => Value::Wrapper(WrapperValue {
                class: ty.raw_class().unwrap_or(kind.base_class()),
                kind,
                inner: None,
            }),
            _ => Value::Null,
        }
    }

    /// Default used by ignore-style conversions: zero for scalars and
    /// wrappers, an empty instance for containers, `Null` otherwise.
    pub fn empty_value(&self, ty: &Type) -> Value {
        match self.shape_of(ty) {
            Shape::Array | Shape::Collection(_) | Shape::Map(_) => {
                self.instantiate(ty).unwrap_or(Value::Null)
            }
            _ => self.zero_value(ty),
        }
    }

    /// Concrete class and kind instantiated for a collection target.
    pub fn concrete_collection(&self, id: ClassId) -> (ClassId, CollectionKind) {
        let class = self.class(id);
        match class.shape {
            Shape::Collection(kind) if class.is_abstract => (kind.default_class(), kind),
            Shape::Collection(kind) => (id, kind),
            _ => (ClassId::VEC, CollectionKind::Seq),
        }
    }

    /// Concrete class and kind instantiated for a map target.
    pub fn concrete_map(&self, id: ClassId) -> (ClassId, MapKind) {
        let class = self.class(id);
        match class.shape {
            Shape::Map(kind) if class.is_abstract => (kind.default_class(), kind),
            Shape::Map(kind) => (id, kind),
            _ => (ClassId::INDEX_MAP, MapKind::Index),
        }
    }

    /// Fresh instance of `ty`.
    ///
    /// Beans get every declared property set to its zero value; abstract
    /// bean targets yield a virtual bean carrying the abstract class. `Object`
    /// instantiates as an empty insertion-ordered map.
    pub fn instantiate(&self, ty: &Type) -> Result<Value> {
        let raw = match ty {
            Type::Array(component) => {
                return Ok(Value::Array(ArrayValue::new(
                    self.erase(component),
                    Vec::new(),
                )))
            }
            Type::Class(id) | Type::Generic { raw: id, .. } => *id,
            Type::Param { .. } | Type::Wildcard { .. } => ClassId::OBJECT,
        };
        let class = self.class(raw);
        let value = match class.shape {
            Shape::Object => Value::Map(MapValue::ordered()),
            Shape::Scalar(kind) => Value::zero(kind),
            Shape::Array => Value::Array(ArrayValue::new(Type::OBJECT, Vec::new())),
            Shape::Enum => {
                return Err(ConvertError::invalid(format!(
                    "enum '{}' cannot be instantiated",
                    class.name
                )))
            }
            Shape::Wrapper(kind) => Value::Wrapper(WrapperValue {
                class: raw,
                kind,
                inner: None,
            }),
            Shape::Collection(_) => {
                let (cid, kind) = self.concrete_collection(raw);
                let mut c = CollectionValue::new(cid, kind);
                c.props = self.zeroed_props(ty);
                Value::Collection(c)
            }
            Shape::Map(_) => {
                let (cid, kind) = self.concrete_map(raw);
                let mut m = MapValue::new(cid, kind);
                m.props = self.zeroed_props(ty);
                Value::Map(m)
            }
            Shape::Bean => Value::Bean(BeanValue {
                class: raw,
                props: self.zeroed_props(ty),
            }),
        };
        Ok(value)
    }

    fn zeroed_props(&self, ty: &Type) -> indexmap::IndexMap<String, Value> {
        let Some(raw) = ty.raw_class() else {
            return indexmap::IndexMap::new();
        };
        let props = self.properties(raw);
        props
            .iter()
            .map(|p| {
                let declared = self.descriptor(Some(ty), &p.ty);
                let zero = self.zero_value(declared.actual_type(self));
                (p.name.to_string(), zero)
            })
            .collect()
    }

    /// Replace unresolved parameters and wildcards by their bound or `Object`.
    pub(crate) fn erase(&self, ty: &Type) -> Type {
        match ty {
            Type::Class(_) => ty.clone(),
            Type::Generic { raw, args } => {
                Type::generic(*raw, args.iter().map(|a| self.erase(a)))
            }
            Type::Param { .. } | Type::Wildcard { .. } => self.bound_of(ty),
            Type::Array(c) => Type::array(self.erase(c)),
        }
    }

    /// Upper (or, lacking one, lower) bound of a variable, erased; `Object`
    /// when unbounded.
    pub(crate) fn bound_of(&self, ty: &Type) -> Type {
        match ty {
            Type::Wildcard { upper, lower } => match upper.as_deref().or(lower.as_deref()) {
                Some(b) => self.erase(b),
                None => Type::OBJECT,
            },
            Type::Param {
                name,
                owner: Some(owner),
            } => {
                let class = self.class(*owner);
                let bound = class
                    .type_params
                    .iter()
                    .find(|p| p.name == *name)
                    .and_then(|p| p.bound.clone());
                match bound {
                    // A bound mentioning the parameter itself would not terminate.
                    Some(b) if !mentions(&b, name) => self.erase(&b),
                    _ => Type::OBJECT,
                }
            }
            Type::Param { owner: None, .. } => Type::OBJECT,
            other => other.clone(),
        }
    }
}

fn first_unbound(ty: &Type) -> Option<String> {
    match ty {
        Type::Class(_) => None,
        Type::Generic { args, .. } => args.iter().find_map(first_unbound),
        Type::Param { name, owner: None } => Some(name.to_string()),
        Type::Param { .. } => None,
        Type::Wildcard { upper, lower } => upper
            .as_deref()
            .and_then(first_unbound)
            .or_else(|| lower.as_deref().and_then(first_unbound)),
        Type::Array(c) => first_unbound(c),
    }
}

/// `true` if `ty` uses parameter `name` of class `owner`.
fn uses_param(ty: &Type, owner: ClassId, name: &str) -> bool {
    match ty {
        Type::Class(_) => false,
        Type::Generic { args, .. } => args.iter().any(|a| uses_param(a, owner, name)),
        Type::Param { name: n, owner: o } => *o == Some(owner) && &**n == name,
        Type::Wildcard { upper, lower } => upper
            .iter()
            .chain(lower.iter())
            .any(|b| uses_param(b, owner, name)),
        Type::Array(c) => uses_param(c, owner, name),
    }
}

/// First parameter whose bound reaches itself through the bounds of other
/// parameters. A bound naming only its own parameter erases to `Object`
/// and is not a cycle.
fn bound_cycle(owner: ClassId, params: &[TypeParamDef]) -> Option<Arc<str>> {
    // 0 = unvisited, 1 = on the current path, 2 = done
    fn visit(i: usize, deps: &[Vec<usize>], state: &mut [u8]) -> bool {
        state[i] = 1;
        for &j in &deps[i] {
            if state[j] == 1 || (state[j] == 0 && visit(j, deps, state)) {
                return true;
            }
        }
        state[i] = 2;
        false
    }

    let deps: Vec<Vec<usize>> = params
        .iter()
        .enumerate()
        .map(|(i, p)| {
            params
                .iter()
                .enumerate()
                .filter(|&(j, q)| {
                    j != i && p.bound.as_ref().is_some_and(|b| uses_param(b, owner, &q.name))
                })
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    let mut state = vec![0u8; params.len()];
    (0..params.len())
        .find(|&i| state[i] == 0 && visit(i, &deps, &mut state))
        .map(|i| Arc::clone(&params[i].name))
}

fn mentions(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Class(_) => false,
        Type::Generic { args, .. } => args.iter().any(|a| mentions(a, name)),
        Type::Param { name: n, .. } => &**n == name,
        Type::Wildcard { upper, lower } => {
            upper.as_deref().is_some_and(|u| mentions(u, name))
                || lower.as_deref().is_some_and(|l| mentions(l, name))
        }
        Type::Array(c) => mentions(c, name),
    }
}
