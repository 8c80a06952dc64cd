// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Class metadata: ids, shapes, properties and the definition builder.

use crate::error::Result;
use crate::types::Type;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Handle to a class registered in a `TypeSystem`.
///
/// Built-in classes have fixed ids shared by every `TypeSystem`; user classes
/// are numbered in registration order after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) u32);

impl ClassId {
    pub const OBJECT: ClassId = ClassId(0);
    pub const BOOL: ClassId = ClassId(1);
    pub const CHAR: ClassId = ClassId(2);
    pub const I8: ClassId = ClassId(3);
    pub const I16: ClassId = ClassId(4);
    pub const I32: ClassId = ClassId(5);
    pub const I64: ClassId = ClassId(6);
    pub const U8: ClassId = ClassId(7);
    pub const U16: ClassId = ClassId(8);
    pub const U32: ClassId = ClassId(9);
    pub const U64: ClassId = ClassId(10);
    pub const F32: ClassId = ClassId(11);
    pub const F64: ClassId = ClassId(12);
    pub const STRING: ClassId = ClassId(13);
    pub const DATETIME: ClassId = ClassId(14);
    /// Pseudo-class shared by all array values; the component lives in the `Type`.
    pub const ARRAY: ClassId = ClassId(15);
    pub const COLLECTION: ClassId = ClassId(16);
    pub const SEQ: ClassId = ClassId(17);
    pub const VEC: ClassId = ClassId(18);
    pub const VEC_DEQUE: ClassId = ClassId(19);
    pub const SET: ClassId = ClassId(20);
    pub const HASH_SET: ClassId = ClassId(21);
    pub const INDEX_SET: ClassId = ClassId(22);
    pub const BTREE_SET: ClassId = ClassId(23);
    pub const MAP: ClassId = ClassId(24);
    pub const HASH_MAP: ClassId = ClassId(25);
    pub const INDEX_MAP: ClassId = ClassId(26);
    pub const BTREE_MAP: ClassId = ClassId(27);
    pub const OPTION: ClassId = ClassId(28);
    pub const REF: ClassId = ClassId(29);

    pub(crate) const BUILTIN_COUNT: u32 = 30;

    /// Position in the class table.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scalar (leaf) kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    DateTime,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 14] = [
        Self::Bool,
        Self::Char,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::String,
        Self::DateTime,
    ];

    /// Built-in class carrying this kind.
    pub fn class_id(self) -> ClassId {
        match self {
            Self::Bool => ClassId::BOOL,
            Self::Char => ClassId::CHAR,
            Self::I8 => ClassId::I8,
            Self::I16 => ClassId::I16,
            Self::I32 => ClassId::I32,
            Self::I64 => ClassId::I64,
            Self::U8 => ClassId::U8,
            Self::U16 => ClassId::U16,
            Self::U32 => ClassId::U32,
            Self::U64 => ClassId::U64,
            Self::F32 => ClassId::F32,
            Self::F64 => ClassId::F64,
            Self::String => ClassId::STRING,
            Self::DateTime => ClassId::DATETIME,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "String",
            Self::DateTime => "DateTime",
        }
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Primitive kinds have no null; a null slot of this kind takes its zero value.
    pub fn is_nullable(self) -> bool {
        matches!(self, Self::String | Self::DateTime)
    }
}

/// Storage semantics of a collection class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Ordered, duplicates allowed.
    Seq,
    /// Double-ended sequence.
    Deque,
    /// Unordered set (insertion order kept, duplicates dropped).
    HashSet,
    /// Insertion-ordered set.
    IndexSet,
    /// Set sorted by value order.
    SortedSet,
}

impl CollectionKind {
    pub fn is_set(self) -> bool {
        matches!(self, Self::HashSet | Self::IndexSet | Self::SortedSet)
    }

    pub fn is_sorted(self) -> bool {
        matches!(self, Self::SortedSet)
    }

    /// Concrete built-in class instantiated for an abstract target of this kind.
    pub fn default_class(self) -> ClassId {
        match self {
            Self::Seq => ClassId::VEC,
            Self::Deque => ClassId::VEC_DEQUE,
            Self::HashSet => ClassId::HASH_SET,
            Self::IndexSet => ClassId::INDEX_SET,
            Self::SortedSet => ClassId::BTREE_SET,
        }
    }
}

/// Storage semantics of a map class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    Hash,
    Index,
    Sorted,
}

impl MapKind {
    pub fn is_sorted(self) -> bool {
        matches!(self, Self::Sorted)
    }

    pub fn default_class(self) -> ClassId {
        match self {
            Self::Hash => ClassId::HASH_MAP,
            Self::Index => ClassId::INDEX_MAP,
            Self::Sorted => ClassId::BTREE_MAP,
        }
    }
}

/// Single-slot containers that are unwrapped/re-wrapped rather than converted as leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    /// `Option<T>`.
    Optional,
    /// `Ref<T>`: nullable shared reference holder.
    Ref,
}

impl WrapperKind {
    pub fn base_class(self) -> ClassId {
        match self {
            Self::Optional => ClassId::OPTION,
            Self::Ref => ClassId::REF,
        }
    }
}

/// Structural category of a type, computed once per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// The universal type.
    Object,
    Scalar(ScalarKind),
    Enum,
    Array,
    Collection(CollectionKind),
    Map(MapKind),
    Bean,
    Wrapper(WrapperKind),
}

impl Shape {
    /// Arrays and collections.
    pub fn is_sequence(self) -> bool {
        matches!(self, Self::Array | Self::Collection(_))
    }

    pub fn is_map(self) -> bool {
        matches!(self, Self::Map(_))
    }

    pub fn is_bean(self) -> bool {
        matches!(self, Self::Bean)
    }

    pub fn is_wrapper(self) -> bool {
        matches!(self, Self::Wrapper(_))
    }

    /// Leaf shapes handled by the Dynamic/Specific tiers.
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum)
    }

    /// Shapes a JSON object/array literal can be decoded into.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::Array | Self::Collection(_) | Self::Map(_) | Self::Bean
        )
    }
}

/// Access override taken from property annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyAccess {
    /// Use the physical reader/writer.
    #[default]
    Auto,
    ReadOnly,
    WriteOnly,
    ReadWrite,
    /// Excluded from every mapping.
    Ignore,
}

/// A declared property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDef {
    pub name: Arc<str>,
    /// Declared type; may mention the declaring class's type parameters.
    pub ty: Type,
    /// Physical reader present.
    pub readable: bool,
    /// Physical writer present.
    pub writable: bool,
    pub access: PropertyAccess,
    /// Name override used when computing copy mappings.
    pub alias: Option<Arc<str>>,
    /// Position override used when the copy source is positional.
    pub index: Option<usize>,
}

impl PropertyDef {
    /// Readable and writable property.
    pub fn new(name: impl Into<Arc<str>>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            readable: true,
            writable: true,
            access: PropertyAccess::Auto,
            alias: None,
            index: None,
        }
    }

    /// Reader only.
    #[must_use]
    pub fn getter_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Writer only.
    #[must_use]
    pub fn setter_only(mut self) -> Self {
        self.readable = false;
        self
    }

    #[must_use]
    pub fn access(mut self, access: PropertyAccess) -> Self {
        self.access = access;
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<Arc<str>>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Single-argument constructor used by the factory fallback rule.
pub type FactoryFn = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// Factory accepting values of `param` (or any subclass of it).
#[derive(Clone)]
pub struct Factory {
    pub(crate) param: ClassId,
    pub(crate) build: FactoryFn,
}

impl Factory {
    pub fn param(&self) -> ClassId {
        self.param
    }

    pub fn call(&self, value: Value) -> Result<Value> {
        (self.build)(value)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory").field("param", &self.param).finish()
    }
}

/// Declared type parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParamDef {
    pub name: Arc<str>,
    pub bound: Option<Type>,
}

/// Registered class metadata. Immutable once defined.
#[derive(Debug, Clone)]
pub struct Class {
    pub(crate) id: ClassId,
    pub(crate) name: Arc<str>,
    pub(crate) shape: Shape,
    pub(crate) type_params: Vec<TypeParamDef>,
    pub(crate) superclass: Option<Type>,
    pub(crate) interfaces: Vec<Type>,
    pub(crate) properties: Vec<PropertyDef>,
    pub(crate) variants: Vec<Arc<str>>,
    pub(crate) factories: Vec<Factory>,
    pub(crate) is_abstract: bool,
    pub(crate) defined: bool,
}

impl Class {
    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn type_params(&self) -> &[TypeParamDef] {
        &self.type_params
    }

    pub fn superclass(&self) -> Option<&Type> {
        self.superclass.as_ref()
    }

    pub fn interfaces(&self) -> &[Type] {
        &self.interfaces
    }

    /// Properties declared directly on this class (inherited ones excluded).
    pub fn own_properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    pub fn variants(&self) -> &[Arc<str>] {
        &self.variants
    }

    pub fn variant_index(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| &**v == name)
    }

    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    /// No public no-arg constructor: interfaces and abstract classes.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// `false` for a class that was only `declare`d.
    pub fn is_defined(&self) -> bool {
        self.defined
    }

    /// Supertypes in resolution order: superclass first, then interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &Type> {
        self.superclass.iter().chain(self.interfaces.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BuilderKind {
    Bean,
    Interface,
    Enum(Vec<Arc<str>>),
}

/// Fluent definition of a user class.
///
/// ```
/// use shapeshift::types::{ClassBuilder, Type, TypeSystem};
///
/// let types = TypeSystem::new();
/// let boxed = types
///     .define(
///         ClassBuilder::bean("Box")
///             .type_param("T")
///             .property("items", Type::list(Type::param("T"))),
///     )
///     .unwrap();
/// let int_box = types
///     .define(ClassBuilder::bean("IntBox").extends(Type::generic(boxed, [Type::I32])))
///     .unwrap();
/// assert!(types.is_assignable(boxed, int_box));
/// ```
#[derive(Debug)]
pub struct ClassBuilder {
    pub(crate) name: Arc<str>,
    pub(crate) kind: BuilderKind,
    pub(crate) type_params: Vec<TypeParamDef>,
    pub(crate) superclass: Option<Type>,
    pub(crate) interfaces: Vec<Type>,
    pub(crate) properties: Vec<PropertyDef>,
    pub(crate) factories: Vec<Factory>,
    pub(crate) is_abstract: bool,
}

impl ClassBuilder {
    fn with_kind(name: impl Into<Arc<str>>, kind: BuilderKind, is_abstract: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            properties: Vec::new(),
            factories: Vec::new(),
            is_abstract,
        }
    }

    /// Concrete record class.
    pub fn bean(name: impl Into<Arc<str>>) -> Self {
        Self::with_kind(name, BuilderKind::Bean, false)
    }

    /// Interface: abstract, satisfied through `implements`.
    pub fn interface(name: impl Into<Arc<str>>) -> Self {
        Self::with_kind(name, BuilderKind::Interface, true)
    }

    /// Enumeration with variants in ordinal order.
    pub fn enumeration<I, S>(name: impl Into<Arc<str>>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let variants = variants.into_iter().map(Into::into).collect();
        Self::with_kind(name, BuilderKind::Enum(variants), false)
    }

    #[must_use]
    pub fn type_param(mut self, name: impl Into<Arc<str>>) -> Self {
        self.type_params.push(TypeParamDef {
            name: name.into(),
            bound: None,
        });
        self
    }

    #[must_use]
    pub fn bounded_type_param(mut self, name: impl Into<Arc<str>>, bound: Type) -> Self {
        self.type_params.push(TypeParamDef {
            name: name.into(),
            bound: Some(bound),
        });
        self
    }

    #[must_use]
    pub fn extends(mut self, superclass: Type) -> Self {
        self.superclass = Some(superclass);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: Type) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Readable and writable property.
    #[must_use]
    pub fn property(self, name: impl Into<Arc<str>>, ty: Type) -> Self {
        self.property_def(PropertyDef::new(name, ty))
    }

    #[must_use]
    pub fn property_def(mut self, def: PropertyDef) -> Self {
        self.properties.push(def);
        self
    }

    /// Register a single-argument constructor accepting `param` values.
    #[must_use]
    pub fn factory<F>(mut self, param: ClassId, build: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.factories.push(Factory {
            param,
            build: Arc::new(build),
        });
        self
    }

    /// Mark as abstract (no public no-arg constructor).
    #[must_use]
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}
