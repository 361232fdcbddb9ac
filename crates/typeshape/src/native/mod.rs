// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native type registration.
//!
//! Rust has no runtime reflection, so every type that takes part in inference
//! describes itself through [`Shape`]. The description is a [`NativeType`]:
//! the structural kind of the type plus the optional hooks it provides.
//! Nested types are referenced through [`TypeHandle`]s, which resolve their
//! own description lazily so recursive types can be registered without
//! recursing at registration time.
//!
//! Structs normally use the derive:
//!
//! ```
//! use typeshape::Shape;
//!
//! #[derive(Shape)]
//! pub struct Sensor {
//!     pub id: u32,
//!     #[shape(tag = "temp,omitempty")]
//!     pub temperature: f64,
//!     #[shape(tag = "-")]
//!     pub scratch: Vec<u8>,
//! }
//! ```
//!
//! Manual registration is equivalent:
//!
//! ```
//! use typeshape::{NativeField, NativeType, Shape, TypeHandle};
//!
//! pub struct Sensor {
//!     pub id: u32,
//! }
//!
//! impl Shape for Sensor {
//!     fn native_type() -> NativeType {
//!         NativeType::structure(
//!             "Sensor",
//!             vec![NativeField::new("id", TypeHandle::of::<u32>())],
//!         )
//!     }
//! }
//! ```

mod impls;

use crate::error::HookError;
use crate::types::Type;
use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Types that can describe their own structure.
pub trait Shape: 'static {
    /// Describe this type's structure.
    fn native_type() -> NativeType;
}

/// Capability: the type supplies its own descriptor, bypassing structural inference.
///
/// `Ok(None)` breaks the contract; inference panics when it sees it.
pub trait TypeMarshaler {
    fn marshal_type() -> Result<Option<Type>, HookError>;
}

/// Capability: the type names its own struct descriptor.
pub trait StructNamer {
    fn struct_name() -> String;
}

/// Function pointer form of [`TypeMarshaler::marshal_type`].
pub type TypeMarshalFn = fn() -> Result<Option<Type>, HookError>;

/// Function pointer form of [`StructNamer::struct_name`].
pub type StructNameFn = fn() -> String;

/// Identity of a native type plus a lazy accessor for its description.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    id: TypeId,
    name: &'static str,
    describe: fn() -> NativeType,
}

impl TypeHandle {
    /// Handle for `T`.
    pub fn of<T: Shape + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            describe: T::native_type,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Rust type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Describe the type. Called once per uncached resolution.
    pub fn native_type(&self) -> NativeType {
        (self.describe)()
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeHandle").field(&self.name).finish()
    }
}

/// Native numeric kinds. All of them infer to `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
}

/// Structural kind of a native type.
#[derive(Debug, Clone)]
pub enum NativeKind {
    Bool,
    String,
    Number(NumberKind),
    /// Ordered collection; `len` is set for fixed-size arrays.
    Sequence {
        element: TypeHandle,
        len: Option<usize>,
    },
    /// Unordered collection of unique elements.
    Set { element: TypeHandle },
    Map { key: TypeHandle, value: TypeHandle },
    /// Transparent indirection (`Box`, `Arc`, `Option`, ...).
    Pointer(TypeHandle),
    /// A store-native type with a fixed descriptor.
    Builtin(Type),
    Struct(NativeStruct),
    /// No structural mapping; the payload names the kind.
    Unsupported(&'static str),
}

/// A native struct as declared.
#[derive(Debug, Clone)]
pub struct NativeStruct {
    /// Declared name, empty for anonymous composites.
    pub name: &'static str,
    /// Fields in declaration order.
    pub fields: Vec<NativeField>,
}

/// A native struct field.
#[derive(Debug, Clone)]
pub struct NativeField {
    name: &'static str,
    ty: TypeHandle,
    visible: bool,
    embedded: bool,
    tag: &'static str,
}

impl NativeField {
    /// Visible, non-embedded, untagged field.
    pub fn new(name: &'static str, ty: TypeHandle) -> Self {
        Self {
            name,
            ty,
            visible: true,
            embedded: false,
            tag: "",
        }
    }

    /// Mark the field as not externally visible.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mark the field as embedded; untagged embedded structs are flattened.
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Attach a tag string (see [`crate::tags`]).
    #[must_use]
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> &TypeHandle {
        &self.ty
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    pub fn tag_str(&self) -> &'static str {
        self.tag
    }
}

/// Description of a native type: its kind and the hooks it provides.
#[derive(Debug, Clone)]
pub struct NativeType {
    kind: NativeKind,
    type_marshaler: Option<TypeMarshalFn>,
    struct_namer: Option<StructNameFn>,
}

impl NativeType {
    pub fn new(kind: NativeKind) -> Self {
        Self {
            kind,
            type_marshaler: None,
            struct_namer: None,
        }
    }

    pub fn bool() -> Self {
        Self::new(NativeKind::Bool)
    }

    pub fn string() -> Self {
        Self::new(NativeKind::String)
    }

    pub fn number(kind: NumberKind) -> Self {
        Self::new(NativeKind::Number(kind))
    }

    pub fn sequence(element: TypeHandle, len: Option<usize>) -> Self {
        Self::new(NativeKind::Sequence { element, len })
    }

    pub fn set(element: TypeHandle) -> Self {
        Self::new(NativeKind::Set { element })
    }

    pub fn map(key: TypeHandle, value: TypeHandle) -> Self {
        Self::new(NativeKind::Map { key, value })
    }

    pub fn pointer(target: TypeHandle) -> Self {
        Self::new(NativeKind::Pointer(target))
    }

    pub fn builtin(ty: Type) -> Self {
        Self::new(NativeKind::Builtin(ty))
    }

    /// A struct with fields in declaration order. Use `""` for anonymous composites.
    pub fn structure(name: &'static str, fields: Vec<NativeField>) -> Self {
        Self::new(NativeKind::Struct(NativeStruct { name, fields }))
    }

    pub fn unsupported(kind: &'static str) -> Self {
        Self::new(NativeKind::Unsupported(kind))
    }

    /// Install a [`TypeMarshaler`] hook.
    #[must_use]
    pub fn with_type_marshaler(mut self, hook: TypeMarshalFn) -> Self {
        self.type_marshaler = Some(hook);
        self
    }

    /// Install a [`StructNamer`] hook.
    #[must_use]
    pub fn with_struct_namer(mut self, hook: StructNameFn) -> Self {
        self.struct_namer = Some(hook);
        self
    }

    pub fn kind(&self) -> &NativeKind {
        &self.kind
    }

    pub fn type_marshaler(&self) -> Option<TypeMarshalFn> {
        self.type_marshaler
    }

    pub fn struct_namer(&self) -> Option<StructNameFn> {
        self.struct_namer
    }

    /// A struct with no declared fields and no type hook, such as `()`.
    pub fn is_empty_marker(&self) -> bool {
        self.type_marshaler.is_none()
            && matches!(&self.kind, NativeKind::Struct(s) if s.fields.is_empty())
    }
}
