// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural type descriptors.
//!
//! [`Type`] is the closed algebra produced by inference: primitives, the
//! `List`/`Set`/`Map`/`Ref` collections, named structs, unions and cycle
//! back-references. Descriptors are immutable and reference-counted; cloning a
//! `Type` shares the underlying node, and equality is always structural.
//!
//! # Canonical form
//!
//! - Struct fields are sorted by name, so declaration order never leaks into
//!   the descriptor.
//! - Union members are sorted and deduplicated.
//! - `Cycle(n)` points at the struct `n` struct-levels above it; `Cycle(0)` is
//!   the innermost enclosing struct.
//!
//! ```
//! use typeshape::{StructField, Type};
//!
//! let person = Type::structure(
//!     "Person",
//!     vec![
//!         StructField::new("given", Type::string()),
//!         StructField::new("female", Type::bool()),
//!     ],
//! );
//! assert_eq!(
//!     person.describe(),
//!     "struct Person {\n  female: Bool,\n  given: String,\n}"
//! );
//! ```

mod describe;

use std::fmt;
use std::sync::Arc;

/// Primitive descriptor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Bool,
    /// Every integer and floating point width.
    Number,
    String,
    Blob,
    /// The type of type descriptors themselves.
    Type,
}

impl PrimitiveKind {
    /// Name used when describing the primitive.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Number => "Number",
            Self::String => "String",
            Self::Blob => "Blob",
            Self::Type => "Type",
        }
    }
}

/// Descriptor variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    List(Type),
    Set(Type),
    Map(Type, Type),
    Ref(Type),
    Struct(StructType),
    /// Sorted, deduplicated members. Empty means `Value`, the universal type.
    Union(Vec<Type>),
    /// Back-reference to the struct `n` struct-levels up.
    Cycle(u32),
}

/// A named struct with fields sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructType {
    name: String,
    fields: Vec<StructField>,
}

impl StructType {
    /// Struct name, empty for anonymous structs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in ascending name order.
    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    /// Field by name.
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields
            .binary_search_by(|f| f.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.fields[idx])
    }
}

/// A single struct member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructField {
    pub name: String,
    pub ty: Type,
    /// The field may be absent from values of this struct.
    pub optional: bool,
}

impl StructField {
    /// Create a required field.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    /// Create an optional field.
    pub fn optional(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
        }
    }
}

/// Immutable structural type descriptor.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Type(Arc<TypeKind>);

impl Type {
    fn from_kind(kind: TypeKind) -> Self {
        Self(Arc::new(kind))
    }

    pub fn bool() -> Self {
        Self::primitive(PrimitiveKind::Bool)
    }

    pub fn number() -> Self {
        Self::primitive(PrimitiveKind::Number)
    }

    pub fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    pub fn blob() -> Self {
        Self::primitive(PrimitiveKind::Blob)
    }

    /// The type of type descriptors.
    pub fn type_type() -> Self {
        Self::primitive(PrimitiveKind::Type)
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::from_kind(TypeKind::Primitive(kind))
    }

    /// The universal type: an empty union.
    pub fn value() -> Self {
        Self::from_kind(TypeKind::Union(Vec::new()))
    }

    pub fn list(element: Self) -> Self {
        Self::from_kind(TypeKind::List(element))
    }

    pub fn set(element: Self) -> Self {
        Self::from_kind(TypeKind::Set(element))
    }

    pub fn map(key: Self, value: Self) -> Self {
        Self::from_kind(TypeKind::Map(key, value))
    }

    pub fn reference(target: Self) -> Self {
        Self::from_kind(TypeKind::Ref(target))
    }

    /// Back-reference to the struct `depth` struct-levels up.
    pub fn cycle(depth: u32) -> Self {
        Self::from_kind(TypeKind::Cycle(depth))
    }

    /// Union of `members`, sorted and deduplicated.
    pub fn union(mut members: Vec<Self>) -> Self {
        members.sort();
        members.dedup();
        Self::from_kind(TypeKind::Union(members))
    }

    /// Build a struct descriptor, sorting `fields` by name.
    ///
    /// # Panics
    ///
    /// Panics if two fields share a name.
    pub fn structure(name: impl Into<String>, mut fields: Vec<StructField>) -> Self {
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        let name = name.into();
        if let Some(pair) = fields.windows(2).find(|pair| pair[0].name == pair[1].name) {
            panic!("duplicate field {} in struct {:?}", pair[0].name, name);
        }
        Self::from_kind(TypeKind::Struct(StructType { name, fields }))
    }

    /// Build a struct from fields that are already sorted and unique.
    pub(crate) fn structure_sorted(name: String, fields: Vec<StructField>) -> Self {
        debug_assert!(fields.windows(2).all(|pair| pair[0].name < pair[1].name));
        Self::from_kind(TypeKind::Struct(StructType { name, fields }))
    }

    pub fn kind(&self) -> &TypeKind {
        &self.0
    }

    /// Struct body, if this is a struct.
    pub fn as_struct(&self) -> Option<&StructType> {
        match self.kind() {
            TypeKind::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` if both handles share the same node.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Returns `true` if every `Cycle` resolves to a struct inside this descriptor.
    ///
    /// Only closed descriptors are safe to share outside the descent that built them.
    pub fn is_closed(&self) -> bool {
        self.closed_within(0)
    }

    fn closed_within(&self, struct_depth: u32) -> bool {
        match self.kind() {
            TypeKind::Primitive(_) => true,
            TypeKind::List(elem) | TypeKind::Set(elem) | TypeKind::Ref(elem) => {
                elem.closed_within(struct_depth)
            }
            TypeKind::Map(key, value) => {
                key.closed_within(struct_depth) && value.closed_within(struct_depth)
            }
            TypeKind::Struct(s) => s
                .fields
                .iter()
                .all(|f| f.ty.closed_within(struct_depth + 1)),
            TypeKind::Union(members) => members.iter().all(|m| m.closed_within(struct_depth)),
            TypeKind::Cycle(depth) => *depth < struct_depth,
        }
    }

    /// Human-readable rendering, e.g. `struct Person {\n  given: String,\n}`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        describe::write_type(&mut out, self, 0);
        out
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.kind(), f)
    }
}
