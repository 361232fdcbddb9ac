// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! typeshape - structural type descriptors for content-addressed value stores
//!
//! Before a value is written to a content-addressed store, its shape must be
//! expressed as a [`Type`]: a descriptor in a small closed algebra (`Number`,
//! `Bool`, `String`, `Blob`, `Type`, `List`, `Set`, `Map`, `Ref`, structs,
//! unions and cycle back-references). Structurally identical shapes always
//! produce identical descriptors, and recursive types terminate with `Cycle`
//! back-references.
//!
//! # Overview
//!
//! - **[`Shape`]**: how a Rust type describes itself (derive or manual impl)
//! - **[`infer`]**: resolve a `Shape` into a [`Type`]
//! - **[`TypeCache`]**: process-wide memo of completed descriptors
//! - **[`TypeMarshaler`] / [`StructNamer`]**: opt-out and naming hooks
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use typeshape::{infer, Shape, StructField, Type};
//!
//! #[derive(Shape)]
//! pub struct Person {
//!     pub given: String,
//!     pub female: bool,
//!     #[shape(tag = "nick,omitempty")]
//!     pub nickname: String,
//!     #[shape(tag = ",set")]
//!     pub tags: HashMap<String, ()>,
//! }
//!
//! let ty = infer::<Person>().unwrap();
//! assert_eq!(
//!     ty,
//!     Type::structure(
//!         "Person",
//!         vec![
//!             StructField::new("female", Type::bool()),
//!             StructField::new("given", Type::string()),
//!             StructField::optional("nick", Type::string()),
//!             StructField::new("tags", Type::set(Type::string())),
//!         ],
//!     )
//! );
//! ```
//!
//! # Field attributes
//!
//! - `#[shape(tag = "...")]`: rename / skip / optional / set directives, see [`tags`]
//! - `#[shape(embed)]`: embedded struct, flattened into the parent unless renamed
//!
//! Fields without `pub` are omitted unless their tag names them, which is an
//! error.
//!
//! # Container attributes
//!
//! - `#[shape(type_marshaler)]`: use the type's [`TypeMarshaler`] impl
//! - `#[shape(struct_name)]`: use the type's [`StructNamer`] impl
//! - `#[shape(anonymous)]`: infer an anonymous (empty-named) struct

// Lets derive output (`::typeshape::...`) resolve inside this crate's own tests.
extern crate self as typeshape;

pub mod cache;
pub mod error;
pub mod infer;
pub mod native;
pub mod store;
pub mod tags;
pub mod types;

pub use cache::{CachedType, LookupStats, TypeCache};
pub use error::{HookError, InferError};
pub use infer::{infer, infer_of_val, infer_or_panic, infer_with, Inferrer, Options};
pub use native::{
    NativeField, NativeKind, NativeStruct, NativeType, NumberKind, Shape, StructNameFn,
    StructNamer, TypeHandle, TypeMarshalFn, TypeMarshaler,
};
pub use types::{PrimitiveKind, StructField, StructType, Type, TypeKind};

pub use typeshape_derive::Shape;
