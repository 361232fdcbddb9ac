// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural type inference.
//!
//! Resolving a native type `T` proceeds in order:
//!
//! 1. `T` is a struct currently being descended: emit `Cycle(depth)`.
//! 2. `T` is cached and its entry was not computed through a struct currently
//!    being descended: return the cached descriptor.
//! 3. `T` provides a [`TypeMarshaler`](crate::TypeMarshaler): use its result.
//! 4. Otherwise dispatch on the native kind, recursing into element and field
//!    types.
//!
//! Completed, closed descriptors are cached under `T`'s `TypeId`. Errors abort
//! the whole call and leave nothing in the cache for the failing type.
//!
//! ```
//! use typeshape::{infer, Shape, StructField, Type};
//!
//! #[derive(Shape)]
//! pub struct Node {
//!     pub value: i32,
//!     pub children: Vec<Node>,
//! }
//!
//! let ty = infer::<Node>().unwrap();
//! assert_eq!(
//!     ty,
//!     Type::structure(
//!         "Node",
//!         vec![
//!             StructField::new("children", Type::list(Type::cycle(0))),
//!             StructField::new("value", Type::number()),
//!         ],
//!     )
//! );
//! ```

mod cycle;
mod structs;

pub use cycle::{CycleTracker, Frame};

use crate::cache::TypeCache;
use crate::error::InferError;
use crate::native::{NativeKind, NativeType, Shape, TypeHandle, TypeMarshalFn};
use crate::types::Type;
use std::any::TypeId;

/// Call-site options. Only apply to the top-level type of a call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Infer a sequence, or a map with an empty marker value, as a `Set`.
    pub force_set: bool,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn force_set(mut self, force_set: bool) -> Self {
        self.force_set = force_set;
        self
    }
}

/// Inference entry point bound to a cache.
#[derive(Debug, Clone, Copy)]
pub struct Inferrer<'c> {
    cache: &'c TypeCache,
}

impl Inferrer<'static> {
    /// Inferrer backed by the process-wide cache.
    pub fn global() -> Self {
        Self {
            cache: TypeCache::global(),
        }
    }
}

impl Default for Inferrer<'static> {
    fn default() -> Self {
        Self::global()
    }
}

impl<'c> Inferrer<'c> {
    /// Inferrer backed by a caller-owned cache.
    pub fn with_cache(cache: &'c TypeCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &'c TypeCache {
        self.cache
    }

    /// Infer the descriptor of the type behind `handle`.
    pub fn infer(&self, handle: &TypeHandle, options: Options) -> Result<Type, InferError> {
        let mut descent = Descent {
            cache: self.cache,
            cycles: CycleTracker::new(),
            touched: Vec::new(),
        };
        let result = descent.resolve(handle, options.force_set);
        debug_assert!(descent.cycles.is_empty());
        if let Err(err) = &result {
            log::debug!("[infer] {} failed: {}", handle.type_name(), err);
        }
        result
    }

    /// Infer the descriptor of `T`.
    pub fn infer_type<T: Shape + ?Sized>(&self, options: Options) -> Result<Type, InferError> {
        self.infer(&TypeHandle::of::<T>(), options)
    }

    /// Infer the descriptor of the type behind `handle`, panicking on error.
    pub fn infer_or_panic(&self, handle: &TypeHandle) -> Type {
        match self.infer(handle, Options::default()) {
            Ok(ty) => ty,
            Err(err) => panic!("{}", err),
        }
    }
}

/// Infer the descriptor of `T` using the global cache.
pub fn infer<T: Shape + ?Sized>() -> Result<Type, InferError> {
    infer_with::<T>(Options::default())
}

/// Infer the descriptor of `T` with call-site options.
pub fn infer_with<T: Shape + ?Sized>(options: Options) -> Result<Type, InferError> {
    Inferrer::global().infer_type::<T>(options)
}

/// Infer the descriptor of the type of `value`.
pub fn infer_of_val<T: Shape + ?Sized>(_value: &T) -> Result<Type, InferError> {
    infer::<T>()
}

/// Infer the descriptor of `T`, panicking on any error.
///
/// For call sites whose shapes are known to be valid.
pub fn infer_or_panic<T: Shape + ?Sized>() -> Type {
    Inferrer::global().infer_or_panic(&TypeHandle::of::<T>())
}

/// State of one top-level inference call.
struct Descent<'c> {
    cache: &'c TypeCache,
    cycles: CycleTracker,
    /// Struct types descended so far, in visit order.
    touched: Vec<TypeId>,
}

impl Descent<'_> {
    fn resolve(&mut self, handle: &TypeHandle, force_set: bool) -> Result<Type, InferError> {
        if let Some((depth, frame)) = self.cycles.ancestor(handle.id()) {
            log::trace!(
                "[infer] {} refers back to struct {:?} at depth {}",
                handle.type_name(),
                frame.name,
                depth
            );
            return Ok(Type::cycle(depth));
        }

        let mut described = None;
        let force_set = force_set && {
            let native = handle.native_type();
            let applies = set_override_applies(&native);
            described = Some(native);
            applies
        };

        // A forced set differs from the cached plain descriptor, so it neither
        // reads nor writes the cache.
        if !force_set {
            let cycles = &self.cycles;
            let hit = self.cache.get_where(handle.id(), |structs| {
                !structs.iter().any(|id| cycles.ancestor(*id).is_some())
            });
            if let Some(hit) = hit {
                log::trace!("[infer] cache hit for {}", handle.type_name());
                self.touched.extend_from_slice(&hit.structs);
                return Ok(hit.ty);
            }
        }

        let native = match described {
            Some(native) => native,
            None => handle.native_type(),
        };
        let start = self.touched.len();
        let ty = match native.type_marshaler() {
            Some(hook) => call_type_marshaler(handle, hook)?,
            None => self.dispatch(handle, &native, force_set)?,
        };

        if !force_set && ty.is_closed() {
            log::debug!("[infer] caching {} as {}", handle.type_name(), ty);
            self.cache
                .put(handle.id(), ty.clone(), self.touched[start..].to_vec());
        }
        Ok(ty)
    }

    fn dispatch(
        &mut self,
        handle: &TypeHandle,
        native: &NativeType,
        force_set: bool,
    ) -> Result<Type, InferError> {
        match native.kind() {
            NativeKind::Bool => Ok(Type::bool()),
            NativeKind::String => Ok(Type::string()),
            NativeKind::Number(_) => Ok(Type::number()),
            NativeKind::Sequence { element, .. } => {
                let element = self.resolve(element, false)?;
                if force_set {
                    Ok(Type::set(element))
                } else {
                    Ok(Type::list(element))
                }
            }
            NativeKind::Set { element } => Ok(Type::set(self.resolve(element, false)?)),
            NativeKind::Map { key, value } => {
                if force_set && value.native_type().is_empty_marker() {
                    return Ok(Type::set(self.resolve(key, false)?));
                }
                let key = self.resolve(key, false)?;
                let value = self.resolve(value, false)?;
                Ok(Type::map(key, value))
            }
            NativeKind::Pointer(target) => self.resolve(target, force_set),
            NativeKind::Builtin(ty) => Ok(ty.clone()),
            NativeKind::Struct(s) => self.resolve_struct(handle, native, s),
            NativeKind::Unsupported(kind) => Err(InferError::UnsupportedType {
                type_name: handle.type_name().to_string(),
                kind: *kind,
            }),
        }
    }
}

/// Whether the set override can change the descriptor of `native`.
fn set_override_applies(native: &NativeType) -> bool {
    if native.type_marshaler().is_some() {
        return false;
    }
    match native.kind() {
        NativeKind::Sequence { .. } | NativeKind::Pointer(_) => true,
        NativeKind::Map { value, .. } => value.native_type().is_empty_marker(),
        _ => false,
    }
}

/// Run a [`TypeMarshaler`](crate::TypeMarshaler) hook.
///
/// Panics raised by the hook propagate untouched.
fn call_type_marshaler(handle: &TypeHandle, hook: TypeMarshalFn) -> Result<Type, InferError> {
    match hook() {
        Ok(Some(ty)) => Ok(ty),
        Ok(None) => panic!(
            "TypeMarshaler for {} returned neither a type nor an error",
            handle.type_name()
        ),
        Err(err) => Err(InferError::CustomHook(err)),
    }
}
