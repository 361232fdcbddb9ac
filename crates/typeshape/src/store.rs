// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shapes of store-native values.
//!
//! The value store owns the real `List`, `Set`, `Map`, `Ref`, `Blob` and
//! struct values. A field holding one of them has a fixed descriptor that
//! does not depend on its contents, so these placeholders only carry that
//! descriptor into inference.
//!
//! | Placeholder     | Descriptor          |
//! |-----------------|---------------------|
//! | [`Value`]       | `Value`             |
//! | [`List`]        | `List<Value>`       |
//! | [`Set`]         | `Set<Value>`        |
//! | [`Map`]         | `Map<Value, Value>` |
//! | [`Ref`]         | `Ref<Value>`        |
//! | [`Blob`]        | `Blob`              |
//! | [`StructValue`] | `Value`             |
//! | [`Type`]        | `Type`              |

use crate::native::{NativeType, Shape};
use crate::types::Type;

macro_rules! store_shapes {
    ($($(#[$doc:meta])* $name:ident => $ty:expr;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            impl Shape for $name {
                fn native_type() -> NativeType {
                    NativeType::builtin($ty)
                }
            }
        )*
    };
}

store_shapes! {
    /// Any store value.
    Value => Type::value();
    /// A store list of arbitrary values.
    List => Type::list(Type::value());
    /// A store set of arbitrary values.
    Set => Type::set(Type::value());
    /// A store map between arbitrary values.
    Map => Type::map(Type::value(), Type::value());
    /// A reference to an arbitrary stored value.
    Ref => Type::reference(Type::value());
    /// Opaque binary data.
    Blob => Type::blob();
    /// A store struct of unknown shape, usually the target of an `original` tag.
    StructValue => Type::value();
}

/// Type descriptors are themselves values of type `Type`.
impl Shape for Type {
    fn native_type() -> NativeType {
        NativeType::builtin(Type::type_type())
    }
}
