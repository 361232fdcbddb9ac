// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! [`Shape`] implementations for std types.

use super::{NativeType, NumberKind, Shape, TypeHandle};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::{mpsc, Arc};

macro_rules! number_shapes {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Shape for $ty {
                fn native_type() -> NativeType {
                    NativeType::number(NumberKind::$kind)
                }
            }
        )*
    };
}

number_shapes! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl Shape for bool {
    fn native_type() -> NativeType {
        NativeType::bool()
    }
}

impl Shape for String {
    fn native_type() -> NativeType {
        NativeType::string()
    }
}

impl Shape for str {
    fn native_type() -> NativeType {
        NativeType::string()
    }
}

impl Shape for &'static str {
    fn native_type() -> NativeType {
        NativeType::string()
    }
}

/// `()` is the zero-field marker struct used as a set-shaped map value.
impl Shape for () {
    fn native_type() -> NativeType {
        NativeType::structure("", Vec::new())
    }
}

impl<T: Shape> Shape for Vec<T> {
    fn native_type() -> NativeType {
        NativeType::sequence(TypeHandle::of::<T>(), None)
    }
}

impl<T: Shape> Shape for VecDeque<T> {
    fn native_type() -> NativeType {
        NativeType::sequence(TypeHandle::of::<T>(), None)
    }
}

impl<T: Shape> Shape for LinkedList<T> {
    fn native_type() -> NativeType {
        NativeType::sequence(TypeHandle::of::<T>(), None)
    }
}

impl<T: Shape> Shape for [T] {
    fn native_type() -> NativeType {
        NativeType::sequence(TypeHandle::of::<T>(), None)
    }
}

impl<T: Shape, const N: usize> Shape for [T; N] {
    fn native_type() -> NativeType {
        NativeType::sequence(TypeHandle::of::<T>(), Some(N))
    }
}

impl<T: Shape, S: 'static> Shape for HashSet<T, S> {
    fn native_type() -> NativeType {
        NativeType::set(TypeHandle::of::<T>())
    }
}

impl<T: Shape> Shape for BTreeSet<T> {
    fn native_type() -> NativeType {
        NativeType::set(TypeHandle::of::<T>())
    }
}

impl<K: Shape, V: Shape, S: 'static> Shape for HashMap<K, V, S> {
    fn native_type() -> NativeType {
        NativeType::map(TypeHandle::of::<K>(), TypeHandle::of::<V>())
    }
}

impl<K: Shape, V: Shape> Shape for BTreeMap<K, V> {
    fn native_type() -> NativeType {
        NativeType::map(TypeHandle::of::<K>(), TypeHandle::of::<V>())
    }
}

macro_rules! pointer_shapes {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: Shape + ?Sized> Shape for $ptr<T> {
                fn native_type() -> NativeType {
                    NativeType::pointer(TypeHandle::of::<T>())
                }
            }
        )*
    };
}

pointer_shapes!(Box, Arc, Rc);

impl<T: Shape> Shape for Option<T> {
    fn native_type() -> NativeType {
        NativeType::pointer(TypeHandle::of::<T>())
    }
}

impl<T: 'static> Shape for mpsc::Sender<T> {
    fn native_type() -> NativeType {
        NativeType::unsupported("channel")
    }
}

impl<T: 'static> Shape for mpsc::SyncSender<T> {
    fn native_type() -> NativeType {
        NativeType::unsupported("channel")
    }
}

impl<T: 'static> Shape for mpsc::Receiver<T> {
    fn native_type() -> NativeType {
        NativeType::unsupported("channel")
    }
}

impl<R: 'static> Shape for fn() -> R {
    fn native_type() -> NativeType {
        NativeType::unsupported("function")
    }
}

impl<A: 'static, R: 'static> Shape for fn(A) -> R {
    fn native_type() -> NativeType {
        NativeType::unsupported("function")
    }
}

impl<A: 'static, B: 'static, R: 'static> Shape for fn(A, B) -> R {
    fn native_type() -> NativeType {
        NativeType::unsupported("function")
    }
}
