// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent inference over a shared cache.
//!
//! Each call owns its cycle state; only the cache is shared. Racing threads
//! may compute the same descriptor twice, but must all observe equal results.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Barrier};
use std::thread;
use typeshape::{Inferrer, Options, Shape, StructField, Type, TypeCache};

#[derive(Shape)]
pub struct Link {
    pub id: u64,
    pub next: Option<Box<Link>>,
}

#[derive(Shape)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
}

#[derive(Shape)]
pub struct GraphNode {
    pub name: String,
    pub edges: Vec<GraphNode>,
    pub owner: Option<Box<Graph>>,
}

const THREADS: usize = 8;

#[test]
fn concurrent_calls_agree() {
    let cache = Arc::new(TypeCache::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let inferrer = Inferrer::with_cache(&cache);
                let mut out = Vec::new();
                for round in 0..50 {
                    let ty = if (i + round) % 2 == 0 {
                        inferrer.infer_type::<Link>(Options::default())
                    } else {
                        inferrer.infer_type::<Graph>(Options::default())
                    };
                    out.push(ty.expect("inference succeeds"));
                }
                out
            })
        })
        .collect();

    let link = Type::structure(
        "Link",
        vec![
            StructField::new("id", Type::number()),
            StructField::new("next", Type::cycle(0)),
        ],
    );
    let graph = Type::structure(
        "Graph",
        vec![StructField::new(
            "nodes",
            Type::list(Type::structure(
                "GraphNode",
                vec![
                    StructField::new("edges", Type::list(Type::cycle(0))),
                    StructField::new("name", Type::string()),
                    StructField::new("owner", Type::cycle(1)),
                ],
            )),
        )],
    );

    for handle in handles {
        for ty in handle.join().expect("thread panicked") {
            assert!(ty == link || ty == graph, "unexpected descriptor {}", ty);
        }
    }
    assert!(cache.stats().hits > 0);
}

#[derive(Shape)]
pub struct Outer {
    pub inner: Inner,
}

#[derive(Shape)]
pub struct Inner {
    pub outer: Vec<Outer>,
}

/// Racing mutually recursive types must still give one descriptor per type,
/// whichever of them lands in the cache first.
#[test]
fn concurrent_mutual_recursion_is_canonical() {
    let outer = Type::structure(
        "Outer",
        vec![StructField::new(
            "inner",
            Type::structure(
                "Inner",
                vec![StructField::new("outer", Type::list(Type::cycle(1)))],
            ),
        )],
    );
    let inner = Type::structure(
        "Inner",
        vec![StructField::new(
            "outer",
            Type::list(Type::structure(
                "Outer",
                vec![StructField::new("inner", Type::cycle(1))],
            )),
        )],
    );

    for _ in 0..20 {
        let cache = Arc::new(TypeCache::new());
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let inferrer = Inferrer::with_cache(&cache);
                    (0..20)
                        .map(|round| {
                            let outer_first = (i + round) % 2 == 0;
                            let ty = if outer_first {
                                inferrer.infer_type::<Outer>(Options::default())
                            } else {
                                inferrer.infer_type::<Inner>(Options::default())
                            };
                            (outer_first, ty.expect("inference succeeds"))
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for (is_outer, ty) in handle.join().expect("thread panicked") {
                if is_outer {
                    assert_eq!(ty, outer);
                } else {
                    assert_eq!(ty, inner);
                }
            }
        }
    }
}

#[test]
fn hook_panic_leaves_inferrer_usable() {
    pub struct Exploding;

    impl Shape for Exploding {
        fn native_type() -> typeshape::NativeType {
            typeshape::NativeType::bool().with_type_marshaler(|| panic!("boom"))
        }
    }

    let cache = TypeCache::new();
    let inferrer = Inferrer::with_cache(&cache);

    let caught = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = inferrer.infer_type::<Exploding>(Options::default());
    }));
    assert!(caught.is_err());
    assert!(cache.get(std::any::TypeId::of::<Exploding>()).is_none());

    let ty = inferrer
        .infer_type::<Link>(Options::default())
        .expect("later calls unaffected");
    assert!(ty.is_closed());
}
