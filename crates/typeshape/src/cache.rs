// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent cache of inferred descriptors.
//!
//! The TypeCache maps a native type's [`TypeId`] to its completed descriptor
//! so inference runs at most once per type. Entries are pure data and are
//! never evicted.
//!
//! # Insert discipline
//!
//! The inferrer only inserts descriptors that are complete and closed (no
//! `Cycle` escaping the descriptor). Each entry also records the struct types
//! descended while computing it; a hit is only usable inside a descent when
//! none of those structs is currently being descended, otherwise the cached
//! copy would unroll an ancestor that must appear as a `Cycle`. Two threads
//! racing on the same type may both compute and insert it; the values are
//! equal and the second write simply replaces the first.

use crate::types::Type;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::any::TypeId;
use std::sync::{Arc, OnceLock};

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    pub hits: u64,
    pub misses: u64,
}

/// A cached descriptor and the struct types it was computed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedType {
    pub ty: Type,
    /// Sorted, deduplicated.
    pub structs: Arc<[TypeId]>,
}

/// Concurrent `TypeId -> Type` map.
#[derive(Debug, Default)]
pub struct TypeCache {
    entries: DashMap<TypeId, CachedType>,
    stats: RwLock<LookupStats>,
}

impl TypeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by [`crate::infer`] and friends.
    pub fn global() -> &'static TypeCache {
        static CACHE: OnceLock<TypeCache> = OnceLock::new();
        CACHE.get_or_init(TypeCache::new)
    }

    /// Cached descriptor for `id`. The returned `Type` shares the cached node.
    pub fn get(&self, id: TypeId) -> Option<Type> {
        self.get_where(id, |_| true).map(|entry| entry.ty)
    }

    /// Cached entry for `id`, if `usable` accepts its struct set.
    ///
    /// A rejected entry counts as a miss.
    pub fn get_where(
        &self,
        id: TypeId,
        usable: impl FnOnce(&[TypeId]) -> bool,
    ) -> Option<CachedType> {
        let hit = self
            .entries
            .get(&id)
            .map(|entry| entry.value().clone())
            .filter(|entry| usable(&entry.structs));
        let mut stats = self.stats.write();
        if hit.is_some() {
            stats.hits = stats.hits.saturating_add(1);
        } else {
            stats.misses = stats.misses.saturating_add(1);
        }
        hit
    }

    /// Store a completed descriptor computed through `structs`.
    pub fn put(&self, id: TypeId, ty: Type, mut structs: Vec<TypeId>) {
        debug_assert!(ty.is_closed(), "TypeCache entries must be closed descriptors");
        structs.sort_unstable();
        structs.dedup();
        let entry = CachedType {
            ty,
            structs: structs.into(),
        };
        if let Some(previous) = self.entries.insert(id, entry) {
            log::trace!("[cache] replaced entry {:?} ({})", id, previous.ty);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries and reset statistics.
    pub fn clear(&self) {
        self.entries.clear();
        *self.stats.write() = LookupStats::default();
    }

    #[must_use]
    pub fn stats(&self) -> LookupStats {
        *self.stats.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_get_miss_then_hit() {
        let cache = TypeCache::new();
        let id = TypeId::of::<u32>();

        assert!(cache.get(id).is_none());
        cache.put(id, Type::number(), Vec::new());

        let hit = cache.get(id).expect("cached entry");
        assert_eq!(hit, Type::number());
        assert_eq!(cache.stats(), LookupStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_hits_share_the_cached_node() {
        let cache = TypeCache::new();
        let id = TypeId::of::<Vec<u32>>();
        cache.put(id, Type::list(Type::number()), Vec::new());

        let a = cache.get(id).expect("first hit");
        let b = cache.get(id).expect("second hit");
        assert!(Type::ptr_eq(&a, &b));
    }

    #[test]
    fn test_duplicate_put_is_benign() {
        let cache = TypeCache::new();
        let id = TypeId::of::<bool>();
        cache.put(id, Type::bool(), Vec::new());
        cache.put(id, Type::bool(), Vec::new());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(id), Some(Type::bool()));
    }

    #[test]
    fn test_rejected_entry_counts_as_miss() {
        let cache = TypeCache::new();
        let id = TypeId::of::<String>();
        let owner = TypeId::of::<u8>();
        cache.put(id, Type::string(), vec![owner, owner]);

        let entry = cache.get_where(id, |_| true).expect("usable entry");
        assert_eq!(&*entry.structs, &[owner]);
        assert!(cache.get_where(id, |structs| !structs.contains(&owner)).is_none());
        assert_eq!(cache.stats(), LookupStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_clear() {
        let cache = TypeCache::new();
        cache.put(TypeId::of::<bool>(), Type::bool(), Vec::new());
        let _ = cache.get(TypeId::of::<bool>());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), LookupStats::default());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(TypeCache::global(), TypeCache::global()));
    }

    #[test]
    fn test_concurrent_writers_and_readers() {
        const THREADS: usize = 8;
        let cache = Arc::new(TypeCache::new());
        let barrier = Arc::new(Barrier::new(THREADS));
        let id = TypeId::of::<Vec<String>>();

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..100 {
                        if cache.get(id).is_none() {
                            cache.put(id, Type::list(Type::string()), Vec::new());
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker panicked");
        }

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(id), Some(Type::list(Type::string())));
        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, (THREADS * 100 + 1) as u64);
    }
}
