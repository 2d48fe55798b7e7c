//! # Keyed store with merge-on-write updates.
//!
//! [`KeyedStore`] maps string keys to records that know how to absorb a partial
//! update ([`Merge`]). It carries no business logic.
//!
//! ## Rules
//! - `add` inserts unconditionally (replaces any existing record);
//! - `set` shallow-merges a patch onto the existing record, or builds a fresh one;
//! - iteration order is insertion order and survives deletes;
//! - every call takes the lock for its own duration only, so callbacks invoked
//!   by callers between calls may freely re-enter the store;
//! - `update`/`upsert` run their closure under the write lock: a read-modify-write
//!   that no other writer can interleave with. The closure must not touch the store.
//!
//! ## Example
//! ```rust
//! use hydravisor::{HydrationRecord, RecordPatch, RecordStore};
//!
//! let store = RecordStore::new();
//! store.set("nav", RecordPatch::new().has_loaded(true));
//! store.set("nav", RecordPatch::new().keep_alive(true));
//!
//! let rec = store.get("nav").unwrap();
//! assert!(rec.has_loaded);
//! assert_eq!(rec.keep_alive, Some(true));
//! ```

use indexmap::IndexMap;
use parking_lot::RwLock;

/// A record type that can absorb partial updates.
pub trait Merge: Clone + Send + Sync + 'static {
    /// Partial update; fields present in the patch overwrite, the rest stay.
    type Patch;

    /// Applies `patch` onto `self`.
    fn merge(&mut self, patch: Self::Patch);

    /// Builds a record for `key` from a patch when nothing exists yet.
    fn from_patch(key: &str, patch: Self::Patch) -> Self;
}

/// String-keyed store with insert/merge/read/delete operations.
pub struct KeyedStore<R: Merge> {
    items: RwLock<IndexMap<String, R>>,
}

impl<R: Merge> Default for KeyedStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Merge> KeyedStore<R> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(IndexMap::new()),
        }
    }

    /// Inserts `value` under `key`, replacing whatever was there.
    pub fn add(&self, key: impl Into<String>, value: R) {
        self.items.write().insert(key.into(), value);
    }

    /// Merges `patch` onto the record at `key`, creating it if absent.
    pub fn set(&self, key: &str, patch: R::Patch) {
        let mut items = self.items.write();
        match items.get_mut(key) {
            Some(item) => item.merge(patch),
            None => {
                items.insert(key.to_string(), R::from_patch(key, patch));
            }
        }
    }

    /// Runs `f` on the record at `key` under the write lock.
    ///
    /// Returns `None` without calling `f` if there is no record.
    pub fn update<T>(&self, key: &str, f: impl FnOnce(&mut R) -> T) -> Option<T> {
        self.items.write().get_mut(key).map(f)
    }

    /// Like [`update`](Self::update), building the record from an empty patch first if absent.
    pub fn upsert<T>(&self, key: &str, f: impl FnOnce(&mut R) -> T) -> T
    where
        R::Patch: Default,
    {
        let mut items = self.items.write();
        let item = items
            .entry(key.to_string())
            .or_insert_with(|| R::from_patch(key, R::Patch::default()));
        f(item)
    }

    /// Returns a copy of the record at `key`.
    pub fn get(&self, key: &str) -> Option<R> {
        self.items.read().get(key).cloned()
    }

    /// Returns true if a record exists at `key`.
    pub fn has(&self, key: &str) -> bool {
        self.items.read().contains_key(key)
    }

    /// Removes the record at `key`, returning it.
    pub fn delete(&self, key: &str) -> Option<R> {
        self.items.write().shift_remove(key)
    }

    /// Point-in-time copy of every entry, in store order.
    pub fn snapshot(&self) -> Vec<(String, R)> {
        self.items
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Keys in store order.
    pub fn keys(&self) -> Vec<String> {
        self.items.read().keys().cloned().collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// True if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Removes every record, returning them in store order.
    pub fn clear(&self) -> Vec<(String, R)> {
        self.items.write().drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Pair {
        a: Option<i32>,
        b: Option<i32>,
    }

    impl Merge for Pair {
        type Patch = Pair;

        fn merge(&mut self, patch: Pair) {
            if patch.a.is_some() {
                self.a = patch.a;
            }
            if patch.b.is_some() {
                self.b = patch.b;
            }
        }

        fn from_patch(_key: &str, patch: Pair) -> Self {
            patch
        }
    }

    #[test]
    fn set_merges_instead_of_overwriting() {
        let store = KeyedStore::<Pair>::new();
        store.set("k", Pair { a: Some(1), b: None });
        store.set("k", Pair { a: None, b: Some(2) });
        assert_eq!(
            store.get("k"),
            Some(Pair {
                a: Some(1),
                b: Some(2)
            })
        );
    }

    #[test]
    fn add_replaces_existing_record() {
        let store = KeyedStore::<Pair>::new();
        store.set("k", Pair { a: Some(1), b: Some(1) });
        store.add("k", Pair { a: None, b: Some(5) });
        assert_eq!(store.get("k"), Some(Pair { a: None, b: Some(5) }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_keeps_remaining_order() {
        let store = KeyedStore::<Pair>::new();
        for k in ["x", "y", "z"] {
            store.add(k, Pair::default());
        }
        assert!(store.delete("y").is_some());
        assert!(!store.has("y"));
        assert_eq!(store.keys(), vec!["x".to_string(), "z".to_string()]);
        assert!(store.delete("y").is_none());
    }

    #[test]
    fn update_skips_missing_and_upsert_creates() {
        let store = KeyedStore::<Pair>::new();
        assert_eq!(store.update("k", |p| p.a = Some(1)), None);
        assert!(!store.has("k"));

        let b = store.upsert("k", |p| {
            p.b = Some(7);
            p.b
        });
        assert_eq!(b, Some(7));
        assert_eq!(store.update("k", |p| p.a.replace(3)), Some(None));
        assert_eq!(store.get("k"), Some(Pair { a: Some(3), b: Some(7) }));
    }

    #[test]
    fn clear_drains_everything() {
        let store = KeyedStore::<Pair>::new();
        store.add("x", Pair::default());
        store.add("y", Pair::default());
        let drained = store.clear();
        assert_eq!(drained.len(), 2);
        assert!(store.is_empty());
    }
}
