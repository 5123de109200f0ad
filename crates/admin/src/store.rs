//! Record storage abstraction for the back-office.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use maison_core::{DomainError, DomainResult};

/// Keyed record store. Listing order follows key order.
pub trait Repository<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn upsert(&self, key: K, value: V);
    fn remove(&self, key: &K) -> Option<V>;
    fn list(&self) -> Vec<V>;

    /// Store `value` only if `key` is free; `Conflict` otherwise.
    fn insert_new(&self, key: K, value: V) -> DomainResult<()>;

    /// Atomic read-modify-write of the record at `key`.
    ///
    /// `f` runs on a copy while the store is locked; the copy is written back
    /// and returned only when `f` succeeds.
    fn update<F>(&self, key: &K, f: F) -> DomainResult<V>
    where
        F: FnOnce(&mut V) -> DomainResult<()>;
}

impl<K, V, S> Repository<K, V> for Arc<S>
where
    S: Repository<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) {
        (**self).upsert(key, value)
    }

    fn remove(&self, key: &K) -> Option<V> {
        (**self).remove(key)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }

    fn insert_new(&self, key: K, value: V) -> DomainResult<()> {
        (**self).insert_new(key, value)
    }

    fn update<F>(&self, key: &K, f: F) -> DomainResult<V>
    where
        F: FnOnce(&mut V) -> DomainResult<()>,
    {
        (**self).update(key, f)
    }
}

/// In-memory store used by the admin and in tests.
///
/// A poisoned lock reads as empty and drops writes.
#[derive(Debug)]
pub struct InMemoryRepository<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
}

impl<K, V> InMemoryRepository<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryRepository<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Repository<K, V> for InMemoryRepository<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn upsert(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut map = self.inner.write().ok()?;
        map.remove(key)
    }

    fn list(&self) -> Vec<V> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn insert_new(&self, key: K, value: V) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if map.contains_key(&key) {
            return Err(DomainError::conflict("record already exists"));
        }
        map.insert(key, value);
        Ok(())
    }

    fn update<F>(&self, key: &K, f: F) -> DomainResult<V>
    where
        F: FnOnce(&mut V) -> DomainResult<()>,
    {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let slot = map.get_mut(key).ok_or_else(DomainError::not_found)?;
        let mut next = slot.clone();
        f(&mut next)?;
        *slot = next.clone();
        Ok(next)
    }
}

fn poisoned() -> DomainError {
    DomainError::conflict("record store is unavailable")
}
