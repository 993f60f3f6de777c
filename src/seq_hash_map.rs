//! SeqHashMap: public map composing the entry store and the bucket index.

use crate::bucket_index::BucketIndex;
use crate::entry_store::{self, EntryStore, Handle};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Error returned by [`SeqHashMap::at`] when the key is absent. Every other
/// operation on the map is total.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LookupError {
    KeyNotFound,
}

/// A hash map that iterates in insertion order.
///
/// Two structures cooperate behind the surface: an entry store owning the
/// key-value pairs in insertion order, and a bucket index of chains holding
/// stable handles into the store, partitioned by `hash mod bucket_count`.
/// Lookup consults the index; iteration walks the store; growth rebuilds the
/// index only, so the store and its order are untouched by resizes.
///
/// Insertion is **first-write-wins**: inserting a key that is already present
/// keeps the stored value and drops the new one. The table starts at 8
/// buckets and doubles whenever the entry count reaches twice the bucket
/// count; it never shrinks, except for [`clear`] resetting it.
///
/// [`clear`]: SeqHashMap::clear
pub struct SeqHashMap<K, V, S = RandomState> {
    hasher: S,
    store: EntryStore<K, V>,
    index: BucketIndex,
}

impl<K, V> SeqHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for SeqHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> SeqHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    /// Map using an explicit hashing strategy. The strategy is owned by this
    /// instance and cloned into copies; it is never shared.
    ///
    /// Chain lengths track the distribution of the supplied hasher. A badly
    /// distributed hash degrades lookups toward linear scans regardless of
    /// the bucket count; that is the caller's responsibility, not defended
    /// against here.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            store: EntryStore::new(),
            index: BucketIndex::new(),
        }
    }

    fn with_hasher_and_buckets(hasher: S, buckets: usize) -> Self {
        Self {
            hasher,
            store: EntryStore::new(),
            index: BucketIndex::with_buckets(buckets),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The hashing strategy this map was built with.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Number of buckets currently backing the index. Starts at 8, doubles on
    /// growth, never shrinks while entries are erased.
    pub fn bucket_count(&self) -> usize {
        self.index.bucket_count()
    }

    /// Handle of the entry for `q`, or `None` if absent. The handle stays
    /// valid until that entry is removed or the map is cleared.
    pub fn find<Q>(&self, q: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.index.find(hash, |h| {
            self.store
                .key(h)
                .map(|k| k.borrow() == q)
                .unwrap_or(false)
        })
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let h = self.find(q)?;
        self.store.value(h)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let h = self.find(q)?;
        self.store.value_mut(h)
    }

    /// Value for `q`, or [`LookupError::KeyNotFound`]. The one fallible read;
    /// use [`get`](Self::get) for an `Option`.
    pub fn at<Q>(&self, q: &Q) -> Result<&V, LookupError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).ok_or(LookupError::KeyNotFound)
    }

    /// Inserts `key` with the value built by `default`, or returns the handle
    /// of the existing entry without running `default` (first-write-wins).
    ///
    /// On an actual insertion the entry is appended to the iteration order,
    /// filed in the index, and, if the entry count has reached twice the
    /// bucket count, the index is rebuilt at double width before returning.
    pub fn insert_with<F>(&mut self, key: K, default: F) -> Handle
    where
        F: FnOnce() -> V,
    {
        let hash = self.make_hash(&key);
        let store = &self.store;
        if let Some(existing) = self.index.find(hash, |h| store.key(h) == Some(&key)) {
            return existing;
        }
        let handle = self.store.append(key, default());
        self.index.file(hash, handle);
        if self.index.overloaded(self.store.len()) {
            self.index.grow();
        }
        handle
    }

    /// Inserts the pair and returns the new entry's handle, or, if the key is
    /// already present, returns the existing entry's handle and drops `value`
    /// (first-write-wins; the stored value is never overwritten).
    pub fn insert(&mut self, key: K, value: V) -> Handle {
        self.insert_with(key, move || value)
    }

    /// Mutable reference to the value for `key`, inserting `V::default()`
    /// first if the key is absent. Mutations through the reference are seen
    /// by subsequent lookups.
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let handle = self.insert_with(key, V::default);
        self.store.value_mut(handle).unwrap()
    }

    /// Removes the entry for `q`, returning the owned pair. Silent no-op
    /// (`None`) when the key is absent. Other entries keep their positions
    /// and handles.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let store = &self.store;
        let handle = self.index.find(hash, |h| {
            store.key(h).map(|k| k.borrow() == q).unwrap_or(false)
        })?;
        self.index.unfile(hash, handle);
        self.store.remove(handle)
    }

    /// Removes every entry and resets the index to the minimum bucket count.
    /// All outstanding handles stop resolving. Subsequent inserts behave as
    /// on a freshly constructed map.
    pub fn clear(&mut self) {
        self.store.clear();
        self.index.reset();
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.store.iter(),
        }
    }

    /// Entries in insertion order with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.store.iter_mut(),
        }
    }
}

impl Handle {
    /// Key of the referenced entry, while it is live in `map`.
    pub fn key<'a, K, V, S>(&self, map: &'a SeqHashMap<K, V, S>) -> Option<&'a K>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        map.store.key(*self)
    }

    /// Value of the referenced entry, while it is live in `map`.
    pub fn value<'a, K, V, S>(&self, map: &'a SeqHashMap<K, V, S>) -> Option<&'a V>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        map.store.value(*self)
    }

    /// Mutable value of the referenced entry, while it is live in `map`.
    pub fn value_mut<'a, K, V, S>(&self, map: &'a mut SeqHashMap<K, V, S>) -> Option<&'a mut V>
    where
        K: Eq + Hash,
        S: BuildHasher + Clone + Default,
    {
        map.store.value_mut(*self)
    }
}

impl<K, V, S> Clone for SeqHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Clone + Default,
{
    /// Deep copy: a fresh store and index populated by replaying the source's
    /// entries in iteration order, so the clone iterates identically. The
    /// clone starts at the source's bucket count and owns its own clone of
    /// the hashing strategy.
    fn clone(&self) -> Self {
        let mut out =
            Self::with_hasher_and_buckets(self.hasher.clone(), self.index.bucket_count());
        for (k, v) in self.iter() {
            out.insert(k.clone(), v.clone());
        }
        out
    }
}

impl<K, V, S> fmt::Debug for SeqHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.store.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for SeqHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    /// Inserts each pair in sequence order; later duplicates of earlier keys
    /// are dropped by first-write-wins.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for SeqHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for SeqHashMap<K, V>
where
    K: Eq + Hash,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

/// Iterator over `(&K, &V)` in insertion order.
pub struct Iter<'a, K, V> {
    inner: entry_store::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Iterator over `(&K, &mut V)` in insertion order.
pub struct IterMut<'a, K, V> {
    inner: entry_store::IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Owning iterator draining entries front to back in insertion order.
pub struct IntoIter<K, V> {
    store: EntryStore<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<Self::Item> {
        let h = self.store.first()?;
        self.store.remove(h)
    }
}

impl<'a, K, V, S> IntoIterator for &'a SeqHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.store.iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut SeqHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            inner: self.store.iter_mut(),
        }
    }
}

impl<K, V, S> IntoIterator for SeqHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { store: self.store }
    }
}
