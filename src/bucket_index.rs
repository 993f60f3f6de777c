//! BucketIndex: chained bucket table mapping key hashes to entry handles.

use crate::entry_store::Handle;

/// Bucket count every index starts from and returns to on reset.
pub const MIN_BUCKETS: usize = 8;
/// Growth triggers once the entry count reaches this multiple of the bucket
/// count.
pub const MAX_LOAD_FACTOR: usize = 2;

/// One filed handle. The hash is cached at filing time so rebuilds never have
/// to touch the key again.
#[derive(Copy, Clone, Debug)]
struct Filed {
    hash: u64,
    handle: Handle,
}

/// Hash-to-handle index: a table of chains, one chain per bucket, holding
/// handles into the entry store. The index never looks at keys; equality is
/// delegated to a caller-supplied predicate, so the only thing it knows about
/// an entry is its cached hash.
#[derive(Debug)]
pub struct BucketIndex {
    chains: Vec<Vec<Filed>>,
}

impl BucketIndex {
    pub fn new() -> Self {
        Self::with_buckets(MIN_BUCKETS)
    }

    /// Index pre-sized to `buckets` (clamped up to the minimum). Used when a
    /// clone inherits its source's table size.
    pub fn with_buckets(buckets: usize) -> Self {
        let buckets = buckets.max(MIN_BUCKETS);
        Self {
            chains: vec![Vec::new(); buckets],
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.chains.len()
    }

    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.chains.len() as u64) as usize
    }

    /// Scans the chain for `hash` and returns the first filed handle the
    /// predicate accepts. Expected O(1) with a well-distributed hash; worst
    /// case is the chain length.
    pub fn find(&self, hash: u64, mut is_match: impl FnMut(Handle) -> bool) -> Option<Handle> {
        self.chains[self.bucket_of(hash)]
            .iter()
            .map(|f| f.handle)
            .find(|&h| is_match(h))
    }

    /// Appends `handle` to the chain for `hash`. The caller guarantees the
    /// handle is not already filed.
    pub fn file(&mut self, hash: u64, handle: Handle) {
        let bucket = self.bucket_of(hash);
        self.chains[bucket].push(Filed { hash, handle });
    }

    /// Removes `handle` from the chain for `hash`. Chain order carries no
    /// meaning for unique keys, so the slot is swap-removed.
    pub fn unfile(&mut self, hash: u64, handle: Handle) {
        let bucket = self.bucket_of(hash);
        if let Some(pos) = self.chains[bucket].iter().position(|f| f.handle == handle) {
            self.chains[bucket].swap_remove(pos);
        }
    }

    /// Whether filing would leave the table at or beyond the load-factor
    /// limit for `entries` live entries.
    pub fn overloaded(&self, entries: usize) -> bool {
        entries >= MAX_LOAD_FACTOR * self.chains.len()
    }

    /// Sole growth mechanism: doubles the bucket count and refiles every
    /// filed handle under the new modulus, using the cached hashes. Runs
    /// synchronously inside the triggering insert and never shrinks.
    pub fn grow(&mut self) {
        let doubled = self.chains.len() * 2;
        let old = std::mem::replace(&mut self.chains, vec![Vec::new(); doubled]);
        for filed in old.into_iter().flatten() {
            let bucket = self.bucket_of(filed.hash);
            self.chains[bucket].push(filed);
        }
    }

    /// Back to the empty, minimum-size table.
    pub fn reset(&mut self) {
        self.chains.clear();
        self.chains.resize_with(MIN_BUCKETS, Vec::new);
    }

    #[cfg(test)]
    fn filed_count(&self) -> usize {
        self.chains.iter().map(Vec::len).sum()
    }
}

impl Default for BucketIndex {
    fn default() -> Self {
        Self::new()
    }
}
