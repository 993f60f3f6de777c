//! seq-hashmap: a hash map that iterates in insertion order and hands out
//! stable handles to its entries.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep fast keyed access and a faithful record of insertion order
//!   consistent under insertion, removal, and table growth, using stable
//!   cross-references instead of addresses.
//! - Layers:
//!   - EntryStore<K, V>: slot arena that owns every entry and threads them
//!     onto a doubly-linked order list; the sole source of iteration order.
//!     Produces generational `Handle`s.
//!   - BucketIndex: table of chains, one per bucket, holding handles filed
//!     under `hash mod bucket_count` together with the entry's cached hash.
//!     Knows nothing about keys; equality runs behind a caller predicate.
//!   - SeqHashMap<K, V, S>: public API composing the two, holding the
//!     hashing strategy and driving growth.
//!
//! Constraints
//! - Single-threaded semantics: no locks, no atomics, no interior
//!   mutability. All mutation flows through `&mut self`.
//! - First-write-wins: inserting a present key never overwrites the stored
//!   value.
//! - Iteration order is insertion order of the currently live entries,
//!   invariant across growth and faithfully replayed by `Clone`.
//! - The table starts at 8 buckets, doubles when the entry count reaches
//!   twice the bucket count, and never shrinks; `clear` resets it.
//! - Keys are immutable after insertion; values are mutable in place.
//!
//! Hasher and rebuild invariants
//! - Each filed handle carries the entry's precomputed `u64` hash, and the
//!   rebuild refiles from those cached hashes; `K: Hash` is never invoked
//!   again for a stored entry, so growth cannot call into user code.
//! - Growth rebuilds the bucket index only. The entry store is untouched,
//!   which is why handles and iteration order survive every resize.
//!
//! Notes and non-goals
//! - No sorted iteration, no persistence, no shrink-on-erase.
//! - Hash distribution is the caller's contract: a degenerate strategy
//!   collapses chains to linear scans without affecting correctness.
//! - The only fallible operation is `at`; reads otherwise return `Option`
//!   and removals of absent keys are no-ops.

mod bucket_index;
mod entry_store;
mod seq_hash_map;

// Public surface
pub use entry_store::Handle;
pub use seq_hash_map::{IntoIter, Iter, IterMut, LookupError, SeqHashMap};
