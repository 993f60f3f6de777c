//! EntryStore: insertion-ordered arena of entries with stable handles.

use slotmap::{DefaultKey, SlotMap};

/// Stable, non-owning reference to one entry in a [`SeqHashMap`].
///
/// A handle stays valid across other insertions, removals, and bucket-table
/// growth; it stops resolving once its own entry is removed or the map is
/// cleared. Slot keys are generational, so a stale handle never aliases an
/// entry that later reuses the same slot.
///
/// [`SeqHashMap`]: crate::SeqHashMap
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    pub(crate) fn raw(&self) -> DefaultKey {
        self.0
    }
}

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    // insertion-order links (slot keys, not addresses)
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

/// Sole owner of entry data. Entries live in a slot arena and are threaded
/// onto a doubly-linked order list through `prev`/`next`; the list defines
/// iteration order and nothing here ever hashes a key.
#[derive(Debug)]
pub struct EntryStore<K, V> {
    slots: SlotMap<DefaultKey, Node<K, V>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<K, V> EntryStore<K, V> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Adds an entry after the last current one and returns its handle.
    /// Callers must already have checked that the key is absent; the store
    /// performs no duplicate detection.
    pub fn append(&mut self, key: K, value: V) -> Handle {
        let prev = self.tail;
        let k = self.slots.insert(Node {
            key,
            value,
            prev,
            next: None,
        });
        match prev {
            Some(t) => self.slots[t].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        Handle::new(k)
    }

    /// Unlinks and returns the referenced entry. Positions of the remaining
    /// entries are unchanged; only this handle stops resolving.
    pub fn remove(&mut self, handle: Handle) -> Option<(K, V)> {
        let node = self.slots.remove(handle.raw())?;
        match node.prev {
            Some(p) => self.slots[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.slots[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some((node.key, node.value))
    }

    pub fn key(&self, handle: Handle) -> Option<&K> {
        self.slots.get(handle.raw()).map(|n| &n.key)
    }

    pub fn value(&self, handle: Handle) -> Option<&V> {
        self.slots.get(handle.raw()).map(|n| &n.value)
    }

    pub fn value_mut(&mut self, handle: Handle) -> Option<&mut V> {
        self.slots.get_mut(handle.raw()).map(|n| &mut n.value)
    }

    /// Handle of the oldest live entry.
    pub fn first(&self) -> Option<Handle> {
        self.head.map(Handle::new)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            cursor: self.head,
            slots: &mut self.slots,
        }
    }
}

impl<K, V> Default for EntryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward traversal over entries in insertion order.
pub struct Iter<'a, K, V> {
    slots: &'a SlotMap<DefaultKey, Node<K, V>>,
    cursor: Option<DefaultKey>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let node = self.slots.get(k)?;
        self.cursor = node.next;
        Some((&node.key, &node.value))
    }
}

/// Forward traversal over entries in insertion order with mutable values.
pub struct IterMut<'a, K, V> {
    slots: &'a mut SlotMap<DefaultKey, Node<K, V>>,
    cursor: Option<DefaultKey>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let node: *mut Node<K, V> = self.slots.get_mut(k)?;
        // SAFETY: the order links visit each live slot at most once, so every
        // call yields a reference to a distinct node, and the iterator's
        // `&mut` borrow of the arena keeps the structure frozen while the
        // yielded references live.
        unsafe {
            let node = &mut *node;
            self.cursor = node.next;
            Some((&node.key, &mut node.value))
        }
    }
}
