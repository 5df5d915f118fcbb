//! Ordered entry store shared by every eviction policy.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────────┐
//! │                       OrderedStore<K, V> Layout                        │
//! │                                                                        │
//! │   index: FxHashMap<K, usize>          slots: Vec<Option<Slot>>        │
//! │          key → slot id                       arena + linked order      │
//! │                                                                        │
//! │   ┌──────────┬─────┐        head                            tail      │
//! │   │   Key    │ id  │          │                               │       │
//! │   ├──────────┼─────┤          ▼                               ▼       │
//! │   │  "a"     │  0  │───►  ┌───────┐    ┌───────┐    ┌───────┐        │
//! │   │  "b"     │  2  │───►  │ a     │◄──►│ c     │◄──►│ b     │        │
//! │   │  "c"     │  1  │───►  │ slot0 │    │ slot1 │    │ slot2 │        │
//! │   └──────────┴─────┘      └───────┘    └───────┘    └───────┘        │
//! │                            oldest      (prev/next links)   newest     │
//! │                                                                        │
//! │   free: Vec<usize>   recycled slot ids from removed entries            │
//! └────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list order is the only ordering the store knows about. By convention
//! new entries land at the back (most recent) and updates keep their
//! position; what the order *means* — recency, insertion age, nothing at
//! all — is decided entirely by the policy that owns the store.
//!
//! ## Operations
//!
//! | Operation        | Time | Notes                                   |
//! |------------------|------|-----------------------------------------|
//! | `get` / `contains` | O(1) | index lookup, never reorders          |
//! | `insert`         | O(1) | append new keys, in-place update        |
//! | `remove`         | O(1) | unlink + slot recycled                  |
//! | `move_to_back`   | O(1) | relink only                             |
//! | `move_to_front`  | O(1) | relink only                             |
//! | `iter`           | O(n) | front to back, lazy and restartable     |

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Sentinel slot id for "no link".
const NIL: usize = usize::MAX;

/// One arena slot: a key/value pair plus its position in the order.
struct Slot<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

/// Ordered mapping from key to value with an observable, mutable order.
///
/// Backed by an `FxHashMap` index into a slot arena whose occupied slots
/// form a doubly linked list. All single-entry operations are O(1); no
/// unsafe code, no heap allocation per relink.
///
/// # Type Parameters
///
/// - `K`: key type, `Clone + Eq + Hash`
/// - `V`: value type
///
/// # Example
///
/// ```
/// use evictkit::store::OrderedStore;
///
/// let mut store = OrderedStore::new();
/// store.insert("a", 1);
/// store.insert("b", 2);
///
/// assert_eq!(store.oldest_key(), Some(&"a"));
/// store.move_to_back(&"a");
/// assert_eq!(store.oldest_key(), Some(&"b"));
/// ```
pub struct OrderedStore<K, V>
where
    K: Clone + Eq + Hash,
{
    index: FxHashMap<K, usize>,
    slots: Vec<Option<Slot<K, V>>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl<K, V> OrderedStore<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty store.
    #[inline]
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }

    /// Creates an empty store with room for `capacity` entries preallocated.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }

    /// Returns `true` if the key is present.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns a reference to the value for `key`, without reordering.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.slot(id).map(|s| &s.value)
    }

    /// Returns a mutable reference to the value for `key`, without
    /// reordering.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.slots[id].as_mut().map(|s| &mut s.value)
    }

    /// Inserts or overwrites a key-value pair.
    ///
    /// New keys are appended at the back of the order ("most recent" by
    /// convention). Updating an existing key replaces the value in place and
    /// keeps the key's current position: whether an update counts as a touch
    /// is the owning policy's call, made through an explicit
    /// [`move_to_back`](Self::move_to_back).
    ///
    /// Returns the previous value if the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let slot = self.slots[id].as_mut()?;
            let previous = std::mem::replace(&mut slot.value, value);
            return Some(previous);
        }

        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(Slot {
                    key: key.clone(),
                    value,
                    prev: NIL,
                    next: NIL,
                });
                id
            },
            None => {
                self.slots.push(Some(Slot {
                    key: key.clone(),
                    value,
                    prev: NIL,
                    next: NIL,
                }));
                self.slots.len() - 1
            },
        };

        self.link_back(id);
        self.index.insert(key, id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        None
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.unlink(id);
        let slot = self.slots[id].take()?;
        self.free.push(id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some(slot.value)
    }

    /// Moves an existing key to the back of the order (most recent).
    ///
    /// Returns `false` if the key is absent.
    pub fn move_to_back(&mut self, key: &K) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        if self.tail != id {
            self.unlink(id);
            self.link_back(id);
        }
        true
    }

    /// Moves an existing key to the front of the order (oldest).
    ///
    /// Returns `false` if the key is absent.
    pub fn move_to_front(&mut self, key: &K) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        if self.head != id {
            self.unlink(id);
            self.link_front(id);
        }
        true
    }

    /// Returns the key at the front of the order (oldest), if any.
    #[inline]
    pub fn oldest_key(&self) -> Option<&K> {
        self.slot(self.head).map(|s| &s.key)
    }

    /// Returns the key at the back of the order (most recent), if any.
    #[inline]
    pub fn newest_key(&self) -> Option<&K> {
        self.slot(self.tail).map(|s| &s.key)
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the store holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Iterates over `(key, value)` pairs from front (oldest position) to
    /// back. Lazy and restartable; the store is not mutated.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            store: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    #[inline]
    fn slot(&self, id: usize) -> Option<&Slot<K, V>> {
        if id == NIL {
            return None;
        }
        self.slots.get(id).and_then(|s| s.as_ref())
    }

    /// Detach a slot from the list without touching the arena or index.
    fn unlink(&mut self, id: usize) {
        let (prev, next) = match self.slots[id].as_ref() {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };

        match self.slots.get_mut(prev).and_then(|s| s.as_mut()) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match self.slots.get_mut(next).and_then(|s| s.as_mut()) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }

        if let Some(slot) = self.slots[id].as_mut() {
            slot.prev = NIL;
            slot.next = NIL;
        }
    }

    /// Attach a detached slot at the tail (most recent position).
    fn link_back(&mut self, id: usize) {
        let old_tail = self.tail;
        if let Some(slot) = self.slots[id].as_mut() {
            slot.prev = old_tail;
            slot.next = NIL;
        }
        match self.slots.get_mut(old_tail).and_then(|s| s.as_mut()) {
            Some(t) => t.next = id,
            None => self.head = id,
        }
        self.tail = id;
    }

    /// Attach a detached slot at the head (oldest position).
    fn link_front(&mut self, id: usize) {
        let old_head = self.head;
        if let Some(slot) = self.slots[id].as_mut() {
            slot.prev = NIL;
            slot.next = old_head;
        }
        match self.slots.get_mut(old_head).and_then(|s| s.as_mut()) {
            Some(h) => h.prev = id,
            None => self.tail = id,
        }
        self.head = id;
    }

    /// Validates index/arena/list agreement (debug builds only).
    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if self.index.is_empty() {
            debug_assert_eq!(self.head, NIL);
            debug_assert_eq!(self.tail, NIL);
            return;
        }

        // Walk the list; every visited slot must be indexed, and the walk
        // must terminate after exactly len() steps.
        let mut count = 0usize;
        let mut cursor = self.head;
        let mut prev = NIL;
        while cursor != NIL {
            let slot = self.slots[cursor]
                .as_ref()
                .expect("linked slot must be occupied");
            debug_assert_eq!(slot.prev, prev, "backward link out of sync");
            debug_assert_eq!(self.index.get(&slot.key), Some(&cursor));
            prev = cursor;
            cursor = slot.next;
            count += 1;
            if count > self.index.len() {
                panic!("cycle detected in order list");
            }
        }
        debug_assert_eq!(prev, self.tail);
        debug_assert_eq!(count, self.index.len(), "list length != index length");
    }
}

impl<K, V> Default for OrderedStore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for OrderedStore<K, V>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Front-to-back iterator over an [`OrderedStore`].
pub struct Iter<'a, K, V>
where
    K: Clone + Eq + Hash,
{
    store: &'a OrderedStore<K, V>,
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Clone + Eq + Hash,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.store.slot(self.cursor)?;
        self.cursor = slot.next;
        self.remaining -= 1;
        Some((&slot.key, &slot.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> where K: Clone + Eq + Hash {}
