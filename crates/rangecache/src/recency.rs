//! Recency ordering for the LRU cache
//!
//! Entries live in a slot arena and are linked by slot index, so
//! link/unlink/move-to-front are O(1) without shifting anything. Slots
//! freed by `remove` are recycled through a free list.

/// Opaque reference to a live entry in a [`RecencyList`].
///
/// The generation is bumped every time a slot is freed, so a handle kept
/// past its entry's removal no longer matches and is caught on use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: usize,
    generation: u32,
}

struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Doubly-linked recency order, most recent at the head
pub struct RecencyList<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> RecencyList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert at the most-recent position
    pub fn push_front(&mut self, value: T) -> Handle {
        let slot = self.alloc_slot();
        self.slots[slot].node = Some(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_front(slot);
        self.len += 1;

        Handle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    /// Detach an entry and hand back its value
    ///
    /// # Panics
    /// If `handle` does not name a live entry.
    pub fn remove(&mut self, handle: Handle) -> T {
        self.check(handle);
        self.unlink(handle.slot);

        let slot = &mut self.slots[handle.slot];
        let node = slot.node.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.slot);
        self.len -= 1;

        match node {
            Some(node) => node.value,
            None => unreachable!("checked slot has no node"),
        }
    }

    /// Mark an entry as most recently used
    ///
    /// # Panics
    /// If `handle` does not name a live entry.
    pub fn move_to_front(&mut self, handle: Handle) {
        self.check(handle);
        if self.head == Some(handle.slot) {
            return;
        }

        self.unlink(handle.slot);
        self.link_front(handle.slot);
    }

    /// Remove the least recently used entry
    pub fn pop_back(&mut self) -> Option<T> {
        let slot = self.tail?;
        let generation = self.slots[slot].generation;
        Some(self.remove(Handle { slot, generation }))
    }

    /// Borrow an entry's value
    ///
    /// # Panics
    /// If `handle` does not name a live entry.
    pub fn get(&self, handle: Handle) -> &T {
        &self.node(handle).value
    }

    /// Mutably borrow an entry's value without touching recency
    ///
    /// # Panics
    /// If `handle` does not name a live entry.
    pub fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.check(handle);
        match self.slots[handle.slot].node.as_mut() {
            Some(node) => &mut node.value,
            None => unreachable!("checked slot has no node"),
        }
    }

    /// Values from most to least recently used
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Drop every entry, invalidating all outstanding handles
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(idx);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn node(&self, handle: Handle) -> &Node<T> {
        match self.slots.get(handle.slot) {
            Some(Slot {
                generation,
                node: Some(node),
            }) if *generation == handle.generation => node,
            _ => panic!("stale recency handle {:?}", handle),
        }
    }

    fn check(&self, handle: Handle) {
        let _ = self.node(handle);
    }

    fn alloc_slot(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                node: None,
            });
            idx
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = &mut self.slots[idx].node {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = &mut self.slots[head_idx].node {
                    head.prev = Some(idx);
                }
            }
            None => {
                self.tail = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.slots[idx].node {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.slots[prev_idx].node {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.slots[next_idx].node {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }

        if let Some(node) = &mut self.slots[idx].node {
            node.prev = None;
            node.next = None;
        }
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a [`RecencyList`], head to tail
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.slots[idx].node.as_ref()?;
        self.cursor = node.next;
        Some(&node.value)
    }
}
