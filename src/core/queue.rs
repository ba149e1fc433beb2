//! FIFO ready queue backed by a resizable circular buffer.
//!
//! Capacity starts at [`MIN_CAPACITY`], doubles when an insert finds the
//! buffer full and halves once occupancy drops under a quarter of capacity.
//! It never shrinks below the minimum.

pub const MIN_CAPACITY: usize = 4;

#[derive(Debug, Clone)]
pub struct ReadyQueue<T> {
    items: Box<[Option<T>]>,
    front: usize,
    len: usize,
}

impl<T> ReadyQueue<T> {
    pub fn new() -> Self {
        Self {
            items: empty_slots(MIN_CAPACITY),
            front: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the next insert will grow the buffer. Not a hard limit.
    pub fn is_full(&self) -> bool {
        self.len == self.items.len()
    }

    pub fn insert(&mut self, item: T) {
        if self.is_full() {
            self.resize(self.capacity() * 2);
        }

        let rear = (self.front + self.len) % self.capacity();
        debug_assert!(self.items[rear].is_none(), "rear slot {rear} occupied");
        self.items[rear] = Some(item);
        self.len += 1;
    }

    pub fn remove(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let item = self.items[self.front].take();
        debug_assert!(item.is_some(), "front slot {} empty", self.front);
        self.front = (self.front + 1) % self.capacity();
        self.len -= 1;

        if self.len < self.capacity() / 4 && self.capacity() > MIN_CAPACITY {
            self.resize((self.capacity() / 2).max(MIN_CAPACITY));
        }

        item
    }

    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.items[self.front].as_ref()
    }

    pub fn clear(&mut self) {
        self.items = empty_slots(MIN_CAPACITY);
        self.front = 0;
        self.len = 0;
    }

    /// Iterates front to back without removing anything.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.capacity();
        (0..self.len).filter_map(move |offset| self.items[(self.front + offset) % capacity].as_ref())
    }

    // Relocate occupied slots, oldest first, to the start of a fresh buffer
    fn resize(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.len);

        let mut items = empty_slots(new_capacity);
        let old_capacity = self.capacity();
        for (offset, slot) in items.iter_mut().take(self.len).enumerate() {
            *slot = self.items[(self.front + offset) % old_capacity].take();
        }

        self.items = items;
        self.front = 0;
    }
}

impl<T> Default for ReadyQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for ReadyQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T> FromIterator<T> for ReadyQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}
