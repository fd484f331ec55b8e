// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A fixed-size ring buffer on the heap. Once `N` items are stored, adding a new item
//! evicts the oldest one.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingBufferHeap<T, const N: usize> {
    internal_storage: Vec<Option<T>>,
    head: usize,
    tail: usize,
    count: usize,
}

impl<T, const N: usize> Default for RingBufferHeap<T, N> {
    fn default() -> Self { Self::new() }
}

impl<T, const N: usize> RingBufferHeap<T, N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            internal_storage: Vec::with_capacity(N),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.count }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.count == 0 }

    #[must_use]
    pub fn capacity(&self) -> usize { N }

    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        self.internal_storage.clear();
    }

    /// Index 0 is the oldest item.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.count {
            return None;
        }
        let actual_index = (self.tail + index) % N;
        self.internal_storage
            .get(actual_index)
            .and_then(|item| item.as_ref())
    }

    /// Insert at head (ie, insert the newest item).
    pub fn add(&mut self, value: T) {
        if N == 0 {
            return;
        }
        if self.count == N {
            let _unused: Option<_> = self.remove();
        }
        if self.internal_storage.len() < N {
            self.internal_storage.push(Some(value));
        } else {
            self.internal_storage[self.head] = Some(value);
        }
        self.head = (self.head + 1) % N;
        self.count = std::cmp::min(self.count + 1, N);
    }

    /// Remove from tail (ie, remove the oldest item).
    pub fn remove(&mut self) -> Option<T> {
        if self.count == 0 || self.internal_storage.is_empty() {
            return None;
        }
        let value = self.internal_storage[self.tail].take();
        self.tail = (self.tail + 1) % N;
        self.count -= 1;
        value
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.count).filter_map(move |index| self.get(index))
    }
}
