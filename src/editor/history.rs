use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Bounded linear snapshot log with a cursor on the displayed entry.
///
/// The cursor is `None` only while the log is empty. Pushing drops every entry
/// after the cursor, appends, and evicts from the front once `capacity` is
/// exceeded, so the cursor always lands on the newest entry.
#[derive(Debug, Clone)]
pub struct EditHistory<T> {
    entries: VecDeque<T>,
    cursor: Option<usize>,
    capacity: usize,
}

impl<T: Clone> EditHistory<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: None,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|index| self.entries.get(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Starts a fresh timeline whose first entry is `initial`.
    pub fn reset(&mut self, initial: T) {
        self.clear();
        self.push(initial);
    }

    pub fn push(&mut self, snapshot: T) {
        if let Some(index) = self.cursor {
            self.entries.truncate(index + 1);
        }
        self.entries.push_back(snapshot);

        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            tracing::debug!(evicted, capacity = self.capacity, "history capacity reached");
        }

        self.cursor = Some(self.entries.len() - 1);
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|index| index > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|index| index + 1 < self.entries.len())
    }

    /// Moves the cursor back one entry and returns a copy of it.
    pub fn undo(&mut self) -> Option<T> {
        let index = self.cursor.filter(|&index| index > 0)? - 1;
        self.cursor = Some(index);
        self.entries.get(index).cloned()
    }

    /// Moves the cursor forward one entry and returns a copy of it.
    pub fn redo(&mut self) -> Option<T> {
        let index = self.cursor? + 1;
        let snapshot = self.entries.get(index).cloned()?;
        self.cursor = Some(index);
        Some(snapshot)
    }
}

impl<T: Clone> Default for EditHistory<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
