//! Fixed-capacity ordered record store.
//!
//! The store holds up to `capacity` records in a contiguous run of slots
//! starting at index 0. Records are only ever appended at the end; deleting a
//! record shifts every later record down by one so that no gaps appear.

use std::num::NonZeroUsize;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::format::format_record;
use crate::record::Record;

/// Bounded, gap-free sequence of timer records.
///
/// Slots `[0, count)` are always populated and slots `[count, capacity)` are
/// always empty.
#[derive(Debug, Clone)]
pub struct RecordStore {
    slots: Vec<Option<Record>>,
    count: usize,
}

impl RecordStore {
    /// Create an empty store with room for `capacity` records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the backing slots cannot be
    /// reserved.
    pub fn new(capacity: NonZeroUsize) -> Result<Self> {
        let capacity = capacity.get();
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::AllocationFailure { capacity })?;
        slots.resize(capacity, None);

        debug!(capacity, "Created record store");
        Ok(Self { slots, count: 0 })
    }

    /// Maximum number of records the store can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of records currently held.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Check if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if another record would be rejected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Append a record, returning the index it was stored at.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when the store is full. The store
    /// is left untouched.
    pub fn add(&mut self, record: Record) -> Result<usize> {
        if self.is_full() {
            warn!(capacity = self.capacity(), "All timers used, timer not added");
            return Err(Error::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        let index = self.count;
        self.slots[index] = Some(record);
        self.count += 1;
        debug!(index, count = self.count, "Added timer record");
        Ok(index)
    }

    /// Delete the record at `index`, shifting later records down by one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndex`] if `index` does not refer to a
    /// populated slot. The store is left untouched.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        if index >= self.count {
            warn!(index, count = self.count, "Ignoring delete of unoccupied slot");
            return Err(Error::InvalidIndex {
                index,
                count: self.count,
            });
        }

        self.remove_at(index);
        debug!(index, count = self.count, "Deleted timer record");
        Ok(())
    }

    /// Get a copy of the record at `index`, if populated.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Record> {
        self.occupied().get(index).copied().flatten()
    }

    /// Iterate over the held records in order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.occupied().iter().flatten()
    }

    /// Delete every record, front first.
    pub fn clear_all(&mut self) {
        let mut removed = 0_usize;
        while !self.is_empty() {
            self.remove_at(0);
            removed += 1;
        }
        debug!(removed, "Cleared record store");
    }

    /// Render the record at `index` as a listing line.
    ///
    /// The line is numbered with the 1-based record number shown to the
    /// operator. Returns `None` for an unpopulated index.
    #[must_use]
    pub fn format(&self, index: usize) -> Option<String> {
        self.get(index).map(|record| format_record(&record, index + 1))
    }

    fn occupied(&self) -> &[Option<Record>] {
        &self.slots[..self.count]
    }

    /// Caller guarantees `index < self.count`.
    fn remove_at(&mut self, index: usize) {
        let last = self.count - 1;
        self.slots[index..self.count].rotate_left(1);
        self.slots[last] = None;
        self.count = last;
    }
}
