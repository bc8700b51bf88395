use crate::error::ValidationError;

use super::BlockRecord;

/// Ordered record list for one editing session.
///
/// Every mutation re-applies the record type's ordering policy, so the
/// derived position fields (rank, index, id) are always dense and match
/// list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore<R> {
    records: Vec<R>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: BlockRecord> RecordStore<R> {
    /// Build a store from records in file order.
    ///
    /// Position fields are first assigned from file order, then the
    /// ordering policy runs.
    pub fn from_parsed(mut records: Vec<R>) -> Self {
        R::reposition(&mut records);
        let mut store = Self { records };
        store.normalize();
        store
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn append(&mut self, record: R) {
        self.records.push(record);
        self.normalize();
    }

    /// Replace the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IndexOutOfRange`] if `index` is past the end.
    pub fn replace(&mut self, index: usize, record: R) -> Result<(), ValidationError> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(ValidationError::IndexOutOfRange { index, len })?;
        *slot = record;
        self.normalize();
        Ok(())
    }

    /// Remove and return the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IndexOutOfRange`] if `index` is past the end.
    pub fn remove(&mut self, index: usize) -> Result<R, ValidationError> {
        if index >= self.records.len() {
            return Err(ValidationError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        self.normalize();
        Ok(removed)
    }

    /// Swap the record at `index` with the one before it.
    ///
    /// Returns the position the record ends up at. The ordering policy
    /// still runs afterwards, so for sorted record types a move only sticks
    /// between records that compare equal.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IndexOutOfRange`] if `index` is past the end.
    pub fn move_up(&mut self, index: usize) -> Result<usize, ValidationError> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(0);
        }
        Ok(self.swap_and_normalize(index, index - 1))
    }

    /// Swap the record at `index` with the one after it.
    ///
    /// Returns the position the record ends up at, as for [`Self::move_up`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IndexOutOfRange`] if `index` is past the end.
    pub fn move_down(&mut self, index: usize) -> Result<usize, ValidationError> {
        self.check_index(index)?;
        if index + 1 >= self.records.len() {
            return Ok(index);
        }
        Ok(self.swap_and_normalize(index, index + 1))
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(ValidationError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }

    /// Swap `from` into `to`, renumber, then re-sort while tracking where
    /// the moved record lands.
    fn swap_and_normalize(&mut self, from: usize, to: usize) -> usize {
        self.records.swap(from, to);
        R::reposition(&mut self.records);
        let mut tagged: Vec<(usize, R)> = std::mem::take(&mut self.records)
            .into_iter()
            .enumerate()
            .collect();
        tagged.sort_by(|(_, a), (_, b)| R::order(a, b));
        let landed = tagged.iter().position(|(i, _)| *i == to).unwrap_or(to);
        self.records = tagged.into_iter().map(|(_, record)| record).collect();
        R::reposition(&mut self.records);
        landed
    }

    fn normalize(&mut self) {
        self.records.sort_by(R::order);
        R::reposition(&mut self.records);
    }
}

impl<'a, R> IntoIterator for &'a RecordStore<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
