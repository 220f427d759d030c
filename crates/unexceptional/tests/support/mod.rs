//! Shared in-memory transaction facility for integration tests.

use thiserror::Error;
use unexceptional::TransactionFacility;

/// Errors raised by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `begin` was called while a transaction was already open.
    #[error("a transaction is already open")]
    AlreadyOpen,
    /// `commit` or `rollback` was called without an open transaction.
    #[error("no transaction is open")]
    NotOpen,
}

/// A user row persisted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRow {
    /// Primary key chosen by the caller.
    pub id: u32,
}

/// Store that keeps committed rows and stages writes made inside a
/// transaction until commit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    committed: Vec<UserRow>,
    staged: Option<Vec<UserRow>>,
    disconnected: bool,
}

impl MemoryStore {
    /// Build a store that refuses to open transactions.
    pub fn disconnected() -> Self {
        Self {
            disconnected: true,
            ..Self::default()
        }
    }

    /// Insert a row, staged if a transaction is open.
    pub fn create_user(&mut self, id: u32) -> UserRow {
        let row = UserRow { id };
        match self.staged.as_mut() {
            Some(staged) => staged.push(row),
            None => self.committed.push(row),
        }
        row
    }

    /// Count rows visible to a reader inside the current transaction.
    pub fn count(&self) -> usize {
        self.committed.len() + self.staged.as_ref().map_or(0, Vec::len)
    }

    /// Count rows that have been committed.
    pub fn committed_count(&self) -> usize {
        self.committed.len()
    }

    /// Return `true` while a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.staged.is_some()
    }
}

impl TransactionFacility for MemoryStore {
    type Error = StoreError;

    fn is_available(&self) -> bool {
        !self.disconnected
    }

    fn begin(&mut self) -> Result<(), Self::Error> {
        if self.staged.is_some() {
            return Err(StoreError::AlreadyOpen);
        }
        self.staged = Some(Vec::new());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        let staged = self.staged.take().ok_or(StoreError::NotOpen)?;
        self.committed.extend(staged);
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), Self::Error> {
        self.staged.take().map(drop).ok_or(StoreError::NotOpen)
    }
}
