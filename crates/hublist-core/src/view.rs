//! Read-only row/column interface for rendering layers.

use crate::sort::{Column, COLUMN_COUNT};
use crate::store::UserList;
use crate::types::{UserKey, UserRecord};

impl UserList {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.order().len()
    }

    pub fn is_empty(&self) -> bool {
        self.order().is_empty()
    }

    /// Number of columns.
    pub const fn column_count() -> usize {
        COLUMN_COUNT
    }

    /// Record at `row` in current display order.
    pub fn record_at(&self, row: usize) -> Option<&UserRecord> {
        self.order().get(row).and_then(|key| self.records().get(key))
    }

    /// Key of the record at `row`.
    pub fn key_at(&self, row: usize) -> Option<&UserKey> {
        self.order().get(row)
    }

    /// Displayed string for one cell; `None` past the last row.
    pub fn cell(&self, row: usize, column: Column) -> Option<String> {
        self.record_at(row).map(|record| record.display_value(column))
    }
}
