//! The record store: the ordered sequence plus the key index.

use std::cmp::Ordering;
use std::collections::HashMap;

use tokio::sync::broadcast;
use tracing::{debug, info, trace};

use crate::error::ListError;
use crate::sort::{Column, ComparatorSet, SortOrder};
use crate::types::{FavoritesRegistry, IdentitySource, ListUpdate, UserKey, UserRecord};

/// Capacity of the change-notification channel.
const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// The live, sorted collection of user records.
///
/// Owns the ordered sequence and the key index exclusively; views and the
/// query layer read through `&self`. Mutations tolerate absent or duplicate
/// keys silently - races between "leave" and "identity updated" events
/// referencing the same peer are expected, not errors.
pub struct UserList {
    records: HashMap<UserKey, UserRecord>,
    order: Vec<UserKey>,
    sort: Option<(Column, SortOrder)>,
    comparators: ComparatorSet,
    identity: Box<dyn IdentitySource>,
    favorites: Box<dyn FavoritesRegistry>,
    updates_tx: broadcast::Sender<ListUpdate>,
}

impl UserList {
    /// Create an empty list sorted by share size, descending.
    pub fn new(
        identity: Box<dyn IdentitySource>,
        favorites: Box<dyn FavoritesRegistry>,
    ) -> Result<Self, ListError> {
        let (updates_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Ok(Self {
            records: HashMap::new(),
            order: Vec::new(),
            sort: Some((Column::Share, SortOrder::Descending)),
            comparators: ComparatorSet::new()?,
            identity,
            favorites,
            updates_tx,
        })
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ListUpdate> {
        self.updates_tx.subscribe()
    }

    /// Current sort state; `None` while sorting is disabled.
    pub fn sort_state(&self) -> Option<(Column, SortOrder)> {
        self.sort
    }

    /// Add a peer.
    ///
    /// The snapshot is fetched from the identity source immediately. While
    /// a sort is active the record lands at its sorted position (binary
    /// search, no full re-sort); unsorted lists append. Returns the row the
    /// record landed on, or `None` when the key was already present.
    pub fn insert(&mut self, key: UserKey, session_id: impl Into<String>) -> Option<usize> {
        if self.records.contains_key(&key) {
            trace!(key = %key, "insert skipped, key already present");
            return None;
        }

        let snapshot = self.identity.refresh_identity(&key);
        let record = UserRecord::new(key.clone(), session_id.into(), snapshot);

        let row = match self.sort {
            None => self.order.len(),
            Some((column, order)) => {
                let records = &self.records;
                let favorites = self.favorites.as_ref();
                let comparators = &self.comparators;
                self.order.partition_point(|existing| {
                    comparators.compare(favorites, column, order, &records[existing], &record)
                        == Ordering::Less
                })
            }
        };

        debug!(key = %key, row, "user joined");
        self.records.insert(key.clone(), record);
        self.order.insert(row, key);
        self.notify(ListUpdate::RowInserted { row });
        Some(row)
    }

    /// Remove a peer by key.
    ///
    /// Returns the row it occupied, or `None` if the key was absent;
    /// removing the same key twice is safe.
    pub fn remove(&mut self, key: &UserKey) -> Option<usize> {
        if !self.records.contains_key(key) {
            trace!(key = %key, "remove skipped, key absent");
            return None;
        }

        // The sequence is not indexed by key; scan for the position.
        let row = self.order.iter().position(|k| k == key)?;
        self.order.remove(row);
        self.records.remove(key);
        debug!(key = %key, row, "user left");
        self.notify(ListUpdate::RowRemoved { row });
        Some(row)
    }

    /// Replace a record's snapshot from the identity source.
    ///
    /// Returns `false` if the key is absent. Never reorders by itself;
    /// callers that care about sort placement follow up with the resort
    /// scheduler.
    pub fn refresh_user(&mut self, key: &UserKey) -> bool {
        if !self.records.contains_key(key) {
            trace!(key = %key, "refresh skipped, key absent");
            return false;
        }

        let snapshot = self.identity.refresh_identity(key);
        if let Some(record) = self.records.get_mut(key) {
            record.set_snapshot(snapshot);
        }
        if let Some(row) = self.order.iter().position(|k| k == key) {
            debug!(key = %key, row, "identity refreshed");
            self.notify(ListUpdate::RowRefreshed { row });
        }
        true
    }

    /// Re-sort the whole sequence under `(column, order)` and make that the
    /// active sort state. No-op on an empty sequence.
    pub fn full_resort(&mut self, column: Column, order: SortOrder) {
        if self.order.is_empty() {
            trace!("full resort skipped, empty sequence");
            return;
        }
        self.sort = Some((column, order));
        self.resort_in_place(column, order);
    }

    /// Re-sort under the current sort state; no-op when unsorted or empty.
    ///
    /// This is the deferred-resort entry point.
    pub fn resort(&mut self) {
        if let Some((column, order)) = self.sort {
            if !self.order.is_empty() {
                self.resort_in_place(column, order);
            }
        }
    }

    /// View-facing sort control.
    ///
    /// An out-of-range column index (negative or past the last column)
    /// leaves both the sort state and the sequence untouched.
    pub fn set_sort(&mut self, column_index: isize, order: SortOrder) {
        match Column::from_index(column_index) {
            Some(column) => self.full_resort(column, order),
            None => trace!(column_index, "set_sort ignored, column out of range"),
        }
    }

    /// Disable sorting; subsequent inserts append to the end.
    pub fn set_unsorted(&mut self) {
        debug!("sorting disabled");
        self.sort = None;
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        info!(len = self.order.len(), "clearing user list");
        self.notify(ListUpdate::LayoutAboutToChange);
        self.records.clear();
        self.order.clear();
        self.notify(ListUpdate::LayoutChanged);
    }

    /// O(1) lookup by key.
    pub fn lookup(&self, key: &UserKey) -> Option<&UserRecord> {
        self.records.get(key)
    }

    pub(crate) fn order(&self) -> &[UserKey] {
        &self.order
    }

    pub(crate) fn records(&self) -> &HashMap<UserKey, UserRecord> {
        &self.records
    }

    fn resort_in_place(&mut self, column: Column, order: SortOrder) {
        info!(?column, ?order, len = self.order.len(), "full resort");
        self.notify(ListUpdate::LayoutAboutToChange);
        let records = &self.records;
        let favorites = self.favorites.as_ref();
        let comparators = &self.comparators;
        self.order
            .sort_by(|a, b| comparators.compare(favorites, column, order, &records[a], &records[b]));
        self.notify(ListUpdate::LayoutChanged);
    }

    fn notify(&self, update: ListUpdate) {
        if self.updates_tx.send(update).is_err() {
            trace!("no subscribers for list update");
        }
    }
}
