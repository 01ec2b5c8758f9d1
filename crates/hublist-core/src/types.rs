//! Core types for the user-list engine.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::sort::Column;

/// Stable opaque identifier of a peer.
///
/// Distinct from the display nick, which may collide or change while the
/// peer stays connected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserKey(String);

impl UserKey {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserKey {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserKey {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One refresh's worth of displayable peer attributes.
///
/// Replaced wholesale whenever the identity source is polled. `Default` is
/// the degraded all-blank form used when the directory cannot answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nick: String,
    pub comment: String,
    pub tag: String,
    pub connection: String,
    pub email: String,
    /// Dotted-quad IP text; may be blank when the hub hides addresses.
    pub ip: String,
    pub share_bytes: u64,
    pub is_op: bool,
    pub is_away: bool,
}

/// One entry in the collection.
#[derive(Debug, Clone)]
pub struct UserRecord {
    key: UserKey,
    session_id: String,
    snapshot: Snapshot,
}

impl UserRecord {
    pub(crate) fn new(key: UserKey, session_id: String, snapshot: Snapshot) -> Self {
        Self {
            key,
            session_id,
            snapshot,
        }
    }

    pub fn key(&self) -> &UserKey {
        &self.key
    }

    /// Secondary stable identifier attached at creation.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub(crate) fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
    }

    /// Displayed string for one column.
    ///
    /// `Share` renders as the plain byte count; humanization belongs to the
    /// rendering layer.
    pub fn display_value(&self, column: Column) -> String {
        match column {
            Column::Nick => self.snapshot.nick.clone(),
            Column::Share => self.snapshot.share_bytes.to_string(),
            Column::Comment => self.snapshot.comment.clone(),
            Column::Tag => self.snapshot.tag.clone(),
            Column::Connection => self.snapshot.connection.clone(),
            Column::Ip => self.snapshot.ip.clone(),
            Column::Email => self.snapshot.email.clone(),
        }
    }
}

/// Change notification delivered to view subscribers.
///
/// Every mutation that changes the visible row count or order is announced:
/// single-row changes carry the affected position, reorders and bulk
/// mutations are bracketed by the layout pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListUpdate {
    /// A record was inserted at `row`.
    RowInserted { row: usize },
    /// The record at `row` was removed.
    RowRemoved { row: usize },
    /// The record at `row` replaced its snapshot.
    RowRefreshed { row: usize },
    /// A reorder or bulk mutation is about to happen.
    LayoutAboutToChange,
    /// The reorder or bulk mutation finished.
    LayoutChanged,
}

/// Live peer attributes, polled on demand.
pub trait IdentitySource: Send + Sync {
    /// Fetch the current snapshot for a peer.
    ///
    /// Infallible by contract: implementations degrade to
    /// `Snapshot::default()` when the directory cannot answer, so a join is
    /// never aborted by a directory outage.
    fn refresh_identity(&self, key: &UserKey) -> Snapshot;
}

/// Favorite-user registry.
///
/// Queried fresh at comparison and display time; the engine never caches
/// the flag.
pub trait FavoritesRegistry: Send + Sync {
    fn is_favorite(&self, key: &UserKey) -> bool;
}

impl<T: IdentitySource + ?Sized> IdentitySource for Arc<T> {
    fn refresh_identity(&self, key: &UserKey) -> Snapshot {
        (**self).refresh_identity(key)
    }
}

impl<T: FavoritesRegistry + ?Sized> FavoritesRegistry for Arc<T> {
    fn is_favorite(&self, key: &UserKey) -> bool {
        (**self).is_favorite(key)
    }
}
