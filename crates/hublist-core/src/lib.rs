//! Sorted live user-list engine.
//!
//! Maintains a collection of peer records in display order under a
//! multi-key comparator (operator flag, favorite flag, then the active
//! column), with order-preserving incremental insertion and removal,
//! substring/prefix search, and change notifications for a consuming view.
//! Bursts of identity updates are coalesced into one deferred resort by
//! the companion scheduler crate.

mod error;
mod query;
mod sort;
mod store;
#[cfg(test)]
mod testutil;
mod types;
mod view;

pub use error::ListError;
pub use query::MatchKind;
pub use sort::{Column, SortOrder, COLUMN_COUNT};
pub use store::UserList;
pub use types::{FavoritesRegistry, IdentitySource, ListUpdate, Snapshot, UserKey, UserRecord};
