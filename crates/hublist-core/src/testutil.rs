//! In-memory collaborator stubs shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::store::UserList;
use crate::types::{FavoritesRegistry, IdentitySource, Snapshot, UserKey, UserRecord};

/// Identity directory backed by a map; unknown keys answer with defaults,
/// which doubles as the "directory unavailable" degradation path.
#[derive(Default)]
pub(crate) struct StubDirectory {
    entries: Mutex<HashMap<UserKey, Snapshot>>,
}

impl StubDirectory {
    pub(crate) fn set(&self, key: &UserKey, snapshot: Snapshot) {
        self.entries
            .lock()
            .expect("directory lock")
            .insert(key.clone(), snapshot);
    }
}

impl IdentitySource for StubDirectory {
    fn refresh_identity(&self, key: &UserKey) -> Snapshot {
        self.entries
            .lock()
            .expect("directory lock")
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}

/// Favorites registry backed by a set.
#[derive(Default)]
pub(crate) struct StubFavorites {
    favorites: Mutex<HashSet<UserKey>>,
}

impl StubFavorites {
    pub(crate) fn add(&self, key: &UserKey) {
        self.favorites
            .lock()
            .expect("favorites lock")
            .insert(key.clone());
    }
}

impl FavoritesRegistry for StubFavorites {
    fn is_favorite(&self, key: &UserKey) -> bool {
        self.favorites.lock().expect("favorites lock").contains(key)
    }
}

pub(crate) fn share_snapshot(nick: &str, share_bytes: u64, is_op: bool) -> Snapshot {
    Snapshot {
        nick: nick.to_string(),
        share_bytes,
        is_op,
        ..Snapshot::default()
    }
}

/// A record with the given key and a snapshot shaped by `mutate`.
pub(crate) fn record(key: &str, mutate: impl FnOnce(&mut Snapshot)) -> UserRecord {
    let mut snapshot = Snapshot::default();
    mutate(&mut snapshot);
    UserRecord::new(UserKey::from(key), format!("session-{key}"), snapshot)
}

/// An empty list plus handles to its stub collaborators.
pub(crate) fn test_list() -> (UserList, Arc<StubDirectory>, Arc<StubFavorites>) {
    let directory = Arc::new(StubDirectory::default());
    let favorites = Arc::new(StubFavorites::default());
    let list = UserList::new(
        Box::new(Arc::clone(&directory)),
        Box::new(Arc::clone(&favorites)),
    )
    .expect("list should construct");
    (list, directory, favorites)
}

/// A list populated with non-operator users under the default sort
/// (share, descending). Entries are `(key-and-nick, share_bytes)`.
pub(crate) fn populated_list(entries: &[(&str, u64)]) -> UserList {
    let (mut list, directory, _) = test_list();
    for (name, share) in entries {
        directory.set(&UserKey::from(*name), share_snapshot(name, *share, false));
        list.insert(UserKey::from(*name), format!("session-{name}"));
    }
    list
}
