//! Read-only lookups over the current ordering.
//!
//! Nothing here mutates the store or triggers a resort; results always
//! reflect the ordered sequence at the time of the call.

use serde::{Deserialize, Serialize};

use crate::sort::Column;
use crate::store::UserList;
use crate::types::UserKey;

/// How [`UserList::find_displayed`] compares a pattern against displayed
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    Exact,
    StartsWith,
    Contains,
}

impl UserList {
    /// Nicks containing `part`, case-insensitively, in display order.
    ///
    /// An empty `part` matches nothing.
    pub fn match_nicks_containing(&self, part: &str) -> Vec<String> {
        self.match_nicks(part, |nick, part| nick.contains(part))
    }

    /// Nicks starting with `part`, case-insensitively, in display order.
    pub fn match_nicks_starting_with(&self, part: &str) -> Vec<String> {
        self.match_nicks(part, |nick, part| nick.starts_with(part))
    }

    /// Nicks starting with or containing `part`, case-insensitively.
    pub fn match_nicks_any(&self, part: &str) -> Vec<String> {
        self.match_nicks(part, |nick, part| {
            nick.starts_with(part) || nick.contains(part)
        })
    }

    fn match_nicks(&self, part: &str, matches: impl Fn(&str, &str) -> bool) -> Vec<String> {
        if part.is_empty() {
            return Vec::new();
        }
        let part = part.to_lowercase();
        self.order()
            .iter()
            .filter_map(|key| {
                let nick = &self.records()[key].snapshot().nick;
                matches(&nick.to_lowercase(), &part).then(|| nick.clone())
            })
            .collect()
    }

    /// Key of the unique record whose displayed `column` value equals
    /// `value` exactly.
    ///
    /// `None` when no record matches or when more than one does; resolving
    /// a display value to a key demands uniqueness.
    pub fn key_for_displayed(&self, value: &str, column: Column) -> Option<UserKey> {
        let mut found: Option<UserKey> = None;
        for key in self.order() {
            if self.records()[key].display_value(column) == value {
                if found.is_some() {
                    return None;
                }
                found = Some(key.clone());
            }
        }
        found
    }

    /// Displayed `column` values matching `pattern`, in display order.
    ///
    /// Empty patterns match nothing, consistent with the nick matchers.
    pub fn find_displayed(
        &self,
        pattern: &str,
        kind: MatchKind,
        case_sensitive: bool,
        column: Column,
    ) -> Vec<String> {
        if pattern.is_empty() {
            return Vec::new();
        }
        let needle = if case_sensitive {
            pattern.to_string()
        } else {
            pattern.to_lowercase()
        };
        self.order()
            .iter()
            .filter_map(|key| {
                let shown = self.records()[key].display_value(column);
                let probe = if case_sensitive {
                    shown.clone()
                } else {
                    shown.to_lowercase()
                };
                let hit = match kind {
                    MatchKind::Exact => probe == needle,
                    MatchKind::StartsWith => probe.starts_with(&needle),
                    MatchKind::Contains => probe.contains(&needle),
                };
                hit.then_some(shown)
            })
            .collect()
    }
}
