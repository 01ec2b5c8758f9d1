//! Per-column comparators with the operator/favorite tie-break chain.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};

use crate::error::ListError;
use crate::types::{FavoritesRegistry, Snapshot, UserRecord};

/// Number of displayable columns.
pub const COLUMN_COUNT: usize = 7;

/// A sortable, displayable column, in the model's fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Nick,
    Share,
    Comment,
    Tag,
    Connection,
    Ip,
    Email,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Nick,
        Column::Share,
        Column::Comment,
        Column::Tag,
        Column::Connection,
        Column::Ip,
        Column::Email,
    ];

    /// Map a raw view-layer column index to a column.
    ///
    /// Negative and past-the-end indices are rejected.
    pub fn from_index(index: isize) -> Option<Column> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Column::ALL.get(i).copied())
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Header label shown by rendering layers.
    pub fn header(self) -> &'static str {
        match self {
            Column::Nick => "Nick",
            Column::Share => "Share",
            Column::Comment => "Comment",
            Column::Tag => "Tag",
            Column::Connection => "Connection",
            Column::Ip => "IP",
            Column::Email => "E-mail",
        }
    }
}

/// Requested sort direction.
///
/// Flips only the column-value comparison, never the operator or favorite
/// tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// The per-column ordering functions plus the universal tie-break chain.
///
/// The same comparison serves full-sequence stable sorts and binary-search
/// insertion-point lookup.
pub(crate) struct ComparatorSet {
    collator: Collator,
}

impl ComparatorSet {
    /// Build the comparator set with a root-locale collator.
    pub(crate) fn new() -> Result<Self, ListError> {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = Collator::try_new(&Default::default(), options)?;
        Ok(Self { collator })
    }

    /// Total comparison of two records under `(column, order)`.
    ///
    /// Operators sort before non-operators and favorites before
    /// non-favorites regardless of direction; `order` flips only the final
    /// value comparison. The `Ip` column keeps its narrower chain: operator
    /// flag, then numeric address, with blank addresses comparing equal.
    pub(crate) fn compare(
        &self,
        favorites: &dyn FavoritesRegistry,
        column: Column,
        order: SortOrder,
        a: &UserRecord,
        b: &UserRecord,
    ) -> Ordering {
        let sa = a.snapshot();
        let sb = b.snapshot();

        let by_op = sb.is_op.cmp(&sa.is_op);
        if by_op != Ordering::Equal {
            return by_op;
        }

        if column == Column::Ip {
            return compare_ip(order, sa, sb);
        }

        let by_favorite = favorites
            .is_favorite(b.key())
            .cmp(&favorites.is_favorite(a.key()));
        if by_favorite != Ordering::Equal {
            return by_favorite;
        }

        let by_value = match column {
            Column::Nick => self.collator.compare(&sa.nick, &sb.nick),
            Column::Share => sa.share_bytes.cmp(&sb.share_bytes),
            Column::Comment => self.collator.compare(&sa.comment, &sb.comment),
            Column::Tag => self.collator.compare(&sa.tag, &sb.tag),
            Column::Connection => self.collator.compare(&sa.connection, &sb.connection),
            Column::Email => self.collator.compare(&sa.email, &sb.email),
            // Handled before the favorite tie-break.
            Column::Ip => Ordering::Equal,
        };
        order.apply(by_value)
    }
}

fn compare_ip(order: SortOrder, sa: &Snapshot, sb: &Snapshot) -> Ordering {
    if sa.ip.is_empty() || sb.ip.is_empty() {
        // Blank addresses keep their stable relative order.
        return Ordering::Equal;
    }
    order.apply(pack_ipv4(&sa.ip).cmp(&pack_ipv4(&sb.ip)))
}

/// Pack dotted-quad text into a big-endian u32.
///
/// Missing or non-numeric segments count as zero, so malformed addresses
/// still compare deterministically.
fn pack_ipv4(text: &str) -> u32 {
    let mut segments = text.split('.');
    let mut packed = 0u32;
    for _ in 0..4 {
        let octet = segments
            .next()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0);
        packed = (packed << 8) | (octet & 0xFF);
    }
    packed
}
