//! Combined static and dynamic table address space.
//!
//! Indices `1..=N` address the dynamic table, most recent entry first;
//! `N+1..=N+61` address the static table, where `N` is the dynamic table's
//! current entry count. Every insertion shifts the static range, so the
//! mapping is recomputed from the live table on each call and never cached.

use crate::dynamic::DynamicTable;
use crate::field::HeaderField;
use crate::static_::StaticTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Match {
    /// Name and value both match the entry at this index.
    Field(usize),
    /// Only the name matches the entry at this index.
    Name(usize),
}

/// Resolves a combined-space index to a field.
pub(crate) fn get(index: usize, dynamic: &DynamicTable) -> Option<HeaderField> {
    let count = dynamic.count();
    if index <= count {
        dynamic.get(index).ok().cloned()
    } else {
        StaticTable::get(index - count).cloned()
    }
}

/// Finds the best combined-space match for a field, preferring full matches
/// over name-only matches and dynamic entries over static ones.
pub(crate) fn find(field: &HeaderField, dynamic: &DynamicTable) -> Option<Match> {
    let count = dynamic.count();
    let in_dynamic = dynamic.find(field);
    let in_static = StaticTable::find(field).map(|(i, full)| (i + count, full));

    match (in_dynamic, in_static) {
        (Some((i, true)), _) => Some(Match::Field(i)),
        (_, Some((i, true))) => Some(Match::Field(i)),
        (Some((i, false)), _) => Some(Match::Name(i)),
        (_, Some((i, false))) => Some(Match::Name(i)),
        (None, None) => None,
    }
}
