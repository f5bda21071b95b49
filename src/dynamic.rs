use std::collections::VecDeque;

use crate::field::HeaderField;

/// Default table capacity in bytes, matching the protocol's initial
/// `SETTINGS_HEADER_TABLE_SIZE`.
pub(crate) const DEFAULT_MAX_SIZE: usize = 4096;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("dynamic table index {0} out of bounds")]
    IndexOutOfBounds(usize),
}

/// A bounded FIFO cache of recently transmitted header fields.
///
/// Entries are ordered most-recently-inserted first and addressed with
/// 1-based indices. The table tracks its size in bytes (each entry costs
/// `name + value + 32`) and evicts from the oldest end whenever an insertion
/// or a capacity change would exceed `max_size`.
///
/// A connection keeps one instance per transmission direction. The two
/// instances are never shared with other connections or with the opposite
/// direction, and all mutations for one direction must stay in the order
/// the corresponding header blocks travel on the wire.
#[derive(Debug)]
pub struct DynamicTable {
    entries: VecDeque<HeaderField>,
    size: usize,
    max_size: usize,
}

impl DynamicTable {
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_SIZE)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        DynamicTable {
            entries: VecDeque::new(),
            size: 0,
            max_size,
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Current size in bytes, per the entry accounting rule.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the entry at a 1-based index, 1 being the most recent.
    pub fn get(&self, index: usize) -> Result<&HeaderField, Error> {
        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .ok_or(Error::IndexOutOfBounds(index))
    }

    /// Inserts a field at the head, evicting the oldest entries as needed.
    ///
    /// A field larger than the whole table empties it and is itself not
    /// retained. The wire format defines this as normal operation, not an
    /// error, and the peer performs the same steps to stay in sync.
    pub fn insert(&mut self, field: HeaderField) {
        let size = field.mem_size();
        if size > self.max_size {
            self.entries.clear();
            self.size = 0;
            return;
        }
        self.evict_to(self.max_size - size);
        self.entries.push_front(field);
        self.size += size;
    }

    /// Changes the capacity, evicting the oldest entries until the current
    /// size fits. May be called between any two insertions, including in
    /// the middle of a header block.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.evict_to(max_size);
    }

    /// Finds the best match for a field: the 1-based index of an entry with
    /// the same name, and whether the value matches as well.
    pub(crate) fn find(&self, field: &HeaderField) -> Option<(usize, bool)> {
        let mut name_match = None;
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.name == field.name {
                if entry.value == field.value {
                    return Some((i + 1, true));
                }
                if name_match.is_none() {
                    name_match = Some((i + 1, false));
                }
            }
        }
        name_match
    }

    fn evict_to(&mut self, limit: usize) {
        while self.size > limit {
            match self.entries.pop_back() {
                Some(evicted) => self.size -= evicted.mem_size(),
                None => break,
            }
        }
    }
}

impl Default for DynamicTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;

    fn field(name: &str, value: &str) -> HeaderField {
        HeaderField::new(name, value)
    }

    #[test]
    fn insert_accounts_size() {
        let mut table = DynamicTable::new();
        table.insert(field("custom-key", "custom-header"));
        assert_eq!(table.count(), 1);
        assert_eq!(table.size(), 10 + 13 + 32);
    }

    #[test]
    fn most_recent_entry_is_index_one() {
        let mut table = DynamicTable::new();
        table.insert(field("a", "1"));
        table.insert(field("b", "2"));
        assert_eq!(table.get(1).unwrap(), &field("b", "2"));
        assert_eq!(table.get(2).unwrap(), &field("a", "1"));
        assert_matches!(table.get(0), Err(Error::IndexOutOfBounds(0)));
        assert_matches!(table.get(3), Err(Error::IndexOutOfBounds(3)));
    }

    #[test]
    fn insert_evicts_oldest_first() {
        // Room for exactly two of these 42-byte entries.
        let mut table = DynamicTable::with_max_size(84);
        table.insert(field("aaaaa", "11111"));
        table.insert(field("bbbbb", "22222"));
        table.insert(field("ccccc", "33333"));
        assert_eq!(table.count(), 2);
        assert_eq!(table.get(1).unwrap(), &field("ccccc", "33333"));
        assert_eq!(table.get(2).unwrap(), &field("bbbbb", "22222"));
        assert!(table.size() <= table.max_size());
    }

    #[test]
    fn oversized_entry_empties_the_table() {
        let mut table = DynamicTable::with_max_size(64);
        table.insert(field("a", "1"));
        table.insert(field("name-too-long-to-ever-fit", "with an equally oversized value"));
        assert_eq!(table.count(), 0);
        assert_eq!(table.size(), 0);
    }

    #[test]
    fn shrinking_max_size_evicts_no_more_than_necessary() {
        let mut table = DynamicTable::with_max_size(200);
        table.insert(field("aaaaa", "11111")); // 42 bytes each
        table.insert(field("bbbbb", "22222"));
        table.insert(field("ccccc", "33333"));
        assert_eq!(table.size(), 126);

        table.set_max_size(90);
        assert_eq!(table.count(), 2);
        assert_eq!(table.size(), 84);
        assert_eq!(table.get(2).unwrap(), &field("bbbbb", "22222"));

        table.set_max_size(0);
        assert_eq!(table.count(), 0);
        assert_eq!(table.size(), 0);
    }

    #[test]
    fn find_prefers_full_match_over_name_match() {
        let mut table = DynamicTable::new();
        table.insert(field("x-trace", "abc"));
        table.insert(field("x-trace", "def"));
        assert_eq!(table.find(&field("x-trace", "abc")), Some((2, true)));
        assert_eq!(table.find(&field("x-trace", "zzz")), Some((1, false)));
        assert_eq!(table.find(&field("x-span", "abc")), None);
    }
}
