use bytes::BufMut;

use crate::address::{self, Match};
use crate::block::Prefix;
use crate::dynamic::DynamicTable;
use crate::field::HeaderField;
use crate::{prefix_int, prefix_string};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("field of {size} bytes exceeds the configured bound of {max}")]
    FieldTooLarge { size: usize, max: usize },
}

/// Caller hint for how a single field may use the shared dynamic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indexing {
    /// Insert the field so later occurrences can be referenced by index.
    #[default]
    Index,
    /// Encode literally without touching the table. Meant for values too
    /// variable to ever be referenced again.
    Skip,
}

const DEFAULT_MAX_FIELD_SIZE: usize = 16 * 1024;

/// Turns ordered header lists into header-block byte sequences.
///
/// The write-direction [`DynamicTable`] is passed into every call: a
/// connection owns exactly one, and encode calls for that connection must
/// stay in wire order because each call may mutate it.
#[derive(Debug)]
pub struct Encoder {
    huffman: bool,
    max_field_size: usize,
    pending_size_update: Option<usize>,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            huffman: true,
            max_field_size: DEFAULT_MAX_FIELD_SIZE,
            pending_size_update: None,
        }
    }

    /// Enables or disables string compression.
    pub fn huffman(mut self, enabled: bool) -> Self {
        self.huffman = enabled;
        self
    }

    /// Sanity bound on `name + value` length of a single field.
    pub fn max_field_size(mut self, max: usize) -> Self {
        self.max_field_size = max;
        self
    }

    /// Schedules a dynamic table capacity change. The next `encode` call
    /// emits the size-update instruction before any field and applies the
    /// new bound to the table it was given.
    pub fn set_max_table_size(&mut self, size: usize) {
        self.pending_size_update = Some(size);
    }

    /// Encodes `fields` in order into `buf`, with the default indexing
    /// policy for every field.
    pub fn encode<B: BufMut>(
        &mut self,
        fields: &[HeaderField],
        table: &mut DynamicTable,
        buf: &mut B,
    ) -> Result<(), Error> {
        self.check_fields(fields.iter())?;
        self.flush_size_update(table, buf);
        for field in fields {
            self.encode_field(field, Indexing::Index, table, buf);
        }
        Ok(())
    }

    /// Like [`encode`](Self::encode), with a per-field indexing hint.
    pub fn encode_hinted<B: BufMut>(
        &mut self,
        fields: &[(HeaderField, Indexing)],
        table: &mut DynamicTable,
        buf: &mut B,
    ) -> Result<(), Error> {
        self.check_fields(fields.iter().map(|(f, _)| f))?;
        self.flush_size_update(table, buf);
        for (field, hint) in fields {
            self.encode_field(field, *hint, table, buf);
        }
        Ok(())
    }

    /// Rejects oversized fields up front, before any byte is written or any
    /// table mutation happens, so a failed call leaves everything untouched
    /// and the caller can re-represent the field and retry.
    fn check_fields<'a, I>(&self, fields: I) -> Result<(), Error>
    where
        I: Iterator<Item = &'a HeaderField>,
    {
        for field in fields {
            let size = field.name.len() + field.value.len();
            if size > self.max_field_size {
                return Err(Error::FieldTooLarge {
                    size,
                    max: self.max_field_size,
                });
            }
        }
        Ok(())
    }

    fn flush_size_update<B: BufMut>(&mut self, table: &mut DynamicTable, buf: &mut B) {
        if let Some(size) = self.pending_size_update.take() {
            let prefix = Prefix::SizeUpdate;
            prefix_int::encode(prefix.size(), prefix.flags(), size as u64, buf);
            table.set_max_size(size);
        }
    }

    fn encode_field<B: BufMut>(
        &self,
        field: &HeaderField,
        hint: Indexing,
        table: &mut DynamicTable,
        buf: &mut B,
    ) {
        let found = address::find(field, table);

        // A sensitive field never uses the indexed form, even when a table
        // entry happens to hold the same value.
        if let Some(Match::Field(index)) = found {
            if !field.sensitive {
                let prefix = Prefix::Indexed;
                prefix_int::encode(prefix.size(), prefix.flags(), index as u64, buf);
                return;
            }
        }

        let prefix = if field.sensitive {
            Prefix::LiteralNeverIndexed
        } else if hint == Indexing::Skip {
            Prefix::LiteralWithoutIndexing
        } else {
            Prefix::LiteralWithIndexing
        };
        let name_index = match found {
            Some(Match::Field(i)) | Some(Match::Name(i)) => i as u64,
            None => 0,
        };

        prefix_int::encode(prefix.size(), prefix.flags(), name_index, buf);
        if name_index == 0 {
            prefix_string::encode(&field.name, self.huffman, buf);
        }
        prefix_string::encode(&field.value, self.huffman, buf);

        if prefix == Prefix::LiteralWithIndexing {
            // The table keeps its own copy, detached from the caller's list.
            table.insert(field.clone());
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
