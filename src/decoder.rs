use bytes::Buf;
#[cfg(feature = "tracing")]
use tracing::trace;

use crate::address;
use crate::block::Prefix;
use crate::dynamic::{self, DynamicTable};
use crate::field::HeaderField;
use crate::{prefix_int, prefix_string};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("index {0} outside the table address space")]
    InvalidIndex(u64),
    #[error("could not parse integer: {0}")]
    Integer(#[from] prefix_int::Error),
    #[error("could not parse string: {0}")]
    String(#[from] prefix_string::Error),
    #[error("table size update to {size} exceeds the negotiated bound of {max}")]
    SizeUpdateTooLarge { size: usize, max: usize },
}

/// Parses header-block byte sequences back into ordered header lists.
///
/// The read-direction [`DynamicTable`] is passed into every call, mirroring
/// the encoder side: one table per connection, calls in wire order. Any
/// error poisons the table relative to the peer, so the caller must treat a
/// failed decode as fatal for the whole connection, not just one block.
#[derive(Debug)]
pub struct Decoder {
    max_table_size: usize,
}

impl Decoder {
    pub fn new() -> Self {
        Self::with_max_table_size(dynamic::DEFAULT_MAX_SIZE)
    }

    /// `max_table_size` bounds the capacity a peer may claim through
    /// size-update instructions, typically the value this endpoint
    /// advertised in its settings.
    pub fn with_max_table_size(max_table_size: usize) -> Self {
        Decoder { max_table_size }
    }

    /// Decodes one complete header block. Returns the full header list or
    /// an error, never a partial list.
    pub fn decode<B: Buf>(
        &self,
        buf: &mut B,
        table: &mut DynamicTable,
    ) -> Result<Vec<HeaderField>, Error> {
        let mut fields = Vec::new();
        while buf.has_remaining() {
            let prefix = Prefix::classify(buf.chunk()[0]);
            match prefix {
                Prefix::Indexed => {
                    let (_, index) = prefix_int::decode(prefix.size(), buf)?;
                    let field = address::get(index as usize, table)
                        .ok_or(Error::InvalidIndex(index))?;
                    #[cfg(feature = "tracing")]
                    trace!("decoded indexed field {}, index {}", field, index);
                    fields.push(field);
                }
                Prefix::SizeUpdate => {
                    let (_, size) = prefix_int::decode(prefix.size(), buf)?;
                    let size = size as usize;
                    if size > self.max_table_size {
                        return Err(Error::SizeUpdateTooLarge {
                            size,
                            max: self.max_table_size,
                        });
                    }
                    #[cfg(feature = "tracing")]
                    trace!("table size update to {}", size);
                    table.set_max_size(size);
                }
                Prefix::LiteralWithIndexing
                | Prefix::LiteralWithoutIndexing
                | Prefix::LiteralNeverIndexed => {
                    let field = self.decode_literal(prefix, buf, table)?;
                    #[cfg(feature = "tracing")]
                    trace!("decoded literal field {}", field);
                    fields.push(field);
                }
            }
        }
        Ok(fields)
    }

    fn decode_literal<B: Buf>(
        &self,
        prefix: Prefix,
        buf: &mut B,
        table: &mut DynamicTable,
    ) -> Result<HeaderField, Error> {
        let (_, name_index) = prefix_int::decode(prefix.size(), buf)?;
        // The name index addresses the combined space as it stands before
        // this instruction's own insertion, matching the encoder's view.
        let name = if name_index == 0 {
            prefix_string::decode(buf)?
        } else {
            address::get(name_index as usize, table)
                .ok_or(Error::InvalidIndex(name_index))?
                .name
                .into_owned()
        };
        let value = prefix_string::decode(buf)?;
        let field = HeaderField::new(name, value);

        Ok(match prefix {
            Prefix::LiteralWithIndexing => {
                table.insert(field.clone());
                field
            }
            Prefix::LiteralNeverIndexed => field.sensitive(),
            _ => field,
        })
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;

    fn decode(data: &[u8]) -> Result<Vec<HeaderField>, Error> {
        let mut table = DynamicTable::new();
        Decoder::new().decode(&mut &data[..], &mut table)
    }

    #[test]
    fn indexed_static_field() {
        let fields = decode(&[0x80 | 2]).unwrap();
        assert_eq!(fields, [HeaderField::new(":method", "GET")]);
        assert!(!fields[0].sensitive);
    }

    #[test]
    fn literal_with_indexing_populates_the_table() {
        let mut table = DynamicTable::new();
        let data = b"\x40\x0acustom-key\x0dcustom-header";
        let fields = Decoder::new().decode(&mut &data[..], &mut table).unwrap();
        assert_eq!(fields, [HeaderField::new("custom-key", "custom-header")]);
        assert_eq!(table.count(), 1);
        assert_eq!(table.size(), 55);
    }

    #[test]
    fn never_indexed_literal_is_sensitive_and_uncached() {
        let mut table = DynamicTable::new();
        let data = b"\x10\x08password\x06secret";
        let fields = Decoder::new().decode(&mut &data[..], &mut table).unwrap();
        assert_eq!(fields, [HeaderField::new("password", "secret")]);
        assert!(fields[0].sensitive);
        assert_eq!(table.count(), 0);
    }

    #[test]
    fn without_indexing_literal_is_plain_and_uncached() {
        let mut table = DynamicTable::new();
        let data = b"\x04\x0c/sample/path";
        let fields = Decoder::new().decode(&mut &data[..], &mut table).unwrap();
        assert_eq!(fields, [HeaderField::new(":path", "/sample/path")]);
        assert!(!fields[0].sensitive);
        assert_eq!(table.count(), 0);
    }

    #[test]
    fn index_zero_is_invalid() {
        assert_matches!(decode(&[0x80]), Err(Error::InvalidIndex(0)));
    }

    #[test]
    fn index_beyond_the_combined_range_is_invalid() {
        // Empty dynamic table, so anything past 61 has no referent.
        assert_matches!(decode(&[0x80 | 62]), Err(Error::InvalidIndex(62)));
    }

    #[test]
    fn truncated_instruction_is_an_error() {
        assert_matches!(decode(&[0x40]), Err(Error::String(_)));
        assert_matches!(decode(&[0xFF]), Err(Error::Integer(_)));
        assert_matches!(decode(b"\x40\x0acustom-key"), Err(Error::String(_)));
    }

    #[test]
    fn size_update_is_applied() {
        let mut table = DynamicTable::new();
        Decoder::new()
            .decode(&mut &[0x20 | 10u8][..], &mut table)
            .unwrap();
        assert_eq!(table.max_size(), 10);
    }

    #[test]
    fn size_update_past_the_bound_is_rejected() {
        let mut table = DynamicTable::new();
        let mut data = Vec::new();
        prefix_int::encode(5, 0b001, 8192, &mut data);
        assert_matches!(
            Decoder::with_max_table_size(4096).decode(&mut &data[..], &mut table),
            Err(Error::SizeUpdateTooLarge { size: 8192, max: 4096 })
        );
    }
}
