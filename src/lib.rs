//! HPACK header compression for HTTP/2 connections.
//!
//! A stateful, bit-exact codec between ordered lists of header fields and
//! compact header-block byte sequences. Both ends of a connection keep a
//! bounded FIFO cache of recently transmitted fields, the dynamic table,
//! synchronized purely through the byte stream itself.
//!
//! The transport owns framing, ordering and buffering; this crate consumes
//! one contiguous header block per decode call and produces one per encode
//! call. A connection uses one [`DynamicTable`] per direction:
//!
//! ```
//! use hpack::{Decoder, DynamicTable, Encoder, HeaderField};
//!
//! let mut encoder = Encoder::new();
//! let mut write_table = DynamicTable::new();
//! let mut block = Vec::new();
//! encoder
//!     .encode(&[HeaderField::new(":method", "GET")], &mut write_table, &mut block)
//!     .unwrap();
//!
//! let decoder = Decoder::new();
//! let mut read_table = DynamicTable::new();
//! let fields = decoder.decode(&mut &block[..], &mut read_table).unwrap();
//! assert_eq!(fields, [HeaderField::new(":method", "GET")]);
//! ```

pub use decoder::{Decoder, Error as DecoderError};
pub use dynamic::{DynamicTable, Error as DynamicTableError};
pub use encoder::{Encoder, Error as EncoderError, Indexing};
pub use field::HeaderField;

mod address;
mod block;
mod decoder;
mod dynamic;
mod encoder;
mod field;
mod prefix_int;
mod prefix_string;
mod static_;
