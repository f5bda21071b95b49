//! Length-prefixed string literals, optionally Huffman-compressed.
//!
//! Wire shape: one flag bit marking compression, a 7-bit-prefix length, and
//! `length` payload bytes. The length always counts the bytes on the wire,
//! compressed or not.

pub(crate) mod huffman;

use bytes::{Buf, BufMut};

use crate::prefix_int;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("could not parse length: {0}")]
    Integer(#[from] prefix_int::Error),
    #[error("could not decompress string: {0}")]
    Huffman(#[from] huffman::Error),
}

const HUFFMAN_FLAG: u8 = 1;

/// Writes a string literal. With `compress` set, the Huffman form is used
/// only when it is actually shorter, so compression never inflates output.
pub fn encode<B: BufMut>(value: &[u8], compress: bool, buf: &mut B) {
    if compress && huffman::encoded_len(value) < value.len() {
        let mut encoded = Vec::with_capacity(huffman::encoded_len(value));
        huffman::encode(value, &mut encoded);
        prefix_int::encode(7, HUFFMAN_FLAG, encoded.len() as u64, buf);
        buf.put_slice(&encoded);
    } else {
        prefix_int::encode(7, 0, value.len() as u64, buf);
        buf.put_slice(value);
    }
}

/// Reads a string literal back into plain bytes.
pub fn decode<B: Buf>(buf: &mut B) -> Result<Vec<u8>, Error> {
    let (flags, len) = prefix_int::decode(7, buf)?;
    // The integer decoder caps values well below usize range.
    let len = len as usize;
    if buf.remaining() < len {
        return Err(Error::UnexpectedEnd);
    }
    let payload = buf.copy_to_bytes(len);
    if flags & HUFFMAN_FLAG == HUFFMAN_FLAG {
        Ok(huffman::decode(&payload)?)
    } else {
        Ok(payload.to_vec())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn raw_literal() {
        let mut buf = Vec::new();
        encode(b"custom-key", false, &mut buf);
        assert_eq!(buf[0], 10);
        assert_eq!(&buf[1..], b"custom-key");

        let mut read = &buf[..];
        assert_eq!(decode(&mut read).as_deref(), Ok(&b"custom-key"[..]));
        assert!(!read.has_remaining());
    }

    #[test]
    fn huffman_literal() {
        let mut buf = Vec::new();
        encode(b"www.example.com", true, &mut buf);
        assert_eq!(buf[0], 0x80 | 12);
        assert_eq!(buf.len(), 13);

        let mut read = &buf[..];
        assert_eq!(decode(&mut read).as_deref(), Ok(&b"www.example.com"[..]));
    }

    #[test]
    fn compression_is_skipped_when_it_does_not_help() {
        // Rare byte values have long codes; the raw form wins.
        let value = [0x01u8, 0x02, 0x03];
        let mut buf = Vec::new();
        encode(&value, true, &mut buf);
        assert_eq!(buf[0], 3);
        assert_eq!(&buf[1..], &value);
    }

    #[test]
    fn length_beyond_input_is_an_error() {
        let mut read = &[0x05, b'a', b'b'][..];
        assert_matches!(decode(&mut read), Err(Error::UnexpectedEnd));

        assert_matches!(decode(&mut &[][..]), Err(Error::Integer(_)));
    }

    #[test]
    fn corrupt_huffman_payload_is_an_error() {
        let mut read = &[0x81, 0xff][..];
        assert_matches!(decode(&mut read), Err(Error::Huffman(_)));
    }
}
