use bytes::{Buf, BufMut};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("value overflow")]
    Overflow,
    #[error("unexpected end of input")]
    UnexpectedEnd,
}

/// Cap on decoded values. A peer that keeps sending continuation bytes past
/// this bound gets an [`Error::Overflow`] instead of driving the
/// accumulation further.
pub(crate) const MAX_VALUE: u64 = 1 << 31;

/// Writes `value` with an N-bit prefix of `size` bits; `flags` carries the
/// representation pattern in the bits above the prefix.
pub fn encode<B: BufMut>(size: u8, flags: u8, value: u64, buf: &mut B) {
    debug_assert!((1..=8).contains(&size));
    let mask = (0xFFu16 >> (8 - size)) as u8;
    let high = ((flags as u16) << size) as u8;
    if value < mask as u64 {
        buf.put_u8(high | value as u8);
        return;
    }
    buf.put_u8(high | mask);
    let mut rest = value - mask as u64;
    while rest >= 128 {
        buf.put_u8((rest % 128 + 128) as u8);
        rest /= 128;
    }
    buf.put_u8(rest as u8);
}

/// Reads an N-bit-prefix integer, returning the flag bits above the prefix
/// and the value.
pub fn decode<B: Buf>(size: u8, buf: &mut B) -> Result<(u8, u64), Error> {
    debug_assert!((1..=8).contains(&size));
    if !buf.has_remaining() {
        return Err(Error::UnexpectedEnd);
    }
    let first = buf.get_u8();
    let flags = ((first as u16) >> size) as u8;
    let mask = (0xFFu16 >> (8 - size)) as u8;
    let mut value = (first & mask) as u64;
    if value < mask as u64 {
        return Ok((flags, value));
    }

    let mut position = 0u8;
    loop {
        if !buf.has_remaining() {
            return Err(Error::UnexpectedEnd);
        }
        let byte = buf.get_u8();
        value += ((byte & 127) as u64) << position;
        if value > MAX_VALUE {
            return Err(Error::Overflow);
        }
        position += 7;
        if byte & 128 == 0 {
            return Ok((flags, value));
        }
        // Continuation bytes with no payload never grow `value`, so bound
        // the shift as well.
        if position >= 35 {
            return Err(Error::Overflow);
        }
    }
}
