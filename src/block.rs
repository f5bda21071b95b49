//! First-byte classification of header-block instructions.
//!
//! Every instruction in a header block starts with one of five bit
//! patterns. The pattern decides the integer prefix width of the first
//! field and whether the instruction carries literals or mutates the table.

/// The five instruction patterns that can start a field line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prefix {
    /// `1xxxxxxx`: reference to a table entry, name and value.
    Indexed,
    /// `01xxxxxx`: literal that the decoder inserts into its table.
    LiteralWithIndexing,
    /// `001xxxxx`: dynamic table capacity change.
    SizeUpdate,
    /// `0001xxxx`: literal that must never be indexed, on any hop.
    LiteralNeverIndexed,
    /// `0000xxxx`: literal kept out of the table on this hop only.
    LiteralWithoutIndexing,
}

impl Prefix {
    pub(crate) fn classify(first: u8) -> Self {
        if first & 0b1000_0000 != 0 {
            Prefix::Indexed
        } else if first & 0b0100_0000 != 0 {
            Prefix::LiteralWithIndexing
        } else if first & 0b0010_0000 != 0 {
            Prefix::SizeUpdate
        } else if first & 0b0001_0000 != 0 {
            Prefix::LiteralNeverIndexed
        } else {
            Prefix::LiteralWithoutIndexing
        }
    }

    /// Width in bits of the integer prefix following the pattern.
    pub(crate) fn size(self) -> u8 {
        match self {
            Prefix::Indexed => 7,
            Prefix::LiteralWithIndexing => 6,
            Prefix::SizeUpdate => 5,
            Prefix::LiteralNeverIndexed => 4,
            Prefix::LiteralWithoutIndexing => 4,
        }
    }

    /// The pattern bits, positioned as a `prefix_int` flags argument.
    pub(crate) fn flags(self) -> u8 {
        match self {
            Prefix::Indexed => 0b1,
            Prefix::LiteralWithIndexing => 0b01,
            Prefix::SizeUpdate => 0b001,
            Prefix::LiteralNeverIndexed => 0b0001,
            Prefix::LiteralWithoutIndexing => 0b0000,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALL: [Prefix; 5] = [
        Prefix::Indexed,
        Prefix::LiteralWithIndexing,
        Prefix::SizeUpdate,
        Prefix::LiteralNeverIndexed,
        Prefix::LiteralWithoutIndexing,
    ];

    #[test]
    fn classify_first_bytes() {
        assert_eq!(Prefix::classify(0x82), Prefix::Indexed);
        assert_eq!(Prefix::classify(0x40), Prefix::LiteralWithIndexing);
        assert_eq!(Prefix::classify(0x3f), Prefix::SizeUpdate);
        assert_eq!(Prefix::classify(0x10), Prefix::LiteralNeverIndexed);
        assert_eq!(Prefix::classify(0x0f), Prefix::LiteralWithoutIndexing);
    }

    #[test]
    fn flags_and_size_round_trip_through_classify() {
        for prefix in ALL {
            let first = prefix.flags() << prefix.size();
            assert_eq!(Prefix::classify(first), prefix);
        }
    }
}
