use std::borrow::Cow;
use std::fmt;

/// Overhead charged against the table budget for every cached entry, fixed
/// by the wire format's size accounting rule.
const ENTRY_OVERHEAD: usize = 32;

/// One HTTP header field: a name/value pair plus a sensitivity marker.
///
/// Sensitive fields (credentials, session tokens) are transmitted with the
/// never-indexed literal representation and are never cached in a dynamic
/// table, neither locally nor by the peer or any intermediary.
#[derive(Debug, Clone, Eq)]
pub struct HeaderField {
    pub name: Cow<'static, [u8]>,
    pub value: Cow<'static, [u8]>,
    pub sensitive: bool,
}

impl HeaderField {
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<Vec<u8>>,
        V: Into<Vec<u8>>,
    {
        HeaderField {
            name: Cow::Owned(name.into()),
            value: Cow::Owned(value.into()),
            sensitive: false,
        }
    }

    pub(crate) const fn borrowed(name: &'static str, value: &'static str) -> Self {
        HeaderField {
            name: Cow::Borrowed(name.as_bytes()),
            value: Cow::Borrowed(value.as_bytes()),
            sensitive: false,
        }
    }

    /// Marks the field as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// The size this field occupies in a dynamic table.
    pub fn mem_size(&self) -> usize {
        self.name.len() + self.value.len() + ENTRY_OVERHEAD
    }
}

// Equality is by (name, value); the sensitivity marker does not take part
// in table matching.
impl PartialEq for HeaderField {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            String::from_utf8_lossy(&self.name),
            String::from_utf8_lossy(&self.value)
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mem_size_includes_overhead() {
        let field = HeaderField::new("custom-key", "custom-value");
        assert_eq!(field.mem_size(), 10 + 12 + 32);
        assert_eq!(HeaderField::new("", "").mem_size(), 32);
    }

    #[test]
    fn equality_ignores_sensitivity() {
        let plain = HeaderField::new("authorization", "Bearer xyz");
        let sensitive = HeaderField::new("authorization", "Bearer xyz").sensitive();
        assert_eq!(plain, sensitive);
        assert_ne!(plain, HeaderField::new("authorization", "Bearer abc"));
    }
}
