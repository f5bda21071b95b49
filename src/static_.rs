use crate::field::HeaderField;

pub(crate) struct StaticTable;

impl StaticTable {
    /// Returns the entry at a 1-based index.
    pub(crate) fn get(index: usize) -> Option<&'static HeaderField> {
        index
            .checked_sub(1)
            .and_then(|i| PREDEFINED_HEADERS.get(i))
    }

    /// Finds the best match for a field: the 1-based index of an entry with
    /// the same name, and whether the value matches as well.
    pub(crate) fn find(field: &HeaderField) -> Option<(usize, bool)> {
        let mut name_match = None;
        for (i, entry) in PREDEFINED_HEADERS.iter().enumerate() {
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
}

static PREDEFINED_HEADERS: [HeaderField; 61] = [
    HeaderField::borrowed(":authority", ""),
    HeaderField::borrowed(":method", "GET"),
    HeaderField::borrowed(":method", "POST"),
    HeaderField::borrowed(":path", "/"),
    HeaderField::borrowed(":path", "/index.html"),
    HeaderField::borrowed(":scheme", "http"),
    HeaderField::borrowed(":scheme", "https"),
    HeaderField::borrowed(":status", "200"),
    HeaderField::borrowed(":status", "204"),
    HeaderField::borrowed(":status", "206"),
    HeaderField::borrowed(":status", "304"),
    HeaderField::borrowed(":status", "400"),
    HeaderField::borrowed(":status", "404"),
    HeaderField::borrowed(":status", "500"),
    HeaderField::borrowed("accept-charset", ""),
    HeaderField::borrowed("accept-encoding", "gzip, deflate"),
    HeaderField::borrowed("accept-language", ""),
    HeaderField::borrowed("accept-ranges", ""),
    HeaderField::borrowed("accept", ""),
    HeaderField::borrowed("access-control-allow-origin", ""),
    HeaderField::borrowed("age", ""),
    HeaderField::borrowed("allow", ""),
    HeaderField::borrowed("authorization", ""),
    HeaderField::borrowed("cache-control", ""),
    HeaderField::borrowed("content-disposition", ""),
    HeaderField::borrowed("content-encoding", ""),
    HeaderField::borrowed("content-language", ""),
    HeaderField::borrowed("content-length", ""),
    HeaderField::borrowed("content-location", ""),
    HeaderField::borrowed("content-range", ""),
    HeaderField::borrowed("content-type", ""),
    HeaderField::borrowed("cookie", ""),
    HeaderField::borrowed("date", ""),
    HeaderField::borrowed("etag", ""),
    HeaderField::borrowed("expect", ""),
    HeaderField::borrowed("expires", ""),
    HeaderField::borrowed("from", ""),
    HeaderField::borrowed("host", ""),
    HeaderField::borrowed("if-match", ""),
    HeaderField::borrowed("if-modified-since", ""),
    HeaderField::borrowed("if-none-match", ""),
    HeaderField::borrowed("if-range", ""),
    HeaderField::borrowed("if-unmodified-since", ""),
    HeaderField::borrowed("last-modified", ""),
    HeaderField::borrowed("link", ""),
    HeaderField::borrowed("location", ""),
    HeaderField::borrowed("max-forwards", ""),
    HeaderField::borrowed("proxy-authenticate", ""),
    HeaderField::borrowed("proxy-authorization", ""),
    HeaderField::borrowed("range", ""),
    HeaderField::borrowed("referer", ""),
    HeaderField::borrowed("refresh", ""),
    HeaderField::borrowed("retry-after", ""),
    HeaderField::borrowed("server", ""),
    HeaderField::borrowed("set-cookie", ""),
    HeaderField::borrowed("strict-transport-security", ""),
    HeaderField::borrowed("transfer-encoding", ""),
    HeaderField::borrowed("user-agent", ""),
    HeaderField::borrowed("vary", ""),
    HeaderField::borrowed("via", ""),
    HeaderField::borrowed("www-authenticate", ""),
];
