use http::StatusCode;

/// Text used when a status code has no entry in the table
pub const UNDEFINED_ERROR: &str = "Undefined Error";

/// Registered HTTP status codes and their reason phrases, sorted by code
///
/// Reserved ranges that IANA leaves open are listed as `Unassigned`.
static ENTRIES: &[(u16, &str)] = &[
    (100, "Continue"),
    (101, "Switching Protocols"),
    (102, "Processing"),
    (103, "Early Hints"),
    (199, "Unassigned"),
    (200, "OK"),
    (201, "Created"),
    (202, "Accepted"),
    (204, "No Content"),
    (205, "Reset Content"),
    (206, "Partial Content"),
    (208, "Already Reported"),
    (225, "Unassigned"),
    (226, "IM Used"),
    (299, "Unassigned"),
    (300, "Multiple Choices"),
    (301, "Moved Permanently"),
    (302, "Found"),
    (303, "See Other"),
    (304, "Not Modified"),
    (305, "Use Proxy"),
    (307, "Temporary Redirect"),
    (308, "Permanent Redirect"),
    (399, "Unassigned"),
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (402, "Payment Required"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (406, "Not Acceptable"),
    (407, "Proxy Authentication Required"),
    (408, "Request Timeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (411, "Length Required"),
    (412, "Precondition Failed"),
    (413, "Payload Too Large"),
    (414, "URI Too Long"),
    (415, "Unsupported Media Type"),
    (416, "Range Not Satisfiable"),
    (417, "Expectation Failed"),
    (420, "Unassigned"),
    (421, "Misdirected Request"),
    (422, "Unprocessable Entity"),
    (423, "Locked"),
    (424, "Failed Dependency"),
    (425, "Too Early"),
    (426, "Upgrade Required"),
    (427, "Unassigned"),
    (428, "Precondition Required"),
    (429, "Too Many Requests"),
    (430, "Unassigned"),
    (431, "Request Header Fields Too Large"),
    (450, "Unassigned"),
    (451, "Unavailable For Legal Reasons"),
    (499, "Unassigned"),
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
    (506, "Variant Also Negotiates"),
    (507, "Insufficient Storage"),
    (508, "Loop Detected"),
    (509, "Unassigned"),
    (510, "Not Extended"),
    (511, "Network Authentication Required"),
    (599, "Unassigned"),
];

/// Read-only lookup from status code to reason phrase
///
/// Backed by a static sorted slice, so it is free to copy and safe to share
/// between any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusTextTable;

impl StatusTextTable {
    /// Reason phrase for a raw status code, if the table knows it
    pub fn get(self, code: u16) -> Option<&'static str> {
        ENTRIES
            .binary_search_by_key(&code, |(entry, _)| *entry)
            .ok()
            .map(|index| ENTRIES[index].1)
    }

    /// Reason phrase for a status code, falling back to [`UNDEFINED_ERROR`]
    pub fn text_for(self, status: StatusCode) -> &'static str {
        self.get(status.as_u16()).unwrap_or(UNDEFINED_ERROR)
    }

    /// All entries in ascending code order
    pub fn iter(self) -> impl Iterator<Item = (u16, &'static str)> {
        ENTRIES.iter().copied()
    }

    pub fn len(self) -> usize {
        ENTRIES.len()
    }

    pub fn is_empty(self) -> bool {
        ENTRIES.is_empty()
    }
}

/// Reason phrase lookup through the shared table
pub fn status_text(code: u16) -> Option<&'static str> {
    StatusTextTable.get(code)
}
