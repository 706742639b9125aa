use std::collections::HashMap;

/// The accepted request line of a server connection.
///
/// Only GET is served, so the method is implied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Requested resource, as sent (e.g. "/index.html").
    pub path: String,
    pub version: String,
}

/// Request line plus the parsed header map.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub line: RequestLine,
    /// Header name to raw value; the last duplicate wins.
    pub headers: HashMap<String, String>,
}

impl RequestHead {
    pub fn new(line: RequestLine, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            line,
            headers: headers.into_iter().collect(),
        }
    }

    pub fn path(&self) -> &str {
        &self.line.path
    }

    /// Looks up a header value exactly as it was received.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}
