use std::collections::HashMap;

use bytes::buf::Reader;
use bytes::{Buf, BytesMut};

/// What a transaction has received so far.
///
/// Filled in by the transaction as it advances; the callback only reads it.
/// Once the head is parsed the buffer holds just the body bytes.
#[derive(Debug, Default)]
pub struct Response {
    status_code: u32,
    status_message: String,
    headers: HashMap<String, String>,
    buf: BytesMut,
}

impl Response {
    /// Zero until a status line has been parsed.
    pub fn status_code(&self) -> u32 {
        self.status_code
    }

    /// The text after the status code, as received (normally with a leading space).
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Header value exactly as received, leading whitespace included.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.as_str())
    }

    /// Unread bytes; the body once the transaction has succeeded.
    pub fn body(&self) -> &[u8] {
        &self.buf
    }

    pub fn reader(&self) -> Reader<&[u8]> {
        self.body().reader()
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    pub(crate) fn set_status(&mut self, code: u32, message: String) {
        self.status_code = code;
        self.status_message = message;
    }

    /// Last write wins on duplicate names.
    pub(crate) fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }
}
