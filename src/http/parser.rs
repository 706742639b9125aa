use crate::error::{Error, Result};
use crate::http::request::RequestLine;

/// The only method the server serves.
pub const METHOD_GET: &str = "GET";

/// The only protocol version either side speaks.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Parsed response status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: u32,
    /// Everything after the status code token, verbatim.
    pub message: String,
}

/// End offset (exclusive) of the first CRLF-terminated line in `buf`.
pub fn find_line_end(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n").map(|pos| pos + 2)
}

/// End offset (exclusive) of a header block terminated by an empty line.
///
/// A block with no header lines is just the terminating CRLF.
pub fn find_head_end(buf: &[u8]) -> Option<usize> {
    if buf.starts_with(b"\r\n") {
        return Some(2);
    }

    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

/// Parses `HTTP-version SP status-code SP reason` (without the trailing CRLF).
pub fn parse_status_line(line: &str) -> Result<StatusLine> {
    let (version, rest) = next_token(line);
    if version != HTTP_VERSION {
        return Err(Error::Protocol(format!("unexpected HTTP version {version:?}")));
    }

    let (code, message) = next_token(rest);
    let code = code
        .parse::<u32>()
        .map_err(|_| Error::Protocol(format!("invalid status code {code:?}")))?;

    Ok(StatusLine {
        code,
        message: message.to_string(),
    })
}

/// Parses `method SP resource SP HTTP-version` (without the trailing CRLF).
///
/// The method is checked before the version, so a non-GET request on an
/// unsupported version reports the method.
pub fn parse_request_line(line: &str) -> Result<RequestLine> {
    let mut parts = line.split_whitespace();

    let method = parts.next().unwrap_or_default();
    if method != METHOD_GET {
        return Err(Error::UnsupportedMethod(method.to_string()));
    }

    let path = parts.next().unwrap_or_default();

    let version = parts.next().unwrap_or_default();
    if version != HTTP_VERSION {
        return Err(Error::UnsupportedVersion(version.to_string()));
    }

    Ok(RequestLine {
        path: path.to_string(),
        version: version.to_string(),
    })
}

/// Splits a header block into `(name, value)` pairs in wire order.
///
/// Each line is split at its first colon; the value keeps everything after the
/// colon untouched, leading whitespace included. Lines without a colon are
/// skipped and the first empty line ends the block.
pub fn parse_header_block(block: &str) -> Vec<(String, String)> {
    let mut headers = Vec::new();

    for line in block.split("\r\n") {
        if line.is_empty() {
            break;
        }

        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.to_string(), value.to_string()));
        }
    }

    headers
}

/// Skips leading whitespace and splits off the next whitespace-delimited token.
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => s.split_at(end),
        None => (s, ""),
    }
}
