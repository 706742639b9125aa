use courier::Error;
use courier::http::parser::{
    find_head_end, parse_header_block, parse_request_line, parse_status_line,
};

#[test]
fn test_parse_status_line() {
    let status = parse_status_line("HTTP/1.1 200 OK").unwrap();

    assert_eq!(status.code, 200);
    assert_eq!(status.message, " OK");
}

#[test]
fn test_parse_status_line_rejects_http10() {
    let result = parse_status_line("HTTP/1.0 200 OK");

    assert!(matches!(result, Err(Error::Protocol(_))));
}

#[test]
fn test_parse_status_line_rejects_non_numeric_code() {
    let result = parse_status_line("HTTP/1.1 abc OK");

    assert!(matches!(result, Err(Error::Protocol(_))));
}

#[test]
fn test_parse_status_line_without_message() {
    let status = parse_status_line("HTTP/1.1 204").unwrap();

    assert_eq!(status.code, 204);
    assert_eq!(status.message, "");
}

#[test]
fn test_parse_header_keeps_leading_space() {
    let headers = parse_header_block("Content-Type: text/html\r\n\r\n");

    assert_eq!(
        headers,
        vec![("Content-Type".to_string(), " text/html".to_string())]
    );
}

#[test]
fn test_parse_header_block_round_trip() {
    let block = "Host: example.com\r\nContent-Type: text/html\r\nX-Empty:\r\nX-Time: 12:30\r\n";
    let headers = parse_header_block(&format!("{block}\r\n"));

    let rebuilt: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{value}\r\n"))
        .collect();

    assert_eq!(rebuilt, block);
}

#[test]
fn test_parse_header_splits_at_first_colon() {
    let headers = parse_header_block("Location: http://example.com:8080/\r\n\r\n");

    assert_eq!(headers[0].0, "Location");
    assert_eq!(headers[0].1, " http://example.com:8080/");
}

#[test]
fn test_parse_header_skips_lines_without_colon() {
    let headers = parse_header_block("BrokenHeader\r\nHost: x\r\n\r\n");

    assert_eq!(headers, vec![("Host".to_string(), " x".to_string())]);
}

#[test]
fn test_parse_header_stops_at_blank_line() {
    let headers = parse_header_block("A: 1\r\n\r\nB: 2\r\n");

    assert_eq!(headers.len(), 1);
}

#[test]
fn test_parse_empty_header_block() {
    assert!(parse_header_block("\r\n").is_empty());
    assert_eq!(find_head_end(b"\r\n"), Some(2));
}

#[test]
fn test_parse_request_line_get() {
    let line = parse_request_line("GET /index.html HTTP/1.1").unwrap();

    assert_eq!(line.path, "/index.html");
    assert_eq!(line.version, "HTTP/1.1");
}

#[test]
fn test_parse_request_line_rejects_post() {
    let result = parse_request_line("POST /x HTTP/1.1");

    assert!(matches!(result, Err(Error::UnsupportedMethod(m)) if m == "POST"));
}

#[test]
fn test_parse_request_line_rejects_http10() {
    let result = parse_request_line("GET /x HTTP/1.0");

    assert!(matches!(result, Err(Error::UnsupportedVersion(v)) if v == "HTTP/1.0"));
}

#[test]
fn test_parse_request_line_method_checked_first() {
    let result = parse_request_line("DELETE /x HTTP/2");

    assert!(matches!(result, Err(Error::UnsupportedMethod(_))));
}

#[test]
fn test_parse_request_line_method_is_case_sensitive() {
    let result = parse_request_line("get /x HTTP/1.1");

    assert!(matches!(result, Err(Error::UnsupportedMethod(m)) if m == "get"));
}

#[test]
fn test_parse_request_line_missing_version() {
    let result = parse_request_line("GET /x");

    assert!(matches!(result, Err(Error::UnsupportedVersion(v)) if v.is_empty()));
}

#[test]
fn test_parse_status_line_accepts_wide_codes() {
    let status = parse_status_line("HTTP/1.1 70000 Weird").unwrap();

    assert_eq!(status.code, 70000);
    assert_eq!(status.message, " Weird");
}
