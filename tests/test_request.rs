use courier::http::request::{RequestHead, RequestLine};

fn line(path: &str) -> RequestLine {
    RequestLine {
        path: path.to_string(),
        version: "HTTP/1.1".to_string(),
    }
}

#[test]
fn test_request_header_retrieval() {
    let head = RequestHead::new(
        line("/"),
        vec![
            ("Host".to_string(), " example.com".to_string()),
            ("Accept".to_string(), " */*".to_string()),
        ],
    );

    assert_eq!(head.path(), "/");
    assert_eq!(head.header("Host"), Some(" example.com"));
    assert_eq!(head.header("Accept"), Some(" */*"));
    assert_eq!(head.header("Missing"), None);
}

#[test]
fn test_request_duplicate_header_last_wins() {
    let head = RequestHead::new(
        line("/"),
        vec![
            ("X-Id".to_string(), " 1".to_string()),
            ("X-Id".to_string(), " 2".to_string()),
        ],
    );

    assert_eq!(head.header("X-Id"), Some(" 2"));
}
