use courier::Error;
use courier::http::response::{Response, StatusCode};
use courier::http::writer::ResponseWriter;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::RequestEntityTooLarge.as_u16(), 413);
    assert_eq!(StatusCode::ServerError.as_u16(), 500);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    assert_eq!(StatusCode::HttpVersionNotSupported.as_u16(), 505);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::RequestEntityTooLarge.reason_phrase(),
        "Request Entity Too Large"
    );
    assert_eq!(StatusCode::ServerError.reason_phrase(), "Server Error");
    assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
    assert_eq!(
        StatusCode::HttpVersionNotSupported.reason_phrase(),
        "HTTP Version Not Supported"
    );
}

#[test]
fn test_response_ok_sets_content_length() {
    let response = Response::ok(b"Hello, World!".to_vec());

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(
        response.headers,
        vec![("content-length".to_string(), "13".to_string())]
    );
}

#[test]
fn test_response_new_has_no_headers() {
    let response = Response::new(StatusCode::NotFound);

    assert!(response.headers.is_empty());
    assert!(response.body.is_empty());
}

async fn serialize(response: &Response) -> (Vec<u8>, usize) {
    let mut out = Vec::new();
    let written = ResponseWriter::new(response)
        .write_to_stream(&mut out)
        .await
        .unwrap();
    (out, written)
}

#[tokio::test]
async fn test_writer_serializes_in_order() {
    let response = Response::new(StatusCode::Ok)
        .with_header("content-length", "4")
        .with_header("x-extra", "1")
        .with_body("body");

    let (bytes, _) = serialize(&response).await;

    assert_eq!(
        bytes,
        b"HTTP/1.1 200 OK\r\ncontent-length: 4\r\nx-extra: 1\r\n\r\nbody"
    );
}

#[tokio::test]
async fn test_writer_reports_bytes_written() {
    let (bytes, written) = serialize(&Response::new(StatusCode::NotImplemented)).await;

    assert_eq!(bytes, b"HTTP/1.1 501 Not Implemented\r\n\r\n");
    assert_eq!(written, bytes.len());
}

#[test]
fn test_error_status_mapping() {
    assert_eq!(Error::ResourceNotFound.status(), Some(StatusCode::NotFound));
    assert_eq!(
        Error::ResourceUnreadable(std::io::ErrorKind::PermissionDenied.into()).status(),
        Some(StatusCode::ServerError)
    );
    assert_eq!(
        Error::UnsupportedMethod("POST".into()).status(),
        Some(StatusCode::NotImplemented)
    );
    assert_eq!(
        Error::UnsupportedVersion("HTTP/1.0".into()).status(),
        Some(StatusCode::HttpVersionNotSupported)
    );
    assert_eq!(
        Error::RequestTooLarge.status(),
        Some(StatusCode::RequestEntityTooLarge)
    );
    assert_eq!(Error::Canceled.status(), None);
}

#[test]
fn test_error_messages() {
    assert_eq!(Error::Canceled.to_string(), "operation aborted");
    assert!(
        Error::Protocol("invalid status code \"abc\"".into())
            .to_string()
            .starts_with("server response cannot be parsed")
    );
}
