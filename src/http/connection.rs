use std::net::{Shutdown, SocketAddr};
use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::http::parser::{find_head_end, find_line_end, parse_header_block, parse_request_line};
use crate::http::reader::{ReadError, read_until};
use crate::http::request::{RequestHead, RequestLine};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::server::static_files::StaticRoot;

/// Most bytes buffered while waiting for the request line or header block.
pub const REQUEST_BUFFER_LIMIT: usize = 4096;

/// One accepted socket serving exactly one request.
///
/// The connection owns its socket and buffers; [`Connection::run`] consumes it
/// and everything is released when the response has been written.
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    buffer: BytesMut,
    root: Arc<StaticRoot>,
}

enum ConnectionState {
    AwaitRequestLine,
    AwaitHeaders(RequestLine),
    Processing(RequestHead),
    Sending(Response),
    Finished,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, root: Arc<StaticRoot>) -> Self {
        Self {
            stream,
            peer,
            buffer: BytesMut::with_capacity(REQUEST_BUFFER_LIMIT),
            root,
        }
    }

    pub async fn run(self) {
        let Connection {
            mut stream,
            peer,
            mut buffer,
            root,
        } = self;

        let mut state = ConnectionState::AwaitRequestLine;

        loop {
            state = match state {
                ConnectionState::AwaitRequestLine => {
                    read_request_line(&mut stream, &mut buffer, peer).await
                }

                ConnectionState::AwaitHeaders(line) => {
                    read_headers(&mut stream, &mut buffer, peer, line).await
                }

                ConnectionState::Processing(head) => {
                    ConnectionState::Sending(process(&root, &head, peer).await)
                }

                ConnectionState::Sending(response) => {
                    send_response(stream, response, peer).await;
                    break;
                }

                ConnectionState::Finished => break,
            }
        }

        debug!(%peer, "Connection finished");
    }
}

async fn read_request_line(
    stream: &mut TcpStream,
    buffer: &mut BytesMut,
    peer: SocketAddr,
) -> ConnectionState {
    let end = match read_until(stream, buffer, find_line_end, REQUEST_BUFFER_LIMIT).await {
        Ok(end) => end,
        Err(e) => return on_read_error(e, peer),
    };

    let raw = buffer.split_to(end);
    let line = String::from_utf8_lossy(&raw[..end - 2]);

    match parse_request_line(&line) {
        Ok(line) => {
            debug!(%peer, path = %line.path, "Request line received");
            ConnectionState::AwaitHeaders(line)
        }
        Err(e) => reject(e, peer),
    }
}

async fn read_headers(
    stream: &mut TcpStream,
    buffer: &mut BytesMut,
    peer: SocketAddr,
    line: RequestLine,
) -> ConnectionState {
    let end = match read_until(stream, buffer, find_head_end, REQUEST_BUFFER_LIMIT).await {
        Ok(end) => end,
        Err(e) => return on_read_error(e, peer),
    };

    let block = buffer.split_to(end);
    let headers = parse_header_block(&String::from_utf8_lossy(&block));

    ConnectionState::Processing(RequestHead::new(line, headers))
}

async fn process(root: &StaticRoot, head: &RequestHead, peer: SocketAddr) -> Response {
    match root.load(head.path()).await {
        Ok(body) => {
            debug!(%peer, path = head.path(), size = body.len(), "Resource loaded");
            Response::ok(body)
        }
        Err(e) => {
            debug!(%peer, path = head.path(), error = %e, "Resource unavailable");
            error_response(&e)
        }
    }
}

async fn send_response(stream: TcpStream, response: Response, peer: SocketAddr) {
    let status = response.status.as_u16();

    let mut stream = match shutdown_receive(stream) {
        Ok(stream) => stream,
        Err(e) => {
            warn!(%peer, error = %e, "Failed to prepare socket for response");
            return;
        }
    };

    let writer = ResponseWriter::new(&response);
    match writer.write_to_stream(&mut stream).await {
        Ok(bytes) => info!(%peer, status, bytes, "Response sent"),
        Err(e) => warn!(%peer, status, error = %e, "Failed to send response"),
    }

    if let Err(e) = stream.shutdown().await {
        debug!(%peer, error = %e, "Socket shutdown failed");
    }
}

/// Half-closes the receive side; the request buffer is never read again.
fn shutdown_receive(stream: TcpStream) -> std::io::Result<TcpStream> {
    let stream = stream.into_std()?;
    if let Err(e) = stream.shutdown(Shutdown::Read) {
        debug!(error = %e, "Receive shutdown failed");
    }
    TcpStream::from_std(stream)
}

fn on_read_error(e: ReadError, peer: SocketAddr) -> ConnectionState {
    match e {
        ReadError::Overflow(_) => reject(Error::RequestTooLarge, peer),
        other => {
            debug!(%peer, error = %other, "Connection aborted while reading request");
            ConnectionState::Finished
        }
    }
}

fn reject(e: Error, peer: SocketAddr) -> ConnectionState {
    info!(%peer, error = %e, "Rejecting request");
    ConnectionState::Sending(error_response(&e))
}

fn error_response(e: &Error) -> Response {
    Response::new(e.status().unwrap_or(StatusCode::ServerError))
}
