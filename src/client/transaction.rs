use std::io;
use std::net::SocketAddr;

use bytes::BytesMut;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, info, trace, warn};

use crate::client::cancel::CancelToken;
use crate::client::request::{Callback, Request};
use crate::client::response::Response;
use crate::error::{Error, Result};
use crate::http::parser::{find_head_end, find_line_end, parse_header_block, parse_status_line};
use crate::http::reader::{ReadError, read_to_eof, read_until};

/// Upper bound on a buffered response status line or header block.
pub const MAX_HEAD_SIZE: usize = 64 * 1024;

/// Client transaction steps. Each variant owns what the step needs.
enum State {
    Resolving,
    Connecting(Vec<SocketAddr>),
    Sending(TcpStream),
    ReadingStatusLine(TcpStream),
    ReadingHeaders(TcpStream),
    ReadingBody(TcpStream),
    Finished,
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Resolving => "resolving",
            State::Connecting(_) => "connecting",
            State::Sending(_) => "sending",
            State::ReadingStatusLine(_) => "reading-status-line",
            State::ReadingHeaders(_) => "reading-headers",
            State::ReadingBody(_) => "reading-body",
            State::Finished => "finished",
        }
    }
}

/// Drives one [`Request`] from resolution to its callback.
///
/// The callback is taken out of the request up front and consumed by
/// [`Transaction::finish`]; a transaction dropped before finishing reports
/// [`Error::Canceled`].
pub(crate) struct Transaction {
    request: Request,
    response: Response,
    token: CancelToken,
    callback: Option<Callback>,
}

impl Transaction {
    pub(crate) fn new(mut request: Request) -> Self {
        let callback = request.callback.take();
        let token = request.token.clone();

        Self {
            request,
            response: Response::default(),
            token,
            callback,
        }
    }

    pub(crate) async fn run(mut self) {
        let mut state = State::Resolving;

        let outcome = loop {
            trace!(id = self.request.id(), state = state.name(), "Transaction step");

            match self.advance(state).await {
                Ok(State::Finished) => break Ok(()),
                Ok(next) => {
                    if let Err(e) = self.token.check() {
                        break Err(e);
                    }
                    state = next;
                }
                Err(e) => break Err(e),
            }
        };

        self.finish(outcome);
    }

    async fn advance(&mut self, state: State) -> Result<State> {
        let token = self.token.clone();
        let id = self.request.id();

        match state {
            State::Resolving => {
                let host = self.request.host().to_string();
                let port = self.request.port();
                let addrs = token.guard(resolve(host, port)).await?;
                debug!(id, addrs = addrs.len(), "Host name resolved");
                Ok(State::Connecting(addrs))
            }

            State::Connecting(addrs) => {
                let stream = token.guard(connect(addrs)).await?;
                debug!(id, "Connection established");
                Ok(State::Sending(stream))
            }

            State::Sending(mut stream) => {
                let wire = self.request.to_wire();
                token.guard(send_request(&mut stream, wire)).await?;
                Ok(State::ReadingStatusLine(stream))
            }

            State::ReadingStatusLine(mut stream) => {
                let buf = self.response.buffer_mut();
                let end = token.guard(read_head(&mut stream, buf, find_line_end)).await?;

                let line = buf.split_to(end);
                let status = parse_status_line(&String::from_utf8_lossy(&line[..end - 2]))?;
                debug!(id, status = status.code, "Status line received");

                self.response.set_status(status.code, status.message);
                Ok(State::ReadingHeaders(stream))
            }

            State::ReadingHeaders(mut stream) => {
                let buf = self.response.buffer_mut();
                let end = token.guard(read_head(&mut stream, buf, find_head_end)).await?;

                let block = buf.split_to(end);
                for (name, value) in parse_header_block(&String::from_utf8_lossy(&block)) {
                    self.response.add_header(name, value);
                }
                Ok(State::ReadingBody(stream))
            }

            State::ReadingBody(mut stream) => {
                let buf = self.response.buffer_mut();
                // Body length is framed by the peer closing the connection.
                token
                    .guard(async {
                        read_to_eof(&mut stream, buf)
                            .await
                            .map_err(Error::Transport)
                    })
                    .await?;
                Ok(State::Finished)
            }

            State::Finished => Ok(State::Finished),
        }
    }

    /// Delivers the outcome to the callback. Only the first call has any effect.
    pub(crate) fn finish(&mut self, outcome: Result<()>) {
        let Some(callback) = self.callback.take() else {
            return;
        };

        let id = self.request.id();
        match &outcome {
            Ok(()) => info!(
                id,
                status = self.response.status_code(),
                bytes = self.response.body().len(),
                "Request completed"
            ),
            Err(Error::Canceled) => info!(id, "Request canceled"),
            Err(e) => warn!(id, error = %e, "Request failed"),
        }

        callback(&self.request, &self.response, outcome);
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        self.finish(Err(Error::Canceled));
    }
}

async fn resolve(host: String, port: u16) -> Result<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), port))
        .await
        .map_err(Error::NameResolution)?
        .collect();

    if addrs.is_empty() {
        return Err(Error::NameResolution(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no addresses for {host}"),
        )));
    }

    Ok(addrs)
}

/// Tries each address in order; the last failure is reported if none connects.
async fn connect(addrs: Vec<SocketAddr>) -> Result<TcpStream> {
    let mut last_error = None;

    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                trace!(%addr, error = %e, "Connect attempt failed");
                last_error = Some(e);
            }
        }
    }

    Err(Error::Connection(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no address to connect to")
    })))
}

/// Writes the request and half-closes the send side.
async fn send_request(stream: &mut TcpStream, wire: String) -> Result<()> {
    stream
        .write_all(wire.as_bytes())
        .await
        .map_err(Error::Transport)?;
    stream.shutdown().await.map_err(Error::Transport)
}

async fn read_head(
    stream: &mut TcpStream,
    buf: &mut BytesMut,
    find: fn(&[u8]) -> Option<usize>,
) -> Result<usize> {
    read_until(stream, buf, find, MAX_HEAD_SIZE)
        .await
        .map_err(|e| match e {
            ReadError::Overflow(limit) => {
                Error::Protocol(format!("response head exceeds {limit} bytes"))
            }
            other => Error::Transport(other.into_io()),
        })
}
