//! Asynchronous HTTP/1.1 GET client.
//!
//! A [`Client`] owns a [`Reactor`]; each [`Request`] it creates runs as a
//! transaction on that reactor:
//!
//! ```text
//!   Resolving → Connecting → Sending → ReadingStatusLine → ReadingHeaders → ReadingBody
//!        │           │           │              │                  │              │
//!        └───────────┴───────────┴──── error / cancel ─────────────┴──────────────┴──→ callback
//! ```
//!
//! Between steps the request's [`CancelToken`] is checked; the callback fires
//! exactly once with the outcome. The body is read until the server closes
//! the connection; `Content-Length` is not used for framing.
//!
//! # Example
//!
//! ```no_run
//! use courier::client::Client;
//!
//! let client = Client::new().unwrap();
//! let mut request = client.create_request(1);
//! request.set_host("localhost");
//! request.set_port(3333);
//! request.set_uri("/index.html");
//! request.set_callback(|req, resp, outcome| match outcome {
//!     Ok(()) => println!("#{} -> {}", req.id(), resp.status_code()),
//!     Err(e) => println!("#{} failed: {}", req.id(), e),
//! });
//! request.execute();
//! client.close();
//! ```

pub mod cancel;
pub mod request;
pub mod response;
mod transaction;

use std::io;

use crate::reactor::Reactor;

pub use cancel::CancelToken;
pub use request::{Callback, Request, RequestHandle};
pub use response::Response;
pub use transaction::MAX_HEAD_SIZE;

pub struct Client {
    reactor: Reactor,
}

impl Client {
    /// A client with a single worker thread.
    pub fn new() -> io::Result<Self> {
        Self::with_workers(1)
    }

    pub fn with_workers(workers: usize) -> io::Result<Self> {
        Ok(Self {
            reactor: Reactor::new(workers)?,
        })
    }

    pub fn create_request(&self, id: u32) -> Request {
        Request::new(self.reactor.handle(), id)
    }

    /// Number of executed requests whose callback has not run yet.
    pub fn pending(&self) -> usize {
        self.reactor.handle().pending()
    }

    /// Waits for every executed request to report, then joins the workers.
    ///
    /// Must not be called from inside a callback.
    pub fn close(self) {
        self.reactor.drain();
    }
}
