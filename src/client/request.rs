use crate::client::cancel::CancelToken;
use crate::client::response::Response;
use crate::client::transaction::Transaction;
use crate::error::{Error, Result};
use crate::reactor::ReactorHandle;

pub const DEFAULT_PORT: u16 = 80;

/// Completion callback, invoked exactly once per executed request.
pub type Callback = Box<dyn FnOnce(&Request, &Response, Result<()>) + Send + 'static>;

/// A single GET request, configured through setters and then executed.
pub struct Request {
    id: u32,
    host: String,
    port: u16,
    uri: String,
    pub(crate) callback: Option<Callback>,
    pub(crate) token: CancelToken,
    reactor: ReactorHandle,
}

impl Request {
    pub(crate) fn new(reactor: ReactorHandle, id: u32) -> Self {
        Self {
            id,
            host: String::new(),
            port: DEFAULT_PORT,
            uri: String::new(),
            callback: None,
            token: CancelToken::new(),
            reactor,
        }
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnOnce(&Request, &Response, Result<()>) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Cancels ahead of time; `execute` will then finish with [`Error::Canceled`]
    /// without doing any I/O.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The bytes written to the server.
    pub fn to_wire(&self) -> String {
        format!("GET {} HTTP/1.1\r\nHost: {}\r\n\r\n", self.uri, self.host)
    }

    /// Starts the transaction on the client's reactor.
    ///
    /// # Panics
    ///
    /// If host, uri or callback were never set, or the port is 0.
    pub fn execute(self) -> RequestHandle {
        assert!(self.port > 0, "request {}: port must be non-zero", self.id);
        assert!(!self.host.is_empty(), "request {}: host must be set", self.id);
        assert!(!self.uri.is_empty(), "request {}: uri must be set", self.id);
        assert!(self.callback.is_some(), "request {}: callback must be set", self.id);

        let handle = RequestHandle {
            id: self.id,
            token: self.token.clone(),
        };

        let reactor = self.reactor.clone();
        let mut transaction = Transaction::new(self);

        if handle.is_canceled() {
            transaction.finish(Err(Error::Canceled));
        } else {
            reactor.spawn(transaction.run());
        }

        handle
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("id", &self.id)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("uri", &self.uri)
            .field("canceled", &self.token.is_canceled())
            .finish()
    }
}

/// Returned by [`Request::execute`]; used to cancel the running transaction.
#[derive(Debug, Clone)]
pub struct RequestHandle {
    id: u32,
    token: CancelToken,
}

impl RequestHandle {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Best effort: the step in progress is aborted if it has not completed yet,
    /// and no further step is started.
    pub fn cancel(&self) {
        tracing::debug!(id = self.id, "Cancel requested");
        self.token.cancel();
    }

    pub fn is_canceled(&self) -> bool {
        self.token.is_canceled()
    }
}
