//! Static file server.
//!
//! [`ServerCore`] binds the listening socket, starts an [`Acceptor`] on a
//! [`Reactor`] pool and tears both down on [`ServerCore::stop`]. Each accepted
//! socket is served by its own [`Connection`](crate::http::connection::Connection).

pub mod acceptor;
pub mod static_files;

use std::io;
use std::net::SocketAddr;

use tracing::info;

use crate::config::ServerConfig;
use crate::reactor::Reactor;

pub use acceptor::{Acceptor, StopHandle};
pub use static_files::StaticRoot;

#[derive(Default)]
pub struct ServerCore {
    reactor: Option<Reactor>,
    stop: Option<StopHandle>,
    local_addr: Option<SocketAddr>,
}

impl ServerCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds and starts listening, arms the acceptor, then starts the worker pool.
    ///
    /// Returns the bound address, which differs from the configured one when
    /// port 0 is requested.
    pub fn start(&mut self, config: &ServerConfig) -> io::Result<SocketAddr> {
        if self.reactor.is_some() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "server is already running",
            ));
        }

        let listener = std::net::TcpListener::bind(&config.listen_addr)?;
        let acceptor = Acceptor::new(listener, StaticRoot::new(config.static_root.clone()))?;
        let local_addr = acceptor.local_addr()?;
        let stop = acceptor.stop_handle();

        let reactor = Reactor::new(config.workers)?;
        reactor.handle().spawn(acceptor.run());

        info!(
            addr = %local_addr,
            workers = reactor.workers(),
            root = %config.static_root.display(),
            "Server started"
        );

        self.reactor = Some(reactor);
        self.stop = Some(stop);
        self.local_addr = Some(local_addr);

        Ok(local_addr)
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.reactor.is_some()
    }

    /// Stops accepting, stops dispatch and joins the workers. Idempotent.
    ///
    /// In-flight connections are abandoned. Must not be called from a worker thread.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.stop();
        }

        if let Some(reactor) = self.reactor.take() {
            reactor.stop();
            info!("Server stopped");
        }
    }
}
