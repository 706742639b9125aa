use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::http::connection::Connection;
use crate::server::static_files::StaticRoot;

/// Records a stop request for an [`Acceptor`].
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Idempotent. Takes effect when the pending accept completes; active
    /// connections are left alone.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Accepts connections one at a time and hands each to a fresh [`Connection`].
pub struct Acceptor {
    listener: std::net::TcpListener,
    root: Arc<StaticRoot>,
    stop: StopHandle,
}

impl Acceptor {
    /// Wraps an already listening socket.
    pub fn new(listener: std::net::TcpListener, root: StaticRoot) -> std::io::Result<Self> {
        listener.set_nonblocking(true)?;
        Ok(Self {
            listener,
            root: Arc::new(root),
            stop: StopHandle::default(),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Accept loop. Must run inside the reactor.
    pub async fn run(self) {
        let Acceptor {
            listener,
            root,
            stop,
        } = self;

        let listener = match TcpListener::from_std(listener) {
            Ok(listener) => listener,
            Err(e) => {
                error!(error = %e, "Failed to register listening socket");
                return;
            }
        };

        if let Ok(addr) = listener.local_addr() {
            info!("Listening on {}", addr);
        }

        loop {
            match listener.accept().await {
                Ok((socket, peer)) => {
                    debug!("Accepted connection from {}", peer);
                    tokio::spawn(Connection::new(socket, peer, Arc::clone(&root)).run());
                }
                Err(e) => {
                    error!(error = %e, "Accept failed");
                }
            }

            if stop.is_stopped() {
                break;
            }
        }

        drop(listener);
        info!("Acceptor stopped");
    }
}
