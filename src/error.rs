//! Error taxonomy shared by the client and server state machines.

use std::io;

use thiserror::Error;

use crate::http::response::StatusCode;

/// Every outcome a transaction or connection can finish with, other than success.
#[derive(Debug, Error)]
pub enum Error {
    /// The host name could not be resolved to any address.
    #[error("failed to resolve host name: {0}")]
    NameResolution(#[source] io::Error),

    /// No resolved address accepted the TCP handshake.
    #[error("failed to connect: {0}")]
    Connection(#[source] io::Error),

    /// A read or write failed at the transport level.
    #[error("transport failure: {0}")]
    Transport(#[source] io::Error),

    /// The peer sent something that is not a parseable HTTP/1.1 message head.
    #[error("server response cannot be parsed: {0}")]
    Protocol(String),

    /// The caller canceled the transaction.
    #[error("operation aborted")]
    Canceled,

    #[error("resource not found")]
    ResourceNotFound,

    #[error("resource cannot be read: {0}")]
    ResourceUnreadable(#[source] io::Error),

    #[error("method {0:?} is not implemented")]
    UnsupportedMethod(String),

    #[error("HTTP version {0:?} is not supported")]
    UnsupportedVersion(String),

    #[error("request head exceeds the read buffer")]
    RequestTooLarge,
}

impl Error {
    pub fn is_canceled(&self) -> bool {
        matches!(self, Error::Canceled)
    }

    /// Status code a server answers with for this error, if any.
    ///
    /// Client-side failures have no response mapping and return `None`.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ResourceNotFound => Some(StatusCode::NotFound),
            Error::ResourceUnreadable(_) => Some(StatusCode::ServerError),
            Error::UnsupportedMethod(_) => Some(StatusCode::NotImplemented),
            Error::UnsupportedVersion(_) => Some(StatusCode::HttpVersionNotSupported),
            Error::RequestTooLarge => Some(StatusCode::RequestEntityTooLarge),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
