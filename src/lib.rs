//! Courier - minimal asynchronous HTTP/1.1 transaction engine
//!
//! A GET client and a static file server, both driven by explicit state
//! machines on a shared [`reactor::Reactor`] thread pool.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod reactor;
pub mod server;

pub use error::{Error, Result};
