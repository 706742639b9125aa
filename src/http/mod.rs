//! HTTP/1.1 wire handling shared by the client and the server.
//!
//! - **`parser`**: status line, request line and header block parsing
//! - **`reader`**: bounded delimiter reads over async sockets
//! - **`request`**: the server's view of an accepted request
//! - **`response`**: status table and server responses
//! - **`writer`**: scatter/gather response serialization
//! - **`connection`**: the per-socket server state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitRequestLine │ ← read up to CRLF (413 on overflow)
//!        └────────┬─────────┘
//!                 │ GET <path> HTTP/1.1   (501 / 505 otherwise)
//!                 ▼
//!        ┌──────────────────┐
//!        │   AwaitHeaders   │ ← read up to the blank line
//!        └────────┬─────────┘
//!                 ▼
//!        ┌──────────────────┐
//!        │    Processing    │ ← load the resource (404 / 500)
//!        └────────┬─────────┘
//!                 ▼
//!        ┌──────────────────┐
//!        │     Sending      │ ← half-close, write, shut down
//!        └────────┬─────────┘
//!                 ▼
//!             Finished
//! ```
//!
//! A read failure other than overflow ends the connection without a response.

pub mod connection;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
