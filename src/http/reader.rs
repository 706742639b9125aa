use std::io;

use bytes::BytesMut;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("delimiter not found within {0} buffered bytes")]
    Overflow(usize),

    #[error("connection closed by peer")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ReadError {
    /// Folds the error into an `io::Error` for transport-level reporting.
    pub fn into_io(self) -> io::Error {
        match self {
            ReadError::Overflow(limit) => io::Error::new(
                io::ErrorKind::InvalidData,
                format!("delimiter not found within {limit} bytes"),
            ),
            ReadError::Closed => io::Error::from(io::ErrorKind::UnexpectedEof),
            ReadError::Io(e) => e,
        }
    }
}

/// Reads into `buf` until `find` locates a delimiter, returning its end offset.
///
/// Bytes already in `buf` are searched first. Reads never grow `buf` past
/// `limit`; if it fills up without a match the read fails with
/// [`ReadError::Overflow`]. Bytes past the delimiter stay in `buf`.
pub async fn read_until<R, F>(
    reader: &mut R,
    buf: &mut BytesMut,
    find: F,
    limit: usize,
) -> Result<usize, ReadError>
where
    R: AsyncRead + Unpin,
    F: Fn(&[u8]) -> Option<usize>,
{
    loop {
        if let Some(end) = find(&buf[..]) {
            return Ok(end);
        }

        if buf.len() >= limit {
            return Err(ReadError::Overflow(limit));
        }

        let room = (limit - buf.len()) as u64;
        let n = (&mut *reader).take(room).read_buf(buf).await?;

        if n == 0 {
            return Err(ReadError::Closed);
        }
    }
}

/// Reads until the peer closes the connection, appending everything to `buf`.
pub async fn read_to_eof<R>(reader: &mut R, buf: &mut BytesMut) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut total = 0;
    loop {
        let n = reader.read_buf(buf).await?;
        if n == 0 {
            return Ok(total);
        }
        total += n;
    }
}
