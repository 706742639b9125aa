use bytes::{Buf, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::parser::HTTP_VERSION;
use crate::http::response::Response;

/// A serialized response kept as three separate buffers.
///
/// The status line, header block and body are written with one
/// scatter/gather write instead of being copied into a single buffer.
pub struct ResponseWriter {
    status_line: Bytes,
    headers: Bytes,
    body: Bytes,
}

impl ResponseWriter {
    pub fn new(resp: &Response) -> Self {
        let status_line = format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            resp.status.as_u16(),
            resp.status.reason_phrase()
        );

        let mut headers = BytesMut::new();
        for (k, v) in &resp.headers {
            headers.extend_from_slice(k.as_bytes());
            headers.extend_from_slice(b": ");
            headers.extend_from_slice(v.as_bytes());
            headers.extend_from_slice(b"\r\n");
        }
        headers.extend_from_slice(b"\r\n");

        Self {
            status_line: Bytes::from(status_line),
            headers: headers.freeze(),
            body: resp.body.clone(),
        }
    }

    /// Writes every buffer to `stream`, returning the number of bytes sent.
    pub async fn write_to_stream<W>(&self, stream: &mut W) -> std::io::Result<usize>
    where
        W: AsyncWrite + Unpin,
    {
        let mut bufs = self
            .status_line
            .clone()
            .chain(self.headers.clone())
            .chain(self.body.clone());
        let total = bufs.remaining();

        stream.write_all_buf(&mut bufs).await?;
        stream.flush().await?;

        Ok(total)
    }
}
