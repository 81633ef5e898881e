//! Line-oriented TCP transport used to join a room.
//!
//! Lines are moved one byte at a time so a line boundary is found without
//! reading past it. Chat lines are short, so the extra syscalls do not matter.

use std::net::Ipv4Addr;

use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
};
use tracing::{debug, info, warn};

use crate::{
    error::{BunkerError, Result},
    resolver::Endpoint,
};

/// An owned connection to a room. Closing is idempotent and also happens
/// when the connection is dropped.
#[derive(Debug)]
pub struct Connection {
    stream: Option<TcpStream>,
    endpoint: Endpoint,
}

impl Connection {
    /// Connects to `endpoint`.
    ///
    /// An empty address does not fail: it connects to the unspecified IPv4
    /// address on the given port, which the OS routes to the local host.
    pub async fn connect(endpoint: &Endpoint) -> Result<Self> {
        debug!(%endpoint, "connecting socket");

        let connected = if endpoint.address.is_empty() {
            TcpStream::connect((Ipv4Addr::UNSPECIFIED, endpoint.port)).await
        } else {
            TcpStream::connect((endpoint.address.as_str(), endpoint.port)).await
        };

        let stream = connected.map_err(|source| BunkerError::Connect {
            endpoint: endpoint.to_string(),
            source,
        })?;

        info!(%endpoint, "connected socket");
        Ok(Self {
            stream: Some(stream),
            endpoint: endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    pub async fn send_line(&mut self, bytes: &[u8]) -> Result<usize> {
        let stream = self.stream.as_mut().ok_or(BunkerError::NotConnected)?;
        send_line(stream, bytes).await.map_err(BunkerError::Send)
    }

    pub async fn recv_line(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let stream = self.stream.as_mut().ok_or(BunkerError::NotConnected)?;
        recv_line(stream, buffer).await.map_err(BunkerError::Recv)
    }

    /// Shuts the socket down. Calling this on a closed connection does nothing.
    pub async fn close(&mut self) {
        let Some(mut stream) = self.stream.take() else {
            return;
        };

        debug!(endpoint = %self.endpoint, "closing socket");
        if let Err(error) = stream.shutdown().await {
            warn!(?error, "failed to shutdown socket cleanly");
        }
    }
}

/// Writes `bytes` one at a time until a newline or NUL byte has been written
/// or the input runs out. Returns the number of bytes written, including the
/// terminating newline or NUL.
pub async fn send_line<W>(writer: &mut W, bytes: &[u8]) -> std::io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut sent = 0;
    for &byte in bytes {
        if writer.write(&[byte]).await? == 0 {
            break;
        }
        sent += 1;

        if byte == b'\n' || byte == b'\0' {
            break;
        }
    }

    writer.flush().await?;
    Ok(sent)
}

/// Reads one byte at a time into `buffer` until a newline has been read or
/// the buffer is full. End of stream returns the bytes read so far.
pub async fn recv_line<R>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut received = 0;
    while received < buffer.len() {
        if reader.read(&mut buffer[received..=received]).await? == 0 {
            break;
        }
        received += 1;

        if buffer[received - 1] == b'\n' {
            break;
        }
    }

    Ok(received)
}
