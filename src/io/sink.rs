use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::net::TcpListener;
use tracing::{debug, info};

use super::error::SinkError;

/// Destination the producer publishes raw records to
#[async_trait]
pub trait RecordSink: Send {
    /// Deliver one record; it is written as a single line
    async fn publish(&mut self, payload: &[u8]) -> Result<(), SinkError>;

    /// Flush and release the connection; later publishes fail with `Closed`
    async fn close(&mut self) -> Result<(), SinkError>;
}

/// Newline-delimited records to any async writer (socket, file, buffer)
pub struct LineSink {
    writer: Option<BufWriter<Box<dyn AsyncWrite + Send + Unpin>>>,
    description: String,
}

impl LineSink {
    pub fn new<W>(writer: W, description: impl Into<String>) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let writer: Box<dyn AsyncWrite + Send + Unpin> = Box::new(writer);
        Self {
            writer: Some(BufWriter::new(writer)),
            description: description.into(),
        }
    }

    /// Bind `addr` and wait for one consumer to connect
    pub async fn listen(addr: &str) -> Result<Self, SinkError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| SinkError::Listen {
                addr: addr.to_string(),
                source,
            })?;
        info!(addr, "Waiting for a consumer to connect");
        Self::accept(&listener).await
    }

    /// Take the next connection on an already bound listener
    pub async fn accept(listener: &TcpListener) -> Result<Self, SinkError> {
        let (stream, peer) = listener.accept().await?;
        info!(peer = %peer, "Consumer connected");
        Ok(Self::new(stream, peer.to_string()))
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[async_trait]
impl RecordSink for LineSink {
    async fn publish(&mut self, payload: &[u8]) -> Result<(), SinkError> {
        let writer = self.writer.as_mut().ok_or(SinkError::Closed)?;
        writer.write_all(payload).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SinkError> {
        if let Some(mut writer) = self.writer.take() {
            writer.shutdown().await?;
            debug!(sink = %self.description, "Record sink closed");
        }
        Ok(())
    }
}
