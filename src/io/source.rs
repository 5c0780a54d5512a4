use std::path::Path;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, info};

use super::error::SourceError;

/// Blocking producer of raw record payloads
#[async_trait]
pub trait RecordSource: Send {
    /// Wait for the next record
    async fn read_next(&mut self) -> Result<Vec<u8>, SourceError>;

    /// Release the underlying connection; later reads fail with `Closed`
    async fn close(&mut self) -> Result<(), SourceError>;
}

/// Newline-delimited records from any async reader (file, socket, stdin)
pub struct LineSource {
    reader: Option<Box<dyn AsyncBufRead + Send + Unpin>>,
    description: String,
}

impl LineSource {
    /// Wrap an arbitrary reader
    pub fn new<R>(reader: R, description: impl Into<String>) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self {
            reader: Some(Box::new(BufReader::new(reader))),
            description: description.into(),
        }
    }

    /// Read records from a file
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).await.map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Opened record source");
        Ok(Self::new(file, path.display().to_string()))
    }

    /// Read records from a TCP peer
    pub async fn connect(addr: &str) -> Result<Self, SourceError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| SourceError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        info!(addr, "Connected to record source");
        Ok(Self::new(stream, addr))
    }

    /// Read records from standard input
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin(), "stdin")
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[async_trait]
impl RecordSource for LineSource {
    async fn read_next(&mut self) -> Result<Vec<u8>, SourceError> {
        let reader = self.reader.as_mut().ok_or(SourceError::Closed)?;

        loop {
            let mut line = Vec::new();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                return Err(SourceError::EndOfStream);
            }

            while matches!(line.last(), Some(b'\n' | b'\r')) {
                line.pop();
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            return Ok(line);
        }
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        if self.reader.take().is_some() {
            debug!(source = %self.description, "Record source closed");
        }
        Ok(())
    }
}
