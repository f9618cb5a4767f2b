//! # Telnet Line Framing
//!
//! Console sessions are treated as a reliable ordered byte stream carrying
//! ASCII lines terminated by CR LF. Nothing here reads from the stream and no
//! option negotiation is started.
//!
//! Commands are encoded into [`Frame`]s up front, so a command that cannot be
//! sent as a single line is rejected before any byte reaches the wire.

use std::borrow::Cow;
use std::io;

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::trace;

pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';
pub const CRLF: &[u8] = b"\r\n";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("command {0:?} contains a line break")]
    EmbeddedNewline(String),

    #[error("command {0:?} is not plain ASCII")]
    NonAscii(String),
}

/// One encoded line, terminator included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Vec<u8>);

impl Frame {
    /// A bare CR LF. Consoles answer it with a fresh prompt.
    pub fn wake() -> Self {
        Frame(CRLF.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The command text without its terminator.
    pub fn line(&self) -> Cow<'_, str> {
        let body = self.0.strip_suffix(CRLF).unwrap_or(&self.0[..]);
        String::from_utf8_lossy(body)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Encodes `command` as one CR LF terminated line.
pub fn encode_line(command: &str) -> Result<Frame, LineError> {
    if !command.is_ascii() {
        return Err(LineError::NonAscii(command.to_string()));
    }
    if command.bytes().any(|b| b == CR || b == LF) {
        return Err(LineError::EmbeddedNewline(command.to_string()));
    }

    let mut bytes = Vec::with_capacity(command.len() + CRLF.len());
    bytes.extend_from_slice(command.as_bytes());
    bytes.extend_from_slice(CRLF);
    Ok(Frame(bytes))
}

/// Single writer over one console connection. Every frame is flushed before
/// it counts as sent.
pub struct LineWriter<W> {
    inner: BufWriter<W>,
    frames: usize,
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    pub fn new(stream: W) -> Self {
        Self {
            inner: BufWriter::new(stream),
            frames: 0,
        }
    }

    pub async fn send(&mut self, frame: &Frame) -> io::Result<()> {
        self.inner.write_all(frame.as_bytes()).await?;
        self.inner.flush().await?;
        self.frames += 1;
        trace!("flushed {} bytes", frame.len());
        Ok(())
    }

    /// Frames that reached the connection so far.
    pub fn frames_sent(&self) -> usize {
        self.frames
    }

    /// Flushes everything buffered and closes the write half.
    pub async fn finish(mut self) -> io::Result<()> {
        self.inner.flush().await?;
        self.inner.shutdown().await
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
