//! Per-session failures. Every variant ends up inside a
//! [`SessionResult`](crate::session::SessionResult); none of them escape a
//! session driver.

use std::io;
use std::time::Duration;

use confpush_common::error::RenderError;
use confpush_common::network::endpoint::Endpoint;
use confpush_protocols::telnet::LineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("cannot connect to {endpoint}: {source}")]
    Connection {
        endpoint: Endpoint,
        #[source]
        source: io::Error,
    },

    #[error("write failed after {sent} command(s): {source}")]
    Write {
        sent: usize,
        #[source]
        source: io::Error,
    },

    #[error("invalid command: {0}")]
    InvalidCommand(#[from] LineError),

    #[error("session did not finish within {0:?}")]
    Timeout(Duration),

    /// The session task ended without producing a result (panicked or was cancelled).
    #[error("session task aborted: {0}")]
    Aborted(String),
}

impl SessionError {
    /// Stable label for summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::Render(err) => err.kind(),
            SessionError::Connection { .. } => "ConnectionError",
            SessionError::Write { .. } => "WriteError",
            SessionError::InvalidCommand(_) => "InvalidCommand",
            SessionError::Timeout(_) => "Timeout",
            SessionError::Aborted(_) => "Aborted",
        }
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
