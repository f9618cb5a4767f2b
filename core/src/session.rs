//! # Session Driver
//!
//! A session configures exactly one target:
//! 1. render the command sequence (nothing is opened if this fails),
//! 2. connect to the target's console,
//! 3. write the optional wake line and every command, in order,
//! 4. flush and close.
//!
//! Responses are never read. A console that rejects a command looks exactly
//! like one that accepted it.
//!
//! Steps 2-4 share one deadline. Every failure is folded into the returned
//! [`SessionResult`] so sibling sessions are never affected.

use std::sync::Arc;
use std::time::{Duration, Instant};

use confpush_common::config::SessionConfig;
use confpush_common::network::endpoint::Endpoint;
use confpush_common::network::target::{Group, Target};
use confpush_common::{debug, error, info, success};
use confpush_protocols::telnet::{self, Frame, LineWriter};
use tokio::time::timeout;
use tracing::{Instrument, info_span};

use crate::error::SessionError;
use crate::network::Connector;
use crate::render;

/// Outcome of one session.
#[derive(Debug)]
pub struct SessionResult {
    pub target: String,
    pub group: Group,
    pub endpoint: Endpoint,
    pub outcome: Result<(), SessionError>,
    /// Commands flushed to the connection, not counting the wake line.
    pub commands_sent: usize,
    pub started_at: Instant,
    pub finished_at: Instant,
}

impl SessionResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.outcome.as_ref().err()
    }

    pub fn elapsed(&self) -> Duration {
        self.finished_at.saturating_duration_since(self.started_at)
    }

    /// A result for a session whose task never reported back.
    pub(crate) fn aborted(target: &Target, started_at: Instant, reason: String) -> Self {
        Self {
            target: target.name.clone(),
            group: target.group(),
            endpoint: target.endpoint.clone(),
            outcome: Err(SessionError::Aborted(reason)),
            commands_sent: 0,
            started_at,
            finished_at: Instant::now(),
        }
    }
}

pub struct SessionDriver<C> {
    connector: Arc<C>,
    config: SessionConfig,
}

impl<C> Clone for SessionDriver<C> {
    fn clone(&self) -> Self {
        Self {
            connector: Arc::clone(&self.connector),
            config: self.config,
        }
    }
}

impl<C: Connector> SessionDriver<C> {
    pub fn new(connector: C, config: SessionConfig) -> Self {
        Self {
            connector: Arc::new(connector),
            config,
        }
    }

    /// Configures `target`. Never fails; errors are part of the result.
    pub async fn run(&self, target: &Target) -> SessionResult {
        let span = info_span!("session", device = %target.name, group = %target.group());
        let started_at = Instant::now();

        let (outcome, commands_sent) = self.deliver(target).instrument(span).await;

        SessionResult {
            target: target.name.clone(),
            group: target.group(),
            endpoint: target.endpoint.clone(),
            outcome,
            commands_sent,
            started_at,
            finished_at: Instant::now(),
        }
    }

    async fn deliver(&self, target: &Target) -> (Result<(), SessionError>, usize) {
        let frames = match encode(target) {
            Ok(frames) => frames,
            Err(err) => {
                error!("{}: {err}", target.name);
                return (Err(err), 0);
            }
        };

        let mut sent = 0;
        let outcome = match timeout(
            self.config.timeout,
            self.push(&target.endpoint, &frames, &mut sent),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_elapsed) => Err(SessionError::Timeout(self.config.timeout)),
        };

        match &outcome {
            Ok(()) => success!("Finished configuration on {}", target.name),
            Err(err) => error!("{}: {err}", target.name),
        }
        (outcome, sent)
    }

    async fn push(
        &self,
        endpoint: &Endpoint,
        frames: &[Frame],
        sent: &mut usize,
    ) -> Result<(), SessionError> {
        let stream = self
            .connector
            .connect(endpoint)
            .await
            .map_err(|source| SessionError::Connection {
                endpoint: endpoint.clone(),
                source,
            })?;
        info!("Connected to {endpoint}");

        let mut writer = LineWriter::new(stream);
        if self.config.wake {
            writer
                .send(&Frame::wake())
                .await
                .map_err(|source| SessionError::Write { sent: 0, source })?;
        }

        for frame in frames {
            writer
                .send(frame)
                .await
                .map_err(|source| SessionError::Write { sent: *sent, source })?;
            *sent += 1;
            debug!("Sent {:?}", frame.line());
        }

        let total = *sent;
        writer
            .finish()
            .await
            .map_err(|source| SessionError::Write { sent: total, source })?;
        debug!("Flushed {total} command(s) to {endpoint}");
        Ok(())
    }
}

fn encode(target: &Target) -> Result<Vec<Frame>, SessionError> {
    let commands = render::render(target)?;
    let frames = commands
        .iter()
        .map(|command| telnet::encode_line(command))
        .collect::<Result<Vec<Frame>, _>>()?;
    Ok(frames)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
