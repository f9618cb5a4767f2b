//! # Console Transport
//!
//! Sessions never open sockets themselves; they ask a [`Connector`] for a
//! writable stream. [`tcp::TcpConnector`] is the real transport, tests plug in
//! in-memory or failing connectors.

use std::io;

use async_trait::async_trait;
use confpush_common::network::endpoint::Endpoint;
use tokio::io::AsyncWrite;

pub mod tcp;

#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Stream: AsyncWrite + Unpin + Send + 'static;

    /// Opens a fresh connection. Each call yields a stream owned by exactly one session.
    async fn connect(&self, endpoint: &Endpoint) -> io::Result<Self::Stream>;
}
