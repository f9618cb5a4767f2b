//! # Confpush Core
//!
//! Everything between the registry and the wire:
//!
//! * **[`render`]**: pure command templates for routers and hosts.
//! * **[`session`]**: one console session per target, bounded by a timeout.
//! * **[`orchestrator`]**: fans sessions out per group, with a barrier between groups.
//! * **[`network`]**: the [`network::Connector`] seam and its TCP implementation.

pub mod error;
pub mod network;
pub mod orchestrator;
pub mod render;
pub mod report;
pub mod session;
