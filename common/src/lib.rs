//! # Confpush Common
//!
//! Shared building blocks for the `confpush` workspace:
//!
//! * **[`network`]**: the data model (targets, interfaces, endpoints).
//! * **[`registry`]**: the read-only [`registry::Registry`] of every target in a run.
//! * **[`topology`]**: the built-in lab topology and the TOML topology loader.
//! * **[`config`]**: run-level knobs shared by the core and the CLI.
//! * **[`error`]**: error taxonomy for registry construction and rendering.
//!
//! Logging goes through the macros in [`log`], which forward to `tracing`.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod registry;
pub mod topology;

#[doc(hidden)]
pub use tracing;
