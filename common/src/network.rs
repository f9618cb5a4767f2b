//! # Network Data Model
//!
//! * [`target::Target`]: one router or host to configure, grouped by [`target::Group`].
//! * [`interface::Interface`]: a named interface with its address and mask.
//! * [`endpoint::Endpoint`]: the console a session connects to.

pub mod endpoint;
pub mod interface;
pub mod target;
