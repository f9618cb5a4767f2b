//! Error types for registry construction and command rendering.

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::network::target::Group;

/// An interface address/mask pair that cannot describe an IPv4 network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("{0} is not a contiguous netmask")]
    InvalidNetmask(Ipv4Addr),

    #[error("/{0} is not a valid IPv4 prefix length")]
    InvalidPrefix(u8),
}

/// Failures while building or querying the [`Registry`](crate::registry::Registry).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    #[error("{group} '{name}' is declared more than once")]
    DuplicateTarget { group: Group, name: String },

    /// A host names a gateway interface that no router declares.
    #[error("default route of '{host}' points at {router} {interface}, which is not in the registry")]
    UnresolvedDefaultRoute {
        host: String,
        router: String,
        interface: String,
    },

    #[error("interface {interface} of '{target}' is invalid: {source}")]
    InvalidInterface {
        target: String,
        interface: String,
        #[source]
        source: InterfaceError,
    },
}

/// Failures of the command template renderer. Rendering either yields the
/// whole sequence or one of these, never a partial sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("router '{0}' has no interfaces to configure")]
    EmptyInterfaceSet(String),

    #[error("host '{0}' has no default route")]
    MissingDefaultRoute(String),

    #[error("'{target}' cannot be rendered with the {expected} template")]
    GroupMismatch { target: String, expected: Group },
}

impl RenderError {
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::EmptyInterfaceSet(_) => "EmptyInterfaceSet",
            RenderError::MissingDefaultRoute(_) => "MissingDefaultRoute",
            RenderError::GroupMismatch { .. } => "GroupMismatch",
        }
    }
}
