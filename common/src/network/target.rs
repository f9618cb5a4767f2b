//! # Configuration Target Model
//!
//! A target is one device to configure. It is either:
//! * A **router**, owning an ordered list of interfaces.
//! * A **host**, owning exactly one interface plus the gateway of its default route.
//!
//! The gateway address is copied from a router interface when the registry is
//! built; the target never refers back to the router at runtime.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::network::endpoint::Endpoint;
use crate::network::interface::Interface;

/// The kind of a target. Routers are always configured before hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Group {
    Router,
    Host,
}

impl Group {
    /// Every group, in the order they are configured.
    pub const ALL: [Group; 2] = [Group::Router, Group::Host];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Router => "router",
            Group::Host => "host",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Group::Router => "routers",
            Group::Host => "hosts",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Group {
    type Err = String;

    /// Accepts "router"/"routers" and "host"/"hosts" (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "router" | "routers" => Ok(Group::Router),
            "host" | "hosts" => Ok(Group::Host),
            _ => Err(format!("unknown target group: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    Router {
        interfaces: Vec<Interface>,
    },
    Host {
        interface: Interface,
        default_route: Option<Ipv4Addr>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub endpoint: Endpoint,
    pub kind: TargetKind,
}

impl Target {
    pub fn router(name: impl Into<String>, endpoint: Endpoint, interfaces: Vec<Interface>) -> Self {
        Self {
            name: name.into(),
            endpoint,
            kind: TargetKind::Router { interfaces },
        }
    }

    pub fn host(
        name: impl Into<String>,
        endpoint: Endpoint,
        interface: Interface,
        default_route: Option<Ipv4Addr>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint,
            kind: TargetKind::Host {
                interface,
                default_route,
            },
        }
    }

    pub fn group(&self) -> Group {
        match self.kind {
            TargetKind::Router { .. } => Group::Router,
            TargetKind::Host { .. } => Group::Host,
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
