//! # Interface Model
//!
//! An interface always carries both an address and a mask. Both are checked
//! when the interface is built, so nothing downstream has to re-validate them.

use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::InterfaceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    name: String,
    network: Ipv4Network,
}

impl Interface {
    /// Builds an interface from a dotted netmask (`255.255.255.252`), the form
    /// router CLIs expect.
    pub fn with_netmask(
        name: impl Into<String>,
        address: Ipv4Addr,
        netmask: Ipv4Addr,
    ) -> Result<Self, InterfaceError> {
        let network = Ipv4Network::with_netmask(address, netmask)
            .map_err(|_| InterfaceError::InvalidNetmask(netmask))?;

        Ok(Self {
            name: name.into(),
            network,
        })
    }

    /// Builds an interface from a prefix length (`/28`), the form `ip` expects.
    pub fn with_prefix(
        name: impl Into<String>,
        address: Ipv4Addr,
        prefix: u8,
    ) -> Result<Self, InterfaceError> {
        let network =
            Ipv4Network::new(address, prefix).map_err(|_| InterfaceError::InvalidPrefix(prefix))?;

        Ok(Self {
            name: name.into(),
            network,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The address assigned to the interface, not the network address.
    pub fn address(&self) -> Ipv4Addr {
        self.network.ip()
    }

    pub fn netmask(&self) -> Ipv4Addr {
        self.network.mask()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
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
