//! # Topology Sources
//!
//! Two ways to obtain a [`Registry`]:
//! * [`lab`]: the built-in four-router, four-host GNS3 lab.
//! * [`TopologyFile`]: a TOML description of an arbitrary lab.
//!
//! ```toml
//! console_host = "127.0.0.1"
//!
//! [[routers]]
//! name = "R1"
//! port = 5003
//! interfaces = [
//!     { name = "g0/0", address = "10.0.12.1", mask = "255.255.255.252" },
//!     { name = "e1/0", address = "172.16.1.14", mask = "255.255.255.240" },
//! ]
//!
//! [[hosts]]
//! name = "PC1"
//! port = 5007
//! interface = { name = "eth0", address = "172.16.1.1", prefix = 28 }
//! default_route = { router = "R1", interface = "e1/0" }
//! ```

use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::DEFAULT_CONSOLE_HOST;
use crate::error::{InterfaceError, RegistryError};
use crate::network::endpoint::Endpoint;
use crate::network::interface::Interface;
use crate::registry::{Registry, RouteRef};

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("cannot read topology file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed topology file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologyFile {
    #[serde(default = "default_console_host")]
    pub console_host: String,
    #[serde(default)]
    pub routers: Vec<RouterEntry>,
    #[serde(default)]
    pub hosts: Vec<HostEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterEntry {
    pub name: String,
    pub port: u16,
    /// Overrides the file-level `console_host`.
    pub host: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<RouterInterfaceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterInterfaceEntry {
    pub name: String,
    pub address: Ipv4Addr,
    pub mask: Ipv4Addr,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostEntry {
    pub name: String,
    pub port: u16,
    pub host: Option<String>,
    pub interface: HostInterfaceEntry,
    pub default_route: Option<RouteRef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostInterfaceEntry {
    #[serde(default = "default_host_interface")]
    pub name: String,
    pub address: Ipv4Addr,
    pub prefix: u8,
}

fn default_console_host() -> String {
    DEFAULT_CONSOLE_HOST.to_string()
}

fn default_host_interface() -> String {
    "eth0".to_string()
}

impl TopologyFile {
    pub fn load(path: &Path) -> Result<Self, TopologyError> {
        let content = fs::read_to_string(path).map_err(|source| TopologyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, TopologyError> {
        Ok(toml::from_str(content)?)
    }

    /// Validates every interface and builds the registry.
    pub fn into_registry(self) -> Result<Registry, TopologyError> {
        let console_host = self.console_host;
        let mut builder = Registry::builder();

        for router in self.routers {
            let interfaces = router
                .interfaces
                .into_iter()
                .map(|intf| {
                    Interface::with_netmask(&intf.name, intf.address, intf.mask)
                        .map_err(|source| invalid(&router.name, &intf.name, source))
                })
                .collect::<Result<Vec<Interface>, RegistryError>>()?;

            let host = router.host.unwrap_or_else(|| console_host.clone());
            builder = builder.router(router.name, Endpoint::new(host, router.port), interfaces);
        }

        for pc in self.hosts {
            let intf = pc.interface;
            let interface = Interface::with_prefix(&intf.name, intf.address, intf.prefix)
                .map_err(|source| invalid(&pc.name, &intf.name, source))?;

            let host = pc.host.unwrap_or_else(|| console_host.clone());
            builder = builder.host(
                pc.name,
                Endpoint::new(host, pc.port),
                interface,
                pc.default_route,
            );
        }

        Ok(builder.build()?)
    }
}

fn invalid(target: &str, interface: &str, source: InterfaceError) -> RegistryError {
    RegistryError::InvalidInterface {
        target: target.to_string(),
        interface: interface.to_string(),
        source,
    }
}

const LAB_ROUTERS: &[(&str, u16, [(&str, [u8; 4], [u8; 4]); 3])] = &[
    (
        "R1",
        5003,
        [
            ("g0/0", [10, 0, 12, 1], [255, 255, 255, 252]),
            ("g2/0", [10, 0, 13, 1], [255, 255, 255, 252]),
            ("e1/0", [172, 16, 1, 14], [255, 255, 255, 240]),
        ],
    ),
    (
        "R2",
        5004,
        [
            ("g0/0", [10, 0, 12, 2], [255, 255, 255, 252]),
            ("g2/0", [10, 0, 24, 1], [255, 255, 255, 252]),
            ("e1/0", [192, 168, 2, 254], [255, 255, 255, 0]),
        ],
    ),
    (
        "R3",
        5005,
        [
            ("g0/0", [10, 0, 13, 2], [255, 255, 255, 252]),
            ("g2/0", [192, 168, 3, 126], [255, 255, 255, 128]),
            ("e1/0", [10, 0, 34, 1], [255, 255, 255, 252]),
        ],
    ),
    (
        "R4",
        5006,
        [
            ("g0/0", [10, 0, 24, 2], [255, 255, 255, 252]),
            ("g2/0", [192, 168, 4, 254], [255, 255, 255, 0]),
            ("e1/0", [10, 0, 34, 2], [255, 255, 255, 252]),
        ],
    ),
];

// (name, console port, eth0 address, prefix, gateway router, gateway interface)
const LAB_HOSTS: &[(&str, u16, [u8; 4], u8, &str, &str)] = &[
    ("PC1", 5007, [172, 16, 1, 1], 28, "R1", "e1/0"),
    ("PC2", 5008, [192, 168, 2, 1], 24, "R2", "e1/0"),
    ("PC3", 5009, [192, 168, 3, 1], 25, "R3", "g2/0"),
    ("PC4", 5010, [192, 168, 4, 1], 24, "R4", "g2/0"),
];

/// The built-in GNS3 lab: R1-R4 on console ports 5003-5006 and PC1-PC4 on
/// 5007-5010, every console reachable at `console_host`.
pub fn lab(console_host: &str) -> Result<Registry, RegistryError> {
    let mut builder = Registry::builder();

    for (name, port, table) in LAB_ROUTERS {
        let interfaces = table
            .iter()
            .map(|(intf, address, mask)| {
                Interface::with_netmask(*intf, Ipv4Addr::from(*address), Ipv4Addr::from(*mask))
                    .map_err(|source| invalid(name, intf, source))
            })
            .collect::<Result<Vec<Interface>, RegistryError>>()?;
        builder = builder.router(*name, Endpoint::new(console_host, *port), interfaces);
    }

    for (name, port, address, prefix, router, gateway) in LAB_HOSTS {
        let eth0 = Interface::with_prefix("eth0", Ipv4Addr::from(*address), *prefix)
            .map_err(|source| invalid(name, "eth0", source))?;
        builder = builder.host(
            *name,
            Endpoint::new(console_host, *port),
            eth0,
            Some(RouteRef::new(*router, *gateway)),
        );
    }

    builder.build()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
