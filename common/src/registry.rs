//! # Target Registry
//!
//! The registry holds every target of a run. It is assembled once through
//! [`RegistryBuilder`] and never changes afterwards, so concurrent sessions can
//! read it without coordination.
//!
//! Host default routes are declared as a reference to a router interface
//! ([`RouteRef`]) and resolved to a plain address in [`RegistryBuilder::build`].

use std::collections::HashSet;
use std::net::Ipv4Addr;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::network::endpoint::Endpoint;
use crate::network::interface::Interface;
use crate::network::target::{Group, Target, TargetKind};

/// Points a host's default route at an interface of a router.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteRef {
    pub router: String,
    pub interface: String,
}

impl RouteRef {
    pub fn new(router: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            router: router.into(),
            interface: interface.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    routers: Vec<Target>,
    hosts: Vec<Target>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Finds a target by name. Routers are searched before hosts.
    pub fn lookup(&self, name: &str) -> Result<&Target, RegistryError> {
        self.routers
            .iter()
            .chain(self.hosts.iter())
            .find(|target| target.name == name)
            .ok_or_else(|| RegistryError::UnknownTarget(name.to_string()))
    }

    /// Targets of `group`, in declaration order.
    pub fn group(&self, group: Group) -> &[Target] {
        match group {
            Group::Router => &self.routers,
            Group::Host => &self.hosts,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.routers.iter().chain(self.hosts.iter())
    }

    pub fn len(&self) -> usize {
        self.routers.len() + self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct PendingHost {
    name: String,
    endpoint: Endpoint,
    interface: Interface,
    default_route: Option<RouteRef>,
}

#[derive(Default)]
pub struct RegistryBuilder {
    routers: Vec<Target>,
    hosts: Vec<PendingHost>,
}

impl RegistryBuilder {
    pub fn router(
        mut self,
        name: impl Into<String>,
        endpoint: Endpoint,
        interfaces: Vec<Interface>,
    ) -> Self {
        self.routers.push(Target::router(name, endpoint, interfaces));
        self
    }

    pub fn host(
        mut self,
        name: impl Into<String>,
        endpoint: Endpoint,
        interface: Interface,
        default_route: Option<RouteRef>,
    ) -> Self {
        self.hosts.push(PendingHost {
            name: name.into(),
            endpoint,
            interface,
            default_route,
        });
        self
    }

    /// Checks name uniqueness per group and resolves every default route.
    pub fn build(self) -> Result<Registry, RegistryError> {
        ensure_unique(Group::Router, self.routers.iter().map(|r| r.name.as_str()))?;
        ensure_unique(Group::Host, self.hosts.iter().map(|h| h.name.as_str()))?;

        let hosts = self
            .hosts
            .into_iter()
            .map(|host| {
                let gateway = match &host.default_route {
                    Some(route) => Some(resolve_route(&self.routers, &host.name, route)?),
                    None => None,
                };
                Ok(Target::host(host.name, host.endpoint, host.interface, gateway))
            })
            .collect::<Result<Vec<Target>, RegistryError>>()?;

        Ok(Registry {
            routers: self.routers,
            hosts,
        })
    }
}

fn ensure_unique<'a>(
    group: Group,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), RegistryError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(RegistryError::DuplicateTarget {
                group,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn resolve_route(
    routers: &[Target],
    host: &str,
    route: &RouteRef,
) -> Result<Ipv4Addr, RegistryError> {
    routers
        .iter()
        .filter(|router| router.name == route.router)
        .find_map(|router| match &router.kind {
            TargetKind::Router { interfaces } => interfaces
                .iter()
                .find(|intf| intf.name() == route.interface)
                .map(Interface::address),
            TargetKind::Host { .. } => None,
        })
        .ok_or_else(|| RegistryError::UnresolvedDefaultRoute {
            host: host.to_string(),
            router: route.router.clone(),
            interface: route.interface.clone(),
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
