//! # Command Template Renderer
//!
//! Turns a [`Target`] into the exact lines sent to its console. Rendering is
//! pure: no I/O, no shared state, identical output for identical input.

use std::ops::Deref;

use confpush_common::error::RenderError;
use confpush_common::network::interface::Interface;
use confpush_common::network::target::{Group, Target, TargetKind};

const ELEVATE: &str = "enable";
const CONFIGURE: &str = "conf t";
const NO_SHUTDOWN: &str = "no shutdown";
const LEAVE_INTERFACE: &str = "exit";
const END_CONFIGURE: &str = "end";

/// Ordered, immutable list of commands for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSequence(Vec<String>);

impl CommandSequence {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl Deref for CommandSequence {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a CommandSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders `target` with the template of its group.
pub fn render(target: &Target) -> Result<CommandSequence, RenderError> {
    match target.group() {
        Group::Router => render_router(target),
        Group::Host => render_host(target),
    }
}

/// Privileged mode, configuration mode, one block per interface in declared
/// order, then back out with a single `end`.
pub fn render_router(target: &Target) -> Result<CommandSequence, RenderError> {
    let TargetKind::Router { interfaces } = &target.kind else {
        return Err(mismatch(target, Group::Router));
    };
    if interfaces.is_empty() {
        return Err(RenderError::EmptyInterfaceSet(target.name.clone()));
    }

    let mut commands = Vec::with_capacity(3 + interfaces.len() * 4);
    commands.push(ELEVATE.to_string());
    commands.push(CONFIGURE.to_string());
    for intf in interfaces {
        commands.extend(interface_block(intf));
    }
    commands.push(END_CONFIGURE.to_string());

    Ok(CommandSequence(commands))
}

/// Address assignment followed by the default route.
pub fn render_host(target: &Target) -> Result<CommandSequence, RenderError> {
    let TargetKind::Host {
        interface,
        default_route,
    } = &target.kind
    else {
        return Err(mismatch(target, Group::Host));
    };
    let Some(gateway) = default_route else {
        return Err(RenderError::MissingDefaultRoute(target.name.clone()));
    };

    Ok(CommandSequence(vec![
        format!(
            "ip address add {}/{} dev {}",
            interface.address(),
            interface.prefix(),
            interface.name()
        ),
        format!("ip route add default via {gateway}"),
    ]))
}

fn interface_block(intf: &Interface) -> [String; 4] {
    [
        format!("interface {}", intf.name()),
        format!("ip address {} {}", intf.address(), intf.netmask()),
        NO_SHUTDOWN.to_string(),
        LEAVE_INTERFACE.to_string(),
    ]
}

fn mismatch(target: &Target, expected: Group) -> RenderError {
    RenderError::GroupMismatch {
        target: target.name.clone(),
        expected,
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

#[cfg(test)]
mod tests {
    use super::*;
    use confpush_common::network::endpoint::Endpoint;
    use confpush_common::topology;
    use std::net::Ipv4Addr;

    fn r1() -> Target {
        Target::router(
            "R1",
            Endpoint::new("127.0.0.1", 5003),
            vec![
                Interface::with_netmask(
                    "g0/0",
                    Ipv4Addr::new(10, 0, 12, 1),
                    Ipv4Addr::new(255, 255, 255, 252),
                )
                .unwrap(),
                Interface::with_netmask(
                    "e1/0",
                    Ipv4Addr::new(172, 16, 1, 14),
                    Ipv4Addr::new(255, 255, 255, 240),
                )
                .unwrap(),
            ],
        )
    }

    fn pc1(default_route: Option<Ipv4Addr>) -> Target {
        Target::host(
            "PC1",
            Endpoint::new("127.0.0.1", 5007),
            Interface::with_prefix("eth0", Ipv4Addr::new(172, 16, 1, 1), 28).unwrap(),
            default_route,
        )
    }

    #[test]
    fn router_with_two_interfaces_renders_eleven_commands() {
        let commands = render_router(&r1()).unwrap();

        assert_eq!(
            commands.as_slice(),
            [
                "enable",
                "conf t",
                "interface g0/0",
                "ip address 10.0.12.1 255.255.255.252",
                "no shutdown",
                "exit",
                "interface e1/0",
                "ip address 172.16.1.14 255.255.255.240",
                "no shutdown",
                "exit",
                "end",
            ]
        );
    }

    #[test]
    fn router_blocks_follow_declaration_order() {
        let registry = topology::lab("127.0.0.1").unwrap();
        let r3 = registry.lookup("R3").unwrap();
        let commands = render_router(r3).unwrap();

        assert_eq!(commands.len(), 2 + 3 * 4 + 1);
        assert_eq!(&commands[..2], ["enable", "conf t"]);
        assert_eq!(commands.last().map(String::as_str), Some("end"));
        assert_eq!(commands.iter().filter(|c| *c == "end").count(), 1);

        let selected: Vec<&str> = commands
            .iter()
            .filter_map(|c| c.strip_prefix("interface "))
            .collect();
        assert_eq!(selected, ["g0/0", "g2/0", "e1/0"]);
    }

    #[test]
    fn router_without_interfaces_fails() {
        let empty = Target::router("R9", Endpoint::new("127.0.0.1", 5099), Vec::new());
        assert_eq!(
            render_router(&empty),
            Err(RenderError::EmptyInterfaceSet("R9".to_string()))
        );
    }

    #[test]
    fn host_renders_address_then_default_route() {
        let commands = render_host(&pc1(Some(Ipv4Addr::new(172, 16, 1, 14)))).unwrap();

        assert_eq!(
            commands.into_vec(),
            vec![
                "ip address add 172.16.1.1/28 dev eth0".to_string(),
                "ip route add default via 172.16.1.14".to_string(),
            ]
        );
    }

    #[test]
    fn host_without_default_route_emits_nothing() {
        assert_eq!(
            render_host(&pc1(None)),
            Err(RenderError::MissingDefaultRoute("PC1".to_string()))
        );
    }

    #[test]
    fn templates_reject_the_wrong_group() {
        assert!(matches!(
            render_host(&r1()),
            Err(RenderError::GroupMismatch { expected: Group::Host, .. })
        ));
        assert!(matches!(
            render_router(&pc1(None)),
            Err(RenderError::GroupMismatch { expected: Group::Router, .. })
        ));
    }

    #[test]
    fn rendering_is_deterministic() {
        let registry = topology::lab("127.0.0.1").unwrap();
        for target in registry.iter() {
            assert_eq!(render(target).unwrap(), render(target).unwrap());
        }
    }

    #[test]
    fn render_dispatches_by_group() {
        assert_eq!(render(&r1()), render_router(&r1()));
        let host = pc1(Some(Ipv4Addr::new(172, 16, 1, 14)));
        assert_eq!(render(&host), render_host(&host));
    }
}
