use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use confpush_common::config::SessionConfig;
use confpush_common::network::interface::Interface;
use confpush_common::network::target::Group;
use confpush_common::registry::{Registry, RouteRef};
use confpush_core::network::tcp::TcpConnector;
use confpush_core::orchestrator::Orchestrator;
use confpush_core::session::SessionDriver;

use crate::support::{self, FakeLab};

fn netmask(address: [u8; 4], mask: [u8; 4], name: &str) -> Interface {
    Interface::with_netmask(name, Ipv4Addr::from(address), Ipv4Addr::from(mask)).unwrap()
}

fn r1_interfaces() -> Vec<Interface> {
    vec![
        netmask([10, 0, 12, 1], [255, 255, 255, 252], "g0/0"),
        netmask([172, 16, 1, 14], [255, 255, 255, 240], "e1/0"),
    ]
}

fn r2_interfaces() -> Vec<Interface> {
    vec![netmask([192, 168, 2, 254], [255, 255, 255, 0], "e1/0")]
}

fn eth0(address: [u8; 4], prefix: u8) -> Interface {
    Interface::with_prefix("eth0", Ipv4Addr::from(address), prefix).unwrap()
}

fn orchestrator(registry: Registry) -> Orchestrator<TcpConnector> {
    let config = SessionConfig {
        timeout: Duration::from_secs(5),
        wake: true,
    };
    Orchestrator::new(Arc::new(registry), SessionDriver::new(TcpConnector, config))
}

#[tokio::test]
async fn lab_receives_rendered_commands_in_order() {
    let lab = FakeLab::start(&["R1", "R2", "PC1", "PC2"]).await.unwrap();
    let registry = Registry::builder()
        .router("R1", lab.endpoint("R1"), r1_interfaces())
        .router("R2", lab.endpoint("R2"), r2_interfaces())
        .host("PC1", lab.endpoint("PC1"), eth0([172, 16, 1, 1], 28), Some(RouteRef::new("R1", "e1/0")))
        .host("PC2", lab.endpoint("PC2"), eth0([192, 168, 2, 1], 24), Some(RouteRef::new("R2", "e1/0")))
        .build()
        .unwrap();

    let summary = orchestrator(registry).run().await;
    assert!(summary.is_success(), "{summary:?}");
    assert_eq!(summary.sessions(), 4);

    let r1 = lab.capture("R1").await;
    assert!(r1.bytes.starts_with(b"\r\nenable\r\n"), "wake line goes first");
    assert_eq!(
        r1.lines(),
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

    let pc1 = lab.capture("PC1").await;
    assert_eq!(
        pc1.lines(),
        ["ip address add 172.16.1.1/28 dev eth0", "ip route add default via 172.16.1.14"]
    );

    let pc2 = lab.capture("PC2").await;
    assert_eq!(pc2.lines()[1], "ip route add default via 192.168.2.254");
}

#[tokio::test]
async fn hosts_are_contacted_only_after_routers_settle() {
    let lab = FakeLab::start(&["R1", "R2", "PC1", "PC2"]).await.unwrap();
    let registry = Registry::builder()
        .router("R1", lab.endpoint("R1"), r1_interfaces())
        .router("R2", lab.endpoint("R2"), r2_interfaces())
        .host("PC1", lab.endpoint("PC1"), eth0([172, 16, 1, 1], 28), Some(RouteRef::new("R1", "e1/0")))
        .host("PC2", lab.endpoint("PC2"), eth0([192, 168, 2, 1], 24), Some(RouteRef::new("R2", "e1/0")))
        .build()
        .unwrap();

    let summary = orchestrator(registry).run().await;

    let routers_done = summary
        .group(Group::Router)
        .unwrap()
        .results
        .values()
        .map(|r| r.finished_at)
        .max()
        .unwrap();

    for host in ["PC1", "PC2"] {
        let capture = lab.capture(host).await;
        assert!(capture.accepted_at > routers_done, "{host} was contacted early");
        let result = &summary.group(Group::Host).unwrap().results[host];
        assert!(result.started_at > routers_done);
    }
}

#[tokio::test]
async fn unreachable_router_fails_alone() {
    let lab = FakeLab::start(&["R1", "PC1"]).await.unwrap();
    let registry = Registry::builder()
        .router("R1", lab.endpoint("R1"), r1_interfaces())
        .router("R2", support::closed_endpoint().await.unwrap(), r2_interfaces())
        .host("PC1", lab.endpoint("PC1"), eth0([172, 16, 1, 1], 28), Some(RouteRef::new("R1", "e1/0")))
        .build()
        .unwrap();

    let summary = orchestrator(registry).run().await;
    let routers = summary.group(Group::Router).unwrap();

    assert!(routers.results["R1"].is_success());
    let r2 = &routers.results["R2"];
    assert_eq!(r2.error().map(|e| e.kind()), Some("ConnectionError"));
    assert_eq!(r2.commands_sent, 0);

    assert!(summary.group(Group::Host).unwrap().is_success());
    assert_eq!(summary.failed(), 1);
    assert!(!summary.is_success());
    assert_eq!(lab.capture("R1").await.lines().len(), 11);
}

#[tokio::test]
async fn malformed_targets_never_open_a_session() {
    let lab = FakeLab::start(&["R1", "R9", "PC1"]).await.unwrap();
    let registry = Registry::builder()
        .router("R1", lab.endpoint("R1"), r1_interfaces())
        .router("R9", lab.endpoint("R9"), Vec::new())
        .host("PC1", lab.endpoint("PC1"), eth0([172, 16, 1, 1], 28), None)
        .build()
        .unwrap();

    let summary = orchestrator(registry).run().await;

    let r9 = &summary.group(Group::Router).unwrap().results["R9"];
    assert_eq!(r9.error().map(|e| e.kind()), Some("EmptyInterfaceSet"));
    let pc1 = &summary.group(Group::Host).unwrap().results["PC1"];
    assert_eq!(pc1.error().map(|e| e.kind()), Some("MissingDefaultRoute"));

    lab.capture("R1").await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(lab.try_capture("R9").is_none());
    assert!(lab.try_capture("PC1").is_none());
}
