//! # Orchestrator
//!
//! Runs one session per target, group by group. Inside a group every session
//! runs concurrently on its own task; between groups there is a hard barrier:
//! no host session starts before every router session has settled, because a
//! host's default route only works once its gateway interface is up.

use std::sync::Arc;
use std::time::Instant;

use confpush_common::network::target::Group;
use confpush_common::registry::Registry;
use confpush_common::{info, warn};

use crate::network::Connector;
use crate::report::{GroupReport, RunSummary};
use crate::session::{SessionDriver, SessionResult};

/// Instrumentation invoked around each group run.
///
/// Callbacks run on the orchestrator's tasks, so they should return quickly.
pub trait GroupHook: Send + Sync {
    fn on_group_start(&self, _group: Group, _targets: usize) {}

    /// Called from the session's task as soon as it settles.
    fn on_session_finish(&self, _result: &SessionResult) {}

    fn on_group_finish(&self, _report: &GroupReport) {}
}

pub struct NoopHook;

impl GroupHook for NoopHook {}

pub struct Orchestrator<C> {
    registry: Arc<Registry>,
    driver: SessionDriver<C>,
    hook: Arc<dyn GroupHook>,
}

impl<C: Connector> Orchestrator<C> {
    pub fn new(registry: Arc<Registry>, driver: SessionDriver<C>) -> Self {
        Self {
            registry,
            driver,
            hook: Arc::new(NoopHook),
        }
    }

    pub fn with_hook(mut self, hook: Arc<dyn GroupHook>) -> Self {
        self.hook = hook;
        self
    }

    /// Routers first, then hosts.
    pub async fn run(&self) -> RunSummary {
        let started_at = Instant::now();
        let mut groups = Vec::with_capacity(Group::ALL.len());

        for group in Group::ALL {
            groups.push(self.run_all(group).await);
        }

        RunSummary {
            groups,
            elapsed: started_at.elapsed(),
        }
    }

    /// Configures every target of `group` concurrently and waits for all of
    /// them. Never fails: a session that panics is reported as aborted.
    pub async fn run_all(&self, group: Group) -> GroupReport {
        let targets = self.registry.group(group);
        self.hook.on_group_start(group, targets.len());
        info!("Configuring {} {}", targets.len(), group.plural());

        let started_at = Instant::now();
        let handles: Vec<_> = targets
            .iter()
            .map(|target| {
                let driver = self.driver.clone();
                let hook = Arc::clone(&self.hook);
                let target = target.clone();
                let spawned_at = Instant::now();
                let handle = tokio::spawn(async move {
                    let result = driver.run(&target).await;
                    hook.on_session_finish(&result);
                    result
                });
                (spawned_at, handle)
            })
            .collect();

        let mut report = GroupReport {
            group,
            results: Default::default(),
            started_at,
            elapsed: Default::default(),
        };

        for (target, (spawned_at, handle)) in targets.iter().zip(handles) {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_err) => {
                    warn!("Session task for {} did not complete: {join_err}", target.name);
                    let result = SessionResult::aborted(target, spawned_at, join_err.to_string());
                    self.hook.on_session_finish(&result);
                    result
                }
            };
            report.results.insert(result.target.clone(), result);
        }

        report.elapsed = started_at.elapsed();
        info!(
            "{} {} configured, {} failed, in {:.2}s",
            report.succeeded(),
            group.plural(),
            report.failed(),
            report.elapsed.as_secs_f64()
        );
        self.hook.on_group_finish(&report);
        report
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
    use async_trait::async_trait;
    use confpush_common::config::SessionConfig;
    use confpush_common::network::endpoint::Endpoint;
    use confpush_common::topology;
    use crate::error::SessionError;
    use std::io;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::io::DuplexStream;

    /// Accepts every endpoint and drains what it is sent, except for optional
    /// ports that refuse, hang up at once or crash the connecting task.
    #[derive(Default)]
    struct FakeConsoles {
        refused_port: Option<u16>,
        hangup_port: Option<u16>,
        panic_port: Option<u16>,
    }

    #[async_trait]
    impl Connector for FakeConsoles {
        type Stream = DuplexStream;

        async fn connect(&self, endpoint: &Endpoint) -> io::Result<DuplexStream> {
            if Some(endpoint.port) == self.refused_port {
                return Err(io::Error::from(io::ErrorKind::ConnectionRefused));
            }
            if Some(endpoint.port) == self.panic_port {
                panic!("console on port {} crashed", endpoint.port);
            }
            let (client, mut console) = tokio::io::duplex(4096);
            if Some(endpoint.port) == self.hangup_port {
                drop(console);
                return Ok(client);
            }
            tokio::spawn(async move {
                let _ = tokio::io::copy(&mut console, &mut tokio::io::sink()).await;
            });
            Ok(client)
        }
    }

    #[derive(Default)]
    struct RecordingHook {
        events: Mutex<Vec<String>>,
        sessions: AtomicUsize,
    }

    impl GroupHook for RecordingHook {
        fn on_group_start(&self, group: Group, targets: usize) {
            self.events.lock().unwrap().push(format!("start {group} {targets}"));
        }

        fn on_session_finish(&self, _result: &SessionResult) {
            self.sessions.fetch_add(1, Ordering::SeqCst);
        }

        fn on_group_finish(&self, report: &GroupReport) {
            self.events
                .lock()
                .unwrap()
                .push(format!("finish {} {}", report.group, report.succeeded()));
        }
    }

    fn orchestrator(refused_port: Option<u16>) -> Orchestrator<FakeConsoles> {
        with_consoles(FakeConsoles {
            refused_port,
            ..Default::default()
        })
    }

    fn with_consoles(consoles: FakeConsoles) -> Orchestrator<FakeConsoles> {
        let registry = Arc::new(topology::lab("127.0.0.1").unwrap());
        let config = SessionConfig {
            timeout: Duration::from_secs(5),
            wake: true,
        };
        Orchestrator::new(registry, SessionDriver::new(consoles, config))
    }

    #[tokio::test]
    async fn run_all_reports_every_target_of_the_group() {
        let report = orchestrator(None).run_all(Group::Router).await;

        assert_eq!(report.group, Group::Router);
        let names: Vec<&str> = report.results.keys().map(String::as_str).collect();
        assert_eq!(names, ["R1", "R2", "R3", "R4"]);
        assert_eq!(report.succeeded(), 4);
        assert!(report.is_success());
        assert!(report.results.values().all(|r| r.commands_sent == 2 + 3 * 4 + 1));
    }

    #[tokio::test]
    async fn one_refused_target_does_not_affect_its_siblings() {
        let report = orchestrator(Some(5004)).run_all(Group::Router).await;

        assert_eq!(report.failed(), 1);
        let failed: Vec<&str> = report.failures().map(|r| r.target.as_str()).collect();
        assert_eq!(failed, ["R2"]);
        for name in ["R1", "R3", "R4"] {
            assert!(report.results[name].is_success(), "{name} should succeed");
        }
    }

    #[tokio::test]
    async fn broken_pipe_fails_only_its_own_session() {
        let report = with_consoles(FakeConsoles {
            hangup_port: Some(5005),
            ..Default::default()
        })
        .run_all(Group::Router)
        .await;

        let r3 = &report.results["R3"];
        assert_eq!(r3.error().map(SessionError::kind), Some("WriteError"));
        assert_eq!(r3.commands_sent, 0);
        assert_eq!(report.failed(), 1);
        for name in ["R1", "R2", "R4"] {
            assert!(report.results[name].is_success(), "{name} should succeed");
        }
    }

    #[tokio::test]
    async fn panicked_session_is_reported_as_aborted() {
        let report = with_consoles(FakeConsoles {
            panic_port: Some(5006),
            ..Default::default()
        })
        .run_all(Group::Router)
        .await;

        let r4 = &report.results["R4"];
        assert_eq!(r4.error().map(SessionError::kind), Some("Aborted"));
        assert!(r4.started_at >= report.started_at);
        assert!(r4.finished_at >= r4.started_at);
        assert_eq!(report.succeeded(), 3);
    }

    #[tokio::test]
    async fn hosts_start_after_every_router_settled() {
        let summary = orchestrator(Some(5003)).run().await;

        let routers = summary.group(Group::Router).unwrap();
        let hosts = summary.group(Group::Host).unwrap();
        let last_router = routers.results.values().map(|r| r.finished_at).max().unwrap();
        let first_host = hosts.results.values().map(|r| r.started_at).min().unwrap();

        assert!(first_host > last_router);
        assert_eq!(summary.sessions(), 8);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.is_success());
    }

    #[tokio::test]
    async fn hook_sees_groups_in_order() {
        let hook = Arc::new(RecordingHook::default());
        let summary = orchestrator(None).with_hook(hook.clone()).run().await;

        assert!(summary.is_success());
        assert_eq!(
            *hook.events.lock().unwrap(),
            ["start router 4", "finish router 4", "start host 4", "finish host 4"]
        );
        assert_eq!(hook.sessions.load(Ordering::SeqCst), 8);
    }

    #[tokio::test]
    async fn empty_group_yields_empty_report() {
        let registry = Arc::new(Registry::builder().build().unwrap());
        let driver = SessionDriver::new(FakeConsoles::default(), SessionConfig::default());
        let report = Orchestrator::new(registry, driver).run_all(Group::Host).await;

        assert!(report.results.is_empty());
        assert!(report.is_success());
    }
}
