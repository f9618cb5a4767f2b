//! Aggregated results of a run. Failures are data here, not control flow.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use confpush_common::network::target::Group;

use crate::session::SessionResult;

/// Every session of one group, keyed by target name.
#[derive(Debug)]
pub struct GroupReport {
    pub group: Group,
    pub results: BTreeMap<String, SessionResult>,
    pub started_at: Instant,
    pub elapsed: Duration,
}

impl GroupReport {
    pub fn succeeded(&self) -> usize {
        self.results.values().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SessionResult> {
        self.results.values().filter(|r| !r.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Reports of every group, in the order the groups ran.
#[derive(Debug)]
pub struct RunSummary {
    pub groups: Vec<GroupReport>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn group(&self, group: Group) -> Option<&GroupReport> {
        self.groups.iter().find(|report| report.group == group)
    }

    pub fn sessions(&self) -> usize {
        self.groups.iter().map(|report| report.results.len()).sum()
    }

    pub fn succeeded(&self) -> usize {
        self.groups.iter().map(GroupReport::succeeded).sum()
    }

    pub fn failed(&self) -> usize {
        self.groups.iter().map(GroupReport::failed).sum()
    }

    pub fn is_success(&self) -> bool {
        self.groups.iter().all(GroupReport::is_success)
    }
}
