use std::io::{self, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use colored::*;
use confpush_common::network::target::Group;
use confpush_core::orchestrator::GroupHook;
use confpush_core::report::GroupReport;
use confpush_core::session::SessionResult;
use indicatif::{ProgressBar, ProgressStyle};

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// The spinner of the group currently running, if any.
static SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn start_spinner(message: String) {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_strings(TICK_STRINGS));
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));

    if let Ok(mut slot) = SPINNER.lock() {
        if let Some(previous) = slot.replace(pb) {
            previous.finish_and_clear();
        }
    }
}

fn set_spinner_message(message: String) {
    if let Ok(slot) = SPINNER.lock()
        && let Some(pb) = slot.as_ref()
    {
        pb.set_message(message);
    }
}

fn stop_spinner() {
    if let Ok(mut slot) = SPINNER.lock()
        && let Some(pb) = slot.take()
    {
        pb.finish_and_clear();
    }
}

/// Shows one spinner per group with a running count of settled sessions.
#[derive(Default)]
pub struct ProgressHook {
    total: AtomicUsize,
    settled: AtomicUsize,
    group: Mutex<Option<Group>>,
}

impl GroupHook for ProgressHook {
    fn on_group_start(&self, group: Group, targets: usize) {
        self.total.store(targets, Ordering::Relaxed);
        self.settled.store(0, Ordering::Relaxed);
        if let Ok(mut current) = self.group.lock() {
            *current = Some(group);
        }
        start_spinner(format!("Configuring {} {}...", targets, group.plural()));
    }

    fn on_session_finish(&self, _result: &SessionResult) {
        let settled = self.settled.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.load(Ordering::Relaxed);
        let plural = self
            .group
            .lock()
            .ok()
            .and_then(|current| *current)
            .map_or("targets", |group| group.plural());

        set_spinner_message(format!(
            "{} of {} {} settled",
            settled.to_string().green().bold(),
            total,
            plural
        ));
    }

    fn on_group_finish(&self, _report: &GroupReport) {
        stop_spinner();
    }
}

/// Log writer that keeps output from tearing through the spinner line.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let spinner = SPINNER.lock().ok().and_then(|slot| slot.clone());
        match spinner {
            Some(pb) => pb.suspend(|| io::stdout().write_all(buf))?,
            None => io::stdout().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
