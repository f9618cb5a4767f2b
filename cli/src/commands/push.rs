use std::process::ExitCode;
use std::sync::Arc;

use colored::*;
use confpush_common::config::Config;
use confpush_common::registry::Registry;
use confpush_common::{success, warn};
use confpush_core::network::tcp::TcpConnector;
use confpush_core::orchestrator::Orchestrator;
use confpush_core::report::RunSummary;
use confpush_core::session::SessionDriver;

use crate::mprint;
use crate::terminal::spinner::ProgressHook;
use crate::terminal::{colors, format, print};

pub async fn push(registry: Registry, cfg: &Config) -> ExitCode {
    let driver = SessionDriver::new(TcpConnector, cfg.session());
    let orchestrator =
        Orchestrator::new(Arc::new(registry), driver).with_hook(Arc::new(ProgressHook::default()));

    let summary: RunSummary = orchestrator.run().await;
    print_summary(&summary, cfg);

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_summary(summary: &RunSummary, cfg: &Config) {
    if cfg.quiet < 2 {
        if cfg.quiet > 0 {
            mprint!();
        }
        print::header("run summary", cfg.quiet);
        for (idx, report) in summary.groups.iter().enumerate() {
            print::tree_head(idx, report.group.plural());
            print::as_tree_one_level(format::report_to_details(report));
            if idx + 1 != summary.groups.len() {
                mprint!();
            }
        }
    }

    let sessions: ColoredString = format!("{}/{} sessions", summary.succeeded(), summary.sessions())
        .bold()
        .color(if summary.is_success() { colors::PASSED } else { colors::FAILED });
    let total_time: ColoredString = format::seconds(summary.elapsed);
    let output: String = format!("Configuration complete: {sessions} succeeded in {total_time}");

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ if summary.is_success() => success!("{}", output),
        _ => warn!("{}", output),
    }
}
