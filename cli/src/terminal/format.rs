use std::time::Duration;

use colored::*;
use confpush_core::report::GroupReport;
use confpush_core::session::SessionResult;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn seconds(elapsed: Duration) -> ColoredString {
    format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow()
}

fn count(n: usize, color: Color) -> ColoredString {
    if n == 0 {
        n.to_string().color(colors::SEPARATOR)
    } else {
        n.to_string().color(color).bold()
    }
}

/// Counts and timing of one group, followed by one line per failed target.
pub fn report_to_details(report: &GroupReport) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("Passed".to_string(), count(report.succeeded(), colors::PASSED)),
        ("Failed".to_string(), count(report.failed(), colors::FAILED)),
        ("Time".to_string(), seconds(report.elapsed)),
    ];
    details.extend(report.failures().map(failure_to_detail));
    details
}

pub fn failure_to_detail(result: &SessionResult) -> Detail {
    let kind = result.error().map_or("Unknown", |err| err.kind());
    (result.target.clone(), kind.color(colors::FAILED))
}
