use std::process::ExitCode;

use confpush_common::config::Config;
use confpush_common::network::target::{Group, Target};
use confpush_common::registry::Registry;
use confpush_common::error;
use confpush_core::render;

use crate::mprint;
use crate::terminal::print;

/// Prints the command sequence of one target, of one group, or of every
/// target. Nothing is sent.
pub fn render(
    registry: &Registry,
    name: Option<&str>,
    group: Option<Group>,
    cfg: &Config,
) -> ExitCode {
    let targets: Vec<&Target> = match name {
        Some(name) => match registry.lookup(name) {
            Ok(target) => vec![target],
            Err(e) => {
                error!("{e}");
                return ExitCode::from(2);
            }
        },
        None => match group {
            Some(group) => registry.group(group).iter().collect(),
            None => registry.iter().collect(),
        },
    };

    let mut failed = false;
    for (idx, target) in targets.iter().enumerate() {
        match render::render(target) {
            Ok(commands) => {
                if cfg.quiet < 2 {
                    print::tree_head(idx, &format!("{} ({})", target.name, target.endpoint));
                    print::as_tree_list(&commands);
                }
            }
            Err(e) => {
                failed = true;
                error!("{e}");
            }
        }
        if cfg.quiet < 2 && idx + 1 != targets.len() {
            mprint!();
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
