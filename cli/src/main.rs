mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, push, render};
use confpush_common::error;
use terminal::{logging, print};

/// Exit status when the topology cannot be loaded.
const EXIT_CONFIG_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose, commands.quiet);

    let cfg = commands.config();
    print::banner(cfg.quiet);

    let registry = match commands.registry(&cfg) {
        Ok(registry) => registry,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    match commands.command.unwrap_or(Commands::Push) {
        Commands::Push => {
            print::header("pushing configuration", cfg.quiet);
            push::push(registry, &cfg).await
        }
        Commands::Render { target, group } => {
            print::header("rendering command sequences", cfg.quiet);
            render::render(&registry, target.as_deref(), group, &cfg)
        }
    }
}
