pub mod push;
pub mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use confpush_common::config::{Config, DEFAULT_CONSOLE_HOST};
use confpush_common::network::target::Group;
use confpush_common::registry::Registry;
use confpush_common::topology::{self, TopologyFile};

#[derive(Parser)]
#[command(name = "confpush", version)]
#[command(about = "Push interface configuration to lab routers and hosts over their consoles.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// TOML topology file. The built-in lab is used when omitted
    #[arg(long, global = true, value_name = "FILE")]
    pub topology: Option<PathBuf>,

    /// Address of the console server
    #[arg(long, global = true, value_name = "ADDR")]
    pub console_host: Option<String>,

    /// Seconds allowed per session, from connect to final flush
    #[arg(long, global = true, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Do not send an empty line before the first command
    #[arg(long, global = true)]
    pub no_wake: bool,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less output (-q hides headers, -qq prints only the summary line)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Configure every router, then every host (default)
    #[command(alias = "p")]
    Push,
    /// Print the commands that would be sent, without connecting
    #[command(alias = "r")]
    Render {
        target: Option<String>,
        /// Only targets of this group (router or host)
        #[arg(short, long, conflicts_with = "target")]
        group: Option<Group>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            console_host: self
                .console_host
                .clone()
                .unwrap_or_else(|| DEFAULT_CONSOLE_HOST.to_string()),
            timeout: Duration::from_secs(self.timeout),
            wake: !self.no_wake,
            quiet: self.quiet,
        }
    }

    pub fn registry(&self, cfg: &Config) -> anyhow::Result<Registry> {
        let Some(path) = &self.topology else {
            return Ok(topology::lab(&cfg.console_host)?);
        };

        let mut file = TopologyFile::load(path)?;
        if self.console_host.is_some() {
            file.console_host = cfg.console_host.clone();
        }
        file.into_registry()
            .with_context(|| format!("invalid topology in {}", path.display()))
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
