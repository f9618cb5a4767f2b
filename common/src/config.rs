use std::time::Duration;

/// Address the lab consoles listen on when nothing else is configured.
pub const DEFAULT_CONSOLE_HOST: &str = "127.0.0.1";

/// Upper bound for one session, from connection attempt through final flush.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Config {
    /// Host used for every console endpoint that does not name its own.
    pub console_host: String,
    pub timeout: Duration,
    /// Sends an empty line before the first command so the console
    /// prints a prompt.
    pub wake: bool,
    /// 0 prints everything, 1 hides headers, 2 only prints the summary line.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console_host: DEFAULT_CONSOLE_HOST.to_string(),
            timeout: DEFAULT_SESSION_TIMEOUT,
            wake: true,
            quiet: 0,
        }
    }
}

impl Config {
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            timeout: self.timeout,
            wake: self.wake,
        }
    }
}

/// Per-session settings handed to every session driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub timeout: Duration,
    pub wake: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_SESSION_TIMEOUT,
            wake: true,
        }
    }
}
