//! Logging macros used across the workspace.
//!
//! They are thin wrappers over `tracing` so every crate logs the same way and
//! the CLI formatter can pick out [`SUCCESS_TARGET`] events.

/// Target attached to events emitted through [`success!`](crate::success).
pub const SUCCESS_TARGET: &str = "confpush::success";

/// Target attached to raw terminal output.
pub const PRINT_TARGET: &str = "confpush::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "confpush::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!($($arg)*)
    };
}
