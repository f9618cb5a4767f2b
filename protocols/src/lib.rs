//! Wire-level helpers for talking to device consoles.

pub mod telnet;
