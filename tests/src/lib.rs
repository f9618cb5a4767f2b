//! End-to-end tests: real TCP sessions against in-process fake consoles.

#[cfg(test)]
mod support;

#[cfg(test)]
mod orchestration;
