//! I/O helpers for stepdoc commands.

pub mod config;
pub mod input;
pub mod output;
