//! CLI library components for csvjoin.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
