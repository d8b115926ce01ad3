//! CLI library components for the `pseudo` tool.

#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
