//! Command line subcommands.

pub mod fetch;
pub mod serve;
