//! Subcommand arguments and handlers

pub mod import;
