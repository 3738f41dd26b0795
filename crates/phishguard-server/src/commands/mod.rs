//! CLI subcommand implementations for the PhishGuard binary.

pub mod predict;
pub mod serve;
pub mod train;
