//! PhishGuard server: the `phishguard` CLI and the HTTP prediction service.

pub mod cli;
pub mod commands;
pub mod http;
pub mod logging;
pub mod output;
