//! Headless session tooling behind the `vitrine` binary
//!
//! - [`session`]: scripted user sessions (TOML) and their replay
//! - [`assert`]: checks a session can make against the page
//! - [`report`]: run outcome plus a snapshot of the final page
//! - [`init`]: sample project scaffolding

pub mod assert;
pub mod init;
pub mod report;
pub mod session;
