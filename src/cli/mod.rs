//! Process-facing pieces of the alternator binary.
//!
//! - [`ExitCode`]: exit statuses
//! - [`diagnostic`]: the capped `<operation> : <description>` line

pub mod diagnostic;
mod exit;

pub use diagnostic::{FIELD_CAP, format_diagnostic, write_diagnostic};
pub use exit::ExitCode;
