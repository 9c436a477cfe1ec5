//! `polyc` subcommands.
//!
//! Each command writes its report to `out` and returns whether the manifest
//! passed. Loading failures are reported by the caller.

mod check;
mod explain;
mod run;

pub use check::check;
pub use explain::explain;
pub use run::run;
