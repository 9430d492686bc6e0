//! Command-line front-end for `langcheck`.
//!
//! The binary is a thin wrapper: it loads the configuration, runs one check,
//! renders the report and maps the outcome to an exit status.

pub mod cli;
pub mod logging;
