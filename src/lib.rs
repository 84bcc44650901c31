//! gitstats reads `git log` output and reports per-contributor and per-file
//! statistics.
//!
//! The pipeline is [`parse`] -> [`aggregate`] -> [`rank`]; [`chart`] and
//! [`prompt`] present the ranked rows, and [`contributors`] and [`files`]
//! wire it all up for each subcommand.

pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod contributors;
pub mod error;
pub mod files;
pub mod git;
pub mod model;
pub mod parse;
pub mod prompt;
pub mod rank;
pub mod util;
