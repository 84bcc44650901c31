use crate::aggregate::{default_workers, AggregateConfig, AuthorKey};
use crate::git::LogRange;
use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitstats")]
#[command(about = "A tool for analyzing Git repository statistics")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Worker threads for aggregation [default: available parallelism]")]
    pub workers: Option<usize>,

    #[arg(long, global = true, help = "Treat author names that differ only in case as different people")]
    pub case_sensitive_authors: bool,

    #[arg(long, global = true, help = "Only commits more recent than this date (any format git accepts)")]
    pub since: Option<String>,

    #[arg(long, global = true, help = "Only commits older than this date (any format git accepts)")]
    pub until: Option<String>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "More log output (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Silence diagnostics")]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn aggregate_config(&self) -> AggregateConfig {
        AggregateConfig {
            workers: self.workers.unwrap_or_else(default_workers),
            author_key: if self.case_sensitive_authors {
                AuthorKey::Exact
            } else {
                AuthorKey::CaseInsensitive
            },
        }
    }

    pub fn log_range(&self) -> LogRange {
        LogRange {
            since: self.since.clone(),
            until: self.until.clone(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Args, Clone)]
pub struct ContributorsArgs {
    #[arg(help = "Path to git repository")]
    pub repo: PathBuf,

    #[arg(long, default_value_t = 0, help = "Show contributors with at least this many commits")]
    pub min_commits: u64,

    #[arg(long, help = "Count commits only and skip line statistics (faster on large histories)")]
    pub commits_only: bool,

    #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,

    #[arg(long, help = "Print the chart and exit without prompting")]
    pub no_interactive: bool,
}

#[derive(Args, Clone)]
pub struct FilesArgs {
    #[arg(help = "Path to git repository")]
    pub repo: PathBuf,

    #[arg(short, long, value_delimiter = ',', help = "Substrings to ignore in file paths (can be used multiple times)")]
    pub ignore: Vec<String>,

    #[arg(
        long,
        default_value_t = 25,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..),
        help = "Number of files to show"
    )]
    pub top: usize,

    #[arg(long, help = "Output as JSON", conflicts_with = "ndjson")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show contributor statistics
    Contributors(ContributorsArgs),
    /// Show file change frequency
    Files(FilesArgs),
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Contributors(args) => crate::contributors::exec(self.common, args),
            Commands::Files(args) => crate::files::exec(self.common, args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "gitstats",
            "files",
            "repo",
            "--workers",
            "3",
            "-i",
            "gen",
            "-i",
            "vendor,dist",
            "--case-sensitive-authors",
        ])
        .unwrap();
        assert_eq!(cli.common.workers, Some(3));
        assert_eq!(cli.common.aggregate_config().author_key, AuthorKey::Exact);
        match cli.command {
            Commands::Files(args) => {
                assert_eq!(args.ignore, vec!["gen", "vendor", "dist"]);
                assert_eq!(args.top, 25);
            }
            Commands::Contributors(_) => panic!("expected files"),
        }
    }

    #[test]
    fn top_must_be_positive() {
        assert!(Cli::try_parse_from(["gitstats", "files", ".", "--top", "0"]).is_err());
        let cli = Cli::try_parse_from(["gitstats", "files", ".", "--top", "3"]).unwrap();
        match cli.command {
            Commands::Files(args) => assert_eq!(args.top, 3),
            Commands::Contributors(_) => panic!("expected files"),
        }
    }

    #[test]
    fn verbosity_maps_to_level() {
        let cli = Cli::try_parse_from(["gitstats", "-vv", "contributors", "."]).unwrap();
        assert_eq!(cli.common.log_level(), LevelFilter::Debug);
        let cli = Cli::try_parse_from(["gitstats", "contributors", ".", "-q"]).unwrap();
        assert_eq!(cli.common.log_level(), LevelFilter::Off);
    }
}
