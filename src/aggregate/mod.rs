//! Concurrent reduction of parsed log records into per-author and per-file
//! aggregates.
//!
//! Workers on a [`WorkerPool`] parse lines, compute identity keys and apply
//! ignore filters. A single reducer thread owns every map and the set of
//! already counted commit hashes. Aggregates come back in discovery order
//! (earliest position in the log stream first).

pub mod contributors;
pub mod files;
pub mod pool;

pub use contributors::{ContributorTally, KeyedUnit};
pub use files::{FileTally, SeqPath};
pub use pool::{Reducer, WorkerPool};

use crate::error::Result;
use crate::model::{AuthorUnit, Contributor, FileChange};
use crate::parse::{assemble_numstat, parse_commit_line, parse_path_line};
use crate::util::is_ignored;

/// How author names are turned into identity keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorKey {
    /// `Ada` and `ada` are the same contributor.
    #[default]
    CaseInsensitive,
    Exact,
}

impl AuthorKey {
    pub fn key(self, author: &str) -> String {
        match self {
            AuthorKey::CaseInsensitive => author.to_lowercase(),
            AuthorKey::Exact => author.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub workers: usize,
    pub author_key: AuthorKey,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            author_key: AuthorKey::default(),
        }
    }
}

pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

pub struct Aggregator {
    pool: WorkerPool,
    author_key: AuthorKey,
}

impl Aggregator {
    pub fn new(config: &AggregateConfig) -> Result<Self> {
        let pool = WorkerPool::new(config.workers)?;
        log::debug!(
            "aggregating with {} workers, {:?} author keys",
            pool.workers(),
            config.author_key
        );
        Ok(Self {
            pool,
            author_key: config.author_key,
        })
    }

    /// Reduce already resolved units into contributors.
    pub fn contributors(&self, units: Vec<AuthorUnit>) -> Vec<Contributor> {
        let author_key = self.author_key;
        self.pool.run(
            units,
            |unit| {
                Some(KeyedUnit {
                    key: author_key.key(&unit.author),
                    unit,
                })
            },
            ContributorTally::new(),
        )
    }

    /// Parse and reduce `hash|author|epoch|subject` lines.
    pub fn commit_lines(&self, lines: &[&str]) -> Vec<Contributor> {
        let author_key = self.author_key;
        let items: Vec<(usize, &str)> = lines.iter().copied().enumerate().collect();
        self.pool.run(
            items,
            |(seq, line)| {
                let unit = AuthorUnit::from_commit(seq, parse_commit_line(line)?);
                Some(KeyedUnit {
                    key: author_key.key(&unit.author),
                    unit,
                })
            },
            ContributorTally::new(),
        )
    }

    /// Reduce the mixed header/numstat stream. Stat lines are attached to
    /// their header on the calling thread before anything is fanned out.
    pub fn numstat_lines(&self, lines: &[&str]) -> Vec<Contributor> {
        let units = assemble_numstat(lines.iter().copied());
        self.contributors(units)
    }

    /// Count occurrences of each path in `--name-only` output, skipping
    /// paths that contain any of the `ignore` substrings.
    pub fn file_lines(&self, lines: &[&str], ignore: &[String]) -> Vec<FileChange> {
        let items: Vec<(usize, &str)> = lines.iter().copied().enumerate().collect();
        self.pool.run(
            items,
            |(seq, line)| {
                let record = parse_path_line(line)?;
                if is_ignored(&record.path, ignore) {
                    return None;
                }
                Some(SeqPath {
                    seq,
                    path: record.path,
                })
            },
            FileTally::new(),
        )
    }
}
