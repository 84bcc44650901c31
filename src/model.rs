use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One commit line of the `hash|author|epoch|subject` log format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: Option<String>,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub subject: Option<String>,
}

/// One numstat line. Belongs to the header that precedes it in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRecord {
    pub lines_added: u64,
    pub lines_removed: u64,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePathRecord {
    pub path: String,
}

/// A commit with its author resolved and its numstat lines summed.
///
/// `seq` is the commit's position in the source stream. Units are
/// self-contained, so they can be dispatched to workers in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorUnit {
    pub seq: usize,
    pub hash: Option<String>,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub lines_added: u64,
    pub lines_removed: u64,
}

impl AuthorUnit {
    pub fn from_commit(seq: usize, record: CommitRecord) -> Self {
        Self {
            seq,
            hash: record.hash,
            author: record.author,
            timestamp: record.timestamp,
            lines_added: 0,
            lines_removed: 0,
        }
    }

    pub fn add_stats(&mut self, stats: &StatRecord) {
        self.lines_added += stats.lines_added;
        self.lines_removed += stats.lines_removed;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    pub commits: u64,
    pub first_commit: DateTime<Utc>,
    pub latest_commit: DateTime<Utc>,
    pub lines_added: u64,
    pub lines_removed: u64,
}

impl Contributor {
    pub fn new(unit: &AuthorUnit) -> Self {
        Self {
            name: unit.author.clone(),
            commits: 1,
            first_commit: unit.timestamp,
            latest_commit: unit.timestamp,
            lines_added: unit.lines_added,
            lines_removed: unit.lines_removed,
        }
    }

    pub fn add_unit(&mut self, unit: &AuthorUnit) {
        self.commits += 1;
        if unit.timestamp < self.first_commit {
            self.first_commit = unit.timestamp;
        }
        if unit.timestamp > self.latest_commit {
            self.latest_commit = unit.timestamp;
        }
        self.lines_added += unit.lines_added;
        self.lines_removed += unit.lines_removed;
    }

    pub fn net_lines(&self) -> i64 {
        self.lines_added as i64 - self.lines_removed as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub change_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub min_commits: u64,
    pub entries: Vec<Contributor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub ignore: Vec<String>,
    pub entries: Vec<FileChange>,
}
