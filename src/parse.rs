//! Line-level parsing of `git log` output.
//!
//! Every function here is total over its input: a malformed line yields
//! `None` (with a diagnostic through `log`) and never stops the caller from
//! reading the rest of the stream.

use crate::model::{AuthorUnit, CommitRecord, FilePathRecord, StatRecord};
use chrono::{DateTime, Utc};
use std::mem;
use thiserror::Error;

pub const DELIMITER: char = '|';

const COMMIT_FIELDS: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
enum LineError {
    #[error("expected {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },
    #[error("invalid timestamp '{0}'")]
    Timestamp(String),
}

/// Parse a `hash|author|epoch|subject` line.
pub fn parse_commit_line(line: &str) -> Option<CommitRecord> {
    match try_commit_line(line) {
        Ok(record) => Some(record),
        Err(LineError::MissingFields { .. }) => None,
        Err(e) => {
            log::warn!("skipping commit line {line:?}: {e}");
            None
        }
    }
}

fn try_commit_line(line: &str) -> Result<CommitRecord, LineError> {
    let fields: Vec<&str> = line.splitn(COMMIT_FIELDS, DELIMITER).collect();
    if fields.len() != COMMIT_FIELDS {
        return Err(LineError::MissingFields {
            expected: COMMIT_FIELDS,
            found: fields.len(),
        });
    }

    Ok(CommitRecord {
        hash: non_empty(fields[0]),
        author: fields[1].to_string(),
        timestamp: parse_timestamp(fields[2])?,
        subject: non_empty(fields[3]),
    })
}

/// Parse a numstat header: `hash|author|epoch` or `author|epoch`.
pub fn parse_header_line(line: &str) -> Option<CommitRecord> {
    match try_header_line(line) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("skipping header line {line:?}: {e}");
            None
        }
    }
}

fn try_header_line(line: &str) -> Result<CommitRecord, LineError> {
    let (rest, epoch) = line
        .rsplit_once(DELIMITER)
        .ok_or(LineError::MissingFields { expected: 2, found: 1 })?;

    let (hash, author) = match rest.split_once(DELIMITER) {
        Some((hash, author)) if looks_like_hash(hash) => (non_empty(hash), author),
        _ => (None, rest),
    };

    Ok(CommitRecord {
        hash,
        author: author.to_string(),
        timestamp: parse_timestamp(epoch)?,
        subject: None,
    })
}

/// Parse `added removed path`. Non-numeric counts (git prints `-` for
/// binary files) count as zero.
pub fn parse_stat_line(line: &str) -> Option<StatRecord> {
    let [added, removed, path] = stat_fields(line)?;
    Some(StatRecord {
        lines_added: count(added),
        lines_removed: count(removed),
        path: path.to_string(),
    })
}

fn stat_fields(line: &str) -> Option<[&str; 3]> {
    if line.contains('\t') {
        let mut fields = line.splitn(3, '\t');
        let added = fields.next()?;
        let removed = fields.next()?;
        let path = fields.next()?;
        return Some([added.trim(), removed.trim(), path]);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [added, removed, path] => Some([*added, *removed, *path]),
        _ => None,
    }
}

fn count(field: &str) -> u64 {
    field.parse().unwrap_or_else(|_| {
        log::debug!("non-numeric numstat field {field:?}, counting as 0");
        0
    })
}

/// Parse one line of `--name-only` output.
pub fn parse_path_line(line: &str) -> Option<FilePathRecord> {
    let path = line.trim();
    if path.is_empty() {
        return None;
    }
    Some(FilePathRecord {
        path: path.to_string(),
    })
}

fn parse_timestamp(field: &str) -> Result<DateTime<Utc>, LineError> {
    field
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| LineError::Timestamp(field.to_string()))
}

fn non_empty(field: &str) -> Option<String> {
    let field = field.trim();
    (!field.is_empty()).then(|| field.to_string())
}

fn looks_like_hash(field: &str) -> bool {
    matches!(field.len(), 40 | 64) && field.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Shape of one line of the mixed header/numstat stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixedLine {
    Separator,
    Header(Option<CommitRecord>),
    Stat(StatRecord),
    Malformed,
}

pub fn classify_mixed_line(line: &str) -> MixedLine {
    if line.trim().is_empty() {
        return MixedLine::Separator;
    }
    if line.contains('\t') {
        if let Some(stat) = parse_stat_line(line) {
            return MixedLine::Stat(stat);
        }
    }
    if line.contains(DELIMITER) {
        return MixedLine::Header(parse_header_line(line));
    }
    match parse_stat_line(line) {
        Some(stat) => MixedLine::Stat(stat),
        None => {
            log::debug!("discarding malformed numstat line {line:?}");
            MixedLine::Malformed
        }
    }
}

#[derive(Debug)]
enum State {
    AwaitingHeader,
    AwaitingStats(AuthorUnit),
}

/// Resolves the positional link between a header and the stat lines after
/// it, producing one [`AuthorUnit`] per commit.
#[derive(Debug)]
pub struct StreamAssembler {
    state: State,
    next_seq: usize,
    units: Vec<AuthorUnit>,
    orphaned: usize,
}

impl StreamAssembler {
    pub fn new() -> Self {
        Self {
            state: State::AwaitingHeader,
            next_seq: 0,
            units: Vec::new(),
            orphaned: 0,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        match classify_mixed_line(line) {
            MixedLine::Separator | MixedLine::Malformed => {}
            MixedLine::Header(record) => {
                self.flush();
                if let Some(record) = record {
                    let unit = AuthorUnit::from_commit(self.next_seq, record);
                    self.next_seq += 1;
                    self.state = State::AwaitingStats(unit);
                }
            }
            MixedLine::Stat(stat) => match &mut self.state {
                State::AwaitingStats(unit) => unit.add_stats(&stat),
                State::AwaitingHeader => self.orphaned += 1,
            },
        }
    }

    fn flush(&mut self) {
        if let State::AwaitingStats(unit) = mem::replace(&mut self.state, State::AwaitingHeader) {
            self.units.push(unit);
        }
    }

    pub fn finish(mut self) -> Vec<AuthorUnit> {
        self.flush();
        if self.orphaned > 0 {
            log::debug!("dropped {} stat lines with no valid header", self.orphaned);
        }
        self.units
    }
}

impl Default for StreamAssembler {
    fn default() -> Self {
        Self::new()
    }
}

pub fn assemble_numstat<'a, I>(lines: I) -> Vec<AuthorUnit>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut assembler = StreamAssembler::new();
    for line in lines {
        assembler.push_line(line);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn commit_line_keeps_pipes_in_subject() {
        let record = parse_commit_line(&format!("{HASH}|Ada|1700000000|fix: a | b")).unwrap();
        assert_eq!(record.hash.as_deref(), Some(HASH));
        assert_eq!(record.author, "Ada");
        assert_eq!(record.timestamp.timestamp(), 1_700_000_000);
        assert_eq!(record.subject.as_deref(), Some("fix: a | b"));
    }

    #[test]
    fn commit_line_with_too_few_fields_is_dropped() {
        assert_eq!(
            try_commit_line("abc|Ada|1700000000"),
            Err(LineError::MissingFields { expected: 4, found: 3 })
        );
        assert!(parse_commit_line("abc|Ada|1700000000").is_none());
    }

    #[test]
    fn commit_line_with_bad_timestamp_is_dropped() {
        assert_eq!(
            try_commit_line("abc|Ada|yesterday|msg"),
            Err(LineError::Timestamp("yesterday".to_string()))
        );
    }

    #[test]
    fn empty_hash_becomes_none() {
        let record = parse_commit_line("|Ada|1700000000|").unwrap();
        assert!(record.hash.is_none());
        assert!(record.subject.is_none());
    }

    #[test]
    fn header_accepts_both_shapes() {
        let short = parse_header_line("Ada Lovelace|1700000000").unwrap();
        assert!(short.hash.is_none());
        assert_eq!(short.author, "Ada Lovelace");

        let long = parse_header_line(&format!("{HASH}|Ada Lovelace|1700000000")).unwrap();
        assert_eq!(long.hash.as_deref(), Some(HASH));
        assert_eq!(long.author, "Ada Lovelace");
    }

    #[test]
    fn binary_numstat_counts_as_zero() {
        let stat = parse_stat_line("-\t-\timg/logo.png").unwrap();
        assert_eq!((stat.lines_added, stat.lines_removed), (0, 0));
        assert_eq!(stat.path, "img/logo.png");
    }

    #[test]
    fn tab_separated_stat_keeps_spaces_in_path() {
        let stat = parse_stat_line("3\t1\tdocs/my notes.md").unwrap();
        assert_eq!(stat.path, "docs/my notes.md");
        assert_eq!((stat.lines_added, stat.lines_removed), (3, 1));
    }

    #[test]
    fn whitespace_stat_needs_three_tokens() {
        assert!(parse_stat_line("3 1").is_none());
        assert!(parse_stat_line("3 1 a b").is_none());
        assert!(parse_stat_line("3 1 a").is_some());
    }

    #[test]
    fn assembler_attributes_stats_to_preceding_header() {
        let lines = [
            "Ada|100",
            "",
            "10\t2\ta.rs",
            "5\t0\tb.rs",
            "Grace|200",
            "",
            "1\t1\tc.rs",
            "Linus|300",
        ];
        let units = assemble_numstat(lines);
        assert_eq!(units.len(), 3);
        assert_eq!(units[0].author, "Ada");
        assert_eq!((units[0].lines_added, units[0].lines_removed), (15, 2));
        assert_eq!(units[1].author, "Grace");
        assert_eq!((units[1].lines_added, units[1].lines_removed), (1, 1));
        assert_eq!(units[2].author, "Linus");
        assert_eq!(units[2].lines_added, 0);
        assert_eq!(
            units.iter().map(|u| u.seq).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn stats_after_invalid_header_are_not_misattributed() {
        let lines = ["Ada|100", "1\t0\ta.rs", "Grace|notatime", "7\t7\tb.rs", "Ada|300"];
        let units = assemble_numstat(lines);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].lines_added, 1);
        assert_eq!(units[1].lines_added, 0);
    }

    #[test]
    fn orphan_stats_before_first_header_are_dropped() {
        let units = assemble_numstat(["4\t4\tx.rs", "Ada|100"]);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].lines_added, 0);
    }

    #[test]
    fn path_lines_are_trimmed() {
        assert_eq!(parse_path_line("  src/main.rs ").unwrap().path, "src/main.rs");
        assert!(parse_path_line("   ").is_none());
    }
}
