use crate::error::{GitstatsError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// The three `git log` shapes the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `hash|author|epoch|subject`, one line per commit.
    Commits,
    /// `hash|author|epoch` headers followed by numstat lines.
    NumStat,
    /// Bare file paths, one per touched file, blank line between commits.
    NameOnly,
}

impl LogFormat {
    pub fn args(self) -> &'static [&'static str] {
        match self {
            LogFormat::Commits => &["log", "--pretty=format:%H|%an|%at|%s"],
            LogFormat::NumStat => &["log", "--pretty=format:%H|%an|%at", "--numstat"],
            LogFormat::NameOnly => &["log", "--name-only", "--pretty=format:"],
        }
    }
}

/// Date bounds handed straight to `git log`, which parses them itself.
#[derive(Debug, Clone, Default)]
pub struct LogRange {
    pub since: Option<String>,
    pub until: Option<String>,
}

impl LogRange {
    fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(since) = &self.since {
            args.push(format!("--since={since}"));
        }
        if let Some(until) = &self.until {
            args.push(format!("--until={until}"));
        }
        args
    }
}

pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository at `path`. Fails if `git` cannot run there.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_dir() {
            return Err(GitstatsError::Git(format!(
                "repository path '{}' is not a directory",
                path.display()
            )));
        }

        run_git(&path, &["rev-parse", "--git-dir"])?;
        log::debug!("opened repository at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `git log` in the given format and return its captured stdout.
    pub fn log(&self, format: LogFormat, range: &LogRange) -> Result<String> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading git log...");
        pb.enable_steady_tick(Duration::from_millis(100));

        let mut args: Vec<String> = vec!["-c".to_string(), "core.quotePath=false".to_string()];
        args.extend(format.args().iter().map(|a| a.to_string()));
        args.extend(range.args());

        let result = run_git(&self.path, &args);
        pb.finish_and_clear();

        let output = result?;
        log::debug!("git log ({format:?}) returned {} bytes", output.len());
        Ok(output)
    }
}

fn run_git<S: AsRef<std::ffi::OsStr>>(dir: &Path, args: &[S]) -> Result<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .map_err(|e| GitstatsError::Git(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        return Err(GitstatsError::Git(if stderr.is_empty() {
            format!("git exited with {}", output.status)
        } else {
            format!("error accessing git repository: {stderr}")
        }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Split captured output into lines, dropping the trailing newline(s).
pub fn log_lines(output: &str) -> Vec<&str> {
    let trimmed = output.trim_end_matches(['\n', '\r']);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_lines_trims_trailing_blank_line() {
        assert_eq!(log_lines("a\nb\n\n"), vec!["a", "b"]);
        assert_eq!(log_lines("a\r\n\r\nb\r\n"), vec!["a", "", "b"]);
        assert!(log_lines("").is_empty());
        assert!(log_lines("\n").is_empty());
    }

    #[test]
    fn log_range_passes_dates_through() {
        let range = LogRange {
            since: Some("2 weeks ago".to_string()),
            until: None,
        };
        assert_eq!(range.args(), vec!["--since=2 weeks ago".to_string()]);
        assert!(LogRange::default().args().is_empty());
    }

    #[test]
    fn open_rejects_missing_directory() {
        let err = GitRepo::open("/definitely/not/a/repo").err().map(|e| e.to_string());
        assert!(err.unwrap_or_default().contains("not a directory"));
    }
}
