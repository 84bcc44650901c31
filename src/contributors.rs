use crate::aggregate::Aggregator;
use crate::chart::write_contributor_chart;
use crate::cli::{CommonArgs, ContributorsArgs};
use crate::git::{log_lines, GitRepo, LogFormat};
use crate::model::{Contributor, ContributorsOutput, SCHEMA_VERSION};
use crate::rank::{rank, ChartData};
use anyhow::Context;
use chrono::Utc;
use std::io::{self, Write};

pub fn exec(common: CommonArgs, args: ContributorsArgs) -> anyhow::Result<()> {
    let repo = GitRepo::open(&args.repo).context("Failed to open git repository")?;
    let aggregator =
        Aggregator::new(&common.aggregate_config()).context("Failed to start worker pool")?;

    let format = if args.commits_only {
        LogFormat::Commits
    } else {
        LogFormat::NumStat
    };
    let output = repo
        .log(format, &common.log_range())
        .context("Failed to get commit log")?;
    let lines = log_lines(&output);

    let contributors = match format {
        LogFormat::Commits => aggregator.commit_lines(&lines),
        _ => aggregator.numstat_lines(&lines),
    };
    log::info!("aggregated {} contributors from {} log lines", contributors.len(), lines.len());

    let chart = ChartData::new(rank(contributors), args.min_commits, None);

    if args.json {
        return output_json(&chart.rows, &repo, &common, args.min_commits);
    }
    if args.ndjson {
        return output_ndjson(&chart.rows);
    }

    if chart.is_empty() {
        println!("No contributors with at least {} commits found.", args.min_commits);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_contributor_chart(&mut out, &chart)?;
    out.flush()?;

    if !args.no_interactive {
        crate::prompt::run(io::stdin().lock(), &mut out, &chart, !args.commits_only)?;
    }
    Ok(())
}

fn output_json(
    entries: &[Contributor],
    repo: &GitRepo,
    common: &CommonArgs,
    min_commits: u64,
) -> anyhow::Result<()> {
    let output = ContributorsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        min_commits,
        entries: entries.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(entries: &[Contributor]) -> anyhow::Result<()> {
    for entry in entries {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}
