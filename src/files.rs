use crate::aggregate::Aggregator;
use crate::chart::write_file_chart;
use crate::cli::{CommonArgs, FilesArgs};
use crate::git::{log_lines, GitRepo, LogFormat};
use crate::model::{FileChange, FilesOutput, SCHEMA_VERSION};
use crate::rank::{rank, ChartData};
use anyhow::Context;
use chrono::Utc;
use std::io::{self, Write};

pub fn exec(common: CommonArgs, args: FilesArgs) -> anyhow::Result<()> {
    let repo = GitRepo::open(&args.repo).context("Failed to open git repository")?;
    let aggregator =
        Aggregator::new(&common.aggregate_config()).context("Failed to start worker pool")?;

    let output = repo
        .log(LogFormat::NameOnly, &common.log_range())
        .context("Failed to get file change log")?;
    let lines = log_lines(&output);

    let changes = aggregator.file_lines(&lines, &args.ignore);
    log::info!("counted changes for {} files", changes.len());

    let chart = ChartData::new(rank(changes), 0, Some(args.top));

    if args.json {
        return output_json(&chart.rows, &repo, &common, &args.ignore);
    }
    if args.ndjson {
        return output_ndjson(&chart.rows);
    }

    if chart.is_empty() {
        println!("No file changes found.");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_file_chart(&mut out, &chart, args.top)?;
    out.flush()?;
    Ok(())
}

fn output_json(
    entries: &[FileChange],
    repo: &GitRepo,
    common: &CommonArgs,
    ignore: &[String],
) -> anyhow::Result<()> {
    let output = FilesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repo.path().to_string_lossy().to_string(),
        since: common.since.clone(),
        until: common.until.clone(),
        ignore: ignore.to_vec(),
        entries: entries.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(entries: &[FileChange]) -> anyhow::Result<()> {
    for entry in entries {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}
