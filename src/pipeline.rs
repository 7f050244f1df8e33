use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use console::style;

use crate::aggregate;
use crate::chart::{self, ChartStyle};
use crate::error::PulseError;
use crate::model::{ActivityOutput, DateBucket, SCHEMA_VERSION};
use crate::source::HistorySource;

pub const DEFAULT_TITLE: &str = "Git Commit History";

/// Rendering knobs shared by both subcommands.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub style: ChartStyle,
    pub output: Option<PathBuf>,
    pub no_open: bool,
    pub title: Option<String>,
    pub json: bool,
    pub ndjson: bool,
}

pub fn exec(source: &dyn HistorySource, options: &RenderOptions) -> Result<()> {
    let records = source
        .collect()
        .context("Failed to collect commit history")?;
    let buckets = aggregate::date_buckets(&records);
    if buckets.is_empty() {
        return Err(PulseError::EmptyHistory.into());
    }

    if options.json || options.ndjson {
        return export(source, &buckets, options);
    }

    let title = options.title.as_deref().unwrap_or(DEFAULT_TITLE);
    let figure =
        chart::build_figure(&buckets, options.style, title).context("Failed to build chart")?;

    let path = options
        .output
        .clone()
        .unwrap_or_else(chart::default_artifact_path);
    chart::write_artifact(&path, &figure)
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;

    print_summary(source, records.len(), &buckets, &path);

    if !options.no_open {
        chart::open_artifact(&path);
    }
    Ok(())
}

fn export(source: &dyn HistorySource, buckets: &[DateBucket], options: &RenderOptions) -> Result<()> {
    if options.ndjson {
        for bucket in buckets {
            println!("{}", serde_json::to_string(bucket)?);
        }
        return Ok(());
    }

    let output = ActivityOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.label(),
        buckets: buckets.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_summary(source: &dyn HistorySource, commits: usize, buckets: &[DateBucket], path: &Path) {
    println!();
    println!("{}", style("Commit Activity").bold());
    println!("{}", "─".repeat(50));
    println!("Source:      {}", style(source.label()).cyan());
    println!("Commits:     {}", style(commits).cyan());
    println!("Active days: {}", style(buckets.len()).cyan());
    if let (Some(first), Some(last)) = (buckets.first(), buckets.last()) {
        println!(
            "Range:       {}",
            style(format!("{} to {}", first.date, last.date)).dim()
        );
    }
    println!("Chart:       {}", style(path.display()).green());
}
