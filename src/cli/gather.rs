//! CLI `gather` command: multi-query search, source ranking, and extraction.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use quarry::config::{expand_tilde, QuarryConfig};
use quarry::research::rank::RankOptions;
use quarry::research::session::{self, GatherPlan};

#[derive(Args)]
pub struct GatherArgs {
    /// Session label used in output filenames
    #[arg(long)]
    pub label: String,

    /// Search query (repeatable)
    #[arg(long = "query", required = true)]
    pub queries: Vec<String>,

    /// Shared objective for every search and the extract call
    #[arg(long)]
    pub objective: Option<String>,

    /// Only extract URLs containing this text
    #[arg(long)]
    pub require: Option<String>,

    /// Rank URLs containing this text ahead of the rest
    #[arg(long)]
    pub prefer: Option<String>,

    /// Maximum number of URLs to extract (default: config `gather.extract_limit`)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Results requested per query (default: config `gather.max_results`)
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Output directory (default: config `gather.out_dir`)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub async fn gather(config: &QuarryConfig, args: GatherArgs) -> Result<()> {
    let client = super::client(config)?;
    let out_dir = match args.out {
        Some(path) => expand_tilde(&path.to_string_lossy()),
        None => config.resolved_out_dir(),
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output dir: {}", out_dir.display()))?;

    let plan = GatherPlan {
        label: args.label,
        objective: args.objective,
        max_results: args.max_results.unwrap_or(config.gather.max_results),
        max_chars_per_result: Some(config.gather.max_chars_per_result),
        rank: RankOptions {
            require: args.require,
            prefer: args.prefer,
            limit: args.limit.unwrap_or(config.gather.extract_limit),
        },
        queries: args.queries,
    };

    let pb = ProgressBar::new(plan.queries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
            .context("invalid progress template")?
            .progress_chars("##-"),
    );

    let report = session::gather(&client, &plan, &out_dir, chrono::Utc::now(), &pb).await?;

    println!("Searches:      {}", report.queries.len());
    for outcome in &report.queries {
        match &outcome.error {
            Some(err) => println!("  x {} ({err})", outcome.query),
            None => println!("  ok {} ({} results)", outcome.query, outcome.hits),
        }
    }
    println!("Total results: {}", report.total_hits());
    println!("Search JSON:   {}", report.search_path.display());

    if report.sources.is_empty() {
        println!("No sources selected for extraction.");
        return Ok(());
    }

    println!();
    println!("Top sources:");
    for (i, source) in report.sources.iter().enumerate() {
        let title = if source.title.is_empty() {
            "(untitled)"
        } else {
            source.title.as_str()
        };
        println!("  {}. {} ({:.2})", i + 1, title, source.score);
        println!("     {}", source.url);
    }
    println!();

    match (&report.extract_path, &report.extract_error) {
        (Some(path), _) => println!("Extract JSON:  {}", path.display()),
        (None, Some(err)) => eprintln!("Warning: extraction failed: {err}"),
        (None, None) => {}
    }

    Ok(())
}
