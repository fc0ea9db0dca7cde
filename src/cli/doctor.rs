//! CLI `doctor` command: report workspace and API readiness.

use anyhow::Result;
use quarry::config::QuarryConfig;
use quarry::notes::{NoteScaffolder, ScaffoldOptions, Topic};

/// Inspect the workspace and API settings and print a health report.
pub fn doctor(config: &QuarryConfig) -> Result<()> {
    let workspace = config.resolved_workspace();
    let scaffolder = NoteScaffolder::new(&workspace, ScaffoldOptions::from(&config.workspace));

    println!("Quarry Health Report");
    println!("====================");
    println!();
    println!("Workspace:         {}", workspace.display());
    if !workspace.exists() {
        println!("  WARNING: workspace does not exist yet.");
    }
    println!("Note layout:       {:?}", config.workspace.layout);
    println!(
        "Missing templates: {}",
        if config.workspace.create_default_template_if_missing {
            "create default"
        } else {
            "fail"
        }
    );
    println!();

    println!("Templates:");
    let mut missing = 0usize;
    for topic in Topic::ALL {
        let path = scaffolder.template_path(topic);
        if path.is_file() {
            println!("  {:<15} OK", topic.as_str());
        } else {
            missing += 1;
            println!("  {:<15} missing ({})", topic.as_str(), path.display());
        }
    }
    println!();

    println!("API:");
    println!("  Base URL:        {}", config.api.base_url);
    println!("  Beta header:     {}", config.api.beta);
    println!(
        "  API key:         {}",
        if config.api.api_key().is_some() {
            "configured"
        } else {
            "NOT SET (export PARALLEL_API_KEY)"
        }
    );

    if missing > 0 && !config.workspace.create_default_template_if_missing {
        println!();
        println!("Notes for topics without a template will fail until TEMPLATE.md is added,");
        println!("or set `create_default_template_if_missing = true` under [workspace].");
    }

    Ok(())
}
