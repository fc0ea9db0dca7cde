use anyhow::{bail, Result};
use clap::Args;
use quarry::api::types::SearchRequest;
use quarry::config::QuarryConfig;
use quarry::research::output::truncate_chars;

#[derive(Args)]
pub struct SearchArgs {
    /// Natural-language description of what you are looking for
    #[arg(long)]
    pub objective: Option<String>,

    /// Keyword query (repeatable)
    #[arg(long = "query")]
    pub queries: Vec<String>,

    /// Maximum results to return
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Max excerpt characters per result
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Truncate printed output to this many characters (0 = no limit)
    #[arg(long, default_value_t = 0)]
    pub truncate: usize,
}

/// Run a search from the terminal and print the response body as received.
pub async fn search(config: &QuarryConfig, args: SearchArgs) -> Result<()> {
    if args.objective.is_none() && args.queries.is_empty() {
        bail!("provide --objective, at least one --query, or both");
    }

    let client = super::client(config)?;
    let request = SearchRequest {
        objective: args.objective,
        queries: args.queries,
        max_results: args.max_results.unwrap_or(config.gather.max_results),
        max_chars_per_result: Some(args.max_chars.unwrap_or(config.gather.max_chars_per_result)),
    };

    let body = client.search_raw(&request).await?;
    println!("{}", truncate_chars(body.trim_end(), args.truncate));

    Ok(())
}
