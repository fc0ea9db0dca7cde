use anyhow::Result;
use clap::Args;
use quarry::api::types::ExtractRequest;
use quarry::config::QuarryConfig;
use quarry::research::output::truncate_chars;

#[derive(Args)]
pub struct ExtractArgs {
    /// URL to extract (repeatable)
    #[arg(long = "url", required = true)]
    pub urls: Vec<String>,

    /// What the extraction should focus on
    #[arg(long)]
    pub objective: Option<String>,

    /// Return full page content in addition to excerpts
    #[arg(long)]
    pub full_content: bool,

    /// Skip focused excerpts
    #[arg(long)]
    pub no_excerpts: bool,

    /// Upper bound on extracted text length
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Truncate printed output to this many characters (0 = no limit)
    #[arg(long, default_value_t = 0)]
    pub truncate: usize,
}

/// Extract URLs and print the response body as received.
pub async fn extract(config: &QuarryConfig, args: ExtractArgs) -> Result<()> {
    let client = super::client(config)?;
    let request = ExtractRequest {
        urls: args.urls,
        objective: args.objective,
        excerpts: !args.no_excerpts,
        full_content: args.full_content,
        max_text_length: args.max_length,
    };

    let body = client.extract_raw(&request).await?;
    println!("{}", truncate_chars(body.trim_end(), args.truncate));

    Ok(())
}
