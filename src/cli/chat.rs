use anyhow::Result;
use clap::Args;
use quarry::api::types::ChatRequest;
use quarry::config::QuarryConfig;
use quarry::research::output::truncate_chars;

#[derive(Args)]
pub struct ChatArgs {
    /// The question to ask
    pub query: String,

    /// Optional system message
    #[arg(long)]
    pub system: Option<String>,

    /// Model name (default: config `api.chat_model`)
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.3)]
    pub temperature: f32,

    /// Upper bound on tokens in the answer
    #[arg(long, default_value_t = 4000)]
    pub max_tokens: u32,

    /// Truncate the answer to this many characters (0 = no limit)
    #[arg(long, default_value_t = 12000)]
    pub max_chars: usize,
}

/// Ask a single question and print the assistant's answer.
pub async fn chat(config: &QuarryConfig, args: ChatArgs) -> Result<()> {
    let client = super::client(config)?;
    let model = args.model.unwrap_or_else(|| config.api.chat_model.clone());
    let request = ChatRequest::new(model, args.system.as_deref(), args.query)
        .with_temperature(args.temperature)
        .with_max_tokens(args.max_tokens);

    let completion = client.chat(&request).await?;
    println!("{}", truncate_chars(&completion.text(), args.max_chars));

    Ok(())
}
