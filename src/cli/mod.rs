pub mod chat;
pub mod doctor;
pub mod extract;
pub mod gather;
pub mod new_note;
pub mod search;

use anyhow::{Context, Result};
use quarry::api::ResearchClient;
use quarry::config::QuarryConfig;
use quarry::notes::Topic;

/// Print the topic allow-list, one per line.
pub fn topics() {
    for topic in Topic::ALL {
        println!("{topic}");
    }
}

/// Build an API client from config, with a CLI-friendly error.
fn client(config: &QuarryConfig) -> Result<ResearchClient> {
    ResearchClient::new(&config.api).context("cannot call the research API")
}
