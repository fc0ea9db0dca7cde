//! Request and response shapes for the search / extract / chat API.
//!
//! The upstream contract has shifted between API versions, so request bodies are
//! assembled here rather than derived, and responses are kept as raw JSON with
//! typed views layered on top.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

/// How the API key is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthScheme {
    /// `x-api-key: <key>`
    #[default]
    #[serde(rename = "x-api-key")]
    ApiKeyHeader,
    /// `authorization: Bearer <key>`
    Bearer,
}

/// Field name the search endpoint reads its result limit from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitField {
    #[default]
    MaxResults,
    NumResults,
    Limit,
}

impl LimitField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxResults => "max_results",
            Self::NumResults => "num_results",
            Self::Limit => "limit",
        }
    }
}

/// A search call: a natural-language objective, keyword queries, or both.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub objective: Option<String>,
    pub queries: Vec<String>,
    pub max_results: usize,
    /// Excerpt budget per result; omitted from the body when `None`.
    pub max_chars_per_result: Option<usize>,
}

impl SearchRequest {
    pub fn to_body(&self, limit_field: LimitField) -> Value {
        let mut body = Map::new();
        if let Some(objective) = &self.objective {
            body.insert("objective".into(), json!(objective));
        }
        if !self.queries.is_empty() {
            body.insert("search_queries".into(), json!(self.queries));
        }
        body.insert(limit_field.as_str().into(), json!(self.max_results));
        if let Some(max_chars) = self.max_chars_per_result {
            body.insert(
                "excerpts".into(),
                json!({ "max_chars_per_result": max_chars }),
            );
        }
        Value::Object(body)
    }
}

/// Content extraction for one or more URLs.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractRequest {
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    pub excerpts: bool,
    pub full_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_text_length: Option<usize>,
}

impl ExtractRequest {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            objective: None,
            excerpts: true,
            full_content: false,
            max_text_length: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// A non-streaming request with an optional system prompt followed by one user turn.
    pub fn new(model: impl Into<String>, system: Option<&str>, user: impl Into<String>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system.map(str::trim).filter(|s| !s.is_empty()) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(user));
        Self {
            model: model.into(),
            messages,
            stream: false,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A chat completion as received.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub raw: String,
}

impl ChatCompletion {
    /// The assistant text, or the raw body when it is not the expected shape.
    pub fn text(&self) -> String {
        serde_json::from_str::<Value>(&self.raw)
            .ok()
            .and_then(|v| {
                v.pointer("/choices/0/message/content")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| self.raw.clone())
    }
}

/// One result record from a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub excerpts: Vec<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl SearchHit {
    /// Pull result records out of a search response.
    ///
    /// Accepts both `{"results": [...]}` and `{"data": {"results": [...]}}`.
    /// Entries that are not objects or have no string `url` are skipped.
    pub fn collect(response: &Value) -> Vec<SearchHit> {
        let results = response
            .get("results")
            .or_else(|| response.pointer("/data/results"))
            .and_then(Value::as_array);

        let Some(results) = results else {
            return Vec::new();
        };

        results
            .iter()
            .filter(|item| item.get("url").and_then(Value::as_str).is_some())
            .filter_map(|item| match serde_json::from_value(item.clone()) {
                Ok(hit) => Some(hit),
                Err(e) => {
                    warn!(error = %e, "skipping malformed search result");
                    None
                }
            })
            .collect()
    }

    /// Snippet if present, otherwise the first excerpt.
    pub fn preview(&self) -> Option<&str> {
        self.snippet
            .as_deref()
            .or_else(|| self.excerpts.first().map(String::as_str))
    }
}
