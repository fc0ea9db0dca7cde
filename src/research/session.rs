//! A research "gather" session: search several queries, pick the best sources,
//! extract them, and save the raw responses.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use serde::Serialize;
use serde_json::{json, Value};

use super::output::write_json;
use super::rank::{rank_sources, RankOptions, RankedSource};
use crate::api::types::{ExtractRequest, SearchHit, SearchRequest};
use crate::api::ResearchClient;
use crate::notes::normalize_slug;

/// What to search for and how to choose sources.
#[derive(Debug, Clone)]
pub struct GatherPlan {
    /// Short name used in output filenames.
    pub label: String,
    /// Shared objective; each query's text is used when absent.
    pub objective: Option<String>,
    pub queries: Vec<String>,
    pub max_results: usize,
    pub max_chars_per_result: Option<usize>,
    pub rank: RankOptions,
}

/// Outcome of a single search query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub query: String,
    pub hits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GatherReport {
    pub search_path: PathBuf,
    pub extract_path: Option<PathBuf>,
    pub extract_error: Option<String>,
    pub queries: Vec<QueryOutcome>,
    pub sources: Vec<RankedSource>,
}

impl GatherReport {
    pub fn total_hits(&self) -> usize {
        self.queries.iter().map(|q| q.hits).sum()
    }
}

/// Run the session. Individual query or extract failures are recorded in the
/// report; only failures to write output abort.
pub async fn gather(
    client: &ResearchClient,
    plan: &GatherPlan,
    out_dir: &Path,
    now: DateTime<Utc>,
    progress: &ProgressBar,
) -> Result<GatherReport> {
    let label = normalize_slug(&plan.label).unwrap_or_else(|_| "session".to_string());
    let unix = now.timestamp();
    let millis = now.timestamp_millis();

    let mut responses = Vec::with_capacity(plan.queries.len());
    let mut outcomes = Vec::with_capacity(plan.queries.len());
    let mut hits = Vec::new();

    for query in &plan.queries {
        progress.set_message(format!("searching: {query}"));
        let request = SearchRequest {
            objective: Some(plan.objective.clone().unwrap_or_else(|| query.clone())),
            queries: vec![query.clone()],
            max_results: plan.max_results,
            max_chars_per_result: plan.max_chars_per_result,
        };

        match client.search(&request).await {
            Ok(response) => {
                let found = SearchHit::collect(&response);
                tracing::info!(query = %query, hits = found.len(), "search complete");
                outcomes.push(QueryOutcome {
                    query: query.clone(),
                    hits: found.len(),
                    error: None,
                });
                hits.extend(found);
                responses.push(tag_response(response, query, unix));
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "search failed");
                outcomes.push(QueryOutcome {
                    query: query.clone(),
                    hits: 0,
                    error: Some(e.to_string()),
                });
                responses.push(json!({ "query": query, "error": e.to_string() }));
            }
        }
        progress.inc(1);
    }

    let search_path = save_new(out_dir, "search", &label, millis, &responses)?;

    let sources = rank_sources(&hits, &plan.rank);

    let mut extract_path = None;
    let mut extract_error = None;
    if !sources.is_empty() {
        progress.set_message(format!("extracting {} sources", sources.len()));
        let mut request = ExtractRequest::new(sources.iter().map(|s| s.url.clone()).collect());
        request.objective = plan.objective.clone();

        match client.extract(&request).await {
            Ok(response) => {
                extract_path = Some(save_new(out_dir, "extract", &label, millis, &response)?);
            }
            Err(e) => {
                tracing::warn!(error = %e, "extract failed");
                extract_error = Some(e.to_string());
            }
        }
    }
    progress.finish_and_clear();

    Ok(GatherReport {
        search_path,
        extract_path,
        extract_error,
        queries: outcomes,
        sources,
    })
}

/// Write `{kind}_{label}_{millis}.json`, adding `_2`, `_3`, ... when an earlier
/// session already claimed the name.
fn save_new<T: Serialize + ?Sized>(
    out_dir: &Path,
    kind: &str,
    label: &str,
    millis: i64,
    value: &T,
) -> Result<PathBuf> {
    let mut attempt = 1u32;
    loop {
        let name = if attempt == 1 {
            format!("{kind}_{label}_{millis}.json")
        } else {
            format!("{kind}_{label}_{millis}_{attempt}.json")
        };
        let path = out_dir.join(name);
        if write_json(&path, value)? {
            return Ok(path);
        }
        tracing::debug!(path = %path.display(), "output name taken");
        attempt += 1;
    }
}

/// Annotate a search response with the query that produced it.
fn tag_response(response: Value, query: &str, unix: i64) -> Value {
    match response {
        Value::Object(mut map) => {
            map.insert("query".into(), json!(query));
            map.insert("search_timestamp".into(), json!(unix));
            Value::Object(map)
        }
        other => json!({ "query": query, "search_timestamp": unix, "response": other }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_response_merges_into_objects() {
        let tagged = tag_response(json!({"results": []}), "q", 42);
        assert_eq!(tagged, json!({"results": [], "query": "q", "search_timestamp": 42}));
    }

    #[test]
    fn tag_response_wraps_non_objects() {
        let tagged = tag_response(json!([1, 2]), "q", 7);
        assert_eq!(tagged["response"], json!([1, 2]));
        assert_eq!(tagged["query"], "q");
    }
}
