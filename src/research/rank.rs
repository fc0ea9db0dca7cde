//! Source selection: deduplicate search hits by URL, filter, rank, and cap.

use std::collections::HashSet;

use serde::Serialize;

use crate::api::types::SearchHit;

/// Knobs for [`rank_sources`].
#[derive(Debug, Clone, Default)]
pub struct RankOptions {
    /// Keep only URLs containing this text (case-insensitive).
    pub require: Option<String>,
    /// URLs containing this text (case-insensitive) rank ahead of all others.
    pub prefer: Option<String>,
    /// Maximum number of sources returned.
    pub limit: usize,
}

/// A search hit chosen for extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSource {
    pub url: String,
    pub title: String,
    pub score: f64,
    pub preferred: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

/// Pick the sources worth extracting from a pile of search hits.
///
/// The first occurrence of each URL wins. Sorting is stable, so hits with equal
/// keys keep their search order.
pub fn rank_sources<'a, I>(hits: I, options: &RankOptions) -> Vec<RankedSource>
where
    I: IntoIterator<Item = &'a SearchHit>,
{
    let require = options.require.as_deref().map(str::to_lowercase);
    let prefer = options.prefer.as_deref().map(str::to_lowercase);

    let mut seen = HashSet::new();
    let mut ranked: Vec<RankedSource> = hits
        .into_iter()
        .filter(|hit| !hit.url.trim().is_empty())
        .filter(|hit| seen.insert(hit.url.clone()))
        .filter(|hit| match &require {
            Some(needle) => hit.url.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .map(|hit| RankedSource {
            url: hit.url.clone(),
            title: hit.title.clone().unwrap_or_default(),
            score: hit.score.unwrap_or(0.0),
            preferred: prefer
                .as_deref()
                .is_some_and(|needle| hit.url.to_lowercase().contains(needle)),
            preview: hit.preview().map(str::to_string),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.preferred
            .cmp(&a.preferred)
            .then_with(|| b.score.total_cmp(&a.score))
    });
    ranked.truncate(options.limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(url: &str, score: Option<f64>) -> SearchHit {
        SearchHit {
            url: url.into(),
            title: Some(format!("title of {url}")),
            snippet: None,
            excerpts: vec![],
            score,
        }
    }

    fn urls(ranked: &[RankedSource]) -> Vec<&str> {
        ranked.iter().map(|r| r.url.as_str()).collect()
    }

    #[test]
    fn sorts_by_score_and_caps() {
        let hits = vec![
            hit("https://a", Some(0.2)),
            hit("https://b", Some(0.9)),
            hit("https://c", None),
            hit("https://d", Some(0.5)),
        ];
        let ranked = rank_sources(&hits, &RankOptions { limit: 3, ..Default::default() });
        assert_eq!(urls(&ranked), ["https://b", "https://d", "https://a"]);
    }

    #[test]
    fn first_occurrence_of_a_url_wins() {
        let hits = vec![hit("https://a", Some(0.1)), hit("https://a", Some(0.99))];
        let ranked = rank_sources(&hits, &RankOptions { limit: 10, ..Default::default() });
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 0.1);
    }

    #[test]
    fn require_filters_case_insensitively() {
        let hits = vec![
            hit("https://docs.Snowflake.com/x", Some(0.3)),
            hit("https://blog.example.com/y", Some(0.9)),
        ];
        let options = RankOptions {
            require: Some("snowflake".into()),
            limit: 10,
            ..Default::default()
        };
        assert_eq!(urls(&rank_sources(&hits, &options)), ["https://docs.Snowflake.com/x"]);
    }

    #[test]
    fn preferred_urls_rank_first() {
        let hits = vec![
            hit("https://blog.example.com/a", Some(0.95)),
            hit("https://docs.example.com/b", Some(0.4)),
            hit("https://docs.example.com/c", Some(0.6)),
        ];
        let options = RankOptions {
            prefer: Some("docs.example.com".into()),
            limit: 10,
            ..Default::default()
        };
        let ranked = rank_sources(&hits, &options);
        assert_eq!(
            urls(&ranked),
            [
                "https://docs.example.com/c",
                "https://docs.example.com/b",
                "https://blog.example.com/a"
            ]
        );
        assert!(ranked[0].preferred && !ranked[2].preferred);
    }

    #[test]
    fn ties_keep_search_order_and_empty_urls_drop() {
        let hits = vec![
            hit("https://x", Some(0.5)),
            hit(" ", Some(1.0)),
            hit("https://y", Some(0.5)),
        ];
        let ranked = rank_sources(&hits, &RankOptions { limit: 5, ..Default::default() });
        assert_eq!(urls(&ranked), ["https://x", "https://y"]);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let hits = vec![hit("https://x", Some(0.5))];
        assert!(rank_sources(&hits, &RankOptions::default()).is_empty());
    }
}
