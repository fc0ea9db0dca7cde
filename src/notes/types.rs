//! Core note type definitions.
//!
//! Defines [`Topic`] (the closed set of research areas) and [`NoteLayout`]
//! (how a note's filename is laid out under its date directory).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The research areas a note can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    /// Cost attribution, budgets, warehouse spend.
    Finops,
    /// Native application packaging and distribution.
    NativeApps,
    Snowpark,
    /// Snowpark Container Services.
    Scs,
    Governance,
    Observability,
}

impl Topic {
    /// Every topic, in display order.
    pub const ALL: [Topic; 6] = [
        Self::Finops,
        Self::NativeApps,
        Self::Snowpark,
        Self::Scs,
        Self::Governance,
        Self::Observability,
    ];

    /// Directory-name representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finops => "finops",
            Self::NativeApps => "native-apps",
            Self::Snowpark => "snowpark",
            Self::Scs => "scs",
            Self::Governance => "governance",
            Self::Observability => "observability",
        }
    }

    /// Human-readable heading form: `native-apps` -> `Native-Apps`.
    pub fn title(&self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Comma-separated list of valid topic names, for diagnostics.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(Topic::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown topic: {s}"))
    }
}

/// Filename layout inside `research/<topic>/<date>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteLayout {
    /// `<date>_<HHMM>_<slug>.md`
    #[default]
    DatePrefixed,
    /// `<HHMM>_<slug>.md`
    TimeOnly,
}

impl NoteLayout {
    pub fn file_name(&self, stamp: &Stamp, slug: &str) -> String {
        match self {
            Self::DatePrefixed => format!("{}_{}_{}.md", stamp.date, stamp.time, slug),
            Self::TimeOnly => format!("{}_{}.md", stamp.time, slug),
        }
    }
}

/// The UTC time strings a note is stamped with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HHMM`, minute resolution.
    pub time: String,
    /// `YYYY-MM-DDTHH:MM:SS`
    pub timestamp: String,
    /// `YYYY-MM-DD HH:MM`
    pub minute: String,
}

impl Stamp {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H%M").to_string(),
            timestamp: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
            minute: now.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}
