use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::api::types::{AuthScheme, LimitField};
use crate::notes::types::NoteLayout;

pub const DEFAULT_BASE_URL: &str = "https://api.parallel.ai";
pub const DEFAULT_BETA: &str = "search-extract-2025-10-10";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct QuarryConfig {
    pub general: GeneralConfig,
    pub workspace: WorkspaceConfig,
    pub api: ApiConfig,
    pub gather: GatherConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub root: String,
    pub layout: NoteLayout,
    pub create_default_template_if_missing: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub beta: String,
    pub auth: AuthScheme,
    pub limit_field: LimitField,
    pub timeout_secs: u64,
    pub chat_model: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GatherConfig {
    pub max_results: usize,
    pub extract_limit: usize,
    pub max_chars_per_result: usize,
    pub out_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        let root = default_workspace_dir().to_string_lossy().into_owned();
        Self {
            root,
            layout: NoteLayout::DatePrefixed,
            create_default_template_if_missing: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            beta: DEFAULT_BETA.into(),
            auth: AuthScheme::ApiKeyHeader,
            limit_field: LimitField::MaxResults,
            timeout_secs: 120,
            chat_model: "research".into(),
        }
    }
}

impl ApiConfig {
    /// The configured key, treating a blank value as unset.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            extract_limit: 7,
            max_chars_per_result: 8000,
            out_dir: ".".into(),
        }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns `~/.quarry/`
pub fn default_quarry_dir() -> PathBuf {
    home_dir().join(".quarry")
}

/// Returns the default config file path: `~/.quarry/config.toml`
pub fn default_config_path() -> PathBuf {
    default_quarry_dir().join("config.toml")
}

/// Returns `~/.openclaw/workspace`
pub fn default_workspace_dir() -> PathBuf {
    home_dir().join(".openclaw").join("workspace")
}

impl QuarryConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            QuarryConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// `OPENCLAW_WORKSPACE` wins over the older `WORKSPACE` spelling.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("QUARRY_LOG_LEVEL") {
            self.general.log_level = val;
        }
        if let Some(val) = non_empty_var("OPENCLAW_WORKSPACE").or_else(|| non_empty_var("WORKSPACE"))
        {
            self.workspace.root = val;
        }
        if let Some(val) = non_empty_var("PARALLEL_API_KEY") {
            self.api.api_key = Some(val);
        }
        if let Some(val) = non_empty_var("PARALLEL_BASE_URL") {
            self.api.base_url = val;
        }
    }

    /// Resolve the workspace root, expanding `~` if needed.
    pub fn resolved_workspace(&self) -> PathBuf {
        expand_tilde(&self.workspace.root)
    }

    /// Resolve the default output directory for `gather`.
    pub fn resolved_out_dir(&self) -> PathBuf {
        expand_tilde(&self.gather.out_dir)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        home_dir()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = QuarryConfig::default();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.workspace.layout, NoteLayout::DatePrefixed);
        assert!(!config.workspace.create_default_template_if_missing);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.beta, DEFAULT_BETA);
        assert_eq!(config.api.auth, AuthScheme::ApiKeyHeader);
        assert_eq!(config.api.limit_field, LimitField::MaxResults);
        assert!(config.api.api_key.is_none());
        assert_eq!(config.gather.extract_limit, 7);
        assert!(config.workspace.root.ends_with("workspace"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[general]
log_level = "debug"

[workspace]
root = "/tmp/ws"
layout = "time-only"
create_default_template_if_missing = true

[api]
auth = "bearer"
limit_field = "num_results"
chat_model = "speed"
"#;
        let config: QuarryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.workspace.root, "/tmp/ws");
        assert_eq!(config.workspace.layout, NoteLayout::TimeOnly);
        assert!(config.workspace.create_default_template_if_missing);
        assert_eq!(config.api.auth, AuthScheme::Bearer);
        assert_eq!(config.api.limit_field, LimitField::NumResults);
        assert_eq!(config.api.chat_model, "speed");
        // defaults still apply for unset fields
        assert_eq!(config.api.timeout_secs, 120);
        assert_eq!(config.gather.max_results, 10);
    }

    #[test]
    fn unknown_layout_is_rejected() {
        let toml_str = r#"
[workspace]
layout = "by-week"
"#;
        assert!(toml::from_str::<QuarryConfig>(toml_str).is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = QuarryConfig::default();
        std::env::set_var("QUARRY_LOG_LEVEL", "trace");
        std::env::set_var("OPENCLAW_WORKSPACE", "/tmp/override-ws");
        std::env::set_var("PARALLEL_API_KEY", "pk-test");

        config.apply_env_overrides();

        assert_eq!(config.general.log_level, "trace");
        assert_eq!(config.workspace.root, "/tmp/override-ws");
        assert_eq!(config.api.api_key.as_deref(), Some("pk-test"));

        // Clean up
        std::env::remove_var("QUARRY_LOG_LEVEL");
        std::env::remove_var("OPENCLAW_WORKSPACE");
        std::env::remove_var("PARALLEL_API_KEY");
    }

    #[test]
    fn blank_api_key_counts_as_unset() {
        let config: QuarryConfig = toml::from_str("[api]\napi_key = \"   \"\n").unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("   "));
        assert!(config.api.api_key().is_none());

        let config: QuarryConfig = toml::from_str("[api]\napi_key = \"pk-file\"\n").unwrap();
        assert_eq!(config.api.api_key(), Some("pk-file"));
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/notes"), PathBuf::from("/var/notes"));
        assert!(expand_tilde("~/notes").ends_with("notes"));
    }
}
