// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://www.zangia.mn";
pub const DEFAULT_LIST_PATH_TEMPLATE: &str = "/job/list/pg.{page}";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_MAX_PAGES: u32 = 10;

const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const PAGE_PLACEHOLDER: &str = "{page}";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Origin that list and detail paths are resolved against
    pub base_url: String,
    /// Path of a list page; `{page}` is replaced with the page index
    pub list_path_template: String,
    pub user_agent: String,
    /// No timeout is applied when unset
    pub request_timeout_secs: Option<u64>,
    pub max_pages: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            list_path_template: DEFAULT_LIST_PATH_TEMPLATE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl ScraperConfig {
    /// Load configuration from YAML, then apply environment overrides.
    ///
    /// An explicit path must exist. Without one, `config.yaml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    fn load_with_env(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(env);
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a struct.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = env("JOB_POSTINGS_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(user_agent) = env("JOB_POSTINGS_USER_AGENT") {
            self.user_agent = user_agent;
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.base_url))?;

        if !self.list_path_template.contains(PAGE_PLACEHOLDER) {
            anyhow::bail!(
                "list_path_template must contain {}: {}",
                PAGE_PLACEHOLDER,
                self.list_path_template
            );
        }

        if self.max_pages == 0 {
            anyhow::bail!("max_pages must be at least 1");
        }

        Ok(())
    }

    /// Path of the list page for a 1-based index
    pub fn list_path(&self, page: u32) -> String {
        self.list_path_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}
