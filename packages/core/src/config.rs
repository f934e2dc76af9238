/// Configuration for the Notion content services
use crate::cache::{BlockCache, LruBlockCache, MemoryBlockCache};
use crate::services::NotionServiceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Largest page size the database query endpoint accepts
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const ENV_API_TOKEN: &str = "NOTION_API_TOKEN";
pub const ENV_DATABASE_ID: &str = "NOTION_DATABASE_ID";
pub const ENV_PAGE_SIZE: &str = "NOTION_PAGE_SIZE";
pub const ENV_CACHE_CAPACITY: &str = "NOTION_CACHE_CAPACITY";

/// Explicit configuration passed to the article service at construction
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    /// Integration token, consumed by the HTTP client implementation
    pub api_token: String,

    /// Database holding the articles
    pub database_id: String,

    /// Articles returned per listing
    pub page_size: usize,

    /// Maximum cached block forests; `None` keeps every forest
    pub cache_capacity: Option<usize>,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            database_id: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            cache_capacity: None,
        }
    }
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_token", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("page_size", &self.page_size)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

impl NotionConfig {
    pub fn new(api_token: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            database_id: database_id.into(),
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Read configuration from the `NOTION_*` environment variables
    ///
    /// Token and database id are required. The result is validated.
    pub fn from_env() -> Result<Self, NotionServiceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup, validating the result
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotionServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| NotionServiceError::configuration(format!("{} is not set", key)))
        };
        let number = |key: &str| -> Result<Option<usize>, NotionServiceError> {
            lookup(key)
                .map(|raw| {
                    raw.trim().parse::<usize>().map_err(|e| {
                        NotionServiceError::configuration(format!(
                            "{} must be a positive integer, got '{}': {}",
                            key, raw, e
                        ))
                    })
                })
                .transpose()
        };

        let config = Self {
            api_token: required(ENV_API_TOKEN)?,
            database_id: required(ENV_DATABASE_ID)?,
            page_size: number(ENV_PAGE_SIZE)?.unwrap_or(DEFAULT_PAGE_SIZE),
            cache_capacity: number(ENV_CACHE_CAPACITY)?,
        };

        config
            .validate()
            .map_err(NotionServiceError::configuration)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_token.is_empty() {
            return Err("api_token cannot be empty".to_string());
        }

        if self.database_id.is_empty() {
            return Err("database_id cannot be empty".to_string());
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            ));
        }

        if self.cache_capacity == Some(0) {
            return Err("cache_capacity must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Cache store matching `cache_capacity`
    ///
    /// A zero capacity falls back to the unbounded store; `validate` rejects it.
    pub fn build_cache(&self) -> Arc<dyn BlockCache> {
        match self.cache_capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => Arc::new(LruBlockCache::new(capacity)),
            None => Arc::new(MemoryBlockCache::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = NotionConfig::default();
        assert_eq!(config.page_size, 10);
        assert!(config.cache_capacity.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = NotionConfig::new("secret", "db-1");

        // Valid config
        assert!(config.validate().is_ok());

        // Invalid: page size out of range
        config.page_size = 0;
        assert!(config.validate().is_err());
        config.page_size = 101;
        assert!(config.validate().is_err());

        // Invalid: zero cache capacity
        config.page_size = 100;
        config.cache_capacity = Some(0);
        assert!(config.validate().is_err());

        // Invalid: missing credentials
        assert!(NotionConfig::new("", "db-1").validate().is_err());
        assert!(NotionConfig::new("secret", "").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", NotionConfig::new("secret_abc123", "db-1"));
        assert!(!rendered.contains("secret_abc123"));
        assert!(rendered.contains("db-1"));
    }

    #[test]
    fn test_from_lookup_reads_all_keys() {
        let config = NotionConfig::from_lookup(lookup(&[
            (ENV_API_TOKEN, "secret"),
            (ENV_DATABASE_ID, "db-1"),
            (ENV_PAGE_SIZE, "25"),
            (ENV_CACHE_CAPACITY, "64"),
        ]))
        .unwrap();

        assert_eq!(config.api_token, "secret");
        assert_eq!(config.database_id, "db-1");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.cache_capacity, Some(64));
    }

    #[test]
    fn test_from_lookup_requires_token() {
        let err = NotionConfig::from_lookup(lookup(&[(ENV_DATABASE_ID, "db-1")])).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: NOTION_API_TOKEN is not set");
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let vars = [
            (ENV_API_TOKEN, "secret"),
            (ENV_DATABASE_ID, "db-1"),
            (ENV_PAGE_SIZE, "lots"),
        ];
        assert!(matches!(
            NotionConfig::from_lookup(lookup(&vars)),
            Err(NotionServiceError::Configuration(_))
        ));

        let vars = [
            (ENV_API_TOKEN, "secret"),
            (ENV_DATABASE_ID, "db-1"),
            (ENV_PAGE_SIZE, "500"),
        ];
        assert!(NotionConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: NotionConfig =
            serde_json::from_str(r#"{ "api_token": "t", "database_id": "d" }"#).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.cache_capacity.is_none());
    }

    #[tokio::test]
    async fn test_build_cache_follows_capacity() {
        let unbounded = NotionConfig::new("t", "d").build_cache();
        let bounded = NotionConfig::new("t", "d").with_cache_capacity(1).build_cache();

        bounded.insert("a", Vec::new()).await;
        bounded.insert("b", Vec::new()).await;
        unbounded.insert("a", Vec::new()).await;
        unbounded.insert("b", Vec::new()).await;

        assert_eq!(bounded.len().await, 1);
        assert_eq!(unbounded.len().await, 2);
    }
}
