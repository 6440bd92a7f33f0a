//! Configuration for decision extraction.

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable overriding the model name.
pub const MODEL_VAR: &str = "MEETING_DECISIONS_MODEL";
/// Environment variable overriding the store directory.
pub const STORE_VAR: &str = "MEETING_DECISIONS_STORE";
/// Environment variable overriding the API base URL.
pub const API_BASE_VAR: &str = "MEETING_DECISIONS_API_BASE";

/// Default language model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
/// Default Generative Language API endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Extraction configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Model passed to every completion request.
    pub model: String,

    /// API key for the language model, if any.
    pub api_key: Option<String>,

    /// Base URL of the language-model API.
    pub api_base: String,

    /// HTTP request timeout.
    pub request_timeout: Duration,

    /// Directory holding the persistent vector store.
    pub store_dir: PathBuf,

    /// Name of the stored collection.
    pub collection: String,

    /// Maximum characters of retrieved context sent to the model.
    pub context_char_limit: usize,

    /// Number of cached retrievals; 0 disables the cache.
    pub cache_capacity: usize,

    /// Number of stored documents retrieved per query.
    pub top_k: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(60),
            store_dir: PathBuf::from("rag_storage"),
            collection: "meeting_docs".to_string(),
            context_char_limit: 3000,
            cache_capacity: 64,
            top_k: 1,
        }
    }

    /// Defaults overridden by `GEMINI_API_KEY`, `MEETING_DECISIONS_MODEL`,
    /// `MEETING_DECISIONS_STORE` and `MEETING_DECISIONS_API_BASE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the variables
    /// read by [`from_env`](Self::from_env). Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();
        if let Some(key) = get(API_KEY_VAR) {
            config.api_key = Some(key);
        }
        if let Some(model) = get(MODEL_VAR) {
            config.model = model;
        }
        if let Some(dir) = get(STORE_VAR) {
            config.store_dir = PathBuf::from(dir);
        }
        if let Some(base) = get(API_BASE_VAR) {
            config.api_base = base;
        }
        config
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API base URL.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Set the HTTP request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the store directory.
    pub fn with_store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store_dir = dir.into();
        self
    }

    /// Set the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the retrieved-context character limit.
    pub fn with_context_char_limit(mut self, limit: usize) -> Self {
        self.context_char_limit = limit;
        self
    }

    /// Set the query cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set how many documents are retrieved per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}
