// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Configuration for the search client.
//!
//! # Example
//!
//! ```
//! use redisearch_client::{DocumentMode, SearchConfig};
//!
//! // Minimal config (uses defaults)
//! let config = SearchConfig::default();
//! assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
//! assert_eq!(config.document_mode, DocumentMode::Object);
//!
//! // Full config
//! let config = SearchConfig {
//!     redis_url: "redis://search.internal:6379".into(),
//!     document_mode: DocumentMode::Array,
//!     default_language: Some("english".into()),
//! };
//! ```

use serde::Deserialize;

use crate::search::DocumentMode;

/// Configuration for the search client.
///
/// All fields have defaults, so an empty TOML/JSON object deserializes.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Redis connection string (e.g., "redis://localhost:6379")
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// How decoded documents are handed back: typed records or ordered rows
    #[serde(default)]
    pub document_mode: DocumentMode,

    /// Language applied to FT.ADD documents that don't set one
    #[serde(default)]
    pub default_language: Option<String>,
}

fn default_redis_url() -> String { "redis://127.0.0.1:6379".to_string() }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            redis_url: default_redis_url(),
            document_mode: DocumentMode::default(),
            default_language: None,
        }
    }
}
