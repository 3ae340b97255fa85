// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use async_trait::async_trait;
use redis::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// The engine answered, but the reply does not have the expected shape.
    #[error("Malformed RediSearch reply: {reason} (raw: {raw})")]
    MalformedReply { reason: String, raw: String },
    /// Connection or engine-side failure, passed through untouched.
    #[error("Redis transport error: {0}")]
    Transport(#[from] redis::RedisError),
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),
}

impl SearchError {
    pub(crate) fn malformed(reason: impl Into<String>, raw: &Value) -> Self {
        SearchError::MalformedReply {
            reason: reason.into(),
            raw: format!("{:?}", raw),
        }
    }

    /// True when the engine was reached but its answer could not be used.
    pub fn is_malformed(&self) -> bool {
        matches!(self, SearchError::MalformedReply { .. })
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Sends one command to the search engine and hands back the undecoded reply.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &str, args: &[String]) -> Result<Value>;
}
