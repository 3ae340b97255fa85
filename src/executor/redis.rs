// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Redis-backed command executor.
//!
//! Commands go out as raw `redis::cmd` calls over a shared
//! [`ConnectionManager`]; replies come back as undecoded [`redis::Value`]s so
//! the search decoders see exactly what the module produced.
//!
//! ```text
//! FT.SEARCH idx:articles "@title:rust" WITHSCORES LIMIT 0 10
//!   → [2, "doc:1", "1.5", ["title", "..."], "doc:2", "0.7", ["title", "..."]]
//! ```

use std::time::Instant;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{cmd, Client, Value};
use tracing::debug;

use super::traits::{CommandExecutor, Result};
use crate::config::SearchConfig;
use crate::metrics;

pub struct RedisExecutor {
    connection: ConnectionManager,
}

impl RedisExecutor {
    /// Connect to the Redis instance at `connection_string`.
    pub async fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Connect using the URL from a [`SearchConfig`].
    pub async fn from_config(config: &SearchConfig) -> Result<Self> {
        Self::new(&config.redis_url).await
    }

    /// Wrap an existing connection manager (e.g. one shared with other stores).
    pub fn with_connection(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    /// Get a clone of the connection manager
    pub fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }
}

#[async_trait]
impl CommandExecutor for RedisExecutor {
    async fn execute(&self, command: &str, args: &[String]) -> Result<Value> {
        let mut conn = self.connection.clone();
        let mut request = cmd(command);
        for arg in args {
            request.arg(arg);
        }

        debug!(command, argc = args.len(), "Sending command");
        let start = Instant::now();
        let reply = request.query_async::<Value>(&mut conn).await;
        metrics::record_command_latency(command, start.elapsed());

        match reply {
            Ok(value) => {
                metrics::record_command(command, "success");
                Ok(value)
            }
            Err(e) => {
                metrics::record_command(command, "error");
                debug!(command, error = %e, "Command failed");
                Err(e.into())
            }
        }
    }
}
