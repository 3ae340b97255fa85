// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for the search client.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The host application is responsible for choosing the exporter (Prometheus, OTEL, etc.)
//!
//! # Metric Naming Convention
//! - `redisearch_client_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `command`: FT.SEARCH, FT.CREATE, ...
//! - `kind`: search, spellcheck
//! - `status`: success, error, malformed

use metrics::{counter, histogram};
use std::time::Duration;

/// Record a command sent to the engine
pub fn record_command(command: &str, status: &str) {
    counter!(
        "redisearch_client_commands_total",
        "command" => command.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record round-trip latency of a command
pub fn record_command_latency(command: &str, duration: Duration) {
    histogram!(
        "redisearch_client_command_seconds",
        "command" => command.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Record the outcome of decoding a reply
pub fn record_decode(kind: &str, status: &str) {
    counter!(
        "redisearch_client_decodes_total",
        "kind" => kind.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record how many documents a decoded reply carried
pub fn record_documents(kind: &str, count: usize) {
    histogram!(
        "redisearch_client_documents_returned",
        "kind" => kind.to_string()
    )
    .record(count as f64);
}

/// Record an index lifecycle operation (create, drop, synonym_add)
pub fn record_index_operation(operation: &str, success: bool) {
    counter!(
        "redisearch_client_index_operations_total",
        "operation" => operation.to_string(),
        "status" => if success { "success" } else { "error" }
    )
    .increment(1);
}
