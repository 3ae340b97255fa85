// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! # RediSearch Client
//!
//! Typed command builders and reply decoders for the RediSearch module.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Builders (pure)                        │
//! │  • IndexDefinition → FT.CREATE                              │
//! │  • IndexDocument   → FT.ADD                                 │
//! │  • SearchQuery / SpellcheckQuery → FT.SEARCH / FT.SPELLCHECK│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CommandExecutor (async)                    │
//! │  • RedisExecutor: ConnectionManager, raw redis::cmd         │
//! │  • ScriptedExecutor: in-memory, for tests                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                       raw redis::Value
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Decoders (pure)                         │
//! │  • decode_search: [count, rows...] → SearchResult<Document> │
//! │  • decode_spellcheck: TERM rows → SpellcheckDocument        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redisearch_client::{Index, RedisExecutor, SearchConfig};
//! use redisearch_client::search::{IndexDefinition, IndexDocument, SearchQuery, SpellcheckQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), redisearch_client::SearchError> {
//!     let config = SearchConfig::default();
//!     let executor = RedisExecutor::from_config(&config).await?;
//!
//!     let definition = IndexDefinition::new("articles")
//!         .text_weighted("title", 5.0)
//!         .text("body")
//!         .tag("tags");
//!     let index = Index::with_config(executor, definition, &config);
//!     index.create().await?;
//!
//!     index
//!         .add(&IndexDocument::new("doc:1").field("title", "Hello").field("body", "world"))
//!         .await?;
//!
//!     let hits = index.search(&SearchQuery::new("hello").with_scores()).await?;
//!     println!("{} matches", hits.count());
//!
//!     let spelling = index.spellcheck(&SpellcheckQuery::new("helo")).await?;
//!     println!("{} misspelled terms", spelling.count());
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! A reply that arrives but cannot be decoded is [`SearchError::MalformedReply`];
//! a command the engine or connection rejected is [`SearchError::Transport`].
//! Neither is retried.
//!
//! ## Modules
//!
//! - [`search`]: builders, result types and decoders
//! - [`executor`]: the command-execution boundary
//! - [`index`]: the [`Index`] handle tying both together

pub mod config;
pub mod executor;
pub mod index;
pub mod metrics;
pub mod search;

pub use config::SearchConfig;
pub use executor::memory::{RecordedCommand, ScriptedExecutor};
pub use executor::redis::RedisExecutor;
pub use executor::traits::{CommandExecutor, Result, SearchError};
pub use index::Index;
pub use search::{Document, DocumentMode, Documents, SearchResult, SpellcheckDocument};
