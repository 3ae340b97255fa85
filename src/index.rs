// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index handle
//!
//! Binds an [`IndexDefinition`] to a [`CommandExecutor`] and runs the index
//! lifecycle, document and query commands against it.
//!
//! # Example
//!
//! ```rust,no_run
//! # use redisearch_client::{Index, RedisExecutor};
//! # use redisearch_client::search::{IndexDefinition, IndexDocument, SearchQuery};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = RedisExecutor::new("redis://localhost:6379").await?;
//! let definition = IndexDefinition::new("articles")
//!     .text_weighted("title", 5.0)
//!     .text("body")
//!     .numeric_sortable("year");
//!
//! let index = Index::new(executor, definition);
//! index.create().await?;
//! index
//!     .add(&IndexDocument::new("doc:1").field("title", "Hello").field("body", "world").field("year", 2024))
//!     .await?;
//!
//! let result = index.search(&SearchQuery::new("hello").with_scores()).await?;
//! println!("{} hits", result.count());
//! # Ok(())
//! # }
//! ```

use redis::Value;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::executor::traits::{CommandExecutor, Result, SearchError};
use crate::metrics;
use crate::search::{
    decode_search_page, decode_spellcheck, raw_create_args, Document, DocumentMode,
    IndexDefinition, IndexDocument, SearchQuery, SearchResult, SpellcheckDocument, SpellcheckQuery,
    StopWords,
};

/// A RediSearch index reachable through an executor
pub struct Index<E> {
    executor: E,
    definition: IndexDefinition,
    document_mode: DocumentMode,
    default_language: Option<String>,
}

impl<E: CommandExecutor> Index<E> {
    pub fn new(executor: E, definition: IndexDefinition) -> Self {
        Self {
            executor,
            definition,
            document_mode: DocumentMode::default(),
            default_language: None,
        }
    }

    /// Create a handle using the document mode and default language from config.
    pub fn with_config(executor: E, definition: IndexDefinition, config: &SearchConfig) -> Self {
        Self {
            executor,
            definition,
            document_mode: config.document_mode,
            default_language: config.default_language.clone(),
        }
    }

    #[must_use]
    pub fn document_mode(mut self, mode: DocumentMode) -> Self {
        self.document_mode = mode;
        self
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &IndexDefinition {
        &self.definition
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Index lifecycle
    // ═══════════════════════════════════════════════════════════════════════════

    /// Create the index from its definition (FT.CREATE).
    pub async fn create(&self) -> Result<()> {
        let args = self.definition.to_ft_create_args()?;
        debug!(index = %self.name(), fields = self.definition.fields().len(), "Creating search index");
        self.lifecycle("create", "FT.CREATE", &args).await?;
        info!(index = %self.name(), "Search index created");
        Ok(())
    }

    /// Create the index from a pre-rendered schema list, ignoring the
    /// registered fields.
    pub async fn raw_create(&self, schema: &[String], stop_words: &StopWords) -> Result<()> {
        let args = raw_create_args(self.name(), schema, stop_words)?;
        self.lifecycle("raw_create", "FT.CREATE", &args).await?;
        info!(index = %self.name(), "Search index created from raw schema");
        Ok(())
    }

    /// Drop the index (FT.DROP). Indexed documents go with it.
    pub async fn drop_index(&self) -> Result<()> {
        self.lifecycle("drop", "FT.DROP", &[self.name().to_string()]).await?;
        info!(index = %self.name(), "Search index dropped");
        Ok(())
    }

    /// Register synonym groups, one FT.SYNADD per group. Returns the group ids
    /// assigned by the engine.
    pub async fn synonym_add<G, S>(&self, groups: &[G]) -> Result<Vec<i64>>
    where
        G: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut group_ids = Vec::with_capacity(groups.len());

        for group in groups {
            let terms: Vec<String> = group.as_ref().iter().map(|t| t.as_ref().trim().to_string()).collect();
            if terms.is_empty() {
                return Err(SearchError::InvalidDefinition("synonym group is empty".into()));
            }

            let mut args = Vec::with_capacity(terms.len() + 1);
            args.push(self.name().to_string());
            args.extend(terms);

            let reply = match self.executor.execute("FT.SYNADD", &args).await {
                Ok(reply) => {
                    metrics::record_index_operation("synonym_add", true);
                    reply
                }
                Err(e) => {
                    metrics::record_index_operation("synonym_add", false);
                    return Err(e);
                }
            };

            let group_id = match reply {
                Value::Int(id) => id,
                other => return Err(SearchError::malformed("FT.SYNADD did not return a group id", &other)),
            };
            debug!(index = %self.name(), group_id, "Synonym group added");
            group_ids.push(group_id);
        }

        Ok(group_ids)
    }

    /// Ask Redis to persist its dataset, index included (SAVE).
    pub async fn write_to_disk(&self) -> Result<()> {
        let reply = self.executor.execute("SAVE", &[]).await?;
        expect_ok("SAVE", &reply)
    }

    /// Index information and statistics (FT.INFO), undecoded.
    pub async fn info(&self) -> Result<Value> {
        self.executor.execute("FT.INFO", &[self.name().to_string()]).await
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Documents
    // ═══════════════════════════════════════════════════════════════════════════

    /// Add a document (FT.ADD).
    pub async fn add(&self, document: &IndexDocument) -> Result<()> {
        let args = document.to_ft_add_args(self.name(), self.default_language.as_deref())?;
        debug!(index = %self.name(), id = %document.id, fields = document.fields().len(), "FT.ADD");
        let reply = self.executor.execute("FT.ADD", &args).await?;
        expect_ok("FT.ADD", &reply)
    }

    /// Delete a document and its hash (FT.DEL ... DD). Returns whether the
    /// document existed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let args = vec![self.name().to_string(), id.to_string(), "DD".to_string()];
        debug!(index = %self.name(), id, "FT.DEL");
        match self.executor.execute("FT.DEL", &args).await? {
            Value::Int(n) => Ok(n > 0),
            other => Err(SearchError::malformed("FT.DEL did not return an integer", &other)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run an FT.SEARCH and decode the page of hits.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult<Document>> {
        let args = query.to_ft_search_args(self.name());
        debug!(index = %self.name(), query = %query.query(), "FT.SEARCH");

        let raw = self.executor.execute("FT.SEARCH", &args).await?;
        let decoded = decode_search_page(&raw, self.document_mode, query.row_layout());
        self.record_decode("search", decoded, |r| r.documents().len())
    }

    /// Run an FT.SPELLCHECK and decode the suggestions.
    pub async fn spellcheck(&self, query: &SpellcheckQuery) -> Result<SearchResult<SpellcheckDocument>> {
        let args = query.to_ft_spellcheck_args(self.name())?;
        debug!(index = %self.name(), "FT.SPELLCHECK");

        let raw = self.executor.execute("FT.SPELLCHECK", &args).await?;
        let decoded = decode_spellcheck(&raw, self.document_mode);
        self.record_decode("spellcheck", decoded, |r| r.documents().len())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Internal helpers
    // ═══════════════════════════════════════════════════════════════════════════

    async fn lifecycle(&self, operation: &str, command: &str, args: &[String]) -> Result<()> {
        let outcome = match self.executor.execute(command, args).await {
            Ok(reply) => expect_ok(command, &reply),
            Err(e) => Err(e),
        };
        metrics::record_index_operation(operation, outcome.is_ok());
        outcome
    }

    fn record_decode<T>(&self, kind: &str, decoded: Result<T>, documents: impl Fn(&T) -> usize) -> Result<T> {
        match decoded {
            Ok(result) => {
                metrics::record_decode(kind, "success");
                metrics::record_documents(kind, documents(&result));
                Ok(result)
            }
            Err(e) => {
                metrics::record_decode(kind, "malformed");
                warn!(index = %self.name(), kind, error = %e, "Unusable reply");
                Err(e)
            }
        }
    }
}

fn expect_ok(command: &str, reply: &Value) -> Result<()> {
    match reply {
        Value::Okay => Ok(()),
        Value::SimpleString(s) if s.eq_ignore_ascii_case("OK") => Ok(()),
        other => Err(SearchError::malformed(format!("{} did not return OK", command), other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::memory::ScriptedExecutor;

    fn bulk(s: &str) -> Value {
        Value::BulkString(s.as_bytes().to_vec())
    }

    fn articles() -> Index<ScriptedExecutor> {
        let definition = IndexDefinition::new("articles").text("title").numeric_sortable("year");
        Index::new(ScriptedExecutor::new(), definition)
    }

    #[tokio::test]
    async fn test_create_sends_schema() {
        let index = articles();
        index.create().await.unwrap();

        let sent = index.executor().last_sent().unwrap();
        assert_eq!(sent.command, "FT.CREATE");
        assert_eq!(sent.args, vec!["articles", "SCHEMA", "title", "TEXT", "year", "NUMERIC", "SORTABLE"]);
    }

    #[tokio::test]
    async fn test_create_without_fields_sends_nothing() {
        let index = Index::new(ScriptedExecutor::new(), IndexDefinition::new("empty"));
        assert!(matches!(index.create().await, Err(SearchError::InvalidDefinition(_))));
        assert!(index.executor().sent().is_empty());
    }

    #[tokio::test]
    async fn test_engine_error_passes_through() {
        let index = articles();
        index.executor().push_error("Index already exists");

        let err = index.create().await.unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_delete_uses_dd() {
        let index = articles();
        index.executor().push_reply(Value::Int(1));
        index.executor().push_reply(Value::Int(0));

        assert!(index.delete("doc:1").await.unwrap());
        assert!(!index.delete("doc:2").await.unwrap());

        let sent = index.executor().sent();
        assert_eq!(sent[0].command, "FT.DEL");
        assert_eq!(sent[0].args, vec!["articles", "doc:1", "DD"]);
    }

    #[tokio::test]
    async fn test_synonym_add_one_command_per_group() {
        let index = articles();
        index.executor().push_reply(Value::Int(0));
        index.executor().push_reply(Value::Int(1));

        let ids = index
            .synonym_add(&[vec![" boy ", "child"], vec!["girl", "lass"]])
            .await
            .unwrap();
        assert_eq!(ids, vec![0, 1]);

        let sent = index.executor().sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].command, "FT.SYNADD");
        assert_eq!(sent[0].args, vec!["articles", "boy", "child"]);
        assert_eq!(sent[1].args, vec!["articles", "girl", "lass"]);
    }

    #[tokio::test]
    async fn test_synonym_add_rejects_empty_group() {
        let index = articles();
        let groups: Vec<Vec<&str>> = vec![vec![]];
        assert!(index.synonym_add(&groups).await.is_err());
        assert!(index.executor().sent().is_empty());
    }

    #[tokio::test]
    async fn test_search_decodes_page() {
        let index = articles();
        index.executor().push_reply(Value::Array(vec![
            Value::Int(7),
            bulk("doc:1"),
            bulk("0.9"),
            Value::Array(vec![bulk("title"), bulk("Rust")]),
        ]));

        let result = index
            .search(&SearchQuery::new("rust").with_scores().limit(0, 1))
            .await
            .unwrap();

        assert_eq!(result.count(), 7);
        let docs = result.documents().records().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].score, Some(0.9));
        assert_eq!(docs[0].get_str("title"), Some("Rust"));

        let sent = index.executor().last_sent().unwrap();
        assert_eq!(sent.args, vec!["articles", "rust", "WITHSCORES", "LIMIT", "0", "1"]);
    }

    #[tokio::test]
    async fn test_search_malformed_reply() {
        let index = articles();
        index.executor().push_reply(bulk("nonsense"));

        let err = index.search(&SearchQuery::new("rust")).await.unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_spellcheck_in_array_mode() {
        let index = articles().document_mode(DocumentMode::Array);
        index.executor().push_reply(Value::Array(vec![Value::Array(vec![
            bulk("TERM"),
            bulk("rsut"),
            Value::Array(vec![Value::Array(vec![bulk("0.5"), bulk("rust")])]),
        ])]));

        let result = index.spellcheck(&SpellcheckQuery::new("rsut")).await.unwrap();
        assert_eq!(result.count(), 1);
        assert_eq!(result.documents().rows().unwrap()[0]["term"], "rsut");
    }

    #[tokio::test]
    async fn test_add_applies_config_language() {
        let config = SearchConfig {
            default_language: Some("english".into()),
            ..Default::default()
        };
        let index = Index::with_config(ScriptedExecutor::new(), IndexDefinition::new("idx").text("t"), &config);
        index.add(&IndexDocument::new("d").field("t", "v")).await.unwrap();

        let sent = index.executor().last_sent().unwrap();
        assert_eq!(sent.args, vec!["idx", "d", "1", "LANGUAGE", "english", "FIELDS", "t", "v"]);
    }

    #[tokio::test]
    async fn test_unexpected_ack_is_malformed() {
        let index = articles();
        index.executor().push_reply(Value::Int(42));
        assert!(index.drop_index().await.unwrap_err().is_malformed());
    }

    #[tokio::test]
    async fn test_empty_ack_is_malformed() {
        let index = articles();
        index.executor().push_reply(Value::Nil);
        assert!(index.create().await.unwrap_err().is_malformed());

        index.executor().push_reply(Value::BulkString(Vec::new()));
        assert!(index.write_to_disk().await.unwrap_err().is_malformed());

        index.executor().push_reply(Value::SimpleString("OK".into()));
        index.drop_index().await.unwrap();
    }

    #[tokio::test]
    async fn test_info_and_save() {
        let index = articles();
        index.executor().push_reply(Value::Array(vec![bulk("index_name"), bulk("articles")]));

        let info = index.info().await.unwrap();
        assert!(matches!(info, Value::Array(ref items) if items.len() == 2));
        index.write_to_disk().await.unwrap();

        let sent = index.executor().sent();
        assert_eq!(sent[0].command, "FT.INFO");
        assert_eq!(sent[0].args, vec!["articles"]);
        assert_eq!(sent[1].command, "SAVE");
    }
}
