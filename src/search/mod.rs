// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search Infrastructure
//!
//! Command builders and reply decoders for the RediSearch module.
//!
//! # Architecture
//!
//! ```text
//! IndexDefinition ──→ FT.CREATE args
//! IndexDocument   ──→ FT.ADD args
//! SearchQuery     ──→ FT.SEARCH args ──→ executor ──→ decode_search_page ──→ SearchResult<Document>
//! SpellcheckQuery ──→ FT.SPELLCHECK args ──→ executor ──→ decode_spellcheck ──→ SearchResult<SpellcheckDocument>
//! ```
//!
//! Builders never touch the network; decoders never mutate the reply.
//!
//! # Decoding a raw reply
//!
//! ```rust
//! use redis::Value;
//! use redisearch_client::search::{decode_search, DocumentMode, RowLayout};
//!
//! let raw = Value::Array(vec![
//!     Value::Int(1),
//!     Value::BulkString(b"doc:1".to_vec()),
//!     Value::Array(vec![
//!         Value::BulkString(b"title".to_vec()),
//!         Value::BulkString(b"hello".to_vec()),
//!     ]),
//! ]);
//!
//! let result = decode_search(&raw, DocumentMode::Object, RowLayout::default()).unwrap();
//! assert_eq!(result.count(), 1);
//! let doc = &result.documents().records().unwrap()[0];
//! assert_eq!(doc.id.as_deref(), Some("doc:1"));
//! assert_eq!(doc.get_str("title"), Some("hello"));
//! ```

mod document;
mod field;
mod query;
mod reply;
mod result;
mod schema;

pub use document::IndexDocument;
pub use field::{SearchField, SearchFieldType};
pub use query::{Bound, GeoUnit, SearchQuery, SortOrder, SpellcheckQuery, TermsMode};
pub use reply::is_empty_reply;
pub use result::{
    decode_search, decode_search_page, decode_spellcheck, Document, DocumentMode, Documents, Row,
    RowLayout, SearchResult, SpellcheckDocument, ToRow,
};
pub use schema::{raw_create_args, IndexDefinition, StopWords};
