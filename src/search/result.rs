// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Reply decoding for FT.SEARCH and FT.SPELLCHECK.
//!
//! # FT.SEARCH reply layout
//!
//! ```text
//! [count, row_1 ..., row_2 ..., ...]
//!
//! row = [id]? [score]? [payload]? [[name, value, name, value, ...]]?
//!        │      │        │          └─ absent under NOCONTENT
//!        │      │        └─ WITHPAYLOADS
//!        │      └─ WITHSCORES
//!        └─ always sent by the engine, optional for the decoder
//! ```
//!
//! # FT.SPELLCHECK reply layout
//!
//! ```text
//! [["TERM", "helo", [["0.8", "hello"], ["0.1", "h"]]], ...]
//! ```
//!
//! Decoders are pure functions over a borrowed [`redis::Value`]: decoding the
//! same reply twice yields equal results.

use std::collections::HashMap;

use redis::Value;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::reply::{
    bytes_to_json, is_empty_reply, value_to_bytes, value_to_f64, value_to_i64, value_to_json,
    value_to_string,
};
use crate::executor::traits::{Result, SearchError};

/// Marker opening every FT.SPELLCHECK row
const TERM_MARKER: &str = "TERM";

/// Ordered, name-addressable document row.
pub type Row = Map<String, JsonValue>;

/// Shape in which decoded documents are handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentMode {
    /// Ordered key/value rows with every slot flattened to one level
    Array,
    /// Typed records ([`Document`], [`SpellcheckDocument`])
    #[default]
    Object,
}

/// Which optional leading slots each FT.SEARCH row carries.
///
/// Must match what the request asked the engine to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub with_ids: bool,
    pub with_scores: bool,
    pub with_payloads: bool,
    /// Whether rows end with a field list (false under NOCONTENT)
    pub with_content: bool,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            with_ids: true,
            with_scores: false,
            with_payloads: false,
            with_content: true,
        }
    }
}

impl RowLayout {
    /// Elements per row when every requested slot is present.
    pub fn width(&self) -> usize {
        [self.with_ids, self.with_scores, self.with_payloads, self.with_content]
            .iter()
            .filter(|on| **on)
            .count()
    }
}

/// Conversion of a typed record into its row representation.
pub trait ToRow {
    fn to_row(&self) -> Row;
}

/// Decoded documents in the representation chosen at decode time.
#[derive(Debug, Clone, PartialEq)]
pub enum Documents<D> {
    Rows(Vec<Row>),
    Records(Vec<D>),
}

impl<D: ToRow> Documents<D> {
    pub fn from_records(records: Vec<D>, mode: DocumentMode) -> Self {
        match mode {
            DocumentMode::Object => Documents::Records(records),
            DocumentMode::Array => Documents::Rows(records.iter().map(ToRow::to_row).collect()),
        }
    }
}

impl<D> Documents<D> {
    pub fn empty(mode: DocumentMode) -> Self {
        match mode {
            DocumentMode::Array => Documents::Rows(Vec::new()),
            DocumentMode::Object => Documents::Records(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Documents::Rows(rows) => rows.len(),
            Documents::Records(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> DocumentMode {
        match self {
            Documents::Rows(_) => DocumentMode::Array,
            Documents::Records(_) => DocumentMode::Object,
        }
    }

    pub fn records(&self) -> Option<&[D]> {
        match self {
            Documents::Records(records) => Some(records),
            Documents::Rows(_) => None,
        }
    }

    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            Documents::Rows(rows) => Some(rows),
            Documents::Records(_) => None,
        }
    }
}

/// A decoded reply: the engine-reported count plus the documents that came
/// back with it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<D> {
    count: i64,
    documents: Documents<D>,
}

impl<D> SearchResult<D> {
    pub fn new(count: i64, documents: Documents<D>) -> Self {
        Self { count, documents }
    }

    /// Result of an absent reply: count 0, no documents.
    pub fn empty(mode: DocumentMode) -> Self {
        Self::new(0, Documents::empty(mode))
    }

    /// Total matches reported by the engine. Can exceed the number of
    /// documents returned when the query was paged.
    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn documents(&self) -> &Documents<D> {
        &self.documents
    }

    pub fn into_documents(self) -> Documents<D> {
        self.documents
    }
}

/// One FT.SEARCH hit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub id: Option<String>,
    pub score: Option<f64>,
    pub payload: Option<Vec<u8>>,
    /// Returned fields in engine order
    pub fields: Row,
}

impl Document {
    /// Look up a returned field by name.
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.fields.get(name)
    }

    /// Field value as a string slice, when it is one.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(JsonValue::as_str)
    }
}

impl ToRow for Document {
    fn to_row(&self) -> Row {
        let mut row = Map::new();
        row.insert(
            "id".to_string(),
            self.id.clone().map(JsonValue::String).unwrap_or(JsonValue::Null),
        );
        row.insert("score".to_string(), self.score.map(JsonValue::from).unwrap_or(JsonValue::Null));
        row.insert(
            "payload".to_string(),
            self.payload.as_deref().map(bytes_to_json).unwrap_or(JsonValue::Null),
        );
        for (name, value) in &self.fields {
            row.insert(name.clone(), value.clone());
        }
        row
    }
}

/// One FT.SPELLCHECK row: the misspelled term and its candidate corrections.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellcheckDocument {
    pub term: String,
    /// Candidate word → score
    pub suggestions: HashMap<String, f64>,
}

impl SpellcheckDocument {
    /// Suggestions ordered by descending score.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> =
            self.suggestions.iter().map(|(word, score)| (word.as_str(), *score)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

impl ToRow for SpellcheckDocument {
    fn to_row(&self) -> Row {
        let suggestions: Map<String, JsonValue> = self
            .suggestions
            .iter()
            .map(|(word, score)| (word.clone(), JsonValue::from(*score)))
            .collect();

        let mut row = Map::new();
        row.insert("term".to_string(), JsonValue::String(self.term.clone()));
        row.insert("suggestions".to_string(), JsonValue::Object(suggestions));
        row
    }
}

/// Decode an FT.SEARCH reply, deriving the row width from the reported count.
///
/// The body must split evenly into `count` rows; a reply whose count and body
/// disagree is rejected. A count of zero or less yields no documents.
pub fn decode_search(raw: &Value, mode: DocumentMode, layout: RowLayout) -> Result<SearchResult<Document>> {
    let Some((count, body)) = split_search_reply(raw)? else {
        return Ok(SearchResult::empty(mode));
    };

    if body.is_empty() || count <= 0 {
        return Ok(SearchResult::new(count, Documents::empty(mode)));
    }

    let rows = usize::try_from(count)
        .map_err(|_| SearchError::malformed(format!("count {} does not fit in memory", count), raw))?;
    if body.len() % rows != 0 {
        return Err(SearchError::malformed(
            format!("{} body elements cannot be split into {} documents", body.len(), rows),
            raw,
        ));
    }

    let width = body.len() / rows;
    let documents = decode_rows(body, width, layout, raw)?;
    Ok(SearchResult::new(count, Documents::from_records(documents, mode)))
}

/// Decode one page of an FT.SEARCH reply using the row width implied by the
/// request.
///
/// Unlike [`decode_search`] the reported count is kept as the total and may
/// exceed the number of rows on the page (`LIMIT offset num`). A count of zero
/// or less yields no documents.
pub fn decode_search_page(
    raw: &Value,
    mode: DocumentMode,
    layout: RowLayout,
) -> Result<SearchResult<Document>> {
    let Some((count, body)) = split_search_reply(raw)? else {
        return Ok(SearchResult::empty(mode));
    };

    let width = layout.width();
    if body.is_empty() || count <= 0 || width == 0 {
        return Ok(SearchResult::new(count, Documents::empty(mode)));
    }

    if body.len() % width != 0 {
        return Err(SearchError::malformed(
            format!("{} body elements do not form rows of width {}", body.len(), width),
            raw,
        ));
    }

    let documents = decode_rows(body, width, layout, raw)?;
    Ok(SearchResult::new(count, Documents::from_records(documents, mode)))
}

/// Decode an FT.SPELLCHECK reply. The resulting count is the number of terms.
///
/// Single-character suggestions are dropped.
pub fn decode_spellcheck(raw: &Value, mode: DocumentMode) -> Result<SearchResult<SpellcheckDocument>> {
    if is_empty_reply(raw) {
        return Ok(SearchResult::empty(mode));
    }

    let Value::Array(rows) = raw else {
        return Err(SearchError::malformed("spellcheck reply is not an array", raw));
    };

    let documents = rows
        .iter()
        .map(|row| decode_spellcheck_row(row, raw))
        .collect::<Result<Vec<_>>>()?;

    let count = documents.len() as i64;
    Ok(SearchResult::new(count, Documents::from_records(documents, mode)))
}

/// Split a non-empty search reply into its count and body.
fn split_search_reply(raw: &Value) -> Result<Option<(i64, &[Value])>> {
    if is_empty_reply(raw) {
        return Ok(None);
    }

    let Value::Array(items) = raw else {
        return Err(SearchError::malformed("search reply is not an array", raw));
    };

    let Some((head, body)) = items.split_first() else {
        return Ok(None);
    };
    let count = value_to_i64(head)
        .ok_or_else(|| SearchError::malformed("result count is not an integer", raw))?;

    Ok(Some((count, body)))
}

fn decode_rows(body: &[Value], width: usize, layout: RowLayout, raw: &Value) -> Result<Vec<Document>> {
    body.chunks(width).map(|row| decode_search_row(row, layout, raw)).collect()
}

fn decode_search_row(row: &[Value], layout: RowLayout, raw: &Value) -> Result<Document> {
    let mut rest = row;

    let id = match take_slot(&mut rest, layout.with_ids) {
        None | Some(Value::Nil) => None,
        Some(v) => Some(
            value_to_string(v).ok_or_else(|| SearchError::malformed("document id is not a string", raw))?,
        ),
    };
    let score = match take_slot(&mut rest, layout.with_scores) {
        None | Some(Value::Nil) => None,
        Some(v) => Some(
            value_to_f64(v).ok_or_else(|| SearchError::malformed("document score is not a number", raw))?,
        ),
    };
    let payload = match take_slot(&mut rest, layout.with_payloads) {
        None => None,
        Some(v @ Value::Array(_)) | Some(v @ Value::Map(_)) => {
            return Err(SearchError::malformed(format!("payload is not a scalar: {:?}", v), raw));
        }
        Some(v) => value_to_bytes(v),
    };

    let mut fields = Map::new();
    if let Some(Value::Array(pairs)) = rest.first() {
        for pair in pairs.chunks(2) {
            let [name, value] = pair else {
                return Err(SearchError::malformed("field list has a name without a value", raw));
            };
            let name = value_to_string(name)
                .ok_or_else(|| SearchError::malformed("field name is not a string", raw))?;
            fields.insert(name, value_to_json(value));
        }
    }

    Ok(Document { id, score, payload, fields })
}

/// Pop the next row element if the layout says the slot is there.
fn take_slot<'a>(rest: &mut &'a [Value], wanted: bool) -> Option<&'a Value> {
    if !wanted {
        return None;
    }
    let (first, tail) = (*rest).split_first()?;
    *rest = tail;
    Some(first)
}

fn decode_spellcheck_row(row: &Value, raw: &Value) -> Result<SpellcheckDocument> {
    let not_spellcheck = || SearchError::malformed("not a spellcheck result", raw);

    let Value::Array(cells) = row else {
        return Err(not_spellcheck());
    };
    let Some((marker, mut rest)) = cells.split_first() else {
        return Err(not_spellcheck());
    };

    let mut term = None;
    if value_to_string(marker).as_deref() == Some(TERM_MARKER) {
        if let Some((value, tail)) = rest.split_first() {
            term = value_to_string(value);
            rest = tail;
        }
    }

    let (Some(term), [suggestions]) = (term, rest) else {
        return Err(not_spellcheck());
    };

    let Value::Array(candidates) = suggestions else {
        return Err(SearchError::malformed("suggestion list is not an array", raw));
    };

    let mut document = SpellcheckDocument { term, suggestions: HashMap::new() };
    for candidate in candidates {
        let Value::Array(pair) = candidate else {
            return Err(SearchError::malformed("suggestion is not a (score, word) pair", raw));
        };
        let [score, word] = pair.as_slice() else {
            return Err(SearchError::malformed("suggestion is not a (score, word) pair", raw));
        };
        let score = value_to_f64(score)
            .ok_or_else(|| SearchError::malformed("suggestion score is not a number", raw))?;
        let word = value_to_string(word)
            .ok_or_else(|| SearchError::malformed("suggestion word is not a string", raw))?;

        // single letters are noise
        if word.len() > 1 {
            document.suggestions.insert(word, score);
        }
    }

    Ok(document)
}
