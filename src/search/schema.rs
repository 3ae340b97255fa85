// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index Definition
//!
//! Builds the FT.CREATE argument list from explicitly registered fields.
//!
//! # RediSearch Index Creation
//!
//! ```text
//! FT.CREATE articles
//!   NOOFFSETS
//!   STOPWORDS 2 the a
//!   SCHEMA
//!     title TEXT WEIGHT 5 SORTABLE
//!     body TEXT
//!     year NUMERIC SORTABLE
//!     tags TAG
//!     location GEO
//! ```

use super::field::SearchField;
use crate::executor::traits::{Result, SearchError};

/// Stop-word handling for a new index
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StopWords {
    /// Engine's built-in list (nothing emitted)
    #[default]
    Default,
    /// No stop words at all (`STOPWORDS 0`)
    Disabled,
    /// Replace the built-in list
    Custom(Vec<String>),
}

impl StopWords {
    fn push_args(&self, args: &mut Vec<String>) {
        match self {
            StopWords::Default => {}
            StopWords::Disabled => {
                args.push("STOPWORDS".to_string());
                args.push("0".to_string());
            }
            StopWords::Custom(words) => {
                args.push("STOPWORDS".to_string());
                args.push(words.len().to_string());
                args.extend(words.iter().map(|w| w.trim().to_string()));
            }
        }
    }
}

/// Search index definition
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    /// Index name
    pub name: String,
    /// Don't store term offsets (saves memory, disables exact phrase search)
    pub no_offsets: bool,
    /// Don't store field bits (disables INFIELDS filtering)
    pub no_fields: bool,
    pub stop_words: StopWords,
    /// Field definitions in registration order
    fields: Vec<SearchField>,
}

impl IndexDefinition {
    /// Create a new index definition with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            no_offsets: false,
            no_fields: false,
            stop_words: StopWords::Default,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn no_offsets(mut self) -> Self {
        self.no_offsets = true;
        self
    }

    #[must_use]
    pub fn no_fields(mut self) -> Self {
        self.no_fields = true;
        self
    }

    /// Use a custom stop-word list
    #[must_use]
    pub fn stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = StopWords::Custom(words.into_iter().map(Into::into).collect());
        self
    }

    /// Index every word, including the usual stop words
    #[must_use]
    pub fn no_stop_words(mut self) -> Self {
        self.stop_words = StopWords::Disabled;
        self
    }

    /// Register a field. Registering a name twice replaces the earlier
    /// definition but keeps its position in the schema.
    #[must_use]
    pub fn field(mut self, field: SearchField) -> Self {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Add a text field
    #[must_use]
    pub fn text(self, name: impl Into<String>) -> Self {
        self.field(SearchField::text(name))
    }

    /// Add a text field with a relevance weight
    #[must_use]
    pub fn text_weighted(self, name: impl Into<String>, weight: f64) -> Self {
        self.field(SearchField::text(name).weight(weight))
    }

    /// Add a sortable text field
    #[must_use]
    pub fn text_sortable(self, name: impl Into<String>) -> Self {
        self.field(SearchField::text(name).sortable())
    }

    /// Add a numeric field
    #[must_use]
    pub fn numeric(self, name: impl Into<String>) -> Self {
        self.field(SearchField::numeric(name))
    }

    /// Add a sortable numeric field
    #[must_use]
    pub fn numeric_sortable(self, name: impl Into<String>) -> Self {
        self.field(SearchField::numeric(name).sortable())
    }

    /// Add a tag field
    #[must_use]
    pub fn tag(self, name: impl Into<String>) -> Self {
        self.field(SearchField::tag(name))
    }

    /// Add a tag field split on a custom separator
    #[must_use]
    pub fn tag_with_separator(self, name: impl Into<String>, separator: char) -> Self {
        self.field(SearchField::tag(name).separator(separator))
    }

    /// Add a geo field
    #[must_use]
    pub fn geo(self, name: impl Into<String>) -> Self {
        self.field(SearchField::geo(name))
    }

    /// Registered fields, in schema order
    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&SearchField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Generate the FT.CREATE command arguments
    pub fn to_ft_create_args(&self) -> Result<Vec<String>> {
        if self.name.is_empty() {
            return Err(SearchError::InvalidDefinition("index name is empty".into()));
        }
        if self.fields.is_empty() {
            return Err(SearchError::InvalidDefinition(format!(
                "index '{}' has no fields",
                self.name
            )));
        }

        let mut args = vec![self.name.clone()];
        if self.no_offsets {
            args.push("NOOFFSETS".to_string());
        }
        if self.no_fields {
            args.push("NOFIELDS".to_string());
        }
        self.stop_words.push_args(&mut args);
        args.push("SCHEMA".to_string());

        for field in &self.fields {
            args.extend(field.to_schema_args());
        }

        Ok(args)
    }
}

/// Generate FT.CREATE arguments from a pre-rendered schema list
/// (`["title", "TEXT", "WEIGHT", "2", ...]`).
pub fn raw_create_args(name: &str, schema: &[String], stop_words: &StopWords) -> Result<Vec<String>> {
    if name.is_empty() {
        return Err(SearchError::InvalidDefinition("index name is empty".into()));
    }
    if schema.is_empty() {
        return Err(SearchError::InvalidDefinition(format!("index '{}' has an empty schema", name)));
    }

    let mut args = vec![name.to_string()];
    stop_words.push_args(&mut args);
    args.push("SCHEMA".to_string());
    args.extend(schema.iter().cloned());
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_index() {
        let index = IndexDefinition::new("articles").text("title").text("body").numeric("year");

        let args = index.to_ft_create_args().unwrap();
        assert_eq!(
            args,
            vec!["articles", "SCHEMA", "title", "TEXT", "body", "TEXT", "year", "NUMERIC"]
        );
    }

    #[test]
    fn test_sortable_fields() {
        let index = IndexDefinition::new("users").text_sortable("name").numeric_sortable("age");

        let args = index.to_ft_create_args().unwrap();
        let sortable_count = args.iter().filter(|a| *a == "SORTABLE").count();
        assert_eq!(sortable_count, 2);
    }

    #[test]
    fn test_index_options_precede_schema() {
        let index = IndexDefinition::new("articles")
            .no_offsets()
            .no_fields()
            .stop_words([" the ", "a"])
            .text("title");

        let args = index.to_ft_create_args().unwrap();
        assert_eq!(
            args,
            vec!["articles", "NOOFFSETS", "NOFIELDS", "STOPWORDS", "2", "the", "a", "SCHEMA", "title", "TEXT"]
        );
    }

    #[test]
    fn test_no_stop_words() {
        let args = IndexDefinition::new("idx").no_stop_words().tag("t").to_ft_create_args().unwrap();
        assert_eq!(args, vec!["idx", "STOPWORDS", "0", "SCHEMA", "t", "TAG"]);
    }

    #[test]
    fn test_default_stop_words_emit_nothing() {
        let args = IndexDefinition::new("idx").geo("loc").to_ft_create_args().unwrap();
        assert!(!args.contains(&"STOPWORDS".to_string()));
    }

    #[test]
    fn test_reregistering_replaces_in_place() {
        let index = IndexDefinition::new("idx")
            .text("title")
            .numeric("year")
            .text_weighted("title", 3.0);

        assert_eq!(index.fields().len(), 2);
        assert_eq!(index.fields()[0].name, "title");
        assert_eq!(index.get_field("title").unwrap().weight, 3.0);
        assert!(index.get_field("missing").is_none());
    }

    #[test]
    fn test_no_fields_is_invalid() {
        let err = IndexDefinition::new("idx").to_ft_create_args().unwrap_err();
        assert!(matches!(err, SearchError::InvalidDefinition(_)));
    }

    #[test]
    fn test_empty_name_is_invalid() {
        assert!(IndexDefinition::new("").text("t").to_ft_create_args().is_err());
    }

    #[test]
    fn test_ft_create_full_command() {
        let index = IndexDefinition::new("articles")
            .text_weighted("title", 5.0)
            .text("body")
            .numeric_sortable("year")
            .tag_with_separator("tags", ';')
            .geo("location");

        let cmd = format!("FT.CREATE {}", index.to_ft_create_args().unwrap().join(" "));
        assert_eq!(
            cmd,
            "FT.CREATE articles SCHEMA title TEXT WEIGHT 5 body TEXT year NUMERIC SORTABLE \
             tags TAG SEPARATOR ; location GEO"
        );
    }

    #[test]
    fn test_raw_create_args() {
        let schema: Vec<String> = ["title", "TEXT", "WEIGHT", "2"].iter().map(|s| s.to_string()).collect();
        let args = raw_create_args("idx", &schema, &StopWords::Custom(vec!["foo".into()])).unwrap();
        assert_eq!(args, vec!["idx", "STOPWORDS", "1", "foo", "SCHEMA", "title", "TEXT", "WEIGHT", "2"]);
    }

    #[test]
    fn test_raw_create_rejects_empty_input() {
        assert!(raw_create_args("", &["t".to_string()], &StopWords::Default).is_err());
        assert!(raw_create_args("idx", &[], &StopWords::Default).is_err());
    }
}
