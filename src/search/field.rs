// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Schema field definitions.
//!
//! ```text
//! title TEXT WEIGHT 5 SORTABLE
//! body TEXT NOSTEM
//! tags TAG SEPARATOR ; NOINDEX
//! price NUMERIC SORTABLE
//! location GEO
//! ```

/// Default TEXT field weight; not emitted when unchanged
const DEFAULT_WEIGHT: f64 = 1.0;
/// Default TAG separator; not emitted when unchanged
const DEFAULT_SEPARATOR: char = ',';

/// Search field types supported by RediSearch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFieldType {
    /// Full-text searchable field
    Text,
    /// Numeric field (supports range queries)
    Numeric,
    /// Tag field (exact match, supports OR)
    Tag,
    /// Geographic field (longitude, latitude)
    Geo,
}

impl std::fmt::Display for SearchFieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchFieldType::Text => write!(f, "TEXT"),
            SearchFieldType::Numeric => write!(f, "NUMERIC"),
            SearchFieldType::Tag => write!(f, "TAG"),
            SearchFieldType::Geo => write!(f, "GEO"),
        }
    }
}

/// Search field definition
#[derive(Debug, Clone, PartialEq)]
pub struct SearchField {
    /// Field name (used in queries and in FT.ADD)
    pub name: String,
    /// Field type
    pub field_type: SearchFieldType,
    /// Whether the field is sortable
    pub sortable: bool,
    /// Whether to exclude from indexing (useful for SORTABLE-only fields)
    pub no_index: bool,
    /// TEXT only: relevance multiplier
    pub weight: f64,
    /// TEXT only: disable stemming
    pub no_stem: bool,
    /// TAG only: character splitting the raw value into tags
    pub separator: char,
}

impl SearchField {
    fn new(name: impl Into<String>, field_type: SearchFieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            sortable: false,
            no_index: false,
            weight: DEFAULT_WEIGHT,
            no_stem: false,
            separator: DEFAULT_SEPARATOR,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, SearchFieldType::Text)
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, SearchFieldType::Numeric)
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(name, SearchFieldType::Tag)
    }

    pub fn geo(name: impl Into<String>) -> Self {
        Self::new(name, SearchFieldType::Geo)
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub fn no_index(mut self) -> Self {
        self.no_index = true;
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub fn no_stem(mut self) -> Self {
        self.no_stem = true;
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Arguments this field contributes after `SCHEMA`.
    pub fn to_schema_args(&self) -> Vec<String> {
        let mut args = vec![self.name.clone(), self.field_type.to_string()];

        match self.field_type {
            SearchFieldType::Text => {
                if self.no_stem {
                    args.push("NOSTEM".to_string());
                }
                if self.weight != DEFAULT_WEIGHT {
                    args.push("WEIGHT".to_string());
                    args.push(self.weight.to_string());
                }
            }
            SearchFieldType::Tag => {
                if self.separator != DEFAULT_SEPARATOR {
                    args.push("SEPARATOR".to_string());
                    args.push(self.separator.to_string());
                }
            }
            SearchFieldType::Numeric | SearchFieldType::Geo => {}
        }

        // GEO fields can't be sorted on
        if self.sortable && self.field_type != SearchFieldType::Geo {
            args.push("SORTABLE".to_string());
        }

        if self.no_index {
            args.push("NOINDEX".to_string());
        }

        args
    }
}
