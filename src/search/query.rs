// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! FT.SEARCH and FT.SPELLCHECK request builders.
//!
//! # Example
//!
//! ```rust
//! use redisearch_client::search::{Bound, SearchQuery, SortOrder};
//!
//! let query = SearchQuery::new("@title:rust")
//!     .with_scores()
//!     .filter("year", Bound::Inclusive(2015.0), Bound::Unbounded)
//!     .return_fields(["title", "year"])
//!     .sort_by("year", SortOrder::Desc)
//!     .limit(0, 20);
//!
//! let args = query.to_ft_search_args("articles");
//! assert_eq!(args[0], "articles");
//! assert_eq!(args[1], "@title:rust");
//! assert!(query.row_layout().with_scores);
//! ```

use super::result::RowLayout;
use crate::executor::traits::{Result, SearchError};

/// One side of a numeric FILTER range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Inclusive(f64),
    Exclusive(f64),
    Unbounded,
}

impl Bound {
    fn render(&self, unbounded: &str) -> String {
        match self {
            Bound::Inclusive(v) => v.to_string(),
            Bound::Exclusive(v) => format!("({}", v),
            Bound::Unbounded => unbounded.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

/// Radius unit for GEOFILTER
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoUnit {
    Meters,
    Kilometers,
    Miles,
    Feet,
}

impl std::fmt::Display for GeoUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoUnit::Meters => write!(f, "m"),
            GeoUnit::Kilometers => write!(f, "km"),
            GeoUnit::Miles => write!(f, "mi"),
            GeoUnit::Feet => write!(f, "ft"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NumericFilter {
    field: String,
    min: Bound,
    max: Bound,
}

#[derive(Debug, Clone, PartialEq)]
struct GeoFilter {
    field: String,
    longitude: f64,
    latitude: f64,
    radius: f64,
    unit: GeoUnit,
}

/// FT.SEARCH request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchQuery {
    query: String,
    no_content: bool,
    verbatim: bool,
    no_stop_words: bool,
    with_scores: bool,
    with_payloads: bool,
    filters: Vec<NumericFilter>,
    geo_filters: Vec<GeoFilter>,
    in_keys: Vec<String>,
    in_fields: Vec<String>,
    return_fields: Vec<String>,
    slop: Option<u32>,
    in_order: bool,
    language: Option<String>,
    sort_by: Option<(String, SortOrder)>,
    limit: Option<(usize, usize)>,
}

impl SearchQuery {
    /// Start a request for a RediSearch query string (`"@title:rust"`, `"*"`, ...)
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Return ids only, no field lists
    #[must_use]
    pub fn no_content(mut self) -> Self {
        self.no_content = true;
        self
    }

    /// Don't stem query terms
    #[must_use]
    pub fn verbatim(mut self) -> Self {
        self.verbatim = true;
        self
    }

    #[must_use]
    pub fn no_stop_words(mut self) -> Self {
        self.no_stop_words = true;
        self
    }

    #[must_use]
    pub fn with_scores(mut self) -> Self {
        self.with_scores = true;
        self
    }

    #[must_use]
    pub fn with_payloads(mut self) -> Self {
        self.with_payloads = true;
        self
    }

    /// Restrict a numeric field to a range; may be repeated for several fields
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, min: Bound, max: Bound) -> Self {
        self.filters.push(NumericFilter { field: field.into(), min, max });
        self
    }

    /// Restrict a geo field to a radius around a point
    #[must_use]
    pub fn geo_filter(
        mut self,
        field: impl Into<String>,
        longitude: f64,
        latitude: f64,
        radius: f64,
        unit: GeoUnit,
    ) -> Self {
        self.geo_filters.push(GeoFilter {
            field: field.into(),
            longitude,
            latitude,
            radius,
            unit,
        });
        self
    }

    /// Only consider these document ids
    #[must_use]
    pub fn in_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Only match terms appearing in these fields
    #[must_use]
    pub fn in_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Only return these fields
    #[must_use]
    pub fn return_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.return_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Max number of unmatched terms between phrase terms
    #[must_use]
    pub fn slop(mut self, slop: u32) -> Self {
        self.slop = Some(slop);
        self
    }

    #[must_use]
    pub fn in_order(mut self) -> Self {
        self.in_order = true;
        self
    }

    /// Stemming language for query expansion
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sort on a SORTABLE field
    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some((field.into(), order));
        self
    }

    /// Page through results; engine default is `LIMIT 0 10`
    #[must_use]
    pub fn limit(mut self, offset: usize, num: usize) -> Self {
        self.limit = Some((offset, num));
        self
    }

    /// Row shape the engine will answer with
    pub fn row_layout(&self) -> RowLayout {
        RowLayout {
            with_ids: true,
            with_scores: self.with_scores,
            with_payloads: self.with_payloads,
            with_content: !self.no_content,
        }
    }

    /// Generate the FT.SEARCH command arguments
    pub fn to_ft_search_args(&self, index_name: &str) -> Vec<String> {
        let mut args = vec![index_name.to_string(), self.query.clone()];

        if self.no_content {
            args.push("NOCONTENT".to_string());
        }
        if self.verbatim {
            args.push("VERBATIM".to_string());
        }
        if self.no_stop_words {
            args.push("NOSTOPWORDS".to_string());
        }
        if self.with_scores {
            args.push("WITHSCORES".to_string());
        }
        if self.with_payloads {
            args.push("WITHPAYLOADS".to_string());
        }

        for filter in &self.filters {
            args.push("FILTER".to_string());
            args.push(filter.field.clone());
            args.push(filter.min.render("-inf"));
            args.push(filter.max.render("+inf"));
        }

        for geo in &self.geo_filters {
            args.push("GEOFILTER".to_string());
            args.push(geo.field.clone());
            args.push(geo.longitude.to_string());
            args.push(geo.latitude.to_string());
            args.push(geo.radius.to_string());
            args.push(geo.unit.to_string());
        }

        push_counted(&mut args, "INKEYS", &self.in_keys);
        push_counted(&mut args, "INFIELDS", &self.in_fields);
        push_counted(&mut args, "RETURN", &self.return_fields);

        if let Some(slop) = self.slop {
            args.push("SLOP".to_string());
            args.push(slop.to_string());
        }
        if self.in_order {
            args.push("INORDER".to_string());
        }
        if let Some(ref language) = self.language {
            args.push("LANGUAGE".to_string());
            args.push(language.clone());
        }
        if let Some((ref field, order)) = self.sort_by {
            args.push("SORTBY".to_string());
            args.push(field.clone());
            args.push(order.to_string());
        }
        if let Some((offset, num)) = self.limit {
            args.push("LIMIT".to_string());
            args.push(offset.to_string());
            args.push(num.to_string());
        }

        args
    }
}

/// `KEYWORD n item...`, skipped when empty
fn push_counted(args: &mut Vec<String>, keyword: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    args.push(keyword.to_string());
    args.push(items.len().to_string());
    args.extend(items.iter().cloned());
}

/// Whether a custom dictionary adds to or removes from the suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermsMode {
    Include,
    Exclude,
}

impl std::fmt::Display for TermsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TermsMode::Include => write!(f, "INCLUDE"),
            TermsMode::Exclude => write!(f, "EXCLUDE"),
        }
    }
}

/// FT.SPELLCHECK request
#[derive(Debug, Clone, PartialEq)]
pub struct SpellcheckQuery {
    query: String,
    distance: Option<u8>,
    dictionaries: Vec<(TermsMode, String)>,
}

impl SpellcheckQuery {
    /// Valid Levenshtein distances accepted by the engine
    pub const DISTANCE_RANGE: std::ops::RangeInclusive<u8> = 1..=4;

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            distance: None,
            dictionaries: Vec::new(),
        }
    }

    /// Max edit distance for suggestions (engine default 1)
    #[must_use]
    pub fn distance(mut self, distance: u8) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Also suggest terms from a custom dictionary
    #[must_use]
    pub fn include_terms(mut self, dictionary: impl Into<String>) -> Self {
        self.dictionaries.push((TermsMode::Include, dictionary.into()));
        self
    }

    /// Never suggest terms from a custom dictionary
    #[must_use]
    pub fn exclude_terms(mut self, dictionary: impl Into<String>) -> Self {
        self.dictionaries.push((TermsMode::Exclude, dictionary.into()));
        self
    }

    /// Generate the FT.SPELLCHECK command arguments
    pub fn to_ft_spellcheck_args(&self, index_name: &str) -> Result<Vec<String>> {
        let mut args = vec![index_name.to_string(), self.query.clone()];

        if let Some(distance) = self.distance {
            if !Self::DISTANCE_RANGE.contains(&distance) {
                return Err(SearchError::InvalidDefinition(format!(
                    "spellcheck distance {} is outside 1..=4",
                    distance
                )));
            }
            args.push("DISTANCE".to_string());
            args.push(distance.to_string());
        }

        for (mode, dictionary) in &self.dictionaries {
            args.push("TERMS".to_string());
            args.push(mode.to_string());
            args.push(dictionary.clone());
        }

        Ok(args)
    }
}
