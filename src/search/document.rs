// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Documents headed into an index via FT.ADD.
//!
//! ```text
//! FT.ADD articles doc:1 1 REPLACE PARTIAL LANGUAGE english PAYLOAD meta
//!   FIELDS title "Rust in Action" year 2021 location "-0.12,51.5"
//! ```

use std::fmt::Display;

use crate::executor::traits::{Result, SearchError};

/// A document to add (or replace) in an index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocument {
    pub id: String,
    /// Document rank factor, 0.0 to 1.0
    pub score: f64,
    pub language: Option<String>,
    /// Overwrite an existing document with the same id
    pub replace: bool,
    /// With `replace`: only update the given fields
    pub partial: bool,
    /// Index only, don't store the document hash
    pub no_save: bool,
    pub payload: Option<String>,
    fields: Vec<(String, String)>,
}

impl IndexDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            score: 1.0,
            language: None,
            replace: false,
            partial: false,
            no_save: false,
            payload: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn replace(mut self) -> Self {
        self.replace = true;
        self
    }

    /// Replace only the fields set on this document. Implies `replace`.
    #[must_use]
    pub fn partial(mut self) -> Self {
        self.replace = true;
        self.partial = true;
        self
    }

    #[must_use]
    pub fn no_save(mut self) -> Self {
        self.no_save = true;
        self
    }

    #[must_use]
    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Set a field value. Numbers are rendered with `Display`.
    ///
    /// Setting a name again replaces its value in place.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Display) -> Self {
        let name = name.into();
        let value = value.to_string();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Set a geo field from a longitude/latitude pair
    #[must_use]
    pub fn geo_field(self, name: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        self.field(name, format!("{},{}", longitude, latitude))
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Generate the FT.ADD command arguments. `default_language` applies
    /// when the document doesn't set its own.
    pub fn to_ft_add_args(&self, index_name: &str, default_language: Option<&str>) -> Result<Vec<String>> {
        if self.id.is_empty() {
            return Err(SearchError::InvalidDefinition("document id is empty".into()));
        }
        if !(0.0..=1.0).contains(&self.score) {
            return Err(SearchError::InvalidDefinition(format!(
                "document score {} is outside 0.0..=1.0",
                self.score
            )));
        }
        if self.fields.is_empty() {
            return Err(SearchError::InvalidDefinition(format!("document '{}' has no fields", self.id)));
        }

        let mut args = vec![index_name.to_string(), self.id.clone(), self.score.to_string()];

        if self.no_save {
            args.push("NOSAVE".to_string());
        }
        if self.replace {
            args.push("REPLACE".to_string());
            if self.partial {
                args.push("PARTIAL".to_string());
            }
        }
        if let Some(language) = self.language.as_deref().or(default_language) {
            args.push("LANGUAGE".to_string());
            args.push(language.to_string());
        }
        if let Some(ref payload) = self.payload {
            args.push("PAYLOAD".to_string());
            args.push(payload.clone());
        }

        args.push("FIELDS".to_string());
        for (name, value) in &self.fields {
            args.push(name.clone());
            args.push(value.clone());
        }

        Ok(args)
    }
}
