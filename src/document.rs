// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Documents as the writer sees them: an ordered list of named fields.
//!
//! A `WebPage` is what a document source hands over (url, title, raw html).
//! `WebPage::to_document` lays it out according to the engine's field schema.

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, HTML_FIELD, TITLE_FIELD, URL_FIELD};

/// One named value in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub text: String,
    /// Contributes terms to the inverted index.
    pub indexed: bool,
    /// Retrievable verbatim from search results.
    pub stored: bool,
}

impl Field {
    /// Indexed and stored.
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            indexed: true,
            stored: true,
        }
    }

    /// Stored for display, never searched.
    pub fn stored_only(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            indexed: false,
            ..Self::text(name, text)
        }
    }

    /// Searched, but not returned with results.
    pub fn indexed_only(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            stored: false,
            ..Self::text(name, text)
        }
    }
}

/// Fields in insertion order. Repeated names are allowed; their terms and
/// lengths accumulate under the one field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    fields: Vec<Field>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn indexed_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.indexed)
    }

    pub fn stored_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.stored)
    }

    pub fn has_indexed_fields(&self) -> bool {
        self.fields.iter().any(|f| f.indexed)
    }

    /// First value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<Field> for Document {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A crawled page as supplied by a document source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPage {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub html: String,
}

impl WebPage {
    pub fn new(url: impl Into<String>, title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            html: html.into(),
        }
    }

    /// Lay the page out by the schema in `config`.
    ///
    /// Each of `url`, `title` and `html` takes the indexed/stored flags of the
    /// schema field with the same name. A page value whose field is missing
    /// from the schema is dropped.
    pub fn to_document(&self, config: &EngineConfig) -> Document {
        [
            (URL_FIELD, &self.url),
            (TITLE_FIELD, &self.title),
            (HTML_FIELD, &self.html),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            config.field(name).map(|schema| Field {
                name: name.to_string(),
                text: value.clone(),
                indexed: schema.indexed,
                stored: schema.stored,
            })
        })
        .collect()
    }
}
