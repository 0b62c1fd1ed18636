// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query string parser.
//!
//! # Grammar
//!
//! ```text
//! query   := clause (WS+ clause)*
//! clause  := prefix? (field ':')? text boost?
//! prefix  := '+' | '-'
//! boost   := '^' NUMBER
//! ```
//!
//! `text` runs through the analyzer registered for its field, exactly as the
//! writer did at index time. One clause can therefore become several term
//! clauses (`wi-fi` → `wi`, `fi`) or none at all (stop words). Positions in
//! errors are byte offsets into the input.

use std::collections::HashMap;
use std::sync::Arc;

use super::{BooleanQuery, Clause, Occur};
use crate::analysis::AnalyzerRegistry;
use crate::config::{DefaultOperator, EngineConfig};
use crate::error::{Error, Result};

/// One whitespace-delimited clause before analysis.
#[derive(Debug, PartialEq)]
struct RawClause<'a> {
    occur: Option<Occur>,
    field: Option<&'a str>,
    text: &'a str,
    boost: f64,
    /// Byte offset of the boost digits, or of the clause when there are none.
    boost_at: usize,
}

/// Turns query strings into `BooleanQuery` trees.
#[derive(Debug, Clone)]
pub struct QueryParser {
    default_field: String,
    default_operator: DefaultOperator,
    analyzers: Arc<AnalyzerRegistry>,
    field_boosts: HashMap<String, f64>,
}

impl QueryParser {
    pub fn new(config: &EngineConfig, analyzers: Arc<AnalyzerRegistry>) -> Self {
        Self {
            default_field: config.default_field.clone(),
            default_operator: config.default_operator,
            analyzers,
            field_boosts: config
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.boost))
                .collect(),
        }
    }

    pub fn with_default_field(mut self, field: impl Into<String>) -> Self {
        self.default_field = field.into();
        self
    }

    pub fn with_default_operator(mut self, operator: DefaultOperator) -> Self {
        self.default_operator = operator;
        self
    }

    pub fn default_field(&self) -> &str {
        &self.default_field
    }

    /// Parse `input` into a query tree.
    ///
    /// Fails on an empty (or all-whitespace) string, a dangling `+`/`-`, a
    /// `field:` with no term, and a malformed `^boost`. Unknown fields are
    /// fine: they just match nothing.
    pub fn parse(&self, input: &str) -> Result<BooleanQuery> {
        if input.trim().is_empty() {
            return Err(Error::syntax("empty query", 0));
        }

        let bare = match self.default_operator {
            DefaultOperator::Or => Occur::Should,
            DefaultOperator::And => Occur::Must,
        };

        let mut query = BooleanQuery::new();
        for (position, token) in split_clauses(input) {
            let raw = lex_clause(position, token)?;
            let field = raw.field.unwrap_or(&self.default_field);
            let occur = raw.occur.unwrap_or(bare);
            let boost = raw.boost * self.field_boosts.get(field).copied().unwrap_or(1.0);
            if !boost.is_finite() {
                return Err(Error::syntax("boost is out of range", raw.boost_at));
            }

            for term in self.analyzers.for_field(field).analyze(raw.text) {
                query.push(Clause {
                    occur,
                    field: field.to_string(),
                    term,
                    boost,
                });
            }
        }

        Ok(query)
    }
}

/// Whitespace-separated tokens with their byte offsets.
fn split_clauses(input: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = input;
    let mut offset = 0;
    std::iter::from_fn(move || {
        let trimmed = rest.trim_start();
        offset += rest.len() - trimmed.len();
        if trimmed.is_empty() {
            return None;
        }
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        let token = &trimmed[..end];
        let start = offset;
        rest = &trimmed[end..];
        offset += end;
        Some((start, token))
    })
}

fn lex_clause(position: usize, token: &str) -> Result<RawClause<'_>> {
    let (occur, body, body_start) = match token.as_bytes().first() {
        Some(b'+') => (Some(Occur::Must), &token[1..], position + 1),
        Some(b'-') => (Some(Occur::MustNot), &token[1..], position + 1),
        _ => (None, token, position),
    };
    if body.is_empty() {
        return Err(Error::syntax(
            format!("'{}' must be followed by a term", token),
            position,
        ));
    }

    let (body, boost, boost_at) = match body.rsplit_once('^') {
        Some((head, digits)) => {
            if let Some(extra) = head.find('^') {
                return Err(Error::syntax("only one '^boost' per term", body_start + extra));
            }
            let at = body_start + head.len() + 1;
            let boost = digits
                .parse::<f64>()
                .ok()
                .filter(|b| b.is_finite() && *b >= 0.0)
                .ok_or_else(|| Error::syntax(format!("invalid boost '{}'", digits), at))?;
            (head, boost, at)
        }
        None => (body, 1.0, position),
    };

    let (field, text) = match body.split_once(':') {
        Some((field, text)) => {
            if field.is_empty() {
                return Err(Error::syntax("missing field name before ':'", body_start));
            }
            (Some(field), text)
        }
        None => (None, body),
    };
    if text.is_empty() {
        let at = body_start + body.len();
        let message = match field {
            Some(field) => format!("missing term after '{}:'", field),
            None => "missing term before '^'".to_string(),
        };
        return Err(Error::syntax(message, at));
    }

    Ok(RawClause {
        occur,
        field,
        text,
        boost,
        boost_at,
    })
}
