// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parsed queries: a flat list of boolean term clauses.
//!
//! ```text
//! +html:cat -title:dog bird^2   →   MUST     html:cat   ×1
//!                                   MUST_NOT title:dog  ×1
//!                                   SHOULD   html:bird  ×2
//! ```
//!
//! Terms in a clause are already analyzed, so they can be looked up in the
//! snapshot as-is.

mod parser;

use std::fmt;

use serde::Serialize;

pub use parser::QueryParser;

/// How a clause participates in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occur {
    /// Every MUST clause has to match.
    Must,
    /// Optional, but contributes to the score. With no MUST clauses at least
    /// one SHOULD clause has to match.
    Should,
    /// Any match excludes the document. Never scored.
    MustNot,
}

impl Occur {
    fn prefix(self) -> &'static str {
        match self {
            Occur::Must => "+",
            Occur::Should => "",
            Occur::MustNot => "-",
        }
    }
}

/// One analyzed term against one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    pub occur: Occur,
    pub field: String,
    pub term: String,
    /// Multiplier applied to this clause's BM25 contribution.
    pub boost: f64,
}

impl Clause {
    pub fn new(occur: Occur, field: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            occur,
            field: field.into(),
            term: term.into(),
            boost: 1.0,
        }
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:{}", self.occur.prefix(), self.field, self.term)?;
        if (self.boost - 1.0).abs() > f64::EPSILON {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}

/// The expression tree produced by `QueryParser`. Clause order is the order
/// terms appeared in the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BooleanQuery {
    clauses: Vec<Clause>,
}

impl BooleanQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn by_occur(&self, occur: Occur) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().filter(move |c| c.occur == occur)
    }

    /// Whether any document could match: a query made only of exclusions
    /// matches nothing.
    pub fn has_positive_clauses(&self) -> bool {
        self.clauses.iter().any(|c| c.occur != Occur::MustNot)
    }
}

impl fmt::Display for BooleanQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

impl FromIterator<Clause> for BooleanQuery {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}
