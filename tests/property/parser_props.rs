//! Query parser robustness.

use std::sync::Arc;

use lexis::{AnalyzerRegistry, EngineConfig, Error, Occur, QueryParser};
use proptest::prelude::*;

use super::word_strategy;

fn parser() -> QueryParser {
    QueryParser::new(&EngineConfig::default(), Arc::new(AnalyzerRegistry::default()))
}

fn prefix_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "+", "-"])
}

proptest! {
    #[test]
    fn prop_parse_never_panics(input in ".{0,64}") {
        match parser().parse(&input) {
            Ok(_) => {}
            Err(Error::QuerySyntax { position, .. }) => prop_assert!(position <= input.len()),
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn prop_one_clause_per_word(words in prop::collection::vec((prefix_strategy(), word_strategy()), 1..8)) {
        let input: Vec<String> = words.iter().map(|(p, w)| format!("{}{}", p, w)).collect();
        let query = parser().parse(&input.join("  ")).unwrap();

        prop_assert_eq!(query.len(), words.len());
        for (clause, (prefix, word)) in query.clauses().iter().zip(&words) {
            let expected = match *prefix {
                "+" => Occur::Must,
                "-" => Occur::MustNot,
                _ => Occur::Should,
            };
            prop_assert_eq!(clause.occur, expected);
            prop_assert_eq!(clause.field.as_str(), "html");
            prop_assert_eq!(clause.term.as_str(), *word);
            prop_assert_eq!(clause.boost, 1.0);
        }
    }

    #[test]
    fn prop_field_qualifier_is_kept(field in "[a-z]{1,8}", word in word_strategy()) {
        let query = parser().parse(&format!("{}:{}", field, word)).unwrap();
        prop_assert_eq!(query.len(), 1);
        prop_assert_eq!(query.clauses()[0].field.as_str(), field.as_str());
    }

    #[test]
    fn prop_whitespace_only_is_empty_query(spaces in "[ \t\n]{0,10}") {
        let is_syntax_error = matches!(parser().parse(&spaces), Err(Error::QuerySyntax { position: 0, .. }));
        prop_assert!(is_syntax_error);
    }
}
