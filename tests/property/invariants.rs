//! Invariants over randomly generated corpora.
//!
//! Every committed snapshot must pass `validate_snapshot`, and every search
//! over it must return only matching documents, in rank order.

use std::collections::HashSet;
use std::sync::Arc;

use lexis::testing::snapshot_from_html;
use lexis::{
    validate_snapshot, AnalyzerRegistry, BooleanQuery, Clause, DocId, EngineConfig, Occur,
    QueryParser, Searcher, Snapshot,
};
use proptest::prelude::*;

use super::{corpus_strategy, word_strategy};

fn build(corpus: &[String]) -> Snapshot {
    let texts: Vec<&str> = corpus.iter().map(String::as_str).collect();
    snapshot_from_html(&texts)
}

/// Doc ids whose text contains `word`.
fn containing(corpus: &[String], word: &str) -> HashSet<DocId> {
    corpus
        .iter()
        .enumerate()
        .filter(|(_, text)| text.split(' ').any(|w| w == word))
        .map(|(i, _)| DocId(i as u32))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_committed_snapshot_is_consistent(corpus in corpus_strategy()) {
        let snapshot = build(&corpus);
        prop_assert_eq!(snapshot.doc_count(), corpus.len());
        prop_assert!(validate_snapshot(&snapshot).is_ok());

        let html = snapshot.field("html").unwrap();
        let tokens: usize = corpus.iter().map(|t| t.split(' ').count()).sum();
        prop_assert_eq!(html.total_length(), tokens as u64);
    }

    #[test]
    fn prop_single_term_hits_exactly_the_containing_docs(corpus in corpus_strategy(), word in word_strategy()) {
        let searcher = Searcher::new(Arc::new(build(&corpus)));
        let query = BooleanQuery::new().with_clause(Clause::new(Occur::Should, "html", word));
        let top = searcher.top_docs(&query, usize::MAX);

        let expected = containing(&corpus, word);
        let actual: HashSet<DocId> = top.hits.iter().map(|h| h.doc_id).collect();
        prop_assert_eq!(top.total_hits, expected.len());
        prop_assert_eq!(actual, expected);
        prop_assert!(top.hits.iter().all(|h| h.score > 0.0));
    }

    #[test]
    fn prop_results_in_rank_order(corpus in corpus_strategy(), a in word_strategy(), b in word_strategy(), k in 1usize..10) {
        let searcher = Searcher::new(Arc::new(build(&corpus)));
        let query = BooleanQuery::new()
            .with_clause(Clause::new(Occur::Should, "html", a))
            .with_clause(Clause::new(Occur::Should, "html", b));
        let top = searcher.top_docs(&query, k);

        prop_assert!(top.hits.len() <= k);
        prop_assert!(top.hits.len() <= top.total_hits);
        for pair in top.hits.windows(2) {
            prop_assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].doc_id < pair[1].doc_id)
            );
        }
    }

    #[test]
    fn prop_top_k_is_prefix_of_full_ranking(corpus in corpus_strategy(), word in word_strategy(), k in 1usize..10) {
        let searcher = Searcher::new(Arc::new(build(&corpus)));
        let query = BooleanQuery::new().with_clause(Clause::new(Occur::Should, "html", word));
        let full = searcher.search(&query, usize::MAX);
        let top = searcher.search(&query, k);
        let n = k.min(full.len());
        prop_assert_eq!(&top[..], &full[..n]);
    }

    #[test]
    fn prop_must_not_excludes_and_must_requires(corpus in corpus_strategy(), a in word_strategy(), b in word_strategy()) {
        prop_assume!(a != b);
        let searcher = Searcher::new(Arc::new(build(&corpus)));
        let query = BooleanQuery::new()
            .with_clause(Clause::new(Occur::Must, "html", a))
            .with_clause(Clause::new(Occur::MustNot, "html", b));

        let with_a = containing(&corpus, a);
        let with_b = containing(&corpus, b);
        let expected: HashSet<DocId> = with_a.difference(&with_b).copied().collect();
        let actual: HashSet<DocId> = searcher
            .search(&query, usize::MAX)
            .iter()
            .map(|h| h.doc_id)
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_parsed_and_built_queries_agree(corpus in corpus_strategy(), a in word_strategy(), b in word_strategy()) {
        let parser = QueryParser::new(&EngineConfig::default(), Arc::new(AnalyzerRegistry::default()));
        let parsed = parser.parse(&format!("+{} {}", a, b)).unwrap();
        let built = BooleanQuery::new()
            .with_clause(Clause::new(Occur::Must, "html", a))
            .with_clause(Clause::new(Occur::Should, "html", b));
        prop_assert_eq!(&parsed, &built);

        let searcher = Searcher::new(Arc::new(build(&corpus)));
        prop_assert_eq!(searcher.search(&parsed, 10), searcher.search(&built, 10));
    }

    #[test]
    fn prop_extra_occurrence_never_lowers_rank(corpus in corpus_strategy(), word in word_strategy()) {
        // Two appended docs of equal length; the second has one more `word`.
        let filler = if word == "salt" { "milk" } else { "salt" };
        let mut corpus = corpus;
        corpus.push(format!("{} {} {}", word, filler, filler));
        corpus.push(format!("{} {} {}", word, word, filler));
        let fewer = DocId((corpus.len() - 2) as u32);
        let more = DocId((corpus.len() - 1) as u32);

        let searcher = Searcher::new(Arc::new(build(&corpus)));
        let query = BooleanQuery::new().with_clause(Clause::new(Occur::Should, "html", word));
        let hits = searcher.search(&query, usize::MAX);
        let rank = |id: DocId| hits.iter().position(|h| h.doc_id == id).unwrap();
        prop_assert!(rank(more) < rank(fewer));
    }
}
