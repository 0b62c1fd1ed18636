//! BM25 scoring properties.

use lexis::search::{idf, TermScorer};
use lexis::Bm25Params;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_idf_positive_and_decreasing(doc_count in 1usize..10_000, a in 1usize..10_000, b in 1usize..10_000) {
        let (lo, hi) = (a.min(b).min(doc_count), a.max(b).min(doc_count));
        prop_assert!(idf(doc_count, hi) > 0.0);
        prop_assert!(idf(doc_count, lo) >= idf(doc_count, hi));
    }

    #[test]
    fn prop_score_increases_with_term_frequency(
        tf in 1u32..1_000,
        len in 1u32..10_000,
        avg in 1.0f64..1_000.0,
    ) {
        let scorer = TermScorer::new(Bm25Params::default(), 1.5, avg, 1.0);
        let field_length = len.max(tf + 1);
        prop_assert!(scorer.score(tf + 1, field_length) > scorer.score(tf, field_length));
    }

    #[test]
    fn prop_score_decreases_with_field_length(
        tf in 1u32..100,
        len in 100u32..10_000,
        avg in 1.0f64..1_000.0,
    ) {
        let scorer = TermScorer::new(Bm25Params::default(), 1.5, avg, 1.0);
        prop_assert!(scorer.score(tf, len) >= scorer.score(tf, len + 1));
    }

    #[test]
    fn prop_score_bounded_by_saturation(tf in 1u32..1_000_000, len in 1u32..10_000) {
        let params = Bm25Params::default();
        let scorer = TermScorer::new(params, 1.0, 100.0, 1.0);
        let score = scorer.score(tf, len);
        prop_assert!(score > 0.0);
        prop_assert!(score < params.k1 + 1.0);
    }

    #[test]
    fn prop_boost_scales_linearly(tf in 1u32..100, len in 1u32..1_000, boost in 0.0f64..10.0) {
        let params = Bm25Params::default();
        let plain = TermScorer::new(params, 2.0, 50.0, 1.0).score(tf, len);
        let boosted = TermScorer::new(params, 2.0, 50.0, boost).score(tf, len);
        prop_assert!((boosted - boost * plain).abs() < 1e-9 * (1.0 + boosted.abs()));
    }
}
