use lighthouse_core::config::ScoringConfig;
use lighthouse_core::models::{Citation, Fragment};
use lighthouse_synthesis::{AuthenticityScorer, DraftFragment, UnitDraft};
use proptest::prelude::*;
use test_fixtures::{fragment, PRIMARY, SECONDARY_PARTITIONS};

const LEXICON: [&str; 5] = ["will", "liber", "sigil", "aethyr", "tarot"];

fn partitions() -> Vec<&'static str> {
    let mut all = vec![PRIMARY, "Unlisted"];
    all.extend(SECONDARY_PARTITIONS);
    all
}

/// Fragment text built from a subset of the lexicon, with an optional citation.
fn arb_fragment() -> impl Strategy<Value = (usize, Fragment)> {
    (
        0..partitions().len(),
        prop::collection::vec(any::<bool>(), LEXICON.len()),
        prop::option::of(0.0f64..=1.0),
    )
        .prop_map(|(partition, mentioned, reliability)| {
            let text: Vec<&str> = LEXICON
                .iter()
                .zip(&mentioned)
                .filter(|(_, m)| **m)
                .map(|(w, _)| *w)
                .collect();
            let mut f = fragment("p", &text.join(" "), reliability.unwrap_or(0.0));
            if reliability.is_none() {
                f.citations.clear();
            }
            (partition, f)
        })
}

fn draft<'a>(
    keywords: &'a [String],
    names: &'a [&'static str],
    items: &'a [(usize, Fragment)],
) -> UnitDraft<'a> {
    UnitDraft {
        fragments: items
            .iter()
            .map(|(p, fragment)| DraftFragment {
                partition_id: names[*p],
                keywords,
                fragment,
            })
            .collect(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn score_stays_in_unit_interval(items in prop::collection::vec(arb_fragment(), 0..12)) {
        let keywords: Vec<String> = LEXICON.iter().map(|w| w.to_string()).collect();
        let names = partitions();
        let scorer = AuthenticityScorer::new(&ScoringConfig::default(), PRIMARY);
        let breakdown = scorer.score_detailed(&draft(&keywords, &names, &items));

        prop_assert!((0.0..=1.0).contains(&breakdown.score));
        prop_assert!((0.0..=1.0).contains(&breakdown.base));
        prop_assert!(breakdown.tradition_multiplier >= 1.0);
        prop_assert_eq!(breakdown.score, scorer.score(&draft(&keywords, &names, &items)));
    }

    #[test]
    fn fragment_order_does_not_change_the_score(
        items in prop::collection::vec(arb_fragment(), 1..10),
        rotate in 0usize..10,
    ) {
        let keywords: Vec<String> = LEXICON.iter().map(|w| w.to_string()).collect();
        let names = partitions();
        let scorer = AuthenticityScorer::new(&ScoringConfig::default(), PRIMARY);
        let mut rotated = items.clone();
        rotated.rotate_left(rotate % items.len());

        let a = scorer.score_detailed(&draft(&keywords, &names, &items));
        let b = scorer.score_detailed(&draft(&keywords, &names, &rotated));
        prop_assert!((a.score - b.score).abs() < 1e-12);
        prop_assert_eq!(a.tradition_multiplier, b.tradition_multiplier);
    }

    #[test]
    fn a_primary_source_citation_never_lowers_the_score(
        items in prop::collection::vec(arb_fragment(), 1..10),
    ) {
        let keywords: Vec<String> = LEXICON.iter().map(|w| w.to_string()).collect();
        let names = partitions();
        let config = ScoringConfig::default();
        let scorer = AuthenticityScorer::new(&config, PRIMARY);
        let before = scorer.score(&draft(&keywords, &names, &items));

        let mut cited = items.clone();
        cited[0].1.citations.push(Citation {
            source_label: "Liber AL vel Legis".into(),
            reliability: config.primary_source_reliability,
        });
        let after = scorer.score(&draft(&keywords, &names, &cited));
        prop_assert!(after >= before, "{after} < {before}");
    }
}
