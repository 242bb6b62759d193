//! Property-based tests for the ESG aggregator.

use aurum_core::{EsgScoreRecord, EsgScoreTables};
use aurum_portfolio::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

const IDENTIFIERS: [&str; 8] = [
    "US0378331005",
    "US5949181045",
    "US912828Z229",
    "GB0002634946",
    "US02079K3059",
    "DE0007164600",
    "US88160R1014",
    "US0231351067",
];

fn tables_from(scores: &[f64]) -> EsgScoreTables {
    // Every other identifier gets a record so some holdings stay unmatched.
    EsgScoreTables::from_records(
        IDENTIFIERS
            .iter()
            .zip(scores)
            .step_by(2)
            .map(|(id, s)| EsgScoreRecord::new(*id, *s, 100.0 - s, s / 2.0, *s)),
        Vec::new(),
    )
}

fn holdings_strategy() -> impl Strategy<Value = Vec<Holding>> {
    prop::collection::vec((0..IDENTIFIERS.len(), 0u32..5_000_000), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(i, cents)| {
                Holding::new(IDENTIFIERS[i], Decimal::new(i64::from(cents), 2), AssetClass::Equity)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_scores_and_coverage_in_range(
        holdings in holdings_strategy(),
        scores in prop::collection::vec(0.0f64..=100.0, IDENTIFIERS.len()),
    ) {
        let result = calculate_weighted_esg(&holdings, &tables_from(&scores), &EsgConfig::default());

        prop_assert!((0.0..=100.0).contains(&result.coverage));
        for score in [
            result.overall_score,
            result.environmental_score,
            result.social_score,
            result.governance_score,
        ] {
            prop_assert!((-1e-9..=100.0 + 1e-9).contains(&score), "score {score}");
        }
        prop_assert!(result.matched_value <= result.total_value);
        prop_assert_eq!(
            result.matched_holdings + result.unmatched.len() + result.excluded_holdings,
            result.total_holdings
        );
    }

    #[test]
    fn prop_uniform_score_is_returned_exactly(
        cents in prop::collection::vec(1i64..100_000_000_000, 1..IDENTIFIERS.len()),
        score_hundredths in 0u32..=10_000,
    ) {
        let score = f64::from(score_hundredths) / 100.0;
        let holdings: Vec<Holding> = IDENTIFIERS
            .iter()
            .zip(&cents)
            .map(|(id, c)| Holding::new(*id, Decimal::new(*c, 2), AssetClass::Equity))
            .collect();
        let tables = EsgScoreTables::from_records(
            holdings.iter().map(|h| EsgScoreRecord::uniform(h.identifier.clone(), score)),
            Vec::new(),
        );

        let result = calculate_weighted_esg(&holdings, &tables, &EsgConfig::default());
        prop_assert_eq!(result.overall_score, score);
        prop_assert_eq!(result.environmental_score, score);
        prop_assert_eq!(result.coverage, 100.0);
    }

    #[test]
    fn prop_aggregation_is_idempotent(
        holdings in holdings_strategy(),
        scores in prop::collection::vec(0.0f64..=100.0, IDENTIFIERS.len()),
    ) {
        let tables = tables_from(&scores);
        let config = EsgConfig::default();
        prop_assert_eq!(
            calculate_weighted_esg(&holdings, &tables, &config),
            calculate_weighted_esg(&holdings, &tables, &config)
        );
    }

    #[test]
    fn prop_buckets_partition_holdings(holdings in holdings_strategy()) {
        let tables = tables_from(&[50.0; 8]);
        let config = EsgConfig::default();
        let buckets = esg_by_asset_class(&holdings, &tables, &config);
        let total = calculate_weighted_esg(&holdings, &tables, &config);

        let counted: usize = buckets.values().map(|r| r.total_holdings).sum();
        prop_assert_eq!(counted, total.total_holdings);
        let value: Decimal = buckets.values().map(|r| r.total_value).sum();
        prop_assert_eq!(value, total.total_value);
    }
}
