use grossmass::mass::{adjust, MassSeries, MassValue, MINIMUM_FLOOR};
use proptest::prelude::*;

fn series_in(range: std::ops::Range<i64>) -> impl Strategy<Value = MassSeries> {
    prop::collection::vec(range, 1..24)
        .prop_map(|steps| steps.into_iter().map(MassValue::from_steps).collect())
}

/// Raw input, zero rows included.
fn series_strategy() -> impl Strategy<Value = MassSeries> {
    series_in(0..50_000)
}

/// Every row already at or above the floor.
fn floored_series_strategy() -> impl Strategy<Value = MassSeries> {
    series_in(1..50_000)
}

/// A series together with a target it can reach.
fn reachable_case() -> impl Strategy<Value = (MassSeries, MassValue)> {
    series_strategy().prop_flat_map(|series| {
        let min = series.len() as i64;
        (Just(series), (min..2_000_000).prop_map(MassValue::from_steps))
    })
}

proptest! {
    #[test]
    fn sum_matches_target((series, target) in reachable_case()) {
        let out = adjust(&series, target).expect("reachable target");
        prop_assert_eq!(out.mismatch, None);
        prop_assert_eq!(out.series.total(), target);
    }

    #[test]
    fn no_row_below_floor((series, target) in reachable_case()) {
        let out = adjust(&series, target).expect("reachable target");
        for v in out.series.iter() {
            prop_assert!(*v >= MINIMUM_FLOOR, "row below floor: {}", v);
        }
    }

    #[test]
    fn length_is_preserved((series, target) in reachable_case()) {
        let out = adjust(&series, target).expect("reachable target");
        prop_assert_eq!(out.series.len(), series.len());
    }

    #[test]
    fn current_total_is_a_fixed_point(series in floored_series_strategy()) {
        let out = adjust(&series, series.total()).expect("reachable target");
        prop_assert_eq!(out.series, series);
    }

    #[test]
    fn deterministic((series, target) in reachable_case()) {
        let a = adjust(&series, target).expect("reachable target");
        let b = adjust(&series, target).expect("reachable target");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn increases_spread_evenly_in_row_order(
        series in floored_series_strategy(),
        extra in 0i64..100_000,
    ) {
        let target = series.total() + MassValue::from_steps(extra);
        let out = adjust(&series, target).expect("reachable target");

        let deltas: Vec<i64> = series
            .iter()
            .zip(out.series.iter())
            .map(|(before, after)| (*after - *before).steps())
            .collect();
        let max = *deltas.iter().max().unwrap();
        let min = *deltas.iter().min().unwrap();
        prop_assert!(max - min <= 1, "uneven deltas: {:?}", deltas);
        prop_assert!(deltas.windows(2).all(|w| w[0] >= w[1]), "extra steps not front-loaded: {:?}", deltas);
    }

    #[test]
    fn too_small_targets_are_rejected(series in series_strategy()) {
        let n = series.len() as i64;
        let target = MassValue::from_steps(n - 1);
        prop_assert!(adjust(&series, target).is_err());
    }
}
