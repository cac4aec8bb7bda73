use bracket_layout::{
    resolve, BracketLayoutResolver, BracketSpec, EliminationMode, LayoutError, Orientation,
    RoundKind, TopologyTable,
};
use proptest::prelude::*;

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Left), Just(Orientation::Right)]
}

fn supported_spec() -> impl Strategy<Value = BracketSpec> {
    let single = (1u32..=7).prop_map(|exp| BracketSpec::new(1 << exp, EliminationMode::Single));
    let double = Just(BracketSpec::new(8, EliminationMode::Double));
    (prop_oneof![single, double], orientation())
        .prop_map(|(spec, orientation)| spec.with_orientation(orientation))
}

proptest! {
    #[test]
    fn winners_rounds_hold_count_minus_one(spec in supported_spec()) {
        let layout = resolve(spec).unwrap();
        prop_assert_eq!(
            layout.total_matches(RoundKind::Winners),
            spec.competitor_count as usize - 1
        );
    }

    #[test]
    fn orientation_reaches_every_ref(spec in supported_spec()) {
        let layout = resolve(spec).unwrap();
        for match_ref in layout.match_refs() {
            prop_assert_eq!(match_ref.orientation, spec.orientation);
        }
        for result_ref in layout.result_refs() {
            prop_assert_eq!(result_ref.orientation, spec.orientation);
        }
    }

    #[test]
    fn match_indices_have_no_gaps(spec in supported_spec()) {
        let layout = resolve(spec).unwrap();
        for slot in layout.rounds() {
            let expected: Vec<u32> = (1..=slot.match_indices.len() as u32).collect();
            prop_assert_eq!(&slot.match_indices, &expected);
        }
    }

    #[test]
    fn non_powers_of_two_are_invalid(count in 0u32..10_000, mode in prop_oneof![
        Just(EliminationMode::Single),
        Just(EliminationMode::Double),
    ]) {
        prop_assume!(!count.is_power_of_two());
        let err = resolve(BracketSpec::new(count, mode)).unwrap_err();
        let is_invalid = matches!(err, LayoutError::InvalidSpec { .. });
        prop_assert!(is_invalid);
    }
}

const DOUBLE_FOUR: &str = r#"
[[topology]]
competitor_count = 4
mode = "double"

[[topology.columns]]
comment_round = 1
rounds = [
    { round_index = 1, kind = "winners", matches = 2 },
    { round_index = 4, kind = "losers", matches = 1 },
]

[[topology.columns]]
comment_round = 2
rounds = [
    { round_index = 2, kind = "winners", matches = 1 },
    { round_index = 5, kind = "losers", matches = 1 },
]

[[topology.columns]]
comment_round = 3
rounds = [{ round_index = 3, kind = "championship", matches = 1 }]
"#;

#[test]
fn double_rows_pair_every_losers_round() {
    let table = TopologyTable::from_toml_str(DOUBLE_FOUR).unwrap();
    let double_keys: Vec<_> = table
        .keys()
        .into_iter()
        .filter(|key| key.mode == EliminationMode::Double)
        .collect();
    assert_eq!(double_keys.len(), 2);

    let resolver = BracketLayoutResolver::with_table(table);
    for key in double_keys {
        let layout = resolver
            .resolve(BracketSpec::new(key.competitor_count, key.mode))
            .unwrap();

        for column in &layout.columns {
            let has_losers = column.rounds.iter().any(|slot| slot.kind == RoundKind::Losers);
            let paired = column
                .rounds
                .iter()
                .any(|slot| matches!(slot.kind, RoundKind::Winners | RoundKind::Placeholder));
            assert!(
                !has_losers || paired,
                "column {} of the {} competitor bracket has an unpaired losers round",
                column.column_index,
                key.competitor_count
            );
        }

        // Each losers match knocks one competitor out, and all but the two
        // finalists go out there
        assert_eq!(
            layout.total_matches(RoundKind::Losers),
            key.competitor_count as usize - 2
        );
    }
}
