use super::*;
use crate::resolver::resolve;
use crate::types::{BracketSpec, EliminationMode};

fn m(round_index: u32, match_index: u32) -> LayoutStep {
    LayoutStep::Match(MatchRef {
        round_index,
        match_index,
        orientation: Orientation::Left,
    })
}

fn r(result_index: u32) -> LayoutStep {
    LayoutStep::Result(ResultRef {
        result_index,
        orientation: Orientation::Left,
    })
}

#[test]
fn test_double_eight_walk() {
    use LayoutStep::*;

    let layout = resolve(BracketSpec::new(8, EliminationMode::Double)).unwrap();
    let expected = vec![
        Subtitle,
        Comments,
        ColumnStart {
            column_index: 1,
            lead_round: 1,
        },
        RoundComment { round: Some(1) },
        ColumnSpacer,
        m(1, 1),
        MatchSpacer { round: 1 },
        m(1, 2),
        MatchSpacer { round: 1 },
        m(1, 3),
        MatchSpacer { round: 1 },
        m(1, 4),
        LosersSpacer { round: 1 },
        m(6, 1),
        MatchSpacer { round: 6 },
        m(6, 2),
        Footer,
        ColumnEnd,
        ColumnStart {
            column_index: 2,
            lead_round: 2,
        },
        RoundComment { round: Some(2) },
        ColumnSpacer,
        m(2, 1),
        MatchSpacer { round: 2 },
        m(2, 2),
        LosersSpacer { round: 2 },
        m(7, 1),
        MatchSpacer { round: 7 },
        m(7, 2),
        ColumnEnd,
        ColumnStart {
            column_index: 3,
            lead_round: 3,
        },
        RoundComment { round: Some(3) },
        ColumnSpacer,
        m(3, 1),
        LosersSpacer { round: 3 },
        m(8, 1),
        ColumnEnd,
        ColumnStart {
            column_index: 4,
            lead_round: 9,
        },
        RoundComment { round: None },
        ColumnSpacer,
        EmptyCompetitor {
            orientation: Orientation::Left,
        },
        LosersSpacer { round: 9 },
        m(9, 1),
        ColumnEnd,
        ColumnStart {
            column_index: 5,
            lead_round: 4,
        },
        RoundComment { round: Some(4) },
        ColumnSpacer,
        m(4, 1),
        ColumnEnd,
        ColumnStart {
            column_index: 6,
            lead_round: 5,
        },
        RoundComment { round: Some(5) },
        ColumnSpacer,
        m(5, 1),
        ColumnEnd,
        ResultsStart {
            orientation: Orientation::Left,
        },
        ResultsSpacer,
        r(1),
        ResultSpacer,
        r(2),
        ResultsEnd,
        Images,
    ];

    assert_eq!(layout.walk(), expected);
}

#[test]
fn test_single_walk_has_no_losers_spacers() {
    let layout = resolve(BracketSpec::new(4, EliminationMode::Single)).unwrap();
    let steps = layout.walk();

    assert!(!steps
        .iter()
        .any(|step| matches!(step, LayoutStep::LosersSpacer { .. })));
    assert!(!steps
        .iter()
        .any(|step| matches!(step, LayoutStep::EmptyCompetitor { .. })));
    assert_eq!(
        steps
            .iter()
            .filter(|step| matches!(step, LayoutStep::Footer))
            .count(),
        1
    );
}

#[test]
fn test_walk_visits_every_match_once() {
    let layout = resolve(BracketSpec::new(8, EliminationMode::Double)).unwrap();
    let walked: Vec<MatchRef> = layout
        .walk()
        .into_iter()
        .filter_map(|step| match step {
            LayoutStep::Match(match_ref) => Some(match_ref),
            _ => None,
        })
        .collect();

    assert_eq!(walked, layout.match_refs());
}

#[test]
fn test_step_json_is_tagged() {
    let json = serde_json::to_value(m(6, 2)).unwrap();
    assert_eq!(json["step"], "match");
    assert_eq!(json["round_index"], 6);
    assert_eq!(json["match_index"], 2);
    assert_eq!(json["orientation"], "left");

    let spacer = serde_json::to_value(LayoutStep::LosersSpacer { round: 9 }).unwrap();
    assert_eq!(spacer["step"], "losers_spacer");
}

#[test]
fn test_empty_column_is_skipped() {
    let mut layout = resolve(BracketSpec::new(4, EliminationMode::Single)).unwrap();
    layout.columns.insert(
        0,
        LayoutColumn {
            column_index: 0,
            comment_round: None,
            rounds: Vec::new(),
        },
    );

    let steps = layout.walk();
    let starts: Vec<LayoutStep> = steps
        .iter()
        .copied()
        .filter(|step| matches!(step, LayoutStep::ColumnStart { .. }))
        .collect();
    assert_eq!(
        starts,
        vec![
            LayoutStep::ColumnStart {
                column_index: 1,
                lead_round: 1,
            },
            LayoutStep::ColumnStart {
                column_index: 2,
                lead_round: 2,
            },
        ]
    );

    // Footer still closes the first drawn column
    let footer = steps
        .iter()
        .position(|step| *step == LayoutStep::Footer)
        .unwrap();
    assert_eq!(steps[footer + 1], LayoutStep::ColumnEnd);
    assert_eq!(
        steps.iter().filter(|step| **step == LayoutStep::Footer).count(),
        1
    );
    assert!(steps[..footer]
        .iter()
        .any(|step| matches!(step, LayoutStep::Match(m) if m.round_index == 1)));
}

#[test]
fn test_header_first_images_last() {
    let layout = resolve(BracketSpec::new(8, EliminationMode::Single)).unwrap();
    let steps = layout.walk();

    assert_eq!(steps[..2], [LayoutStep::Subtitle, LayoutStep::Comments]);
    assert_eq!(steps.last(), Some(&LayoutStep::Images));
}
