//! Render walk over a resolved layout
//!
//! The walk is the flat instruction stream a renderer emits element by
//! element. It only carries coordinates and spacer markers; looking up match
//! data, escaping commentary and choosing the blank glyph for an empty header
//! belong to the renderer.

use serde::{Deserialize, Serialize};

use crate::types::{BracketLayout, LayoutColumn, MatchRef, Orientation, ResultRef};

/// One rendering instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum LayoutStep {
    /// Bracket subtitle, drawn only when the bracket has one
    Subtitle,
    /// Bracket-wide commentary, drawn only when the bracket has some
    Comments,
    /// Open a column named after its lead round
    ColumnStart { column_index: u32, lead_round: u32 },
    /// Column header; `None` means draw a blank
    RoundComment { round: Option<u32> },
    /// Vertical offset before the first slot of a column
    ColumnSpacer,
    Match(MatchRef),
    /// Gap between two matches of the same round
    MatchSpacer { round: u32 },
    /// Gap between a round and the next round below it in the column
    LosersSpacer { round: u32 },
    /// Blank competitor box drawn by a placeholder slot
    EmptyCompetitor { orientation: Orientation },
    /// Bracket footer, drawn once under the first column
    Footer,
    ColumnEnd,
    ResultsStart { orientation: Orientation },
    ResultsSpacer,
    Result(ResultRef),
    /// Gap between two result slots
    ResultSpacer,
    ResultsEnd,
    /// Bracket images, closing the whole bracket
    Images,
}

impl BracketLayout {
    /// Instruction stream for the whole layout: header, columns, results,
    /// images.
    ///
    /// Columns without round slots have nothing to draw and are skipped; the
    /// footer goes under the first column that is drawn.
    pub fn walk(&self) -> Vec<LayoutStep> {
        let mut steps = vec![LayoutStep::Subtitle, LayoutStep::Comments];

        let drawn = self.columns.iter().filter_map(|column| {
            column
                .lead_round()
                .map(|slot| (column, slot.round_index))
        });
        for (idx, (column, lead_round)) in drawn.enumerate() {
            walk_column(column, lead_round, idx == 0, &mut steps);
        }

        steps.push(LayoutStep::ResultsStart {
            orientation: self.results.orientation,
        });
        steps.push(LayoutStep::ResultsSpacer);
        for (idx, result) in self.results.result_refs().enumerate() {
            if idx > 0 {
                steps.push(LayoutStep::ResultSpacer);
            }
            steps.push(LayoutStep::Result(result));
        }
        steps.push(LayoutStep::ResultsEnd);
        steps.push(LayoutStep::Images);

        steps
    }
}

fn walk_column(
    column: &LayoutColumn,
    lead_round: u32,
    with_footer: bool,
    steps: &mut Vec<LayoutStep>,
) {
    steps.push(LayoutStep::ColumnStart {
        column_index: column.column_index,
        lead_round,
    });
    steps.push(LayoutStep::RoundComment {
        round: column.comment_round,
    });
    steps.push(LayoutStep::ColumnSpacer);

    let mut previous: Option<u32> = None;
    for slot in &column.rounds {
        if let Some(round) = previous {
            steps.push(LayoutStep::LosersSpacer { round });
        }

        for _ in 0..slot.empty_competitors {
            steps.push(LayoutStep::EmptyCompetitor {
                orientation: slot.orientation,
            });
        }

        for (idx, match_ref) in slot.match_refs().enumerate() {
            if idx > 0 {
                steps.push(LayoutStep::MatchSpacer {
                    round: slot.round_index,
                });
            }
            steps.push(LayoutStep::Match(match_ref));
        }

        previous = Some(slot.round_index);
    }

    if with_footer {
        steps.push(LayoutStep::Footer);
    }
    steps.push(LayoutStep::ColumnEnd);
}

#[cfg(test)]
#[path = "walk_tests.rs"]
mod walk_tests;
