//! Bracket specs and the layout records derived from them

use serde::{Deserialize, Serialize};
use std::fmt;

/// How many losses knock a competitor out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EliminationMode {
    Single,
    Double,
}

impl EliminationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EliminationMode::Single => "single",
            EliminationMode::Double => "double",
        }
    }
}

impl fmt::Display for EliminationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual half of a mirrored bracket
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Left,
    Right,
}

impl Orientation {
    /// The opposite half
    pub fn mirrored(self) -> Orientation {
        match self {
            Orientation::Left => Orientation::Right,
            Orientation::Right => Orientation::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Left => "left",
            Orientation::Right => "right",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of a bracket instance, supplied by the hosting application.
///
/// The spec is immutable once built; every layout record is derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BracketSpec {
    /// Number of competitors entering the first round (power of two)
    pub competitor_count: u32,
    /// Single or double elimination
    pub mode: EliminationMode,
    /// Half of the bracket the layout is drawn for
    #[serde(default)]
    pub orientation: Orientation,
}

impl BracketSpec {
    /// Create a left-oriented spec
    pub fn new(competitor_count: u32, mode: EliminationMode) -> Self {
        Self {
            competitor_count,
            mode,
            orientation: Orientation::Left,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Track a round belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundKind {
    /// Undefeated competitors
    Winners,
    /// Once-defeated competitors (double elimination only)
    Losers,
    /// Final rounds on the winners track, fed by both brackets
    Championship,
    /// Contentless spacer that keeps losers columns aligned
    Placeholder,
}

impl RoundKind {
    /// Rounds drawn along the top (winners) track of the bracket
    pub fn is_winners_track(self) -> bool {
        matches!(self, RoundKind::Winners | RoundKind::Championship)
    }
}

/// Coordinate of one match in externally stored match data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRef {
    pub round_index: u32,
    pub match_index: u32,
    pub orientation: Orientation,
}

/// Coordinate of one final standing (1 = winner, 2 = runner-up)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultRef {
    pub result_index: u32,
    pub orientation: Orientation,
}

/// One round as positioned inside a column
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSlot {
    /// Round number in the external data store
    pub round_index: u32,
    pub kind: RoundKind,
    /// Match numbers in draw order (1-based)
    pub match_indices: Vec<u32>,
    /// Blank competitor boxes drawn by a placeholder slot
    pub empty_competitors: u32,
    pub orientation: Orientation,
}

impl RoundSlot {
    pub fn is_placeholder(&self) -> bool {
        self.kind == RoundKind::Placeholder
    }

    pub fn match_count(&self) -> usize {
        self.match_indices.len()
    }

    /// Match coordinates of this round, in draw order
    pub fn match_refs(&self) -> impl Iterator<Item = MatchRef> + '_ {
        self.match_indices.iter().map(move |&match_index| MatchRef {
            round_index: self.round_index,
            match_index,
            orientation: self.orientation,
        })
    }
}

/// A physical column of the drawn bracket
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutColumn {
    /// Position from the outer edge (1-based)
    pub column_index: u32,
    /// Round whose commentary heads the column (None = blank header)
    pub comment_round: Option<u32>,
    /// Round slots from top to bottom
    pub rounds: Vec<RoundSlot>,
}

impl LayoutColumn {
    /// Round that names the column
    pub fn lead_round(&self) -> Option<&RoundSlot> {
        self.rounds.first()
    }
}

/// Final standings block drawn after the last column
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsBlock {
    pub result_indices: Vec<u32>,
    pub orientation: Orientation,
}

impl ResultsBlock {
    pub fn result_refs(&self) -> impl Iterator<Item = ResultRef> + '_ {
        self.result_indices.iter().map(move |&result_index| ResultRef {
            result_index,
            orientation: self.orientation,
        })
    }
}

/// Complete resolved layout for one bracket half
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketLayout {
    pub spec: BracketSpec,
    pub columns: Vec<LayoutColumn>,
    pub results: ResultsBlock,
}

impl BracketLayout {
    /// All round slots, column by column, top to bottom
    pub fn rounds(&self) -> impl Iterator<Item = &RoundSlot> {
        self.columns.iter().flat_map(|column| column.rounds.iter())
    }

    pub fn rounds_of_kind(&self, kind: RoundKind) -> impl Iterator<Item = &RoundSlot> {
        self.rounds().filter(move |slot| slot.kind == kind)
    }

    /// Look up a real (non-placeholder) round by its data-store index
    pub fn round(&self, round_index: u32) -> Option<&RoundSlot> {
        self.rounds()
            .find(|slot| slot.round_index == round_index && !slot.is_placeholder())
    }

    pub fn has_placeholder(&self) -> bool {
        self.rounds().any(RoundSlot::is_placeholder)
    }

    /// Every match coordinate in walk order
    pub fn match_refs(&self) -> Vec<MatchRef> {
        self.rounds().flat_map(|slot| slot.match_refs()).collect()
    }

    pub fn result_refs(&self) -> Vec<ResultRef> {
        self.results.result_refs().collect()
    }

    /// Number of matches in rounds of the given kind
    pub fn total_matches(&self, kind: RoundKind) -> usize {
        self.rounds_of_kind(kind).map(RoundSlot::match_count).sum()
    }

    /// Match counts along the winners track (winners + championship rounds)
    pub fn winners_track_match_counts(&self) -> Vec<usize> {
        self.rounds()
            .filter(|slot| slot.kind.is_winners_track())
            .map(RoundSlot::match_count)
            .collect()
    }

    pub fn losers_match_counts(&self) -> Vec<usize> {
        self.rounds_of_kind(RoundKind::Losers)
            .map(RoundSlot::match_count)
            .collect()
    }

    /// Serialize for a rendering collaborator
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
