//! Declarative topology table
//!
//! A topology says *what* a bracket looks like: which rounds share a column,
//! how many matches each round holds and where placeholder slots go. Walking
//! it is the job of [`crate::walk`]. New bracket sizes are added as rows,
//! either in code or from a TOML file:
//!
//! ```toml
//! [[topology]]
//! competitor_count = 4
//! mode = "double"
//! result_slots = 2
//!
//! [[topology.columns]]
//! comment_round = 1
//! rounds = [
//!     { round_index = 1, kind = "winners", matches = 2 },
//!     { round_index = 4, kind = "losers", matches = 1 },
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

use crate::error::TableError;
use crate::resolver::MIN_DOUBLE_COMPETITORS;
use crate::types::{
    BracketLayout, BracketSpec, EliminationMode, LayoutColumn, ResultsBlock, RoundKind, RoundSlot,
};

/// Largest single elimination bracket carried by the built-in table
pub const MAX_BUILTIN_SINGLE_COMPETITORS: u32 = 128;

/// Winner and runner-up
pub const DEFAULT_RESULT_SLOTS: u32 = 2;

/// Table lookup key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TopologyKey {
    pub competitor_count: u32,
    pub mode: EliminationMode,
}

impl From<BracketSpec> for TopologyKey {
    fn from(spec: BracketSpec) -> Self {
        Self {
            competitor_count: spec.competitor_count,
            mode: spec.mode,
        }
    }
}

/// One round inside a column template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTemplate {
    pub round_index: u32,
    pub kind: RoundKind,
    #[serde(default)]
    pub matches: u32,
    #[serde(default)]
    pub empty_competitors: u32,
}

impl RoundTemplate {
    pub fn real(round_index: u32, kind: RoundKind, matches: u32) -> Self {
        Self {
            round_index,
            kind,
            matches,
            empty_competitors: 0,
        }
    }

    /// A spacer slot showing `empty_competitors` blank boxes
    pub fn placeholder(round_index: u32, empty_competitors: u32) -> Self {
        Self {
            round_index,
            kind: RoundKind::Placeholder,
            matches: 0,
            empty_competitors,
        }
    }

    fn instantiate(&self, spec: BracketSpec) -> RoundSlot {
        RoundSlot {
            round_index: self.round_index,
            kind: self.kind,
            match_indices: (1..=self.matches).collect(),
            empty_competitors: self.empty_competitors,
            orientation: spec.orientation,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_round: Option<u32>,
    pub rounds: Vec<RoundTemplate>,
}

/// Complete layout description for one (competitor count, mode) pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub competitor_count: u32,
    pub mode: EliminationMode,
    pub columns: Vec<ColumnTemplate>,
    #[serde(default = "default_result_slots")]
    pub result_slots: u32,
}

fn default_result_slots() -> u32 {
    DEFAULT_RESULT_SLOTS
}

impl Topology {
    pub fn key(&self) -> TopologyKey {
        TopologyKey {
            competitor_count: self.competitor_count,
            mode: self.mode,
        }
    }

    /// Check the structural rules every row must satisfy
    pub fn validate(&self) -> Result<(), TableError> {
        let invalid = |reason: String| TableError::InvalidRow {
            competitor_count: self.competitor_count,
            mode: self.mode,
            reason,
        };

        if self.competitor_count < 2 || !self.competitor_count.is_power_of_two() {
            return Err(invalid(
                "competitor count must be a power of two of at least 2".to_string(),
            ));
        }
        if self.mode == EliminationMode::Double && self.competitor_count < MIN_DOUBLE_COMPETITORS {
            return Err(invalid(format!(
                "double elimination needs at least {MIN_DOUBLE_COMPETITORS} competitors"
            )));
        }
        if self.result_slots == 0 {
            return Err(invalid("at least one result slot is required".to_string()));
        }
        if self.result_slots > self.competitor_count {
            return Err(invalid(format!(
                "{} result slots for {} competitors",
                self.result_slots, self.competitor_count
            )));
        }
        if self.columns.is_empty() {
            return Err(invalid("topology has no columns".to_string()));
        }

        // A round can pair off at most the whole field
        let max_matches = self.competitor_count / 2;
        let mut seen = HashSet::new();
        let mut winners_matches = 0u32;
        let mut losers_matches = 0u32;

        for (idx, column) in self.columns.iter().enumerate() {
            let column_number = idx + 1;
            if column.rounds.is_empty() {
                return Err(invalid(format!("column {column_number} has no rounds")));
            }

            for round in &column.rounds {
                if round.round_index == 0 {
                    return Err(invalid(format!(
                        "column {column_number}: round indices start at 1"
                    )));
                }
                if self.mode == EliminationMode::Single && round.kind != RoundKind::Winners {
                    return Err(invalid(format!(
                        "round {}: single elimination only has winners rounds",
                        round.round_index
                    )));
                }

                if round.kind == RoundKind::Placeholder {
                    if round.matches != 0 {
                        return Err(invalid(format!(
                            "placeholder round {} cannot hold matches",
                            round.round_index
                        )));
                    }
                    if round.empty_competitors == 0
                        || round.empty_competitors > self.competitor_count
                    {
                        return Err(invalid(format!(
                            "placeholder round {} draws {} competitor boxes",
                            round.round_index, round.empty_competitors
                        )));
                    }
                    continue;
                }

                if round.matches == 0 || round.matches > max_matches {
                    return Err(invalid(format!(
                        "round {} holds {} matches, expected 1 to {}",
                        round.round_index, round.matches, max_matches
                    )));
                }
                if round.empty_competitors != 0 {
                    return Err(invalid(format!(
                        "round {} is not a placeholder but draws empty boxes",
                        round.round_index
                    )));
                }
                if !seen.insert(round.round_index) {
                    return Err(invalid(format!(
                        "round {} appears more than once",
                        round.round_index
                    )));
                }

                let total = match round.kind {
                    RoundKind::Winners => &mut winners_matches,
                    RoundKind::Losers => &mut losers_matches,
                    _ => continue,
                };
                *total = total.checked_add(round.matches).ok_or_else(|| {
                    invalid(format!(
                        "match total overflows at round {}",
                        round.round_index
                    ))
                })?;
            }

            if column.rounds.iter().any(|round| round.kind == RoundKind::Losers)
                && !column.rounds.iter().any(|round| {
                    matches!(round.kind, RoundKind::Winners | RoundKind::Placeholder)
                })
            {
                return Err(invalid(format!(
                    "losers rounds in column {column_number} are not paired with a winners or placeholder slot"
                )));
            }
        }

        if winners_matches != self.competitor_count - 1 {
            return Err(invalid(format!(
                "winners rounds hold {} matches, expected {}",
                winners_matches,
                self.competitor_count - 1
            )));
        }
        if self.mode == EliminationMode::Double && losers_matches != self.competitor_count - 2 {
            return Err(invalid(format!(
                "losers rounds hold {} matches, expected {}",
                losers_matches,
                self.competitor_count - 2
            )));
        }

        for column in &self.columns {
            if let Some(round) = column.comment_round {
                if !seen.contains(&round) {
                    return Err(invalid(format!(
                        "column comment refers to unknown round {round}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Build the layout records for `spec`, stamping its orientation on
    /// every slot and result.
    pub fn instantiate(&self, spec: BracketSpec) -> BracketLayout {
        let columns = self
            .columns
            .iter()
            .zip(1u32..)
            .map(|(column, column_index)| LayoutColumn {
                column_index,
                comment_round: column.comment_round,
                rounds: column
                    .rounds
                    .iter()
                    .map(|round| round.instantiate(spec))
                    .collect(),
            })
            .collect();

        BracketLayout {
            spec,
            columns,
            results: ResultsBlock {
                result_indices: (1..=self.result_slots).collect(),
                orientation: spec.orientation,
            },
        }
    }
}

/// Single elimination: one column per round, each halving the field.
///
/// `competitor_count` must be a power of two.
pub fn single_elimination(competitor_count: u32) -> Topology {
    let rounds = competitor_count.trailing_zeros();
    let columns = (1..=rounds)
        .map(|round| ColumnTemplate {
            comment_round: Some(round),
            rounds: vec![RoundTemplate::real(
                round,
                RoundKind::Winners,
                competitor_count >> round,
            )],
        })
        .collect();

    Topology {
        competitor_count,
        mode: EliminationMode::Single,
        columns,
        result_slots: DEFAULT_RESULT_SLOTS,
    }
}

/// Eight competitor double elimination ("champ" layout).
///
/// Winners rounds 1-3 share their columns with losers rounds 6-8. Losers
/// round 9 gets its own column, topped by a blank competitor box so it lines
/// up under the championship rounds 4 and 5.
pub fn double_elimination_8() -> Topology {
    use RoundKind::*;

    let column = |comment_round: Option<u32>, rounds: Vec<RoundTemplate>| ColumnTemplate {
        comment_round,
        rounds,
    };

    Topology {
        competitor_count: 8,
        mode: EliminationMode::Double,
        columns: vec![
            column(
                Some(1),
                vec![
                    RoundTemplate::real(1, Winners, 4),
                    RoundTemplate::real(6, Losers, 2),
                ],
            ),
            column(
                Some(2),
                vec![
                    RoundTemplate::real(2, Winners, 2),
                    RoundTemplate::real(7, Losers, 2),
                ],
            ),
            column(
                Some(3),
                vec![
                    RoundTemplate::real(3, Winners, 1),
                    RoundTemplate::real(8, Losers, 1),
                ],
            ),
            column(
                None,
                vec![
                    RoundTemplate::placeholder(9, 1),
                    RoundTemplate::real(9, Losers, 1),
                ],
            ),
            column(Some(4), vec![RoundTemplate::real(4, Championship, 1)]),
            column(Some(5), vec![RoundTemplate::real(5, Championship, 1)]),
        ],
        result_slots: DEFAULT_RESULT_SLOTS,
    }
}

/// On-disk shape of a topology table
#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    topology: Vec<Topology>,
}

/// Mapping from (competitor count, mode) to a topology
#[derive(Debug, Clone, Default)]
pub struct TopologyTable {
    rows: HashMap<TopologyKey, Topology>,
}

impl TopologyTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every layout this crate ships with
    pub fn builtin() -> Self {
        let mut rows = HashMap::new();

        let mut count = 2;
        while count <= MAX_BUILTIN_SINGLE_COMPETITORS {
            let topology = single_elimination(count);
            rows.insert(topology.key(), topology);
            count *= 2;
        }

        let de8 = double_elimination_8();
        rows.insert(de8.key(), de8);

        Self { rows }
    }

    /// Built-in rows overlaid with the rows of a TOML table
    pub fn from_toml_str(contents: &str) -> Result<Self, TableError> {
        let mut table = Self::builtin();
        table.extend_from_toml_str(contents)?;
        Ok(table)
    }

    /// Built-in rows overlaid with the rows of a TOML file
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Add every row of a TOML table. Nothing is inserted unless all rows
    /// validate. Returns the number of rows added.
    pub fn extend_from_toml_str(&mut self, contents: &str) -> Result<usize, TableError> {
        let file: TableFile = toml::from_str(contents)?;
        for topology in &file.topology {
            topology.validate()?;
        }

        let added = file.topology.len();
        for topology in file.topology {
            self.insert_unchecked(topology);
        }
        Ok(added)
    }

    /// Validate and add a row, returning the row it replaced
    pub fn insert(&mut self, topology: Topology) -> Result<Option<Topology>, TableError> {
        topology.validate()?;
        Ok(self.insert_unchecked(topology))
    }

    fn insert_unchecked(&mut self, topology: Topology) -> Option<Topology> {
        let key = topology.key();
        let previous = self.rows.insert(key, topology);
        if previous.is_some() {
            debug!(
                competitor_count = key.competitor_count,
                mode = %key.mode,
                "replaced topology row"
            );
        } else {
            debug!(
                competitor_count = key.competitor_count,
                mode = %key.mode,
                "added topology row"
            );
        }
        previous
    }

    pub fn get(&self, key: TopologyKey) -> Option<&Topology> {
        self.rows.get(&key)
    }

    pub fn contains(&self, key: TopologyKey) -> bool {
        self.rows.contains_key(&key)
    }

    /// Keys in ascending order
    pub fn keys(&self) -> Vec<TopologyKey> {
        let mut keys: Vec<_> = self.rows.keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
#[path = "topology_tests.rs"]
mod topology_tests;
