//! Spec validation and table lookup

use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::LayoutError;
use crate::topology::{TopologyKey, TopologyTable};
use crate::types::{BracketLayout, BracketSpec, EliminationMode};

/// Smallest field a double elimination bracket can be drawn for
pub const MIN_DOUBLE_COMPETITORS: u32 = 4;

static BUILTIN: LazyLock<BracketLayoutResolver> = LazyLock::new(BracketLayoutResolver::new);

/// Resolves bracket specs into layouts using a topology table.
///
/// Resolution is a pure lookup plus instantiation, so a resolver can be
/// shared freely between threads.
#[derive(Debug, Clone)]
pub struct BracketLayoutResolver {
    table: TopologyTable,
}

impl Default for BracketLayoutResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BracketLayoutResolver {
    /// Resolver over the built-in table
    pub fn new() -> Self {
        Self::with_table(TopologyTable::builtin())
    }

    pub fn with_table(table: TopologyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TopologyTable {
        &self.table
    }

    /// Produce the layout for `spec`.
    ///
    /// # Errors
    /// * `InvalidSpec` - the competitor count is not a power of two of at
    ///   least 2, or is too small for the elimination mode
    /// * `UnsupportedTopology` - the table has no row for the spec
    pub fn resolve(&self, spec: BracketSpec) -> Result<BracketLayout, LayoutError> {
        validate_spec(spec)?;

        let Some(topology) = self.table.get(TopologyKey::from(spec)) else {
            warn!(
                competitor_count = spec.competitor_count,
                mode = %spec.mode,
                "no topology encoded for bracket"
            );
            return Err(LayoutError::UnsupportedTopology {
                competitor_count: spec.competitor_count,
                mode: spec.mode,
            });
        };

        let layout = topology.instantiate(spec);
        debug!(
            competitor_count = spec.competitor_count,
            mode = %spec.mode,
            orientation = %spec.orientation,
            columns = layout.columns.len(),
            "resolved bracket layout"
        );
        Ok(layout)
    }
}

/// Resolve against the built-in table
pub fn resolve(spec: BracketSpec) -> Result<BracketLayout, LayoutError> {
    BUILTIN.resolve(spec)
}

/// Reject specs no bracket could be drawn for
pub fn validate_spec(spec: BracketSpec) -> Result<(), LayoutError> {
    let invalid = |reason| LayoutError::InvalidSpec {
        competitor_count: spec.competitor_count,
        reason,
    };

    if spec.competitor_count < 2 {
        return Err(invalid("at least 2 competitors are required"));
    }
    if !spec.competitor_count.is_power_of_two() {
        return Err(invalid("competitor count must be a power of two"));
    }
    if spec.mode == EliminationMode::Double && spec.competitor_count < MIN_DOUBLE_COMPETITORS {
        return Err(invalid("double elimination needs at least 4 competitors"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;
