//! Error types for layout resolution and topology tables

use thiserror::Error;

use crate::types::EliminationMode;

/// Why a layout could not be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Malformed spec. This is a caller bug and must not be retried.
    #[error("invalid bracket spec ({competitor_count} competitors): {reason}")]
    InvalidSpec {
        competitor_count: u32,
        reason: &'static str,
    },

    /// Well-formed spec with no encoded layout
    #[error("no layout encoded for {competitor_count} competitors, {mode} elimination")]
    UnsupportedTopology {
        competitor_count: u32,
        mode: EliminationMode,
    },
}

impl LayoutError {
    /// Whether the caller may fall back to a generic layout algorithm
    pub fn is_fallback_candidate(&self) -> bool {
        matches!(self, LayoutError::UnsupportedTopology { .. })
    }
}

/// Failure while building or loading a topology table
#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to read topology table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse topology table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid topology for {competitor_count} competitors ({mode}): {reason}")]
    InvalidRow {
        competitor_count: u32,
        mode: EliminationMode,
        reason: String,
    },
}
