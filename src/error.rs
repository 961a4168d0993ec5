//! Error types
//!
//! Configuration problems are caught once at load time; input problems are
//! caught per call. Stepping outside the grid is never an error.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with level data or settings, raised before any frame runs
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),

    #[error("occupancy grid has no cells")]
    EmptyGrid,

    #[error("grid row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown map glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },

    #[error("level has no free cell to spawn in")]
    NoFreeCell,

    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse map: {0}")]
    MapFormat(#[from] serde_json::Error),

    #[error("failed to parse settings: {0}")]
    SettingsFormat(#[from] ron::error::SpannedError),

    #[error("failed to serialize settings: {0}")]
    SettingsWrite(#[from] ron::Error),
}

/// Per-frame input that cannot produce a meaningful result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{what} is not finite")]
    NonFinite { what: &'static str },

    #[error("max ray distance must be zero or positive, got {0}")]
    NegativeDistance(f32),

    #[error("angular step must be positive and finite, got {0}")]
    InvalidStep(f32),

    #[error("sweep stops at {stop} before it starts at {start}")]
    ReversedSweep { start: f32, stop: f32 },

    #[error("angular step {step} needs more than {limit} rays")]
    TooManyRays { step: f32, limit: usize },

    #[error("hitbox must have positive size, got {width}x{height}")]
    InvalidHitbox { width: f32, height: f32 },

    #[error("velocity ({vx}, {vy}) moves more than one cell ({cell_size}) per tick")]
    TooFast { vx: f32, vy: f32, cell_size: f32 },
}

/// Crate-level error for operations that can fail either way
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("entity lookup failed: {0}")]
    Component(#[from] hecs::ComponentError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject NaN and infinities before they reach any geometry
pub(crate) fn ensure_finite(value: f32, what: &'static str) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NonFinite { what })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite(1.5, "x").is_ok());
        assert_eq!(
            ensure_finite(f32::NAN, "origin.x"),
            Err(InputError::NonFinite { what: "origin.x" })
        );
        assert!(ensure_finite(f32::INFINITY, "angle").is_err());
    }

    #[test]
    fn test_messages() {
        let err = ConfigError::RaggedRow { row: 2, expected: 4, found: 3 };
        assert_eq!(err.to_string(), "grid row 2 has 3 columns, expected 4");

        let err: Error = InputError::InvalidStep(0.0).into();
        assert_eq!(err.to_string(), "angular step must be positive and finite, got 0");
    }
}
