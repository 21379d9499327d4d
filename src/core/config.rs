//! Board configuration.
//!
//! Sessions are configured at startup with a [`BoardConfig`]. The engine
//! never hardcodes board size, palette size, or the limits that bound
//! special-piece resolution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected by [`BoardConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least 3x3, got {width}x{height}")]
    BoardTooSmall { width: usize, height: usize },
    #[error("palette needs between 3 and 255 colors, got {0}")]
    InvalidPalette(usize),
    #[error("plane flight cap must be at least 1")]
    ZeroFlightCap,
    #[error("disco color search needs at least one attempt")]
    ZeroDiscoAttempts,
}

/// Static parameters of a board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of columns.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// Number of distinct piece colors. Colors are `0..palette_size`.
    pub palette_size: usize,

    /// Maximum planes a Disco+Plane combo converts and launches.
    pub plane_flight_cap: usize,

    /// Redraws a chain-activated disco may make, after its first draw, while
    /// the drawn color is absent from the board. The last draw is used when
    /// they run out.
    pub disco_color_attempts: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            palette_size: 6,
            plane_flight_cap: 12,
            disco_color_attempts: 10,
        }
    }
}

impl BoardConfig {
    /// Create a configuration with the given dimensions and default limits.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the palette size.
    #[must_use]
    pub fn with_palette(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    /// Set the Disco+Plane flight cap.
    #[must_use]
    pub fn with_flight_cap(mut self, cap: usize) -> Self {
        self.plane_flight_cap = cap;
        self
    }

    /// Set the chain-disco color redraw budget.
    #[must_use]
    pub fn with_disco_attempts(mut self, attempts: usize) -> Self {
        self.disco_color_attempts = attempts;
        self
    }

    /// Palette size as the RNG expects it.
    ///
    /// Only meaningful on a validated config.
    #[must_use]
    pub fn palette(&self) -> u8 {
        self.palette_size as u8
    }

    /// Check that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if !(3..=255).contains(&self.palette_size) {
            return Err(ConfigError::InvalidPalette(self.palette_size));
        }
        if self.plane_flight_cap == 0 {
            return Err(ConfigError::ZeroFlightCap);
        }
        if self.disco_color_attempts == 0 {
            return Err(ConfigError::ZeroDiscoAttempts);
        }
        Ok(())
    }
}
