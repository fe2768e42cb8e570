//! Game configuration and its validation.

use crate::shapes::ShapeKind;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 20;
pub const DEFAULT_DROP_INTERVAL: Duration = Duration::from_millis(500);
/// Terminal columns per playfield cell; two makes cells look roughly square.
pub const DEFAULT_CELL_WIDTH: u16 = 2;
/// Largest accepted playfield width or height.
pub const MAX_DIMENSION: usize = 1024;

/// Options that shape a game session and its rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Time between automatic one-row drops.
    pub drop_interval: Duration,
    pub cell_width: u16,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            drop_interval: DEFAULT_DROP_INTERVAL,
            cell_width: DEFAULT_CELL_WIDTH,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("playfield width {width} is too narrow (need at least {min} columns)")]
    TooNarrow { width: usize, min: usize },
    #[error("playfield height {height} is too short (need at least {min} rows)")]
    TooShort { height: usize, min: usize },
    #[error("playfield {width}x{height} is too large (at most {max} columns and rows)")]
    TooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("drop interval must be greater than zero")]
    ZeroDropInterval,
    #[error("cell width must be at least one column")]
    ZeroCellWidth,
}

impl GameConfig {
    /// The playfield must fit every shape in spawn orientation, otherwise a fresh piece would
    /// collide on an empty board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min_width, min_height) = ShapeKind::spawn_extent();
        if self.width < min_width {
            return Err(ConfigError::TooNarrow {
                width: self.width,
                min: min_width,
            });
        }
        if self.height < min_height {
            return Err(ConfigError::TooShort {
                height: self.height,
                min: min_height,
            });
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
                max: MAX_DIMENSION,
            });
        }
        if self.drop_interval.is_zero() {
            return Err(ConfigError::ZeroDropInterval);
        }
        if self.cell_width == 0 {
            return Err(ConfigError::ZeroCellWidth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert_eq!(config.drop_interval, Duration::from_millis(500));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooNarrow { width: 0, min: 4 })
        );
        let config = GameConfig {
            height: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooShort { height: 0, min: 2 })
        );
    }

    #[test]
    fn test_rejects_board_narrower_than_i_piece() {
        let config = GameConfig {
            width: 3,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooNarrow { .. })
        ));
        let config = GameConfig {
            width: 4,
            height: 2,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_oversized_board() {
        let config = GameConfig {
            width: 3_000_000_000,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooLarge {
                width: 3_000_000_000,
                height: 20,
                max: MAX_DIMENSION,
            })
        );
        let config = GameConfig {
            height: MAX_DIMENSION + 1,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { .. })
        ));
        let config = GameConfig {
            width: MAX_DIMENSION,
            height: MAX_DIMENSION,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_interval_and_cell_width() {
        let config = GameConfig {
            drop_interval: Duration::ZERO,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDropInterval));
        let config = GameConfig {
            cell_width: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCellWidth));
    }
}
