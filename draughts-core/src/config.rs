//! Game configuration.

use log::warn;

use crate::piece::Color;

/// Environment variable naming the color that moves first.
pub const STARTING_PLAYER_ENV: &str = "DRAUGHTS_STARTING_PLAYER";

/// Settings fixed at setup time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GameConfig {
    /// Color on move at the start of the game.
    pub starting_player: Color,
}

impl GameConfig {
    pub fn new(starting_player: Color) -> Self {
        Self { starting_player }
    }

    /// Defaults, overridden by `DRAUGHTS_STARTING_PLAYER` when it parses.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(STARTING_PLAYER_ENV) {
            config.apply_env_value(&value);
        }
        config
    }

    /// Take the starting player from a `DRAUGHTS_STARTING_PLAYER` value.
    /// Unparsable values leave the config unchanged.
    fn apply_env_value(&mut self, value: &str) -> bool {
        match value.parse::<Color>() {
            Ok(color) => {
                self.starting_player = color;
                true
            }
            Err(e) => {
                warn!("ignoring {STARTING_PLAYER_ENV}: {e}");
                false
            }
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_player: Color::White,
        }
    }
}
