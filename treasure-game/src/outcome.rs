//! How a turn leaves the game: still running, or over for one of three reasons.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    #[default]
    Continue,
    /// Every treasure has been found.
    Victory,
    /// The hunter lost their last coin in a brawl.
    Defeat,
    /// The player gave up the hunt.
    PlayerExit,
}

impl GameOutcome {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::Victory => write!(f, "victory"),
            Self::Defeat => write!(f, "defeat"),
            Self::PlayerExit => write!(f, "player_exit"),
        }
    }
}
