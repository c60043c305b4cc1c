//! Difficulty tiers and the tunable profile behind each of them.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::{DEFAULT_WIN_TARGET, STARTING_GOLD_EASY, STARTING_GOLD_STANDARD};
use crate::shop::Shop;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Cheat,
}

impl Difficulty {
    pub const ALL: &'static [Self] = &[Self::Easy, Self::Normal, Self::Hard, Self::Cheat];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Cheat => "cheat",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive range of gold that can change hands in a brawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldRange {
    pub min: u32,
    pub max: u32,
}

impl GoldRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    #[must_use]
    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Numeric knobs for one difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Fraction of the price the shop pays when buying items back.
    pub markdown: f64,
    /// Chance that a freshly built town is a tough one.
    pub toughness: f64,
    pub starting_gold: u32,
    pub brawl_win_gold: GoldRange,
    pub brawl_loss_gold: GoldRange,
}

impl DifficultyProfile {
    #[must_use]
    pub const fn easy() -> Self {
        Self {
            markdown: 0.5,
            toughness: 0.20,
            starting_gold: STARTING_GOLD_EASY,
            brawl_win_gold: GoldRange::new(5, 24),
            brawl_loss_gold: GoldRange::new(1, 10),
        }
    }

    #[must_use]
    pub const fn normal() -> Self {
        Self {
            markdown: 0.27,
            toughness: 0.4,
            starting_gold: STARTING_GOLD_STANDARD,
            brawl_win_gold: GoldRange::new(1, 15),
            brawl_loss_gold: GoldRange::new(1, 15),
        }
    }

    #[must_use]
    pub const fn hard() -> Self {
        Self {
            markdown: 0.17,
            toughness: 0.75,
            starting_gold: STARTING_GOLD_STANDARD,
            brawl_win_gold: GoldRange::new(1, 10),
            brawl_loss_gold: GoldRange::new(1, 10),
        }
    }

    #[must_use]
    pub const fn cheat() -> Self {
        Self {
            markdown: 0.0,
            toughness: 0.0,
            starting_gold: STARTING_GOLD_STANDARD,
            brawl_win_gold: GoldRange::new(1, 10),
            brawl_loss_gold: GoldRange::new(1, 10),
        }
    }

    fn validate(&self, tier: Difficulty) -> Result<(), ConfigError> {
        check_probability(tier, "markdown", self.markdown)?;
        check_probability(tier, "toughness", self.toughness)?;
        for (field, range) in [
            ("brawl_win_gold", self.brawl_win_gold),
            ("brawl_loss_gold", self.brawl_loss_gold),
        ] {
            if range.min > range.max {
                return Err(ConfigError::GoldRange {
                    tier,
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}

fn check_probability(tier: Difficulty, field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { tier, field, value })
    }
}

/// Errors raised when a game configuration is malformed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{tier} {field} must be between 0 and 1 (got {value:.2})")]
    Probability {
        tier: Difficulty,
        field: &'static str,
        value: f64,
    },
    #[error("{tier} {field} range invalid (min {min} > max {max})")]
    GoldRange {
        tier: Difficulty,
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("win target must be at least 1")]
    WinTarget,
    #[error("config JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete set of difficulty profiles plus the victory condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "DifficultyProfile::easy")]
    pub easy: DifficultyProfile,
    #[serde(default = "DifficultyProfile::normal")]
    pub normal: DifficultyProfile,
    #[serde(default = "DifficultyProfile::hard")]
    pub hard: DifficultyProfile,
    #[serde(default = "DifficultyProfile::cheat")]
    pub cheat: DifficultyProfile,
    /// Treasure total that wins the game.
    #[serde(default = "GameConfig::default_win_target")]
    pub win_target: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile::easy(),
            normal: DifficultyProfile::normal(),
            hard: DifficultyProfile::hard(),
            cheat: DifficultyProfile::cheat(),
            win_target: Self::default_win_target(),
        }
    }
}

impl GameConfig {
    const fn default_win_target() -> u32 {
        DEFAULT_WIN_TARGET
    }

    /// Parse and validate a configuration. Missing fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a profile is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every profile for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &tier in Difficulty::ALL {
            self.profile(tier).validate(tier)?;
        }
        if self.win_target == 0 {
            return Err(ConfigError::WinTarget);
        }
        Ok(())
    }

    #[must_use]
    pub const fn profile(&self, tier: Difficulty) -> &DifficultyProfile {
        match tier {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
            Difficulty::Cheat => &self.cheat,
        }
    }

    /// Shop configured for the tier.
    #[must_use]
    pub const fn shop_for(&self, tier: Difficulty) -> Shop {
        Shop::new(
            self.profile(tier).markdown,
            matches!(tier, Difficulty::Cheat),
            matches!(tier, Difficulty::Easy),
        )
    }
}
