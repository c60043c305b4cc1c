//! Treasure Hunter Game Engine
//!
//! Platform-agnostic core logic for the Treasure Hunter text adventure.
//! This crate provides every game rule without console or platform-specific I/O;
//! victory, defeat and quitting come back as [`GameOutcome`] values.

pub mod constants;
pub mod difficulty;
pub mod error;
pub mod hunter;
pub mod item;
pub mod menu;
pub mod numbers;
pub mod outcome;
pub mod session;
pub mod shop;
pub mod terrain;
pub mod town;

// Re-export commonly used types
pub use difficulty::{ConfigError, Difficulty, DifficultyProfile, GameConfig, GoldRange};
pub use error::ActionError;
pub use hunter::Hunter;
pub use item::Item;
pub use menu::{
    ActionChoice, MainChoice, ShopChoice, parse_action, parse_confirm, parse_difficulty,
    parse_main, parse_shop,
};
pub use outcome::GameOutcome;
pub use session::{Action, GameSession, Turn};
pub use shop::{CATALOG, PriceEntry, Receipt, Shop};
pub use terrain::{TERRAINS, Terrain, TerrainKind};
pub use town::{Brawl, BrawlReport, Crossing, Town, TreasureFind, TreasureReport, settle_brawl};

/// Trait for abstracting configuration loading.
/// Front ends decide where the difficulty profiles come from.
pub trait ConfigSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the game configuration from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or is invalid.
    fn load_config(&self) -> Result<GameConfig, Self::Error>;
}

/// Main game engine for starting hunts against a configuration source
pub struct GameEngine<C>
where
    C: ConfigSource,
{
    source: C,
}

impl<C> GameEngine<C>
where
    C: ConfigSource,
    C::Error: From<ConfigError>,
{
    /// Create a new game engine with the provided configuration source
    pub const fn new(source: C) -> Self {
        Self { source }
    }

    /// Start a hunt for the named hunter on the given difficulty.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or fails validation.
    pub fn create_session(
        &self,
        name: &str,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<GameSession, C::Error> {
        let config = self.source.load_config()?;
        Ok(GameSession::new(name, difficulty, &config, seed)?)
    }
}
