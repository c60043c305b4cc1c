use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::difficulty::{ConfigError, Difficulty, GameConfig};
use crate::error::ActionError;
use crate::hunter::Hunter;
use crate::outcome::GameOutcome;
use crate::shop::Shop;
use crate::town::{Brawl, Town, TreasureFind};

/// A player command, already parsed from the menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Buy(String),
    Sell(String),
    Move,
    LookForTrouble,
    Hunt,
    Exit,
}

/// What happened on one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub message: String,
    pub outcome: GameOutcome,
}

impl Turn {
    fn carry_on(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: GameOutcome::Continue,
        }
    }
}

/// High-level session wrapper binding the hunter to whichever town they are in.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    difficulty: Difficulty,
    seed: u64,
    rng: SmallRng,
    hunter: Hunter,
    town: Town,
    towns_visited: u32,
    outcome: GameOutcome,
}

impl GameSession {
    /// Start a new hunt and walk the hunter into the first town.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(
        name: impl Into<String>,
        difficulty: Difficulty,
        config: &GameConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let hunter = Hunter::new(name, config.profile(difficulty).starting_gold);
        let town = Self::build_town(config, difficulty, &mut rng, &hunter);
        log::info!(
            "{} sets out on {difficulty} difficulty (seed {seed})",
            hunter.name()
        );
        Ok(Self {
            config: config.clone(),
            difficulty,
            seed,
            rng,
            hunter,
            town,
            towns_visited: 1,
            outcome: GameOutcome::Continue,
        })
    }

    fn build_town(
        config: &GameConfig,
        difficulty: Difficulty,
        rng: &mut SmallRng,
        hunter: &Hunter,
    ) -> Town {
        let mut town = Town::new(
            config.shop_for(difficulty),
            *config.profile(difficulty),
            config.win_target,
            rng,
        );
        town.hunter_arrives(hunter);
        town
    }

    #[must_use]
    pub const fn hunter(&self) -> &Hunter {
        &self.hunter
    }

    #[must_use]
    pub const fn town(&self) -> &Town {
        &self.town
    }

    #[must_use]
    pub const fn shop(&self) -> &Shop {
        self.town.shop()
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn towns_visited(&self) -> u32 {
        self.towns_visited
    }

    #[must_use]
    pub const fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    #[must_use]
    pub fn latest_news(&self) -> &str {
        self.town.latest_news()
    }

    pub fn take_news(&mut self) -> String {
        self.town.take_news()
    }

    /// Apply one player command.
    ///
    /// Town-level failures (no crossing item, already searched) are also left
    /// in the town's news.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::GameOver`] once the hunt has ended, otherwise the
    /// shop or town error that rejected the command.
    pub fn perform(&mut self, action: Action) -> Result<Turn, ActionError> {
        if self.outcome.is_terminal() {
            return Err(ActionError::GameOver);
        }
        log::trace!("perform {action:?}");
        let turn = match action {
            Action::Buy(name) => {
                let shop = *self.town.shop();
                Turn::carry_on(shop.buy_item(&mut self.hunter, &name)?.message)
            }
            Action::Sell(name) => {
                let shop = *self.town.shop();
                Turn::carry_on(shop.sell_item(&mut self.hunter, &name)?.message)
            }
            Action::Move => self.move_on()?,
            Action::LookForTrouble => {
                let report = self.town.look_for_trouble(&mut self.hunter, &mut self.rng);
                let message = match report.brawl {
                    Brawl::NoTrouble => "No trouble found.".to_string(),
                    Brawl::Won { gold } => format!("Won a brawl for {gold} gold."),
                    Brawl::Lost { gold } => format!("Lost a brawl and paid {gold} gold."),
                };
                Turn {
                    message,
                    outcome: report.outcome,
                }
            }
            Action::Hunt => {
                let report = self.town.hunt_for_treasure(&mut self.hunter)?;
                let message = match report.find {
                    TreasureFind::Found(item) => format!("Found a {item}."),
                    TreasureFind::Discarded(item) => format!("Discarded a spare {item}."),
                    TreasureFind::Nothing => "Found nothing.".to_string(),
                };
                Turn {
                    message,
                    outcome: report.outcome,
                }
            }
            Action::Exit => Turn {
                message: format!("Fare thee well, {}!", self.hunter.name()),
                outcome: GameOutcome::PlayerExit,
            },
        };
        if turn.outcome.is_terminal() {
            log::info!("hunt over: {}", turn.outcome);
        }
        self.outcome = turn.outcome;
        Ok(turn)
    }

    fn move_on(&mut self) -> Result<Turn, ActionError> {
        self.town.leave_town(&mut self.hunter, &mut self.rng)?;
        let message = self.town.take_news();
        self.town = Self::build_town(&self.config, self.difficulty, &mut self.rng, &self.hunter);
        self.towns_visited = self.towns_visited.saturating_add(1);
        log::debug!("arrived in town #{}: {}", self.towns_visited, self.town);
        Ok(Turn::carry_on(message))
    }
}
