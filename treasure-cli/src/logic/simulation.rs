use serde::Serialize;
use std::fmt;
use treasure_game::{ConfigError, Difficulty, GameConfig, GameOutcome, GameSession};

use crate::logic::policy::GameplayStrategy;

pub const DEFAULT_MAX_TURNS: u32 = 200;

/// Configuration for a single automated hunt.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub strategy: GameplayStrategy,
    pub max_turns: u32,
}

impl SimulationConfig {
    #[must_use]
    pub const fn new(difficulty: Difficulty, strategy: GameplayStrategy, seed: u64) -> Self {
        Self {
            seed,
            difficulty,
            strategy,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    #[must_use]
    pub const fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// How an automated hunt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Victory,
    Defeat,
    PlayerExit,
    /// Still running when the turn cap was reached.
    Stalled,
}

impl From<GameOutcome> for RunOutcome {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Victory => Self::Victory,
            GameOutcome::Defeat => Self::Defeat,
            GameOutcome::PlayerExit => Self::PlayerExit,
            GameOutcome::Continue => Self::Stalled,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Victory => "victory",
            Self::Defeat => "defeat",
            Self::PlayerExit => "player_exit",
            Self::Stalled => "stalled",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub strategy: GameplayStrategy,
    pub difficulty: Difficulty,
    pub seed: u64,
    pub outcome: RunOutcome,
    pub turns: u32,
    pub towns_visited: u32,
    pub final_gold: u32,
    pub treasures: Vec<String>,
}

/// Drive one hunt to completion (or the turn cap) with the configured policy.
///
/// Rejected commands still use up a turn, so a policy that keeps asking for
/// something impossible stalls rather than spinning.
///
/// # Errors
///
/// Returns an error if the configuration fails validation.
pub fn run_simulation(config: &GameConfig, sim: SimulationConfig) -> Result<RunRecord, ConfigError> {
    let mut session = GameSession::new("Bot", sim.difficulty, config, sim.seed)?;
    let mut policy = sim.strategy.create_policy(sim.seed);
    let mut turns = 0;

    while turns < sim.max_turns && !session.outcome().is_terminal() {
        let action = policy.next_action(&session);
        turns += 1;
        match session.perform(action) {
            Ok(turn) => log::trace!("{} turn {turns}: {}", policy.name(), turn.message),
            Err(err) => log::debug!("{} turn {turns} rejected: {err}", policy.name()),
        }
    }

    let hunter = session.hunter();
    let treasures = hunter
        .inventory()
        .iter()
        .filter(|item| item.is_treasure())
        .map(|item| item.name().to_string())
        .collect();

    Ok(RunRecord {
        strategy: sim.strategy,
        difficulty: sim.difficulty,
        seed: sim.seed,
        outcome: RunOutcome::from(session.outcome()),
        turns,
        towns_visited: session.towns_visited(),
        final_gold: hunter.gold(),
        treasures,
    })
}
