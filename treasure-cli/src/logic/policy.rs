use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use treasure_game::{Action, GameSession, Item};

/// How many brawls the brawler picks in each town before moving on.
const BRAWLS_PER_TOWN: u32 = 3;

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Pick the next command for the current session state.
    fn next_action(&mut self, session: &GameSession) -> Action;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameplayStrategy {
    Cautious,
    Brawler,
    Forager,
    Gambler,
}

impl GameplayStrategy {
    pub const ALL: &'static [Self] = &[Self::Cautious, Self::Brawler, Self::Forager, Self::Gambler];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cautious => "Cautious",
            Self::Brawler => "Brawler",
            Self::Forager => "Forager",
            Self::Gambler => "Gambler",
        }
    }

    /// Case-insensitive lookup by label.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.label().eq_ignore_ascii_case(token.trim()))
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy + Send> {
        match self {
            Self::Cautious => Box::new(CautiousPolicy),
            Self::Brawler => Box::new(BrawlerPolicy::default()),
            Self::Forager => Box::new(ForagerPolicy),
            Self::Gambler => Box::new(GamblerPolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct CautiousPolicy;
struct ForagerPolicy;

#[derive(Default)]
struct BrawlerPolicy {
    town: u32,
    brawls: u32,
}

struct GamblerPolicy {
    rng: ChaCha20Rng,
}

impl GamblerPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

/// The item this town's terrain demands, if the hunter lacks it.
fn missing_crossing_item(session: &GameSession) -> Option<Item> {
    let needed = session.town().terrain().required_item();
    (!session.hunter().has_item(needed)).then_some(needed)
}

fn can_afford(session: &GameSession, item: Item) -> bool {
    session
        .shop()
        .quote(item.name(), true)
        .is_ok_and(|price| price <= session.hunter().gold())
}

/// Buy the crossing item when needed, otherwise move on.
fn provision_or_move(session: &GameSession) -> Option<Action> {
    match missing_crossing_item(session) {
        None => Some(Action::Move),
        Some(item) if can_afford(session, item) => Some(Action::Buy(item.name().to_string())),
        Some(_) => None,
    }
}

/// A supply the hunter could sell without stranding themselves here.
fn spare_supply(session: &GameSession) -> Option<Item> {
    let needed = session.town().terrain().required_item();
    session
        .hunter()
        .inventory()
        .iter()
        .copied()
        .find(|item| !item.is_treasure() && *item != needed)
}

impl PlayerPolicy for CautiousPolicy {
    fn name(&self) -> &'static str {
        "Cautious"
    }

    fn next_action(&mut self, session: &GameSession) -> Action {
        if !session.town().has_searched() {
            return Action::Hunt;
        }
        if let Some(action) = provision_or_move(session) {
            return action;
        }
        match spare_supply(session) {
            Some(item) => Action::Sell(item.name().to_string()),
            None => Action::Exit,
        }
    }
}

impl PlayerPolicy for BrawlerPolicy {
    fn name(&self) -> &'static str {
        "Brawler"
    }

    fn next_action(&mut self, session: &GameSession) -> Action {
        if self.town != session.towns_visited() {
            self.town = session.towns_visited();
            self.brawls = 0;
        }
        if self.brawls < BRAWLS_PER_TOWN {
            self.brawls += 1;
            return Action::LookForTrouble;
        }
        if !session.town().has_searched() {
            return Action::Hunt;
        }
        provision_or_move(session).unwrap_or(Action::LookForTrouble)
    }
}

impl PlayerPolicy for ForagerPolicy {
    fn name(&self) -> &'static str {
        "Forager"
    }

    fn next_action(&mut self, session: &GameSession) -> Action {
        if !session.town().has_searched() {
            return Action::Hunt;
        }
        provision_or_move(session).unwrap_or(Action::LookForTrouble)
    }
}

impl PlayerPolicy for GamblerPolicy {
    fn name(&self) -> &'static str {
        "Gambler"
    }

    fn next_action(&mut self, session: &GameSession) -> Action {
        let mut options = vec![Action::LookForTrouble];
        if !session.town().has_searched() {
            options.push(Action::Hunt);
        }
        match missing_crossing_item(session) {
            None => options.push(Action::Move),
            Some(item) if can_afford(session, item) => {
                options.push(Action::Buy(item.name().to_string()));
            }
            Some(_) => {}
        }
        let pick = self.rng.gen_range(0..options.len());
        options.swap_remove(pick)
    }
}
