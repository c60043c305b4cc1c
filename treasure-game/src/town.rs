//! A single town visit: terrain crossing, brawls and the treasure hunt.
//!
//! Towns are throwaway. The session builds a fresh one every time the hunter
//! moves on and never returns to an old one, so the per-town flags (toughness,
//! buried treasure, whether the hunter already dug) are rolled once in
//! [`Town::new`] and only `searched` ever changes afterwards.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    BRAWL_THRESHOLD_MILD, BRAWL_THRESHOLD_TOUGH, ITEM_BREAK_CHANCE, NO_NEWS, TREASURE_DIE_FACES,
    TREASURE_GOLD_BONUS,
};
use crate::difficulty::DifficultyProfile;
use crate::error::ActionError;
use crate::hunter::Hunter;
use crate::item::Item;
use crate::outcome::GameOutcome;
use crate::shop::Shop;
use crate::terrain::Terrain;

/// Result of successfully leaving town.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossing {
    pub item: Item,
    pub terrain: Terrain,
    pub broke: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Brawl {
    NoTrouble,
    Won { gold: u32 },
    Lost { gold: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrawlReport {
    pub brawl: Brawl,
    pub outcome: GameOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreasureFind {
    Found(Item),
    Discarded(Item),
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureReport {
    pub find: TreasureFind,
    pub outcome: GameOutcome,
}

/// Move brawl winnings or losses into the hunter's purse.
///
/// Losses are capped at what the hunter carries; hitting zero ends the game.
pub fn settle_brawl(hunter: &mut Hunter, brawl: Brawl) -> BrawlReport {
    match brawl {
        Brawl::NoTrouble => BrawlReport {
            brawl,
            outcome: GameOutcome::Continue,
        },
        Brawl::Won { gold } => {
            hunter.change_gold(i32::try_from(gold).unwrap_or(i32::MAX));
            BrawlReport {
                brawl,
                outcome: GameOutcome::Continue,
            }
        }
        Brawl::Lost { gold } => {
            let paid = gold.min(hunter.gold());
            hunter.change_gold(-i32::try_from(paid).unwrap_or(i32::MAX));
            let outcome = if hunter.gold() == 0 {
                GameOutcome::Defeat
            } else {
                GameOutcome::Continue
            };
            BrawlReport {
                brawl: Brawl::Lost { gold: paid },
                outcome,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Town {
    shop: Shop,
    profile: DifficultyProfile,
    win_target: u32,
    terrain: Terrain,
    tough_town: bool,
    generated_treasure: u8,
    searched: bool,
    latest_news: String,
}

impl Town {
    /// Build a town, rolling its terrain, toughness and buried treasure.
    pub fn new(
        shop: Shop,
        profile: DifficultyProfile,
        win_target: u32,
        rng: &mut impl Rng,
    ) -> Self {
        let terrain = Terrain::roll(rng);
        let tough_town = rng.r#gen::<f64>() < profile.toughness;
        let generated_treasure = rng.gen_range(1..=TREASURE_DIE_FACES);
        log::debug!(
            "new town: terrain={terrain} tough={tough_town} treasure_roll={generated_treasure}"
        );
        Self::from_parts(
            shop,
            profile,
            win_target,
            terrain,
            tough_town,
            generated_treasure,
        )
    }

    /// Build a town with every roll already decided.
    #[must_use]
    pub fn from_parts(
        shop: Shop,
        profile: DifficultyProfile,
        win_target: u32,
        terrain: Terrain,
        tough_town: bool,
        generated_treasure: u8,
    ) -> Self {
        Self {
            shop,
            profile,
            win_target,
            terrain,
            tough_town,
            generated_treasure: generated_treasure.clamp(1, TREASURE_DIE_FACES),
            searched: false,
            latest_news: String::new(),
        }
    }

    #[must_use]
    pub const fn shop(&self) -> &Shop {
        &self.shop
    }

    #[must_use]
    pub const fn terrain(&self) -> Terrain {
        self.terrain
    }

    #[must_use]
    pub const fn is_tough(&self) -> bool {
        self.tough_town
    }

    #[must_use]
    pub const fn has_searched(&self) -> bool {
        self.searched
    }

    #[must_use]
    pub fn latest_news(&self) -> &str {
        &self.latest_news
    }

    pub fn set_latest_news(&mut self, news: impl Into<String>) {
        self.latest_news = news.into();
    }

    /// Hand back the news and replace it with the "nothing new" line.
    pub fn take_news(&mut self) -> String {
        std::mem::replace(&mut self.latest_news, NO_NEWS.to_string())
    }

    pub fn hunter_arrives(&mut self, hunter: &Hunter) {
        let greeting = if self.tough_town {
            "It's pretty rough around here, so watch yourself."
        } else {
            "We're just a sleepy little town with mild mannered folk."
        };
        self.latest_news = format!("Welcome to town, {}.\n{greeting}", hunter.name());
    }

    /// Cross the surrounding terrain. The crossing item may break on the way.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::MissingCrossingItem`] when the hunter lacks the
    /// item the terrain calls for; nothing is changed in that case.
    pub fn leave_town(
        &mut self,
        hunter: &mut Hunter,
        rng: &mut impl Rng,
    ) -> Result<Crossing, ActionError> {
        let item = self.terrain.required_item();
        if !hunter.has_item(item) {
            let err = ActionError::MissingCrossingItem {
                hunter: hunter.name().to_string(),
                item,
            };
            self.latest_news = err.to_string();
            return Err(err);
        }

        let mut news = format!("You used your {item} to cross the {}.", self.terrain);
        let broke = rng.r#gen::<f64>() < ITEM_BREAK_CHANCE;
        if broke {
            hunter.remove_item_from_kit(item);
            news.push_str(&format!("\nUnfortunately, your {item} broke."));
        }
        self.latest_news = news;
        Ok(Crossing {
            item,
            terrain: self.terrain,
            broke,
        })
    }

    /// Go looking for a fight. Tough towns find fights more often and win them less.
    pub fn look_for_trouble(&mut self, hunter: &mut Hunter, rng: &mut impl Rng) -> BrawlReport {
        let threshold = if self.tough_town {
            BRAWL_THRESHOLD_TOUGH
        } else {
            BRAWL_THRESHOLD_MILD
        };

        let trouble_roll = rng.r#gen::<f64>();
        if trouble_roll > threshold {
            self.latest_news = "You couldn't find any trouble".to_string();
            return settle_brawl(hunter, Brawl::NoTrouble);
        }

        let mut gold = self.profile.brawl_win_gold.roll(rng);
        let fight_roll = rng.r#gen::<f64>();
        let brawl = if fight_roll > threshold {
            Brawl::Won { gold }
        } else {
            if self.profile.brawl_loss_gold != self.profile.brawl_win_gold {
                gold = self.profile.brawl_loss_gold.roll(rng);
            }
            Brawl::Lost { gold }
        };
        log::debug!("brawl: trouble_roll={trouble_roll:.3} fight_roll={fight_roll:.3} -> {brawl:?}");

        let report = settle_brawl(hunter, brawl);
        let mut news = String::from("You want trouble, stranger!  You got it!\nOof! Umph! Ow!\n");
        match report.brawl {
            Brawl::Won { gold } => {
                news.push_str("Okay, stranger! You proved yer mettle. Here, take my gold.");
                news.push_str(&format!("\nYou won the brawl and receive {gold} gold."));
            }
            Brawl::Lost { gold } => {
                news.push_str("That'll teach you to go lookin' fer trouble in MY town! Now pay up!");
                news.push_str(&format!("\nYou lost the brawl and pay {gold} gold."));
            }
            Brawl::NoTrouble => {}
        }
        if report.outcome == GameOutcome::Defeat {
            news.push_str("\nYou lost all your gold in the brawl!");
        }
        self.latest_news = news;
        report
    }

    /// Dig for this town's buried treasure. Only the first dig counts.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::AlreadySearched`] on every dig after the first.
    pub fn hunt_for_treasure(&mut self, hunter: &mut Hunter) -> Result<TreasureReport, ActionError> {
        if self.searched {
            let err = ActionError::AlreadySearched;
            self.latest_news = err.to_string();
            return Err(err);
        }
        self.searched = true;

        let slot = usize::from(self.generated_treasure).checked_sub(1);
        let find = match slot.and_then(|idx| Item::TREASURES.get(idx)) {
            None => TreasureFind::Nothing,
            Some(&treasure) if hunter.acquire(treasure) => {
                hunter.change_gold(TREASURE_GOLD_BONUS);
                hunter.add_to_hunted_item_total(treasure.treasure_code().unwrap_or(0));
                TreasureFind::Found(treasure)
            }
            Some(&treasure) => TreasureFind::Discarded(treasure),
        };

        self.latest_news = match find {
            TreasureFind::Found(item) => format!(
                "You found a {item}! This will be a good tool to {} with.",
                item.tool_verb().unwrap_or("work")
            ),
            TreasureFind::Discarded(item) => {
                format!("You already have a {item} so you discard it.")
            }
            TreasureFind::Nothing => "You found nothing! Congrats!".to_string(),
        };

        let outcome = if hunter.hunted_item_total() >= self.win_target {
            GameOutcome::Victory
        } else {
            GameOutcome::Continue
        };
        log::debug!(
            "treasure hunt: {find:?}, total={} target={}",
            hunter.hunted_item_total(),
            self.win_target
        );
        Ok(TreasureReport { find, outcome })
    }
}

impl fmt::Display for Town {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "This nice little town is surrounded by {}.", self.terrain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainKind;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand::rngs::mock::StepRng;

    fn town_with(kind: TerrainKind, tough: bool, treasure: u8) -> Town {
        Town::from_parts(
            Shop::new(0.27, false, false),
            DifficultyProfile::normal(),
            6,
            Terrain::of_kind(kind),
            tough,
            treasure,
        )
    }

    #[test]
    fn welcome_depends_on_toughness() {
        let hunter = Hunter::new("Ada", 10);
        let mut rough = town_with(TerrainKind::Plains, true, 4);
        rough.hunter_arrives(&hunter);
        assert_eq!(
            rough.latest_news(),
            "Welcome to town, Ada.\nIt's pretty rough around here, so watch yourself."
        );
        let mut sleepy = town_with(TerrainKind::Plains, false, 4);
        sleepy.hunter_arrives(&hunter);
        assert!(sleepy.latest_news().ends_with("mild mannered folk."));
    }

    #[test]
    fn leaving_requires_crossing_item() {
        let mut hunter = Hunter::new("Ada", 25);
        let mut town = town_with(TerrainKind::Ocean, false, 4);
        let mut rng = SmallRng::seed_from_u64(1);

        let err = town.leave_town(&mut hunter, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ActionError::MissingCrossingItem {
                hunter: "Ada".to_string(),
                item: Item::Boat,
            }
        );
        assert_eq!(town.latest_news(), "You can't leave town, Ada. You don't have a Boat.");

        town.shop().buy_item(&mut hunter, "Boat").unwrap();
        let crossing = town.leave_town(&mut hunter, &mut rng).unwrap();
        assert_eq!(crossing.item, Item::Boat);
        assert_eq!(hunter.has_item(Item::Boat), !crossing.broke);
        assert!(town.latest_news().starts_with("You used your Boat to cross the Ocean."));
    }

    #[test]
    fn low_break_roll_destroys_item() {
        let mut hunter = Hunter::new("Ada", 10);
        hunter.acquire(Item::Rope);
        let mut town = town_with(TerrainKind::Mountains, false, 4);
        let mut rng = StepRng::new(0, 0);
        let crossing = town.leave_town(&mut hunter, &mut rng).unwrap();
        assert!(crossing.broke);
        assert!(!hunter.has_item(Item::Rope));
        assert!(town.latest_news().ends_with("Unfortunately, your Rope broke."));
    }

    #[test]
    fn low_rolls_start_and_lose_a_fight() {
        let mut hunter = Hunter::new("Ada", 10);
        let mut town = town_with(TerrainKind::Desert, false, 4);
        let mut rng = StepRng::new(0, 0);
        let report = town.look_for_trouble(&mut hunter, &mut rng);
        assert_eq!(report.brawl, Brawl::Lost { gold: 1 });
        assert_eq!(report.outcome, GameOutcome::Continue);
        assert_eq!(hunter.gold(), 9);
        assert!(town.latest_news().contains("You lost the brawl and pay 1 gold."));
    }

    #[test]
    fn losing_last_coin_is_defeat() {
        let mut hunter = Hunter::new("Ada", 5);
        let report = settle_brawl(&mut hunter, Brawl::Lost { gold: 5 });
        assert_eq!(report.outcome, GameOutcome::Defeat);
        assert_eq!(hunter.gold(), 0);

        let mut hunter = Hunter::new("Ada", 3);
        let report = settle_brawl(&mut hunter, Brawl::Lost { gold: 8 });
        assert_eq!(report.brawl, Brawl::Lost { gold: 3 });
        assert_eq!(report.outcome, GameOutcome::Defeat);
        assert_eq!(hunter.gold(), 0);
    }

    #[test]
    fn winning_adds_gold() {
        let mut hunter = Hunter::new("Ada", 5);
        let report = settle_brawl(&mut hunter, Brawl::Won { gold: 7 });
        assert_eq!(report.outcome, GameOutcome::Continue);
        assert_eq!(hunter.gold(), 12);
    }

    #[test]
    fn brawl_gold_stays_in_profile_ranges() {
        let profile = DifficultyProfile::easy();
        let mut rng = SmallRng::seed_from_u64(0xB4A7);
        for _ in 0..2_000 {
            let mut hunter = Hunter::new("Ada", 1_000);
            let mut town = Town::from_parts(
                Shop::new(profile.markdown, false, true),
                profile,
                6,
                Terrain::of_kind(TerrainKind::Jungle),
                true,
                4,
            );
            match town.look_for_trouble(&mut hunter, &mut rng).brawl {
                Brawl::Won { gold } => assert!(profile.brawl_win_gold.contains(gold)),
                Brawl::Lost { gold } => assert!(profile.brawl_loss_gold.contains(gold)),
                Brawl::NoTrouble => assert_eq!(hunter.gold(), 1_000),
            }
        }
    }

    #[test]
    fn treasure_is_found_once_per_town() {
        let mut hunter = Hunter::new("Ada", 10);
        let mut town = town_with(TerrainKind::Jungle, false, 2);
        let report = town.hunt_for_treasure(&mut hunter).unwrap();
        assert_eq!(report.find, TreasureFind::Found(Item::Twig));
        assert_eq!(report.outcome, GameOutcome::Continue);
        assert_eq!(hunter.gold(), 11);
        assert_eq!(hunter.hunted_item_total(), 2);
        assert_eq!(
            town.latest_news(),
            "You found a Twig! This will be a good tool to beat with."
        );

        let snapshot = hunter.clone();
        assert_eq!(
            town.hunt_for_treasure(&mut hunter),
            Err(ActionError::AlreadySearched)
        );
        assert_eq!(hunter, snapshot);
        assert!(town.has_searched());
    }

    #[test]
    fn duplicate_treasure_is_discarded() {
        let mut hunter = Hunter::new("Ada", 10);
        hunter.acquire(Item::Banana);
        let mut town = town_with(TerrainKind::Jungle, false, 1);
        let report = town.hunt_for_treasure(&mut hunter).unwrap();
        assert_eq!(report.find, TreasureFind::Discarded(Item::Banana));
        assert_eq!(hunter.gold(), 10);
        assert_eq!(hunter.hunted_item_total(), 0);
        assert_eq!(town.latest_news(), "You already have a Banana so you discard it.");
    }

    #[test]
    fn empty_dig_finds_nothing() {
        let mut hunter = Hunter::new("Ada", 10);
        let mut town = town_with(TerrainKind::Jungle, false, 4);
        let report = town.hunt_for_treasure(&mut hunter).unwrap();
        assert_eq!(report.find, TreasureFind::Nothing);
        assert_eq!(town.latest_news(), "You found nothing! Congrats!");
        assert!(hunter.inventory().is_empty());
    }

    #[test]
    fn third_treasure_wins() {
        let mut hunter = Hunter::new("Ada", 10);
        for face in 1..=3 {
            let mut town = town_with(TerrainKind::Jungle, false, face);
            let report = town.hunt_for_treasure(&mut hunter).unwrap();
            let expected = if face == 3 {
                GameOutcome::Victory
            } else {
                GameOutcome::Continue
            };
            assert_eq!(report.outcome, expected);
        }
        assert_eq!(hunter.hunted_item_total(), 6);
    }

    #[test]
    fn take_news_resets_to_placeholder() {
        let mut town = town_with(TerrainKind::Plains, false, 4);
        town.set_latest_news("Hello");
        assert_eq!(town.take_news(), "Hello");
        assert_eq!(town.latest_news(), NO_NEWS);
        assert_eq!(town.to_string(), "This nice little town is surrounded by Plains.");
    }

    #[test]
    fn restored_town_with_blank_treasure_slot_finds_nothing() {
        let town = town_with(TerrainKind::Desert, false, 2);
        let mut value = serde_json::to_value(&town).unwrap();
        value["generated_treasure"] = serde_json::Value::from(0);
        let mut restored: Town = serde_json::from_value(value).unwrap();
        let mut hunter = Hunter::new("Ada", 10);
        let report = restored.hunt_for_treasure(&mut hunter).unwrap();
        assert_eq!(report.find, TreasureFind::Nothing);
        assert_eq!(hunter.gold(), 10);
    }
}
