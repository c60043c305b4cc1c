//! Centralized balance and tuning constants for Treasure Hunter.
//!
//! Difficulty profiles can be overridden through [`crate::GameConfig`], but the
//! odds below are fixed rules of the game and only change through code review.

// Brawls -------------------------------------------------------------------
/// Roll threshold used in tough towns. Fights start when the first draw is at
/// or below it and are won when the second draw lands above it.
pub const BRAWL_THRESHOLD_TOUGH: f64 = 0.66;
/// Roll threshold used in sleepy towns.
pub const BRAWL_THRESHOLD_MILD: f64 = 0.33;

// Crossings ----------------------------------------------------------------
/// Chance that the crossing item breaks after being used.
pub const ITEM_BREAK_CHANCE: f64 = 0.5;

// Treasure -----------------------------------------------------------------
/// Faces on the treasure die; the highest face means nothing was buried here.
pub const TREASURE_DIE_FACES: u8 = 4;
/// Gold granted alongside every newly found treasure.
pub const TREASURE_GOLD_BONUS: i32 = 1;
/// Running treasure total that wins the game (Banana + Twig + Spoon).
pub const DEFAULT_WIN_TARGET: u32 = 6;

// Shop ---------------------------------------------------------------------
/// Flat price charged for every item while cheating.
pub const CHEAT_PRICE: u32 = 1;

// Starting purses ----------------------------------------------------------
pub const STARTING_GOLD_EASY: u32 = 20;
pub const STARTING_GOLD_STANDARD: u32 = 10;

// News ---------------------------------------------------------------------
pub const NO_NEWS: &str = "No new news.";
