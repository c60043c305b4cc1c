//! The player character: purse, kit and treasure tally.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::error::ActionError;
use crate::item::Item;

/// Items held by the hunter, at most one of each, in the order acquired.
pub type Kit = SmallVec<[Item; 9]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunter {
    name: String,
    gold: u32,
    kit: Kit,
    hunted_item_total: u32,
}

impl Hunter {
    #[must_use]
    pub fn new(name: impl Into<String>, starting_gold: u32) -> Self {
        Self {
            name: name.into(),
            gold: starting_gold,
            kit: Kit::new(),
            hunted_item_total: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    #[must_use]
    pub fn inventory(&self) -> &[Item] {
        &self.kit
    }

    #[must_use]
    pub const fn hunted_item_total(&self) -> u32 {
        self.hunted_item_total
    }

    #[must_use]
    pub fn has_item(&self, item: Item) -> bool {
        self.kit.contains(&item)
    }

    /// Pay `price` for `item`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::AlreadyOwned`] if the item is already in the kit and
    /// [`ActionError::InsufficientFunds`] if the purse cannot cover the price.
    /// The hunter is unchanged on error.
    pub fn buy_item(&mut self, item: Item, price: u32) -> Result<(), ActionError> {
        if self.has_item(item) {
            return Err(ActionError::AlreadyOwned(item));
        }
        if self.gold < price {
            return Err(ActionError::InsufficientFunds {
                item,
                needed: price,
                available: self.gold,
            });
        }
        self.gold -= price;
        self.kit.push(item);
        Ok(())
    }

    /// Hand over `item` in exchange for `price`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotOwned`] if the item is not in the kit.
    pub fn sell_item(&mut self, item: Item, price: u32) -> Result<(), ActionError> {
        if !self.remove_item_from_kit(item) {
            return Err(ActionError::NotOwned(item));
        }
        self.gold = self.gold.saturating_add(price);
        Ok(())
    }

    /// Add an item without paying for it. Returns false if one is already held.
    pub fn acquire(&mut self, item: Item) -> bool {
        if self.has_item(item) {
            return false;
        }
        self.kit.push(item);
        true
    }

    /// Apply a signed change to the purse, flooring at zero.
    pub const fn change_gold(&mut self, delta: i32) {
        self.gold = self.gold.saturating_add_signed(delta);
    }

    pub const fn add_to_hunted_item_total(&mut self, code: u32) {
        self.hunted_item_total = self.hunted_item_total.saturating_add(code);
    }

    /// Drop `item` from the kit if present, returning whether anything was removed.
    pub fn remove_item_from_kit(&mut self, item: Item) -> bool {
        let before = self.kit.len();
        self.kit.retain(|held| *held != item);
        self.kit.len() != before
    }
}

impl fmt::Display for Hunter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has {} gold and ", self.name, self.gold)?;
        if self.kit.is_empty() {
            return f.write_str("nothing");
        }
        for (idx, item) in self.kit.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_deducts_price_and_adds_item() {
        let mut hunter = Hunter::new("Ada", 10);
        hunter.buy_item(Item::Rope, 4).unwrap();
        assert_eq!(hunter.gold(), 6);
        assert_eq!(hunter.inventory(), &[Item::Rope]);
    }

    #[test]
    fn buy_rejects_duplicates_and_short_purses() {
        let mut hunter = Hunter::new("Ada", 10);
        hunter.buy_item(Item::Water, 2).unwrap();
        assert_eq!(
            hunter.buy_item(Item::Water, 2),
            Err(ActionError::AlreadyOwned(Item::Water))
        );
        assert_eq!(
            hunter.buy_item(Item::Boat, 20),
            Err(ActionError::InsufficientFunds {
                item: Item::Boat,
                needed: 20,
                available: 8,
            })
        );
        assert_eq!(hunter.gold(), 8);
        assert_eq!(hunter.inventory().len(), 1);
    }

    #[test]
    fn buy_allows_spending_the_last_coin() {
        let mut hunter = Hunter::new("Ada", 4);
        hunter.buy_item(Item::Rope, 4).unwrap();
        assert_eq!(hunter.gold(), 0);
    }

    #[test]
    fn sell_requires_ownership() {
        let mut hunter = Hunter::new("Ada", 10);
        assert_eq!(
            hunter.sell_item(Item::Horse, 3),
            Err(ActionError::NotOwned(Item::Horse))
        );
        hunter.buy_item(Item::Horse, 10).unwrap();
        hunter.sell_item(Item::Horse, 3).unwrap();
        assert_eq!(hunter.gold(), 3);
        assert!(hunter.inventory().is_empty());
    }

    #[test]
    fn change_gold_never_goes_negative() {
        let mut hunter = Hunter::new("Ada", 5);
        hunter.change_gold(12);
        assert_eq!(hunter.gold(), 17);
        hunter.change_gold(-30);
        assert_eq!(hunter.gold(), 0);
    }

    #[test]
    fn acquire_and_remove_keep_kit_unique() {
        let mut hunter = Hunter::new("Ada", 0);
        assert!(hunter.acquire(Item::Twig));
        assert!(!hunter.acquire(Item::Twig));
        assert!(hunter.remove_item_from_kit(Item::Twig));
        assert!(!hunter.remove_item_from_kit(Item::Twig));
    }

    #[test]
    fn status_line_lists_kit() {
        let mut hunter = Hunter::new("Ada", 7);
        assert_eq!(hunter.to_string(), "Ada has 7 gold and nothing");
        hunter.acquire(Item::Rope);
        hunter.acquire(Item::Spoon);
        assert_eq!(hunter.to_string(), "Ada has 7 gold and Rope, Spoon");
    }
}
