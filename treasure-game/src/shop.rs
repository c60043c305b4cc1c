//! Shop pricing and the buy/sell counter.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::CHEAT_PRICE;
use crate::error::ActionError;
use crate::hunter::Hunter;
use crate::item::Item;
use crate::numbers::floor_f64_to_u32;

/// A single line of the shop catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub item: Item,
    /// Price in gold on normal and hard difficulty.
    pub price: u32,
    /// Gold knocked off the price on easy difficulty.
    pub easy_discount: u32,
}

impl PriceEntry {
    const fn new(item: Item, price: u32, easy_discount: u32) -> Self {
        Self {
            item,
            price,
            easy_discount,
        }
    }

    #[must_use]
    pub const fn cost(&self, easy_mode: bool) -> u32 {
        if easy_mode {
            self.price.saturating_sub(self.easy_discount)
        } else {
            self.price
        }
    }
}

/// Everything any shop sells. All shops carry the same wares.
pub const CATALOG: [PriceEntry; 6] = [
    PriceEntry::new(Item::Water, 2, 1),
    PriceEntry::new(Item::Rope, 4, 1),
    PriceEntry::new(Item::Machete, 6, 2),
    PriceEntry::new(Item::Horse, 12, 3),
    PriceEntry::new(Item::Boat, 20, 4),
    PriceEntry::new(Item::Bravery, 50, 10),
];

/// Record of a completed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub item: Item,
    pub price: u32,
    pub message: String,
}

/// Stateless price catalog parameterized by difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    markdown: f64,
    cheat_mode: bool,
    easy_mode: bool,
}

impl Shop {
    #[must_use]
    pub const fn new(markdown: f64, cheat_mode: bool, easy_mode: bool) -> Self {
        Self {
            markdown,
            cheat_mode,
            easy_mode,
        }
    }

    #[must_use]
    pub const fn markdown(&self) -> f64 {
        self.markdown
    }

    #[must_use]
    pub const fn is_cheating(&self) -> bool {
        self.cheat_mode
    }

    #[must_use]
    pub const fn is_easy(&self) -> bool {
        self.easy_mode
    }

    /// Find the catalog line for an item name, ignoring case.
    #[must_use]
    pub fn find_entry(name: &str) -> Option<&'static PriceEntry> {
        let item = Item::parse(name)?;
        CATALOG.iter().find(|entry| entry.item == item)
    }

    /// Base price of an item, or 0 if the shop does not sell it.
    #[must_use]
    pub fn get_cost_of_item(&self, name: &str, easy_mode: bool) -> u32 {
        Self::find_entry(name).map_or(0, |entry| entry.cost(easy_mode))
    }

    /// Price of buying from, or selling to, this shop. Selling applies the markdown.
    #[must_use]
    pub fn check_market_price(&self, name: &str, is_buying: bool) -> u32 {
        let cost = self.get_cost_of_item(name, self.easy_mode);
        if is_buying {
            cost
        } else {
            self.buy_back(cost)
        }
    }

    /// Price shown to the player before they confirm a trade.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidItemName`] if the shop has no price for the item.
    pub fn quote(&self, name: &str, is_buying: bool) -> Result<u32, ActionError> {
        let cost = self.check_market_price(name, is_buying);
        if cost == 0 {
            return Err(ActionError::InvalidItemName {
                name: name.trim().to_string(),
            });
        }
        if is_buying && self.cheat_mode {
            return Ok(CHEAT_PRICE);
        }
        Ok(cost)
    }

    /// Sell an item to the hunter.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidItemName`] for items the shop does not stock and
    /// passes through the hunter's purchase errors.
    pub fn buy_item(&self, hunter: &mut Hunter, name: &str) -> Result<Receipt, ActionError> {
        let entry = Self::find_entry(name).ok_or_else(|| ActionError::InvalidItemName {
            name: name.trim().to_string(),
        })?;
        let price = if self.cheat_mode {
            CHEAT_PRICE
        } else {
            entry.cost(self.easy_mode)
        };
        hunter.buy_item(entry.item, price)?;
        log::debug!("{} bought {} for {price}", hunter.name(), entry.item);
        Ok(Receipt {
            item: entry.item,
            price,
            message: format!("Ye' got yerself a {}. Come again soon.", entry.item),
        })
    }

    /// Buy an item back from the hunter at the marked-down price.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidItemName`] for items the shop does not stock and
    /// [`ActionError::NotOwned`] when the hunter does not carry the item.
    pub fn sell_item(&self, hunter: &mut Hunter, name: &str) -> Result<Receipt, ActionError> {
        let entry = Self::find_entry(name).ok_or_else(|| ActionError::InvalidItemName {
            name: name.trim().to_string(),
        })?;
        let price = self.buy_back(entry.cost(self.easy_mode));
        hunter.sell_item(entry.item, price)?;
        log::debug!("{} sold {} for {price}", hunter.name(), entry.item);
        Ok(Receipt {
            item: entry.item,
            price,
            message: "Pleasure doin' business with you.".to_string(),
        })
    }

    /// Items on the shelf with the price this shop currently asks for them.
    #[must_use]
    pub fn listing(&self) -> Vec<(Item, u32)> {
        CATALOG
            .iter()
            .map(|entry| {
                let price = if self.cheat_mode {
                    CHEAT_PRICE
                } else {
                    entry.cost(self.easy_mode)
                };
                (entry.item, price)
            })
            .collect()
    }

    fn buy_back(&self, cost: u32) -> u32 {
        floor_f64_to_u32(f64::from(cost) * self.markdown)
    }
}

impl fmt::Display for Shop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (item, price) in self.listing() {
            writeln!(f, "{item}: {price} gold")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMAL: Shop = Shop::new(0.27, false, false);
    const EASY: Shop = Shop::new(0.5, false, true);
    const CHEAT: Shop = Shop::new(0.0, true, false);

    #[test]
    fn unknown_items_cost_nothing() {
        for shop in [NORMAL, EASY, CHEAT] {
            assert_eq!(shop.get_cost_of_item("Sword", false), 0);
            assert_eq!(shop.get_cost_of_item("Sword", true), 0);
            assert_eq!(shop.get_cost_of_item("Banana", false), 0);
        }
    }

    #[test]
    fn market_prices_follow_mode() {
        assert_eq!(NORMAL.check_market_price("Water", true), 2);
        assert_eq!(EASY.check_market_price("water", true), 1);
        assert_eq!(NORMAL.check_market_price("Bravery", true), 50);
        assert_eq!(EASY.check_market_price("Bravery", true), 40);
    }

    #[test]
    fn sell_price_is_floored_markdown() {
        assert_eq!(NORMAL.check_market_price("Boat", false), 5);
        assert_eq!(NORMAL.check_market_price("Water", false), 0);
        assert_eq!(EASY.check_market_price("Boat", false), 8);
        for entry in CATALOG {
            for step in 0..=20 {
                let markdown = f64::from(step) / 20.0;
                let shop = Shop::new(markdown, false, false);
                let expected = (f64::from(entry.price) * markdown).floor();
                assert!(
                    (f64::from(shop.check_market_price(entry.item.name(), false)) - expected)
                        .abs()
                        < f64::EPSILON
                );
            }
        }
    }

    #[test]
    fn cheat_mode_charges_one_gold() {
        let mut hunter = Hunter::new("Ada", 1);
        let receipt = CHEAT.buy_item(&mut hunter, "Bravery").unwrap();
        assert_eq!(receipt.price, 1);
        assert_eq!(hunter.gold(), 0);
        assert_eq!(CHEAT.quote("Boat", true), Ok(1));
        assert!(CHEAT.listing().iter().all(|(_, price)| *price == 1));
    }

    #[test]
    fn quote_rejects_unknown_items() {
        assert_eq!(
            NORMAL.quote(" sword ", true),
            Err(ActionError::InvalidItemName {
                name: "sword".to_string()
            })
        );
        assert_eq!(NORMAL.quote("Horse", false), Ok(3));
    }

    #[test]
    fn buy_and_sell_move_gold_and_items() {
        let mut hunter = Hunter::new("Ada", 10);
        let receipt = NORMAL.buy_item(&mut hunter, "rope").unwrap();
        assert_eq!(receipt.item, Item::Rope);
        assert_eq!(receipt.message, "Ye' got yerself a Rope. Come again soon.");
        assert_eq!(hunter.gold(), 6);

        let receipt = NORMAL.sell_item(&mut hunter, "Rope").unwrap();
        assert_eq!(receipt.price, 1);
        assert_eq!(hunter.gold(), 7);
        assert!(!hunter.has_item(Item::Rope));
        assert_eq!(
            NORMAL.sell_item(&mut hunter, "Rope"),
            Err(ActionError::NotOwned(Item::Rope))
        );
    }

    #[test]
    fn display_lists_every_item() {
        let text = EASY.to_string();
        assert!(text.starts_with("Water: 1 gold\n"));
        assert!(text.contains("Bravery: 40 gold"));
        assert_eq!(text.lines().count(), CATALOG.len());
    }
}
