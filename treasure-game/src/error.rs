//! Recoverable failures raised by hunter, shop, town and menu actions.
//!
//! Every variant renders as the line the townsfolk say back to the player, so
//! front ends can print the error directly.
use thiserror::Error;

use crate::item::Item;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("We ain't got none of those.")]
    InvalidItemName { name: String },
    #[error("Hmm, a {item} costs {needed} gold and you only have {available}!")]
    InsufficientFunds {
        item: Item,
        needed: u32,
        available: u32,
    },
    #[error("Hmm, you've already got a {0}!")]
    AlreadyOwned(Item),
    #[error("Stop stringin' me along!")]
    NotOwned(Item),
    #[error("You can't leave town, {hunter}. You don't have a {item}.")]
    MissingCrossingItem { hunter: String, item: Item },
    #[error("You already searched for treasure in this town!")]
    AlreadySearched,
    #[error("Yikes! That's an invalid option! Try again.")]
    InvalidMenuChoice(String),
    #[error("The hunt is already over.")]
    GameOver,
}
