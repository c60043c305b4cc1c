//! Parsers for the single-letter menu tokens typed at the console.
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::ActionError;

/// Literal token that unlocks cheat mode at setup. Deliberately left off the prompt.
pub const CHEAT_TOKEN: &str = "ch34t";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainChoice {
    Shop,
    Action,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopChoice {
    Buy,
    Sell,
    Return,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionChoice {
    Move,
    LookForTrouble,
    Hunt,
    Return,
    Exit,
}

fn token(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

fn invalid(input: &str) -> ActionError {
    ActionError::InvalidMenuChoice(input.trim().to_string())
}

/// Parse the setup answer to "Hard, Easy, or Normal mode? (h/e/n)".
///
/// # Errors
///
/// Returns [`ActionError::InvalidMenuChoice`] for anything else.
pub fn parse_difficulty(input: &str) -> Result<Difficulty, ActionError> {
    if input.trim() == CHEAT_TOKEN {
        return Ok(Difficulty::Cheat);
    }
    match token(input).as_str() {
        "h" => Ok(Difficulty::Hard),
        "e" => Ok(Difficulty::Easy),
        "n" => Ok(Difficulty::Normal),
        _ => Err(invalid(input)),
    }
}

/// Parse a main menu answer: (S)hop, (A)ction or (E)xit.
///
/// # Errors
///
/// Returns [`ActionError::InvalidMenuChoice`] for unknown tokens.
pub fn parse_main(input: &str) -> Result<MainChoice, ActionError> {
    match token(input).as_str() {
        "s" => Ok(MainChoice::Shop),
        "a" => Ok(MainChoice::Action),
        "e" | "x" => Ok(MainChoice::Exit),
        _ => Err(invalid(input)),
    }
}

/// Parse a shop menu answer: (B)uy, (S)ell, (R)eturn or (E)xit.
///
/// # Errors
///
/// Returns [`ActionError::InvalidMenuChoice`] for unknown tokens.
pub fn parse_shop(input: &str) -> Result<ShopChoice, ActionError> {
    match token(input).as_str() {
        "b" => Ok(ShopChoice::Buy),
        "s" => Ok(ShopChoice::Sell),
        "r" => Ok(ShopChoice::Return),
        "e" => Ok(ShopChoice::Exit),
        _ => Err(invalid(input)),
    }
}

/// Parse an action menu answer: (M)ove, (L)ook for trouble, (H)unt, (R)eturn or (E)xit.
///
/// # Errors
///
/// Returns [`ActionError::InvalidMenuChoice`] for unknown tokens.
pub fn parse_action(input: &str) -> Result<ActionChoice, ActionError> {
    match token(input).as_str() {
        "m" => Ok(ActionChoice::Move),
        "l" => Ok(ActionChoice::LookForTrouble),
        "h" => Ok(ActionChoice::Hunt),
        "r" => Ok(ActionChoice::Return),
        "e" => Ok(ActionChoice::Exit),
        _ => Err(invalid(input)),
    }
}

/// Parse a y/n confirmation. Only "y" counts as yes.
#[must_use]
pub fn parse_confirm(input: &str) -> bool {
    token(input) == "y"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_selector_is_case_insensitive() {
        assert_eq!(parse_difficulty("H"), Ok(Difficulty::Hard));
        assert_eq!(parse_difficulty(" e "), Ok(Difficulty::Easy));
        assert_eq!(parse_difficulty("n"), Ok(Difficulty::Normal));
        assert_eq!(parse_difficulty("ch34t"), Ok(Difficulty::Cheat));
        assert_eq!(
            parse_difficulty("CH34T"),
            Err(ActionError::InvalidMenuChoice("CH34T".to_string()))
        );
        assert!(parse_difficulty("medium").is_err());
    }

    #[test]
    fn menus_map_letters() {
        assert_eq!(parse_main("s"), Ok(MainChoice::Shop));
        assert_eq!(parse_main("A"), Ok(MainChoice::Action));
        assert_eq!(parse_main("x"), Ok(MainChoice::Exit));
        assert_eq!(parse_shop("S"), Ok(ShopChoice::Sell));
        assert_eq!(parse_shop("r"), Ok(ShopChoice::Return));
        assert_eq!(parse_action("L"), Ok(ActionChoice::LookForTrouble));
        assert_eq!(parse_action("h"), Ok(ActionChoice::Hunt));
        assert!(parse_action("q").is_err());
    }

    #[test]
    fn only_y_confirms() {
        assert!(parse_confirm("Y"));
        assert!(parse_confirm("y\n"));
        assert!(!parse_confirm("yes"));
        assert!(!parse_confirm(""));
    }
}
