//! Interactive console front end over any line-based reader and writer.
use anyhow::Result;
use std::io::{BufRead, Write};

use treasure_game::{
    Action, ActionChoice, ActionError, Difficulty, GameOutcome, GameSession, MainChoice,
    ShopChoice, parse_action, parse_confirm, parse_difficulty, parse_main, parse_shop,
};

/// What the player picked from the menus this round.
enum Step {
    Buy,
    Sell,
    Perform(Action),
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Greet the player and collect whatever setup answers were not given on
    /// the command line. Returns `None` if input ends before setup completes.
    pub fn setup(
        &mut self,
        name: Option<String>,
        difficulty: Option<Difficulty>,
    ) -> Result<Option<(String, Difficulty)>> {
        writeln!(self.output, "Welcome to TREASURE HUNTER!")?;
        writeln!(self.output, "Going hunting for the big treasure, eh?")?;
        let name = match name {
            Some(name) => name,
            None => match self.prompt("What's your name, Hunter? ")? {
                Some(name) => name,
                None => return Ok(None),
            },
        };

        if let Some(difficulty) = difficulty {
            return Ok(Some((name, difficulty)));
        }
        loop {
            let Some(answer) = self.prompt("Hard, Easy, or Normal mode? (h/e/n): ")? else {
                return Ok(None);
            };
            match parse_difficulty(&answer) {
                Ok(Difficulty::Cheat) => return Ok(Some((name, Difficulty::Cheat))),
                Ok(difficulty) => {
                    writeln!(self.output, "Game set to {difficulty} mode.")?;
                    return Ok(Some((name, difficulty)));
                }
                Err(_) => writeln!(self.output, "Error: please enter h, e, or n.")?,
            }
        }
    }

    /// Play until the hunt ends or input runs out. End of input counts as giving up.
    pub fn run(&mut self, session: &mut GameSession) -> Result<GameOutcome> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", session.take_news())?;
            writeln!(self.output, "***")?;
            writeln!(self.output, "{}", session.hunter())?;
            writeln!(self.output, "{}", session.town())?;

            let step = self.choose()?.unwrap_or(Step::Perform(Action::Exit));
            writeln!(self.output)?;
            let result = match step {
                Step::Buy => self.buy(session)?,
                Step::Sell => self.sell(session)?,
                Step::Perform(action) => self.perform(session, action)?,
            };
            if result.is_terminal() {
                return Ok(result);
            }
        }
    }

    fn choose(&mut self) -> Result<Option<Step>> {
        loop {
            let Some(answer) = self.prompt(
                "Would you like to visit the (S)hop, execute an (A)ction, or give up the hunt and (E)xit? (S/A/E):\n",
            )?
            else {
                return Ok(None);
            };
            let choice = match parse_main(&answer) {
                Ok(choice) => choice,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            let step = match choice {
                MainChoice::Exit => Some(Some(Step::Perform(Action::Exit))),
                MainChoice::Shop => self.shop_menu()?,
                MainChoice::Action => self.action_menu()?,
            };
            match step {
                Some(Some(step)) => return Ok(Some(step)),
                Some(None) => {}
                None => return Ok(None),
            }
        }
    }

    /// `Ok(None)` on end of input, `Ok(Some(None))` when the player returns to the main menu.
    fn shop_menu(&mut self) -> Result<Option<Option<Step>>> {
        writeln!(self.output, "*** Shop ***")?;
        writeln!(self.output, "(B)uy something at the shop.")?;
        writeln!(self.output, "(S)ell something at the shop.")?;
        writeln!(self.output, "(R)eturn to main menu.")?;
        writeln!(self.output, "Give up the hunt and (e)xit.")?;
        let Some(answer) = self.prompt("What's your next move? ")? else {
            return Ok(None);
        };
        Ok(Some(match parse_shop(&answer) {
            Ok(ShopChoice::Buy) => Some(Step::Buy),
            Ok(ShopChoice::Sell) => Some(Step::Sell),
            Ok(ShopChoice::Exit) => Some(Step::Perform(Action::Exit)),
            Ok(ShopChoice::Return) => None,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                None
            }
        }))
    }

    fn action_menu(&mut self) -> Result<Option<Option<Step>>> {
        writeln!(self.output, "*** Actions ***")?;
        writeln!(self.output, "(M)ove on to a different town.")?;
        writeln!(self.output, "(L)ook for trouble!")?;
        writeln!(self.output, "(H)unt for treasure!")?;
        writeln!(self.output, "(R)eturn to main menu.")?;
        writeln!(self.output, "Give up the hunt and (e)xit.")?;
        let Some(answer) = self.prompt("What's your next move? ")? else {
            return Ok(None);
        };
        Ok(Some(match parse_action(&answer) {
            Ok(ActionChoice::Move) => Some(Step::Perform(Action::Move)),
            Ok(ActionChoice::LookForTrouble) => Some(Step::Perform(Action::LookForTrouble)),
            Ok(ActionChoice::Hunt) => Some(Step::Perform(Action::Hunt)),
            Ok(ActionChoice::Exit) => Some(Step::Perform(Action::Exit)),
            Ok(ActionChoice::Return) => None,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                None
            }
        }))
    }

    fn buy(&mut self, session: &mut GameSession) -> Result<GameOutcome> {
        writeln!(
            self.output,
            "Welcome to the shop! We have the finest wares in town."
        )?;
        writeln!(self.output, "Currently we have the following items:")?;
        writeln!(self.output, "{}", session.shop())?;
        let Some(item) = self.prompt("What're you lookin' to buy? ")? else {
            return Ok(GameOutcome::Continue);
        };
        let Ok(cost) = session.shop().quote(&item, true) else {
            writeln!(self.output, "We ain't got none of those.")?;
            return Ok(GameOutcome::Continue);
        };
        let confirm = self.prompt(&format!("It'll cost you {cost} gold. Buy it (y/n)? "))?;
        if confirm.as_deref().is_some_and(parse_confirm) {
            self.trade(session, Action::Buy(item))?;
        }
        Ok(GameOutcome::Continue)
    }

    fn sell(&mut self, session: &mut GameSession) -> Result<GameOutcome> {
        writeln!(self.output, "What're you lookin' to sell? ")?;
        let held: Vec<&str> = session
            .hunter()
            .inventory()
            .iter()
            .map(|item| item.name())
            .collect();
        let Some(item) = self.prompt(&format!(
            "You currently have the following items: {}\n",
            held.join(", ")
        ))?
        else {
            return Ok(GameOutcome::Continue);
        };
        let Ok(cost) = session.shop().quote(&item, false) else {
            writeln!(self.output, "We don't want none of those.")?;
            return Ok(GameOutcome::Continue);
        };
        let confirm = self.prompt(&format!("It'll get you {cost} gold. Sell it (y/n)? "))?;
        if confirm.as_deref().is_some_and(parse_confirm) {
            self.trade(session, Action::Sell(item))?;
        }
        Ok(GameOutcome::Continue)
    }

    fn trade(&mut self, session: &mut GameSession, action: Action) -> Result<()> {
        match session.perform(action) {
            Ok(turn) => writeln!(self.output, "{}", turn.message)?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(())
    }

    fn perform(&mut self, session: &mut GameSession, action: Action) -> Result<GameOutcome> {
        let moving = matches!(action, Action::Move);
        let turn = match session.perform(action) {
            Ok(turn) => turn,
            // Town-level failures are already in the news shown next round.
            Err(ActionError::MissingCrossingItem { .. } | ActionError::AlreadySearched) => {
                return Ok(GameOutcome::Continue);
            }
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(GameOutcome::Continue);
            }
        };
        match turn.outcome {
            GameOutcome::Continue => {
                if moving {
                    writeln!(self.output, "{}", turn.message)?;
                }
            }
            GameOutcome::Victory => {
                writeln!(self.output, "{}", session.take_news())?;
                writeln!(self.output, "You beat the game! Congrats!")?;
            }
            GameOutcome::Defeat => {
                writeln!(self.output, "{}", session.take_news())?;
                writeln!(self.output, "Game Over")?;
            }
            GameOutcome::PlayerExit => writeln!(self.output, "{}", turn.message)?,
        }
        Ok(turn.outcome)
    }
}
