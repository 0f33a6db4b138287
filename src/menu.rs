//! Text menu: play a game, save the score, show the leaderboard.

use std::io::{self, BufRead, Write};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

use crate::games::noughts::{Board, Mark, Move, Opponent, Outcome, PlayerInput, Session, SessionState, validate};
use crate::leaderboard::{LeaderboardStore, PlayerName, Scores};

/// Main menu entries, selected by the text in `strum(serialize)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::EnumIter)]
pub enum MenuChoice {
    /// Play one game.
    #[strum(serialize = "1")]
    Play,
    /// Save the last score.
    #[strum(serialize = "2")]
    SaveScore,
    /// Show the leaderboard.
    #[strum(serialize = "3")]
    ShowLeaderboard,
    /// Leave.
    #[strum(serialize = "q")]
    Quit,
}

impl MenuChoice {
    fn line(self) -> &'static str {
        match self {
            MenuChoice::Play => "1 - Play the game",
            MenuChoice::SaveScore => "2 - Save your score to the leaderboard",
            MenuChoice::ShowLeaderboard => "3 - Load and display the leaderboard",
            MenuChoice::Quit => "q - End the program",
        }
    }
}

/// What the menu remembers between entries.
#[derive(Debug, Clone, Default)]
pub struct MenuContext {
    /// Name given before the most recent game.
    pub player_name: Option<PlayerName>,
    /// Result of the most recent finished game.
    pub last_outcome: Option<Outcome>,
}

/// Interactive front end over any line-based input and output.
pub struct Menu<R, W, O> {
    input: R,
    output: W,
    session: Session<O>,
    store: LeaderboardStore,
    context: MenuContext,
}

impl<R: BufRead, W: Write, O: Opponent> Menu<R, W, O> {
    /// Creates a menu around a session and a leaderboard store.
    pub fn new(input: R, output: W, session: Session<O>, store: LeaderboardStore) -> Self {
        Self {
            input,
            output,
            session,
            store,
            context: MenuContext::default(),
        }
    }

    /// Returns the remembered name and outcome.
    pub fn context(&self) -> &MenuContext {
        &self.context
    }

    /// Runs until the player quits or input ends.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> io::Result<()> {
        self.welcome()?;
        loop {
            match self.choose()? {
                Some(MenuChoice::Play) => {
                    if !self.play()? {
                        break;
                    }
                }
                Some(MenuChoice::SaveScore) => self.save_score()?,
                Some(MenuChoice::ShowLeaderboard) => self.show_leaderboard()?,
                Some(MenuChoice::Quit) | None => break,
            }
        }
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn welcome(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to \"Unbeatable Noughts and Crosses\"")?;
        writeln!(self.output, "The board positions are as follows:")?;
        writeln!(self.output, "{}", Board::index_guide())?;
        writeln!(self.output, "You are X and you go first.")
    }

    /// Reads one line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        read_prompted(&mut self.input, &mut self.output, text)
    }

    fn choose(&mut self) -> io::Result<Option<MenuChoice>> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Menu:")?;
            for choice in MenuChoice::iter() {
                writeln!(self.output, "{}", choice.line())?;
            }
            let Some(line) = self.prompt("Enter your choice: ")? else {
                return Ok(None);
            };
            match MenuChoice::from_str(line.trim()) {
                Ok(choice) => {
                    debug!(?choice, "Menu choice");
                    return Ok(Some(choice));
                }
                Err(_) => writeln!(self.output, "Invalid choice, please try again.")?,
            }
        }
    }

    fn ask_name(&mut self) -> io::Result<Option<PlayerName>> {
        loop {
            let Some(line) = self.prompt("Please enter your name: ")? else {
                return Ok(None);
            };
            match PlayerName::new(&line) {
                Some(name) => return Ok(Some(name)),
                None => writeln!(self.output, "Name cannot be empty. Please try again.")?,
            }
        }
    }

    /// Plays one game. Returns `false` if input ended.
    #[instrument(skip(self))]
    fn play(&mut self) -> io::Result<bool> {
        let Some(name) = self.ask_name()? else {
            return Ok(false);
        };
        writeln!(self.output, "Hello, {}.", name)?;
        self.context.player_name = Some(name);

        writeln!(self.output, "Starting a new game.")?;
        writeln!(self.output, "{}", Board::new())?;

        let mut terminal = Terminal {
            input: &mut self.input,
            output: &mut self.output,
            error: None,
        };
        let outcome = self.session.play_game(&mut terminal);
        if let Some(e) = terminal.error {
            return Err(e);
        }

        match outcome {
            Some(outcome) => {
                writeln!(self.output, "{}", outcome.message())?;
                self.context.last_outcome = Some(outcome);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[instrument(skip(self))]
    fn save_score(&mut self) -> io::Result<()> {
        let Some(outcome) = self.context.last_outcome else {
            writeln!(self.output, "No score available. Play a game first.")?;
            return Ok(());
        };

        let name = match self.context.player_name.clone() {
            Some(name) => name,
            None => match self.ask_name()? {
                Some(name) => name,
                None => {
                    writeln!(self.output, "Name cannot be empty. Score not saved.")?;
                    return Ok(());
                }
            },
        };

        match self.store.save(&name, outcome.score()) {
            Ok(_) => writeln!(self.output, "Score saved successfully."),
            Err(e) => {
                warn!(error = %e, "Saving score failed");
                writeln!(self.output, "An error occurred while saving the score.")
            }
        }
    }

    fn show_leaderboard(&mut self) -> io::Result<()> {
        let scores = self.store.load();
        info!(count = scores.len(), "Showing leaderboard");
        write_leaderboard(&mut self.output, &scores)
    }
}

/// Writes `scores` one `name: score` per line.
pub fn write_leaderboard(output: &mut impl Write, scores: &Scores) -> io::Result<()> {
    if scores.is_empty() {
        return writeln!(output, "No scores to display.");
    }
    writeln!(output, "Leaderboard:")?;
    for (name, score) in scores {
        writeln!(output, "{}: {}", name, score)?;
    }
    Ok(())
}

fn read_prompted(
    input: &mut impl BufRead,
    output: &mut impl Write,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Prompts for moves during a game and redraws the board after each one.
struct Terminal<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
    /// First I/O failure; the game is abandoned once set.
    error: Option<io::Error>,
}

impl<R: BufRead, W: Write> Terminal<'_, R, W> {
    fn try_next_move(&mut self, board: &Board) -> io::Result<Option<Move>> {
        loop {
            let prompt = "Enter a number between 1 and 9 to place your X: ";
            let Some(line) = read_prompted(&mut *self.input, &mut *self.output, prompt)? else {
                return Ok(None);
            };
            match validate(&line, board) {
                Ok(mv) => return Ok(Some(mv)),
                Err(reason) => writeln!(self.output, "{}", reason)?,
            }
        }
    }

    fn try_on_move(&mut self, board: &Board, mark: Mark) -> io::Result<()> {
        if mark == Mark::Opponent {
            writeln!(self.output, "Computer is making a move...")?;
        }
        writeln!(self.output, "{}", board)
    }
}

impl<R: BufRead, W: Write> PlayerInput for Terminal<'_, R, W> {
    fn next_move(&mut self, board: &Board) -> Option<Move> {
        if self.error.is_some() {
            return None;
        }
        match self.try_next_move(board) {
            Ok(mv) => mv,
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    fn on_move(&mut self, board: &Board, mark: Mark, _mv: Move, _state: SessionState) {
        if self.error.is_none() {
            if let Err(e) = self.try_on_move(board, mark) {
                self.error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!(MenuChoice::from_str("1"), Ok(MenuChoice::Play));
        assert_eq!(MenuChoice::from_str("2"), Ok(MenuChoice::SaveScore));
        assert_eq!(MenuChoice::from_str("3"), Ok(MenuChoice::ShowLeaderboard));
        assert_eq!(MenuChoice::from_str("q"), Ok(MenuChoice::Quit));
        assert!(MenuChoice::from_str("4").is_err());
        assert!(MenuChoice::from_str("Q").is_err());
    }

    #[test]
    fn test_write_empty_leaderboard() {
        let mut out = Vec::new();
        write_leaderboard(&mut out, &Scores::new()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No scores to display.\n");
    }

    #[test]
    fn test_write_leaderboard_sorted() {
        let scores: Scores = [("Bob".to_string(), -1), ("Ann".to_string(), 1)]
            .into_iter()
            .collect();
        let mut out = Vec::new();
        write_leaderboard(&mut out, &scores).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Leaderboard:\nAnn: 1\nBob: -1\n"
        );
    }
}
