//! A single game: turn order, move application and the final score.

use super::opponent::Opponent;
use super::rules::has_won;
use super::{Board, Mark, Move, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum SessionState {
    /// The player (X) is to move.
    #[display("awaiting player move")]
    AwaitingPlayerMove,
    /// The opponent (O) is to move.
    #[display("awaiting opponent move")]
    AwaitingOpponentMove,
    /// Game ended with three in a line.
    #[display("won by {}", _0)]
    Won(Mark),
    /// Board filled with no line.
    #[display("draw")]
    Draw,
}

impl SessionState {
    /// Returns `true` for `Won` and `Draw`.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Won(_) | SessionState::Draw)
    }

    /// The outcome of a terminal state.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            SessionState::Won(Mark::Player) => Some(Outcome::PlayerWin),
            SessionState::Won(Mark::Opponent) => Some(Outcome::OpponentWin),
            SessionState::Draw => Some(Outcome::Draw),
            _ => None,
        }
    }
}

/// Result of a finished game, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player completed a line.
    PlayerWin,
    /// Opponent completed a line.
    OpponentWin,
    /// Board filled with no line.
    Draw,
}

impl Outcome {
    /// Leaderboard score: +1 win, -1 loss, 0 draw.
    pub fn score(self) -> i64 {
        match self {
            Outcome::PlayerWin => 1,
            Outcome::OpponentWin => -1,
            Outcome::Draw => 0,
        }
    }

    /// Line shown to the player when the game ends.
    pub fn message(self) -> &'static str {
        match self {
            Outcome::PlayerWin => "Congratulations, you win!",
            Outcome::OpponentWin => "The computer wins.",
            Outcome::Draw => "The game is a draw.",
        }
    }
}

/// Session used out of order. Input that went through
/// [`validate`](super::validate) never triggers these.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Not this side's turn, or the game is over.
    #[display("Move not allowed while {}", _0)]
    OutOfTurn(#[error(not(source))] SessionState),

    /// The square is already taken.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Move),
}

/// Supplies the player's moves and observes the game as it progresses.
pub trait PlayerInput {
    /// Returns a validated move for the current board, or `None` to abandon
    /// the game.
    fn next_move(&mut self, board: &Board) -> Option<Move>;

    /// Called after every half-move with the mark that moved and the new state.
    fn on_move(&mut self, _board: &Board, _mark: Mark, _mv: Move, _state: SessionState) {}
}

/// One game between the player and an [`Opponent`].
///
/// The session owns its board for its whole life. The opponent, and with it
/// any random source, survives [`Session::reset`] so consecutive games share it.
#[derive(Debug, Clone)]
pub struct Session<O> {
    board: Board,
    state: SessionState,
    opponent: O,
}

impl<O: Opponent> Session<O> {
    /// Starts a session on an empty board with the player to move.
    #[instrument(skip(opponent))]
    pub fn new(opponent: O) -> Self {
        Self {
            board: Board::new(),
            state: SessionState::AwaitingPlayerMove,
            opponent,
        }
    }

    /// Clears the board for a new game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.state = SessionState::AwaitingPlayerMove;
        debug!("Session reset");
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The final result, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    /// Places X at `mv`.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfTurn`] unless awaiting the player;
    /// [`MoveError::SquareOccupied`] if `mv` is taken.
    #[instrument(skip(self), fields(row = mv.row(), col = mv.col()))]
    pub fn player_move(&mut self, mv: Move) -> Result<SessionState, MoveError> {
        if self.state != SessionState::AwaitingPlayerMove {
            return Err(MoveError::OutOfTurn(self.state));
        }
        self.place(mv, Mark::Player)
    }

    /// Lets the opponent choose and place O.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfTurn`] unless awaiting the opponent;
    /// [`MoveError::SquareOccupied`] if the opponent picks a taken square.
    #[instrument(skip(self))]
    pub fn opponent_move(&mut self) -> Result<(Move, SessionState), MoveError> {
        if self.state != SessionState::AwaitingOpponentMove {
            return Err(MoveError::OutOfTurn(self.state));
        }
        let mv = self.opponent.choose_move(&self.board);
        let state = self.place(mv, Mark::Opponent)?;
        Ok((mv, state))
    }

    fn place(&mut self, mv: Move, mark: Mark) -> Result<SessionState, MoveError> {
        if !self.board.is_empty(mv) {
            return Err(MoveError::SquareOccupied(mv));
        }
        self.board.set(mv, Square::Occupied(mark));

        // Win is checked before draw: a full board with a line is a win.
        self.state = if has_won(&self.board, mark) {
            SessionState::Won(mark)
        } else if self.board.is_full() {
            SessionState::Draw
        } else {
            match mark {
                Mark::Player => SessionState::AwaitingOpponentMove,
                Mark::Opponent => SessionState::AwaitingPlayerMove,
            }
        };

        debug!(%mark, row = mv.row(), col = mv.col(), state = %self.state, "Mark placed");
        Ok(self.state)
    }

    /// Plays a full game from a fresh board and returns its outcome, or
    /// `None` if `input` abandons it.
    ///
    /// `input` should hand back moves on empty squares; a move on a taken
    /// square is asked for again.
    #[instrument(skip_all)]
    pub fn play_game(&mut self, input: &mut impl PlayerInput) -> Option<Outcome> {
        self.reset();
        info!("Starting a new game");

        loop {
            if let Some(outcome) = self.outcome() {
                info!(?outcome, score = outcome.score(), "Game over");
                return Some(outcome);
            }

            match self.state {
                SessionState::AwaitingPlayerMove => {
                    let Some(mv) = input.next_move(&self.board) else {
                        info!("Game abandoned");
                        return None;
                    };
                    match self.player_move(mv) {
                        Ok(state) => input.on_move(&self.board, Mark::Player, mv, state),
                        Err(e) => debug!(error = %e, "Player move refused"),
                    }
                }
                SessionState::AwaitingOpponentMove => match self.opponent_move() {
                    Ok((mv, state)) => input.on_move(&self.board, Mark::Opponent, mv, state),
                    Err(e) => {
                        // The opponent only sees undecided boards, so this means
                        // a faulty Opponent impl. Score the board as it stands.
                        warn!(error = %e, "Opponent move refused, ending game as a draw");
                        self.state = SessionState::Draw;
                    }
                },
                SessionState::Won(_) | SessionState::Draw => {}
            }
        }
    }
}
