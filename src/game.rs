use tracing::{debug, info, warn};

use crate::ai::search::MinimaxSelector;
use crate::board::{Board, Player};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::rules::{apply_move, flips, has_legal_move, is_legal_move, legal_moves};
use crate::types::{GameResult, GameState, Position};

pub const MSG_INVALID_MOVE: &str = "Invalid move";
pub const MSG_AI_PASS: &str = "AI Pass";
pub const MSG_PLAYER_PASS: &str = "Player Pass";

/// Source of the AI's moves.
pub trait MoveSelector: Send + Sync {
    /// Returns `None` only when `player` has no legal move.
    fn select_move(&self, board: &Board, player: Player) -> Option<Position>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, player: Player) -> Option<Position> {
        legal_moves(board, player).first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AiWins,
    HumanWins,
    Tie,
}

impl Outcome {
    pub fn from_counts(ai: u8, human: u8) -> Self {
        if ai > human {
            Self::AiWins
        } else if human > ai {
            Self::HumanWins
        } else {
            Self::Tie
        }
    }

    fn summary(self, ai: u8, human: u8) -> String {
        match self {
            Self::AiWins => format!("AI wins! AI:{ai} You:{human}"),
            Self::HumanWins => format!("You win! You:{human} AI:{ai}"),
            Self::Tie => format!("Tie! AI:{ai} You:{human}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting for the human (White).
    InProgress,
    /// The AI (Black) owes a move, shown after the display delay.
    AiPending,
    /// Absorbing: no further moves are accepted.
    Over(Outcome),
}

/// Game controller: owns the board, the side to move and the status text.
pub struct Game {
    board: Board,
    turn: Player,
    message: String,
    outcome: Option<Outcome>,
    ai_delay: u32,
    is_pass: bool,
    last_move: Option<Position>,
    flipped: Vec<u8>,
    config: GameConfig,
    selector: Box<dyn MoveSelector>,
}

impl Game {
    /// Starts from the opening position and lets the AI move first.
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        let mut game = Self::from_position(Board::new(), Player::Black, config, selector);
        if let Err(err) = game.play_ai_turn() {
            warn!(%err, "opening AI move failed; AI turn left pending");
        }
        game
    }

    pub fn new_with_default_selector(config: GameConfig) -> Self {
        Self::new(config, Box::new(MinimaxSelector))
    }

    /// Starts from an arbitrary position without resolving anything yet.
    pub fn from_position(
        board: Board,
        turn: Player,
        config: GameConfig,
        selector: Box<dyn MoveSelector>,
    ) -> Self {
        Self {
            board,
            turn,
            message: String::new(),
            outcome: None,
            ai_delay: 0,
            is_pass: false,
            last_move: None,
            flipped: Vec::new(),
            config,
            selector,
        }
    }

    pub fn current_board(&self) -> Board {
        self.board
    }

    pub fn current_turn(&self) -> Player {
        self.turn
    }

    pub fn current_message(&self) -> &str {
        &self.message
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// Ticks left before the pending AI move is played.
    pub fn ai_delay_remaining(&self) -> u32 {
        self.ai_delay
    }

    pub fn status(&self) -> GameStatus {
        match self.outcome {
            Some(outcome) => GameStatus::Over(outcome),
            None if self.turn == Player::Black => GameStatus::AiPending,
            None => GameStatus::InProgress,
        }
    }

    pub fn legal_moves_for_current(&self) -> Vec<Position> {
        legal_moves(&self.board, self.turn)
    }

    /// Plays the human's (White's) stone at `(row, col)`.
    ///
    /// Rejections leave the board and turn unchanged and set the
    /// "Invalid move" message. After game over the outcome message stays.
    pub fn submit_human_move(&mut self, row: i32, col: i32) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }

        let result = self.try_human_move(row, col);
        if let Err(err) = &result {
            debug!(row, col, %err, "rejected human move");
            self.message = MSG_INVALID_MOVE.to_string();
        }
        result
    }

    /// Runs the AI turn now, for hosts that time the display delay themselves.
    ///
    /// A stuck human is passed first, so a forced "Player Pass" hands
    /// the move straight to the AI.
    pub fn advance_ai_if_pending(&mut self) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Ok(());
        }

        self.resolve_human_pass();
        if self.outcome.is_none() && self.turn == Player::Black {
            self.ai_delay = 0;
            self.play_ai_turn()?;
        }
        Ok(())
    }

    /// One frame of the frame-driven loop.
    ///
    /// Passes a stuck human, counts the display delay down and plays the
    /// AI move once it runs out.
    pub fn tick(&mut self) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Ok(());
        }

        self.resolve_human_pass();
        if self.outcome.is_none() && self.turn == Player::Black {
            self.ai_delay = self.ai_delay.saturating_sub(1);
            if self.ai_delay == 0 {
                self.play_ai_turn()?;
            }
        }
        Ok(())
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.turn.code(),
            black_count,
            white_count,
            message: self.message.clone(),
            is_game_over: self.outcome.is_some(),
            ai_pending: self.status() == GameStatus::AiPending,
            is_pass: self.is_pass,
            last_move: self.last_move,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.count();
        GameResult {
            winner: match Outcome::from_counts(black_count, white_count) {
                Outcome::AiWins => Player::Black.code(),
                Outcome::HumanWins => Player::White.code(),
                Outcome::Tie => 0,
            },
            black_count,
            white_count,
        }
    }

    fn try_human_move(&mut self, row: i32, col: i32) -> Result<(), GameError> {
        if self.turn != Player::White {
            return Err(GameError::NotHumanTurn);
        }
        let pos = Position::checked(row, col)?;
        if !is_legal_move(&self.board, pos, Player::White) {
            return Err(GameError::IllegalMove(pos));
        }

        self.place(pos, Player::White);

        if !has_legal_move(&self.board, Player::Black) {
            if has_legal_move(&self.board, Player::White) {
                self.pass(Player::Black);
            } else {
                self.finish();
            }
            return Ok(());
        }

        self.ai_delay = self.config.ai_delay_frames;
        Ok(())
    }

    fn play_ai_turn(&mut self) -> Result<(), GameError> {
        if self.outcome.is_some() || self.turn != Player::Black {
            return Ok(());
        }

        if !has_legal_move(&self.board, Player::Black) {
            if has_legal_move(&self.board, Player::White) {
                self.pass(Player::Black);
            } else {
                self.finish();
            }
            return Ok(());
        }

        let selected = self
            .selector
            .select_move(&self.board, Player::Black)
            .ok_or(GameError::NoMoveSelected)?;
        if !is_legal_move(&self.board, selected, Player::Black) {
            return Err(GameError::IllegalMove(selected));
        }

        self.place(selected, Player::Black);

        if !has_legal_move(&self.board, Player::White) {
            if has_legal_move(&self.board, Player::Black) {
                self.pass(Player::White);
            } else {
                self.finish();
            }
        }
        Ok(())
    }

    /// Passes White when it has no move, or ends the game if Black is stuck too.
    fn resolve_human_pass(&mut self) {
        if self.outcome.is_some()
            || self.turn != Player::White
            || has_legal_move(&self.board, Player::White)
        {
            return;
        }

        if has_legal_move(&self.board, Player::Black) {
            self.pass(Player::White);
        } else {
            self.finish();
        }
    }

    fn place(&mut self, pos: Position, player: Player) {
        let captured = flips(&self.board, pos, player);
        self.board = apply_move(&self.board, pos, player);
        self.flipped = mask_to_indices(captured);
        self.last_move = Some(pos);
        self.is_pass = false;
        self.turn = player.opponent();
        self.message.clear();

        debug!(
            ?player,
            row = pos.row,
            col = pos.col,
            flipped = self.flipped.len(),
            "move applied\n{}",
            self.board
        );
    }

    fn pass(&mut self, player: Player) {
        self.is_pass = true;
        self.flipped.clear();
        self.turn = player.opponent();
        self.message = match player {
            Player::Black => MSG_AI_PASS,
            Player::White => MSG_PLAYER_PASS,
        }
        .to_string();
        if player == Player::White {
            self.ai_delay = self.config.ai_delay_frames;
        }

        debug!(?player, "pass");
    }

    fn finish(&mut self) {
        let (ai, human) = self.board.count();
        let outcome = Outcome::from_counts(ai, human);
        self.outcome = Some(outcome);
        self.ai_delay = 0;
        self.message = outcome.summary(ai, human);

        info!(?outcome, ai, human, "game over");
    }
}

fn mask_to_indices(mask: u16) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        out.push(bits.trailing_zeros() as u8);
        bits &= bits - 1;
    }

    out
}
