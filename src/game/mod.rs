//! Game orchestration: turn flow, mode switching and demo scenes.
//!
//! ## Turn flow
//!
//! A [`Game`] owns one [`Board`] plus the two engines and the seeded
//! RNG. In the normal modes the user places `Nought` marks and the
//! engine answers inline with a `Cross`, so from the caller's view one
//! [`Game::apply_move`] usually advances the round twice. In the debug
//! modes the engine stays silent and the caller places both sides
//! alternately.
//!
//! ## Modes and scenes
//!
//! [`ModeRequest`] drives the mode state machine. `Conjugate` flips
//! which side the engine plays, `Configure` toggles debug, and the two
//! demo scenes (`Bonus`, `Clumsy`) replay a scripted game in a debug
//! mode while remembering the mode to return to. Re-requesting the
//! active scene switches back out.
//!
//! Invalid cell indices are the only reported error; every other
//! out-of-order request (occupied cell, terminated game, engine's
//! turn) is silently ignored so callers can forward raw input.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark, Mode, Outcome, Turn};
use crate::engine::{ResponseEngine, ResultEngine};
use crate::error::BoardError;
use crate::rng::{GameRng, GameRngState};

/// The scripted move order replayed by the demo scenes.
///
/// Played alternately from either side it produces a double-diagonal
/// win for whoever moves first on the ninth mark.
const SCENE_SCRIPT: [usize; 9] = [1, 2, 3, 6, 9, 8, 7, 4, 5];

/// A request against the mode state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeRequest {
    /// Reset the board, keeping the current mode.
    Startup,
    /// Flip which side the engine plays.
    Conjugate,
    /// Toggle debug (manual placement for both sides).
    Configure,
    /// Enter or leave the scripted winning demo.
    Bonus,
    /// Enter or leave the scripted losing demo.
    Clumsy,
    /// Switch to a specific mode.
    Set(Mode),
}

/// State change notifications, drained by the caller after each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A mark was placed.
    CellSet { cell: usize, mark: Mark },
    /// The side to move changed.
    TurnChanged(Turn),
    /// The game reached a result.
    OutcomeChanged(Outcome),
    /// The board was cleared for a new game.
    BoardReset,
}

/// A serializable snapshot of everything a frontend renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Cell marks in position order (cell 1 first).
    pub cells: [Mark; 9],
    pub mode: Mode,
    pub turn: Turn,
    pub outcome: Outcome,
    pub round: u8,
    pub debug: bool,
    /// Whether a demo scene is active.
    pub scene: bool,
    pub title: String,
}

/// A full game: board, engines, RNG and the mode state machine.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    /// The mode to return to when the active scene is left.
    last_mode: Option<Mode>,
    response: ResponseEngine,
    result: ResultEngine,
    rng: GameRng,
    events: Vec<GameEvent>,
}

impl Game {
    /// Start a game in `mode`. In a defender-side mode the engine
    /// makes its opening move immediately.
    #[must_use]
    pub fn new(mode: Mode, seed: u64) -> Self {
        let mut game = Self {
            board: Board::new(mode),
            last_mode: None,
            response: ResponseEngine::new(),
            result: ResultEngine::new(),
            rng: GameRng::new(seed),
            events: Vec::new(),
        };
        game.opening_response();
        game
    }

    // === Accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The mark at `cell` (1..=9).
    pub fn cell(&self, cell: usize) -> Result<Mark, BoardError> {
        self.board.cell(cell)
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.board.mode()
    }

    #[must_use]
    pub fn turn(&self) -> Turn {
        self.board.turn()
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    #[must_use]
    pub fn round(&self) -> u8 {
        self.board.round()
    }

    /// Whether a demo scene is currently active.
    #[must_use]
    pub fn in_scene(&self) -> bool {
        self.last_mode.is_some()
    }

    /// RNG checkpoint for exact replay.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Drain the events accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot the full renderable state.
    #[must_use]
    pub fn view(&self) -> GameView {
        let mut cells = [Mark::Empty; 9];
        for (i, slot) in cells.iter_mut().enumerate() {
            *slot = self.board.cell(i + 1).unwrap_or(Mark::Empty);
        }
        GameView {
            cells,
            mode: self.board.mode(),
            turn: self.board.turn(),
            outcome: self.board.outcome(),
            round: self.board.round(),
            debug: self.board.mode().debug(),
            scene: self.in_scene(),
            title: self.title(),
        }
    }

    /// The window title line, reflecting mode, scene and result.
    #[must_use]
    pub fn title(&self) -> String {
        let prefix = if self.in_scene() {
            match self.board.mode() {
                Mode::DebugDefender => "< Clumsy > ",
                _ => "< Bonus > ",
            }
        } else if self.board.mode().debug() {
            "< Debug > "
        } else {
            ""
        };
        let side = if self.board.mode().defender_side() {
            " Defender"
        } else {
            " Attacker"
        };
        let suffix = match self.board.outcome() {
            Outcome::Open => "",
            Outcome::Won => " [ Win ]",
            Outcome::Lost => " [ Lost ]",
            Outcome::Tied => " [ Tied ]",
        };
        format!("{prefix}TicTacToe{side}{suffix}")
    }

    // === Moves ===

    /// Place the user's mark at `cell` (1..=9).
    ///
    /// Out-of-range indices are an error; anything else that cannot be
    /// honored right now (occupied cell, finished game, waiting on the
    /// engine) is silently ignored.
    pub fn apply_move(&mut self, cell: usize) -> Result<(), BoardError> {
        if !(1..=9).contains(&cell) {
            return Err(BoardError::InvalidIndex(cell));
        }
        self.place(cell);
        Ok(())
    }

    /// Honor a mode request and start the follow-up (scene script or
    /// engine opening move).
    pub fn request_mode(&mut self, request: ModeRequest) {
        match request {
            ModeRequest::Startup => {
                self.last_mode = None;
                self.reset(self.board.mode());
            }
            ModeRequest::Set(mode) => {
                self.last_mode = None;
                self.reset(mode);
            }
            ModeRequest::Conjugate => {
                self.last_mode = None;
                self.reset(self.board.mode().conjugated());
            }
            ModeRequest::Configure => {
                self.last_mode = None;
                self.reset(self.board.mode().configured());
            }
            ModeRequest::Bonus => self.enter_scene(Mode::DebugAttacker),
            ModeRequest::Clumsy => self.enter_scene(Mode::DebugDefender),
        }
        if self.in_scene() {
            for cell in SCENE_SCRIPT {
                self.place(cell);
            }
        } else {
            self.opening_response();
        }
    }

    // === Internals ===

    fn place(&mut self, cell: usize) {
        if !matches!(self.board.cell(cell), Ok(Mark::Empty)) {
            return;
        }
        match self.board.turn() {
            Turn::User => {
                self.put_mark(cell, Mark::Nought);
                self.advance_turn(Turn::Response);
                self.check_result();
                if !self.board.mode().debug() && self.board.outcome() == Outcome::Open {
                    self.respond();
                }
            }
            Turn::Response => {
                // Only debug modes accept manual marks for the engine
                // side; otherwise the engine answers inline and this
                // state is never seen by callers.
                if self.board.mode().debug() {
                    self.put_mark(cell, Mark::Cross);
                    self.advance_turn(Turn::User);
                    self.check_result();
                }
            }
            // The zeroed-record sentinel; never reached through the
            // public API, which always resolves the turn on reset.
            Turn::Unspecified => {}
            Turn::Terminated => {}
        }
    }

    fn respond(&mut self) {
        if let Some(cell) = self.response.select(&self.board, &mut self.rng) {
            self.put_mark(cell, Mark::Cross);
            self.advance_turn(Turn::User);
            self.check_result();
        }
    }

    /// Engine opening move after a reset into a defender-side mode.
    fn opening_response(&mut self) {
        if !self.board.mode().debug()
            && self.board.turn() == Turn::Response
            && self.board.outcome() == Outcome::Open
        {
            self.respond();
        }
    }

    fn enter_scene(&mut self, scene: Mode) {
        if self.in_scene() && self.board.mode() == scene {
            // Re-requesting the active scene switches back out. The
            // mode alone is not enough: the same debug mode reached
            // via Configure has no scene to leave.
            let restored = self.last_mode.take().unwrap_or(scene);
            self.reset(restored);
        } else {
            if self.last_mode.is_none() {
                self.last_mode = Some(self.board.mode());
            }
            self.reset(scene);
        }
    }

    fn reset(&mut self, mode: Mode) {
        self.board = Board::new(mode);
        self.events.push(GameEvent::BoardReset);
    }

    fn put_mark(&mut self, cell: usize, mark: Mark) {
        self.board.put(cell, mark);
        self.events.push(GameEvent::CellSet { cell, mark });
    }

    /// Flip the side to move and count the round. Termination wins
    /// over everything and pins the round counter at 9.
    fn advance_turn(&mut self, next: Turn) {
        let current = self.board.turn();
        if next == Turn::Terminated || current == Turn::Terminated {
            self.board.set_turn(Turn::Terminated);
            self.board.set_round(9);
            self.events.push(GameEvent::TurnChanged(Turn::Terminated));
            return;
        }
        if next != current && self.board.round() < 9 {
            self.board.set_turn(next);
            self.board.set_round(self.board.round() + 1);
            self.events.push(GameEvent::TurnChanged(next));
        }
    }

    fn check_result(&mut self) {
        if self.board.outcome() != Outcome::Open {
            return;
        }
        let outcome = self.result.evaluate(&self.board);
        if outcome != Outcome::Open {
            self.board.set_outcome(outcome);
            self.events.push(GameEvent::OutcomeChanged(outcome));
            self.advance_turn(Turn::Terminated);
        }
    }
}
