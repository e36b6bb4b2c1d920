//! Grid engine - the complete Tetris state machine
//!
//! This module ties together the board, pieces, randomness and scoring. Every
//! operation runs to completion synchronously: a lock writes the piece, clears
//! rows, rescores, promotes the next piece and checks for game over before it
//! returns. Gravity timing lives outside; a driver calls [`GridEngine::soft_tick`]
//! once per `drop_interval_ms`.

use serde::Serialize;

use crate::board::{Board, ClearedRows};
use crate::pieces::{Piece, PieceView};
use crate::rng::{Randomizer, SimpleRng};
use crate::scoring::{calculate_level, calculate_score, drop_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::stats::SessionStats;
use crate::types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// A piece is falling and input is accepted
    Falling,
    /// A promoted piece could not spawn; only `reset` does anything
    GameOver,
}

/// Emitted after every lock (consumed by observers)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Rows removed, as indexed before compaction, bottom-most first
    pub cleared_rows: ClearedRows,
    pub lines_cleared: u32,
    pub score_delta: u32,
    /// Combo after this lock
    pub combo: u32,
    /// Level after this lock
    pub level: u32,
    pub game_over: bool,
}

/// Result of a gravity tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TickOutcome {
    /// The game is over; nothing happened
    Ignored,
    /// The piece moved down one row
    Fell,
    /// The piece could not fall and was locked
    Locked(LockEvent),
}

/// Result of a hard drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropResult {
    /// Rows travelled before locking
    pub distance: u32,
    pub event: LockEvent,
}

/// Complete Tetris game state
#[derive(Debug, Clone)]
pub struct GridEngine<R = SimpleRng> {
    board: Board,
    current: Piece,
    next: Piece,
    held: Option<Piece>,
    can_hold: bool,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    combo: u32,
    stats: SessionStats,
    phase: Phase,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    rng: R,
}

impl GridEngine<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: Randomizer> GridEngine<R> {
    /// Create a new game drawing pieces from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self::from_parts(Board::new(), rng)
    }

    /// Start a game on a pre-filled board
    ///
    /// The first two draws become `current` and `next`. If the first piece
    /// cannot spawn the game starts in [`Phase::GameOver`].
    ///
    /// Rows of `board` that are already full are cleared up front without
    /// scoring.
    pub fn from_parts(mut board: Board, mut rng: R) -> Self {
        board.clear_full_rows();
        let current = Piece::spawn(rng.next_piece());
        let next = Piece::spawn(rng.next_piece());
        let level = calculate_level(0);
        let mut engine = Self {
            board,
            current,
            next,
            held: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level,
            drop_interval_ms: drop_interval_ms(level),
            combo: 0,
            stats: SessionStats::default(),
            phase: Phase::Falling,
            last_event: None,
            rng,
        };
        if !engine.is_valid(&engine.current, 0, 0) {
            engine.phase = Phase::GameOver;
        }
        engine
    }

    /// Reinitialize everything except the random stream
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = self.create_piece();
        self.next = self.create_piece();
        self.held = None;
        self.can_hold = true;
        self.score = 0;
        self.lines = 0;
        self.level = calculate_level(0);
        self.drop_interval_ms = drop_interval_ms(self.level);
        self.combo = 0;
        self.stats = SessionStats::default();
        self.phase = Phase::Falling;
        self.last_event = None;
        log::debug!("tetris reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Piece> {
        match self.phase {
            Phase::Falling => Some(self.current),
            Phase::GameOver => None,
        }
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn held(&self) -> Option<Piece> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Gravity interval for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// A fresh piece of uniformly random kind at the spawn position
    pub fn create_piece(&mut self) -> Piece {
        Piece::spawn(self.rng.next_piece())
    }

    /// Whether `piece` shifted by `(dx, dy)` fits on the board
    ///
    /// This is the only collision check: moves, rotations, drops, holds and
    /// spawns all go through it.
    pub fn is_valid(&self, piece: &Piece, dx: i8, dy: i8) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(x, y)| match (x.checked_add(dx), y.checked_add(dy)) {
                (Some(x), Some(y)) => self.board.is_free(x, y),
                _ => false,
            })
    }

    /// Translate the current piece if the target fits
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over() || !self.is_valid(&self.current, dx, dy) {
            return false;
        }
        self.current = self.current.shifted(dx, dy);
        true
    }

    /// Rotate the current piece clockwise in place, rejecting on collision
    pub fn rotate(&mut self) -> bool {
        if self.game_over() {
            return false;
        }
        let rotated = self.current.rotated();
        if !self.is_valid(&rotated, 0, 0) {
            return false;
        }
        self.current = rotated;
        true
    }

    /// Stash the current piece, once per lock
    ///
    /// With an empty hold the next piece is promoted; otherwise the held piece
    /// swaps in at the spawn position. A swap-in that would not fit is refused.
    pub fn hold(&mut self) -> bool {
        if self.game_over() || !self.can_hold {
            return false;
        }

        match self.held {
            Some(held) => {
                let incoming = held.recentered();
                if !self.is_valid(&incoming, 0, 0) {
                    return false;
                }
                self.held = Some(self.current);
                self.current = incoming;
            }
            None => {
                if !self.is_valid(&self.next, 0, 0) {
                    return false;
                }
                self.held = Some(self.current);
                self.current = self.next;
                self.next = self.create_piece();
            }
        }

        self.can_hold = false;
        true
    }

    /// Settle the current piece, clear rows, rescore and promote the next piece
    pub fn lock(&mut self) -> Option<LockEvent> {
        if self.game_over() {
            return None;
        }

        let piece = self.current;
        let placed = self.board.lock_cells(&piece.cells(), piece.kind);
        debug_assert!(placed, "current piece must always fit");

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len();

        let result = calculate_score(lines_cleared, self.level, self.combo);
        self.score = self.score.saturating_add(result.total);

        if lines_cleared > 0 {
            self.combo += 1;
            self.stats.max_combo = self.stats.max_combo.max(self.combo);
            if lines_cleared == 4 {
                self.stats.tetris_count += 1;
            }
            self.lines += lines_cleared as u32;
            self.level = calculate_level(self.lines);
            self.drop_interval_ms = drop_interval_ms(self.level);
            log::debug!(
                "cleared {} line(s) rows={:?} +{} combo={} level={}",
                lines_cleared,
                cleared_rows.as_slice(),
                result.total,
                self.combo,
                self.level
            );
        } else {
            self.combo = 0;
        }
        self.stats.total_pieces += 1;

        self.current = self.next;
        self.next = self.create_piece();
        self.can_hold = true;

        if !self.is_valid(&self.current, 0, 0) {
            self.phase = Phase::GameOver;
            log::info!(
                "tetris game over: score={} lines={} level={}",
                self.score,
                self.lines,
                self.level
            );
        }

        let event = LockEvent {
            kind: piece.kind,
            cleared_rows,
            lines_cleared: lines_cleared as u32,
            score_delta: result.total,
            combo: self.combo,
            level: self.level,
            game_over: self.game_over(),
        };
        self.last_event = Some(event.clone());
        Some(event)
    }

    /// One gravity step: fall a row, or lock if the piece is resting
    pub fn soft_tick(&mut self) -> TickOutcome {
        if self.game_over() {
            return TickOutcome::Ignored;
        }
        if self.try_move(0, 1) {
            return TickOutcome::Fell;
        }
        match self.lock() {
            Some(event) => TickOutcome::Locked(event),
            None => TickOutcome::Ignored,
        }
    }

    /// Drop the current piece to its landing row and lock it
    pub fn hard_drop(&mut self) -> Option<DropResult> {
        if self.game_over() {
            return None;
        }
        let mut distance = 0u32;
        while self.try_move(0, 1) {
            distance += 1;
        }
        self.lock().map(|event| DropResult { distance, event })
    }

    /// Landing row of the current piece (ghost projection)
    pub fn ghost_y(&self) -> Option<i8> {
        if self.game_over() {
            return None;
        }
        let mut ghost = self.current;
        while self.is_valid(&ghost, 0, 1) {
            ghost = ghost.shifted(0, 1);
        }
        Some(ghost.y)
    }

    /// Apply a discrete input
    ///
    /// Returns false when the action had no effect, so callers can skip
    /// animation and sound.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.try_move(0, 1),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::Rotate => self.rotate(),
            GameAction::Hold => self.hold(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.board.write_u8_grid(&mut board);

        GameSnapshot {
            board,
            current: self.current().map(PieceView::from),
            next: PieceView::from(self.next),
            held: self.held.map(PieceView::from),
            ghost_y: self.ghost_y(),
            can_hold: self.can_hold,
            game_over: self.game_over(),
            score: self.score,
            level: self.level,
            lines: self.lines,
            combo: self.combo,
            drop_interval_ms: self.drop_interval_ms,
            stats: self.stats,
        }
    }
}

impl Default for GridEngine<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
