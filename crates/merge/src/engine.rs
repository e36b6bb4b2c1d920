//! 2048 state machine

use serde::Serialize;

use crate::grid::{slide_line, Grid};
use crate::types::{Direction, MERGE_GRID_SIZE, TWO_TILE_TENTHS, WIN_TILE};
use arcade_core::rng::{Randomizer, SimpleRng};

/// One merge produced by a shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeEvent {
    pub value: u32,
    /// Row or column index the merge happened in
    pub line: usize,
    /// Position inside the slid line, 0 at the destination edge
    pub offset: usize,
    pub row: usize,
    pub col: usize,
}

/// Tile placed after an effective shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileSpawn {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Side effects of one [`MergeEngine::shift`] call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MoveOutcome {
    /// Whether any tile moved or merged
    pub moved: bool,
    pub merges: Vec<MergeEvent>,
    pub score_delta: u32,
    pub spawned: Option<TileSpawn>,
    /// Set only by the shift that first produced the winning tile
    pub reached_win: bool,
    /// Whether the shift raised the best score
    pub new_best: bool,
    pub game_over: bool,
}

impl MoveOutcome {
    fn unchanged(game_over: bool) -> Self {
        Self {
            game_over,
            ..Self::default()
        }
    }
}

/// State saved before an effective shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UndoSlot {
    grid: Grid,
    score: u32,
    won: bool,
    game_over: bool,
}

/// Renderer view of a [`MergeEngine`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSnapshot {
    pub grid: [[u32; MERGE_GRID_SIZE]; MERGE_GRID_SIZE],
    pub score: u32,
    pub best_score: u32,
    pub max_tile: u32,
    pub won: bool,
    pub keep_going: bool,
    pub game_over: bool,
    pub can_undo: bool,
}

/// Complete 2048 game state
#[derive(Debug, Clone)]
pub struct MergeEngine<R = SimpleRng> {
    grid: Grid,
    score: u32,
    best_score: u32,
    won: bool,
    keep_going: bool,
    game_over: bool,
    undo: Option<UndoSlot>,
    rng: R,
}

impl MergeEngine<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: Randomizer> MergeEngine<R> {
    /// Create a new game with two starting tiles
    pub fn with_rng(rng: R) -> Self {
        let mut engine = Self::from_grid(Grid::new(), rng);
        engine.spawn_tile();
        engine.spawn_tile();
        engine
    }

    /// Start from a fixed grid without spawning anything
    pub fn from_grid(grid: Grid, rng: R) -> Self {
        Self {
            grid,
            score: 0,
            best_score: 0,
            won: grid.max_tile() >= WIN_TILE,
            keep_going: false,
            game_over: !grid.has_moves(),
            undo: None,
            rng,
        }
    }

    /// Seed the best score, typically from persisted storage
    pub fn with_best_score(mut self, best_score: u32) -> Self {
        self.best_score = self.best_score.max(best_score);
        self
    }

    /// Start over with two fresh tiles; the best score survives
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.score = 0;
        self.won = false;
        self.keep_going = false;
        self.game_over = false;
        self.undo = None;
        self.spawn_tile();
        self.spawn_tile();
        log::debug!("2048 reset, best score {}", self.best_score);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    /// Whether [`MergeEngine::shift`] currently does anything
    pub fn accepts_moves(&self) -> bool {
        !self.game_over && (!self.won || self.keep_going)
    }

    /// Slide every line towards `direction`
    ///
    /// An ineffective shift changes nothing: no spawn, no undo snapshot.
    pub fn shift(&mut self, direction: Direction) -> MoveOutcome {
        if !self.accepts_moves() {
            return MoveOutcome::unchanged(self.game_over);
        }

        let mut next = self.grid;
        let mut merges = Vec::new();
        let mut gained = 0u32;
        let mut moved = false;

        for index in 0..MERGE_GRID_SIZE {
            let line = self.grid.line(direction, index);
            let slid = slide_line(line);
            if slid.line == line {
                continue;
            }
            moved = true;
            next.set_line(direction, index, slid.line);
            gained = gained.saturating_add(slid.gained);
            merges.extend(slid.merges.iter().map(|m| {
                let (row, col) = Grid::position(direction, index, m.offset);
                MergeEvent {
                    value: m.value,
                    line: index,
                    offset: m.offset,
                    row,
                    col,
                }
            }));
        }

        if !moved {
            return MoveOutcome::unchanged(self.game_over);
        }

        self.undo = Some(UndoSlot {
            grid: self.grid,
            score: self.score,
            won: self.won,
            game_over: self.game_over,
        });
        self.grid = next;
        self.score = self.score.saturating_add(gained);

        let spawned = self.spawn_tile();

        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
        }

        let reached_win = !self.won && merges.iter().any(|m| m.value == WIN_TILE);
        if reached_win {
            self.won = true;
            log::info!("2048 reached with score {}", self.score);
        }

        if !self.grid.has_moves() {
            self.game_over = true;
            log::info!("2048 game over with score {}", self.score);
        }

        MoveOutcome {
            moved,
            merges,
            score_delta: gained,
            spawned,
            reached_win,
            new_best,
            game_over: self.game_over,
        }
    }

    /// Restore the state before the last effective shift
    ///
    /// Returns false when there is nothing to restore. The best score is
    /// never lowered.
    pub fn undo(&mut self) -> bool {
        match self.undo.take() {
            Some(slot) => {
                self.grid = slot.grid;
                self.score = slot.score;
                self.won = slot.won;
                self.game_over = slot.game_over;
                true
            }
            None => false,
        }
    }

    /// Acknowledge the win and keep playing
    ///
    /// Returns false when the game has not been won yet.
    pub fn keep_going(&mut self) -> bool {
        if !self.won {
            return false;
        }
        self.keep_going = true;
        true
    }

    pub fn snapshot(&self) -> MergeSnapshot {
        MergeSnapshot {
            grid: *self.grid.rows(),
            score: self.score,
            best_score: self.best_score,
            max_tile: self.grid.max_tile(),
            won: self.won,
            keep_going: self.keep_going,
            game_over: self.game_over,
            can_undo: self.can_undo(),
        }
    }

    /// Place a 2 (nine times in ten) or a 4 in a uniformly chosen empty cell
    fn spawn_tile(&mut self) -> Option<TileSpawn> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let (row, col) = empty[self.rng.next_range(empty.len() as u32) as usize];
        let value = if self.rng.chance(TWO_TILE_TENTHS, 10) {
            2
        } else {
            4
        };
        self.grid.set(row, col, value);
        Some(TileSpawn { row, col, value })
    }
}

impl Default for MergeEngine<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::rng::ScriptedRng;

    // Draw pairs are (empty cell index, value roll); a roll below 9 spawns a 2.
    fn engine(rows: [[u32; 4]; 4], draws: Vec<u32>) -> MergeEngine<ScriptedRng> {
        MergeEngine::from_grid(Grid::from_rows(rows), ScriptedRng::new(draws))
    }

    #[test]
    fn test_new_game_has_two_tiles() {
        let game = MergeEngine::new(42);
        assert_eq!(game.grid().tile_count(), 2);
        assert_eq!(game.score(), 0);
        assert!(!game.can_undo());
        assert!(game.grid().max_tile() <= 4);
    }

    #[test]
    fn test_pair_merges_left() {
        // 15 empty cells after the merge, index 14 is the bottom-right corner
        let mut game = engine(
            [[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            vec![14, 0],
        );
        let outcome = game.shift(Direction::Left);

        assert!(outcome.moved);
        assert_eq!(outcome.score_delta, 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.grid().rows()[0], [4, 0, 0, 0]);
        assert_eq!(
            outcome.spawned,
            Some(TileSpawn {
                row: 3,
                col: 3,
                value: 2
            })
        );
        assert_eq!(game.grid().tile_count(), 2);
        assert_eq!(
            outcome.merges,
            vec![MergeEvent {
                value: 4,
                line: 0,
                offset: 0,
                row: 0,
                col: 0
            }]
        );
    }

    #[test]
    fn test_full_row_merges_into_two() {
        let mut game = engine(
            [[2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            vec![13, 9],
        );
        let outcome = game.shift(Direction::Left);

        assert_eq!(game.grid().rows()[0], [4, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 8);
        assert_eq!(outcome.merges.len(), 2);
        // roll of 9 is outside the 9-in-10 band
        assert_eq!(outcome.spawned.map(|s| s.value), Some(4));
    }

    #[test]
    fn test_shift_down_merges_towards_bottom() {
        let mut game = engine(
            [[2, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0]],
            vec![0, 0],
        );
        let outcome = game.shift(Direction::Down);

        assert_eq!(game.grid().get(3, 0), Some(4));
        assert_eq!(game.grid().get(2, 0), Some(4));
        assert_eq!(outcome.merges[0].row, 2);
        assert_eq!(outcome.merges[0].col, 0);
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn test_ineffective_shift_changes_nothing() {
        let mut game = engine(
            [[2, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            vec![0, 0],
        );
        let before = game.snapshot();
        let outcome = game.shift(Direction::Left);

        assert!(!outcome.moved);
        assert_eq!(outcome.spawned, None);
        assert_eq!(game.snapshot(), before);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_stuck_board_is_game_over() {
        let mut game = engine(
            [
                [2, 4, 2, 4],
                [4, 2, 4, 2],
                [8, 16, 32, 64],
                [4, 2, 4, 0],
            ],
            vec![0, 0],
        );
        let outcome = game.shift(Direction::Right);

        assert!(outcome.moved);
        assert_eq!(game.grid().rows()[3], [2, 4, 2, 4]);
        assert!(outcome.game_over);
        assert!(game.game_over());
        assert!(!game.accepts_moves());

        let again = game.shift(Direction::Left);
        assert!(!again.moved);
        assert!(again.game_over);
    }

    #[test]
    fn test_win_does_not_end_game() {
        let mut game = engine(
            [[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            vec![0, 0],
        );
        let outcome = game.shift(Direction::Left);

        assert!(outcome.reached_win);
        assert!(!outcome.game_over);
        assert!(game.won());
        assert!(!game.accepts_moves());

        // moves are refused until the win is acknowledged
        assert!(!game.shift(Direction::Right).moved);
        assert!(game.keep_going());
        let next = game.shift(Direction::Right);
        assert!(next.moved);
        assert!(!next.reached_win);
    }

    #[test]
    fn test_keep_going_requires_win() {
        let mut game = MergeEngine::new(3);
        assert!(!game.keep_going());
        assert!(game.accepts_moves());
    }

    #[test]
    fn test_undo_restores_previous_state() {
        let rows = [[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
        let mut game = engine(rows, vec![14, 0]);
        game.shift(Direction::Left);
        assert_eq!(game.best_score(), 4);

        assert!(game.undo());
        assert_eq!(game.grid().rows(), &rows);
        assert_eq!(game.score(), 0);
        assert_eq!(game.best_score(), 4);

        // slot is consumed
        assert!(!game.undo());
    }

    #[test]
    fn test_ineffective_shift_keeps_undo_slot() {
        let rows = [[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
        // new tile lands next to the merged 4, so a second left shift is a no-op
        let mut game = engine(rows, vec![0, 0]);
        assert!(game.shift(Direction::Left).moved);
        assert_eq!(game.grid().rows()[0], [4, 2, 0, 0]);

        assert!(!game.shift(Direction::Left).moved);
        assert!(game.can_undo());

        assert!(game.undo());
        assert_eq!(game.grid().rows(), &rows);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_undo_before_any_move() {
        let mut game = MergeEngine::new(9);
        let before = *game.grid();
        assert!(!game.undo());
        assert_eq!(*game.grid(), before);
    }

    #[test]
    fn test_undo_clears_game_over() {
        let mut game = engine(
            [
                [2, 4, 2, 4],
                [4, 2, 4, 2],
                [8, 16, 32, 64],
                [4, 2, 4, 0],
            ],
            vec![0, 0],
        );
        game.shift(Direction::Right);
        assert!(game.game_over());

        assert!(game.undo());
        assert!(!game.game_over());
        assert!(game.accepts_moves());
    }

    #[test]
    fn test_best_score_survives_reset() {
        let mut game = engine(
            [[8, 8, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            vec![3, 0],
        )
        .with_best_score(10);
        let outcome = game.shift(Direction::Left);
        assert!(outcome.new_best);
        assert_eq!(game.best_score(), 16);

        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.best_score(), 16);
        assert_eq!(game.grid().tile_count(), 2);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_seeded_games_replay() {
        let mut a = MergeEngine::new(777);
        let mut b = MergeEngine::new(777);
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            assert_eq!(a.shift(dir), b.shift(dir));
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
