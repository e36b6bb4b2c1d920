//! Greedy autoplay policies for headless runs.
//!
//! Both policies only look one move ahead by trying every candidate on a clone
//! of the engine. They exist to exercise the engines end to end, not to play
//! well.

use crate::core::board::Board;
use crate::core::rng::Randomizer;
use crate::core::GridEngine;
use crate::merge::MergeEngine;
use crate::types::{Direction, GameAction, BOARD_HEIGHT, BOARD_WIDTH};

// Board feature weights, scaled to integers
const LINE_WEIGHT: i32 = 760;
const HEIGHT_WEIGHT: i32 = 510;
const HOLE_WEIGHT: i32 = 356;
const BUMP_WEIGHT: i32 = 184;

/// Aggregate height, holes and bumpiness of a settled board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFeatures {
    pub aggregate_height: i32,
    pub holes: i32,
    pub bumpiness: i32,
}

impl BoardFeatures {
    pub fn of(board: &Board) -> Self {
        let mut heights = [0i32; BOARD_WIDTH as usize];
        let mut holes = 0;

        for (x, height) in heights.iter_mut().enumerate() {
            let mut seen_block = false;
            for y in 0..BOARD_HEIGHT as i8 {
                if board.is_occupied(x as i8, y) {
                    if !seen_block {
                        *height = i32::from(BOARD_HEIGHT) - i32::from(y);
                        seen_block = true;
                    }
                } else if seen_block {
                    holes += 1;
                }
            }
        }

        Self {
            aggregate_height: heights.iter().sum(),
            holes,
            bumpiness: heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum(),
        }
    }
}

fn placement_score(lines: u32, features: BoardFeatures) -> i32 {
    LINE_WEIGHT * lines as i32
        - HEIGHT_WEIGHT * features.aggregate_height
        - HOLE_WEIGHT * features.holes
        - BUMP_WEIGHT * features.bumpiness
}

/// Input sequence that steers the current piece to the best-looking column
///
/// Rotations come first, then horizontal moves. Gravity (or a hard drop)
/// finishes the placement. Returns an empty plan when the game is over.
pub fn plan_placement<R: Randomizer + Clone>(engine: &GridEngine<R>) -> Vec<GameAction> {
    if engine.game_over() {
        return Vec::new();
    }

    let mut best: Option<(i32, Vec<GameAction>)> = None;

    for rotations in 0..4 {
        let mut rotated = engine.clone();
        if (0..rotations).any(|_| !rotated.rotate()) {
            continue;
        }

        for shift in -(BOARD_WIDTH as i8)..=(BOARD_WIDTH as i8) {
            let mut trial = rotated.clone();
            let step = if shift < 0 { -1 } else { 1 };
            if (0..shift.abs()).any(|_| !trial.try_move(step, 0)) {
                continue;
            }
            let Some(drop) = trial.hard_drop() else {
                continue;
            };

            let mut score =
                placement_score(drop.event.lines_cleared, BoardFeatures::of(trial.board()));
            if drop.event.game_over {
                score = i32::MIN;
            }
            if best.as_ref().is_some_and(|(s, _)| *s >= score) {
                continue;
            }

            let mut plan = vec![GameAction::Rotate; rotations];
            let horizontal = if shift < 0 {
                GameAction::MoveLeft
            } else {
                GameAction::MoveRight
            };
            plan.extend(std::iter::repeat(horizontal).take(shift.unsigned_abs() as usize));
            best = Some((score, plan));
        }
    }

    best.map(|(_, plan)| plan).unwrap_or_default()
}

/// Direction with the best immediate payoff, or `None` when nothing moves
///
/// Candidates are ranked by score gained, then by empty cells left.
pub fn pick_direction<R: Randomizer + Clone>(engine: &MergeEngine<R>) -> Option<Direction> {
    Direction::ALL
        .into_iter()
        .filter_map(|direction| {
            let mut trial = engine.clone();
            let outcome = trial.shift(direction);
            outcome.moved.then(|| {
                let empty = trial.grid().empty_cells().len();
                (direction, (outcome.score_delta, empty))
            })
        })
        .max_by_key(|(_, rank)| *rank)
        .map(|(direction, _)| direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;
    use crate::merge::Grid;
    use crate::types::PieceKind;

    #[test]
    fn test_features_count_holes_under_blocks() {
        let board = Board::from_ascii(&["#.", ".#"]);
        let features = BoardFeatures::of(&board);
        assert_eq!(features.holes, 1);
        assert_eq!(features.aggregate_height, 3);
        // columns 2.. are empty: |2-1| + |1-0|
        assert_eq!(features.bumpiness, 2);
    }

    #[test]
    fn test_plan_fills_the_gap() {
        // bottom row open only at the far right
        let board = Board::from_ascii(&["#########."]);
        let engine = GridEngine::from_parts(board, ScriptedRng::pieces(&[PieceKind::I]));

        let plan = plan_placement(&engine);
        let mut trial = engine.clone();
        for action in &plan {
            assert!(trial.apply_action(*action));
        }
        let drop = trial.hard_drop().unwrap();
        assert_eq!(drop.event.lines_cleared, 1);
    }

    #[test]
    fn test_plan_is_empty_after_game_over() {
        let mut board = Board::new();
        board.set(4, 0, Some(PieceKind::I));
        let engine = GridEngine::from_parts(board, ScriptedRng::pieces(&[PieceKind::O]));
        assert!(plan_placement(&engine).is_empty());
    }

    #[test]
    fn test_pick_direction_prefers_merges() {
        let grid = Grid::from_rows([[2, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let engine = MergeEngine::from_grid(grid, ScriptedRng::new(vec![0]));
        let direction = pick_direction(&engine).unwrap();
        assert!(matches!(direction, Direction::Up | Direction::Down));
    }

    #[test]
    fn test_pick_direction_none_when_stuck() {
        let grid = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let engine = MergeEngine::from_grid(grid, ScriptedRng::new(vec![0]));
        assert_eq!(pick_direction(&engine), None);
    }
}
