//! Fixed-interval gravity scheduling.
//!
//! The Tetris engine has no clock. A driver feeds it elapsed time and decides
//! when a gravity step happens; pausing is the driver's business too.

use crate::core::rng::Randomizer;
use crate::core::{GridEngine, TickOutcome};
use crate::types::GameAction;

#[derive(Debug, Clone, Default)]
pub struct TickDriver {
    drop_timer_ms: u32,
    play_time_ms: u64,
    paused: bool,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Time accumulated towards the next gravity step
    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    /// Unpaused time spent in live games since the last restart
    pub fn play_time_ms(&self) -> u64 {
        self.play_time_ms
    }

    pub fn play_time_secs(&self) -> u64 {
        self.play_time_ms / 1000
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume ticking; the drop timer starts over
    pub fn resume(&mut self) {
        self.paused = false;
        self.drop_timer_ms = 0;
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    /// Feed `elapsed_ms` of wall time
    ///
    /// Once the accumulated time is strictly greater than the engine's drop
    /// interval, exactly one soft tick is dispatched and the timer restarts
    /// from zero. Returns the tick outcome when one was dispatched.
    pub fn advance<R: Randomizer>(
        &mut self,
        engine: &mut GridEngine<R>,
        elapsed_ms: u32,
    ) -> Option<TickOutcome> {
        if self.paused || engine.game_over() {
            return None;
        }

        self.play_time_ms = self.play_time_ms.saturating_add(u64::from(elapsed_ms));
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms <= engine.drop_interval_ms() {
            return None;
        }

        self.drop_timer_ms = 0;
        Some(engine.soft_tick())
    }

    /// Forward a player action
    ///
    /// Actions are dropped while paused, except `Restart` which also clears
    /// the pause and both timers.
    pub fn apply<R: Randomizer>(&mut self, engine: &mut GridEngine<R>, action: GameAction) -> bool {
        if action == GameAction::Restart {
            self.paused = false;
            self.drop_timer_ms = 0;
            self.play_time_ms = 0;
            return engine.apply_action(action);
        }
        if self.paused {
            return false;
        }
        engine.apply_action(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Board;
    use crate::core::ScriptedRng;
    use crate::types::PieceKind;

    fn engine() -> GridEngine<ScriptedRng> {
        GridEngine::with_rng(ScriptedRng::pieces(&[PieceKind::T, PieceKind::O]))
    }

    #[test]
    fn test_tick_fires_after_interval_is_exceeded() {
        let mut game = engine();
        let mut driver = TickDriver::new();
        let interval = game.drop_interval_ms();

        assert_eq!(driver.advance(&mut game, interval), None);
        assert_eq!(driver.drop_timer_ms(), interval);
        assert_eq!(driver.advance(&mut game, 1), Some(TickOutcome::Fell));
        assert_eq!(driver.drop_timer_ms(), 0);
        assert_eq!(game.current().map(|p| p.y), Some(1));
    }

    #[test]
    fn test_large_step_dispatches_one_tick() {
        let mut game = engine();
        let mut driver = TickDriver::new();

        assert_eq!(driver.advance(&mut game, 10_000), Some(TickOutcome::Fell));
        assert_eq!(game.current().map(|p| p.y), Some(1));
        // remainder is dropped
        assert_eq!(driver.drop_timer_ms(), 0);
    }

    #[test]
    fn test_pause_blocks_ticks_and_actions() {
        let mut game = engine();
        let mut driver = TickDriver::new();

        driver.advance(&mut game, 600);
        assert!(driver.toggle_pause());
        assert_eq!(driver.advance(&mut game, 5_000), None);
        assert!(!driver.apply(&mut game, GameAction::MoveLeft));
        assert_eq!(game.current().map(|p| p.y), Some(0));

        assert!(!driver.toggle_pause());
        assert_eq!(driver.drop_timer_ms(), 0);
        assert_eq!(driver.advance(&mut game, 600), None);
        assert!(driver.apply(&mut game, GameAction::MoveLeft));
    }

    #[test]
    fn test_play_time_excludes_pauses() {
        let mut game = engine();
        let mut driver = TickDriver::new();

        driver.advance(&mut game, 700);
        driver.pause();
        driver.advance(&mut game, 9_000);
        driver.resume();
        driver.advance(&mut game, 800);
        assert_eq!(driver.play_time_ms(), 1_500);
        assert_eq!(driver.play_time_secs(), 1);
    }

    #[test]
    fn test_nothing_dispatched_after_game_over() {
        let mut board = Board::new();
        board.set(4, 0, Some(PieceKind::I));
        let mut game = GridEngine::from_parts(board, ScriptedRng::pieces(&[PieceKind::O]));
        assert!(game.game_over());

        let mut driver = TickDriver::new();
        assert_eq!(driver.advance(&mut game, 5_000), None);
        assert_eq!(driver.play_time_ms(), 0);
    }

    #[test]
    fn test_restart_clears_pause() {
        let mut game = engine();
        let mut driver = TickDriver::new();
        driver.advance(&mut game, 400);
        driver.pause();

        assert!(driver.apply(&mut game, GameAction::Restart));
        assert!(!driver.paused());
        assert_eq!(driver.play_time_ms(), 0);
        assert_eq!(game.score(), 0);
    }
}
