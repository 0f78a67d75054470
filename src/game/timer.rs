//! Game clock control and win reporting.

use core::time::Duration;

use crate::result::{GameResult, format_time};
use crate::store::Persistence;

use super::Game;
use super::state::GameEvent;

impl<P: Persistence> Game<P> {
    /// Stops the clock, e.g. while the app is in the background.
    pub fn pause_timer(&mut self) {
        self.stopwatch.pause();
    }

    /// Restarts the clock. Does nothing once the game is won.
    pub fn resume_timer(&mut self) {
        if self.has_won() {
            return;
        }
        self.stopwatch.start();
    }

    /// Lets the clock publish its value. Call this from the host event loop
    /// at least as often as the tick interval.
    pub fn tick(&mut self) -> Option<Duration> {
        self.stopwatch.poll()
    }

    /// Returns `true` once the win of this deal has been reported.
    pub const fn win_reported(&self) -> bool {
        self.win_reported
    }

    /// Reports a win the first time it is seen.
    ///
    /// Stops the clock, records the result with the store and queues
    /// [`GameEvent::Won`]. Store failures are logged and otherwise ignored.
    pub(super) fn check_win(&mut self) {
        if self.win_reported || !self.has_won() {
            return;
        }
        self.win_reported = true;
        self.stopwatch.pause();

        let time = self.stopwatch.elapsed();
        let result = GameResult {
            time,
            time_text: format_time(time),
            moves: self.moves,
            score: self.score,
            difficulty: self.settings.get().difficulty,
        };
        log::info!(
            "game won in {} with {} moves, score {}",
            result.time_text,
            result.moves,
            result.score
        );

        if let Err(err) = self.store.add_high_score(
            &result.time_text,
            result.moves,
            result.score,
            result.difficulty,
        ) {
            log::warn!("recording the win failed: {err}");
        }
        if let Err(err) = self.store.clear_saved_game() {
            log::warn!("clearing the saved game failed: {err}");
        }

        self.events.push(GameEvent::Won(result));
    }
}
