//! Persistence collaborator contract and reference stores.
//!
//! The engine only talks to a [`Persistence`] implementation. Each platform
//! supplies its own backend; [`MemoryStore`] keeps everything in memory and
//! [`NullStore`] discards everything.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::error::StoreError;
use crate::game::GameSnapshot;
use crate::observe::{Signal, SubscriptionId};
use crate::options::{DEFAULT_HIGH_SCORE_LIMIT, Difficulty};
use crate::sync::Mutex;

/// A completed game as recorded in the high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighScore {
    /// Formatted play time, e.g. `4:07`.
    pub time_taken: String,
    /// Number of moves made.
    pub move_count: u32,
    /// Final score.
    pub score: i32,
    /// Difficulty the game was played at.
    pub difficulty: Difficulty,
}

/// Storage for high scores and the in-progress game.
///
/// Calls are fire-and-forget from the engine's point of view: a store may
/// queue work and return immediately. Failures are reported back but the
/// engine never retries them; retrying is up to the store.
pub trait Persistence {
    /// Records a completed game.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot record the entry.
    fn add_high_score(
        &self,
        time_taken: &str,
        move_count: u32,
        score: i32,
        difficulty: Difficulty,
    ) -> Result<(), StoreError>;

    /// Removes a high-score entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is unknown or the backend fails.
    fn remove_high_score(&self, entry: &HighScore) -> Result<(), StoreError>;

    /// Returns the high scores, best first.
    fn high_scores(&self) -> Vec<HighScore>;

    /// Returns the number of games won.
    fn win_count(&self) -> u32;

    /// Saves the in-progress game, replacing any earlier save.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot write.
    fn save_game(&self, snapshot: &GameSnapshot) -> Result<(), StoreError>;

    /// Loads the saved game, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot read.
    fn load_game(&self) -> Result<Option<GameSnapshot>, StoreError>;

    /// Forgets the saved game.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot write.
    fn clear_saved_game(&self) -> Result<(), StoreError>;
}

macro_rules! forward_persistence {
    ($($ptr:ty),* $(,)?) => {$(
        impl<T: Persistence + ?Sized> Persistence for $ptr {
            fn add_high_score(
                &self,
                time_taken: &str,
                move_count: u32,
                score: i32,
                difficulty: Difficulty,
            ) -> Result<(), StoreError> {
                (**self).add_high_score(time_taken, move_count, score, difficulty)
            }

            fn remove_high_score(&self, entry: &HighScore) -> Result<(), StoreError> {
                (**self).remove_high_score(entry)
            }

            fn high_scores(&self) -> Vec<HighScore> {
                (**self).high_scores()
            }

            fn win_count(&self) -> u32 {
                (**self).win_count()
            }

            fn save_game(&self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
                (**self).save_game(snapshot)
            }

            fn load_game(&self) -> Result<Option<GameSnapshot>, StoreError> {
                (**self).load_game()
            }

            fn clear_saved_game(&self) -> Result<(), StoreError> {
                (**self).clear_saved_game()
            }
        }
    )*};
}

forward_persistence!(&T, Box<T>, Rc<T>, Arc<T>);

/// A store that accepts and discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl Persistence for NullStore {
    fn add_high_score(&self, _: &str, _: u32, _: i32, _: Difficulty) -> Result<(), StoreError> {
        Ok(())
    }

    fn remove_high_score(&self, _: &HighScore) -> Result<(), StoreError> {
        Ok(())
    }

    fn high_scores(&self) -> Vec<HighScore> {
        Vec::new()
    }

    fn win_count(&self) -> u32 {
        0
    }

    fn save_game(&self, _: &GameSnapshot) -> Result<(), StoreError> {
        Ok(())
    }

    fn load_game(&self) -> Result<Option<GameSnapshot>, StoreError> {
        Ok(None)
    }

    fn clear_saved_game(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

struct Records {
    limit: usize,
    high_scores: Signal<Vec<HighScore>>,
    wins: Signal<u32>,
    saved: Option<GameSnapshot>,
}

/// An in-memory store.
///
/// Keeps the best `limit` entries by score; an entry that ties an existing
/// score ranks below it. Every recorded game counts as a win even when its
/// score does not make the table.
///
/// Subscribers are called with the store locked and must not call back
/// into the store.
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    /// Creates an empty store keeping 15 entries.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limit(DEFAULT_HIGH_SCORE_LIMIT)
    }

    /// Creates an empty store keeping `limit` entries.
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            records: Mutex::new(Records {
                limit,
                high_scores: Signal::new(Vec::new()),
                wins: Signal::new(0),
                saved: None,
            }),
        }
    }

    /// Returns the number of entries kept.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.records.with(|records| records.limit)
    }

    /// Returns `true` if a game is saved.
    #[must_use]
    pub fn has_saved_game(&self) -> bool {
        self.records.with(|records| records.saved.is_some())
    }

    /// Subscribes to high-score table changes.
    pub fn subscribe_high_scores(
        &self,
        callback: impl FnMut(&Vec<HighScore>) + 'static,
    ) -> SubscriptionId {
        self.records
            .with(|records| records.high_scores.subscribe(callback))
    }

    /// Subscribes to win count changes.
    pub fn subscribe_win_count(&self, callback: impl FnMut(&u32) + 'static) -> SubscriptionId {
        self.records.with(|records| records.wins.subscribe(callback))
    }

    /// Removes a subscription made through either `subscribe_*` method.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.records.with(|records| {
            records.high_scores.unsubscribe(id) | records.wins.unsubscribe(id)
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.records.with(|records| {
            f.debug_struct("MemoryStore")
                .field("limit", &records.limit)
                .field("high_scores", records.high_scores.get())
                .field("wins", records.wins.get())
                .field("saved", &records.saved.is_some())
                .finish()
        })
    }
}

impl Persistence for MemoryStore {
    fn add_high_score(
        &self,
        time_taken: &str,
        move_count: u32,
        score: i32,
        difficulty: Difficulty,
    ) -> Result<(), StoreError> {
        let entry = HighScore {
            time_taken: time_taken.into(),
            move_count,
            score,
            difficulty,
        };

        self.records.with(|records| {
            let mut table = records.high_scores.get().clone();
            let at = table.partition_point(|existing| existing.score >= entry.score);
            table.insert(at, entry);
            table.truncate(records.limit);
            records.high_scores.set(table);

            let wins = records.wins.get().saturating_add(1);
            records.wins.set(wins);
        });

        Ok(())
    }

    fn remove_high_score(&self, entry: &HighScore) -> Result<(), StoreError> {
        self.records.with(|records| {
            let mut table = records.high_scores.get().clone();
            let at = table
                .iter()
                .position(|existing| existing == entry)
                .ok_or(StoreError::NotFound)?;
            table.remove(at);
            records.high_scores.set(table);
            Ok(())
        })
    }

    fn high_scores(&self) -> Vec<HighScore> {
        self.records.with(|records| records.high_scores.get().clone())
    }

    fn win_count(&self) -> u32 {
        self.records.with(|records| *records.wins.get())
    }

    fn save_game(&self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        self.records
            .with(|records| records.saved = Some(snapshot.clone()));
        Ok(())
    }

    fn load_game(&self) -> Result<Option<GameSnapshot>, StoreError> {
        Ok(self.records.with(|records| records.saved.clone()))
    }

    fn clear_saved_game(&self) -> Result<(), StoreError> {
        self.records.with(|records| records.saved = None);
        Ok(())
    }
}
