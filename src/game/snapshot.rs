//! Saved game snapshots.

use alloc::vec::Vec;
use core::time::Duration;

use crate::card::{Card, DECK_SIZE};
use crate::error::{LoadError, RestoreError, StoreError};
use crate::field::{FIELD_COUNT, FieldSlot};
use crate::foundation::{FOUNDATION_COUNT, Foundation};
use crate::store::Persistence;

use super::Game;
use super::state::GameEvent;

/// Everything needed to resume a game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    /// Undrawn cards, top card last.
    pub deck: Vec<Card>,
    /// Draw pile, top card last.
    pub draw_pile: Vec<Card>,
    /// Tableau columns.
    pub fields: [FieldSlot; FIELD_COUNT],
    /// Foundation piles.
    pub foundations: [Foundation; FOUNDATION_COUNT],
    /// Score.
    pub score: i32,
    /// Successful moves.
    pub moves: u32,
    /// Time on the clock.
    pub elapsed: Duration,
    /// Whether the win has already been reported.
    pub won: bool,
}

impl GameSnapshot {
    /// Iterates over every card in the snapshot.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.deck
            .iter()
            .chain(&self.draw_pile)
            .chain(
                self.fields
                    .iter()
                    .flat_map(|slot| slot.face_down().iter().chain(slot.face_up())),
            )
            .chain(self.foundations.iter().flat_map(Foundation::cards))
    }

    /// Checks that the snapshot is a reachable position: one full deck with
    /// no duplicates, well-formed foundations and no column with hidden
    /// cards but nothing visible.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), RestoreError> {
        let count = self.cards().count();
        if count != DECK_SIZE {
            return Err(RestoreError::CardCount(count));
        }

        let mut seen = [false; DECK_SIZE];
        for card in self.cards() {
            let index = card.deck_index().ok_or(RestoreError::DuplicateCard)?;
            if core::mem::replace(&mut seen[index], true) {
                return Err(RestoreError::DuplicateCard);
            }
        }

        if let Some(i) = self.foundations.iter().position(|f| !f.is_well_formed()) {
            return Err(RestoreError::InvalidFoundation(i));
        }

        if let Some(i) = self.fields.iter().position(FieldSlot::can_flip_face_down_card) {
            return Err(RestoreError::EmptyColumnWithHiddenCards(i));
        }

        Ok(())
    }
}

impl<P: Persistence> Game<P> {
    /// Captures the current game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            deck: self.deck.cards().to_vec(),
            draw_pile: self.draw_pile.clone(),
            fields: self.fields.clone(),
            foundations: self.foundations.clone(),
            score: self.score,
            moves: self.moves,
            elapsed: self.stopwatch.elapsed(),
            won: self.win_reported,
        }
    }

    /// Replaces the current game with `snapshot`.
    ///
    /// The clock resumes from the saved time unless the game was already
    /// won. A finished table whose win was never reported is reported now;
    /// one that was reported is not reported again.
    ///
    /// # Errors
    ///
    /// Returns an error and leaves the current game untouched if the
    /// snapshot fails [`GameSnapshot::validate`].
    pub fn restore(&mut self, snapshot: GameSnapshot) -> Result<(), RestoreError> {
        snapshot.validate()?;

        let GameSnapshot {
            deck,
            draw_pile,
            fields,
            foundations,
            score,
            moves,
            elapsed,
            won,
        } = snapshot;

        self.deck.replace_cards(deck);
        self.draw_pile = draw_pile;
        self.fields = fields;
        self.foundations = foundations;
        self.score = score;
        self.moves = moves;
        self.win_reported = won;

        self.stopwatch.restore(elapsed);
        if !self.has_won() {
            self.stopwatch.start();
        }

        self.events.push(GameEvent::Restored);
        log::info!("restored game at score {score} after {moves} moves");
        self.check_win();
        Ok(())
    }

    /// Saves the current game to the store.
    ///
    /// # Errors
    ///
    /// Returns the store's error.
    pub fn save(&self) -> Result<(), StoreError> {
        self.store.save_game(&self.snapshot())
    }

    /// Loads the saved game from the store, if there is one.
    ///
    /// Returns `false` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the saved game is invalid; the
    /// current game is left untouched.
    pub fn load(&mut self) -> Result<bool, LoadError> {
        let Some(snapshot) = self.store.load_game()? else {
            return Ok(false);
        };
        self.restore(snapshot)?;
        Ok(true)
    }
}
