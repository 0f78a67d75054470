//! Tableau columns.

use alloc::vec::Vec;

use crate::card::{Card, KING};
use crate::deck::Deck;
use crate::error::{DeckError, FieldError};

/// Number of tableau columns.
pub const FIELD_COUNT: usize = 7;

/// One of the seven tableau columns.
///
/// A column holds hidden cards under a run of visible cards. Whenever the
/// visible run is emptied by a removal and hidden cards remain, the top
/// hidden card is turned over before the removal returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSlot {
    /// Hidden cards; the last one is turned over first.
    face_down: Vec<Card>,
    /// Visible cards; the last one is the top.
    face_up: Vec<Card>,
}

/// Returns `true` if `card` may be placed on a column whose top visible card
/// is `top`.
#[must_use]
pub fn can_stack(top: Option<Card>, card: Card) -> bool {
    match top {
        None => card.rank == KING,
        Some(top) => card.color() != top.color() && top.rank.checked_sub(1) == Some(card.rank),
    }
}

impl FieldSlot {
    /// Creates an empty column.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            face_down: Vec::new(),
            face_up: Vec::new(),
        }
    }

    /// Creates a column from its hidden and visible cards.
    #[must_use]
    pub const fn from_parts(face_down: Vec<Card>, face_up: Vec<Card>) -> Self {
        Self { face_down, face_up }
    }

    /// Deals `num_face_down` hidden cards and then one visible card.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if the deck runs out. Cards drawn before
    /// the failure stay in the column.
    pub fn setup(&mut self, num_face_down: usize, deck: &mut Deck) -> Result<(), DeckError> {
        for _ in 0..num_face_down {
            self.face_down.push(deck.draw()?);
        }
        self.face_up.push(deck.draw()?);
        Ok(())
    }

    /// Returns `true` if `card` may be placed on this column.
    ///
    /// Only a king may start an empty column; otherwise the card must be one
    /// rank below the top card and of the other color.
    #[must_use]
    pub fn check_to_add(&self, card: Card) -> bool {
        if self.face_up.is_empty() && !self.face_down.is_empty() {
            return false;
        }
        can_stack(self.last_card(), card)
    }

    /// Returns `true` if a run may be placed on this column.
    ///
    /// Only the first card is checked; the run is expected to be a visible
    /// suffix of another column and therefore already well formed.
    #[must_use]
    pub fn check_to_add_run(&self, run: &[Card]) -> bool {
        run.first().is_some_and(|&card| self.check_to_add(card))
    }

    /// Appends a visible card without checking legality.
    pub fn add_card(&mut self, card: Card) {
        self.face_up.push(card);
    }

    /// Appends visible cards in order without checking legality.
    pub fn add_cards(&mut self, cards: &[Card]) {
        self.face_up.extend_from_slice(cards);
    }

    /// Removes the top visible card, turning a hidden card over if the
    /// visible run empties.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::EmptyColumn`] if there is no visible card.
    pub fn remove_card(&mut self) -> Result<Card, FieldError> {
        let card = self.face_up.pop().ok_or(FieldError::EmptyColumn)?;
        self.flip_face_down_card();
        Ok(card)
    }

    /// Removes the visible cards from `from_index` to the top, keeping their
    /// order, and turns a hidden card over if the visible run empties.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::EmptyColumn`] if there is no visible card, or
    /// [`FieldError::IndexOutOfRange`] if `from_index` is past the top.
    pub fn remove_cards(&mut self, from_index: usize) -> Result<Vec<Card>, FieldError> {
        let len = self.face_up.len();
        if len == 0 {
            return Err(FieldError::EmptyColumn);
        }
        if from_index >= len {
            return Err(FieldError::IndexOutOfRange {
                index: from_index,
                len,
            });
        }

        let run = self.face_up.split_off(from_index);
        self.flip_face_down_card();
        Ok(run)
    }

    /// Turns the top hidden card over if nothing is visible.
    ///
    /// Returns the card that was turned over, or `None` if nothing changed.
    pub fn flip_face_down_card(&mut self) -> Option<Card> {
        if !self.can_flip_face_down_card() {
            return None;
        }
        let card = self.face_down.pop()?;
        self.face_up.push(card);
        Some(card)
    }

    /// Returns `true` if a hidden card is waiting to be turned over.
    #[must_use]
    pub fn can_flip_face_down_card(&self) -> bool {
        self.face_up.is_empty() && !self.face_down.is_empty()
    }

    /// Returns the number of hidden cards.
    #[must_use]
    pub fn face_down_size(&self) -> usize {
        self.face_down.len()
    }

    /// Returns the top visible card.
    #[must_use]
    pub fn last_card(&self) -> Option<Card> {
        self.face_up.last().copied()
    }

    /// Returns the hidden cards, bottom first.
    #[must_use]
    pub fn face_down(&self) -> &[Card] {
        &self.face_down
    }

    /// Returns the visible cards, bottom first.
    #[must_use]
    pub fn face_up(&self) -> &[Card] {
        &self.face_up
    }

    /// Returns the total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.face_down.len() + self.face_up.len()
    }

    /// Returns `true` if the column holds no cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.face_down.is_empty() && self.face_up.is_empty()
    }

    /// Removes every card.
    pub fn clear(&mut self) {
        self.face_down.clear();
        self.face_up.clear();
    }
}
