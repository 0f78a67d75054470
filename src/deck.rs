//! The stock: undrawn cards, face down.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, RANKS, Suit};
use crate::error::DeckError;

/// Instrumentation hooks fired when a [`Deck`] changes.
///
/// Every method has a no-op default, so implementors only override what they
/// need. Listeners observe; they never influence the game.
pub trait DeckListener {
    /// Cards were put back into the deck.
    fn on_add(&mut self, cards: &[Card]) {
        let _ = cards;
    }

    /// A card was drawn, leaving `remaining` cards.
    fn on_draw(&mut self, card: Card, remaining: usize) {
        let _ = (card, remaining);
    }

    /// The deck was shuffled.
    fn on_shuffle(&mut self) {}
}

/// Returns all 52 cards, suit-major and rank-minor, unshuffled.
#[must_use]
pub fn default_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);

    for suit in Suit::ALL {
        for rank in 1..=RANKS {
            cards.push(Card::new(suit, rank));
        }
    }

    cards
}

/// An ordered stack of undrawn cards. The last element is the top.
#[derive(Default)]
pub struct Deck {
    cards: Vec<Card>,
    listener: Option<Box<dyn DeckListener>>,
}

impl Deck {
    /// Creates an empty deck.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            listener: None,
        }
    }

    /// Creates a full, unshuffled deck.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_cards(default_deck())
    }

    /// Creates a deck holding `cards`, the last one on top.
    #[must_use]
    pub const fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            listener: None,
        }
    }

    /// Attaches an instrumentation listener.
    #[must_use]
    pub fn with_listener(mut self, listener: Box<dyn DeckListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Replaces or removes the instrumentation listener.
    pub fn set_listener(&mut self, listener: Option<Box<dyn DeckListener>>) {
        self.listener = listener;
    }

    /// Shuffles the deck, deterministically when a seed is given and from
    /// OS entropy otherwise.
    #[cfg(feature = "std")]
    pub fn shuffle(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => self.shuffle_seeded(seed),
            None => self.shuffle_with(&mut ChaCha8Rng::from_os_rng()),
        }
    }

    /// Shuffles the deck with a ChaCha8 generator seeded by `seed`.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        self.shuffle_with(&mut ChaCha8Rng::seed_from_u64(seed));
    }

    /// Shuffles the deck with the given generator.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_shuffle();
        }
    }

    /// Draws the top card.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if the deck has no cards.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        let card = self.cards.pop().ok_or(DeckError::Empty)?;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_draw(card, self.cards.len());
        }
        Ok(card)
    }

    /// Puts a single card on top of the deck.
    pub fn add_card(&mut self, card: Card) {
        self.add_cards(&[card]);
    }

    /// Puts `cards` on top of the deck in order, so the last one ends up on
    /// top. Does not shuffle.
    pub fn add_cards(&mut self, cards: &[Card]) {
        self.cards.extend_from_slice(cards);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_add(cards);
        }
    }

    /// Moves every card of `other` on top of this deck, leaving `other` empty.
    pub fn add_deck(&mut self, other: &mut Self) {
        let cards = core::mem::take(&mut other.cards);
        self.add_cards(&cards);
    }

    /// Returns the top card without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Returns the cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of undrawn cards.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if no cards are left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Replaces the contents without notifying the listener.
    pub fn replace_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    /// Removes every card without notifying the listener.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck")
            .field("cards", &self.cards)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
