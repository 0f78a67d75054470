//! Foundation piles.

use alloc::vec::Vec;
use core::fmt;

use crate::card::{ACE, Card, KING};

/// Number of foundation piles.
pub const FOUNDATION_COUNT: usize = 4;

/// Identifies one of the four foundation piles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoundationId(u8);

impl FoundationId {
    /// All foundations in placement order.
    pub const ALL: [Self; FOUNDATION_COUNT] = [Self(0), Self(1), Self(2), Self(3)];

    /// Returns the id for `index`, or `None` if it is not below four.
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index < FOUNDATION_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Returns the pile index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FoundationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "foundation {}", self.0 + 1)
    }
}

/// Returns `true` if `card` may be placed on `pile`.
///
/// An empty pile takes any ace; otherwise the card must follow the top card
/// in the same suit.
#[must_use]
pub fn foundation_check(card: Card, pile: &[Card]) -> bool {
    match pile.last() {
        None => card.rank == ACE,
        Some(top) => card.suit == top.suit && top.rank.checked_add(1) == Some(card.rank),
    }
}

/// A single-suit pile built up from the ace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Foundation {
    cards: Vec<Card>,
}

impl Foundation {
    /// Creates an empty pile.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a pile holding `cards`, ace first. The order is not checked.
    #[must_use]
    pub const fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Returns `true` if `card` may be placed on this pile.
    #[must_use]
    pub fn check(&self, card: Card) -> bool {
        foundation_check(card, &self.cards)
    }

    /// Places a card without checking legality.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Takes the top card back off the pile.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Returns the top card.
    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Returns the cards, ace first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards on the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if the pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns `true` once the king is on top.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.top().is_some_and(|card| card.rank == KING)
    }

    /// Returns `true` if the pile is an ascending single-suit run from the ace.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.cards.iter().enumerate().all(|(i, card)| {
            card.rank as usize == i + 1 && card.suit == self.cards[0].suit
        })
    }

    /// Removes every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    #[test]
    fn empty_pile_takes_only_aces() {
        let pile = Foundation::new();
        assert!(pile.check(Card::new(Suit::Hearts, 1)));
        assert!(pile.check(Card::new(Suit::Spades, 1)));
        assert!(!pile.check(Card::new(Suit::Hearts, 2)));
    }

    #[test]
    fn pile_grows_in_suit() {
        let mut pile = Foundation::new();
        pile.push(Card::new(Suit::Hearts, 1));
        assert!(pile.check(Card::new(Suit::Hearts, 2)));
        assert!(!pile.check(Card::new(Suit::Diamonds, 2)));
        assert!(!pile.check(Card::new(Suit::Hearts, 3)));
        assert!(pile.is_well_formed());
    }

    #[test]
    fn complete_pile_ends_in_king() {
        let mut pile = Foundation::new();
        for rank in 1..=13 {
            assert!(!pile.is_complete());
            pile.push(Card::new(Suit::Clubs, rank));
        }
        assert!(pile.is_complete());
        assert!(pile.is_well_formed());
    }

    #[test]
    fn ids_are_bounded() {
        assert_eq!(FoundationId::new(3).map(FoundationId::index), Some(3));
        assert_eq!(FoundationId::new(4), None);
    }
}
