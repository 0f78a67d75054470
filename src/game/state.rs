//! Move descriptors and engine notifications.

use crate::card::Card;
use crate::foundation::FoundationId;
use crate::result::GameResult;

/// Where a card being moved comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// The draw pile.
    Draw,
    /// The top of a foundation.
    Foundation(FoundationId),
    /// A tableau column, starting at a visible position.
    Field {
        /// Column index, 0..7.
        column: usize,
        /// Index into the column's visible cards.
        position: usize,
    },
}

/// A pile a card can be moved onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// A foundation.
    Foundation(FoundationId),
    /// A tableau column.
    Field(usize),
}

/// Identifies a card picked up by the player and where it came from.
///
/// Moving from a column with a position below the top moves the whole run
/// from that position up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardLocation {
    /// Where the card sits.
    pub source: Source,
    /// The card itself.
    pub card: Card,
}

impl CardLocation {
    /// A card on the draw pile.
    #[must_use]
    pub const fn draw(card: Card) -> Self {
        Self {
            source: Source::Draw,
            card,
        }
    }

    /// The top card of a foundation.
    #[must_use]
    pub const fn foundation(id: FoundationId, card: Card) -> Self {
        Self {
            source: Source::Foundation(id),
            card,
        }
    }

    /// A visible card in a tableau column.
    #[must_use]
    pub const fn field(column: usize, position: usize, card: Card) -> Self {
        Self {
            source: Source::Field { column, position },
            card,
        }
    }
}

/// Result of a draw action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Cards were turned from the deck onto the draw pile.
    Drawn(usize),
    /// The deck was empty; the draw pile went back into it. Carries the
    /// number of cards returned, which is zero if the draw pile was empty.
    Redealt(usize),
}

/// A change to the game, queued for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh deal.
    NewGame,
    /// A saved game was loaded.
    Restored,
    /// Cards were turned onto the draw pile.
    Drawn {
        /// Number of cards turned.
        count: usize,
    },
    /// The draw pile went back into the deck.
    Redealt {
        /// Number of cards recycled.
        count: usize,
    },
    /// Cards moved between piles.
    Moved {
        /// Where the cards came from.
        from: Source,
        /// Where the cards went.
        to: Target,
        /// Number of cards moved.
        cards: usize,
    },
    /// A hidden card was turned over.
    Flipped {
        /// Column index.
        column: usize,
        /// The card now visible.
        card: Card,
    },
    /// The game was won.
    Won(GameResult),
}
