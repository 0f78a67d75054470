//! Error types for engine operations.

use thiserror::Error;

/// Errors that can occur when drawing from the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// The deck has no cards left.
    #[error("deck is empty")]
    Empty,
}

/// Errors that can occur when removing cards from a tableau column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The column has no visible cards.
    #[error("column has no visible cards")]
    EmptyColumn,
    /// The requested run does not start at a visible card.
    #[error("run start {index} is outside the {len} visible cards")]
    IndexOutOfRange {
        /// Requested start position.
        index: usize,
        /// Number of visible cards.
        len: usize,
    },
}

/// Errors reported by a persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing storage could not be reached.
    #[error("storage unavailable")]
    Unavailable,
    /// The requested entry does not exist.
    #[error("entry not found")]
    NotFound,
}

/// Errors that can occur when restoring a saved game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RestoreError {
    /// The snapshot does not hold exactly one full deck.
    #[error("snapshot holds {0} cards")]
    CardCount(usize),
    /// A card appears more than once, or is not a valid card.
    #[error("snapshot holds a duplicate or invalid card")]
    DuplicateCard,
    /// A foundation pile is not an ascending single-suit run from the ace.
    #[error("foundation {0} is out of order")]
    InvalidFoundation(usize),
    /// A column has hidden cards but nothing visible.
    #[error("column {0} has hidden cards but no visible card")]
    EmptyColumnWithHiddenCards(usize),
}

/// Errors that can occur when loading a saved game from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The saved game is not a valid position.
    #[error(transparent)]
    Restore(#[from] RestoreError),
}
