//! A Klondike solitaire rules engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that owns one deal: the deck, the draw
//! pile, seven tableau columns and four foundations, together with score,
//! move count and a pausable clock. Rendering and input stay with the host;
//! it forwards moves, drains [`GameEvent`]s and plugs in a [`Persistence`]
//! backend for high scores and saved games.
//!
//! # Example
//!
//! ```
//! use klrs::{Game, MemoryStore, Settings};
//!
//! let mut game = Game::new(Settings::default(), MemoryStore::new(), 42);
//! game.draw();
//! game.auto_move();
//! assert!(!game.has_won());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod field;
pub mod foundation;
pub mod game;
pub mod observe;
pub mod options;
pub mod result;
pub mod stopwatch;
pub mod store;
mod sync;

// Re-export main types
pub use card::{Card, Color, DECK_SIZE, Suit};
pub use deck::{Deck, DeckListener, default_deck};
pub use error::{DeckError, FieldError, LoadError, RestoreError, StoreError};
pub use field::{FIELD_COUNT, FieldSlot};
pub use foundation::{FOUNDATION_COUNT, Foundation, FoundationId, foundation_check};
pub use game::{CardLocation, DrawOutcome, Game, GameEvent, GameSnapshot, Source, Target};
pub use observe::{Signal, SubscriptionId};
pub use options::{Difficulty, Settings};
pub use result::GameResult;
#[cfg(feature = "std")]
pub use stopwatch::SystemClock;
pub use stopwatch::{Clock, ManualClock, Stopwatch, StopwatchState};
pub use store::{HighScore, MemoryStore, NullStore, Persistence};
