//! Game engine and state management.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::deck::{Deck, DeckListener, default_deck};
use crate::field::{FIELD_COUNT, FieldSlot};
use crate::foundation::{FOUNDATION_COUNT, Foundation, FoundationId};
use crate::observe::{Signal, SubscriptionId};
use crate::options::Settings;
use crate::result::format_time;
#[cfg(feature = "std")]
use crate::stopwatch::SystemClock;
use crate::stopwatch::{Clock, Stopwatch};
use crate::store::Persistence;

mod moves;
mod snapshot;
pub mod state;
mod timer;

pub use moves::{
    SCORE_DRAW_TO_FIELD, SCORE_FIELD_TO_FIELD, SCORE_FOUNDATION_TO_FIELD, SCORE_REDEAL,
    SCORE_TO_FOUNDATION,
};
pub use snapshot::GameSnapshot;
pub use state::{CardLocation, DrawOutcome, GameEvent, Source, Target};

/// A Klondike solitaire engine for one player.
///
/// The game owns the deck, draw pile, tableau and foundations of the current
/// deal, plus the clock and score. Moves arrive one at a time from the UI;
/// illegal moves return `false` and leave the game untouched.
///
/// The persistence collaborator `P` receives each won game exactly once and
/// can save and load the deal in progress.
pub struct Game<P: Persistence> {
    /// Undrawn cards.
    deck: Deck,
    /// Cards turned from the deck; the last one is on top.
    draw_pile: Vec<Card>,
    /// Tableau columns.
    fields: [FieldSlot; FIELD_COUNT],
    /// Foundation piles.
    foundations: [Foundation; FOUNDATION_COUNT],
    /// Current score. May go negative.
    score: i32,
    /// Successful moves this deal.
    moves: u32,
    /// Whether the win of this deal has been reported.
    win_reported: bool,
    /// Player settings.
    settings: Signal<Settings>,
    /// Game clock.
    stopwatch: Stopwatch,
    /// Persistence collaborator.
    store: P,
    /// Changes not yet taken by the UI.
    events: Vec<GameEvent>,
    /// Shuffle source for every deal.
    rng: ChaCha8Rng,
}

impl<P: Persistence> Game<P> {
    /// Creates a game timed by the wall clock and deals the first hand.
    ///
    /// # Example
    ///
    /// ```
    /// use klrs::{Game, MemoryStore, Settings};
    ///
    /// let game = Game::new(Settings::default(), MemoryStore::new(), 42);
    /// assert_eq!(game.deck().size(), 24);
    /// ```
    #[cfg(feature = "std")]
    #[must_use]
    pub fn new(settings: Settings, store: P, seed: u64) -> Self {
        Self::with_clock(settings, store, seed, Box::new(SystemClock::new()))
    }

    /// Creates a game timed by `clock` and deals the first hand.
    ///
    /// The seed fixes every shuffle of the session, so two games built with
    /// the same seed deal the same hands.
    #[must_use]
    pub fn with_clock(settings: Settings, store: P, seed: u64, clock: Box<dyn Clock>) -> Self {
        let mut game = Self {
            deck: Deck::new(),
            draw_pile: Vec::new(),
            fields: Default::default(),
            foundations: Default::default(),
            score: 0,
            moves: 0,
            win_reported: false,
            stopwatch: Stopwatch::new(clock, settings.tick_interval),
            settings: Signal::new(settings),
            store,
            events: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        game.new_game();
        game
    }

    /// Deals a fresh game.
    ///
    /// Resets score, moves and clock, shuffles a full deck, deals `i` hidden
    /// cards and one visible card to column `i`, and starts the clock.
    pub fn new_game(&mut self) {
        self.score = 0;
        self.moves = 0;
        self.win_reported = false;

        self.deck.replace_cards(default_deck());
        self.deck.shuffle_with(&mut self.rng);
        self.draw_pile.clear();
        for foundation in &mut self.foundations {
            foundation.clear();
        }

        // Column i takes i + 1 cards, 28 in all, so a full deck never runs
        // dry here.
        for (i, slot) in self.fields.iter_mut().enumerate() {
            slot.clear();
            let dealt = slot.setup(i, &mut self.deck);
            debug_assert!(dealt.is_ok(), "column {i} dealt from a short deck");
        }

        self.stopwatch.reset();
        self.stopwatch.start();
        self.events.push(GameEvent::NewGame);
        log::info!("new game dealt, {} cards in the deck", self.deck.size());
    }

    /// Attaches an instrumentation listener to the deck.
    pub fn set_deck_listener(&mut self, listener: Option<Box<dyn DeckListener>>) {
        self.deck.set_listener(listener);
    }

    /// Returns the undrawn cards.
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the draw pile, top card last.
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    /// Returns the top card of the draw pile.
    pub fn draw_top(&self) -> Option<Card> {
        self.draw_pile.last().copied()
    }

    /// Returns a tableau column.
    pub fn field(&self, column: usize) -> Option<&FieldSlot> {
        self.fields.get(column)
    }

    /// Returns every tableau column.
    pub const fn fields(&self) -> &[FieldSlot; FIELD_COUNT] {
        &self.fields
    }

    /// Returns a foundation pile.
    pub const fn foundation(&self, id: FoundationId) -> &Foundation {
        &self.foundations[id.index()]
    }

    /// Returns every foundation pile.
    pub const fn foundations(&self) -> &[Foundation; FOUNDATION_COUNT] {
        &self.foundations
    }

    /// Returns the score.
    pub const fn score(&self) -> i32 {
        self.score
    }

    /// Returns the number of successful moves.
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Returns the time on the clock.
    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }

    /// Returns the time on the clock as `m:ss` or `h:mm:ss`.
    pub fn time_text(&self) -> String {
        format_time(self.elapsed())
    }

    /// Returns `true` if every foundation has a king on top.
    ///
    /// Computed from the piles on each call.
    pub fn has_won(&self) -> bool {
        self.foundations.iter().all(Foundation::is_complete)
    }

    /// Returns the current settings.
    pub fn settings(&self) -> Settings {
        *self.settings.get()
    }

    /// Replaces the settings and notifies settings subscribers.
    ///
    /// A new draw amount applies from the next draw; a new tick interval
    /// applies to the running clock immediately.
    pub fn set_settings(&mut self, settings: Settings) {
        self.stopwatch.set_interval(settings.tick_interval);
        if self.settings.replace(settings) {
            log::debug!("settings changed: {settings:?}");
        }
    }

    /// Subscribes to settings changes.
    pub fn subscribe_settings(
        &mut self,
        callback: impl FnMut(&Settings) + 'static,
    ) -> SubscriptionId {
        self.settings.subscribe(callback)
    }

    /// Removes a settings subscription.
    pub fn unsubscribe_settings(&mut self, id: SubscriptionId) -> bool {
        self.settings.unsubscribe(id)
    }

    /// Returns the persistence collaborator.
    pub const fn store(&self) -> &P {
        &self.store
    }

    /// Returns the game clock.
    pub const fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    /// Returns the game clock for subscribing to ticks.
    pub const fn stopwatch_mut(&mut self) -> &mut Stopwatch {
        &mut self.stopwatch
    }

    /// Takes the queued changes, oldest first.
    ///
    /// The queue grows until it is drained, so a UI should call this after
    /// every action it forwards.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    /// Returns the location of the draw pile's top card.
    pub fn draw_location(&self) -> Option<CardLocation> {
        self.draw_top().map(CardLocation::draw)
    }

    /// Returns the location of a column's top card.
    pub fn field_top_location(&self, column: usize) -> Option<CardLocation> {
        let slot = self.fields.get(column)?;
        let card = slot.last_card()?;
        Some(CardLocation::field(column, slot.face_up().len() - 1, card))
    }

    /// Returns the location of the visible card at `position` in a column.
    pub fn field_location(&self, column: usize, position: usize) -> Option<CardLocation> {
        let card = *self.fields.get(column)?.face_up().get(position)?;
        Some(CardLocation::field(column, position, card))
    }

    /// Returns the location of a foundation's top card.
    pub fn foundation_location(&self, id: FoundationId) -> Option<CardLocation> {
        self.foundation(id)
            .top()
            .map(|card| CardLocation::foundation(id, card))
    }
}
