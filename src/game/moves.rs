//! Draws, card placement and scoring.

use alloc::vec::Vec;

use crate::card::Card;
use crate::field::FIELD_COUNT;
use crate::foundation::FoundationId;
use crate::store::Persistence;

use super::Game;
use super::state::{CardLocation, DrawOutcome, GameEvent, Source, Target};

/// Score for placing any card on a foundation.
pub const SCORE_TO_FOUNDATION: i32 = 10;
/// Score for moving a card from the draw pile to a column.
pub const SCORE_DRAW_TO_FIELD: i32 = 5;
/// Score for moving a run between columns.
pub const SCORE_FIELD_TO_FIELD: i32 = 3;
/// Score for taking a card back off a foundation.
pub const SCORE_FOUNDATION_TO_FIELD: i32 = -10;
/// Score for turning the draw pile back into the deck.
pub const SCORE_REDEAL: i32 = -10;

impl<P: Persistence> Game<P> {
    /// Draws as many cards as the settings ask for.
    ///
    /// See [`Game::draw_amount`].
    pub fn draw(&mut self) -> DrawOutcome {
        let amount = self.settings.get().draw_amount;
        self.draw_amount(usize::from(amount))
    }

    /// Turns up to `amount` cards from the deck onto the draw pile.
    ///
    /// If the deck is already empty the draw pile goes back into the deck
    /// instead, unshuffled, so the deck replays in the same order, and the
    /// score drops by 10. The penalty applies even when the draw pile is
    /// empty too. Draws and redeals do not count as moves.
    pub fn draw_amount(&mut self, amount: usize) -> DrawOutcome {
        if !self.deck.is_empty() {
            let mut count = 0;
            for _ in 0..amount {
                // The batch may run the deck dry; the rest of it is skipped.
                let Ok(card) = self.deck.draw() else {
                    break;
                };
                self.draw_pile.push(card);
                count += 1;
            }
            log::debug!("drew {count} cards, {} left in the deck", self.deck.size());
            self.events.push(GameEvent::Drawn { count });
            return DrawOutcome::Drawn(count);
        }

        let count = self.draw_pile.len();
        self.draw_pile.reverse();
        self.deck.add_cards(&self.draw_pile);
        self.draw_pile.clear();
        self.score += SCORE_REDEAL;
        log::debug!("redealt {count} cards, score {}", self.score);
        self.events.push(GameEvent::Redealt { count });
        DrawOutcome::Redealt(count)
    }

    /// Moves the card at `location` onto a foundation.
    ///
    /// Returns `false` and changes nothing if the card may not go there or
    /// `location` does not describe a card that can be picked up on its own.
    pub fn foundation_place(&mut self, location: CardLocation, target: FoundationId) -> bool {
        let to = Target::Foundation(target);
        if !self.foundations[target.index()].check(location.card)
            || !self.is_single_card(location, to)
        {
            return false;
        }

        let Some(lifted) = self.lift(location) else {
            return false;
        };
        for &card in &lifted.cards {
            self.foundations[target.index()].push(card);
        }

        self.finish_move(location.source, to, &lifted, SCORE_TO_FOUNDATION);
        true
    }

    /// Moves the card at `location` onto a column, together with every card
    /// above it when it comes from another column.
    ///
    /// Returns `false` and changes nothing if the move is not legal.
    pub fn field_place(&mut self, location: CardLocation, column: usize) -> bool {
        if column >= FIELD_COUNT {
            return false;
        }
        let to = Target::Field(column);

        let delta = match location.source {
            Source::Field {
                column: from,
                position,
            } => {
                if from == column || !self.is_run_start(location) {
                    return false;
                }
                let run = &self.fields[from].face_up()[position..];
                if !self.fields[column].check_to_add_run(run) {
                    return false;
                }
                SCORE_FIELD_TO_FIELD
            }
            Source::Draw | Source::Foundation(_) => {
                if !self.fields[column].check_to_add(location.card)
                    || !self.is_single_card(location, to)
                {
                    return false;
                }
                if location.source == Source::Draw {
                    SCORE_DRAW_TO_FIELD
                } else {
                    SCORE_FOUNDATION_TO_FIELD
                }
            }
        };

        let Some(lifted) = self.lift(location) else {
            return false;
        };
        self.fields[column].add_cards(&lifted.cards);

        self.finish_move(location.source, to, &lifted, delta);
        true
    }

    /// Sends whatever can go to a foundation there, in one greedy pass.
    ///
    /// First the draw pile's top card, then the top card of each column in
    /// order; each card goes to the first foundation that takes it. Cards
    /// uncovered by the pass are not tried again. Returns the number of
    /// cards moved.
    pub fn auto_move(&mut self) -> usize {
        let mut moved = 0;

        if let Some(location) = self.draw_location() {
            if self.place_on_any_foundation(location) {
                moved += 1;
            }
        }

        for column in 0..FIELD_COUNT {
            if let Some(location) = self.field_top_location(column) {
                if self.place_on_any_foundation(location) {
                    moved += 1;
                }
            }
        }

        if moved > 0 {
            log::debug!("auto move placed {moved} cards");
        }
        moved
    }

    fn place_on_any_foundation(&mut self, location: CardLocation) -> bool {
        FoundationId::ALL
            .into_iter()
            .any(|id| self.foundation_place(location, id))
    }

    /// Checks that `location` names a card that can leave its pile alone.
    fn is_single_card(&self, location: CardLocation, target: Target) -> bool {
        match location.source {
            Source::Draw => self.draw_pile.contains(&location.card),
            Source::Foundation(id) => {
                target != Target::Foundation(id)
                    && self.foundation(id).top() == Some(location.card)
            }
            Source::Field { column, position } => {
                target != Target::Field(column)
                    && self.fields.get(column).is_some_and(|slot| {
                        slot.last_card() == Some(location.card)
                            && position + 1 == slot.face_up().len()
                    })
            }
        }
    }

    /// Checks that `location` names a visible card in a column.
    fn is_run_start(&self, location: CardLocation) -> bool {
        let Source::Field { column, position } = location.source else {
            return false;
        };
        self.fields
            .get(column)
            .and_then(|slot| slot.face_up().get(position))
            == Some(&location.card)
    }

    /// Removes validated cards from their source: one card from the draw
    /// pile or a foundation, the run from `position` up from a column.
    fn lift(&mut self, location: CardLocation) -> Option<Lifted> {
        let cards = match location.source {
            Source::Draw => {
                let at = self
                    .draw_pile
                    .iter()
                    .rposition(|card| *card == location.card)?;
                alloc::vec![self.draw_pile.remove(at)]
            }
            Source::Foundation(id) => alloc::vec![self.foundations[id.index()].pop()?],
            Source::Field { column, position } => {
                let slot = &mut self.fields[column];
                let hidden = slot.face_down_size();
                let cards = match slot.remove_cards(position) {
                    Ok(cards) => cards,
                    Err(err) => {
                        log::error!("removal from column {column} failed: {err}");
                        return None;
                    }
                };
                let flipped = if slot.face_down_size() < hidden {
                    slot.last_card().map(|card| (column, card))
                } else {
                    None
                };
                return Some(Lifted { cards, flipped });
            }
        };
        Some(Lifted {
            cards,
            flipped: None,
        })
    }

    fn finish_move(&mut self, from: Source, to: Target, lifted: &Lifted, delta: i32) {
        self.score += delta;
        self.moves += 1;
        let cards = lifted.cards.len();
        log::debug!(
            "moved {cards} card(s) {from:?} -> {to:?}, score {}, moves {}",
            self.score,
            self.moves
        );
        self.events.push(GameEvent::Moved { from, to, cards });

        if let Some((column, card)) = lifted.flipped {
            self.events.push(GameEvent::Flipped { column, card });
        }
        self.check_win();
    }
}

/// Cards taken off their source pile by a move.
struct Lifted {
    cards: Vec<Card>,
    /// Column and card turned over by the removal.
    flipped: Option<(usize, Card)>,
}
