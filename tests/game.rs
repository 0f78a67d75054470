//! Game integration tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use klrs::{
    Card, CardLocation, DECK_SIZE, Difficulty, DrawOutcome, FieldSlot, Foundation, FoundationId,
    Game, GameEvent, GameSnapshot, LoadError, ManualClock, MemoryStore, Persistence,
    RestoreError, Settings, Source, StopwatchState, Suit, Target, default_deck,
};

type TestGame = Game<Rc<MemoryStore>>;

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

fn foundation_id(index: usize) -> FoundationId {
    FoundationId::new(index).unwrap()
}

struct Table {
    game: TestGame,
    store: Rc<MemoryStore>,
    clock: ManualClock,
}

fn table(seed: u64) -> Table {
    let store = Rc::new(MemoryStore::new());
    let clock = ManualClock::new();
    let game = Game::with_clock(
        Settings::default(),
        store.clone(),
        seed,
        Box::new(clock.clone()),
    );
    Table { game, store, clock }
}

/// Builds a snapshot from the given piles and puts every other card in the
/// deck.
fn position(
    draw_pile: &[Card],
    fields: &[(usize, &[Card], &[Card])],
    foundations: &[(usize, &[Card])],
) -> GameSnapshot {
    let mut snapshot = GameSnapshot {
        draw_pile: draw_pile.to_vec(),
        ..GameSnapshot::default()
    };
    for &(column, face_down, face_up) in fields {
        snapshot.fields[column] = FieldSlot::from_parts(face_down.to_vec(), face_up.to_vec());
    }
    for &(index, cards) in foundations {
        snapshot.foundations[index] = Foundation::from_cards(cards.to_vec());
    }

    let used: Vec<Card> = snapshot.cards().copied().collect();
    snapshot.deck = default_deck()
        .into_iter()
        .filter(|c| !used.contains(c))
        .collect();
    snapshot
}

fn table_at(snapshot: GameSnapshot) -> Table {
    let mut table = table(0);
    table.game.restore(snapshot).unwrap();
    table.game.take_events();
    table
}

fn suit_run(suit: Suit, up_to: u8) -> Vec<Card> {
    (1..=up_to).map(|rank| card(suit, rank)).collect()
}

fn total_cards(game: &TestGame) -> usize {
    game.snapshot().cards().count()
}

#[test]
fn new_game_deals_seven_columns() {
    let Table { game, .. } = table(42);

    assert_eq!(game.deck().size(), 24);
    for (i, slot) in game.fields().iter().enumerate() {
        assert_eq!(slot.face_down_size(), i);
        assert_eq!(slot.face_up().len(), 1);
    }
    assert_eq!(total_cards(&game), DECK_SIZE);
    assert!(game.snapshot().validate().is_ok());
}

#[test]
fn draw_three_then_redeal() {
    let Table { mut game, .. } = table(1);

    assert_eq!(game.draw(), DrawOutcome::Drawn(3));
    assert_eq!(game.draw_pile().len(), 3);
    assert_eq!(game.deck().size(), 21);
    let first_batch = game.draw_pile().to_vec();

    for _ in 0..7 {
        assert_eq!(game.draw(), DrawOutcome::Drawn(3));
    }
    assert!(game.deck().is_empty());
    assert_eq!(game.draw_pile().len(), 24);

    assert_eq!(game.draw(), DrawOutcome::Redealt(24));
    assert_eq!(game.deck().size(), 24);
    assert!(game.draw_pile().is_empty());
    assert_eq!(game.score(), -10);
    assert_eq!(game.moves(), 0);

    game.draw();
    assert_eq!(game.draw_pile(), first_batch.as_slice());
    assert_eq!(total_cards(&game), DECK_SIZE);
}

#[test]
fn short_batch_takes_what_is_left() {
    let Table { mut game, .. } = table(2);

    for _ in 0..4 {
        assert_eq!(game.draw_amount(5), DrawOutcome::Drawn(5));
    }
    assert_eq!(game.draw_amount(5), DrawOutcome::Drawn(4));
    assert!(game.deck().is_empty());
}

#[test]
fn redeal_with_nothing_to_return_still_costs_ten() {
    let king = card(Suit::Spades, 13);
    let Table { mut game, .. } = table_at(position(
        &[],
        &[(0, &[], &[king])],
        &[
            (0, &suit_run(Suit::Clubs, 13)),
            (1, &suit_run(Suit::Diamonds, 13)),
            (2, &suit_run(Suit::Hearts, 13)),
            (3, &suit_run(Suit::Spades, 12)),
        ],
    ));
    assert!(game.deck().is_empty());

    assert_eq!(game.draw(), DrawOutcome::Redealt(0));
    assert_eq!(game.score(), -10);
    assert_eq!(game.moves(), 0);
    assert_eq!(game.take_events(), [GameEvent::Redealt { count: 0 }]);

    assert_eq!(game.draw(), DrawOutcome::Redealt(0));
    assert_eq!(game.score(), -20);
}

#[test]
fn restoring_a_finished_table_reports_the_win() {
    let Table {
        mut game, store, ..
    } = table(0);
    game.take_events();
    let finished = position(
        &[],
        &[],
        &[
            (0, &suit_run(Suit::Clubs, 13)),
            (1, &suit_run(Suit::Diamonds, 13)),
            (2, &suit_run(Suit::Hearts, 13)),
            (3, &suit_run(Suit::Spades, 13)),
        ],
    );

    game.restore(finished.clone()).unwrap();
    assert!(game.has_won());
    assert!(game.win_reported());
    assert_eq!(game.stopwatch().state(), StopwatchState::Paused);
    assert_eq!(store.win_count(), 1);
    let events = game.take_events();
    assert_eq!(events[0], GameEvent::Restored);
    assert!(matches!(events.as_slice(), [_, GameEvent::Won(_)]));

    // A snapshot that already reported its win is not reported again.
    game.restore(GameSnapshot {
        won: true,
        ..finished
    })
    .unwrap();
    assert_eq!(store.win_count(), 1);
    assert_eq!(game.take_events(), [GameEvent::Restored]);
}

#[test]
fn draw_follows_the_draw_amount_setting() {
    let Table { mut game, .. } = table(3);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    game.subscribe_settings(move |settings| sink.borrow_mut().push(settings.draw_amount));

    game.set_settings(Settings::default().with_draw_amount(1));
    assert_eq!(game.draw(), DrawOutcome::Drawn(1));
    assert_eq!(*seen.borrow(), [1]);
}

#[test]
fn only_a_king_takes_an_empty_column() {
    let queen = card(Suit::Clubs, 12);
    let king = card(Suit::Diamonds, 13);
    let Table { mut game, .. } = table_at(position(&[king, queen], &[], &[]));

    assert!(!game.field_place(CardLocation::draw(queen), 0));
    assert!(game.field(0).unwrap().is_empty());
    assert_eq!(game.moves(), 0);

    // Draw pile cards are matched by value, not position.
    assert!(game.field_place(CardLocation::draw(king), 0));
    assert_eq!(game.field(0).unwrap().face_up(), &[king]);
    assert_eq!(game.draw_pile(), &[queen]);
    assert_eq!(game.score(), 5);
    assert_eq!(game.moves(), 1);
}

#[test]
fn foundation_builds_up_in_suit() {
    let ace = card(Suit::Hearts, 1);
    let two = card(Suit::Hearts, 2);
    let two_spades = card(Suit::Spades, 2);
    let Table { mut game, .. } =
        table_at(position(&[two, ace], &[(0, &[], &[two_spades])], &[]));
    let f = foundation_id(0);

    assert!(game.foundation_place(CardLocation::draw(ace), f));
    assert_eq!(game.score(), 10);
    assert_eq!(game.moves(), 1);

    assert!(game.foundation_place(CardLocation::draw(two), f));
    assert_eq!(game.foundation(f).cards(), &[ace, two]);

    let spade = game.field_top_location(0).unwrap();
    assert!(!game.foundation_place(spade, f));
    assert_eq!(game.score(), 20);
    assert_eq!(game.moves(), 2);
}

#[test]
fn foundation_rejects_non_aces_when_empty() {
    let two = card(Suit::Hearts, 2);
    let Table { mut game, .. } = table_at(position(&[two], &[], &[]));

    assert!(!game.foundation_place(CardLocation::draw(two), foundation_id(2)));
    assert_eq!(game.draw_pile(), &[two]);
}

#[test]
fn run_moves_together_and_uncovers_a_card() {
    let hidden = card(Suit::Diamonds, 3);
    let run = [
        card(Suit::Spades, 9),
        card(Suit::Hearts, 8),
        card(Suit::Clubs, 7),
    ];
    let ten = card(Suit::Hearts, 10);
    let Table { mut game, .. } =
        table_at(position(&[], &[(0, &[hidden], &run), (1, &[], &[ten])], &[]));

    let from = game.field_location(0, 0).unwrap();
    assert!(game.field_place(from, 1));

    assert_eq!(
        game.field(1).unwrap().face_up(),
        &[ten, run[0], run[1], run[2]]
    );
    assert_eq!(game.field(0).unwrap().face_up(), &[hidden]);
    assert_eq!(game.field(0).unwrap().face_down_size(), 0);
    assert_eq!(game.score(), 3);

    assert_eq!(
        game.take_events(),
        [
            GameEvent::Moved {
                from: Source::Field {
                    column: 0,
                    position: 0
                },
                to: Target::Field(1),
                cards: 3,
            },
            GameEvent::Flipped {
                column: 0,
                card: hidden,
            },
        ]
    );
}

#[test]
fn partial_run_leaves_the_rest() {
    let cards = [
        card(Suit::Spades, 9),
        card(Suit::Hearts, 8),
        card(Suit::Clubs, 7),
    ];
    let nine = card(Suit::Clubs, 9);
    let Table { mut game, .. } =
        table_at(position(&[], &[(0, &[], &cards), (1, &[], &[nine])], &[]));

    let from = game.field_location(0, 1).unwrap();
    assert!(game.field_place(from, 1));
    assert_eq!(game.field(0).unwrap().face_up(), &[cards[0]]);
    assert_eq!(game.field(1).unwrap().face_up(), &[nine, cards[1], cards[2]]);
}

#[test]
fn illegal_or_stale_moves_change_nothing() {
    let seven = card(Suit::Clubs, 7);
    let eight = card(Suit::Spades, 8);
    let five = card(Suit::Hearts, 5);
    let Table { mut game, .. } = table_at(position(
        &[seven],
        &[(0, &[], &[eight]), (1, &[], &[five])],
        &[],
    ));
    let before = game.snapshot();

    // Same color.
    assert!(!game.field_place(CardLocation::draw(seven), 0));
    // Card not on the draw pile.
    assert!(!game.field_place(CardLocation::draw(card(Suit::Hearts, 7)), 0));
    // Wrong position for the card.
    assert!(!game.field_place(CardLocation::field(1, 3, five), 0));
    // Same column.
    let top = game.field_top_location(0).unwrap();
    assert!(!game.field_place(top, 0));
    // No such column.
    assert!(!game.field_place(top, 7));

    assert_eq!(game.snapshot(), before);
    assert!(game.take_events().is_empty());
}

#[test]
fn taking_back_from_a_foundation_costs_ten() {
    let ace = card(Suit::Spades, 1);
    let two = card(Suit::Spades, 2);
    let three = card(Suit::Hearts, 3);
    let Table { mut game, .. } = table_at(position(
        &[],
        &[(0, &[], &[three])],
        &[(1, &[ace, two])],
    ));

    let back = game.foundation_location(foundation_id(1)).unwrap();
    assert!(game.field_place(back, 0));
    assert_eq!(game.field(0).unwrap().face_up(), &[three, two]);
    assert_eq!(game.foundation(foundation_id(1)).cards(), &[ace]);
    assert_eq!(game.score(), -10);

    let up = game.field_top_location(0).unwrap();
    assert!(game.foundation_place(up, foundation_id(1)));
    assert_eq!(game.score(), 0);
    assert_eq!(game.moves(), 2);
}

#[test]
fn auto_move_is_a_single_greedy_pass() {
    let club_ace = card(Suit::Clubs, 1);
    let diamond_ace = card(Suit::Diamonds, 1);
    let diamond_two = card(Suit::Diamonds, 2);
    let Table { mut game, .. } = table_at(position(
        &[club_ace],
        &[(2, &[diamond_two], &[diamond_ace])],
        &[],
    ));

    assert_eq!(game.auto_move(), 2);
    assert_eq!(game.foundation(foundation_id(0)).cards(), &[club_ace]);
    assert_eq!(game.foundation(foundation_id(1)).cards(), &[diamond_ace]);
    // Uncovered by the pass, not tried again.
    assert_eq!(game.field(2).unwrap().face_up(), &[diamond_two]);

    assert_eq!(game.auto_move(), 1);
    assert_eq!(
        game.foundation(foundation_id(1)).cards(),
        &[diamond_ace, diamond_two]
    );
    assert_eq!(game.score(), 30);
}

#[test]
fn win_is_reported_exactly_once() {
    let king = card(Suit::Spades, 13);
    let Table {
        mut game,
        store,
        clock,
    } = table_at(position(
        &[],
        &[(4, &[], &[king])],
        &[
            (0, &suit_run(Suit::Clubs, 13)),
            (1, &suit_run(Suit::Diamonds, 13)),
            (2, &suit_run(Suit::Hearts, 13)),
            (3, &suit_run(Suit::Spades, 12)),
        ],
    ));
    clock.advance(Duration::from_secs(65));
    assert!(!game.has_won());

    let top = game.field_top_location(4).unwrap();
    assert!(game.foundation_place(top, foundation_id(3)));

    assert!(game.has_won());
    assert!(game.has_won());
    assert_eq!(game.stopwatch().state(), StopwatchState::Paused);
    assert_eq!(store.win_count(), 1);

    let scores = store.high_scores();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].time_taken, "1:05");
    assert_eq!(scores[0].move_count, 1);
    assert_eq!(scores[0].score, 10);
    assert_eq!(scores[0].difficulty, Difficulty::Normal);

    let events = game.take_events();
    assert!(matches!(events.last(), Some(GameEvent::Won(result)) if result.score == 10));

    // Taking the king back and replaying it is the same win.
    let back = game.foundation_location(foundation_id(3)).unwrap();
    assert!(game.field_place(back, 4));
    let again = game.field_top_location(4).unwrap();
    assert!(game.foundation_place(again, foundation_id(3)));
    assert_eq!(game.auto_move(), 0);
    assert_eq!(store.win_count(), 1);

    game.resume_timer();
    assert_eq!(game.stopwatch().state(), StopwatchState::Paused);
}

#[test]
fn timer_pauses_and_resumes() {
    let Table {
        mut game, clock, ..
    } = table(9);
    clock.advance(Duration::from_secs(5));
    assert_eq!(game.elapsed(), Duration::from_secs(5));
    assert_eq!(game.tick(), Some(Duration::from_secs(5)));

    game.pause_timer();
    clock.advance(Duration::from_secs(30));
    assert_eq!(game.elapsed(), Duration::from_secs(5));
    assert_eq!(game.tick(), None);

    game.resume_timer();
    clock.advance(Duration::from_secs(2));
    assert_eq!(game.time_text(), "0:07");

    game.new_game();
    assert_eq!(game.elapsed(), Duration::ZERO);
    assert_eq!(game.stopwatch().state(), StopwatchState::Running);
}

#[test]
fn save_and_load_round_trip() {
    let Table {
        mut game,
        store,
        clock,
    } = table(4);
    game.draw();
    game.auto_move();
    clock.advance(Duration::from_secs(75));
    let saved = game.snapshot();
    assert_eq!(saved.elapsed, Duration::from_secs(75));
    game.save().unwrap();
    assert!(store.has_saved_game());

    game.new_game();
    clock.advance(Duration::from_secs(5));
    assert_ne!(game.snapshot().deck, saved.deck);

    assert_eq!(game.load(), Ok(true));
    let loaded = game.snapshot();
    assert_eq!(loaded.deck, saved.deck);
    assert_eq!(loaded.draw_pile, saved.draw_pile);
    assert_eq!(loaded.fields, saved.fields);
    assert_eq!(loaded.foundations, saved.foundations);
    assert_eq!(loaded.score, saved.score);
    assert_eq!(loaded.moves, saved.moves);
    assert_eq!(loaded.elapsed, saved.elapsed);

    clock.advance(Duration::from_secs(1));
    assert_eq!(game.elapsed(), Duration::from_secs(76));
    assert_eq!(game.time_text(), "1:16");
}

#[test]
fn load_without_a_save_does_nothing() {
    let Table { mut game, .. } = table(4);
    let before = game.snapshot();
    assert_eq!(game.load(), Ok(false));
    assert_eq!(game.snapshot().fields, before.fields);
}

#[test]
fn invalid_snapshots_are_refused() {
    let Table {
        mut game, store, ..
    } = table(6);
    let before = game.snapshot();

    let mut short = before.clone();
    short.deck.pop();
    assert_eq!(game.restore(short), Err(RestoreError::CardCount(51)));

    let mut duplicate = before.clone();
    let first = duplicate.deck[0];
    duplicate.deck[1] = first;
    assert_eq!(game.restore(duplicate), Err(RestoreError::DuplicateCard));

    let disordered = position(&[], &[], &[(2, &[card(Suit::Hearts, 2)])]);
    assert_eq!(
        game.restore(disordered),
        Err(RestoreError::InvalidFoundation(2))
    );

    let hidden_only = position(&[], &[(5, &[card(Suit::Hearts, 2)], &[])], &[]);
    assert_eq!(
        game.restore(hidden_only.clone()),
        Err(RestoreError::EmptyColumnWithHiddenCards(5))
    );

    store.save_game(&hidden_only).unwrap();
    assert_eq!(
        game.load(),
        Err(LoadError::Restore(RestoreError::EmptyColumnWithHiddenCards(5)))
    );
    assert_eq!(game.snapshot().fields, before.fields);
}

#[test]
fn high_score_table_keeps_fifteen() {
    let store = MemoryStore::new();
    for score in 0..20 {
        store
            .add_high_score("2:00", 100, score * 10, Difficulty::Easy)
            .unwrap();
    }
    let table = store.high_scores();
    assert_eq!(table.len(), 15);
    assert!(table.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(table[0].score, 190);
}
