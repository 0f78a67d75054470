//! Randomized play checks for the table invariants.

use klrs::{FoundationId, Game, ManualClock, NullStore, Settings};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    Draw,
    AutoMove,
    DrawToFoundation(usize),
    DrawToField(usize),
    FieldToFoundation(usize, usize),
    FieldToField(usize, usize, usize),
    FoundationToField(usize, usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        2 => Just(Action::Draw),
        1 => Just(Action::AutoMove),
        1 => (0..4usize).prop_map(Action::DrawToFoundation),
        2 => (0..7usize).prop_map(Action::DrawToField),
        2 => (0..7usize, 0..4usize).prop_map(|(c, f)| Action::FieldToFoundation(c, f)),
        3 => (0..7usize, 0..13usize, 0..7usize)
            .prop_map(|(c, p, t)| Action::FieldToField(c, p, t)),
        1 => (0..4usize, 0..7usize).prop_map(|(f, c)| Action::FoundationToField(f, c)),
    ]
}

fn foundation(index: usize) -> FoundationId {
    FoundationId::new(index).unwrap()
}

/// Applies `action` and returns how many moves it made.
fn apply(game: &mut Game<NullStore>, action: &Action) -> u32 {
    let placed = match *action {
        Action::Draw => {
            game.draw();
            false
        }
        Action::AutoMove => return game.auto_move() as u32,
        Action::DrawToFoundation(f) => game
            .draw_location()
            .is_some_and(|loc| game.foundation_place(loc, foundation(f))),
        Action::DrawToField(c) => game
            .draw_location()
            .is_some_and(|loc| game.field_place(loc, c)),
        Action::FieldToFoundation(c, f) => game
            .field_top_location(c)
            .is_some_and(|loc| game.foundation_place(loc, foundation(f))),
        Action::FieldToField(c, p, t) => {
            let visible = game.field(c).map_or(0, |slot| slot.face_up().len());
            visible > 0
                && game
                    .field_location(c, p % visible)
                    .is_some_and(|loc| game.field_place(loc, t))
        }
        Action::FoundationToField(f, c) => game
            .foundation_location(foundation(f))
            .is_some_and(|loc| game.field_place(loc, c)),
    };
    u32::from(placed)
}

proptest! {
    #[test]
    fn table_stays_consistent(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..300),
    ) {
        let mut game = Game::with_clock(
            Settings::default(),
            NullStore,
            seed,
            Box::new(ManualClock::new()),
        );

        for action in &actions {
            let moves = game.moves();
            let made = apply(&mut game, action);
            prop_assert_eq!(game.moves(), moves + made);

            let snapshot = game.snapshot();
            prop_assert_eq!(snapshot.validate(), Ok(()));
            for slot in game.fields() {
                prop_assert!(slot.face_down_size() == 0 || !slot.face_up().is_empty());
            }
            prop_assert_eq!(game.has_won(), game.has_won());
        }
    }

    #[test]
    fn draw_cycle_conserves_the_stock(seed in any::<u64>(), amount in 1usize..6) {
        let mut game = Game::with_clock(
            Settings::default(),
            NullStore,
            seed,
            Box::new(ManualClock::new()),
        );
        let stock = game.deck().size();

        while !game.deck().is_empty() {
            game.draw_amount(amount);
        }
        prop_assert_eq!(game.draw_pile().len(), stock);

        game.draw_amount(amount);
        prop_assert_eq!(game.deck().size(), stock);
        prop_assert!(game.draw_pile().is_empty());
        prop_assert_eq!(game.score(), -10);
    }
}
