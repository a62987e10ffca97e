mod helpers;

use helpers::{h, honor_filler, m, p, s, seat, table, table_with_wall, triple, Seating};
use majiang_engine::claims::{ClaimKind, ClaimStatus};
use majiang_engine::errors::GameError;
use majiang_engine::game::{Game, GameState, Outcome};
use majiang_engine::logger::Action;
use majiang_engine::player::{MeldKind, Seat};
use majiang_engine::tiles::TILE_COUNT;

// East discards its picked 3m in every scenario below.

fn east() -> Seating {
    seat(Seat::East, honor_filler(), Some(m(3, 0)))
}

/// Holds 1m 2m: may chow the 3m.
fn south_chow() -> Seating {
    let mut hand = vec![m(1, 0), m(2, 0)];
    for rank in 1..=3 {
        hand.extend(triple(s, rank));
    }
    hand.extend([h(6, 0), h(7, 0)]);
    seat(Seat::South, hand, None)
}

/// No characters at all.
fn south_plain() -> Seating {
    let mut hand = Vec::new();
    for rank in 1..=3 {
        hand.extend(triple(s, rank));
    }
    hand.extend([s(7, 0), s(8, 0), p(7, 0), p(8, 0)]);
    seat(Seat::South, hand, None)
}

/// 4m 5m plus three pung and a pair: wins on 3m.
fn west_winner() -> Seating {
    let mut hand = vec![m(4, 0), m(5, 0)];
    for rank in 1..=3 {
        hand.extend(triple(p, rank));
    }
    hand.extend([s(9, 0), s(9, 1)]);
    seat(Seat::West, hand, None)
}

/// Holds `copies` extra 3m.
fn north_with_threes(copies: u8) -> Seating {
    let mut hand: Vec<_> = (1..=copies).map(|c| m(3, c)).collect();
    for rank in 4..=6 {
        hand.extend(triple(s, rank));
    }
    hand.push(h(5, 1));
    if copies == 2 {
        hand.push(h(6, 1));
    }
    seat(Seat::North, hand, None)
}

fn north_plain() -> Seating {
    let mut hand = Vec::new();
    for rank in 4..=6 {
        hand.extend(triple(s, rank));
    }
    hand.extend(triple(p, 5));
    hand.push(h(5, 1));
    seat(Seat::North, hand, None)
}

fn claim_kinds(game: &Game) -> Vec<(Seat, ClaimKind)> {
    game.pending_claims()
        .entries()
        .iter()
        .map(|c| (c.seat, c.kind))
        .collect()
}

#[test]
fn discard_opens_claims_in_priority_order() {
    let mut game = table(
        vec![east(), south_chow(), west_winner(), north_with_threes(2)],
        Seat::East,
    );
    game.discard(Seat::East, m(3, 0)).unwrap();

    assert_eq!(game.state(), GameState::WaitingPass);
    assert_eq!(game.latest_tile(), Some(m(3, 0)));
    assert_eq!(game.discards(Seat::East), &[m(3, 0)]);
    assert_eq!(
        claim_kinds(&game),
        vec![
            (Seat::West, ClaimKind::Hu),
            (Seat::North, ClaimKind::Peng),
            (Seat::South, ClaimKind::Chi),
        ]
    );
}

#[test]
fn hu_beats_chi_end_to_end() {
    let mut game = table(
        vec![east(), south_chow(), west_winner(), north_plain()],
        Seat::East,
    );
    game.discard(Seat::East, m(3, 0)).unwrap();

    game.chi(Seat::South, [m(1, 0), m(2, 0)]).unwrap();
    assert_eq!(game.state(), GameState::WaitingPass);
    assert_eq!(
        game.pending_claims().entries()[1].status,
        ClaimStatus::Accepting
    );

    game.hu(Seat::West).unwrap();
    assert_eq!(game.state(), GameState::End);
    assert_eq!(
        game.outcome(),
        Some(Outcome::DiscardWin {
            seat: Seat::West,
            tile: m(3, 0),
            from: Seat::East
        })
    );
    assert!(game.player(Seat::South).unwrap().opened().is_empty());
    assert_eq!(game.current(), Some(Seat::East));
}

#[test]
fn chi_fires_once_the_winner_passes() {
    let mut game = table(
        vec![east(), south_chow(), west_winner(), north_plain()],
        Seat::East,
    );
    game.discard(Seat::East, m(3, 0)).unwrap();
    game.chi(Seat::South, [m(1, 0), m(2, 0)]).unwrap();
    game.pass(Seat::West).unwrap();

    assert_eq!(game.state(), GameState::WaitingAction);
    assert_eq!(game.current(), Some(Seat::South));
    assert_eq!(game.latest_tile(), None);
    assert!(game.pending_claims().is_empty());
    assert!(game.discards(Seat::East).is_empty());

    let south = game.player(Seat::South).unwrap();
    let set = &south.opened()[0];
    assert_eq!(set.kind, MeldKind::Chi);
    assert_eq!(set.tiles, vec![m(1, 0), m(2, 0), m(3, 0)]);
    assert_eq!(set.target, Some(m(3, 0)));
    assert_eq!(set.from, Seat::East);
    assert_eq!(south.hand().len(), 11);
    assert_eq!(south.picked(), None);
    assert_eq!(game.accounted_tiles().len(), TILE_COUNT);
}

#[test]
fn priority_class_dominates_arrival_order() {
    let outcome_for = |calls: &[(Seat, Action)]| {
        let mut game = table(
            vec![east(), south_chow(), west_winner(), north_with_threes(2)],
            Seat::East,
        );
        game.discard(Seat::East, m(3, 0)).unwrap();
        for (seat, action) in calls {
            game.apply(*seat, action).unwrap();
        }
        game.outcome()
    };

    let peng_first = outcome_for(&[
        (Seat::North, Action::Peng([m(3, 1), m(3, 2)])),
        (Seat::South, Action::Chi([m(1, 0), m(2, 0)])),
        (Seat::West, Action::Hu),
    ]);
    let hu_first = outcome_for(&[(Seat::West, Action::Hu)]);

    let expected = Some(Outcome::DiscardWin {
        seat: Seat::West,
        tile: m(3, 0),
        from: Seat::East,
    });
    assert_eq!(peng_first, expected);
    assert_eq!(hu_first, expected);
}

#[test]
fn peng_beats_chi_when_winner_passes() {
    let mut game = table(
        vec![east(), south_chow(), west_winner(), north_with_threes(2)],
        Seat::East,
    );
    game.discard(Seat::East, m(3, 0)).unwrap();
    game.chi(Seat::South, [m(1, 0), m(2, 0)]).unwrap();
    game.peng(Seat::North, [m(3, 1), m(3, 2)]).unwrap();
    game.pass(Seat::West).unwrap();

    assert_eq!(game.current(), Some(Seat::North));
    assert_eq!(
        game.player(Seat::North).unwrap().opened()[0].kind,
        MeldKind::Peng
    );
    assert!(game.player(Seat::South).unwrap().opened().is_empty());
}

#[test]
fn pass_is_idempotent_and_ignored_for_the_discarder() {
    let mut game = table(
        vec![east(), south_chow(), west_winner(), north_plain()],
        Seat::East,
    );
    game.discard(Seat::East, m(3, 0)).unwrap();

    let before = game.snapshot();
    game.pass(Seat::East).unwrap();
    assert_eq!(game.snapshot(), before);

    game.pass(Seat::South).unwrap();
    let once = game.snapshot();
    game.pass(Seat::South).unwrap();
    assert_eq!(game.snapshot(), once);
    assert_eq!(game.state(), GameState::WaitingPass);
}

#[test]
fn all_passed_moves_turn_and_draws_from_live_wall() {
    let mut game = table(
        vec![east(), south_chow(), west_winner(), north_plain()],
        Seat::East,
    );
    let next_live = game.walls().peek_live(game.live_cursor());
    let remaining = game.tiles_remaining();

    game.discard(Seat::East, m(3, 0)).unwrap();
    game.pass(Seat::West).unwrap();
    game.pass(Seat::South).unwrap();

    assert_eq!(game.state(), GameState::WaitingAction);
    assert_eq!(game.current(), Some(Seat::South));
    assert_eq!(game.player(Seat::South).unwrap().picked(), next_live);
    assert_eq!(game.tiles_remaining(), remaining - 1);
    assert_eq!(game.latest_tile(), None);
    // the unclaimed tile stays on the pile
    assert_eq!(game.discards(Seat::East), &[m(3, 0)]);
}

#[test]
fn chow_is_offered_to_the_next_seat_only() {
    let mut north = vec![m(1, 0), m(2, 0)];
    for rank in 4..=6 {
        north.extend(triple(s, rank));
    }
    north.extend([h(5, 1), h(6, 1)]);
    let mut game = table(
        vec![east(), south_plain(), seat(Seat::North, north, None)],
        Seat::East,
    );

    game.discard(Seat::East, m(3, 0)).unwrap();
    // nobody can claim, so the turn moved on at once
    assert_eq!(game.state(), GameState::WaitingAction);
    assert_eq!(game.current(), Some(Seat::South));
}

#[test]
fn gang_claim_draws_a_replacement() {
    let mut game = table(
        vec![east(), south_chow(), north_with_threes(3)],
        Seat::East,
    );
    game.discard(Seat::East, m(3, 0)).unwrap();
    assert_eq!(
        claim_kinds(&game),
        vec![(Seat::North, ClaimKind::Gang), (Seat::South, ClaimKind::Chi)]
    );
    let replacement = game.walls().peek_dead(game.dead_cursor());

    game.gang(Seat::North, [m(3, 1), m(3, 2), m(3, 3)]).unwrap();

    let north = game.player(Seat::North).unwrap();
    assert_eq!(game.current(), Some(Seat::North));
    assert_eq!(game.state(), GameState::WaitingAction);
    assert_eq!(north.opened()[0].kind, MeldKind::Gang);
    assert_eq!(north.opened()[0].tiles.len(), 4);
    assert_eq!(north.picked(), replacement);
    assert_eq!(north.concealed_len(), 11);
    assert_eq!(game.accounted_tiles().len(), TILE_COUNT);
}

#[test]
fn gang_entry_also_takes_a_peng_call() {
    let mut game = table(
        vec![east(), south_chow(), north_with_threes(3)],
        Seat::East,
    );
    game.discard(Seat::East, m(3, 0)).unwrap();
    game.peng(Seat::North, [m(3, 1), m(3, 3)]).unwrap();

    let north = game.player(Seat::North).unwrap();
    assert_eq!(north.opened()[0].kind, MeldKind::Peng);
    assert_eq!(north.picked(), None);
    assert!(north.holds(m(3, 2)));
}

#[test]
fn rejected_claims_leave_the_game_untouched() {
    let mut game = table(
        vec![east(), south_chow(), west_winner(), north_plain()],
        Seat::East,
    );
    game.discard(Seat::East, m(3, 0)).unwrap();
    let before = game.snapshot();

    assert!(matches!(
        game.chi(Seat::West, [m(4, 0), m(5, 0)]),
        Err(GameError::IllegalSet(_))
    ));
    assert!(matches!(
        game.chi(Seat::South, [m(1, 0), s(1, 0)]),
        Err(GameError::IllegalSet(_))
    ));
    assert_eq!(
        game.chi(Seat::South, [m(1, 1), m(2, 0)]),
        Err(GameError::TileNotInHand {
            seat: Seat::South,
            tile: m(1, 1)
        })
    );
    assert!(matches!(
        game.discard(Seat::South, m(1, 0)),
        Err(GameError::WrongState { .. })
    ));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn concealed_kong_stays_in_waiting_action() {
    let mut hand: Vec<_> = (0..4).map(|c| h(1, c)).collect();
    for rank in 2..=4 {
        hand.extend(triple(h, rank));
    }
    let mut game = table(vec![seat(Seat::East, hand, Some(m(3, 0)))], Seat::East);
    let replacement = game.walls().peek_dead(game.dead_cursor());

    game.angang(Seat::East, [h(1, 0), h(1, 1), h(1, 2), h(1, 3)])
        .unwrap();

    let east = game.player(Seat::East).unwrap();
    assert_eq!(game.state(), GameState::WaitingAction);
    assert_eq!(game.current(), Some(Seat::East));
    assert_eq!(east.opened()[0].kind, MeldKind::ConcealedGang);
    assert_eq!(east.opened()[0].target, None);
    assert_eq!(east.hand().len(), 10);
    assert!(east.holds(m(3, 0)));
    assert_eq!(east.picked(), replacement);
}

#[test]
fn concealed_kong_may_use_the_picked_tile() {
    let mut hand = Vec::new();
    for rank in 1..=4 {
        hand.extend(triple(h, rank));
    }
    hand.push(m(3, 0));
    let mut game = table(vec![seat(Seat::East, hand, Some(h(1, 3)))], Seat::East);

    game.angang(Seat::East, [h(1, 0), h(1, 1), h(1, 2), h(1, 3)])
        .unwrap();
    let east = game.player(Seat::East).unwrap();
    assert_eq!(east.hand().len(), 10);
    assert!(east.picked().is_some());

    let err = game.angang(Seat::East, [h(2, 0), h(2, 1), h(2, 2), m(3, 0)]);
    assert!(matches!(err, Err(GameError::IllegalSet(_))));
}

#[test]
fn self_drawn_win_ends_the_hand() {
    // 111 234 567 888 9m, drawing the second 9m
    let mut hand = triple(m, 1);
    hand.extend((2..=7).map(|r| m(r, 0)));
    hand.extend(triple(m, 8));
    hand.push(m(9, 0));
    let mut game = table(vec![seat(Seat::East, hand, Some(m(9, 1)))], Seat::East);

    game.self_draw_win(Seat::East).unwrap();
    assert_eq!(game.state(), GameState::End);
    assert_eq!(
        game.outcome(),
        Some(Outcome::SelfDrawnWin {
            seat: Seat::East,
            tile: Some(m(9, 1))
        })
    );
    assert_eq!(game.history().len(), 1);
}

#[test]
fn self_drawn_win_requires_a_winning_hand() {
    let mut game = table(vec![east(), south_plain()], Seat::East);
    assert_eq!(
        game.self_draw_win(Seat::East),
        Err(GameError::CannotWin { seat: Seat::East })
    );
    assert_eq!(
        game.self_draw_win(Seat::South),
        Err(GameError::NotYourTurn { seat: Seat::South })
    );
    assert_eq!(
        game.self_draw_win(Seat::West),
        Err(GameError::EmptySeat(Seat::West))
    );
    assert_eq!(game.state(), GameState::WaitingAction);
}

#[test]
fn empty_wall_ends_in_exhaustion() {
    let mut game = table_with_wall(vec![east(), south_plain()], Seat::East, Vec::new());
    game.discard(Seat::East, m(3, 0)).unwrap();

    assert_eq!(game.state(), GameState::End);
    assert_eq!(game.outcome(), Some(Outcome::Exhausted));
    assert!(matches!(
        game.discard(Seat::South, s(1, 0)),
        Err(GameError::WrongState {
            state: GameState::End,
            ..
        })
    ));
}

#[test]
fn history_records_only_accepted_commands() {
    let mut game = table(
        vec![east(), south_chow(), west_winner(), north_plain()],
        Seat::East,
    );
    game.apply(Seat::East, &Action::Discard(m(3, 0))).unwrap();
    game.apply(Seat::East, &Action::Pass).unwrap();
    let _ = game.apply(Seat::West, &Action::Chi([m(4, 0), m(5, 0)]));
    game.apply(Seat::West, &Action::Pass).unwrap();
    game.apply(Seat::South, &Action::Pass).unwrap();

    let seats: Vec<_> = game.history().iter().map(|r| r.seat).collect();
    assert_eq!(seats, vec![Seat::East, Seat::West, Seat::South]);
    assert_eq!(game.history()[0].action, Action::Discard(m(3, 0)));
}
