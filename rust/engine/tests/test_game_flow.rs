mod helpers;

use headsup_engine::config::{GameConfig, MAX_STARTING_STACK};
use headsup_engine::engine::{HandOutcome, HandSimulator};
use headsup_engine::logger::{Resolution, Street};
use headsup_engine::player::{Action, Position};
use headsup_engine::strategy::PerturbationContext;
use helpers::{Fixed, Scripted};

const CTX: [PerturbationContext; 2] = [PerturbationContext {
    range_distortion: 0.0,
    action_entropy: 0.0,
    ev_floor: 0.0,
}; 2];

fn sim() -> HandSimulator {
    HandSimulator::new(GameConfig::default()).unwrap()
}

#[test]
fn button_fold_preflop_loses_the_small_blind() {
    let mut p0 = Fixed::always(Action::Fold);
    let mut p1 = Fixed::always(Action::Fold);
    let r = sim().play_hand(&mut p0, &mut p1, &CTX, 0, 0).unwrap();
    assert_eq!(
        r.outcome,
        HandOutcome::Fold {
            winner: 1,
            street: Street::Preflop
        }
    );
    assert_eq!(r.profits, [-50, 50]);
    assert_eq!(r.actions.len(), 1);
    assert!((r.profit_bb(1) - 0.5).abs() < 1e-12);
}

#[test]
fn callers_check_down_to_showdown() {
    let mut p0 = Fixed::always(Action::Call);
    let mut p1 = Fixed::always(Action::Call);
    let r = sim().play_hand(&mut p0, &mut p1, &CTX, 3, 1).unwrap();

    // limp closes preflop, then one check per street
    let streets: Vec<Street> = r.actions.iter().map(|a| a.street).collect();
    assert_eq!(
        streets,
        vec![Street::Preflop, Street::Flop, Street::Turn, Street::River]
    );
    assert_eq!(r.actions[0].resolution, Resolution::Call { amount: 50 });
    assert_eq!(r.actions[0].player, 1);
    assert!(r.actions[1..]
        .iter()
        .all(|a| a.resolution == Resolution::Check && a.player == 0));

    match &r.outcome {
        HandOutcome::Showdown { winners, .. } => match winners.as_slice() {
            [w] => assert_eq!(r.profits[*w], 100),
            _ => assert_eq!(r.profits, [0, 0]),
        },
        other => panic!("expected showdown, got {:?}", other),
    }
}

#[test]
fn observations_reflect_the_acting_seat() {
    let mut p0 = Scripted::new(&[Action::Call]);
    let mut p1 = Scripted::new(&[Action::Raise, Action::Fold]);
    let r = sim().play_hand(&mut p0, &mut p1, &CTX, 0, 1).unwrap();

    let first = &p1.seen[0];
    assert_eq!(first.position, Position::Button);
    assert_eq!(first.to_call, 50);
    assert_eq!(first.pot_size, 150);
    assert!(first.community_cards.is_empty());
    assert_eq!(first.hole_cards, r.deal.hole[1]);

    // button raised 200 to 250; big blind owes 150 into a 350 pot
    let reply = &p0.seen[0];
    assert_eq!(reply.position, Position::BigBlind);
    assert_eq!(reply.to_call, 150);
    assert_eq!(reply.pot_size, 350);

    // big blind called; the flop is bet out of position first
    let flop = &p0.seen[1];
    assert_eq!(flop.street, Street::Flop);
    assert_eq!(flop.community_cards.as_slice(), &r.deal.board[..3]);
    assert_eq!(flop.to_call, 0);
}

#[test]
fn every_hand_is_zero_sum() {
    let mut p0 = Fixed::uniform();
    let mut p1 = Fixed::uniform();
    let results = sim().run_match(&mut p0, &mut p1, &CTX, 300).unwrap();
    let mut total = 0.0;
    for r in &results {
        assert_eq!(r.profits[0] + r.profits[1], 0);
        assert_eq!(r.final_stacks[0] as u64 + r.final_stacks[1] as u64, 40_000);
        total += r.profit_bb(0) + r.profit_bb(1);
    }
    assert!(total.abs() < 1e-4);
}

#[test]
fn replaying_a_hand_is_deterministic() {
    let s = sim();
    assert_eq!(s.deal(17).unwrap(), s.deal(17).unwrap());

    let mut a0 = Fixed::uniform();
    let mut a1 = Fixed::uniform();
    let first = s.play_hand(&mut a0, &mut a1, &CTX, 17, 1).unwrap();
    let mut b0 = Fixed::uniform();
    let mut b1 = Fixed::uniform();
    let second = s.play_hand(&mut b0, &mut b1, &CTX, 17, 1).unwrap();
    assert_eq!(first, second);
}

#[test]
fn runaway_pot_aborts_and_refunds() {
    let cfg = GameConfig {
        pot_limit_multiple: 1,
        ..GameConfig::default()
    };
    let s = HandSimulator::new(cfg).unwrap();
    let mut p0 = Fixed::always(Action::Raise);
    let mut p1 = Fixed::always(Action::Raise);
    let r = s.play_hand(&mut p0, &mut p1, &CTX, 0, 0).unwrap();
    assert_eq!(
        r.outcome,
        HandOutcome::Aborted {
            street: Street::Preflop
        }
    );
    assert_eq!(r.profits, [0, 0]);
    assert_eq!(r.final_stacks, [20_000, 20_000]);
}

#[test]
fn raise_war_under_the_limit_ends_all_in() {
    let mut p0 = Fixed::always(Action::Raise);
    let mut p1 = Fixed::always(Action::Raise);
    let r = sim().play_hand(&mut p0, &mut p1, &CTX, 0, 0).unwrap();
    assert!(matches!(r.outcome, HandOutcome::Showdown { .. }));
    assert!(r.profits[0].abs() == 20_000 || r.profits == [0, 0]);
}

#[test]
fn raise_war_at_the_largest_stack_stays_in_range() {
    let cfg = GameConfig {
        starting_stack: MAX_STARTING_STACK,
        ..GameConfig::default()
    };
    let s = HandSimulator::new(cfg).unwrap();
    let mut p0 = Fixed::always(Action::Raise);
    let mut p1 = Fixed::always(Action::Raise);
    let r = s.play_hand(&mut p0, &mut p1, &CTX, 4, 1).unwrap();
    assert!(matches!(r.outcome, HandOutcome::Showdown { .. }));
    assert_eq!(r.profits[0] + r.profits[1], 0);
    assert_eq!(
        r.final_stacks[0] as u64 + r.final_stacks[1] as u64,
        2 * MAX_STARTING_STACK as u64
    );
}

#[test]
fn match_alternates_the_button() {
    let mut p0 = Fixed::always(Action::Fold);
    let mut p1 = Fixed::always(Action::Fold);
    let results = sim().run_match(&mut p0, &mut p1, &CTX, 6).unwrap();
    for (i, r) in results.iter().enumerate() {
        assert_eq!(r.hand_index, i as u64);
        assert_eq!(r.button, i % 2);
        // the button always folds
        assert_eq!(r.profits[r.button], -50);
    }

    let fixed = HandSimulator::new(GameConfig {
        alternate_button: false,
        ..GameConfig::default()
    })
    .unwrap();
    assert_eq!(fixed.button_for(5), 0);
}

#[test]
fn invalid_context_is_rejected() {
    let bad = [
        PerturbationContext {
            action_entropy: 2.0,
            ..PerturbationContext::default()
        },
        PerturbationContext::default(),
    ];
    let mut p0 = Fixed::uniform();
    let mut p1 = Fixed::uniform();
    assert!(sim().play_hand(&mut p0, &mut p1, &bad, 0, 0).is_err());
}
