mod helpers;

use headsup_engine::config::GameConfig;
use headsup_engine::game::BettingState;
use headsup_engine::logger::Resolution;
use headsup_engine::player::Action;
use helpers::cards;

fn hole() -> [[headsup_engine::cards::Card; 2]; 2] {
    let c = cards("As Ad Kc Kh");
    [[c[0], c[1]], [c[2], c[3]]]
}

#[test]
fn short_call_refunds_the_uncovered_raise() {
    let cfg = GameConfig::default();
    let mut s = BettingState::with_stacks(&cfg, 0, hole(), [20_000, 150]);
    assert_eq!(s.total_chips(), 20_150);

    assert_eq!(s.apply(Action::Raise), Resolution::Raise { amount: 200 });
    assert_eq!(s.wagers(), [250, 100]);
    assert_eq!(s.stacks(), [19_750, 50]);

    assert_eq!(
        s.apply(Action::Call),
        Resolution::AllInCall {
            amount: 50,
            refund: 100
        }
    );
    assert_eq!(s.wagers(), [150, 150]);
    assert_eq!(s.stacks(), [19_850, 0]);
    assert_eq!(s.pot(), 300);
    assert_eq!(s.total_chips(), 20_150);
}

#[test]
fn short_raise_is_played_as_an_all_in_call() {
    let cfg = GameConfig::default();
    let mut s = BettingState::with_stacks(&cfg, 0, hole(), [20_000, 150]);
    s.apply(Action::Raise);
    // cannot exceed the 150 owed with 50 behind
    let r = s.apply(Action::Raise);
    assert!(matches!(r, Resolution::AllInCall { refund: 100, .. }));
    assert_eq!(s.wagers()[0], s.wagers()[1]);
}

#[test]
fn blind_larger_than_stack_posts_what_is_left() {
    let cfg = GameConfig::default();
    let s = BettingState::with_stacks(&cfg, 1, hole(), [60, 20_000]);
    // seat 0 is the big blind but only has 60
    assert_eq!(s.wagers(), [60, 50]);
    assert_eq!(s.stacks(), [0, 19_950]);
    assert_eq!(s.pot(), 110);
}

#[test]
fn chips_are_conserved_through_a_full_showdown() {
    let cfg = GameConfig::default();
    let mut s = BettingState::with_stacks(&cfg, 0, hole(), [20_000, 150]);
    s.apply(Action::Raise);
    s.apply(Action::Call);
    let board = cards("2c 7d 9h Js 3c");
    s.advance_street(&board[..3]);
    s.advance_street(&board[3..4]);
    s.advance_street(&board[4..5]);
    let (_, winners) = s.showdown().unwrap();
    // aces hold
    assert_eq!(winners, vec![0]);
    assert_eq!(s.stacks(), [20_150, 0]);
    assert_eq!(s.pot(), 0);
    assert_eq!(s.total_chips(), 20_150);
}
