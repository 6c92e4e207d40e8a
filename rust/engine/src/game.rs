use rand::Rng;
use tracing::{debug, warn};

use crate::cards::Card;
use crate::config::GameConfig;
use crate::hand::{evaluate_holding, HandScore};
use crate::logger::{ActionRecord, Resolution, Street};
use crate::player::{Action, Position};
use crate::rules::resolve_action;
use crate::strategy::{ActionDistribution, Observation, PerturbationContext, Strategy};

/// How a betting round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RoundEnd {
    /// Wagers matched after at least one action.
    Closed,
    /// A player folded; the pot has already been awarded.
    Folded { winner: usize },
    /// The pot passed the configured limit.
    PotLimitExceeded,
}

/// Chip and card state of one heads-up hand.
///
/// Built fresh for every hand with both stacks at the starting stack and
/// the blinds posted. Only the owning simulator mutates it.
#[derive(Debug, Clone)]
pub struct BettingState {
    stacks: [u32; 2],
    pot: u32,
    street: Street,
    /// Chips put in by each seat on the current street.
    wagers: [u32; 2],
    board: Vec<Card>,
    hole_cards: [[Card; 2]; 2],
    folded: bool,
    active: usize,
    hand_complete: bool,
    button: usize,
    initial_stacks: [u32; 2],
    big_blind: u32,
    pot_limit: u64,
}

impl BettingState {
    /// Posts blinds: the button posts the small blind and acts first preflop.
    pub fn new(config: &GameConfig, button: usize, hole_cards: [[Card; 2]; 2]) -> Self {
        Self::with_stacks(config, button, hole_cards, [config.starting_stack; 2])
    }

    /// Like [`BettingState::new`] but with explicit, possibly unequal, stacks.
    /// A stack smaller than its blind posts what it has. The two stacks
    /// together must fit in a `u32`.
    pub fn with_stacks(
        config: &GameConfig,
        button: usize,
        hole_cards: [[Card; 2]; 2],
        stacks: [u32; 2],
    ) -> Self {
        let button = button % 2;
        let bb_seat = 1 - button;
        let initial_stacks = stacks;
        let mut stacks = stacks;
        let mut wagers = [0; 2];
        let sb = config.small_blind.min(stacks[button]);
        stacks[button] -= sb;
        wagers[button] = sb;
        let bb = config.big_blind.min(stacks[bb_seat]);
        stacks[bb_seat] -= bb;
        wagers[bb_seat] = bb;
        Self {
            stacks,
            pot: sb + bb,
            street: Street::Preflop,
            wagers,
            board: Vec::with_capacity(5),
            hole_cards,
            folded: false,
            active: button,
            hand_complete: false,
            button,
            initial_stacks,
            big_blind: config.big_blind,
            pot_limit: config.pot_limit(),
        }
    }

    pub fn stacks(&self) -> [u32; 2] {
        self.stacks
    }
    pub fn pot(&self) -> u32 {
        self.pot
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn wagers(&self) -> [u32; 2] {
        self.wagers
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn hole_cards(&self) -> [[Card; 2]; 2] {
        self.hole_cards
    }
    pub fn folded(&self) -> bool {
        self.folded
    }
    pub fn active_player(&self) -> usize {
        self.active
    }
    pub fn is_hand_complete(&self) -> bool {
        self.hand_complete
    }
    pub fn button(&self) -> usize {
        self.button
    }
    pub fn initial_stacks(&self) -> [u32; 2] {
        self.initial_stacks
    }

    pub fn to_call(&self, seat: usize) -> u32 {
        self.wagers[1 - seat].saturating_sub(self.wagers[seat])
    }

    /// Chips on the table and in the pot. Constant for the whole hand.
    pub fn total_chips(&self) -> u64 {
        self.stacks[0] as u64 + self.stacks[1] as u64 + self.pot as u64
    }

    pub fn observation(&self, seat: usize) -> Observation {
        Observation {
            hole_cards: self.hole_cards[seat],
            community_cards: self.board.clone(),
            position: Position::of(seat, self.button),
            pot_size: self.pot,
            stack_size: self.stacks[seat],
            to_call: self.to_call(seat),
            street: self.street,
            valid_actions: &Action::ALL,
            big_blind: self.big_blind,
        }
    }

    /// Applies `action` for the active player and passes the turn.
    ///
    /// A fold ends the hand and pays the pot to the opponent. A short call
    /// pulls the opponent's uncovered wager back out of the pot so both
    /// seats have committed the same amount.
    pub fn apply(&mut self, action: Action) -> Resolution {
        let seat = self.active;
        let opp = 1 - seat;
        let resolution = resolve_action(action, self.stacks[seat], self.to_call(seat), self.pot);
        match resolution {
            Resolution::Fold => {
                self.folded = true;
                self.hand_complete = true;
                self.stacks[opp] += self.pot;
                self.pot = 0;
            }
            Resolution::Check => {}
            Resolution::Call { amount } | Resolution::Raise { amount } => {
                self.commit(seat, amount);
            }
            Resolution::AllInCall { amount, refund } => {
                self.wagers[opp] -= refund;
                self.stacks[opp] += refund;
                self.pot -= refund;
                self.commit(seat, amount);
            }
        }
        self.active = opp;
        resolution
    }

    fn commit(&mut self, seat: usize, amount: u32) {
        self.stacks[seat] -= amount;
        self.wagers[seat] += amount;
        self.pot += amount;
    }

    /// Moves to the next street, revealing `cards` and clearing wagers.
    /// The out-of-position seat acts first after the flop.
    pub fn advance_street(&mut self, cards: &[Card]) -> Option<Street> {
        let next = self.street.next()?;
        self.street = next;
        self.wagers = [0; 2];
        self.board.extend_from_slice(cards);
        self.active = 1 - self.button;
        Some(next)
    }

    /// Runs betting on the current street until it closes.
    ///
    /// Each turn the active seat's strategy is asked for weights, which are
    /// normalized and sampled with `rng`. The round closes once wagers are
    /// equal and someone has acted, so check-check and bet-call both end it.
    pub fn run_street<R: Rng + ?Sized>(
        &mut self,
        seats: &mut [&mut dyn Strategy; 2],
        contexts: &[PerturbationContext; 2],
        rng: &mut R,
        history: &mut Vec<ActionRecord>,
    ) -> RoundEnd {
        let mut acted = false;
        loop {
            if acted && self.wagers[0] == self.wagers[1] {
                return RoundEnd::Closed;
            }
            let seat = self.active;
            let observation = self.observation(seat);
            let weights = seats[seat].action_weights(&observation, &contexts[seat]);
            let action = ActionDistribution::from_weights(weights, observation.valid_actions)
                .sample(rng);
            let resolution = self.apply(action);
            debug!(
                seat,
                street = ?self.street,
                ?action,
                ?resolution,
                pot = self.pot,
                "action applied"
            );
            history.push(ActionRecord {
                player: seat,
                street: self.street,
                action,
                resolution,
            });
            if self.folded {
                return RoundEnd::Folded { winner: 1 - seat };
            }
            acted = true;
            if self.pot as u64 > self.pot_limit {
                warn!(
                    pot = self.pot,
                    limit = self.pot_limit,
                    "pot limit exceeded, aborting hand"
                );
                return RoundEnd::PotLimitExceeded;
            }
        }
    }

    /// Hand scores for both seats. Requires the full board.
    pub fn scores(&self) -> Option<[HandScore; 2]> {
        let board: &[Card; 5] = self.board.as_slice().try_into().ok()?;
        Some([
            evaluate_holding(self.hole_cards[0], board),
            evaluate_holding(self.hole_cards[1], board),
        ])
    }

    /// Awards the pot to the better hand. A tie splits it, with an odd chip
    /// going to the out-of-position seat. Returns the winning seats.
    pub fn showdown(&mut self) -> Option<([HandScore; 2], Vec<usize>)> {
        let scores = self.scores()?;
        let winners = match scores[0].cmp(&scores[1]) {
            std::cmp::Ordering::Greater => vec![0],
            std::cmp::Ordering::Less => vec![1],
            std::cmp::Ordering::Equal => vec![0, 1],
        };
        if let [w] = winners.as_slice() {
            self.stacks[*w] += self.pot;
        } else {
            let oop = 1 - self.button;
            let half = self.pot / 2;
            self.stacks[self.button] += half;
            self.stacks[oop] += self.pot - half;
        }
        self.pot = 0;
        self.hand_complete = true;
        Some((scores, winners))
    }

    /// Returns every committed chip to its owner, used when a hand is aborted.
    pub fn refund_all(&mut self) {
        self.stacks = self.initial_stacks;
        self.pot = 0;
        self.wagers = [0; 2];
        self.hand_complete = true;
    }
}
