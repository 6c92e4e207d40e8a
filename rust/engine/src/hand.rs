use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Bit offset of the category field inside a [`HandScore`].
pub const CATEGORY_SHIFT: u32 = 20;

const RANK_FIELD_BITS: u32 = 4;
const ACE: u8 = 12;
const FIVE: u8 = 3;
const WHEEL_MASK: u16 = (1 << ACE) | 0b1111;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    fn from_bits(v: u32) -> Category {
        match v {
            0 => Category::HighCard,
            1 => Category::OnePair,
            2 => Category::TwoPair,
            3 => Category::ThreeOfAKind,
            4 => Category::Straight,
            5 => Category::Flush,
            6 => Category::FullHouse,
            7 => Category::FourOfAKind,
            _ => Category::StraightFlush,
        }
    }
}

/// Total-ordered strength of a 7-card hand.
///
/// The category sits above [`CATEGORY_SHIFT`]; below it five 4-bit rank
/// fields hold the tiebreak ranks from most to least significant, so plain
/// integer comparison resolves every kicker. Unused fields are zero.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandScore(u32);

impl HandScore {
    fn pack(category: Category, tiebreak: &[u8]) -> HandScore {
        let mut v = (category as u32) << CATEGORY_SHIFT;
        for (i, &r) in tiebreak.iter().take(5).enumerate() {
            v |= (r as u32) << (CATEGORY_SHIFT - RANK_FIELD_BITS * (i as u32 + 1));
        }
        HandScore(v)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn category(self) -> Category {
        Category::from_bits(self.0 >> CATEGORY_SHIFT)
    }

    /// Tiebreak ranks, most significant first.
    pub fn kickers(self) -> [Rank; 5] {
        let mut out = [Rank::Two; 5];
        for (i, k) in out.iter_mut().enumerate() {
            let shift = CATEGORY_SHIFT - RANK_FIELD_BITS * (i as u32 + 1);
            *k = Rank::from_index(((self.0 >> shift) & 0xF) as u8);
        }
        out
    }
}

impl fmt::Debug for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandScore({:?}, {:#x})", self.category(), self.0)
    }
}

/// Scores exactly seven distinct cards.
///
/// # Panics
///
/// Panics if the same card appears twice; a duplicated card would otherwise
/// be ranked as a pair or trips that cannot exist.
///
/// # Examples
///
/// ```
/// use headsup_engine::cards::parse_cards;
/// use headsup_engine::hand::{evaluate, Category, CATEGORY_SHIFT};
///
/// let cards = parse_cards("As Ks Qs Js Ts 2d 3d").unwrap();
/// let score = evaluate(&cards.try_into().unwrap());
/// assert_eq!(score.category(), Category::StraightFlush);
/// assert_eq!(score.value() >> CATEGORY_SHIFT, 8);
/// ```
pub fn evaluate(cards: &[Card; 7]) -> HandScore {
    let mut seen = 0u64;
    let mut rank_counts = [0u8; 13];
    let mut suit_counts = [0u8; 4];
    let mut suit_masks = [0u16; 4];
    let mut rank_mask = 0u16;
    for &c in cards.iter() {
        assert!(seen & c.mask() == 0, "duplicate card {} in hand", c);
        seen |= c.mask();
        let r = c.rank().index();
        let s = c.suit().index() as usize;
        rank_counts[r as usize] += 1;
        suit_counts[s] += 1;
        suit_masks[s] |= 1 << r;
        rank_mask |= 1 << r;
    }

    // At most one suit can reach five of seven cards.
    if let Some(s) = suit_counts.iter().position(|&n| n >= 5) {
        if let Some(high) = straight_high(suit_masks[s]) {
            return HandScore::pack(Category::StraightFlush, &[high]);
        }
        let top: Vec<u8> = ranks_high_to_low(suit_masks[s]).take(5).collect();
        return HandScore::pack(Category::Flush, &top);
    }

    if let Some(high) = straight_high(rank_mask) {
        return HandScore::pack(Category::Straight, &[high]);
    }

    let mut quads = Vec::with_capacity(1);
    let mut trips = Vec::with_capacity(2);
    let mut pairs = Vec::with_capacity(3);
    for r in (0..13u8).rev() {
        match rank_counts[r as usize] {
            4 => quads.push(r),
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }

    if let Some(&q) = quads.first() {
        let k = kickers(rank_mask, &[q], 1);
        return HandScore::pack(Category::FourOfAKind, &[q, k[0]]);
    }

    if let Some(&t) = trips.first() {
        let second = match (trips.get(1), pairs.first()) {
            (Some(&t2), Some(&p)) => Some(t2.max(p)),
            (Some(&t2), None) => Some(t2),
            (None, Some(&p)) => Some(p),
            (None, None) => None,
        };
        if let Some(p) = second {
            return HandScore::pack(Category::FullHouse, &[t, p]);
        }
        let k = kickers(rank_mask, &[t], 2);
        return HandScore::pack(Category::ThreeOfAKind, &[t, k[0], k[1]]);
    }

    if pairs.len() >= 2 {
        let (hi, lo) = (pairs[0], pairs[1]);
        // a third pair's rank is a valid kicker
        let k = kickers(rank_mask, &[hi, lo], 1);
        return HandScore::pack(Category::TwoPair, &[hi, lo, k[0]]);
    }

    if let Some(&p) = pairs.first() {
        let k = kickers(rank_mask, &[p], 3);
        return HandScore::pack(Category::OnePair, &[p, k[0], k[1], k[2]]);
    }

    let top: Vec<u8> = ranks_high_to_low(rank_mask).take(5).collect();
    HandScore::pack(Category::HighCard, &top)
}

/// Slice form of [`evaluate`] for callers assembling cards dynamically.
///
/// # Panics
///
/// Panics unless `cards` holds exactly seven distinct cards.
pub fn evaluate_slice(cards: &[Card]) -> HandScore {
    let seven: &[Card; 7] = cards
        .try_into()
        .unwrap_or_else(|_| panic!("hand evaluation needs 7 cards, got {}", cards.len()));
    evaluate(seven)
}

/// Scores two hole cards against a complete five-card board.
pub fn evaluate_holding(hole: [Card; 2], board: &[Card; 5]) -> HandScore {
    evaluate(&[
        hole[0], hole[1], board[0], board[1], board[2], board[3], board[4],
    ])
}

/// High rank of the best 5-consecutive window, the wheel counting as Five.
fn straight_high(mask: u16) -> Option<u8> {
    for high in (4..=ACE).rev() {
        let window = 0b1_1111u16 << (high - 4);
        if mask & window == window {
            return Some(high);
        }
    }
    if mask & WHEEL_MASK == WHEEL_MASK {
        return Some(FIVE);
    }
    None
}

fn ranks_high_to_low(mask: u16) -> impl Iterator<Item = u8> {
    (0..13u8).rev().filter(move |r| mask & (1 << r) != 0)
}

fn kickers(rank_mask: u16, exclude: &[u8], n: usize) -> [u8; 3] {
    let mut out = [0u8; 3];
    let rest = ranks_high_to_low(rank_mask).filter(|r| !exclude.contains(r));
    for (slot, r) in out.iter_mut().zip(rest.take(n)) {
        *slot = r;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_windows() {
        assert_eq!(straight_high(0b1_1111_0000_0000), Some(ACE));
        // six-high
        assert_eq!(straight_high(0b0_0000_0001_1111), Some(4));
        assert_eq!(straight_high(WHEEL_MASK), Some(FIVE));
        // wheel plus six is a six-high straight
        assert_eq!(straight_high(WHEEL_MASK | 0b1_0000), Some(4));
        assert_eq!(straight_high(0b1_0111_0111_0111), None);
    }

    #[test]
    fn pack_orders_fields_by_significance() {
        let a = HandScore::pack(Category::OnePair, &[5, 12, 3, 2]);
        let b = HandScore::pack(Category::OnePair, &[5, 11, 10, 9]);
        assert!(a > b);
        assert_eq!(a.category(), Category::OnePair);
        assert_eq!(a.kickers()[1], Rank::Ace);
    }
}
