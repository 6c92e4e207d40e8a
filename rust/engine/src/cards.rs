use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

const RANK_CHARS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];
const SUIT_CHARS: [char; 4] = ['s', 'h', 'd', 'c'];
const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

/// Suit block of a [`Card`] id (`id / 13`), written `s`, `h`, `d`, `c`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    Spades = 0,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> char {
        SUIT_CHARS[self as usize]
    }

    pub fn from_symbol(c: char) -> Option<Suit> {
        match c {
            's' => Some(Suit::Spades),
            'h' => Some(Suit::Hearts),
            'd' => Some(Suit::Diamonds),
            'c' => Some(Suit::Clubs),
            _ => None,
        }
    }

    fn from_index(v: u8) -> Suit {
        match v {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            _ => Suit::Clubs,
        }
    }
}

/// Rank offset of a [`Card`] id (`id % 13`). Declared low to high so the
/// derived ordering is poker order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 0,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> char {
        RANK_CHARS[self as usize]
    }

    pub fn from_symbol(c: char) -> Option<Rank> {
        RANK_CHARS
            .iter()
            .position(|&r| r == c)
            .map(|i| Rank::from_index(i as u8))
    }

    /// Rank for offset `v`; anything above 12 saturates to Ace.
    pub fn from_index(v: u8) -> Rank {
        ALL_RANKS[usize::from(v.min(12))]
    }
}

/// A single playing card, stored as its dense id in `0..52`.
///
/// The id is the only representation the engine carries around; [`Rank`]
/// and [`Suit`] are views derived from it (`rank = id % 13`,
/// `suit = id / 13`). Serializes as the two-character token, e.g. `"As"`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card(u8);

impl Card {
    pub const COUNT: u8 = 52;

    /// Builds a card from its id, rejecting anything outside `0..52`.
    pub fn from_id(id: u8) -> Result<Card, GameError> {
        if id < Self::COUNT {
            Ok(Card(id))
        } else {
            Err(GameError::InvalidCardId { id })
        }
    }

    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card(suit.index() * 13 + rank.index())
    }

    /// Encodes a rank symbol (`23456789TJQKA`) and suit symbol (`shdc`).
    ///
    /// # Examples
    ///
    /// ```
    /// use headsup_engine::cards::{Card, Rank, Suit};
    ///
    /// let ace = Card::encode('A', 's').unwrap();
    /// assert_eq!(ace.id(), 12);
    /// assert_eq!(ace.rank(), Rank::Ace);
    /// assert_eq!(ace.suit(), Suit::Spades);
    /// assert!(Card::encode('X', 's').is_err());
    /// ```
    pub fn encode(rank: char, suit: char) -> Result<Card, GameError> {
        match (Rank::from_symbol(rank), Suit::from_symbol(suit)) {
            (Some(r), Some(s)) => Ok(Card::new(r, s)),
            _ => Err(GameError::InvalidCard { rank, suit }),
        }
    }

    pub fn decode(self) -> (char, char) {
        (self.rank().symbol(), self.suit().symbol())
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> Rank {
        Rank::from_index(self.0 % 13)
    }

    pub fn suit(self) -> Suit {
        Suit::from_index(self.0 / 13)
    }

    pub(crate) fn mask(self) -> u64 {
        1u64 << self.0
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => Card::encode(r, su),
            _ => Err(GameError::InvalidCardToken {
                token: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Card {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, s) = self.decode();
        write!(f, "{}{}", r, s)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
}

pub fn all_ranks() -> [Rank; 13] {
    ALL_RANKS
}

/// All 52 cards in id order.
pub fn full_deck() -> Vec<Card> {
    (0..Card::COUNT).map(Card).collect()
}

/// Parses a whitespace- or comma-separated list of tokens such as `"As Kd 7c"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, GameError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_is_bijective_over_all_ids() {
        for card in full_deck() {
            let (r, s) = card.decode();
            assert_eq!(Card::encode(r, s).unwrap(), card);
        }
    }

    #[test]
    fn id_layout_matches_rank_and_suit() {
        let c: Card = "Kd".parse().unwrap();
        assert_eq!(c.id(), 2 * 13 + 11);
        assert_eq!(c.rank(), Rank::King);
        assert_eq!(c.suit(), Suit::Diamonds);
        assert_eq!(Card::from_id(51).unwrap().to_string(), "Ac");
        assert!(Card::from_id(52).is_err());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert_eq!(
            Card::encode('1', 's'),
            Err(GameError::InvalidCard {
                rank: '1',
                suit: 's'
            })
        );
        assert!(Card::encode('A', 'x').is_err());
        assert!("A".parse::<Card>().is_err());
        assert!("Asd".parse::<Card>().is_err());
        assert!("as".parse::<Card>().is_err());
    }

    #[test]
    fn parse_cards_accepts_mixed_separators() {
        let cards = parse_cards("As, Kd 7c").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2].to_string(), "7c");
    }
}
