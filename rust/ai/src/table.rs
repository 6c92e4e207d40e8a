//! Preflop lookup tables in the GTOB binary format.
//!
//! A table maps each of the 169 canonical starting hands to fold/call/raise
//! weights. All multi-byte fields are little-endian. Every file starts with
//! the magic `GTOB` and a `u16` version; the rest depends on the version.
//!
//! | version | rest of header                         | record                          |
//! |---------|----------------------------------------|---------------------------------|
//! | 1       | `u8` street tag, `u16` count           | `u16` id, 3 x `u16` / 65535     |
//! | 2       | `u8` street tag, `u16` count           | `u16` id, 3 x `u16` / their sum |
//! | 3       | `u32` count, `u16` reserved            | `u16` id, 3 x `u8` / 255        |
//!
//! Version 1 is what [`PreflopTable::write`] produces, with street tag `P`.
//! Version 2 records with all-zero weights load as a pure fold; version 3
//! skips them.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use headsup_engine::cards::Card;
use headsup_engine::logger::Street;
use headsup_engine::player::Action;
use headsup_engine::strategy::{ActionWeights, Observation, PerturbationContext, Strategy};
use thiserror::Error;
use tracing::{debug, warn};

pub const MAGIC: &[u8; 4] = b"GTOB";
pub const CANONICAL_VERSION: u16 = 1;
/// Street tag written into version 1 headers.
pub const PREFLOP_TAG: u8 = b'P';
/// Number of strategically distinct starting hands.
pub const HAND_CLASSES: u16 = 169;

const RANKS_HIGH_FIRST: [char; 13] = [
    'A', 'K', 'Q', 'J', 'T', '9', '8', '7', '6', '5', '4', '3', '2',
];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read table: {0}")]
    Io(#[from] io::Error),
    #[error("not a GTOB table")]
    BadMagic,
    #[error("unsupported GTOB version {0}")]
    UnsupportedVersion(u16),
    #[error("table truncated in {section}")]
    Truncated { section: &'static str },
    #[error("{0} entries do not fit a GTOB record count")]
    TooManyEntries(usize),
}

/// Index of a starting hand among the 169 canonical classes.
///
/// Pairs come first from AA (0) down to 22 (12). Then, for each higher rank
/// from Ace down and each lower rank below it, the suited hand followed by
/// the offsuit hand: AKs = 13, AKo = 14, AQs = 15, ..., 32o = 168.
pub fn canonical_hand_index(hole: [Card; 2]) -> u16 {
    // position in A..2 order
    let a = 12 - hole[0].rank().index() as u16;
    let b = 12 - hole[1].rank().index() as u16;
    let (hi, lo) = if a <= b { (a, b) } else { (b, a) };
    if hi == lo {
        return hi;
    }
    let before = 12 * hi - hi * (hi.saturating_sub(1)) / 2;
    let offsuit = u16::from(hole[0].suit() != hole[1].suit());
    13 + 2 * (before + (lo - hi - 1)) + offsuit
}

/// Short label such as `"AA"`, `"AKs"` or `"T9o"`.
pub fn canonical_hand_label(hole: [Card; 2]) -> String {
    let a = 12 - hole[0].rank().index() as usize;
    let b = 12 - hole[1].rank().index() as usize;
    let (hi, lo) = if a <= b { (a, b) } else { (b, a) };
    let mut label: String = [RANKS_HIGH_FIRST[hi], RANKS_HIGH_FIRST[lo]].iter().collect();
    if hi != lo {
        label.push(if hole[0].suit() == hole[1].suit() { 's' } else { 'o' });
    }
    label
}

/// Preflop weights keyed by canonical hand index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreflopTable {
    entries: BTreeMap<u16, ActionWeights>,
}

impl PreflopTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let table = Self::from_bytes(&bytes)?;
        debug!(path = %path.display(), entries = table.len(), "loaded preflop table");
        Ok(table)
    }

    /// Like [`PreflopTable::load`], but a missing or unreadable file yields
    /// an empty table and a warning.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(table) => table,
            Err(err) => {
                warn!(path = %path.display(), %err, "preflop table unavailable, using empty table");
                Self::default()
            }
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        let mut r = Reader { bytes, pos: 0 };
        if r.take(4, "header")? != MAGIC {
            return Err(TableError::BadMagic);
        }
        let version = r.u16("header")?;

        let mut table = Self::default();
        match version {
            1 | 2 => {
                let tag = r.take(1, "header")?[0];
                let count = r.u16("header")?;
                debug!(version, street = %char::from(tag), count, "reading 16-bit table");
                for _ in 0..count {
                    let id = r.u16("records")?;
                    let q = [r.u16("records")?, r.u16("records")?, r.u16("records")?];
                    table.insert(id, decode_wide(version, q));
                }
            }
            3 => {
                let count = r.u32("header")?;
                r.u16("header")?;
                for _ in 0..count {
                    let id = r.u16("records")?;
                    let q = r.take(3, "records")?;
                    if q.iter().all(|&v| v == 0) {
                        continue;
                    }
                    let w = [q[0], q[1], q[2]].map(|v| f64::from(v) / 255.0);
                    table.insert(id, ActionWeights::new(w[0], w[1], w[2]));
                }
            }
            other => return Err(TableError::UnsupportedVersion(other)),
        }
        Ok(table)
    }

    /// Encodes the table in the canonical version 1 layout.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TableError> {
        let count =
            u16::try_from(self.entries.len()).map_err(|_| TableError::TooManyEntries(self.entries.len()))?;
        let mut out = Vec::with_capacity(9 + self.entries.len() * 8);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&CANONICAL_VERSION.to_le_bytes());
        out.push(PREFLOP_TAG);
        out.extend_from_slice(&count.to_le_bytes());
        for (&id, w) in &self.entries {
            out.extend_from_slice(&id.to_le_bytes());
            for action in Action::ALL {
                let q = (w.get(action).clamp(0.0, 1.0) * 65535.0).round() as u16;
                out.extend_from_slice(&q.to_le_bytes());
            }
        }
        Ok(out)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn insert(&mut self, hand_index: u16, weights: ActionWeights) {
        self.entries.insert(hand_index, weights);
    }

    pub fn get(&self, hand_index: u16) -> Option<ActionWeights> {
        self.entries.get(&hand_index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Weights of a 16-bit record: fixed scale for version 1, record sum for
/// version 2.
fn decode_wide(version: u16, q: [u16; 3]) -> ActionWeights {
    let scale = if version == 1 {
        65535.0
    } else {
        q.iter().map(|&v| f64::from(v)).sum()
    };
    if scale == 0.0 {
        return ActionWeights::only(Action::Fold);
    }
    let w = q.map(|v| f64::from(v) / scale);
    ActionWeights::new(w[0], w[1], w[2])
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, section: &'static str) -> Result<&'a [u8], TableError> {
        let end = self.pos + n;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(TableError::Truncated { section })?;
        self.pos = end;
        Ok(slice)
    }

    fn u16(&mut self, section: &'static str) -> Result<u16, TableError> {
        let b = self.take(2, section)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self, section: &'static str) -> Result<u32, TableError> {
        let b = self.take(4, section)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Plays preflop from a [`PreflopTable`] and checks or calls afterwards.
///
/// A hand missing from the table is played as cheaply as possible: check
/// when free, otherwise fold.
#[derive(Debug, Clone)]
pub struct TableStrategy {
    table: Arc<PreflopTable>,
}

impl TableStrategy {
    pub fn new(table: Arc<PreflopTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PreflopTable {
        &self.table
    }
}

impl Strategy for TableStrategy {
    fn action_weights(&mut self, obs: &Observation, _ctx: &PerturbationContext) -> ActionWeights {
        if obs.street != Street::Preflop {
            return ActionWeights::only(Action::Call);
        }
        let index = canonical_hand_index(obs.hole_cards);
        match self.table.get(index) {
            Some(weights) => weights,
            None => {
                debug!(hand = %canonical_hand_label(obs.hole_cards), "no table entry");
                if obs.can_check() {
                    ActionWeights::only(Action::Call)
                } else {
                    ActionWeights::only(Action::Fold)
                }
            }
        }
    }

    fn name(&self) -> &str {
        "preflop_table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headsup_engine::cards::{all_ranks, all_suits, parse_cards};
    use std::collections::HashSet;

    fn hole(s: &str) -> [Card; 2] {
        let c = parse_cards(s).unwrap();
        [c[0], c[1]]
    }

    #[test]
    fn index_anchors() {
        assert_eq!(canonical_hand_index(hole("As Ah")), 0);
        assert_eq!(canonical_hand_index(hole("2s 2h")), 12);
        assert_eq!(canonical_hand_index(hole("As Ks")), 13);
        assert_eq!(canonical_hand_index(hole("Kd As")), 14);
        assert_eq!(canonical_hand_index(hole("Ac Qc")), 15);
        assert_eq!(canonical_hand_index(hole("Kh Qh")), 37);
        assert_eq!(canonical_hand_index(hole("3c 2c")), 167);
        assert_eq!(canonical_hand_index(hole("2d 3c")), 168);
    }

    #[test]
    fn every_class_is_reached_exactly_once() {
        let mut seen = HashSet::new();
        for r1 in all_ranks() {
            for r2 in all_ranks() {
                for (s1, s2) in [(all_suits()[0], all_suits()[0]), (all_suits()[0], all_suits()[1])] {
                    if r1 == r2 && s1 == s2 {
                        continue;
                    }
                    let idx = canonical_hand_index([Card::new(r1, s1), Card::new(r2, s2)]);
                    assert!(idx < HAND_CLASSES);
                    seen.insert(idx);
                }
            }
        }
        assert_eq!(seen.len(), HAND_CLASSES as usize);
    }

    #[test]
    fn labels() {
        assert_eq!(canonical_hand_label(hole("Ah As")), "AA");
        assert_eq!(canonical_hand_label(hole("Ks Ah")), "AKo");
        assert_eq!(canonical_hand_label(hole("9d Td")), "T9s");
    }

    #[test]
    fn rejects_bad_headers() {
        assert!(matches!(
            PreflopTable::from_bytes(b"GTOX\x01\x00P\x00\x00"),
            Err(TableError::BadMagic)
        ));
        assert!(matches!(
            PreflopTable::from_bytes(b"GTOB\x07\x00P\x00\x00"),
            Err(TableError::UnsupportedVersion(7))
        ));
        assert!(matches!(
            PreflopTable::from_bytes(b"GTOB\x01"),
            Err(TableError::Truncated { section: "header" })
        ));
        assert!(matches!(
            PreflopTable::from_bytes(b"GTOB\x02\x00P\x01"),
            Err(TableError::Truncated { section: "header" })
        ));
    }

    #[test]
    fn canonical_header_layout() {
        let mut t = PreflopTable::new();
        t.insert(13, ActionWeights::only(Action::Raise));
        let b = t.to_bytes().unwrap();
        assert_eq!(&b[..9], b"GTOB\x01\x00P\x01\x00");
        assert_eq!(b.len(), 9 + 8);
        assert_eq!(&b[9..11], &13u16.to_le_bytes());
        assert_eq!(&b[15..17], &u16::MAX.to_le_bytes());
    }
}
