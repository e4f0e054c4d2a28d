//! Reader for Polyglot-layout opening books.
//!
//! A book is a sequence of 16-byte big-endian records: position key (u64),
//! move (u16), weight (u16), learn (u32). Move bits, low to high: to-file,
//! to-row, from-file, from-row (3 bits each), promotion (3 bits, 0 none,
//! 1 knight, 2 bishop, 3 rook, 4 queen). Castling is stored as the king
//! taking its own rook.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Mutex;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Move, PieceKind, Position, Square, Wing};
use crate::error::BookError;
use crate::rules;

use super::zobrist::position_key;
use super::OpeningLibrary;

pub const RECORD_LEN: usize = 16;

/// How to choose among several book moves for the same position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// First record in file order.
    #[default]
    First,
    /// Record with the highest weight; file order breaks ties.
    HighestWeight,
    /// Uniformly random record.
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookEntry {
    pub key: u64,
    pub mv: u16,
    pub weight: u16,
    pub learn: u32,
}

impl BookEntry {
    pub fn from_bytes(b: &[u8; RECORD_LEN]) -> Self {
        let mut key = [0u8; 8];
        key.copy_from_slice(&b[0..8]);
        Self {
            key: u64::from_be_bytes(key),
            mv: u16::from_be_bytes([b[8], b[9]]),
            weight: u16::from_be_bytes([b[10], b[11]]),
            learn: u32::from_be_bytes([b[12], b[13], b[14], b[15]]),
        }
    }

    pub fn to_bytes(&self) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        out[0..8].copy_from_slice(&self.key.to_be_bytes());
        out[8..10].copy_from_slice(&self.mv.to_be_bytes());
        out[10..12].copy_from_slice(&self.weight.to_be_bytes());
        out[12..16].copy_from_slice(&self.learn.to_be_bytes());
        out
    }

    pub fn from_square(&self) -> Square { Square::at(((self.mv >> 9) & 7) as u8, ((self.mv >> 6) & 7) as u8) }
    pub fn to_square(&self) -> Square { Square::at(((self.mv >> 3) & 7) as u8, (self.mv & 7) as u8) }

    pub fn promotion(&self) -> Option<PieceKind> {
        match (self.mv >> 12) & 7 {
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

/// Encodes `mv` in the book's move layout. Castling is written king-takes-rook.
pub fn encode_move(mv: &Move) -> u16 {
    let to = if mv.is_castling() {
        let wing = if mv.is_castling_kingside() { Wing::Kingside } else { Wing::Queenside };
        Square::at(mv.to.rank(), wing.rook_file())
    } else {
        mv.to
    };
    let promo = match mv.promotion {
        Some(PieceKind::Knight) => 1,
        Some(PieceKind::Bishop) => 2,
        Some(PieceKind::Rook) => 3,
        Some(PieceKind::Queen) => 4,
        _ => 0,
    };
    (to.file() as u16)
        | (to.rank() as u16) << 3
        | (mv.from.file() as u16) << 6
        | (mv.from.rank() as u16) << 9
        | promo << 12
}

/// Maps a position to the key its book records are filed under, if it has one.
pub type BookKey = Box<dyn Fn(&Position) -> Option<u64> + Send + Sync>;

pub struct PolyglotBook {
    // sorted by key, file order kept within a key
    entries: Vec<BookEntry>,
    mode: SelectionMode,
    key: BookKey,
    rng: Mutex<SmallRng>,
}

impl std::fmt::Debug for PolyglotBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolyglotBook")
            .field("entries", &self.entries.len())
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl PolyglotBook {
    pub fn from_entries(mut entries: Vec<BookEntry>) -> Self {
        entries.sort_by_key(|e| e.key);
        Self {
            entries,
            mode: SelectionMode::default(),
            key: Box::new(position_key),
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, BookError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let rest = bytes.len() % RECORD_LEN;
        if rest != 0 { return Err(BookError::Truncated(rest)); }
        let entries: Vec<BookEntry> = bytes
            .chunks_exact(RECORD_LEN)
            .filter_map(|c| <&[u8; RECORD_LEN]>::try_from(c).ok())
            .map(BookEntry::from_bytes)
            .collect();
        debug!("read {} book records", entries.len());
        Ok(Self::from_entries(entries))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, BookError> {
        let path = path.as_ref();
        let book = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!("opening book {} loaded ({} records)", path.display(), book.len());
        Ok(book)
    }

    pub fn with_selection(mut self, mode: SelectionMode) -> Self { self.mode = mode; self }

    pub fn with_seed(self, seed: u64) -> Self {
        Self { rng: Mutex::new(SmallRng::seed_from_u64(seed)), ..self }
    }

    pub fn with_key(mut self, key: impl Fn(&Position) -> Option<u64> + Send + Sync + 'static) -> Self {
        self.key = Box::new(key);
        self
    }

    pub fn selection(&self) -> SelectionMode { self.mode }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Records filed under `key`, in file order.
    pub fn entries_for(&self, key: u64) -> &[BookEntry] {
        let start = self.entries.partition_point(|e| e.key < key);
        let end = self.entries.partition_point(|e| e.key <= key);
        &self.entries[start..end]
    }

    /// Book records for `position` resolved to legal moves, in file order.
    pub fn candidates(&self, position: &Position) -> Vec<(Move, u16)> {
        let Some(key) = (self.key)(position) else { return Vec::new() };
        let hits = self.entries_for(key);
        if hits.is_empty() { return Vec::new(); }
        let legal = rules::legal_moves(position);
        hits.iter()
            .filter_map(|e| resolve(position, e, &legal).map(|mv| (mv, e.weight)))
            .collect()
    }
}

// Finds the legal move a record stands for, translating king-takes-rook castling.
fn resolve(position: &Position, entry: &BookEntry, legal: &[Move]) -> Option<Move> {
    let from = entry.from_square();
    let mut to = entry.to_square();
    let piece = position.piece_at(from)?;
    if piece.kind == PieceKind::King && from.file() == 4 && from.rank() == to.rank() && from.rank() == piece.side.home_rank() {
        to = match to.file() {
            7 => Square::at(to.rank(), Wing::Kingside.king_target_file()),
            0 => Square::at(to.rank(), Wing::Queenside.king_target_file()),
            _ => to,
        };
    }
    let promotion = entry.promotion();
    legal.iter().copied().find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
}

impl OpeningLibrary for PolyglotBook {
    fn look_up_move(&self, position: &Position) -> Option<Move> {
        let candidates = self.candidates(position);
        if candidates.is_empty() { return None; }
        let chosen = match self.mode {
            SelectionMode::First => candidates[0].0,
            SelectionMode::HighestWeight => {
                let mut best = candidates[0];
                for &c in &candidates[1..] {
                    if c.1 > best.1 { best = c; }
                }
                best.0
            }
            SelectionMode::Random => {
                let mut rng = self.rng.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
                candidates[rng.gen_range(0..candidates.len())].0
            }
        };
        debug!("book move {} out of {} candidates", chosen, candidates.len());
        Some(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_bits_decode() {
        // e2e4: to e4 (file 4, row 3), from e2 (file 4, row 1)
        let e = BookEntry { key: 0, mv: 4 | 3 << 3 | 4 << 6 | 1 << 9, weight: 1, learn: 0 };
        assert_eq!(e.from_square().to_string(), "e2");
        assert_eq!(e.to_square().to_string(), "e4");
        assert_eq!(e.promotion(), None);
        let q = BookEntry { mv: e.mv | 4 << 12, ..e };
        assert_eq!(q.promotion(), Some(PieceKind::Queen));
    }

    #[test]
    fn record_bytes_are_big_endian() {
        let e = BookEntry { key: 0x0102030405060708, mv: 0x090a, weight: 0x0b0c, learn: 0x0d0e0f10 };
        let b = e.to_bytes();
        assert_eq!(b, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
        assert_eq!(BookEntry::from_bytes(&b), e);
    }

    #[test]
    fn truncated_book_is_rejected() {
        let bytes = [0u8; RECORD_LEN + 3];
        assert!(matches!(PolyglotBook::from_reader(&bytes[..]), Err(BookError::Truncated(3))));
    }
}
