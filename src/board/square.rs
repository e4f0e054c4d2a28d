use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;

/// A board coordinate. Rank 0 is white's home rank, file 0 is the a-file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    pub fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 { Some(Self { rank, file }) } else { None }
    }

    // Callers guarantee both coordinates are in 0..8.
    pub(crate) const fn at(rank: u8, file: u8) -> Self { Self { rank, file } }

    pub fn rank(self) -> u8 { self.rank }
    pub fn file(self) -> u8 { self.file }

    /// Square displaced by (d_rank, d_file), or `None` when it leaves the board.
    pub fn offset(self, d_rank: i8, d_file: i8) -> Option<Self> {
        let r = self.rank as i8 + d_rank;
        let f = self.file as i8 + d_file;
        if (0..8).contains(&r) && (0..8).contains(&f) { Some(Self::at(r as u8, f as u8)) } else { None }
    }

    /// Index 0..64 in a1, b1, ..., h8 order.
    pub fn index(self) -> usize { self.rank as usize * 8 + self.file as usize }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square::at(rank, file)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, (b'1' + self.rank) as char)
    }
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 || !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
            return Err(NotationError::Square(s.to_string()));
        }
        Ok(Square::at(b[1] - b'1', b[0] - b'a'))
    }
}

// Named squares used by castling and the tests.
pub const A1: Square = Square::at(0, 0);
pub const B1: Square = Square::at(0, 1);
pub const C1: Square = Square::at(0, 2);
pub const D1: Square = Square::at(0, 3);
pub const E1: Square = Square::at(0, 4);
pub const F1: Square = Square::at(0, 5);
pub const G1: Square = Square::at(0, 6);
pub const H1: Square = Square::at(0, 7);
pub const A8: Square = Square::at(7, 0);
pub const B8: Square = Square::at(7, 1);
pub const C8: Square = Square::at(7, 2);
pub const D8: Square = Square::at(7, 3);
pub const E8: Square = Square::at(7, 4);
pub const F8: Square = Square::at(7, 5);
pub const G8: Square = Square::at(7, 6);
pub const H8: Square = Square::at(7, 7);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_algebraic() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!((sq.rank(), sq.file()), (3, 4));
        assert_eq!(sq.to_string(), "e4");
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(H1.offset(0, 1), None);
        assert_eq!(A1.offset(1, 1), Square::new(1, 1));
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::all().count(), 64);
    }
}
