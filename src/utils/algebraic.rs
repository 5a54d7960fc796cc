//! Square and bitboard conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square/bitboard representations, plus the bit-scan helpers used when
//! iterating candidate masks.

use crate::game_state::chess_types::Square;

#[rustfmt::skip]
const SQUARE_NAMES: [&str; 64] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

/// Convert a two-character coordinate (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Option<Square> {
    let &[file, rank] = square.as_bytes() else {
        return None;
    };
    let file_index = file_index(file)?;
    let rank_index = rank_index(rank)?;
    Some(rank_index * 8 + file_index)
}

/// Convert a two-character coordinate (for example: "e4") to a one-hot bitboard.
#[inline]
pub fn algebraic_to_bitboard(square: &str) -> Option<u64> {
    algebraic_to_square(square).map(|index| 1u64 << index)
}

/// Name of a square index. Only the low six bits of `square` are used.
#[inline]
pub fn square_to_algebraic(square: Square) -> &'static str {
    SQUARE_NAMES[usize::from(square & 63)]
}

/// `a..=h` to `0..8`.
#[inline]
pub fn file_index(file: u8) -> Option<u8> {
    (b'a'..=b'h').contains(&file).then(|| file - b'a')
}

/// `1..=8` to `0..8`.
#[inline]
pub fn rank_index(rank: u8) -> Option<u8> {
    (b'1'..=b'8').contains(&rank).then(|| rank - b'1')
}

#[inline]
pub fn lowest_square(mask: u64) -> Option<Square> {
    (mask != 0).then(|| mask.trailing_zeros() as Square)
}

/// Remove and return the least significant square of `mask`.
#[inline]
pub fn pop_lowest_square(mask: &mut u64) -> Option<Square> {
    let square = lowest_square(*mask)?;
    *mask &= *mask - 1;
    Some(square)
}

#[cfg(test)]
mod tests {
    use super::{
        algebraic_to_bitboard, algebraic_to_square, pop_lowest_square, square_to_algebraic,
    };

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1"), Some(0));
        assert_eq!(algebraic_to_square("h8"), Some(63));
        assert_eq!(square_to_algebraic(0), "a1");
        assert_eq!(square_to_algebraic(63), "h8");
        assert_eq!(square_to_algebraic(28), "e4");
    }

    #[test]
    fn rejects_out_of_board_coordinates() {
        assert_eq!(algebraic_to_square("i1"), None);
        assert_eq!(algebraic_to_square("a9"), None);
        assert_eq!(algebraic_to_square("e"), None);
        assert_eq!(algebraic_to_square("e44"), None);
        assert_eq!(algebraic_to_bitboard("e4"), Some(1u64 << 28));
    }

    #[test]
    fn pop_lowest_square_walks_mask_in_index_order() {
        let mut mask = (1u64 << 40) | (1u64 << 3) | (1u64 << 17);
        let mut seen = Vec::new();
        while let Some(square) = pop_lowest_square(&mut mask) {
            seen.push(square);
        }
        assert_eq!(seen, vec![3, 17, 40]);
        assert_eq!(mask, 0);
    }
}
