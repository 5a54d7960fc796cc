//! Canonical chess-rule constants.
//!
//! Starting position, king home squares, and the named file/rank masks the
//! parser uses to narrow candidate origins and detect promotions.

use crate::game_state::chess_types::{Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const LIGHT_KING_START: Square = 4;
pub const DARK_KING_START: Square = 60;

pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const RANK_1: u64 = 0xFF;
pub const RANK_8: u64 = RANK_1 << 56;

/// Files `a..=h`, indexed `0..8`.
pub const FILE_MASKS: [u64; 8] = [
    FILE_A,
    FILE_A << 1,
    FILE_A << 2,
    FILE_A << 3,
    FILE_A << 4,
    FILE_A << 5,
    FILE_A << 6,
    FILE_A << 7,
];

/// Ranks `1..=8`, indexed `0..8`.
pub const RANK_MASKS: [u64; 8] = [
    RANK_1,
    RANK_1 << 8,
    RANK_1 << 16,
    RANK_1 << 24,
    RANK_1 << 32,
    RANK_1 << 40,
    RANK_1 << 48,
    RANK_8,
];

/// Both promotion ranks.
pub const BACK_RANKS: u64 = RANK_1 | RANK_8;

#[inline]
pub const fn king_start_square(color: Color) -> Square {
    match color {
        Color::Light => LIGHT_KING_START,
        Color::Dark => DARK_KING_START,
    }
}
