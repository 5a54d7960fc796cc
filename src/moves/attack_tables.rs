//! Attack bitboard tables.
//!
//! `AttackTables` is the capability the parser needs to turn a destination
//! square back into candidate origins. `BitboardAttacks` implements it with
//! `const`-generated leaper tables and ray tracing for sliders; it is
//! zero-sized, immutable and safe to share by reference across threads.

use crate::game_state::chess_types::{Color, Square};

pub trait AttackTables {
    fn knight(&self, square: Square) -> u64;
    fn king(&self, square: Square) -> u64;
    fn rook(&self, square: Square, occupancy: u64) -> u64;
    fn bishop(&self, square: Square, occupancy: u64) -> u64;

    /// Squares a `color` pawn standing on `square` attacks.
    fn pawn(&self, color: Color, square: Square) -> u64;

    #[inline]
    fn queen(&self, square: Square, occupancy: u64) -> u64 {
        self.rook(square, occupancy) | self.bishop(square, occupancy)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitboardAttacks;

const KNIGHT_STEPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
const LIGHT_PAWN_STEPS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const DARK_PAWN_STEPS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_STEPS);
pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_STEPS);
pub const LIGHT_PAWN_ATTACKS: [u64; 64] = leaper_table(&LIGHT_PAWN_STEPS);
pub const DARK_PAWN_ATTACKS: [u64; 64] = leaper_table(&DARK_PAWN_STEPS);

impl AttackTables for BitboardAttacks {
    #[inline]
    fn knight(&self, square: Square) -> u64 {
        KNIGHT_ATTACKS[usize::from(square)]
    }

    #[inline]
    fn king(&self, square: Square) -> u64 {
        KING_ATTACKS[usize::from(square)]
    }

    #[inline]
    fn rook(&self, square: Square, occupancy: u64) -> u64 {
        slider_attacks(square, occupancy, &ROOK_DIRECTIONS)
    }

    #[inline]
    fn bishop(&self, square: Square, occupancy: u64) -> u64 {
        slider_attacks(square, occupancy, &BISHOP_DIRECTIONS)
    }

    #[inline]
    fn pawn(&self, color: Color, square: Square) -> u64 {
        match color {
            Color::Light => LIGHT_PAWN_ATTACKS[usize::from(square)],
            Color::Dark => DARK_PAWN_ATTACKS[usize::from(square)],
        }
    }
}

const fn leaper_table(steps: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;
        while i < steps.len() {
            attacks |= set_if_valid(file + steps[i].0, rank + steps[i].1);
            i += 1;
        }
        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << (rank * 8 + file)
}

/// Rays stop on (and include) the first occupied square.
fn slider_attacks(square: Square, occupancy: u64, directions: &[(i32, i32); 4]) -> u64 {
    let origin_file = i32::from(square % 8);
    let origin_rank = i32::from(square / 8);
    let mut attacks = 0u64;

    for &(file_step, rank_step) in directions {
        let mut file = origin_file + file_step;
        let mut rank = origin_rank + rank_step;
        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            file += file_step;
            rank += rank_step;
        }
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::{AttackTables, BitboardAttacks};
    use crate::game_state::chess_types::Color;

    #[test]
    fn leaper_tables_have_expected_target_counts() {
        let attacks = BitboardAttacks;
        assert_eq!(attacks.knight(27).count_ones(), 8);
        assert_eq!(attacks.knight(0).count_ones(), 2);
        assert_eq!(attacks.king(0).count_ones(), 3);
        assert_eq!(attacks.king(27).count_ones(), 8);
    }

    #[test]
    fn pawn_attacks_point_toward_the_enemy() {
        let attacks = BitboardAttacks;
        // e2 -> d3, f3 ; e7 -> d6, f6
        assert_eq!(attacks.pawn(Color::Light, 12), (1u64 << 19) | (1u64 << 21));
        assert_eq!(attacks.pawn(Color::Dark, 52), (1u64 << 43) | (1u64 << 45));
        // a-file pawns only attack one way.
        assert_eq!(attacks.pawn(Color::Light, 8), 1u64 << 17);
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let attacks = BitboardAttacks;
        assert_eq!(attacks.rook(27, 0).count_ones(), 14);
        assert_eq!(attacks.bishop(27, 0).count_ones(), 13);
        assert_eq!(attacks.queen(27, 0).count_ones(), 27);

        let blocker_on_a4 = 1u64 << 24;
        let rook = attacks.rook(0, blocker_on_a4);
        assert_ne!(rook & (1u64 << 24), 0);
        assert_eq!(rook & (1u64 << 32), 0);

        let blocker_on_e3 = 1u64 << 20;
        let bishop = attacks.bishop(2, blocker_on_e3);
        assert_ne!(bishop & (1u64 << 20), 0);
        assert_eq!(bishop & (1u64 << 29), 0);
    }
}
