use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

/// Single undo record for `make_move` / `unmake_move`.
///
/// Bitboards are snapshotted whole; occupancy caches are rebuilt on undo.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    pub prev_pieces: [[u64; 6]; 2],
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}
