//! Reversible move application for `GameState`.
//!
//! `make_move` accepts only moves that appear in the pseudo-legal set of the
//! origin square and do not leave the mover's king attacked; anything else is
//! refused with the board untouched.

use crate::game_state::{chess_types::*, game_state::GameState, undo_state::UndoState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_pseudo_legal_moves;
use crate::moves::chess_move::{Move, MoveType};

pub fn make_move(game_state: &mut GameState, mv: Move) -> bool {
    if mv.is_sentinel() || !is_pseudo_legal(game_state, mv) {
        return false;
    }
    apply_pseudo_legal(game_state, mv)
}

pub fn unmake_move(game_state: &mut GameState) {
    let Some(undo) = game_state.undo_stack.pop() else {
        tracing::trace!("unmake_move called with empty history");
        return;
    };

    game_state.pieces = undo.prev_pieces;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
    game_state.side_to_move = game_state.side_to_move.opposite();
    game_state.recalc_occupancy();
}

/// Matched on from/to/move type so a caller's check or capture flags do not
/// affect acceptance.
fn is_pseudo_legal(game_state: &GameState, mv: Move) -> bool {
    let mut candidates = Vec::with_capacity(32);
    generate_pseudo_legal_moves(game_state, mv.from_square(), &mut candidates);
    candidates.iter().any(|candidate| {
        candidate.to_index() == mv.to_index() && candidate.move_type() == mv.move_type()
    })
}

/// Apply a move known to be pseudo-legal. On self-check the move is taken
/// back and `false` returned.
pub(crate) fn apply_pseudo_legal(game_state: &mut GameState, mv: Move) -> bool {
    let from = mv.from_index();
    let to = mv.to_index();
    let from_mask = mv.from_square();
    let to_mask = mv.to_square();

    let moving_color = game_state.side_to_move;
    let enemy_color = moving_color.opposite();

    let Some((_, moved_piece)) = game_state.piece_on(from) else {
        return false;
    };

    game_state.undo_stack.push(UndoState {
        mv,
        prev_pieces: game_state.pieces,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
    });

    let mut captured = false;
    game_state.pieces[moving_color.index()][moved_piece.index()] &= !from_mask;

    if mv.move_type() == MoveType::EnPassant {
        let capture_sq = if moving_color == Color::Light { to - 8 } else { to + 8 };
        game_state.pieces[enemy_color.index()][PieceKind::Pawn.index()] &= !(1u64 << capture_sq);
        captured = true;
    } else if game_state.occupancy_by_color[enemy_color.index()] & to_mask != 0 {
        for bitboard in game_state.pieces[enemy_color.index()].iter_mut() {
            *bitboard &= !to_mask;
        }
        captured = true;
    }

    let placed = mv.promoted_piece().unwrap_or(moved_piece);
    game_state.pieces[moving_color.index()][placed.index()] |= to_mask;

    match (mv.move_type(), from) {
        (MoveType::KingsideCastle, 4) => move_rook(game_state, moving_color, 7, 5),
        (MoveType::QueensideCastle, 4) => move_rook(game_state, moving_color, 0, 3),
        (MoveType::KingsideCastle, 60) => move_rook(game_state, moving_color, 63, 61),
        (MoveType::QueensideCastle, 60) => move_rook(game_state, moving_color, 56, 59),
        _ => {}
    }

    update_castling_rights(game_state, from, to);

    game_state.en_passant_square = if moved_piece == PieceKind::Pawn && from.abs_diff(to) == 16 {
        Some((from + to) / 2)
    } else {
        None
    };

    if moved_piece == PieceKind::Pawn || captured {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = enemy_color;
    game_state.recalc_occupancy();

    if is_king_in_check(game_state, moving_color) {
        unmake_move(game_state);
        return false;
    }
    true
}

fn move_rook(game_state: &mut GameState, color: Color, from: Square, to: Square) {
    let rooks = &mut game_state.pieces[color.index()][PieceKind::Rook.index()];
    *rooks &= !(1u64 << from);
    *rooks |= 1u64 << to;
}

/// Any move touching a king or rook home square drops the matching rights.
fn update_castling_rights(game_state: &mut GameState, from: Square, to: Square) {
    for square in [from, to] {
        game_state.castling_rights &= !match square {
            0 => CASTLE_LIGHT_QUEENSIDE,
            4 => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
            7 => CASTLE_LIGHT_KINGSIDE,
            56 => CASTLE_DARK_QUEENSIDE,
            60 => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
            63 => CASTLE_DARK_KINGSIDE,
            _ => 0,
        };
    }
}
