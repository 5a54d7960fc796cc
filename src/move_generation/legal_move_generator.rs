//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal moves piece by piece, applies each candidate,
//! filters self-check outcomes, and stamps the check flag on moves that give
//! check so they compare equal to what the notation parser builds.

use crate::game_state::chess_rules::BACK_RANKS;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_pseudo_legal, unmake_move};
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::moves::attack_tables::{AttackTables, BitboardAttacks};
use crate::moves::chess_move::{Move, MoveType};
use crate::utils::algebraic::pop_lowest_square;

const PROMOTIONS: [MoveType; 4] = [
    MoveType::PromoteQueen,
    MoveType::PromoteKnight,
    MoveType::PromoteBishop,
    MoveType::PromoteRook,
];

pub fn generate_legal_moves(game_state: &mut GameState) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(128);
    generate_pseudo_legal_moves(game_state, u64::MAX, &mut pseudo);

    let mover = game_state.side_to_move;
    let mut legal = Vec::<Move>::with_capacity(pseudo.len());
    for mv in pseudo {
        if !apply_pseudo_legal(game_state, mv) {
            continue;
        }
        let gives_check = is_king_in_check(game_state, mover.opposite());
        unmake_move(game_state);
        legal.push(mv.with_check(gives_check));
    }

    legal
}

/// Pseudo-legal moves for the side to move whose origin lies in `origins`.
pub fn generate_pseudo_legal_moves(game_state: &GameState, origins: u64, out: &mut Vec<Move>) {
    let attacks = BitboardAttacks;
    let side = game_state.side_to_move;
    let occupancy = game_state.occupancy_all;
    let own = |piece: PieceKind| game_state.pieces[side.index()][piece.index()] & origins;

    generate_pawn_moves(game_state, own(PieceKind::Pawn), out);
    generate_piece_moves(game_state, PieceKind::Knight, own(PieceKind::Knight), out, |sq| {
        attacks.knight(sq)
    });
    generate_piece_moves(game_state, PieceKind::Bishop, own(PieceKind::Bishop), out, |sq| {
        attacks.bishop(sq, occupancy)
    });
    generate_piece_moves(game_state, PieceKind::Rook, own(PieceKind::Rook), out, |sq| {
        attacks.rook(sq, occupancy)
    });
    generate_piece_moves(game_state, PieceKind::Queen, own(PieceKind::Queen), out, |sq| {
        attacks.queen(sq, occupancy)
    });
    let kings = own(PieceKind::King);
    generate_piece_moves(game_state, PieceKind::King, kings, out, |sq| attacks.king(sq));
    if kings != 0 {
        generate_castling_moves(game_state, kings.trailing_zeros() as Square, out);
    }
}

fn generate_piece_moves(
    game_state: &GameState,
    piece: PieceKind,
    mut origins: u64,
    out: &mut Vec<Move>,
    targets_from: impl Fn(Square) -> u64,
) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];

    while let Some(from) = pop_lowest_square(&mut origins) {
        let mut targets = targets_from(from) & !own_occ;
        while let Some(to) = pop_lowest_square(&mut targets) {
            let is_capture = enemy_occ & (1u64 << to) != 0;
            out.push(Move::pack(from, to, piece.code(), is_capture, false, MoveType::Normal));
        }
    }
}

fn generate_pawn_moves(game_state: &GameState, pawns: u64, out: &mut Vec<Move>) {
    // A pawn parked on a back rank (only reachable through a hand-written
    // FEN) has nowhere to go.
    let mut pawns = pawns & !BACK_RANKS;
    let attacks = BitboardAttacks;
    let side = game_state.side_to_move;
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let empty = !game_state.occupancy_all;
    let (start_rank, promotion_rank) = match side {
        Color::Light => (1, 7),
        Color::Dark => (6, 0),
    };
    let pawn = PieceKind::Pawn.code();

    let mut push = |from: Square, to: Square, capture: bool, move_type: MoveType| {
        if to / 8 == promotion_rank {
            for promotion in PROMOTIONS {
                out.push(Move::pack(from, to, pawn, capture, false, promotion));
            }
        } else {
            out.push(Move::pack(from, to, pawn, capture, false, move_type));
        }
    };

    while let Some(from) = pop_lowest_square(&mut pawns) {
        let one_step = match side {
            Color::Light => from + 8,
            Color::Dark => from - 8,
        };
        if empty & (1u64 << one_step) != 0 {
            push(from, one_step, false, MoveType::Normal);

            if from / 8 == start_rank {
                let two_step = match side {
                    Color::Light => from + 16,
                    Color::Dark => from - 16,
                };
                if empty & (1u64 << two_step) != 0 {
                    push(from, two_step, false, MoveType::Normal);
                }
            }
        }

        let mut captures = attacks.pawn(side, from) & enemy_occ;
        while let Some(to) = pop_lowest_square(&mut captures) {
            push(from, to, true, MoveType::Normal);
        }

        if let Some(ep) = game_state.en_passant_square {
            if attacks.pawn(side, from) & (1u64 << ep) != 0 {
                push(from, ep, true, MoveType::EnPassant);
            }
        }
    }
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();

    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return;
    }

    let (home, kingside_right, queenside_right) = match side {
        Color::Light => (4, CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE),
        Color::Dark => (60, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE),
    };
    if king_from != home {
        return;
    }
    let rooks = game_state.pieces[side.index()][PieceKind::Rook.index()];
    let king = PieceKind::King.code();

    if game_state.castling_rights & kingside_right != 0
        && rooks & (1u64 << (home + 3)) != 0
        && game_state.occupancy_all & ((1u64 << (home + 1)) | (1u64 << (home + 2))) == 0
        && !is_square_attacked(game_state, home + 1, enemy)
        && !is_square_attacked(game_state, home + 2, enemy)
    {
        out.push(Move::pack(home, home + 2, king, false, false, MoveType::KingsideCastle));
    }

    let queenside_path = (1u64 << (home - 1)) | (1u64 << (home - 2)) | (1u64 << (home - 3));
    if game_state.castling_rights & queenside_right != 0
        && rooks & (1u64 << (home - 4)) != 0
        && game_state.occupancy_all & queenside_path == 0
        && !is_square_attacked(game_state, home - 1, enemy)
        && !is_square_attacked(game_state, home - 2, enemy)
    {
        out.push(Move::pack(home, home - 2, king, false, false, MoveType::QueensideCastle));
    }
}
