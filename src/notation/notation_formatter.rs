//! Move-to-text rendering.
//!
//! Three registers: coordinate (`e7e8q`), extended (`Ng1-f3`, `e5xd6`) which
//! needs no board, and strict algebraic (`Nbd2`, `exd5`, `O-O+`) which
//! disambiguates against the legal move list of a position.

use std::ops::Range;

use crate::chess_errors::{NotationError, NotationResult};
use crate::game_state::chess_types::PieceKind;
use crate::move_generation::position::Position;
use crate::moves::chess_move::{Move, MoveType};
use crate::utils::algebraic::square_to_algebraic;

/// Text every formatter produces for a sentinel or unrenderable move.
pub const NO_MOVE_TEXT: &str = "none";

/// `<from><to>[promotion]`, promotion letter lowercase.
pub fn to_coordinate(mv: Move) -> String {
    mv.to_string()
}

/// Context-free long form: piece letter, origin, `x` or `-`, destination,
/// uppercase promotion letter, `+` when flagged as check.
pub fn to_extended(mv: Move) -> String {
    if mv.is_sentinel() {
        return NO_MOVE_TEXT.to_owned();
    }
    if let Some(castle) = castle_text(mv) {
        return castle;
    }

    let mut out = String::with_capacity(8);
    push_piece_letter(&mut out, mv);
    out.push_str(square_to_algebraic(mv.from_index()));
    out.push(if mv.is_capture() { 'x' } else { '-' });
    push_destination_and_suffixes(&mut out, mv);
    out
}

/// Strict algebraic notation, or `"none"` when `mv` is not legal here.
pub fn to_san<P: Position + ?Sized>(position: &mut P, mv: Move) -> String {
    try_to_san(position, mv).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "rendering move as none");
        NO_MOVE_TEXT.to_owned()
    })
}

pub fn try_to_san<P: Position + ?Sized>(position: &mut P, mv: Move) -> NotationResult<String> {
    if mv.is_sentinel() {
        return Err(NotationError::NotInLegalSet(mv));
    }

    let legal_moves = position.legal_moves();
    if !legal_moves.contains(&mv) {
        return Err(NotationError::NotInLegalSet(mv));
    }
    if let Some(castle) = castle_text(mv) {
        return Ok(castle);
    }

    let from = mv.from_index();
    let mut needs_disambiguation = false;
    let mut same_file = false;
    let mut same_rank = false;
    for sibling in legal_moves.iter().filter(|other| {
        other.to_index() == mv.to_index()
            && other.piece_code() == mv.piece_code()
            && other.from_index() != from
    }) {
        needs_disambiguation = true;
        same_file |= sibling.from_index() % 8 == from % 8;
        same_rank |= sibling.from_index() / 8 == from / 8;
    }
    if mv.is_capture() && mv.piece_moved() == Some(PieceKind::Pawn) {
        needs_disambiguation = true;
    }

    let mut out = String::with_capacity(8);
    push_piece_letter(&mut out, mv);
    if needs_disambiguation {
        let origin = square_to_algebraic(from);
        match (same_file, same_rank) {
            (true, true) => out.push_str(origin),
            (true, false) => out.push_str(&origin[1..]),
            _ => out.push_str(&origin[..1]),
        }
    }
    if mv.is_capture() {
        out.push('x');
    }
    push_destination_and_suffixes(&mut out, mv);
    Ok(out)
}

/// Extended forms of `moves[range]` separated by single spaces.
pub fn format_move_list(moves: &[Move], range: Range<usize>) -> String {
    moves
        .get(range)
        .unwrap_or_default()
        .iter()
        .map(|mv| to_extended(*mv))
        .collect::<Vec<_>>()
        .join(" ")
}

fn castle_text(mv: Move) -> Option<String> {
    let base = match mv.move_type() {
        MoveType::KingsideCastle => "O-O",
        MoveType::QueensideCastle => "O-O-O",
        _ => return None,
    };
    Some(if mv.is_check() { format!("{base}+") } else { base.to_owned() })
}

fn push_piece_letter(out: &mut String, mv: Move) {
    if let Some(piece) = mv.piece_moved().filter(|piece| *piece != PieceKind::Pawn) {
        out.push(piece.upper_letter());
    }
}

fn push_destination_and_suffixes(out: &mut String, mv: Move) {
    out.push_str(square_to_algebraic(mv.to_index()));
    if let Some(piece) = mv.promoted_piece() {
        out.push(piece.upper_letter());
    }
    if mv.is_check() {
        out.push('+');
    }
}

#[cfg(test)]
mod tests {
    use super::{format_move_list, to_coordinate, to_extended, to_san, try_to_san, NO_MOVE_TEXT};
    use crate::chess_errors::NotationError;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::position::Position;
    use crate::moves::attack_tables::BitboardAttacks;
    use crate::moves::chess_move::{Move, MoveType};
    use crate::notation::notation_parser::{parse_move, LegalityCheck};
    use crate::utils::algebraic::algebraic_to_square;
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("valid square")
    }

    fn legal_move(game: &mut GameState, from: &str, to: &str) -> Move {
        game.legal_moves()
            .into_iter()
            .find(|mv| mv.from_index() == sq(from) && mv.to_index() == sq(to))
            .unwrap_or_else(|| panic!("{from}{to} should be legal"))
    }

    #[test]
    fn coordinate_form_appends_lowercase_promotion() {
        let mv = Move::new(sq("e7"), sq("e8"), PieceKind::Pawn, false, false, MoveType::PromoteQueen)
            .expect("valid move");
        assert_eq!(to_coordinate(mv), "e7e8q");
        assert_eq!(to_coordinate(Move::NONE), NO_MOVE_TEXT);
        assert_eq!(to_coordinate(Move::INVALID), NO_MOVE_TEXT);
    }

    #[test]
    fn extended_form_is_context_free() {
        let knight = Move::new(sq("g1"), sq("f3"), PieceKind::Knight, false, false, MoveType::Normal)
            .expect("valid move");
        assert_eq!(to_extended(knight), "Ng1-f3");

        let capture_promotion =
            Move::new(sq("b7"), sq("a8"), PieceKind::Pawn, true, true, MoveType::PromoteRook)
                .expect("valid move");
        assert_eq!(to_extended(capture_promotion), "b7xa8R+");

        let castle = Move::new(sq("e8"), sq("c8"), PieceKind::King, false, true, MoveType::QueensideCastle)
            .expect("valid move");
        assert_eq!(to_extended(castle), "O-O-O+");
        assert_eq!(to_extended(Move::INVALID), NO_MOVE_TEXT);
    }

    #[test]
    fn san_without_ambiguity_has_no_origin() {
        let mut game = GameState::new_game();
        let nf3 = legal_move(&mut game, "g1", "f3");
        assert_eq!(to_san(&mut game, nf3), "Nf3");
        let e4 = legal_move(&mut game, "e2", "e4");
        assert_eq!(to_san(&mut game, e4), "e4");
    }

    #[test]
    fn san_uses_file_when_knights_share_a_rank() {
        // Knights on b1 and f1 both reach d2.
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1").expect("FEN should parse");
        let from_b = legal_move(&mut game, "b1", "d2");
        let from_f = legal_move(&mut game, "f1", "d2");
        assert_eq!(to_san(&mut game, from_b), "Nbd2");
        assert_eq!(to_san(&mut game, from_f), "Nfd2");
    }

    #[test]
    fn san_uses_rank_when_rooks_share_a_file() {
        // Rooks on a1 and a5 both reach a3.
        let mut game = GameState::from_fen("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let low = legal_move(&mut game, "a1", "a3");
        let high = legal_move(&mut game, "a5", "a3");
        assert_eq!(to_san(&mut game, low), "R1a3");
        assert_eq!(to_san(&mut game, high), "R5a3");
    }

    #[test]
    fn san_uses_full_square_when_three_queens_converge() {
        // Queens on h4, e4 and h1 all reach e1: e4 shares the rank with h4,
        // h1 shares the file with h4.
        let mut game = GameState::from_fen("8/8/k7/8/4Q2Q/8/8/2K4Q w - - 0 1").expect("FEN should parse");
        let h4 = legal_move(&mut game, "h4", "e1");
        assert_eq!(to_san(&mut game, h4), "Qh4e1");
        let e4 = legal_move(&mut game, "e4", "e1");
        assert_eq!(to_san(&mut game, e4), "Qee1");
        let h1 = legal_move(&mut game, "h1", "e1");
        assert_eq!(to_san(&mut game, h1), "Q1e1");
    }

    #[test]
    fn san_pawn_captures_always_name_the_file() {
        let mut game =
            GameState::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let exd5 = legal_move(&mut game, "e4", "d5");
        assert_eq!(to_san(&mut game, exd5), "exd5");
    }

    #[test]
    fn san_promotions_do_not_disambiguate_against_themselves() {
        let mut game = GameState::from_fen("1r5k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let moves = game.legal_moves();
        let push_knight = moves
            .iter()
            .copied()
            .find(|mv| mv.to_index() == sq("a8") && mv.move_type() == MoveType::PromoteKnight)
            .expect("a8=N should be legal");
        assert_eq!(to_san(&mut game, push_knight), "a8N");

        let capture_queen = moves
            .iter()
            .copied()
            .find(|mv| mv.to_index() == sq("b8") && mv.move_type() == MoveType::PromoteQueen)
            .expect("axb8=Q should be legal");
        assert_eq!(to_san(&mut game, capture_queen), "axb8Q+");
    }

    #[test]
    fn san_castling_with_and_without_check() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let short = parse_move(&mut game, &BitboardAttacks, "O-O", LegalityCheck::Enforce)
            .expect("O-O should parse");
        assert_eq!(to_san(&mut game, short), "O-O");
        assert_eq!(to_extended(short), "O-O");

        // Castling long puts the rook on d1 against the king on d8.
        let mut checking =
            GameState::from_fen("3k4/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("FEN should parse");
        let long = parse_move(&mut checking, &BitboardAttacks, "O-O-O+", LegalityCheck::Enforce)
            .expect("O-O-O+ should parse");
        assert_eq!(to_san(&mut checking, long), "O-O-O+");
        assert_eq!(to_extended(long), "O-O-O+");
    }

    #[test]
    fn san_rejects_moves_outside_the_legal_set() {
        let mut game = GameState::new_game();
        let illegal = Move::new(sq("e2"), sq("e5"), PieceKind::Pawn, false, false, MoveType::Normal)
            .expect("valid move");
        assert_eq!(to_san(&mut game, illegal), NO_MOVE_TEXT);
        assert_eq!(
            try_to_san(&mut game, illegal),
            Err(NotationError::NotInLegalSet(illegal))
        );
        assert_eq!(to_san(&mut game, Move::NONE), NO_MOVE_TEXT);
        assert_eq!(to_san(&mut game, Move::INVALID), NO_MOVE_TEXT);
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn move_list_joins_extended_forms() {
        let moves = [
            Move::new(sq("e2"), sq("e4"), PieceKind::Pawn, false, false, MoveType::Normal)
                .expect("valid move"),
            Move::new(sq("e7"), sq("e5"), PieceKind::Pawn, false, false, MoveType::Normal)
                .expect("valid move"),
            Move::new(sq("g1"), sq("f3"), PieceKind::Knight, false, false, MoveType::Normal)
                .expect("valid move"),
        ];
        assert_eq!(format_move_list(&moves, 0..3), "e2-e4 e7-e5 Ng1-f3");
        assert_eq!(format_move_list(&moves, 1..2), "e7-e5");
        assert_eq!(format_move_list(&moves, 2..9), "");
    }

    #[test]
    fn random_playouts_round_trip_through_both_registers() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let mut game = GameState::new_game();
            for _ in 0..60 {
                let moves = game.legal_moves();
                let Some(&mv) = moves.choose(&mut rng) else {
                    break;
                };

                let san = to_san(&mut game, mv);
                let from_san = parse_move(&mut game, &BitboardAttacks, &san, LegalityCheck::Enforce);
                assert_eq!(from_san, Ok(mv), "SAN {san} should parse back");

                let coordinate = to_coordinate(mv);
                let from_coordinate =
                    parse_move(&mut game, &BitboardAttacks, &coordinate, LegalityCheck::Enforce)
                        .expect("coordinate text should parse back");
                assert_eq!(from_coordinate.from_index(), mv.from_index());
                assert_eq!(from_coordinate.to_index(), mv.to_index());
                assert_eq!(from_coordinate.move_type(), mv.move_type());

                assert!(game.make_move(mv));
            }
        }
    }
}
