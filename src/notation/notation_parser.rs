//! Text-to-move parser for coordinate and algebraic notation.
//!
//! Accepts `e2e4`, `e7e8q`, `Nf3`, `Nbd2`, `R1a3`, `exd5`, `e8=Q+`, `O-O`,
//! `0-0-0` and similar forms. The destination is always the last two
//! characters; origins are resolved as a bitmask of candidates using the
//! attack tables and occupancy of the position, then tried lowest square
//! first.

use crate::chess_errors::{NotationError, NotationResult};
use crate::game_state::chess_rules::{king_start_square, BACK_RANKS, FILE_MASKS, RANK_MASKS};
use crate::game_state::chess_types::{Color, PieceKind, Square, ALL_PIECE_KINDS};
use crate::move_generation::position::{Position, TrialMove};
use crate::moves::attack_tables::AttackTables;
use crate::moves::chess_move::{Move, MoveType};
use crate::utils::algebraic::{
    algebraic_to_bitboard, algebraic_to_square, file_index, pop_lowest_square, rank_index,
};

/// Whether parsed candidates are probed against the position before being
/// accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LegalityCheck {
    /// Return the first candidate that applies without leaving the mover in check.
    #[default]
    Enforce,
    /// Return the first syntactically constructed candidate.
    Skip,
}

/// Parse `text` against `position`.
///
/// With `LegalityCheck::Enforce` the position is mutated during probing and
/// always restored before returning.
pub fn parse_move<P, A>(
    position: &mut P,
    attacks: &A,
    text: &str,
    legality: LegalityCheck,
) -> NotationResult<Move>
where
    P: Position + ?Sized,
    A: AttackTables + ?Sized,
{
    let result = parse_move_inner(position, attacks, text, legality);
    if let Err(err) = &result {
        tracing::debug!(input = text, error = %err, "move text did not resolve");
    }
    result
}

/// Sentinel flavour of [`parse_move`]: any failure yields `Move::INVALID`.
pub fn move_from_string<P, A>(
    position: &mut P,
    attacks: &A,
    text: &str,
    legality: LegalityCheck,
) -> Move
where
    P: Position + ?Sized,
    A: AttackTables + ?Sized,
{
    parse_move(position, attacks, text, legality).unwrap_or(Move::INVALID)
}

fn parse_move_inner<P, A>(
    position: &mut P,
    attacks: &A,
    text: &str,
    legality: LegalityCheck,
) -> NotationResult<Move>
where
    P: Position + ?Sized,
    A: AttackTables + ?Sized,
{
    let malformed = || NotationError::Malformed(text.to_owned());
    if !text.is_ascii() {
        return Err(malformed());
    }

    let gives_check = text.contains(['+', '#']);
    let side = position.side_to_move();
    let mut token = normalize(text);
    rewrite_castling(&mut token, side);

    let promotion = token
        .chars()
        .last()
        .and_then(|ch| PieceKind::from_san_letter(ch.to_ascii_uppercase()))
        .and_then(MoveType::promotion_to);
    if promotion.is_some() {
        token.pop();
    }

    if token.len() < 2 {
        return Err(malformed());
    }
    let to = algebraic_to_square(&token[token.len() - 2..]).ok_or_else(malformed)?;

    let origins = resolve_origins(&*position, attacks, &token, to).ok_or_else(malformed)?;
    if origins == 0 {
        return Err(NotationError::UnresolvedOrigin(text.to_owned()));
    }

    let mut remaining = origins;
    while let Some(from) = pop_lowest_square(&mut remaining) {
        let candidate = build_candidate(&*position, from, to, promotion, gives_check);
        match legality {
            LegalityCheck::Skip => return Ok(candidate),
            LegalityCheck::Enforce => {
                if TrialMove::apply(position, candidate).is_legal() {
                    return Ok(candidate);
                }
                tracing::trace!(input = text, candidate = %candidate, "candidate rejected by legality probe");
            }
        }
    }

    Err(NotationError::IllegalMove(text.to_owned()))
}

/// Drop readability punctuation and fold both castling spellings to `o`.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|ch| !matches!(ch, '+' | '#' | 'x' | '-' | '=') && !ch.is_ascii_whitespace())
        .map(|ch| if matches!(ch, '0' | 'O') { 'o' } else { ch })
        .collect()
}

fn rewrite_castling(token: &mut String, side: Color) {
    let rewritten = match (token.as_str(), side) {
        ("ooo", Color::Light) => "e1c1",
        ("ooo", Color::Dark) => "e8c8",
        ("oo", Color::Light) => "e1g1",
        ("oo", Color::Dark) => "e8g8",
        _ => return,
    };
    *token = rewritten.to_owned();
}

/// Candidate origin squares for `token` whose last two characters name `to`.
/// `None` means the token shape cannot be interpreted at all.
fn resolve_origins<P, A>(position: &P, attacks: &A, token: &str, to: Square) -> Option<u64>
where
    P: Position + ?Sized,
    A: AttackTables + ?Sized,
{
    let side = position.side_to_move();
    let all = position.occupancy_all();
    let to_mask = 1u64 << to;

    let first = token.chars().next()?;
    let (mut origins, rest) = match PieceKind::from_san_letter(first) {
        Some(piece) => {
            let reach = match piece {
                PieceKind::Knight => attacks.knight(to),
                PieceKind::King => attacks.king(to),
                PieceKind::Rook => attacks.rook(to, all),
                PieceKind::Bishop => attacks.bishop(to, all),
                _ => attacks.queen(to, all),
            };
            (position.own_pieces(piece) & reach, &token[1..])
        }
        None => {
            let pawns = position.own_pieces(PieceKind::Pawn);
            let origins = match token.len() {
                2 => {
                    let (one_back, two_back) = match side {
                        Color::Light => (to_mask >> 8, to_mask >> 16),
                        Color::Dark => (to_mask << 8, to_mask << 16),
                    };
                    let double = if one_back & all == 0 { two_back } else { 0 };
                    pawns & (one_back | double)
                }
                // Pawns of the mover sit where an opposing pawn on `to` would attack.
                3 => pawns & attacks.pawn(side.opposite(), to),
                _ => 0,
            };
            (origins, token)
        }
    };

    match rest.len() {
        2 => {}
        3 => {
            let disambiguator = rest.as_bytes()[0];
            if let Some(file) = file_index(disambiguator) {
                origins &= FILE_MASKS[usize::from(file)];
            } else if let Some(rank) = rank_index(disambiguator) {
                origins &= RANK_MASKS[usize::from(rank)];
            }
        }
        4 => origins = algebraic_to_bitboard(&rest[..2])?,
        _ => return None,
    }

    Some(origins)
}

fn build_candidate<P>(
    position: &P,
    from: Square,
    to: Square,
    promotion: Option<MoveType>,
    gives_check: bool,
) -> Move
where
    P: Position + ?Sized,
{
    let from_mask = 1u64 << from;
    let to_mask = 1u64 << to;
    let destination_occupied = position.occupancy_all() & to_mask != 0;

    let piece = ALL_PIECE_KINDS
        .into_iter()
        .find(|&piece| position.piece_type_occupancy(piece) & from_mask != 0);

    let mut move_type = promotion.unwrap_or(MoveType::Normal);
    let mut capture = destination_occupied;

    match piece {
        Some(PieceKind::Pawn) => {
            let straight = matches!(i16::from(to) - i16::from(from), 8 | -8 | 16 | -16);
            if !straight && !destination_occupied && !move_type.is_promotion() {
                move_type = MoveType::EnPassant;
                capture = true;
            }
            if to_mask & BACK_RANKS != 0 && !move_type.is_promotion() {
                move_type = MoveType::PromoteQueen;
            }
        }
        Some(PieceKind::King) if from == king_start_square(position.side_to_move()) => {
            if to == from + 2 {
                move_type = MoveType::KingsideCastle;
            } else if from >= 2 && to == from - 2 {
                move_type = MoveType::QueensideCastle;
            }
        }
        _ => {}
    }

    let piece_code = piece.map_or(0, PieceKind::code);
    Move::pack(from, to, piece_code, capture, gives_check, move_type)
}
