use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::{AttackTables, BitboardAttacks};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Looks outward from `square` with each piece's pattern and intersects with
/// the attacker's pieces of that kind.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attacks = BitboardAttacks;
    let theirs = |piece: PieceKind| game_state.pieces[attacker_color.index()][piece.index()];
    let occupancy = game_state.occupancy_all;

    // A pawn of the attacker's color attacks `square` from wherever a pawn of
    // the defending color on `square` would attack.
    if attacks.pawn(attacker_color.opposite(), square) & theirs(PieceKind::Pawn) != 0 {
        return true;
    }
    if attacks.knight(square) & theirs(PieceKind::Knight) != 0 {
        return true;
    }
    if attacks.king(square) & theirs(PieceKind::King) != 0 {
        return true;
    }

    let diagonal = theirs(PieceKind::Bishop) | theirs(PieceKind::Queen);
    if attacks.bishop(square, occupancy) & diagonal != 0 {
        return true;
    }

    let straight = theirs(PieceKind::Rook) | theirs(PieceKind::Queen);
    attacks.rook(square, occupancy) & straight != 0
}

#[cfg(test)]
mod tests {
    use super::{is_king_in_check, is_square_attacked};
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_attacks() {
        let game = GameState::new_game();
        // e3 is covered by light pawns, e5 is not.
        assert!(is_square_attacked(&game, 20, Color::Light));
        assert!(!is_square_attacked(&game, 36, Color::Light));
        assert!(is_square_attacked(&game, 44, Color::Dark));
        assert!(!is_king_in_check(&game, Color::Light));
    }

    #[test]
    fn slider_check_is_blocked_by_interposed_piece() {
        let open = GameState::from_fen("4r2k/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_king_in_check(&open, Color::Light));

        let blocked =
            GameState::from_fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(!is_king_in_check(&blocked, Color::Light));
    }
}
