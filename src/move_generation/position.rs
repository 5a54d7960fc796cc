//! Board collaborator interface consumed by the notation layer.
//!
//! The parser only needs occupancy queries plus a reversible apply step; the
//! strict algebraic formatter needs the legal move list. `GameState` is the
//! in-crate implementation.

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::Move;

pub trait Position {
    fn side_to_move(&self) -> Color;

    /// Bitboard of `color`'s pieces of kind `piece`.
    fn pieces(&self, color: Color, piece: PieceKind) -> u64;

    fn occupancy(&self, color: Color) -> u64;

    fn occupancy_all(&self) -> u64;

    /// Apply `mv`. Returns `false`, leaving the board untouched, when the move
    /// cannot be played or would leave the mover's own king in check.
    fn make_move(&mut self, mv: Move) -> bool;

    /// Revert the most recent successful `make_move`.
    fn unmake_move(&mut self);

    fn legal_moves(&mut self) -> Vec<Move>;

    #[inline]
    fn own_pieces(&self, piece: PieceKind) -> u64 {
        self.pieces(self.side_to_move(), piece)
    }

    /// Pieces of kind `piece` for both colors.
    #[inline]
    fn piece_type_occupancy(&self, piece: PieceKind) -> u64 {
        self.pieces(Color::Light, piece) | self.pieces(Color::Dark, piece)
    }

    #[inline]
    fn own_occupancy(&self) -> u64 {
        self.occupancy(self.side_to_move())
    }
}

/// Scoped legality probe: the move is applied on construction and reverted
/// when the guard drops, on every exit path.
pub struct TrialMove<'a, P: Position + ?Sized> {
    position: &'a mut P,
    applied: bool,
}

impl<'a, P: Position + ?Sized> TrialMove<'a, P> {
    pub fn apply(position: &'a mut P, mv: Move) -> Self {
        let applied = position.make_move(mv);
        Self { position, applied }
    }

    /// Whether the move applied without leaving the mover in check.
    #[inline]
    pub fn is_legal(&self) -> bool {
        self.applied
    }

    /// Read access to the position with the move applied.
    #[inline]
    pub fn position(&self) -> &P {
        self.position
    }
}

impl<P: Position + ?Sized> Drop for TrialMove<'_, P> {
    fn drop(&mut self) {
        if self.applied {
            self.position.unmake_move();
        }
    }
}

impl Position for GameState {
    #[inline]
    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    fn pieces(&self, color: Color, piece: PieceKind) -> u64 {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    fn occupancy_all(&self) -> u64 {
        self.occupancy_all
    }

    fn make_move(&mut self, mv: Move) -> bool {
        legal_move_apply::make_move(self, mv)
    }

    fn unmake_move(&mut self) {
        legal_move_apply::unmake_move(self);
    }

    fn legal_moves(&mut self) -> Vec<Move> {
        generate_legal_moves(self)
    }
}
