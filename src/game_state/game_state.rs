//! Core incremental board state representation.
//!
//! `GameState` is the board collaborator the notation layer probes. It stores
//! piece bitboards, occupancy caches, turn/state flags, clocks, and the undo
//! stack used by make/unmake style legality checks.

use crate::chess_errors::FenError;
use crate::game_state::chess_types::*;
use crate::utils::fen_parser::parse_fen;

/// Incremental game state optimized for fast move making/unmaking.
#[derive(Debug, Clone)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut game_state = Self::new_empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, piece) in back_rank.into_iter().enumerate() {
            game_state.pieces[Color::Light.index()][piece.index()] |= 1u64 << file;
            game_state.pieces[Color::Dark.index()][piece.index()] |= 1u64 << (56 + file);
        }
        game_state.pieces[Color::Light.index()][PieceKind::Pawn.index()] = 0xFF << 8;
        game_state.pieces[Color::Dark.index()][PieceKind::Pawn.index()] = 0xFF << 48;
        game_state.castling_rights = CASTLE_LIGHT_KINGSIDE
            | CASTLE_LIGHT_QUEENSIDE
            | CASTLE_DARK_KINGSIDE
            | CASTLE_DARK_QUEENSIDE;
        game_state.recalc_occupancy();
        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    /// Which piece (of either color) stands on `square`.
    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = 1u64 << square;
        [Color::Light, Color::Dark].into_iter().find_map(|color| {
            ALL_PIECE_KINDS
                .into_iter()
                .find(|piece| self.pieces[color.index()][piece.index()] & mask != 0)
                .map(|piece| (color, piece))
        })
    }

    /// Number of moves that can currently be taken back.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in [Color::Light, Color::Dark] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::Light.index()]
            | self.occupancy_by_color[Color::Dark.index()];
    }
}
