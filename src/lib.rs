//! Crate root module declarations for the Plum move-notation layer.
//!
//! The crate packs chess moves into a fixed-width integer and converts them
//! to and from coordinate, extended and strict algebraic text. A small
//! bitboard game state, attack tables and a legal move generator are
//! included as the board collaborators the notation code probes.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod attack_tables;
    pub mod chess_move;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod position;
}

pub mod notation {
    pub mod notation_formatter;
    pub mod notation_parser;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
}

pub use chess_errors::{FenError, MoveEncodingError, NotationError, NotationResult};
pub use game_state::chess_types::{Color, PieceKind, Square};
pub use game_state::game_state::GameState;
pub use move_generation::position::{Position, TrialMove};
pub use moves::attack_tables::{AttackTables, BitboardAttacks};
pub use moves::chess_move::{Move, MoveType};
pub use notation::notation_formatter::{
    format_move_list, to_coordinate, to_extended, to_san, try_to_san, NO_MOVE_TEXT,
};
pub use notation::notation_parser::{move_from_string, parse_move, LegalityCheck};
