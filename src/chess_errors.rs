//! Errors used throughout the notation layer.
//!
//! Every failure here is recoverable by the caller: retry with different
//! input, fall back to coordinate text, or prompt for re-entry. The sentinel
//! wrappers in `notation` collapse these into `Move::INVALID` and `"none"`
//! for callers that only care whether a move resolved.

use thiserror::Error;

use crate::game_state::chess_types::Square;
use crate::moves::chess_move::Move;

pub type NotationResult<T> = Result<T, NotationError>;

/// Failure to turn text into a move, or a move into strict algebraic text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// The token is empty, non-ASCII, or has no parseable destination square.
    #[error("malformed move text: {0:?}")]
    Malformed(String),

    /// No piece of the side to move matches the textual pattern.
    #[error("no origin square resolves move text {0:?}")]
    UnresolvedOrigin(String),

    /// Candidates existed but every one of them failed the legality probe.
    #[error("no legal move matches move text {0:?}")]
    IllegalMove(String),

    /// The move handed to the strict algebraic formatter is not legal here.
    #[error("move {0} is not in the legal move list")]
    NotInLegalSet(Move),
}

/// Rejected field values for the validated move constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveEncodingError {
    #[error("square index {0} is outside 0..=63")]
    SquareOutOfRange(Square),

    #[error("origin and destination are both square {0}")]
    NullMove(Square),
}

/// FEN loading failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),

    #[error("FEN has extra trailing fields")]
    TrailingFields,

    #[error("invalid board layout: {0}")]
    InvalidBoard(String),

    #[error("invalid side-to-move field: {0}")]
    InvalidSideToMove(String),

    #[error("invalid castling rights character: {0}")]
    InvalidCastling(char),

    #[error("invalid en-passant square: {0}")]
    InvalidEnPassant(String),

    #[error("invalid move counter: {0}")]
    InvalidCounter(String),
}
