//! Packed move codec.
//!
//! Bit layout, low to high:
//!
//! ```text
//! bits  0..6   to square
//! bits  6..12  from square
//! bits 12..15  moved piece code (0 = none, 1 = pawn .. 6 = king)
//! bit  15      capture flag
//! bit  16      check flag
//! bits 17..20  move type
//! ```

use std::fmt;

use crate::chess_errors::MoveEncodingError;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

const TO_SHIFT: u32 = 0;
const FROM_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const MOVE_TYPE_SHIFT: u32 = 17;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x7;
const MOVE_TYPE_MASK: u32 = 0x7;

pub const CAPTURE_FLAG: u32 = 1 << 15;
pub const CHECK_FLAG: u32 = 1 << 16;

/// Special-move classification stored in the top three bits.
///
/// Promotions are ordered last so `is_promotion` is a single comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveType {
    Normal = 0,
    KingsideCastle = 1,
    QueensideCastle = 2,
    EnPassant = 3,
    PromoteQueen = 4,
    PromoteKnight = 5,
    PromoteBishop = 6,
    PromoteRook = 7,
}

impl MoveType {
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn from_code(code: u32) -> Self {
        match code & MOVE_TYPE_MASK {
            0 => MoveType::Normal,
            1 => MoveType::KingsideCastle,
            2 => MoveType::QueensideCastle,
            3 => MoveType::EnPassant,
            4 => MoveType::PromoteQueen,
            5 => MoveType::PromoteKnight,
            6 => MoveType::PromoteBishop,
            _ => MoveType::PromoteRook,
        }
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.code() >= MoveType::PromoteQueen.code()
    }

    #[inline]
    pub const fn promoted_piece(self) -> Option<PieceKind> {
        match self {
            MoveType::PromoteQueen => Some(PieceKind::Queen),
            MoveType::PromoteKnight => Some(PieceKind::Knight),
            MoveType::PromoteBishop => Some(PieceKind::Bishop),
            MoveType::PromoteRook => Some(PieceKind::Rook),
            _ => None,
        }
    }

    /// Promotion move type for `piece`, if a pawn may promote to it.
    #[inline]
    pub const fn promotion_to(piece: PieceKind) -> Option<Self> {
        match piece {
            PieceKind::Queen => Some(MoveType::PromoteQueen),
            PieceKind::Knight => Some(MoveType::PromoteKnight),
            PieceKind::Bishop => Some(MoveType::PromoteBishop),
            PieceKind::Rook => Some(MoveType::PromoteRook),
            _ => None,
        }
    }
}

/// A chess move packed into 20 bits of a `u32`.
///
/// Equality is bit-for-bit, so a parsed candidate can be compared directly
/// against entries of a legal move list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// "No move" sentinel.
    pub const NONE: Move = Move(0);
    /// "Unresolved/invalid" sentinel; lies outside the 20-bit encoding space.
    pub const INVALID: Move = Move(u32::MAX);

    /// Validated constructor.
    pub fn new(
        from: Square,
        to: Square,
        piece: PieceKind,
        capture: bool,
        check: bool,
        move_type: MoveType,
    ) -> Result<Self, MoveEncodingError> {
        for square in [from, to] {
            if square > 63 {
                return Err(MoveEncodingError::SquareOutOfRange(square));
            }
        }
        if from == to {
            return Err(MoveEncodingError::NullMove(from));
        }
        Ok(Self::pack(from, to, piece.code(), capture, check, move_type))
    }

    /// Unchecked pack for callers whose squares come from bitboard scans.
    #[inline]
    pub(crate) const fn pack(
        from: Square,
        to: Square,
        piece_code: u32,
        capture: bool,
        check: bool,
        move_type: MoveType,
    ) -> Self {
        let mut bits = ((to as u32) & SQUARE_MASK) << TO_SHIFT;
        bits |= ((from as u32) & SQUARE_MASK) << FROM_SHIFT;
        bits |= (piece_code & PIECE_MASK) << PIECE_SHIFT;
        if capture {
            bits |= CAPTURE_FLAG;
        }
        if check {
            bits |= CHECK_FLAG;
        }
        bits |= move_type.code() << MOVE_TYPE_SHIFT;
        Move(bits)
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 == Move::NONE.0 || self.0 == Move::INVALID.0
    }

    #[inline]
    pub const fn to_index(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn from_index(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to_square(self) -> u64 {
        1u64 << self.to_index()
    }

    #[inline]
    pub const fn from_square(self) -> u64 {
        1u64 << self.from_index()
    }

    #[inline]
    pub const fn piece_code(self) -> u32 {
        (self.0 >> PIECE_SHIFT) & PIECE_MASK
    }

    #[inline]
    pub const fn piece_moved(self) -> Option<PieceKind> {
        PieceKind::from_code(self.piece_code())
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.0 & CAPTURE_FLAG != 0
    }

    #[inline]
    pub const fn is_check(self) -> bool {
        self.0 & CHECK_FLAG != 0
    }

    #[inline]
    pub const fn move_type(self) -> MoveType {
        MoveType::from_code(self.0 >> MOVE_TYPE_SHIFT)
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.move_type().is_promotion()
    }

    #[inline]
    pub const fn promoted_piece(self) -> Option<PieceKind> {
        self.move_type().promoted_piece()
    }

    /// Capture or promotion.
    #[inline]
    pub const fn is_tactical(self) -> bool {
        self.is_capture() || self.is_promotion()
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(
            self.move_type(),
            MoveType::KingsideCastle | MoveType::QueensideCastle
        )
    }

    #[inline]
    const fn is_pawn(self) -> bool {
        self.piece_code() == PieceKind::Pawn.code()
    }

    /// Pawn move landing on the 7th or 8th rank of either side.
    #[inline]
    pub const fn is_pawn_push(self) -> bool {
        self.is_pawn() && (self.to_index() < 16 || self.to_index() > 47)
    }

    /// Pawn move landing on the mover's 6th, 7th or 8th rank.
    #[inline]
    pub const fn is_pawn_push_678(self) -> bool {
        self.is_pawn()
            && if self.from_index() < self.to_index() {
                self.to_index() >= 40
            } else {
                self.to_index() < 24
            }
    }

    /// Pawn move landing on the mover's 5th to 8th rank.
    #[inline]
    pub const fn is_pawn_push_5678(self) -> bool {
        self.is_pawn()
            && if self.from_index() < self.to_index() {
                self.to_index() >= 32
            } else {
                self.to_index() < 32
            }
    }

    /// Same move with the check flag replaced.
    #[inline]
    pub const fn with_check(self, check: bool) -> Self {
        if check {
            Move(self.0 | CHECK_FLAG)
        } else {
            Move(self.0 & !CHECK_FLAG)
        }
    }
}

/// Coordinate notation (`e2e4`, `e7e8q`); sentinels print as `none`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            return f.write_str("none");
        }
        f.write_str(square_to_algebraic(self.from_index()))?;
        f.write_str(square_to_algebraic(self.to_index()))?;
        if let Some(piece) = self.promoted_piece() {
            write!(f, "{}", piece.lower_letter())?;
        }
        Ok(())
    }
}
