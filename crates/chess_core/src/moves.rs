use std::fmt;

use crate::{Piece, PieceType, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub move_type: MoveType,
    pub promotion: Option<PieceType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Normal,
    Capture,
    DoublePawnPush,
    EnPassant,
    Castle,
}

impl Move {
    pub fn new(from: Square, to: Square, piece: Piece, move_type: MoveType) -> Self {
        Self {
            from,
            to,
            piece,
            move_type,
            promotion: None,
        }
    }

    pub fn with_promotion(
        from: Square,
        to: Square,
        piece: Piece,
        move_type: MoveType,
        promotion: PieceType,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            move_type,
            promotion: Some(promotion),
        }
    }

    pub fn castle(from: Square, to: Square, piece: Piece) -> Self {
        Self::new(from, to, piece, MoveType::Castle)
    }

    pub fn is_capture(&self) -> bool {
        matches!(self.move_type, MoveType::Capture | MoveType::EnPassant)
    }
}

/// Long-algebraic form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_char())?;
        }
        Ok(())
    }
}
