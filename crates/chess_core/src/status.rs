use crate::movegen;
use crate::{Color, Move, PieceType, Position};

/// Half-move clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { loser: Color },
    Stalemate,
    Draw(DrawReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
    InsufficientMaterial,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// Classifies `position` given its already generated legal moves.
    pub fn classify(position: &Position, legal_moves: &[Move]) -> Self {
        if legal_moves.is_empty() {
            return if position.is_in_check() {
                GameStatus::Checkmate { loser: position.side_to_move() }
            } else {
                GameStatus::Stalemate
            };
        }

        if position.halfmove_clock() >= FIFTY_MOVE_LIMIT {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }

        if has_insufficient_material(position) {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }

        GameStatus::Ongoing
    }
}

pub fn game_status(position: &Position) -> GameStatus {
    GameStatus::classify(position, &movegen::legal_moves(position))
}

/// Neither side can ever deliver mate: bare kings, a single minor piece, or
/// only bishops that all stand on squares of one colour.
pub fn has_insufficient_material(position: &Position) -> bool {
    let mut minors = Vec::new();
    for (square, piece) in position.board().iter() {
        match piece.piece_type {
            PieceType::King => {}
            PieceType::Knight | PieceType::Bishop => minors.push((square, piece.piece_type)),
            PieceType::Pawn | PieceType::Rook | PieceType::Queen => return false,
        }
    }

    match minors.as_slice() {
        [] | [_] => true,
        [(first, _), ..] => minors
            .iter()
            .all(|(sq, t)| *t == PieceType::Bishop && sq.is_light() == first.is_light()),
    }
}
