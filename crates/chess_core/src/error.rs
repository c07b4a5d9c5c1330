use thiserror::Error;

use crate::{Color, Square};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square: {0:?}")]
pub struct SquareParseError(pub String);

/// Reasons a position is rejected by [`crate::Position::from_record`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("{0} has no king")]
    MissingKing(Color),
    #[error("{0} has more than one king")]
    TooManyKings(Color),
    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),
    #[error("castling right {right} requires king and rook on their home squares")]
    InvalidCastlingRights { right: char },
    #[error("en passant target {0} is inconsistent with the board")]
    InvalidEnPassant(Square),
    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
    #[error("full-move number must be at least 1")]
    ZeroFullMoveNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),
    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: u8 },
    #[error("invalid piece character {0:?}")]
    InvalidPiece(char),
    #[error("invalid side to move {0:?}")]
    InvalidSideToMove(String),
    #[error("invalid castling field {0:?}")]
    InvalidCastling(String),
    #[error("invalid en passant field {0:?}")]
    InvalidEnPassant(String),
    #[error("invalid half-move clock {0:?}")]
    InvalidHalfMoveClock(String),
    #[error("invalid full-move number {0:?}")]
    InvalidFullMoveNumber(String),
    #[error(transparent)]
    InvalidPosition(#[from] PositionError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("malformed move text {0:?}")]
    Malformed(String),
    #[error("{0} is not a legal move in this position")]
    Illegal(String),
}
