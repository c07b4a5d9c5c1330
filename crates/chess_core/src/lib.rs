// Core chess rules: board state, move generation and game status
pub mod board;
pub mod error;
pub mod fen;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod square;
pub mod status;

// Re-export main types for convenience
pub use board::{Board, CastlingRights};
pub use error::{FenError, MoveParseError, PositionError, SquareParseError};
pub use fen::{parse_fen, to_fen, STARTING_FEN};
pub use movegen::{is_in_check, is_square_attacked, legal_moves, perft, pseudo_legal_moves};
pub use moves::{Move, MoveType};
pub use piece::{Color, Piece, PieceType};
pub use position::Position;
pub use square::Square;
pub use status::{game_status, DrawReason, GameStatus};
