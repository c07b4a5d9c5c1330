use std::fmt;

use log::debug;

use crate::error::{MoveParseError, PositionError};
use crate::movegen;
use crate::status::{self, GameStatus};
use crate::{Board, CastlingRights, Color, Move, MoveType, Piece, PieceType, Square};

/// One point in the game: board contents plus the state needed to continue
/// play from it.
///
/// A `Position` is never mutated once built. [`Position::apply`] returns the
/// successor as a new value, so sibling branches of a search tree can share
/// a parent freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl Position {
    pub fn starting() -> Self {
        Self {
            board: Board::starting(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Builds a position from its constituent fields and rejects anything
    /// that cannot arise in a legal game.
    pub fn from_record(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Result<Self, PositionError> {
        let position = Self::from_record_unchecked(
            board,
            side_to_move,
            castling_rights,
            en_passant,
            halfmove_clock,
            fullmove_number,
        );
        if let Err(err) = position.validate() {
            debug!("rejecting position record: {err}");
            return Err(err);
        }
        Ok(position)
    }

    /// Builds a position without validation. Move generation still works on
    /// the result, but a side without a king is never considered in check.
    pub fn from_record_unchecked(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        Self {
            board,
            side_to_move,
            castling_rights,
            en_passant,
            halfmove_clock,
            fullmove_number,
        }
    }

    pub fn validate(&self) -> Result<(), PositionError> {
        for color in [Color::White, Color::Black] {
            match self.board.count(Piece::new(PieceType::King, color)) {
                0 => return Err(PositionError::MissingKing(color)),
                1 => {}
                _ => return Err(PositionError::TooManyKings(color)),
            }
        }

        if let Some((sq, _)) = self
            .board
            .iter()
            .find(|(sq, p)| p.piece_type == PieceType::Pawn && (sq.rank == 0 || sq.rank == 7))
        {
            return Err(PositionError::PawnOnBackRank(sq));
        }

        self.validate_castling_rights()?;

        if let Some(target) = self.en_passant {
            if !self.en_passant_is_consistent(target) {
                return Err(PositionError::InvalidEnPassant(target));
            }
        }

        let waiting = self.side_to_move.opposite();
        if movegen::is_in_check(self, waiting) {
            return Err(PositionError::OpponentInCheck(waiting));
        }

        if self.fullmove_number == 0 {
            return Err(PositionError::ZeroFullMoveNumber);
        }

        Ok(())
    }

    fn validate_castling_rights(&self) -> Result<(), PositionError> {
        let rights = [
            (self.castling_rights.white_kingside, Color::White, 7, 'K'),
            (self.castling_rights.white_queenside, Color::White, 0, 'Q'),
            (self.castling_rights.black_kingside, Color::Black, 7, 'k'),
            (self.castling_rights.black_queenside, Color::Black, 0, 'q'),
        ];

        for (set, color, rook_file, right) in rights {
            if !set {
                continue;
            }
            let rank = color.back_rank();
            let king_home = self.board.get(Square { file: 4, rank });
            let rook_home = self.board.get(Square { file: rook_file, rank });
            if king_home != Some(Piece::new(PieceType::King, color))
                || rook_home != Some(Piece::new(PieceType::Rook, color))
            {
                return Err(PositionError::InvalidCastlingRights { right });
            }
        }

        Ok(())
    }

    fn en_passant_is_consistent(&self, target: Square) -> bool {
        let mover = self.side_to_move;
        let expected_rank = match mover {
            Color::White => 5,
            Color::Black => 2,
        };
        if target.rank != expected_rank || !self.board.is_empty(target) {
            return false;
        }

        let dir = mover.pawn_direction();
        let pushed_pawn = target
            .offset(0, -dir)
            .and_then(|sq| self.board.get(sq));
        let origin_empty = target
            .offset(0, dir)
            .map_or(false, |sq| self.board.is_empty(sq));

        pushed_pawn == Some(Piece::new(PieceType::Pawn, mover.opposite())) && origin_empty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        movegen::legal_moves(self)
    }

    pub fn is_in_check(&self) -> bool {
        movegen::is_in_check(self, self.side_to_move)
    }

    pub fn status(&self) -> GameStatus {
        status::game_status(self)
    }

    /// Returns the position after `mv`. The move must come from this
    /// position's move generator; the parent is left untouched.
    pub fn apply(&self, mv: &Move) -> Position {
        let mut next = self.clone();
        let mover = self.side_to_move;
        let piece = next.board.take(mv.from).unwrap_or(mv.piece);

        let captured = match mv.move_type {
            MoveType::EnPassant => next.board.take(Square { file: mv.to.file, rank: mv.from.rank }),
            _ => next.board.get(mv.to),
        };

        if mv.move_type == MoveType::Castle {
            let rank = mv.from.rank;
            let (rook_from, rook_to) = if mv.to.file == 6 { (7, 5) } else { (0, 3) };
            let rook = next.board.take(Square { file: rook_from, rank });
            next.board.set(Square { file: rook_to, rank }, rook);
        }

        let placed = match mv.promotion {
            Some(promotion) => Piece::new(promotion, piece.color),
            None => piece,
        };
        next.board.set(mv.to, Some(placed));

        if piece.piece_type == PieceType::King {
            next.castling_rights.clear(mover);
        }
        next.castling_rights.clear_corner(mv.from);
        next.castling_rights.clear_corner(mv.to);

        next.en_passant = match mv.move_type {
            MoveType::DoublePawnPush => mv.from.offset(0, mover.pawn_direction()),
            _ => None,
        };

        if piece.piece_type == PieceType::Pawn || captured.is_some() {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }

        if mover == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }
        next.side_to_move = mover.opposite();

        next
    }

    /// Resolves long-algebraic text (`e2e4`, `e7e8q`) against the legal moves.
    pub fn find_move(&self, text: &str) -> Result<Move, MoveParseError> {
        let malformed = || MoveParseError::Malformed(text.to_owned());
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(malformed());
        }

        let from = Square::from_algebraic(&text[0..2]).ok_or_else(malformed)?;
        let to = Square::from_algebraic(&text[2..4]).ok_or_else(malformed)?;
        let promotion = match text[4..].chars().next() {
            Some(c) => match PieceType::from_char(c) {
                Some(p) if PieceType::PROMOTIONS.contains(&p) => Some(p),
                _ => return Err(malformed()),
            },
            None => None,
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
            .ok_or_else(|| MoveParseError::Illegal(text.to_owned()))
    }
}

/// Renders the position as FEN.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::fen::to_fen(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn kings_only() -> Board {
        let mut board = Board::empty();
        board.set(sq("e1"), Some(Piece::new(PieceType::King, Color::White)));
        board.set(sq("e8"), Some(Piece::new(PieceType::King, Color::Black)));
        board
    }

    #[test]
    fn apply_returns_a_new_position() {
        let start = Position::starting();
        let mv = start.find_move("e2e4").unwrap();
        let next = start.apply(&mv);

        assert_eq!(start, Position::starting());
        assert_eq!(next.piece_at(sq("e4")), Some(Piece::new(PieceType::Pawn, Color::White)));
        assert!(next.piece_at(sq("e2")).is_none());
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.en_passant(), Some(sq("e3")));
        assert_eq!(next.fullmove_number(), 1);
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn clocks_advance() {
        let start = Position::starting();
        let after_nf3 = start.apply(&start.find_move("g1f3").unwrap());
        assert_eq!(after_nf3.halfmove_clock(), 1);
        assert_eq!(after_nf3.fullmove_number(), 1);
        let after_nf6 = after_nf3.apply(&after_nf3.find_move("g8f6").unwrap());
        assert_eq!(after_nf6.halfmove_clock(), 2);
        assert_eq!(after_nf6.fullmove_number(), 2);
        assert!(after_nf6.en_passant().is_none());
    }

    #[test]
    fn capture_resets_halfmove_clock() {
        let position = Position::from_str("4k3/8/8/8/8/8/r7/R3K3 w Q - 5 20").unwrap();
        let quiet = position.apply(&position.find_move("e1f1").unwrap());
        assert_eq!(quiet.halfmove_clock(), 6);
        let capture = position.apply(&position.find_move("a1a2").unwrap());
        assert_eq!(capture.halfmove_clock(), 0);
        assert_eq!(capture.fullmove_number(), 20);
    }

    #[test]
    fn clocks_saturate_at_their_maximum() {
        let white = Position::from_str("4k3/8/8/8/8/8/8/R3K3 w Q - 4294967295 1").unwrap();
        let after = white.apply(&white.find_move("a1a2").unwrap());
        assert_eq!(after.halfmove_clock(), u32::MAX);
        assert!(!white.legal_moves().is_empty());

        let black = Position::from_str("4k3/8/8/8/8/8/8/4K2R b K - 0 4294967295").unwrap();
        let after = black.apply(&black.find_move("e8d8").unwrap());
        assert_eq!(after.fullmove_number(), u32::MAX);
        assert_eq!(after.halfmove_clock(), 1);
    }

    #[test]
    fn rejects_missing_and_extra_kings() {
        let mut board = kings_only();
        board.set(sq("e8"), None);
        let err = Position::from_record(board, Color::White, CastlingRights::none(), None, 0, 1)
            .unwrap_err();
        assert_eq!(err, PositionError::MissingKing(Color::Black));

        let mut board = kings_only();
        board.set(sq("a1"), Some(Piece::new(PieceType::King, Color::White)));
        let err = Position::from_record(board, Color::White, CastlingRights::none(), None, 0, 1)
            .unwrap_err();
        assert_eq!(err, PositionError::TooManyKings(Color::White));
    }

    #[test]
    fn rejects_castling_right_without_rook() {
        let err = Position::from_record(
            kings_only(),
            Color::White,
            CastlingRights::default(),
            None,
            0,
            1,
        )
        .unwrap_err();
        assert_eq!(err, PositionError::InvalidCastlingRights { right: 'K' });
    }

    #[test]
    fn rejects_pawn_on_back_rank_and_zero_move_number() {
        let mut board = kings_only();
        board.set(sq("a8"), Some(Piece::new(PieceType::Pawn, Color::White)));
        let err = Position::from_record(board, Color::White, CastlingRights::none(), None, 0, 1)
            .unwrap_err();
        assert_eq!(err, PositionError::PawnOnBackRank(sq("a8")));

        let err = Position::from_record(kings_only(), Color::White, CastlingRights::none(), None, 0, 0)
            .unwrap_err();
        assert_eq!(err, PositionError::ZeroFullMoveNumber);
    }

    #[test]
    fn rejects_side_not_to_move_in_check() {
        let mut board = kings_only();
        board.set(sq("e4"), Some(Piece::new(PieceType::Rook, Color::White)));
        let err = Position::from_record(board, Color::White, CastlingRights::none(), None, 0, 1)
            .unwrap_err();
        assert_eq!(err, PositionError::OpponentInCheck(Color::Black));
    }

    #[test]
    fn rejects_inconsistent_en_passant_target() {
        let err = Position::from_record(
            kings_only(),
            Color::White,
            CastlingRights::none(),
            Some(sq("d6")),
            0,
            1,
        )
        .unwrap_err();
        assert_eq!(err, PositionError::InvalidEnPassant(sq("d6")));
    }

    #[test]
    fn unchecked_position_without_king_generates_moves() {
        let mut board = Board::empty();
        board.set(sq("a1"), Some(Piece::new(PieceType::Rook, Color::White)));
        board.set(sq("h8"), Some(Piece::new(PieceType::King, Color::Black)));
        let position = Position::from_record_unchecked(
            board,
            Color::White,
            CastlingRights::none(),
            None,
            0,
            1,
        );
        assert!(position.validate().is_err());
        assert!(!position.is_in_check());
        assert_eq!(position.legal_moves().len(), 14);
    }

    #[test]
    fn find_move_rejects_bad_text() {
        let start = Position::starting();
        assert_eq!(
            start.find_move("e2e5"),
            Err(MoveParseError::Illegal("e2e5".to_owned()))
        );
        assert_eq!(
            start.find_move("e2"),
            Err(MoveParseError::Malformed("e2".to_owned()))
        );
        assert_eq!(
            start.find_move("e7e8k"),
            Err(MoveParseError::Malformed("e7e8k".to_owned()))
        );
    }
}
