//! Forsyth-Edwards Notation.
//!
//! Parsing is strict: all six fields are required and the resulting
//! position must pass [`Position::from_record`].

use std::str::FromStr;

use crate::error::FenError;
use crate::{Board, CastlingRights, Color, Piece, Position, Square};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(FenError::FieldCount(fields.len()));
    }

    let board = parse_board(fields[0])?;
    let side_to_move = parse_side_to_move(fields[1])?;
    let castling_rights = parse_castling_rights(fields[2])?;
    let en_passant = parse_en_passant(fields[3])?;
    let halfmove_clock = fields[4]
        .parse::<u32>()
        .map_err(|_| FenError::InvalidHalfMoveClock(fields[4].to_owned()))?;
    let fullmove_number = fields[5]
        .parse::<u32>()
        .map_err(|_| FenError::InvalidFullMoveNumber(fields[5].to_owned()))?;

    let position = Position::from_record(
        board,
        side_to_move,
        castling_rights,
        en_passant,
        halfmove_clock,
        fullmove_number,
    )?;
    Ok(position)
}

fn parse_board(layout: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = layout.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;

        for c in rank_str.chars() {
            if let Some(empty) = c.to_digit(10) {
                if !(1..=8).contains(&empty) {
                    return Err(FenError::RankWidth { rank: rank + 1 });
                }
                file += empty as u8;
            } else {
                let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece(c))?;
                let square = Square::new(file, rank).ok_or(FenError::RankWidth { rank: rank + 1 })?;
                board.set(square, Some(piece));
                file += 1;
            }

            if file > 8 {
                return Err(FenError::RankWidth { rank: rank + 1 });
            }
        }

        if file != 8 {
            return Err(FenError::RankWidth { rank: rank + 1 });
        }
    }

    Ok(board)
}

fn parse_side_to_move(field: &str) -> Result<Color, FenError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::InvalidSideToMove(field.to_owned())),
    }
}

fn parse_castling_rights(field: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::none();
    if field == "-" {
        return Ok(rights);
    }

    let invalid = || FenError::InvalidCastling(field.to_owned());
    for c in field.chars() {
        let flag = match c {
            'K' => &mut rights.white_kingside,
            'Q' => &mut rights.white_queenside,
            'k' => &mut rights.black_kingside,
            'q' => &mut rights.black_queenside,
            _ => return Err(invalid()),
        };
        if *flag {
            return Err(invalid());
        }
        *flag = true;
    }

    if rights.any() {
        Ok(rights)
    } else {
        Err(invalid())
    }
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    Square::from_algebraic(field)
        .map(Some)
        .ok_or_else(|| FenError::InvalidEnPassant(field.to_owned()))
}

pub fn to_fen(position: &Position) -> String {
    let board = position.board();
    let mut layout = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            match board.get(Square { file, rank }) {
                Some(piece) => {
                    if empty > 0 {
                        layout.push_str(&empty.to_string());
                        empty = 0;
                    }
                    layout.push(piece.to_fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            layout.push_str(&empty.to_string());
        }
        if rank > 0 {
            layout.push('/');
        }
    }

    let side = match position.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = position
        .en_passant()
        .map_or_else(|| "-".to_owned(), |sq| sq.to_string());

    format!(
        "{layout} {side} {} {en_passant} {} {}",
        position.castling_rights(),
        position.halfmove_clock(),
        position.fullmove_number()
    )
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fen(s)
    }
}
