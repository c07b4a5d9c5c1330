//! Move generation.
//!
//! Moves are produced in a fixed order: pieces in board scan order
//! (a1, b1, ..., h8), then each piece's directions in the order of the
//! tables below, then promotion choices queen, rook, bishop, knight.
//! Search relies on this order being stable for reproducible pruning.

use crate::{Color, Move, MoveType, Piece, PieceType, Position, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Every legal move for the side to move.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let mover = position.side_to_move();
    pseudo_legal_moves(position, mover)
        .into_iter()
        .filter(|mv| !is_in_check(&position.apply(mv), mover))
        .collect()
}

/// Moves for `color` that follow the piece rules but may leave its own king
/// attacked. Castling and en passant are only produced for the side to move.
pub fn pseudo_legal_moves(position: &Position, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (from, piece) in position.board().pieces_of(color) {
        piece_moves(position, from, piece, &mut moves);
    }
    moves
}

fn piece_moves(position: &Position, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    match piece.piece_type {
        PieceType::Pawn => pawn_moves(position, from, piece, moves),
        PieceType::Knight => step_moves(position, from, piece, &KNIGHT_OFFSETS, moves),
        PieceType::Bishop => slide_moves(position, from, piece, &BISHOP_DIRECTIONS, moves),
        PieceType::Rook => slide_moves(position, from, piece, &ROOK_DIRECTIONS, moves),
        PieceType::Queen => {
            slide_moves(position, from, piece, &ROOK_DIRECTIONS, moves);
            slide_moves(position, from, piece, &BISHOP_DIRECTIONS, moves);
        }
        PieceType::King => {
            step_moves(position, from, piece, &KING_OFFSETS, moves);
            castling_moves(position, from, piece, moves);
        }
    }
}

fn pawn_moves(position: &Position, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let color = piece.color;
    let dir = color.pawn_direction();
    let board = position.board();

    if let Some(one) = from.offset(0, dir) {
        if board.is_empty(one) {
            push_pawn_move(from, one, piece, MoveType::Normal, moves);

            if from.rank == color.pawn_start_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if board.is_empty(two) {
                        moves.push(Move::new(from, two, piece, MoveType::DoublePawnPush));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(target) = from.offset(df, dir) else {
            continue;
        };
        match board.get(target) {
            Some(victim) if victim.color != color => {
                push_pawn_move(from, target, piece, MoveType::Capture, moves);
            }
            None if color == position.side_to_move() && position.en_passant() == Some(target) => {
                moves.push(Move::new(from, target, piece, MoveType::EnPassant));
            }
            _ => {}
        }
    }
}

/// Expands a pawn move reaching the last rank into one move per promotion.
fn push_pawn_move(from: Square, to: Square, piece: Piece, move_type: MoveType, moves: &mut Vec<Move>) {
    if to.rank == piece.color.promotion_rank() {
        for promotion in PieceType::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, piece, move_type, promotion));
        }
    } else {
        moves.push(Move::new(from, to, piece, move_type));
    }
}

fn step_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in offsets {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match position.piece_at(to) {
            None => moves.push(Move::new(from, to, piece, MoveType::Normal)),
            Some(other) if other.color != piece.color => {
                moves.push(Move::new(from, to, piece, MoveType::Capture))
            }
            Some(_) => {}
        }
    }
}

fn slide_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match position.piece_at(to) {
                None => moves.push(Move::new(from, to, piece, MoveType::Normal)),
                Some(other) => {
                    if other.color != piece.color {
                        moves.push(Move::new(from, to, piece, MoveType::Capture));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

fn castling_moves(position: &Position, from: Square, king: Piece, moves: &mut Vec<Move>) {
    let color = king.color;
    if color != position.side_to_move() {
        return;
    }

    let rank = color.back_rank();
    if from != (Square { file: 4, rank }) {
        return;
    }

    let rights = position.castling_rights();
    let rook = Some(Piece::new(PieceType::Rook, color));
    let enemy = color.opposite();
    let square = |file: u8| Square { file, rank };
    let is_empty = |file: u8| position.board().is_empty(square(file));
    let is_safe = |file: u8| !is_square_attacked(position, square(file), enemy);

    if rights.kingside(color)
        && position.piece_at(square(7)) == rook
        && is_empty(5)
        && is_empty(6)
        && is_safe(4)
        && is_safe(5)
        && is_safe(6)
    {
        moves.push(Move::castle(from, square(6), king));
    }

    if rights.queenside(color)
        && position.piece_at(square(0)) == rook
        && is_empty(1)
        && is_empty(2)
        && is_empty(3)
        && is_safe(4)
        && is_safe(3)
        && is_safe(2)
    {
        moves.push(Move::castle(from, square(2), king));
    }
}

/// Whether any piece of colour `by` attacks `target`.
///
/// Looks outward from `target` using the generation tables, so it never
/// consults legality and works for empty squares as well.
pub fn is_square_attacked(position: &Position, target: Square, by: Color) -> bool {
    let board = position.board();
    let holds = |sq: Option<Square>, piece_type: PieceType| {
        sq.and_then(|sq| board.get(sq)) == Some(Piece::new(piece_type, by))
    };

    let behind = -by.pawn_direction();
    if holds(target.offset(-1, behind), PieceType::Pawn)
        || holds(target.offset(1, behind), PieceType::Pawn)
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), PieceType::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), PieceType::King))
    {
        return true;
    }

    let slider_hits = |directions: &[(i8, i8)], piece_type: PieceType| {
        directions.iter().any(|&(df, dr)| {
            let mut current = target;
            while let Some(next) = current.offset(df, dr) {
                if let Some(piece) = board.get(next) {
                    return piece.color == by
                        && (piece.piece_type == piece_type || piece.piece_type == PieceType::Queen);
                }
                current = next;
            }
            false
        })
    };

    slider_hits(&ROOK_DIRECTIONS[..], PieceType::Rook)
        || slider_hits(&BISHOP_DIRECTIONS[..], PieceType::Bishop)
}

/// Whether `color`'s king is attacked. A side without a king is never in check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    position
        .board()
        .king_square(color)
        .map_or(false, |king| is_square_attacked(position, king, color.opposite()))
}

/// Counts leaf nodes of the legal move tree to `depth`.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|mv| perft(&position.apply(mv), depth - 1))
        .sum()
}
