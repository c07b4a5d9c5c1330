use chess_core::{Color, GameStatus, PieceType, Position, Square};

// Material values in centipawns (100 = 1 pawn): the classic 1/3/3/5/9 scale.
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 300;
const BISHOP_VALUE: i32 = 300;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 0;

/// Score of a checkmated position, before any distance adjustment.
pub const MATE_SCORE: i32 = 100_000;
/// Stalemate and draws by rule.
pub const DRAW_SCORE: i32 = 0;
/// Strictly greater than any score the evaluator or search can produce.
pub const INFINITY: i32 = 1_000_000;

// Piece-square tables, written from White's side with the 8th rank first.
// Black reads them mirrored by rank.

// Pawns: push toward promotion, occupy the centre files, and keep the
// d/e pawns from idling on their starting squares.
const PAWN_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50], // one step from promotion
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5], // unmoved centre pawns
    [0, 0, 0, 0, 0, 0, 0, 0],
];

// Knights: strongest in the middle, weak on the rim and in the corners.
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

// Bishops: prefer long central diagonals over edges and corners.
const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

// Rooks: reward the seventh rank and the central back-rank files,
// avoid the a/h files elsewhere.
const ROOK_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5], // seventh rank
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

// Queens: mild pull toward the centre, corners discouraged.
const QUEEN_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

// King (middlegame): stay home behind the pawns, ideally castled;
// the further up the board, the worse.
const KING_TABLE: [[i32; 8]; 8] = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20], // castled squares
];

/// Evaluates a position from White's perspective: positive scores favour
/// White, negative scores favour Black, whoever is to move.
///
/// Checkmate scores `MATE_SCORE` for the winner; stalemate and draws by
/// rule score `DRAW_SCORE`.
pub fn evaluate_position(position: &Position) -> i32 {
    evaluate_with_status(position, position.status())
}

/// Same as [`evaluate_position`] when the game status is already known.
pub fn evaluate_with_status(position: &Position, status: GameStatus) -> i32 {
    match status {
        GameStatus::Checkmate { loser: Color::White } => -MATE_SCORE,
        GameStatus::Checkmate { loser: Color::Black } => MATE_SCORE,
        GameStatus::Stalemate | GameStatus::Draw(_) => DRAW_SCORE,
        GameStatus::Ongoing => static_score(position),
    }
}

/// Material plus piece-square bonuses, ignoring game status.
pub fn static_score(position: &Position) -> i32 {
    position
        .board()
        .iter()
        .map(|(square, piece)| {
            let value = piece_value(piece.piece_type)
                + position_bonus(piece.piece_type, square, piece.color);
            signed(value, piece.color)
        })
        .sum()
}

/// Material difference alone, White minus Black.
pub fn material_balance(position: &Position) -> i32 {
    position
        .board()
        .iter()
        .map(|(_, piece)| signed(piece_value(piece.piece_type), piece.color))
        .sum()
}

pub fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

fn signed(value: i32, color: Color) -> i32 {
    match color {
        Color::White => value,
        Color::Black => -value,
    }
}

fn position_bonus(piece_type: PieceType, square: Square, color: Color) -> i32 {
    let row = match color {
        Color::White => 7 - square.rank as usize,
        Color::Black => square.rank as usize,
    };
    let col = square.file as usize;

    match piece_type {
        PieceType::Pawn => PAWN_TABLE[row][col],
        PieceType::Knight => KNIGHT_TABLE[row][col],
        PieceType::Bishop => BISHOP_TABLE[row][col],
        PieceType::Rook => ROOK_TABLE[row][col],
        PieceType::Queen => QUEEN_TABLE[row][col],
        PieceType::King => KING_TABLE[row][col],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::parse_fen;

    #[test]
    fn starting_position_is_balanced() {
        let start = Position::starting();
        assert_eq!(evaluate_position(&start), 0);
        assert_eq!(material_balance(&start), 0);
    }

    #[test]
    fn score_is_from_whites_side_regardless_of_turn() {
        // White is a rook up in both positions.
        let white_to_move = parse_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let black_to_move = parse_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
        assert_eq!(material_balance(&white_to_move), ROOK_VALUE);
        assert!(evaluate_position(&white_to_move) > 0);
        assert_eq!(evaluate_position(&white_to_move), evaluate_position(&black_to_move));
    }

    #[test]
    fn checkmate_outweighs_material() {
        let mated = parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert_eq!(evaluate_position(&mated), -MATE_SCORE);
    }

    #[test]
    fn stalemate_is_neutral_despite_material() {
        let stalemate = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(material_balance(&stalemate) > 0);
        assert_eq!(evaluate_position(&stalemate), DRAW_SCORE);
    }

    #[test]
    fn mirrored_tables_score_symmetrically() {
        let white_knight = parse_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        let black_knight = parse_fen("4k3/8/8/3n4/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(static_score(&white_knight), -static_score(&black_knight));
    }
}
