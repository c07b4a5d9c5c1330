//! Fixed-depth alpha-beta search.
//!
//! Scores follow the evaluator's convention: always from White's side. White
//! is the maximizing player and Black the minimizing one, so callers pass
//! `maximizing = position.side_to_move() == Color::White`.
//!
//! Every function here is a pure function of its arguments. Node counts are
//! accumulated in an explicit [`SearchStats`] rather than in globals.

use std::time::Instant;

use chess_core::{legal_moves, Color, GameStatus, Move, Position};
use log::{debug, info, trace};
use rayon::prelude::*;

use crate::evaluation::{evaluate_with_status, INFINITY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, the root included.
    pub nodes: u64,
    /// Sibling loops cut short by `beta <= alpha`.
    pub cutoffs: u64,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the depth is zero or the root has no legal moves.
    pub best_move: Option<Move>,
    pub score: i32,
    pub stats: SearchStats,
}

/// Whether the side to move is the maximizing player.
pub fn is_maximizing(position: &Position) -> bool {
    position.side_to_move() == Color::White
}

/// Leaf score. Mates found with more depth left are nearer, so they score
/// further from zero; at depth 0 this is exactly the static evaluation.
fn leaf_score(position: &Position, status: GameStatus, depth: u8) -> i32 {
    let score = evaluate_with_status(position, status);
    match status {
        GameStatus::Checkmate { loser: Color::White } => score - depth as i32,
        GameStatus::Checkmate { loser: Color::Black } => score + depth as i32,
        _ => score,
    }
}

/// Alpha-beta over the legal move tree, returning the score of `position`.
///
/// The cutoff test runs after each child has updated the bound, and children
/// are visited in generation order.
pub fn alpha_beta(
    position: &Position,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    let moves = legal_moves(position);
    let status = GameStatus::classify(position, &moves);
    if depth == 0 || status.is_terminal() {
        return leaf_score(position, status, depth);
    }

    let mut best = if maximizing { -INFINITY } else { INFINITY };
    for mv in &moves {
        let child = position.apply(mv);
        let score = alpha_beta(&child, depth - 1, alpha, beta, !maximizing, stats);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }

        if beta <= alpha {
            stats.cutoffs += 1;
            trace!("cutoff after {mv} at depth {depth}");
            break;
        }
    }

    best
}

/// Plain minimax without pruning. Slow; useful as a reference for
/// [`alpha_beta`], which must agree with it.
pub fn minimax(position: &Position, depth: u8, maximizing: bool, stats: &mut SearchStats) -> i32 {
    stats.nodes += 1;

    let moves = legal_moves(position);
    let status = GameStatus::classify(position, &moves);
    if depth == 0 || status.is_terminal() {
        return leaf_score(position, status, depth);
    }

    let scores = moves
        .iter()
        .map(|mv| minimax(&position.apply(mv), depth - 1, !maximizing, stats));
    if maximizing {
        scores.max().unwrap_or(-INFINITY)
    } else {
        scores.min().unwrap_or(INFINITY)
    }
}

/// Root of the search: like [`alpha_beta`] but also reports the move that
/// achieved the score. Ties go to the move generated first.
pub fn search(position: &Position, depth: u8) -> SearchResult {
    let start = Instant::now();
    let mut stats = SearchStats { nodes: 1, cutoffs: 0 };

    let moves = legal_moves(position);
    let status = GameStatus::classify(position, &moves);
    if depth == 0 || status.is_terminal() {
        let score = leaf_score(position, status, depth);
        debug!("no search at root: depth {depth}, status {status:?}, score {score}");
        return SearchResult { best_move: None, score, stats };
    }

    let maximizing = is_maximizing(position);
    let mut alpha = -INFINITY;
    let mut beta = INFINITY;
    let mut best_score = if maximizing { -INFINITY } else { INFINITY };
    let mut best_move = None;

    for mv in &moves {
        let child = position.apply(mv);
        let score = alpha_beta(&child, depth - 1, alpha, beta, !maximizing, &mut stats);
        debug!("root move {mv}: {score}");

        let improves = if maximizing { score > best_score } else { score < best_score };
        if improves {
            best_score = score;
            best_move = Some(*mv);
        }

        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
        if beta <= alpha {
            stats.cutoffs += 1;
            break;
        }
    }

    let result = SearchResult { best_move, score: best_score, stats };
    log_result(&result, depth, start);
    result
}

/// Split-at-root variant of [`search`]: every root move is searched on the
/// rayon pool with a full window and the scores are gathered in generation
/// order before picking, so the move and score match the sequential search.
pub fn search_parallel(position: &Position, depth: u8) -> SearchResult {
    let start = Instant::now();

    let moves = legal_moves(position);
    let status = GameStatus::classify(position, &moves);
    if depth == 0 || status.is_terminal() {
        let score = leaf_score(position, status, depth);
        return SearchResult {
            best_move: None,
            score,
            stats: SearchStats { nodes: 1, cutoffs: 0 },
        };
    }

    let maximizing = is_maximizing(position);
    let scored: Vec<(i32, SearchStats)> = moves
        .par_iter()
        .map(|mv| {
            let mut stats = SearchStats::default();
            let child = position.apply(mv);
            let score = alpha_beta(&child, depth - 1, -INFINITY, INFINITY, !maximizing, &mut stats);
            (score, stats)
        })
        .collect();

    let mut stats = SearchStats { nodes: 1, cutoffs: 0 };
    let mut best_score = if maximizing { -INFINITY } else { INFINITY };
    let mut best_move = None;
    for (mv, (score, child_stats)) in moves.iter().zip(scored) {
        debug!("root move {mv}: {score}");
        stats.merge(child_stats);
        let improves = if maximizing { score > best_score } else { score < best_score };
        if improves {
            best_score = score;
            best_move = Some(*mv);
        }
    }

    let result = SearchResult { best_move, score: best_score, stats };
    log_result(&result, depth, start);
    result
}

fn log_result(result: &SearchResult, depth: u8, start: Instant) {
    match result.best_move {
        Some(mv) => info!(
            "depth {depth}: best move {mv}, score {}, {} nodes, {} cutoffs in {:?}",
            result.score,
            result.stats.nodes,
            result.stats.cutoffs,
            start.elapsed()
        ),
        None => info!("depth {depth}: no move, score {}", result.score),
    }
}
