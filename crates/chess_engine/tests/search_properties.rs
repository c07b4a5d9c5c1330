use chess_core::{legal_moves, parse_fen, GameStatus, Position};
use chess_engine::search::is_maximizing;
use chess_engine::{
    alpha_beta, evaluate_position, minimax, search, search_parallel, SearchStats, DRAW_SCORE,
    INFINITY, MATE_SCORE,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const ITALIAN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3";

fn play(moves: &[&str]) -> Position {
    moves.iter().fold(Position::starting(), |position, text| {
        let mv = position.find_move(text).unwrap();
        position.apply(&mv)
    })
}

fn random_position(seed: u64, plies: usize) -> Position {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut position = Position::starting();
    for _ in 0..plies {
        let moves = legal_moves(&position);
        match moves.choose(&mut rng) {
            Some(mv) => position = position.apply(mv),
            None => break,
        }
    }
    position
}

fn alpha_beta_score(position: &Position, depth: u8) -> i32 {
    let mut stats = SearchStats::default();
    alpha_beta(position, depth, -INFINITY, INFINITY, is_maximizing(position), &mut stats)
}

fn minimax_score(position: &Position, depth: u8) -> i32 {
    let mut stats = SearchStats::default();
    minimax(position, depth, is_maximizing(position), &mut stats)
}

#[test]
fn finds_fools_mate() {
    let position = play(&["f2f3", "e7e5", "g2g4"]);
    for depth in [1, 2, 3] {
        let result = search(&position, depth);
        let mv = result.best_move.unwrap();
        assert_eq!(mv.to_string(), "d8h4", "depth {depth}");
        assert_eq!(
            position.apply(&mv).status(),
            GameStatus::Checkmate { loser: chess_core::Color::White }
        );
        assert!(result.score <= -MATE_SCORE, "depth {depth}: {}", result.score);
    }
}

#[test]
fn stalemate_scores_as_a_draw() {
    let position = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(evaluate_position(&position), DRAW_SCORE);
    let result = search(&position, 3);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, DRAW_SCORE);
}

#[test]
fn avoids_stalemating_when_winning() {
    // Qf7 would stalemate; any sensible search keeps the game going.
    let position = parse_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1").unwrap();
    let result = search(&position, 2);
    let mv = result.best_move.unwrap();
    assert_ne!(position.apply(&mv).status(), GameStatus::Stalemate);
    assert!(result.score > 0);
}

#[test]
fn search_is_deterministic() {
    let position = parse_fen(ITALIAN).unwrap();
    let first = search(&position, 3);
    let second = search(&position, 3);
    assert_eq!(first, second);
}

#[test]
fn depth_zero_matches_evaluation() {
    for seed in 0..4 {
        let position = random_position(seed, 12);
        let result = search(&position, 0);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, evaluate_position(&position));
        assert_eq!(alpha_beta_score(&position, 0), evaluate_position(&position));
    }
}

#[test]
fn pruning_matches_full_minimax() {
    let position = parse_fen(ITALIAN).unwrap();
    for depth in 1..=3 {
        assert_eq!(alpha_beta_score(&position, depth), minimax_score(&position, depth));
    }

    for seed in 0..8 {
        let position = random_position(seed, 20);
        assert_eq!(
            alpha_beta_score(&position, 2),
            minimax_score(&position, 2),
            "{position}"
        );
    }
}

#[test]
fn root_score_matches_alpha_beta() {
    let position = random_position(3, 16);
    assert_eq!(search(&position, 3).score, alpha_beta_score(&position, 3));
}

#[test]
fn parallel_root_matches_sequential() {
    let mut positions = vec![Position::starting(), parse_fen(ITALIAN).unwrap()];
    positions.extend((10..14).map(|seed| random_position(seed, 18)));

    for position in positions {
        let sequential = search(&position, 2);
        let parallel = search_parallel(&position, 2);
        assert_eq!(sequential.best_move, parallel.best_move, "{position}");
        assert_eq!(sequential.score, parallel.score, "{position}");
    }
}

#[test]
fn promotes_to_a_queen() {
    let position = parse_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let result = search(&position, 1);
    assert_eq!(result.best_move.unwrap().to_string(), "a7a8q");
}

#[test]
fn equal_scores_go_to_the_first_generated_move() {
    // Every quiet move reaches the fifty-move limit, so all children score 0.
    for fen in [
        "4k3/8/8/8/8/8/8/R3K3 w - - 99 60",
        "r3k3/8/8/8/8/8/8/4K3 b - - 99 60",
    ] {
        let position = parse_fen(fen).unwrap();
        let moves = legal_moves(&position);
        assert!(moves.len() > 1);
        for mv in &moves {
            assert_eq!(alpha_beta_score(&position.apply(mv), 0), DRAW_SCORE, "{mv}");
        }

        let result = search(&position, 1);
        assert_eq!(result.best_move, Some(moves[0]), "{fen}");
        assert_eq!(result.score, DRAW_SCORE);
        assert_eq!(search_parallel(&position, 1).best_move, Some(moves[0]));
    }
}

#[test]
fn maximal_clocks_do_not_break_search() {
    let position = parse_fen("4k3/8/8/8/8/8/8/4K2R b K - 0 4294967295").unwrap();
    let result = search(&position, 2);
    assert!(result.best_move.is_some());
}
