use anyhow::{Context, Result};
use chess_core::{parse_fen, GameStatus, Position, STARTING_FEN};
use chess_engine::{ChessAI, SearchConfig};
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fixed-depth alpha-beta chess search", long_about = None)]
struct Args {
    /// Position to search from
    #[arg(long, default_value = STARTING_FEN)]
    fen: String,

    /// Search depth in plies
    #[arg(short, long, default_value_t = chess_engine::ai::DEFAULT_DEPTH)]
    depth: u8,

    /// Moves to play before searching, in long algebraic form (e2e4 e7e5 ...)
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,

    /// Search the root moves in parallel
    #[arg(long)]
    parallel: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let config = SearchConfig::new(args.depth, args.parallel)?;
    let mut position = parse_fen(&args.fen).with_context(|| format!("invalid FEN: {}", args.fen))?;
    for text in &args.moves {
        let mv = position
            .find_move(text)
            .with_context(|| format!("cannot play {text} in {position}"))?;
        position = position.apply(&mv);
    }
    info!("position: {position}");

    report_status(&position);

    let result = ChessAI::with_config(config).choose_move(&position);
    let best = result
        .best_move
        .map_or_else(|| "none".to_owned(), |mv| mv.to_string());
    println!(
        "bestmove {best} score {} nodes {}",
        result.score, result.stats.nodes
    );

    Ok(())
}

fn report_status(position: &Position) {
    match position.status() {
        GameStatus::Ongoing => {}
        GameStatus::Checkmate { loser } => println!("checkmate, {loser} loses"),
        GameStatus::Stalemate => println!("stalemate"),
        GameStatus::Draw(reason) => println!("draw ({reason:?})"),
    }
}
