pub mod ai;
pub mod evaluation;
pub mod search;

pub use ai::{ChessAI, ConfigError, SearchConfig};
pub use evaluation::{evaluate_position, material_balance, DRAW_SCORE, INFINITY, MATE_SCORE};
pub use search::{alpha_beta, minimax, search, search_parallel, SearchResult, SearchStats};
