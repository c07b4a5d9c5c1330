use chess_core::Position;
use log::debug;
use thiserror::Error;

use crate::search::{search, search_parallel, SearchResult};

pub const DEFAULT_DEPTH: u8 = 4;
pub const MAX_DEPTH: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("search depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u8, max: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root.
    pub depth: u8,
    /// Split the root moves over the rayon pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn new(depth: u8, parallel: bool) -> Result<Self, ConfigError> {
        if depth > MAX_DEPTH {
            return Err(ConfigError::DepthTooLarge { depth, max: MAX_DEPTH });
        }
        Ok(Self { depth, parallel })
    }
}

/// Chooses moves for a driver with a fixed search configuration.
#[derive(Debug, Clone, Default)]
pub struct ChessAI {
    config: SearchConfig,
}

impl ChessAI {
    /// Depths beyond `MAX_DEPTH` are clamped.
    pub fn new(depth: u8) -> Self {
        ChessAI {
            config: SearchConfig {
                depth: depth.min(MAX_DEPTH),
                parallel: false,
            },
        }
    }

    pub fn with_config(config: SearchConfig) -> Self {
        ChessAI { config }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth.min(MAX_DEPTH);
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.config.parallel = parallel;
    }

    pub fn choose_move(&self, position: &Position) -> SearchResult {
        debug!(
            "searching {} to depth {} ({})",
            position,
            self.config.depth,
            if self.config.parallel { "parallel" } else { "sequential" }
        );
        if self.config.parallel {
            search_parallel(position, self.config.depth)
        } else {
            search(position, self.config.depth)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_clamped() {
        let mut ai = ChessAI::new(40);
        assert_eq!(ai.config().depth, MAX_DEPTH);
        ai.set_depth(2);
        assert_eq!(ai.config().depth, 2);
    }

    #[test]
    fn config_rejects_excessive_depth() {
        assert_eq!(
            SearchConfig::new(MAX_DEPTH + 1, false),
            Err(ConfigError::DepthTooLarge { depth: MAX_DEPTH + 1, max: MAX_DEPTH })
        );
        assert!(SearchConfig::new(0, true).is_ok());
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let position = Position::starting();
        let mut ai = ChessAI::new(2);
        let sequential = ai.choose_move(&position);
        ai.set_parallel(true);
        let parallel = ai.choose_move(&position);
        assert_eq!(sequential.best_move, parallel.best_move);
        assert_eq!(sequential.score, parallel.score);
        assert!(sequential.best_move.is_some());
    }
}
