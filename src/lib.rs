// Chess Consensus - avaliação estática, minimax/alfa-beta e votação entre estilos de busca

pub mod config;
pub mod error;
pub mod rules;
pub mod search;
pub mod types;

pub use config::{EnsembleConfig, Style};
pub use error::{EngineError, EngineResult};
pub use rules::{position_from_fen, GameState};
pub use search::*;
pub use types::*;

/// Avaliação estática com os pesos padrão, do ponto de vista das brancas.
pub fn evaluate<G: GameState>(pos: &G) -> f64 {
    StaticEvaluator::new().evaluate(pos)
}

/// Busca de profundidade fixa com os pesos padrão.
pub fn search<G: GameState>(pos: &G, depth: u8, use_pruning: bool) -> SearchResult<G::Move> {
    TreeSearcher::new().search(pos, depth, use_pruning)
}
