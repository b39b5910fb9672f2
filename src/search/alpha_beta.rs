use std::time::{Duration, Instant};

use crate::rules::GameState;
use crate::search::evaluation::StaticEvaluator;
use crate::types::Side;

/// Resultado da busca
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    pub best_move: Option<M>,
    /// Ponto de vista das brancas.
    pub score: f64,
    pub depth: u8,
    /// Conta todas as chamadas recursivas, folhas incluídas.
    pub nodes_searched: u64,
    pub time_elapsed: Duration,
    /// A busca foi interrompida pelo prazo; o lance pode não ser o da profundidade pedida.
    pub stopped: bool,
}

/// Minimax de profundidade fixa com poda alfa-beta opcional.
///
/// Não guarda estado entre buscas além do contador de nós, que é reposto a
/// cada chamada de [`TreeSearcher::search`]. As brancas maximizam, as pretas
/// minimizam; os lances são visitados pela ordem do gerador e só um valor
/// estritamente melhor substitui o atual, por isso em caso de empate fica o
/// primeiro lance.
#[derive(Debug, Clone)]
pub struct TreeSearcher {
    evaluator: StaticEvaluator,
    nodes_searched: u64,
    deadline: Option<Instant>,
    stopped: bool,
}

impl Default for TreeSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSearcher {
    pub fn new() -> Self {
        Self::with_evaluator(StaticEvaluator::new())
    }

    pub fn with_evaluator(evaluator: StaticEvaluator) -> Self {
        TreeSearcher {
            evaluator,
            nodes_searched: 0,
            deadline: None,
            stopped: false,
        }
    }

    /// Prazo verificado antes de cada lance irmão, em todos os níveis.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
    }

    pub fn evaluator(&self) -> &StaticEvaluator {
        &self.evaluator
    }

    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Busca com limite de profundidade
    pub fn search<G: GameState>(&mut self, pos: &G, depth: u8, use_pruning: bool) -> SearchResult<G::Move> {
        self.nodes_searched = 0;
        self.stopped = false;
        let start_time = Instant::now();

        let maximizing = pos.side_to_move() == Side::White;
        let (best_move, score) = self.minimax(
            pos,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            maximizing,
            use_pruning,
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes_searched: self.nodes_searched,
            time_elapsed: start_time.elapsed(),
            stopped: self.stopped,
        }
    }

    fn minimax<G: GameState>(
        &mut self,
        pos: &G,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        use_pruning: bool,
    ) -> (Option<G::Move>, f64) {
        self.nodes_searched += 1;

        if depth == 0 {
            return (None, self.evaluator.evaluate(pos));
        }

        let moves = pos.moves();
        if moves.is_empty() || pos.insufficient_material() {
            return (None, self.evaluator.evaluate(pos));
        }

        let mut best_move = None;
        let mut best_score = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };

        for mv in moves {
            if self.should_stop() {
                break;
            }

            let mut child = pos.clone();
            child.apply(mv);
            let (_, score) = self.minimax(&child, depth - 1, alpha, beta, !maximizing, use_pruning);

            // resultado parcial de um filho interrompido é descartado
            if self.stopped {
                break;
            }

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }

            if use_pruning && beta <= alpha {
                break; // Alpha-beta cutoff
            }
        }

        if best_move.is_none() {
            // interrompido antes de terminar o primeiro filho
            return (None, self.evaluator.evaluate(pos));
        }

        (best_move, best_score)
    }

    /// Verifica se deve parar a busca
    fn should_stop(&mut self) -> bool {
        if !self.stopped {
            if let Some(deadline) = self.deadline {
                self.stopped = Instant::now() >= deadline;
            }
        }
        self.stopped
    }
}

#[cfg(test)]
#[path = "alpha_beta_tests.rs"]
mod tests;
