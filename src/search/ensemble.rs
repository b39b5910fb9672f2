// Ensemble de estilos de busca com votação por pluralidade.
//
// Cada estilo corre num job do pool com a sua própria cópia da posição.
// Os resultados chegam por um canal pela ordem em que os jobs terminam;
// a contagem é feita depois, numa só thread, pela ordem da lista de estilos.

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crossbeam::channel;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::config::{EnsembleConfig, Style};
use crate::error::EngineResult;
use crate::rules::GameState;
use crate::search::alpha_beta::{SearchResult, TreeSearcher};
use crate::search::evaluation::StaticEvaluator;
use crate::types::Side;

/// O que um estilo devolveu.
#[derive(Debug, Clone, PartialEq)]
pub enum BallotOutcome<M> {
    Voted { mv: M, key: String, score: f64, nodes: u64 },
    /// Posição sem lances legais.
    NoMove,
    TimedOut { nodes: u64 },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ballot<M> {
    pub style: String,
    /// Posição do estilo na lista; desempata votações.
    pub index: usize,
    pub elapsed: Duration,
    pub outcome: BallotOutcome<M>,
}

impl<M> Ballot<M> {
    pub fn vote_key(&self) -> Option<&str> {
        match &self.outcome {
            BallotOutcome::Voted { key, .. } => Some(key),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnsembleResult<M> {
    pub best_move: Option<M>,
    /// votos do vencedor / número de estilos
    pub confidence: f64,
    pub votes: BTreeMap<String, usize>,
    /// Melhor pontuação, para quem joga, entre os estilos que votaram no vencedor.
    pub best_score: Option<f64>,
    /// Um boletim por estilo, pela ordem da lista.
    pub ballots: Vec<Ballot<M>>,
}

pub struct EnsembleAnalyzer {
    config: EnsembleConfig,
    pool: ThreadPool,
}

impl EnsembleAnalyzer {
    pub fn new(config: EnsembleConfig) -> EngineResult<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_count())
            .thread_name(|i| format!("ensemble-{}", i))
            .build()?;
        Ok(EnsembleAnalyzer { config, pool })
    }

    pub fn with_default_roster() -> EngineResult<Self> {
        Self::new(EnsembleConfig::default())
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    pub fn roster(&self) -> &[Style] {
        &self.config.styles
    }

    /// Corre todos os estilos e vota. Só retorna depois de todos terminarem.
    pub fn analyze<G: GameState>(&self, pos: &G) -> EnsembleResult<G::Move> {
        let deadline = self
            .config
            .deadline_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        let (sender, receiver) = channel::unbounded();

        self.pool.scope(|scope| {
            for (index, style) in self.config.styles.iter().enumerate() {
                let sender = sender.clone();
                let worker_pos = pos.clone();
                scope.spawn(move |_| {
                    let start = Instant::now();
                    let run = catch_unwind(AssertUnwindSafe(|| {
                        let mut searcher =
                            TreeSearcher::with_evaluator(StaticEvaluator::with_weights(style.weights));
                        searcher.set_deadline(deadline);
                        searcher.search(&worker_pos, style.depth, style.use_pruning)
                    }));
                    let outcome = match run {
                        Ok(result) => outcome_from(&worker_pos, result),
                        Err(payload) => BallotOutcome::Failed { reason: panic_reason(payload.as_ref()) },
                    };
                    let ballot = Ballot {
                        style: style.name.clone(),
                        index,
                        elapsed: start.elapsed(),
                        outcome,
                    };
                    // o recetor vive até ao fim do scope
                    let _ = sender.send(ballot);
                });
            }
        });
        drop(sender);

        let mut ballots: Vec<Ballot<G::Move>> = receiver.iter().collect();
        for ballot in &ballots {
            log_ballot(ballot);
        }
        ballots.sort_by_key(|b| b.index);

        tally(pos, ballots, self.config.styles.len())
    }
}

fn outcome_from<G: GameState>(pos: &G, result: SearchResult<G::Move>) -> BallotOutcome<G::Move> {
    if result.stopped {
        return BallotOutcome::TimedOut { nodes: result.nodes_searched };
    }
    match result.best_move {
        Some(mv) => BallotOutcome::Voted {
            mv,
            key: pos.canonical_move(mv),
            score: result.score,
            nodes: result.nodes_searched,
        },
        None => BallotOutcome::NoMove,
    }
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn log_ballot<M: std::fmt::Debug>(ballot: &Ballot<M>) {
    match &ballot.outcome {
        BallotOutcome::Voted { key, score, nodes, .. } => {
            debug!(style = %ballot.style, vote = %key, score, nodes, elapsed = ?ballot.elapsed, "style finished");
        }
        BallotOutcome::NoMove => {
            debug!(style = %ballot.style, "style found no legal move");
        }
        BallotOutcome::TimedOut { nodes } => {
            warn!(style = %ballot.style, nodes, "style hit the deadline; vote discarded");
        }
        BallotOutcome::Failed { reason } => {
            warn!(style = %ballot.style, %reason, "style panicked; vote discarded");
        }
    }
}

struct Tally<M> {
    count: usize,
    first_index: usize,
    mv: M,
    best_score: f64,
}

/// Contagem por pluralidade. Empates vão para o lance votado pelo estilo
/// com menor índice na lista.
fn tally<G: GameState>(pos: &G, ballots: Vec<Ballot<G::Move>>, roster_size: usize) -> EnsembleResult<G::Move> {
    let mover = pos.side_to_move();
    let better = |a: f64, b: f64| match mover {
        Side::White => a > b,
        Side::Black => a < b,
    };

    let mut entries: BTreeMap<String, Tally<G::Move>> = BTreeMap::new();
    for ballot in &ballots {
        if let BallotOutcome::Voted { mv, key, score, .. } = &ballot.outcome {
            let entry = entries.entry(key.clone()).or_insert(Tally {
                count: 0,
                first_index: ballot.index,
                mv: *mv,
                best_score: *score,
            });
            entry.count += 1;
            if better(*score, entry.best_score) {
                entry.best_score = *score;
            }
        }
    }

    let winner = entries
        .iter()
        .max_by(|(_, a), (_, b)| a.count.cmp(&b.count).then(b.first_index.cmp(&a.first_index)));

    let Some((key, win)) = winner else {
        // nenhum voto: primeiro lance legal, confiança 0
        let fallback = pos.moves().into_iter().next();
        warn!(styles = roster_size, "no style returned a move; falling back to first legal move");
        return EnsembleResult {
            best_move: fallback,
            confidence: 0.0,
            votes: BTreeMap::new(),
            best_score: None,
            ballots,
        };
    };

    let confidence = win.count as f64 / roster_size as f64;
    info!(consensus = %key, votes = win.count, styles = roster_size, confidence, "ensemble vote");

    let best_move = Some(win.mv);
    let best_score = Some(win.best_score);
    let votes = entries.iter().map(|(k, t)| (k.clone(), t.count)).collect();

    EnsembleResult {
        best_move,
        confidence,
        votes,
        best_score,
        ballots,
    }
}
