use chess_consensus::search::evaluation::{material, MATE_SCORE};
use chess_consensus::{
    evaluate, position_from_fen, search, EnsembleAnalyzer, EnsembleConfig, GameState, TreeSearcher,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shakmaty::Chess;

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const BACK_RANK_WHITE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
const BACK_RANK_BLACK: &str = "r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1";

fn load(fen: &str) -> Chess {
    position_from_fen(fen).unwrap()
}

/// Passeio aleatório reprodutível a partir da posição inicial.
fn random_walk(seed: u64, plies: usize) -> Chess {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = load(START);
    for _ in 0..plies {
        let moves = pos.moves();
        match moves.choose(&mut rng) {
            Some(&mv) => pos.apply(mv),
            None => break,
        }
    }
    pos
}

fn best_uci(pos: &Chess, depth: u8, use_pruning: bool) -> (Option<String>, f64) {
    let result = search(pos, depth, use_pruning);
    (result.best_move.map(|mv| pos.canonical_move(mv)), result.score)
}

#[test]
fn pruning_never_changes_the_score() {
    for seed in 0..6 {
        let pos = random_walk(seed, 8);
        for depth in 1..=2 {
            let plain = search(&pos, depth, false);
            let pruned = search(&pos, depth, true);
            assert_eq!(plain.score, pruned.score, "seed {} depth {}", seed, depth);
        }
    }

    for fen in [START, BACK_RANK_WHITE, BACK_RANK_BLACK] {
        let pos = load(fen);
        let plain = search(&pos, 3, false);
        let pruned = search(&pos, 3, true);
        assert_eq!(plain.score, pruned.score, "{}", fen);
    }
}

#[test]
fn pruning_never_changes_the_score_at_depth_four() {
    for fen in [BACK_RANK_BLACK, "4k3/8/8/3p4/8/8/4P3/4K3 w - - 0 1"] {
        let pos = load(fen);
        let plain = search(&pos, 4, false);
        let pruned = search(&pos, 4, true);
        assert_eq!(plain.score, pruned.score, "{}", fen);
        assert!(pruned.nodes_searched <= plain.nodes_searched, "{}", fen);
    }
}

#[test]
fn pruning_reduces_work_from_the_start() {
    let pos = load(START);
    let plain = search(&pos, 3, false);
    let pruned = search(&pos, 3, true);
    // 1 + 20 + 400 + 8902 nós sem poda
    assert_eq!(plain.nodes_searched, 9323);
    assert!(pruned.nodes_searched < plain.nodes_searched);
}

#[test]
fn white_mates_in_one() {
    let pos = load(BACK_RANK_WHITE);
    for depth in [2, 3] {
        let (mv, score) = best_uci(&pos, depth, true);
        assert_eq!(mv.as_deref(), Some("a1a8"));
        assert!(score > 9000.0);
    }
}

#[test]
fn black_mates_in_one() {
    let pos = load(BACK_RANK_BLACK);
    for depth in [2, 3] {
        let (mv, score) = best_uci(&pos, depth, true);
        assert_eq!(mv.as_deref(), Some("a8a1"));
        assert!(score < -9000.0);
    }
}

#[test]
fn draws_score_exactly_zero() {
    assert_eq!(evaluate(&load("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")), 0.0);
    assert_eq!(evaluate(&load("8/8/4k3/8/8/4K3/8/8 w - - 0 1")), 0.0);
    assert_eq!(evaluate(&load("8/8/4k3/8/8/4K3/8/6N1 b - - 0 1")), 0.0);
}

#[test]
fn checkmate_scores_are_signed_against_the_mated_side() {
    assert_eq!(evaluate(&load("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1")), MATE_SCORE);
    assert_eq!(evaluate(&load("6k1/8/8/8/8/8/5PPP/r5K1 w - - 1 1")), -MATE_SCORE);
}

#[test]
fn missing_black_queen_is_worth_900() {
    let full = load(START);
    let no_queen = load("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert_eq!(material(&no_queen) - material(&full), 900);
    assert!(evaluate(&no_queen) > evaluate(&full));
}

#[test]
fn material_edge_stays_white_positive() {
    // vantagem material das brancas continua positiva com as pretas a jogar
    let white = load("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
    let black = load("4k3/8/8/8/8/8/8/3QK3 b - - 0 1");
    assert!(evaluate(&white) > 800.0);
    assert!(evaluate(&black) > 800.0);
}

#[test]
fn opening_choice_is_sensible() {
    let pos = load(START);
    let (mv, score) = best_uci(&pos, 2, true);
    let mv = mv.unwrap();
    assert!(["e2e4", "d2d4", "g1f3", "c2c4"].contains(&mv.as_str()), "{}", mv);
    assert!(score.abs() < 50.0);
}

#[test]
fn repeated_searches_agree() {
    for seed in [11, 12] {
        let pos = random_walk(seed, 6);
        let a = search(&pos, 2, false);
        let b = search(&pos, 2, false);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(a.nodes_searched, b.nodes_searched);
    }
}

#[test]
fn searcher_can_be_reused() {
    let mut searcher = TreeSearcher::new();
    let first = searcher.search(&load(BACK_RANK_WHITE), 2, true);
    let second = searcher.search(&load(BACK_RANK_BLACK), 2, true);
    assert!(first.score > 9000.0);
    assert!(second.score < -9000.0);
}

#[test]
fn ensemble_agrees_on_forced_mate() {
    let pos = load(BACK_RANK_WHITE);
    let analyzer = EnsembleAnalyzer::new(EnsembleConfig::default()).unwrap();
    let result = analyzer.analyze(&pos);
    let mv = result.best_move.unwrap();
    assert_eq!(pos.canonical_move(mv), "a1a8");
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.votes.get("a1a8"), Some(&analyzer.roster().len()));
}

#[test]
fn ensemble_leaves_the_position_untouched() {
    let pos = random_walk(3, 10);
    let before = pos.clone();
    let moves_before = pos.moves();
    let analyzer = EnsembleAnalyzer::new(EnsembleConfig::default().with_depth(2)).unwrap();
    let result = analyzer.analyze(&pos);
    assert_eq!(pos, before);
    assert_eq!(pos.moves(), moves_before);
    if let Some(mv) = result.best_move {
        assert!(moves_before.contains(&mv));
    }
    assert!(result.confidence > 0.0 && result.confidence <= 1.0);
    let total: usize = result.votes.values().sum();
    assert_eq!(total, analyzer.roster().len());
}

#[test]
fn ensemble_reads_toml_roster() {
    let text = r#"
        max_workers = 2

        [[styles]]
        name = "quick"
        depth = 1

        [[styles]]
        name = "deeper"
        depth = 2
        use_pruning = false
    "#;
    let config = EnsembleConfig::from_toml_str(text).unwrap();
    let analyzer = EnsembleAnalyzer::new(config).unwrap();
    let pos = load(BACK_RANK_BLACK);
    let result = analyzer.analyze(&pos);
    assert_eq!(pos.canonical_move(result.best_move.unwrap()), "a8a1");
    assert_eq!(result.confidence, 1.0);
}
