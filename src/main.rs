// Chess Consensus - linha de comando
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chess_consensus::config::{EnsembleConfig, MAX_DEPTH};
use chess_consensus::{
    position_from_fen, square_name, BallotOutcome, EnsembleAnalyzer, GameState, Piece, PieceKind, Side,
    StaticEvaluator, TreeSearcher,
};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Parser, Debug)]
#[command(name = "consensus", version, about = "Static evaluation, tree search and ensemble voting")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Avaliação estática de uma posição
    Eval {
        #[arg(default_value = START_FEN)]
        fen: String,
    },
    /// Minimax de profundidade fixa
    Search {
        #[arg(default_value = START_FEN)]
        fen: String,
        #[arg(short, long, default_value_t = 3)]
        depth: u8,
        /// Desliga a poda alfa-beta
        #[arg(long)]
        no_pruning: bool,
    },
    /// Corre o ensemble de estilos e mostra a votação
    Analyze {
        #[arg(default_value = START_FEN)]
        fen: String,
        /// Sobrepõe a profundidade de todos os estilos
        #[arg(short, long)]
        depth: Option<u8>,
        /// Ficheiro TOML com a lista de estilos
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        deadline_ms: Option<u64>,
    },
    /// Imprime a configuração padrão em TOML
    Roster,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Eval { fen } => run_eval(&fen),
        Command::Search { fen, depth, no_pruning } => run_search(&fen, depth, !no_pruning),
        Command::Analyze { fen, depth, config, deadline_ms } => run_analyze(&fen, depth, config, deadline_ms),
        Command::Roster => {
            print!("{}", EnsembleConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn run_eval(fen: &str) -> Result<()> {
    let pos = position_from_fen(fen).with_context(|| format!("loading '{}'", fen))?;
    let evaluator = StaticEvaluator::new();
    let b = evaluator.breakdown(&pos);

    println!("FEN: {}", fen);
    println!("Jogador a mover: {:?}", pos.side_to_move());
    let pieces: Vec<String> = pos
        .pieces()
        .iter()
        .map(|(sq, piece)| format!("{}{}", piece_letter(piece), square_name(*sq)))
        .collect();
    println!("Peças: {}", pieces.join(" "));
    println!("  material:       {}", b.material);
    println!("  posição:        {}", b.position);
    println!("  mobilidade:     {}", b.mobility);
    println!("  rei:            {}", b.king_safety);
    println!("  peões:          {}", b.pawn_structure);
    println!("Score: {:.2}", evaluator.evaluate(&pos));
    Ok(())
}

fn piece_letter(piece: &Piece) -> char {
    let letter = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match piece.side {
        Side::White => letter.to_ascii_uppercase(),
        Side::Black => letter,
    }
}

fn run_search(fen: &str, depth: u8, use_pruning: bool) -> Result<()> {
    anyhow::ensure!((1..=MAX_DEPTH).contains(&depth), "depth must be in 1..={}", MAX_DEPTH);
    let pos = position_from_fen(fen).with_context(|| format!("loading '{}'", fen))?;

    let mut searcher = TreeSearcher::new();
    let result = searcher.search(&pos, depth, use_pruning);

    let best = result
        .best_move
        .map(|mv| pos.canonical_move(mv))
        .unwrap_or_else(|| "(none)".to_string());
    println!(
        "info depth {} score {:.2} nodes {} time {} pruning {}",
        result.depth,
        result.score,
        result.nodes_searched,
        result.time_elapsed.as_millis(),
        use_pruning
    );
    println!("bestmove {}", best);
    Ok(())
}

fn run_analyze(fen: &str, depth: Option<u8>, config: Option<PathBuf>, deadline_ms: Option<u64>) -> Result<()> {
    let pos = position_from_fen(fen).with_context(|| format!("loading '{}'", fen))?;

    let mut config = match config {
        Some(path) => EnsembleConfig::from_file(&path)
            .with_context(|| format!("reading ensemble config {}", path.display()))?,
        None => EnsembleConfig::default(),
    };
    if let Some(depth) = depth {
        config = config.with_depth(depth);
    }
    if deadline_ms.is_some() {
        config = config.with_deadline_ms(deadline_ms);
    }

    let analyzer = EnsembleAnalyzer::new(config)?;
    let result = analyzer.analyze(&pos);

    for ballot in &result.ballots {
        let line = match &ballot.outcome {
            BallotOutcome::Voted { key, score, nodes, .. } => {
                format!("{} (score {:.2}, nodes {})", key, score, nodes)
            }
            BallotOutcome::NoMove => "sem lances".to_string(),
            BallotOutcome::TimedOut { nodes } => format!("prazo esgotado após {} nós", nodes),
            BallotOutcome::Failed { reason } => format!("falhou: {}", reason),
        };
        println!("  {:<12} {:>6}ms  {}", ballot.style, ballot.elapsed.as_millis(), line);
    }

    let best = result
        .best_move
        .map(|mv| pos.canonical_move(mv))
        .unwrap_or_else(|| "(none)".to_string());
    println!("votes: {:?}", result.votes);
    println!("bestmove {} confidence {:.2}", best, result.confidence);
    Ok(())
}
