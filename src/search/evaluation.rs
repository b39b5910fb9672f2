use serde::{Deserialize, Serialize};

use crate::rules::GameState;
use crate::search::tables::PositionTables;
use crate::types::{file_of, rank_of, Piece, PieceKind, Side, Square, Wing};

/// Pontuação de xeque-mate. Nunca é multiplicada pelos pesos.
pub const MATE_SCORE: f64 = 10000.0;

/// Pesos da combinação linear dos cinco termos da avaliação.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub material: f64,
    pub position: f64,
    pub mobility: f64,
    pub king_safety: f64,
    pub pawn_structure: f64,
}

impl EvalWeights {
    pub const STANDARD: EvalWeights = EvalWeights {
        material: 1.0,
        position: 0.3,
        mobility: 0.2,
        king_safety: 0.2,
        pawn_structure: 0.1,
    };

    pub fn is_finite(&self) -> bool {
        [self.material, self.position, self.mobility, self.king_safety, self.pawn_structure]
            .iter()
            .all(|w| w.is_finite())
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Os cinco termos brutos de uma avaliação, antes dos pesos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalBreakdown {
    pub material: i32,
    pub position: i32,
    pub mobility: i32,
    pub king_safety: i32,
    pub pawn_structure: i32,
}

impl EvalBreakdown {
    pub fn weighted(&self, w: &EvalWeights) -> f64 {
        self.material as f64 * w.material
            + self.position as f64 * w.position
            + self.mobility as f64 * w.mobility
            + self.king_safety as f64 * w.king_safety
            + self.pawn_structure as f64 * w.pawn_structure
    }
}

/// Avaliação estática. Sempre do ponto de vista das brancas,
/// independentemente de quem joga.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticEvaluator {
    tables: PositionTables,
    weights: EvalWeights,
}

impl StaticEvaluator {
    pub fn new() -> Self {
        Self::with_weights(EvalWeights::STANDARD)
    }

    pub fn with_weights(weights: EvalWeights) -> Self {
        StaticEvaluator { tables: PositionTables::new(), weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    pub fn evaluate<G: GameState>(&self, pos: &G) -> f64 {
        if let Some(score) = terminal_score(pos) {
            return score;
        }
        self.breakdown(pos).weighted(&self.weights)
    }

    /// Termos brutos. Não aplica o atalho de posição terminal.
    pub fn breakdown<G: GameState>(&self, pos: &G) -> EvalBreakdown {
        let pieces = pos.pieces();
        EvalBreakdown {
            material: material_of(&pieces),
            position: self.tables.evaluate_position(pos),
            mobility: mobility(pos),
            king_safety: king_safety_of(pos, &pieces),
            pawn_structure: pawn_structure_of(&pieces),
        }
    }
}

/// Mate: -MATE_SCORE se as brancas estão em mate, +MATE_SCORE se as pretas.
/// Afogamento e material insuficiente valem exatamente 0.
pub fn terminal_score<G: GameState>(pos: &G) -> Option<f64> {
    if pos.in_checkmate() {
        match pos.side_to_move() {
            Side::White => Some(-MATE_SCORE),
            Side::Black => Some(MATE_SCORE),
        }
    } else if pos.in_stalemate() || pos.insufficient_material() {
        Some(0.0)
    } else {
        None
    }
}

pub fn material<G: GameState>(pos: &G) -> i32 {
    material_of(&pos.pieces())
}

fn material_of(pieces: &[(Square, Piece)]) -> i32 {
    pieces
        .iter()
        .map(|(_, piece)| piece.side.sign() * piece.kind.value())
        .sum()
}

/// (lances de quem joga - lances do adversário) x 2.
///
/// O adversário é contado numa cópia com a vez trocada. Quando a troca não é
/// legal (quem joga está em xeque) usa-se a contagem de quem joga, o que anula
/// o termo.
pub fn mobility<G: GameState>(pos: &G) -> i32 {
    let mover = pos.move_count() as i32;
    let other = pos
        .pass_turn()
        .map(|flipped| flipped.move_count() as i32)
        .unwrap_or(mover);
    (mover - other) * 2
}

pub fn king_safety<G: GameState>(pos: &G) -> i32 {
    king_safety_of(pos, &pos.pieces())
}

fn king_safety_of<G: GameState>(pos: &G, pieces: &[(Square, Piece)]) -> i32 {
    let mut score = 0;

    for side in [Side::White, Side::Black] {
        let mut rights = 0;
        if pos.castling_right(side, Wing::KingSide) {
            rights += 20;
        }
        if pos.castling_right(side, Wing::QueenSide) {
            rights += 10;
        }
        score += side.sign() * rights;
    }

    // rei ainda parado no centro da primeira fileira
    for (sq, piece) in pieces {
        if piece.kind != PieceKind::King {
            continue;
        }
        let home_rank = match piece.side {
            Side::White => 0,
            Side::Black => 7,
        };
        if rank_of(*sq) == home_rank && matches!(file_of(*sq), 3 | 4) {
            score -= piece.side.sign() * 30;
        }
    }

    score
}

pub fn pawn_structure<G: GameState>(pos: &G) -> i32 {
    pawn_structure_of(&pos.pieces())
}

fn pawn_structure_of(pieces: &[(Square, Piece)]) -> i32 {
    let pawns = |side: Side| -> Vec<Square> {
        pieces
            .iter()
            .filter(|(_, p)| p.kind == PieceKind::Pawn && p.side == side)
            .map(|(sq, _)| *sq)
            .collect()
    };
    let white = pawns(Side::White);
    let black = pawns(Side::Black);

    let mut score = 0;

    // Peões dobrados
    for file in 0..8u8 {
        for (side, list) in [(Side::White, &white), (Side::Black, &black)] {
            let count = list.iter().filter(|sq| file_of(**sq) == file).count() as i32;
            if count > 1 {
                score -= side.sign() * 10 * (count - 1);
            }
        }
    }

    // Peões passados: só os brancos pontuam. Um peão preto na mesma coluna ou
    // numa vizinha, em fileira igual ou inferior, tira o bónus.
    for &sq in &white {
        let blocked = black.iter().any(|&e| {
            file_of(e).abs_diff(file_of(sq)) <= 1 && rank_of(e) <= rank_of(sq)
        });
        if !blocked {
            score += 20 + 10 * rank_of(sq) as i32;
        }
    }

    score
}
