// Tabelas posicionais (piece-square tables).
//
// Escritas do ponto de vista das brancas, como se vê o tabuleiro: a linha 0
// é a 8ª fileira, a linha 7 é a 1ª. Para as pretas a fileira é espelhada
// antes da consulta.

use crate::rules::GameState;
use crate::types::{file_of, rank_of, GamePhase, PieceKind, Side, Square};

type Table = [[i32; 8]; 8];

const PAWN_TABLE: Table = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

const KNIGHT_TABLE: Table = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE: Table = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_TABLE: Table = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  0,   0,   0,   5,   5,   0,   0,   0],
];

const QUEEN_TABLE: Table = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

const KING_MIDDLEGAME_TABLE: Table = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [ 20,  30,  10,   0,   0,  10,  30,  20],
];

const KING_ENDGAME_TABLE: Table = [
    [-50, -40, -30, -20, -20, -30, -40, -50],
    [-30, -20, -10,   0,   0, -10, -20, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -30,   0,   0,   0,   0, -30, -30],
    [-50, -30, -30, -30, -30, -30, -30, -50],
];

/// Conjunto de tabelas posicionais. Sem estado; existe como tipo para que
/// a avaliação possa ser testada e trocada em bloco.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionTables;

impl PositionTables {
    pub fn new() -> Self {
        PositionTables
    }

    fn table(kind: PieceKind, phase: GamePhase) -> &'static Table {
        match kind {
            PieceKind::Pawn => &PAWN_TABLE,
            PieceKind::Knight => &KNIGHT_TABLE,
            PieceKind::Bishop => &BISHOP_TABLE,
            PieceKind::Rook => &ROOK_TABLE,
            PieceKind::Queen => &QUEEN_TABLE,
            PieceKind::King => match phase {
                GamePhase::Middlegame => &KING_MIDDLEGAME_TABLE,
                GamePhase::Endgame => &KING_ENDGAME_TABLE,
            },
        }
    }

    /// Bónus posicional de uma peça numa casa, do ponto de vista do dono.
    pub fn square_value(&self, kind: PieceKind, sq: Square, side: Side, phase: GamePhase) -> i32 {
        let file = file_of(sq) as usize;
        let rank = match side {
            Side::White => rank_of(sq),
            Side::Black => 7 - rank_of(sq),
        } as usize;
        Self::table(kind, phase)[7 - rank][file]
    }

    /// Soma dos bónus de todas as peças, positiva a favor das brancas.
    /// A fase é calculada uma única vez e aplicada aos dois reis.
    pub fn evaluate_position<G: GameState>(&self, pos: &G) -> i32 {
        let pieces = pos.pieces();
        let phase = GamePhase::from_piece_count(pieces.len());
        pieces
            .iter()
            .map(|(sq, piece)| {
                piece.side.sign() * self.square_value(piece.kind, *sq, piece.side, phase)
            })
            .sum()
    }
}
