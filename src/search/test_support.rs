//! Jogo de brinquedo para testes: uma árvore fixa de nós, com folhas de mate,
//! folhas de empate e um nó que entra em pânico quando é expandido.

use std::sync::Arc;

use crate::rules::GameState;
use crate::types::{Piece, Side, Square, Wing};

#[derive(Debug, Clone)]
pub enum ToyNode {
    Branch(Vec<usize>),
    /// Quem joga nesta folha está em mate.
    Mated,
    Drawn,
    /// Entra em pânico ao gerar lances.
    Explode,
}

#[derive(Debug, Clone)]
pub struct ToyGame {
    tree: Arc<Vec<ToyNode>>,
    node: usize,
    side: Side,
}

impl ToyGame {
    /// Raiz no nó 0, brancas a jogar.
    pub fn new(tree: Vec<ToyNode>) -> Self {
        ToyGame { tree: Arc::new(tree), node: 0, side: Side::White }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    fn current(&self) -> &ToyNode {
        &self.tree[self.node]
    }
}

impl GameState for ToyGame {
    type Move = usize;

    fn side_to_move(&self) -> Side {
        self.side
    }

    fn moves(&self) -> Vec<usize> {
        match self.current() {
            ToyNode::Branch(children) => children.clone(),
            ToyNode::Mated | ToyNode::Drawn => Vec::new(),
            ToyNode::Explode => panic!("toy node {} exploded", self.node),
        }
    }

    fn apply(&mut self, mv: usize) {
        self.node = mv;
        self.side = !self.side;
    }

    fn pass_turn(&self) -> Option<Self> {
        None
    }

    fn in_checkmate(&self) -> bool {
        matches!(self.current(), ToyNode::Mated)
    }

    fn in_stalemate(&self) -> bool {
        matches!(self.current(), ToyNode::Drawn)
    }

    fn insufficient_material(&self) -> bool {
        false
    }

    fn piece_at(&self, _sq: Square) -> Option<Piece> {
        None
    }

    fn pieces(&self) -> Vec<(Square, Piece)> {
        Vec::new()
    }

    fn castling_right(&self, _side: Side, _wing: Wing) -> bool {
        false
    }

    fn canonical_move(&self, mv: usize) -> String {
        format!("m{}", mv)
    }
}

/// Raiz com dois lances que só se distinguem a profundidade 2:
/// `m1` leva a um mate das brancas, `m2` a um empate. A profundidade 1
/// vê os dois como 0 e fica com o primeiro.
pub fn depth_sensitive_tree() -> ToyGame {
    ToyGame::new(vec![
        ToyNode::Branch(vec![1, 2]),
        ToyNode::Branch(vec![3]),
        ToyNode::Branch(vec![4]),
        ToyNode::Mated,
        ToyNode::Drawn,
    ])
}

/// Raiz com `m1` (seguro) e `m2`, cujo único filho explode. Buscas de
/// profundidade 1 sobrevivem, profundidade 2 ou mais entram em pânico.
pub fn exploding_tree() -> ToyGame {
    ToyGame::new(vec![
        ToyNode::Branch(vec![1, 2]),
        ToyNode::Drawn,
        ToyNode::Branch(vec![3]),
        ToyNode::Explode,
    ])
}
