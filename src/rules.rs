//! Fronteira com o gerador de lances.
//!
//! A busca e a avaliação só conhecem o trait [`GameState`]. A implementação
//! para `shakmaty::Chess` fornece as regras completas (lances legais, xeque,
//! mate, empates); nada disso é reimplementado aqui.

use std::fmt::Debug;

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, CastlingSide, Chess, Color, Position, Role};

use crate::error::EngineResult;
use crate::types::{Piece, PieceKind, Side, Square, Wing};

/// Snapshot de posição consumido pela avaliação e pela busca.
///
/// Implementações devem ser baratas de clonar: a busca faz copy-make em
/// cada nó e cada worker do ensemble recebe a sua própria cópia.
pub trait GameState: Clone + Send + Sync {
    type Move: Copy + PartialEq + Send + Sync + Debug;

    fn side_to_move(&self) -> Side;

    /// Lances legais na ordem do gerador. A busca nunca reordena.
    fn moves(&self) -> Vec<Self::Move>;

    fn move_count(&self) -> usize {
        self.moves().len()
    }

    /// Aplica um lance legal no próprio snapshot.
    fn apply(&mut self, mv: Self::Move);

    /// Cópia com a vez passada ao adversário ("null move").
    /// `None` quando a troca de vez não é legal (lado a jogar em xeque).
    fn pass_turn(&self) -> Option<Self>;

    fn in_checkmate(&self) -> bool;

    fn in_stalemate(&self) -> bool;

    fn insufficient_material(&self) -> bool;

    fn is_terminal(&self) -> bool {
        self.move_count() == 0 || self.insufficient_material()
    }

    fn piece_at(&self, sq: Square) -> Option<Piece>;

    /// Todas as peças em ordem crescente de casa.
    fn pieces(&self) -> Vec<(Square, Piece)>;

    fn castling_right(&self, side: Side, wing: Wing) -> bool;

    /// Forma textual estável do lance, usada como chave de voto.
    fn canonical_move(&self, mv: Self::Move) -> String;
}

/// Carrega uma posição a partir de FEN.
pub fn position_from_fen(fen: &str) -> EngineResult<Chess> {
    let fen: Fen = fen.trim().parse()?;
    let position = fen.into_position::<Chess>(CastlingMode::Standard)?;
    Ok(position)
}

fn side_from_color(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn color_from_side(side: Side) -> Color {
    match side {
        Side::White => Color::White,
        Side::Black => Color::Black,
    }
}

fn kind_from_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn piece_from_shakmaty(piece: shakmaty::Piece) -> Piece {
    Piece::new(kind_from_role(piece.role), side_from_color(piece.color))
}

impl GameState for Chess {
    type Move = shakmaty::Move;

    fn side_to_move(&self) -> Side {
        side_from_color(self.turn())
    }

    fn moves(&self) -> Vec<shakmaty::Move> {
        Position::legal_moves(self).into_iter().collect()
    }

    fn move_count(&self) -> usize {
        Position::legal_moves(self).len()
    }

    fn apply(&mut self, mv: shakmaty::Move) {
        self.play_unchecked(mv);
    }

    fn pass_turn(&self) -> Option<Self> {
        self.clone().swap_turn().ok()
    }

    fn in_checkmate(&self) -> bool {
        Position::is_checkmate(self)
    }

    fn in_stalemate(&self) -> bool {
        Position::is_stalemate(self)
    }

    fn insufficient_material(&self) -> bool {
        Position::is_insufficient_material(self)
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        if sq >= 64 {
            return None;
        }
        self.board()
            .piece_at(shakmaty::Square::new(u32::from(sq)))
            .map(piece_from_shakmaty)
    }

    fn pieces(&self) -> Vec<(Square, Piece)> {
        self.board()
            .iter()
            .map(|(sq, piece)| (sq.to_u32() as Square, piece_from_shakmaty(piece)))
            .collect()
    }

    fn castling_right(&self, side: Side, wing: Wing) -> bool {
        let castling_side = match wing {
            Wing::KingSide => CastlingSide::KingSide,
            Wing::QueenSide => CastlingSide::QueenSide,
        };
        self.castles().has(color_from_side(side), castling_side)
    }

    fn canonical_move(&self, mv: shakmaty::Move) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }
}
