// Ficheiro: src/types.rs
// Descrição: Tipos fundamentais partilhados pela avaliação, pela busca e pelo ensemble.

// Casas indexadas de 0 a 63: bit 0 = a1, bit 1 = b1, ..., bit 63 = h8.
pub type Square = u8;

#[inline]
pub fn file_of(sq: Square) -> u8 {
    sq % 8
}

#[inline]
pub fn rank_of(sq: Square) -> u8 {
    sq / 8
}

#[inline]
pub fn square_at(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

pub fn square_name(sq: Square) -> String {
    let file = file_of(sq) + b'a';
    let rank = rank_of(sq) + b'1';
    format!("{}{}", file as char, rank as char)
}

// Enum para representar a cor de uma peça ou de um jogador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// +1 para as brancas, -1 para as pretas. Todas as pontuações são do ponto de vista das brancas.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

// Enum para representar o tipo de uma peça de xadrez.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn value(&self) -> i32 {
        match self {
            PieceKind::Pawn   => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook   => 500,
            PieceKind::Queen  => 900,
            PieceKind::King   => 20000, // Valor alto para evitar trocas
        }
    }
}

// Struct para representar uma peça no tabuleiro, combinando o tipo e a cor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }
}

/// Lado do roque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    KingSide,
    QueenSide,
}

/// Fase do jogo, decidida uma vez por avaliação a partir do número total de peças.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Middlegame,
    Endgame,
}

impl GamePhase {
    /// Abaixo deste número de peças (reis incluídos) a posição conta como final.
    pub const ENDGAME_THRESHOLD: usize = 14;

    pub fn from_piece_count(count: usize) -> Self {
        if count < Self::ENDGAME_THRESHOLD {
            GamePhase::Endgame
        } else {
            GamePhase::Middlegame
        }
    }
}
