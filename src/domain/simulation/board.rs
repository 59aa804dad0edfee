//! Board occupancy grid and the registry of movable pieces.
//!
//! Squares are addressed as (row, col). Row 0 is the white back rank, row 7
//! the black one. Only pawns and knights ever move; the remaining pieces sit
//! on fixed cells and only count towards occupancy.

use std::fmt;

use bevy::prelude::*;

pub const BOARD_SIZE: u8 = 8;
pub const PAWN_COUNT: usize = 16;
pub const KNIGHT_COUNT: usize = 4;

/// Columns of the static back-rank pieces.
pub const ROOK_COLS: [u8; 2] = [0, 7];
pub const BISHOP_COLS: [u8; 2] = [2, 5];
pub const QUEEN_COL: u8 = 3;
pub const KING_COL: u8 = 4;
pub const KNIGHT_COLS: [u8; 2] = [1, 6];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Panics when either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Self {
        assert!(
            row < BOARD_SIZE && col < BOARD_SIZE,
            "square ({row}, {col}) is off the board"
        );
        Self { row, col }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// The square displaced by (d_row, d_col), or `None` past an edge.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        let on_board = 0..BOARD_SIZE as i8;
        if on_board.contains(&row) && on_board.contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

/// Algebraic name: file letter then rank number, so (0, 1) is "b1".
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn of_pawn(index: usize) -> Self {
        if index < PAWN_COUNT / 2 {
            Side::White
        } else {
            Side::Black
        }
    }

    pub fn of_knight(index: usize) -> Self {
        if index < KNIGHT_COUNT / 2 {
            Side::White
        } else {
            Side::Black
        }
    }

    /// Row step a pawn of this side takes when advancing.
    pub fn forward(&self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    pub fn back_rank(&self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => BOARD_SIZE - 1,
        }
    }

    pub fn pawn_rank(&self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => BOARD_SIZE - 2,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecorKind {
    Rook,
    Bishop,
    Queen,
    King,
}

/// A static piece. Never moves, never leaves its cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Decor {
    pub kind: DecorKind,
    pub side: Side,
    pub square: Square,
}

/// The twelve fixed back-rank pieces, white first.
pub fn decorative_pieces() -> Vec<Decor> {
    let mut out = Vec::with_capacity(12);
    for side in [Side::White, Side::Black] {
        let row = side.back_rank();
        let mut push = |kind, col| {
            out.push(Decor {
                kind,
                side,
                square: Square::new(row, col),
            })
        };
        for col in ROOK_COLS {
            push(DecorKind::Rook, col);
        }
        for col in BISHOP_COLS {
            push(DecorKind::Bishop, col);
        }
        push(DecorKind::Queen, QUEEN_COL);
        push(DecorKind::King, KING_COL);
    }
    out
}

#[derive(Resource, Clone, PartialEq, Eq, Debug)]
pub struct BoardState {
    occupancy: [[bool; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    pawns: [Square; PAWN_COUNT],
    knights: [Square; KNIGHT_COUNT],
}

impl Default for BoardState {
    fn default() -> Self {
        let mut board = Self {
            occupancy: Default::default(),
            pawns: [Square::new(0, 0); PAWN_COUNT],
            knights: [Square::new(0, 0); KNIGHT_COUNT],
        };
        board.initialize();
        board
    }
}

impl BoardState {
    /// Resets grid and registries to the opening layout.
    pub fn initialize(&mut self) {
        self.occupancy = Default::default();
        for (i, pawn) in self.pawns.iter_mut().enumerate() {
            let side = Side::of_pawn(i);
            *pawn = Square::new(side.pawn_rank(), (i % 8) as u8);
        }
        for (i, knight) in self.knights.iter_mut().enumerate() {
            let side = Side::of_knight(i);
            *knight = Square::new(side.back_rank(), KNIGHT_COLS[i % 2]);
        }
        self.mark_registered();
    }

    /// Builds a board from explicit pawn and knight squares; decorative cells
    /// are always present. Panics if any two pieces share a square.
    pub fn with_pieces(pawns: [Square; PAWN_COUNT], knights: [Square; KNIGHT_COUNT]) -> Self {
        let mut board = Self {
            occupancy: Default::default(),
            pawns,
            knights,
        };
        board.mark_registered();
        board
    }

    fn mark_registered(&mut self) {
        let decor = decorative_pieces();
        let cells = decor
            .iter()
            .map(|d| d.square)
            .chain(self.pawns)
            .chain(self.knights)
            .collect::<Vec<_>>();
        for sq in cells {
            self.occupy(sq);
        }
    }

    pub fn is_occupied(&self, sq: Square) -> bool {
        self.occupancy[sq.row as usize][sq.col as usize]
    }

    pub fn occupy(&mut self, sq: Square) {
        let cell = &mut self.occupancy[sq.row as usize][sq.col as usize];
        assert!(!*cell, "{sq:?} is already occupied");
        *cell = true;
    }

    pub fn vacate(&mut self, sq: Square) {
        let cell = &mut self.occupancy[sq.row as usize][sq.col as usize];
        assert!(*cell, "{sq:?} is already empty");
        *cell = false;
    }

    pub fn pawns(&self) -> &[Square; PAWN_COUNT] {
        &self.pawns
    }

    pub fn knights(&self) -> &[Square; KNIGHT_COUNT] {
        &self.knights
    }

    pub fn pawn(&self, index: usize) -> Square {
        self.pawns[index]
    }

    pub fn knight(&self, index: usize) -> Square {
        self.knights[index]
    }

    pub fn occupied_count(&self) -> usize {
        self.occupancy.iter().flatten().filter(|c| **c).count()
    }

    pub(crate) fn relocate_pawn(&mut self, index: usize, to: Square) {
        let from = self.pawns[index];
        self.vacate(from);
        self.occupy(to);
        self.pawns[index] = to;
    }

    pub(crate) fn relocate_knight(&mut self, index: usize, to: Square) {
        let from = self.knights[index];
        self.vacate(from);
        self.occupy(to);
        self.knights[index] = to;
    }

    /// Recomputes occupancy from the registries and fixed cells and checks
    /// that it matches the grid, with no square claimed twice.
    pub fn is_consistent(&self) -> bool {
        let mut claims = [[0u8; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        let fixed = decorative_pieces().into_iter().map(|d| d.square);
        for sq in fixed.chain(self.pawns).chain(self.knights) {
            claims[sq.row as usize][sq.col as usize] += 1;
        }
        claims
            .iter()
            .flatten()
            .zip(self.occupancy.iter().flatten())
            .all(|(n, occupied)| *n <= 1 && (*n == 1) == *occupied)
    }
}
