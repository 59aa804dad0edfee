//! Randomized move selection for pawns and knights.
//!
//! Both searches visit candidates in a random order without repeats and stop
//! at the first legal destination, so a call either commits exactly one move
//! or proves that none exists.

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;

use super::board::{BoardState, Side, Square, BOARD_SIZE, KNIGHT_COUNT, PAWN_COUNT};

/// Knight offsets as (d_row, d_col), in scan order.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
];

/// Rows and columns a knight may land on under the default rules. The two
/// outer ranks and files are excluded even though real chess allows them.
pub const KNIGHT_INTERIOR: RangeInclusive<u8> = 1..=BOARD_SIZE - 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceId {
    Pawn(usize),
    Knight(usize),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PieceMove {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct MoveRules {
    /// Let knights land on rank/file 0 and 7 as well.
    pub knights_reach_edges: bool,
}

impl MoveRules {
    fn knight_landing(&self) -> RangeInclusive<u8> {
        if self.knights_reach_edges {
            0..=BOARD_SIZE - 1
        } else {
            KNIGHT_INTERIOR
        }
    }
}

/// Advances one randomly chosen pawn by a single rank. Returns `None` when
/// every pawn is blocked or already on the far rank.
pub fn try_move_pawn<R: Rng + ?Sized>(board: &mut BoardState, rng: &mut R) -> Option<PieceMove> {
    let mut order: [usize; PAWN_COUNT] = std::array::from_fn(|i| i);
    order.shuffle(rng);

    for index in order {
        let from = board.pawn(index);
        let Some(to) = from.offset(Side::of_pawn(index).forward(), 0) else {
            continue;
        };
        if board.is_occupied(to) {
            continue;
        }
        board.relocate_pawn(index, to);
        debug_assert!(board.is_consistent());
        return Some(PieceMove {
            piece: PieceId::Pawn(index),
            from,
            to,
        });
    }
    None
}

/// Jumps one randomly chosen knight to its first open destination in
/// `KNIGHT_OFFSETS` order. Returns `None` once all knights are exhausted.
pub fn try_move_knight<R: Rng + ?Sized>(
    board: &mut BoardState,
    rng: &mut R,
    rules: &MoveRules,
) -> Option<PieceMove> {
    let mut order: [usize; KNIGHT_COUNT] = std::array::from_fn(|i| i);
    order.shuffle(rng);
    let landing = rules.knight_landing();

    for index in order {
        let from = board.knight(index);
        let target = KNIGHT_OFFSETS.iter().find_map(|&(d_row, d_col)| {
            from.offset(d_row, d_col).filter(|sq| {
                landing.contains(&sq.row())
                    && landing.contains(&sq.col())
                    && !board.is_occupied(*sq)
            })
        });
        if let Some(to) = target {
            board.relocate_knight(index, to);
            debug_assert!(board.is_consistent());
            return Some(PieceMove {
                piece: PieceId::Knight(index),
                from,
                to,
            });
        }
    }
    None
}
