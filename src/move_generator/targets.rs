use common::bitboard::{Bitboard, Square};
use once_cell::sync::Lazy;

use crate::board::color::Color;

use super::ray_table::{Direction, RayTable};

static RAYS: Lazy<RayTable> = Lazy::new(RayTable::new);
static KNIGHT_TARGETS: Lazy<[Bitboard; 64]> = Lazy::new(|| generate_leaper_table(&KNIGHT_OFFSETS));
static KING_TARGETS: Lazy<[Bitboard; 64]> = Lazy::new(|| generate_leaper_table(&KING_OFFSETS));

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub fn knight_targets(square: Square) -> Bitboard {
    KNIGHT_TARGETS[square.index()]
}

pub fn king_targets(square: Square) -> Bitboard {
    KING_TARGETS[square.index()]
}

/// The two diagonal squares a pawn on `square` attacks. Distinct from the
/// squares it can move to.
pub fn pawn_attack_targets(square: Square, color: Color) -> Bitboard {
    let offsets: [(i8, i8); 2] = match color {
        Color::White => [(1, -1), (1, 1)],
        Color::Black => [(-1, -1), (-1, 1)],
    };
    targets_from_offsets(square, &offsets)
}

/// Squares reachable by a sliding piece: each ray is truncated at its first
/// blocker, which itself stays in the target set so that captures and
/// defended pieces are both visible to callers.
pub fn sliding_targets(square: Square, occupied: Bitboard, directions: &[Direction]) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    for &dir in directions {
        let ray = RAYS.get(square, dir);
        let blockers = ray & occupied;
        if blockers.is_empty() {
            targets |= ray;
            continue;
        }

        let nearest_blocker = if dir.is_ascending() {
            blockers.first_square()
        } else {
            blockers.last_square()
        }
        .unwrap();

        targets |= ray ^ RAYS.get(nearest_blocker, dir);
    }
    targets
}

fn generate_leaper_table(offsets: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for square in Square::iter() {
        table[square.index()] = targets_from_offsets(square, offsets);
    }
    table
}

fn targets_from_offsets(square: Square, offsets: &[(i8, i8)]) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    for &(rank_step, file_step) in offsets {
        let rank = square.rank() as i8 + rank_step;
        let file = square.file() as i8 + file_step;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            targets |= Square::from_rank_file(rank as u8, file as u8).to_bitboard();
        }
    }
    targets
}
