use common::bitboard::Square;
use rustc_hash::FxHashMap;

use super::castle_rights::CastleRightsBitmask;
use super::color::Color;
use super::piece::Piece;
use super::zobrist::Zobrist;

/// Tracks the incrementally maintained Zobrist hash of the position along with
/// how often each position has been seen, for repetition detection.
#[derive(Clone, PartialEq, Debug)]
pub struct PositionInfo {
    position_counts: FxHashMap<u64, u8>,
    seen_count_stack: Vec<u8>,
    current_hash: u64,
}

impl Default for PositionInfo {
    fn default() -> Self {
        Self {
            position_counts: FxHashMap::default(),
            seen_count_stack: vec![1],
            current_hash: 0,
        }
    }
}

impl PositionInfo {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn current_position_hash(&self) -> u64 {
        self.current_hash
    }

    pub fn toggle_piece(&mut self, piece: Piece, color: Color, square: Square) {
        self.current_hash ^= Zobrist::shared().piece_square(piece, color, square);
    }

    pub fn toggle_turn(&mut self) {
        self.current_hash ^= Zobrist::shared().black_to_move();
    }

    pub fn toggle_castle_rights(&mut self, rights: CastleRightsBitmask) {
        self.current_hash ^= Zobrist::shared().castle_rights(rights);
    }

    pub fn toggle_en_passant(&mut self, target: Option<Square>) {
        self.current_hash ^= Zobrist::shared().en_passant(target);
    }

    /// Records one more sighting of the current position and returns its count.
    pub fn count_current_position(&mut self) -> u8 {
        let count = self
            .position_counts
            .entry(self.current_hash)
            .and_modify(|count| *count += 1)
            .or_insert(1);
        let count = *count;
        self.seen_count_stack.push(count);
        count
    }

    /// Reverts the most recent `count_current_position`. Must be called while
    /// the board is still in the counted position.
    pub fn uncount_current_position(&mut self) -> u8 {
        self.position_counts
            .entry(self.current_hash)
            .and_modify(|count| *count -= 1);
        self.seen_count_stack.pop();
        *self.position_counts.get(&self.current_hash).unwrap()
    }

    /// How many times the current position has been seen.
    pub fn max_seen_position_count(&self) -> u8 {
        *self.seen_count_stack.last().unwrap()
    }
}
