use common::bitboard::Square;

use super::castle_rights::{CastleRightsBitmask, ALL_CASTLE_RIGHTS};
use super::state_stack::StateStack;

/// Per-move board state that has no way of being recomputed on undo: the
/// en passant target, castling rights and the halfmove clock are pushed on
/// every move application and popped on undo.
#[derive(Clone, PartialEq, Debug)]
pub struct MoveInfo {
    en_passant_targets: StateStack<Option<Square>>,
    castle_rights: StateStack<CastleRightsBitmask>,
    halfmove_clocks: StateStack<u16>,
    fullmove_number: u16,
}

impl Default for MoveInfo {
    fn default() -> Self {
        Self {
            en_passant_targets: StateStack::new(None),
            castle_rights: StateStack::new(ALL_CASTLE_RIGHTS),
            halfmove_clocks: StateStack::new(0),
            fullmove_number: 1,
        }
    }
}

impl MoveInfo {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push_en_passant_target(&mut self, target: Option<Square>) -> Option<Square> {
        self.en_passant_targets.push(target)
    }

    pub fn peek_en_passant_target(&self) -> Option<Square> {
        self.en_passant_targets.peek()
    }

    /// Returns the popped target and the one restored beneath it.
    pub fn pop_en_passant_target(&mut self) -> (Option<Square>, Option<Square>) {
        let popped = self.en_passant_targets.pop();
        (popped, self.en_passant_targets.peek())
    }

    pub fn peek_castle_rights(&self) -> CastleRightsBitmask {
        self.castle_rights.peek()
    }

    /// Pushes the rights remaining after losing `lost_rights`. Returns the
    /// old and new rights. Every move application pushes exactly one frame,
    /// even when no rights are lost, so that undo can pop unconditionally.
    pub fn lose_castle_rights(
        &mut self,
        lost_rights: CastleRightsBitmask,
    ) -> (CastleRightsBitmask, CastleRightsBitmask) {
        let old_rights = self.castle_rights.peek();
        let new_rights = old_rights & !lost_rights;
        self.castle_rights.push(new_rights);
        (old_rights, new_rights)
    }

    /// Returns the popped rights and the ones restored beneath them.
    pub fn pop_castle_rights(&mut self) -> (CastleRightsBitmask, CastleRightsBitmask) {
        let popped = self.castle_rights.pop();
        (popped, self.castle_rights.peek())
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clocks.peek()
    }

    pub fn push_halfmove_clock(&mut self, clock: u16) -> u16 {
        self.halfmove_clocks.push(clock)
    }

    pub fn increment_halfmove_clock(&mut self) -> u16 {
        let next = self.halfmove_clocks.peek() + 1;
        self.halfmove_clocks.push(next)
    }

    pub fn reset_halfmove_clock(&mut self) -> u16 {
        self.halfmove_clocks.push(0)
    }

    pub fn pop_halfmove_clock(&mut self) -> u16 {
        self.halfmove_clocks.pop()
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn set_fullmove_number(&mut self, number: u16) -> u16 {
        self.fullmove_number = number;
        number
    }

    pub fn increment_fullmove_number(&mut self) -> u16 {
        self.fullmove_number += 1;
        self.fullmove_number
    }

    pub fn decrement_fullmove_number(&mut self) -> u16 {
        self.fullmove_number -= 1;
        self.fullmove_number
    }
}
