pub mod castle_rights;
pub mod color;
pub mod error;
pub mod piece;
pub mod piece_set;

mod display;
mod move_info;
mod position_info;
mod state_stack;
mod zobrist;

use std::str::FromStr;

use common::bitboard::{Bitboard, Square};

use crate::chess_position;
use crate::input_handler::fen::{parse_fen, FenParseError};

use self::castle_rights::CastleRightsBitmask;
use self::color::Color;
use self::error::BoardError;
use self::move_info::MoveInfo;
use self::piece::Piece;
use self::piece_set::PieceSet;
use self::position_info::PositionInfo;

/// The state of a chess game: piece placement, side to move, and the stacked
/// per-move state (en passant target, castling rights, halfmove clock) that
/// makes moves undoable. A single `Board` is owned by its host for the
/// lifetime of a game and mutated in place; move application and undo must be
/// strictly nested so that after any undo the board is identical to its state
/// before the corresponding apply.
#[derive(Clone, PartialEq, Debug)]
pub struct Board {
    white: PieceSet,
    black: PieceSet,
    turn: Color,
    move_info: MoveInfo,
    position_info: PositionInfo,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            white: PieceSet::new(),
            black: PieceSet::new(),
            turn: Color::White,
            move_info: MoveInfo::new(),
            position_info: PositionInfo::new(),
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn starting_position() -> Self {
        chess_position! {
            rnbqkbnr
            pppppppp
            ........
            ........
            ........
            ........
            PPPPPPPP
            RNBQKBNR
        }
    }

    pub fn pieces(&self, color: Color) -> &PieceSet {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn occupied(&self) -> Bitboard {
        self.white.occupied() | self.black.occupied()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        square.overlaps(self.occupied())
    }

    pub fn get(&self, square: Square) -> Option<(Piece, Color)> {
        if let Some(piece) = self.white.get(square) {
            return Some((piece, Color::White));
        }
        if let Some(piece) = self.black.get(square) {
            return Some((piece, Color::Black));
        }
        None
    }

    pub fn put(&mut self, square: Square, piece: Piece, color: Color) -> Result<(), BoardError> {
        if self.is_occupied(square) {
            return Err(BoardError::SquareOccupied { square });
        }

        match color {
            Color::White => self.white.put(square, piece)?,
            Color::Black => self.black.put(square, piece)?,
        }
        self.position_info.toggle_piece(piece, color, square);
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<(Piece, Color)> {
        let (piece, color) = self.get(square)?;
        match color {
            Color::White => self.white.remove(square),
            Color::Black => self.black.remove(square),
        }?;
        self.position_info.toggle_piece(piece, color, square);
        Some((piece, color))
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn toggle_turn(&mut self) -> Color {
        self.turn = self.turn.opposite();
        self.position_info.toggle_turn();
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) -> Color {
        if self.turn != turn {
            self.position_info.toggle_turn();
        }
        self.turn = turn;
        turn
    }

    pub fn push_en_passant_target(&mut self, target: Option<Square>) -> Option<Square> {
        // The hash reflects only the top of the stack, so the previous
        // target's contribution is removed before the new one is added.
        let previous = self.move_info.peek_en_passant_target();
        self.position_info.toggle_en_passant(previous);
        self.position_info.toggle_en_passant(target);
        self.move_info.push_en_passant_target(target)
    }

    pub fn peek_en_passant_target(&self) -> Option<Square> {
        self.move_info.peek_en_passant_target()
    }

    pub fn pop_en_passant_target(&mut self) -> Option<Square> {
        let (popped, restored) = self.move_info.pop_en_passant_target();
        self.position_info.toggle_en_passant(popped);
        self.position_info.toggle_en_passant(restored);
        popped
    }

    pub fn peek_castle_rights(&self) -> CastleRightsBitmask {
        self.move_info.peek_castle_rights()
    }

    pub fn lose_castle_rights(&mut self, lost_rights: CastleRightsBitmask) -> CastleRightsBitmask {
        let (old_rights, new_rights) = self.move_info.lose_castle_rights(lost_rights);
        self.position_info.toggle_castle_rights(old_rights);
        self.position_info.toggle_castle_rights(new_rights);
        new_rights
    }

    pub fn pop_castle_rights(&mut self) -> CastleRightsBitmask {
        let (popped, restored) = self.move_info.pop_castle_rights();
        self.position_info.toggle_castle_rights(popped);
        self.position_info.toggle_castle_rights(restored);
        restored
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.move_info.halfmove_clock()
    }

    pub fn push_halfmove_clock(&mut self, clock: u16) -> u16 {
        self.move_info.push_halfmove_clock(clock)
    }

    pub fn increment_halfmove_clock(&mut self) -> u16 {
        self.move_info.increment_halfmove_clock()
    }

    pub fn reset_halfmove_clock(&mut self) -> u16 {
        self.move_info.reset_halfmove_clock()
    }

    pub fn pop_halfmove_clock(&mut self) -> u16 {
        self.move_info.pop_halfmove_clock()
    }

    pub fn fullmove_number(&self) -> u16 {
        self.move_info.fullmove_number()
    }

    pub fn set_fullmove_number(&mut self, number: u16) -> u16 {
        self.move_info.set_fullmove_number(number)
    }

    pub fn increment_fullmove_number(&mut self) -> u16 {
        self.move_info.increment_fullmove_number()
    }

    pub fn decrement_fullmove_number(&mut self) -> u16 {
        self.move_info.decrement_fullmove_number()
    }

    pub fn count_current_position(&mut self) -> u8 {
        self.position_info.count_current_position()
    }

    pub fn uncount_current_position(&mut self) -> u8 {
        self.position_info.uncount_current_position()
    }

    pub fn max_seen_position_count(&self) -> u8 {
        self.position_info.max_seen_position_count()
    }

    pub fn current_position_hash(&self) -> u64 {
        self.position_info.current_position_hash()
    }

    pub fn to_fen(&self) -> String {
        crate::input_handler::fen_serialize::to_fen(self)
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_fen(input)
    }
}

#[cfg(test)]
mod tests {
    use super::castle_rights::ALL_CASTLE_RIGHTS;
    use super::*;
    use crate::std_move;
    use common::bitboard::square::*;

    #[test]
    fn test_starting_position_setup() {
        let board = Board::starting_position();
        assert_eq!(board.get(E1), Some((Piece::King, Color::White)));
        assert_eq!(board.get(D8), Some((Piece::Queen, Color::Black)));
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.peek_castle_rights(), ALL_CASTLE_RIGHTS);
        assert_eq!(board.occupied().count_ones(), 32);
    }

    #[test]
    fn test_hash_changes_with_turn() {
        let mut board = Board::starting_position();
        let white_hash = board.current_position_hash();
        board.toggle_turn();
        assert_ne!(white_hash, board.current_position_hash());
        board.toggle_turn();
        assert_eq!(white_hash, board.current_position_hash());
    }

    #[test]
    fn test_hash_is_equal_for_transpositions() {
        let mut board1 = Board::starting_position();
        let mut board2 = Board::starting_position();

        let board1_moves = [std_move!(E2, E3), std_move!(E7, E6), std_move!(D2, D3)];
        let board2_moves = [std_move!(D2, D3), std_move!(E7, E6), std_move!(E2, E3)];

        for (move1, move2) in board1_moves.iter().zip(board2_moves.iter()) {
            move1.apply(&mut board1).unwrap();
            board1.toggle_turn();
            move2.apply(&mut board2).unwrap();
            board2.toggle_turn();
        }

        assert_eq!(
            board1.current_position_hash(),
            board2.current_position_hash()
        );
    }

    #[test]
    fn test_hash_restored_after_undo() {
        let mut board = Board::starting_position();
        let initial_hash = board.current_position_hash();
        let initial_fen = board.to_fen();

        let chess_move = std_move!(G1, F3);
        chess_move.apply(&mut board).unwrap();
        board.toggle_turn();
        assert_ne!(initial_hash, board.current_position_hash());

        board.toggle_turn();
        chess_move.undo(&mut board).unwrap();
        assert_eq!(initial_hash, board.current_position_hash());
        assert_eq!(initial_fen, board.to_fen());
    }
}
