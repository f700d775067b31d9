use common::bitboard::Square;
use once_cell::sync::Lazy;
use rand::Rng;

use super::castle_rights::{
    CastleRightsBitmask, BLACK_KINGSIDE_RIGHTS, BLACK_QUEENSIDE_RIGHTS, WHITE_KINGSIDE_RIGHTS,
    WHITE_QUEENSIDE_RIGHTS,
};
use super::color::Color;
use super::piece::Piece;

// Zobrist hashing:
// * one number per piece kind, color and square (12 * 64)
// * one number to indicate that black is to move
// * four numbers for the castling rights
// * eight numbers for the file of the en passant target, if any
//
// The hash of a position is the xor of the numbers that apply to it, which
// lets the board maintain the hash incrementally as pieces move.
const PIECE_SQUARE_NUMBERS: usize = 12 * 64;
const TOTAL_NUMBERS: usize = PIECE_SQUARE_NUMBERS + 1 + 4 + 8;

const TURN_INDEX: usize = PIECE_SQUARE_NUMBERS;
const CASTLE_RIGHTS_INDEX: usize = TURN_INDEX + 1;
const EN_PASSANT_INDEX: usize = CASTLE_RIGHTS_INDEX + 4;

static SHARED: Lazy<Zobrist> = Lazy::new(Zobrist::generate);

pub struct Zobrist {
    numbers: [u64; TOTAL_NUMBERS],
}

impl Zobrist {
    fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut numbers = [0u64; TOTAL_NUMBERS];
        for number in numbers.iter_mut() {
            *number = rng.gen();
        }
        Self { numbers }
    }

    pub fn shared() -> &'static Zobrist {
        &SHARED
    }

    pub fn piece_square(&self, piece: Piece, color: Color, square: Square) -> u64 {
        let color_offset = match color {
            Color::White => 0,
            Color::Black => 6,
        };
        self.numbers[(color_offset + piece as usize) * 64 + square.index()]
    }

    pub fn black_to_move(&self) -> u64 {
        self.numbers[TURN_INDEX]
    }

    pub fn castle_rights(&self, rights: CastleRightsBitmask) -> u64 {
        let mut number = 0;
        if rights & WHITE_KINGSIDE_RIGHTS > 0 {
            number ^= self.numbers[CASTLE_RIGHTS_INDEX];
        }
        if rights & WHITE_QUEENSIDE_RIGHTS > 0 {
            number ^= self.numbers[CASTLE_RIGHTS_INDEX + 1];
        }
        if rights & BLACK_KINGSIDE_RIGHTS > 0 {
            number ^= self.numbers[CASTLE_RIGHTS_INDEX + 2];
        }
        if rights & BLACK_QUEENSIDE_RIGHTS > 0 {
            number ^= self.numbers[CASTLE_RIGHTS_INDEX + 3];
        }
        number
    }

    pub fn en_passant(&self, target: Option<Square>) -> u64 {
        match target {
            Some(square) => self.numbers[EN_PASSANT_INDEX + square.file() as usize],
            None => 0,
        }
    }
}
