use common::bitboard::Square;

use crate::board::castle_rights::{
    BLACK_KINGSIDE_RIGHTS, BLACK_QUEENSIDE_RIGHTS, WHITE_KINGSIDE_RIGHTS, WHITE_QUEENSIDE_RIGHTS,
};
use crate::board::color::Color;
use crate::board::Board;

/// Serializes a `Board` to FEN (Forsyth-Edwards Notation).
pub fn to_fen(board: &Board) -> String {
    let mut fen = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_run = 0;
        for file in 0..8u8 {
            let square = Square::from_rank_file(rank, file);
            match board.get(square) {
                Some((piece, color)) => {
                    if empty_run > 0 {
                        fen.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    fen.push(piece.to_fen_char(color));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            fen.push_str(&empty_run.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match board.turn() {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    let castle_rights = board.peek_castle_rights();
    if castle_rights == 0 {
        fen.push('-');
    } else {
        if castle_rights & WHITE_KINGSIDE_RIGHTS > 0 {
            fen.push('K');
        }
        if castle_rights & WHITE_QUEENSIDE_RIGHTS > 0 {
            fen.push('Q');
        }
        if castle_rights & BLACK_KINGSIDE_RIGHTS > 0 {
            fen.push('k');
        }
        if castle_rights & BLACK_QUEENSIDE_RIGHTS > 0 {
            fen.push('q');
        }
    }

    fen.push(' ');
    match board.peek_en_passant_target() {
        Some(target) => fen.push_str(&target.to_algebraic()),
        None => fen.push('-'),
    }

    fen.push_str(&format!(" {}", board.halfmove_clock()));
    fen.push_str(&format!(" {}", board.fullmove_number()));

    fen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_handler::fen::STARTING_POSITION_FEN;

    #[test]
    fn test_starting_position_serializes_to_the_canonical_fen() {
        let board = Board::starting_position();
        assert_eq!(board.to_fen(), STARTING_POSITION_FEN);
    }
}
