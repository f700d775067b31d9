use common::bitboard::Square;
use thiserror::Error;

use crate::board::castle_rights::{
    CastleRightsBitmask, ALL_CASTLE_RIGHTS, BLACK_KINGSIDE_RIGHTS, BLACK_QUEENSIDE_RIGHTS,
    WHITE_KINGSIDE_RIGHTS, WHITE_QUEENSIDE_RIGHTS,
};
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::Board;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FenParseError {
    #[error("wrong number of fields: 6 expected, {field_count} given")]
    WrongNumberOfFields { field_count: usize },
    #[error("wrong number of ranks: 8 expected, {rank_count} given")]
    InvalidRankCount { rank_count: usize },
    #[error("rank does not describe exactly 8 files: {invalid_rank}")]
    InvalidRank { invalid_rank: String },
    #[error("invalid piece character: {invalid_character}")]
    InvalidPieceCharacter { invalid_character: char },
    #[error("error placing piece: {board_error}")]
    ErrorPlacingPiece { board_error: BoardError },
    #[error("invalid active color: {invalid_color}")]
    InvalidColor { invalid_color: String },
    #[error("invalid castling rights: {invalid_castling}")]
    InvalidCastlingRights { invalid_castling: String },
    #[error("invalid en passant target: {invalid_target}")]
    InvalidEnPassant { invalid_target: String },
    #[error("invalid halfmove clock: {invalid_clock}")]
    InvalidHalfmoveClock { invalid_clock: String },
    #[error("invalid fullmove number: {invalid_number}")]
    InvalidFullmoveNumber { invalid_number: String },
}

type FenResult<T> = Result<T, FenParseError>;

/// Parses a FEN (Forsyth-Edwards Notation) string into a `Board`. The six
/// fields are piece placement, active color, castling rights, en passant
/// target, halfmove clock and fullmove number.
pub fn parse_fen(fen: &str) -> FenResult<Board> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(FenParseError::WrongNumberOfFields {
            field_count: fields.len(),
        });
    }

    let mut board = Board::new();
    parse_piece_placement(&mut board, fields[0])?;
    parse_active_color(&mut board, fields[1])?;
    parse_castle_rights(&mut board, fields[2])?;
    parse_en_passant(&mut board, fields[3])?;
    parse_halfmove_clock(&mut board, fields[4])?;
    parse_fullmove_number(&mut board, fields[5])?;

    Ok(board)
}

fn parse_piece_placement(board: &mut Board, placement: &str) -> FenResult<()> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::InvalidRankCount {
            rank_count: ranks.len(),
        });
    }

    // The first chunk describes rank 8, the last rank 1.
    for (chunk_index, chunk) in ranks.iter().enumerate() {
        let rank = 7 - chunk_index as u8;
        let mut file: u8 = 0;

        for c in chunk.chars() {
            if let Some(skipped) = c.to_digit(10) {
                file += skipped as u8;
                continue;
            }

            if file >= 8 {
                return Err(FenParseError::InvalidRank {
                    invalid_rank: chunk.to_string(),
                });
            }

            let (piece, color) = Piece::from_fen_char(c).ok_or(
                FenParseError::InvalidPieceCharacter {
                    invalid_character: c,
                },
            )?;
            board
                .put(Square::from_rank_file(rank, file), piece, color)
                .map_err(|board_error| FenParseError::ErrorPlacingPiece { board_error })?;
            file += 1;
        }

        if file != 8 {
            return Err(FenParseError::InvalidRank {
                invalid_rank: chunk.to_string(),
            });
        }
    }

    Ok(())
}

fn parse_active_color(board: &mut Board, active_color: &str) -> FenResult<()> {
    match active_color {
        "w" => board.set_turn(Color::White),
        "b" => board.set_turn(Color::Black),
        other => {
            return Err(FenParseError::InvalidColor {
                invalid_color: other.to_string(),
            })
        }
    };
    Ok(())
}

fn parse_castle_rights(board: &mut Board, castle_rights: &str) -> FenResult<()> {
    let mut present: CastleRightsBitmask = 0;

    if castle_rights != "-" {
        for c in castle_rights.chars() {
            present |= match c {
                'K' => WHITE_KINGSIDE_RIGHTS,
                'Q' => WHITE_QUEENSIDE_RIGHTS,
                'k' => BLACK_KINGSIDE_RIGHTS,
                'q' => BLACK_QUEENSIDE_RIGHTS,
                _ => {
                    return Err(FenParseError::InvalidCastlingRights {
                        invalid_castling: castle_rights.to_string(),
                    })
                }
            };
        }
    }

    board.lose_castle_rights(ALL_CASTLE_RIGHTS & !present);
    Ok(())
}

fn parse_en_passant(board: &mut Board, en_passant: &str) -> FenResult<()> {
    if en_passant == "-" {
        return Ok(());
    }

    let target =
        Square::from_algebraic(en_passant).ok_or_else(|| FenParseError::InvalidEnPassant {
            invalid_target: en_passant.to_string(),
        })?;
    board.push_en_passant_target(Some(target));
    Ok(())
}

fn parse_halfmove_clock(board: &mut Board, halfmove_clock: &str) -> FenResult<()> {
    let clock: u16 =
        halfmove_clock
            .parse()
            .map_err(|_| FenParseError::InvalidHalfmoveClock {
                invalid_clock: halfmove_clock.to_string(),
            })?;
    if clock > 0 {
        board.push_halfmove_clock(clock);
    }
    Ok(())
}

fn parse_fullmove_number(board: &mut Board, fullmove_number: &str) -> FenResult<()> {
    let number: u16 =
        fullmove_number
            .parse()
            .map_err(|_| FenParseError::InvalidFullmoveNumber {
                invalid_number: fullmove_number.to_string(),
            })?;
    board.set_fullmove_number(number);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    #[test]
    fn test_parse_starting_position() {
        let board = parse_fen(STARTING_POSITION_FEN).unwrap();
        assert_eq!(board.get(E1), Some((Piece::King, Color::White)));
        assert_eq!(board.get(A8), Some((Piece::Rook, Color::Black)));
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.peek_castle_rights(), ALL_CASTLE_RIGHTS);
        assert_eq!(board.peek_en_passant_target(), None);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn test_parse_position_with_en_passant_and_clocks() {
        let board =
            parse_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 11").unwrap();
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.peek_en_passant_target(), Some(E3));
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 11);
    }

    #[test]
    fn test_parse_partial_castle_rights() {
        let board = parse_fen("4k2r/8/8/8/8/8/8/4K3 b k - 0 1").unwrap();
        assert_eq!(board.peek_castle_rights(), BLACK_KINGSIDE_RIGHTS);
    }

    #[test]
    fn test_round_trip_through_serialization() {
        let fens = [
            STARTING_POSITION_FEN,
            "4k2r/8/8/8/8/8/8/4K3 b k - 0 1",
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 12 40",
        ];
        for fen in &fens {
            let board = parse_fen(fen).unwrap();
            assert_eq!(&board.to_fen(), fen);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(
            parse_fen("only three fields here"),
            Err(FenParseError::WrongNumberOfFields { field_count: 4 })
        );
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::InvalidRankCount { .. })
        ));
        assert!(matches!(
            parse_fen("9/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::InvalidRank { .. })
        ));
        assert!(matches!(
            parse_fen("x7/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::InvalidPieceCharacter { .. })
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 purple - - 0 1"),
            Err(FenParseError::InvalidColor { .. })
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w KX - 0 1"),
            Err(FenParseError::InvalidCastlingRights { .. })
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w - z9 0 1"),
            Err(FenParseError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w - - many 1"),
            Err(FenParseError::InvalidHalfmoveClock { .. })
        ));
    }
}
