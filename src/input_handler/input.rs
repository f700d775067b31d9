use std::io;

use common::bitboard::Square;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::board::piece::Piece;
use crate::chess_move::ChessMove;

// UCI coordinate form: from square, to square, optional promotion piece.
static MOVE_INPUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^([a-h][1-8])([a-h][1-8])([nbrq])?$").unwrap());

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("io error: {message}")]
    IoError { message: String },
    #[error("invalid move input: {input:?} (expected coordinates like e2e4 or a7a8q)")]
    InvalidMoveInput { input: String },
}

/// A move as submitted by an external actor, before it has been matched
/// against the legal moves of the position.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveInput {
    pub from_square: Square,
    pub to_square: Square,
    pub promote_to: Option<Piece>,
}

impl MoveInput {
    /// Whether this input describes the given legal move.
    pub fn matches_move(&self, chess_move: &ChessMove) -> bool {
        if chess_move.from_square() != self.from_square
            || chess_move.to_square() != self.to_square
        {
            return false;
        }
        match chess_move {
            ChessMove::PawnPromotion(promotion) => {
                self.promote_to == Some(promotion.promote_to_piece())
            }
            _ => self.promote_to.is_none(),
        }
    }
}

/// Parses coordinate move input like `e2e4` or `a7a8q`.
pub fn parse_move_input(raw: &str) -> Result<MoveInput, InputError> {
    let trimmed = raw.trim();
    let captures = MOVE_INPUT_RE
        .captures(trimmed)
        .ok_or_else(|| InputError::InvalidMoveInput {
            input: trimmed.to_string(),
        })?;

    let from_square = Square::from_algebraic(&captures[1]).unwrap();
    let to_square = Square::from_algebraic(&captures[2]).unwrap();
    let promote_to = captures.get(3).map(|c| match c.as_str() {
        "n" => Piece::Knight,
        "b" => Piece::Bishop,
        "r" => Piece::Rook,
        _ => Piece::Queen,
    });

    Ok(MoveInput {
        from_square,
        to_square,
        promote_to,
    })
}

/// Reads one line from stdin and parses it as a move.
pub fn read_move_input() -> Result<MoveInput, InputError> {
    let mut line = String::new();
    let bytes_read = io::stdin()
        .read_line(&mut line)
        .map_err(|error| InputError::IoError {
            message: error.to_string(),
        })?;
    if bytes_read == 0 {
        return Err(InputError::IoError {
            message: "end of input".to_string(),
        });
    }
    parse_move_input(&line)
}
