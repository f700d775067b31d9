//! Parsing of external input: FEN positions and coordinate move strings.

pub mod fen;
pub mod fen_serialize;
pub mod input;

pub use input::{parse_move_input, read_move_input, InputError, MoveInput};
