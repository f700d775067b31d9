use std::fmt::Write;

use common::bitboard::Square;
use termion::{clear, color, cursor, style};

use crate::board::color::Color as PlayerColor;
use crate::board::Board;

/// Renders the game to the terminal, one full frame per move.
pub struct GameDisplay {
    buffer: String,
}

impl Default for GameDisplay {
    fn default() -> Self {
        Self {
            buffer: String::with_capacity(2048),
        }
    }
}

impl GameDisplay {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn render_game_state(
        &mut self,
        board: &Board,
        current_turn: PlayerColor,
        last_move: Option<&str>,
        stats: Option<&str>,
    ) {
        self.buffer.clear();
        write!(self.buffer, "{}{}", cursor::Goto(1, 1), clear::All).unwrap();

        writeln!(self.buffer, "    a  b  c  d  e  f  g  h").unwrap();
        for rank in (0..8u8).rev() {
            write!(self.buffer, " {} ", rank + 1).unwrap();
            for file in 0..8u8 {
                let square = Square::from_rank_file(rank, file);
                let piece_char = match board.get(square) {
                    Some((piece, color)) => piece.to_unicode_char(color),
                    None => {
                        if (rank + file) % 2 == 0 {
                            ' '
                        } else {
                            '·'
                        }
                    }
                };
                write!(self.buffer, " {} ", piece_char).unwrap();
            }
            writeln!(self.buffer, " {}", rank + 1).unwrap();
        }
        writeln!(self.buffer, "    a  b  c  d  e  f  g  h\n").unwrap();

        writeln!(
            self.buffer,
            "{}Turn:{} {}",
            style::Bold,
            style::Reset,
            current_turn
        )
        .unwrap();

        if let Some(last_move) = last_move {
            writeln!(
                self.buffer,
                "{}Last move:{} {}",
                color::Fg(color::Cyan),
                color::Fg(color::Reset),
                last_move
            )
            .unwrap();
        }

        if let Some(stats) = stats {
            writeln!(self.buffer, "\n{}", stats).unwrap();
        }

        print!("{}", self.buffer);
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}
