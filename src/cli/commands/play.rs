//! Play command - play a game against the engine.

use riposte::board::color::Color;
use riposte::board::Board;
use riposte::game::display::GameDisplay;
use riposte::game::engine::{Engine, EngineConfig, EngineError};
use riposte::input_handler::fen::STARTING_POSITION_FEN;
use riposte::input_handler::{read_move_input, InputError};
use riposte::move_generator::GameEnding;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(short = "c", long = "color", default_value = "random")]
    pub color: Color,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Board,
}

impl Command for PlayArgs {
    fn execute(self) {
        let human_color = self.color;
        let mut engine = Engine::with_config(EngineConfig {
            search_depth: self.depth,
            starting_position: self.starting_position,
        });
        let mut display = GameDisplay::new();
        let mut last_move_line: Option<String> = None;

        println!("You play {}.", human_color);

        loop {
            display.render_game_state(
                engine.board(),
                engine.turn(),
                last_move_line.as_deref(),
                None,
            );

            if let Some(ending) = engine.game_ending() {
                match ending {
                    GameEnding::Checkmate => {
                        let winner = engine.turn().opposite();
                        println!("Checkmate. {} wins.", winner);
                    }
                    GameEnding::Stalemate => println!("Stalemate."),
                    GameEnding::Draw => println!("Draw."),
                }
                return;
            }

            if engine.turn() == human_color {
                println!("Your move (e.g. e2e4, a7a8q):");
                let input = match read_move_input() {
                    Ok(input) => input,
                    Err(InputError::IoError { message }) => {
                        eprintln!("input error: {}", message);
                        return;
                    }
                    Err(error) => {
                        last_move_line = Some(format!("{}", error));
                        continue;
                    }
                };
                match engine.make_move_from_input(input) {
                    Ok(chess_move) => {
                        last_move_line = Some(format!("you played {}", chess_move.to_uci()));
                    }
                    Err(error) => {
                        last_move_line = Some(format!("{}", error));
                    }
                }
            } else {
                match engine.make_engine_move() {
                    Ok(chess_move) => {
                        last_move_line = Some(format!(
                            "engine played {} (score {}, {} nodes in {:?})",
                            chess_move.to_uci(),
                            engine.last_score().unwrap_or_default(),
                            engine.searched_node_count(),
                            engine.last_search_duration().unwrap_or_default(),
                        ));
                    }
                    Err(EngineError::NoMoveAvailable) => {
                        println!("The engine has no move available.");
                        return;
                    }
                    Err(error) => {
                        eprintln!("engine error: {}", error);
                        return;
                    }
                }
            }
        }
    }
}
