//! Watch command - the engine plays both sides.

use std::thread;
use std::time::Duration;

use riposte::board::Board;
use riposte::game::display::GameDisplay;
use riposte::game::engine::{Engine, EngineConfig, EngineError};
use riposte::input_handler::fen::STARTING_POSITION_FEN;
use riposte::move_generator::GameEnding;
use structopt::StructOpt;

use super::Command;

const MOVE_DELAY: Duration = Duration::from_millis(400);

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Board,
}

impl Command for WatchArgs {
    fn execute(self) {
        let mut engine = Engine::with_config(EngineConfig {
            search_depth: self.depth,
            starting_position: self.starting_position,
        });
        let mut display = GameDisplay::new();
        let mut last_move_line: Option<String> = None;

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
                        println!("Checkmate. {} wins.", engine.turn().opposite());
                    }
                    GameEnding::Stalemate => println!("Stalemate."),
                    GameEnding::Draw => println!("Draw."),
                }
                return;
            }

            match engine.make_engine_move() {
                Ok(chess_move) => {
                    last_move_line = Some(format!(
                        "{} played {} (score {}, {} nodes)",
                        engine.turn().opposite(),
                        chess_move.to_uci(),
                        engine.last_score().unwrap_or_default(),
                        engine.searched_node_count(),
                    ));
                }
                Err(EngineError::NoMoveAvailable) => return,
                Err(error) => {
                    eprintln!("engine error: {}", error);
                    return;
                }
            }

            thread::sleep(MOVE_DELAY);
        }
    }
}
