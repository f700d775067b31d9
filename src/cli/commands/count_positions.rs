//! Count positions command - move generation validation and timing.

use std::time::Instant;

use riposte::board::Board;
use riposte::input_handler::fen::STARTING_POSITION_FEN;
use riposte::move_generator::MoveGenerator;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Board,
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        let mut board = self.starting_position;
        let color = board.turn();
        let mut move_generator = MoveGenerator::new();

        let start = Instant::now();
        let count = move_generator.count_positions(self.depth, &mut board, color);
        let elapsed = start.elapsed();

        println!(
            "{} positions at depth {} ({:?})",
            count, self.depth, elapsed
        );
    }
}
