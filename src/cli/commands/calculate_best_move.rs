//! Calculate best move command - print the engine's move for a position.

use riposte::alpha_beta_searcher::SearchContext;
use riposte::board::Board;
use riposte::chess_search::search_best_move;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(long = "fen")]
    pub starting_position: Board,
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) {
        let mut board = self.starting_position;
        let for_color = board.turn();

        let mut context = SearchContext::new(self.depth);
        let result = search_best_move(&mut context, &mut board, for_color);

        match result.best_move {
            Some(best_move) => println!("{}", best_move.to_uci()),
            None => eprintln!("There are no valid moves in the given position."),
        }
    }
}
