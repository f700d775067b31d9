//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use super::commands::{
    calculate_best_move::CalculateBestMoveArgs, count_positions::CountPositionsArgs,
    play::PlayArgs, watch::WatchArgs, Command,
};

#[derive(StructOpt)]
#[structopt(
    name = "riposte",
    about = "A chess engine that answers your move with fixed-depth alpha-beta search ♞"
)]
pub enum Riposte {
    #[structopt(
        name = "play",
        about = "Play a game against the engine. It searches for its reply with alpha-beta pruning at the given `--depth` (default: 3). Your color is chosen at random unless you pass `--color`; the initial position can be given in FEN notation with `--fen`."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "watch",
        about = "Watch the engine play against itself at the given `--depth` (default: 3), starting from `--fen` (default: the starting position)."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "calculate-best-move",
        about = "Print the best move for the side to move in the position given with `--fen` (required), searching at `--depth` (default: 3)."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
    #[structopt(
        name = "count-positions",
        about = "Count the positions reachable in exactly `--depth` plies (default: 4) from `--fen` (default: the starting position), and report how long the enumeration took."
    )]
    CountPositions(CountPositionsArgs),
}

impl Command for Riposte {
    fn execute(self) {
        match self {
            Riposte::Play(cmd) => cmd.execute(),
            Riposte::Watch(cmd) => cmd.execute(),
            Riposte::CalculateBestMove(cmd) => cmd.execute(),
            Riposte::CountPositions(cmd) => cmd.execute(),
        }
    }
}
