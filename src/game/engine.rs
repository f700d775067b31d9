use std::time::Duration;

use log::info;
use thiserror::Error;

use crate::alpha_beta_searcher::SearchContext;
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::chess_search::search_best_move;
use crate::input_handler::MoveInput;
use crate::move_generator::{game_ending, ChessMoveList, GameEnding, MoveGenerator};

/// Engine configuration: how deep to search and where the game starts.
#[derive(Clone)]
pub struct EngineConfig {
    pub search_depth: u8,
    pub starting_position: Board,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            starting_position: Board::starting_position(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("move is not legal in this position: {input}")]
    IllegalMove { input: String },
    #[error("no move is available")]
    NoMoveAvailable,
    #[error("board error: {error}")]
    Board { error: BoardError },
}

/// Owns the single board of a game and serializes access to it: external
/// moves are validated and applied through it, and the automated side's
/// replies are chosen by the alpha-beta search. One move is in flight at a
/// time; there is no shared or global position state.
pub struct Engine {
    board: Board,
    move_generator: MoveGenerator,
    search_context: SearchContext,
    move_history: Vec<ChessMove>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let mut board = config.starting_position;
        // The starting position counts as seen once for repetition purposes.
        board.count_current_position();

        Self {
            board,
            move_generator: MoveGenerator::new(),
            search_context: SearchContext::new(config.search_depth),
            move_history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.board.turn()
    }

    pub fn move_history(&self) -> &[ChessMove] {
        &self.move_history
    }

    pub fn game_ending(&mut self) -> Option<GameEnding> {
        let turn = self.board.turn();
        game_ending(&mut self.board, &mut self.move_generator, turn)
    }

    /// The legal moves for the side to move.
    pub fn valid_moves(&mut self) -> ChessMoveList {
        let turn = self.board.turn();
        self.move_generator.generate_moves(&mut self.board, turn)
    }

    /// Validates and applies a move for the side to move.
    pub fn apply_move(&mut self, chess_move: ChessMove) -> Result<(), EngineError> {
        if !self.valid_moves().contains(&chess_move) {
            return Err(EngineError::IllegalMove {
                input: chess_move.to_uci(),
            });
        }

        chess_move
            .apply(&mut self.board)
            .map_err(|error| EngineError::Board { error })?;
        self.board.toggle_turn();
        self.move_history.push(chess_move);
        Ok(())
    }

    /// Matches externally submitted coordinates against the legal moves and
    /// applies the result. An input that matches no legal move is rejected
    /// before it can reach the board.
    pub fn make_move_from_input(&mut self, input: MoveInput) -> Result<ChessMove, EngineError> {
        let candidate = self
            .valid_moves()
            .iter()
            .find(|chess_move| input.matches_move(chess_move))
            .cloned()
            .ok_or_else(|| EngineError::IllegalMove {
                input: format!(
                    "{}{}",
                    input.from_square.to_algebraic(),
                    input.to_square.to_algebraic()
                ),
            })?;

        self.apply_move(candidate.clone())?;
        Ok(candidate)
    }

    /// Searches for the best move for the side to move and applies it.
    pub fn make_engine_move(&mut self) -> Result<ChessMove, EngineError> {
        let turn = self.board.turn();
        let result = search_best_move(&mut self.search_context, &mut self.board, turn);
        let best_move = result.best_move.ok_or(EngineError::NoMoveAvailable)?;

        info!(
            "engine plays {} (score {}, {} nodes, {} cutoffs)",
            best_move.to_uci(),
            result.score,
            self.search_context.visited_node_count(),
            self.search_context.cutoff_count()
        );

        self.apply_move(best_move.clone())?;
        Ok(best_move)
    }

    pub fn last_score(&self) -> Option<i16> {
        self.search_context.last_score()
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.search_context.last_search_duration()
    }

    pub fn searched_node_count(&self) -> usize {
        self.search_context.visited_node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_handler::parse_move_input;

    #[test]
    fn test_external_move_then_engine_reply() {
        let mut engine = Engine::with_config(EngineConfig {
            search_depth: 2,
            starting_position: Board::starting_position(),
        });

        let played = engine
            .make_move_from_input(parse_move_input("e2e4").unwrap())
            .unwrap();
        assert_eq!(played.to_uci(), "e2e4");
        assert_eq!(engine.turn(), Color::Black);

        let reply = engine.make_engine_move().unwrap();
        assert_eq!(engine.turn(), Color::White);
        assert_eq!(engine.move_history(), &[played, reply][..]);
        assert!(engine.last_score().is_some());
    }

    #[test]
    fn test_illegal_input_is_rejected_before_reaching_the_board() {
        let mut engine = Engine::new();
        let fen_before = engine.board().to_fen();

        let result = engine.make_move_from_input(parse_move_input("e2e5").unwrap());
        assert!(matches!(result, Err(EngineError::IllegalMove { .. })));
        assert_eq!(fen_before, engine.board().to_fen());
    }

    #[test]
    fn test_no_move_available_in_a_finished_game() {
        use crate::board::piece::Piece;
        use crate::chess_position;

        // Black is stalemated and to move.
        let mut board = chess_position! {
            k.......
            ..Q.....
            .K......
            ........
            ........
            ........
            ........
            ........
        };
        board.set_turn(Color::Black);

        let mut engine = Engine::with_config(EngineConfig {
            search_depth: 3,
            starting_position: board,
        });
        assert_eq!(engine.game_ending(), Some(GameEnding::Stalemate));
        assert!(matches!(
            engine.make_engine_move(),
            Err(EngineError::NoMoveAvailable)
        ));
    }
}
