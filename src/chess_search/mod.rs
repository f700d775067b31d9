//! Chess bindings for the generic alpha-beta search.

use crate::alpha_beta_searcher::{
    choose_move, Evaluator, GameMove, GameState, MoveCollection,
    MoveGenerator as SearchMoveGenerator, SearchContext, SearchResult,
};
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::evaluate;
use crate::move_generator::{game_ending, ChessMoveList, MoveGenerator};

impl GameState for Board {
    fn toggle_turn(&mut self) {
        Board::toggle_turn(self);
    }
}

impl GameMove for ChessMove {
    type State = Board;
    type Error = BoardError;

    fn apply(&self, state: &mut Board) -> Result<(), BoardError> {
        ChessMove::apply(self, state)
    }

    fn undo(&self, state: &mut Board) -> Result<(), BoardError> {
        ChessMove::undo(self, state)
    }
}

impl MoveCollection<ChessMove> for ChessMoveList {}

impl SearchMoveGenerator<Board> for MoveGenerator {
    type Move = ChessMove;
    type MoveList = ChessMoveList;

    fn generate_moves(&mut self, state: &mut Board) -> ChessMoveList {
        let color = state.turn();
        MoveGenerator::generate_moves(self, state, color)
    }

    fn is_terminal(&mut self, state: &mut Board) -> bool {
        let color = state.turn();
        game_ending(state, self, color).is_some()
    }
}

/// Scores positions for the color the engine is playing. The perspective is
/// fixed for the lifetime of a search: positive always favors `perspective`,
/// regardless of whose turn it is at the node being evaluated.
pub struct ChessEvaluator {
    perspective: Color,
    move_generator: MoveGenerator,
}

impl ChessEvaluator {
    pub fn new(perspective: Color) -> Self {
        Self {
            perspective,
            move_generator: MoveGenerator::new(),
        }
    }
}

impl Evaluator<Board> for ChessEvaluator {
    fn evaluate(&mut self, state: &mut Board) -> i16 {
        evaluate::score(state, &self.move_generator, self.perspective)
    }
}

/// Searches for the best move for `for_color`, which should be the side to
/// move. Returns `best_move: None` when the position has no legal
/// continuation.
pub fn search_best_move(
    context: &mut SearchContext,
    board: &mut Board,
    for_color: Color,
) -> SearchResult<ChessMove> {
    let mut move_generator = MoveGenerator::new();
    let mut evaluator = ChessEvaluator::new(for_color);
    choose_move(context, board, &mut move_generator, &mut evaluator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_position;
    use crate::board::piece::Piece;

    #[test]
    fn test_search_leaves_the_board_untouched() {
        let mut board = Board::starting_position();
        let fen_before = board.to_fen();
        let hash_before = board.current_position_hash();

        let mut context = SearchContext::new(3);
        let result = search_best_move(&mut context, &mut board, Color::White);
        assert!(result.best_move.is_some());

        assert_eq!(fen_before, board.to_fen());
        assert_eq!(hash_before, board.current_position_hash());
    }

    #[test]
    fn test_search_returns_no_move_in_a_finished_game() {
        // Black is stalemated.
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

        let mut context = SearchContext::new(4);
        let result = search_best_move(&mut context, &mut board, Color::Black);
        assert_eq!(result.best_move, None);
    }
}
