use std::cmp::{max, min};

use common::bitboard::square::*;

use super::*;
use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::chess_position;
use crate::chess_search::{search_best_move, ChessEvaluator};
use crate::evaluate;
use crate::move_generator::MoveGenerator as ChessMoveGenerator;
use crate::std_move;

/// Exhaustive fixed-depth minimax with no pruning. The search must agree
/// with this on every position; it may only visit fewer nodes.
fn minimax_reference(
    board: &mut Board,
    move_generator: &mut ChessMoveGenerator,
    evaluator: &mut ChessEvaluator,
    depth: u8,
    maximizing_player: bool,
    visited_nodes: &mut usize,
) -> i16 {
    *visited_nodes += 1;

    if depth == 0 || MoveGenerator::is_terminal(move_generator, board) {
        return Evaluator::evaluate(evaluator, board);
    }

    let candidates = MoveGenerator::generate_moves(move_generator, board);
    let mut best_score = if maximizing_player {
        i16::MIN
    } else {
        i16::MAX
    };

    for chess_move in candidates.iter() {
        chess_move.apply(board).unwrap();
        board.toggle_turn();
        let score = minimax_reference(
            board,
            move_generator,
            evaluator,
            depth - 1,
            !maximizing_player,
            visited_nodes,
        );
        board.toggle_turn();
        chess_move.undo(board).unwrap();

        best_score = if maximizing_player {
            max(best_score, score)
        } else {
            min(best_score, score)
        };
    }

    best_score
}

fn static_score(board: &Board, perspective: Color) -> i16 {
    let move_generator = ChessMoveGenerator::new();
    evaluate::score(board, &move_generator, perspective)
}

fn sparse_tactical_position() -> Board {
    chess_position! {
        .......k
        ...r....
        ........
        ..p.....
        ........
        ...N....
        ........
        K.......
    }
}

fn developed_middlegame_position() -> Board {
    chess_position! {
        r..qk..r
        ppp..ppp
        ..n..n..
        ...pp...
        .B.P....
        ..N..N..
        PPP..PPP
        R..QK..R
    }
}

#[test]
fn test_depth_zero_returns_the_static_evaluation() {
    let mut board = developed_middlegame_position();
    let expected = static_score(&board, Color::White);

    let mut context = SearchContext::new(0);
    let result = search_best_move(&mut context, &mut board, Color::White);
    assert_eq!(result.score, expected);
    assert_eq!(result.best_move, None);
}

#[test]
fn test_depth_zero_ignores_the_window_and_role() {
    let mut board = sparse_tactical_position();
    let expected = static_score(&board, Color::White);

    let windows = [
        (i16::MIN, i16::MAX),
        (-1, 1),
        (50, 60),
        (i16::MIN, i16::MIN + 1),
    ];
    for &(alpha, beta) in &windows {
        for &maximizing in &[true, false] {
            let mut context = SearchContext::new(0);
            let mut move_generator = ChessMoveGenerator::new();
            let mut evaluator = ChessEvaluator::new(Color::White);
            let result = alpha_beta_search(
                &mut context,
                &mut board,
                &mut move_generator,
                &mut evaluator,
                0,
                alpha,
                beta,
                maximizing,
            );
            assert_eq!(result.score, expected);
            assert_eq!(result.best_move, None);
        }
    }
}

#[test]
fn test_terminal_position_short_circuits_at_any_depth() {
    // Black is stalemated: the search must evaluate the position as-is and
    // choose no move, no matter how much depth remains.
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
    let expected = static_score(&board, Color::Black);

    for depth in 1..=4 {
        let mut context = SearchContext::new(depth);
        let result = search_best_move(&mut context, &mut board, Color::Black);
        assert_eq!(result.score, expected);
        assert_eq!(result.best_move, None);
        assert_eq!(context.visited_node_count(), 1, "terminal root is a leaf");
    }
}

#[test]
fn test_pruning_never_changes_the_score() {
    let cases: Vec<(Board, Color, u8)> = vec![
        (Board::starting_position(), Color::White, 2),
        (Board::starting_position(), Color::White, 3),
        (sparse_tactical_position(), Color::White, 3),
        (developed_middlegame_position(), Color::White, 2),
    ];

    for (mut board, color, depth) in cases {
        let mut context = SearchContext::new(depth);
        let pruned = search_best_move(&mut context, &mut board, color);

        let mut move_generator = ChessMoveGenerator::new();
        let mut evaluator = ChessEvaluator::new(color);
        let mut reference_nodes = 0;
        let reference_score = minimax_reference(
            &mut board,
            &mut move_generator,
            &mut evaluator,
            depth,
            true,
            &mut reference_nodes,
        );

        assert_eq!(
            pruned.score, reference_score,
            "alpha-beta and full-width minimax disagree at depth {}",
            depth
        );
        assert!(
            context.visited_node_count() <= reference_nodes,
            "pruning visited more nodes ({}) than the full-width search ({})",
            context.visited_node_count(),
            reference_nodes
        );
    }
}

#[test]
fn test_pruning_never_changes_the_score_for_black() {
    let mut board = sparse_tactical_position();
    board.set_turn(Color::Black);
    let depth = 3;

    let mut context = SearchContext::new(depth);
    let pruned = search_best_move(&mut context, &mut board, Color::Black);

    let mut move_generator = ChessMoveGenerator::new();
    let mut evaluator = ChessEvaluator::new(Color::Black);
    let mut reference_nodes = 0;
    let reference_score = minimax_reference(
        &mut board,
        &mut move_generator,
        &mut evaluator,
        depth,
        true,
        &mut reference_nodes,
    );

    assert_eq!(pruned.score, reference_score);
}

#[test]
fn test_cutoffs_actually_happen() {
    let mut board = developed_middlegame_position();
    let mut context = SearchContext::new(3);
    search_best_move(&mut context, &mut board, Color::White);
    assert!(
        context.cutoff_count() > 0,
        "a depth-3 middlegame search should prune something"
    );
}

#[test]
fn test_exact_scores_survive_a_narrowed_window() {
    // When the true score lies strictly inside the window, a narrowed window
    // must not change the result.
    let mut board = sparse_tactical_position();
    let depth = 2;

    let mut context = SearchContext::new(depth);
    let full_window = search_best_move(&mut context, &mut board, Color::White);

    let mut move_generator = ChessMoveGenerator::new();
    let mut evaluator = ChessEvaluator::new(Color::White);
    let narrowed = alpha_beta_search(
        &mut SearchContext::new(depth),
        &mut board,
        &mut move_generator,
        &mut evaluator,
        depth,
        full_window.score - 1,
        full_window.score + 1,
        true,
    );
    assert_eq!(narrowed.score, full_window.score);
}

#[test]
fn test_first_of_equally_scored_moves_wins() {
    // Two lone kings: every legal move scores exactly zero, so the move that
    // the rules engine enumerates first must be the one chosen.
    let mut board = chess_position! {
        .......k
        ........
        ........
        ........
        ........
        ........
        ........
        K.......
    };

    let mut move_generator = ChessMoveGenerator::new();
    let candidates = ChessMoveGenerator::generate_moves(&mut move_generator, &mut board, Color::White);
    let first_candidate = candidates[0].clone();

    let mut context = SearchContext::new(1);
    let result = search_best_move(&mut context, &mut board, Color::White);
    assert_eq!(result.score, 0);
    assert_eq!(result.best_move, Some(first_candidate));
}

#[test]
fn test_search_is_reproducible() {
    let mut board = developed_middlegame_position();

    let mut first_context = SearchContext::new(3);
    let first = search_best_move(&mut first_context, &mut board, Color::White);

    let mut second_context = SearchContext::new(3);
    let second = search_best_move(&mut second_context, &mut board, Color::White);

    assert_eq!(first, second);
    assert_eq!(
        first_context.visited_node_count(),
        second_context.visited_node_count()
    );
}

#[test]
fn test_hanging_queen_is_captured_at_depth_one() {
    // The rook can take an undefended queen; every alternative leaves the
    // material balance four points against white.
    let mut board = chess_position! {
        q......k
        ........
        ........
        ........
        ........
        ........
        ........
        R...K...
    };

    let mut context = SearchContext::new(1);
    let result = search_best_move(&mut context, &mut board, Color::White);

    assert_eq!(
        result.best_move,
        Some(std_move!(A1, A8, (Piece::Queen, Color::Black)))
    );
    // After the capture: +5 material for white, no threats either way.
    assert_eq!(result.score, 5);
}

#[test]
fn test_minimizing_root_picks_the_lowest_score() {
    // Black to move, scored from white's perspective: taking the hanging
    // white queen is the move that minimizes white's score.
    let mut board = chess_position! {
        r...k...
        ........
        ........
        ........
        ........
        ........
        ........
        Q......K
    };
    board.set_turn(Color::Black);

    let mut move_generator = ChessMoveGenerator::new();
    let mut evaluator = ChessEvaluator::new(Color::White);
    let mut context = SearchContext::new(1);
    let result = alpha_beta_search(
        &mut context,
        &mut board,
        &mut move_generator,
        &mut evaluator,
        1,
        i16::MIN,
        i16::MAX,
        false,
    );

    assert_eq!(
        result.best_move,
        Some(std_move!(A8, A1, (Piece::Queen, Color::White)))
    );
    assert_eq!(result.score, -5);
}

#[test]
fn test_search_restores_the_position_on_every_path() {
    let mut board = developed_middlegame_position();
    let fen_before = board.to_fen();
    let hash_before = board.current_position_hash();

    let mut context = SearchContext::new(3);
    search_best_move(&mut context, &mut board, Color::White);

    assert_eq!(fen_before, board.to_fen());
    assert_eq!(hash_before, board.current_position_hash());
}

// A rules engine that violates its contract: it reports the game as ongoing
// but produces no moves. The search falls back to the initializer sentinel
// and chooses no move, so an ancestor never prefers the broken branch.
mod collaborator_contract {
    use super::*;

    struct StubState;

    impl GameState for StubState {
        fn toggle_turn(&mut self) {}
    }

    #[derive(Clone, PartialEq, Debug)]
    struct StubMove;

    impl GameMove for StubMove {
        type State = StubState;
        type Error = ();

        fn apply(&self, _state: &mut StubState) -> Result<(), ()> {
            Ok(())
        }

        fn undo(&self, _state: &mut StubState) -> Result<(), ()> {
            Ok(())
        }
    }

    struct NoMovesGenerator;

    impl MoveGenerator<StubState> for NoMovesGenerator {
        type Move = StubMove;
        type MoveList = Vec<StubMove>;

        fn generate_moves(&mut self, _state: &mut StubState) -> Vec<StubMove> {
            Vec::new()
        }

        fn is_terminal(&mut self, _state: &mut StubState) -> bool {
            false
        }
    }

    struct ConstantEvaluator(i16);

    impl Evaluator<StubState> for ConstantEvaluator {
        fn evaluate(&mut self, _state: &mut StubState) -> i16 {
            self.0
        }
    }

    #[test]
    fn test_empty_non_terminal_node_returns_the_sentinel() {
        let mut context = SearchContext::new(2);
        let result = alpha_beta_search(
            &mut context,
            &mut StubState,
            &mut NoMovesGenerator,
            &mut ConstantEvaluator(42),
            2,
            i16::MIN,
            i16::MAX,
            true,
        );
        assert_eq!(result.score, i16::MIN);
        assert_eq!(result.best_move, None);

        let minimizing = alpha_beta_search(
            &mut context,
            &mut StubState,
            &mut NoMovesGenerator,
            &mut ConstantEvaluator(42),
            2,
            i16::MIN,
            i16::MAX,
            false,
        );
        assert_eq!(minimizing.score, i16::MAX);
        assert_eq!(minimizing.best_move, None);
    }
}
