//! Alpha-beta minimax search.
//!
//! The search explores the game tree to a fixed depth, alternating
//! maximizing and minimizing levels. The window `[alpha, beta]` carries the
//! best scores each side can already guarantee on the path to the root:
//! alpha only rises, beta only falls, and once `beta <= alpha` the remaining
//! siblings at a node cannot affect the root result and are skipped. Pruning
//! changes how many nodes are visited, never the returned score.

use std::cmp::{max, min};
use std::time::{Duration, Instant};

use log::debug;

use super::traits::{Evaluator, GameMove, GameState, MoveCollection, MoveGenerator};

/// The outcome of a search call: the score of the subtree and the move that
/// achieves it. Leaves choose no move, and a root without a legal
/// continuation reports `best_move: None`; callers must not try to apply a
/// move in that case.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<M> {
    pub score: i16,
    pub best_move: Option<M>,
}

impl<M> SearchResult<M> {
    fn leaf(score: i16) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Holds the fixed search depth and the statistics of the most recent search.
pub struct SearchContext {
    search_depth: u8,
    visited_node_count: usize,
    cutoff_count: usize,
    last_score: Option<i16>,
    last_duration: Option<Duration>,
}

impl SearchContext {
    pub fn new(search_depth: u8) -> Self {
        Self {
            search_depth,
            visited_node_count: 0,
            cutoff_count: 0,
            last_score: None,
            last_duration: None,
        }
    }

    pub fn search_depth(&self) -> u8 {
        self.search_depth
    }

    /// Nodes visited by the most recent search, leaves included.
    pub fn visited_node_count(&self) -> usize {
        self.visited_node_count
    }

    /// Beta (and alpha) cutoffs taken by the most recent search.
    pub fn cutoff_count(&self) -> usize {
        self.cutoff_count
    }

    pub fn last_score(&self) -> Option<i16> {
        self.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    fn reset_stats(&mut self) {
        self.visited_node_count = 0;
        self.cutoff_count = 0;
        self.last_score = None;
        self.last_duration = None;
    }

    fn record_result(&mut self, score: i16, duration: Duration) {
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }
}

/// Searches from the root with an infinite window, maximizing for the player
/// whose interests the evaluator represents. Equivalent to
/// `alpha_beta_search` with `alpha = -inf`, `beta = +inf`, `maximizing =
/// true`.
pub fn choose_move<S, G, E>(
    context: &mut SearchContext,
    state: &mut S,
    move_generator: &mut G,
    evaluator: &mut E,
) -> SearchResult<G::Move>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
{
    context.reset_stats();
    let depth = context.search_depth;
    let start = Instant::now();

    let result = alpha_beta_search(
        context,
        state,
        move_generator,
        evaluator,
        depth,
        i16::MIN,
        i16::MAX,
        true,
    );

    context.record_result(result.score, start.elapsed());
    debug!(
        "search finished: score {}, {} nodes, {} cutoffs",
        result.score, context.visited_node_count, context.cutoff_count
    );

    result
}

/// The recursive alpha-beta procedure.
///
/// At `depth == 0` or in a terminal position the static evaluation is
/// returned with no move. Otherwise each legal move is applied, searched one
/// level shallower with the current window and the opposite role, and undone.
/// A move replaces the best only when it is strictly better, so the first of
/// two equally-scored moves wins. After each move the appropriate bound is
/// tightened, and iteration stops as soon as `beta <= alpha`, returning what
/// has been found so far.
#[allow(clippy::too_many_arguments)]
pub fn alpha_beta_search<S, G, E>(
    context: &mut SearchContext,
    state: &mut S,
    move_generator: &mut G,
    evaluator: &mut E,
    depth: u8,
    mut alpha: i16,
    mut beta: i16,
    maximizing_player: bool,
) -> SearchResult<G::Move>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
{
    context.visited_node_count += 1;

    if depth == 0 || move_generator.is_terminal(state) {
        return SearchResult::leaf(evaluator.evaluate(state));
    }

    let candidates = move_generator.generate_moves(state);
    if candidates.is_empty() {
        // The terminal predicate said the game goes on, but the rules engine
        // produced no moves. The initializer score below is the worst
        // possible for the player at this node, so the branch is never
        // preferred by an ancestor.
        debug!("non-terminal node has no legal moves; returning sentinel score");
    }

    let mut best_score = if maximizing_player {
        i16::MIN
    } else {
        i16::MAX
    };
    let mut best_move = None;

    for game_move in candidates.as_ref().iter() {
        let result = with_move_applied(game_move, state, |state| {
            alpha_beta_search(
                context,
                state,
                move_generator,
                evaluator,
                depth - 1,
                alpha,
                beta,
                !maximizing_player,
            )
        });

        let improved = if maximizing_player {
            result.score > best_score
        } else {
            result.score < best_score
        };
        if improved {
            best_score = result.score;
            best_move = Some(game_move.clone());
        }

        if maximizing_player {
            alpha = max(alpha, best_score);
        } else {
            beta = min(beta, best_score);
        }
        if beta <= alpha {
            context.cutoff_count += 1;
            break;
        }
    }

    SearchResult {
        score: best_score,
        best_move,
    }
}

/// Applies a move, runs `f`, then undoes the move, toggling the turn on the
/// way in and back out. Keeps apply/undo strictly nested on every path so
/// the state is bit-identical after the call.
fn with_move_applied<S, M, F, R>(game_move: &M, state: &mut S, f: F) -> R
where
    S: GameState,
    M: GameMove<State = S>,
    F: FnOnce(&mut S) -> R,
{
    game_move
        .apply(state)
        .expect("move application should succeed in search");
    state.toggle_turn();

    let result = f(state);

    state.toggle_turn();
    game_move
        .undo(state)
        .expect("move undo should succeed in search");

    result
}
