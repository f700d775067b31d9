//! Generic fixed-depth alpha-beta search over a game-agnostic trait seam.

mod search;
mod traits;

#[cfg(test)]
mod tests;

pub use search::{alpha_beta_search, choose_move, SearchContext, SearchResult};
pub use traits::{Evaluator, GameMove, GameState, MoveCollection, MoveGenerator};
