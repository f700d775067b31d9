//! The capability seam between the search and the rules engine.
//!
//! The searcher never inspects a position directly. Legal moves in a
//! deterministic order, the terminal predicate, balanced apply/undo and the
//! leaf score all come through these traits, so the search itself is
//! game-agnostic.

use std::fmt::Debug;

/// A mutable game position. A single instance is threaded through the entire
/// search by reference; the searcher restores it to its pre-call state before
/// returning on every path, including pruned ones.
pub trait GameState {
    /// Switches to the next player's turn.
    fn toggle_turn(&mut self);
}

/// An action that can be applied to and undone from a game state. Apply and
/// undo must be exact inverses, and undo must only ever be called for the
/// most recently applied move.
pub trait GameMove: Clone + PartialEq + Debug {
    type State: GameState;
    type Error: Debug;

    fn apply(&self, state: &mut Self::State) -> Result<(), Self::Error>;

    fn undo(&self, state: &mut Self::State) -> Result<(), Self::Error>;
}

/// The rules-engine collaborator: enumerates legal moves and reports when a
/// position has no legal continuation.
///
/// The enumeration order is caller-visible: when two moves score equally, the
/// search keeps whichever came first, so the order must be deterministic for
/// reproducible play.
pub trait MoveGenerator<S: GameState> {
    type Move: GameMove<State = S>;
    type MoveList: MoveCollection<Self::Move>;

    /// All legal moves for the player whose turn it is.
    fn generate_moves(&mut self, state: &mut S) -> Self::MoveList;

    /// True when the game has ended and no further moves should be searched.
    /// Checked before `generate_moves` is trusted to be non-empty.
    fn is_terminal(&mut self, state: &mut S) -> bool;
}

/// Scores a position at a search leaf. Higher is better for the maximizing
/// side. Must be deterministic and must not mutate the position.
pub trait Evaluator<S: GameState> {
    fn evaluate(&mut self, state: &mut S) -> i16;
}

/// Abstraction over move list containers (Vec, SmallVec, ...).
pub trait MoveCollection<M>: AsRef<[M]> {
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<M> MoveCollection<M> for Vec<M> {}
