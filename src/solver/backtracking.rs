use fnv::FnvHashMap;

use crate::moves::{Move, Moves};
use crate::state::State;

/// How each visited state was first reached, the initial state maps to `None`.
pub(super) type Prevs<'a> = FnvHashMap<&'a State, Option<(&'a State, Move)>>;

pub(super) fn backtrack_moves(prevs: &Prevs<'_>, final_state: &State) -> Moves {
    let mut moves = Vec::new();
    let mut cur = final_state;
    while let Some(&Some((prev, mov))) = prevs.get(cur) {
        moves.push(mov);
        cur = prev;
    }
    moves.reverse();
    Moves::new(moves)
}

/// Path to `last_state` followed by the move that reached the solution from it.
pub(super) fn solution_through(prevs: &Prevs<'_>, last_state: &State, last_move: Move) -> Moves {
    let mut moves = backtrack_moves(prevs, last_state);
    moves.add(last_move);
    moves
}
