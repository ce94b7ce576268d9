use std::collections::VecDeque;

use typed_arena::Arena;

use crate::config::SearchLimits;
use crate::level::Level;
use crate::moves::Moves;
use crate::state::State;

use super::backtracking::{solution_through, Prevs};
use super::legal_moves;
use super::stats::Stats;

/// Breadth-first, finds a solution with the fewest moves.
///
/// States are marked as visited when queued so every state is queued at most once.
pub(super) fn search(level: &Level, limits: SearchLimits) -> (Option<Moves>, Stats) {
    let map = &level.map;
    let mut stats = Stats::new();

    let arena = Arena::new();
    let mut prevs = Prevs::default();
    let mut to_visit = VecDeque::new();

    let start: &State = arena.alloc(level.state.clone());
    stats.add_created(0);
    if start.is_solved(map) {
        return (Some(Moves::default()), stats);
    }
    prevs.insert(start, None);
    to_visit.push_back((start, 0));

    while stats.nodes_explored() < limits.max_nodes {
        let (cur, depth) = match to_visit.pop_front() {
            Some(node) => node,
            None => break,
        };
        if stats.add_explored(depth) {
            trace!("BFS reached depth {}: {:?}", depth, stats);
        }

        for mov in legal_moves(map, cur) {
            let new_state = cur.apply(mov);
            if prevs.contains_key(&new_state) {
                stats.add_reached_duplicate(depth + 1);
                continue;
            }
            stats.add_created(depth + 1);

            if new_state.is_solved(map) {
                debug!("BFS solved, backtracking path");
                return (Some(solution_through(&prevs, cur, mov)), stats);
            }

            let new_state: &State = arena.alloc(new_state);
            prevs.insert(new_state, Some((cur, mov)));
            to_visit.push_back((new_state, depth + 1));
        }
    }

    (None, stats)
}
