use std::cmp::Ordering;
use std::collections::BinaryHeap;

use typed_arena::Arena;

use crate::config::SearchLimits;
use crate::level::Level;
use crate::moves::{Move, Moves};
use crate::state::State;

use super::backtracking::{solution_through, Prevs};
use super::stats::Stats;
use super::{heuristic, legal_moves};

#[derive(Debug, Clone, Copy)]
pub(super) struct SearchNode<'a> {
    pub(super) state: &'a State,
    pub(super) prev: Option<(&'a State, Move)>,
    pub(super) dist: usize,
    pub(super) cost: usize,
    /// Order of insertion, breaks ties between nodes with the same cost.
    pub(super) order: u64,
}

impl<'a> SearchNode<'a> {
    pub(super) fn new(
        state: &'a State,
        prev: Option<(&'a State, Move)>,
        dist: usize,
        h: u32,
        order: u64,
    ) -> Self {
        Self {
            state,
            prev,
            dist,
            cost: dist + h as usize,
            order,
        }
    }
}

impl Ord for SearchNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for SearchNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode<'_> {}

/// Best-first by moves so far + `heuristic`.
///
/// A state can be queued multiple times, it's only marked as visited when popped
/// for the first time and later copies are skipped without using up the budget.
pub(super) fn search(level: &Level, limits: SearchLimits) -> (Option<Moves>, Stats) {
    let map = &level.map;
    let mut stats = Stats::new();

    let arena = Arena::new();
    let mut prevs = Prevs::default();
    let mut to_visit = BinaryHeap::new();
    let mut order = 0;

    let start: &State = arena.alloc(level.state.clone());
    stats.add_created(0);
    if start.is_solved(map) {
        return (Some(Moves::default()), stats);
    }
    to_visit.push(SearchNode::new(start, None, 0, heuristic(map, start), order));

    while stats.nodes_explored() < limits.max_nodes {
        let cur_node = match to_visit.pop() {
            Some(node) => node,
            None => break,
        };
        if prevs.contains_key(cur_node.state) {
            stats.add_reached_duplicate(cur_node.dist);
            continue;
        }

        // insert here and not as soon as we discover it
        // otherwise we overwrite the shortest path with longer ones
        prevs.insert(cur_node.state, cur_node.prev);
        if stats.add_explored(cur_node.dist) {
            trace!("A* reached depth {}: {:?}", cur_node.dist, stats);
        }

        for mov in legal_moves(map, cur_node.state) {
            let new_state = cur_node.state.apply(mov);
            if prevs.contains_key(&new_state) {
                continue;
            }
            stats.add_created(cur_node.dist + 1);

            if new_state.is_solved(map) {
                debug!("A* solved, backtracking path");
                return (Some(solution_through(&prevs, cur_node.state, mov)), stats);
            }

            order += 1;
            let h = heuristic(map, &new_state);
            let new_state: &State = arena.alloc(new_state);
            to_visit.push(SearchNode::new(
                new_state,
                Some((cur_node.state, mov)),
                cur_node.dist + 1,
                h,
                order,
            ));
        }
    }

    (None, stats)
}
