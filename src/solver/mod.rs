mod a_star;
mod backtracking;
mod bfs;
mod dfs;
mod stats;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::time::{Duration, Instant};

use crate::config::{Algorithm, SearchLimits};
use crate::data::DIRECTIONS;
use crate::level::Level;
use crate::map::GoalMap;
use crate::moves::{Move, Moves};
use crate::parser::{self, ParserErr};
use crate::state::State;
use crate::Solve;

pub use self::stats::Stats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverErr {
    UnknownAlgorithm(String),
    Parse(ParserErr),
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::UnknownAlgorithm(ref name) => write!(f, "Unknown algorithm: {}", name),
            SolverErr::Parse(ref err) => write!(f, "{}", err),
        }
    }
}

impl Error for SolverErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            SolverErr::UnknownAlgorithm(_) => None,
            SolverErr::Parse(ref err) => Some(err),
        }
    }
}

impl From<ParserErr> for SolverErr {
    fn from(err: ParserErr) -> Self {
        SolverErr::Parse(err)
    }
}

/// Outcome of a search that ran to completion.
///
/// `moves` is `None` when no solution was found - either the level has none
/// or the node budget ran out first, the two are indistinguishable.
pub struct SolverOk {
    pub moves: Option<Moves>,
    pub stats: Stats,
    pub algorithm: Algorithm,
    pub elapsed: Duration,
}

impl SolverOk {
    fn new(moves: Option<Moves>, stats: Stats, algorithm: Algorithm, elapsed: Duration) -> Self {
        Self {
            moves,
            stats,
            algorithm,
            elapsed,
        }
    }

    pub fn nodes_explored(&self) -> usize {
        self.stats.nodes_explored()
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.moves {
            None => writeln!(f, "{}: No solution", self.algorithm)?,
            Some(ref moves) => writeln!(f, "{}: {}", self.algorithm, moves)?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, algorithm: Algorithm, limits: SearchLimits) -> SolverOk {
        solve(self, algorithm, limits)
    }
}

pub fn solve(level: &Level, algorithm: Algorithm, limits: SearchLimits) -> SolverOk {
    debug!(
        "Search called: {}, max nodes {}, max depth {}",
        algorithm, limits.max_nodes, limits.max_depth
    );

    let started = Instant::now();
    let (moves, stats) = match algorithm {
        Algorithm::Bfs => bfs::search(level, limits),
        Algorithm::Dfs => dfs::search(level, limits),
        Algorithm::AStar => a_star::search(level, limits),
    };
    let elapsed = started.elapsed();

    match moves {
        Some(ref moves) => info!(
            "{} found a solution with {} moves after exploring {} states",
            algorithm,
            moves.move_cnt(),
            stats.nodes_explored()
        ),
        None => info!(
            "{} found no solution after exploring {} states",
            algorithm,
            stats.nodes_explored()
        ),
    }
    SolverOk::new(moves, stats, algorithm, elapsed)
}

/// Parses the map and picks the algorithm by its (case insensitive) name.
pub fn solve_named<S: AsRef<str>>(
    rows: &[S],
    algorithm: &str,
    limits: SearchLimits,
) -> Result<SolverOk, SolverErr> {
    let level = parser::parse_rows(rows)?;
    let algorithm = algorithm.parse()?;
    Ok(solve(&level, algorithm, limits))
}

/// Walks and pushes possible from `state`, in the order of `DIRECTIONS`.
///
/// Doesn't filter out moves that undo the previous one,
/// the searches are responsible for ignoring states they've already seen.
pub fn legal_moves(map: &GoalMap, state: &State) -> Vec<Move> {
    let mut moves = Vec::with_capacity(DIRECTIONS.len());

    for &dir in &DIRECTIONS {
        let new_player_pos = state.player_pos + dir;
        if !map.is_walkable(new_player_pos) {
            continue;
        }

        if state.has_box(new_player_pos) {
            let push_dest = new_player_pos + dir;
            if map.is_walkable(push_dest) && !state.has_box(push_dest) {
                moves.push(Move::new(dir, true));
            }
        } else {
            moves.push(Move::new(dir, false));
        }
    }

    moves
}

/// Sum of distances of each box to its closest goal.
///
/// Boxes are matched to goals independently so two boxes can count the same goal,
/// this can overestimate with multiple boxes.
pub fn heuristic(map: &GoalMap, state: &State) -> u32 {
    // less is better

    let mut goal_dist_sum = 0;
    for box_pos in &state.boxes {
        let min = map
            .goals
            .iter()
            .map(|&goal| box_pos.dist(goal))
            .min()
            .unwrap_or(0);
        goal_dist_sum += min;
    }
    goal_dist_sum
}

#[cfg(test)]
mod tests {
    use crate::data::{Dir, Pos};

    use super::*;

    fn parse(level: &str) -> Level {
        level.parse().unwrap()
    }

    /// Level with a shortest solution of `len` pushes to the right.
    fn corridor(len: usize) -> Level {
        let row = format!("#@${}.#", " ".repeat(len - 1));
        let wall = "#".repeat(row.len());
        parser::parse_rows(&[wall.clone(), row, wall]).unwrap()
    }

    fn replay(level: &Level, moves: &Moves) -> State {
        let mut state = level.state.clone();
        for &mov in moves {
            assert!(
                legal_moves(&level.map, &state).contains(&mov),
                "illegal move {} in\n{}",
                mov,
                level.map.xsb_with_state(&state)
            );
            state = state.apply(mov);
        }
        state
    }

    #[test]
    fn expand_walks_and_pushes() {
        let level = parse(
            r"
 ####
# $  #
# @$*#
# $  #
# ...#
 ####
",
        );
        // up pushes into a wall, right into another box
        let moves = legal_moves(&level.map, &level.state);
        assert_eq!(
            moves,
            vec![Move::new(Dir::Down, true), Move::new(Dir::Left, false)]
        );
    }

    #[test]
    fn expand_blocked_by_walls() {
        let level = parse(
            r"
#####
#@$##
#$  #
#.. #
#####
",
        );
        // right pushes into a wall, down pushes onto a goal
        let moves = legal_moves(&level.map, &level.state);
        assert_eq!(moves, vec![Move::new(Dir::Down, true)]);
    }

    #[test]
    fn expand_does_not_leave_the_grid() {
        // no border and ragged rows - cells missing at the end of a row are not floor
        let level = parser::parse_rows(&["@$. ", " ", "  "]).unwrap();
        let moves = legal_moves(&level.map, &level.state);
        assert_eq!(
            moves,
            vec![Move::new(Dir::Down, false), Move::new(Dir::Right, true)]
        );

        let down = level.state.apply(Move::new(Dir::Down, false));
        assert_eq!(down.player_pos, Pos::new(1, 0));
        // [1, 1] is padding
        assert_eq!(
            legal_moves(&level.map, &down),
            vec![Move::new(Dir::Up, false), Move::new(Dir::Down, false)]
        );
    }

    #[test]
    fn moves_stay_on_valid_cells() {
        let level = parse(
            r"
  #####
###   #
#.@$  #
### $.#
#.##$ #
# # . ##
#$ *$$.#
#   .  #
########
",
        );
        // everything reachable within a couple of moves
        let mut frontier = vec![level.state.clone()];
        for _ in 0..4 {
            let mut next = Vec::new();
            for state in &frontier {
                for mov in legal_moves(&level.map, state) {
                    let new_state = state.apply(mov);
                    assert!(level.map.is_walkable(new_state.player_pos));
                    assert!(!new_state.has_box(new_state.player_pos));
                    for window in new_state.boxes.windows(2) {
                        assert_ne!(window[0], window[1]);
                    }
                    for &b in &new_state.boxes {
                        assert!(level.map.is_walkable(b));
                    }
                    assert_eq!(new_state.boxes.len(), state.boxes.len());
                    next.push(new_state);
                }
            }
            frontier = next;
        }
    }

    #[test]
    fn heuristic_sums_closest_goals() {
        let level = parse(
            r"
#######
#@$  .#
#$   .#
#######
",
        );
        // 3 + 4
        assert_eq!(heuristic(&level.map, &level.state), 7);

        let level = parse(
            r"
#######
#@$ $.#
#    .#
#######
",
        );
        // both boxes pick the same goal, the real remaining cost is higher
        assert_eq!(heuristic(&level.map, &level.state), 3 + 1);

        let solved = parse("####\n#@*#\n####");
        assert_eq!(heuristic(&solved.map, &solved.state), 0);
    }

    #[test]
    fn simplest_all_algorithms() {
        let rows = ["#####", "#@$.#", "#####"];
        for name in &["bfs", "dfs", "astar", "BFS", "AStar"] {
            let solution = solve_named(&rows, name, SearchLimits::default()).unwrap();
            let moves = solution.moves.unwrap();
            assert_eq!(moves.dirs(), vec![Dir::Right]);
            assert_eq!(moves.to_string(), "R");
            assert_eq!(solution.stats.nodes_explored(), 1);
        }
    }

    #[test]
    fn unknown_algorithm() {
        let rows = ["#####", "#@$.#", "#####"];
        let err = solve_named(&rows, "xyz", SearchLimits::default()).unwrap_err();
        assert_eq!(err, SolverErr::UnknownAlgorithm("xyz".to_string()));
        assert_eq!(err.to_string(), "Unknown algorithm: xyz");
    }

    #[test]
    fn malformed_map() {
        let rows = ["#####", "# $.#", "#####"];
        let err = solve_named(&rows, "bfs", SearchLimits::default()).unwrap_err();
        assert_eq!(err, SolverErr::Parse(ParserErr::NoPlayer));
        assert!(err.source().is_some());
    }

    #[test]
    fn already_solved() {
        let level = parse("#####\n#@ *#\n#####");
        for &algorithm in &Algorithm::ALL {
            let solution = level.solve(algorithm, SearchLimits::default());
            assert_eq!(solution.moves, Some(Moves::default()));
            assert_eq!(solution.nodes_explored(), 0);
            assert_eq!(solution.algorithm, algorithm);
        }
    }

    #[test]
    fn sealed_box_exhausts_frontier() {
        // the box is stuck in the corner, the player can reach 8 cells
        let level = parse(
            r"
#####
#$  #
#  .#
# @ #
#####
",
        );
        let limits = SearchLimits::default();
        for &algorithm in &[Algorithm::Bfs, Algorithm::Dfs] {
            let solution = level.solve(algorithm, limits);
            assert!(solution.moves.is_none());
            assert_eq!(solution.nodes_explored(), 8);
            assert!(solution.nodes_explored() < limits.max_nodes);
        }
        let solution = level.solve(Algorithm::AStar, limits);
        assert!(solution.moves.is_none());
        assert_eq!(solution.nodes_explored(), 8);
    }

    #[test]
    fn depth_ceiling_stops_dfs() {
        let level = corridor(51);
        let limits = SearchLimits::default();

        let bfs = level.solve(Algorithm::Bfs, limits);
        let a_star = level.solve(Algorithm::AStar, limits);
        let dfs = level.solve(Algorithm::Dfs, limits);

        assert_eq!(bfs.moves.unwrap().move_cnt(), 51);
        assert_eq!(a_star.moves.unwrap().move_cnt(), 51);
        assert!(dfs.moves.is_none());

        // the same level within the ceiling is fine
        let raised = SearchLimits::new(limits.max_nodes, 60);
        let dfs = level.solve(Algorithm::Dfs, raised);
        assert_eq!(dfs.moves.unwrap().move_cnt(), 51);
    }

    #[test]
    fn budget_is_respected() {
        let level = parse(
            r"
########
#      #
# $$   #
# ..   #
#    @ #
#      #
########
",
        );
        for &max_nodes in &[0, 1, 7, 100] {
            let limits = SearchLimits::new(max_nodes, SearchLimits::DEFAULT_MAX_DEPTH);
            for &algorithm in &Algorithm::ALL {
                let solution = level.solve(algorithm, limits);
                assert!(solution.nodes_explored() <= max_nodes);
            }
        }

        let limits = SearchLimits::new(1, SearchLimits::DEFAULT_MAX_DEPTH);
        let solution = level.solve(Algorithm::Bfs, limits);
        assert!(solution.moves.is_none());
        assert_eq!(solution.nodes_explored(), 1);
    }

    #[test]
    fn paths_are_sound_and_bfs_is_shortest() {
        let levels = [
            "######\n#    #\n# $. #\n#  @ #\n######",
            "  ####\n  #  #\n  #$ #\n###.@#\n#    #\n######",
            "########\n#      #\n# $  . #\n#   @  #\n########",
            "  ####\n###  #\n#.@$ #\n#    #\n######",
            "########\n#      #\n# $$ . #\n#   .@ #\n#      #\n########",
        ];
        let limits = SearchLimits::default();

        for level in levels.iter() {
            let level = parse(level);

            let bfs = level.solve(Algorithm::Bfs, limits).moves.unwrap();
            let bfs_len = bfs.move_cnt();
            assert!(replay(&level, &bfs).is_solved(&level.map));

            for &algorithm in &[Algorithm::Dfs, Algorithm::AStar] {
                if let Some(moves) = level.solve(algorithm, limits).moves {
                    assert!(replay(&level, &moves).is_solved(&level.map));
                    assert!(bfs_len <= moves.move_cnt());
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let level = parse("########\n#      #\n# $  . #\n#   @  #\n########");
        for &algorithm in &Algorithm::ALL {
            let first = level.solve(algorithm, SearchLimits::default());
            let second = level.solve(algorithm, SearchLimits::default());
            assert_eq!(first.moves, second.moves);
            assert_eq!(first.stats, second.stats);
        }
    }
}
