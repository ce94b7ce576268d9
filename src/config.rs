use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::solver::SolverErr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];

    /// The name accepted by `from_str`.
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "astar",
        }
    }
}

/// The label used in results and output.
impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Algorithm::Bfs => write!(f, "BFS"),
            Algorithm::Dfs => write!(f, "DFS"),
            Algorithm::AStar => write!(f, "A*"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SolverErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "astar" => Ok(Algorithm::AStar),
            _ => Err(SolverErr::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// How many states a search may expand before giving up.
    pub max_nodes: usize,
    /// Only used by DFS - longer paths are dropped without expanding them.
    pub max_depth: usize,
}

impl SearchLimits {
    pub const DEFAULT_MAX_NODES: usize = 10_000;
    pub const DEFAULT_MAX_DEPTH: usize = 50;

    pub fn new(max_nodes: usize, max_depth: usize) -> Self {
        Self {
            max_nodes,
            max_depth,
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_NODES, Self::DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_algorithms() {
        assert_eq!("bfs".parse::<Algorithm>().unwrap(), Algorithm::Bfs);
        assert_eq!("DFS".parse::<Algorithm>().unwrap(), Algorithm::Dfs);
        assert_eq!("AStar".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!(
            "xyz".parse::<Algorithm>().unwrap_err(),
            SolverErr::UnknownAlgorithm("xyz".to_string())
        );
        // the label is not a valid name
        assert!("A*".parse::<Algorithm>().is_err());
    }

    #[test]
    fn labels() {
        let labels: Vec<_> = Algorithm::ALL.iter().map(|a| a.to_string()).collect();
        assert_eq!(labels, vec!["BFS", "DFS", "A*"]);

        for &algorithm in &Algorithm::ALL {
            assert_eq!(algorithm.key().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn default_limits() {
        let limits = SearchLimits::default();
        assert_eq!(limits.max_nodes, 10_000);
        assert_eq!(limits.max_depth, 50);
    }
}
