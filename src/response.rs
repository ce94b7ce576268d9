//! Result records exchanged with whatever sits in front of the solver.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::config::SearchLimits;
use crate::data::Dir;
use crate::solver::{self, SolverOk};

pub const NO_SOLUTION: &str = "No solution found or timeout";
pub const NO_MAP: &str = "No map provided";

fn default_algorithm() -> String {
    "astar".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    #[serde(default)]
    pub map: Vec<String>,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl SolveRequest {
    pub fn new(map: Vec<String>, algorithm: &str) -> Self {
        Self {
            map,
            algorithm: algorithm.to_string(),
        }
    }
}

/// Requests that were rejected before searching have no statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<Vec<Dir>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub nodes_explored: Option<usize>,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub algorithm: Option<String>,
}

impl SolveResponse {
    pub fn rejected(error: String) -> Self {
        Self {
            success: false,
            path: None,
            error: Some(error),
            nodes_explored: None,
            time: None,
            algorithm: None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        !self.success && self.nodes_explored.is_none()
    }
}

impl From<&SolverOk> for SolveResponse {
    fn from(solution: &SolverOk) -> Self {
        let time = solution.elapsed.as_secs() as f64
            + f64::from(solution.elapsed.subsec_nanos()) / 1_000_000_000.0;
        match solution.moves {
            Some(ref moves) => Self {
                success: true,
                path: Some(moves.dirs()),
                error: None,
                nodes_explored: Some(solution.nodes_explored()),
                time: Some(time),
                algorithm: Some(solution.algorithm.to_string()),
            },
            None => Self {
                success: false,
                path: None,
                error: Some(NO_SOLUTION.to_string()),
                nodes_explored: Some(solution.nodes_explored()),
                time: Some(time),
                algorithm: None,
            },
        }
    }
}

/// Turns a request into a response, whatever happens.
///
/// Malformed maps and unknown algorithms are rejected, a panic during the search
/// is reported as an unexpected failure.
pub fn handle_solve(request: &SolveRequest, limits: SearchLimits) -> SolveResponse {
    if request.map.is_empty() {
        return SolveResponse::rejected(NO_MAP.to_string());
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        solver::solve_named(&request.map, &request.algorithm, limits)
    }));
    match result {
        Ok(Ok(solution)) => SolveResponse::from(&solution),
        Ok(Err(err)) => {
            debug!("Rejected request: {}", err);
            SolveResponse::rejected(err.to_string())
        }
        Err(payload) => {
            error!("Solver panicked: {}", panic_message(&*payload));
            SolveResponse::rejected(format!("Unexpected failure: {}", panic_message(&*payload)))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
