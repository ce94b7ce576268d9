// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]

#[macro_use]
extern crate log;

pub mod config;
pub mod data;
pub mod level;
pub mod levels;
pub mod map;
pub mod map_formatter;
pub mod moves;
pub mod parser;
pub mod response;
pub mod solution_formatter;
pub mod solver;
pub mod state;
pub mod validator;

mod vec2d;

use std::error::Error;
use std::fs;

use crate::config::{Algorithm, SearchLimits};
use crate::level::Level;
use crate::solver::SolverOk;

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

impl LoadLevel for str {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let level = fs::read_to_string(self)?;
        Ok(level.parse()?)
    }
}

/// Searching always finishes, running out of budget is reported as no solution.
pub trait Solve {
    fn solve(&self, algorithm: Algorithm, limits: SearchLimits) -> SolverOk;
}
