use std::env;
use std::fs;
use std::process;

use clap::{value_t, App, Arg, ArgGroup, ArgMatches};
use log::info;
use prettytable::{Cell, Row, Table};

use sokoban_search::config::{Algorithm, SearchLimits};
use sokoban_search::level::Level;
use sokoban_search::levels::LevelRepository;
use sokoban_search::parser;
use sokoban_search::response::{self, SolveRequest, SolveResponse};
use sokoban_search::solver::SolverOk;
use sokoban_search::validator;
use sokoban_search::Solve;

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-search")
        .author("Martin Taibr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solves Sokoban levels with BFS, DFS or A*")
        .arg(
            Arg::with_name("algorithm")
                .short("a")
                .long("algorithm")
                .takes_value(true)
                .default_value("astar")
                .help("bfs, dfs, astar or all to compare them"),
        )
        .arg(
            Arg::with_name("max-nodes")
                .short("n")
                .long("max-nodes")
                .takes_value(true)
                .default_value("10000")
                .help("how many states to explore before giving up"),
        )
        .arg(
            Arg::with_name("max-depth")
                .short("d")
                .long("max-depth")
                .takes_value(true)
                .default_value("50")
                .help("longest path DFS will follow"),
        )
        .arg(
            Arg::with_name("level")
                .short("l")
                .long("level")
                .takes_value(true)
                .help("solve a random built-in level of this difficulty"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .requires("level")
                .help("seed for picking the built-in level"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("print the result as JSON"),
        )
        .arg(
            Arg::with_name("validate")
                .long("validate")
                .help("only check the map is well formed"),
        )
        .arg(
            Arg::with_name("steps")
                .long("steps")
                .conflicts_with("json")
                .help("print the state after every move, not just after pushes"),
        )
        .arg(Arg::with_name("file").help("level in XSB format"))
        .group(
            ArgGroup::with_name("input")
                .args(&["file", "level"])
                .required(true),
        )
        .get_matches();

    let rows = load_rows(&matches);

    if matches.is_present("validate") {
        validate(&rows, matches.is_present("json"));
        return;
    }

    // malformed numbers exit with the usage message
    let limits = SearchLimits::new(
        value_t!(matches, "max-nodes", usize).unwrap_or_else(|err| err.exit()),
        value_t!(matches, "max-depth", usize).unwrap_or_else(|err| err.exit()),
    );

    let algorithm_name = matches.value_of("algorithm").unwrap_or("astar");

    if matches.is_present("json") {
        solve_json(rows, algorithm_name, limits);
        return;
    }

    let algorithms = if algorithm_name.eq_ignore_ascii_case("all") {
        Algorithm::ALL.to_vec()
    } else {
        match algorithm_name.parse() {
            Ok(algorithm) => vec![algorithm],
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
    };

    let level = parser::parse_rows(&rows).unwrap_or_else(|err| {
        eprintln!("Failed to parse: {}", err);
        process::exit(1);
    });

    if algorithms.len() == 1 {
        let algorithm = algorithms[0];
        println!("Solving using {}...", algorithm);
        let solution = level.solve(algorithm, limits);
        print_solution(&level, &solution, matches.is_present("steps"));
    } else {
        let solutions: Vec<_> = algorithms
            .into_iter()
            .map(|algorithm| level.solve(algorithm, limits))
            .collect();
        print_comparison(&solutions);
    }
}

fn load_rows(matches: &ArgMatches<'_>) -> Vec<String> {
    if let Some(difficulty) = matches.value_of("level") {
        let mut repo = match matches.value_of("seed") {
            Some(_) => LevelRepository::with_seed(
                value_t!(matches, "seed", u64).unwrap_or_else(|err| err.exit()),
            ),
            None => LevelRepository::new(),
        };
        let selected = repo.random_level(difficulty);
        info!(
            "Picked {} level {} of {}",
            selected.difficulty,
            selected.index + 1,
            repo.level_count(selected.difficulty)
        );
        return selected.rows.iter().map(|row| row.to_string()).collect();
    }

    // the group makes sure one of them is present
    let path = matches.value_of("file").unwrap_or_default();
    let text = fs::read_to_string(path).unwrap_or_else(|err| {
        match env::current_dir() {
            Ok(dir) => eprintln!("Can't read file {} in {}: {}", path, dir.display(), err),
            Err(_) => eprintln!("Can't read file {}: {}", path, err),
        }
        process::exit(1);
    });
    text.trim_matches('\n')
        .trim_end()
        .lines()
        .map(|row| row.to_string())
        .collect()
}

fn validate(rows: &[String], json: bool) {
    let validation = validator::validate(rows);
    if json {
        print_json(&validation);
    } else {
        println!("{}", validation.message);
        if let Some(stats) = validation.stats {
            println!("Boxes: {}", stats.boxes);
            println!("Goals: {}", stats.goals);
            println!("Players: {}", stats.player);
        }
    }
    if !validation.valid {
        process::exit(1);
    }
}

fn solve_json(rows: Vec<String>, algorithm_name: &str, limits: SearchLimits) {
    if algorithm_name.eq_ignore_ascii_case("all") {
        let responses: Vec<SolveResponse> = Algorithm::ALL
            .iter()
            .map(|algorithm| {
                let request = SolveRequest::new(rows.clone(), algorithm.key());
                response::handle_solve(&request, limits)
            })
            .collect();
        print_json(&responses);
        if responses.iter().any(SolveResponse::is_rejected) {
            process::exit(1);
        }
    } else {
        let response = response::handle_solve(&SolveRequest::new(rows, algorithm_name), limits);
        print_json(&response);
        if response.is_rejected() {
            process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("Failed to serialize result: {}", err);
            process::exit(1);
        }
    }
}

fn print_solution(level: &Level, solution: &SolverOk, include_steps: bool) {
    match solution.moves {
        None => println!("No solution"),
        Some(ref moves) => {
            println!("Found solution:");
            print!("{}", level.format_solution(moves, include_steps));
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
        }
    }
    println!();
    print!("{}", solution.stats);
}

fn print_comparison(solutions: &[SolverOk]) {
    let mut table = Table::new();
    table.set_titles(Row::new(
        [
            "Algorithm",
            "Solved",
            "Moves",
            "Pushes",
            "Explored",
            "Created",
            "Max depth",
            "Time (ms)",
        ]
        .iter()
        .map(|title| Cell::new(title))
        .collect(),
    ));
    for solution in solutions {
        let (solved, moves, pushes) = match solution.moves {
            Some(ref moves) => (
                "yes",
                moves.move_cnt().to_string(),
                moves.push_cnt().to_string(),
            ),
            None => ("no", "-".to_string(), "-".to_string()),
        };
        let max_depth = solution
            .stats
            .max_depth()
            .map_or_else(|| "-".to_string(), |depth| depth.to_string());
        let millis = solution.elapsed.as_secs() as f64 * 1000.0
            + f64::from(solution.elapsed.subsec_nanos()) / 1_000_000.0;
        table.add_row(Row::new(vec![
            Cell::new(&solution.algorithm.to_string()),
            Cell::new(solved),
            Cell::new(&moves),
            Cell::new(&pushes),
            Cell::new(&solution.nodes_explored().to_string()),
            Cell::new(&solution.stats.total_created().to_string()),
            Cell::new(&max_depth),
            Cell::new(&format!("{:.3}", millis)),
        ]));
    }
    table.printstd();
}
