//! Built-in levels grouped by difficulty.

use fnv::FnvHashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::level::Level;
use crate::parser::{self, ParserErr};

type Rows = &'static [&'static str];

/// Index into `LEVELS` used for unknown difficulties.
const FALLBACK: usize = 1;

#[rustfmt::skip]
const LEVELS: &[(&str, &[Rows])] = &[
    ("tutorial", &[
        &[
            "#####",
            "#   #",
            "# $.#",
            "# @ #",
            "#####",
        ],
        &[
            "  ####",
            "  #  #",
            "  #$ #",
            "###.@#",
            "#    #",
            "######",
        ],
        &[
            "######",
            "#    #",
            "# $. #",
            "#  @ #",
            "######",
        ],
        &[
            "  ####",
            "###  #",
            "#.@$ #",
            "#    #",
            "######",
        ],
    ]),
    ("easy", &[
        &[
            "  ####",
            "  #  #",
            "  #$ #",
            "###.@#",
            "#    #",
            "######",
        ],
        &[
            "  ####",
            "  #  #",
            "  #$ #",
            "###.@#",
            "#    #",
            "######",
        ],
        &[
            "########",
            "#      #",
            "# $  . #",
            "#   @  #",
            "########",
        ],
        &[
            "  ####",
            "  #  ###",
            "  #$   #",
            "  # #  #",
            "###.@###",
            "#     #",
            "#######",
        ],
    ]),
    ("medium", &[
        &[
            "########",
            "#      #",
            "# $$ . #",
            "#   .@ #",
            "#      #",
            "########",
        ],
        &[
            "  #####",
            "  #   #",
            "###$  #",
            "#  $. #",
            "# @.  #",
            "###  ##",
            "  ####",
        ],
        &[
            " ######",
            " #    #",
            "##$   #",
            "# .$  #",
            "#  .@ #",
            "###  ##",
            "  ####",
        ],
        &[
            "########",
            "#      #",
            "# $$   #",
            "# ..   #",
            "#    @ #",
            "#      #",
            "########",
        ],
    ]),
    ("hard", &[
        &[
            " ########",
            " #      #",
            "##$ $ $ #",
            "#  ...  #",
            "#     @ #",
            "#       #",
            "#########",
        ],
        &[
            "  ######",
            "  #    #",
            "###    #",
            "# .$   #",
            "# .$   #",
            "# .$  ##",
            "##   @#",
            " ######",
        ],
        &[
            "#########",
            "#       #",
            "# $ $ $ #",
            "# . . . #",
            "##     ##",
            " #  @  #",
            " #######",
        ],
        &[
            "  #######",
            "  #     #",
            "###$    #",
            "# .$    #",
            "# .   ###",
            "# . $ #",
            "##   @#",
            " ######",
        ],
    ]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedLevel {
    /// The difficulty actually used, unknown ones fall back to easy.
    pub difficulty: &'static str,
    /// Zero-based.
    pub index: usize,
    pub rows: Rows,
}

impl SelectedLevel {
    pub fn parse(&self) -> Result<Level, ParserErr> {
        parser::parse_rows(self.rows)
    }
}

/// Hands out built-in levels without serving the same one twice in a row.
///
/// The history is per difficulty and lives only as long as the repository,
/// selecting needs `&mut self` so sharing one between threads needs a lock.
#[derive(Debug, Clone)]
pub struct LevelRepository {
    last_served: FnvHashMap<&'static str, usize>,
    rng: ChaCha8Rng,
}

impl LevelRepository {
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Deterministic selection, mostly for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            last_served: FnvHashMap::default(),
            rng,
        }
    }

    pub fn difficulties(&self) -> impl Iterator<Item = &'static str> {
        LEVELS.iter().map(|&(difficulty, _)| difficulty)
    }

    pub fn levels(&self, difficulty: &str) -> Option<&'static [Rows]> {
        LEVELS
            .iter()
            .find(|&&(name, _)| name == difficulty)
            .map(|&(_, levels)| levels)
    }

    /// 0 for unknown difficulties.
    pub fn level_count(&self, difficulty: &str) -> usize {
        self.levels(difficulty).map_or(0, |levels| levels.len())
    }

    pub fn random_level(&mut self, difficulty: &str) -> SelectedLevel {
        let (difficulty, levels) = match LEVELS.iter().find(|&&(name, _)| name == difficulty) {
            Some(&entry) => entry,
            None => {
                debug!("Unknown difficulty {}, using {}", difficulty, LEVELS[FALLBACK].0);
                LEVELS[FALLBACK]
            }
        };

        self.pick(difficulty, levels)
    }

    fn pick(&mut self, difficulty: &'static str, levels: &'static [Rows]) -> SelectedLevel {
        if levels.len() == 1 {
            return SelectedLevel {
                difficulty,
                index: 0,
                rows: levels[0],
            };
        }

        let index = match self.last_served.get(difficulty) {
            Some(&last) => {
                // pick from all the others
                let index = self.rng.gen_range(0..levels.len() - 1);
                if index >= last {
                    index + 1
                } else {
                    index
                }
            }
            None => self.rng.gen_range(0..levels.len()),
        };
        self.last_served.insert(difficulty, index);

        SelectedLevel {
            difficulty,
            index,
            rows: levels[index],
        }
    }

    /// Forget which levels were served.
    pub fn reset(&mut self) {
        self.last_served.clear();
    }
}

impl Default for LevelRepository {
    fn default() -> Self {
        Self::new()
    }
}
