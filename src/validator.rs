//! Quick sanity check of a map before trying to solve it - only counts symbols,
//! doesn't parse the level.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapStats {
    pub boxes: usize,
    pub goals: usize,
    pub player: usize,
}

impl MapStats {
    pub fn count<S: AsRef<str>>(rows: &[S]) -> Self {
        let mut stats = MapStats::default();
        for c in rows.iter().flat_map(|row| row.as_ref().chars()) {
            match c {
                '@' => stats.player += 1,
                '+' => {
                    stats.player += 1;
                    stats.goals += 1;
                }
                '$' => stats.boxes += 1,
                '*' => {
                    stats.boxes += 1;
                    stats.goals += 1;
                }
                '.' => stats.goals += 1,
                _ => {}
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stats: Option<MapStats>,
}

pub fn validate<S: AsRef<str>>(rows: &[S]) -> Validation {
    if rows.is_empty() {
        return Validation {
            valid: false,
            message: "No map provided".to_string(),
            stats: None,
        };
    }

    let stats = MapStats::count(rows);

    let mut errors = Vec::new();
    if stats.player != 1 {
        errors.push(format!("Must have exactly 1 player (found {})", stats.player));
    }
    if stats.boxes == 0 {
        errors.push("Must have at least 1 box".to_string());
    }
    if stats.goals == 0 {
        errors.push("Must have at least 1 goal".to_string());
    }
    if stats.boxes != stats.goals {
        errors.push(format!(
            "Number of boxes ({}) must equal number of goals ({})",
            stats.boxes, stats.goals
        ));
    }

    if errors.is_empty() {
        Validation {
            valid: true,
            message: "Map is valid".to_string(),
            stats: Some(stats),
        }
    } else {
        Validation {
            valid: false,
            message: errors.join("; "),
            stats: Some(stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_map() {
        let validation = validate(&["#####", "#@$.#", "#+*.#", "#####"]);
        // two players make it invalid, check the counts first
        assert_eq!(
            validation.stats,
            Some(MapStats {
                boxes: 2,
                goals: 4,
                player: 2
            })
        );

        let validation = validate(&["#####", "#@$.#", "# *.#", "#$  #", "#####"]);
        assert!(validation.valid);
        assert_eq!(validation.message, "Map is valid");
    }

    #[test]
    fn every_error_is_reported() {
        let validation = validate(&["####", "#@@#", "####"]);
        assert!(!validation.valid);
        assert_eq!(
            validation.message,
            "Must have exactly 1 player (found 2); Must have at least 1 box; Must have at least 1 goal"
        );

        let validation = validate(&["#####", "#@$$.#", "#####"]);
        assert_eq!(
            validation.message,
            "Number of boxes (2) must equal number of goals (1)"
        );
    }

    #[test]
    fn empty_map() {
        let no_rows: [&str; 0] = [];
        let validation = validate(&no_rows);
        assert!(!validation.valid);
        assert_eq!(validation.message, "No map provided");
        assert_eq!(validation.stats, None);
    }

    #[test]
    fn serialized_record() {
        let validation = validate(&["#####", "#@$.#", "#####"]);
        assert_eq!(
            serde_json::to_string(&validation).unwrap(),
            r#"{"valid":true,"message":"Map is valid","stats":{"boxes":1,"goals":1,"player":1}}"#
        );
    }
}
