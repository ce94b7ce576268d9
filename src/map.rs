use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Everything about a level that doesn't change while solving it.
///
/// Searches only borrow the map, states never carry a copy of it.
#[derive(Clone, PartialEq, Eq)]
pub struct GoalMap {
    pub(crate) grid: Vec2d<MapCell>,
    pub(crate) goals: Vec<Pos>,
}

impl GoalMap {
    pub(crate) fn new(grid: Vec2d<MapCell>, mut goals: Vec<Pos>) -> Self {
        // sorted so the goal test is a plain comparison with the (sorted) boxes
        goals.sort();
        GoalMap { grid, goals }
    }

    pub fn width(&self) -> i32 {
        self.grid.cols()
    }

    pub fn height(&self) -> i32 {
        self.grid.rows()
    }

    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    /// False for walls and for anything that is not part of the grid.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        match self.grid.get(pos) {
            Some(MapCell::Empty) | Some(MapCell::Goal) => true,
            Some(MapCell::Wall) | Some(MapCell::Outside) | None => false,
        }
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.grid, None)
    }

    pub fn xsb_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(&self.grid, Some(state))
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::level::Level;

    use super::*;

    #[test]
    fn walkability() {
        let level: Level = r"
#####
#@$.#
###
"
        .parse()
        .unwrap();
        let map = &level.map;

        assert_eq!(map.width(), 5);
        assert_eq!(map.height(), 3);
        assert!(!map.is_walkable(Pos::new(0, 0)));
        assert!(map.is_walkable(Pos::new(1, 1)));
        assert!(map.is_walkable(Pos::new(1, 3)));
        // padding of the short last row
        assert!(!map.is_walkable(Pos::new(2, 4)));
        // off the grid entirely
        assert!(!map.is_walkable(Pos::new(-1, 1)));
        assert!(!map.is_walkable(Pos::new(1, 5)));
        assert_eq!(map.goals(), &[Pos::new(1, 3)]);
    }

    #[test]
    fn formatting_map() {
        let xsb_level = r"
*###*
#@$.#
*###*#
"
        .trim_start_matches('\n');
        let xsb_map = "
.###.
#  .#
.###.#
"
        .trim_start_matches('\n');

        let level: Level = xsb_level.parse().unwrap();
        assert_eq!(format!("{}", level.map), xsb_map);
        assert_eq!(format!("{:?}", level.map), xsb_map);
    }
}
