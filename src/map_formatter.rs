use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Contents, MapCell, Pos};
use crate::state::State;
use crate::vec2d::Vec2d;

pub struct MapFormatter<'a> {
    grid: &'a Vec2d<MapCell>,
    state: Option<&'a State>,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(grid: &'a Vec2d<MapCell>, state: Option<&'a State>) -> Self {
        Self { grid, state }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state_grid = self.grid.scratchpad();
        if let Some(state) = self.state {
            // anything off the grid has nowhere to be drawn
            for &b in state.boxes.iter() {
                if state_grid.contains(b) {
                    state_grid[b] = Contents::Box;
                }
            }
            if state_grid.contains(state.player_pos) {
                state_grid[state.player_pos] = Contents::Player;
            }
        }

        for r in 0..self.grid.rows() {
            // don't print trailing empty cells to match the input level strings
            let mut row_len = 0;
            for c in 0..self.grid.cols() {
                let pos = Pos::new(r, c);
                let cell = self.grid[pos];
                if (cell != MapCell::Empty && cell != MapCell::Outside)
                    || state_grid[pos] != Contents::Empty
                {
                    row_len = c + 1;
                }
            }

            for c in 0..row_len {
                let pos = Pos::new(r, c);
                Self::write_cell_xsb(self.grid[pos], state_grid[pos], f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell_xsb(cell: MapCell, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        match (cell, contents) {
            (MapCell::Empty, Contents::Empty) => write!(f, " "),
            (MapCell::Empty, Contents::Box) => write!(f, "$"),
            (MapCell::Empty, Contents::Player) => write!(f, "@"),
            (MapCell::Wall, Contents::Empty) => write!(f, "#"),
            // only possible with a hand-made state, show the contents
            (MapCell::Wall, Contents::Box) => write!(f, "$"),
            (MapCell::Wall, Contents::Player) => write!(f, "@"),
            (MapCell::Goal, Contents::Empty) => write!(f, "."),
            (MapCell::Goal, Contents::Box) => write!(f, "*"),
            (MapCell::Goal, Contents::Player) => write!(f, "+"),
            (MapCell::Outside, Contents::Empty) => write!(f, " "),
            (MapCell::Outside, Contents::Box) => write!(f, "$"),
            (MapCell::Outside, Contents::Player) => write!(f, "@"),
        }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::level::Level;
    use crate::state::State;

    use super::*;

    #[test]
    fn contents_in_odd_places() {
        let level: Level = "#####\n#@$.#\n###".parse().unwrap();

        let state = State::new(
            Pos::new(0, 0),
            vec![Pos::new(1, 2), Pos::new(2, 4), Pos::new(5, 5), Pos::new(-1, 0)],
        );
        assert_eq!(
            level.map.xsb_with_state(&state).to_string(),
            "@####\n# $.#\n### $\n"
        );
    }
}
