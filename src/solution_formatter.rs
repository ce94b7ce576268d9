use std::fmt::{self, Debug, Display, Formatter};

use crate::map::GoalMap;
use crate::moves::Moves;
use crate::state::State;

/// Renders the initial state followed by the state after every push
/// (or after every move with `include_steps`).
pub struct SolutionFormatter<'a> {
    map: &'a GoalMap,
    initial_state: &'a State,
    moves: &'a Moves,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(
        map: &'a GoalMap,
        initial_state: &'a State,
        moves: &'a Moves,
        include_steps: bool,
    ) -> Self {
        Self {
            map,
            initial_state,
            moves,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.map.xsb_with_state(self.initial_state))?;
        let mut last_state = self.initial_state.clone();
        for &mov in self.moves {
            let new_state = last_state.apply(mov);
            if mov.is_push || self.include_steps {
                writeln!(f, "{}", self.map.xsb_with_state(&new_state))?;
            }
            last_state = new_state;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use crate::data::Dir;
    use crate::level::Level;
    use crate::moves::Move;

    use super::*;

    #[test]
    fn pushes_only() {
        let level: Level = r"
######
#@ $.#
######
"
        .parse()
        .unwrap();
        let moves = Moves::new(vec![
            Move::new(Dir::Right, false),
            Move::new(Dir::Right, true),
        ]);

        let expected = r"
######
#@ $.#
######

######
#  @*#
######

"
        .trim_start_matches('\n');
        assert_eq!(level.format_solution(&moves, false).to_string(), expected);

        let with_steps = level.format_solution(&moves, true).to_string();
        assert_eq!(with_steps.matches("######\n").count(), 6);
        assert!(with_steps.contains("# @$.#"));
    }
}
