use crate::data::Pos;
use crate::map::GoalMap;
use crate::moves::Move;

/// The part of a level that changes while solving.
///
/// Equality and hashing only look at the player and the boxes,
/// the map is the same for every state of one search.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub player_pos: Pos,
    pub boxes: Vec<Pos>,
}

impl State {
    pub fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort(); // sort to detect equal states when we reorder boxes
        State { player_pos, boxes }
    }

    pub fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }

    /// All boxes on goals - compares the whole sets so a level
    /// with a different number of boxes and goals is never solved.
    pub fn is_solved(&self, map: &GoalMap) -> bool {
        self.boxes == map.goals
    }

    /// Doesn't check legality, `mov` must come from `legal_moves` for this state.
    pub fn apply(&self, mov: Move) -> State {
        let new_player_pos = self.player_pos + mov.dir;
        if !mov.is_push {
            return State {
                player_pos: new_player_pos,
                boxes: self.boxes.clone(),
            };
        }

        let mut new_boxes = self.boxes.clone();
        if let Ok(index) = new_boxes.binary_search(&new_player_pos) {
            new_boxes[index] = new_player_pos + mov.dir;
        }
        State::new(new_player_pos, new_boxes)
    }
}
