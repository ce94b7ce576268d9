use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

/// Counts of states by depth.
///
/// Explored states are the ones that used up a unit of the node budget.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<usize>,
    explored_states: Vec<usize>,
    duplicate_states: Vec<usize>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_created(&self) -> usize {
        self.created_states.iter().sum()
    }

    pub fn nodes_explored(&self) -> usize {
        self.explored_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> usize {
        self.duplicate_states.iter().sum()
    }

    /// Deepest level at which a state was explored.
    pub fn max_depth(&self) -> Option<usize> {
        self.explored_states.len().checked_sub(1)
    }

    pub(crate) fn add_created(&mut self, depth: usize) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    /// Returns true if this is the first state explored at `depth`.
    pub(crate) fn add_explored(&mut self, depth: usize) -> bool {
        Self::add(&mut self.explored_states, depth)
    }

    pub(crate) fn add_reached_duplicate(&mut self, depth: usize) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    fn add(counts: &mut Vec<usize>, depth: usize) -> bool {
        let mut ret = false;

        // while because some depths might be skipped
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }
}

fn separated(n: usize) -> String {
    // separator has no impl for usize in all versions
    (n as u64).separated_string()
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "explored by depth: {:?}", self.explored_states)?;
        writeln!(f, "total created: {}", separated(self.total_created()))?;
        writeln!(
            f,
            "total reached duplicates: {}",
            separated(self.total_reached_duplicates())
        )?;
        writeln!(f, "total explored: {}", separated(self.nodes_explored()))
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", separated(self.total_created()))?;
        writeln!(f, "Explored total: {}", separated(self.nodes_explored()))?;
        writeln!(
            f,
            "Reached duplicates total: {}",
            separated(self.total_reached_duplicates())
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<15}{:<15}{:<15}{:<15}",
            "Depth", "Created", "Explored", "Duplicates"
        )?;
        let depths = self
            .created_states
            .len()
            .max(self.explored_states.len())
            .max(self.duplicate_states.len());
        for i in 0..depths {
            let get = |counts: &Vec<usize>| counts.get(i).cloned().unwrap_or(0);
            writeln!(
                f,
                "{:<15}{:<15}{:<15}{:<15}",
                format!("{}:", i),
                separated(get(&self.created_states)),
                separated(get(&self.explored_states)),
                separated(get(&self.duplicate_states)),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_by_depth() {
        let mut stats = Stats::new();
        assert_eq!(stats.max_depth(), None);

        assert!(stats.add_created(0));
        assert!(stats.add_explored(0));
        assert!(stats.add_created(1));
        assert!(!stats.add_created(1));
        assert!(stats.add_explored(2));
        assert!(!stats.add_explored(2));
        assert!(stats.add_reached_duplicate(3));

        assert_eq!(stats.total_created(), 3);
        assert_eq!(stats.nodes_explored(), 3);
        assert_eq!(stats.total_reached_duplicates(), 1);
        assert_eq!(stats.max_depth(), Some(2));
    }

    #[test]
    fn formatting() {
        let mut stats = Stats::new();
        for _ in 0..1234 {
            stats.add_created(1);
        }
        stats.add_explored(0);

        let out = stats.to_string();
        assert!(out.contains("States created total: 1,234"));
        assert!(out.contains("Explored total: 1"));
        assert!(out
            .lines()
            .any(|line| line.split_whitespace().collect::<Vec<_>>() == ["1:", "1,234", "0", "0"]));
    }
}
