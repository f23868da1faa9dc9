use std::collections::HashSet;

use crate::components::Pos;
use crate::level::Maze;

/// Pellets not yet eaten in the current session.
#[derive(Debug, Clone, Default)]
pub struct PelletSet {
    remaining: HashSet<Pos>,
}

impl PelletSet {
    pub fn new(maze: &Maze) -> Self {
        Self {
            remaining: maze.pellet_tiles().collect(),
        }
    }

    /// Remove the pellet at `pos`, returning whether there was one.
    pub fn eat(&mut self, pos: Pos) -> bool {
        self.remaining.remove(&pos)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.remaining.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.remaining.iter().copied()
    }

    /// Keep only the pellets for which `keep` returns true. Used to script
    /// end-game situations without eating through the whole maze.
    pub fn retain(&mut self, mut keep: impl FnMut(Pos) -> bool) {
        self.remaining.retain(|&pos| keep(pos));
    }
}
