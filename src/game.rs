use rand::Rng;

use crate::components::{Dir, Ghost, Heart, Player, Rose};
use crate::level::Maze;
use crate::pellets::PelletSet;
use crate::{collision, ghost, player, power};

pub const STARTING_LIVES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

/// The whole session. Subsystems receive it by reference and keep no
/// state of their own.
#[derive(Debug, Clone)]
pub struct Game {
    pub maze: Maze,
    pub pellets: PelletSet,
    pub player: Player,
    pub ghosts: Vec<Ghost>,
    pub rose: Rose,
    pub hearts: Vec<Heart>,
    pub score: u32,
    pub lives: u32,
    pub outcome: Outcome,
}

impl Game {
    pub fn new(now: f64) -> Self {
        let maze = Maze::fixture();
        let pellets = PelletSet::new(&maze);
        Self {
            maze,
            pellets,
            player: player::spawn_player(),
            ghosts: ghost::spawn_ghosts(),
            rose: power::idle_rose(now),
            hearts: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            outcome: Outcome::Playing,
        }
    }

    /// Start a fresh session on the same maze.
    pub fn reset(&mut self, now: f64) {
        self.pellets = PelletSet::new(&self.maze);
        self.player = player::spawn_player();
        self.ghosts = ghost::spawn_ghosts();
        self.rose = power::idle_rose(now);
        self.hearts.clear();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.outcome = Outcome::Playing;
        log::info!("new game");
    }

    /// Buffer a turn; it takes effect at the player's next tile center.
    pub fn set_intent(&mut self, dir: Dir) {
        self.player.intent = dir;
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::Playing
    }

    pub fn is_won(&self) -> bool {
        self.outcome == Outcome::Won
    }

    pub fn is_powered(&self, now: f64) -> bool {
        self.player.is_powered(now)
    }

    /// Advance one frame. `now` is read once by the caller and used for
    /// every timer in this step.
    pub fn step(&mut self, now: f64, dt: f64, rng: &mut impl Rng) {
        if self.is_over() {
            return;
        }

        player::update(self, dt);
        if self.is_over() {
            return;
        }
        power::update(self, now, rng);
        ghost::update(self, now, dt);
        collision::check_player(self, now);
        if self.is_over() {
            return;
        }
        power::update_hearts(self, now, dt);
    }
}
