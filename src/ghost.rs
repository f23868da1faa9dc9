use crate::components::{Dir, Ghost, Mover, Pos};
use crate::game::Game;
use crate::level::{Maze, GHOST_HOMES};
use crate::movement::{self, can_enter};

/// Tiles per second.
pub const GHOST_SPEED: f64 = 4.2;

pub fn spawn_ghosts() -> Vec<Ghost> {
    GHOST_HOMES
        .iter()
        .map(|&(name, home)| Ghost {
            name,
            mover: Mover::new(home, Dir::Left, GHOST_SPEED),
            home,
            dead_until: 0.0,
        })
        .collect()
}

/// Greedy chase: among open directions, not reversing unless forced,
/// pick the one whose next tile is closest to `target` by Manhattan
/// distance. Ties go to the earlier direction in `Dir::PRIORITY`.
pub fn choose_dir(mover: &Mover, maze: &Maze, target: Pos) -> Dir {
    let options: Vec<Dir> = Dir::PRIORITY
        .into_iter()
        .filter(|&dir| can_enter(maze, mover.tile, dir))
        .collect();

    if options.is_empty() {
        return mover.dir;
    }

    let reverse = mover.last_step.opposite();
    let mut best = None;
    let mut best_dist = i32::MAX;
    for &dir in &options {
        if options.len() > 1 && dir == reverse {
            continue;
        }
        let dist = mover.tile.step(dir).manhattan(target);
        if dist < best_dist {
            best_dist = dist;
            best = Some(dir);
        }
    }
    best.unwrap_or(options[0])
}

/// Run AI and movement for every ghost. Dead ghosts stay pinned at home.
pub fn update(game: &mut Game, now: f64, dt: f64) {
    let target = game.player.mover.tile;
    for ghost in &mut game.ghosts {
        if ghost.is_dead(now) {
            ghost.mover.place(ghost.home, ghost.mover.dir);
            continue;
        }
        movement::advance(&mut ghost.mover, &game.maze, dt, |mover, maze| {
            mover.dir = choose_dir(mover, maze, target);
        });
    }
}
