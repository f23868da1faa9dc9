use crate::components::{Dir, Mover, Player, Pos};
use crate::game::{Game, Outcome};
use crate::level::{Maze, PLAYER_START};
use crate::movement::{self, can_enter};

/// Tiles per second.
pub const PLAYER_SPEED: f64 = 4.8;
pub const PELLET_SCORE: u32 = 10;

pub fn spawn_player() -> Player {
    Player {
        mover: Mover::new(PLAYER_START, Dir::Right, PLAYER_SPEED),
        intent: Dir::Right,
        power_until: 0.0,
        last_shot: None,
    }
}

/// Put the player back on the start tile with no power.
pub fn respawn(player: &mut Player) {
    player.mover.place(PLAYER_START, Dir::Right);
    player.intent = Dir::Right;
    player.power_until = 0.0;
    player.last_shot = None;
}

/// Center-arrival decision for the player: take the buffered intent if it
/// is open, otherwise keep going, otherwise the first open direction.
pub fn steer(mover: &mut Mover, maze: &Maze, intent: Dir) {
    if can_enter(maze, mover.tile, intent) {
        mover.dir = intent;
        return;
    }
    if can_enter(maze, mover.tile, mover.dir) {
        return;
    }
    if let Some(dir) = Dir::PRIORITY
        .into_iter()
        .find(|&dir| can_enter(maze, mover.tile, dir))
    {
        mover.dir = dir;
    }
}

/// Move the player and eat the pellet on every tile it commits to, not
/// just the one it ends the frame on. Emptying the pellet set wins the game
/// on the spot.
pub fn update(game: &mut Game, dt: f64) {
    let Game {
        maze,
        pellets,
        player,
        score,
        outcome,
        ..
    } = game;
    let before = pellets.len();
    let intent = player.intent;

    let mut eat_at = |tile: Pos| {
        if pellets.eat(tile) {
            *score += PELLET_SCORE;
        }
    };
    movement::advance(&mut player.mover, maze, dt, |mover, maze| {
        eat_at(mover.tile);
        steer(mover, maze, intent);
    });
    eat_at(player.mover.tile);

    if pellets.len() < before && pellets.is_empty() {
        log::info!("all pellets eaten, final score {}", score);
        *outcome = Outcome::Won;
    }
}
