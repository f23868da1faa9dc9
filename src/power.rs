//! The rose pickup and the hearts it lets the player fire.

use rand::Rng;

use crate::components::{Dir, Ghost, Heart, Pos, Rose};
use crate::game::Game;
use crate::level::Maze;

pub const ROSE_SCORE: u32 = 50;
pub const GHOST_SCORE: u32 = 200;
/// Delay from a reset to the first rose.
pub const FIRST_ROSE_DELAY: f64 = 2.5;
pub const ROSE_SPAWN_ATTEMPTS: usize = 200;
pub const ROSE_MIN_INTERVAL: f64 = 6.5;
pub const ROSE_MAX_INTERVAL: f64 = 12.0;
pub const POWER_DURATION: f64 = 5.2;
pub const SHOT_INTERVAL: f64 = 0.16;
pub const HEART_SPEED: f64 = 14.0;
pub const HEART_TTL: f64 = 1.3;
pub const HEART_HIT_HALF_WIDTH: f64 = 0.45;
pub const GHOST_DEAD_TIME: f64 = 2.2;
/// Longest distance a heart covers between wall/ghost tests.
const MAX_HEART_STEP: f64 = 0.5;

pub fn idle_rose(now: f64) -> Rose {
    Rose {
        tile: Pos::new(0, 0),
        active: false,
        next_spawn_at: now + FIRST_ROSE_DELAY,
    }
}

/// Pickup, auto-fire and respawn, run right after the player moves.
pub fn update(game: &mut Game, now: f64, rng: &mut impl Rng) {
    try_pickup(game, now);
    auto_fire(game, now);
    if !game.rose.active && now >= game.rose.next_spawn_at {
        spawn_rose(game, now, rng);
    }
}

fn try_pickup(game: &mut Game, now: f64) {
    let player = &mut game.player;
    if !game.rose.active || game.rose.tile != player.mover.tile {
        return;
    }
    game.rose.active = false;
    player.power_until = now + POWER_DURATION;
    player.last_shot = None;
    game.score += ROSE_SCORE;
    log::debug!("rose picked up at {:?}, powered until {:.2}", game.rose.tile, player.power_until);
}

fn auto_fire(game: &mut Game, now: f64) {
    let player = &mut game.player;
    if !player.is_powered(now) {
        return;
    }
    let ready = match player.last_shot {
        None => true,
        Some(at) => now - at >= SHOT_INTERVAL,
    };
    if ready {
        game.hearts.push(fire_heart(player.mover.tile, player.mover.dir));
        player.last_shot = Some(now);
    }
}

pub fn fire_heart(tile: Pos, dir: Dir) -> Heart {
    let (vx, vy) = dir.vector();
    Heart {
        x: tile.x as f64,
        y: tile.y as f64,
        vx: vx * HEART_SPEED,
        vy: vy * HEART_SPEED,
        ttl: HEART_TTL,
    }
}

/// Place the rose on a random open tile clear of the player and of live
/// ghosts. Gives up after a fixed number of draws; either way the next
/// spawn is rescheduled.
pub fn spawn_rose(game: &mut Game, now: f64, rng: &mut impl Rng) {
    let maze = &game.maze;
    let max_x = maze.width() as i32 - 2;
    let max_y = maze.height() as i32 - 2;
    let player_tile = game.player.mover.tile;

    let spot = (0..ROSE_SPAWN_ATTEMPTS).find_map(|_| {
        if max_x < 1 || max_y < 1 {
            return None;
        }
        let pos = Pos::new(rng.gen_range(1..=max_x), rng.gen_range(1..=max_y));
        let blocked = maze.is_wall_at(pos)
            || pos == player_tile
            || game
                .ghosts
                .iter()
                .any(|g| !g.is_dead(now) && g.mover.tile == pos);
        (!blocked).then_some(pos)
    });

    match spot {
        Some(pos) => {
            game.rose.tile = pos;
            game.rose.active = true;
            log::debug!("rose spawned at {:?}", pos);
        }
        None => log::warn!(
            "no free tile for the rose after {} attempts",
            ROSE_SPAWN_ATTEMPTS
        ),
    }
    game.rose.next_spawn_at = now + rng.gen_range(ROSE_MIN_INTERVAL..=ROSE_MAX_INTERVAL);
}

/// Move every heart, dropping the ones that expire, hit a wall, or hit a
/// ghost. Each heart hits at most one ghost, tested in roster order.
pub fn update_hearts(game: &mut Game, now: f64, dt: f64) {
    let Game {
        maze,
        ghosts,
        hearts,
        score,
        ..
    } = game;
    hearts.retain_mut(|heart| {
        let flight = fly(heart, maze, ghosts.as_slice(), now, dt);
        if let Flight::HitGhost(idx) = flight {
            *score += GHOST_SCORE;
            let ghost = &mut ghosts[idx];
            ghost.send_home(now + GHOST_DEAD_TIME);
            log::debug!("heart hit {}", ghost.name);
        }
        flight == Flight::Flying
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flight {
    Flying,
    Expired,
    HitWall,
    HitGhost(usize),
}

fn fly(heart: &mut Heart, maze: &Maze, ghosts: &[Ghost], now: f64, dt: f64) -> Flight {
    if !(dt > 0.0) {
        return Flight::Flying;
    }
    let distance = heart.vx.hypot(heart.vy) * dt;
    let steps = (distance / MAX_HEART_STEP).ceil().max(1.0) as usize;
    let slice = dt / steps as f64;

    for _ in 0..steps {
        heart.x += heart.vx * slice;
        heart.y += heart.vy * slice;
        heart.ttl -= slice;

        if heart.ttl <= 0.0 {
            return Flight::Expired;
        }
        if maze.is_wall_at(heart.tile()) {
            return Flight::HitWall;
        }
        let hit = ghosts.iter().position(|ghost| {
            if ghost.is_dead(now) {
                return false;
            }
            let (gx, gy) = ghost.mover.position();
            (heart.x - gx).abs() < HEART_HIT_HALF_WIDTH && (heart.y - gy).abs() < HEART_HIT_HALF_WIDTH
        });
        if let Some(idx) = hit {
            return Flight::HitGhost(idx);
        }
    }
    Flight::Flying
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Mover;

    fn hallway() -> Maze {
        Maze::parse(&["##########", "#........#", "##########"])
    }

    #[test]
    fn heart_starts_on_tile_center() {
        let heart = fire_heart(Pos::new(3, 4), Dir::Up);
        assert_eq!((heart.x, heart.y), (3.0, 4.0));
        assert_eq!((heart.vx, heart.vy), (0.0, -HEART_SPEED));
        assert_eq!(heart.ttl, HEART_TTL);
    }

    #[test]
    fn heart_expires_in_open_space() {
        let wall = "#".repeat(40);
        let floor = format!("#{}#", ".".repeat(38));
        let maze = Maze::parse(&[wall.as_str(), floor.as_str(), wall.as_str()]);
        let mut heart = fire_heart(Pos::new(1, 1), Dir::Right);
        let mut outcome = Flight::Flying;
        let mut frames = 0;
        while outcome == Flight::Flying {
            outcome = fly(&mut heart, &maze, &[], 0.0, 0.0625);
            frames += 1;
        }
        assert_eq!(outcome, Flight::Expired);
        // 1.3s of life in 1/32s slices runs out on the 42nd slice.
        assert_eq!(frames, 21);
    }

    #[test]
    fn heart_cannot_skip_a_wall_with_huge_dt() {
        let maze = hallway();
        let mut heart = fire_heart(Pos::new(1, 1), Dir::Right);
        let outcome = fly(&mut heart, &maze, &[], 0.0, 1.0);
        assert_eq!(outcome, Flight::HitWall);
        assert!(heart.x < 9.6);
    }

    #[test]
    fn dead_ghosts_are_not_hit() {
        let maze = hallway();
        let ghost = Ghost {
            name: "Blush",
            mover: Mover::new(Pos::new(2, 1), Dir::Left, 0.0),
            home: Pos::new(2, 1),
            dead_until: 10.0,
        };
        let mut heart = fire_heart(Pos::new(1, 1), Dir::Right);
        assert_eq!(fly(&mut heart, &maze, &[ghost.clone()], 5.0, 0.05), Flight::Flying);
        let mut heart = fire_heart(Pos::new(1, 1), Dir::Right);
        assert_eq!(fly(&mut heart, &maze, &[ghost], 10.0, 0.05), Flight::HitGhost(0));
    }

    #[test]
    fn first_ghost_in_roster_wins() {
        let maze = hallway();
        let make = |name| Ghost {
            name,
            mover: Mover::new(Pos::new(2, 1), Dir::Left, 0.0),
            home: Pos::new(2, 1),
            dead_until: 0.0,
        };
        let ghosts = [make("Blush"), make("Cupid")];
        let mut heart = fire_heart(Pos::new(1, 1), Dir::Right);
        assert_eq!(fly(&mut heart, &maze, &ghosts, 0.0, 0.05), Flight::HitGhost(0));
    }
}
