use crate::game::{Game, Outcome};
use crate::player;

pub const PLAYER_HIT_HALF_WIDTH: f64 = 0.35;
/// Inert time given to every ghost after the player loses a life.
pub const BREATHER: f64 = 0.8;

/// Axis-aligned proximity test between two continuous positions.
pub fn overlaps(a: (f64, f64), b: (f64, f64), half_width: f64) -> bool {
    (a.0 - b.0).abs() < half_width && (a.1 - b.1).abs() < half_width
}

/// Touching any live ghost costs a life, powered or not.
pub fn check_player(game: &mut Game, now: f64) {
    if game.outcome != Outcome::Playing {
        return;
    }
    let at = game.player.mover.position();
    let hit = game
        .ghosts
        .iter()
        .find(|ghost| !ghost.is_dead(now) && overlaps(at, ghost.mover.position(), PLAYER_HIT_HALF_WIDTH));
    if let Some(ghost) = hit {
        log::info!("caught by {} at {:?}", ghost.name, game.player.mover.tile);
        lose_life(game, now);
    }
}

pub fn lose_life(game: &mut Game, now: f64) {
    game.lives = game.lives.saturating_sub(1);
    if game.lives == 0 {
        log::info!("out of lives, final score {}", game.score);
        game.outcome = Outcome::Lost;
        return;
    }

    log::info!("{} lives left", game.lives);
    player::respawn(&mut game.player);
    game.hearts.clear();
    for ghost in &mut game.ghosts {
        ghost.send_home(now + BREATHER);
    }
}
