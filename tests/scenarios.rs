use rand::rngs::StdRng;
use rand::SeedableRng;

use valentine_pacman::collision::BREATHER;
use valentine_pacman::components::{Dir, Pos};
use valentine_pacman::level::{Maze, PLAYER_START};
use valentine_pacman::power::{self, GHOST_DEAD_TIME, GHOST_SCORE, POWER_DURATION, ROSE_SCORE};
use valentine_pacman::{movement, Game, Outcome};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A game whose rose will not show up on its own and whose only pellet
/// sits far from the top-left corner.
fn quiet_game() -> Game {
    let mut game = Game::new(0.0);
    game.rose.next_spawn_at = 1_000.0;
    let far = Pos::new(26, 21);
    game.pellets.retain(|pos| pos == far);
    game
}

#[test]
fn one_tile_of_time_commits_the_next_tile() {
    let mut game = quiet_game();
    game.player.mover.speed = 4.0;
    game.step(0.25, 0.25, &mut seeded_rng());
    assert_eq!(game.player.mover.tile, Pos::new(2, 1));
    assert_eq!(game.player.mover.progress, 0.0);
}

#[test]
fn buffered_intent_waits_for_a_tile_center() {
    let mut game = quiet_game();
    let mut rng = seeded_rng();
    // (1,2) below the start is open, but the player is half way to (2,1).
    game.player.mover.progress = 0.5;
    game.set_intent(Dir::Down);
    game.step(0.01, 0.01, &mut rng);
    assert_eq!(game.player.mover.dir, Dir::Right);
    assert_eq!(game.player.mover.tile, PLAYER_START);
}

#[test]
fn intent_turns_at_the_next_center() {
    let mut game = quiet_game();
    let mut rng = seeded_rng();
    game.player.mover.place(Pos::new(5, 1), Dir::Right);
    game.set_intent(Dir::Left);
    game.step(0.01, 0.01, &mut rng);
    assert_eq!(game.player.mover.dir, Dir::Left);
    // (6,1) has an open tile below; turning down happens on arrival.
    game.player.mover.place(Pos::new(5, 1), Dir::Right);
    game.set_intent(Dir::Down);
    game.step(0.3, 0.25, &mut rng);
    assert_eq!(game.player.mover.tile, Pos::new(6, 1));
    assert_eq!(game.player.mover.dir, Dir::Down);
}

#[test]
fn committed_tiles_never_enter_walls() {
    let mut game = quiet_game();
    let mut rng = seeded_rng();
    let mut now = 0.0;
    for frame in 0..2_000 {
        now += 0.05;
        game.set_intent(Dir::PRIORITY[(frame / 37) % 4]);
        game.step(now, 0.05, &mut rng);
        assert!(!game.maze.is_wall_at(game.player.mover.tile));
        for ghost in &game.ghosts {
            assert!(!game.maze.is_wall_at(ghost.mover.tile), "{} in a wall", ghost.name);
        }
        if game.is_over() {
            break;
        }
    }
}

#[test]
fn heart_stops_at_the_wall_ahead() {
    let mut game = quiet_game();
    // (13,1) is the wall three tiles to the right of (10,1).
    let mut heart = power::fire_heart(Pos::new(10, 1), Dir::Right);
    heart.ttl = 1.25;
    game.hearts.push(heart);

    let mut now = 0.0;
    for _ in 0..40 {
        now += 0.016;
        power::update_hearts(&mut game, now, 0.016);
        for heart in &game.hearts {
            assert!(!game.maze.is_wall_at(heart.tile()));
            assert!(heart.x < 12.5);
        }
    }
    assert!(game.hearts.is_empty());
    assert_eq!(game.score, 0);
}

#[test]
fn heart_stops_at_the_wall_even_in_one_huge_step() {
    let mut game = quiet_game();
    game.hearts.push(power::fire_heart(Pos::new(10, 1), Dir::Right));
    power::update_hearts(&mut game, 1.0, 1.0);
    assert!(game.hearts.is_empty());
}

#[test]
fn heart_eliminates_a_ghost() {
    let mut game = quiet_game();
    game.ghosts[1].mover.place(Pos::new(5, 1), Dir::Left);
    game.ghosts[1].mover.speed = 0.0;
    game.hearts.push(power::fire_heart(Pos::new(1, 1), Dir::Right));

    let mut now = 0.0;
    while !game.hearts.is_empty() {
        now += 0.02;
        power::update_hearts(&mut game, now, 0.02);
    }
    let cupid = &game.ghosts[1];
    assert_eq!(game.score, GHOST_SCORE);
    assert_eq!(cupid.mover.tile, cupid.home);
    assert!((cupid.dead_until - (now + GHOST_DEAD_TIME)).abs() < 1e-9);
    assert!(cupid.is_dead(now));
}

#[test]
fn one_heart_takes_one_ghost() {
    let mut game = quiet_game();
    for ghost in &mut game.ghosts[..2] {
        ghost.mover.place(Pos::new(4, 1), Dir::Left);
    }
    game.hearts.push(power::fire_heart(Pos::new(1, 1), Dir::Right));
    for step in 1..=20 {
        power::update_hearts(&mut game, step as f64 * 0.02, 0.02);
    }
    assert_eq!(game.score, GHOST_SCORE);
    assert!(game.ghosts[0].dead_until > 0.0);
    assert_eq!(game.ghosts[1].dead_until, 0.0);
}

#[test]
fn last_pellet_wins_despite_ghost_contact() {
    let mut game = quiet_game();
    game.pellets.retain(|pos| pos == Pos::new(2, 1));
    game.ghosts[0].mover.place(Pos::new(2, 1), Dir::Left);
    game.ghosts[0].mover.speed = 0.0;

    game.step(0.25, 0.25, &mut seeded_rng());

    assert!(game.pellets.is_empty());
    assert_eq!(game.outcome, Outcome::Won);
    assert!(game.is_over());
    assert!(game.is_won());
    assert_eq!(game.lives, 3);
}

#[test]
fn long_frame_eats_the_pellets_it_passes() {
    let mut game = Game::new(0.0);
    game.step(0.5, 0.5, &mut seeded_rng());
    assert_eq!(game.player.mover.tile, Pos::new(3, 1));
    assert!(!game.pellets.contains(Pos::new(1, 1)));
    assert!(!game.pellets.contains(Pos::new(2, 1)));
    assert!(!game.pellets.contains(Pos::new(3, 1)));
    assert_eq!(game.score, 30);
}

#[test]
fn pellets_score_once() {
    let mut game = Game::new(0.0);
    game.rose.next_spawn_at = 1_000.0;
    let mut rng = seeded_rng();
    let total = game.pellets.len();
    game.step(0.01, 0.01, &mut rng);
    game.step(0.02, 0.01, &mut rng);
    assert_eq!(game.pellets.len(), total - 1);
    assert_eq!(game.score, 10);
}

#[test]
fn ghost_wakes_on_the_frame_its_timer_ends() {
    let mut game = quiet_game();
    game.ghosts[0].dead_until = 1.0;
    game.step(1.0, 0.05, &mut seeded_rng());
    assert_ne!(game.ghosts[0].mover.position(), (13.0, 11.0));

    let mut game = quiet_game();
    game.ghosts[0].dead_until = 1.000_001;
    game.step(1.0, 0.05, &mut seeded_rng());
    assert_eq!(game.ghosts[0].mover.position(), (13.0, 11.0));
}

#[test]
fn dead_ghost_cannot_catch_the_player() {
    let mut game = quiet_game();
    game.ghosts[2].mover.place(PLAYER_START, Dir::Left);
    game.ghosts[2].dead_until = 5.0;
    game.step(1.0, 0.0, &mut seeded_rng());
    assert_eq!(game.lives, 3);
    assert_eq!(game.ghosts[2].mover.tile, game.ghosts[2].home);
}

#[test]
fn ghosts_chase_the_player() {
    let mut game = quiet_game();
    let mut rng = seeded_rng();
    let start = game.ghosts[0].mover.tile.manhattan(PLAYER_START);
    let mut now = 0.0;
    for _ in 0..40 {
        now += 0.05;
        game.step(now, 0.05, &mut rng);
    }
    let later = game.ghosts[0].mover.tile.manhattan(game.player.mover.tile);
    assert!(later < start);
}

#[test]
fn last_life_ends_the_game_in_place() {
    let mut game = quiet_game();
    game.lives = 1;
    game.ghosts[0].mover.place(PLAYER_START, Dir::Left);

    game.step(5.0, 0.0, &mut seeded_rng());

    assert_eq!(game.lives, 0);
    assert_eq!(game.outcome, Outcome::Lost);
    assert!(!game.is_won());
    assert_eq!(game.player.mover.tile, PLAYER_START);
    assert_eq!(game.ghosts[0].mover.tile, PLAYER_START);
}

#[test]
fn losing_a_life_resets_the_board() {
    let mut game = quiet_game();
    let spot = Pos::new(6, 5);
    game.player.mover.place(spot, Dir::Up);
    game.player.power_until = 10.0;
    game.ghosts[3].mover.place(spot, Dir::Left);
    game.hearts.push(power::fire_heart(Pos::new(20, 5), Dir::Left));

    game.step(3.0, 0.0, &mut seeded_rng());

    assert_eq!(game.lives, 2);
    assert!(!game.is_over());
    assert_eq!(game.player.mover.tile, PLAYER_START);
    assert_eq!(game.player.mover.dir, Dir::Right);
    assert!(!game.is_powered(3.0));
    assert!(game.hearts.is_empty());
    for ghost in &game.ghosts {
        assert_eq!(ghost.mover.tile, ghost.home);
        assert_eq!(ghost.dead_until, 3.0 + BREATHER);
    }
}

#[test]
fn power_does_not_protect_the_player() {
    let mut game = quiet_game();
    game.player.power_until = 100.0;
    game.ghosts[0].mover.place(PLAYER_START, Dir::Left);
    game.step(1.0, 0.0, &mut seeded_rng());
    assert_eq!(game.lives, 2);
}

#[test]
fn rose_pickup_awards_once() {
    let mut game = quiet_game();
    let mut rng = seeded_rng();
    game.rose.tile = PLAYER_START;
    game.rose.active = true;

    game.step(2.0, 0.0, &mut rng);
    assert!(!game.rose.active);
    assert_eq!(game.player.power_until, 2.0 + POWER_DURATION);
    assert_eq!(game.score, ROSE_SCORE);

    for frame in 1..=5 {
        game.step(2.0 + frame as f64 * 0.01, 0.0, &mut rng);
    }
    assert_eq!(game.score, ROSE_SCORE);
    assert!(game.is_powered(2.05));
}

#[test]
fn powered_player_fires_on_cadence() {
    let mut game = quiet_game();
    let mut rng = seeded_rng();
    game.rose.tile = PLAYER_START;
    game.rose.active = true;

    let mut shots = 0;
    let mut last = None;
    for frame in 0..=8 {
        let now = frame as f64 * 0.0625;
        game.step(now, 0.0625, &mut rng);
        if game.player.last_shot != last {
            shots += 1;
            last = game.player.last_shot;
        }
    }
    // 0.16s cadence at 1/16s frames: fires on frames 0, 3 and 6.
    assert_eq!(shots, 3);
}

#[test]
fn no_shots_after_power_runs_out() {
    let mut game = quiet_game();
    let mut rng = seeded_rng();
    game.player.power_until = 1.0;
    game.step(0.5, 0.0, &mut rng);
    assert_eq!(game.hearts.len(), 1);
    game.hearts.clear();
    game.step(1.0, 0.0, &mut rng);
    game.step(1.5, 0.0, &mut rng);
    assert!(game.hearts.is_empty());
}

#[test]
fn rose_spawns_on_a_free_tile() {
    let mut game = Game::new(0.0);
    let mut rng = seeded_rng();
    game.step(2.5, 0.0, &mut rng);
    assert!(game.rose.active);
    assert!(!game.maze.is_wall_at(game.rose.tile));
    assert_ne!(game.rose.tile, game.player.mover.tile);
    assert!(game.ghosts.iter().all(|g| g.mover.tile != game.rose.tile));
    assert!(game.rose.next_spawn_at >= 2.5 + power::ROSE_MIN_INTERVAL);
    assert!(game.rose.next_spawn_at <= 2.5 + power::ROSE_MAX_INTERVAL);
}

#[test]
fn rose_search_gives_up_and_reschedules() {
    let mut game = Game::new(0.0);
    let mut rng = seeded_rng();
    game.maze = Maze::parse(&["###", "#.#", "###"]);
    game.player.mover.place(Pos::new(1, 1), Dir::Right);

    power::spawn_rose(&mut game, 3.0, &mut rng);

    assert!(!game.rose.active);
    assert!(game.rose.next_spawn_at >= 3.0 + power::ROSE_MIN_INTERVAL);
}

#[test]
fn rose_avoids_live_ghosts_but_not_dead_ones() {
    let mut game = Game::new(0.0);
    let mut rng = seeded_rng();
    game.maze = Maze::parse(&["####", "#..#", "####"]);
    game.player.mover.place(Pos::new(1, 1), Dir::Right);
    for ghost in &mut game.ghosts {
        ghost.mover.place(Pos::new(2, 1), Dir::Left);
    }

    power::spawn_rose(&mut game, 3.0, &mut rng);
    assert!(!game.rose.active);

    for ghost in &mut game.ghosts {
        ghost.dead_until = 10.0;
    }
    power::spawn_rose(&mut game, 4.0, &mut rng);
    assert!(game.rose.active);
    assert_eq!(game.rose.tile, Pos::new(2, 1));
}

#[test]
fn reset_after_loss_starts_over() {
    let mut game = quiet_game();
    game.lives = 1;
    game.ghosts[0].mover.place(PLAYER_START, Dir::Left);
    game.step(1.0, 0.0, &mut seeded_rng());
    assert!(game.is_over());

    game.reset(2.0);
    assert!(!game.is_over());
    assert_eq!(game.lives, 3);
    assert_eq!(game.score, 0);
    assert_eq!(game.pellets.len(), game.maze.pellet_tiles().count());
}

#[test]
fn player_turn_respects_walls() {
    let maze = Maze::fixture();
    let mut mover = game_player_mover();
    // Up from (1,1) is the outer wall; the player keeps heading right.
    movement::advance(&mut mover, &maze, 0.01, |m, maze| {
        valentine_pacman::player::steer(m, maze, Dir::Up)
    });
    assert_eq!(mover.dir, Dir::Right);
}

fn game_player_mover() -> valentine_pacman::components::Mover {
    Game::new(0.0).player.mover
}
