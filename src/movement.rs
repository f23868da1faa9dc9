//! Tile-grid movement with continuous sub-tile progress.
//!
//! The only continuous quantity carried across frames is `Mover::progress`,
//! which is reset by subtracting exactly 1 whenever a tile boundary is
//! crossed. Turning decisions are only offered at tile centers.

use crate::components::{Dir, Mover, Pos};
use crate::level::Maze;

/// Progress below this counts as sitting on a tile center.
pub const CENTER_EPSILON: f64 = 0.12;

/// Upper bound on tile commits in one `advance` call.
pub const MAX_CROSSINGS: usize = 16;

pub fn can_enter(maze: &Maze, from: Pos, dir: Dir) -> bool {
    !maze.is_wall_at(from.step(dir))
}

pub fn at_center(mover: &Mover) -> bool {
    mover.progress < CENTER_EPSILON
}

/// Advance `mover` by `dt` seconds.
///
/// `on_center` is the direction decision strategy. It runs whenever the
/// mover sits on a tile center, before the blocked check, and may rewrite
/// `mover.dir`.
pub fn advance<F>(mover: &mut Mover, maze: &Maze, dt: f64, mut on_center: F)
where
    F: FnMut(&mut Mover, &Maze),
{
    if !(dt > 0.0) {
        return;
    }

    // Leftover progress here was travelled in the old facing during an
    // earlier frame, so a turn puts the mover back on the center.
    if at_center(mover) && !settle(mover, maze, &mut on_center, true) {
        return;
    }

    mover.progress += mover.speed * dt;

    let mut crossings = 0;
    while mover.progress >= 1.0 {
        if crossings == MAX_CROSSINGS {
            log::warn!(
                "mover at {:?} hit the crossing bound with progress {}",
                mover.tile,
                mover.progress
            );
            mover.progress = 0.0;
            break;
        }
        crossings += 1;

        mover.tile = mover.tile.step(mover.dir);
        mover.last_step = mover.dir;
        mover.progress -= 1.0;

        if !settle(mover, maze, &mut on_center, false) {
            break;
        }
    }
}

/// Center-arrival logic. Returns false when the mover is blocked.
fn settle<F>(mover: &mut Mover, maze: &Maze, on_center: &mut F, snap_on_turn: bool) -> bool
where
    F: FnMut(&mut Mover, &Maze),
{
    let facing = mover.dir;
    on_center(mover, maze);
    if snap_on_turn && mover.dir != facing {
        mover.progress = 0.0;
    }
    if !can_enter(maze, mover.tile, mover.dir) {
        mover.progress = 0.0;
        return false;
    }
    true
}
