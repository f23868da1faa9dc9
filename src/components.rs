// Entity data shared by the simulation subsystems. Behavior lives in the
// subsystem modules; these types only carry state and trivial accessors.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Dir) -> Pos {
        let (dx, dy) = dir.delta();
        Pos {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn manhattan(self, other: Pos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

impl Dir {
    /// Fixed enumeration order used for fallbacks and tie-breaks.
    pub const PRIORITY: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
        }
    }

    pub fn vector(self) -> (f64, f64) {
        let (dx, dy) = self.delta();
        (dx as f64, dy as f64)
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
        }
    }
}

/// Tile-stepping entity with sub-tile interpolation.
///
/// `tile` is the last tile center the entity committed to and `progress`
/// is the fraction of the way to the next tile along `dir`, kept in
/// `[0, 1)` between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Mover {
    pub tile: Pos,
    pub dir: Dir,
    pub progress: f64,
    /// Tiles per second.
    pub speed: f64,
    /// Direction of travel into `tile`.
    pub last_step: Dir,
}

impl Mover {
    pub fn new(tile: Pos, dir: Dir, speed: f64) -> Self {
        Self {
            tile,
            dir,
            progress: 0.0,
            speed,
            last_step: dir,
        }
    }

    /// Continuous position in tile units, tile centers on integers.
    pub fn position(&self) -> (f64, f64) {
        let (vx, vy) = self.dir.vector();
        (
            self.tile.x as f64 + vx * self.progress,
            self.tile.y as f64 + vy * self.progress,
        )
    }

    /// Snap onto a tile center, dropping any pending motion.
    pub fn place(&mut self, tile: Pos, dir: Dir) {
        self.tile = tile;
        self.dir = dir;
        self.progress = 0.0;
        self.last_step = dir;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub mover: Mover,
    /// Buffered input, consumed at tile centers.
    pub intent: Dir,
    /// Absolute time the auto-fire window closes.
    pub power_until: f64,
    pub last_shot: Option<f64>,
}

impl Player {
    pub fn is_powered(&self, now: f64) -> bool {
        now < self.power_until
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub name: &'static str,
    pub mover: Mover,
    pub home: Pos,
    /// Absolute time before which the ghost is inert and pinned at home.
    pub dead_until: f64,
}

impl Ghost {
    pub fn is_dead(&self, now: f64) -> bool {
        now < self.dead_until
    }

    pub fn send_home(&mut self, until: f64) {
        self.mover.place(self.home, Dir::Left);
        self.dead_until = until;
    }
}

/// The power pickup. At most one exists; `active` tells whether it is
/// currently on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Rose {
    pub tile: Pos,
    pub active: bool,
    pub next_spawn_at: f64,
}

/// Projectile fired while powered. Position is continuous, not tile-snapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Seconds left before the heart fizzles.
    pub ttl: f64,
}

impl Heart {
    pub fn tile(&self) -> Pos {
        Pos::new(self.x.round() as i32, self.y.round() as i32)
    }
}
