use crate::components::Pos;

/// The fixed maze. `#` is a wall, `.` a pellet, anything else open floor.
pub const MAP: [&str; 23] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "######.##### ## #####.######",
    "######.##          ##.######",
    "#......... #    # .........#",
    "######.##  #    #  ##.######",
    "######.##          ##.######",
    "######.##.########.##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#...##................##...#",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

pub const PLAYER_START: Pos = Pos::new(1, 1);

pub const GHOST_HOMES: [(&str, Pos); 4] = [
    ("Blush", Pos::new(13, 11)),
    ("Cupid", Pos::new(14, 11)),
    ("Rose", Pos::new(13, 12)),
    ("Charm", Pos::new(14, 12)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
}

/// Immutable wall/open lookup. Anything outside the grid reads as wall.
#[derive(Debug, Clone)]
pub struct Maze {
    width: usize,
    height: usize,
    grid: Vec<Vec<Tile>>,
}

impl Maze {
    pub fn fixture() -> Self {
        Self::parse(&MAP)
    }

    /// Build a maze from text rows. Short rows are padded with open floor.
    pub fn parse(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let grid: Vec<Vec<Tile>> = rows
            .iter()
            .map(|row| {
                let mut cells: Vec<Tile> = row
                    .chars()
                    .map(|c| match c {
                        '#' => Tile::Wall,
                        '.' => Tile::Pellet,
                        _ => Tile::Empty,
                    })
                    .collect();
                cells.resize(width, Tile::Empty);
                cells
            })
            .collect();
        Self {
            width,
            height: grid.len(),
            grid,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 {
            return Tile::Wall;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return Tile::Wall;
        }
        self.grid[y][x]
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == Tile::Wall
    }

    pub fn is_wall_at(&self, pos: Pos) -> bool {
        self.is_wall(pos.x, pos.y)
    }

    pub fn open_tiles(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells().filter(|&(_, tile)| tile != Tile::Wall).map(|(pos, _)| pos)
    }

    pub fn pellet_tiles(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells().filter(|&(_, tile)| tile == Tile::Pellet).map(|(pos, _)| pos)
    }

    fn cells(&self) -> impl Iterator<Item = (Pos, Tile)> + '_ {
        self.grid.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &tile)| (Pos::new(x as i32, y as i32), tile))
        })
    }
}
