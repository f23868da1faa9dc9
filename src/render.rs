use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use valentine_pacman::components::Pos;
use valentine_pacman::level::Tile;
use valentine_pacman::Game;

const CELL_W: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    PoweredPlayer,
    Ghost,
    Wall,
    Empty,
    Pellet,
    Rose,
    Heart,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

/// One color per roster entry: Blush, Cupid, Rose, Charm.
const GHOST_COLORS: [Color; 4] = [Color::Red, Color::Magenta, Color::DarkRed, Color::Cyan];

const BLANK: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

/// Diffing terminal renderer: only cells that changed since the last frame
/// are redrawn.
pub struct Renderer {
    width: usize,
    height: usize,
    last: Vec<Cell>,
    last_hud: String,
    last_banner: Option<String>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            last: vec![BLANK; width * height],
            last_hud: String::new(),
            last_banner: None,
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Force a full redraw on the next frame.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn draw(&mut self, stdout: &mut Stdout, game: &Game, now: f64) -> io::Result<()> {
        let needed_h = (self.height + 3) as u16;
        let needed_w = (self.width * CELL_W) as u16;

        stdout.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            stdout.queue(Print(msg))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            stdout.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Score: {}  Lives: {}  Pellets: {}  Power: {}  (r restart, q quit)",
            game.score,
            game.lives,
            game.pellets.len(),
            if game.is_powered(now) { "ON" } else { "OFF" }
        );
        if self.needs_full || hud != self.last_hud {
            stdout.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            stdout.queue(SetForegroundColor(Color::White))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            stdout.queue(Print(&hud))?;
            stdout.queue(ResetColor)?;
            self.last_hud = hud;
        }

        let frame = compose(game, now, self.width, self.height);
        for (idx, cell) in frame.into_iter().enumerate() {
            if self.needs_full || cell != self.last[idx] {
                self.last[idx] = cell;
                self.draw_cell(stdout, idx % self.width, idx / self.width, cell)?;
            }
        }

        let banner = game.is_over().then(|| {
            let headline = if game.is_won() { "YOU WIN" } else { "GAME OVER" };
            format!("{} - Final Score: {} (r to restart, q to quit)", headline, game.score)
        });
        if self.needs_full || banner != self.last_banner {
            stdout.queue(MoveTo(self.origin_x, self.origin_y + self.height as u16))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            if let Some(text) = &banner {
                let color = if game.is_won() { Color::Magenta } else { Color::Red };
                stdout.queue(SetForegroundColor(color))?;
                stdout.queue(Print(text))?;
                stdout.queue(ResetColor)?;
            }
            self.last_banner = banner;
        }
        self.needs_full = false;

        stdout.flush()?;
        Ok(())
    }

    fn draw_cell(&self, stdout: &mut Stdout, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "😃",
            Glyph::PoweredPlayer => "😍",
            Glyph::Ghost => "👻",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Pellet => "· ",
            Glyph::Rose => "🌹",
            Glyph::Heart => "💖",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                stdout.queue(Print(' '))?;
            }
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }
}

/// Lay the board out as cells, later layers drawn over earlier ones:
/// maze and pellets, rose, hearts, live ghosts, player.
fn compose(game: &Game, now: f64, width: usize, height: usize) -> Vec<Cell> {
    let mut cells = vec![BLANK; width * height];
    let mut put = |pos: Pos, cell: Cell| {
        if pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height {
            cells[pos.y as usize * width + pos.x as usize] = cell;
        }
    };

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let cell = match game.maze.tile(x, y) {
                Tile::Wall => Cell {
                    glyph: Glyph::Wall,
                    color: Color::Blue,
                },
                _ => BLANK,
            };
            put(Pos::new(x, y), cell);
        }
    }
    for pos in game.pellets.iter() {
        put(
            pos,
            Cell {
                glyph: Glyph::Pellet,
                color: Color::White,
            },
        );
    }
    if game.rose.active {
        put(
            game.rose.tile,
            Cell {
                glyph: Glyph::Rose,
                color: Color::Red,
            },
        );
    }
    for heart in &game.hearts {
        put(
            heart.tile(),
            Cell {
                glyph: Glyph::Heart,
                color: Color::Magenta,
            },
        );
    }
    for (idx, ghost) in game.ghosts.iter().enumerate() {
        if ghost.is_dead(now) {
            continue;
        }
        put(
            nearest_tile(ghost.mover.position()),
            Cell {
                glyph: Glyph::Ghost,
                color: GHOST_COLORS[idx % GHOST_COLORS.len()],
            },
        );
    }
    let glyph = if game.is_powered(now) {
        Glyph::PoweredPlayer
    } else {
        Glyph::Player
    };
    put(
        nearest_tile(game.player.mover.position()),
        Cell {
            glyph,
            color: Color::Yellow,
        },
    );
    cells
}

fn nearest_tile((x, y): (f64, f64)) -> Pos {
    Pos::new(x.round() as i32, y.round() as i32)
}
