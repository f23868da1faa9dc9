//! Valentine's Pac-Man: a tile-maze chase where a rose pickup lets the
//! player fire hearts at the ghosts.
//!
//! The library is the frame-driven simulation. Rendering and input live in
//! the `pacman` binary.

pub mod clock;
pub mod collision;
pub mod components;
pub mod config;
pub mod game;
pub mod ghost;
pub mod level;
pub mod movement;
pub mod pellets;
pub mod player;
pub mod power;

pub use clock::FrameClock;
pub use components::{Dir, Pos};
pub use game::{Game, Outcome};
