//! # life_engine
//!
//! The core engine for Conway's Game of Life.
//! Grids can be randomized or loaded from
//! [Run Length Encoded](https://conwaylife.com/wiki/Run_Length_Encoded) files.

pub mod game;
pub use game::Game;

pub mod grid;
pub use grid::Grid;

pub mod rle;
pub use rle::Pattern;

pub mod error;
pub use error::Error;
