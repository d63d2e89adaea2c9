use std::fmt;
use std::fs;
use std::mem;
use std::path::Path;

use rand::Rng;

use crate::error::Error;
use crate::grid::Grid;
use crate::rle::{self, Pattern};

/// The state of a round of Conway's Game of Life.
/// Main entry point for running a simulation.
///
/// Two grids of identical size and wrap policy are held at all times: the
/// readable current generation and a scratch buffer the next generation is
/// computed into. A tick swaps their roles, so no allocation happens after
/// construction.
pub struct Game {
    current: Grid,
    next: Grid,
    comment: String,
}

impl Game {
    /// Creates a new game with a random initial state.
    ///
    /// Exactly `width * height / 4` cells are drawn from `rng` and set
    /// alive, with replacement, duplicate picks re-set the same cell. This
    /// yields a fill ratio of roughly 25%; callers wanting a different
    /// density can pre-seed a [`Grid`] and use [`Game::from_grid`].
    ///
    /// # Arguments
    /// * `width` - The width of the board. Must be nonzero.
    /// * `height` - The height of the board. Must be nonzero.
    /// * `wrap` - Whether the board wraps toroidally.
    /// * `rng` - The random source to draw cell coordinates from.
    pub fn random(width: usize, height: usize, wrap: bool, rng: &mut impl Rng) -> Game {
        let mut current = Grid::new(width, height, wrap);
        for _ in 0..width * height / 4 {
            current.set(rng.gen_range(0..width), rng.gen_range(0..height), true);
        }
        Game::from_grid(current, String::new())
    }

    /// Creates a game around a caller-built grid, allocating the scratch
    /// buffer with the same dimensions and wrap policy.
    pub fn from_grid(grid: Grid, comment: String) -> Game {
        let next = Grid::new(grid.width(), grid.height(), grid.wrap());
        Game {
            current: grid,
            next,
            comment,
        }
    }

    /// Creates a game from a decoded RLE pattern.
    pub fn from_pattern(pattern: Pattern) -> Game {
        let (grid, comment) = pattern.into_parts();
        Game::from_grid(grid, comment)
    }

    /// Loads a game state from a run-length encoded file.
    /// The file must have the `.rle` extension.
    ///
    /// # Arguments
    /// * `path` - The path to the pattern file.
    /// * `wrap` - Whether the board wraps toroidally, independent of
    ///   anything the file declares.
    pub fn load(path: impl AsRef<Path>, wrap: bool) -> Result<Game, Error> {
        let path = path.as_ref();
        if fs::metadata(path)?.is_dir() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rle") {
            return Err(Error::Extension(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Ok(Game::from_pattern(rle::decode(&contents, wrap)?))
    }

    /// A single discrete moment when births and deaths are processed.
    ///
    /// Every cell of the next generation is computed into the scratch grid
    /// before the two buffers swap roles, so a reader never observes a
    /// half-updated generation.
    pub fn tick(&mut self) {
        for y in 0..self.current.height() {
            for x in 0..self.current.width() {
                self.next
                    .set(x, y, self.current.next_state(x as i64, y as i64));
            }
        }
        mem::swap(&mut self.current, &mut self.next);
    }

    /// The current generation.
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    /// The comment(s) of the loaded RLE file. Empty if there are none, or
    /// the game was created without a file.
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.current, f)
    }
}
