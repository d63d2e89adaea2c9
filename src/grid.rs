use std::fmt;

/// The two-dimensional board of cells.
///
/// Cells are stored in a flat buffer of `width * height` booleans that is
/// allocated once and never resized. When `wrap` is enabled the board is a
/// torus: coordinates off one edge re-enter from the opposite edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    wrap: bool,
    cells: Vec<bool>,
}

impl Grid {
    /// Allocates a new all-dead board of the given width and height.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize, wrap: bool) -> Grid {
        assert!(width > 0 && height > 0, "grid dimensions must be nonzero");
        Grid {
            width,
            height,
            wrap,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Writes the cell at `x`, `y`. In-bounds only, writes never wrap.
    ///
    /// # Panics
    /// Panics if `x >= width` or `y >= height`.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        assert!(x < self.width && y < self.height, "cell out of bounds");
        self.cells[y * self.width + x] = alive;
    }

    /// Reports whether the cell at `x`, `y` is alive.
    ///
    /// With wrapping enabled, out-of-range coordinates are reduced
    /// toroidally, so `x = -1` reads column `width - 1`. Without it, any
    /// coordinate outside the board is simply dead.
    pub fn alive(&self, x: i64, y: i64) -> bool {
        let (w, h) = (self.width as i64, self.height as i64);
        let (x, y) = if self.wrap {
            (x.rem_euclid(w), y.rem_euclid(h))
        } else if x < 0 || x >= w || y < 0 || y >= h {
            return false;
        } else {
            (x, y)
        };
        self.cells[(y * w + x) as usize]
    }

    /// Counts living cells among the 8 neighbours of `x`, `y`, applying the
    /// wrap policy per neighbour. The cell itself is excluded.
    pub fn neighbor_count(&self, x: i64, y: i64) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx != 0 || dy != 0) && self.alive(x + dx, y + dy) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Returns the state of the cell at `x`, `y` at the next tick.
    ///
    /// This is the only place the B3/S23 rule is encoded:
    /// * Any live cell with fewer than two live neighbours dies, as if by underpopulation.
    /// * Any live cell with two or three live neighbours lives on to the next generation.
    /// * Any live cell with more than three live neighbours dies, as if by overpopulation.
    /// * Any dead cell with exactly three live neighbours becomes a live cell, as if by reproduction.
    pub fn next_state(&self, x: i64, y: i64) -> bool {
        let neighbors = self.neighbor_count(x, y);
        neighbors == 3 || neighbors == 2 && self.alive(x, y)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[y * self.width + x] {
                    write!(f, "*")?;
                } else {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
