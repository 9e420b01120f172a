//! Padded 3D grid storage and cell access helpers.
//!
//! A grid of side `N` is stored as `(N+2)^3` cells: a one-cell dead border
//! wraps the simulated volume so the neighbour loop never bounds-checks.
//! Public coordinates are interior coordinates in `0..N`; padded coordinates
//! (`interior + 1`) are only used inside this module and the engine.

use crate::error::EngineError;

/// One cell of the automaton
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    /// `0` dead, `max_age` alive, anything between is decaying
    pub state: u8,
    /// Alive neighbours seen on the tick that produced this cell (display only)
    pub neighbours: u8,
}

impl Cell {
    pub const DEAD: Cell = Cell {
        state: 0,
        neighbours: 0,
    };
}

/// Cubic grid with a permanently dead border
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    stride: usize,
    pub(crate) cells: Vec<Cell>,
    offsets: [isize; 26],
}

impl Grid {
    /// Allocate an all-dead grid with `size^3` interior cells
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if size == 0 {
            return Err(EngineError::ZeroSize);
        }
        let stride = size
            .checked_add(2)
            .ok_or(EngineError::SizeTooLarge(size))?;
        let len = stride
            .checked_mul(stride)
            .and_then(|n| n.checked_mul(stride))
            .filter(|&n| n <= isize::MAX as usize / std::mem::size_of::<Cell>())
            .ok_or(EngineError::SizeTooLarge(size))?;

        Ok(Self {
            size,
            stride,
            cells: vec![Cell::DEAD; len],
            offsets: neighbour_offsets(stride),
        })
    }

    /// Interior side length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side length including the border
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of cells in one padded z-slab
    #[inline]
    pub(crate) fn slab_len(&self) -> usize {
        self.stride * self.stride
    }

    /// Linear index of a padded coordinate
    #[inline]
    pub(crate) fn padded_index(&self, px: usize, py: usize, pz: usize) -> usize {
        (pz * self.stride + py) * self.stride + px
    }

    /// Check if interior coordinates are inside the simulated volume
    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.size && y < self.size && z < self.size
    }

    /// Cell at interior coordinates, `None` outside the volume
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<Cell> {
        if !self.in_bounds(x, y, z) {
            return None;
        }
        Some(self.cells[self.padded_index(x + 1, y + 1, z + 1)])
    }

    pub(crate) fn set_state(&mut self, x: usize, y: usize, z: usize, state: u8) -> Result<(), EngineError> {
        if !self.in_bounds(x, y, z) {
            return Err(EngineError::OutOfBounds {
                x,
                y,
                z,
                size: self.size,
            });
        }
        let idx = self.padded_index(x + 1, y + 1, z + 1);
        self.cells[idx] = Cell {
            state,
            neighbours: 0,
        };
        Ok(())
    }

    /// Count neighbours whose state equals `alive`, excluding the cell itself
    ///
    /// `idx` must be the linear index of an interior cell.
    #[inline]
    pub(crate) fn count_alive_neighbours(&self, idx: usize, alive: u8) -> u8 {
        let mut count = 0;
        for &offset in &self.offsets {
            if self.cells[idx.wrapping_add_signed(offset)].state == alive {
                count += 1;
            }
        }
        count
    }

    /// Reset every cell, border included, to dead
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::DEAD);
    }

    /// Iterate interior cells in x-fastest, then y, then z order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize), Cell)> + '_ {
        let n = self.size;
        (0..n).flat_map(move |z| {
            (0..n).flat_map(move |y| {
                (0..n).map(move |x| ((x, y, z), self.cells[self.padded_index(x + 1, y + 1, z + 1)]))
            })
        })
    }

    /// True if a padded coordinate lies on the border shell
    pub(crate) fn is_border(&self, px: usize, py: usize, pz: usize) -> bool {
        let last = self.stride - 1;
        px == 0 || py == 0 || pz == 0 || px == last || py == last || pz == last
    }
}

/// Linear offsets of the 26 Moore neighbours for a given stride
fn neighbour_offsets(stride: usize) -> [isize; 26] {
    let s = stride as isize;
    let mut offsets = [0isize; 26];
    let mut i = 0;
    for dz in -1..=1isize {
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                // Skip the center cell
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                offsets[i] = (dz * s + dy) * s + dx;
                i += 1;
            }
        }
    }
    offsets
}
