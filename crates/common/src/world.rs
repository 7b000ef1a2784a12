use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

// [nw, n, ne, w, e, sw, s, se]
const NEIGHBORHOOD: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The toroidal Moore neighborhood of every cell of a `size`x`size` grid.
///
/// Entry `i` holds the eight indices around cell `i`, in the order of
/// `NEIGHBORHOOD`, with both axes wrapped modulo `size`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NeighborTable {
    size: u32,
    entries: Vec<[u32; 8]>,
}

impl NeighborTable {
    pub fn build(size: u32) -> Self {
        let side = i64::from(size);
        let entries = (0..side)
            .flat_map(|y| (0..side).map(move |x| (x, y)))
            .map(|(x, y)| {
                let mut neighbors = [0u32; 8];
                for (slot, (relative_x, relative_y)) in neighbors.iter_mut().zip(NEIGHBORHOOD.iter())
                {
                    let nx = (x + relative_x).rem_euclid(side);
                    let ny = (y + relative_y).rem_euclid(side);
                    *slot = (nx + ny * side) as u32;
                }
                neighbors
            })
            .collect();
        Self { size, entries }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u32; 8]> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[[u32; 8]] {
        &self.entries
    }
}

/// Live/dead cells of a square toroidal grid, indexed by `x + y * size`,
/// kept together with the neighbor table built for the same size.
#[derive(Debug, Clone)]
pub struct GridState {
    size: u32,
    cells: Vec<u8>,
    neighbors: NeighborTable,
}

impl GridState {
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig("size must be at least 1".to_string()));
        }
        Ok(Self {
            size,
            cells: vec![DEAD; cell_count(size)],
            neighbors: NeighborTable::build(size),
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn neighbors(&self) -> &NeighborTable {
        &self.neighbors
    }

    pub fn cell_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let y_index = (y as usize).checked_mul(self.size as usize)?;
        y_index.checked_add(x as usize)
    }

    pub fn coordinates(&self, index: usize) -> (u32, u32) {
        let side = self.size as usize;
        ((index % side) as u32, (index / side) as u32)
    }

    pub fn is_alive(&self, x: u32, y: u32) -> Option<bool> {
        let index = self.cell_index(x, y)?;
        self.cells.get(index).map(|cell| *cell == ALIVE)
    }

    pub fn set(&mut self, x: u32, y: u32, alive: bool) -> Result<()> {
        let index = self.checked_index(x, y)?;
        self.cells[index] = if alive { ALIVE } else { DEAD };
        Ok(())
    }

    /// Flips one cell and returns its new state.
    pub fn toggle(&mut self, x: u32, y: u32) -> Result<bool> {
        let index = self.checked_index(x, y)?;
        let cell = &mut self.cells[index];
        *cell = if *cell == ALIVE { DEAD } else { ALIVE };
        Ok(*cell == ALIVE)
    }

    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = DEAD;
        }
    }

    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    /// Sets every cell alive with probability one half.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            *cell = if rng.gen_bool(0.5) { ALIVE } else { DEAD };
        }
    }

    /// Drops the current cells and neighbor table and starts over with an
    /// all-dead grid of the new size.
    pub fn resize(&mut self, size: u32) -> Result<()> {
        let resized = Self::new(size)?;
        debug!("resizing grid from {} to {}", self.size, size);
        *self = resized;
        Ok(())
    }

    /// Overwrites every cell with the result of a step. Returns `false`, and
    /// leaves the grid untouched, if `cells` was computed for another size.
    pub fn replace_cells(&mut self, cells: Vec<u8>) -> bool {
        if cells.len() != self.cells.len() {
            return false;
        }
        self.cells = cells;
        true
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == ALIVE).count()
    }

    fn checked_index(&self, x: u32, y: u32) -> Result<usize> {
        self.cell_index(x, y).ok_or(Error::CellOutOfBounds {
            x: i64::from(x),
            y: i64::from(y),
            size: self.size,
        })
    }
}

fn cell_count(size: u32) -> usize {
    size as usize * size as usize
}
