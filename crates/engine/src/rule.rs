use life_common::world::{ALIVE, DEAD};

/// Classic B3/S23: a live cell survives with two or three live neighbors, a
/// dead cell is born with exactly three.
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub cells: Vec<u8>,
    /// Indices whose state flipped, ascending.
    pub changes: Vec<u32>,
}

/// Computes the next generation of `cells` and the indices that changed.
///
/// `neighbors` must have one entry per cell with every index in range.
pub fn step(cells: &[u8], neighbors: &[[u32; 8]]) -> Generation {
    let mut next = Vec::with_capacity(cells.len());
    let mut changes = Vec::new();

    for (i, (cell, around)) in cells.iter().zip(neighbors.iter()).enumerate() {
        let live_neighbors = around
            .iter()
            .map(|neighbor| cells[*neighbor as usize])
            .sum::<u8>();
        let alive = next_state(*cell == ALIVE, live_neighbors);
        let value = if alive { ALIVE } else { DEAD };
        if value != *cell {
            changes.push(i as u32);
        }
        next.push(value);
    }

    Generation {
        cells: next,
        changes,
    }
}
