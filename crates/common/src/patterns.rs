use crate::{world::GridState, Error, Result};

/// A named starting configuration. `cells` are `(x, y)` offsets from the
/// pattern's top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(u32, u32)],
}

impl Pattern {
    /// Width and height of the pattern's bounding box.
    pub fn extent(&self) -> (u32, u32) {
        self.cells.iter().fold((0u32, 0u32), |(w, h), &(x, y)| {
            (w.max(x + 1), h.max(y + 1))
        })
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

/// Clears the grid and places `pattern` in its center.
pub fn apply_centered(grid: &mut GridState, pattern: &Pattern) -> Result<()> {
    let (width, height) = pattern.extent();
    if width > grid.size() || height > grid.size() {
        return Err(Error::InvalidConfig(format!(
            "pattern {} ({}x{}) does not fit a {}x{} grid",
            pattern.name,
            width,
            height,
            grid.size(),
            grid.size()
        )));
    }
    let origin_x = (grid.size() - width) / 2;
    let origin_y = (grid.size() - height) / 2;

    grid.clear();
    for &(x, y) in pattern.cells {
        grid.set(origin_x + x, origin_y + y, true)?;
    }
    Ok(())
}
