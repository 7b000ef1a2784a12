use life_common::{world::ALIVE, GridState, SimulationConfig};
use tracing::trace;

use crate::session::Redraw;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    Background,
    Live,
    CellOutline,
    GridLine,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: u64,
    pub y: u64,
    pub width: u64,
    pub height: u64,
}

/// Pixel layout of the grid on a drawing surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellGeometry {
    pub cells: u32,
    pub cell_size: u32,
}

impl CellGeometry {
    pub fn cell_rect(&self, x: u32, y: u32) -> Rect {
        let cell_size = u64::from(self.cell_size);
        Rect {
            x: u64::from(x) * cell_size,
            y: u64::from(y) * cell_size,
            width: cell_size,
            height: cell_size,
        }
    }

    pub fn extent(&self) -> u64 {
        u64::from(self.cells) * u64::from(self.cell_size)
    }
}

impl From<&SimulationConfig> for CellGeometry {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            cells: config.size,
            cell_size: config.cell_size,
        }
    }
}

/// Drawing primitives the renderer needs from whatever paints the pixels.
pub trait Surface {
    /// Sets the surface to `width`x`height` pixels, all background.
    fn resize(&mut self, width: u64, height: u64);
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color);
    fn draw_grid_lines(&mut self, geometry: CellGeometry, color: Color);
}

/// Repaints cells on a `Surface`, either all of them or just the ones a
/// generation changed.
#[derive(Debug)]
pub struct ChangeRenderer<S> {
    surface: S,
    full_redraws: u64,
    cells_redrawn: u64,
}

impl<S: Surface> ChangeRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            full_redraws: 0,
            cells_redrawn: 0,
        }
    }

    pub fn render(&mut self, redraw: &Redraw, grid: &GridState, geometry: CellGeometry) {
        match redraw {
            Redraw::Full => self.full_redraw(grid, geometry),
            Redraw::Cells(changes) => self.apply_changes(changes, grid, geometry),
        }
    }

    pub fn apply_changes(&mut self, changes: &[u32], grid: &GridState, geometry: CellGeometry) {
        for &index in changes {
            let index = index as usize;
            let (x, y) = grid.coordinates(index);
            let rect = geometry.cell_rect(x, y);
            self.surface.clear_rect(rect);
            if grid.cells().get(index) == Some(&ALIVE) {
                self.surface.fill_rect(rect, Color::Live);
            }
            self.surface.stroke_rect(rect, Color::CellOutline);
        }
        self.cells_redrawn += changes.len() as u64;
        trace!("redrew {} changed cells", changes.len());
    }

    pub fn full_redraw(&mut self, grid: &GridState, geometry: CellGeometry) {
        let extent = geometry.extent();
        self.surface.resize(extent, extent);
        self.surface.clear_rect(Rect {
            x: 0,
            y: 0,
            width: extent,
            height: extent,
        });
        for (index, cell) in grid.cells().iter().enumerate() {
            if *cell == ALIVE {
                let (x, y) = grid.coordinates(index);
                self.surface.fill_rect(geometry.cell_rect(x, y), Color::Live);
            }
        }
        self.surface.draw_grid_lines(geometry, Color::GridLine);
        self.full_redraws += 1;
        trace!("full redraw of {}x{} grid", geometry.cells, geometry.cells);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn full_redraws(&self) -> u64 {
        self.full_redraws
    }

    pub fn cells_redrawn(&self) -> u64 {
        self.cells_redrawn
    }
}

/// In-memory surface holding one color per pixel.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    width: u64,
    height: u64,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn pixel(&self, x: u64, y: u64) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((x + y * self.width) as usize).copied()
    }

    /// One character per cell: `#` when the cell's center pixel is live.
    pub fn to_ascii(&self, geometry: CellGeometry) -> String {
        let half = u64::from(geometry.cell_size) / 2;
        let mut out = String::new();
        for y in 0..geometry.cells {
            for x in 0..geometry.cells {
                let rect = geometry.cell_rect(x, y);
                let live = self.pixel(rect.x + half, rect.y + half) == Some(Color::Live);
                out.push(if live { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    fn set(&mut self, x: u64, y: u64, color: Color) {
        if x < self.width && y < self.height {
            let index = (x + y * self.width) as usize;
            self.pixels[index] = color;
        }
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.set(x, y, color);
            }
        }
    }
}

impl Surface for FrameBuffer {
    fn resize(&mut self, width: u64, height: u64) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::Background; (width * height) as usize];
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.fill(rect, Color::Background);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        // an outline would cover the whole cell
        if rect.width < 3 || rect.height < 3 {
            return;
        }
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;
        for x in rect.x..=right {
            self.set(x, rect.y, color);
            self.set(x, bottom, color);
        }
        for y in rect.y..=bottom {
            self.set(rect.x, y, color);
            self.set(right, y, color);
        }
    }

    fn draw_grid_lines(&mut self, geometry: CellGeometry, color: Color) {
        if geometry.cell_size < 3 {
            return;
        }
        let extent = geometry.extent();
        let cell_size = u64::from(geometry.cell_size);
        for line in 0..=u64::from(geometry.cells) {
            let offset = (line * cell_size).min(extent.saturating_sub(1));
            for along in 0..extent {
                self.set(offset, along, color);
                self.set(along, offset, color);
            }
        }
    }
}
