pub mod config;
pub mod gameloop;
pub mod patterns;
pub mod world;

pub use config::SimulationConfig;
pub use world::{GridState, NeighborTable};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cell ({x}, {y}) is outside of a {size}x{size} grid")]
    CellOutOfBounds { x: i64, y: i64, size: u32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
