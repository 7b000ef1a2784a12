use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Session settings. `size` is the side length of the square grid, `cell_size`
/// the pixel extent of one cell and `speed_ms` the delay between generations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub size: u32,
    pub cell_size: u32,
    #[serde(alias = "speed")]
    pub speed_ms: u64,
}

impl SimulationConfig {
    pub fn new(size: u32, cell_size: u32, speed_ms: u64) -> Result<Self> {
        let config = Self {
            size,
            cell_size,
            speed_ms,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidConfig("size must be at least 1".to_string()));
        }
        if self.cell_size == 0 {
            return Err(Error::InvalidConfig(
                "cell size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn speed(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.speed_ms)
    }

    /// Pixel extent of the whole grid along one axis.
    pub fn surface_extent(&self) -> u64 {
        u64::from(self.size) * u64::from(self.cell_size)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: 100,
            cell_size: 10,
            speed_ms: 200,
        }
    }
}
