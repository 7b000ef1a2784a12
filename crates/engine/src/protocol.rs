use life_common::{
    world::{ALIVE, DEAD},
    GridState,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// controller -> engine
//
// `epoch` identifies the session state the request was made against and
// `generation` the step it computes; both are echoed back so the controller
// can discard answers it no longer wants.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StepRequest {
    pub epoch: u64,
    pub generation: u64,
    pub size: u32,
    pub grid: Vec<u8>,
    pub neighbors: Vec<[u32; 8]>,
}

// same layout as `StepRequest`, encoded straight from the controller's grid
#[derive(Serialize)]
struct StepRequestRef<'a> {
    epoch: u64,
    generation: u64,
    size: u32,
    grid: &'a [u8],
    neighbors: &'a [[u32; 8]],
}

impl StepRequest {
    /// Encodes a request for the current contents of `grid` without cloning
    /// it.
    pub fn encode_grid(epoch: u64, generation: u64, grid: &GridState) -> Result<Vec<u8>> {
        let request = StepRequestRef {
            epoch,
            generation,
            size: grid.size(),
            grid: grid.cells(),
            neighbors: grid.neighbors().entries(),
        };
        Ok(bincode::serialize(&request)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let cell_count = self.size as usize * self.size as usize;
        if self.grid.len() != cell_count {
            return Err(Error::Malformed(format!(
                "grid has {} cells, expected {}",
                self.grid.len(),
                cell_count
            )));
        }
        if self.neighbors.len() != cell_count {
            return Err(Error::Malformed(format!(
                "neighbor table has {} entries, expected {}",
                self.neighbors.len(),
                cell_count
            )));
        }
        if self.grid.iter().any(|cell| *cell != DEAD && *cell != ALIVE) {
            return Err(Error::Malformed("grid holds a non-binary cell".to_string()));
        }
        if self
            .neighbors
            .iter()
            .flat_map(|entry| entry.iter())
            .any(|neighbor| *neighbor as usize >= cell_count)
        {
            return Err(Error::Malformed(
                "neighbor index out of range".to_string(),
            ));
        }
        Ok(())
    }
}

// engine -> controller
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StepResponse {
    pub epoch: u64,
    pub generation: u64,
    pub new_grid: Vec<u8>,
    pub changes: Vec<u32>,
    /// Time spent computing the step.
    pub elapsed_micros: u64,
}

impl StepResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn validate(&self, size: u32) -> Result<()> {
        let cell_count = size as usize * size as usize;
        if self.new_grid.len() != cell_count {
            return Err(Error::Malformed(format!(
                "response grid has {} cells, expected {}",
                self.new_grid.len(),
                cell_count
            )));
        }
        if let Some(change) = self
            .changes
            .iter()
            .find(|change| **change as usize >= cell_count)
        {
            return Err(Error::Malformed(format!(
                "change index {} out of range",
                change
            )));
        }
        Ok(())
    }
}
