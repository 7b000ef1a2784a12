pub mod protocol;
pub mod rule;
pub mod worker;

pub use protocol::{StepRequest, StepResponse};
pub use worker::StepEngine;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Protocol(#[from] bincode::Error),
    #[error("could not spawn step engine thread")]
    Spawn(#[source] std::io::Error),
    #[error("step engine is no longer running")]
    Disconnected,
    #[error("malformed step message: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
