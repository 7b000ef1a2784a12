use std::{thread, time::Duration};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use tracing::{debug, trace, warn};

use crate::{
    protocol::{StepRequest, StepResponse},
    rule, Error, Result,
};

/// Handle to a step engine thread.
///
/// Requests go in and responses come out as encoded byte buffers; the engine
/// keeps nothing between requests. Dropping the handle terminates the engine,
/// and anything it was still computing is thrown away.
#[derive(Debug)]
pub struct StepEngine {
    epoch: u64,
    request_tx: Option<Sender<Vec<u8>>>,
    response_rx: Receiver<Vec<u8>>,
}

impl StepEngine {
    pub fn spawn(epoch: u64) -> Result<Self> {
        Self::spawn_with_latency(epoch, Duration::from_secs(0))
    }

    /// Spawns an engine that takes at least `latency` to answer each request.
    pub fn spawn_with_latency(epoch: u64, latency: Duration) -> Result<Self> {
        let (request_tx, request_rx) = crossbeam_channel::unbounded();
        let (response_tx, response_rx) = crossbeam_channel::unbounded();
        thread::Builder::new()
            .name(format!("step-engine-{}", epoch))
            .spawn(move || run(request_rx, response_tx, latency))
            .map_err(Error::Spawn)?;
        debug!("spawned step engine {}", epoch);
        Ok(Self {
            epoch,
            request_tx: Some(request_tx),
            response_rx,
        })
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Hands an encoded `StepRequest` to the engine without waiting for it.
    pub fn submit(&self, request: Vec<u8>) -> Result<()> {
        let request_tx = self.request_tx.as_ref().ok_or(Error::Disconnected)?;
        request_tx.send(request).map_err(|_| Error::Disconnected)
    }

    pub fn try_recv(&self) -> Result<Option<StepResponse>> {
        match self.response_rx.try_recv() {
            Ok(bytes) => StepResponse::decode(&bytes).map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(Error::Disconnected),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<StepResponse>> {
        match self.response_rx.recv_timeout(timeout) {
            Ok(bytes) => StepResponse::decode(&bytes).map(Some),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(Error::Disconnected),
        }
    }
}

impl Drop for StepEngine {
    fn drop(&mut self) {
        // closing the request channel ends the worker loop; a step still
        // being computed fails to send once `response_rx` is gone
        self.request_tx.take();
        debug!("terminated step engine {}", self.epoch);
    }
}

fn run(requests: Receiver<Vec<u8>>, responses: Sender<Vec<u8>>, latency: Duration) {
    for bytes in requests.iter() {
        let request = match StepRequest::decode(&bytes).and_then(|request| {
            request.validate()?;
            Ok(request)
        }) {
            Ok(request) => request,
            Err(err) => {
                warn!("dropping step request: {}", err);
                continue;
            }
        };

        let started = instant::Instant::now();
        if latency > Duration::from_secs(0) {
            thread::sleep(latency);
        }
        let generation = rule::step(&request.grid, &request.neighbors);
        let response = StepResponse {
            epoch: request.epoch,
            generation: request.generation,
            new_grid: generation.cells,
            changes: generation.changes,
            elapsed_micros: started.elapsed().as_micros() as u64,
        };
        trace!(
            "computed generation {} ({} changes)",
            response.generation,
            response.changes.len()
        );

        let encoded = match response.encode() {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!("could not encode step response: {}", err);
                continue;
            }
        };
        if responses.send(encoded).is_err() {
            debug!("controller went away, stopping step engine");
            return;
        }
    }
    trace!("step engine request channel closed");
}
