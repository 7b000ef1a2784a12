use std::time::Duration;

use instant::Instant;
use life_common::{gameloop::Timer, patterns, GridState, SimulationConfig};
use life_engine::{StepEngine, StepRequest, StepResponse};
use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::{Error, Result};

/// What the renderer has to repaint after a session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redraw {
    /// Every cell plus the grid lines; the geometry changed.
    Full,
    /// Only these cell indices.
    Cells(Vec<u32>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Everything a UI layer can ask of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Starts the loop, or pauses it when already running.
    Start,
    Pause,
    /// Pauses and tears down the step engine.
    Stop,
    /// Replaces the step engine with a fresh one.
    InitEngine,
    ToggleCell { x: u32, y: u32 },
    /// Pointer position relative to the surface origin, in pixels.
    Click { x: f64, y: f64 },
    Clear,
    Randomize,
    Pattern(String),
    Resize(u32),
    SetCellSize(u32),
    SetSpeed(u64),
}

/// One simulation: the grid, its step engine and the loop driving it.
///
/// The loop is strictly serialized. A tick submits the current grid and
/// disarms the timer; the response, once applied, arms the next tick `speed`
/// later. A slow engine therefore slows the loop down instead of having
/// generations computed from a grid that is already out of date.
///
/// Authoring edits made while a step is in flight are still overwritten by
/// that step's result.
#[derive(Debug)]
pub struct Session {
    config: SimulationConfig,
    grid: GridState,
    engine: Option<StepEngine>,
    engine_latency: Duration,
    state: RunState,
    timer: Timer,
    // bumped whenever in-flight work must be thrown away
    epoch: u64,
    generation: u64,
    in_flight: Option<u64>,
    submitted: u64,
    last_step_time: Option<Duration>,
}

impl Session {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_engine_latency(config, Duration::from_secs(0))
    }

    /// Like `new`, with an engine that takes at least `latency` per step.
    pub fn with_engine_latency(config: SimulationConfig, latency: Duration) -> Result<Self> {
        config.validate()?;
        let grid = GridState::new(config.size)?;
        let mut session = Self {
            config,
            grid,
            engine: None,
            engine_latency: latency,
            state: RunState::Stopped,
            timer: Timer::new(config.speed()),
            epoch: 0,
            generation: 0,
            in_flight: None,
            submitted: 0,
            last_step_time: None,
        };
        session.init_engine()?;
        info!(
            "created {}x{} session, {}ms per generation",
            config.size, config.size, config.speed_ms
        );
        Ok(session)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Whether a step has been submitted and not answered yet.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn steps_submitted(&self) -> u64 {
        self.submitted
    }

    pub fn last_step_time(&self) -> Option<Duration> {
        self.last_step_time
    }

    /// Time until the next tick is due, if one is armed.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    pub fn dispatch(&mut self, command: Command, now: Instant) -> Result<Option<Redraw>> {
        trace!("dispatching {:?}", command);
        match command {
            Command::Start => self.start(now).map(|_| None),
            Command::Pause => {
                self.pause();
                Ok(None)
            }
            Command::Stop => {
                self.stop();
                Ok(None)
            }
            Command::InitEngine => self.init_engine().map(|_| None),
            Command::ToggleCell { x, y } => self.toggle_cell(x, y).map(Some),
            Command::Click { x, y } => self.click(x, y).map(Some),
            Command::Clear => Ok(Some(self.clear())),
            Command::Randomize => Ok(Some(self.randomize())),
            Command::Pattern(name) => self.apply_pattern(&name).map(Some),
            Command::Resize(size) => self.resize(size).map(Some),
            Command::SetCellSize(cell_size) => self.set_cell_size(cell_size).map(Some),
            Command::SetSpeed(speed_ms) => {
                self.set_speed(speed_ms);
                Ok(None)
            }
        }
    }

    /// Tears down any current step engine, dropping its in-flight work, and
    /// spawns a new one.
    pub fn init_engine(&mut self) -> Result<()> {
        self.discard_engine();
        let engine = StepEngine::spawn_with_latency(self.epoch, self.engine_latency)?;
        self.engine = Some(engine);
        if self.is_running() {
            self.timer.arm_immediately(Instant::now());
        }
        Ok(())
    }

    /// Starts the loop, or pauses it if it is already running.
    pub fn start(&mut self, now: Instant) -> Result<RunState> {
        if self.engine.is_none() {
            warn!("step engine is not initialized, not starting");
            return Err(Error::EngineNotReady);
        }
        match self.state {
            RunState::Running => self.pause(),
            RunState::Stopped => {
                self.state = RunState::Running;
                if self.in_flight.is_none() {
                    self.timer.arm_immediately(now);
                }
                debug!("running from generation {}", self.generation);
            }
        }
        Ok(self.state)
    }

    pub fn pause(&mut self) {
        if self.is_running() {
            debug!("paused at generation {}", self.generation);
        }
        self.state = RunState::Stopped;
        self.timer.disarm();
    }

    /// Pauses and tears down the step engine. `start` fails until
    /// `init_engine` is called again.
    pub fn stop(&mut self) {
        self.pause();
        if self.engine.is_some() {
            self.discard_engine();
            info!("session stopped at generation {}", self.generation);
        }
    }

    /// Applies any step result that has arrived and submits the next step if
    /// its tick is due. Never blocks.
    pub fn update_at(&mut self, now: Instant) -> Result<Option<Redraw>> {
        let mut redraw = None;
        loop {
            let received = match self.engine.as_ref() {
                Some(engine) => engine.try_recv(),
                None => break,
            };
            match received {
                Ok(Some(response)) => {
                    if let Some(changes) = self.apply_response(response, now) {
                        redraw = Some(merge(redraw, changes));
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    self.engine_failed(err, now)?;
                    break;
                }
            }
        }

        if self.is_running() && self.timer.tick(now) {
            self.submit_step()?;
        }
        Ok(redraw)
    }

    pub fn update(&mut self) -> Result<Option<Redraw>> {
        self.update_at(Instant::now())
    }

    /// Blocks for up to `timeout` waiting for the in-flight step and applies
    /// it.
    pub fn await_step(&mut self, timeout: Duration) -> Result<Option<Redraw>> {
        if self.in_flight.is_none() {
            return Ok(None);
        }
        let received = match self.engine.as_ref() {
            Some(engine) => engine.recv_timeout(timeout),
            None => return Ok(None),
        };
        let now = Instant::now();
        match received {
            Ok(Some(response)) => Ok(self.apply_response(response, now).map(Redraw::Cells)),
            Ok(None) => Ok(None),
            Err(err) => {
                self.engine_failed(err, now)?;
                Ok(None)
            }
        }
    }

    pub fn toggle_cell(&mut self, x: u32, y: u32) -> Result<Redraw> {
        let alive = self.grid.toggle(x, y)?;
        trace!("toggled ({}, {}) to {}", x, y, if alive { "alive" } else { "dead" });
        let index = x as usize + y as usize * self.grid.size() as usize;
        Ok(Redraw::Cells(vec![index as u32]))
    }

    /// Toggles the cell under a pointer at `(x, y)` pixels from the surface
    /// origin.
    pub fn click(&mut self, x: f64, y: f64) -> Result<Redraw> {
        let cell_size = f64::from(self.config.cell_size);
        let cell_x = (x / cell_size).floor();
        let cell_y = (y / cell_size).floor();
        let side = f64::from(self.grid.size());
        if !(0.0..side).contains(&cell_x) || !(0.0..side).contains(&cell_y) {
            return Err(life_common::Error::CellOutOfBounds {
                x: cell_x as i64,
                y: cell_y as i64,
                size: self.grid.size(),
            }
            .into());
        }
        self.toggle_cell(cell_x as u32, cell_y as u32)
    }

    pub fn clear(&mut self) -> Redraw {
        self.rewrite(|grid| grid.clear())
    }

    pub fn randomize(&mut self) -> Redraw {
        self.rewrite(|grid| grid.randomize())
    }

    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Redraw {
        self.rewrite(|grid| grid.randomize_with(rng))
    }

    pub fn apply_pattern(&mut self, name: &str) -> Result<Redraw> {
        let pattern = patterns::find(name).ok_or_else(|| {
            life_common::Error::InvalidConfig(format!("unknown pattern {}", name))
        })?;
        let mut scratch = self.grid.clone();
        patterns::apply_centered(&mut scratch, pattern)?;
        Ok(self.rewrite(|grid| {
            grid.replace_cells(scratch.cells().to_vec());
        }))
    }

    /// Starts over with an all-dead grid of the new size. Work in flight for
    /// the old size is discarded along with the engine computing it.
    pub fn resize(&mut self, size: u32) -> Result<Redraw> {
        let config = SimulationConfig { size, ..self.config };
        config.validate()?;
        self.grid.resize(size)?;
        self.config = config;
        self.generation = 0;
        if self.engine.is_some() {
            self.init_engine()?;
        } else {
            self.discard_engine();
        }
        info!("resized grid to {}x{}", size, size);
        Ok(Redraw::Full)
    }

    pub fn set_cell_size(&mut self, cell_size: u32) -> Result<Redraw> {
        let config = SimulationConfig {
            cell_size,
            ..self.config
        };
        config.validate()?;
        self.config = config;
        debug!("cell size set to {}px", cell_size);
        Ok(Redraw::Full)
    }

    /// Takes effect from the next tick on.
    pub fn set_speed(&mut self, speed_ms: u64) {
        self.config.speed_ms = speed_ms;
        self.timer.set_interval(self.config.speed());
        debug!("speed set to {}ms", speed_ms);
    }

    fn rewrite<F>(&mut self, edit: F) -> Redraw
    where
        F: FnOnce(&mut GridState),
    {
        let before = self.grid.cells().to_vec();
        edit(&mut self.grid);
        let changes = before
            .iter()
            .zip(self.grid.cells().iter())
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(index, _)| index as u32)
            .collect();
        Redraw::Cells(changes)
    }

    fn discard_engine(&mut self) {
        self.engine = None;
        self.epoch += 1;
        if let Some(generation) = self.in_flight.take() {
            debug!("discarding in-flight generation {}", generation);
        }
    }

    fn submit_step(&mut self) -> Result<()> {
        let engine = match self.engine.as_ref() {
            Some(engine) => engine,
            None => {
                self.state = RunState::Stopped;
                return Err(Error::EngineNotReady);
            }
        };
        let generation = self.generation + 1;
        let request = StepRequest::encode_grid(self.epoch, generation, &self.grid)?;
        if let Err(err) = engine.submit(request) {
            warn!("could not submit generation {}: {}", generation, err);
            self.engine = None;
            self.pause();
            return Err(err.into());
        }
        self.in_flight = Some(generation);
        self.submitted += 1;
        trace!("submitted generation {}", generation);
        Ok(())
    }

    fn apply_response(&mut self, response: StepResponse, now: Instant) -> Option<Vec<u32>> {
        if response.epoch != self.epoch || self.in_flight != Some(response.generation) {
            trace!(
                "discarding stale generation {} from epoch {}",
                response.generation,
                response.epoch
            );
            return None;
        }
        self.in_flight = None;
        if self.is_running() {
            self.timer.arm(now);
        }

        if let Err(err) = response.validate(self.grid.size()) {
            warn!("discarding step response: {}", err);
            return None;
        }
        let StepResponse {
            generation,
            new_grid,
            changes,
            elapsed_micros,
            ..
        } = response;
        if !self.grid.replace_cells(new_grid) {
            return None;
        }
        self.generation = generation;
        self.last_step_time = Some(Duration::from_micros(elapsed_micros));
        trace!(
            "applied generation {} in {}us, {} changes",
            generation,
            elapsed_micros,
            changes.len()
        );
        Some(changes)
    }

    fn engine_failed(&mut self, err: life_engine::Error, now: Instant) -> Result<()> {
        match err {
            life_engine::Error::Disconnected => {
                warn!("step engine went away");
                self.engine = None;
                self.in_flight = None;
                self.pause();
                Err(err.into())
            }
            err => {
                // the step is lost; the next tick recomputes from the current grid
                warn!("discarding unreadable step response: {}", err);
                self.in_flight = None;
                if self.is_running() {
                    self.timer.arm(now);
                }
                Ok(())
            }
        }
    }
}

fn merge(redraw: Option<Redraw>, mut changes: Vec<u32>) -> Redraw {
    match redraw {
        Some(Redraw::Cells(mut earlier)) => {
            earlier.append(&mut changes);
            earlier.sort_unstable();
            earlier.dedup();
            Redraw::Cells(earlier)
        }
        Some(Redraw::Full) => Redraw::Full,
        None => Redraw::Cells(changes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_engine::rule;
    use rand::{rngs::StdRng, SeedableRng};

    const WAIT: Duration = Duration::from_secs(5);

    fn config(size: u32, speed_ms: u64) -> SimulationConfig {
        SimulationConfig::new(size, 10, speed_ms).unwrap()
    }

    fn blinker_session(speed_ms: u64) -> Session {
        let mut session = Session::new(config(5, speed_ms)).unwrap();
        for x in 1..4 {
            session.toggle_cell(x, 2).unwrap();
        }
        session
    }

    /// Calls `update_at(now)` until `generation` is applied, returning the
    /// redraws seen along the way.
    fn pump_until(session: &mut Session, now: Instant, generation: u64) -> Vec<Redraw> {
        let deadline = std::time::Instant::now() + WAIT;
        let mut redraws = Vec::new();
        while session.generation() < generation {
            assert!(std::time::Instant::now() < deadline, "step never arrived");
            if let Some(redraw) = session.update_at(now).unwrap() {
                redraws.push(redraw);
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        redraws
    }

    fn evolve(grid: &GridState, generations: usize) -> Vec<u8> {
        let mut cells = grid.cells().to_vec();
        for _ in 0..generations {
            cells = rule::step(&cells, grid.neighbors().entries()).cells;
        }
        cells
    }

    #[test]
    fn start_toggles_between_running_and_stopped() {
        let mut session = Session::new(config(4, 100)).unwrap();
        let now = Instant::now();
        assert_eq!(session.start(now).unwrap(), RunState::Running);
        assert_eq!(session.start(now).unwrap(), RunState::Stopped);
        assert_eq!(session.start(now).unwrap(), RunState::Running);
        session.pause();
        assert!(!session.is_running());
        assert!(session.has_engine());
    }

    #[test]
    fn start_without_engine_is_refused() {
        let mut session = Session::new(config(4, 100)).unwrap();
        session.stop();
        assert!(!session.has_engine());
        assert!(matches!(
            session.start(Instant::now()),
            Err(Error::EngineNotReady)
        ));
        assert_eq!(session.state(), RunState::Stopped);

        session.init_engine().unwrap();
        assert_eq!(session.start(Instant::now()).unwrap(), RunState::Running);
    }

    #[test]
    fn running_blinker_oscillates() {
        let mut session = blinker_session(0);
        let original = session.grid().cells().to_vec();
        let now = Instant::now();
        session.start(now).unwrap();

        assert_eq!(session.update_at(now).unwrap(), None);
        assert!(session.is_pending());
        let first = session.await_step(WAIT).unwrap();
        assert_eq!(first, Some(Redraw::Cells(vec![7, 11, 13, 17])));
        assert_eq!(session.generation(), 1);
        assert_ne!(session.grid().cells(), &original[..]);
        assert!(session.last_step_time().is_some());

        // the response armed the next tick at the time it was applied
        session.update_at(Instant::now()).unwrap();
        assert!(session.is_pending());
        let second = session.await_step(WAIT).unwrap();
        assert_eq!(second, Some(Redraw::Cells(vec![7, 11, 13, 17])));
        assert_eq!(session.grid().cells(), &original[..]);
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn nothing_is_submitted_while_stopped() {
        let mut session = blinker_session(0);
        let now = Instant::now();
        assert_eq!(session.update_at(now).unwrap(), None);
        assert_eq!(session.steps_submitted(), 0);
        assert_eq!(session.await_step(Duration::from_millis(10)).unwrap(), None);
    }

    #[test]
    fn slow_engine_serializes_generations() {
        let mut session =
            Session::with_engine_latency(config(16, 0), Duration::from_millis(150)).unwrap();
        session.randomize_with(&mut StdRng::seed_from_u64(9));
        let initial = session.grid().clone();

        let now = Instant::now();
        session.start(now).unwrap();
        session.update_at(now).unwrap();
        assert_eq!(session.steps_submitted(), 1);

        // the tick interval is zero, yet no second step goes out until the
        // first one is back
        for _ in 0..20 {
            session.update_at(now).unwrap();
            assert!(session.steps_submitted() <= session.generation() + 1);
        }
        assert_eq!(session.steps_submitted(), 1);

        pump_until(&mut session, now, 3);
        assert_eq!(session.generation(), 3);
        assert!(session.steps_submitted() <= 4);
        assert_eq!(session.grid().cells(), &evolve(&initial, 3)[..]);
    }

    #[test]
    fn next_tick_waits_for_speed_after_response() {
        let mut session = blinker_session(100);
        let now = Instant::now();
        session.start(now).unwrap();
        session.update_at(now).unwrap();
        assert_eq!(session.next_tick_in(now), None);

        pump_until(&mut session, now, 1);
        assert_eq!(session.next_tick_in(now), Some(Duration::from_millis(100)));

        session.update_at(now + Duration::from_millis(99)).unwrap();
        assert_eq!(session.steps_submitted(), 1);
        session.update_at(now + Duration::from_millis(100)).unwrap();
        assert_eq!(session.steps_submitted(), 2);
    }

    #[test]
    fn speed_change_applies_from_next_tick() {
        let mut session = blinker_session(1_000);
        let now = Instant::now();
        session.start(now).unwrap();
        session.update_at(now).unwrap();
        session.set_speed(10);
        pump_until(&mut session, now, 1);
        assert_eq!(session.next_tick_in(now), Some(Duration::from_millis(10)));
        assert_eq!(session.config().speed_ms, 10);
    }

    #[test]
    fn stop_discards_in_flight_step() {
        let mut session =
            Session::with_engine_latency(config(5, 0), Duration::from_millis(50)).unwrap();
        for x in 1..4 {
            session.toggle_cell(x, 2).unwrap();
        }
        let before = session.grid().cells().to_vec();
        let now = Instant::now();
        session.start(now).unwrap();
        session.update_at(now).unwrap();
        assert!(session.is_pending());

        session.stop();
        assert!(!session.is_pending());
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(session.update_at(now).unwrap(), None);
        assert_eq!(session.generation(), 0);
        assert_eq!(session.grid().cells(), &before[..]);
    }

    #[test]
    fn resize_discards_in_flight_step() {
        let mut session =
            Session::with_engine_latency(config(5, 0), Duration::from_millis(50)).unwrap();
        for x in 1..4 {
            session.toggle_cell(x, 2).unwrap();
        }
        let now = Instant::now();
        session.start(now).unwrap();
        session.update_at(now).unwrap();
        let epoch = session.epoch();

        assert_eq!(session.resize(8).unwrap(), Redraw::Full);
        assert_ne!(session.epoch(), epoch);
        assert!(session.has_engine());
        assert!(session.is_running());
        assert_eq!(session.config().size, 8);
        assert_eq!(session.grid().cells().len(), 64);
        assert_eq!(session.grid().neighbors().len(), 64);
        assert_eq!(session.grid().live_count(), 0);
        assert_eq!(session.generation(), 0);

        // the fresh engine keeps going on the new, empty grid
        let later = Instant::now() + Duration::from_millis(1);
        pump_until(&mut session, later, 1);
        assert_eq!(session.grid().live_count(), 0);
    }

    #[test]
    fn resize_rejects_zero() {
        let mut session = Session::new(config(5, 0)).unwrap();
        assert!(matches!(
            session.resize(0),
            Err(Error::Common(life_common::Error::InvalidConfig(_)))
        ));
        assert_eq!(session.grid().size(), 5);
    }

    #[test]
    fn toggle_during_step_is_overwritten() {
        let mut session =
            Session::with_engine_latency(config(5, 0), Duration::from_millis(50)).unwrap();
        let now = Instant::now();
        session.start(now).unwrap();
        session.update_at(now).unwrap();
        session.toggle_cell(0, 0).unwrap();
        assert_eq!(session.grid().live_count(), 1);

        session.await_step(WAIT).unwrap();
        assert_eq!(session.grid().live_count(), 0);
    }

    #[test]
    fn click_maps_pixels_to_cells() {
        let mut session = Session::new(config(5, 100)).unwrap();
        assert_eq!(session.click(25.0, 39.9).unwrap(), Redraw::Cells(vec![17]));
        assert_eq!(session.grid().is_alive(2, 3), Some(true));
        assert_eq!(session.click(0.0, 0.0).unwrap(), Redraw::Cells(vec![0]));

        assert!(session.click(-0.5, 10.0).is_err());
        assert!(session.click(50.0, 0.0).is_err());
        assert!(session.click(0.0, f64::NAN).is_err());
        assert_eq!(session.grid().live_count(), 2);
    }

    #[test]
    fn authoring_edits_report_changed_cells() {
        let mut session = Session::new(config(6, 100)).unwrap();
        assert_eq!(session.clear(), Redraw::Cells(vec![]));

        let redraw = session.randomize_with(&mut StdRng::seed_from_u64(3));
        let live = session
            .grid()
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == life_common::world::ALIVE)
            .map(|(index, _)| index as u32)
            .collect::<Vec<_>>();
        assert_eq!(redraw, Redraw::Cells(live.clone()));

        assert_eq!(session.clear(), Redraw::Cells(live));
        assert_eq!(session.grid().live_count(), 0);
    }

    #[test]
    fn patterns_replace_the_grid() {
        let mut session = Session::new(config(5, 100)).unwrap();
        session.toggle_cell(0, 0).unwrap();
        let redraw = session.apply_pattern("blinker").unwrap();
        assert_eq!(redraw, Redraw::Cells(vec![0, 11, 12, 13]));
        assert!(session.apply_pattern("nope").is_err());
        assert!(session.apply_pattern("beacon").is_ok());
        assert!(Session::new(config(3, 100))
            .unwrap()
            .apply_pattern("beacon")
            .is_err());
    }

    #[test]
    fn cell_size_change_keeps_the_grid() {
        let mut session = Session::new(config(5, 100)).unwrap();
        session.toggle_cell(1, 1).unwrap();
        assert_eq!(session.set_cell_size(4).unwrap(), Redraw::Full);
        assert_eq!(session.config().cell_size, 4);
        assert_eq!(session.grid().live_count(), 1);
        assert!(session.set_cell_size(0).is_err());
        assert_eq!(session.config().cell_size, 4);
    }

    #[test]
    fn dispatch_routes_commands() {
        let mut session = Session::new(config(5, 0)).unwrap();
        let now = Instant::now();
        assert_eq!(
            session
                .dispatch(Command::ToggleCell { x: 1, y: 0 }, now)
                .unwrap(),
            Some(Redraw::Cells(vec![1]))
        );
        assert_eq!(session.dispatch(Command::Start, now).unwrap(), None);
        assert!(session.is_running());
        assert_eq!(session.dispatch(Command::SetSpeed(25), now).unwrap(), None);
        assert_eq!(session.config().speed_ms, 25);
        assert_eq!(
            session.dispatch(Command::SetCellSize(3), now).unwrap(),
            Some(Redraw::Full)
        );
        assert_eq!(
            session.dispatch(Command::Resize(7), now).unwrap(),
            Some(Redraw::Full)
        );
        session.dispatch(Command::Stop, now).unwrap();
        assert!(!session.has_engine());
        assert!(matches!(
            session.dispatch(Command::Start, now),
            Err(Error::EngineNotReady)
        ));
        session.dispatch(Command::InitEngine, now).unwrap();
        assert!(session.has_engine());
        assert!(session
            .dispatch(Command::Pattern("glider".to_string()), now)
            .unwrap()
            .is_some());
        assert!(session
            .dispatch(Command::Click { x: 1.0, y: 1.0 }, now)
            .is_ok());
    }
}
