pub mod render;
pub mod session;

use std::time::Duration;

use instant::Instant;
use life_common::SimulationConfig;
use tracing::debug;

pub use render::{CellGeometry, ChangeRenderer, FrameBuffer, Surface};
pub use session::{Command, Redraw, RunState, Session};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("step engine is not initialized")]
    EngineNotReady,
    #[error(transparent)]
    Common(#[from] life_common::Error),
    #[error(transparent)]
    Engine(#[from] life_engine::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A session wired to a renderer: every redraw a session operation asks for
/// is painted on the surface.
#[derive(Debug)]
pub struct Game<S> {
    session: Session,
    renderer: ChangeRenderer<S>,
}

impl<S: Surface> Game<S> {
    pub fn new(config: SimulationConfig, surface: S) -> Result<Self> {
        Ok(Self::with_session(Session::new(config)?, surface))
    }

    pub fn with_session(session: Session, surface: S) -> Self {
        let mut game = Self {
            session,
            renderer: ChangeRenderer::new(surface),
        };
        debug!("drawing initial grid");
        game.paint(Some(Redraw::Full));
        game
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renderer(&self) -> &ChangeRenderer<S> {
        &self.renderer
    }

    pub fn geometry(&self) -> CellGeometry {
        CellGeometry::from(self.session.config())
    }

    pub fn handle(&mut self, command: Command) -> Result<()> {
        self.handle_at(command, Instant::now())
    }

    pub fn handle_at(&mut self, command: Command, now: Instant) -> Result<()> {
        let redraw = self.session.dispatch(command, now)?;
        self.paint(redraw);
        Ok(())
    }

    pub fn update(&mut self) -> Result<()> {
        self.update_at(Instant::now())
    }

    pub fn update_at(&mut self, now: Instant) -> Result<()> {
        let redraw = self.session.update_at(now)?;
        self.paint(redraw);
        Ok(())
    }

    /// Waits for the step in flight, if any. Returns whether one was applied.
    pub fn await_step(&mut self, timeout: Duration) -> Result<bool> {
        let redraw = self.session.await_step(timeout)?;
        let applied = redraw.is_some();
        self.paint(redraw);
        Ok(applied)
    }

    fn paint(&mut self, redraw: Option<Redraw>) {
        if let Some(redraw) = redraw {
            let geometry = self.geometry();
            self.renderer.render(&redraw, self.session.grid(), geometry);
        }
    }
}
