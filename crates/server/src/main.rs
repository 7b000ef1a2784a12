mod options;

use std::time::Duration;

use life_game::{Command, FrameBuffer, Game, Session};
use tracing::{debug, info};

use crate::options::{Seed, Settings};

const DEFAULT_FILTER: &str = "life_server=info,life_game=info,life_engine=info,life_common=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::layer::SubscriberExt;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(DEFAULT_FILTER))?;
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(filter),
    )?;

    let matches = options::app().get_matches();
    let settings = options::settings(&matches)?;
    let game = setup_game(&settings)?;

    let gameloop = tokio::spawn(run(game, settings.generations, settings.print));

    tokio::select! {
        result = gameloop => {
            let game = result??;
            let session = game.session();
            info!(
                "finished after {} generations, {} live cells, last step took {:?}",
                session.generation(),
                session.grid().live_count(),
                session.last_step_time().unwrap_or_default(),
            );
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
        }
    }

    Ok(())
}

fn setup_game(settings: &Settings) -> anyhow::Result<Game<FrameBuffer>> {
    debug!("setting up session");
    let mut session = Session::with_engine_latency(settings.config, settings.latency)?;
    match &settings.seed {
        Seed::Empty => {}
        Seed::Random => {
            session.randomize();
        }
        Seed::Pattern(name) => {
            session.apply_pattern(name)?;
        }
    }
    Ok(Game::with_session(session, FrameBuffer::new()))
}

async fn run(
    mut game: Game<FrameBuffer>,
    generations: Option<u64>,
    print: bool,
) -> anyhow::Result<Game<FrameBuffer>> {
    let poll = Duration::from_millis(1);
    let mut shown = None;

    game.handle(Command::Start)?;
    debug!("starting game loop");
    loop {
        game.update()?;

        let generation = game.session().generation();
        if print && shown != Some(generation) {
            print_frame(&game);
            shown = Some(generation);
        }
        if generations.map_or(false, |target| generation >= target) {
            game.handle(Command::Stop)?;
            return Ok(game);
        }

        tokio::task::yield_now().await;
        let wait = game
            .session()
            .next_tick_in(instant::Instant::now())
            .map_or(poll, |remaining| remaining.max(poll).min(poll * 16));
        tokio::time::sleep(wait).await;
    }
}

fn print_frame(game: &Game<FrameBuffer>) {
    let session = game.session();
    println!(
        "generation {} ({} alive)",
        session.generation(),
        session.grid().live_count()
    );
    print!("{}", game.renderer().surface().to_ascii(game.geometry()));
}
