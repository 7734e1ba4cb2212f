//! Terminal 2048 runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer.
//! Configuration comes from `T2048_*` environment variables (see
//! [`tui_2048::AppConfig`]).

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tui_2048::core::{Game, GameSnapshot};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{GameView, Hud, TerminalRenderer, Viewport};
use tui_2048::types::{GameAction, GameEvent};
use tui_2048::{AppConfig, SaveFile, SaveStore};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let store = config.save_path.clone().map(SaveStore::new);
    if let Some(store) = store.as_ref() {
        info!(path = %store.path().display(), "using save file");
    }
    let mut save = match store.as_ref().map(SaveStore::load).transpose() {
        Ok(file) => file.unwrap_or_default(),
        Err(err) => {
            warn!(error = %err, "ignoring unreadable save file");
            SaveFile::default()
        }
    };

    let mut game = Game::with_config(config.engine_config(), config.seed_or_clock())
        .context("invalid board configuration")?;
    if let Some(session) = save.session.as_ref() {
        if let Err(err) = game.restore_saved(session) {
            info!(%err, "saved session rejected, starting a new game");
        }
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &mut save, store.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();
    let persisted = persist(&game, &mut save, store.as_ref());
    result.and(persisted)
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    info!(path = %path.display(), "logging started");
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut Game,
    save: &mut SaveFile,
    store: Option<&SaveStore>,
) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        let hud = Hud {
            best_score: save.best_score,
        };
        let fb = view.render(&snap, hud, Viewport::new(w, h));
        term.draw(&fb)?;

        // Every swipe is driven by a key press; block until the next one.
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                let events = game.apply_action(action);
                let accepted = matches!(action, GameAction::Restart)
                    || events.contains(&GameEvent::MoveCompleted { changed: true });
                if accepted {
                    if let Err(err) = persist(game, save, store) {
                        warn!(error = %err, "failed to save");
                    }
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}

/// Record the best score and write the session. Finished games are not kept.
fn persist(game: &Game, save: &mut SaveFile, store: Option<&SaveStore>) -> Result<()> {
    save.record_score(game.score());
    save.session = if game.game_over() {
        None
    } else {
        Some(game.saved())
    };
    match store {
        Some(store) => store.save(save),
        None => Ok(()),
    }
}
