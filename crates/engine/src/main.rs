//! Alibi Engine - headless entry point.
//!
//! Loads a snapshot, logs the derived timeline views and optionally writes a
//! fresh export. Everything is configured through the environment
//! (see `settings.rs`).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alibi_engine::clock::SystemClock;
use alibi_engine::{snapshot, EngineSettings, Session};

fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alibi_engine=debug,alibi_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Alibi Engine {}", snapshot::APP_VERSION);

    let settings = EngineSettings::from_env()?;
    tracing::info!(policy = %settings.reference_policy, "Loaded settings");

    let mut session = Session::new(settings.reference_policy);
    if let Some(path) = &settings.snapshot_path {
        snapshot::read_file(&mut session, path)?;
    }

    let report = session.refresh_event_references();
    if !report.is_empty() {
        tracing::warn!(events = report.len(), "Some events reference removed entries");
    }

    log_summary(&session);

    if let Some(dir) = &settings.export_dir {
        let path = snapshot::write_to_dir(&session, dir, &SystemClock::new())?;
        tracing::info!("Export written to {}", path.display());
    }

    Ok(())
}

fn log_summary(session: &Session) {
    let grid = session.time_grid();
    tracing::info!(
        scenario = %session.scenario().name,
        characters = session.config().characters.len(),
        places = session.config().places.len(),
        events = session.events().len(),
        slots = grid.len(),
        days = grid.day_count(),
        "Session loaded"
    );

    let alibis = session.alibi_map();
    for slot in alibis.slots().iter().filter(|slot| !slot.events.is_empty()) {
        let names: Vec<&str> = slot.characters().iter().map(|c| c.name.as_str()).collect();
        tracing::debug!(
            slot = %slot.start,
            events = slot.events.len(),
            "Active: {}",
            names.join(", ")
        );
    }

    for marker in session.resolved_markers().iter().filter(|m| m.is_dangling()) {
        tracing::warn!(place_id = %marker.place_id, "Map marker points at a removed place");
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
