//! Scripted park session: play, journal, replay and verify.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use park_content::{ConfigLoader, ContentFactory, RideDataLoader, ScenarioLoader};
use park_core::{
    Action, ActionRegistry, CommandFlags, GameConfig, MarketingCampaignKind, Money,
    ObjectEntryIndex, RideCreateAction, RideDataOracle, RideId, RideType,
    SetCurrentLoanAction, SetParkEntranceFeeAction, SetParkNameAction, SetRidePriceAction,
    StartMarketingCampaignAction, WorldState,
};
use park_runtime::{
    Event, FileActionLog, FileActionLogReader, Runtime, RuntimeConfig, RuntimeHandle, Topic,
    replay,
};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::CliConfig;

/// Everything loaded from content before the runtime starts.
struct Content {
    world: WorldState,
    rides: Arc<dyn RideDataOracle>,
    game_config: GameConfig,
}

impl Content {
    fn load(config: &CliConfig) -> Result<Self> {
        let scenario_path = Path::new(&config.scenario);
        let scenario = if scenario_path.extension().is_some_and(|ext| ext == "toml") {
            ScenarioLoader::load(scenario_path)?
        } else {
            ContentFactory::bundled().load_scenario(&config.scenario)?
        };
        info!(scenario = %scenario.name, "scenario loaded");

        let rides = match &config.ride_data {
            Some(path) => RideDataLoader::load(path)?,
            None => RideDataLoader::builtin()?,
        };
        let game_config = match &config.game_config {
            Some(path) => ConfigLoader::load(path)?,
            None => GameConfig::default(),
        };

        Ok(Self {
            world: scenario.into_world(),
            rides: Arc::new(rides),
            game_config,
        })
    }
}

/// Outcome of a completed session.
pub struct SessionReport {
    pub applied: usize,
    pub rejected: usize,
    pub journal: PathBuf,
    pub snapshot: PathBuf,
    pub checksum: String,
}

/// Actions a player might issue in the first minutes of a scenario.
fn script() -> Vec<Action> {
    vec![
        Action::new(RideCreateAction::new(
            RideType(0),
            ObjectEntryIndex::NULL,
            1,
            0,
        )),
        Action::new(RideCreateAction::new(RideType(2), ObjectEntryIndex(2), 0, 0)),
        Action::new(SetRidePriceAction::new(RideId(1), Money::new(2, 0), true)),
        Action::new(SetParkNameAction::new("Scripted Frontiers")),
        // Preview only; stays local and is overwritten below.
        Action::new(SetParkEntranceFeeAction::new(Money::new(40, 0)))
            .with_flags(CommandFlags::GHOST),
        Action::new(SetParkEntranceFeeAction::new(Money::new(25, 0))),
        // Above the fee ceiling.
        Action::new(SetParkEntranceFeeAction::new(Money::new(250, 0))),
        Action::new(StartMarketingCampaignAction::new(
            MarketingCampaignKind::Park,
            2,
        )),
        Action::new(SetCurrentLoanAction::new(Money::new(12_000, 0))),
    ]
}

/// Logs every event the runtime publishes until the bus closes.
fn spawn_event_logger(handle: &RuntimeHandle) -> JoinHandle<()> {
    let mut actions = handle.subscribe(Topic::Actions);
    let mut ui = handle.subscribe(Topic::Ui);

    tokio::spawn(async move {
        let mut actions_open = true;
        let mut ui_open = true;
        while actions_open || ui_open {
            let (topic, event) = tokio::select! {
                event = actions.recv(), if actions_open => (Topic::Actions, event),
                event = ui.recv(), if ui_open => (Topic::Ui, event),
            };
            match event {
                Ok(Event::Action(event)) => info!(
                    action = %event.action_type,
                    status = ?event.status,
                    error = %event.error_kind,
                    "action completed"
                ),
                Ok(event @ Event::Ui(_)) => match serde_json::to_string(&event) {
                    Ok(json) => debug!(event = %json, "ui event"),
                    Err(e) => warn!("Failed to encode ui event: {}", e),
                },
                Err(RecvError::Lagged(missed)) => warn!(?topic, missed, "event logger lagged"),
                Err(RecvError::Closed) => match topic {
                    Topic::Actions => actions_open = false,
                    Topic::Ui => ui_open = false,
                },
            }
        }
    })
}

/// Plays the script against a fresh runtime, journals it, then replays the
/// journal on the same initial world and checks both worlds agree.
pub async fn run(
    config: &CliConfig,
    session_id: &str,
    journal_dir: &Path,
) -> Result<SessionReport> {
    let content = Content::load(config)?;
    let initial_world = content.world.clone();

    std::fs::create_dir_all(journal_dir)
        .with_context(|| format!("Failed to create {}", journal_dir.display()))?;
    let journal = FileActionLog::create(journal_dir, format!("{session_id}.log"))?;
    let journal_path = journal.path().to_path_buf();

    let runtime_config = RuntimeConfig {
        game_config: content.game_config.clone(),
        command_buffer_size: config.command_buffer,
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder()
        .config(runtime_config)
        .initial_world(content.world)
        .shared_ride_data(Arc::clone(&content.rides))
        .journal(journal)
        .build()
        .await?;

    let handle = runtime.handle();
    let logger = spawn_event_logger(&handle);

    let mut applied = 0;
    let mut rejected = 0;
    for action in script() {
        let action_type = action.action_type();
        let result = handle.submit(action).await?;
        if result.is_ok() {
            applied += 1;
            info!(action = %action_type, cost = ?result.cost(), "applied");
        } else {
            rejected += 1;
            warn!(action = %action_type, error = %result.error_kind(), "rejected");
        }
    }

    let live = handle.query_world().await?;
    drop(handle);
    runtime.shutdown().await?;
    // The bus closes with the worker.
    let _ = logger.await;

    let mut reader = FileActionLogReader::open(&journal_path)?;
    let replayed = replay(
        initial_world,
        content.rides.as_ref(),
        &content.game_config,
        &ActionRegistry::with_builtin_actions(),
        &mut reader,
    )?;

    let live_checksum = live.checksum();
    let replayed_checksum = replayed.checksum();
    if live_checksum != replayed_checksum {
        bail!("replay checksum {replayed_checksum} does not match live checksum {live_checksum}");
    }
    info!(checksum = %live_checksum, "replay verified");

    let snapshot = journal_dir.join(format!("{session_id}.world.json"));
    let json = serde_json::to_string_pretty(&live)?;
    std::fs::write(&snapshot, json)
        .with_context(|| format!("Failed to write {}", snapshot.display()))?;

    Ok(SessionReport {
        applied,
        rejected,
        journal: journal_path,
        snapshot,
        checksum: live_checksum.to_string(),
    })
}
