pub mod auth;
pub mod recommend;
pub mod repl;
pub mod suggest;

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tokio::sync::mpsc;

use waypoint_api::ApiClient;
use waypoint_core::config::ClientConfig;
use waypoint_core::credentials::CredentialStore;
use waypoint_infrastructure::TomlCredentialStore;
use waypoint_recorder::{RecorderEvent, RecordingController};

/// Shared command context: API client, recorder, and its event stream.
pub struct App {
    pub client: ApiClient,
    pub store: Arc<TomlCredentialStore>,
    pub recorder: Arc<RecordingController>,
    pub events: mpsc::UnboundedReceiver<RecorderEvent>,
}

impl App {
    /// Wires the client stack from environment config and the persisted
    /// credential store.
    pub async fn build() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        let store = Arc::new(TomlCredentialStore::open_default().await?);
        let client = ApiClient::new(config, store.clone())?;

        let (sender, events) = mpsc::unbounded_channel();
        let recorder = Arc::new(RecordingController::with_events(
            Arc::new(client.testing().clone()),
            sender,
        ));

        Ok(Self {
            client,
            store,
            recorder,
            events,
        })
    }

    /// The logged-in user's id, if a session is stored.
    pub async fn user_id(&self) -> Option<i64> {
        self.store.get().await.map(|c| c.user.id)
    }

    /// Prints any pending recorder notifications.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            println!("{}", format_event(&event));
        }
    }
}

fn format_event(event: &RecorderEvent) -> String {
    match event {
        RecorderEvent::TestModeEnabled => "Test mode enabled".green().to_string(),
        RecorderEvent::TestModeDisabled => "Test mode disabled".normal().to_string(),
        RecorderEvent::DisableQueued => {
            "Test mode will turn off once the stop finishes".yellow().to_string()
        }
        RecorderEvent::RecordingStarted { session_id } => {
            format!("{} (session {session_id})", "Recording started".red().bold())
        }
        RecorderEvent::StartFailed { reason } => {
            format!("{}: {reason}", "Failed to start recording".red())
        }
        RecorderEvent::InteractionLogged { capability, total } => {
            format!("Logged {capability} interaction ({total} total)")
                .dimmed()
                .to_string()
        }
        RecorderEvent::LogFailed { reason } => {
            format!("{}: {reason}", "Interaction not recorded".yellow())
        }
        RecorderEvent::RecordingStopped { session_id } => {
            format!("{} (session {session_id})", "Recording stopped".green())
        }
        RecorderEvent::StopFailed { reason } => {
            format!("{}: {reason}", "Failed to stop recording".red())
        }
    }
}
