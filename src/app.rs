use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use log::info;
use tokio::sync::broadcast;

use crate::error::{BookingError, ResetError};
use crate::events::{AppEvent, EventHub};
use crate::models::{UserProfile, DEFAULT_MACHINE_COUNT};
use crate::registry::{BoardSnapshot, MachineRegistry};
use crate::session::SessionStore;
use crate::timer::CycleController;

/// The operation surface the view layer talks to: login/logout, book, reset,
/// snapshot, and an event subscription. Holds the session store and the
/// cycle controller, nothing else.
pub struct LaundryApp {
    session: SessionStore,
    cycle: CycleController,
    events: EventHub,
}

impl LaundryApp {
    /// Builds the app around a fresh four-machine board and the session file
    /// at `session_path`. The cycle ticker is not running yet; call
    /// [`LaundryApp::start`].
    pub fn new(session_path: PathBuf) -> Result<Self> {
        Self::with_tick_interval(session_path, Duration::from_secs(1))
    }

    pub fn with_tick_interval(session_path: PathBuf, tick_interval: Duration) -> Result<Self> {
        let session = SessionStore::new(session_path)?;
        if let Some(profile) = session.current() {
            info!("restored session for {}", profile.name);
        }

        let events = EventHub::new();
        let registry = MachineRegistry::new(DEFAULT_MACHINE_COUNT);
        let cycle = CycleController::with_tick_interval(registry, events.clone(), tick_interval);

        Ok(Self {
            session,
            cycle,
            events,
        })
    }

    /// Starts the one-second cycle ticker.
    pub async fn start(&self) -> Result<()> {
        self.cycle.start().await
    }

    /// Stops the ticker; machine state stays frozen until the process exits.
    pub async fn shutdown(&self) -> Result<()> {
        self.cycle.shutdown().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }

    pub fn login(&self, profile: UserProfile) -> Result<()> {
        info!("logging in {}", profile.name);
        self.session.login(profile)
    }

    pub fn logout(&self) -> Result<()> {
        info!("logging out");
        self.session.logout()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.current()
    }

    /// Books a machine for the logged-in user. The occupant comes from the
    /// session store; without a session this is `NotAuthenticated` before
    /// anything else is looked at.
    pub async fn book(
        &self,
        machine_id: u32,
        duration_minutes: u32,
        time_slot: Option<String>,
    ) -> Result<(), BookingError> {
        let profile = self
            .session
            .current()
            .ok_or(BookingError::NotAuthenticated)?;
        self.cycle
            .book(machine_id, duration_minutes, &profile.name, time_slot)
            .await
    }

    /// Collects a finished load, returning the machine to the pool.
    pub async fn reset(&self, machine_id: u32) -> Result<(), ResetError> {
        self.cycle.reset(machine_id).await
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        self.cycle.get_snapshot().await
    }
}
