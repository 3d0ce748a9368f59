use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use log::info;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::error::{BookingError, ResetError};
use crate::events::{AppEvent, EventHub, Notification};
use crate::models::Machine;
use crate::registry::{BoardSnapshot, MachineRegistry};

/// Owns the machine registry and the one periodic task that moves its clocks.
///
/// Every mutation, user-initiated or tick-driven, goes through the registry
/// mutex, so a tick and a booking on the same machine can never interleave.
#[derive(Clone)]
pub struct CycleController {
    registry: Arc<Mutex<MachineRegistry>>,
    events: EventHub,
    ticker: Arc<Mutex<Option<TickerHandle>>>,
    tick_interval: Duration,
}

struct TickerHandle {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl CycleController {
    pub fn new(registry: MachineRegistry, events: EventHub) -> Self {
        Self::with_tick_interval(registry, events, Duration::from_secs(1))
    }

    /// Same controller with a non-standard cadence; the countdown still moves
    /// one second of machine time per tick.
    pub fn with_tick_interval(
        registry: MachineRegistry,
        events: EventHub,
        tick_interval: Duration,
    ) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
            events,
            ticker: Arc::new(Mutex::new(None)),
            tick_interval,
        }
    }

    /// Spawns the periodic tick task. Called once when the board goes live;
    /// a second call while the ticker is running is an error.
    pub async fn start(&self) -> Result<()> {
        let mut ticker_guard = self.ticker.lock().await;
        if ticker_guard.is_some() {
            bail!("cycle ticker already running");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();
        let controller = self.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(controller.tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        controller.run_tick().await;
                    }
                    _ = token_clone.cancelled() => {
                        info!("cycle ticker shutting down");
                        break;
                    }
                }
            }
        });

        *ticker_guard = Some(TickerHandle {
            handle,
            cancel_token,
        });
        Ok(())
    }

    /// Cancels the tick task and waits for it to finish, so no mutation can
    /// land after teardown.
    pub async fn shutdown(&self) -> Result<()> {
        let Some(ticker) = self.ticker.lock().await.take() else {
            return Ok(());
        };
        ticker.cancel_token.cancel();
        ticker
            .handle
            .await
            .context("cycle ticker task failed to join")
    }

    /// One pass of the countdown: every occupied machine loses a second, and
    /// machines reaching zero go to `done` with a completion event apiece.
    pub async fn run_tick(&self) {
        let (outcome, board) = {
            let mut registry = self.registry.lock().await;
            let outcome = registry.tick();
            (outcome, registry.board_snapshot())
        };

        for completion in &outcome.completions {
            info!(
                "machine {} finished its cycle (occupant: {})",
                completion.machine_id,
                completion.occupant_name.as_deref().unwrap_or("unknown")
            );
            self.events.emit(AppEvent::CycleCompleted {
                machine_id: completion.machine_id,
                occupant_name: completion.occupant_name.clone(),
            });
            self.events
                .emit(AppEvent::Toast(Notification::cycle_completed(
                    completion.machine_id,
                )));
        }

        if outcome.changed_anything() {
            self.events.emit(AppEvent::StateChanged(board));
        }
    }

    pub async fn book(
        &self,
        machine_id: u32,
        duration_minutes: u32,
        occupant_name: &str,
        time_slot: Option<String>,
    ) -> Result<(), BookingError> {
        let board = {
            let mut registry = self.registry.lock().await;
            registry.book(machine_id, duration_minutes, occupant_name, time_slot)?;
            registry.board_snapshot()
        };

        info!("machine {machine_id} booked for {duration_minutes} minutes by {occupant_name}");
        self.events
            .emit(AppEvent::Toast(Notification::booking_succeeded(
                machine_id,
                duration_minutes,
            )));
        self.events.emit(AppEvent::StateChanged(board));
        Ok(())
    }

    pub async fn reset(&self, machine_id: u32) -> Result<(), ResetError> {
        let board = {
            let mut registry = self.registry.lock().await;
            registry.reset(machine_id)?;
            registry.board_snapshot()
        };

        info!("machine {machine_id} collected and returned to the pool");
        self.events.emit(AppEvent::StateChanged(board));
        Ok(())
    }

    pub async fn get_machine(&self, machine_id: u32) -> Option<Machine> {
        self.registry.lock().await.get(machine_id).cloned()
    }

    pub async fn get_snapshot(&self) -> BoardSnapshot {
        self.registry.lock().await.board_snapshot()
    }
}
