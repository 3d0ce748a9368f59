use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::{BookingError, ResetError};
use crate::registry::BoardSnapshot;

const DEFAULT_TOAST_MS: u32 = 4_000;
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Info,
    Error,
}

/// A toast for the view layer to display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub display_duration_ms: u32,
}

impl Notification {
    pub fn booking_succeeded(machine_id: u32, duration_minutes: u32) -> Self {
        Self {
            title: "Booking Successful!".into(),
            description: format!(
                "Machine {} booked for {} minutes",
                machine_id, duration_minutes
            ),
            severity: Severity::Info,
            display_duration_ms: DEFAULT_TOAST_MS,
        }
    }

    pub fn booking_failed(err: &BookingError) -> Self {
        Self {
            title: "Booking Failed".into(),
            description: err.to_string(),
            severity: Severity::Error,
            display_duration_ms: DEFAULT_TOAST_MS,
        }
    }

    pub fn reset_failed(err: &ResetError) -> Self {
        Self {
            title: "Reset Failed".into(),
            description: err.to_string(),
            severity: Severity::Error,
            display_duration_ms: DEFAULT_TOAST_MS,
        }
    }

    pub fn cycle_completed(machine_id: u32) -> Self {
        Self {
            title: "Cycle Complete".into(),
            description: format!("Machine {} has finished its cycle", machine_id),
            severity: Severity::Info,
            display_duration_ms: DEFAULT_TOAST_MS,
        }
    }
}

/// Everything the core pushes out to the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Toast(Notification),
    StateChanged(BoardSnapshot),
    /// Emitted exactly once per finished booking; the view plays the buzzer
    /// off this one.
    CycleCompleted {
        machine_id: u32,
        occupant_name: Option<String>,
    },
}

/// Broadcast fan-out for [`AppEvent`]s. Emission never blocks and never
/// fails; with no live subscribers events are simply dropped.
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<AppEvent>,
}

impl EventHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: AppEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}
