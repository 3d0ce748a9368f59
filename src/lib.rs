//! Booking and cycle-timer core for a fleet of shared washing machines.
//!
//! A user logs in (file-backed session), books an available machine for one
//! of the supported durations, and a single periodic ticker counts every
//! occupied machine down. A finished machine sits in `done` until someone
//! collects the load and resets it. All state is in memory; only the session
//! survives a restart.

pub mod app;
pub mod error;
pub mod events;
pub mod models;
pub mod registry;
pub mod session;
pub mod timer;

pub use app::LaundryApp;
pub use error::{BookingError, ResetError};
pub use events::{AppEvent, EventHub, Notification, Severity};
pub use models::{
    format_remaining, Machine, MachineStatus, UserProfile, DEFAULT_MACHINE_COUNT,
    SUPPORTED_DURATIONS_MIN,
};
pub use registry::{BoardSnapshot, CycleCompletion, MachineRegistry, TickOutcome};
pub use session::SessionStore;
pub use timer::CycleController;
