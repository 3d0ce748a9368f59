//! In-memory registry of machines and their booking state machine.
//!
//! Per machine: `available --book--> occupied --tick reaches 0--> done
//! --reset--> available`. The registry is pure and synchronous; the cycle
//! controller owns the lock around it and drives `tick` once per second.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, ResetError};
use crate::models::{Machine, MachineStatus, SUPPORTED_DURATIONS_MIN};

/// Read-only view of the whole board, with the dashboard header counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub machines: Vec<Machine>,
    pub available_count: usize,
    pub occupied_count: usize,
    pub done_count: usize,
}

/// A booking that reached the end of its countdown on this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleCompletion {
    pub machine_id: u32,
    pub occupant_name: Option<String>,
}

/// What a single tick did, so the caller can decide which events to emit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub completions: Vec<CycleCompletion>,
    pub decremented: usize,
}

impl TickOutcome {
    pub fn changed_anything(&self) -> bool {
        self.decremented > 0 || !self.completions.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct MachineRegistry {
    machines: Vec<Machine>,
}

impl MachineRegistry {
    /// Seeds `count` available machines with ids `1..=count`. The fleet is
    /// fixed for the lifetime of the registry.
    pub fn new(count: u32) -> Self {
        Self {
            machines: (1..=count).map(Machine::available).collect(),
        }
    }

    pub fn get(&self, machine_id: u32) -> Option<&Machine> {
        self.machines.iter().find(|m| m.id == machine_id)
    }

    /// Ordered clone of every machine, for rendering.
    pub fn snapshot(&self) -> Vec<Machine> {
        self.machines.clone()
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        let count = |status: MachineStatus| {
            self.machines.iter().filter(|m| m.status == status).count()
        };
        BoardSnapshot {
            available_count: count(MachineStatus::Available),
            occupied_count: count(MachineStatus::Occupied),
            done_count: count(MachineStatus::Done),
            machines: self.snapshot(),
        }
    }

    /// Applies `transform` to exactly one machine. Unknown ids are a silent
    /// no-op so stale references from the view layer cannot wedge anything.
    pub fn update(&mut self, machine_id: u32, transform: impl FnOnce(&mut Machine)) {
        if let Some(machine) = self.machines.iter_mut().find(|m| m.id == machine_id) {
            transform(machine);
        }
    }

    /// Books an available machine. Validation order is fixed so failures are
    /// unambiguous: occupant, then duration, then machine lookup, then state.
    pub fn book(
        &mut self,
        machine_id: u32,
        duration_minutes: u32,
        occupant_name: &str,
        time_slot: Option<String>,
    ) -> Result<(), BookingError> {
        if occupant_name.trim().is_empty() {
            return Err(BookingError::NotAuthenticated);
        }
        if !SUPPORTED_DURATIONS_MIN.contains(&duration_minutes) {
            return Err(BookingError::InvalidDuration(duration_minutes));
        }

        let machine = self
            .machines
            .iter_mut()
            .find(|m| m.id == machine_id)
            .ok_or(BookingError::MachineNotFound(machine_id))?;

        if machine.status != MachineStatus::Available {
            return Err(BookingError::MachineUnavailable(machine_id));
        }

        let total = duration_minutes * 60;
        machine.status = MachineStatus::Occupied;
        machine.remaining_seconds = total;
        machine.total_seconds = total;
        machine.occupant_name = Some(occupant_name.to_string());
        machine.time_slot = time_slot;
        machine.booked_at = Some(Utc::now());
        Ok(())
    }

    /// Returns a finished machine to the pool, clearing the occupant record.
    pub fn reset(&mut self, machine_id: u32) -> Result<(), ResetError> {
        let machine = self
            .machines
            .iter_mut()
            .find(|m| m.id == machine_id)
            .ok_or(ResetError::MachineNotFound(machine_id))?;

        if machine.status != MachineStatus::Done {
            return Err(ResetError::MachineNotDone(machine_id));
        }

        *machine = Machine::available(machine_id);
        Ok(())
    }

    /// Advances every occupied machine by one second, in id order. A machine
    /// reaching zero transitions to `Done` and is reported exactly once; an
    /// occupied machine already at zero is left alone rather than underflowed.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        for machine in &mut self.machines {
            if machine.status != MachineStatus::Occupied {
                continue;
            }
            match machine.remaining_seconds {
                0 => {}
                1 => {
                    machine.remaining_seconds = 0;
                    machine.status = MachineStatus::Done;
                    outcome.completions.push(CycleCompletion {
                        machine_id: machine.id,
                        occupant_name: machine.occupant_name.clone(),
                    });
                }
                _ => {
                    machine.remaining_seconds -= 1;
                    outcome.decremented += 1;
                }
            }
        }

        outcome
    }
}
