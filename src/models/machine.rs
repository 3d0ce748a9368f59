use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durations a machine can be booked for, in minutes. The set is closed so
/// cycle accounting stays predictable for users.
pub const SUPPORTED_DURATIONS_MIN: [u32; 4] = [30, 45, 60, 90];

/// Number of machines the registry is seeded with at startup.
pub const DEFAULT_MACHINE_COUNT: u32 = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MachineStatus {
    Available,
    Occupied,
    Done,
}

impl Default for MachineStatus {
    fn default() -> Self {
        MachineStatus::Available
    }
}

/// One physical washing machine slot.
///
/// `remaining_seconds` is positive exactly while the machine is `Occupied`;
/// `occupant_name`, `time_slot` and `booked_at` are stamped at booking time
/// and survive into `Done` so a finished load still shows whose it is. A
/// reset wipes all of them back to the pristine record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: u32,
    pub status: MachineStatus,
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    pub occupant_name: Option<String>,
    pub time_slot: Option<String>,
    pub booked_at: Option<DateTime<Utc>>,
}

impl Machine {
    pub fn available(id: u32) -> Self {
        Self {
            id,
            status: MachineStatus::Available,
            remaining_seconds: 0,
            total_seconds: 0,
            occupant_name: None,
            time_slot: None,
            booked_at: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == MachineStatus::Available
    }

    /// Fraction of the booked cycle already elapsed, in `[0.0, 1.0]`.
    pub fn elapsed_fraction(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_seconds.saturating_sub(self.remaining_seconds);
        f64::from(elapsed) / f64::from(self.total_seconds)
    }
}

/// Clock-style rendering of a remaining time: `h:mm:ss` above an hour,
/// `m:ss` below.
pub fn format_remaining(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_remaining_under_an_hour() {
        assert_eq!(format_remaining(0), "0:00");
        assert_eq!(format_remaining(59), "0:59");
        assert_eq!(format_remaining(60), "1:00");
        assert_eq!(format_remaining(1800), "30:00");
        assert_eq!(format_remaining(3599), "59:59");
    }

    #[test]
    fn format_remaining_with_hours() {
        assert_eq!(format_remaining(3600), "1:00:00");
        assert_eq!(format_remaining(5400), "1:30:00");
        assert_eq!(format_remaining(3661), "1:01:01");
    }

    #[test]
    fn elapsed_fraction_tracks_countdown() {
        let mut machine = Machine::available(1);
        assert_eq!(machine.elapsed_fraction(), 0.0);

        machine.total_seconds = 1800;
        machine.remaining_seconds = 900;
        assert!((machine.elapsed_fraction() - 0.5).abs() < f64::EPSILON);

        machine.remaining_seconds = 0;
        assert!((machine.elapsed_fraction() - 1.0).abs() < f64::EPSILON);
    }
}
