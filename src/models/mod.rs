pub mod machine;
pub mod user;

pub use machine::{
    format_remaining, Machine, MachineStatus, DEFAULT_MACHINE_COUNT, SUPPORTED_DURATIONS_MIN,
};
pub use user::UserProfile;
