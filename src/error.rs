use thiserror::Error;

/// Failures of the booking operation, in the order they are checked: the
/// caller must be logged in, the duration must come from the supported set,
/// the machine must exist, and it must currently be idle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("login required before booking a machine")]
    NotAuthenticated,
    #[error("unsupported duration: {0} minutes")]
    InvalidDuration(u32),
    #[error("no machine with id {0}")]
    MachineNotFound(u32),
    #[error("machine {0} is not available")]
    MachineUnavailable(u32),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResetError {
    #[error("no machine with id {0}")]
    MachineNotFound(u32),
    #[error("machine {0} has no finished cycle to collect")]
    MachineNotDone(u32),
}
