//! Time source for token issuance and expiry checks.

use std::time::{SystemTime, UNIX_EPOCH};

use super::JwtError;

/// Source of the current Unix time in seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<u64, JwtError>;
}

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u64, JwtError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|_| JwtError::TimeError)
    }
}

/// Clock pinned to a fixed instant. Used to make issuance reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> Result<u64, JwtError> {
        Ok(self.0)
    }
}
