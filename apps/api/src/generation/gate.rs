//! Single-flight guard for generation requests.
//!
//! A second request while one is running is rejected, not queued. The permit
//! releases the gate when dropped, including on error paths.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::errors::AppError;

pub type GenerationPermit = OwnedSemaphorePermit;

#[derive(Debug, Clone)]
pub struct GenerationGate {
    semaphore: Arc<Semaphore>,
}

impl Default for GenerationGate {
    fn default() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
        }
    }
}

impl GenerationGate {
    /// Takes the only permit, or fails with `Busy` if a generation holds it.
    pub fn try_acquire(&self) -> Result<GenerationPermit, AppError> {
        self.semaphore
            .clone()
            .try_acquire_owned()
            .map_err(|_| AppError::Busy)
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.semaphore.available_permits() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_permit_dropped() {
        let gate = GenerationGate::default();
        let permit = gate.try_acquire().expect("first acquire succeeds");
        assert!(gate.is_busy());
        assert!(matches!(gate.clone().try_acquire(), Err(AppError::Busy)));

        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_ok());
    }
}
