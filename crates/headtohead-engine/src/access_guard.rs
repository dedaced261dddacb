//! Pause gate.
//!
//! Every mutating entry point checks the gate before anything else. Only
//! the administrator can close or reopen it.

use headtohead_types::{Address, HeadToHeadError, Result};

/// Administrator-controlled pause switch.
pub struct AccessGuard {
    admin: Address,
    paused: bool,
}

impl AccessGuard {
    /// Create a running (unpaused) guard administered by `admin`.
    #[must_use]
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            paused: false,
        }
    }

    #[must_use]
    pub fn admin(&self) -> Address {
        self.admin
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Close the gate.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the administrator
    /// - `Paused` if the gate is already closed
    pub fn pause(&mut self, caller: Address) -> Result<()> {
        self.ensure_admin(caller)?;
        self.ensure_not_paused()?;
        self.paused = true;
        Ok(())
    }

    /// Reopen the gate.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the administrator
    /// - `NotPaused` if the gate is already open
    pub fn unpause(&mut self, caller: Address) -> Result<()> {
        self.ensure_admin(caller)?;
        if !self.paused {
            return Err(HeadToHeadError::NotPaused);
        }
        self.paused = false;
        Ok(())
    }

    /// Guard a mutating call. Returns `Ok(())` if the engine is running,
    /// or [`HeadToHeadError::Paused`] if it is not.
    pub fn ensure_not_paused(&self) -> Result<()> {
        if self.paused {
            Err(HeadToHeadError::Paused)
        } else {
            Ok(())
        }
    }

    fn ensure_admin(&self, caller: Address) -> Result<()> {
        if caller == self.admin {
            Ok(())
        } else {
            Err(HeadToHeadError::Unauthorized(caller))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Address {
        Address::from_low_u64(0xad)
    }

    #[test]
    fn starts_running() {
        let guard = AccessGuard::new(admin());
        assert!(!guard.is_paused());
        assert!(guard.ensure_not_paused().is_ok());
        assert_eq!(guard.admin(), admin());
    }

    #[test]
    fn admin_pauses_and_unpauses() {
        let mut guard = AccessGuard::new(admin());
        guard.pause(admin()).unwrap();
        assert!(guard.is_paused());
        let err = guard.ensure_not_paused().unwrap_err();
        assert!(matches!(err, HeadToHeadError::Paused));

        guard.unpause(admin()).unwrap();
        assert!(!guard.is_paused());
    }

    #[test]
    fn stranger_cannot_toggle() {
        let mut guard = AccessGuard::new(admin());
        let stranger = Address::random();
        assert!(matches!(
            guard.pause(stranger).unwrap_err(),
            HeadToHeadError::Unauthorized(a) if a == stranger
        ));
        guard.pause(admin()).unwrap();
        assert!(guard.unpause(stranger).is_err());
        assert!(guard.is_paused());
    }

    #[test]
    fn redundant_toggles_rejected() {
        let mut guard = AccessGuard::new(admin());
        assert!(matches!(
            guard.unpause(admin()).unwrap_err(),
            HeadToHeadError::NotPaused
        ));
        guard.pause(admin()).unwrap();
        assert!(matches!(
            guard.pause(admin()).unwrap_err(),
            HeadToHeadError::Paused
        ));
    }
}
