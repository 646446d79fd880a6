//! Static-password admin gate.
//!
//! A capability check with a single shared secret: plain equality, no
//! session boundary, no lockout, no expiry. This is deliberately not a
//! security boundary — real authentication is outside the scope of
//! this system.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ChangeMoneyError, Result};

/// Gate holding the expected admin password.
#[derive(Debug)]
pub struct AdminGate {
    /// The configured shared secret.
    expected: SecretString,
}

impl AdminGate {
    /// Creates a gate expecting the given password.
    #[inline]
    #[must_use]
    pub fn new<T: Into<String>>(expected: T) -> Self {
        Self {
            expected: SecretString::from(expected.into()),
        }
    }

    /// Checks an attempt against the expected password.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeMoneyError::Unauthorized`] when the attempt
    /// does not match.
    #[inline]
    pub fn login(&self, attempt: &str) -> Result<AdminSession> {
        if self.expected.expose_secret() == attempt {
            tracing::debug!("admin login accepted");
            Ok(AdminSession(()))
        } else {
            tracing::debug!("admin login rejected");
            Err(ChangeMoneyError::Unauthorized)
        }
    }
}

/// Proof value for a passed gate check.
///
/// Holding one means the password matched at some point; there is no
/// expiry or revocation to track.
#[derive(Debug)]
pub struct AdminSession(());

impl AdminSession {
    /// Ends the session by consuming the proof value.
    #[inline]
    pub fn logout(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_logs_in() {
        let gate = AdminGate::new("s3cret");
        assert!(gate.login("s3cret").is_ok());
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let gate = AdminGate::new("s3cret");
        let result = gate.login("guess");
        assert!(matches!(result, Err(ChangeMoneyError::Unauthorized)));
    }

    #[test]
    fn empty_attempt_against_empty_expected_matches() {
        // Degenerate but consistent: the gate is equality, nothing more.
        let gate = AdminGate::new("");
        assert!(gate.login("").is_ok());
    }

    #[test]
    fn login_logout_cycle() {
        let gate = AdminGate::new("pw");
        let session = gate.login("pw").unwrap();
        session.logout();
        // A new login is always possible after logout.
        assert!(gate.login("pw").is_ok());
    }

    #[test]
    fn debug_does_not_leak_the_secret() {
        let gate = AdminGate::new("s3cret");
        let printed = format!("{gate:?}");
        assert!(!printed.contains("s3cret"));
    }
}
