//! Secret string type for account passwords.
//!
//! Keeps passwords out of debug output, logs and error messages.

use serde::Deserialize;
use std::fmt;

/// A password or other credential that must never be printed.
///
/// `Debug` and `Display` show `[REDACTED]`; reading the value requires an
/// explicit [`expose_secret`](Self::expose_secret) call. The buffer is
/// cleared on drop (best-effort).
///
/// # Example
/// ```
/// use mms_gate::util::SecretString;
///
/// let password = SecretString::new("admin123");
/// assert_eq!(format!("{:?}", password), "[REDACTED]");
/// assert!(password.matches("admin123"));
/// ```
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Explicitly expose the secret value.
    #[inline]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Compare against a candidate without short-circuiting on the first
    /// differing byte.
    pub fn matches(&self, candidate: &str) -> bool {
        let stored = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        if stored.len() != candidate.len() {
            return false;
        }
        stored
            .iter()
            .zip(candidate)
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // Best-effort only; earlier copies may still exist in memory.
        self.0.clear();
        self.0.shrink_to_fit();
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString::new)
    }
}
