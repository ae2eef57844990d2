//! Utility functions shared across the crate.

mod secret;

pub use secret::SecretString;

use std::path::PathBuf;

/// Expand `~` and `$VAR` references in a configured path.
///
/// Falls back to the literal path when a variable cannot be resolved.
pub fn expand_path(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(path).as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_keeps_plain_paths() {
        assert_eq!(
            expand_path("/etc/mms-gate/config.toml"),
            PathBuf::from("/etc/mms-gate/config.toml")
        );
    }

    #[test]
    fn test_expand_path_unknown_variable_falls_back() {
        let path = expand_path("/tmp/$MMS_GATE_SURELY_UNSET_VAR/session.json");
        assert_eq!(
            path,
            PathBuf::from("/tmp/$MMS_GATE_SURELY_UNSET_VAR/session.json")
        );
    }
}
