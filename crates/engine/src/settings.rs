//! Engine settings read from the environment.
//!
//! `.env.local` and `.env` at the repository root are loaded first (see
//! `main.rs`); real environment variables win over both.

use std::path::PathBuf;

use alibi_domain::common::StringExt;
use alibi_domain::ReferencePolicy;

use crate::error::EngineError;

pub const SNAPSHOT_PATH_VAR: &str = "ALIBI_SNAPSHOT_PATH";
pub const EXPORT_DIR_VAR: &str = "ALIBI_EXPORT_DIR";
pub const REFERENCE_POLICY_VAR: &str = "ALIBI_REFERENCE_POLICY";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    /// Snapshot imported on start.
    pub snapshot_path: Option<PathBuf>,
    /// Directory an export is written to before exit.
    pub export_dir: Option<PathBuf>,
    pub reference_policy: ReferencePolicy,
}

impl EngineSettings {
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EngineError> {
        let read = |key: &str| lookup(key).and_then(StringExt::into_option);

        let reference_policy = match read(REFERENCE_POLICY_VAR) {
            Some(value) => value.parse()?,
            None => ReferencePolicy::default(),
        };

        Ok(Self {
            snapshot_path: read(SNAPSHOT_PATH_VAR).map(PathBuf::from),
            export_dir: read(EXPORT_DIR_VAR).map(PathBuf::from),
            reference_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let settings = EngineSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.reference_policy, ReferencePolicy::Tolerate);
    }

    #[test]
    fn reads_paths_and_policy() {
        let settings = EngineSettings::from_lookup(lookup(&[
            (SNAPSHOT_PATH_VAR, "/tmp/manor.json"),
            (EXPORT_DIR_VAR, "/tmp/out"),
            (REFERENCE_POLICY_VAR, "reject"),
        ]))
        .unwrap();
        assert_eq!(settings.snapshot_path, Some(PathBuf::from("/tmp/manor.json")));
        assert_eq!(settings.export_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(settings.reference_policy, ReferencePolicy::Reject);
    }

    #[test]
    fn blank_values_are_unset() {
        let settings =
            EngineSettings::from_lookup(lookup(&[(SNAPSHOT_PATH_VAR, "  "), (REFERENCE_POLICY_VAR, "")]))
                .unwrap();
        assert_eq!(settings.snapshot_path, None);
        assert_eq!(settings.reference_policy, ReferencePolicy::Tolerate);
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let err = EngineSettings::from_lookup(lookup(&[(REFERENCE_POLICY_VAR, "lenient")]))
            .unwrap_err();
        assert!(matches!(err, EngineError::Domain(_)));
    }
}
