use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::DiscProfile;
use crate::error::{Error, Result};

/// Profiles compiled into the crate, keyed by disc code.
const BUILTIN: &[(&str, &str)] = &[
    ("cd1", include_str!("discs/cd1.yaml")),
    ("cd5", include_str!("discs/cd5.yaml")),
    ("dd2", include_str!("discs/dd2.yaml")),
    ("fd2", include_str!("discs/fd2.yaml")),
];

// ---------------------------------------------------------------------------
// Profile registry: key -> shared, read-only profile
// ---------------------------------------------------------------------------

/// Owned mapping from profile key to loaded profile.
///
/// Built once and passed to whoever needs profiles; the `Arc`s can be handed
/// to any number of concurrent simulations.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, Arc<DiscProfile>>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The discs bundled with the crate.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for (key, yaml) in BUILTIN {
            registry.insert(DiscProfile::from_yaml_str(key, yaml)?);
        }
        Ok(registry)
    }

    /// Every `*.yaml` file in `dir`, keyed by file stem.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir)
            .map_err(|_| Error::ProfileNotFound(dir.display().to_string()))?;
        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().map(|ext| ext == "yaml").unwrap_or(false))
            .collect();
        paths.sort();

        let mut registry = Self::new();
        for path in paths {
            registry.insert(DiscProfile::from_file(&path)?);
        }
        debug!(dir = %dir.display(), count = registry.len(), "loaded disc profiles");
        Ok(registry)
    }

    /// Add or replace a profile under its own key.
    pub fn insert(&mut self, profile: DiscProfile) -> Arc<DiscProfile> {
        let profile = Arc::new(profile);
        self.profiles
            .insert(profile.key().to_string(), Arc::clone(&profile));
        profile
    }

    pub fn get(&self, key: &str) -> Result<Arc<DiscProfile>> {
        self.profiles
            .get(key)
            .cloned()
            .ok_or_else(|| Error::ProfileNotFound(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_discs_load() {
        let reg = ProfileRegistry::builtin().unwrap();
        let keys: Vec<&str> = reg.keys().collect();
        assert_eq!(keys, vec!["cd1", "cd5", "dd2", "fd2"]);
        let firebird = reg.get("cd1").unwrap();
        assert_eq!(firebird.name(), "Innova Firebird");
        assert!(firebird.mass() > 0.0);
    }

    #[test]
    fn unknown_key_is_not_found() {
        let reg = ProfileRegistry::builtin().unwrap();
        assert!(matches!(reg.get("zz9"), Err(Error::ProfileNotFound(k)) if k == "zz9"));
    }

    #[test]
    fn profiles_are_shared() {
        let reg = ProfileRegistry::builtin().unwrap();
        let a = reg.get("dd2").unwrap();
        let b = reg.get("dd2").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn from_dir_reads_yaml_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("mine.yaml"),
            "name: Mine\nmass: 0.17\ndiameter: 0.21\ncoefficients:\n  - [-10, -0.3, 0.1, 0.0]\n  - [10, 0.5, 0.1, 0.0]\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let reg = ProfileRegistry::from_dir(dir.path()).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("mine").unwrap().name(), "Mine");
    }

    #[test]
    fn from_dir_surfaces_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.yaml"), "name: Bad\nmass: 0.17\n").unwrap();
        let err = ProfileRegistry::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ProfileMalformed { key, .. } if key == "bad"));
    }
}
