//! Theme preference store: one persisted dark/light choice with a
//! three-tier resolution order (stored tag, ambient default, light).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::{StoragePort, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Anything other than the literal "dark" decodes to light.
    fn from_tag(tag: &str) -> Self {
        if tag == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn flipped(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// The host environment's own default (e.g. the OS-level setting),
/// consulted only when no explicit choice was persisted.
pub trait AmbientTheme: Send + Sync {
    fn preferred(&self) -> Theme;
}

/// Fixed ambient preference, for hosts without an OS-level signal and tests.
pub struct FixedAmbient(pub Theme);

impl AmbientTheme for FixedAmbient {
    fn preferred(&self) -> Theme {
        self.0
    }
}

/// The single dark-mode marker observed by the rendering layer.
///
/// Applying the same state twice is a no-op; clones share the flag.
#[derive(Clone, Default)]
pub struct DarkModeFlag(Arc<AtomicBool>);

impl DarkModeFlag {
    pub fn is_dark(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn apply(&self, theme: Theme) {
        self.0.store(theme.is_dark(), Ordering::Relaxed);
    }
}

pub struct ThemeStore {
    storage: Arc<dyn StoragePort>,
    ambient: Box<dyn AmbientTheme>,
    flag: DarkModeFlag,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn StoragePort>, ambient: Box<dyn AmbientTheme>) -> Self {
        Self {
            storage,
            ambient,
            flag: DarkModeFlag::default(),
        }
    }

    /// Presentation flag for the rendering layer to observe.
    pub fn flag(&self) -> DarkModeFlag {
        self.flag.clone()
    }

    /// Resolves the theme at UI mount.
    ///
    /// A stored tag wins and causes zero writes. Otherwise the ambient
    /// preference is persisted as the new baseline (the one write a cold
    /// resolution performs) and returned. A storage read failure counts
    /// as "nothing stored".
    pub fn resolve_initial(&self) -> Theme {
        let stored = match self.storage.get(THEME_KEY) {
            Ok(tag) => tag,
            Err(err) => {
                warn!("theme read failed, treating as unset: {err}");
                None
            }
        };
        let theme = match stored {
            Some(tag) => Theme::from_tag(&tag),
            None => {
                let ambient = self.ambient.preferred();
                self.persist(ambient);
                ambient
            }
        };
        self.flag.apply(theme);
        theme
    }

    /// Flips the persisted preference and returns the new state.
    ///
    /// An absent tag reads as light; `resolve_initial` seeds a value first
    /// in practice, so that path only triggers if storage was cleared
    /// underneath us. A failed persist still flips the in-process flag.
    pub fn toggle(&self) -> Theme {
        let current = match self.storage.get(THEME_KEY) {
            Ok(Some(tag)) => Theme::from_tag(&tag),
            Ok(None) => Theme::Light,
            Err(err) => {
                warn!("theme read failed during toggle, assuming light: {err}");
                Theme::Light
            }
        };
        let next = current.flipped();
        self.persist(next);
        self.flag.apply(next);
        next
    }

    fn persist(&self, theme: Theme) {
        match self.storage.set(THEME_KEY, theme.as_str()) {
            Ok(()) => debug!(theme = theme.as_str(), "theme preference persisted"),
            Err(err) => warn!("theme preference not persisted: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StorageError;
    use crate::storage::MemoryStore;

    fn store_with_ambient(ambient: Theme) -> (Arc<MemoryStore>, ThemeStore) {
        crate::init_test_tracing();
        let storage = Arc::new(MemoryStore::new());
        let store = ThemeStore::new(
            storage.clone() as Arc<dyn StoragePort>,
            Box::new(FixedAmbient(ambient)),
        );
        (storage, store)
    }

    #[test]
    fn test_cold_resolution_seeds_ambient_preference() {
        let (storage, store) = store_with_ambient(Theme::Dark);

        let theme = store.resolve_initial();
        assert_eq!(theme, Theme::Dark);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(storage.writes(), 1);
        assert!(store.flag().is_dark());
    }

    #[test]
    fn test_toggle_flips_and_persists() {
        let (storage, store) = store_with_ambient(Theme::Dark);
        store.resolve_initial();

        let theme = store.toggle();
        assert_eq!(theme, Theme::Light);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert!(!store.flag().is_dark());
    }

    #[test]
    fn test_warm_resolution_makes_no_write() {
        let (storage, store) = store_with_ambient(Theme::Dark);
        store.resolve_initial();
        store.toggle();
        let writes_before = storage.writes();

        let theme = store.resolve_initial();
        assert_eq!(theme, Theme::Light);
        assert_eq!(storage.writes(), writes_before);
    }

    #[test]
    fn test_unknown_tag_decodes_to_light() {
        let (storage, store) = store_with_ambient(Theme::Dark);
        storage.set(THEME_KEY, "solarized").unwrap();

        assert_eq!(store.resolve_initial(), Theme::Light);
        // stored tag present, so no reseeding happens
        assert_eq!(
            storage.get(THEME_KEY).unwrap().as_deref(),
            Some("solarized")
        );
    }

    #[test]
    fn test_toggle_without_seed_defaults_from_light() {
        let (storage, store) = store_with_ambient(Theme::Dark);

        let theme = store.toggle();
        assert_eq!(theme, Theme::Dark);
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_applying_same_state_twice_is_a_noop() {
        let (_, store) = store_with_ambient(Theme::Dark);
        store.resolve_initial();
        let flag = store.flag();
        assert!(flag.is_dark());

        store.resolve_initial();
        assert!(flag.is_dark());
    }

    /// Storage that always fails, standing in for an unavailable backend.
    struct BrokenStore;

    impl StoragePort for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("no backend".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("no backend".into()))
        }
    }

    #[test]
    fn test_unavailable_storage_falls_back_to_ambient() {
        let store = ThemeStore::new(Arc::new(BrokenStore), Box::new(FixedAmbient(Theme::Dark)));

        assert_eq!(store.resolve_initial(), Theme::Dark);
        assert!(store.flag().is_dark());

        // toggle still flips the in-process flag despite the failed persist
        assert_eq!(store.toggle(), Theme::Dark);
    }
}
