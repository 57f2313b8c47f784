use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrefError {
    #[error("preference storage unavailable")]
    Unavailable,
    #[error("preference storage access failed: {0}")]
    Access(String),
}

/// String key-value storage behind the preference store (`localStorage` in the browser).
pub trait PreferenceBackend {
    fn read(&self, key: &str) -> Result<Option<String>, PrefError>;
    fn write(&self, key: &str, value: &str) -> Result<(), PrefError>;
}

/// Best-effort numeric preferences. Reads degrade to `None` and writes are
/// dropped when the backend fails.
pub struct PreferenceStore<B> {
    backend: B,
}

impl<B: PreferenceBackend> PreferenceStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn load(&self, key: &str) -> Option<f64> {
        let raw = self.backend.read(key).ok().flatten()?;
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn save(&self, key: &str, value: f64) {
        if !value.is_finite() {
            return;
        }
        let _ = self.backend.write(key, &format!("{value:.1}"));
    }
}

/// In-process backend for hosts without web storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let backend = Self::default();
        backend
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        backend
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, PrefError> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PrefError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelState;

    const KEY: &str = "presenter.heightVh";

    struct BrokenBackend;

    impl PreferenceBackend for BrokenBackend {
        fn read(&self, _key: &str) -> Result<Option<String>, PrefError> {
            Err(PrefError::Unavailable)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), PrefError> {
            Err(PrefError::Access("quota exceeded".into()))
        }
    }

    #[test]
    fn malformed_or_missing_values_restore_default() {
        for raw in ["", "abc", "NaN", "Infinity", "4 2"] {
            let store = PreferenceStore::new(MemoryBackend::with_value(KEY, raw));
            assert_eq!(store.load(KEY), None, "raw {raw:?}");
            assert_eq!(PanelState::restore(store.load(KEY)).height_vh(), 42.0);
        }
        let empty = PreferenceStore::new(MemoryBackend::new());
        assert_eq!(PanelState::restore(empty.load(KEY)).height_vh(), 42.0);
    }

    #[test]
    fn failing_backend_is_silent() {
        let store = PreferenceStore::new(BrokenBackend);
        assert_eq!(store.load(KEY), None);
        store.save(KEY, 50.0);
    }

    #[test]
    fn writes_one_decimal() {
        let store = PreferenceStore::new(MemoryBackend::new());
        store.save(KEY, 57.2649);
        assert_eq!(store.backend().raw(KEY).as_deref(), Some("57.3"));
        store.save(KEY, f64::NAN);
        assert_eq!(store.backend().raw(KEY).as_deref(), Some("57.3"));
    }

    #[test]
    fn drag_and_cycle_heights_survive_reload() {
        let store = PreferenceStore::new(MemoryBackend::new());

        let mut panel = PanelState::restore(store.load(KEY));
        panel.begin_drag(500.0, 420.0);
        panel.drag_to(373.0, 1000.0);
        let dragged = panel.end_drag().unwrap();
        store.save(KEY, dragged);
        let reloaded = PanelState::restore(store.load(KEY));
        assert!((reloaded.height_vh() - dragged).abs() <= 0.05);

        let mut panel = reloaded;
        let preset = panel.cycle_size();
        store.save(KEY, preset);
        assert_eq!(PanelState::restore(store.load(KEY)).height_vh(), preset);
    }
}
