use host_bridge::web::describe_js;
use presenter_core::{PrefError, PreferenceBackend};
use web_sys::Storage;

fn local_storage() -> Result<Storage, PrefError> {
    let window = web_sys::window().ok_or(PrefError::Unavailable)?;
    window
        .local_storage()
        .map_err(|e| PrefError::Access(describe_js(&e)))?
        .ok_or(PrefError::Unavailable)
}

/// `window.localStorage`, looked up on every access so a revoked storage
/// permission is noticed.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl PreferenceBackend for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PrefError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| PrefError::Access(describe_js(&e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PrefError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| PrefError::Access(describe_js(&e)))
    }
}
