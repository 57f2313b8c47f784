use host_bridge::HostConfig;
use presenter_core::{Facts, Hotkey, Preset};
use serde::Deserialize;
use thiserror::Error;

/// Global the host page may set (JSON string or plain object) before the script loads.
pub const CONFIG_GLOBAL: &str = "PRESENTER_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid presenter config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("presenter config is not JSON-serializable")]
    NotSerializable,
}

/// Fixed element ids; the host's stylesheet targets these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub chip: String,
    pub sheet: String,
    pub content: String,
    pub load_button: String,
    pub stat: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            chip: "presenter-chip".into(),
            sheet: "presenter".into(),
            content: "presenter-content".into(),
            load_button: "btnLoadMap".into(),
            stat: "pPop".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    pub preset: Preset,
    pub facts: Facts,
    pub ids: ElementIds,
    pub storage_key: String,
    /// Base URL for the map and flag files; defaults to the loading script's URL.
    pub asset_base: Option<String>,
    pub hotkey: Hotkey,
    pub host: HostConfig,
}

impl PresenterConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut cfg: PresenterConfig = serde_json::from_str(json)?;
        if cfg.storage_key.is_empty() {
            cfg.storage_key = DEFAULT_STORAGE_KEY.into();
        }
        Ok(cfg)
    }

    pub fn defaults() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            ..Self::default()
        }
    }
}

pub const DEFAULT_STORAGE_KEY: &str = "presenter.heightVh";

#[cfg(target_arch = "wasm32")]
pub fn from_global() -> Result<Option<PresenterConfig>, ConfigError> {
    use wasm_bindgen::JsValue;

    let Ok(value) = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL))
    else {
        return Ok(None);
    };
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let json = match value.as_string() {
        Some(s) => s,
        None => js_sys::JSON::stringify(&value)
            .ok()
            .and_then(|s| s.as_string())
            .ok_or(ConfigError::NotSerializable)?,
    };
    PresenterConfig::from_json(&json).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = PresenterConfig::from_json("{}").unwrap();
        assert_eq!(cfg, PresenterConfig::defaults());
        assert_eq!(cfg.storage_key, "presenter.heightVh");
        assert_eq!(cfg.ids.stat, "pPop");
        assert_eq!(cfg.preset.map_file, "Viena.map");
        assert_eq!(cfg.hotkey.key, 'i');
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let cfg = PresenterConfig::from_json(
            r#"{
                "preset": {"nation_name": "Norland", "map_file": "north.map"},
                "hotkey": {"guard_editable": false},
                "host": {"drop_target_id": "canvas", "refresh_delay_ms": 800}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.preset.nation_name, "Norland");
        assert_eq!(cfg.preset.flag_file, "flag.png");
        assert!(!cfg.hotkey.guard_editable);
        assert_eq!(cfg.host.drop_target_id, "canvas");
        assert_eq!(cfg.host.refresh_delay_ms, 800);
        assert_eq!(cfg.host.entry_points.len(), 4);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = PresenterConfig::from_json("{\"preset\": 3}").unwrap_err();
        assert!(err.to_string().starts_with("invalid presenter config"));
    }
}
