use serde::Deserialize;

/// One named capability on the host's global object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntryPoint {
    /// Dotted path from the global object, e.g. `editor.uploadMapData`.
    pub path: String,
    /// Global path whose value is passed ahead of the text (restore-style calls).
    #[serde(default)]
    pub state_arg: Option<String>,
}

impl EntryPoint {
    pub fn text(path: &str) -> Self {
        Self {
            path: path.into(),
            state_arg: None,
        }
    }

    pub fn with_state(path: &str, state: &str) -> Self {
        Self {
            path: path.into(),
            state_arg: Some(state.into()),
        }
    }
}

/// Where the population figure is read from on the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatsSource {
    pub data_global: String,
    /// Flat numeric series, relative to `data_global`.
    pub series_path: String,
    /// Entity records, relative to `data_global`.
    pub entities_path: String,
    pub active_field: String,
    pub removed_field: String,
    pub value_field: String,
}

impl Default for StatsSource {
    fn default() -> Self {
        Self {
            data_global: "pack".into(),
            series_path: "cells.population".into(),
            entities_path: "states".into(),
            active_field: "i".into(),
            removed_field: "removed".into(),
            value_field: "population".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Probed in order; the first callable one receives the text.
    pub entry_points: Vec<EntryPoint>,
    /// Element id that receives the simulated drop; falls back to `<body>`.
    pub drop_target_id: String,
    pub refresh_delay_ms: u32,
    pub stats: StatsSource,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            entry_points: vec![
                EntryPoint::text("uploadMapData"),
                EntryPoint::text("editor.uploadMapData"),
                EntryPoint::text("parseLoadedMap"),
                EntryPoint::with_state("restore", "pack"),
            ],
            drop_target_id: "map".into(),
            refresh_delay_ms: 500,
            stats: StatsSource::default(),
        }
    }
}
