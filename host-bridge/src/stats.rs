//! Population total read back from the host after a map load.

/// One host entity (a state or province).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityRecord {
    /// Truthiness of the entity's index; index 0 is the host's neutral placeholder.
    pub active: bool,
    pub removed: bool,
    pub value: Option<f64>,
}

/// Snapshot of the host fields the refresher understands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostData {
    /// Flat per-cell series; `None` when absent or not numeric.
    pub series: Option<Vec<f64>>,
    /// `None` entries are falsy slots in the host array.
    pub entities: Option<Vec<Option<EntityRecord>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsOutcome {
    Updated(String),
    /// Leave the displayed value as it is.
    Unchanged,
}

/// Sum the flat series if it exists, otherwise the live entities.
pub fn aggregate(data: &HostData) -> Option<f64> {
    if let Some(series) = &data.series {
        let sum: f64 = series.iter().sum();
        if sum.is_finite() {
            return Some(sum);
        }
    }
    let entities = data.entities.as_ref()?;
    let sum: f64 = entities
        .iter()
        .flatten()
        .filter(|e| e.active && !e.removed)
        .map(|e| e.value.filter(|v| v.is_finite()).unwrap_or(0.0))
        .sum();
    Some(sum)
}

/// `1.50M`, `12.3k`, or a plain integer.
pub fn format_compact(total: f64) -> String {
    let n = total.round();
    if n >= 1e6 {
        format!("{:.2}M", n / 1e6)
    } else if n >= 1e3 {
        format!("{:.1}k", n / 1e3)
    } else {
        format!("{}", n as i64)
    }
}

pub fn summarize(data: Option<&HostData>) -> StatsOutcome {
    match data.and_then(aggregate) {
        Some(total) => StatsOutcome::Updated(format_compact(total)),
        None => StatsOutcome::Unchanged,
    }
}
