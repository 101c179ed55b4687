use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Marker stored in `cols` for every attribute key seen in a group.
pub const ATTRIBUTE_COLUMN: u8 = 1;
/// Marker stored in `rcols` for every result key seen in a group.
pub const RESULT_COLUMN: u8 = 2;

/// Column name to presence marker.
pub type ColumnPresence = BTreeMap<String, u8>;

/// One checker instance as reported by the backend.
///
/// `attr` and `results` are kept exactly as received, including an explicit
/// `null`, and re-emitted only when the backend sent them. For column
/// discovery a missing or non-object value counts as empty. Every other
/// field is kept untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckerEntry {
    #[serde(
        default,
        deserialize_with = "keep_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub attr: Option<serde_json::Value>,
    #[serde(
        default,
        deserialize_with = "keep_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub results: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

// 欄位存在時（即使是 null）一律保留原值
fn keep_present<'de, D>(deserializer: D) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl CheckerEntry {
    /// Attribute map, if `attr` is a JSON object.
    pub fn attr_map(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.attr.as_ref().and_then(serde_json::Value::as_object)
    }

    /// Result sets keyed by name, if `results` is a JSON object.
    pub fn result_map(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.results.as_ref().and_then(serde_json::Value::as_object)
    }
}

/// Raw `checker-states` payload: group name to its entries.
pub type RawCheckerStates = BTreeMap<String, Vec<CheckerEntry>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckerGroup {
    pub entries: Vec<CheckerEntry>,
    pub cols: ColumnPresence,
    pub rcols: ColumnPresence,
}

impl CheckerGroup {
    /// Attribute and result columns in one map. On a name clash the
    /// attribute marker is kept.
    pub fn merged_columns(&self) -> ColumnPresence {
        let mut merged = self.rcols.clone();
        for (key, marker) in &self.cols {
            merged.insert(key.clone(), *marker);
        }
        merged
    }
}

pub type CheckerStates = BTreeMap<String, CheckerGroup>;

/// The `alerts` field of the `state` response, passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertsSummary(pub serde_json::Value);

impl AlertsSummary {
    /// Number of alerts when the backend sends a list or an object.
    pub fn count(&self) -> Option<usize> {
        match &self.0 {
            serde_json::Value::Array(items) => Some(items.len()),
            serde_json::Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub health: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.health == "ok"
    }
}

/// Result of one backend request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum LoadOutcome<T> {
    NotRequested,
    Failed { status: Option<u16>, reason: String },
    Loaded(T),
}

impl<T> LoadOutcome<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadOutcome::Failed { .. })
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadOutcome::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_loaded(self) -> Option<T> {
        match self {
            LoadOutcome::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for LoadOutcome<T> {
    fn default() -> Self {
        LoadOutcome::NotRequested
    }
}

/// Everything one page load produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub checker_states: LoadOutcome<CheckerStates>,
    pub alerts: LoadOutcome<AlertsSummary>,
    pub loaded_at: DateTime<Utc>,
}

impl DashboardState {
    pub fn pending() -> Self {
        Self {
            checker_states: LoadOutcome::NotRequested,
            alerts: LoadOutcome::NotRequested,
            loaded_at: Utc::now(),
        }
    }

    /// Neither request produced data; the shell should show its loading or error view.
    pub fn is_empty(&self) -> bool {
        !self.checker_states.is_loaded() && !self.alerts.is_loaded()
    }

    /// The `{ "all": ..., "alerts": ... }` object the table templates bind to.
    /// Fields whose request did not succeed are left out.
    pub fn holder_view(&self) -> crate::utils::error::Result<serde_json::Value> {
        let mut view = serde_json::Map::new();
        if let Some(all) = self.checker_states.loaded() {
            view.insert("all".to_string(), serde_json::to_value(all)?);
        }
        if let Some(alerts) = self.alerts.loaded() {
            view.insert("alerts".to_string(), alerts.0.clone());
        }
        Ok(serde_json::Value::Object(view))
    }
}
