use crate::domain::model::{
    CheckerEntry, CheckerGroup, CheckerStates, ColumnPresence, RawCheckerStates,
    ATTRIBUTE_COLUMN, RESULT_COLUMN,
};

/// Collect the attribute keys (`cols`) and result keys (`rcols`) that appear
/// anywhere in a group.
///
/// Keys are unioned across entries. Result keys come from the second level
/// of `results`. A non-object `attr`, `results` or result set contributes
/// nothing.
pub fn derive_columns(entries: &[CheckerEntry]) -> (ColumnPresence, ColumnPresence) {
    let mut cols = ColumnPresence::new();
    let mut rcols = ColumnPresence::new();

    for entry in entries {
        for key in entry.attr_map().into_iter().flat_map(|attr| attr.keys()) {
            cols.insert(key.clone(), ATTRIBUTE_COLUMN);
        }
        let result_sets = entry.result_map().into_iter().flat_map(|r| r.values());
        for result_map in result_sets.filter_map(serde_json::Value::as_object) {
            for key in result_map.keys() {
                rcols.insert(key.clone(), RESULT_COLUMN);
            }
        }
    }

    (cols, rcols)
}

/// Attach column presence maps to every group. Groups are independent.
pub fn build_checker_states(raw: RawCheckerStates) -> CheckerStates {
    raw.into_iter()
        .map(|(name, entries)| {
            let (cols, rcols) = derive_columns(&entries);
            tracing::debug!(
                "Group '{}': {} entries, {} attribute columns, {} result columns",
                name,
                entries.len(),
                cols.len(),
                rcols.len()
            );
            (
                name,
                CheckerGroup {
                    entries,
                    cols,
                    rcols,
                },
            )
        })
        .collect()
}
