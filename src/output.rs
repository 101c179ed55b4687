use crate::config::OutputFormat;
use crate::domain::model::{DashboardState, LoadOutcome};
use crate::utils::error::Result;
use std::fmt::Write;

pub fn render(state: &DashboardState, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(state)?),
        OutputFormat::Holder => Ok(serde_json::to_string_pretty(&state.holder_view()?)?),
        OutputFormat::Summary => Ok(render_summary(state)),
    }
}

fn outcome_label<T>(outcome: &LoadOutcome<T>) -> String {
    match outcome {
        LoadOutcome::NotRequested => "not requested".to_string(),
        LoadOutcome::Failed { reason, .. } => format!("failed ({})", reason),
        LoadOutcome::Loaded(_) => "loaded".to_string(),
    }
}

fn join_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    let keys: Vec<&str> = keys.map(String::as_str).collect();
    if keys.is_empty() {
        "-".to_string()
    } else {
        keys.join(", ")
    }
}

fn render_summary(state: &DashboardState) -> String {
    let mut out = String::new();

    // 寫入 String 不會失敗
    let _ = writeln!(out, "Loaded at: {}", state.loaded_at.to_rfc3339());
    let _ = writeln!(
        out,
        "Checker states: {}",
        outcome_label(&state.checker_states)
    );
    if let Some(groups) = state.checker_states.loaded() {
        for (name, group) in groups {
            let _ = writeln!(out, "  {} ({} entries)", name, group.entries.len());
            let _ = writeln!(out, "    attributes: {}", join_keys(group.cols.keys()));
            let _ = writeln!(out, "    results: {}", join_keys(group.rcols.keys()));
        }
    }

    let _ = write!(out, "Alerts: {}", outcome_label(&state.alerts));
    match state.alerts.loaded().map(|a| a.count()) {
        Some(Some(count)) => {
            let _ = writeln!(out, " ({})", count);
        }
        _ => out.push('\n'),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::columns::build_checker_states;
    use crate::domain::model::AlertsSummary;
    use serde_json::json;

    fn sample_state() -> DashboardState {
        let raw = serde_json::from_value(json!({
            "dns": [
                {"attr": {"server": "9.9.9.9", "qname": "example.com"}, "results": {"r": {"rtt": 12}}}
            ],
            "ping": []
        }))
        .unwrap();

        let mut state = DashboardState::pending();
        state.checker_states = LoadOutcome::Loaded(build_checker_states(raw));
        state.alerts = LoadOutcome::Loaded(AlertsSummary(json!(["disk-full", "dns down"])));
        state
    }

    #[test]
    fn test_summary_lists_columns_per_group() {
        let text = render(&sample_state(), OutputFormat::Summary).unwrap();

        assert!(text.contains("Checker states: loaded"));
        assert!(text.contains("  dns (1 entries)"));
        assert!(text.contains("    attributes: qname, server"));
        assert!(text.contains("    results: rtt"));
        assert!(text.contains("  ping (0 entries)\n    attributes: -\n    results: -"));
        assert!(text.ends_with("Alerts: loaded (2)\n"));
    }

    #[test]
    fn test_summary_reports_failures() {
        let mut state = DashboardState::pending();
        state.checker_states = LoadOutcome::Failed {
            status: Some(500),
            reason: "HTTP status 500".to_string(),
        };

        let text = render(&state, OutputFormat::Summary).unwrap();
        assert!(text.contains("Checker states: failed (HTTP status 500)"));
        assert!(text.ends_with("Alerts: not requested\n"));
    }

    #[test]
    fn test_holder_format_matches_template_shape() {
        let text = render(&sample_state(), OutputFormat::Holder).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["all"]["dns"]["cols"], json!({"qname": 1, "server": 1}));
        assert_eq!(value["all"]["dns"]["rcols"], json!({"rtt": 2}));
        assert_eq!(value["alerts"], json!(["disk-full", "dns down"]));
    }

    #[test]
    fn test_json_format_round_trips() {
        let state = sample_state();
        let text = render(&state, OutputFormat::Json).unwrap();
        let parsed: DashboardState = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, state);
    }
}
