//! Spec Export Module
//! Writes the map, chart and ranked-table descriptions as one JSON document
//! for an external rendering host.

use crate::dashboard::Dashboard;
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Spec exporter for the dashboard descriptions
pub struct SpecExporter;

impl SpecExporter {
    /// Serialize the dashboard's descriptions to pretty JSON.
    pub fn to_json(dashboard: &Dashboard) -> anyhow::Result<String> {
        serde_json::to_string_pretty(&dashboard.spec_bundle())
            .context("Failed to serialize dashboard specs")
    }

    /// Write the dashboard's descriptions to `output_path`.
    pub fn write_json(dashboard: &Dashboard, output_path: &Path) -> anyhow::Result<()> {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, &dashboard.spec_bundle())
            .context("Failed to serialize dashboard specs")?;
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        log::info!(
            "Exported specs for {} incidents to {}",
            dashboard.incidents.len(),
            output_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::{LoadReport, PreparedData};
    use crate::stats::incident;

    fn dashboard() -> Dashboard {
        Dashboard::derive(
            PreparedData {
                incidents: vec![incident("Georgia", 3, 1), incident("Illinois", 2, 9)].into(),
                report: LoadReport::default(),
            },
            &DashboardConfig::default(),
        )
    }

    #[test]
    fn writes_bundle_with_three_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("specs.json");
        SpecExporter::write_json(&dashboard(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(keys.len(), 3);
        for key in ["deck", "bar_chart", "top_states"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(json["deck"]["layers"][0]["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["top_states"][0]["State"], "Georgia");
    }

    #[test]
    fn unwritable_path_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("specs.json");
        let err = SpecExporter::write_json(&dashboard(), &path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create"));
    }

    #[test]
    fn json_text_matches_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("specs.json");
        let dashboard = dashboard();

        SpecExporter::write_json(&dashboard, &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            SpecExporter::to_json(&dashboard).unwrap()
        );
    }
}
