//! Assign command - run a dataset through the engine and write result files

use std::path::Path;

use anyhow::{Context, Result};
use helpdesk_assign_engine::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::output;

/// Execute assign command
pub async fn execute(
    config: &EngineConfig,
    dataset_path: &Path,
    output_path: &Path,
    report_path: &Path,
    quiet: bool,
) -> Result<()> {
    let dataset = read_dataset(dataset_path).await?;
    info!(
        "📥 Loaded {} tickets and {} agents from {}",
        dataset.tickets.len(),
        dataset.agents.len(),
        dataset_path.display()
    );

    let engine = AssignmentEngine::new(config.clone()).context("Failed to build assignment engine")?;
    let run = engine.run(&dataset);

    for failure in &run.failures {
        warn!("⚠️  {}", failure);
    }

    write_json(output_path, &output::submission(&run)).await?;
    info!("✅ Output file generated: {}", output_path.display());

    write_json(report_path, &output::detailed_report(&run)).await?;
    info!("✅ Detailed report generated: {}", report_path.display());

    if !quiet {
        println!("\n═══ Assignment Run {} ═══", run.run_id);
        print!("{}", output::summary_table(&run));
    }

    Ok(())
}

/// Read a dataset JSON file
pub async fn read_dataset(path: &Path) -> Result<Dataset> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse dataset {}", path.display()))
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, rendered)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "agents": [
            {"agent_id": "agent_001", "name": "Sarah Chen", "skills": {"Networking": 9, "VPN_Troubleshooting": 8},
             "availability_status": "Available", "experience_level": 12, "current_load": 1},
            {"agent_id": "agent_002", "name": "Tom Reyes", "skills": {"Printer_Support": 7},
             "availability_status": "Available", "experience_level": 4, "current_load": 0}
        ],
        "tickets": [
            {"ticket_id": "TKT-1", "title": "Printer jam", "description": "Printer on floor 2 shows paper jam"},
            {"ticket_id": "TKT-2", "title": "VPN down", "description": "Remote users cannot connect to the VPN tunnel"},
            {"ticket_id": "TKT-3", "title": "No description"}
        ]
    }"#;

    #[tokio::test]
    async fn test_assign_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("dataset.json");
        let output = dir.path().join("output_result.json");
        let report = dir.path().join("report.json");
        std::fs::write(&dataset, DATASET).unwrap();

        execute(&EngineConfig::default(), &dataset, &output, &report, true)
            .await
            .unwrap();

        let submission: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let entries = submission.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["ticket_id"], "TKT-2");
        assert_eq!(entries[0]["assigned_agent_id"], "agent_001");
        assert_eq!(entries[1]["assigned_agent_id"], "agent_002");

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(report["summary"]["failed_records"], 1);
        assert_eq!(report["failures"][0]["record_id"], "TKT-3");
    }

    #[tokio::test]
    async fn test_missing_dataset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_dataset(&dir.path().join("missing.json")).await;
        assert!(result.is_err());
    }
}
