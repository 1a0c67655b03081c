//! Analyze command - show urgency assessments without assigning anything

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use helpdesk_assign_engine::prelude::*;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::assign::read_dataset;

/// Assessment of one ticket
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub label: String,
    pub tier: UrgencyTier,
    pub score: f64,
    /// Explicit requirement from the record, otherwise the inferred skill
    pub required_skill: Option<String>,
    pub rationale: String,
}

impl From<&Ticket> for Analysis {
    fn from(ticket: &Ticket) -> Self {
        Self {
            label: ticket.id().to_string(),
            tier: ticket.tier(),
            score: ticket.urgency_score(),
            required_skill: ticket.required_skill().map(str::to_string),
            rationale: ticket.assessment().rationale.clone(),
        }
    }
}

#[derive(Tabled)]
struct AnalysisRow {
    #[tabled(rename = "Ticket")]
    label: String,
    #[tabled(rename = "Priority")]
    tier: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Skill")]
    skill: String,
}

/// Execute analyze command
pub async fn execute(
    config: &EngineConfig,
    texts: Vec<String>,
    dataset: Option<&Path>,
    json: bool,
) -> Result<()> {
    let engine = AssignmentEngine::new(config.clone()).context("Failed to build assignment engine")?;

    let tickets = match dataset {
        Some(path) => {
            let dataset = read_dataset(path).await?;
            let ingested = dataset_tickets(&engine, &dataset);
            if !ingested.failures.is_empty() {
                eprintln!(
                    "⚠️  {} ticket record(s) rejected and not analyzed:",
                    ingested.failures.len()
                );
                for failure in &ingested.failures {
                    eprintln!("   {}", failure);
                }
            }
            ingested.accepted
        }
        None => text_tickets(&engine, &texts),
    };

    let distribution = engine
        .analyzer()
        .distribution(tickets.iter().map(|ticket| ticket.text()));
    let analyses: Vec<Analysis> = tickets.iter().map(Analysis::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&analyses)?);
        return Ok(());
    }

    let rows: Vec<AnalysisRow> = analyses
        .iter()
        .map(|analysis| AnalysisRow {
            label: analysis.label.clone(),
            tier: analysis.tier.to_string(),
            score: format!("{:.1}", analysis.score),
            skill: analysis.required_skill.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));

    for analysis in &analyses {
        println!("{} {}", tier_label(analysis.tier), analysis.rationale);
    }

    let counts: Vec<String> = distribution
        .iter()
        .map(|(tier, count)| format!("{} {}", tier, count))
        .collect();
    println!("\nDistribution: {}", counts.join(", "));

    Ok(())
}

/// Tickets for free-form texts, labelled `#1`, `#2`, ...
pub fn text_tickets(engine: &AssignmentEngine, texts: &[String]) -> Vec<Ticket> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| engine.prepare_ticket(format!("#{}", i + 1), text, i))
        .collect()
}

/// Dataset tickets exactly as an assignment run would ingest them
pub fn dataset_tickets(engine: &AssignmentEngine, dataset: &Dataset) -> Ingested<Ticket> {
    ingest_tickets(&dataset.tickets, engine.analyzer(), engine.inferer())
}

fn tier_label(tier: UrgencyTier) -> String {
    let label = format!("[{}]", tier);
    match tier {
        UrgencyTier::Critical => label.red().bold().to_string(),
        UrgencyTier::High => label.yellow().to_string(),
        UrgencyTier::Medium => label.blue().to_string(),
        UrgencyTier::Low => label.dimmed().to_string(),
    }
}
