//! Text and JSON rendering for search results, summaries, and predictions

use crate::client::{ExplainResponse, PredictionResponse};
use crate::compound::{BioactivityRow, Compound};
use crate::filter::FilterConfig;
use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Aggregates for the `info` command
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub targets: BTreeMap<String, usize>,
    pub mol_weight_span: Option<(f64, f64)>,
    pub log_p_span: Option<(f64, f64)>,
    pub tpsa_span: Option<(f64, f64)>,
}

pub fn build_summary(rows: &[BioactivityRow]) -> DatasetSummary {
    let mut targets: BTreeMap<String, usize> = BTreeMap::new();
    let mut active = 0usize;

    for row in rows {
        if row.is_active == 1 {
            active += 1;
        }
        let target = if row.target_name.is_empty() {
            "<unknown>".to_string()
        } else {
            row.target_name.clone()
        };
        *targets.entry(target).or_insert(0) += 1;
    }

    DatasetSummary {
        total: rows.len(),
        active,
        inactive: rows.len() - active,
        targets,
        mol_weight_span: span(rows.iter().map(|row| row.mw_freebase)),
        log_p_span: span(rows.iter().map(|row| row.alogp)),
        tpsa_span: span(rows.iter().map(|row| row.psa)),
    }
}

fn span(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

fn activity_cell(active: bool) -> Cell {
    if active {
        Cell::new("Active").fg(Color::Green)
    } else {
        Cell::new("Inactive").fg(Color::Red)
    }
}

fn compound_table(compounds: &[Compound]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Compound", "Target", "MW", "LogP", "TPSA", "HBD", "HBA", "RTB", "Activity",
            "Predicted", "Conf",
        ]);

    for compound in compounds {
        table.add_row(vec![
            Cell::new(&compound.compound_id),
            Cell::new(&compound.target_name),
            Cell::new(format!("{:.1}", compound.mol_weight)),
            Cell::new(format!("{:.2}", compound.log_p)),
            Cell::new(format!("{:.1}", compound.tpsa)),
            Cell::new(compound.hbd),
            Cell::new(compound.hba),
            Cell::new(compound.rotatable_bonds),
            activity_cell(compound.is_active),
            activity_cell(compound.predicted_active),
            Cell::new(if compound.confidence > 0.0 {
                format!("{:.0}%", compound.confidence * 100.0)
            } else {
                "-".to_string()
            }),
        ]);
    }

    table
}

pub fn format_search_text(compounds: &[Compound], filters: &FilterConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} compound{} found",
        compounds.len().to_string().bold(),
        if compounds.len() == 1 { "" } else { "s" }
    );

    let filter_count = filters.active_filter_count();
    if filter_count > 0 {
        let _ = writeln!(
            out,
            "{} filter{} applied",
            filter_count,
            if filter_count == 1 { "" } else { "s" }
        );
    }

    if compounds.is_empty() {
        return out;
    }

    out.push('\n');
    let _ = writeln!(out, "{}", compound_table(compounds));
    out
}

pub fn format_search_json(compounds: &[Compound], filters: &FilterConfig) -> String {
    serde_json::to_string_pretty(&json!({
        "search": {
            "matches": compounds.len(),
            "active_filters": filters.active_filter_count(),
            "filters": filters,
            "compounds": compounds,
        }
    }))
    .unwrap_or_else(|_| "{\"search\":{\"error\":\"failed to serialize search output\"}}".into())
}

pub fn format_info_text(summary: &DatasetSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Dataset summary".bold());
    let _ = writeln!(out, "  total rows: {}", summary.total);
    let _ = writeln!(
        out,
        "  activity: {} / {}",
        format!("{} active", summary.active).green(),
        format!("{} inactive", summary.inactive).red()
    );

    if let Some((min, max)) = summary.mol_weight_span {
        let _ = writeln!(out, "  molecular weight: {min:.1} - {max:.1} Da");
    }
    if let Some((min, max)) = summary.log_p_span {
        let _ = writeln!(out, "  LogP: {min:.2} - {max:.2}");
    }
    if let Some((min, max)) = summary.tpsa_span {
        let _ = writeln!(out, "  TPSA: {min:.1} - {max:.1} Å²");
    }

    if !summary.targets.is_empty() {
        let _ = writeln!(out, "\nTargets:");
        for (target, count) in &summary.targets {
            let _ = writeln!(out, "{count:>6}  {target}");
        }
    }

    out
}

pub fn format_info_json(summary: &DatasetSummary) -> String {
    serde_json::to_string_pretty(&json!({
        "info": {
            "total": summary.total,
            "active": summary.active,
            "inactive": summary.inactive,
            "mol_weight_span": summary.mol_weight_span,
            "log_p_span": summary.log_p_span,
            "tpsa_span": summary.tpsa_span,
            "targets": summary.targets,
        }
    }))
    .unwrap_or_else(|_| "{\"info\":{\"error\":\"failed to serialize summary\"}}".into())
}

pub fn format_prediction_text(response: &PredictionResponse) -> String {
    let label = if response.is_active() {
        response.prediction.green().bold()
    } else {
        response.prediction.red().bold()
    };
    format!(
        "{} ({:.1}% probability, {} model)\n",
        label,
        response.probability * 100.0,
        response.model
    )
}

pub fn format_prediction_json(response: &PredictionResponse) -> String {
    serde_json::to_string_pretty(&json!({
        "prediction": {
            "model": response.model,
            "label": response.prediction,
            "probability": response.probability,
        }
    }))
    .unwrap_or_else(|_| "{\"prediction\":{\"error\":\"failed to serialize prediction\"}}".into())
}

pub fn format_explain_text(response: &ExplainResponse) -> String {
    if response.explanation.is_empty() {
        return "No SHAP contributions returned.\n".to_string();
    }

    let mut impacts = response.explanation.clone();
    impacts.sort_by(|a, b| {
        b.impact
            .abs()
            .partial_cmp(&a.impact.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Feature", "SHAP impact"]);

    for impact in &impacts {
        let color = if impact.impact >= 0.0 {
            Color::Green
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new(&impact.feature),
            Cell::new(format!("{:+.4}", impact.impact)).fg(color),
        ]);
    }

    format!("{table}\n")
}

pub fn format_explain_json(response: &ExplainResponse) -> String {
    serde_json::to_string_pretty(&json!({
        "explanation": response
            .explanation
            .iter()
            .map(|impact| json!({ "feature": impact.feature, "impact": impact.impact }))
            .collect::<Vec<_>>(),
    }))
    .unwrap_or_else(|_| "{\"explanation\":{\"error\":\"failed to serialize explanation\"}}".into())
}
