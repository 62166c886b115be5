//! Natural-language query extraction
//!
//! Maps a free-text query onto a [`FilterPatch`] using a fixed table of
//! keyword and pattern rules. The extractor is a pure function: no I/O, no
//! state, and no error conditions. Text matching no rule yields an empty
//! patch.

use super::state::{FilterPatch, LOG_P_DEFAULT, MOL_WEIGHT_DEFAULT, Range, TPSA_DEFAULT};
use regex::Regex;
use std::sync::LazyLock;

static TPSA_BELOW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"tpsa\s*(?:below|under|<)\s*(\d+)").expect("valid tpsa upper-bound regex")
});
static TPSA_ABOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"tpsa\s*(?:above|over|>)\s*(\d+)").expect("valid tpsa lower-bound regex")
});

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Extract a partial filter configuration from free text
///
/// Matching is case-insensitive. Every rule is evaluated against the
/// lower-cased text in a fixed order; when two rules write the same field
/// the later one wins. That ordering is load-bearing for overlapping
/// keywords ("active" is a substring of "inactive", "lipophilic" of
/// "lipophilicity"), so do not reorder the rules.
pub fn extract(text: &str) -> FilterPatch {
    let lower = text.to_lowercase();
    let mut patch = FilterPatch::default();

    if contains_any(&lower, &["low molecular weight", "small molecule"]) {
        patch.mol_weight = Some(Range {
            min: MOL_WEIGHT_DEFAULT.min,
            max: 300.0,
        });
    }
    if contains_any(&lower, &["high molecular weight", "large molecule"]) {
        patch.mol_weight = Some(Range {
            min: 400.0,
            max: MOL_WEIGHT_DEFAULT.max,
        });
    }

    if contains_any(&lower, &["high activity", "active"]) {
        patch.show_active = Some(true);
        patch.show_inactive = Some(false);
    }
    if contains_any(&lower, &["inactive", "low activity"]) {
        patch.show_active = Some(false);
        patch.show_inactive = Some(true);
    }

    if lower.contains("predicted active") {
        patch.predicted_active = Some(true);
    }
    if lower.contains("predicted inactive") {
        patch.predicted_active = Some(false);
    }

    // Captured bounds are passed through unvalidated, even when they fall
    // outside the slider's nominal domain.
    if let Some(captures) = TPSA_BELOW_RE.captures(&lower)
        && let Ok(bound) = captures[1].parse::<f64>()
    {
        patch.tpsa = Some(Range {
            min: TPSA_DEFAULT.min,
            max: bound,
        });
    }
    if let Some(captures) = TPSA_ABOVE_RE.captures(&lower)
        && let Ok(bound) = captures[1].parse::<f64>()
    {
        patch.tpsa = Some(Range {
            min: bound,
            max: TPSA_DEFAULT.max,
        });
    }

    if contains_any(&lower, &["high lipophilicity", "lipophilic"]) {
        patch.log_p = Some(Range {
            min: 3.0,
            max: LOG_P_DEFAULT.max,
        });
    }
    if contains_any(&lower, &["low lipophilicity", "hydrophilic"]) {
        patch.log_p = Some(Range {
            min: LOG_P_DEFAULT.min,
            max: 1.0,
        });
    }

    if lower.contains("egfr") {
        patch.target_name = Some("Epidermal Growth Factor Receptor".to_string());
    }
    if lower.contains("hiv") {
        patch.target_name = Some("Human Immunodeficiency Virus Type 1".to_string());
    }
    if contains_any(&lower, &["covid", "sars"]) {
        patch.target_name = Some("SARS-CoV-2 Main Protease".to_string());
    }

    patch
}
