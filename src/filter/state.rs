use super::error::FilterError;
use super::nlq;
use serde::{Deserialize, Serialize};

/// A closed numeric interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Create a range, rejecting inverted bounds
    pub fn new(field: &'static str, min: f64, max: f64) -> Result<Self, FilterError> {
        if min > max {
            return Err(FilterError::InvalidRange { field, min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Default slider bounds for each descriptor
pub const MOL_WEIGHT_DEFAULT: Range = Range {
    min: 100.0,
    max: 600.0,
};
pub const LOG_P_DEFAULT: Range = Range { min: -1.0, max: 5.0 };
pub const TPSA_DEFAULT: Range = Range {
    min: 0.0,
    max: 160.0,
};

/// The currently active search constraints
///
/// A pure value: it is replaced wholesale on every change, never mutated in
/// place. Equality with [`FilterConfig::default`] decides whether any
/// filters are considered active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub mol_weight: Range,
    pub log_p: Range,
    pub tpsa: Range,
    pub target_name: Option<String>,
    pub show_active: bool,
    pub show_inactive: bool,
    pub predicted_active: Option<bool>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            mol_weight: MOL_WEIGHT_DEFAULT,
            log_p: LOG_P_DEFAULT,
            tpsa: TPSA_DEFAULT,
            target_name: None,
            show_active: true,
            show_inactive: true,
            predicted_active: None,
        }
    }
}

/// A partial configuration produced by the natural-language extractor
///
/// Only the fields the query text implies are present; everything else is
/// left to be merged over the defaults by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub mol_weight: Option<Range>,
    pub log_p: Option<Range>,
    pub tpsa: Option<Range>,
    pub target_name: Option<String>,
    pub show_active: Option<bool>,
    pub show_inactive: Option<bool>,
    pub predicted_active: Option<bool>,
}

impl FilterPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A state transition applied to a [`FilterConfig`]
///
/// Both the natural-language path and the manual-edit path feed the same
/// reducer, [`FilterConfig::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    /// Replace the whole config with the extractor output merged over defaults
    NaturalQuery(String),
    SetMolWeight(f64, f64),
    SetLogP(f64, f64),
    SetTpsa(f64, f64),
    SetTarget(Option<String>),
    SetShowActive(bool),
    SetShowInactive(bool),
    SetPredictedActive(Option<bool>),
    Reset,
}

impl FilterConfig {
    /// Merge a partial configuration over the default values
    ///
    /// Patch fields override defaults; omitted fields keep defaults. This is
    /// deliberately merge-over-defaults, not merge-over-current: a
    /// natural-language query discards any previously hand-set filters.
    pub fn merged_over_defaults(patch: &FilterPatch) -> Self {
        let defaults = Self::default();
        Self {
            mol_weight: patch.mol_weight.unwrap_or(defaults.mol_weight),
            log_p: patch.log_p.unwrap_or(defaults.log_p),
            tpsa: patch.tpsa.unwrap_or(defaults.tpsa),
            target_name: patch.target_name.clone().or(defaults.target_name),
            show_active: patch.show_active.unwrap_or(defaults.show_active),
            show_inactive: patch.show_inactive.unwrap_or(defaults.show_inactive),
            predicted_active: patch.predicted_active.or(defaults.predicted_active),
        }
    }

    /// Apply a single event, producing the next configuration
    ///
    /// Manual range edits validate their bounds. The natural-query path
    /// passes extracted values through unchecked, matching the extractor's
    /// contract.
    pub fn apply(self, event: FilterEvent) -> Result<Self, FilterError> {
        match event {
            FilterEvent::NaturalQuery(text) => Ok(Self::merged_over_defaults(&nlq::extract(&text))),
            FilterEvent::SetMolWeight(min, max) => Ok(Self {
                mol_weight: Range::new("molecular weight", min, max)?,
                ..self
            }),
            FilterEvent::SetLogP(min, max) => Ok(Self {
                log_p: Range::new("LogP", min, max)?,
                ..self
            }),
            FilterEvent::SetTpsa(min, max) => Ok(Self {
                tpsa: Range::new("TPSA", min, max)?,
                ..self
            }),
            FilterEvent::SetTarget(target_name) => Ok(Self {
                target_name,
                ..self
            }),
            FilterEvent::SetShowActive(show_active) => Ok(Self {
                show_active,
                ..self
            }),
            FilterEvent::SetShowInactive(show_inactive) => Ok(Self {
                show_inactive,
                ..self
            }),
            FilterEvent::SetPredictedActive(predicted_active) => Ok(Self {
                predicted_active,
                ..self
            }),
            FilterEvent::Reset => Ok(Self::default()),
        }
    }

    /// Whether any field differs from the documented defaults
    pub fn has_active_filters(&self) -> bool {
        *self != Self::default()
    }

    /// Number of filter groups that differ from the defaults
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if self.mol_weight != MOL_WEIGHT_DEFAULT {
            count += 1;
        }
        if self.log_p != LOG_P_DEFAULT {
            count += 1;
        }
        if self.tpsa != TPSA_DEFAULT {
            count += 1;
        }
        if self.target_name.is_some() {
            count += 1;
        }
        // the two activity toggles count as one filter group
        if !self.show_active || !self.show_inactive {
            count += 1;
        }
        if self.predicted_active.is_some() {
            count += 1;
        }
        count
    }
}
