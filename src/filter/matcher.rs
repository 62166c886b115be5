use super::state::FilterConfig;
use crate::client::SearchQuery;
use crate::compound::Compound;

/// Decide whether a compound should be displayed under the current filters
///
/// Only the predicted-activity flag is enforced client-side; range, target,
/// and experimental-activity constraints are part of the backend query and
/// arrive pre-filtered.
pub fn matches_compound(config: &FilterConfig, compound: &Compound) -> bool {
    match config.predicted_active {
        Some(expected) => compound.predicted_active == expected,
        None => true,
    }
}

/// Translate the filter configuration into the backend search payload
///
/// The backend expects flat optional bounds plus a 0/1 activity flag; both
/// activity toggles on (or both off) means no constraint.
pub fn to_search_query(config: &FilterConfig) -> SearchQuery {
    SearchQuery {
        molwt_min: Some(config.mol_weight.min),
        molwt_max: Some(config.mol_weight.max),
        logp_min: Some(config.log_p.min),
        logp_max: Some(config.log_p.max),
        psa_max: Some(config.tpsa.max),
        is_active: match (config.show_active, config.show_inactive) {
            (true, false) => Some(1),
            (false, true) => Some(0),
            _ => None,
        },
        nlq: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::state::FilterEvent;

    fn test_compound(predicted_active: bool) -> Compound {
        Compound {
            compound_id: "CHEMBL25".to_string(),
            target_name: "Cyclooxygenase-2".to_string(),
            mol_weight: 180.16,
            log_p: 1.3,
            tpsa: 63.6,
            hbd: 1,
            hba: 3,
            rotatable_bonds: 2,
            is_active: true,
            predicted_active,
            confidence: 0.91,
        }
    }

    #[test]
    fn test_no_predicted_filter_includes_everything() {
        let config = FilterConfig::default();
        assert!(matches_compound(&config, &test_compound(true)));
        assert!(matches_compound(&config, &test_compound(false)));
    }

    #[test]
    fn test_predicted_filter_excludes_mismatches() {
        let config = FilterConfig::default()
            .apply(FilterEvent::SetPredictedActive(Some(true)))
            .unwrap();
        assert!(matches_compound(&config, &test_compound(true)));
        assert!(!matches_compound(&config, &test_compound(false)));
    }

    #[test]
    fn test_default_query_has_no_activity_constraint() {
        let query = to_search_query(&FilterConfig::default());
        assert_eq!(query.molwt_min, Some(100.0));
        assert_eq!(query.molwt_max, Some(600.0));
        assert_eq!(query.psa_max, Some(160.0));
        assert_eq!(query.is_active, None);
    }

    #[test]
    fn test_exclusive_activity_toggle_maps_to_flag() {
        let active_only = FilterConfig::default()
            .apply(FilterEvent::SetShowInactive(false))
            .unwrap();
        assert_eq!(to_search_query(&active_only).is_active, Some(1));

        let inactive_only = FilterConfig::default()
            .apply(FilterEvent::SetShowActive(false))
            .unwrap();
        assert_eq!(to_search_query(&inactive_only).is_active, Some(0));
    }
}
