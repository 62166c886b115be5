use bioinsight::filter::state::Range;
use bioinsight::filter::{FilterConfig, FilterEvent, FilterPatch, extract, to_search_query};

#[test]
fn test_documented_defaults() {
    let config = FilterConfig::default();
    assert_eq!(
        config.mol_weight,
        Range {
            min: 100.0,
            max: 600.0
        }
    );
    assert_eq!(config.log_p, Range { min: -1.0, max: 5.0 });
    assert_eq!(
        config.tpsa,
        Range {
            min: 0.0,
            max: 160.0
        }
    );
    assert_eq!(config.target_name, None);
    assert!(config.show_active);
    assert!(config.show_inactive);
    assert_eq!(config.predicted_active, None);
}

#[test]
fn test_empty_patch_merges_to_defaults() {
    let merged = FilterConfig::merged_over_defaults(&FilterPatch::default());
    assert_eq!(merged, FilterConfig::default());
    assert!(!merged.has_active_filters());
}

#[test]
fn test_natural_query_merges_over_defaults_not_current() {
    // Hand-set sliders first, then issue a natural-language query: the
    // query result must be the extractor output over defaults, with the
    // manual LogP adjustment gone.
    let config = FilterConfig::default()
        .apply(FilterEvent::SetLogP(0.0, 2.0))
        .unwrap()
        .apply(FilterEvent::NaturalQuery(
            "compounds with tpsa below 120".to_string(),
        ))
        .unwrap();

    assert_eq!(config.log_p, Range { min: -1.0, max: 5.0 });
    assert_eq!(
        config.tpsa,
        Range {
            min: 0.0,
            max: 120.0
        }
    );
}

#[test]
fn test_manual_events_compose() {
    let config = FilterConfig::default()
        .apply(FilterEvent::SetMolWeight(200.0, 450.0))
        .unwrap()
        .apply(FilterEvent::SetPredictedActive(Some(false)))
        .unwrap()
        .apply(FilterEvent::SetShowInactive(false))
        .unwrap();

    assert_eq!(
        config.mol_weight,
        Range {
            min: 200.0,
            max: 450.0
        }
    );
    assert_eq!(config.predicted_active, Some(false));
    assert!(config.show_active);
    assert!(!config.show_inactive);
    assert_eq!(config.active_filter_count(), 3);
}

#[test]
fn test_query_payload_reflects_extracted_ranges() {
    let config = FilterConfig::default()
        .apply(FilterEvent::NaturalQuery(
            "small molecule with high activity".to_string(),
        ))
        .unwrap();

    let query = to_search_query(&config);
    assert_eq!(query.molwt_min, Some(100.0));
    assert_eq!(query.molwt_max, Some(300.0));
    assert_eq!(query.is_active, Some(1));
}

#[test]
fn test_extractor_bypasses_range_validation() {
    // The extractor passes out-of-domain bounds through unchecked, so an
    // inverted TPSA range can enter the config via the natural-query path
    // even though manual edits would reject the same bounds.
    let patch = extract("tpsa above 200");
    let config = FilterConfig::merged_over_defaults(&patch);
    assert_eq!(
        config.tpsa,
        Range {
            min: 200.0,
            max: 160.0
        }
    );

    assert!(
        FilterConfig::default()
            .apply(FilterEvent::SetTpsa(200.0, 160.0))
            .is_err()
    );
}

#[test]
fn test_reset_event() {
    let config = FilterConfig::default()
        .apply(FilterEvent::NaturalQuery("inactive hiv compounds".to_string()))
        .unwrap();
    assert!(config.has_active_filters());

    let reset = config.apply(FilterEvent::Reset).unwrap();
    assert_eq!(reset, FilterConfig::default());
}
