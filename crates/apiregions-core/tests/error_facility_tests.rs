use apiregions_core::errors::{ApiRegionsError, ErrorCategory, ExError, ExErrorKind};

#[test]
fn test_missing_allow_list_is_usage() {
    let ex_err: ExError = ApiRegionsError::NoRegionsSpecified.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MissingRegionAllowList);
    assert_eq!(ex_err.code(), "ERR_MISSING_REGION_ALLOW_LIST");
    assert_eq!(ex_err.category(), ErrorCategory::Usage);
}

#[test]
fn test_unknown_parent_structured_fields() {
    let err = ApiRegionsError::UnknownParentRegion {
        feature_id: "g:f:1".to_string(),
        region: "internal".to_string(),
        parent: "missing".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::UnknownParentRegion);
    assert_eq!(ex_err.category(), ErrorCategory::Configuration);
    assert_eq!(ex_err.op(), Some("resolve_regions"));
    assert_eq!(ex_err.feature_id(), Some("g:f:1"));
    assert_eq!(ex_err.region(), Some("internal"));
    assert!(ex_err.message().contains("missing"));
}

#[test]
fn test_cycle_carries_members() {
    let err = ApiRegionsError::RegionParentCycle {
        feature_id: "g:f:1".to_string(),
        cycle: vec!["a".to_string(), "b".to_string()],
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.code(), "ERR_CYCLE_DETECTED");
    assert_eq!(
        ex_err.regions(),
        Some(&["a".to_string(), "b".to_string()][..])
    );
}

#[test]
fn test_overlap_is_analysis_outcome() {
    let err = ApiRegionsError::OverlapFound {
        count: 2,
        summary: "details".to_string(),
    };
    assert!(err.to_string().starts_with("Errors found"));

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.category(), ErrorCategory::Analysis);
    assert_eq!(ex_err.code(), "ERR_OVERLAP_FOUND");
}

#[test]
fn test_io_errors_share_category() {
    let missing = ExError::from(ApiRegionsError::BundleNotFound {
        bundle_id: "g:b:1".to_string(),
        location: "/repo".to_string(),
    });
    let manifest = ExError::from(ApiRegionsError::MalformedManifest {
        location: "/repo/MANIFEST.MF".to_string(),
        reason: "not utf-8".to_string(),
    });

    assert_eq!(missing.kind(), ExErrorKind::NotFound);
    assert_eq!(missing.bundle_id(), Some("g:b:1"));
    assert_eq!(manifest.kind(), ExErrorKind::Io);
    assert_eq!(missing.category(), manifest.category());
}

#[test]
fn test_display_includes_code_and_context() {
    let ex_err = ExError::from(ApiRegionsError::DuplicateRegion {
        feature_id: "g:f:1".to_string(),
        region: "global".to_string(),
    });
    let rendered = ex_err.to_string();

    assert!(rendered.starts_with("[ERR_DUPLICATE_REGION]"));
    assert!(rendered.contains("g:f:1"));
    assert!(rendered.contains("global"));
}

#[test]
fn test_error_kind_codes_are_unique() {
    let kinds = [
        ExErrorKind::MissingRegionAllowList,
        ExErrorKind::NoFeaturesSelected,
        ExErrorKind::UnknownParentRegion,
        ExErrorKind::CycleDetected,
        ExErrorKind::DuplicateRegion,
        ExErrorKind::MalformedExtension,
        ExErrorKind::InvalidDescriptor,
        ExErrorKind::InvalidArtifactId,
        ExErrorKind::MalformedExportHeader,
        ExErrorKind::InvalidConfig,
        ExErrorKind::OverlapFound,
        ExErrorKind::NotFound,
        ExErrorKind::Io,
        ExErrorKind::Serialization,
        ExErrorKind::Internal,
    ];

    let codes: std::collections::BTreeSet<_> = kinds.iter().map(|k| k.code()).collect();
    assert_eq!(codes.len(), kinds.len());
}
