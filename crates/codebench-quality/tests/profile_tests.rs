//! Integration tests for scoring tables loaded from the shared fixtures.

use codebench_core::{CategoryKey, ComparisonSet, RawMetrics};
use codebench_quality::{normalize, ProfileError, ScoringProfile};

/// Resolve a path under `testing/fixtures` from the workspace root
fn fixture_path(relative: &str) -> String {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root
        .join("testing/fixtures")
        .join(relative)
        .to_string_lossy()
        .to_string()
}

fn load_set(name: &str) -> ComparisonSet {
    let content = std::fs::read_to_string(fixture_path(&format!("comparison-sets/{}", name))).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// Standard table against fixture data
// =============================================================================

#[test]
fn test_fixture_scores() {
    let set = load_set("three-models.json");

    let claude = normalize(set.generated_codes[0].metrics.as_ref().unwrap());
    assert!(approx(claude.correctness, 290.0 / 3.0));
    assert!(approx(claude.efficiency, 248.0 / 3.0));
    assert_eq!(claude.maintainability, 79.75);
    assert_eq!(claude.security, 100.0);

    let gpt = normalize(set.generated_codes[1].metrics.as_ref().unwrap());
    assert!(approx(gpt.correctness, 295.0 / 3.0));
    assert!(approx(gpt.efficiency, 257.0 / 3.0));
    assert_eq!(gpt.maintainability, 83.25);
    assert_eq!(gpt.security, 93.75);
}

#[test]
fn test_partially_analyzed_record_is_pulled_down() {
    let set = load_set("three-models.json");
    let mistral = normalize(set.generated_codes[3].metrics.as_ref().unwrap());

    assert!(approx(mistral.correctness, 190.0 / 3.0));
    assert_eq!(mistral.efficiency, 0.0);
    assert_eq!(mistral.maintainability, 0.0);
    assert_eq!(mistral.security, 87.5);
}

// =============================================================================
// Custom tables
// =============================================================================

#[test]
fn test_load_floored_security_profile() {
    let profile = ScoringProfile::load(&fixture_path("profiles/floored-security.yaml")).unwrap();
    assert_eq!(profile.name, "floored-security@1.0");
    assert_eq!(profile.terms.len(), 14);

    let metrics = RawMetrics {
        xss_vulnerabilities: Some(5.0),
        ..Default::default()
    };
    // Per-term floor: (0 + 100 + 100 + 100) / 4
    assert_eq!(profile.normalize(&metrics).security, 75.0);
    // Standard table leaves the -25 in the sum
    assert_eq!(normalize(&metrics).security, 68.75);
}

#[test]
fn test_floored_profile_matches_standard_elsewhere() {
    let profile = ScoringProfile::load(&fixture_path("profiles/floored-security.yaml")).unwrap();
    let set = load_set("three-models.json");

    for code in set.analyzed() {
        let metrics = code.metrics.as_ref().unwrap();
        let custom = profile.normalize(metrics);
        let standard = normalize(metrics);
        for key in [CategoryKey::Correctness, CategoryKey::Efficiency, CategoryKey::Maintainability] {
            assert!(approx(custom.get(key), standard.get(key)), "{} differs for {}", key, code.llm_name);
        }
    }
}

#[test]
fn test_invalid_yaml_is_rejected() {
    let result = ScoringProfile::from_yaml("name: broken\nterms: [ { field: notAField } ]");
    assert!(matches!(result, Err(ProfileError::Parse(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = ScoringProfile::load(&fixture_path("profiles/does-not-exist.yaml"));
    assert!(matches!(result, Err(ProfileError::Io(_))));
}
