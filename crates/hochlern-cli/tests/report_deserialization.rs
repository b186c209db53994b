use hochlern_harness::RunReport;

#[test]
fn test_report_deserialization() {
    let json = r#"
    {
        "ts": "2026-01-04T12:00:00Z",
        "achieved": 287.5,
        "maximum": 405.0,
        "score_fraction": 0.7098765
    }
    "#;

    let report: RunReport = serde_json::from_str(json).expect("Failed to deserialize report");

    assert_eq!(report.ts, "2026-01-04T12:00:00Z");
    assert!((report.achieved - 287.5).abs() < 1e-3);
    assert!((report.maximum - 405.0).abs() < 1e-3);
    assert!(report.score_fraction < 1.0);
}
