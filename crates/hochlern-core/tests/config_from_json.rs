//! Stellt sicher, dass Konfigurationsdateien im historischen
//! Formularformat (camelCase-Schlüssel) vollständig eingelesen werden.

use hochlern_core::SimConfig;
use serde_json::json;

#[test]
fn full_form_payload_deserializes() {
    let payload = json!({
        "highPayoff": 10,
        "lowPayoff": 5,
        "startHigh": 0.2,
        "startLow": 0.8,
        "highGivenHigh": 0.2,
        "lowGivenHigh": 0.8,
        "highGivenLow": 0.2,
        "lowGivenLow": 0.8,
        "discountFactor": 0.99,
        "learningRate": 0.10,
        "numPeriods": 50,
        "numLearnIterations": 100,
        "numTestIterations": 100
    });

    let cfg: SimConfig = serde_json::from_value(payload).expect("Deserialization failed");
    assert_eq!(cfg, SimConfig::default());
}

#[test]
fn missing_field_is_rejected() {
    let payload = json!({
        "highPayoff": 10,
        "lowPayoff": 5
    });

    let err = serde_json::from_value::<SimConfig>(payload);
    assert!(err.is_err());
}

#[test]
fn unknown_fields_are_tolerated() {
    let mut value = serde_json::to_value(SimConfig::default()).expect("Serialization failed");
    value
        .as_object_mut()
        .expect("config serializes as object")
        .insert("comment".into(), json!("from an old form export"));

    let cfg: SimConfig = serde_json::from_value(value).expect("Deserialization failed");
    assert_eq!(cfg, SimConfig::default());
}
