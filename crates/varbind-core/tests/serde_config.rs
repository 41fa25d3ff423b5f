//! Hydrating variables from serialized configuration.

#![cfg(feature = "serde")]

use varbind_core::{
    AnyValue, ConfigError, Instrumentation, TypedVariable, Vec2, VariableConfig, WriteOutcome,
};

#[test]
fn config_loads_from_json() {
    let json = r#"{
        "name": "health",
        "initial_value": 100,
        "mutable": true,
        "clamp": { "min": 0, "max": 100 },
        "instrumentation": { "debug": true, "track_changes": true, "trace_calls": false }
    }"#;
    let config: VariableConfig<i32> = serde_json::from_str(json).unwrap();
    let health = TypedVariable::from_config(config).unwrap();

    assert_eq!(health.name(), "health");
    assert_eq!(health.get(), 100);
    assert_eq!(health.set(150), WriteOutcome::Unchanged);
    assert_eq!(health.set(-5), WriteOutcome::Changed);
    assert_eq!(health.get(), 0);
    assert_eq!(health.history().map(|h| h.len()), Some(1));
}

#[test]
fn config_round_trips_through_json() {
    let config = VariableConfig::new(Vec2::new(0.5, -1.0))
        .with_name("offset")
        .with_mutable(true)
        .with_instrumentation(Instrumentation {
            debug: true,
            ..Instrumentation::default()
        });
    let json = serde_json::to_string(&config).unwrap();
    let back: VariableConfig<Vec2> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn loaded_config_with_inverted_bounds_is_rejected() {
    let json = r#"{
        "name": "speed",
        "initial_value": 1.0,
        "mutable": true,
        "clamp": { "min": 5.0, "max": 1.0 },
        "instrumentation": { "debug": false, "track_changes": false, "trace_calls": false }
    }"#;
    let config: VariableConfig<f32> = serde_json::from_str(json).unwrap();
    let err = TypedVariable::from_config(config).unwrap_err();
    assert!(matches!(err, ConfigError::InvertedClampBounds { .. }));
}

#[test]
fn any_value_is_tagged_by_kind() {
    let value = AnyValue::Float(0.25);
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, r#"{"Float":0.25}"#);
    let back: AnyValue = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);
}
