//! Property tests for payload normalization.
//!
//! Normalization is a best-effort sanitizer over arbitrarily malformed
//! input. These properties pin down its contract:
//!
//! - it never panics, whatever the payload shape;
//! - its output satisfies the canonical-model invariants;
//! - it is idempotent: re-normalizing its own serialized output is identity.

use nadzor_core::model::Area;
use nadzor_core::normalize::normalize;
use proptest::prelude::*;
use serde_json::{Value, json};

fn arb_name() -> impl Strategy<Value = String> + Clone {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-z]{1,10}",
        "[a-z]{1,8}".prop_map(|s| format!("  {s} ")),
    ]
}

fn arb_tag() -> impl Strategy<Value = String> + Clone {
    prop_oneof![
        Just("general".to_string()),
        Just(" VIOLATIONS ".to_string()),
        Just("deficiencies".to_string()),
        Just("remarks".to_string()),
        Just(String::new()),
    ]
}

fn arb_template() -> impl Strategy<Value = Value> + Clone {
    prop_oneof![
        arb_name().prop_map(Value::String),
        (arb_name(), prop::collection::vec(arb_tag(), 0..3))
            .prop_map(|(name, tags)| json!({"name": name, "tags": tags})),
        (arb_name(), arb_tag()).prop_map(|(name, tag)| json!({"title": name, "tag": tag})),
        Just(json!(5)),
    ]
}

fn arb_level3() -> impl Strategy<Value = Value> + Clone {
    prop_oneof![
        arb_name().prop_map(Value::String),
        arb_name().prop_map(|name| json!({"name": name})),
        (arb_name(), "[a-z0-9-]{1,12}")
            .prop_map(|(name, id)| json!({"id": id, "title": name})),
        Just(Value::Null),
    ]
}

fn arb_level2() -> impl Strategy<Value = Value> + Clone {
    let items = prop::collection::vec(arb_level3(), 0..4);
    prop_oneof![
        arb_name().prop_map(Value::String),
        (arb_name(), items.clone()).prop_map(|(name, kids)| json!({"name": name, "children": kids})),
        (arb_name(), items.clone()).prop_map(|(name, kids)| json!({"title": name, "items": kids})),
        items.prop_map(|kids| json!({"level3": kids})),
        Just(json!(42)),
    ]
}

fn arb_area() -> impl Strategy<Value = Value> + Clone {
    let subs = prop::collection::vec(arb_level2(), 0..4);
    let templates = prop::collection::vec(arb_template(), 0..4);
    prop_oneof![
        (arb_name(), subs.clone(), templates.clone())
            .prop_map(|(name, subs, ts)| json!({"name": name, "children": subs, "templates": ts})),
        (arb_name(), subs.clone())
            .prop_map(|(name, subs)| json!({"title": name, "items": subs})),
        ("[a-z0-9-]{1,12}", arb_name(), subs)
            .prop_map(|(id, name, subs)| json!({"id": id, "level1": name, "level2": subs})),
        Just(Value::Null),
    ]
}

fn arb_payload() -> impl Strategy<Value = Value> + Clone {
    let areas = prop::collection::vec(arb_area(), 0..4);
    prop_oneof![
        areas.clone().prop_map(Value::from),
        areas.clone().prop_map(|areas| json!({"items": areas})),
        areas.prop_map(|areas| json!({"data": {"items": areas}})),
        Just(json!({"count": 3})),
        Just(json!("not a list")),
    ]
}

fn check_invariants(areas: &[Area]) -> Result<(), TestCaseError> {
    for area in areas {
        prop_assert!(!area.id.is_empty());
        prop_assert_eq!(area.name.trim(), area.name.as_str());
        for sub in &area.children {
            prop_assert!(!sub.id.is_empty());
            prop_assert_eq!(sub.name.trim(), sub.name.as_str());
            prop_assert!(!sub.name.is_empty() || !sub.children.is_empty());
            for item in &sub.children {
                prop_assert!(!item.id.is_empty());
                prop_assert!(!item.name.is_empty());
                prop_assert_eq!(item.name.trim(), item.name.as_str());
            }
        }
        for template in &area.templates {
            prop_assert!(!template.id.is_empty());
            prop_assert_eq!(template.name.trim(), template.name.as_str());
            prop_assert!(template.tags.len() <= 1);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn output_satisfies_model_invariants(payload in arb_payload()) {
        let areas = normalize(&payload);
        check_invariants(&areas)?;
    }

    #[test]
    fn normalize_is_idempotent(payload in arb_payload()) {
        let once = normalize(&payload);
        let reserialized = serde_json::to_value(&once).expect("serialize");
        let twice = normalize(&reserialized);
        prop_assert_eq!(twice, once);
    }
}
