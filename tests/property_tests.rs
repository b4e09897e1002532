use document_intelligence::llm::{choose_tier, RoutingPolicy};
use document_intelligence::parser::{decode_action_items, decode_risk_report};
use document_intelligence::{safe_json_load, Message, Tier};
use proptest::prelude::*;
use serde_json::Value;

/// Free text that never contains JSON brackets or braces
fn prose() -> impl Strategy<Value = String> {
    "[A-Za-z .,:\n]{0,40}"
}

fn string_array() -> impl Strategy<Value = Value> {
    prop::collection::vec("[a-z ]{0,10}", 0..6).prop_map(|items| serde_json::json!(items))
}

/// Objects without nested arrays, so no inner `[`..`]` can win first
fn flat_object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z_]{1,8}", "[a-z ]{0,10}", 0..6)
        .prop_map(|map| serde_json::json!(map))
}

proptest! {
    #[test]
    fn test_bare_json_is_returned_unchanged(value in prop_oneof![string_array(), flat_object()]) {
        let text = value.to_string();
        prop_assert_eq!(safe_json_load(Some(&text)), Some(value));
    }

    #[test]
    fn test_array_wrapped_in_prose_is_recovered(
        before in prose(),
        value in string_array(),
        after in prose(),
    ) {
        let text = format!("{}{}{}", before, value, after);
        prop_assert_eq!(safe_json_load(Some(&text)), Some(value));
    }

    #[test]
    fn test_object_wrapped_in_prose_is_recovered(
        before in prose(),
        value in flat_object(),
        after in prose(),
    ) {
        let text = format!("{}{}{}", before, value, after);
        prop_assert_eq!(safe_json_load(Some(&text)), Some(value));
    }

    #[test]
    fn test_blank_text_yields_none(text in "[ \t\r\n]{0,20}") {
        prop_assert_eq!(safe_json_load(Some(&text)), None);
    }

    #[test]
    fn test_decoders_accept_any_text(text in ".{0,200}") {
        let _ = safe_json_load(Some(&text));
        let items = decode_action_items(&text);
        prop_assert!(items.iter().all(|item| !item.task.trim().is_empty()));
        let _ = decode_risk_report(&text);
    }

    #[test]
    fn test_tier_is_advanced_only_above_threshold(
        lengths in prop::collection::vec(0usize..3000, 1..4),
        threshold in 0usize..8000,
    ) {
        let messages: Vec<Message> = lengths
            .iter()
            .map(|len| Message::user("é".repeat(*len)))
            .collect();
        let total: usize = lengths.iter().sum();

        let expected = if total > threshold { Tier::Advanced } else { Tier::Baseline };
        prop_assert_eq!(
            choose_tier(&messages, &RoutingPolicy { threshold_chars: threshold }),
            expected
        );
    }
}
