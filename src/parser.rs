//! Best-effort extraction of structured data from model text
//!
//! Models wrap JSON in prose or markdown fences often enough that a plain
//! `serde_json::from_str` is not sufficient. `safe_json_load` tries a fixed
//! chain of strategies and never fails; the typed decoders on top of it
//! always produce a value, falling back to empty defaults.

use crate::models::{ActionItem, RiskReport};
use serde_json::Value;
use tracing::debug;

/// Keys under which models sometimes wrap the action list
const ACTION_LIST_KEYS: &[&str] = &["action_items", "actions", "tasks"];

/// Parse a JSON value out of possibly noisy model output.
///
/// Strategies, first success wins:
/// 1. blank input yields `None`
/// 2. the whole string
/// 3. first `[` through last `]`
/// 4. first `{` through last `}`
pub fn safe_json_load(raw: Option<&str>) -> Option<Value> {
    let text = raw?;
    if text.trim().is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    parse_between(text, '[', ']').or_else(|| parse_between(text, '{', '}'))
}

fn parse_between(text: &str, open: char, close: char) -> Option<Value> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Decode the action agent's output. Unusable output yields an empty list.
pub fn decode_action_items(raw: &str) -> Vec<ActionItem> {
    let entries = match safe_json_load(Some(raw)) {
        Some(Value::Array(items)) => items,
        Some(Value::Object(mut map)) => {
            if map.contains_key("task") {
                vec![Value::Object(map)]
            } else {
                ACTION_LIST_KEYS
                    .iter()
                    .find_map(|key| match map.remove(*key) {
                        Some(Value::Array(items)) => Some(items),
                        _ => None,
                    })
                    .unwrap_or_default()
            }
        }
        _ => {
            debug!("Action output had no usable JSON, defaulting to empty list");
            Vec::new()
        }
    };

    entries.iter().filter_map(action_item_from_value).collect()
}

fn action_item_from_value(value: &Value) -> Option<ActionItem> {
    let task = value.get("task")?.as_str()?.trim();
    if task.is_empty() {
        return None;
    }

    Some(ActionItem {
        task: task.to_string(),
        owner: optional_text(value.get("owner")),
        deadline: optional_text(value.get("deadline")),
        dependencies: string_list(value.get("dependencies")),
    })
}

/// Decode the risk agent's output. Missing keys default to empty lists.
pub fn decode_risk_report(raw: &str) -> RiskReport {
    let object = match safe_json_load(Some(raw)) {
        Some(value @ Value::Object(_)) => Some(value),
        // An inner list can win the `[`..`]` strategy; retry on the braces.
        Some(_) => parse_between(raw, '{', '}').filter(Value::is_object),
        None => None,
    };

    match object {
        Some(value) => RiskReport {
            open_questions: string_list(
                value
                    .get("open_questions")
                    .or_else(|| value.get("openQuestions")),
            ),
            risks: string_list(value.get("risks")),
            assumptions: string_list(value.get("assumptions")),
        },
        None => {
            debug!("Risk output had no usable JSON object, defaulting to empty report");
            RiskReport::default()
        }
    }
}

fn optional_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => {
            let text = text.trim();
            let lowered = text.to_lowercase();
            if text.is_empty() || lowered == "null" || lowered == "none" {
                None
            } else {
                Some(text.to_string())
            }
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
                Value::String(_) | Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(Value::String(text)) if !text.trim().is_empty() => vec![text.trim().to_string()],
        _ => Vec::new(),
    }
}
