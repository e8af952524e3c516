//! Top-level key comparison of two JSON documents

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOutcome {
    Same,
    Different,
    MissingInFirst,
    MissingInSecond,
}

impl ComparisonOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ComparisonOutcome::Same => "Same",
            ComparisonOutcome::Different => "Different",
            ComparisonOutcome::MissingInFirst => "Missing in JSON 1",
            ComparisonOutcome::MissingInSecond => "Missing in JSON 2",
        }
    }

    pub fn issue(&self) -> &'static str {
        match self {
            ComparisonOutcome::Same => "None",
            ComparisonOutcome::Different => "Values differ between JSONs",
            ComparisonOutcome::MissingInFirst => "Field only exists in JSON 2",
            ComparisonOutcome::MissingInSecond => "Field only exists in JSON 1",
        }
    }
}

impl fmt::Display for ComparisonOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the comparison table. Backends may send their own rows in
/// this shape, so every column is plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub field: String,
    pub json1_value: String,
    pub json2_value: String,
    pub comparison: String,
    pub issues: String,
}

impl ComparisonRow {
    pub fn is_same(&self) -> bool {
        self.comparison == ComparisonOutcome::Same.label()
    }
}

const ABSENT: &str = "undefined";

fn top_level_entries(value: &Value) -> Vec<(String, &Value)> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

fn render(value: Option<&Value>) -> String {
    value
        .and_then(|v| serde_json::to_string(v).ok())
        .unwrap_or_else(|| ABSENT.to_string())
}

fn lookup(entries: &[(String, &Value)], key: &str) -> Option<String> {
    entries
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| render(Some(v)))
}

/// Rows for the union of top-level keys: keys of `first` in order, then
/// keys found only in `second`. Scalars have no keys and yield no rows.
pub fn compare_json(first: &Value, second: &Value) -> Vec<ComparisonRow> {
    let left = top_level_entries(first);
    let right = top_level_entries(second);

    let mut keys: Vec<&str> = left.iter().map(|(k, _)| k.as_str()).collect();
    for (key, _) in &right {
        if !keys.contains(&key.as_str()) {
            keys.push(key.as_str());
        }
    }

    keys.into_iter()
        .map(|key| {
            let a = lookup(&left, key);
            let b = lookup(&right, key);
            let outcome = match (&a, &b) {
                (None, _) => ComparisonOutcome::MissingInFirst,
                (_, None) => ComparisonOutcome::MissingInSecond,
                (Some(x), Some(y)) if x != y => ComparisonOutcome::Different,
                _ => ComparisonOutcome::Same,
            };
            ComparisonRow {
                field: key.to_string(),
                json1_value: a.unwrap_or_else(|| render(None)),
                json2_value: b.unwrap_or_else(|| render(None)),
                comparison: outcome.label().to_string(),
                issues: outcome.issue().to_string(),
            }
        })
        .collect()
}
