use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::constants::report_keys;

const NULL_LONGREPR: &str = "None";

/// One entry of `report.tests` in a pytest JSON report.
///
/// Only the fields the log needs are decoded; everything else stays in the
/// raw document and is carried into the formatted copy untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestCase {
    /// Test node id, e.g. `tests/test_api.py::test_login`
    pub name: String,
    /// `passed`, `failed`, `skipped`, ...
    pub outcome: String,
    /// Wall time of the test in seconds
    pub duration: f64,
    /// Call phase details, present for executed tests
    #[serde(default)]
    pub call: Option<TestCall>,
}

/// The `call` phase of a test entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestCall {
    /// Failure representation; pytest emits a string, anything else is kept as JSON.
    /// An explicit `null` is `Some(Value::Null)`, only an absent key is `None`.
    #[serde(default, deserialize_with = "present_value")]
    pub longrepr: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TestCase {
    pub fn is_failed(&self) -> bool {
        self.outcome == report_keys::OUTCOME_FAILED
    }

    /// Failure text as it should appear in the log, if the entry carries one.
    pub fn failure_message(&self) -> Option<String> {
        let longrepr = self.call.as_ref()?.longrepr.as_ref()?;
        Some(match longrepr {
            Value::String(text) => text.clone(),
            Value::Null => NULL_LONGREPR.to_string(),
            other => other.to_string(),
        })
    }
}

/// Aggregate counts derived once from `report.summary`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total: i64,
    pub passed: i64,
    pub failed: i64,
    pub duration: f64,
}

impl Summary {
    /// Derive the summary from the raw `summary` object.
    ///
    /// Missing or non-numeric counters count as zero and the passed count is
    /// `total - failed`, even when that goes negative. The subtraction
    /// saturates at the `i64` bounds.
    pub fn from_summary_value(summary: &Value) -> Self {
        let total = integer_field(summary, report_keys::NUM_TESTS);
        let failed = integer_field(summary, report_keys::FAILED);
        let duration = summary
            .get(report_keys::DURATION)
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        Self {
            total,
            passed: total.saturating_sub(failed),
            failed,
            duration,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

fn integer_field(object: &Value, key: &str) -> i64 {
    match object.get(key) {
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        None => 0,
    }
}
