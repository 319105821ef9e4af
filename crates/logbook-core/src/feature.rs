use crate::types::FeatureStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key the aggregator writes on every record to say which source it came from.
pub const PROJECT_KEY: &str = "_project";

/// Sort key used for records without a usable priority.
pub const DEFAULT_PRIORITY: u64 = 99;

// ---------------------------------------------------------------------------
// FeatureRecord
// ---------------------------------------------------------------------------

/// One entry from a feature file.
///
/// Feature files are written by other tools, so the record is kept as an open
/// JSON object: unknown fields survive untouched and the typed accessors below
/// read the handful of fields the roadmap cares about. Accessors never fail;
/// a field of the wrong type reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureRecord(Map<String, Value>);

impl FeatureRecord {
    /// Wrap one array element from a feature file. Non-object elements become
    /// empty records so they still count toward totals.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn id(&self) -> Option<String> {
        self.get("id").and_then(display_text)
    }

    pub fn title(&self) -> Option<String> {
        self.get("title").and_then(display_text)
    }

    /// Raw status string, canonical or not.
    pub fn status_str(&self) -> Option<&str> {
        self.get("status").and_then(Value::as_str)
    }

    /// Canonical status, or `None` for missing and unrecognized values.
    pub fn status(&self) -> Option<FeatureStatus> {
        self.status_str().and_then(|s| s.parse().ok())
    }

    /// Positive integer priority. Integer-valued floats and numeric strings
    /// are accepted; zero and anything else read as absent.
    pub fn priority(&self) -> Option<u64> {
        let priority = match self.get("priority")? {
            // `1.0` is the same JSON number as `1`.
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f > 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        priority.filter(|p| *p > 0)
    }

    pub fn effective_priority(&self) -> u64 {
        self.priority().unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn dependencies(&self) -> Vec<String> {
        self.string_list("dependencies")
    }

    pub fn notes(&self) -> Vec<String> {
        self.string_list("notes")
    }

    pub fn last_note(&self) -> Option<String> {
        match self.get("notes")? {
            Value::Array(items) => items.last().and_then(display_text),
            _ => None,
        }
    }

    /// Source name written by [`FeatureRecord::tag_project`].
    pub fn project(&self) -> Option<&str> {
        self.get(PROJECT_KEY).and_then(Value::as_str)
    }

    pub fn tag_project(&mut self, name: &str) {
        self.0
            .insert(PROJECT_KEY.to_string(), Value::String(name.to_string()));
    }

    /// Accept `name` as an alias for `title`: when `title` is missing or falsy
    /// and `name` is truthy, copy `name` over. Nothing else is touched, so
    /// applying it twice is the same as once.
    pub fn normalize(&mut self) {
        if self.get("title").is_some_and(is_truthy) {
            return;
        }
        if let Some(name) = self.get("name").filter(|v| is_truthy(v)).cloned() {
            self.0.insert("title".to_string(), name);
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(display_text).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<FeatureRecord> for Value {
    fn from(record: FeatureRecord) -> Self {
        Value::Object(record.0)
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar for display. Strings are used as-is, `null` is absent and
/// anything else falls back to its JSON text.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> FeatureRecord {
        FeatureRecord::from_value(value)
    }

    #[test]
    fn name_fills_missing_title() {
        let r = record(json!({"id": "F1", "name": "Login"})).normalized();
        assert_eq!(r.title().as_deref(), Some("Login"));
        assert_eq!(r.get("name"), Some(&json!("Login")));
    }

    #[test]
    fn name_fills_falsy_title() {
        for title in [json!(""), json!(null), json!(false), json!(0)] {
            let r = record(json!({"title": title, "name": "Login"})).normalized();
            assert_eq!(r.title().as_deref(), Some("Login"));
        }
    }

    #[test]
    fn existing_title_wins_over_name() {
        let r = record(json!({"title": "Sign in", "name": "Login"})).normalized();
        assert_eq!(r.title().as_deref(), Some("Sign in"));
    }

    #[test]
    fn falsy_name_is_not_copied() {
        let r = record(json!({"name": ""})).normalized();
        assert!(r.get("title").is_none());
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in [
            json!({"name": "A"}),
            json!({"title": "", "name": "B"}),
            json!({"title": "C", "name": "D"}),
            json!({"id": 7}),
        ] {
            let once = record(raw.clone()).normalized();
            let twice = once.clone().normalized();
            assert_eq!(once, twice, "not idempotent for {raw}");
        }
    }

    #[test]
    fn unknown_fields_pass_through() {
        let r = record(json!({"id": "F1", "owner": {"team": "web"}, "status": "done"}))
            .normalized();
        assert_eq!(r.get("owner"), Some(&json!({"team": "web"})));
        assert_eq!(r.status_str(), Some("done"));
        assert_eq!(r.status(), None);
    }

    #[test]
    fn priority_rules() {
        assert_eq!(record(json!({"priority": 3})).priority(), Some(3));
        assert_eq!(record(json!({"priority": "2"})).priority(), Some(2));
        assert_eq!(record(json!({"priority": 0})).priority(), None);
        assert_eq!(record(json!({"priority": -1})).priority(), None);
        assert_eq!(record(json!({"priority": "high"})).priority(), None);
        assert_eq!(record(json!({"priority": 1.0})).priority(), Some(1));
        assert_eq!(record(json!({"priority": 2.5})).priority(), None);
        assert_eq!(record(json!({"priority": 0.0})).priority(), None);
        assert_eq!(record(json!({})).effective_priority(), DEFAULT_PRIORITY);
    }

    #[test]
    fn lists_and_last_note() {
        let r = record(json!({
            "dependencies": ["F1", "F2"],
            "notes": ["started", "blocked on API"],
        }));
        assert_eq!(r.dependencies(), vec!["F1", "F2"]);
        assert_eq!(r.notes().len(), 2);
        assert_eq!(r.last_note().as_deref(), Some("blocked on API"));

        let empty = record(json!({"notes": []}));
        assert!(empty.dependencies().is_empty());
        assert!(empty.last_note().is_none());
    }

    #[test]
    fn non_object_elements_become_empty_records() {
        let r = record(json!(42));
        assert!(r.fields().is_empty());
        assert_eq!(r.status(), None);
        assert_eq!(r.effective_priority(), DEFAULT_PRIORITY);
    }

    #[test]
    fn tagging_sets_project() {
        let mut r = record(json!({"id": 1}));
        r.tag_project("alpha");
        assert_eq!(r.project(), Some("alpha"));
        assert_eq!(r.id().as_deref(), Some("1"));
        assert_eq!(Value::from(r)["_project"], "alpha");
    }
}
