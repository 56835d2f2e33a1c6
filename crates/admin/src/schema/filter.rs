//! Named table filters.
//!
//! A filter owns a small form (its input fields), a pure function that
//! translates that input into query predicates, and a pure function that
//! renders human-readable indicator chips for whatever input is active.
//! Absent input keys contribute nothing - an untouched filter never
//! constrains the query.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::directory::AdminDirectory;
use crate::query::Query;
use crate::schema::form::Field;

/// Submitted input for one filter, keyed by its field names.
#[derive(Debug, Clone, Default)]
pub struct FilterInput(Map<String, Value>);

impl FilterInput {
    /// An empty input (filter untouched).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw value.
    #[must_use]
    pub fn set(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    /// Set a string value.
    #[must_use]
    pub fn set_str(self, key: &str, value: &str) -> Self {
        self.set(key, Value::String(value.to_string()))
    }

    /// Set a date value in the wire format (`YYYY-MM-DD`).
    #[must_use]
    pub fn set_date(self, key: &str, date: NaiveDate) -> Self {
        self.set(key, Value::String(date.format("%Y-%m-%d").to_string()))
    }

    /// A string value, if present and non-empty.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// A date value, if present and parseable.
    #[must_use]
    pub fn get_date(&self, key: &str) -> Option<NaiveDate> {
        self.get_str(key)
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    /// A boolean value, if present.
    ///
    /// Ternary filters submit `"true"` / `"false"` strings; both encodings
    /// are accepted.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// An integer-array value (multi-select ids), if present and non-empty.
    #[must_use]
    pub fn get_int_array(&self, key: &str) -> Option<Vec<i64>> {
        let values: Vec<i64> = self
            .0
            .get(key)?
            .as_array()?
            .iter()
            .filter_map(Value::as_i64)
            .collect();

        if values.is_empty() { None } else { Some(values) }
    }

    /// Whether no keys are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An indicator chip for one active filter constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    /// The input key the chip removes when dismissed.
    pub key: String,
    /// Human-readable label ("De 01/01/2024").
    pub label: String,
}

impl Indicator {
    /// Create an indicator.
    #[must_use]
    pub fn new(key: &str, label: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            label: label.into(),
        }
    }
}

/// Translates filter input into query predicates.
pub type ApplyFn = fn(&FilterInput, &mut Query);

/// Renders indicator chips for active filter input. Relationship filters
/// resolve display names through the directory.
pub type IndicateFn = fn(&FilterInput, &dyn AdminDirectory) -> Vec<Indicator>;

fn no_indicators(_: &FilterInput, _: &dyn AdminDirectory) -> Vec<Indicator> {
    Vec::new()
}

/// A named table filter.
#[derive(Debug, Clone)]
pub struct Filter {
    /// Filter key; also the namespace for its input.
    pub key: &'static str,
    /// The filter's input fields.
    pub fields: Vec<Field>,
    /// Input -> predicates.
    pub apply: ApplyFn,
    /// Input -> indicator chips.
    pub indicate: IndicateFn,
}

impl Filter {
    /// Create a filter with the given apply function.
    #[must_use]
    pub const fn new(key: &'static str, apply: ApplyFn) -> Self {
        Self {
            key,
            fields: Vec::new(),
            apply,
            indicate: no_indicators,
        }
    }

    /// Append an input field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the indicator function.
    #[must_use]
    pub const fn indicators(mut self, indicate: IndicateFn) -> Self {
        self.indicate = indicate;
        self
    }
}

/// Apply every filter's input to a fresh query and collect indicators.
///
/// `inputs` maps filter key to that filter's input; filters without input
/// run against an empty [`FilterInput`] and are expected to contribute
/// nothing.
#[must_use]
pub fn apply_filters(
    filters: &[Filter],
    inputs: &BTreeMap<String, FilterInput>,
    directory: &dyn AdminDirectory,
) -> (Query, Vec<Indicator>) {
    let empty = FilterInput::new();
    let mut query = Query::new();
    let mut indicators = Vec::new();

    for filter in filters {
        let input = inputs.get(filter.key).unwrap_or(&empty);
        (filter.apply)(input, &mut query);
        indicators.extend((filter.indicate)(input, directory));
    }

    (query, indicators)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::query::Predicate;

    fn date_range_apply(input: &FilterInput, query: &mut Query) {
        if let Some(date) = input.get_date("from") {
            query.push(Predicate::DateOnOrAfter {
                column: "published_at".into(),
                date,
            });
        }
        if let Some(date) = input.get_date("until") {
            query.push(Predicate::DateOnOrBefore {
                column: "published_at".into(),
                date,
            });
        }
    }

    struct NoDirectory;
    impl AdminDirectory for NoDirectory {}

    #[test]
    fn test_absent_input_contributes_nothing() {
        let filter = Filter::new("published_at", date_range_apply);
        let (query, indicators) = apply_filters(&[filter], &BTreeMap::new(), &NoDirectory);
        assert!(query.predicates.is_empty());
        assert!(indicators.is_empty());
    }

    #[test]
    fn test_partial_input_contributes_one_bound() {
        let filter = Filter::new("published_at", date_range_apply);
        let mut inputs = BTreeMap::new();
        inputs.insert(
            "published_at".to_string(),
            FilterInput::new().set_date("from", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        );

        let (query, _) = apply_filters(&[filter], &inputs, &NoDirectory);
        assert_eq!(query.predicates.len(), 1);
        assert!(matches!(
            query.predicates.first(),
            Some(Predicate::DateOnOrAfter { .. })
        ));
    }

    #[test]
    fn test_input_accessors() {
        let input = FilterInput::new()
            .set("visible", Value::String("true".into()))
            .set("brands", serde_json::json!([1, 2, 3]))
            .set("empty", Value::String(String::new()));

        assert_eq!(input.get_bool("visible"), Some(true));
        assert_eq!(input.get_int_array("brands"), Some(vec![1, 2, 3]));
        assert_eq!(input.get_str("empty"), None);
        assert_eq!(input.get_date("missing"), None);
    }
}
