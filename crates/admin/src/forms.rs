//! Form submission lifecycle: prepare, then validate.
//!
//! `prepare` turns a raw submission into the values to persist - applying
//! create-time defaults and derivations, freezing disabled fields on edit,
//! and dropping anything the schema does not persist. `validate` then runs
//! every constraint against the prepared values and reports field-level
//! errors. Persistence itself belongs to the caller.

use chrono::NaiveDate;
use rand::Rng;
use serde_json::{Map, Value};

use mercado_core::{Slug, validate_money_input};

use crate::directory::UniquenessProbe;
use crate::error::ValidationErrors;
use crate::schema::form::{
    DefaultValue, DeriveOnCreate, Field, FieldKind, FormSchema, OptionsSource, Rule,
};

/// Standard validation messages.
pub const MSG_REQUIRED: &str = "This field is required.";
/// Uniqueness violation message.
pub const MSG_UNIQUE: &str = "This value is already in use.";
/// Static-select mismatch message.
pub const MSG_INVALID_SELECTION: &str = "Invalid selection.";
/// Email structure message.
pub const MSG_EMAIL: &str = "Must be a valid email address.";

/// A form submission (or the prepared values ready to persist).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(Map<String, Value>);

impl FormValues {
    /// An empty value set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn set(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    /// Builder-style string insert.
    #[must_use]
    pub fn set_str(self, key: &str, value: &str) -> Self {
        self.set(key, Value::String(value.to_string()))
    }

    /// Insert a value.
    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    /// The raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The string value for `key`, if it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Repeater items under `key` as nested value sets.
    #[must_use]
    pub fn items(&self, key: &str) -> Vec<Self> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|obj| Self(obj.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether `key` has no usable value (absent, null, empty string or array).
    #[must_use]
    pub fn is_blank(&self, key: &str) -> bool {
        match self.0.get(key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Array(a)) => a.is_empty(),
            Some(_) => false,
        }
    }

    /// Consume into the underlying JSON map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Iterate over `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for FormValues {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Which operation a form submission belongs to.
#[derive(Debug, Clone)]
pub enum FormContext {
    /// Creating a new record.
    Create,
    /// Editing an existing record.
    Edit {
        /// The record under edit (excluded from uniqueness checks).
        record_id: i32,
        /// The record's current persisted values (source for frozen fields).
        existing: FormValues,
    },
}

impl FormContext {
    /// Whether this is a create operation.
    #[must_use]
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }

    /// The record id under edit, if editing.
    #[must_use]
    pub const fn record_id(&self) -> Option<i32> {
        match self {
            Self::Create => None,
            Self::Edit { record_id, .. } => Some(*record_id),
        }
    }
}

/// Generate a fresh order number: `OR-` plus six random digits.
#[must_use]
pub fn generate_order_number() -> String {
    let n = rand::rng().random_range(100_000..=999_999);
    format!("OR-{n}")
}

/// Turn a submission into the values to persist.
///
/// On create: missing values take their declared defaults, and
/// derive-on-create fields (slugs) are computed from their source field -
/// overriding whatever the client echoed back for the disabled input. On
/// edit: disabled-but-dehydrated fields are frozen to the existing record's
/// value, defaults and derivations do not run. In both cases only fields
/// the schema persists survive.
#[must_use]
pub fn prepare(
    schema: &FormSchema,
    ctx: &FormContext,
    submitted: &FormValues,
    today: NaiveDate,
) -> FormValues {
    let mut prepared = FormValues::new();

    for field in schema.fields() {
        if !field.is_persisted() {
            continue;
        }

        let value = match ctx {
            FormContext::Create => prepare_create_value(field, submitted, today),
            FormContext::Edit { existing, .. } => {
                if field.disabled {
                    existing.get(field.name).cloned()
                } else {
                    submitted
                        .get(field.name)
                        .or_else(|| existing.get(field.name))
                        .cloned()
                }
            }
        };

        if let Some(value) = value {
            prepared.insert(field.name, value);
        }
    }

    if ctx.is_create() {
        for field in schema.fields() {
            if let Some(DeriveOnCreate::SlugFrom(source)) = field.derive_on_create {
                if let Some(source_value) = prepared.get_str(source) {
                    let slug = Slug::from_title(source_value);
                    tracing::debug!(field = field.name, source, slug = %slug, "derived slug on create");
                    prepared.insert(field.name, Value::String(slug.into_inner()));
                }
            }
        }
    }

    prepared
}

fn prepare_create_value(field: &Field, submitted: &FormValues, today: NaiveDate) -> Option<Value> {
    if !submitted.is_blank(field.name) {
        return submitted.get(field.name).cloned();
    }

    match field.default.as_ref()? {
        DefaultValue::Static(value) => Some(value.clone()),
        DefaultValue::Today => Some(Value::String(today.format("%Y-%m-%d").to_string())),
        DefaultValue::GeneratedOrderNumber => Some(Value::String(generate_order_number())),
    }
}

/// Validate prepared values against the schema.
///
/// # Errors
///
/// Returns the accumulated field-level errors when any constraint fails.
/// Uniqueness checks go through `probe` and exclude the record under edit.
pub fn validate(
    schema: &FormSchema,
    values: &FormValues,
    ctx: &FormContext,
    probe: &dyn UniquenessProbe,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for field in schema.fields() {
        validate_field(field, values, field.name, ctx, probe, &mut errors);
    }

    errors.into_result()
}

fn validate_field(
    field: &Field,
    values: &FormValues,
    key: &str,
    ctx: &FormContext,
    probe: &dyn UniquenessProbe,
    errors: &mut ValidationErrors,
) {
    if matches!(field.kind, FieldKind::Placeholder { .. }) {
        return;
    }

    if values.is_blank(field.name) {
        if field.required {
            errors.add(key, MSG_REQUIRED);
        }
        return;
    }

    if let FieldKind::Repeater(config) = &field.kind {
        let items = values.items(field.name);
        if items.len() < config.min_items {
            errors.add(
                key,
                format!("At least {} item(s) are required.", config.min_items),
            );
        }
        for (index, item) in items.iter().enumerate() {
            for item_field in &config.fields {
                let item_key = format!("{key}.{index}.{}", item_field.name);
                validate_field(item_field, item, &item_key, ctx, probe, errors);
            }
        }
        return;
    }

    if let FieldKind::Select(config) = &field.kind {
        if let OptionsSource::Static(options) = &config.options {
            let valid = |v: &Value| {
                scalar_to_string(v)
                    .is_some_and(|s| options.iter().any(|o| o.value == s))
            };
            let ok = match values.get(field.name) {
                Some(Value::Array(selected)) => selected.iter().all(valid),
                Some(other) => valid(other),
                None => true,
            };
            if !ok {
                errors.add(key, MSG_INVALID_SELECTION);
            }
        }
    }

    for rule in &field.rules {
        apply_rule(rule, field, values, key, ctx, probe, errors);
    }
}

fn apply_rule(
    rule: &Rule,
    field: &Field,
    values: &FormValues,
    key: &str,
    ctx: &FormContext,
    probe: &dyn UniquenessProbe,
    errors: &mut ValidationErrors,
) {
    let value = values.get(field.name);

    match rule {
        Rule::Unique { entity, column } => {
            if let Some(text) = value.and_then(scalar_to_string) {
                if probe.exists(entity, column, &text, ctx.record_id()) {
                    errors.add(key, MSG_UNIQUE);
                }
            }
        }
        Rule::MoneyFormat => {
            if let Some(text) = value.and_then(scalar_to_string) {
                if let Err(e) = validate_money_input(&text) {
                    errors.add(key, e.to_string());
                }
            }
        }
        Rule::NonNegativeInteger => check_integer_min(value, 0, key, errors),
        Rule::IntegerMin(min) => check_integer_min(value, *min, key, errors),
        Rule::Email => {
            let ok = value
                .and_then(Value::as_str)
                .is_some_and(|s| {
                    s.split_once('@')
                        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
                });
            if !ok {
                errors.add(key, MSG_EMAIL);
            }
        }
    }
}

fn check_integer_min(value: Option<&Value>, min: i64, key: &str, errors: &mut ValidationErrors) {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse::<i64>().ok(),
        _ => None,
    };

    match parsed {
        None => errors.add(key, "Must be an integer."),
        Some(n) if n < min => {
            errors.add(key, format!("Must be at least {min}."));
        }
        Some(_) => {}
    }
}

/// A scalar JSON value as text, for uniqueness and format checks.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::form::{RepeaterConfig, Section, SelectConfig, SelectOption};

    /// Probe with a fixed conflict set.
    struct Probe(Vec<(&'static str, &'static str, &'static str, i32)>);

    impl UniquenessProbe for Probe {
        fn exists(&self, entity: &str, column: &str, value: &str, ignore: Option<i32>) -> bool {
            self.0.iter().any(|(e, c, v, id)| {
                *e == entity && *c == column && *v == value && Some(*id) != ignore
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn post_like_schema() -> FormSchema {
        FormSchema::new(2).section(
            Section::new()
                .field(Field::text("title").required())
                .field(
                    Field::text("slug")
                        .disabled()
                        .dehydrated()
                        .required()
                        .unique("posts", "slug")
                        .derive_slug_from("title"),
                ),
        )
    }

    #[test]
    fn test_prepare_derives_slug_on_create() {
        let schema = post_like_schema();
        let submitted = FormValues::new().set_str("title", "Hello World");

        let prepared = prepare(&schema, &FormContext::Create, &submitted, today());
        assert_eq!(prepared.get_str("slug"), Some("hello-world"));
    }

    #[test]
    fn test_prepare_ignores_client_slug_on_create() {
        let schema = post_like_schema();
        let submitted = FormValues::new()
            .set_str("title", "Hello World")
            .set_str("slug", "tampered");

        let prepared = prepare(&schema, &FormContext::Create, &submitted, today());
        assert_eq!(prepared.get_str("slug"), Some("hello-world"));
    }

    #[test]
    fn test_prepare_freezes_slug_on_edit() {
        let schema = post_like_schema();
        let existing = FormValues::new()
            .set_str("title", "Hello World")
            .set_str("slug", "hello-world");
        let ctx = FormContext::Edit {
            record_id: 1,
            existing,
        };

        let submitted = FormValues::new()
            .set_str("title", "Completely New Title")
            .set_str("slug", "completely-new-title");

        let prepared = prepare(&schema, &ctx, &submitted, today());
        assert_eq!(prepared.get_str("title"), Some("Completely New Title"));
        assert_eq!(prepared.get_str("slug"), Some("hello-world"));
    }

    #[test]
    fn test_prepare_applies_defaults_on_create_only() {
        let schema = FormSchema::new(1).section(
            Section::new()
                .field(
                    Field::text("number")
                        .disabled()
                        .dehydrated()
                        .default_value(DefaultValue::GeneratedOrderNumber),
                )
                .field(Field::date("published_at").default_value(DefaultValue::Today)),
        );

        let prepared = prepare(&schema, &FormContext::Create, &FormValues::new(), today());
        let number = prepared.get_str("number").unwrap();
        assert!(number.starts_with("OR-"));
        assert_eq!(number.len(), 9);
        assert!(number.trim_start_matches("OR-").chars().all(|c| c.is_ascii_digit()));
        assert_eq!(prepared.get_str("published_at"), Some("2024-06-01"));
    }

    #[test]
    fn test_prepare_drops_unknown_and_unpersisted_keys() {
        let schema = FormSchema::new(1).section(
            Section::new()
                .field(Field::text("title"))
                .field(Field::placeholder_content(
                    "created_at",
                    crate::schema::form::PlaceholderContent::CreatedAt,
                )),
        );

        let submitted = FormValues::new()
            .set_str("title", "ok")
            .set_str("created_at", "sneaky")
            .set_str("injected", "nope");

        let prepared = prepare(&schema, &FormContext::Create, &submitted, today());
        assert_eq!(prepared.get_str("title"), Some("ok"));
        assert!(prepared.get("created_at").is_none());
        assert!(prepared.get("injected").is_none());
    }

    #[test]
    fn test_validate_required() {
        let schema = post_like_schema();
        let err = validate(
            &schema,
            &FormValues::new(),
            &FormContext::Create,
            &Probe(vec![]),
        )
        .unwrap_err();

        assert!(err.get("title").is_some());
        assert!(err.get("slug").is_some());
    }

    #[test]
    fn test_validate_unique_excludes_current_record() {
        let schema = post_like_schema();
        let probe = Probe(vec![("posts", "slug", "hello-world", 1)]);

        let values = FormValues::new()
            .set_str("title", "Hello World")
            .set_str("slug", "hello-world");

        // Creating collides with record 1
        let err = validate(&schema, &values, &FormContext::Create, &probe).unwrap_err();
        assert_eq!(err.get("slug"), Some(&[MSG_UNIQUE.to_string()][..]));

        // Editing record 1 itself is fine
        let ctx = FormContext::Edit {
            record_id: 1,
            existing: values.clone(),
        };
        assert!(validate(&schema, &values, &ctx, &probe).is_ok());
    }

    #[test]
    fn test_validate_money_and_integer_rules() {
        let schema = FormSchema::new(1).section(
            Section::new()
                .field(Field::numeric("price").required().rule(Rule::MoneyFormat))
                .field(Field::numeric("qty").required().rule(Rule::NonNegativeInteger)),
        );

        let values = FormValues::new()
            .set_str("price", "12.345")
            .set_str("qty", "-1");
        let err = validate(&schema, &values, &FormContext::Create, &Probe(vec![])).unwrap_err();
        assert!(err.get("price").is_some());
        assert_eq!(err.get("qty"), Some(&["Must be at least 0.".to_string()][..]));

        let values = FormValues::new().set_str("price", "1234.56").set_str("qty", "0");
        assert!(validate(&schema, &values, &FormContext::Create, &Probe(vec![])).is_ok());
    }

    #[test]
    fn test_validate_static_select() {
        let schema = FormSchema::new(1).section(
            Section::new().field(Field::select(
                "status",
                SelectConfig::new(OptionsSource::Static(vec![
                    SelectOption::new("new", "New"),
                    SelectOption::new("shipped", "Shipped"),
                ])),
            )),
        );

        let good = FormValues::new().set_str("status", "shipped");
        assert!(validate(&schema, &good, &FormContext::Create, &Probe(vec![])).is_ok());

        let bad = FormValues::new().set_str("status", "teleported");
        let err = validate(&schema, &bad, &FormContext::Create, &Probe(vec![])).unwrap_err();
        assert_eq!(
            err.get("status"),
            Some(&[MSG_INVALID_SELECTION.to_string()][..])
        );
    }

    #[test]
    fn test_validate_repeater_min_items_and_nested_keys() {
        let item_fields = vec![
            Field::numeric("qty").required().rule(Rule::IntegerMin(1)),
            Field::numeric("unit_price").disabled().dehydrated().required(),
        ];
        let schema = FormSchema::new(1).section(Section::new().field(
            Field::repeater("items", RepeaterConfig::new(item_fields).min_items(1)).required(),
        ));

        // Empty array counts as blank + required
        let empty = FormValues::new().set("items", serde_json::json!([]));
        let err = validate(&schema, &empty, &FormContext::Create, &Probe(vec![])).unwrap_err();
        assert!(err.get("items").is_some());

        // Item errors land under dotted keys
        let bad_item = FormValues::new().set(
            "items",
            serde_json::json!([{ "qty": 0, "unit_price": "10.00" }]),
        );
        let err = validate(&schema, &bad_item, &FormContext::Create, &Probe(vec![])).unwrap_err();
        assert_eq!(
            err.get("items.0.qty"),
            Some(&["Must be at least 1.".to_string()][..])
        );

        let good = FormValues::new().set(
            "items",
            serde_json::json!([{ "qty": 2, "unit_price": "10.00" }]),
        );
        assert!(validate(&schema, &good, &FormContext::Create, &Probe(vec![])).is_ok());
    }

    #[test]
    fn test_validate_email_rule() {
        let schema = FormSchema::new(1)
            .section(Section::new().field(Field::text("email").rule(Rule::Email)));

        let bad = FormValues::new().set_str("email", "not-an-email");
        let err = validate(&schema, &bad, &FormContext::Create, &Probe(vec![])).unwrap_err();
        assert_eq!(err.get("email"), Some(&[MSG_EMAIL.to_string()][..]));

        let good = FormValues::new().set_str("email", "jane@example.com");
        assert!(validate(&schema, &good, &FormContext::Create, &Probe(vec![])).is_ok());
    }

    #[test]
    fn test_generate_order_number_shape() {
        for _ in 0..32 {
            let n = generate_order_number();
            assert!(n.starts_with("OR-"));
            assert_eq!(n.len(), 9);
            assert!(n.trim_start_matches("OR-").chars().all(|c| c.is_ascii_digit()));
        }
    }
}
