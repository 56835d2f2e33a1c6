//! Form field descriptors.
//!
//! A form is a list of sections, each holding fields. Behavior that admin
//! frameworks usually express as builder chains with inline closures is
//! carried here as data: constraint rules, default values, and
//! derive-on-create directives that the [`crate::forms`] engine interprets.

use serde::Serialize;
use serde_json::Value;

/// A complete form: ordered sections in a column grid.
#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    /// Grid columns for the overall layout.
    pub columns: u8,
    /// Ordered sections.
    pub sections: Vec<Section>,
}

impl FormSchema {
    /// Create an empty schema with the given grid width.
    #[must_use]
    pub const fn new(columns: u8) -> Self {
        Self {
            columns,
            sections: Vec::new(),
        }
    }

    /// Append a section.
    #[must_use]
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Iterate over every field in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Find a field by name (top level only, not repeater items).
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|f| f.name == name)
    }
}

/// A titled group of fields.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    /// Section heading, if any.
    pub heading: Option<&'static str>,
    /// Grid columns inside the section.
    pub columns: u8,
    /// Whether the renderer may collapse the section.
    pub collapsible: bool,
    /// Render in the narrow side column instead of the main group.
    pub aside: bool,
    /// Hide the section while creating (e.g. the timestamps panel).
    pub hidden_on_create: bool,
    /// Fields, in order.
    pub fields: Vec<Field>,
}

impl Section {
    /// Create an untitled section with a single column.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            heading: None,
            columns: 1,
            collapsible: false,
            aside: false,
            hidden_on_create: false,
            fields: Vec::new(),
        }
    }

    /// Create a titled section.
    #[must_use]
    pub const fn titled(heading: &'static str) -> Self {
        let mut section = Self::new();
        section.heading = Some(heading);
        section
    }

    /// Set the column count.
    #[must_use]
    pub const fn columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    /// Mark the section collapsible.
    #[must_use]
    pub const fn collapsible(mut self) -> Self {
        self.collapsible = true;
        self
    }

    /// Render in the side column.
    #[must_use]
    pub const fn aside(mut self) -> Self {
        self.aside = true;
        self
    }

    /// Hide while creating a new record.
    #[must_use]
    pub const fn hidden_on_create(mut self) -> Self {
        self.hidden_on_create = true;
        self
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

/// A single form field.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    /// Field name; doubles as the submission key.
    pub name: &'static str,
    /// Display label. `None` lets the renderer titleize the name.
    pub label: Option<&'static str>,
    /// What kind of input this is.
    pub kind: FieldKind,
    /// The field must have a non-empty value.
    pub required: bool,
    /// The input is not editable in the UI.
    pub disabled: bool,
    /// The value persists even when the input is disabled.
    ///
    /// Disabled + dehydrated is the frozen-field pattern: slugs and order
    /// numbers are shown greyed out, submitted unchanged, and the forms
    /// engine freezes them to the existing value on edit.
    pub dehydrated: bool,
    /// Validation rules beyond `required`.
    pub rules: Vec<Rule>,
    /// Default applied on create when the submission has no value.
    pub default: Option<DefaultValue>,
    /// Create-time derivation from another field's state.
    pub derive_on_create: Option<DeriveOnCreate>,
    /// Span the full grid width.
    pub span_full: bool,
    /// Helper text under the input.
    pub helper_text: Option<&'static str>,
    /// Input placeholder.
    pub placeholder: Option<&'static str>,
}

impl Field {
    const fn of_kind(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label: None,
            kind,
            required: false,
            disabled: false,
            dehydrated: false,
            rules: Vec::new(),
            default: None,
            derive_on_create: None,
            span_full: false,
            helper_text: None,
            placeholder: None,
        }
    }

    /// A plain text input.
    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self::of_kind(name, FieldKind::Text { numeric: false })
    }

    /// A numeric text input.
    #[must_use]
    pub const fn numeric(name: &'static str) -> Self {
        Self::of_kind(name, FieldKind::Text { numeric: true })
    }

    /// A markdown editor.
    #[must_use]
    pub const fn markdown(name: &'static str) -> Self {
        Self::of_kind(name, FieldKind::Markdown)
    }

    /// A date picker.
    #[must_use]
    pub const fn date(name: &'static str) -> Self {
        Self::of_kind(name, FieldKind::Date)
    }

    /// An on/off toggle.
    #[must_use]
    pub const fn toggle(name: &'static str) -> Self {
        Self::of_kind(name, FieldKind::Toggle)
    }

    /// A checkbox.
    #[must_use]
    pub const fn checkbox(name: &'static str) -> Self {
        Self::of_kind(name, FieldKind::Checkbox)
    }

    /// A free-form tags input.
    #[must_use]
    pub const fn tags(name: &'static str) -> Self {
        Self::of_kind(name, FieldKind::Tags)
    }

    /// A select backed by the given options source.
    #[must_use]
    pub fn select(name: &'static str, config: SelectConfig) -> Self {
        Self::of_kind(name, FieldKind::Select(config))
    }

    /// A file upload field.
    #[must_use]
    pub const fn file_upload(name: &'static str, image: bool, max_files: u8) -> Self {
        Self::of_kind(
            name,
            FieldKind::FileUpload {
                image,
                max_files,
                collection: None,
            },
        )
    }

    /// A read-only computed placeholder (no submitted value).
    #[must_use]
    pub const fn placeholder_content(name: &'static str, content: PlaceholderContent) -> Self {
        Self::of_kind(name, FieldKind::Placeholder { content })
    }

    /// A repeater of nested item forms.
    #[must_use]
    pub fn repeater(name: &'static str, config: RepeaterConfig) -> Self {
        Self::of_kind(name, FieldKind::Repeater(config))
    }

    /// Set the display label.
    #[must_use]
    pub const fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Mark required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Disable the input.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Persist the value even while disabled.
    #[must_use]
    pub const fn dehydrated(mut self) -> Self {
        self.dehydrated = true;
        self
    }

    /// Append a validation rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Shorthand for a uniqueness rule scoped to `entity.column`.
    #[must_use]
    pub fn unique(self, entity: &'static str, column: &'static str) -> Self {
        self.rule(Rule::Unique { entity, column })
    }

    /// Set the create-time default.
    #[must_use]
    pub fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Derive this field's value from `source` on create (slug fields).
    #[must_use]
    pub const fn derive_slug_from(mut self, source: &'static str) -> Self {
        self.derive_on_create = Some(DeriveOnCreate::SlugFrom(source));
        self
    }

    /// Span the full grid width.
    #[must_use]
    pub const fn span_full(mut self) -> Self {
        self.span_full = true;
        self
    }

    /// Set helper text.
    #[must_use]
    pub const fn helper_text(mut self, text: &'static str) -> Self {
        self.helper_text = Some(text);
        self
    }

    /// Set the input placeholder.
    #[must_use]
    pub const fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Set the media collection on a file upload field.
    #[must_use]
    pub fn collection(mut self, name: &'static str) -> Self {
        if let FieldKind::FileUpload { collection, .. } = &mut self.kind {
            *collection = Some(name);
        }
        self
    }

    /// Whether a submitted value should be persisted for this field.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        match self.kind {
            FieldKind::Placeholder { .. } => false,
            _ => !self.disabled || self.dehydrated,
        }
    }
}

/// The input widget a field renders as.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text input.
    Text {
        /// Restrict input to numeric characters.
        numeric: bool,
    },
    /// Markdown editor.
    Markdown,
    /// Date picker.
    Date,
    /// On/off toggle.
    Toggle,
    /// Checkbox.
    Checkbox,
    /// Free-form tags input.
    Tags,
    /// Select dropdown.
    Select(SelectConfig),
    /// File upload.
    FileUpload {
        /// Accept images only.
        image: bool,
        /// Maximum number of files.
        max_files: u8,
        /// Named media collection, if the entity has more than one.
        collection: Option<&'static str>,
    },
    /// Read-only computed display; never submitted.
    Placeholder {
        /// What the renderer shows.
        content: PlaceholderContent,
    },
    /// Variable-length list of nested item forms.
    Repeater(RepeaterConfig),
}

/// Configuration for a select field.
#[derive(Debug, Clone, Serialize)]
pub struct SelectConfig {
    /// Where options come from.
    pub options: OptionsSource,
    /// Allow typing to search options.
    pub searchable: bool,
    /// Allow multiple selections.
    pub multiple: bool,
    /// Use the browser-native control instead of the styled one.
    pub native: bool,
    /// When the selection changes, other fields may need recomputing
    /// (the order items repeater snapshots the unit price).
    pub reactive: bool,
    /// Inline creation sub-form (the order form can create a customer).
    pub create_option_form: Vec<Field>,
    /// Modal heading for the inline creation sub-form.
    pub create_option_heading: Option<&'static str>,
}

impl SelectConfig {
    /// Create a select over the given options source.
    #[must_use]
    pub const fn new(options: OptionsSource) -> Self {
        Self {
            options,
            searchable: false,
            multiple: false,
            native: true,
            reactive: false,
            create_option_form: Vec::new(),
            create_option_heading: None,
        }
    }

    /// Allow typing to search.
    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Allow multiple selections.
    #[must_use]
    pub const fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Use the styled control.
    #[must_use]
    pub const fn not_native(mut self) -> Self {
        self.native = false;
        self
    }

    /// Mark the select reactive.
    #[must_use]
    pub const fn reactive(mut self) -> Self {
        self.reactive = true;
        self
    }

    /// Attach an inline creation sub-form.
    #[must_use]
    pub fn create_option(mut self, heading: &'static str, fields: Vec<Field>) -> Self {
        self.create_option_heading = Some(heading);
        self.create_option_form = fields;
        self
    }
}

/// Where a select's options come from.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum OptionsSource {
    /// A fixed option list (statuses, providers, genders).
    Static(Vec<SelectOption>),
    /// Blog authors from the directory.
    Authors,
    /// Blog categories from the directory.
    BlogCategories,
    /// Brands from the directory.
    Brands,
    /// Shop categories from the directory.
    ShopCategories,
    /// Customers via live search.
    Customers,
    /// Products via live search (order items).
    Products,
    /// The external currency table.
    Currencies,
}

/// A fixed select option.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    /// Stored value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl SelectOption {
    /// Create an option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Repeater configuration (the order items sub-form).
#[derive(Debug, Clone, Serialize)]
pub struct RepeaterConfig {
    /// The item sub-form fields.
    pub fields: Vec<Field>,
    /// Minimum number of items.
    pub min_items: usize,
    /// Items shown on a fresh form.
    pub default_items: usize,
    /// Items can be reordered by dragging.
    pub orderable: bool,
    /// Grid columns inside each item row.
    pub columns: u8,
}

impl RepeaterConfig {
    /// Create a repeater over the given item fields.
    #[must_use]
    pub const fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            min_items: 0,
            default_items: 1,
            orderable: false,
            columns: 1,
        }
    }

    /// Require at least `n` items.
    #[must_use]
    pub const fn min_items(mut self, n: usize) -> Self {
        self.min_items = n;
        self
    }

    /// Show `n` items on a fresh form.
    #[must_use]
    pub const fn default_items(mut self, n: usize) -> Self {
        self.default_items = n;
        self
    }

    /// Allow drag reordering.
    #[must_use]
    pub const fn orderable(mut self) -> Self {
        self.orderable = true;
        self
    }

    /// Grid columns inside each item row.
    #[must_use]
    pub const fn columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }
}

/// Create-time default for a field without a submitted value.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "default", rename_all = "snake_case")]
pub enum DefaultValue {
    /// A fixed value.
    Static(Value),
    /// Today's date.
    Today,
    /// A fresh `OR-` + six random digits order number.
    GeneratedOrderNumber,
}

/// Create-time derivation from another field's submitted state.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "derive", rename_all = "snake_case")]
pub enum DeriveOnCreate {
    /// Slugify the named field's value (post title, product name).
    SlugFrom(&'static str),
}

/// What a placeholder field displays.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderContent {
    /// Humanized created-at timestamp.
    CreatedAt,
    /// Humanized updated-at timestamp.
    UpdatedAt,
}

/// A validation rule beyond `required`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Value must be unique for `entity.column`, excluding the record
    /// under edit.
    Unique {
        entity: &'static str,
        column: &'static str,
    },
    /// Up to six integer digits and two fraction digits.
    MoneyFormat,
    /// An integer greater than or equal to zero.
    NonNegativeInteger,
    /// An integer greater than or equal to `n`.
    IntegerMin(i64),
    /// A structurally valid email address.
    Email,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let field = Field::text("slug")
            .disabled()
            .dehydrated()
            .required()
            .unique("posts", "slug");

        assert!(field.disabled && field.dehydrated && field.required);
        assert!(field.is_persisted());
        assert_eq!(
            field.rules,
            vec![Rule::Unique {
                entity: "posts",
                column: "slug"
            }]
        );
    }

    #[test]
    fn test_placeholder_is_never_persisted() {
        let field = Field::placeholder_content("created_at", PlaceholderContent::CreatedAt);
        assert!(!field.is_persisted());
    }

    #[test]
    fn test_disabled_without_dehydrated_is_not_persisted() {
        let field = Field::text("preview").disabled();
        assert!(!field.is_persisted());
    }

    #[test]
    fn test_schema_field_lookup() {
        let schema = FormSchema::new(2).section(
            Section::new()
                .field(Field::text("title").required())
                .field(Field::text("slug")),
        );

        assert!(schema.field("slug").is_some());
        assert!(schema.field("missing").is_none());
        assert_eq!(schema.fields().count(), 2);
    }
}
