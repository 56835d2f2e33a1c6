//! Table column and action descriptors.

use rust_decimal::Decimal;

use crate::directory::AdminDirectory;
use crate::format;
use crate::query::{FieldAccess, FieldValue, sum_column};
use crate::schema::filter::Filter;

/// Derived display state: record + directory -> cell text.
///
/// Used for relation columns (`customer.name`), computed badges (publish
/// status from a date), and reference-data columns (currency name).
/// Returning `None` renders a blank cell.
pub type StateFn<R> = fn(&R, &dyn AdminDirectory) -> Option<String>;

/// Maps a badge's display state to its color.
pub type BadgeColorFn = fn(&str) -> Option<BadgeColor>;

/// Badge color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Success,
    Warning,
    Danger,
}

/// How a column renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Plain text.
    Text,
    /// Colored badge.
    Badge,
    /// Boolean check/cross icon.
    IconBool,
    /// Thumbnail image.
    Image,
}

/// A list-view column.
#[derive(Debug, Clone)]
pub struct Column<R> {
    /// Record column key (or a virtual key for derived columns).
    pub key: &'static str,
    /// Header label.
    pub label: &'static str,
    /// Render kind.
    pub kind: ColumnKind,
    /// Participates in table search.
    pub searchable: bool,
    /// Sortable by the renderer.
    pub sortable: bool,
    /// User can show/hide the column.
    pub toggleable: bool,
    /// Hidden until the user toggles it on.
    pub toggled_hidden_by_default: bool,
    /// strftime format for date values.
    pub date_format: Option<&'static str>,
    /// Format numeric values as money.
    pub money: bool,
    /// Column-level aggregate summaries.
    pub summarizers: Vec<Summarizer>,
    /// Derived display state; `None` falls back to the record column.
    pub state: Option<StateFn<R>>,
    /// Badge color resolution (badge columns only).
    pub badge_color: Option<BadgeColorFn>,
}

impl<R> Column<R> {
    const fn of_kind(key: &'static str, label: &'static str, kind: ColumnKind) -> Self {
        Self {
            key,
            label,
            kind,
            searchable: false,
            sortable: false,
            toggleable: false,
            toggled_hidden_by_default: false,
            date_format: None,
            money: false,
            summarizers: Vec::new(),
            state: None,
            badge_color: None,
        }
    }

    /// A text column.
    #[must_use]
    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self::of_kind(key, label, ColumnKind::Text)
    }

    /// A badge column.
    #[must_use]
    pub const fn badge(key: &'static str, label: &'static str) -> Self {
        Self::of_kind(key, label, ColumnKind::Badge)
    }

    /// A boolean icon column.
    #[must_use]
    pub const fn icon_bool(key: &'static str, label: &'static str) -> Self {
        Self::of_kind(key, label, ColumnKind::IconBool)
    }

    /// An image column.
    #[must_use]
    pub const fn image(key: &'static str, label: &'static str) -> Self {
        Self::of_kind(key, label, ColumnKind::Image)
    }

    /// Include in table search.
    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Allow sorting.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Allow the user to show/hide the column.
    #[must_use]
    pub const fn toggleable(mut self) -> Self {
        self.toggleable = true;
        self
    }

    /// Toggleable and hidden until switched on.
    #[must_use]
    pub const fn hidden_by_default(mut self) -> Self {
        self.toggleable = true;
        self.toggled_hidden_by_default = true;
        self
    }

    /// Format date values with the given strftime format.
    #[must_use]
    pub const fn date(mut self, fmt: &'static str) -> Self {
        self.date_format = Some(fmt);
        self
    }

    /// Format numeric values as money.
    #[must_use]
    pub const fn money(mut self) -> Self {
        self.money = true;
        self
    }

    /// Append an aggregate summarizer.
    #[must_use]
    pub fn summarize(mut self, summarizer: Summarizer) -> Self {
        self.summarizers.push(summarizer);
        self
    }

    /// Compute the cell from a derived-state function.
    #[must_use]
    pub const fn state(mut self, f: StateFn<R>) -> Self {
        self.state = Some(f);
        self
    }

    /// Resolve badge colors with the given function.
    #[must_use]
    pub const fn badge_colors(mut self, f: BadgeColorFn) -> Self {
        self.badge_color = Some(f);
        self
    }
}

impl<R: FieldAccess> Column<R> {
    /// The display text for `record`, or `None` for a blank cell.
    pub fn display(&self, record: &R, directory: &dyn AdminDirectory) -> Option<String> {
        if let Some(state) = self.state {
            return state(record, directory);
        }

        let value = record.field(self.key)?;
        Some(self.format_value(&value))
    }

    fn format_value(&self, value: &FieldValue) -> String {
        if let Some(fmt) = self.date_format {
            if let Some(date) = value.as_date() {
                return date.format(fmt).to_string();
            }
        }

        if self.money {
            if let Some(amount) = value.as_decimal() {
                return format::format_money(amount);
            }
        }

        match value {
            FieldValue::Str(s) => s.clone(),
            FieldValue::Int(i) => i.to_string(),
            FieldValue::Decimal(d) => d.to_string(),
            FieldValue::Date(d) => d.to_string(),
            FieldValue::DateTime(dt) => dt.to_rfc3339(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }

    /// The badge color for `record`, if this is a badge column.
    pub fn badge_color_for(&self, record: &R, directory: &dyn AdminDirectory) -> Option<BadgeColor> {
        let state = self.display(record, directory)?;
        self.badge_color.and_then(|f| f(&state))
    }

    /// Evaluate the column's summarizers over the given records.
    pub fn summaries(&self, records: &[&R]) -> Vec<String> {
        self.summarizers
            .iter()
            .map(|s| s.compute(records, self.key))
            .collect()
    }
}

/// A column-level aggregate summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summarizer {
    /// Sum of the column, formatted as money.
    Sum {
        /// Format the total as money.
        money: bool,
    },
}

impl Summarizer {
    fn compute<R: FieldAccess>(self, records: &[&R], column: &str) -> String {
        match self {
            Self::Sum { money } => {
                let total: Decimal = sum_column(records.iter().copied(), column);
                if money {
                    format::format_money(total)
                } else {
                    total.to_string()
                }
            }
        }
    }
}

/// Per-row actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

/// Actions in the table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    /// Create a new (child) record.
    Create,
}

/// What a bulk action does when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkBehavior {
    /// Delete the selected records.
    Delete,
    /// Delete, but emit the standing warning notification as friction.
    DeleteWithWarning,
}

/// A bulk action over the selected rows.
#[derive(Debug, Clone)]
pub struct BulkAction {
    /// Action key.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Execution behavior.
    pub behavior: BulkBehavior,
}

impl BulkAction {
    /// A plain bulk delete.
    #[must_use]
    pub const fn delete() -> Self {
        Self {
            key: "delete",
            label: "Delete",
            behavior: BulkBehavior::Delete,
        }
    }

    /// Bulk delete with the warning notification attached.
    #[must_use]
    pub const fn delete_with_warning() -> Self {
        Self {
            key: "delete",
            label: "Delete",
            behavior: BulkBehavior::DeleteWithWarning,
        }
    }
}

/// Row grouping for the list view.
#[derive(Debug, Clone)]
pub struct GroupSpec {
    /// Record column to group by.
    pub column: &'static str,
    /// Group heading label.
    pub label: &'static str,
    /// Group by the value's calendar date.
    pub date: bool,
    /// Groups can be collapsed.
    pub collapsible: bool,
}

/// A complete table description for one resource.
#[derive(Debug, Clone)]
pub struct TableSchema<R> {
    /// Columns, in display order.
    pub columns: Vec<Column<R>>,
    /// Named filters.
    pub filters: Vec<Filter>,
    /// Header actions.
    pub header_actions: Vec<HeaderAction>,
    /// Per-row actions.
    pub actions: Vec<RowAction>,
    /// Bulk actions over selected rows.
    pub bulk_actions: Vec<BulkAction>,
    /// Row groupings.
    pub groups: Vec<GroupSpec>,
}

impl<R> TableSchema<R> {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            filters: Vec::new(),
            header_actions: Vec::new(),
            actions: Vec::new(),
            bulk_actions: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Append a column.
    #[must_use]
    pub fn column(mut self, column: Column<R>) -> Self {
        self.columns.push(column);
        self
    }

    /// Append a filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append a header action.
    #[must_use]
    pub fn header_action(mut self, action: HeaderAction) -> Self {
        self.header_actions.push(action);
        self
    }

    /// Append a row action.
    #[must_use]
    pub fn action(mut self, action: RowAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Append a bulk action.
    #[must_use]
    pub fn bulk_action(mut self, action: BulkAction) -> Self {
        self.bulk_actions.push(action);
        self
    }

    /// Append a row grouping.
    #[must_use]
    pub fn group(mut self, group: GroupSpec) -> Self {
        self.groups.push(group);
        self
    }

    /// Find a column by key.
    #[must_use]
    pub fn column_by_key(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key == key)
    }
}

impl<R: FieldAccess> TableSchema<R> {
    /// Table search: records where any searchable column contains `term`,
    /// case-insensitively.
    pub fn search<'a>(
        &self,
        records: &'a [R],
        term: &str,
        directory: &dyn AdminDirectory,
    ) -> Vec<&'a R> {
        let term = term.to_lowercase();
        records
            .iter()
            .filter(|record| {
                self.columns.iter().filter(|c| c.searchable).any(|column| {
                    column
                        .display(record, directory)
                        .is_some_and(|text| text.to_lowercase().contains(&term))
                })
            })
            .collect()
    }
}

impl<R> Default for TableSchema<R> {
    fn default() -> Self {
        Self::new()
    }
}
