//! Infolist (read-only detail view) descriptors.

use crate::directory::AdminDirectory;
use crate::schema::table::StateFn;

/// How an infolist entry renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Plain text.
    Text,
    /// Colored badge.
    Badge,
    /// Boolean check/cross icon.
    IconBool,
    /// Rendered markdown prose.
    Markdown,
    /// Image.
    Image,
}

/// A single read-only entry.
#[derive(Debug, Clone)]
pub struct Entry<R> {
    /// Record column key (or a virtual key for derived entries).
    pub key: &'static str,
    /// Display label. `None` lets the renderer titleize the key;
    /// label-hidden entries (prose content, images) pass `hidden_label`.
    pub label: Option<&'static str>,
    /// Render kind.
    pub kind: EntryKind,
    /// Suppress the label entirely.
    pub hidden_label: bool,
    /// strftime format for date values.
    pub date_format: Option<&'static str>,
    /// Derived display state; `None` falls back to the record column.
    pub state: Option<StateFn<R>>,
}

impl<R> Entry<R> {
    const fn of_kind(key: &'static str, kind: EntryKind) -> Self {
        Self {
            key,
            label: None,
            kind,
            hidden_label: false,
            date_format: None,
            state: None,
        }
    }

    /// A text entry.
    #[must_use]
    pub const fn text(key: &'static str) -> Self {
        Self::of_kind(key, EntryKind::Text)
    }

    /// A badge entry.
    #[must_use]
    pub const fn badge(key: &'static str) -> Self {
        Self::of_kind(key, EntryKind::Badge)
    }

    /// A boolean icon entry.
    #[must_use]
    pub const fn icon_bool(key: &'static str) -> Self {
        Self::of_kind(key, EntryKind::IconBool)
    }

    /// A markdown prose entry.
    #[must_use]
    pub const fn markdown(key: &'static str) -> Self {
        Self::of_kind(key, EntryKind::Markdown)
    }

    /// An image entry.
    #[must_use]
    pub const fn image(key: &'static str) -> Self {
        Self::of_kind(key, EntryKind::Image)
    }

    /// Set the display label.
    #[must_use]
    pub const fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Suppress the label.
    #[must_use]
    pub const fn hidden_label(mut self) -> Self {
        self.hidden_label = true;
        self
    }

    /// Format date values with the given strftime format.
    #[must_use]
    pub const fn date(mut self, fmt: &'static str) -> Self {
        self.date_format = Some(fmt);
        self
    }

    /// Compute the entry from a derived-state function.
    #[must_use]
    pub const fn state(mut self, f: StateFn<R>) -> Self {
        self.state = Some(f);
        self
    }
}

impl<R: crate::query::FieldAccess> Entry<R> {
    /// The display text for `record`, or `None` for a blank entry.
    pub fn display(&self, record: &R, directory: &dyn AdminDirectory) -> Option<String> {
        if let Some(state) = self.state {
            return state(record, directory);
        }

        let value = record.field(self.key)?;
        if let (Some(fmt), Some(date)) = (self.date_format, value.as_date()) {
            return Some(date.format(fmt).to_string());
        }

        Some(match value {
            crate::query::FieldValue::Str(s) => s,
            crate::query::FieldValue::Int(i) => i.to_string(),
            crate::query::FieldValue::Decimal(d) => d.to_string(),
            crate::query::FieldValue::Date(d) => d.to_string(),
            crate::query::FieldValue::DateTime(dt) => dt.to_rfc3339(),
            crate::query::FieldValue::Bool(b) => b.to_string(),
        })
    }
}

/// A titled group of entries.
#[derive(Debug, Clone)]
pub struct InfolistSection<R> {
    /// Section heading, if any.
    pub heading: Option<&'static str>,
    /// Grid columns inside the section.
    pub columns: u8,
    /// Whether the renderer may collapse the section.
    pub collapsible: bool,
    /// Entries, in order.
    pub entries: Vec<Entry<R>>,
}

impl<R> InfolistSection<R> {
    /// Create an untitled section.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            heading: None,
            columns: 1,
            collapsible: false,
            entries: Vec::new(),
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

    /// Append an entry.
    #[must_use]
    pub fn entry(mut self, entry: Entry<R>) -> Self {
        self.entries.push(entry);
        self
    }
}

impl<R> Default for InfolistSection<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete read-only detail view.
#[derive(Debug, Clone)]
pub struct InfolistSchema<R> {
    /// Sections, in order.
    pub sections: Vec<InfolistSection<R>>,
}

impl<R> InfolistSchema<R> {
    /// Create an empty infolist.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Append a section.
    #[must_use]
    pub fn section(mut self, section: InfolistSection<R>) -> Self {
        self.sections.push(section);
        self
    }

    /// Iterate over every entry in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<R>> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }
}

impl<R> Default for InfolistSchema<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FieldAccess, FieldValue};

    struct Row;
    impl FieldAccess for Row {
        fn field(&self, column: &str) -> Option<FieldValue> {
            (column == "title").then(|| FieldValue::Str("Hello".into()))
        }
    }

    struct NoDirectory;
    impl AdminDirectory for NoDirectory {}

    #[test]
    fn test_entry_display_and_blank() {
        let entry: Entry<Row> = Entry::text("title");
        assert_eq!(entry.display(&Row, &NoDirectory), Some("Hello".into()));

        let missing: Entry<Row> = Entry::text("author");
        assert_eq!(missing.display(&Row, &NoDirectory), None);
    }

    #[test]
    fn test_schema_walks_entries() {
        let schema: InfolistSchema<Row> = InfolistSchema::new()
            .section(
                InfolistSection::new()
                    .columns(2)
                    .entry(Entry::text("title"))
                    .entry(Entry::text("slug")),
            )
            .section(
                InfolistSection::titled("Conteúdo")
                    .collapsible()
                    .entry(Entry::markdown("content").hidden_label()),
            );

        assert_eq!(schema.entries().count(), 3);
    }
}
