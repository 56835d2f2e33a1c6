//! The resource contract: one entity type bound to its admin screens.
//!
//! Admin frameworks usually express this as base-class inheritance; here it
//! is a small set of capability traits composed over plain functions. Every
//! resource describes a form and a table; infolists, navigation badges, and
//! global search are opt-in capabilities.

use crate::directory::AdminDirectory;
use crate::forms::FormContext;
use crate::schema::form::FormSchema;
use crate::schema::infolist::InfolistSchema;
use crate::schema::table::TableSchema;

/// A persisted admin record with a numeric key.
pub trait AdminRecord {
    /// The record's primary key.
    fn record_key(&self) -> i32;
}

/// The conventional page set for a resource.
#[derive(Debug, Clone)]
pub struct ResourcePages {
    /// URL slug ("blog/posts", "shop/orders").
    pub slug: &'static str,
    /// Whether the resource has a read-only view page.
    pub has_view: bool,
}

impl ResourcePages {
    /// Index, create, and edit pages under `slug`.
    #[must_use]
    pub const fn standard(slug: &'static str) -> Self {
        Self {
            slug,
            has_view: false,
        }
    }

    /// Add the read-only view page.
    #[must_use]
    pub const fn with_view(mut self) -> Self {
        self.has_view = true;
        self
    }

    /// The list page path.
    #[must_use]
    pub fn index_url(&self) -> String {
        format!("/{}", self.slug)
    }

    /// The create page path.
    #[must_use]
    pub fn create_url(&self) -> String {
        format!("/{}/create", self.slug)
    }

    /// The edit page path for a record.
    #[must_use]
    pub fn edit_url(&self, record_key: i32) -> String {
        format!("/{}/{record_key}/edit", self.slug)
    }

    /// The view page path for a record, if the resource has one.
    #[must_use]
    pub fn view_url(&self, record_key: i32) -> Option<String> {
        self.has_view.then(|| format!("/{}/{record_key}", self.slug))
    }
}

/// Reference to a relation manager attached to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationManagerRef {
    /// The relationship name on the parent ("comments", "payments").
    pub relationship: &'static str,
    /// Display title for the manager's tab.
    pub title: &'static str,
}

/// A declarative admin resource for one entity type.
pub trait Resource {
    /// The record type this resource manages.
    type Record: AdminRecord;

    /// URL slug, also the base for page routes.
    const SLUG: &'static str;
    /// The record attribute used as its display title.
    const RECORD_TITLE_ATTRIBUTE: &'static str;
    /// Navigation group heading.
    const NAVIGATION_GROUP: &'static str;
    /// Navigation icon name.
    const NAVIGATION_ICON: &'static str;
    /// Sort position within the navigation group.
    const NAVIGATION_SORT: i32;

    /// Singular display label.
    fn model_label() -> &'static str;

    /// Plural display label.
    fn plural_model_label() -> &'static str;

    /// The create/edit form schema.
    fn form() -> FormSchema;

    /// The list view schema.
    fn table() -> TableSchema<Self::Record>;

    /// Page routes. Defaults to index/create/edit under [`Self::SLUG`].
    fn pages() -> ResourcePages {
        ResourcePages::standard(Self::SLUG)
    }

    /// Relation managers shown on the edit/view pages.
    fn relation_managers() -> Vec<RelationManagerRef> {
        Vec::new()
    }

    /// Headings of widgets paired with the list page.
    fn widgets() -> Vec<&'static str> {
        Vec::new()
    }

    /// Convert a record into the value set the edit form starts from.
    ///
    /// This feeds [`FormContext::Edit`], which is where frozen fields take
    /// their values.
    fn record_values(record: &Self::Record) -> crate::forms::FormValues;

    /// The edit context for a record.
    fn edit_context(record: &Self::Record) -> FormContext {
        FormContext::Edit {
            record_id: record.record_key(),
            existing: Self::record_values(record),
        }
    }
}

/// A resource with a read-only detail view.
pub trait HasInfolist: Resource {
    /// The detail view schema.
    fn infolist() -> InfolistSchema<Self::Record>;
}

/// A resource whose navigation entry carries a count badge.
pub trait HasNavigationBadge: Resource {
    /// The badge text, computed from the full record set; `None` hides it.
    fn navigation_badge(records: &[Self::Record]) -> Option<String>;
}

/// A resource that participates in cross-resource global search.
pub trait GloballySearchable: Resource {
    /// Attributes searched, including one-hop relation paths
    /// ("author.name").
    fn searchable_attributes() -> &'static [&'static str];

    /// The text of one searchable attribute for a record, `None` when the
    /// attribute (or its relation) is missing.
    fn attribute_text(
        record: &Self::Record,
        attribute: &str,
        directory: &dyn AdminDirectory,
    ) -> Option<String>;

    /// The result title (the record title attribute).
    fn search_title(record: &Self::Record) -> String;

    /// Labeled detail lines under the result title. Missing relations are
    /// simply omitted.
    fn search_details(
        record: &Self::Record,
        directory: &dyn AdminDirectory,
    ) -> Vec<(&'static str, String)>;
}
