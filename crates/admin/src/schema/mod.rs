//! Declarative schema descriptors for forms, tables, infolists, and filters.
//!
//! Everything here is plain data with builder methods - the admin panel's
//! rendering engine walks these descriptors; the [`crate::forms`] engine
//! validates and prepares submissions against them.

pub mod filter;
pub mod form;
pub mod infolist;
pub mod table;

pub use filter::{Filter, FilterInput, Indicator};
pub use form::{
    DefaultValue, DeriveOnCreate, Field, FieldKind, FormSchema, OptionsSource, PlaceholderContent,
    RepeaterConfig, Rule, Section, SelectConfig, SelectOption,
};
pub use infolist::{Entry, EntryKind, InfolistSchema, InfolistSection};
pub use table::{
    BadgeColor, BulkAction, BulkBehavior, Column, ColumnKind, GroupSpec, HeaderAction, RowAction,
    Summarizer, TableSchema,
};
