//! Relation managers: resource-like contracts scoped to a parent record.
//!
//! A relation manager drives the child-record table shown on a parent's
//! edit/view page. Child creation happens in the parent's context - the
//! foreign key comes from the parent, never from the submitted form - and
//! may fan out a notification to the acting admin.

pub mod comments;
pub mod payments;

pub use comments::{Commentable, CommentsRelationManager};
pub use payments::PaymentsRelationManager;

use mercado_core::AdminUserId;

use crate::directory::AdminDirectory;
use crate::resource::AdminRecord;
use crate::schema::form::FormSchema;
use crate::schema::infolist::InfolistSchema;
use crate::schema::table::TableSchema;
use crate::services::notifications::Notifier;

/// A resource-like contract scoped to one parent record's association.
pub trait RelationManager {
    /// The parent record type.
    type Parent: AdminRecord;
    /// The child record type.
    type Child: AdminRecord;

    /// The relationship name on the parent.
    const RELATIONSHIP: &'static str;
    /// The child attribute used as its display title.
    const RECORD_TITLE_ATTRIBUTE: &'static str;

    /// Tab title on the parent page.
    fn title() -> &'static str;

    /// Singular child label.
    fn model_label() -> &'static str;

    /// Plural child label.
    fn plural_model_label() -> &'static str;

    /// The child create/edit form.
    fn form() -> FormSchema;

    /// The child list table.
    fn table() -> TableSchema<Self::Child>;

    /// Optional child detail view.
    fn infolist() -> Option<InfolistSchema<Self::Child>> {
        None
    }

    /// Hook run after a child is created under `parent`.
    ///
    /// `actor` is the admin performing the creation, passed explicitly so
    /// notification targeting never reads ambient auth state.
    fn on_child_created(
        child: &Self::Child,
        parent: &Self::Parent,
        actor: AdminUserId,
        directory: &dyn AdminDirectory,
        notifier: &dyn Notifier,
    ) {
        let _ = (child, parent, actor, directory, notifier);
    }
}
