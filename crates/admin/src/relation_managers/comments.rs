//! Comments relation manager, shared by posts and products.

use std::marker::PhantomData;

use mercado_core::{AdminUserId, CommentableKind};

use crate::directory::AdminDirectory;
use crate::models::blog::{Comment, CommentableRef, Post};
use crate::models::shop::Product;
use crate::relation_managers::RelationManager;
use crate::resource::AdminRecord;
use crate::schema::form::{DefaultValue, Field, FormSchema, OptionsSource, Section, SelectConfig};
use crate::schema::infolist::{Entry, InfolistSchema, InfolistSection};
use crate::schema::table::{BulkAction, Column, HeaderAction, RowAction, TableSchema};
use crate::services::notifications::{Notification, Notifier};

/// A record comments can be attached to.
///
/// The polymorphic side of the relation: the kind tag plus the parent's key
/// resolve the association, and the display name feeds the new-comment
/// notification.
pub trait Commentable: AdminRecord {
    /// The kind tag for this parent type.
    const KIND: CommentableKind;

    /// The parent's display name (post title, product name).
    fn display_name(&self) -> &str;

    /// The tagged reference a new comment stores.
    fn commentable_ref(&self) -> CommentableRef;
}

impl Commentable for Post {
    const KIND: CommentableKind = CommentableKind::Post;

    fn display_name(&self) -> &str {
        &self.title
    }

    fn commentable_ref(&self) -> CommentableRef {
        CommentableRef::Post(self.id)
    }
}

impl Commentable for Product {
    const KIND: CommentableKind = CommentableKind::Product;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn commentable_ref(&self) -> CommentableRef {
        CommentableRef::Product(self.id)
    }
}

/// The comments relation manager for any commentable parent.
pub struct CommentsRelationManager<P>(PhantomData<P>);

impl<P: Commentable> RelationManager for CommentsRelationManager<P> {
    type Parent = P;
    type Child = Comment;

    const RELATIONSHIP: &'static str = "comments";
    const RECORD_TITLE_ATTRIBUTE: &'static str = "title";

    fn title() -> &'static str {
        "Comentários"
    }

    fn model_label() -> &'static str {
        "comentário"
    }

    fn plural_model_label() -> &'static str {
        "Comentários"
    }

    fn form() -> FormSchema {
        FormSchema::new(1).section(
            Section::new()
                .field(Field::text("title").label("Título").required())
                .field(
                    Field::select(
                        "customer_id",
                        SelectConfig::new(OptionsSource::Customers).searchable(),
                    )
                    .label("Cliente")
                    .required(),
                )
                .field(
                    Field::toggle("is_visible")
                        .label("Aprovado para o público?")
                        .default_value(DefaultValue::Static(serde_json::Value::Bool(true))),
                )
                .field(Field::markdown("content").label("Conteúdo").required()),
        )
    }

    fn table() -> TableSchema<Comment> {
        TableSchema::new()
            .column(Column::text("title", "Título").searchable().sortable())
            .column(
                Column::text("customer.name", "Cliente")
                    .searchable()
                    .sortable()
                    .state(customer_name),
            )
            .column(Column::icon_bool("is_visible", "Visibilidade").sortable())
            .header_action(HeaderAction::Create)
            .action(RowAction::View)
            .action(RowAction::Edit)
            .action(RowAction::Delete)
            .bulk_action(BulkAction::delete())
    }

    fn infolist() -> Option<InfolistSchema<Comment>> {
        Some(
            InfolistSchema::new().section(
                InfolistSection::new()
                    .entry(Entry::text("title").label("Título"))
                    .entry(
                        Entry::text("customer.name")
                            .label("Cliente")
                            .state(customer_name),
                    )
                    .entry(Entry::icon_bool("is_visible").label("Visibilidade"))
                    .entry(Entry::markdown("content").label("Conteúdo")),
            ),
        )
    }

    /// Creating a comment drops a database notification in the acting
    /// admin's inbox.
    fn on_child_created(
        child: &Comment,
        parent: &P,
        actor: AdminUserId,
        directory: &dyn AdminDirectory,
        notifier: &dyn Notifier,
    ) {
        let customer = directory.customer_name(child.customer_id).unwrap_or_else(|| {
            tracing::warn!(
                customer_id = child.customer_id.as_i32(),
                "customer missing while notifying about new comment"
            );
            "Unknown customer".to_string()
        });

        let notification = Notification::new("New comment")
            .icon("heroicon-o-chat-bubble-bottom-center-text")
            .body(format!(
                "**{customer} commented on {} ({}).**",
                P::KIND,
                parent.display_name()
            ));

        tracing::info!(
            comment_id = child.id.as_i32(),
            kind = %P::KIND,
            parent_key = parent.record_key(),
            "new comment notification"
        );
        notifier.send_to_database(actor, notification);
    }
}

fn customer_name(record: &Comment, directory: &dyn AdminDirectory) -> Option<String> {
    directory.customer_name(record.customer_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::notifications::RecordingNotifier;
    use chrono::Utc;
    use mercado_core::{CommentId, CustomerId, ProductId, Slug};
    use rust_decimal::Decimal;

    struct Directory;
    impl AdminDirectory for Directory {
        fn customer_name(&self, id: CustomerId) -> Option<String> {
            (id == CustomerId::new(7)).then(|| "Jane Doe".to_string())
        }
    }

    fn comment(customer: i32) -> Comment {
        Comment {
            id: CommentId::new(1),
            title: "Great chair".into(),
            content: "Loved it".into(),
            customer_id: CustomerId::new(customer),
            is_visible: true,
            commentable: CommentableRef::Product(ProductId::new(2)),
            created_at: Utc::now(),
        }
    }

    fn product() -> Product {
        Product {
            id: ProductId::new(2),
            name: "Cadeira Azul".into(),
            slug: Slug::from_title("Cadeira Azul"),
            description: None,
            price: Decimal::from(100),
            old_price: Decimal::from(120),
            cost: Decimal::from(60),
            sku: "SKU-2".into(),
            barcode: "790".into(),
            qty: 5,
            security_stock: 2,
            brand_id: None,
            category_ids: vec![],
            is_visible: true,
            published_at: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            media: vec![],
            backorder: false,
            requires_shipping: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_comment_notifies_acting_admin() {
        let notifier = RecordingNotifier::new();
        let actor = AdminUserId::new(42);

        CommentsRelationManager::<Product>::on_child_created(
            &comment(7),
            &product(),
            actor,
            &Directory,
            &notifier,
        );

        let sent = notifier.database();
        assert_eq!(sent.len(), 1);
        let (recipient, n) = sent.first().unwrap();
        assert_eq!(*recipient, actor);
        assert_eq!(n.title, "New comment");
        assert_eq!(
            n.body.as_deref(),
            Some("**Jane Doe commented on product (Cadeira Azul).**")
        );
    }

    #[test]
    fn test_missing_customer_degrades_to_placeholder() {
        let notifier = RecordingNotifier::new();

        CommentsRelationManager::<Product>::on_child_created(
            &comment(999),
            &product(),
            AdminUserId::new(1),
            &Directory,
            &notifier,
        );

        let sent = notifier.database();
        let (_, n) = sent.first().unwrap();
        assert!(n.body.as_deref().unwrap().starts_with("**Unknown customer"));
    }

    #[test]
    fn test_comments_table_has_create_header_action() {
        let table = CommentsRelationManager::<Post>::table();
        assert_eq!(table.header_actions, vec![HeaderAction::Create]);
        assert_eq!(table.bulk_actions.len(), 1);
    }
}
