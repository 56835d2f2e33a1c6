//! Blog domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use mercado_core::{AuthorId, CategoryId, CommentId, CommentableKind, CustomerId, PostId, ProductId, Slug};

use crate::query::{FieldAccess, FieldValue};
use crate::resource::AdminRecord;

/// A blog author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Unique author ID.
    pub id: AuthorId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// A blog category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: Slug,
}

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique post ID.
    pub id: PostId,
    /// Title.
    pub title: String,
    /// URL slug, derived from the title at creation and frozen after.
    pub slug: Slug,
    /// Markdown body.
    pub content: String,
    /// Author reference.
    pub author_id: AuthorId,
    /// Category reference.
    pub category_id: CategoryId,
    /// Publication date; `None` means draft.
    pub published_at: Option<NaiveDate>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Header image path, if uploaded.
    pub image: Option<String>,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// When the post was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AdminRecord for Post {
    fn record_key(&self) -> i32 {
        self.id.as_i32()
    }
}

impl FieldAccess for Post {
    fn field(&self, column: &str) -> Option<FieldValue> {
        match column {
            "title" => Some(FieldValue::Str(self.title.clone())),
            "slug" => Some(FieldValue::Str(self.slug.as_str().to_string())),
            "content" => Some(FieldValue::Str(self.content.clone())),
            "author_id" => Some(FieldValue::Int(i64::from(self.author_id.as_i32()))),
            "category_id" => Some(FieldValue::Int(i64::from(self.category_id.as_i32()))),
            "published_at" => self.published_at.map(FieldValue::Date),
            "image" => self.image.clone().map(FieldValue::Str),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(FieldValue::DateTime(self.updated_at)),
            _ => None,
        }
    }
}

/// What a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CommentableRef {
    /// A blog post.
    Post(PostId),
    /// A shop product.
    Product(ProductId),
}

impl CommentableRef {
    /// The kind tag.
    #[must_use]
    pub const fn kind(&self) -> CommentableKind {
        match self {
            Self::Post(_) => CommentableKind::Post,
            Self::Product(_) => CommentableKind::Product,
        }
    }

    /// The referenced record's key.
    #[must_use]
    pub const fn key(&self) -> i32 {
        match self {
            Self::Post(id) => id.as_i32(),
            Self::Product(id) => id.as_i32(),
        }
    }
}

/// A customer comment, attached to a post or a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment ID.
    pub id: CommentId,
    /// Title line.
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Commenting customer.
    pub customer_id: CustomerId,
    /// Approved for public display. Gates the storefront only; the admin
    /// panel always lists the comment.
    pub is_visible: bool,
    /// The record this comment hangs off.
    pub commentable: CommentableRef,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

impl AdminRecord for Comment {
    fn record_key(&self) -> i32 {
        self.id.as_i32()
    }
}

impl FieldAccess for Comment {
    fn field(&self, column: &str) -> Option<FieldValue> {
        match column {
            "title" => Some(FieldValue::Str(self.title.clone())),
            "content" => Some(FieldValue::Str(self.content.clone())),
            "customer_id" => Some(FieldValue::Int(i64::from(self.customer_id.as_i32()))),
            "is_visible" => Some(FieldValue::Bool(self.is_visible)),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commentable_ref_kind_and_key() {
        let on_post = CommentableRef::Post(PostId::new(3));
        assert_eq!(on_post.kind(), CommentableKind::Post);
        assert_eq!(on_post.key(), 3);

        let on_product = CommentableRef::Product(ProductId::new(8));
        assert_eq!(on_product.kind(), CommentableKind::Product);
        assert_eq!(on_product.key(), 8);
    }

    #[test]
    fn test_commentable_ref_serde_tagged() {
        let json = serde_json::to_string(&CommentableRef::Product(ProductId::new(8)))
            .expect("serialize");
        assert_eq!(json, r#"{"kind":"product","id":8}"#);
    }
}
