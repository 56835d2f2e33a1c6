//! Blog post resource.

use chrono::{NaiveDate, Utc};
use serde_json::Value;

use crate::directory::AdminDirectory;
use crate::forms::FormValues;
use crate::models::blog::Post;
use crate::query::Predicate;
use crate::resource::{
    GloballySearchable, HasInfolist, RelationManagerRef, Resource, ResourcePages,
};
use crate::schema::filter::{Filter, FilterInput, Indicator};
use crate::schema::form::{
    Field, FormSchema, OptionsSource, PlaceholderContent, Section, SelectConfig,
};
use crate::schema::infolist::{Entry, InfolistSchema, InfolistSection};
use crate::schema::table::{BadgeColor, BulkAction, Column, RowAction, TableSchema};

/// Publish status labels derived from the publication date.
pub const STATUS_PUBLISHED: &str = "Publicado";
/// Draft label (no date, or a future date).
pub const STATUS_DRAFT: &str = "Rascunho";

/// The blog posts resource.
pub struct PostResource;

impl Resource for PostResource {
    type Record = Post;

    const SLUG: &'static str = "blog/posts";
    const RECORD_TITLE_ATTRIBUTE: &'static str = "title";
    const NAVIGATION_GROUP: &'static str = "Blog";
    const NAVIGATION_ICON: &'static str = "heroicon-o-document-text";
    const NAVIGATION_SORT: i32 = 0;

    fn model_label() -> &'static str {
        "Post"
    }

    fn plural_model_label() -> &'static str {
        "Posts"
    }

    fn form() -> FormSchema {
        FormSchema::new(3)
            .section(
                Section::new()
                    .columns(2)
                    .field(Field::text("title").label("Título").required())
                    .field(
                        Field::text("slug")
                            .disabled()
                            .dehydrated()
                            .required()
                            .unique("posts", "slug")
                            .derive_slug_from("title"),
                    )
                    .field(
                        Field::markdown("content")
                            .label("Conteúdo")
                            .required()
                            .span_full(),
                    )
                    .field(
                        Field::select("author_id", SelectConfig::new(OptionsSource::Authors).searchable())
                            .label("Autor")
                            .required(),
                    )
                    .field(
                        Field::select(
                            "category_id",
                            SelectConfig::new(OptionsSource::BlogCategories).searchable(),
                        )
                        .label("Categoria")
                        .required(),
                    )
                    .field(Field::date("published_at").label("Data da Publicação"))
                    .field(Field::tags("tags")),
            )
            .section(
                Section::titled("Imagem")
                    .collapsible()
                    .field(Field::file_upload("image", true, 1).label("Image")),
            )
            .section(
                Section::new()
                    .aside()
                    .hidden_on_create()
                    .field(
                        Field::placeholder_content("created_at", PlaceholderContent::CreatedAt)
                            .label("Criado"),
                    )
                    .field(
                        Field::placeholder_content("updated_at", PlaceholderContent::UpdatedAt)
                            .label("Modificado"),
                    ),
            )
    }

    fn table() -> TableSchema<Post> {
        TableSchema::new()
            .column(Column::image("image", "Imagem"))
            .column(Column::text("title", "Título").searchable().sortable())
            .column(Column::text("slug", "Slug").searchable().sortable().hidden_by_default())
            .column(
                Column::text("author.name", "Autor")
                    .searchable()
                    .sortable()
                    .toggleable()
                    .state(author_name),
            )
            .column(
                Column::badge("status", "Status")
                    .state(publish_status)
                    .badge_colors(publish_status_color),
            )
            .column(
                Column::text("category.name", "Categoria")
                    .searchable()
                    .sortable()
                    .hidden_by_default()
                    .state(category_name),
            )
            .column(
                Column::text("published_at", "Data de Publicação").date("%d/%m/%Y"),
            )
            .filter(published_at_filter())
            .action(RowAction::View)
            .action(RowAction::Edit)
            .action(RowAction::Delete)
            .bulk_action(BulkAction::delete_with_warning())
    }

    fn pages() -> ResourcePages {
        ResourcePages::standard(Self::SLUG).with_view()
    }

    fn relation_managers() -> Vec<RelationManagerRef> {
        vec![RelationManagerRef {
            relationship: "comments",
            title: "Comentários",
        }]
    }

    fn record_values(record: &Post) -> FormValues {
        let mut values = FormValues::new()
            .set_str("title", &record.title)
            .set_str("slug", record.slug.as_str())
            .set_str("content", &record.content)
            .set("author_id", Value::from(record.author_id.as_i32()))
            .set("category_id", Value::from(record.category_id.as_i32()))
            .set(
                "tags",
                Value::Array(record.tags.iter().cloned().map(Value::String).collect()),
            );
        if let Some(date) = record.published_at {
            values.insert("published_at", Value::String(date.format("%Y-%m-%d").to_string()));
        }
        if let Some(image) = &record.image {
            values.insert("image", Value::String(image.clone()));
        }
        values
    }
}

impl HasInfolist for PostResource {
    fn infolist() -> InfolistSchema<Post> {
        InfolistSchema::new()
            .section(
                InfolistSection::new()
                    .columns(2)
                    .entry(Entry::text("title").label("Título"))
                    .entry(Entry::text("slug"))
                    .entry(
                        Entry::badge("published_at")
                            .label("Publicado em")
                            .date("%d/%m/%Y"),
                    )
                    .entry(Entry::text("author.name").label("Autor").state(author_name))
                    .entry(
                        Entry::text("category.name")
                            .label("Categoria")
                            .state(category_name),
                    )
                    .entry(Entry::badge("tags").state(tags_line))
                    .entry(Entry::image("image").hidden_label()),
            )
            .section(
                InfolistSection::titled("Conteúdo")
                    .collapsible()
                    .entry(Entry::markdown("content").hidden_label()),
            )
    }
}

impl GloballySearchable for PostResource {
    fn searchable_attributes() -> &'static [&'static str] {
        &["title", "slug", "author.name", "category.name"]
    }

    fn attribute_text(record: &Post, attribute: &str, directory: &dyn AdminDirectory) -> Option<String> {
        match attribute {
            "title" => Some(record.title.clone()),
            "slug" => Some(record.slug.as_str().to_string()),
            "author.name" => directory.author_name(record.author_id),
            "category.name" => directory.category_name(record.category_id),
            _ => None,
        }
    }

    fn search_title(record: &Post) -> String {
        record.title.clone()
    }

    fn search_details(record: &Post, directory: &dyn AdminDirectory) -> Vec<(&'static str, String)> {
        let mut details = Vec::new();
        if let Some(author) = directory.author_name(record.author_id) {
            details.push(("Author", author));
        }
        if let Some(category) = directory.category_name(record.category_id) {
            details.push(("Category", category));
        }
        details
    }
}

/// "Publicado" when the publication date is today or earlier; otherwise
/// (future date or no date) "Rascunho".
#[must_use]
pub fn publish_status_label(published_at: Option<NaiveDate>, today: NaiveDate) -> &'static str {
    match published_at {
        Some(date) if date <= today => STATUS_PUBLISHED,
        _ => STATUS_DRAFT,
    }
}

fn publish_status(record: &Post, _: &dyn AdminDirectory) -> Option<String> {
    Some(publish_status_label(record.published_at, Utc::now().date_naive()).to_string())
}

fn publish_status_color(state: &str) -> Option<BadgeColor> {
    (state == STATUS_PUBLISHED).then_some(BadgeColor::Success)
}

fn author_name(record: &Post, directory: &dyn AdminDirectory) -> Option<String> {
    directory.author_name(record.author_id)
}

fn category_name(record: &Post, directory: &dyn AdminDirectory) -> Option<String> {
    directory.category_name(record.category_id)
}

fn tags_line(record: &Post, _: &dyn AdminDirectory) -> Option<String> {
    if record.tags.is_empty() {
        None
    } else {
        Some(record.tags.join(", "))
    }
}

/// The publication date range filter.
///
/// Either bound may be absent; whichever is present constrains its own side
/// of the inclusive range.
#[must_use]
pub fn published_at_filter() -> Filter {
    Filter::new("published_at", apply_published_range)
        .field(Field::date("published_from").label("De:"))
        .field(Field::date("published_until").label("Até:"))
        .indicators(indicate_published_range)
}

fn apply_published_range(input: &FilterInput, query: &mut crate::query::Query) {
    if let Some(date) = input.get_date("published_from") {
        query.push(Predicate::DateOnOrAfter {
            column: "published_at".into(),
            date,
        });
    }
    if let Some(date) = input.get_date("published_until") {
        query.push(Predicate::DateOnOrBefore {
            column: "published_at".into(),
            date,
        });
    }
}

fn indicate_published_range(input: &FilterInput, _: &dyn AdminDirectory) -> Vec<Indicator> {
    let mut indicators = Vec::new();
    if let Some(date) = input.get_date("published_from") {
        indicators.push(Indicator::new(
            "published_from",
            format!("De {}", date.format("%d/%m/%Y")),
        ));
    }
    if let Some(date) = input.get_date("published_until") {
        indicators.push(Indicator::new(
            "published_until",
            format!("Até {}", date.format("%d/%m/%Y")),
        ));
    }
    indicators
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::table::ColumnKind;
    use chrono::Days;

    #[test]
    fn test_publish_status_label() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let tomorrow = today.succ_opt().unwrap();

        assert_eq!(publish_status_label(Some(yesterday), today), STATUS_PUBLISHED);
        assert_eq!(publish_status_label(Some(today), today), STATUS_PUBLISHED);
        assert_eq!(publish_status_label(Some(tomorrow), today), STATUS_DRAFT);
        assert_eq!(publish_status_label(None, today), STATUS_DRAFT);
    }

    #[test]
    fn test_status_column_uses_wall_clock() {
        let yesterday = Utc::now().date_naive().checked_sub_days(Days::new(1)).unwrap();
        let post = post_fixture(Some(yesterday));

        struct NoDirectory;
        impl AdminDirectory for NoDirectory {}

        let table = PostResource::table();
        let status = table.column_by_key("status").unwrap();
        assert_eq!(status.display(&post, &NoDirectory), Some(STATUS_PUBLISHED.into()));
    }

    #[test]
    fn test_status_badge_color() {
        assert_eq!(publish_status_color(STATUS_PUBLISHED), Some(BadgeColor::Success));
        assert_eq!(publish_status_color(STATUS_DRAFT), None);
    }

    #[test]
    fn test_form_slug_field_is_frozen_and_unique() {
        let form = PostResource::form();
        let slug = form.field("slug").unwrap();
        assert!(slug.disabled && slug.dehydrated && slug.required);
        assert!(slug.derive_on_create.is_some());
    }

    #[test]
    fn test_table_column_flags_match_screen() {
        let table = PostResource::table();

        let title = table.column_by_key("title").unwrap();
        assert!(title.searchable && title.sortable && !title.toggleable);

        let slug = table.column_by_key("slug").unwrap();
        assert!(slug.toggled_hidden_by_default);

        assert_eq!(table.column_by_key("image").unwrap().kind, ColumnKind::Image);
        assert!(table.groups.is_empty());
    }

    fn post_fixture(published_at: Option<NaiveDate>) -> Post {
        use mercado_core::{AuthorId, CategoryId, PostId, Slug};

        Post {
            id: PostId::new(1),
            title: "Hello World".into(),
            slug: Slug::from_title("Hello World"),
            content: "body".into(),
            author_id: AuthorId::new(1),
            category_id: CategoryId::new(1),
            published_at,
            tags: vec![],
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
