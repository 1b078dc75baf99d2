use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::resource::{Resource, ResourceFlag};
use crate::features::posts::dtos::{CreatePostDto, UpdatePostDto};
use crate::features::posts::params::PostParams;
use crate::shared::json::{self, JsonObject};
use crate::shared::types::ListShape;
use crate::shared::wire::{wire_enum, WireEnum};

wire_enum! {
    pub enum PostStatus {
        Draft => "DRAFT",
        Published => "PUBLISHED",
    }
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Draft
    }
}

wire_enum! {
    pub enum PostCategory {
        Berita => "BERITA",
        Pengumuman => "PENGUMUMAN",
        Kegiatan => "KEGIATAN",
        Pembangunan => "PEMBANGUNAN",
        Kesehatan => "KESEHATAN",
        Pendidikan => "PENDIDIKAN",
        Ekonomi => "EKONOMI",
        SosialBudaya => "SOSIAL_BUDAYA",
        Lainnya => "LAINNYA",
    }
}

impl Default for PostCategory {
    fn default() -> Self {
        PostCategory::Lainnya
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Absent and empty are different: absent means "derive from content"
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: String,
    pub category: PostCategory,
    pub tags: Vec<String>,
    pub featured: bool,
    pub status: PostStatus,
    pub author: PostAuthor,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFlag {
    Featured,
    Published,
}

impl ResourceFlag for PostFlag {
    fn segment(&self) -> &'static str {
        match self {
            PostFlag::Featured => "feature",
            PostFlag::Published => "publish",
        }
    }

    fn field(&self) -> &'static str {
        match self {
            PostFlag::Featured => "featured",
            PostFlag::Published => "status",
        }
    }

    /// Publishing writes the status enum, not a boolean
    fn body(&self, value: bool) -> serde_json::Value {
        match self {
            PostFlag::Featured => serde_json::json!({ "featured": value }),
            PostFlag::Published => {
                let status = if value {
                    PostStatus::Published
                } else {
                    PostStatus::Draft
                };
                serde_json::json!({ "status": status })
            }
        }
    }
}

impl Resource for Post {
    const NAME: &'static str = "posts";
    const PATH: &'static str = "/posts";
    const LIST_SHAPE: ListShape = ListShape {
        list_keys: &["posts", "articles"],
        meta_keys: &["pagination"],
    };
    const SINGULAR_KEYS: &'static [&'static str] = &["post", "article"];

    type Params = PostParams;
    type Flag = PostFlag;
    type CreateDto = CreatePostDto;
    type UpdateDto = UpdatePostDto;

    fn from_json(obj: &JsonObject) -> Option<Self> {
        let id = json::id(obj)?;

        Some(Self {
            id,
            title: json::string_or_default(obj, &["title"]),
            slug: json::string_or_default(obj, &["slug"]),
            excerpt: json::string(obj, &["excerpt", "summary"]),
            content: json::string_or_default(obj, &["content", "body"]),
            // `coverImage` replaced `image`; an empty new field yields to the old one
            cover_image: json::non_empty_string(obj, &["coverImage", "image", "thumbnail"])
                .unwrap_or_default(),
            category: json::string(obj, &["category"])
                .and_then(|c| PostCategory::from_wire(&c))
                .unwrap_or_default(),
            tags: json::string_list(obj, &["tags"]),
            featured: json::bool_or(obj, &["featured", "isFeatured"], false),
            status: json::string(obj, &["status"])
                .and_then(|s| PostStatus::from_wire(&s))
                .unwrap_or_default(),
            author: author(obj),
            published_at: json::datetime(obj, &["publishedAt", "published_at"]),
            created_at: json::datetime(obj, &["createdAt", "created_at"]).unwrap_or_default(),
            updated_at: json::datetime(obj, &["updatedAt", "updated_at"]).unwrap_or_default(),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> Option<&str> {
        Some(self.slug.as_str()).filter(|s| !s.is_empty())
    }
}

/// `author` is an embedded user, a bare name, or flat `authorId`/`authorName`
fn author(obj: &JsonObject) -> PostAuthor {
    if let Some(author) = json::object(obj, &["author", "createdBy"]) {
        return PostAuthor {
            id: json::id(author).unwrap_or_default(),
            name: json::non_empty_string(author, &["name", "username", "email"])
                .unwrap_or_default(),
        };
    }
    PostAuthor {
        id: json::string_or_default(obj, &["authorId"]),
        name: json::non_empty_string(obj, &["authorName", "author"]).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: serde_json::Value) -> JsonObject {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_minimal_post_gets_safe_defaults() {
        let post = Post::from_json(&obj(json!({"id": "p1", "title": "T"}))).unwrap();
        assert_eq!(post.title, "T");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.category, PostCategory::Lainnya);
        assert!(post.tags.is_empty());
        assert_eq!(post.excerpt, None);
        assert_eq!(post.cover_image, "");
        assert_eq!(post.author, PostAuthor::default());
        assert!(!post.featured);
    }

    #[test]
    fn test_cover_image_falls_back_to_legacy_field() {
        let post = Post::from_json(&obj(json!({"id": "p1", "coverImage": "", "image": "/old.jpg"})))
            .unwrap();
        assert_eq!(post.cover_image, "/old.jpg");

        let post = Post::from_json(&obj(
            json!({"id": "p1", "coverImage": "/new.jpg", "image": "/old.jpg"}),
        ))
        .unwrap();
        assert_eq!(post.cover_image, "/new.jpg");
    }

    #[test]
    fn test_full_post() {
        let post = Post::from_json(&obj(json!({
            "id": "p2",
            "title": "Musyawarah Desa",
            "slug": "musyawarah-desa",
            "excerpt": "",
            "content": "<p>...</p>",
            "category": "pengumuman",
            "tags": ["musdes", "apbdes"],
            "featured": "true",
            "status": "PUBLISHED",
            "author": {"id": "u1", "name": "Sekdes"},
            "publishedAt": "2024-05-01T09:00:00Z"
        })))
        .unwrap();

        assert_eq!(post.category, PostCategory::Pengumuman);
        assert_eq!(post.tags, vec!["musdes", "apbdes"]);
        assert!(post.featured);
        assert!(post.is_published());
        assert_eq!(post.author.name, "Sekdes");
        assert_eq!(post.excerpt.as_deref(), Some(""));
        assert_eq!(post.slug(), Some("musyawarah-desa"));
    }

    #[test]
    fn test_unknown_status_defaults_to_draft() {
        let post = Post::from_json(&obj(json!({"id": 1, "status": "ARCHIVED", "authorName": "Admin"})))
            .unwrap();
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.author.name, "Admin");
    }

    #[test]
    fn test_publish_flag_writes_status() {
        assert_eq!(PostFlag::Published.body(true), json!({"status": "PUBLISHED"}));
        assert_eq!(PostFlag::Published.body(false), json!({"status": "DRAFT"}));
        assert_eq!(PostFlag::Featured.body(true), json!({"featured": true}));
    }
}
