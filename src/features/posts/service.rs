use std::sync::Arc;

use crate::core::error::Result;
use crate::core::resource::ResourceService;
use crate::features::posts::model::{Post, PostFlag, PostStatus};
use crate::features::posts::params::PostParams;
use crate::shared::params::PageParams;
use crate::shared::types::Paginated;

pub type PostService = ResourceService<Post>;

impl ResourceService<Post> {
    /// Detail by slug, the public site's route key
    pub async fn get_by_slug(&self, slug: &str) -> Result<Arc<Option<Post>>> {
        self.get(slug).await
    }

    /// Latest featured, published posts for the home page
    pub async fn featured(&self, limit: u32) -> Result<Arc<Paginated<Post>>> {
        let params = PostParams {
            page: PageParams::new(1, limit),
            status: Some(PostStatus::Published),
            featured: Some(true),
            ..Default::default()
        };
        self.list(&params).await
    }

    pub async fn set_published(&self, id: &str, published: bool) -> Result<Option<Post>> {
        self.set_flag(id, PostFlag::Published, published).await
    }

    pub async fn set_featured(&self, id: &str, featured: bool) -> Result<Option<Post>> {
        self.set_flag(id, PostFlag::Featured, featured).await
    }
}
