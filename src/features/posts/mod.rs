//! News posts: public articles and their admin management

pub mod dtos;
pub mod model;
pub mod params;
pub mod service;

pub use model::{Post, PostAuthor, PostCategory, PostFlag, PostStatus};
pub use params::PostParams;
pub use service::PostService;
