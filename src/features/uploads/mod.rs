//! File uploads for images, documents and avatars

pub mod model;
pub mod service;

pub use model::{UploadFile, UploadType, UploadedFile};
pub use service::UploadService;
