/// Page requested when the caller does not ask for one
pub const DEFAULT_PAGE: u32 = 1;

/// Upper bound on `limit`, whatever the caller asks for
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort field used by every list query unless overridden
pub const DEFAULT_SORT_BY: &str = "createdAt";

// =============================================================================
// PER-RESOURCE PAGE SIZES
// =============================================================================

pub const POSTS_PAGE_SIZE: u32 = 9;
pub const EVENTS_PAGE_SIZE: u32 = 9;
pub const UMKM_PAGE_SIZE: u32 = 12;
pub const CONTACTS_PAGE_SIZE: u32 = 12;
pub const SERVICE_GUIDES_PAGE_SIZE: u32 = 10;
pub const VILLAGE_PROFILE_PAGE_SIZE: u32 = 10;
pub const USERS_PAGE_SIZE: u32 = 10;

// =============================================================================
// UPLOAD LIMITS
// =============================================================================

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

pub const ALLOWED_DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];
