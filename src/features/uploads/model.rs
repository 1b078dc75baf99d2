use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{
    ALLOWED_DOCUMENT_TYPES, ALLOWED_IMAGE_TYPES, MAX_DOCUMENT_BYTES, MAX_IMAGE_BYTES,
};
use crate::shared::json::{self, JsonObject};
use crate::shared::wire::wire_enum;

wire_enum! {
    /// Upload purpose; decides the size limit and accepted MIME types
    pub enum UploadType {
        Image => "IMAGE",
        Document => "DOCUMENT",
        Avatar => "AVATAR",
    }
}

impl Default for UploadType {
    fn default() -> Self {
        UploadType::Image
    }
}

impl UploadType {
    pub fn max_bytes(&self) -> usize {
        match self {
            UploadType::Image | UploadType::Avatar => MAX_IMAGE_BYTES,
            UploadType::Document => MAX_DOCUMENT_BYTES,
        }
    }

    pub fn allowed_types(&self) -> &'static [&'static str] {
        match self {
            UploadType::Image | UploadType::Avatar => ALLOWED_IMAGE_TYPES,
            UploadType::Document => ALLOWED_DOCUMENT_TYPES,
        }
    }
}

/// A file picked for upload, held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, taking the MIME type from its extension
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Validation(format!("Cannot read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        let content_type = content_type_from_extension(&file_name).to_string();

        Ok(Self {
            file_name,
            content_type,
            data,
        })
    }

    /// Client-side checks run before any request
    pub fn check(&self, upload_type: UploadType) -> Result<()> {
        if self.data.is_empty() {
            return Err(AppError::Validation(format!(
                "File '{}' is empty",
                self.file_name
            )));
        }

        let max = upload_type.max_bytes();
        if self.data.len() > max {
            return Err(AppError::Validation(format!(
                "File too large. Maximum size is {} MB",
                max / 1024 / 1024
            )));
        }

        let allowed = upload_type.allowed_types();
        let content_type = self.content_type.to_ascii_lowercase();
        if !allowed.contains(&content_type.as_str()) {
            return Err(AppError::Validation(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                self.content_type,
                allowed.join(", ")
            )));
        }
        Ok(())
    }
}

pub fn content_type_from_extension(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// Where the backend put an uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<u32>,
}

impl UploadedFile {
    fn from_json(obj: &JsonObject) -> Option<Self> {
        Some(Self {
            url: json::non_empty_string(obj, &["url", "fileUrl", "location", "path"])?,
            file_name: json::non_empty_string(obj, &["fileName", "filename", "originalName", "name"]),
            content_type: json::non_empty_string(obj, &["contentType", "mimeType", "mimetype"]),
            size: json::opt_u32(obj, &["size", "fileSize"]),
        })
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(url) if !url.trim().is_empty() => Some(Self {
                url: url.trim().to_string(),
                file_name: None,
                content_type: None,
                size: None,
            }),
            Value::Object(obj) => Self::from_json(obj),
            _ => None,
        }
    }

    /// Single-upload response: `{url}`, `{data: {url}}`, `{file: {url}}` or `{data: "url"}`
    pub fn from_body(body: &Value) -> Option<Self> {
        let obj = body.as_object()?;
        Self::from_json(obj)
            .or_else(|| json::field(obj, &["data", "file"]).and_then(Self::from_value))
            .or_else(|| {
                json::object(obj, &["data"])
                    .and_then(|d| json::field(d, &["file"]))
                    .and_then(Self::from_value)
            })
    }

    /// Multi-upload response: a list of files or URLs, wherever the envelope put it
    pub fn list_from_body(body: &Value) -> Vec<Self> {
        json::locate_list(body, &["files", "uploads", "urls"])
            .map(|items| items.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default()
    }
}
