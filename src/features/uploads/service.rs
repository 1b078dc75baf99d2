use std::future::Future;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};

use crate::core::error::{AppError, Result};
use crate::core::http_client::ApiClient;
use crate::features::uploads::model::{UploadFile, UploadType, UploadedFile};
use crate::shared::wire::WireEnum;

/// Multipart uploads to `/upload` and `/upload/multiple`.
///
/// The multipart boundary header is left to reqwest.
#[derive(Clone)]
pub struct UploadService {
    api: Arc<ApiClient>,
}

impl UploadService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn upload(&self, file: UploadFile, upload_type: UploadType) -> Result<UploadedFile> {
        file.check(upload_type)?;
        let size = file.data.len();
        let name = file.file_name.clone();

        let form = Form::new()
            .text("type", upload_type.as_str())
            .part("file", into_part(file)?);
        let body = self.api.upload("/upload", form).await?;

        let uploaded = UploadedFile::from_body(&body).ok_or_else(|| {
            AppError::Decode("Upload response carries no file URL".to_string())
        })?;
        tracing::info!("Uploaded {} ({} bytes) as {}", name, size, upload_type);
        Ok(uploaded)
    }

    /// All files are checked before anything is sent
    pub async fn upload_multiple(
        &self,
        files: Vec<UploadFile>,
        upload_type: UploadType,
    ) -> Result<Vec<UploadedFile>> {
        if files.is_empty() {
            return Err(AppError::Validation("No files selected".to_string()));
        }
        for file in &files {
            file.check(upload_type)?;
        }

        let count = files.len();
        let mut form = Form::new().text("type", upload_type.as_str());
        for file in files {
            form = form.part("files", into_part(file)?);
        }
        let body = self.api.upload("/upload/multiple", form).await?;

        let uploaded = UploadedFile::list_from_body(&body);
        if uploaded.len() != count {
            tracing::warn!("Uploaded {} files, backend reported {}", count, uploaded.len());
        }
        Ok(uploaded)
    }

    /// Upload, then run `then` with the result. A failed upload skips `then`.
    pub async fn with_uploaded<T, F, Fut>(
        &self,
        file: UploadFile,
        upload_type: UploadType,
        then: F,
    ) -> Result<T>
    where
        F: FnOnce(UploadedFile) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let uploaded = self.upload(file, upload_type).await?;
        then(uploaded).await
    }
}

fn into_part(file: UploadFile) -> Result<Part> {
    Part::bytes(file.data)
        .file_name(file.file_name)
        .mime_str(&file.content_type)
        .map_err(|e| AppError::Validation(format!("Invalid content type: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::UserRole;
    use crate::features::posts::dtos::UpdatePostDto;
    use crate::features::posts::PostService;
    use crate::shared::test_helpers::TestContext;
    use httpmock::prelude::*;
    use serde_json::json;

    fn photo() -> UploadFile {
        UploadFile::new("balai-desa.png", "image/png", vec![137u8, 80, 78, 71, 1, 2, 3])
    }

    #[tokio::test]
    async fn test_upload_sends_multipart() {
        let server = MockServer::start();
        let ctx = TestContext::signed_in(&server, UserRole::Editor).await;
        let uploads = UploadService::new(ctx.api.clone());

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/upload")
                .header_exists("authorization")
                .body_includes("name=\"file\"; filename=\"balai-desa.png\"")
                .body_includes("IMAGE");
            then.status(201)
                .json_body(json!({"data": {"url": "/uploads/balai-desa.png", "size": 7}}));
        });

        let uploaded = uploads.upload(photo(), UploadType::Image).await.unwrap();
        mock.assert_calls(1);
        assert_eq!(uploaded.url, "/uploads/balai-desa.png");
        assert_eq!(uploaded.size, Some(7));
    }

    #[tokio::test]
    async fn test_rejected_file_is_never_sent() {
        let server = MockServer::start();
        let ctx = TestContext::signed_in(&server, UserRole::Editor).await;
        let uploads = UploadService::new(ctx.api.clone());

        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(201).json_body(json!({"url": "/x"}));
        });

        let exe = UploadFile::new("virus.exe", "application/x-msdownload", vec![1u8]);
        let err = uploads.upload(exe, UploadType::Document).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let files = vec![photo(), UploadFile::new("kosong.png", "image/png", Vec::<u8>::new())];
        assert!(uploads.upload_multiple(files, UploadType::Image).await.is_err());
        mock.assert_calls(0);
    }

    #[tokio::test]
    async fn test_upload_multiple() {
        let server = MockServer::start();
        let ctx = TestContext::signed_in(&server, UserRole::Editor).await;
        let uploads = UploadService::new(ctx.api.clone());

        let _m = server.mock(|when, then| {
            when.method(POST)
                .path("/upload/multiple")
                .body_includes("name=\"files\"");
            then.status(201)
                .json_body(json!({"data": [{"url": "/u/1.png"}, {"url": "/u/2.png"}]}));
        });

        let uploaded = uploads
            .upload_multiple(vec![photo(), photo()], UploadType::Image)
            .await
            .unwrap();
        assert_eq!(uploaded.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_upload_skips_mutation() {
        let server = MockServer::start();
        let ctx = TestContext::signed_in(&server, UserRole::Editor).await;
        let uploads = UploadService::new(ctx.api.clone());
        let posts = PostService::new(ctx.api.clone());

        let _upload = server.mock(|when, then| {
            when.method(POST).path("/upload");
            then.status(500).json_body(json!({"message": "Storage penuh"}));
        });
        let update = server.mock(|when, then| {
            when.method(PATCH).path("/posts/p1");
            then.status(200).json_body(json!({"data": {"id": "p1"}}));
        });

        let err = uploads
            .with_uploaded(photo(), UploadType::Image, |file| {
                let posts = posts.clone();
                async move {
                    let dto = UpdatePostDto {
                        cover_image: Some(file.url),
                        ..Default::default()
                    };
                    posts.update("p1", &dto).await
                }
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Storage penuh");
        update.assert_calls(0);
    }
}
