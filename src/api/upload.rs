//! Image upload (multipart).

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;

use super::{ApiClient, ApiError};

/// Mirrors the server's limit so oversized files fail before the network.
const MAX_UPLOAD_BYTES: u64 = 3 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "imageUrl")]
    image_url: String,
}

impl ApiClient {
    /// `POST /upload/image` (admin). Sends the file as multipart form data
    /// under the `image` field. The server answers with a relative path,
    /// which is joined with the configured upload host before being handed
    /// back.
    pub async fn upload_image(&self, path: &Path) -> Result<String, ApiError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ApiError::Message(
                "Invalid file format. Allowed formats: jpg, jpeg, png, gif".to_string(),
            ));
        }

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ApiError::Message(format!("Failed to read {}: {}", path.display(), e)))?;
        if metadata.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::Message("File size exceeds 3MB limit".to_string()));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Message(format!("Failed to read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.as_ref())
            .map_err(|_| ApiError::unexpected())?;

        let req = self
            .http
            .post(self.url("/upload/image"))
            .multipart(Form::new().part("image", part));
        let body = self.execute(req).await?;
        let response: UploadResponse = super::decode(&body)?;

        Ok(format!("{}{}", self.upload_host, response.image_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::session::TokenStore;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_upload_joins_configured_host_prefix() {
        let router = Router::new().route(
            "/upload/image",
            post(|| async { Json(json!({"imageUrl": "/uploads/images/1712.png"})) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let dir = tempdir().unwrap();
        let file = dir.path().join("poster.png");
        std::fs::write(&file, b"\x89PNG\r\n").unwrap();

        let store = TokenStore::new(dir.path(), "token");
        let config = ApiConfig {
            base_url: format!("http://{}", addr),
            upload_host: "https://img.example.com".to_string(),
            timeout_secs: 5,
        };
        let (client, _rx) = ApiClient::new(&config, store).unwrap();

        let url = client.upload_image(&file).await.unwrap();
        assert_eq!(url, "https://img.example.com/uploads/images/1712.png");
    }

    #[tokio::test]
    async fn test_disallowed_extension_rejected_locally() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, b"hello").unwrap();

        let store = TokenStore::new(dir.path(), "token");
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            upload_host: "https://img.example.com".to_string(),
            timeout_secs: 5,
        };
        let (client, _rx) = ApiClient::new(&config, store).unwrap();

        let err = client.upload_image(&file).await.unwrap_err();
        assert!(err.to_string().contains("Invalid file format"));
    }
}
