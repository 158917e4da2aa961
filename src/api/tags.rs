//! Tag operations.

use reqwest::Method;

use super::{ApiClient, ApiError};
use crate::models::{NewTag, Tag};

impl ApiClient {
    /// `GET /tags`.
    pub async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.get_json("/tags").await
    }

    /// `GET /tags/:id`.
    pub async fn get_tag(&self, id: &str) -> Result<Tag, ApiError> {
        self.get_json(&format!("/tags/{}", id)).await
    }

    /// `POST /tags` (admin).
    pub async fn create_tag(&self, name: &str) -> Result<Tag, ApiError> {
        self.send_json(
            Method::POST,
            "/tags",
            &NewTag {
                name: name.to_string(),
            },
        )
        .await
    }

    /// `PUT /tags/:id` (admin).
    pub async fn update_tag(&self, id: &str, name: &str) -> Result<Tag, ApiError> {
        self.send_json(
            Method::PUT,
            &format!("/tags/{}", id),
            &NewTag {
                name: name.to_string(),
            },
        )
        .await
    }

    /// `DELETE /tags/:id` (admin).
    pub async fn delete_tag(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/tags/{}", id)).await
    }
}
