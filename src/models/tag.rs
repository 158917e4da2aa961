use serde::{Deserialize, Serialize};

/// A tag, globally unique by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// Body for `POST /tags` and `PUT /tags/:id`.
#[derive(Debug, Serialize)]
pub struct NewTag {
    pub name: String,
}
