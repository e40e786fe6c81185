use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogPostRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    /// NULL while the post is in draft; only published posts are listed.
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
