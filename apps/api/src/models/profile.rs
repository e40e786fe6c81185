use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Aggregate descriptive record for a community/district.
/// Joined to projects by `area_name = name` (name match, no foreign key).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AreaProfileRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub highlights: Vec<String>,
    /// JSONB map of bedroom count -> average asking price in AED,
    /// e.g. {"1": 1350000, "2": 2100000}. Maintained by ingestion.
    pub avg_prices: Value,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeveloperProfileRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub established_year: Option<i32>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A sales broker leads can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BrokerRow {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
