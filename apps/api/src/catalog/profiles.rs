use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{AreaProfileRow, BrokerRow, DeveloperProfileRow};

pub async fn list_areas(pool: &PgPool) -> Result<Vec<AreaProfileRow>> {
    Ok(
        sqlx::query_as::<_, AreaProfileRow>("SELECT * FROM areas ORDER BY name ASC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn get_area_by_slug(pool: &PgPool, slug: &str) -> Result<Option<AreaProfileRow>> {
    Ok(
        sqlx::query_as::<_, AreaProfileRow>("SELECT * FROM areas WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn list_developers(pool: &PgPool) -> Result<Vec<DeveloperProfileRow>> {
    Ok(
        sqlx::query_as::<_, DeveloperProfileRow>("SELECT * FROM developers ORDER BY name ASC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn get_developer_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<DeveloperProfileRow>> {
    Ok(
        sqlx::query_as::<_, DeveloperProfileRow>("SELECT * FROM developers WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn get_broker(pool: &PgPool, id: Uuid) -> Result<Option<BrokerRow>> {
    Ok(
        sqlx::query_as::<_, BrokerRow>("SELECT * FROM brokers WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}
