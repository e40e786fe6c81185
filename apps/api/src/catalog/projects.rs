use anyhow::Result;
use sqlx::PgPool;

use crate::catalog::query::{build_count_query, build_listing_query, ProjectFilter, PROJECT_COLUMNS};
use crate::models::project::ProjectRow;

/// Runs the filtered, sorted, paged listing query.
pub async fn list_projects(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<ProjectRow>> {
    let mut qb = build_listing_query(filter);
    Ok(qb.build_query_as::<ProjectRow>().fetch_all(pool).await?)
}

/// Counts rows matching `filter`, ignoring pagination.
pub async fn count_projects(pool: &PgPool, filter: &ProjectFilter) -> Result<i64> {
    let mut qb = build_count_query(filter);
    let total: i64 = qb.build_query_scalar().fetch_one(pool).await?;
    Ok(total)
}

pub async fn get_project_by_slug(pool: &PgPool, slug: &str) -> Result<Option<ProjectRow>> {
    Ok(sqlx::query_as::<_, ProjectRow>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = $1"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?)
}

/// Projects in an area, joined by exact name match (there is no foreign key).
pub async fn list_projects_in_area(pool: &PgPool, area_name: &str) -> Result<Vec<ProjectRow>> {
    Ok(sqlx::query_as::<_, ProjectRow>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects WHERE area_name = $1 ORDER BY created_at DESC"
    ))
    .bind(area_name)
    .fetch_all(pool)
    .await?)
}

/// Projects by a developer, joined by exact name match.
pub async fn list_projects_by_developer(
    pool: &PgPool,
    developer_name: &str,
) -> Result<Vec<ProjectRow>> {
    Ok(sqlx::query_as::<_, ProjectRow>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects WHERE developer_name = $1 ORDER BY created_at DESC"
    ))
    .bind(developer_name)
    .fetch_all(pool)
    .await?)
}

/// All area names, for matching free-text chat messages against the catalog.
pub async fn list_area_names(pool: &PgPool) -> Result<Vec<String>> {
    Ok(
        sqlx::query_scalar::<_, String>("SELECT name FROM areas ORDER BY name ASC")
            .fetch_all(pool)
            .await?,
    )
}
