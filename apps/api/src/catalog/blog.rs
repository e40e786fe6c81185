use anyhow::Result;
use sqlx::PgPool;

use crate::models::blog::BlogPostRow;

/// Published posts, newest first. Drafts (NULL published_at) never appear.
pub async fn list_published_posts(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<BlogPostRow>> {
    Ok(sqlx::query_as::<_, BlogPostRow>(
        "SELECT * FROM blog_posts WHERE published_at IS NOT NULL \
         ORDER BY published_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?)
}

pub async fn get_published_post_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<BlogPostRow>> {
    Ok(sqlx::query_as::<_, BlogPostRow>(
        "SELECT * FROM blog_posts WHERE slug = $1 AND published_at IS NOT NULL",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?)
}
