use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::query::ProjectFilter;
use crate::catalog::{blog, profiles, projects};
use crate::errors::AppError;
use crate::models::blog::BlogPostRow;
use crate::models::profile::{AreaProfileRow, DeveloperProfileRow};
use crate::models::project::ProjectRow;
use crate::models::property::{flatten_project, PropertyCard};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProjectListResponse {
    pub total: i64,
    pub projects: Vec<ProjectRow>,
}

/// GET /api/v1/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let total = projects::count_projects(&state.db, &filter).await?;
    let projects = projects::list_projects(&state.db, &filter).await?;
    Ok(Json(ProjectListResponse { total, projects }))
}

/// GET /api/v1/projects/:slug
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProjectRow>, AppError> {
    let project = projects::get_project_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project '{slug}' not found")))?;
    Ok(Json(project))
}

#[derive(Serialize)]
pub struct PropertyListResponse {
    pub total: usize,
    pub properties: Vec<PropertyCard>,
}

/// GET /api/v1/properties
///
/// Flattens the filtered projects into project x unit cards, then applies
/// the bedroom and price filters again at the unit level (the SQL clauses
/// only guarantee the *project* has a matching unit).
pub async fn handle_list_properties(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<PropertyListResponse>, AppError> {
    let rows = projects::list_projects(&state.db, &filter).await?;
    let mut properties: Vec<PropertyCard> = rows.iter().flat_map(|p| flatten_project(p)).collect();
    properties.retain(|card| {
        filter.bedrooms.map_or(true, |b| card.bedrooms == b)
            && filter.min_price.map_or(true, |min| card.price_aed >= min)
            && filter.max_price.map_or(true, |max| card.price_aed <= max)
            && filter
                .golden_visa
                .map_or(true, |gv| card.golden_visa_eligible == gv)
    });
    Ok(Json(PropertyListResponse {
        total: properties.len(),
        properties,
    }))
}

/// GET /api/v1/properties/:slug
///
/// Property slugs are "{project_slug}--{unit_slug}", assigned during
/// flattening.
pub async fn handle_get_property(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PropertyCard>, AppError> {
    let (project_slug, _) = slug
        .split_once("--")
        .ok_or_else(|| AppError::NotFound(format!("Property '{slug}' not found")))?;
    let project = projects::get_project_by_slug(&state.db, project_slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Property '{slug}' not found")))?;
    let card = flatten_project(&project)
        .into_iter()
        .find(|c| c.slug == slug)
        .ok_or_else(|| AppError::NotFound(format!("Property '{slug}' not found")))?;
    Ok(Json(card))
}

/// GET /api/v1/areas
pub async fn handle_list_areas(
    State(state): State<AppState>,
) -> Result<Json<Vec<AreaProfileRow>>, AppError> {
    Ok(Json(profiles::list_areas(&state.db).await?))
}

#[derive(Serialize)]
pub struct AreaDetailResponse {
    pub area: AreaProfileRow,
    pub projects: Vec<ProjectRow>,
}

/// GET /api/v1/areas/:slug
pub async fn handle_get_area(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AreaDetailResponse>, AppError> {
    let area = profiles::get_area_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Area '{slug}' not found")))?;
    let projects = projects::list_projects_in_area(&state.db, &area.name).await?;
    Ok(Json(AreaDetailResponse { area, projects }))
}

/// GET /api/v1/developers
pub async fn handle_list_developers(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeveloperProfileRow>>, AppError> {
    Ok(Json(profiles::list_developers(&state.db).await?))
}

#[derive(Serialize)]
pub struct DeveloperDetailResponse {
    pub developer: DeveloperProfileRow,
    pub projects: Vec<ProjectRow>,
}

/// GET /api/v1/developers/:slug
pub async fn handle_get_developer(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DeveloperDetailResponse>, AppError> {
    let developer = profiles::get_developer_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Developer '{slug}' not found")))?;
    let projects = projects::list_projects_by_developer(&state.db, &developer.name).await?;
    Ok(Json(DeveloperDetailResponse {
        developer,
        projects,
    }))
}

#[derive(Deserialize)]
pub struct BlogListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/blog
pub async fn handle_list_blog(
    State(state): State<AppState>,
    Query(params): Query<BlogListQuery>,
) -> Result<Json<Vec<BlogPostRow>>, AppError> {
    let limit = params.limit.unwrap_or(12).clamp(1, 50);
    let offset = params.offset.unwrap_or(0).max(0);
    Ok(Json(blog::list_published_posts(&state.db, limit, offset).await?))
}

/// GET /api/v1/blog/:slug
pub async fn handle_get_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostRow>, AppError> {
    let post = blog::get_published_post_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{slug}' not found")))?;
    Ok(Json(post))
}
