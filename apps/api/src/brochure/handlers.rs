use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::brochure::{layout, storage};
use crate::catalog::projects;
use crate::errors::AppError;
use crate::leads::handlers::validate_contact;
use crate::leads::{self, NewLead};
use crate::models::lead::LeadSource;
use crate::state::AppState;

/// GET /api/v1/projects/:slug/brochure
///
/// Generates the brochure and returns it inline. The S3 copy is
/// best-effort; a storage outage must not block the download.
pub async fn handle_get_brochure(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let project = projects::get_project_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project '{slug}' not found")))?;

    let pdf = layout::render_brochure(&project)?;

    if let Err(e) =
        storage::upload_brochure(&state.s3, &state.config.s3_bucket, &project.slug, pdf.clone())
            .await
    {
        warn!("brochure upload failed for {}: {e}", project.slug);
    }

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}-brochure.pdf\"", project.slug),
        ),
    ];
    Ok((headers, Bytes::from(pdf)))
}

#[derive(Deserialize)]
pub struct BrochureRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct BrochureRequestResponse {
    pub lead_id: Uuid,
    pub url: String,
}

/// POST /api/v1/projects/:slug/brochure-request
///
/// Gated variant: captures a lead, then hands back a shareable link. Here
/// the upload is the deliverable, so its failure is an error.
pub async fn handle_brochure_request(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<BrochureRequest>,
) -> Result<(StatusCode, Json<BrochureRequestResponse>), AppError> {
    validate_contact(&req.name, req.phone.as_deref(), req.email.as_deref())?;

    let project = projects::get_project_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project '{slug}' not found")))?;

    let pdf = layout::render_brochure(&project)?;
    let key = storage::upload_brochure(&state.s3, &state.config.s3_bucket, &project.slug, pdf)
        .await
        .map_err(|e| AppError::S3(e.to_string()))?;
    let url = storage::public_url(&state.config.s3_endpoint, &state.config.s3_bucket, &key);

    let lead_id = leads::insert_lead(
        &state.db,
        &NewLead {
            name: Some(req.name.trim()),
            phone: req.phone.as_deref(),
            email: req.email.as_deref(),
            message: None,
            source: LeadSource::Brochure,
            project_slug: Some(&project.slug),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(BrochureRequestResponse { lead_id, url }),
    ))
}
