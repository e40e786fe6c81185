use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::profiles;
use crate::errors::AppError;
use crate::leads::{self, NewLead};
use crate::models::lead::{LeadRecordRow, LeadSource, LeadStatus};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateLeadRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub project_slug: Option<String>,
}

#[derive(Serialize)]
pub struct CreateLeadResponse {
    pub id: Uuid,
}

/// Contact-form validation shared with the brochure-request flow: a name
/// and at least one way to reach the person.
pub fn validate_contact(
    name: &str,
    phone: Option<&str>,
    email: Option<&str>,
) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    let has_phone = phone.is_some_and(|p| !p.trim().is_empty());
    let has_email = email.is_some_and(|e| e.contains('@'));
    if !has_phone && !has_email {
        return Err(AppError::Validation(
            "A phone number or a valid email is required".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/leads
pub async fn handle_create_lead(
    State(state): State<AppState>,
    Json(req): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<CreateLeadResponse>), AppError> {
    validate_contact(&req.name, req.phone.as_deref(), req.email.as_deref())?;
    let id = leads::insert_lead(
        &state.db,
        &NewLead {
            name: Some(req.name.trim()),
            phone: req.phone.as_deref(),
            email: req.email.as_deref(),
            message: req.message.as_deref(),
            source: LeadSource::ContactForm,
            project_slug: req.project_slug.as_deref(),
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(CreateLeadResponse { id })))
}

#[derive(Deserialize)]
pub struct LeadListQuery {
    pub status: Option<LeadStatus>,
}

/// GET /api/v1/leads
pub async fn handle_list_leads(
    State(state): State<AppState>,
    Query(params): Query<LeadListQuery>,
) -> Result<Json<Vec<LeadRecordRow>>, AppError> {
    Ok(Json(leads::list_leads(&state.db, params.status).await?))
}

/// GET /api/v1/leads/:id
pub async fn handle_get_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeadRecordRow>, AppError> {
    let lead = leads::get_lead(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lead {id} not found")))?;
    Ok(Json(lead))
}

#[derive(Deserialize)]
pub struct AssignLeadRequest {
    pub broker_id: Uuid,
}

/// PATCH /api/v1/leads/:id/assign
pub async fn handle_assign_lead(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignLeadRequest>,
) -> Result<StatusCode, AppError> {
    leads::get_lead(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lead {id} not found")))?;
    profiles::get_broker(&state.db, req.broker_id)
        .await?
        .ok_or_else(|| AppError::Validation(format!("Broker {} not found", req.broker_id)))?;
    leads::assign_lead(&state.db, id, req.broker_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct UpdateLeadStatusRequest {
    pub status: LeadStatus,
}

/// PATCH /api/v1/leads/:id/status
pub async fn handle_update_lead_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateLeadStatusRequest>,
) -> Result<StatusCode, AppError> {
    leads::get_lead(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lead {id} not found")))?;
    leads::update_lead_status(&state.db, id, req.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_contact_requires_name() {
        assert!(validate_contact("  ", Some("+971501234567"), None).is_err());
    }

    #[test]
    fn test_validate_contact_requires_a_channel() {
        assert!(validate_contact("Amira", None, None).is_err());
        assert!(validate_contact("Amira", Some(""), Some("not-an-email")).is_err());
    }

    #[test]
    fn test_validate_contact_accepts_either_channel() {
        assert!(validate_contact("Amira", Some("+971501234567"), None).is_ok());
        assert!(validate_contact("Amira", None, Some("amira@example.com")).is_ok());
    }
}
