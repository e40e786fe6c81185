pub mod handlers;

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::lead::{LeadRecordRow, LeadSource, LeadStatus};

/// Parameters for inserting a lead. Chat, the contact form and the gated
/// brochure flow all go through [`insert_lead`].
pub struct NewLead<'a> {
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub message: Option<&'a str>,
    pub source: LeadSource,
    pub project_slug: Option<&'a str>,
}

pub async fn insert_lead(pool: &PgPool, lead: &NewLead<'_>) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO leads (id, name, phone, email, message, source, project_slug, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(lead.name)
    .bind(lead.phone)
    .bind(lead.email)
    .bind(lead.message)
    .bind(lead.source.as_str())
    .bind(lead.project_slug)
    .bind(LeadStatus::New.as_str())
    .execute(pool)
    .await?;

    info!(lead_id = %id, source = lead.source.as_str(), "lead captured");
    Ok(id)
}

pub async fn get_lead(pool: &PgPool, id: Uuid) -> Result<Option<LeadRecordRow>> {
    Ok(
        sqlx::query_as::<_, LeadRecordRow>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Back-office listing, newest first, optionally narrowed to one status.
pub async fn list_leads(pool: &PgPool, status: Option<LeadStatus>) -> Result<Vec<LeadRecordRow>> {
    let rows = match status {
        Some(status) => {
            sqlx::query_as::<_, LeadRecordRow>(
                "SELECT * FROM leads WHERE status = $1 ORDER BY created_at DESC",
            )
            .bind(status.as_str())
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, LeadRecordRow>("SELECT * FROM leads ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

pub async fn assign_lead(pool: &PgPool, id: Uuid, broker_id: Uuid) -> Result<()> {
    sqlx::query(
        "UPDATE leads SET broker_id = $1, status = $2, updated_at = NOW() WHERE id = $3",
    )
    .bind(broker_id)
    .bind(LeadStatus::Assigned.as_str())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update_lead_status(pool: &PgPool, id: Uuid, status: LeadStatus) -> Result<()> {
    sqlx::query("UPDATE leads SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
