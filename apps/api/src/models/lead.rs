use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An inbound lead captured from chat, the contact form, or a gated
/// brochure download. `project_slug` references a project by slug (not id)
/// so leads survive project re-ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeadRecordRow {
    pub id: Uuid,
    /// Chat-captured leads may arrive without a name.
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    /// "chat", "contact_form" or "brochure"
    pub source: String,
    pub project_slug: Option<String>,
    pub broker_id: Option<Uuid>,
    /// "new", "assigned", "contacted" or "closed"
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where a lead came from. Stored as text in the leads table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Chat,
    ContactForm,
    Brochure,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Chat => "chat",
            LeadSource::ContactForm => "contact_form",
            LeadSource::Brochure => "brochure",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Assigned,
    Contacted,
    Closed,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Assigned => "assigned",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Closed => "closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_source_round_trips_through_serde() {
        let src: LeadSource = serde_json::from_str(r#""contact_form""#).unwrap();
        assert_eq!(src, LeadSource::ContactForm);
        assert_eq!(src.as_str(), "contact_form");
    }

    #[test]
    fn test_lead_status_default_is_new() {
        assert_eq!(LeadStatus::default().as_str(), "new");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(serde_json::from_str::<LeadStatus>(r#""archived""#).is_err());
    }
}
