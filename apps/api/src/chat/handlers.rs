use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::catalog::projects;
use crate::chat::context::{clamp_transcript, render_listing_context};
use crate::chat::intent::{detect_contact, detect_intent, sanitize_for_prompt, ChatIntent};
use crate::chat::prompts::{
    build_system_prompt, BROCHURE_INSTRUCTION, GOLDEN_VISA_CONTEXT, LEAD_CAPTURED_INSTRUCTION,
    LISTINGS_CONTEXT_TEMPLATE, PROJECT_PAGE_CONTEXT_TEMPLATE,
};
use crate::errors::AppError;
use crate::leads::{self, NewLead};
use crate::llm_client::ChatTurn;
use crate::models::lead::LeadSource;
use crate::state::AppState;

/// Listings injected per search turn.
const SEARCH_CONTEXT_LIMIT: i64 = 5;

#[derive(Deserialize)]
pub struct ChatRequest {
    /// Full transcript, oldest first; the last entry must be the visitor's.
    pub messages: Vec<ChatTurn>,
    /// Slug of the project page the widget is embedded on, if any.
    pub project_slug: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
    /// Set when this turn's message carried contact details.
    pub lead_id: Option<Uuid>,
    /// Slugs of the listings injected as context, for the UI to render cards.
    pub matched_projects: Vec<String>,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let last = req
        .messages
        .last()
        .filter(|m| m.role == "user")
        .ok_or_else(|| {
            AppError::Validation("Transcript must end with a user message".to_string())
        })?;
    if req
        .messages
        .iter()
        .any(|m| m.role != "user" && m.role != "assistant")
    {
        return Err(AppError::Validation(
            "Message roles must be 'user' or 'assistant'".to_string(),
        ));
    }

    let message = sanitize_for_prompt(&last.content);
    let area_names = projects::list_area_names(&state.db).await?;
    let intent = detect_intent(&message, &area_names);

    let mut context_blocks: Vec<String> = Vec::new();
    let mut matched_projects: Vec<String> = Vec::new();

    match &intent {
        ChatIntent::PropertySearch(filters) => {
            let filter = filters.to_project_filter(SEARCH_CONTEXT_LIMIT);
            let rows = projects::list_projects(&state.db, &filter).await?;
            info!(matches = rows.len(), "chat search intent");
            matched_projects = rows.iter().map(|p| p.slug.clone()).collect();
            context_blocks.push(
                LISTINGS_CONTEXT_TEMPLATE.replace("{listings}", &render_listing_context(&rows)),
            );
            if filters.golden_visa {
                context_blocks.push(GOLDEN_VISA_CONTEXT.to_string());
            }
        }
        ChatIntent::GoldenVisa => context_blocks.push(GOLDEN_VISA_CONTEXT.to_string()),
        ChatIntent::Brochure => context_blocks.push(
            BROCHURE_INSTRUCTION
                .replace("{slug}", req.project_slug.as_deref().unwrap_or("<slug>")),
        ),
        ChatIntent::General => {}
    }

    // Chatting from a project page: always give the model that page's facts.
    if let Some(slug) = &req.project_slug {
        if let Some(project) = projects::get_project_by_slug(&state.db, slug).await? {
            context_blocks.push(
                PROJECT_PAGE_CONTEXT_TEMPLATE
                    .replace("{project}", &render_listing_context(&[project])),
            );
        }
    }

    let mut lead_id = None;
    if let Some(contact) = detect_contact(&message) {
        let id = leads::insert_lead(
            &state.db,
            &NewLead {
                name: None,
                phone: contact.phone.as_deref(),
                email: contact.email.as_deref(),
                message: Some(&message),
                source: LeadSource::Chat,
                project_slug: req.project_slug.as_deref(),
            },
        )
        .await?;
        lead_id = Some(id);
        context_blocks.push(LEAD_CAPTURED_INSTRUCTION.to_string());
    }

    let system = build_system_prompt(&context_blocks);
    let turns = clamp_transcript(&req.messages);
    let response = state
        .llm
        .chat(turns, &system)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;
    let reply = response
        .text()
        .ok_or_else(|| AppError::Llm("empty completion".to_string()))?
        .to_string();

    Ok(Json(ChatResponse {
        reply,
        lead_id,
        matched_projects,
    }))
}
