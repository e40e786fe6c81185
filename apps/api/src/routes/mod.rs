pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::brochure;
use crate::catalog;
use crate::chat;
use crate::leads;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/projects", get(catalog::handlers::handle_list_projects))
        .route(
            "/api/v1/projects/:slug",
            get(catalog::handlers::handle_get_project),
        )
        .route(
            "/api/v1/properties",
            get(catalog::handlers::handle_list_properties),
        )
        .route(
            "/api/v1/properties/:slug",
            get(catalog::handlers::handle_get_property),
        )
        .route("/api/v1/areas", get(catalog::handlers::handle_list_areas))
        .route("/api/v1/areas/:slug", get(catalog::handlers::handle_get_area))
        .route(
            "/api/v1/developers",
            get(catalog::handlers::handle_list_developers),
        )
        .route(
            "/api/v1/developers/:slug",
            get(catalog::handlers::handle_get_developer),
        )
        .route("/api/v1/blog", get(catalog::handlers::handle_list_blog))
        .route(
            "/api/v1/blog/:slug",
            get(catalog::handlers::handle_get_blog_post),
        )
        // AI chat assistant
        .route("/api/v1/chat", post(chat::handlers::handle_chat))
        // Brochures
        .route(
            "/api/v1/projects/:slug/brochure",
            get(brochure::handlers::handle_get_brochure),
        )
        .route(
            "/api/v1/projects/:slug/brochure-request",
            post(brochure::handlers::handle_brochure_request),
        )
        // Leads
        .route(
            "/api/v1/leads",
            post(leads::handlers::handle_create_lead).get(leads::handlers::handle_list_leads),
        )
        .route("/api/v1/leads/:id", get(leads::handlers::handle_get_lead))
        .route(
            "/api/v1/leads/:id/assign",
            patch(leads::handlers::handle_assign_lead),
        )
        .route(
            "/api/v1/leads/:id/status",
            patch(leads::handlers::handle_update_lead_status),
        )
        .with_state(state)
}
