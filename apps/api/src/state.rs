use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Brochure artifacts live here (MinIO locally, S3 in production).
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
}
