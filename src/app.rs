//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! so the resolver's collaborators (lookup client, repository) are explicit
//! dependencies rather than ambient singletons.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use crate::db::repository::MealRepository;
use crate::model::Config;
use crate::service::{MealService, NinjasClient, ReportService, ResolverService};

const ENV_NUTRITION_API_KEY: &str = "NUTRITION_API_KEY";

/// Application state containing all services and shared resources
pub struct AppState {
    /// Database connection pool
    pub db_pool: Arc<PgPool>,
    /// Label-to-nutrition resolution service
    pub resolver_service: Arc<ResolverService>,
    /// Meal history read service
    pub meal_service: Arc<MealService>,
    /// Daily/weekly report service
    pub report_service: Arc<ReportService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Database connection and schema initialization
    /// 2. Nutrition lookup client construction (requires `NUTRITION_API_KEY`)
    /// 3. Service dependency graph construction
    pub async fn new(config: Config) -> Result<Self, AppError> {
        // Initialize PostgreSQL database
        let db_pool = crate::db::create_pool()
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        // Initialize database schema
        crate::db::init_schema(&db_pool)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        // Create nutrition lookup client (required)
        let api_key = std::env::var(ENV_NUTRITION_API_KEY)
            .map_err(|_| AppError::MissingConfig(ENV_NUTRITION_API_KEY))?;

        let lookup = NinjasClient::new(&api_key, Duration::from_secs(config.lookup.timeout_secs))
            .map_err(|_| AppError::InvalidConfig("Could not build nutrition lookup client"))?;

        // Build service dependency graph
        let repository = MealRepository::new(db_pool.clone());

        let resolver_service = Arc::new(ResolverService::new(
            Arc::new(lookup),
            repository.clone(),
            config.keywords,
        ));
        let meal_service = Arc::new(MealService::new(repository.clone()));
        let report_service = Arc::new(ReportService::new(repository));

        Ok(Self {
            db_pool: Arc::new(db_pool),
            resolver_service,
            meal_service,
            report_service,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
