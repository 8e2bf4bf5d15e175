//! Meal history read service

use crate::db::DbError;
use crate::db::models::{ListMealsQuery, PaginatedMeals};
use crate::db::repository::MealRepository;
use crate::model::MealRecord;

#[derive(Debug, thiserror::Error)]
pub enum MealServiceError {
    #[error("Database error: {0}")]
    DbError(#[from] DbError),
}

/// Service for reading logged meals
pub struct MealService {
    repository: MealRepository,
}

impl MealService {
    pub fn new(repository: MealRepository) -> Self {
        Self { repository }
    }

    /// Get a meal by ID
    pub async fn get_by_id(&self, id: i64) -> Result<MealRecord, MealServiceError> {
        self.repository
            .get_by_id(id)
            .await
            .map_err(MealServiceError::from)
    }

    /// List meals with pagination and an optional date filter
    pub async fn list(&self, query: ListMealsQuery) -> Result<PaginatedMeals, MealServiceError> {
        self.repository.list(query).await.map_err(MealServiceError::from)
    }
}
