//! Repository for meal database operations

use chrono::NaiveDate;
use sqlx::PgPool;

use super::DbError;
use super::models::{ListMealsQuery, MealRow, PaginatedMeals};
use crate::model::{MealRecord, NewMeal};

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Repository for meal record operations
#[derive(Clone)]
pub struct MealRepository {
    pool: PgPool,
}

impl MealRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a meal and return the stored record with its assigned ID
    pub async fn insert(&self, meal: &NewMeal) -> Result<MealRecord, DbError> {
        let row: MealRow = sqlx::query_as(
            r#"
            INSERT INTO meals (date, food_name, calories, protein, carbs, sugar)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(meal.date)
        .bind(&meal.food_name)
        .bind(meal.calories)
        .bind(meal.protein)
        .bind(meal.carbs)
        .bind(meal.sugar)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = row.id, food = %row.food_name, "Inserted meal");

        Ok(row.into())
    }

    /// Get a meal by ID
    pub async fn get_by_id(&self, id: i64) -> Result<MealRecord, DbError> {
        let row: MealRow = sqlx::query_as(
            r#"
            SELECT * FROM meals WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        Ok(row.into())
    }

    /// Get all meals logged for a date
    pub async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<MealRecord>, DbError> {
        let rows: Vec<MealRow> = sqlx::query_as(
            r#"
            SELECT * FROM meals WHERE date = $1 ORDER BY created_at
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MealRecord::from).collect())
    }

    /// Get all meals logged between two dates (inclusive)
    pub async fn get_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MealRecord>, DbError> {
        let rows: Vec<MealRow> = sqlx::query_as(
            r#"
            SELECT * FROM meals WHERE date BETWEEN $1 AND $2 ORDER BY date, created_at
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MealRecord::from).collect())
    }

    /// List meals with pagination and an optional date filter
    pub async fn list(&self, query: ListMealsQuery) -> Result<PaginatedMeals, DbError> {
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).min(100);
        let offset = (page - 1) * page_size;

        let where_clause = if query.date.is_some() {
            "WHERE date = $1"
        } else {
            ""
        };

        // Get total count
        let count_query = format!("SELECT COUNT(*) as count FROM meals {}", where_clause);

        let total_count: i64 = {
            let mut q = sqlx::query_scalar(&count_query);
            if let Some(date) = query.date {
                q = q.bind(date);
            }
            q.fetch_one(&self.pool).await?
        };

        // Get meals
        let select_query = format!(
            r#"
            SELECT * FROM meals
            {}
            ORDER BY created_at DESC
            LIMIT {} OFFSET {}
            "#,
            where_clause, page_size, offset
        );

        let rows: Vec<MealRow> = {
            let mut q = sqlx::query_as(&select_query);
            if let Some(date) = query.date {
                q = q.bind(date);
            }
            q.fetch_all(&self.pool).await?
        };

        let meals: Vec<MealRecord> = rows.into_iter().map(MealRecord::from).collect();

        let total_pages = ((total_count as f64) / (page_size as f64)).ceil() as u32;

        Ok(PaginatedMeals {
            meals,
            page,
            page_size,
            total_count,
            total_pages,
        })
    }
}
