//! Database models for logged meals

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::model::MealRecord;

/// Database representation of a logged meal
#[derive(Debug, Clone, FromRow)]
pub struct MealRow {
    pub id: i64,
    pub date: NaiveDate,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub sugar: f64,
    pub created_at: DateTime<Utc>,
}

impl From<MealRow> for MealRecord {
    fn from(row: MealRow) -> Self {
        MealRecord {
            id: row.id,
            date: row.date,
            food_name: row.food_name,
            calories: row.calories,
            protein: row.protein,
            carbs: row.carbs,
            sugar: row.sugar,
            created_at: row.created_at,
        }
    }
}

/// Query parameters for listing meals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMealsQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub date: Option<NaiveDate>,
}

/// Paginated response for meals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedMeals {
    pub meals: Vec<MealRecord>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}
