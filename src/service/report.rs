//! Daily and weekly nutrition reports
//!
//! Aggregates logged meals into per-day totals. A sentinel-valued nutrient is
//! not a confirmed zero, so it is excluded from the sums and surfaced as an
//! unknown count instead.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::DbError;
use crate::db::repository::MealRepository;
use crate::model::MealRecord;

/// Days covered by a weekly report.
pub const WEEK_DAYS: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Database error: {0}")]
    DbError(#[from] DbError),
}

/// Nutrition totals for one calendar date
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub meal_count: usize,
    /// Sum of known calorie values; meals with an unknown value are excluded
    pub total_calories: f64,
    /// Sum of known protein grams; meals with an unknown value are excluded
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_sugar: f64,
    /// Meals whose calorie value was unavailable from the provider
    pub unknown_calories: usize,
    /// Meals whose protein value was unavailable from the provider
    pub unknown_protein: usize,
}

/// Seven daily summaries ending at the requested date, oldest first
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeeklyReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DailySummary>,
    /// Mean of the seven daily calorie totals (zero-meal days included)
    pub average_calories: f64,
}

/// Service aggregating logged meals into reports
pub struct ReportService {
    repository: MealRepository,
}

impl ReportService {
    pub fn new(repository: MealRepository) -> Self {
        Self { repository }
    }

    /// Nutrition totals for a single date
    pub async fn daily(&self, date: NaiveDate) -> Result<DailySummary, ReportError> {
        let meals = self.repository.get_by_date(date).await?;
        Ok(summarize(date, &meals))
    }

    /// Daily summaries for the seven days ending at `end`, plus the average
    /// daily calorie total across the window
    pub async fn weekly(&self, end: NaiveDate) -> Result<WeeklyReport, ReportError> {
        let start = end - Days::new(WEEK_DAYS as u64 - 1);
        let meals = self.repository.get_in_range(start, end).await?;

        let days: Vec<DailySummary> = start
            .iter_days()
            .take(WEEK_DAYS)
            .map(|date| {
                let on_day: Vec<MealRecord> =
                    meals.iter().filter(|m| m.date == date).cloned().collect();
                summarize(date, &on_day)
            })
            .collect();

        let average_calories =
            days.iter().map(|d| d.total_calories).sum::<f64>() / days.len() as f64;

        Ok(WeeklyReport {
            start,
            end,
            days,
            average_calories,
        })
    }
}

/// Total a day's meals, keeping sentinel values out of the sums
fn summarize(date: NaiveDate, meals: &[MealRecord]) -> DailySummary {
    let mut summary = DailySummary {
        date,
        meal_count: meals.len(),
        total_calories: 0.0,
        total_protein: 0.0,
        total_carbs: 0.0,
        total_sugar: 0.0,
        unknown_calories: 0,
        unknown_protein: 0,
    };

    for meal in meals {
        match meal.known_calories() {
            Some(kcal) => summary.total_calories += kcal,
            None => summary.unknown_calories += 1,
        }
        match meal.known_protein() {
            Some(grams) => summary.total_protein += grams,
            None => summary.unknown_protein += 1,
        }
        summary.total_carbs += meal.carbs;
        summary.total_sugar += meal.sugar;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNKNOWN_NUTRIENT;
    use chrono::Utc;

    fn meal(date: NaiveDate, calories: f64, protein: f64) -> MealRecord {
        MealRecord {
            id: 0,
            date,
            food_name: "test".to_string(),
            calories,
            protein,
            carbs: 20.0,
            sugar: 5.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sentinel_values_excluded_from_totals() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        let meals = vec![
            meal(date, 300.0, 12.0),
            meal(date, UNKNOWN_NUTRIENT, UNKNOWN_NUTRIENT),
            meal(date, 450.0, UNKNOWN_NUTRIENT),
        ];

        let summary = summarize(date, &meals);

        assert_eq!(summary.meal_count, 3);
        assert_eq!(summary.total_calories, 750.0);
        assert_eq!(summary.total_protein, 12.0);
        assert_eq!(summary.unknown_calories, 1);
        assert_eq!(summary.unknown_protein, 2);
    }

    #[test]
    fn test_empty_day_is_all_zero() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        let summary = summarize(date, &[]);

        assert_eq!(summary.meal_count, 0);
        assert_eq!(summary.total_calories, 0.0);
        assert_eq!(summary.unknown_calories, 0);
    }
}
