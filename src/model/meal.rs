//! Meal domain types and the unknown-nutrient sentinel contract

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::nutrition::NutritionFacts;

/// Marker stored in place of a nutrient the provider could not supply
///
/// Distinct from a confirmed zero: consumers render it as "information
/// unavailable" rather than "0".
pub const UNKNOWN_NUTRIENT: f64 = -1.0;

/// A persisted meal. Never mutated after insertion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MealRecord {
    pub id: i64,
    /// Calendar date the meal was logged for (day granularity)
    pub date: NaiveDate,
    pub food_name: String,
    /// kcal, or [`UNKNOWN_NUTRIENT`] when the provider masked the value
    pub calories: f64,
    /// Grams, or [`UNKNOWN_NUTRIENT`] when the provider masked the value
    pub protein: f64,
    /// Grams
    pub carbs: f64,
    /// Grams
    pub sugar: f64,
    pub created_at: DateTime<Utc>,
}

impl MealRecord {
    /// Calories if known, `None` for the sentinel
    pub fn known_calories(&self) -> Option<f64> {
        (self.calories >= 0.0).then_some(self.calories)
    }

    /// Protein grams if known, `None` for the sentinel
    pub fn known_protein(&self) -> Option<f64> {
        (self.protein >= 0.0).then_some(self.protein)
    }
}

/// Insert shape for a resolved meal
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub date: NaiveDate,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub sugar: f64,
}

impl NewMeal {
    /// Build an insertable meal from provider facts
    ///
    /// `calories`/`protein_g` fall back to the [`UNKNOWN_NUTRIENT`] sentinel when
    /// absent; `carbohydrates_total_g`/`sugar_g` fall back to zero.
    pub fn from_facts(date: NaiveDate, food_name: String, facts: &NutritionFacts) -> Self {
        Self {
            date,
            food_name,
            calories: facts.calories.value().unwrap_or(UNKNOWN_NUTRIENT),
            protein: facts.protein_g.value().unwrap_or(UNKNOWN_NUTRIENT),
            carbs: facts.carbohydrates_total_g.value().unwrap_or(0.0),
            sugar: facts.sugar_g.value().unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    #[test]
    fn test_masked_premium_fields_become_sentinel() {
        let facts: NutritionFacts = serde_json::from_value(json!({
            "calories": 52,
            "protein_g": "Only available for premium subscribers.",
            "carbohydrates_total_g": 14,
            "sugar_g": 10
        }))
        .unwrap();

        let meal = NewMeal::from_facts(date(), "apple".to_string(), &facts);

        assert_eq!(meal.calories, 52.0);
        assert_eq!(meal.protein, UNKNOWN_NUTRIENT);
        assert_eq!(meal.carbs, 14.0);
        assert_eq!(meal.sugar, 10.0);
    }

    #[test]
    fn test_missing_carbs_and_sugar_default_to_zero() {
        let facts: NutritionFacts = serde_json::from_value(json!({})).unwrap();

        let meal = NewMeal::from_facts(date(), "mystery stew".to_string(), &facts);

        assert_eq!(meal.calories, UNKNOWN_NUTRIENT);
        assert_eq!(meal.protein, UNKNOWN_NUTRIENT);
        assert_eq!(meal.carbs, 0.0);
        assert_eq!(meal.sugar, 0.0);
    }

    #[test]
    fn test_known_accessors_hide_sentinel() {
        let record = MealRecord {
            id: 1,
            date: date(),
            food_name: "apple".to_string(),
            calories: 52.0,
            protein: UNKNOWN_NUTRIENT,
            carbs: 14.0,
            sugar: 10.0,
            created_at: Utc::now(),
        };

        assert_eq!(record.known_calories(), Some(52.0));
        assert_eq!(record.known_protein(), None);
    }
}
