pub mod config;
pub mod label;
pub mod meal;
pub mod nutrition;

pub use config::{Config, KeywordConfig, LookupConfig};
pub use label::LabelCandidate;
pub use meal::{MealRecord, NewMeal, UNKNOWN_NUTRIENT};
pub use nutrition::{NumericField, NutritionFacts};
