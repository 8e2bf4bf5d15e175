//! Candidate-to-nutrition resolution
//!
//! Turns the labeler's ranked candidates into exactly one persisted meal record
//! or a terminal failure. Candidates are tried strictly one at a time: a failed
//! or empty lookup advances the cursor, and the first non-empty result wins even
//! when some of its fields are masked.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::db::DbError;
use crate::db::repository::MealRepository;
use crate::model::{KeywordConfig, LabelCandidate, MealRecord, NewMeal, NutritionFacts};
use crate::service::candidate_selector::rank_candidates;
use crate::service::nutrition::NutritionLookup;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The labeler produced no usable food candidates
    #[error("No usable food candidates")]
    NoCandidates,

    /// Every candidate was tried; none yielded a nutrition match
    #[error("All {0} candidates exhausted without a nutrition match")]
    Exhausted(usize),

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

/// Service resolving label candidates into persisted meal records
pub struct ResolverService {
    lookup: Arc<dyn NutritionLookup>,
    repository: MealRepository,
    keywords: KeywordConfig,
}

impl ResolverService {
    pub fn new(
        lookup: Arc<dyn NutritionLookup>,
        repository: MealRepository,
        keywords: KeywordConfig,
    ) -> Self {
        Self {
            lookup,
            repository,
            keywords,
        }
    }

    /// Resolve labeler output into a persisted meal record for `date`
    ///
    /// Exactly one record is written on success; nothing is written on failure.
    pub async fn resolve(
        &self,
        labels: &[LabelCandidate],
        date: NaiveDate,
    ) -> Result<MealRecord, ResolveError> {
        let candidates = rank_candidates(labels, &self.keywords);

        tracing::debug!(candidates = ?candidates, "Resolving nutrition for ranked candidates");

        let (food_name, facts) = lookup_first_match(self.lookup.as_ref(), &candidates).await?;

        let meal = NewMeal::from_facts(date, food_name, &facts);
        let record = self.repository.insert(&meal).await?;

        tracing::info!(
            id = record.id,
            food = %record.food_name,
            date = %record.date,
            "Meal resolved and persisted"
        );

        Ok(record)
    }
}

/// Try each candidate in rank order until one lookup returns a non-empty result
///
/// A transport error, non-success status, or malformed body on one candidate is
/// not fatal: the cursor advances and the next candidate is tried. Exhausting
/// the whole list is the only terminal failure.
async fn lookup_first_match(
    lookup: &dyn NutritionLookup,
    candidates: &[String],
) -> Result<(String, NutritionFacts), ResolveError> {
    if candidates.is_empty() {
        return Err(ResolveError::NoCandidates);
    }

    for (index, name) in candidates.iter().enumerate() {
        tracing::debug!(index, total = candidates.len(), food = %name, "Trying nutrition candidate");

        match lookup.query(name).await {
            Ok(results) => {
                if let Some(facts) = results.into_iter().next() {
                    return Ok((name.clone(), facts));
                }
                tracing::debug!(food = %name, "Provider has no match, advancing to next candidate");
            }
            Err(e) => {
                tracing::warn!(food = %name, error = %e, "Nutrition lookup failed, advancing to next candidate");
            }
        }
    }

    Err(ResolveError::Exhausted(candidates.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNKNOWN_NUTRIENT;
    use crate::service::nutrition::NutritionApiError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    enum Scripted {
        Error,
        Empty,
        Found(NutritionFacts),
    }

    /// Lookup double that replays a per-name script and records queries
    struct ScriptedLookup {
        script: HashMap<String, Scripted>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedLookup {
        fn new(script: Vec<(&str, Scripted)>) -> Self {
            Self {
                script: script
                    .into_iter()
                    .map(|(name, s)| (name.to_string(), s))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NutritionLookup for ScriptedLookup {
        async fn query(&self, food_name: &str) -> Result<Vec<NutritionFacts>, NutritionApiError> {
            self.calls.lock().unwrap().push(food_name.to_string());
            match self.script.get(food_name) {
                Some(Scripted::Error) => Err(NutritionApiError::ParseError("boom".to_string())),
                Some(Scripted::Found(facts)) => Ok(vec![facts.clone()]),
                Some(Scripted::Empty) | None => Ok(vec![]),
            }
        }
    }

    fn facts(value: serde_json::Value) -> NutritionFacts {
        serde_json::from_value(value).unwrap()
    }

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_error_then_match_issues_exactly_two_lookups() {
        let lookup = ScriptedLookup::new(vec![
            ("pizza", Scripted::Error),
            (
                "plate",
                Scripted::Found(facts(json!({
                    "calories": 200, "protein_g": 8,
                    "carbohydrates_total_g": 25, "sugar_g": 3
                }))),
            ),
        ]);

        let (name, found) = lookup_first_match(&lookup, &names(&["pizza", "plate"]))
            .await
            .unwrap();

        assert_eq!(name, "plate");
        assert_eq!(found.calories.value(), Some(200.0));
        assert_eq!(lookup.calls(), vec!["pizza", "plate"]);
    }

    #[tokio::test]
    async fn test_stops_after_first_non_empty_result() {
        let lookup = ScriptedLookup::new(vec![
            ("ramen", Scripted::Found(facts(json!({ "calories": 450 })))),
            ("noodle", Scripted::Found(facts(json!({ "calories": 300 })))),
        ]);

        let (name, _) = lookup_first_match(&lookup, &names(&["ramen", "noodle"]))
            .await
            .unwrap();

        assert_eq!(name, "ramen");
        assert_eq!(lookup.calls(), vec!["ramen"]);
    }

    #[tokio::test]
    async fn test_all_candidates_exhausted_is_failure() {
        let lookup = ScriptedLookup::new(vec![
            ("cup", Scripted::Empty),
            ("mug", Scripted::Error),
            ("bowl", Scripted::Empty),
        ]);

        let err = lookup_first_match(&lookup, &names(&["cup", "mug", "bowl"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Exhausted(3)));
        assert_eq!(lookup.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_no_candidates_short_circuits_without_lookups() {
        let lookup = ScriptedLookup::new(vec![]);

        let err = lookup_first_match(&lookup, &[]).await.unwrap_err();

        assert!(matches!(err, ResolveError::NoCandidates));
        assert!(lookup.calls().is_empty());
    }

    #[tokio::test]
    async fn test_masked_fields_survive_resolution_as_sentinels() {
        let lookup = ScriptedLookup::new(vec![(
            "apple",
            Scripted::Found(facts(json!({
                "calories": 52,
                "protein_g": "Only available for premium subscribers.",
                "carbohydrates_total_g": 14,
                "sugar_g": 10
            }))),
        )]);

        let (name, found) = lookup_first_match(&lookup, &names(&["apple"])).await.unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        let meal = NewMeal::from_facts(date, name, &found);

        assert_eq!(meal.food_name, "apple");
        assert_eq!(meal.calories, 52.0);
        assert_eq!(meal.protein, UNKNOWN_NUTRIENT);
        assert_eq!(meal.carbs, 14.0);
        assert_eq!(meal.sugar, 10.0);
    }
}
