//! Nutrition provider response model

use serde::{Deserialize, Deserializer};

/// A nutrient value as reported by the lookup provider
///
/// Free-tier fields arrive as JSON numbers; premium fields are masked with a
/// placeholder string, and some fields can be missing entirely. A masked or
/// missing field is `Absent`, which is distinct from a confirmed zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum NumericField {
    Present(f64),
    #[default]
    Absent,
}

impl NumericField {
    /// The numeric value, or `None` when the provider did not supply one
    pub fn value(self) -> Option<f64> {
        match self {
            NumericField::Present(v) => Some(v),
            NumericField::Absent => None,
        }
    }
}

impl<'de> Deserialize<'de> for NumericField {
    /// Numbers and numeric strings are present; anything else is absent.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        Ok(match value {
            serde_json::Value::Number(n) => {
                n.as_f64().map_or(NumericField::Absent, NumericField::Present)
            }
            serde_json::Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_or(NumericField::Absent, NumericField::Present),
            _ => NumericField::Absent,
        })
    }
}

// Response model - only the fields we need
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NutritionFacts {
    #[serde(default)]
    pub calories: NumericField,
    #[serde(default)]
    pub protein_g: NumericField,
    #[serde(default)]
    pub carbohydrates_total_g: NumericField,
    #[serde(default)]
    pub sugar_g: NumericField,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> NutritionFacts {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numbers_are_present() {
        let facts = parse(json!({
            "calories": 52,
            "protein_g": 0.3,
            "carbohydrates_total_g": 14,
            "sugar_g": 10.4
        }));
        assert_eq!(facts.calories, NumericField::Present(52.0));
        assert_eq!(facts.protein_g, NumericField::Present(0.3));
        assert_eq!(facts.sugar_g, NumericField::Present(10.4));
    }

    #[test]
    fn test_numeric_string_is_present() {
        let facts = parse(json!({ "calories": "52" }));
        assert_eq!(facts.calories, NumericField::Present(52.0));
    }

    #[test]
    fn test_placeholder_string_is_absent() {
        let facts = parse(json!({
            "calories": "Only available for premium subscribers.",
            "protein_g": "Only available for premium subscribers."
        }));
        assert_eq!(facts.calories, NumericField::Absent);
        assert_eq!(facts.protein_g, NumericField::Absent);
    }

    #[test]
    fn test_missing_and_null_are_absent() {
        let facts = parse(json!({ "calories": null }));
        assert_eq!(facts.calories, NumericField::Absent);
        assert_eq!(facts.carbohydrates_total_g, NumericField::Absent);
    }
}
