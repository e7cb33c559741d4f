use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::models::answers::QuestionnaireAnswers;

/// Rating used for any 1-5 trait the record does not carry
pub const NEUTRAL_RATING: u8 = 3;

/// Columns an admin may write through the breed store. Anything else in an
/// update payload (including `id`) is dropped before it reaches the store.
pub const EDITABLE_BREED_COLUMNS: &[&str] = &[
    "name", "size", "group", "origin", "breed_type", "coat_type",
    "weight_min", "weight_max", "height_min", "height_max", "lifespan_min", "lifespan_max",
    "monthly_cost_aud", "popularity_rank",
    "energy_level", "good_with_kids", "good_with_pets", "training_ease", "grooming_needs",
    "shedding_level", "barking_level", "apartment_friendly", "drooling_tendency",
    "separation_anxiety_risk", "climate_suitability", "noise_sensitivity",
    "description", "temperament", "exercise_needs", "grooming", "training", "lifespan",
    "shedding_description", "data_source", "image_url", "last_updated",
];

/// Dog breed attribute record as served by the breed store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreedRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group: String,
    /// Legacy column name some admin tooling writes instead of `group`
    #[serde(default, skip_serializing)]
    pub breed_group: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin: String,

    // Ratings consumed by the matcher
    #[serde(default, deserialize_with = "lenient_rating")]
    pub energy_level: Option<u8>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub good_with_kids: Option<u8>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub good_with_pets: Option<u8>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub training_ease: Option<u8>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub grooming_needs: Option<u8>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub apartment_friendly: Option<u8>,

    // Display-only ratings
    #[serde(default, deserialize_with = "lenient_rating")]
    pub barking_level: Option<u8>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub shedding_level: Option<u8>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub drooling_tendency: Option<u8>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub separation_anxiety_risk: Option<u8>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub climate_suitability: Option<u8>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub noise_sensitivity: Option<u8>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub temperament: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exercise_needs: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grooming: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub training: String,

    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub lifespan: Option<String>,
    #[serde(default)]
    pub coat_type: Option<String>,
    #[serde(default)]
    pub breed_type: Option<String>,
    #[serde(default)]
    pub shedding_description: Option<String>,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub weight_min: Option<f64>,
    #[serde(default)]
    pub weight_max: Option<f64>,
    #[serde(default)]
    pub height_min: Option<f64>,
    #[serde(default)]
    pub height_max: Option<f64>,
    #[serde(default)]
    pub lifespan_min: Option<f64>,
    #[serde(default)]
    pub lifespan_max: Option<f64>,
    #[serde(default)]
    pub monthly_cost_aud: Option<f64>,
    #[serde(default)]
    pub popularity_rank: Option<u32>,
    #[serde(default)]
    pub last_updated: Option<Value>,
}

/// Zero and null both mean "not rated"; either resolves to the midpoint.
#[inline]
fn rating_or_neutral(value: Option<u8>) -> u8 {
    match value {
        Some(rating) if rating > 0 => rating,
        _ => NEUTRAL_RATING,
    }
}

impl BreedRecord {
    pub fn energy_level(&self) -> u8 {
        rating_or_neutral(self.energy_level)
    }

    pub fn good_with_kids(&self) -> u8 {
        rating_or_neutral(self.good_with_kids)
    }

    pub fn good_with_pets(&self) -> u8 {
        rating_or_neutral(self.good_with_pets)
    }

    pub fn training_ease(&self) -> u8 {
        rating_or_neutral(self.training_ease)
    }

    pub fn grooming_needs(&self) -> u8 {
        rating_or_neutral(self.grooming_needs)
    }

    pub fn apartment_friendly(&self) -> u8 {
        rating_or_neutral(self.apartment_friendly)
    }

    /// Resolve the legacy `breed_group` column into `group`.
    ///
    /// Applied once at the store boundary so nothing downstream needs to
    /// know both spellings exist.
    pub fn normalized(mut self) -> Self {
        if let Some(legacy) = self.breed_group.take() {
            if self.group.is_empty() {
                self.group = legacy;
            }
        }
        self
    }

    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }
}

/// Strip a raw breed payload down to the editable columns.
///
/// Empty strings and non-finite numbers are written as `null` so the store
/// clears the column instead of storing junk.
pub fn sanitize_breed_payload(payload: Map<String, Value>) -> Map<String, Value> {
    payload
        .into_iter()
        .filter(|(key, _)| EDITABLE_BREED_COLUMNS.contains(&key.as_str()))
        .map(|(key, value)| {
            let cleaned = match &value {
                Value::String(s) if s.is_empty() => Value::Null,
                Value::Number(n) if n.as_f64().is_some_and(|f| !f.is_finite()) => Value::Null,
                _ => value,
            };
            (key, cleaned)
        })
        .collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 1-5 rating that tolerates bad store data
///
/// Fractions, out-of-range numbers, and non-numeric values read as "not
/// rated" so the row still deserializes and the neutral rating applies.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let rating = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    Ok(rating
        .filter(|r| (1..=5).contains(r))
        .and_then(|r| u8::try_from(r).ok()))
}

/// Breed ids are integers in some tables and uuids in others
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "breed id must be a string or number, got {}",
            other
        ))),
    }
}

/// Per-category fit scores for one breed, each in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub living: f64,
    pub activity: f64,
    pub experience: f64,
    pub family: f64,
    pub preferences: f64,
}

impl CategoryScores {
    pub fn as_array(&self) -> [f64; 5] {
        [self.living, self.activity, self.experience, self.family, self.preferences]
    }
}

/// Weights used to fold category scores into one percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights {
    pub living: f64,
    pub activity: f64,
    pub experience: f64,
    pub family: f64,
    pub preferences: f64,
}

impl CategoryWeights {
    pub fn total(&self) -> f64 {
        self.living + self.activity + self.experience + self.family + self.preferences
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            living: 0.20,
            activity: 0.25,
            experience: 0.15,
            family: 0.25,
            preferences: 0.15,
        }
    }
}

/// Coarse tier shown next to a match percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLabel {
    #[serde(rename = "Excellent Match")]
    Excellent,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Fair Match")]
    Fair,
    #[serde(rename = "Low Match")]
    Low,
}

impl MatchLabel {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            90.. => MatchLabel::Excellent,
            75..=89 => MatchLabel::Good,
            60..=74 => MatchLabel::Fair,
            _ => MatchLabel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchLabel::Excellent => "Excellent Match",
            MatchLabel::Good => "Good Match",
            MatchLabel::Fair => "Fair Match",
            MatchLabel::Low => "Low Match",
        }
    }
}

/// A breed annotated with how well it fits one questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedMatch {
    #[serde(flatten)]
    pub breed: BreedRecord,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: u8,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
    #[serde(rename = "matchLabel")]
    pub match_label: MatchLabel,
}

/// Query-by-filter parameters for the breed store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedFilter {
    /// Case-insensitive substring of the breed name
    pub search: Option<String>,
    pub size: Option<String>,
    pub group: Option<String>,
    pub missing_images: bool,
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

impl BreedFilter {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    pub fn matches(&self, breed: &BreedRecord) -> bool {
        if let Some(search) = &self.search {
            if !breed.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        if let Some(size) = &self.size {
            if &breed.size != size {
                return false;
            }
        }
        if let Some(group) = &self.group {
            if &breed.group != group {
                return false;
            }
        }
        if self.missing_images && breed.has_image() {
            return false;
        }
        true
    }
}

impl Default for BreedFilter {
    fn default() -> Self {
        Self {
            search: None,
            size: None,
            group: None,
            missing_images: false,
            page: 1,
            limit: 20,
        }
    }
}

/// One page of a filtered breed listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedPage {
    pub breeds: Vec<BreedRecord>,
    pub total: u64,
}

/// Quiz submission about to be persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuizResult {
    pub user_id: Option<String>,
    pub session_id: String,
    pub answers: QuestionnaireAnswers,
    pub matches: Value,
    pub is_guest: bool,
}

/// Stored quiz submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: uuid::Uuid,
    pub user_id: Option<String>,
    pub session_id: String,
    pub answers: QuestionnaireAnswers,
    pub matches: Value,
    pub is_guest: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_ratings_resolve_to_neutral() {
        let breed = BreedRecord::default();
        assert_eq!(breed.energy_level(), NEUTRAL_RATING);
        assert_eq!(breed.good_with_kids(), NEUTRAL_RATING);
        assert_eq!(breed.apartment_friendly(), NEUTRAL_RATING);
    }

    #[test]
    fn test_zero_rating_treated_as_missing() {
        let breed = BreedRecord {
            training_ease: Some(0),
            ..Default::default()
        };
        assert_eq!(breed.training_ease(), NEUTRAL_RATING);
    }

    #[test]
    fn test_deserialize_store_row_with_nulls() {
        let row = json!({
            "id": 42,
            "name": "Beagle",
            "size": "Medium",
            "group": null,
            "breed_group": "Hound",
            "energy_level": 4,
            "good_with_kids": null,
            "temperament": null,
            "image_url": ""
        });

        let breed: BreedRecord = serde_json::from_value(row).unwrap();
        let breed = breed.normalized();

        assert_eq!(breed.id, "42");
        assert_eq!(breed.group, "Hound");
        assert_eq!(breed.energy_level(), 4);
        assert_eq!(breed.good_with_kids(), NEUTRAL_RATING);
        assert_eq!(breed.temperament, "");
        assert!(!breed.has_image());
    }

    #[test]
    fn test_malformed_ratings_fall_back_to_neutral() {
        let row = json!({
            "id": 7,
            "name": "Mudi",
            "energy_level": 3.5,
            "good_with_kids": 300,
            "training_ease": -1,
            "good_with_pets": "friendly",
            "grooming_needs": "2",
            "apartment_friendly": 5
        });

        let breed: BreedRecord = serde_json::from_value(row).unwrap();

        assert_eq!(breed.energy_level(), NEUTRAL_RATING);
        assert_eq!(breed.good_with_kids(), NEUTRAL_RATING);
        assert_eq!(breed.training_ease(), NEUTRAL_RATING);
        assert_eq!(breed.good_with_pets(), NEUTRAL_RATING);
        assert_eq!(breed.grooming_needs(), 2);
        assert_eq!(breed.apartment_friendly(), 5);
    }

    #[test]
    fn test_normalized_keeps_existing_group() {
        let breed = BreedRecord {
            group: "Working".to_string(),
            breed_group: Some("Herding".to_string()),
            ..Default::default()
        };
        assert_eq!(breed.normalized().group, "Working");
    }

    #[test]
    fn test_match_label_tiers() {
        assert_eq!(MatchLabel::from_percentage(100), MatchLabel::Excellent);
        assert_eq!(MatchLabel::from_percentage(90), MatchLabel::Excellent);
        assert_eq!(MatchLabel::from_percentage(89), MatchLabel::Good);
        assert_eq!(MatchLabel::from_percentage(75), MatchLabel::Good);
        assert_eq!(MatchLabel::from_percentage(60), MatchLabel::Fair);
        assert_eq!(MatchLabel::from_percentage(59), MatchLabel::Low);
        assert_eq!(MatchLabel::from_percentage(0), MatchLabel::Low);
    }

    #[test]
    fn test_sanitize_breed_payload() {
        let payload = json!({
            "id": 7,
            "name": "Poodle",
            "origin": "",
            "energy_level": 4,
            "is_admin": true
        });
        let Value::Object(map) = payload else { unreachable!() };

        let cleaned = sanitize_breed_payload(map);

        assert!(!cleaned.contains_key("id"));
        assert!(!cleaned.contains_key("is_admin"));
        assert_eq!(cleaned["name"], "Poodle");
        assert_eq!(cleaned["origin"], Value::Null);
        assert_eq!(cleaned["energy_level"], 4);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = CategoryWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_filter_matches() {
        let breed = BreedRecord {
            name: "Golden Retriever".to_string(),
            size: "Large".to_string(),
            group: "Sporting".to_string(),
            ..Default::default()
        };

        let filter = BreedFilter {
            search: Some("retriever".to_string()),
            size: Some("Large".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&breed));

        let filter = BreedFilter {
            group: Some("Toy".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&breed));

        let filter = BreedFilter {
            missing_images: true,
            ..Default::default()
        };
        assert!(filter.matches(&breed));
    }

    #[test]
    fn test_filter_offset() {
        let filter = BreedFilter {
            page: 3,
            limit: 20,
            ..Default::default()
        };
        assert_eq!(filter.offset(), 40);
    }
}
