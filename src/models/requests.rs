use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::answers::QuestionnaireAnswers;
use crate::models::domain::BreedFilter;

/// Questionnaire submission for the recommendations endpoint
///
/// Answers arrive as plain strings so presence can be validated before they
/// are parsed into the closed answer sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub living_situation: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub activity_level: String,
    #[serde(default)]
    pub climate: String,
    #[serde(default)]
    pub other_pets: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub has_kids: String,
    #[serde(default)]
    pub grooming_tolerance: String,
    #[serde(default)]
    pub limit: Option<u16>,
}

impl RecommendationRequest {
    pub fn answers(&self) -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            living_situation: self.living_situation.as_str().into(),
            activity_level: self.activity_level.as_str().into(),
            climate: self.climate.as_str().into(),
            other_pets: self.other_pets.as_str().into(),
            experience_level: self.experience_level.as_str().into(),
            has_kids: self.has_kids.as_str().into(),
            grooming_tolerance: self.grooming_tolerance.as_str().into(),
        }
    }
}

/// Request to persist a finished quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuizResultRequest {
    pub answers: QuestionnaireAnswers,
    #[serde(default)]
    pub matches: serde_json::Value,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Query string for the admin breed listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminBreedQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub size: Option<String>,
    pub group: Option<String>,
    pub filter: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl AdminBreedQuery {
    pub fn to_filter(&self, max_limit: u32) -> BreedFilter {
        BreedFilter {
            search: non_empty(&self.search),
            size: non_empty(&self.size),
            group: non_empty(&self.group),
            missing_images: self.filter.as_deref() == Some("missing-images"),
            page: self.page.unwrap_or(1).max(1),
            limit: self.limit.unwrap_or(20).clamp(1, max_limit.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answers::{ExperienceLevel, LivingSituation};

    #[test]
    fn test_missing_required_field_fails_validation() {
        let req = RecommendationRequest {
            living_situation: "apartment".to_string(),
            activity_level: "low".to_string(),
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("experience_level"));
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let req = RecommendationRequest {
            living_situation: "house".to_string(),
            activity_level: "high".to_string(),
            experience_level: "expert".to_string(),
            ..Default::default()
        };
        assert!(req.validate().is_ok());

        let answers = req.answers();
        assert_eq!(answers.living_situation, LivingSituation::House);
        assert_eq!(answers.experience_level, ExperienceLevel::Expert);
        assert!(answers.has_kids.is_unknown());
    }

    #[test]
    fn test_admin_query_to_filter() {
        let query = AdminBreedQuery {
            page: Some(0),
            limit: Some(500),
            search: Some("  ".to_string()),
            size: Some("Small".to_string()),
            filter: Some("missing-images".to_string()),
            ..Default::default()
        };

        let filter = query.to_filter(100);

        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 100);
        assert_eq!(filter.search, None);
        assert_eq!(filter.size.as_deref(), Some("Small"));
        assert!(filter.missing_images);
    }
}
