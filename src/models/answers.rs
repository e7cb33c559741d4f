use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a closed questionnaire answer set.
///
/// Every answer type parses from its lowercase wire string and never fails:
/// anything outside the set lands in `Unknown` with the raw text preserved so
/// reason templates can still echo what the user sent.
macro_rules! answer_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unknown(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $text,)+
                    $name::Unknown(raw) => raw.as_str(),
                }
            }

            pub fn is_unknown(&self) -> bool {
                matches!(self, $name::Unknown(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::Unknown(String::new())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($text => $name::$variant,)+
                    _ => $name::Unknown(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unknown(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

answer_enum! {
    /// Type of home the dog will live in
    LivingSituation {
        Apartment => "apartment",
        House => "house",
        Farm => "farm",
    }
}

answer_enum! {
    /// How active the owner is
    ActivityLevel {
        Low => "low",
        Moderate => "moderate",
        High => "high",
    }
}

answer_enum! {
    /// Local climate. Collected with the questionnaire but not scored.
    Climate {
        Hot => "hot",
        Moderate => "moderate",
        Cold => "cold",
    }
}

answer_enum! {
    /// Other animals already in the household
    OtherPets {
        None => "none",
        Dogs => "dogs",
        Cats => "cats",
        Mixed => "mixed",
    }
}

answer_enum! {
    /// Owner's prior experience with dogs
    ExperienceLevel {
        Beginner => "beginner",
        Some => "some",
        Expert => "expert",
    }
}

answer_enum! {
    /// Children in the household
    HasKids {
        None => "none",
        Young => "young",
        Older => "older",
        Both => "both",
    }
}

answer_enum! {
    /// How much grooming work the owner will accept
    GroomingTolerance {
        Minimal => "minimal",
        Moderate => "moderate",
        High => "high",
    }
}

/// A complete questionnaire submission.
///
/// Missing keys deserialize to an empty `Unknown` answer; presence of the
/// required fields is checked at the HTTP boundary, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionnaireAnswers {
    pub living_situation: LivingSituation,
    pub activity_level: ActivityLevel,
    pub climate: Climate,
    pub other_pets: OtherPets,
    pub experience_level: ExperienceLevel,
    pub has_kids: HasKids,
    pub grooming_tolerance: GroomingTolerance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_parse() {
        assert_eq!(LivingSituation::from("apartment"), LivingSituation::Apartment);
        assert_eq!(OtherPets::from("mixed"), OtherPets::Mixed);
        assert_eq!(HasKids::from("both"), HasKids::Both);
        assert_eq!(ExperienceLevel::from("some"), ExperienceLevel::Some);
    }

    #[test]
    fn test_unknown_value_keeps_raw_text() {
        let level = ActivityLevel::from("extreme");
        assert!(level.is_unknown());
        assert_eq!(level.as_str(), "extreme");
        assert_eq!(String::from(level), "extreme");
    }

    #[test]
    fn test_parsing_is_case_sensitive() {
        assert!(LivingSituation::from("Apartment").is_unknown());
    }

    #[test]
    fn test_answers_deserialize_from_camel_case() {
        let json = serde_json::json!({
            "livingSituation": "house",
            "activityLevel": "high",
            "climate": "cold",
            "otherPets": "cats",
            "experienceLevel": "expert",
            "hasKids": "older",
            "groomingTolerance": "minimal"
        });

        let answers: QuestionnaireAnswers = serde_json::from_value(json).unwrap();

        assert_eq!(answers.living_situation, LivingSituation::House);
        assert_eq!(answers.activity_level, ActivityLevel::High);
        assert_eq!(answers.climate, Climate::Cold);
        assert_eq!(answers.other_pets, OtherPets::Cats);
        assert_eq!(answers.experience_level, ExperienceLevel::Expert);
        assert_eq!(answers.has_kids, HasKids::Older);
        assert_eq!(answers.grooming_tolerance, GroomingTolerance::Minimal);
    }

    #[test]
    fn test_missing_fields_become_empty_unknown() {
        let answers: QuestionnaireAnswers =
            serde_json::from_value(serde_json::json!({ "livingSituation": "farm" })).unwrap();

        assert_eq!(answers.living_situation, LivingSituation::Farm);
        assert_eq!(answers.has_kids, HasKids::Unknown(String::new()));
    }

    #[test]
    fn test_answers_serialize_back_to_wire_strings() {
        let answers = QuestionnaireAnswers {
            living_situation: LivingSituation::Apartment,
            grooming_tolerance: GroomingTolerance::Unknown("whatever".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["livingSituation"], "apartment");
        assert_eq!(json["groomingTolerance"], "whatever");
    }
}
