//! Declarative scoring tables.
//!
//! Every constant the sub-scorers return lives here, grouped per questionnaire
//! category, so each rule can be checked on its own without building answers
//! or breed records.

/// Score for any answer outside its closed set
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Maps a 1-5 breed rating to a fit score
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingRule {
    /// `>= 4` scores `high`, exactly `3` scores `mid`, anything lower scores `low`
    PrefersHigh { high: f64, mid: f64, low: f64 },
    /// `<= 2` scores `low`, exactly `3` scores `mid`, anything higher scores `high`
    PrefersLow { low: f64, mid: f64, high: f64 },
    /// `>= threshold` scores `met`, otherwise `missed`
    AtLeast { threshold: u8, met: f64, missed: f64 },
    /// `<= threshold` scores `met`, otherwise `missed`
    AtMost { threshold: u8, met: f64, missed: f64 },
    /// Inside `[min, max]` scores `inside`; one step outside scores `edge`;
    /// anything further scores `outside`
    Within { min: u8, max: u8, inside: f64, edge: f64, outside: f64 },
    /// Rating is irrelevant for this answer
    Constant(f64),
}

impl RatingRule {
    #[inline]
    pub fn apply(&self, rating: u8) -> f64 {
        match *self {
            RatingRule::PrefersHigh { high, mid, low } => {
                if rating >= 4 {
                    high
                } else if rating == 3 {
                    mid
                } else {
                    low
                }
            }
            RatingRule::PrefersLow { low, mid, high } => {
                if rating <= 2 {
                    low
                } else if rating == 3 {
                    mid
                } else {
                    high
                }
            }
            RatingRule::AtLeast { threshold, met, missed } => {
                if rating >= threshold {
                    met
                } else {
                    missed
                }
            }
            RatingRule::AtMost { threshold, met, missed } => {
                if rating <= threshold {
                    met
                } else {
                    missed
                }
            }
            RatingRule::Within { min, max, inside, edge, outside } => {
                if (min..=max).contains(&rating) {
                    inside
                } else if rating.saturating_add(1) == min || rating == max.saturating_add(1) {
                    edge
                } else {
                    outside
                }
            }
            RatingRule::Constant(score) => score,
        }
    }
}

/// Living situation, scored on `apartment_friendly`, `size` and `energy_level`
pub struct LivingRules {
    pub apartment: RatingRule,
    /// House with a medium or large breed
    pub house_roomy: f64,
    pub house_compact: f64,
    /// Farm with a large, energetic (`>= 4`) breed
    pub farm_working: f64,
    /// Farm with any breed of energy `>= 3`
    pub farm_active: f64,
    pub farm_calm: f64,
    pub farm_working_energy: u8,
    pub farm_active_energy: u8,
}

pub const LIVING: LivingRules = LivingRules {
    apartment: RatingRule::PrefersHigh { high: 1.0, mid: 0.7, low: 0.3 },
    house_roomy: 1.0,
    house_compact: 0.8,
    farm_working: 1.0,
    farm_active: 0.8,
    farm_calm: 0.6,
    farm_working_energy: 4,
    farm_active_energy: 3,
};

/// Activity level, scored on `energy_level`
pub struct ActivityRules {
    pub low: RatingRule,
    pub moderate: RatingRule,
    pub high: RatingRule,
}

pub const ACTIVITY: ActivityRules = ActivityRules {
    low: RatingRule::PrefersLow { low: 1.0, mid: 0.6, high: 0.2 },
    moderate: RatingRule::Within { min: 2, max: 4, inside: 1.0, edge: 0.6, outside: 0.3 },
    high: RatingRule::PrefersHigh { high: 1.0, mid: 0.6, low: 0.2 },
};

/// Owner experience, scored on `training_ease`
pub struct ExperienceRules {
    pub beginner: RatingRule,
    pub some: RatingRule,
    pub expert: RatingRule,
}

pub const EXPERIENCE: ExperienceRules = ExperienceRules {
    beginner: RatingRule::PrefersHigh { high: 1.0, mid: 0.6, low: 0.3 },
    some: RatingRule::AtLeast { threshold: 3, met: 1.0, missed: 0.7 },
    expert: RatingRule::AtMost { threshold: 2, met: 1.0, missed: 0.9 },
};

/// Children in the household, scored on `good_with_kids`
pub struct KidsRules {
    pub none: RatingRule,
    pub young: RatingRule,
    pub older: RatingRule,
    pub both: RatingRule,
}

pub const KIDS: KidsRules = KidsRules {
    none: RatingRule::Constant(1.0),
    young: RatingRule::PrefersHigh { high: 1.0, mid: 0.5, low: 0.2 },
    older: RatingRule::AtLeast { threshold: 3, met: 1.0, missed: 0.6 },
    both: RatingRule::PrefersHigh { high: 1.0, mid: 0.6, low: 0.3 },
};

/// Other pets, scored on `good_with_pets`
pub struct PetsRules {
    pub none: RatingRule,
    /// Shared by dogs, cats and mixed households
    pub any: RatingRule,
}

pub const PETS: PetsRules = PetsRules {
    none: RatingRule::Constant(1.0),
    any: RatingRule::PrefersHigh { high: 1.0, mid: 0.7, low: 0.3 },
};

/// Grooming tolerance, scored on `grooming_needs`
pub struct GroomingRules {
    pub minimal: RatingRule,
    pub moderate: RatingRule,
    pub high: RatingRule,
}

pub const GROOMING: GroomingRules = GroomingRules {
    minimal: RatingRule::PrefersLow { low: 1.0, mid: 0.6, high: 0.2 },
    moderate: RatingRule::Within { min: 2, max: 4, inside: 1.0, edge: 0.6, outside: 0.6 },
    high: RatingRule::AtLeast { threshold: 4, met: 1.0, missed: 0.8 },
};
