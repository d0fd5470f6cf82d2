// Validated form submissions
//
// A FormSubmission only exists once every required field is present and
// every typed field parses. Fields are checked in page order so the first
// problem on the page is the one reported.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::Feature;
use crate::errors::ValidationError;

const MAX_CHILD_AGE: u32 = 18;
const MAX_MEAL_COUNT: u32 = 21;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerRequest {
    pub child_age: u32,
    pub goals: String,
    /// Submitted as the `preferences` form field
    pub schedule_preferences: Option<String>,
    pub special_needs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealRequest {
    pub dietary_restrictions: String,
    pub age: u32,
    pub meal_count: u32,
    pub family_preferences: Option<String>,
    pub budget: Option<f64>,
}

/// Who the emotion check-in is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Parent,
    Child,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Parent => f.write_str("parent"),
            UserType::Child => f.write_str("child"),
        }
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "parent" => Ok(UserType::Parent),
            "child" => Ok(UserType::Child),
            _ => Err("must be 'parent' or 'child'".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionRequest {
    pub user_type: UserType,
    pub mood: String,
    pub note: Option<String>,
}

/// Validated user input for one feature area
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormSubmission {
    Planner(PlannerRequest),
    Meals(MealRequest),
    Emotions(EmotionRequest),
}

impl FormSubmission {
    /// Validate raw form fields and build the submission for `feature`
    pub fn from_form(
        feature: Feature,
        form: &HashMap<String, String>,
    ) -> Result<Self, ValidationError> {
        let fields = FormFields(form);
        match feature {
            Feature::Planner => Ok(FormSubmission::Planner(PlannerRequest {
                child_age: fields.bounded_u32("child_age", 0, MAX_CHILD_AGE)?,
                goals: fields.required("goals")?,
                schedule_preferences: fields.optional("preferences"),
                special_needs: fields.optional("special_needs"),
            })),
            Feature::Meals => Ok(FormSubmission::Meals(MealRequest {
                dietary_restrictions: fields.required("dietary_restrictions")?,
                age: fields.bounded_u32("age", 0, MAX_CHILD_AGE)?,
                meal_count: fields.bounded_u32("meal_count", 1, MAX_MEAL_COUNT)?,
                family_preferences: fields.optional("family_preferences"),
                budget: fields.optional_budget("budget")?,
            })),
            Feature::Emotions => Ok(FormSubmission::Emotions(EmotionRequest {
                user_type: fields.optional_parsed::<UserType>("user_type")?.unwrap_or_default(),
                mood: fields.required("mood")?,
                note: fields.optional("note"),
            })),
        }
    }

    pub fn feature(&self) -> Feature {
        match self {
            FormSubmission::Planner(_) => Feature::Planner,
            FormSubmission::Meals(_) => Feature::Meals,
            FormSubmission::Emotions(_) => Feature::Emotions,
        }
    }
}

/// Borrowed view over raw form input with trimming and typed accessors
struct FormFields<'a>(&'a HashMap<String, String>);

impl FormFields<'_> {
    fn value(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, field: &'static str) -> Result<String, ValidationError> {
        self.value(field)
            .map(str::to_string)
            .ok_or(ValidationError::Missing { field })
    }

    fn optional(&self, field: &str) -> Option<String> {
        self.value(field).map(str::to_string)
    }

    fn bounded_u32(&self, field: &'static str, min: u32, max: u32) -> Result<u32, ValidationError> {
        let raw = self.value(field).ok_or(ValidationError::Missing { field })?;
        let value: u32 = raw.parse().map_err(|_| ValidationError::Invalid {
            field,
            reason: "must be a whole number".to_string(),
        })?;
        if value < min || value > max {
            return Err(ValidationError::Invalid {
                field,
                reason: format!("must be between {} and {}", min, max),
            });
        }
        Ok(value)
    }

    fn optional_budget(&self, field: &'static str) -> Result<Option<f64>, ValidationError> {
        let Some(raw) = self.value(field) else {
            return Ok(None);
        };
        let amount: f64 = raw
            .trim_start_matches('$')
            .parse()
            .map_err(|_| ValidationError::Invalid {
                field,
                reason: "must be a number".to_string(),
            })?;
        if !amount.is_finite() {
            return Err(ValidationError::Invalid {
                field,
                reason: "must be a number".to_string(),
            });
        }
        if amount < 0.0 {
            return Err(ValidationError::Invalid {
                field,
                reason: "must not be negative".to_string(),
            });
        }
        Ok(Some(amount))
    }

    fn optional_parsed<T>(&self, field: &'static str) -> Result<Option<T>, ValidationError>
    where
        T: FromStr<Err = String>,
    {
        self.value(field)
            .map(|raw| raw.parse().map_err(|reason| ValidationError::Invalid { field, reason }))
            .transpose()
    }
}
