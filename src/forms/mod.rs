// Form model
// Feature areas, page descriptions and validated submissions

mod pages;
mod submission;

pub use pages::{FieldKind, FieldSpec, FormPage};
pub use submission::{EmotionRequest, FormSubmission, MealRequest, PlannerRequest, UserType};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the three feature areas served by the assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Planner,
    Meals,
    Emotions,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::Planner, Feature::Meals, Feature::Emotions];

    /// URL path segment and JSON key for this feature
    pub fn slug(&self) -> &'static str {
        match self {
            Feature::Planner => "planner",
            Feature::Meals => "meals",
            Feature::Emotions => "emotions",
        }
    }

    /// Human-readable title shown in navigation and page headings
    pub fn title(&self) -> &'static str {
        match self {
            Feature::Planner => "Daily Planner",
            Feature::Meals => "Meal Plan",
            Feature::Emotions => "Emotion Check-in",
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.slug())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planner" => Ok(Feature::Planner),
            "meals" | "meal" => Ok(Feature::Meals),
            "emotions" | "emotion" => Ok(Feature::Emotions),
            other => Err(format!(
                "unknown feature '{}' (expected planner, meals or emotions)",
                other
            )),
        }
    }
}

/// Page identifier served by the form presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Feature(Feature),
}
