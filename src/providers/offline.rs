// Offline generator
//
// Deterministic canned suggestions used when no API key is configured, so
// every page still works without network access.

use async_trait::async_trait;

use super::{ContentGenerator, EmotionSupport, GeneratedContent};
use crate::errors::GenerationError;
use crate::forms::{FormSubmission, MealRequest, PlannerRequest};

const ROUTINES: &[&str] = &[
    "7:30 AM  Wake up, get dressed, breakfast together",
    "5:00 PM  Homework or quiet play",
    "7:00 PM  Family dinner",
    "8:00 PM  Bath, story and lights out",
];

const TIPS: &[&str] = &[
    "Encourage a regular sleep schedule, even on weekends.",
    "Discuss daily highlights at dinner.",
];

const MEALS: &[(&str, &str)] = &[
    ("Veggie Pasta", "350 kcal"),
    ("Grilled Chicken Salad", "400 kcal"),
    ("Bean and Cheese Quesadillas", "420 kcal"),
    ("Salmon with Rice and Peas", "450 kcal"),
    ("Vegetable Stir-fry with Noodles", "380 kcal"),
    ("Turkey Meatballs with Couscous", "430 kcal"),
    ("Lentil Soup with Crusty Bread", "360 kcal"),
];

const GROCERIES: &[&str] = &["Pasta", "Chicken breast", "Lettuce", "Tomato", "Olive oil"];

/// Generator that never leaves the process
#[derive(Debug, Clone, Default)]
pub struct OfflineGenerator;

impl OfflineGenerator {
    pub fn new() -> Self {
        Self
    }

    fn planner(req: &PlannerRequest) -> String {
        let mut text = format!("Suggested routine for a {}-year-old (goal: {})\n\n", req.child_age, req.goals);
        for step in ROUTINES {
            text.push_str(&format!("• {}\n", step));
        }
        text.push_str("\nTips\n");
        for tip in TIPS {
            text.push_str(&format!("• {}\n", tip));
        }
        text.trim_end().to_string()
    }

    fn meals(req: &MealRequest) -> String {
        let mut text = format!(
            "{} meal ideas (restrictions: {})\n\n",
            req.meal_count, req.dietary_restrictions
        );
        for (name, nutrition) in MEALS.iter().cycle().take(req.meal_count as usize) {
            text.push_str(&format!("• {} ({})\n", name, nutrition));
        }
        text.push_str("\nGrocery list\n");
        for item in GROCERIES {
            text.push_str(&format!("• {}\n", item));
        }
        if let Some(budget) = req.budget {
            text.push_str(&format!("\nBudget: ${:.2}\n", budget));
        }
        text.trim_end().to_string()
    }
}

#[async_trait]
impl ContentGenerator for OfflineGenerator {
    async fn generate(&self, submission: &FormSubmission) -> Result<GeneratedContent, GenerationError> {
        let text = match submission {
            FormSubmission::Planner(req) => Self::planner(req),
            FormSubmission::Meals(req) => Self::meals(req),
            FormSubmission::Emotions(_) => EmotionSupport::fallback().to_text(),
        };
        Ok(GeneratedContent::new(submission.feature(), text))
    }

    fn name(&self) -> &str {
        "offline"
    }
}
