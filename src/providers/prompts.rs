// Prompt construction for the chat-completions generator

use crate::forms::{EmotionRequest, FormSubmission, MealRequest, PlannerRequest};

const PLANNER_SYSTEM: &str = "You are a warm, practical family-routine coach. \
Given a child's age, the family's goals and any schedule constraints, suggest a simple \
daily routine as a short list of time-stamped steps, followed by two or three brief tips. \
Keep it realistic for a busy household and age-appropriate. Plain text only, no markdown headings.";

const MEALS_SYSTEM: &str = "You are a family nutrition helper. \
Plan the requested number of kid-friendly meals that respect every dietary restriction. \
For each meal give a name and a one-line description with approximate calories, \
then finish with a combined grocery list. Plain text only, no markdown headings.";

const EMOTIONS_SYSTEM: &str = "You are a compassionate caregiver assistant. Based on the user's mood, \
produce a short supportive response (1-2 sentences), one practical suggestion (1 line), and an affirmation (1 sentence). \
Return ONLY valid JSON with keys: message, suggestion, affirmation.";

/// System prompt for the submission's feature
pub fn system_prompt(submission: &FormSubmission) -> &'static str {
    match submission {
        FormSubmission::Planner(_) => PLANNER_SYSTEM,
        FormSubmission::Meals(_) => MEALS_SYSTEM,
        FormSubmission::Emotions(_) => EMOTIONS_SYSTEM,
    }
}

/// User prompt describing the submitted fields
pub fn user_prompt(submission: &FormSubmission) -> String {
    match submission {
        FormSubmission::Planner(req) => planner_prompt(req),
        FormSubmission::Meals(req) => meals_prompt(req),
        FormSubmission::Emotions(req) => emotions_prompt(req),
    }
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("none given")
}

fn planner_prompt(req: &PlannerRequest) -> String {
    format!(
        "Child age: {}\nFamily goals: {}\nSchedule preferences: {}\nSpecial needs: {}",
        req.child_age,
        req.goals,
        or_none(&req.schedule_preferences),
        or_none(&req.special_needs),
    )
}

fn meals_prompt(req: &MealRequest) -> String {
    let budget = req
        .budget
        .map(|b| format!("{:.2}", b))
        .unwrap_or_else(|| "none given".to_string());
    format!(
        "Child age: {}\nNumber of meals: {}\nDietary restrictions: {}\nFamily preferences: {}\nBudget: {}",
        req.age,
        req.meal_count,
        req.dietary_restrictions,
        or_none(&req.family_preferences),
        budget,
    )
}

fn emotions_prompt(req: &EmotionRequest) -> String {
    format!(
        "User type: {}\nMood: {}\nNotes: {}",
        req.user_type,
        req.mood,
        req.note.as_deref().unwrap_or("—"),
    )
}
