// Static page descriptions for the form presenter

use serde::Serialize;

use super::{Feature, Route};

/// Input widget used to render a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    TextArea,
    Select,
}

/// One form field as shown on a page
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    /// Form key submitted by the browser
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
    /// Allowed values for `FieldKind::Select`
    pub options: &'static [&'static str],
}

impl FieldSpec {
    const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
            placeholder: "",
            options: &[],
        }
    }

    const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            placeholder: "",
            options: &[],
        }
    }

    const fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    const fn with_options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }
}

const PLANNER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("child_age", "Child's age", FieldKind::Number).with_placeholder("5"),
    FieldSpec::required("goals", "Family goals", FieldKind::TextArea)
        .with_placeholder("e.g. a calmer sleep routine"),
    FieldSpec::optional("preferences", "Schedule preferences", FieldKind::TextArea)
        .with_placeholder("School 8:30-3:00, swimming on Tuesdays"),
    FieldSpec::optional("special_needs", "Special needs", FieldKind::Text),
];

const MEAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("dietary_restrictions", "Dietary restrictions", FieldKind::Text)
        .with_placeholder("none, vegetarian, nut-free..."),
    FieldSpec::required("age", "Child's age", FieldKind::Number).with_placeholder("7"),
    FieldSpec::required("meal_count", "Number of meals", FieldKind::Number).with_placeholder("5"),
    FieldSpec::optional("family_preferences", "Family preferences", FieldKind::TextArea)
        .with_placeholder("Loves pasta, dislikes mushrooms"),
    FieldSpec::optional("budget", "Weekly budget", FieldKind::Number).with_placeholder("80"),
];

const EMOTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("user_type", "Who is checking in?", FieldKind::Select)
        .with_options(&["parent", "child"]),
    FieldSpec::required("mood", "How are you feeling?", FieldKind::Text)
        .with_placeholder("tired, anxious, proud..."),
    FieldSpec::optional("note", "Anything else?", FieldKind::TextArea),
];

/// Page description returned by the form presenter
#[derive(Debug, Clone, Serialize)]
pub struct FormPage {
    pub title: &'static str,
    pub intro: &'static str,
    /// Ordered fields; empty for the home page
    pub fields: &'static [FieldSpec],
}

impl FormPage {
    /// Look up the page for a route
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::Home => Self {
                title: "AI Parenting Assistant",
                intro: "Plan the day, sort out meals, or take a moment to check in on feelings.",
                fields: &[],
            },
            Route::Feature(feature) => Self::for_feature(feature),
        }
    }

    pub fn for_feature(feature: Feature) -> Self {
        match feature {
            Feature::Planner => Self {
                title: feature.title(),
                intro: "Tell us about your child and what you'd like to work on. We'll suggest a daily routine.",
                fields: PLANNER_FIELDS,
            },
            Feature::Meals => Self {
                title: feature.title(),
                intro: "Share dietary needs and how many meals you need. We'll put together a plan and a grocery list.",
                fields: MEAL_FIELDS,
            },
            Feature::Emotions => Self {
                title: feature.title(),
                intro: "Name the feeling. You'll get a few kind words, one small idea to try, and an affirmation.",
                fields: EMOTION_FIELDS,
            },
        }
    }
}
