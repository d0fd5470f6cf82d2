// Page rendering
//
// Handlebars templates are embedded in the binary. A templates directory can
// override any of them by file name (e.g. `result.hbs`). Every interpolated
// value goes through Handlebars' HTML escaping.

use handlebars::Handlebars;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::errors::{RenderError, ValidationError};
use crate::forms::{Feature, FieldKind, FieldSpec, FormPage, Route};
use crate::providers::GeneratedContent;

const HEADER: &str = "header";
const FOOTER: &str = "footer";
const HOME: &str = "home";
const FORM: &str = "form";
const RESULT: &str = "result";
const ERROR: &str = "error";

const PARTIALS: [&str; 2] = [HEADER, FOOTER];
const PAGES: [&str; 4] = [HOME, FORM, RESULT, ERROR];

fn embedded(name: &str) -> Option<&'static str> {
    match name {
        HEADER => Some(include_str!("../../templates/header.hbs")),
        FOOTER => Some(include_str!("../../templates/footer.hbs")),
        HOME => Some(include_str!("../../templates/home.hbs")),
        FORM => Some(include_str!("../../templates/form.hbs")),
        RESULT => Some(include_str!("../../templates/result.hbs")),
        ERROR => Some(include_str!("../../templates/error.hbs")),
        _ => None,
    }
}

/// Renders every HTML page the assistant serves
pub struct PageRenderer {
    hbs: Handlebars<'static>,
}

impl PageRenderer {
    /// Renderer using only the embedded templates
    pub fn new() -> Result<Self, RenderError> {
        Self::with_overrides(None)
    }

    /// Renderer that prefers `{dir}/{name}.hbs` over the embedded template
    pub fn with_overrides(dir: Option<&Path>) -> Result<Self, RenderError> {
        let mut hbs = Handlebars::new();

        for name in PARTIALS {
            let source = load_template(dir, name)?;
            hbs.register_partial(name, source)
                .map_err(|e| RenderError::Template {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        }

        for name in PAGES {
            let source = load_template(dir, name)?;
            hbs.register_template_string(name, source)
                .map_err(|e| RenderError::Template {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self { hbs })
    }

    pub fn home(&self) -> Result<String, RenderError> {
        let page = FormPage::for_route(Route::Home);
        self.render(
            HOME,
            json!({
                "title": page.title,
                "intro": page.intro,
            }),
        )
    }

    /// Render a feature form, optionally with a validation error and the
    /// values the user already entered
    pub fn form(
        &self,
        feature: Feature,
        values: &HashMap<String, String>,
        error: Option<&ValidationError>,
    ) -> Result<String, RenderError> {
        let page = FormPage::for_feature(feature);
        let error_field = error.map(|e| e.field());

        let fields: Vec<Value> = page
            .fields
            .iter()
            .map(|field| field_context(field, values.get(field.name), error_field == Some(field.name)))
            .collect();

        self.render(
            FORM,
            json!({
                "title": page.title,
                "intro": page.intro,
                "action": feature.path(),
                "fields": fields,
                "error": error.map(|e| json!({
                    "field": e.field(),
                    "message": e.to_string(),
                })),
            }),
        )
    }

    /// Render generated content verbatim
    pub fn result(&self, content: &GeneratedContent) -> Result<String, RenderError> {
        self.render(
            RESULT,
            json!({
                "title": content.feature.title(),
                "content": content.text,
                "back": content.feature.path(),
            }),
        )
    }

    pub fn error(
        &self,
        title: &str,
        message: &str,
        back: Option<Feature>,
    ) -> Result<String, RenderError> {
        self.render(
            ERROR,
            json!({
                "title": title,
                "message": message,
                "back": back.map(|f| f.path()),
            }),
        )
    }

    pub fn not_found(&self, path: &str) -> Result<String, RenderError> {
        self.error(
            "Page not found",
            &format!("There is nothing at {}.", path),
            None,
        )
    }

    fn render(&self, name: &str, mut data: Value) -> Result<String, RenderError> {
        if let Value::Object(map) = &mut data {
            map.insert("features".to_string(), nav_features());
        }
        Ok(self.hbs.render(name, &data)?)
    }
}

fn load_template(dir: Option<&Path>, name: &str) -> Result<String, RenderError> {
    if let Some(dir) = dir {
        let path = dir.join(format!("{}.hbs", name));
        if path.exists() {
            debug!("Loading template override: {}", path.display());
            return std::fs::read_to_string(&path).map_err(|source| RenderError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    }

    embedded(name)
        .map(str::to_string)
        .ok_or_else(|| RenderError::Template {
            name: name.to_string(),
            message: "no embedded template".to_string(),
        })
}

fn nav_features() -> Value {
    Value::Array(
        Feature::ALL
            .iter()
            .map(|f| json!({ "slug": f.slug(), "title": f.title() }))
            .collect(),
    )
}

fn field_context(field: &FieldSpec, value: Option<&String>, has_error: bool) -> Value {
    let value = value.map(|v| v.as_str()).unwrap_or("");
    let options: Vec<Value> = field
        .options
        .iter()
        .map(|opt| json!({ "value": opt, "selected": *opt == value }))
        .collect();

    json!({
        "name": field.name,
        "label": field.label,
        "required": field.required,
        "placeholder": field.placeholder,
        "value": value,
        "has_error": has_error,
        "is_textarea": field.kind == FieldKind::TextArea,
        "is_select": field.kind == FieldKind::Select,
        "is_input": matches!(field.kind, FieldKind::Text | FieldKind::Number),
        "input_type": if field.kind == FieldKind::Number { "number" } else { "text" },
        "options": options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> PageRenderer {
        PageRenderer::new().unwrap()
    }

    #[test]
    fn test_home_links_every_feature() {
        let html = renderer().home().unwrap();
        for feature in Feature::ALL {
            assert!(html.contains(&format!("href=\"/{}\"", feature.slug())));
        }
    }

    #[test]
    fn test_form_lists_fields() {
        let html = renderer()
            .form(Feature::Meals, &HashMap::new(), None)
            .unwrap();
        for name in ["dietary_restrictions", "age", "meal_count", "family_preferences", "budget"] {
            assert!(html.contains(&format!("name=\"{}\"", name)), "missing {}", name);
        }
        assert!(html.contains("action=\"/meals\""));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn test_form_keeps_values_and_shows_error() {
        let mut values = HashMap::new();
        values.insert("child_age".to_string(), "5".to_string());
        let error = ValidationError::Missing { field: "goals" };

        let html = renderer()
            .form(Feature::Planner, &values, Some(&error))
            .unwrap();

        assert!(html.contains("Missing required field: goals"));
        assert!(html.contains("data-field=\"goals\""));
        assert!(html.contains("value=\"5\""));
    }

    #[test]
    fn test_select_marks_choice() {
        let mut values = HashMap::new();
        values.insert("user_type".to_string(), "child".to_string());
        let html = renderer()
            .form(Feature::Emotions, &values, None)
            .unwrap();
        assert!(html.contains("<option value=\"child\" selected>"));
    }

    #[test]
    fn test_result_escapes_html() {
        let content = GeneratedContent::new(Feature::Planner, "<script>alert(1)</script>");
        let html = renderer().result(&content).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_not_found_mentions_path() {
        let html = renderer().not_found("/bedtime").unwrap();
        assert!(html.contains("Page not found"));
        assert!(html.contains("/bedtime"));
    }

    #[test]
    fn test_override_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("result.hbs"), "CUSTOM {{content}}").unwrap();

        let renderer = PageRenderer::with_overrides(Some(dir.path())).unwrap();
        let html = renderer
            .result(&GeneratedContent::new(Feature::Meals, "Soup"))
            .unwrap();
        assert_eq!(html, "CUSTOM Soup");

        // Pages without an override still use the embedded template
        assert!(renderer.home().unwrap().contains("<nav>"));
    }

    #[test]
    fn test_broken_override_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("home.hbs"), "{{#if}}").unwrap();

        let err = PageRenderer::with_overrides(Some(dir.path())).err().unwrap();
        assert!(matches!(err, RenderError::Template { .. }));
    }
}
