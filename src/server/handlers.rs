// HTTP request handlers

use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, MethodRouter},
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::AssistantServer;
use crate::errors::{GenerationError, ValidationError};
use crate::forms::{Feature, FormSubmission};
use crate::providers::GeneratedContent;

/// Create the main application router
pub fn create_router(server: Arc<AssistantServer>) -> Router {
    let mut router = Router::new()
        .route("/", get(home))
        .route("/health", get(health_check));

    for feature in Feature::ALL {
        router = router.route(&feature.path(), feature_routes(feature));
    }

    router.fallback(not_found).with_state(server)
}

/// GET shows the form, POST handles a submission
fn feature_routes(feature: Feature) -> MethodRouter<Arc<AssistantServer>> {
    get(move |State(server): State<Arc<AssistantServer>>| show_form(server, feature)).post(
        move |State(server): State<Arc<AssistantServer>>,
              headers: HeaderMap,
              form: Result<Form<HashMap<String, String>>, FormRejection>| {
            submit_form(server, feature, headers, form_fields(feature, form))
        },
    )
}

/// Unreadable bodies (missing or non-urlencoded) validate as an empty form
fn form_fields(
    feature: Feature,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> HashMap<String, String> {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(feature = %feature, reason = %rejection.body_text(), "Unreadable form body");
            HashMap::new()
        }
    }
}

/// Handle GET / - Home page
async fn home(State(server): State<Arc<AssistantServer>>) -> Result<Html<String>, AppError> {
    Ok(Html(server.renderer().home()?))
}

async fn show_form(server: Arc<AssistantServer>, feature: Feature) -> Result<Html<String>, AppError> {
    Ok(Html(server.renderer().form(feature, &HashMap::new(), None)?))
}

/// Handle POST /{feature} - validate, generate, render
async fn submit_form(
    server: Arc<AssistantServer>,
    feature: Feature,
    headers: HeaderMap,
    form: HashMap<String, String>,
) -> Result<Response, AppError> {
    let json = wants_json(&headers);

    let submission = match FormSubmission::from_form(feature, &form) {
        Ok(submission) => submission,
        Err(err) => {
            info!(feature = %feature, field = err.field(), "Rejected submission: {}", err);
            return validation_response(&server, feature, &form, &err, json);
        }
    };

    match server.generator().generate(&submission).await {
        Ok(content) => {
            info!(
                feature = %feature,
                generator = server.generator().name(),
                chars = content.text.len(),
                "Generated content"
            );
            success_response(&server, &submission, &content, json)
        }
        Err(err) => {
            error!(feature = %feature, generator = server.generator().name(), error = %err, "Content generation failed");
            generation_failure_response(&server, feature, &err, json)
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub generator: String,
}

/// Handle GET /health - Health check endpoint
pub async fn health_check(State(server): State<Arc<AssistantServer>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        generator: server.generator().name().to_string(),
    })
}

/// Fallback for every unknown path and method
async fn not_found(
    State(server): State<Arc<AssistantServer>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    warn!(path = %uri.path(), "Route not found");

    if wants_json(&headers) {
        return Ok(json_error(
            StatusCode::NOT_FOUND,
            format!("No route for {}", uri.path()),
            "not_found",
            None,
        ));
    }

    let html = server.renderer().not_found(uri.path())?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

/// Successful JSON body for a submission
#[derive(Debug, Serialize)]
struct SubmissionResponse<'a> {
    feature: Feature,
    submission: &'a FormSubmission,
    content: &'a str,
}

fn success_response(
    server: &AssistantServer,
    submission: &FormSubmission,
    content: &GeneratedContent,
    json: bool,
) -> Result<Response, AppError> {
    if json {
        let body = SubmissionResponse {
            feature: content.feature,
            submission,
            content: &content.text,
        };
        return Ok(Json(body).into_response());
    }

    Ok(Html(server.renderer().result(content)?).into_response())
}

fn validation_response(
    server: &AssistantServer,
    feature: Feature,
    form: &HashMap<String, String>,
    err: &ValidationError,
    json: bool,
) -> Result<Response, AppError> {
    if json {
        return Ok(json_error(
            StatusCode::BAD_REQUEST,
            err.to_string(),
            "validation_error",
            Some(err.field()),
        ));
    }

    let html = server.renderer().form(feature, form, Some(err))?;
    Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
}

fn generation_failure_response(
    server: &AssistantServer,
    feature: Feature,
    err: &GenerationError,
    json: bool,
) -> Result<Response, AppError> {
    let (status, message) = match err {
        GenerationError::NotConfigured(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Suggestions are unavailable because the assistant is not configured.",
        ),
        GenerationError::Timeout { .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            "Generating suggestions took too long. Please try again in a moment.",
        ),
        _ => (
            StatusCode::BAD_GATEWAY,
            "We couldn't generate suggestions right now. Please try again in a moment.",
        ),
    };

    if json {
        return Ok(json_error(status, message.to_string(), "generation_error", None));
    }

    let html = server
        .renderer()
        .error("Generation failed", message, Some(feature))?;
    Ok((status, Html(html)).into_response())
}

/// True when the client asked for JSON rather than a page
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("application/json") && !accept.contains("text/html"))
        .unwrap_or(false)
}

fn json_error(
    status: StatusCode,
    message: String,
    error_type: &str,
    field: Option<&str>,
) -> Response {
    let mut detail = serde_json::json!({
        "message": message,
        "type": error_type,
    });
    if let Some(field) = field {
        detail["field"] = serde_json::Value::String(field.to_string());
    }
    (status, Json(serde_json::json!({ "error": detail }))).into_response()
}

/// Application error wrapper for internal failures (e.g. template rendering)
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error. Please try again later.",
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_wants_json() {
        let mut headers = HeaderMap::new();
        assert!(!wants_json(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(wants_json(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/json;q=0.9"),
        );
        assert!(!wants_json(&headers));
    }
}
