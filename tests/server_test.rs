// Integration tests for the HTTP front end

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use parenting_assistant::{
    config::ServerConfig,
    errors::GenerationError,
    forms::{FormPage, FormSubmission, Feature},
    providers::{ContentGenerator, GeneratedContent},
    render::PageRenderer,
    server::{create_router, AssistantServer},
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Fake generator that records calls and returns a fixed reply or error
struct FakeGenerator {
    reply: Result<String, fn() -> GenerationError>,
    calls: AtomicUsize,
    last_submission: Mutex<Option<FormSubmission>>,
}

impl FakeGenerator {
    fn with_reply(reply: Result<String, fn() -> GenerationError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_submission: Mutex::new(None),
        })
    }

    fn replying(text: &str) -> Arc<Self> {
        Self::with_reply(Ok(text.to_string()))
    }

    fn failing() -> Arc<Self> {
        Self::failing_with(|| GenerationError::Upstream {
            status: 500,
            body: "upstream exploded".to_string(),
        })
    }

    fn failing_with(error: fn() -> GenerationError) -> Arc<Self> {
        Self::with_reply(Err(error))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for FakeGenerator {
    async fn generate(&self, submission: &FormSubmission) -> Result<GeneratedContent, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_submission.lock().await = Some(submission.clone());

        match &self.reply {
            Ok(text) => Ok(GeneratedContent::new(submission.feature(), text.clone())),
            Err(error) => Err(error()),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

fn app(generator: Arc<FakeGenerator>) -> Router {
    let server = AssistantServer::new(
        ServerConfig::default(),
        generator,
        PageRenderer::new().expect("embedded templates should load"),
    );
    create_router(Arc::new(server))
}

fn post_form(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_home_page() {
    let response = app(FakeGenerator::replying("unused")).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("AI Parenting Assistant"));
    for feature in Feature::ALL {
        assert!(html.contains(&format!("href=\"/{}\"", feature.slug())));
    }
}

#[tokio::test]
async fn test_every_form_page_lists_its_fields() {
    for feature in Feature::ALL {
        let response = app(FakeGenerator::replying("unused"))
            .oneshot(get(&feature.path()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", feature.path());

        let html = body_text(response).await;
        for field in FormPage::for_feature(feature).fields {
            assert!(
                html.contains(&format!("name=\"{}\"", field.name)),
                "{} page missing field {}",
                feature,
                field.name
            );
        }
    }
}

#[tokio::test]
async fn test_planner_content_rendered_verbatim() {
    let reply = "7:00 Wake up and breakfast\n19:30 Bath, book, bed";
    let generator = FakeGenerator::replying(reply);

    let response = app(generator.clone())
        .oneshot(post_form("/planner", "child_age=5&goals=sleep+routine"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(reply));
    assert_eq!(generator.calls(), 1);

    let submission = generator.last_submission.lock().await.clone().unwrap();
    match submission {
        FormSubmission::Planner(req) => {
            assert_eq!(req.child_age, 5);
            assert_eq!(req.goals, "sleep routine");
        }
        other => panic!("unexpected submission: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_required_fields_are_named_and_skip_generation() {
    let cases = [
        (Feature::Planner, "goals=sleep", "child_age"),
        (Feature::Planner, "child_age=5", "goals"),
        (Feature::Planner, "child_age=5&goals=", "goals"),
        (Feature::Meals, "age=6&meal_count=3", "dietary_restrictions"),
        (Feature::Meals, "dietary_restrictions=none&meal_count=3", "age"),
        (Feature::Meals, "dietary_restrictions=none&age=6", "meal_count"),
        (Feature::Emotions, "note=long+day", "mood"),
    ];

    for (feature, body, field) in cases {
        let generator = FakeGenerator::replying("should not appear");
        let response = app(generator.clone())
            .oneshot(post_form(&feature.path(), body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", feature, body);
        let html = body_text(response).await;
        assert!(
            html.contains(&format!("Missing required field: {}", field)),
            "{} {} should name {}",
            feature,
            body,
            field
        );
        assert!(!html.contains("should not appear"));
        assert_eq!(generator.calls(), 0, "generator called for {} {}", feature, body);
    }
}

#[tokio::test]
async fn test_unreadable_body_validates_as_empty_form() {
    let bodyless = Request::builder()
        .method(Method::POST)
        .uri("/planner")
        .body(Body::empty())
        .unwrap();
    let multipart = Request::builder()
        .method(Method::POST)
        .uri("/planner")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
        .body(Body::from(
            "--XYZ\r\nContent-Disposition: form-data; name=\"goals\"\r\n\r\nsleep\r\n--XYZ--\r\n",
        ))
        .unwrap();

    for request in [bodyless, multipart] {
        let generator = FakeGenerator::replying("should not appear");
        let response = app(generator.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"), "content type {}", content_type);

        let html = body_text(response).await;
        assert!(html.contains("Missing required field: child_age"));
        assert_eq!(generator.calls(), 0);
    }
}

#[tokio::test]
async fn test_unreadable_body_json_names_first_field() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/meals")
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = app(FakeGenerator::replying("unused")).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"]["type"], "validation_error");
    assert_eq!(body["error"]["field"], "dietary_restrictions");
}

#[tokio::test]
async fn test_invalid_value_rerenders_form_with_input() {
    let generator = FakeGenerator::replying("unused");
    let response = app(generator.clone())
        .oneshot(post_form("/planner", "child_age=five&goals=tidy+room"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("Invalid value for child_age"));
    assert!(html.contains("tidy room"));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_generation_failure_page() {
    let generator = FakeGenerator::failing();
    let response = app(generator.clone())
        .oneshot(post_form("/emotions", "mood=anxious"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let html = body_text(response).await;
    assert!(html.contains("Generation failed"));
    assert!(!html.contains("upstream exploded"));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_generation_failure_status_codes() {
    let cases: [(fn() -> GenerationError, StatusCode, &str); 2] = [
        (
            || GenerationError::Timeout { timeout_secs: 30 },
            StatusCode::GATEWAY_TIMEOUT,
            "took too long",
        ),
        (
            || GenerationError::NotConfigured("OPENAI_API_KEY missing".to_string()),
            StatusCode::SERVICE_UNAVAILABLE,
            "not configured",
        ),
    ];

    for (error, status, message) in cases {
        let generator = FakeGenerator::failing_with(error);
        let response = app(generator.clone())
            .oneshot(post_form("/planner", "child_age=5&goals=sleep+routine"))
            .await
            .unwrap();

        assert_eq!(response.status(), status);
        let html = body_text(response).await;
        assert!(html.contains("Generation failed"));
        assert!(html.contains(message), "{} page should say {:?}", status, message);
        assert!(!html.contains("OPENAI_API_KEY"));
        assert_eq!(generator.calls(), 1);
    }
}

#[tokio::test]
async fn test_json_generation_error() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/emotions")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::ACCEPT, "application/json")
        .body(Body::from("mood=anxious"))
        .unwrap();

    let response = app(FakeGenerator::failing()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"]["type"], "generation_error");
    assert!(body["error"].get("field").is_none());
    assert!(!body["error"]["message"].as_str().unwrap().contains("upstream exploded"));
}

#[tokio::test]
async fn test_server_survives_generation_failure() {
    let generator = FakeGenerator::failing();
    let router = app(generator.clone());

    let first = router
        .clone()
        .oneshot(post_form("/meals", "dietary_restrictions=none&age=6&meal_count=3"))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::BAD_GATEWAY);

    let second = router.oneshot(get("/meals")).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_routes_return_not_found() {
    for method in [Method::GET, Method::POST] {
        let request = Request::builder()
            .method(method.clone())
            .uri("/bedtime-stories")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("mood=happy"))
            .unwrap();

        let generator = FakeGenerator::replying("unused");
        let response = app(generator.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{} unknown route", method);
        let html = body_text(response).await;
        assert!(html.contains("Page not found"));
        assert_eq!(generator.calls(), 0);
    }
}

#[tokio::test]
async fn test_json_responses() {
    let generator = FakeGenerator::replying("Soup, salad, pasta");
    let request = Request::builder()
        .method(Method::POST)
        .uri("/meals")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::ACCEPT, "application/json")
        .body(Body::from("dietary_restrictions=vegetarian&age=7&meal_count=3"))
        .unwrap();

    let response = app(generator).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["feature"], "meals");
    assert_eq!(body["content"], "Soup, salad, pasta");
    assert_eq!(body["submission"]["meal_count"], 3);
    assert_eq!(body["submission"]["dietary_restrictions"], "vegetarian");
}

#[tokio::test]
async fn test_json_validation_error_names_field() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/emotions")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::ACCEPT, "application/json")
        .body(Body::from("note=hello"))
        .unwrap();

    let response = app(FakeGenerator::replying("unused")).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["error"]["type"], "validation_error");
    assert_eq!(body["error"]["field"], "mood");
}

#[tokio::test]
async fn test_health_reports_generator() {
    let response = app(FakeGenerator::replying("unused"))
        .oneshot(get("/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["generator"], "fake");
}
