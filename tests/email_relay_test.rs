use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, Request, StatusCode},
    routing::post,
    Json, Router,
};
use careers_backend::{
    build_router, config::EmailJsConfig, services::email_service::EmailJsMailer, AppState,
};
use serde_json::Value as JsonValue;
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

const BOUNDARY: &str = "relay-test-boundary";
const APPLICATION_TEMPLATE: &str = "template_application";
const AUTO_REPLY_TEMPLATE: &str = "template_auto_reply";

#[derive(Clone)]
struct FakeRelay {
    calls: Arc<Mutex<Vec<JsonValue>>>,
    rejected_templates: Arc<Vec<String>>,
}

impl FakeRelay {
    fn calls(&self) -> Vec<JsonValue> {
        self.calls.lock().unwrap().clone()
    }
}

async fn accept_email(
    State(relay): State<FakeRelay>,
    Json(body): Json<JsonValue>,
) -> (StatusCode, &'static str) {
    let template = body["template_id"].as_str().unwrap_or_default().to_string();
    relay.calls.lock().unwrap().push(body);
    if relay.rejected_templates.contains(&template) {
        (StatusCode::BAD_REQUEST, "The template ID is invalid")
    } else {
        (StatusCode::OK, "OK")
    }
}

async fn spawn_relay(rejected: &[&str]) -> (Url, FakeRelay) {
    let relay = FakeRelay {
        calls: Arc::new(Mutex::new(Vec::new())),
        rejected_templates: Arc::new(rejected.iter().map(|t| t.to_string()).collect()),
    };
    let app = Router::new()
        .route("/api/v1.0/email/send", post(accept_email))
        .with_state(relay.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (Url::parse(&format!("http://{}/", addr)).unwrap(), relay)
}

fn app_against(api_url: Url) -> Router {
    let mailer = EmailJsMailer::new(EmailJsConfig {
        api_url,
        service_id: "service_careers".to_string(),
        template_id: APPLICATION_TEMPLATE.to_string(),
        auto_reply_template_id: AUTO_REPLY_TEMPLATE.to_string(),
        public_key: "public_key".to_string(),
        private_key: Some("private_key".to_string()),
        hr_recipient: "hr@example.com".to_string(),
        timeout_secs: 5,
    })
    .unwrap();
    build_router(AppState::with_mailer(Arc::new(mailer)), 100, None)
}

fn application_request() -> Request<Body> {
    let fields = [
        ("full_name", "Nisha Pal"),
        ("email", "nisha@example.com"),
        ("phone", "9123456789"),
        ("linkedin_url", "https://linkedin.com/in/nishapal"),
        ("experience", "0-1"),
        ("terms_accepted", "true"),
    ];
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri("/jobs/social-media-executive/apply")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn acknowledgement_failure_does_not_fail_submission() {
    let (api_url, relay) = spawn_relay(&[AUTO_REPLY_TEMPLATE]).await;
    let app = app_against(api_url);

    let resp = app.oneshot(application_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["acknowledgement"]["sent"], false);
    assert!(body["acknowledgement"]["reason"]
        .as_str()
        .unwrap()
        .contains("400"));

    let calls = relay.calls();
    assert_eq!(calls.len(), 2);

    let primary = &calls[0];
    assert_eq!(primary["service_id"], "service_careers");
    assert_eq!(primary["template_id"], APPLICATION_TEMPLATE);
    assert_eq!(primary["user_id"], "public_key");
    assert_eq!(primary["accessToken"], "private_key");
    let params = &primary["template_params"];
    assert_eq!(params["to_email"], "hr@example.com");
    assert_eq!(params["fullName"], "Nisha Pal");
    assert_eq!(params["jobTitle"], "Social Media Executive");
    assert_eq!(params["portfolioUrl"], "Not provided");
    assert_eq!(params["experience"], "0-1");
    assert_eq!(params["reference"], body["reference"]);

    let auto_reply = &calls[1];
    assert_eq!(auto_reply["template_id"], AUTO_REPLY_TEMPLATE);
    assert_eq!(auto_reply["template_params"]["to_email"], "nisha@example.com");
    assert_eq!(auto_reply["template_params"]["applicant_name"], "Nisha Pal");
}

#[tokio::test]
async fn primary_rejection_fails_submission_without_acknowledgement() {
    let (api_url, relay) = spawn_relay(&[APPLICATION_TEMPLATE]).await;
    let app = app_against(api_url);

    let resp = app.oneshot(application_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Failed to submit application. Please try again."
    );

    let calls = relay.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["template_id"], APPLICATION_TEMPLATE);
}

#[tokio::test]
async fn unreachable_relay_is_reported_as_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = app_against(Url::parse(&format!("http://{}/", addr)).unwrap());
    let resp = app.oneshot(application_request()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json_body(resp).await["success"], false);
}
