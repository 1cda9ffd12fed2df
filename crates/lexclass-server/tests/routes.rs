//! Router tests with the real PDF extractor and a stubbed classifier.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use lexclass_core::error::PipelineError;
use lexclass_core::pipeline::{Classifier, Pipeline};
use lexclass_core::registry::TemplateRegistry;
use lexclass_extract::PdfExtractor;
use lexclass_extract::fixtures::single_page_pdf;
use lexclass_server::page::IndexPage;
use lexclass_server::router;
use lexclass_server::state::AppState;

const BOUNDARY: &str = "lexclass-test-boundary";

struct StubClassifier {
    calls: AtomicUsize,
    reply: String,
}

impl StubClassifier {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: reply.to_string(),
        })
    }
}

impl Classifier for StubClassifier {
    fn classify(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(user_prompt.contains("Sample Clause 1"), "prompt was {user_prompt:?}");
        Ok(self.reply.clone())
    }
}

fn app_with_limit(classifier: Arc<StubClassifier>, max_upload_bytes: usize) -> Router {
    let registry = Arc::new(TemplateRegistry::builtin().unwrap());
    let page = IndexPage::new(&registry).unwrap();
    let pipeline = Pipeline::new(registry, Arc::new(PdfExtractor::new()), classifier);
    router(AppState {
        pipeline,
        page: Arc::new(page),
        max_upload_bytes,
    })
}

fn app(classifier: Arc<StubClassifier>) -> Router {
    app_with_limit(classifier, 1024 * 1024)
}

fn multipart_request(
    uri: &str,
    document: Option<(&str, &[u8])>,
    characteristic: Option<&str>,
) -> Request<Body> {
    let mut body = Vec::new();
    if let Some(key) = characteristic {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"characteristic\"\r\n\r\n{key}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = document {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"document\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let response = app(StubClassifier::replying("unused"))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn characteristics_are_listed_with_default_marked() {
    let response = app(StubClassifier::replying("unused"))
        .oneshot(Request::get("/api/characteristics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = body_json(response).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["key"], "1a1");
    assert_eq!(entries[0]["default"], true);
    assert_eq!(entries[1]["key"], "2a1");
    assert_eq!(entries[1]["default"], false);
    assert_eq!(
        entries[2]["description"],
        "Classification type 3a1 for legal documents"
    );
}

#[tokio::test]
async fn classify_end_to_end_with_default_key() {
    let classifier = StubClassifier::replying("CLASSIFIED: Contract");
    let pdf = single_page_pdf("Sample Clause 1").unwrap();

    let response = app(classifier.clone())
        .oneshot(multipart_request("/api/classify", Some(("clause.pdf", &pdf)), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["output"],
        "Selected characteristic: 1a1\n\nCLASSIFIED: Contract"
    );
    assert_eq!(json["characteristic"], "1a1");
    assert_eq!(json["ok"], true);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn classify_without_document_makes_no_model_call() {
    let classifier = StubClassifier::replying("unused");

    let response = app(classifier.clone())
        .oneshot(multipart_request("/api/classify", None, Some("2a1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["output"], "Error: Please upload a document.");
    assert_eq!(json["ok"], false);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_file_part_counts_as_no_document() {
    let classifier = StubClassifier::replying("unused");

    let response = app(classifier.clone())
        .oneshot(multipart_request("/api/classify", Some(("", b"")), Some("1a1")))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["output"], "Error: Please upload a document.");
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn classify_rejects_unknown_characteristic() {
    let classifier = StubClassifier::replying("unused");
    let pdf = single_page_pdf("Sample Clause 1").unwrap();

    let response = app(classifier.clone())
        .oneshot(multipart_request(
            "/api/classify",
            Some(("clause.pdf", &pdf)),
            Some("7q7"),
        ))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["output"], "Error: unsupported characteristic: 7q7");
    assert_eq!(json["characteristic"], "7q7");
    assert_eq!(json["ok"], false);
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn classify_reports_unreadable_pdf() {
    let classifier = StubClassifier::replying("unused");

    let response = app(classifier.clone())
        .oneshot(multipart_request(
            "/api/classify",
            Some(("notes.pdf", b"plain text")),
            Some("1a1"),
        ))
        .await
        .unwrap();

    let json = body_json(response).await;
    let output = json["output"].as_str().unwrap();
    assert!(output.starts_with("Error: document read failed:"), "{output}");
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let classifier = StubClassifier::replying("unused");
    let big = vec![b'x'; 8 * 1024];

    let response = app_with_limit(classifier.clone(), 1024)
        .oneshot(multipart_request(
            "/api/classify",
            Some(("big.pdf", &big)),
            Some("1a1"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        body_json(response).await["error"],
        "upload exceeds the request size limit"
    );
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_form_upload_is_shown_in_result_box() {
    let classifier = StubClassifier::replying("unused");
    let big = vec![b'x'; 8 * 1024];

    let response = app_with_limit(classifier.clone(), 1024)
        .oneshot(multipart_request("/", Some(("big.pdf", &big)), Some("2a1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"), "{content_type}");

    let html = body_text(response).await;
    assert!(html.contains("<title>Legal Document Classifier</title>"));
    assert!(html.contains(">Error: upload exceeds the request size limit</textarea>"));
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn form_page_preselects_default_characteristic() {
    let response = app(StubClassifier::replying("unused"))
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<title>Legal Document Classifier</title>"));
    assert!(html.contains(r#"<option value="1a1" selected>"#));
    assert!(html.contains(r#"<option value="2a1">"#));
    assert!(html.contains("Classification type 2a1 for legal documents"));
    assert!(html.contains(r#"id="copy-output""#));
}

#[tokio::test]
async fn form_submission_renders_result_into_page() {
    let classifier = StubClassifier::replying("CLASSIFIED: Contract");
    let pdf = single_page_pdf("Sample Clause 1").unwrap();

    let response = app(classifier.clone())
        .oneshot(multipart_request("/", Some(("clause.pdf", &pdf)), Some("3a1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Selected characteristic: 3a1\n\nCLASSIFIED: Contract"));
    assert!(html.contains(r#"<option value="3a1" selected>"#));
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
}
