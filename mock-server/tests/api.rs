use axum::http::{self, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, ErrorBody, API_PREFIX, SAMPLE_PDF};
use serde_json::{json, Value};
use tower::ServiceExt;

const TOKEN: &str = "Bearer test-token";

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn uri(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

fn request(method: &str, path: &str) -> http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri(path))
        .header(http::header::AUTHORIZATION, TOKEN)
}

fn empty(method: &str, path: &str) -> Request<String> {
    request(method, path).body(String::new()).unwrap()
}

fn json_request(method: &str, path: &str, body: &Value) -> Request<String> {
    request(method, path)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

async fn send(app: &Router, request: Request<String>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn etag(response: &Response) -> String {
    response.headers()[http::header::ETAG].to_str().unwrap().to_string()
}

fn widget_body(name: &str) -> Value {
    json!({
        "name": name,
        "state": "ACTIVE",
        "fileInfos": [{ "libraryDocumentId": "LIB-1" }],
        "widgetParticipantSetInfo": {
            "role": "SIGNER",
            "memberInfos": [{ "email": "" }]
        }
    })
}

async fn create_widget(app: &Router, name: &str) -> String {
    let resp = send(app, json_request("POST", "/widgets", &widget_body(name))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = body_json(resp).await;
    created["id"].as_str().unwrap().to_string()
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401_envelope() {
    let resp = app()
        .oneshot(Request::builder().uri(uri("/widgets")).body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let error: ErrorBody = body_json(resp).await;
    assert_eq!(error.code, "INVALID_ACCESS_TOKEN");
}

// --- widgets ---

#[tokio::test]
async fn list_widgets_empty() {
    let resp = send(&app(), empty("GET", "/widgets")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let list: Value = body_json(resp).await;
    assert_eq!(list["userWidgetList"], json!([]));
}

#[tokio::test]
async fn create_widget_requires_name() {
    let mut body = widget_body("x");
    body.as_object_mut().unwrap().remove("name");
    let resp = send(&app(), json_request("POST", "/widgets", &body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = body_json(resp).await;
    assert_eq!(error.code, "MISSING_REQUIRED_PARAM");
}

#[tokio::test]
async fn unknown_widget_returns_404() {
    let resp = send(&app(), empty("GET", "/widgets/nope")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let error: ErrorBody = body_json(resp).await;
    assert_eq!(error.code, "INVALID_WIDGET_ID");
}

#[tokio::test]
async fn get_widget_honours_if_none_match() {
    let app = app();
    let id = create_widget(&app, "Intake").await;

    let resp = send(&app, empty("GET", &format!("/widgets/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tag = etag(&resp);
    let info: Value = body_json(resp).await;
    assert_eq!(info["id"], id.as_str());
    assert_eq!(info["status"], "ACTIVE");

    let resp = send(
        &app,
        request("GET", &format!("/widgets/{id}"))
            .header(http::header::IF_NONE_MATCH, &tag)
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(etag(&resp), tag);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn update_widget_checks_if_match() {
    let app = app();
    let id = create_widget(&app, "Intake").await;
    let path = format!("/widgets/{id}");

    let resp = send(&app, json_request("PUT", &path, &json!({ "name": "Renamed" }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let stale = request("PUT", &path)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::IF_MATCH, "\"0\"")
        .body(json!({ "name": "Renamed" }).to_string())
        .unwrap();
    let resp = send(&app, stale).await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);

    let fresh = request("PUT", &path)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::IF_MATCH, "\"1\"")
        .body(json!({ "name": "Renamed" }).to_string())
        .unwrap();
    let resp = send(&app, fresh).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(etag(&resp), "\"2\"");

    let info: Value = body_json(send(&app, empty("GET", &path)).await).await;
    assert_eq!(info["name"], "Renamed");
}

#[tokio::test]
async fn state_transition_is_validated() {
    let app = app();
    let id = create_widget(&app, "Intake").await;
    let path = format!("/widgets/{id}/state");

    let to_draft = request("PUT", &path)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::IF_MATCH, "\"1\"")
        .body(json!({ "state": "DRAFT" }).to_string())
        .unwrap();
    let resp = send(&app, to_draft).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let to_inactive = request("PUT", &path)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::IF_MATCH, "\"1\"")
        .body(json!({ "state": "INACTIVE", "widgetInactiveInfo": { "message": "closed" } }).to_string())
        .unwrap();
    let resp = send(&app, to_inactive).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let events: Value = body_json(send(&app, empty("GET", &format!("/widgets/{id}/events"))).await).await;
    let types: Vec<&str> = events["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["CREATED", "DISABLED"]);
}

#[tokio::test]
async fn documents_are_served_as_pdf() {
    let app = app();
    let id = create_widget(&app, "Intake").await;

    let docs: Value = body_json(send(&app, empty("GET", &format!("/widgets/{id}/documents"))).await).await;
    assert_eq!(docs["documents"][0]["id"], "D1");

    let resp = send(&app, empty("GET", &format!("/widgets/{id}/documents/D1"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "application/pdf");
    assert_eq!(body_bytes(resp).await.as_ref(), SAMPLE_PDF);

    let resp = send(&app, empty("GET", &format!("/widgets/{id}/documents/D9"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    for report in ["auditTrail", "combinedDocument"] {
        let resp = send(&app, empty("GET", &format!("/widgets/{id}/{report}"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_bytes(resp).await.starts_with(b"%PDF"));
    }
}

#[tokio::test]
async fn note_and_visibility() {
    let app = app();
    let id = create_widget(&app, "Intake").await;

    let resp = send(
        &app,
        json_request("PUT", &format!("/widgets/{id}/me/note"), &json!({ "value": "follow up" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let note: Value = body_json(send(&app, empty("GET", &format!("/widgets/{id}/me/note"))).await).await;
    assert_eq!(note["value"], "follow up");

    let resp = send(
        &app,
        json_request("PUT", &format!("/widgets/{id}/me/visibility"), &json!({ "visibility": "HIDE" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let list: Value = body_json(send(&app, empty("GET", "/widgets")).await).await;
    assert_eq!(list["userWidgetList"], json!([]));
    let list: Value = body_json(send(&app, empty("GET", "/widgets?showHiddenWidgets=true")).await).await;
    assert_eq!(list["userWidgetList"][0]["hidden"], true);
}

#[tokio::test]
async fn listing_pages_with_cursor() {
    let app = app();
    for name in ["a", "b", "c"] {
        create_widget(&app, name).await;
    }

    let first: Value = body_json(send(&app, empty("GET", "/widgets?pageSize=2")).await).await;
    assert_eq!(first["userWidgetList"].as_array().unwrap().len(), 2);
    let cursor = first["page"]["nextCursor"].as_str().unwrap().to_string();

    let second: Value =
        body_json(send(&app, empty("GET", &format!("/widgets?pageSize=2&cursor={cursor}"))).await).await;
    assert_eq!(second["userWidgetList"].as_array().unwrap().len(), 1);
    assert!(second["page"].get("nextCursor").is_none());
}

#[tokio::test]
async fn views_expand_all() {
    let app = app();
    let id = create_widget(&app, "Intake").await;

    let resp = send(&app, json_request("POST", &format!("/widgets/{id}/views"), &json!({ "name": "ALL" }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let views: Value = body_json(resp).await;
    assert_eq!(views["widgetViewList"].as_array().unwrap().len(), 3);
}

// --- webhooks ---

#[tokio::test]
async fn webhook_lifecycle() {
    let app = app();
    let body = json!({
        "name": "crm",
        "scope": "ACCOUNT",
        "state": "ACTIVE",
        "webhookSubscriptionEvents": ["AGREEMENT_ALL"],
        "webhookUrlInfo": { "url": "https://hooks.example.com/sign" }
    });
    let resp = send(&app, json_request("POST", "/webhooks", &body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();

    let state = request("PUT", &format!("/webhooks/{id}/state"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::IF_MATCH, "\"1\"")
        .body(json!({ "state": "INACTIVE" }).to_string())
        .unwrap();
    assert_eq!(send(&app, state).await.status(), StatusCode::OK);

    let active: Value = body_json(send(&app, empty("GET", "/webhooks")).await).await;
    assert_eq!(active["userWebhookList"], json!([]));
    let all: Value = body_json(send(&app, empty("GET", "/webhooks?showInActiveWebhooks=true")).await).await;
    assert_eq!(all["userWebhookList"][0]["state"], "INACTIVE");

    let stale_delete = request("DELETE", &format!("/webhooks/{id}"))
        .header(http::header::IF_MATCH, "\"1\"")
        .body(String::new())
        .unwrap();
    assert_eq!(send(&app, stale_delete).await.status(), StatusCode::PRECONDITION_FAILED);

    let resp = send(&app, empty("DELETE", &format!("/webhooks/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = send(&app, empty("GET", &format!("/webhooks/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn webhook_url_must_be_https() {
    let body = json!({
        "name": "crm",
        "scope": "ACCOUNT",
        "webhookSubscriptionEvents": [],
        "webhookUrlInfo": { "url": "http://insecure.example.com" }
    });
    let resp = send(&app(), json_request("POST", "/webhooks", &body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = body_json(resp).await;
    assert_eq!(error.code, "INVALID_WEBHOOK_URL");
}
