//! In-memory stand-in for the e-signature REST API.
//!
//! Serves the widget and webhook resources under [`API_PREFIX`] with the
//! behaviours a client has to cope with: bearer authentication, `ETag`
//! versioning, `If-None-Match` (304), `If-Match` (412 on mismatch), the
//! `{code, message}` error envelope and binary PDF bodies.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const API_PREFIX: &str = "/api/rest/v6";

/// Body served by every document, combined document and audit trail route.
pub const SAMPLE_PDF: &[u8] = b"%PDF-1.7\n1 0 obj << /Type /Catalog >> endobj\ntrailer << /Root 1 0 R >>\n%%EOF\n";

/// Error envelope returned for every failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiFailure {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    fn not_found(kind: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            &format!("INVALID_{}_ID", kind.to_uppercase()),
            format!("The {kind} id is invalid"),
        )
    }

    fn missing(parameter: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "MISSING_REQUIRED_PARAM",
            format!("Required parameter {parameter} is missing"),
        )
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

type ApiResult = Result<Response, ApiFailure>;

#[derive(Clone, Debug)]
struct Widget {
    info: Map<String, Value>,
    version: u64,
    note: Option<String>,
    hidden: bool,
    events: Vec<Value>,
}

impl Widget {
    fn etag(&self) -> String {
        etag(self.version)
    }

    fn state(&self) -> &str {
        self.info.get("state").and_then(Value::as_str).unwrap_or("DRAFT")
    }

    fn record(&mut self, event_type: &str) {
        self.events.push(json!({
            "id": Uuid::new_v4().to_string(),
            "type": event_type,
            "date": "2024-01-01T00:00:00Z",
            "versionId": self.version.to_string(),
        }));
    }
}

#[derive(Clone, Debug)]
struct Webhook {
    info: Map<String, Value>,
    version: u64,
}

#[derive(Debug, Default)]
pub struct Store {
    widgets: HashMap<String, Widget>,
    webhooks: HashMap<String, Webhook>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/widgets", get(list_widgets).post(create_widget))
        .route("/widgets/{id}", get(get_widget).put(update_widget))
        .route("/widgets/{id}/state", put(update_widget_state))
        .route("/widgets/{id}/members", get(get_widget_members))
        .route("/widgets/{id}/events", get(get_widget_events))
        .route("/widgets/{id}/documents", get(get_widget_documents))
        .route("/widgets/{id}/documents/{document_id}", get(get_widget_document))
        .route("/widgets/{id}/combinedDocument", get(get_widget_pdf))
        .route("/widgets/{id}/auditTrail", get(get_widget_pdf))
        .route("/widgets/{id}/me/note", get(get_widget_note).put(update_widget_note))
        .route("/widgets/{id}/me/visibility", put(update_widget_visibility))
        .route("/widgets/{id}/views", post(get_widget_views))
        .route("/webhooks", get(list_webhooks).post(create_webhook))
        .route(
            "/webhooks/{id}",
            get(get_webhook).put(update_webhook).delete(delete_webhook),
        )
        .route("/webhooks/{id}/state", put(update_webhook_state))
        .with_state(db)
        .layer(middleware::from_fn(require_bearer));
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, prefix = API_PREFIX, "mock e-sign api listening");
    }
    axum::serve(listener, app()).await
}

async fn require_bearer(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        return ApiFailure::new(
            StatusCode::UNAUTHORIZED,
            "INVALID_ACCESS_TOKEN",
            "Access token provided is invalid or has expired",
        )
        .into_response();
    }
    debug!(method = %request.method(), uri = %request.uri(), "request");
    next.run(request).await
}

fn etag(version: u64) -> String {
    format!("\"{version}\"")
}

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// 304 when `If-None-Match` still matches, otherwise `body` with the tag.
fn conditional(headers: &HeaderMap, current: &str, body: impl IntoResponse) -> Response {
    if header_str(headers, header::IF_NONE_MATCH) == Some(current) {
        return (StatusCode::NOT_MODIFIED, [(header::ETAG, current.to_string())]).into_response();
    }
    (StatusCode::OK, [(header::ETAG, current.to_string())], body).into_response()
}

/// Checks `If-Match` against the current tag.
fn precondition(headers: &HeaderMap, current: &str) -> Result<(), ApiFailure> {
    match header_str(headers, header::IF_MATCH) {
        None => Err(ApiFailure::missing("If-Match")),
        Some(tag) if tag == current => Ok(()),
        Some(_) => Err(ApiFailure::new(
            StatusCode::PRECONDITION_FAILED,
            "RESOURCE_MODIFIED",
            "The resource has been modified since it was last read",
        )),
    }
}

fn pdf(headers: &HeaderMap, current: &str) -> Response {
    conditional(
        headers,
        current,
        ([(header::CONTENT_TYPE, "application/pdf")], SAMPLE_PDF),
    )
}

fn require_str<'a>(body: &'a Value, field: &str) -> Result<&'a str, ApiFailure> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiFailure::missing(field))
}

fn into_object(body: Value) -> Result<Map<String, Value>, ApiFailure> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "INVALID_JSON",
            "Request body must be a JSON object",
        )),
    }
}

fn widget_transition_allowed(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        ("DRAFT", "AUTHORING")
            | ("DRAFT", "ACTIVE")
            | ("AUTHORING", "ACTIVE")
            | ("ACTIVE", "INACTIVE")
            | ("INACTIVE", "ACTIVE")
            | ("DRAFT", "CANCELLED")
            | ("AUTHORING", "CANCELLED")
    )
}

// --- widgets ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WidgetListParams {
    show_hidden_widgets: Option<bool>,
    cursor: Option<String>,
    page_size: Option<usize>,
}

async fn list_widgets(State(db): State<Db>, Query(params): Query<WidgetListParams>) -> Response {
    let store = db.read().await;
    let mut ids: Vec<&String> = store
        .widgets
        .iter()
        .filter(|(_, w)| params.show_hidden_widgets.unwrap_or(false) || !w.hidden)
        .map(|(id, _)| id)
        .collect();
    ids.sort();

    let start = params
        .cursor
        .as_deref()
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(0);
    let size = params.page_size.unwrap_or(100).max(1);
    let page: Vec<Value> = ids
        .iter()
        .skip(start)
        .take(size)
        .filter_map(|id| store.widgets.get(*id).map(|w| (id, w)))
        .map(|(id, w)| {
            json!({
                "id": id,
                "name": w.info.get("name"),
                "status": w.state(),
                "hidden": w.hidden,
            })
        })
        .collect();
    let next = start + page.len();
    let page_info = if next < ids.len() {
        json!({ "nextCursor": next.to_string() })
    } else {
        json!({})
    };
    Json(json!({ "userWidgetList": page, "page": page_info })).into_response()
}

async fn create_widget(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult {
    require_str(&body, "name")?;
    let state = require_str(&body, "state")?.to_string();
    if body.get("widgetParticipantSetInfo").is_none() {
        return Err(ApiFailure::missing("widgetParticipantSetInfo"));
    }
    let mut info = into_object(body)?;
    let id = Uuid::new_v4().to_string();
    info.insert("id".to_string(), Value::String(id.clone()));
    info.insert("status".to_string(), Value::String(state));

    let mut widget = Widget {
        info,
        version: 1,
        note: None,
        hidden: false,
        events: Vec::new(),
    };
    widget.record("CREATED");
    db.write().await.widgets.insert(id.clone(), widget);
    info!(widget = %id, "widget created");
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}

async fn get_widget(State(db): State<Db>, Path(id): Path<String>, headers: HeaderMap) -> ApiResult {
    let store = db.read().await;
    let widget = store.widgets.get(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    Ok(conditional(&headers, &widget.etag(), Json(&widget.info)))
}

async fn update_widget(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut store = db.write().await;
    let widget = store.widgets.get_mut(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    precondition(&headers, &widget.etag())?;
    for (key, value) in into_object(body)? {
        if key != "id" && key != "status" {
            widget.info.insert(key, value);
        }
    }
    widget.version += 1;
    widget.record("MODIFIED");
    Ok((StatusCode::OK, [(header::ETAG, widget.etag())]).into_response())
}

async fn update_widget_state(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    let target = require_str(&body, "state")?.to_string();
    let mut store = db.write().await;
    let widget = store.widgets.get_mut(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    precondition(&headers, &widget.etag())?;
    if !widget_transition_allowed(widget.state(), &target) {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "INVALID_STATE_TRANSITION",
            format!("Cannot move a {} widget to {target}", widget.state()),
        ));
    }
    widget.info.insert("state".to_string(), Value::String(target.clone()));
    widget.info.insert("status".to_string(), Value::String(target.clone()));
    widget.version += 1;
    widget.record(match target.as_str() {
        "INACTIVE" => "DISABLED",
        "ACTIVE" => "ENABLED",
        _ => "MODIFIED",
    });
    Ok((StatusCode::OK, [(header::ETAG, widget.etag())]).into_response())
}

async fn get_widget_members(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    let store = db.read().await;
    let widget = store.widgets.get(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    let set = widget.info.get("widgetParticipantSetInfo").cloned().unwrap_or(Value::Null);
    let members: Vec<Value> = set
        .get("memberInfos")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .enumerate()
                .map(|(i, m)| {
                    json!({
                        "id": format!("{id}-member-{i}"),
                        "email": m.get("email"),
                        "status": "ACTIVE",
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    let body = json!({
        "widgetParticipantSet": {
            "id": format!("{id}-set-0"),
            "role": set.get("role"),
            "memberInfos": members,
        },
        "additionalParticipantSets": [],
    });
    Ok(conditional(&headers, &widget.etag(), Json(body)))
}

async fn get_widget_events(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    let store = db.read().await;
    let widget = store.widgets.get(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    Ok(conditional(
        &headers,
        &widget.etag(),
        Json(json!({ "events": widget.events })),
    ))
}

fn widget_documents(widget: &Widget) -> Vec<Value> {
    widget
        .info
        .get("fileInfos")
        .and_then(Value::as_array)
        .map(|files| {
            files
                .iter()
                .enumerate()
                .map(|(i, file)| {
                    json!({
                        "id": format!("D{}", i + 1),
                        "label": file.get("label"),
                        "mimeType": "application/pdf",
                        "name": format!("document-{}.pdf", i + 1),
                        "numPages": 1,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

async fn get_widget_documents(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    let store = db.read().await;
    let widget = store.widgets.get(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    Ok(conditional(
        &headers,
        &widget.etag(),
        Json(json!({ "documents": widget_documents(widget), "supportingDocuments": [] })),
    ))
}

async fn get_widget_document(
    State(db): State<Db>,
    Path((id, document_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult {
    let store = db.read().await;
    let widget = store.widgets.get(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    let known = widget_documents(widget)
        .iter()
        .any(|d| d.get("id").and_then(Value::as_str) == Some(document_id.as_str()));
    if !known {
        return Err(ApiFailure::not_found("document"));
    }
    Ok(pdf(&headers, &widget.etag()))
}

async fn get_widget_pdf(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    let store = db.read().await;
    let widget = store.widgets.get(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    Ok(pdf(&headers, &widget.etag()))
}

async fn get_widget_note(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let store = db.read().await;
    let widget = store.widgets.get(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    let body = match &widget.note {
        Some(value) => json!({ "value": value }),
        None => json!({}),
    };
    Ok(Json(body).into_response())
}

async fn update_widget_note(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut store = db.write().await;
    let widget = store.widgets.get_mut(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    widget.note = body.get("value").and_then(Value::as_str).map(str::to_string);
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn update_widget_visibility(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult {
    let visibility = require_str(&body, "visibility")?.to_string();
    let mut store = db.write().await;
    let widget = store.widgets.get_mut(&id).ok_or_else(|| ApiFailure::not_found("widget"))?;
    widget.hidden = match visibility.as_str() {
        "HIDE" => true,
        "SHOW" => false,
        other => {
            return Err(ApiFailure::new(
                StatusCode::BAD_REQUEST,
                "INVALID_VISIBILITY",
                format!("Unknown visibility {other}"),
            ))
        }
    };
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn get_widget_views(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult {
    let name = require_str(&body, "name")?.to_string();
    let store = db.read().await;
    if !store.widgets.contains_key(&id) {
        return Err(ApiFailure::not_found("widget"));
    }
    let names: Vec<&str> = if name == "ALL" {
        vec!["AUTHORING", "DOCUMENT", "MANAGE"]
    } else {
        vec![name.as_str()]
    };
    let views: Vec<Value> = names
        .iter()
        .map(|view| {
            json!({
                "name": view,
                "url": format!("https://secure.example.com/{}/{id}", view.to_lowercase()),
            })
        })
        .collect();
    Ok(Json(json!({ "widgetViewList": views })).into_response())
}

// --- webhooks ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookListParams {
    #[serde(rename = "showInActiveWebhooks")]
    show_inactive_webhooks: Option<bool>,
    scope: Option<String>,
    resource_type: Option<String>,
}

async fn list_webhooks(State(db): State<Db>, Query(params): Query<WebhookListParams>) -> Response {
    let store = db.read().await;
    let field = |w: &Webhook, key: &str| w.info.get(key).and_then(Value::as_str).map(str::to_string);
    let mut list: Vec<Value> = store
        .webhooks
        .iter()
        .filter(|(_, w)| {
            params.show_inactive_webhooks.unwrap_or(false)
                || field(w, "state").as_deref() != Some("INACTIVE")
        })
        .filter(|(_, w)| params.scope.is_none() || field(w, "scope") == params.scope)
        .filter(|(_, w)| {
            params.resource_type.is_none() || field(w, "resourceType") == params.resource_type
        })
        .map(|(id, w)| {
            json!({
                "id": id,
                "name": w.info.get("name"),
                "scope": w.info.get("scope"),
                "state": w.info.get("state"),
                "webhookUrlInfo": w.info.get("webhookUrlInfo"),
            })
        })
        .collect();
    list.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
    Json(json!({ "userWebhookList": list, "page": {} })).into_response()
}

async fn create_webhook(State(db): State<Db>, Json(body): Json<Value>) -> ApiResult {
    require_str(&body, "name")?;
    require_str(&body, "scope")?;
    let url = body
        .get("webhookUrlInfo")
        .and_then(|u| u.get("url"))
        .and_then(Value::as_str)
        .ok_or_else(|| ApiFailure::missing("webhookUrlInfo"))?;
    if !url.starts_with("https://") {
        return Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "INVALID_WEBHOOK_URL",
            "Webhook URL must use https",
        ));
    }
    let mut info = into_object(body)?;
    let id = Uuid::new_v4().to_string();
    info.insert("id".to_string(), Value::String(id.clone()));
    info.entry("state").or_insert_with(|| Value::String("ACTIVE".to_string()));
    db.write()
        .await
        .webhooks
        .insert(id.clone(), Webhook { info, version: 1 });
    info!(webhook = %id, "webhook created");
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}

async fn get_webhook(State(db): State<Db>, Path(id): Path<String>, headers: HeaderMap) -> ApiResult {
    let store = db.read().await;
    let webhook = store.webhooks.get(&id).ok_or_else(|| ApiFailure::not_found("webhook"))?;
    Ok(conditional(&headers, &etag(webhook.version), Json(&webhook.info)))
}

async fn update_webhook(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut store = db.write().await;
    let webhook = store.webhooks.get_mut(&id).ok_or_else(|| ApiFailure::not_found("webhook"))?;
    precondition(&headers, &etag(webhook.version))?;
    let mut info = into_object(body)?;
    info.insert("id".to_string(), Value::String(id));
    webhook.info = info;
    webhook.version += 1;
    Ok((StatusCode::OK, [(header::ETAG, etag(webhook.version))]).into_response())
}

async fn update_webhook_state(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    let state = require_str(&body, "state")?.to_string();
    let mut store = db.write().await;
    let webhook = store.webhooks.get_mut(&id).ok_or_else(|| ApiFailure::not_found("webhook"))?;
    precondition(&headers, &etag(webhook.version))?;
    webhook.info.insert("state".to_string(), Value::String(state));
    webhook.version += 1;
    Ok((StatusCode::OK, [(header::ETAG, etag(webhook.version))]).into_response())
}

async fn delete_webhook(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult {
    let mut store = db.write().await;
    let webhook = store.webhooks.get(&id).ok_or_else(|| ApiFailure::not_found("webhook"))?;
    if header_str(&headers, header::IF_MATCH).is_some() {
        precondition(&headers, &etag(webhook.version))?;
    }
    store.webhooks.remove(&id);
    Ok(StatusCode::NO_CONTENT.into_response())
}
