//! Client behaviour that does not depend on a particular resource:
//! required-parameter checks, status mapping, transport failures, shared
//! headers and concurrent use of one client.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use esign_core::models::{
    AgreementInfo, AgreementState, AgreementStateInfo, Note, SignatureType, Visibility,
    VisibilityInfo, WebhookInfo, WebhookScope, WebhookState, WebhookStateInfo, WidgetInfo,
    WidgetStateInfo, WidgetState, WidgetViewInfo, WidgetViewName,
};
use esign_core::{
    DocumentQuery, Error, HttpRequest, HttpResponse, ListQuery, RequestOptions, SignClient,
    StaticToken, Transport, TransportError,
};

const BASE_URL: &str = "https://api.example.com/api/rest/v6";

/// Answers every request with the same response and keeps what it saw.
struct Recording {
    response: Result<HttpResponse, TransportError>,
    calls: AtomicUsize,
    seen: Mutex<Vec<HttpRequest>>,
}

impl Recording {
    fn replying(response: HttpResponse) -> Self {
        Self {
            response: Ok(response),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing(error: TransportError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last(&self) -> HttpRequest {
        self.seen.lock().unwrap().last().cloned().expect("a request")
    }
}

impl Transport for Recording {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        self.response.clone()
    }
}

fn ok_client() -> SignClient<Recording> {
    SignClient::with_transport(BASE_URL, Recording::replying(HttpResponse::new(200, "{}")))
}

fn missing_parameter(result: esign_core::Result<impl std::fmt::Debug>) -> (&'static str, &'static str) {
    match result {
        Err(Error::Validation(e)) => (e.operation, e.parameter),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

/// Operation name, the parameter left blank, and a call that leaves it blank
/// while supplying everything else.
type Blank = (
    &'static str,
    &'static str,
    fn(&SignClient<Recording>, &RequestOptions) -> esign_core::Result<()>,
);

fn agreement() -> AgreementInfo {
    AgreementInfo::new("contract", Vec::new(), SignatureType::Esign)
}

fn webhook() -> WebhookInfo {
    WebhookInfo::new(
        "hook",
        WebhookScope::Account,
        "https://hooks.example.com",
        vec!["AGREEMENT_ALL".to_string()],
    )
}

const BLANKS: &[Blank] = &[
    ("get_widget_info", "widgetId", |c, o| c.widgets().get_widget_info("", o).map(drop)),
    ("update_widget", "If-Match", |c, o| {
        c.widgets().update_widget("", "W-1", &WidgetInfo::default(), o)
    }),
    ("update_widget", "widgetId", |c, o| {
        c.widgets().update_widget("\"1\"", "", &WidgetInfo::default(), o)
    }),
    ("get_all_widget_members", "widgetId", |c, o| {
        c.widgets().get_all_widget_members("", o).map(drop)
    }),
    ("get_participant_set", "widgetId", |c, o| {
        c.widgets().get_participant_set("", "PS-1", o).map(drop)
    }),
    ("get_participant_set", "participantSetId", |c, o| {
        c.widgets().get_participant_set("W-1", "", o).map(drop)
    }),
    ("get_events", "widgetId", |c, o| c.widgets().get_events("", o).map(drop)),
    ("get_widget_agreements", "widgetId", |c, o| {
        c.widgets().get_widget_agreements("", &ListQuery::new(), o).map(drop)
    }),
    ("get_widget_audit_trail", "widgetId", |c, o| {
        c.widgets().get_widget_audit_trail("", o).map(drop)
    }),
    ("get_widget_combined_document", "widgetId", |c, o| {
        c.widgets().get_widget_combined_document("", &DocumentQuery::new(), o).map(drop)
    }),
    ("get_widget_documents", "widgetId", |c, o| {
        c.widgets().get_widget_documents("", &DocumentQuery::new(), o).map(drop)
    }),
    ("get_widget_document", "widgetId", |c, o| {
        c.widgets().get_widget_document("", "D-1", o).map(drop)
    }),
    ("get_widget_document", "documentId", |c, o| {
        c.widgets().get_widget_document("W-1", "", o).map(drop)
    }),
    ("get_widget_form_data", "widgetId", |c, o| c.widgets().get_widget_form_data("", o).map(drop)),
    ("get_widget_note", "widgetId", |c, o| c.widgets().get_widget_note("", o).map(drop)),
    ("update_widget_note", "widgetId", |c, o| {
        c.widgets().update_widget_note("", &Note::new("x"), o)
    }),
    ("get_widget_views", "widgetId", |c, o| {
        c.widgets()
            .get_widget_views("", &WidgetViewInfo::new(WidgetViewName::All), o)
            .map(drop)
    }),
    ("update_widget_state", "If-Match", |c, o| {
        c.widgets()
            .update_widget_state("", "W-1", &WidgetStateInfo::new(WidgetState::Active), o)
    }),
    ("update_widget_state", "widgetId", |c, o| {
        c.widgets()
            .update_widget_state("\"1\"", "", &WidgetStateInfo::new(WidgetState::Active), o)
    }),
    ("update_widget_visibility", "widgetId", |c, o| {
        c.widgets()
            .update_widget_visibility("", &VisibilityInfo::new(Visibility::Show), o)
    }),
    ("get_agreement_info", "agreementId", |c, o| {
        c.agreements().get_agreement_info("", o).map(drop)
    }),
    ("update_agreement", "If-Match", |c, o| {
        c.agreements().update_agreement("", "A-1", &agreement(), o)
    }),
    ("update_agreement", "agreementId", |c, o| {
        c.agreements().update_agreement("\"1\"", "", &agreement(), o)
    }),
    ("update_agreement_state", "If-Match", |c, o| {
        c.agreements().update_agreement_state(
            "",
            "A-1",
            &AgreementStateInfo::new(AgreementState::InProcess),
            o,
        )
    }),
    ("update_agreement_state", "agreementId", |c, o| {
        c.agreements().update_agreement_state(
            "\"1\"",
            "",
            &AgreementStateInfo::new(AgreementState::InProcess),
            o,
        )
    }),
    ("get_agreement_members", "agreementId", |c, o| {
        c.agreements().get_agreement_members("", o).map(drop)
    }),
    ("get_agreement_documents", "agreementId", |c, o| {
        c.agreements().get_agreement_documents("", &DocumentQuery::new(), o).map(drop)
    }),
    ("get_agreement_document", "agreementId", |c, o| {
        c.agreements().get_agreement_document("", "D-1", o).map(drop)
    }),
    ("get_agreement_document", "documentId", |c, o| {
        c.agreements().get_agreement_document("A-1", "", o).map(drop)
    }),
    ("get_agreement_combined_document", "agreementId", |c, o| {
        c.agreements()
            .get_agreement_combined_document("", &DocumentQuery::new(), o)
            .map(drop)
    }),
    ("get_agreement_audit_trail", "agreementId", |c, o| {
        c.agreements().get_agreement_audit_trail("", o).map(drop)
    }),
    ("get_agreement_form_data", "agreementId", |c, o| {
        c.agreements().get_agreement_form_data("", o).map(drop)
    }),
    ("delete_agreement_documents", "agreementId", |c, o| {
        c.agreements().delete_agreement_documents("", o)
    }),
    ("get_library_document_info", "libraryDocumentId", |c, o| {
        c.library_documents().get_library_document_info("", o).map(drop)
    }),
    ("get_library_document_documents", "libraryDocumentId", |c, o| {
        c.library_documents().get_library_document_documents("", o).map(drop)
    }),
    ("get_library_document_combined_document", "libraryDocumentId", |c, o| {
        c.library_documents()
            .get_library_document_combined_document("", Some(true), o)
            .map(drop)
    }),
    ("get_library_document_audit_trail", "libraryDocumentId", |c, o| {
        c.library_documents().get_library_document_audit_trail("", o).map(drop)
    }),
    ("get_webhook_info", "webhookId", |c, o| c.webhooks().get_webhook_info("", o).map(drop)),
    ("update_webhook", "If-Match", |c, o| {
        c.webhooks().update_webhook("", "H-1", &webhook(), o)
    }),
    ("update_webhook", "webhookId", |c, o| {
        c.webhooks().update_webhook("\"1\"", "", &webhook(), o)
    }),
    ("update_webhook_state", "If-Match", |c, o| {
        c.webhooks().update_webhook_state(
            "",
            "H-1",
            &WebhookStateInfo { state: WebhookState::Inactive },
            o,
        )
    }),
    ("update_webhook_state", "webhookId", |c, o| {
        c.webhooks().update_webhook_state(
            "\"1\"",
            "",
            &WebhookStateInfo { state: WebhookState::Inactive },
            o,
        )
    }),
    ("delete_webhook", "webhookId", |c, o| c.webhooks().delete_webhook(" ", None, o)),
];

#[test]
fn missing_parameters_never_reach_the_transport() {
    let client = ok_client();
    let opts = RequestOptions::new();
    let widgets = client.widgets();

    assert_eq!(
        missing_parameter(widgets.get_widget_info("", &opts)),
        ("get_widget_info", "widgetId")
    );
    assert_eq!(
        missing_parameter(widgets.get_widget_document("W-1", "", &opts)),
        ("get_widget_document", "documentId")
    );
    assert_eq!(
        missing_parameter(widgets.update_widget_note("\t", &Note::new("x"), &opts)),
        ("update_widget_note", "widgetId")
    );
    assert_eq!(
        missing_parameter(widgets.get_widget_views(
            " ",
            &WidgetViewInfo::new(WidgetViewName::All),
            &opts
        )),
        ("get_widget_views", "widgetId")
    );
    assert_eq!(
        missing_parameter(client.agreements().get_agreement_form_data("", &opts)),
        ("get_agreement_form_data", "agreementId")
    );
    assert_eq!(
        missing_parameter(client.webhooks().delete_webhook("", Some("\"1\""), &opts)),
        ("delete_webhook", "webhookId")
    );

    assert_eq!(client.transport().calls(), 0);
}

#[test]
fn every_required_parameter_is_checked_before_io() {
    let opts = RequestOptions::new();
    for (operation, parameter, call) in BLANKS {
        let client = ok_client();
        assert_eq!(
            missing_parameter(call(&client, &opts)),
            (*operation, *parameter),
            "{operation} without {parameter}"
        );
        assert_eq!(client.transport().calls(), 0, "{operation} reached the transport");
    }
}

#[test]
fn if_match_is_checked_before_path_parameters() {
    let client = ok_client();
    let opts = RequestOptions::new();

    let err = client
        .widgets()
        .update_widget_state("", "", &WidgetStateInfo::new(WidgetState::Active), &opts);
    assert_eq!(missing_parameter(err), ("update_widget_state", "If-Match"));

    let err = client.agreements().update_agreement_state(
        "\"1\"",
        "",
        &AgreementStateInfo::new(AgreementState::InProcess),
        &opts,
    );
    assert_eq!(missing_parameter(err), ("update_agreement_state", "agreementId"));

    assert_eq!(client.transport().calls(), 0);
}

#[test]
fn null_body_counts_as_missing() {
    let client = ok_client();
    let no_body: Option<WidgetInfo> = None;
    let call = esign_core::Call::new(&esign_core::api::widgets::UPDATE_WIDGET)
        .if_match("\"1\"")
        .path("widgetId", "W-1")
        .body("widgetInfo", &no_body);

    let err = client.build_request(call).unwrap_err();
    match err {
        Error::Validation(e) => assert_eq!(e.parameter, "widgetInfo"),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn transport_failure_has_status_zero() {
    let client = SignClient::with_transport(BASE_URL, Recording::failing(TransportError::new("connection refused")));

    let err = client
        .widgets()
        .get_widget_note("W-1", &RequestOptions::new())
        .unwrap_err();

    assert_eq!(err.status(), Some(0));
    match err {
        Error::Api(e) => {
            assert!(e.is_transport_failure());
            assert!(e.body.is_none());
            assert_eq!(e.message, "Error calling get_widget_note: connection refused");
        }
        other => panic!("expected an api error, got {other:?}"),
    }
    assert_eq!(client.transport().calls(), 1, "no retry");
}

#[test]
fn unreadable_body_reports_the_received_status() {
    let client = SignClient::with_transport(
        BASE_URL,
        Recording::failing(TransportError::after_status(200, "body exceeds limit")),
    );

    let err = client
        .widgets()
        .get_widget_document("W-1", "D-1", &RequestOptions::new())
        .unwrap_err();

    assert_eq!(err.status(), Some(200));
    match err {
        Error::Api(e) => {
            assert!(e.is_transport_failure());
            assert!(e.body.is_none());
            assert_eq!(e.message, "Error calling get_widget_document: body exceeds limit");
        }
        other => panic!("expected an api error, got {other:?}"),
    }
}

#[test]
fn error_statuses_carry_body_and_envelope() {
    let body = r#"{"code":"INVALID_WIDGET_ID","message":"The widget id is invalid"}"#;
    let client = SignClient::with_transport(BASE_URL, Recording::replying(HttpResponse::new(404, body)));

    let err = client
        .widgets()
        .get_widget_note("W-404", &RequestOptions::new())
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    match err {
        Error::Api(e) => {
            assert_eq!(e.message, format!("Error calling get_widget_note: {body}"));
            assert_eq!(e.body.as_deref(), Some(body));
            let envelope = e.error_response().unwrap();
            assert_eq!(envelope.code.as_deref(), Some("INVALID_WIDGET_ID"));
            assert_eq!(envelope.message.as_deref(), Some("The widget id is invalid"));
        }
        other => panic!("expected an api error, got {other:?}"),
    }
}

#[test]
fn non_json_error_body_has_no_envelope() {
    let client = SignClient::with_transport(
        BASE_URL,
        Recording::replying(HttpResponse::new(502, "<html>bad gateway</html>")),
    );

    let err = client
        .widgets()
        .get_widget_form_data("W-1", &RequestOptions::new())
        .unwrap_err();
    match err {
        Error::Api(e) => {
            assert_eq!(e.status, 502);
            assert!(e.error_response().is_none());
        }
        other => panic!("expected an api error, got {other:?}"),
    }
}

#[test]
fn undecodable_success_body_is_a_deserialization_error() {
    let client = SignClient::with_transport(
        BASE_URL,
        Recording::replying(HttpResponse::new(200, "not json")),
    );

    let err = client
        .widgets()
        .get_widget_note("W-1", &RequestOptions::new())
        .unwrap_err();
    match err {
        Error::Deserialization { operation, .. } => assert_eq!(operation, "get_widget_note"),
        other => panic!("expected a deserialization error, got {other:?}"),
    }
}

#[test]
fn redirect_statuses_count_as_success() {
    let client = SignClient::with_transport(BASE_URL, Recording::replying(HttpResponse::new(302, "")));

    client
        .widgets()
        .update_widget_visibility("W-1", &VisibilityInfo::new(Visibility::Show), &RequestOptions::new())
        .unwrap();
}

#[test]
fn absent_query_values_are_omitted() {
    let client = SignClient::with_transport(
        BASE_URL,
        Recording::replying(HttpResponse::new(200, r#"{"userWidgetList":[]}"#)),
    );
    let opts = RequestOptions::new();

    client.widgets().get_widgets(&ListQuery::new(), &opts).unwrap();
    let request = client.transport().last();
    assert!(request.query.is_empty());
    assert_eq!(request.uri(), format!("{BASE_URL}/widgets"));

    client
        .widgets()
        .get_widgets(&ListQuery::new().page_size(20), &opts)
        .unwrap();
    let request = client.transport().last();
    assert_eq!(request.query, vec![("pageSize".to_string(), "20".to_string())]);
    assert_eq!(request.uri(), format!("{BASE_URL}/widgets?pageSize=20"));
}

#[test]
fn query_values_are_form_encoded() {
    let client = SignClient::with_transport(BASE_URL, Recording::replying(HttpResponse::new(200, "%PDF")));

    client
        .agreements()
        .get_agreement_combined_document(
            "A-1",
            &DocumentQuery::new().participant("a b&c"),
            &RequestOptions::new(),
        )
        .unwrap();
    let request = client.transport().last();
    assert_eq!(
        request.uri(),
        format!("{BASE_URL}/agreements/A-1/combinedDocument?participantId=a+b%26c")
    );
}

#[test]
fn shared_headers_are_attached() {
    let client = ok_client()
        .with_token(StaticToken::new("secret"))
        .with_user_agent("esign-tests/1.0");

    client
        .widgets()
        .get_widget_note(
            "W-1",
            &RequestOptions::new()
                .api_user("email:a@example.com")
                .on_behalf_of("email:b@example.com"),
        )
        .unwrap();

    let request = client.transport().last();
    assert_eq!(request.header("Authorization"), Some("Bearer secret"));
    assert_eq!(request.header("User-Agent"), Some("esign-tests/1.0"));
    assert_eq!(request.header("x-api-user"), Some("email:a@example.com"));
    assert_eq!(request.header("x-on-behalf-of-user"), Some("email:b@example.com"));
    assert_eq!(request.header("Accept"), Some("application/json"));
    assert_eq!(request.header("Content-Type"), None);
}

#[test]
fn token_provider_is_asked_on_every_request() {
    let counter = Arc::new(AtomicUsize::new(0));
    let tokens = Arc::clone(&counter);
    let client = ok_client().with_token(move || {
        let n = tokens.fetch_add(1, Ordering::SeqCst);
        format!("token-{n}")
    });

    let opts = RequestOptions::new();
    client.widgets().get_widget_note("W-1", &opts).unwrap();
    assert_eq!(client.transport().last().header("Authorization"), Some("Bearer token-0"));
    client.widgets().get_widget_note("W-1", &opts).unwrap();
    assert_eq!(client.transport().last().header("Authorization"), Some("Bearer token-1"));
}

#[test]
fn one_client_serves_many_threads() {
    let client = SignClient::with_transport(
        BASE_URL,
        Recording::replying(HttpResponse::new(200, r#"{"value":"shared"}"#)),
    );

    std::thread::scope(|s| {
        for i in 0..8 {
            let client = &client;
            s.spawn(move || {
                let note = client
                    .widgets()
                    .get_widget_note(&format!("W-{i}"), &RequestOptions::new())
                    .unwrap();
                assert_eq!(note.value.as_deref(), Some("shared"));
            });
        }
    });

    assert_eq!(client.transport().calls(), 8);
    let mut urls: Vec<String> = client
        .transport()
        .seen
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.url.clone())
        .collect();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), 8);
}
