//! Widgets: reusable web forms that spawn one agreement per signer.

use crate::api::{DocumentQuery, ListQuery};
use crate::client::{Conditional, SignClient};
use crate::error::Result;
use crate::http::{HttpMethod, MEDIA_TYPE_PDF};
use crate::models::{
    DetailedWidgetParticipantSetInfo, Note, UserWidgets, VisibilityInfo, WidgetAgreements,
    WidgetCreationInfoV6, WidgetCreationResponse, WidgetDocuments, WidgetEventList, WidgetInfo,
    WidgetMembersInfo, WidgetStateInfo, WidgetViewInfo, WidgetViews,
};
use crate::operation::{Call, Operation, RequestOptions};
use crate::transport::Transport;

pub const CREATE_WIDGET: Operation = Operation::new("create_widget", HttpMethod::Post, "/widgets");
pub const GET_WIDGETS: Operation = Operation::new("get_widgets", HttpMethod::Get, "/widgets");
pub const GET_WIDGET_INFO: Operation =
    Operation::new("get_widget_info", HttpMethod::Get, "/widgets/{widgetId}");
pub const UPDATE_WIDGET: Operation =
    Operation::new("update_widget", HttpMethod::Put, "/widgets/{widgetId}");
pub const GET_ALL_WIDGET_MEMBERS: Operation = Operation::new(
    "get_all_widget_members",
    HttpMethod::Get,
    "/widgets/{widgetId}/members",
);
pub const GET_PARTICIPANT_SET: Operation = Operation::new(
    "get_participant_set",
    HttpMethod::Get,
    "/widgets/{widgetId}/members/participantSets/{participantSetId}",
);
pub const GET_EVENTS: Operation =
    Operation::new("get_events", HttpMethod::Get, "/widgets/{widgetId}/events");
pub const GET_WIDGET_AGREEMENTS: Operation = Operation::new(
    "get_widget_agreements",
    HttpMethod::Get,
    "/widgets/{widgetId}/agreements",
);
pub const GET_WIDGET_AUDIT_TRAIL: Operation = Operation::new(
    "get_widget_audit_trail",
    HttpMethod::Get,
    "/widgets/{widgetId}/auditTrail",
)
.accepting(MEDIA_TYPE_PDF);
pub const GET_WIDGET_COMBINED_DOCUMENT: Operation = Operation::new(
    "get_widget_combined_document",
    HttpMethod::Get,
    "/widgets/{widgetId}/combinedDocument",
)
.accepting(MEDIA_TYPE_PDF);
pub const GET_WIDGET_DOCUMENTS: Operation = Operation::new(
    "get_widget_documents",
    HttpMethod::Get,
    "/widgets/{widgetId}/documents",
);
pub const GET_WIDGET_DOCUMENT: Operation = Operation::new(
    "get_widget_document",
    HttpMethod::Get,
    "/widgets/{widgetId}/documents/{documentId}",
)
.accepting(MEDIA_TYPE_PDF);
/// The service answers with CSV content but negotiates on the PDF media type.
pub const GET_WIDGET_FORM_DATA: Operation = Operation::new(
    "get_widget_form_data",
    HttpMethod::Get,
    "/widgets/{widgetId}/formData",
)
.accepting(MEDIA_TYPE_PDF);
pub const GET_WIDGET_NOTE: Operation =
    Operation::new("get_widget_note", HttpMethod::Get, "/widgets/{widgetId}/me/note");
pub const UPDATE_WIDGET_NOTE: Operation =
    Operation::new("update_widget_note", HttpMethod::Put, "/widgets/{widgetId}/me/note");
pub const GET_WIDGET_VIEWS: Operation =
    Operation::new("get_widget_views", HttpMethod::Post, "/widgets/{widgetId}/views");
pub const UPDATE_WIDGET_STATE: Operation =
    Operation::new("update_widget_state", HttpMethod::Put, "/widgets/{widgetId}/state");
pub const UPDATE_WIDGET_VISIBILITY: Operation = Operation::new(
    "update_widget_visibility",
    HttpMethod::Put,
    "/widgets/{widgetId}/me/visibility",
);

/// Operations on `/widgets`.
#[derive(Debug)]
pub struct WidgetsApi<'a, T> {
    client: &'a SignClient<T>,
}

impl<'a, T: Transport> WidgetsApi<'a, T> {
    pub fn new(client: &'a SignClient<T>) -> Self {
        Self { client }
    }

    pub fn create_widget(
        &self,
        widget_info: &WidgetCreationInfoV6,
        options: &RequestOptions,
    ) -> Result<WidgetCreationResponse> {
        self.client.execute_json(
            Call::new(&CREATE_WIDGET)
                .body("widgetInfo", widget_info)
                .identity(options),
        )
    }

    /// Widgets visible to the caller, one page at a time.
    pub fn get_widgets(&self, query: &ListQuery, options: &RequestOptions) -> Result<UserWidgets> {
        self.client.execute_json(
            Call::new(&GET_WIDGETS)
                .query("showHiddenWidgets", query.show_hidden)
                .query("cursor", query.cursor.as_deref())
                .query("pageSize", query.page_size)
                .identity(options),
        )
    }

    pub fn get_widget_info(
        &self,
        widget_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<WidgetCreationInfoV6>> {
        self.client.execute_json_conditional(
            Call::new(&GET_WIDGET_INFO)
                .path("widgetId", widget_id)
                .conditional(options),
        )
    }

    /// Replaces the widget's editable fields. `if_match` must be the ETag of
    /// the version being replaced.
    pub fn update_widget(
        &self,
        if_match: &str,
        widget_id: &str,
        widget_info: &WidgetInfo,
        options: &RequestOptions,
    ) -> Result<()> {
        self.client.execute_empty(
            Call::new(&UPDATE_WIDGET)
                .if_match(if_match)
                .path("widgetId", widget_id)
                .body("widgetInfo", widget_info)
                .identity(options),
        )
    }

    pub fn get_all_widget_members(
        &self,
        widget_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<WidgetMembersInfo>> {
        self.client.execute_json_conditional(
            Call::new(&GET_ALL_WIDGET_MEMBERS)
                .path("widgetId", widget_id)
                .conditional(options),
        )
    }

    pub fn get_participant_set(
        &self,
        widget_id: &str,
        participant_set_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<DetailedWidgetParticipantSetInfo>> {
        self.client.execute_json_conditional(
            Call::new(&GET_PARTICIPANT_SET)
                .path("widgetId", widget_id)
                .path("participantSetId", participant_set_id)
                .conditional(options),
        )
    }

    pub fn get_events(
        &self,
        widget_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<WidgetEventList>> {
        self.client.execute_json_conditional(
            Call::new(&GET_EVENTS)
                .path("widgetId", widget_id)
                .conditional(options),
        )
    }

    /// Agreements created from this widget.
    pub fn get_widget_agreements(
        &self,
        widget_id: &str,
        query: &ListQuery,
        options: &RequestOptions,
    ) -> Result<WidgetAgreements> {
        self.client.execute_json(
            Call::new(&GET_WIDGET_AGREEMENTS)
                .path("widgetId", widget_id)
                .query("showHiddenAgreements", query.show_hidden)
                .query("cursor", query.cursor.as_deref())
                .query("pageSize", query.page_size)
                .identity(options),
        )
    }

    /// Audit report as PDF bytes.
    pub fn get_widget_audit_trail(
        &self,
        widget_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<Vec<u8>>> {
        self.client.execute_bytes_conditional(
            Call::new(&GET_WIDGET_AUDIT_TRAIL)
                .path("widgetId", widget_id)
                .conditional(options),
        )
    }

    /// All of the widget's documents merged into one PDF.
    pub fn get_widget_combined_document(
        &self,
        widget_id: &str,
        query: &DocumentQuery,
        options: &RequestOptions,
    ) -> Result<Conditional<Vec<u8>>> {
        self.client.execute_bytes_conditional(
            Call::new(&GET_WIDGET_COMBINED_DOCUMENT)
                .path("widgetId", widget_id)
                .query("versionId", query.version_id.as_deref())
                .query("participantId", query.participant_id.as_deref())
                .query("attachAuditReport", query.attach_audit_report)
                .conditional(options),
        )
    }

    pub fn get_widget_documents(
        &self,
        widget_id: &str,
        query: &DocumentQuery,
        options: &RequestOptions,
    ) -> Result<Conditional<WidgetDocuments>> {
        self.client.execute_json_conditional(
            Call::new(&GET_WIDGET_DOCUMENTS)
                .path("widgetId", widget_id)
                .query("versionId", query.version_id.as_deref())
                .query("participantId", query.participant_id.as_deref())
                .conditional(options),
        )
    }

    /// One document's file stream.
    pub fn get_widget_document(
        &self,
        widget_id: &str,
        document_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<Vec<u8>>> {
        self.client.execute_bytes_conditional(
            Call::new(&GET_WIDGET_DOCUMENT)
                .path("widgetId", widget_id)
                .path("documentId", document_id)
                .conditional(options),
        )
    }

    /// Data entered by the widget's signers, as raw bytes.
    pub fn get_widget_form_data(&self, widget_id: &str, options: &RequestOptions) -> Result<Vec<u8>> {
        self.client.execute_bytes(
            Call::new(&GET_WIDGET_FORM_DATA)
                .path("widgetId", widget_id)
                .identity(options),
        )
    }

    pub fn get_widget_note(&self, widget_id: &str, options: &RequestOptions) -> Result<Note> {
        self.client.execute_json(
            Call::new(&GET_WIDGET_NOTE)
                .path("widgetId", widget_id)
                .identity(options),
        )
    }

    pub fn update_widget_note(
        &self,
        widget_id: &str,
        note: &Note,
        options: &RequestOptions,
    ) -> Result<()> {
        self.client.execute_empty(
            Call::new(&UPDATE_WIDGET_NOTE)
                .path("widgetId", widget_id)
                .body("note", note)
                .identity(options),
        )
    }

    /// URLs for the hosted widget pages.
    pub fn get_widget_views(
        &self,
        widget_id: &str,
        widget_view_info: &WidgetViewInfo,
        options: &RequestOptions,
    ) -> Result<WidgetViews> {
        self.client.execute_json(
            Call::new(&GET_WIDGET_VIEWS)
                .path("widgetId", widget_id)
                .body("widgetViewInfo", widget_view_info)
                .identity(options),
        )
    }

    pub fn update_widget_state(
        &self,
        if_match: &str,
        widget_id: &str,
        widget_state_info: &WidgetStateInfo,
        options: &RequestOptions,
    ) -> Result<()> {
        self.client.execute_empty(
            Call::new(&UPDATE_WIDGET_STATE)
                .if_match(if_match)
                .path("widgetId", widget_id)
                .body("widgetStateInfo", widget_state_info)
                .identity(options),
        )
    }

    /// Hides or shows the widget in the caller's own listing.
    pub fn update_widget_visibility(
        &self,
        widget_id: &str,
        visibility_info: &VisibilityInfo,
        options: &RequestOptions,
    ) -> Result<()> {
        self.client.execute_empty(
            Call::new(&UPDATE_WIDGET_VISIBILITY)
                .path("widgetId", widget_id)
                .body("visibilityInfo", visibility_info)
                .identity(options),
        )
    }
}
