//! Notifications the service pushes to a subscribed webhook URL.
//!
//! These are inbound payloads: the subscriber's HTTP handler receives the
//! raw body and decodes it with [`parse_webhook_event`]. Before any event is
//! delivered the service verifies the URL with a GET carrying
//! `X-AdobeSign-ClientId`; the subscriber must echo that value back, which
//! [`intent_verification_header`] produces.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{
    AgreementStatus, DetailedParticipantSetInfo, Document, ExternalId, PostSignOption,
    SupportingDocument, VaultingInfo,
};
use super::webhooks::{WebhookScope, WebhookUrlInfo};
use crate::error::{Error, Result};

/// Header the service sends, and expects echoed, during intent verification.
pub const HEADER_CLIENT_ID: &str = "X-AdobeSign-ClientId";

const PARSE_OPERATION: &str = "parse_webhook_event";

/// One notification delivered to a webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_notification_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url_info: Option<WebhookUrlInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_scope: Option<WebhookScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_notification_applicable_users: Option<Vec<ApplicableUser>>,
    /// AGREEMENT_CREATED, AGREEMENT_ACTION_COMPLETED, AGREEMENT_WORKFLOW_COMPLETED...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_resource_parent_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_resource_parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acting_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acting_user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acting_user_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiating_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiating_user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<AgreementEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicableUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_applicable: Option<bool>,
}

/// Snapshot of the agreement an event concerns. How much of it is filled in
/// depends on the webhook's conditional parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgreementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccs: Option<Vec<EventCc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_visibility_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_sign_option: Option<PostSignOption>,
    /// Sent as a string in notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_reminder_delay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaulting_info: Option<VaultingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_sets_info: Option<ParticipantSetsInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_info: Option<DocumentsInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_document_info: Option<SignedDocumentInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_pages: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Device an offline or mobile signature was captured on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<DeviceLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSetsInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_sets: Option<Vec<DetailedParticipantSetInfo>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_documents: Option<Vec<SupportingDocument>>,
}

/// The signed PDF, base64-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedDocumentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl SignedDocumentInfo {
    /// Decoded document bytes, or `None` when the notification carried none.
    pub fn decode(&self) -> Option<std::result::Result<Vec<u8>, base64::DecodeError>> {
        self.document.as_deref().map(|encoded| STANDARD.decode(encoded.trim()))
    }
}

/// Decodes the body of a pushed notification.
pub fn parse_webhook_event(body: &[u8]) -> Result<WebhookEvent> {
    serde_json::from_slice(body).map_err(|source| Error::Deserialization {
        operation: PARSE_OPERATION,
        source,
    })
}

/// Header a subscriber returns to confirm it owns the webhook URL.
pub fn intent_verification_header(client_id: &str) -> (&'static str, String) {
    (HEADER_CLIENT_ID, client_id.to_string())
}
