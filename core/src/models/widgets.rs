//! Widget payloads.
//!
//! A widget is a reusable, publicly hosted signing form. Each signer who
//! fills it in produces a new agreement, which is why widgets list
//! agreements of their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{
    AgreementStatus, CcInfo, DetailedParticipantInfo, Document, FileInfo, PageInfo,
    ParticipantRole, ParticipantSetMemberInfo, SupportingDocument, VaultingInfo,
};

/// Lifecycle state of a widget.
///
/// Allowed transitions: DRAFT → AUTHORING → ACTIVE, ACTIVE ↔ INACTIVE,
/// DRAFT → CANCELLED.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetState {
    Draft,
    Authoring,
    Active,
    Inactive,
    Cancelled,
    /// A value this client does not know yet, kept as sent.
    #[serde(untagged)]
    Other(String),
}

/// Which hosted page a widget view URL opens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetViewName {
    All,
    Authoring,
    Document,
    Manage,
    #[serde(untagged)]
    Other(String),
}

/// The participants who fill in the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetParticipantSetInfo {
    pub member_infos: Vec<ParticipantSetMemberInfo>,
    pub role: ParticipantRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_message: Option<String>,
}

/// Redirect shown after completion or after an authentication failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRedirectionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deframe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
}

/// Full widget description, used both to create a widget and as the result
/// of `get_widget_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetCreationInfoV6 {
    pub name: String,
    pub file_infos: Vec<FileInfo>,
    pub state: WidgetState,
    pub widget_participant_set_info: WidgetParticipantSetInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_participant_sets_info: Option<Vec<WidgetParticipantSetInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_failure_info: Option<WidgetRedirectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_info: Option<WidgetRedirectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccs: Option<Vec<CcInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Read-only; reported by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WidgetState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaulting_info: Option<VaultingInfo>,
}

impl WidgetCreationInfoV6 {
    pub fn new(
        name: impl Into<String>,
        file_infos: Vec<FileInfo>,
        state: WidgetState,
        widget_participant_set_info: WidgetParticipantSetInfo,
    ) -> Self {
        Self {
            name: name.into(),
            file_infos,
            state,
            widget_participant_set_info,
            id: None,
            additional_participant_sets_info: None,
            auth_failure_info: None,
            completion_info: None,
            ccs: None,
            created_date: None,
            creator_email: None,
            group_id: None,
            locale: None,
            owner_id: None,
            status: None,
            vaulting_info: None,
        }
    }
}

/// Payload of `update_widget`. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<WidgetState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_participant_set_info: Option<WidgetParticipantSetInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_participant_sets_info: Option<Vec<WidgetParticipantSetInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_failure_info: Option<WidgetRedirectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_info: Option<WidgetRedirectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccs: Option<Vec<CcInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaulting_info: Option<VaultingInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetCreationResponse {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedWidgetParticipantSetInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_infos: Option<Vec<DetailedParticipantInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ParticipantRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetMembersInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_participant_set: Option<DetailedWidgetParticipantSetInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_participant_sets: Option<Vec<DetailedWidgetParticipantSetInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_info: Option<DetailedParticipantInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// CREATED, MODIFIED, ENABLED, DISABLED, AUTO_CANCELLED...
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acting_user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acting_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetEventList {
    pub events: Vec<WidgetEvent>,
}

/// An agreement created by someone filling in the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetAgreement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgreementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetAgreements {
    pub user_agreement_list: Vec<WidgetAgreement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDocuments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_documents: Option<Vec<SupportingDocument>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonViewConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_login_user: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_chrome: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Request body of `get_widget_views`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetViewInfo {
    pub name: WidgetViewName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_view_configuration: Option<CommonViewConfiguration>,
}

impl WidgetViewInfo {
    pub fn new(name: WidgetViewName) -> Self {
        Self {
            name,
            common_view_configuration: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedded_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetViews {
    pub widget_view_list: Vec<WidgetView>,
}

/// One entry of the caller's widget listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWidget {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WidgetState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Embed snippet for the hosted form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub javascript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWidgets {
    pub user_widget_list: Vec<UserWidget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

/// Message and redirect shown to visitors of an inactive widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInactiveInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetStateInfo {
    pub state: WidgetState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_inactive_info: Option<WidgetInactiveInfo>,
}

impl WidgetStateInfo {
    pub fn new(state: WidgetState) -> Self {
        Self {
            state,
            widget_inactive_info: None,
        }
    }
}
