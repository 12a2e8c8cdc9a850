//! Agreement payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{
    AgreementStatus, CcInfo, Document, ExternalId, FileInfo, PageInfo, ParticipantSetInfo,
    PostSignOption, SupportingDocument, VaultingInfo,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureType {
    Esign,
    Written,
    /// A value this client does not know yet, kept as sent.
    #[serde(untagged)]
    Other(String),
}

/// State an agreement is created in, or moved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgreementState {
    Authoring,
    Draft,
    InProcess,
    Cancelled,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementInfo {
    pub name: String,
    pub participant_sets_info: Vec<ParticipantSetInfo>,
    pub signature_type: SignatureType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<AgreementState>,
    /// Read-only; reported by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgreementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_infos: Option<Vec<FileInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccs: Option<Vec<CcInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<ExternalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_reminder_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_sign_option: Option<PostSignOption>,
    /// DAILY_UNTIL_SIGNED, WEEKLY_UNTIL_SIGNED, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaulting_info: Option<VaultingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_visibility_enabled: Option<bool>,
}

impl AgreementInfo {
    pub fn new(
        name: impl Into<String>,
        participant_sets_info: Vec<ParticipantSetInfo>,
        signature_type: SignatureType,
    ) -> Self {
        Self {
            name: name.into(),
            participant_sets_info,
            signature_type,
            id: None,
            state: None,
            status: None,
            file_infos: None,
            ccs: None,
            created_date: None,
            expiration_time: None,
            external_id: None,
            first_reminder_delay: None,
            group_id: None,
            locale: None,
            message: None,
            post_sign_option: None,
            reminder_frequency: None,
            sender_email: None,
            vaulting_info: None,
            workflow_id: None,
            document_visibility_enabled: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementCreationResponse {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAgreement {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgreementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esign: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// AGREEMENT, MEGASIGN_CHILD, WIDGET_INSTANCE
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub agreement_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAgreements {
    pub user_agreement_list: Vec<UserAgreement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementCancellationInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_others: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementStateInfo {
    pub state: AgreementState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement_cancellation_info: Option<AgreementCancellationInfo>,
}

impl AgreementStateInfo {
    pub fn new(state: AgreementState) -> Self {
        Self {
            state,
            agreement_cancellation_info: None,
        }
    }

    pub fn cancel(comment: impl Into<String>, notify_others: bool) -> Self {
        Self {
            state: AgreementState::Cancelled,
            agreement_cancellation_info: Some(AgreementCancellationInfo {
                comment: Some(comment.into()),
                notify_others: Some(notify_others),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementDocuments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Document>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_documents: Option<Vec<SupportingDocument>>,
}
