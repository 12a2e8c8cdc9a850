//! Webhook subscription payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::PageInfo;

/// What a webhook listens to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebhookScope {
    Account,
    Group,
    User,
    Resource,
    /// A value this client does not know yet, kept as sent.
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebhookState {
    Active,
    Inactive,
    #[serde(untagged)]
    Other(String),
}

/// Kind of resource a `RESOURCE` scoped webhook is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebhookResourceType {
    Agreement,
    Widget,
    Megasign,
    LibraryDocument,
    #[serde(untagged)]
    Other(String),
}

impl WebhookResourceType {
    /// Wire form, for use as a query parameter.
    pub fn as_str(&self) -> &str {
        match self {
            WebhookResourceType::Agreement => "AGREEMENT",
            WebhookResourceType::Widget => "WIDGET",
            WebhookResourceType::Megasign => "MEGASIGN",
            WebhookResourceType::LibraryDocument => "LIBRARY_DOCUMENT",
            WebhookResourceType::Other(raw) => raw,
        }
    }
}

impl WebhookScope {
    pub fn as_str(&self) -> &str {
        match self {
            WebhookScope::Account => "ACCOUNT",
            WebhookScope::Group => "GROUP",
            WebhookScope::User => "USER",
            WebhookScope::Resource => "RESOURCE",
            WebhookScope::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookUrlInfo {
    pub url: String,
}

/// Which parts of an agreement snapshot a notification includes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAgreementEvents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_detailed_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_documents_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_participants_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_signed_documents: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConditionalParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_agreement_events: Option<WebhookAgreementEvents>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookInfo {
    pub name: String,
    pub scope: WebhookScope,
    pub state: WebhookState,
    /// AGREEMENT_ALL, AGREEMENT_CREATED, AGREEMENT_WORKFLOW_COMPLETED...
    pub webhook_subscription_events: Vec<String>,
    pub webhook_url_info: WebhookUrlInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_notification_emails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<WebhookResourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_conditional_params: Option<WebhookConditionalParams>,
}

impl WebhookInfo {
    pub fn new(
        name: impl Into<String>,
        scope: WebhookScope,
        url: impl Into<String>,
        webhook_subscription_events: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            scope,
            state: WebhookState::Active,
            webhook_subscription_events,
            webhook_url_info: WebhookUrlInfo { url: url.into() },
            id: None,
            application_display_name: None,
            application_name: None,
            created: None,
            last_modified: None,
            problem_notification_emails: None,
            resource_id: None,
            resource_type: None,
            status: None,
            webhook_conditional_params: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreationResponse {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWebhook {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<WebhookScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<WebhookState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<WebhookResourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url_info: Option<WebhookUrlInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWebhooks {
    pub user_webhook_list: Vec<UserWebhook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookStateInfo {
    pub state: WebhookState,
}
