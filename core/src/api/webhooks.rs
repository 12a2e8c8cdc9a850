//! Webhooks: subscriptions that push event notifications to a URL.

use crate::client::{Conditional, SignClient};
use crate::error::Result;
use crate::http::{HttpMethod, HEADER_IF_MATCH};
use crate::models::{
    UserWebhooks, WebhookCreationResponse, WebhookInfo, WebhookResourceType, WebhookScope,
    WebhookStateInfo,
};
use crate::operation::{Call, Operation, RequestOptions};
use crate::transport::Transport;

pub const GET_WEBHOOKS: Operation = Operation::new("get_webhooks", HttpMethod::Get, "/webhooks");
pub const CREATE_WEBHOOK: Operation = Operation::new("create_webhook", HttpMethod::Post, "/webhooks");
pub const GET_WEBHOOK_INFO: Operation =
    Operation::new("get_webhook_info", HttpMethod::Get, "/webhooks/{webhookId}");
pub const UPDATE_WEBHOOK: Operation =
    Operation::new("update_webhook", HttpMethod::Put, "/webhooks/{webhookId}");
pub const UPDATE_WEBHOOK_STATE: Operation = Operation::new(
    "update_webhook_state",
    HttpMethod::Put,
    "/webhooks/{webhookId}/state",
);
pub const DELETE_WEBHOOK: Operation =
    Operation::new("delete_webhook", HttpMethod::Delete, "/webhooks/{webhookId}");

/// Filters for `get_webhooks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookListQuery {
    pub show_inactive: Option<bool>,
    pub scope: Option<WebhookScope>,
    pub resource_type: Option<WebhookResourceType>,
    pub cursor: Option<String>,
    pub page_size: Option<u32>,
}

impl WebhookListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include webhooks in the INACTIVE state.
    pub fn show_inactive(mut self, show: bool) -> Self {
        self.show_inactive = Some(show);
        self
    }

    pub fn scope(mut self, scope: WebhookScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn resource_type(mut self, resource_type: WebhookResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }
}

#[derive(Debug)]
pub struct WebhooksApi<'a, T> {
    client: &'a SignClient<T>,
}

impl<'a, T: Transport> WebhooksApi<'a, T> {
    pub fn new(client: &'a SignClient<T>) -> Self {
        Self { client }
    }

    pub fn get_webhooks(
        &self,
        query: &WebhookListQuery,
        options: &RequestOptions,
    ) -> Result<UserWebhooks> {
        self.client.execute_json(
            Call::new(&GET_WEBHOOKS)
                .query("showInActiveWebhooks", query.show_inactive)
                .query("scope", query.scope.as_ref().map(WebhookScope::as_str))
                .query("resourceType", query.resource_type.as_ref().map(WebhookResourceType::as_str))
                .query("cursor", query.cursor.as_deref())
                .query("pageSize", query.page_size)
                .identity(options),
        )
    }

    pub fn create_webhook(
        &self,
        webhook_info: &WebhookInfo,
        options: &RequestOptions,
    ) -> Result<WebhookCreationResponse> {
        self.client.execute_json(
            Call::new(&CREATE_WEBHOOK)
                .body("webhookInfo", webhook_info)
                .identity(options),
        )
    }

    pub fn get_webhook_info(
        &self,
        webhook_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<WebhookInfo>> {
        self.client.execute_json_conditional(
            Call::new(&GET_WEBHOOK_INFO)
                .path("webhookId", webhook_id)
                .conditional(options),
        )
    }

    pub fn update_webhook(
        &self,
        if_match: &str,
        webhook_id: &str,
        webhook_info: &WebhookInfo,
        options: &RequestOptions,
    ) -> Result<()> {
        self.client.execute_empty(
            Call::new(&UPDATE_WEBHOOK)
                .if_match(if_match)
                .path("webhookId", webhook_id)
                .body("webhookInfo", webhook_info)
                .identity(options),
        )
    }

    pub fn update_webhook_state(
        &self,
        if_match: &str,
        webhook_id: &str,
        webhook_state_info: &WebhookStateInfo,
        options: &RequestOptions,
    ) -> Result<()> {
        self.client.execute_empty(
            Call::new(&UPDATE_WEBHOOK_STATE)
                .if_match(if_match)
                .path("webhookId", webhook_id)
                .body("webhookStateInfo", webhook_state_info)
                .identity(options),
        )
    }

    /// `if_match`, when given, makes the delete conditional on the ETag.
    pub fn delete_webhook(
        &self,
        webhook_id: &str,
        if_match: Option<&str>,
        options: &RequestOptions,
    ) -> Result<()> {
        self.client.execute_empty(
            Call::new(&DELETE_WEBHOOK)
                .path("webhookId", webhook_id)
                .header(HEADER_IF_MATCH, if_match)
                .identity(options),
        )
    }
}
