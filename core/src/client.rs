//! The shared executor every resource wrapper delegates to.
//!
//! # Design
//! `SignClient` holds the base URL, the credential source and a `Transport`.
//! It carries no mutable state between calls. Each call goes through the same
//! three steps, all of which are public so they can be driven separately:
//! `build_request` (validate + resolve), `Transport::execute` (exactly one
//! attempt), and one of the `parse_*` functions (status check + decode).

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{AgreementsApi, LibraryDocumentsApi, WebhooksApi, WidgetsApi};
use crate::auth::{bearer, StaticToken, TokenProvider};
use crate::config::{ClientConfig, DEFAULT_USER_AGENT};
use crate::error::{ApiError, Error, Result};
use crate::http::{HttpRequest, HttpResponse, HEADER_AUTHORIZATION, HEADER_USER_AGENT};
use crate::operation::{Call, Operation};
use crate::transport::{Transport, UreqTransport};

const NOT_MODIFIED: u16 = 304;

/// Result of an operation that accepted `If-None-Match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditional<T> {
    Modified { value: T, etag: Option<String> },
    /// HTTP 304: the resource still matches the ETag that was sent.
    NotModified { etag: Option<String> },
}

impl<T> Conditional<T> {
    pub fn etag(&self) -> Option<&str> {
        match self {
            Conditional::Modified { etag, .. } | Conditional::NotModified { etag } => etag.as_deref(),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Conditional::Modified { value, .. } => Some(value),
            Conditional::NotModified { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Conditional::Modified { value, .. } => Some(value),
            Conditional::NotModified { .. } => None,
        }
    }

    pub fn is_modified(&self) -> bool {
        matches!(self, Conditional::Modified { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Conditional<U> {
        match self {
            Conditional::Modified { value, etag } => Conditional::Modified {
                value: f(value),
                etag,
            },
            Conditional::NotModified { etag } => Conditional::NotModified { etag },
        }
    }
}

/// Synchronous client for the e-signature REST API.
///
/// Safe to share across threads whenever the transport is; wrappers borrow
/// it immutably.
#[derive(Clone)]
pub struct SignClient<T = UreqTransport> {
    base_url: String,
    user_agent: String,
    token: Option<Arc<dyn TokenProvider>>,
    transport: T,
}

impl<T: fmt::Debug> fmt::Debug for SignClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignClient")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("authenticated", &self.token.is_some())
            .field("transport", &self.transport)
            .finish()
    }
}

impl SignClient<UreqTransport> {
    /// Client with the default blocking transport.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut client = Self::with_transport(&config.base_url, UreqTransport::new(config.timeout()))
            .with_user_agent(&config.user_agent);
        if let Some(token) = &config.access_token {
            client = client.with_token(StaticToken::new(token.clone()));
        }
        Ok(client)
    }
}

impl<T: Transport> SignClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: None,
            transport,
        }
    }

    pub fn with_token(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.token = Some(Arc::new(provider));
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn widgets(&self) -> WidgetsApi<'_, T> {
        WidgetsApi::new(self)
    }

    pub fn agreements(&self) -> AgreementsApi<'_, T> {
        AgreementsApi::new(self)
    }

    pub fn library_documents(&self) -> LibraryDocumentsApi<'_, T> {
        LibraryDocumentsApi::new(self)
    }

    pub fn webhooks(&self) -> WebhooksApi<'_, T> {
        WebhooksApi::new(self)
    }

    /// Validates and resolves `call`, adding client-wide headers.
    pub fn build_request(&self, call: Call<'_>) -> Result<HttpRequest> {
        let mut request = call.build(&self.base_url)?;
        request
            .headers
            .push((HEADER_USER_AGENT.to_string(), self.user_agent.clone()));
        if let Some(token) = &self.token {
            request
                .headers
                .push((HEADER_AUTHORIZATION.to_string(), bearer(token.as_ref())));
        }
        Ok(request)
    }

    /// Decodes a JSON body into `R`.
    pub fn execute_json<R: DeserializeOwned>(&self, call: Call<'_>) -> Result<R> {
        let (operation, response) = self.dispatch(call)?;
        parse_json(operation, response)
    }

    /// Like `execute_json`, but 304 becomes `NotModified` and the `ETag`
    /// header is kept.
    pub fn execute_json_conditional<R: DeserializeOwned>(
        &self,
        call: Call<'_>,
    ) -> Result<Conditional<R>> {
        let (operation, response) = self.dispatch(call)?;
        parse_conditional(operation, response, parse_json)
    }

    /// Returns the raw body, for document and report endpoints.
    pub fn execute_bytes(&self, call: Call<'_>) -> Result<Vec<u8>> {
        let (operation, response) = self.dispatch(call)?;
        parse_bytes(operation, response)
    }

    pub fn execute_bytes_conditional(&self, call: Call<'_>) -> Result<Conditional<Vec<u8>>> {
        let (operation, response) = self.dispatch(call)?;
        parse_conditional(operation, response, parse_bytes)
    }

    /// For operations without a result payload.
    pub fn execute_empty(&self, call: Call<'_>) -> Result<()> {
        let (operation, response) = self.dispatch(call)?;
        parse_empty(operation, response)
    }

    fn dispatch(&self, call: Call<'_>) -> Result<(&'static str, HttpResponse)> {
        let operation: &Operation = call.operation();
        let name = operation.name;
        let request = self.build_request(call)?;

        debug!(
            operation = name,
            method = %request.method,
            url = %request.url,
            query = request.query.len(),
            "sending request"
        );

        match self.transport.execute(&request) {
            Ok(response) => {
                debug!(
                    operation = name,
                    status = response.status,
                    bytes = response.body.len(),
                    "received response"
                );
                Ok((name, response))
            }
            Err(e) => {
                let err = ApiError::transport(name, &e);
                warn!(operation = name, status = ?e.status(), error = %e, "transport failure");
                Err(err.into())
            }
        }
    }
}

/// Maps any status outside `[200, 400)` to an `ApiError`.
pub fn check_status(operation: &str, response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let err = ApiError::from_status(operation, response.status, response.body_text());
    warn!(operation, status = err.status, "request failed");
    Err(err)
}

pub fn parse_json<R: DeserializeOwned>(operation: &'static str, response: HttpResponse) -> Result<R> {
    check_status(operation, &response)?;
    serde_json::from_slice(&response.body).map_err(|source| Error::Deserialization { operation, source })
}

pub fn parse_bytes(operation: &'static str, response: HttpResponse) -> Result<Vec<u8>> {
    check_status(operation, &response)?;
    Ok(response.body)
}

pub fn parse_empty(operation: &'static str, response: HttpResponse) -> Result<()> {
    check_status(operation, &response)?;
    Ok(())
}

pub fn parse_conditional<R>(
    operation: &'static str,
    response: HttpResponse,
    decode: impl FnOnce(&'static str, HttpResponse) -> Result<R>,
) -> Result<Conditional<R>> {
    check_status(operation, &response)?;
    let etag = response.etag().map(str::to_string);
    if response.status == NOT_MODIFIED {
        return Ok(Conditional::NotModified { etag });
    }
    let value = decode(operation, response)?;
    Ok(Conditional::Modified { value, etag })
}
