//! Synchronous client for the e-signature REST API (agreements, widgets,
//! library documents, webhooks).
//!
//! # Overview
//! Every REST operation is declared once as a `const Operation` and run
//! through one executor, `SignClient`, which validates required parameters,
//! resolves the path template, performs exactly one HTTP exchange through a
//! `Transport`, and decodes the response or turns it into a typed error.
//!
//! # Design
//! - `SignClient` holds only the base URL, a credential source and the
//!   transport. It has no per-call state, so one client can serve many
//!   threads.
//! - Request building and response parsing are plain functions over
//!   `HttpRequest` / `HttpResponse` values; the network sits behind the
//!   `Transport` trait (`UreqTransport` by default).
//! - Payloads live in `models` and mirror the service's JSON; optional
//!   properties are `Option`s and are never sent when `None`.
//! - No retries: a failed call reports once and leaves the policy to the
//!   caller.
//!
//! ```no_run
//! use esign_core::{ClientConfig, RequestOptions, SignClient};
//!
//! # fn main() -> esign_core::Result<()> {
//! let client = SignClient::from_config(&ClientConfig::from_env()?)?;
//! let widget = client
//!     .widgets()
//!     .get_widget_info("CBJCHBCAABAA", &RequestOptions::new())?;
//! println!("etag: {:?}", widget.etag());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod operation;
pub mod transport;

pub use api::{
    AgreementsApi, DocumentQuery, LibraryDocumentsApi, ListQuery, WebhookListQuery, WebhooksApi,
    WidgetsApi,
};
pub use auth::{StaticToken, TokenProvider};
pub use client::{Conditional, SignClient};
pub use config::ClientConfig;
pub use error::{ApiError, ClientValidationError, Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use operation::{Call, Operation, RequestOptions};
pub use transport::{Transport, TransportError, UreqTransport};
