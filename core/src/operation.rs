//! Declarative operation descriptors and the per-call parameter builder.
//!
//! # Design
//! Each REST operation is a `const Operation` naming its verb, path template
//! and the media type it accepts. A wrapper method binds parameters onto a
//! `Call` and hands it to `SignClient`; the call resolves into an
//! `HttpRequest` only after every required parameter has been checked, so a
//! validation failure never reaches the transport.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;

use crate::error::{ClientValidationError, Error, Result};
use crate::http::{
    HttpMethod, HttpRequest, HEADER_ACCEPT, HEADER_CONTENT_TYPE, HEADER_IF_MATCH,
    HEADER_IF_NONE_MATCH, HEADER_X_API_USER, HEADER_X_ON_BEHALF_OF_USER, MEDIA_TYPE_JSON,
};

/// Characters escaped inside a single path segment (RFC 3986 `pchar`
/// complement, plus `/` so a value can never split a segment).
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'[')
    .add(b']');

/// Placeholder that always resolves to `json`.
const FORMAT_PLACEHOLDER: &str = "format";

/// One REST operation: verb, path template and accepted media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub accept: &'static str,
}

impl Operation {
    pub const fn new(name: &'static str, method: HttpMethod, path: &'static str) -> Self {
        Self {
            name,
            method,
            path,
            accept: MEDIA_TYPE_JSON,
        }
    }

    pub const fn accepting(self, accept: &'static str) -> Self {
        Self { accept, ..self }
    }
}

/// Optional headers most operations accept.
///
/// `if_none_match` is only sent by operations that support conditional
/// retrieval; other operations ignore it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// `userid:{id}` or `email:{email}` of the caller when using an account
    /// or group token.
    pub x_api_user: Option<String>,
    /// `userid:{id}` or `email:{email}` of the user who shared their account.
    pub x_on_behalf_of_user: Option<String>,
    /// ETag from a previous response; the server answers 304 if unchanged.
    pub if_none_match: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_user(mut self, user: impl Into<String>) -> Self {
        self.x_api_user = Some(user.into());
        self
    }

    pub fn on_behalf_of(mut self, user: impl Into<String>) -> Self {
        self.x_on_behalf_of_user = Some(user.into());
        self
    }

    pub fn if_none_match(mut self, etag: impl Into<String>) -> Self {
        self.if_none_match = Some(etag.into());
        self
    }
}

/// Parameters bound to one invocation of an `Operation`.
#[derive(Debug)]
pub struct Call<'op> {
    operation: &'op Operation,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<String>,
    missing: Option<&'static str>,
    serialization: Option<serde_json::Error>,
}

impl<'op> Call<'op> {
    pub fn new(operation: &'op Operation) -> Self {
        Self {
            operation,
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            missing: None,
            serialization: None,
        }
    }

    pub fn operation(&self) -> &'op Operation {
        self.operation
    }

    /// Binds a `{name}` placeholder. Blank values count as absent.
    pub fn path(mut self, name: &'static str, value: &str) -> Self {
        if is_blank(value) {
            self.mark_missing(name);
        } else {
            self.path_params.push((name, value.to_string()));
        }
        self
    }

    /// Adds a query parameter when `value` is present.
    pub fn query<V: ToString>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.query.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Adds a header when `value` is present.
    pub fn header(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.headers.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Adds a header the operation cannot run without.
    pub fn required_header(mut self, name: &'static str, value: &str) -> Self {
        if is_blank(value) {
            self.mark_missing(name);
        } else {
            self.headers.push((name.to_string(), value.to_string()));
        }
        self
    }

    pub fn if_match(self, etag: &str) -> Self {
        self.required_header(HEADER_IF_MATCH, etag)
    }

    /// `x-api-user` and `x-on-behalf-of-user` from `options`.
    pub fn identity(self, options: &RequestOptions) -> Self {
        self.header(HEADER_X_API_USER, options.x_api_user.as_deref())
            .header(
                HEADER_X_ON_BEHALF_OF_USER,
                options.x_on_behalf_of_user.as_deref(),
            )
    }

    /// Identity headers plus `If-None-Match`.
    pub fn conditional(self, options: &RequestOptions) -> Self {
        self.identity(options)
            .header(HEADER_IF_NONE_MATCH, options.if_none_match.as_deref())
    }

    /// Serializes a required JSON body. A body that encodes to `null` counts
    /// as absent.
    pub fn body<B: Serialize + ?Sized>(mut self, name: &'static str, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(serde_json::Value::Null) => self.mark_missing(name),
            Ok(value) => self.body = Some(value.to_string()),
            Err(e) => {
                if self.serialization.is_none() {
                    self.serialization = Some(e);
                }
            }
        }
        self
    }

    /// Resolves the call against `base_url`. Validation runs first, so an
    /// absent required parameter is reported even if the body also failed to
    /// serialize.
    pub fn build(self, base_url: &str) -> Result<HttpRequest> {
        let operation = self.operation;
        if let Some(parameter) = self.missing {
            return Err(ClientValidationError {
                operation: operation.name,
                parameter,
            }
            .into());
        }
        let path = resolve_path(operation.path, &self.path_params).map_err(|parameter| {
            ClientValidationError {
                operation: operation.name,
                parameter,
            }
        })?;
        if let Some(source) = self.serialization {
            return Err(Error::Serialization {
                operation: operation.name,
                source,
            });
        }

        let mut headers = self.headers;
        headers.push((HEADER_ACCEPT.to_string(), operation.accept.to_string()));
        if self.body.is_some() {
            headers.push((HEADER_CONTENT_TYPE.to_string(), MEDIA_TYPE_JSON.to_string()));
        }

        Ok(HttpRequest {
            method: operation.method,
            url: format!("{}{path}", base_url.trim_end_matches('/')),
            query: self.query,
            headers,
            body: self.body,
        })
    }

    fn mark_missing(&mut self, name: &'static str) {
        if self.missing.is_none() {
            self.missing = Some(name);
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Substitutes every `{name}` in `template`, percent-encoding values as
/// single path segments. `{format}` always becomes `json`. Returns the first
/// placeholder with no bound value.
pub fn resolve_path(
    template: &'static str,
    params: &[(&'static str, String)],
) -> std::result::Result<String, &'static str> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        resolved.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            resolved.push_str(&rest[open..]);
            return Ok(resolved);
        };
        let name = &after[..close];
        if name == FORMAT_PLACEHOLDER {
            resolved.push_str("json");
        } else {
            let value = params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value)
                .ok_or(name)?;
            resolved.extend(utf8_percent_encode(value, PATH_SEGMENT));
        }
        rest = &after[close + 1..];
    }
    resolved.push_str(rest);
    Ok(resolved)
}
