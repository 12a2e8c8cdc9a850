//! One wrapper per resource family, one method per REST operation.
//!
//! Every method declares nothing but the operation: a `const Operation`
//! plus the parameters it binds. Validation, I/O and decoding all happen in
//! `SignClient`.

pub mod agreements;
pub mod library_documents;
pub mod webhooks;
pub mod widgets;

pub use agreements::AgreementsApi;
pub use library_documents::LibraryDocumentsApi;
pub use webhooks::{WebhookListQuery, WebhooksApi};
pub use widgets::WidgetsApi;

/// Paging and visibility filters shared by the listing operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Include hidden items (`showHiddenWidgets`, `showHiddenAgreements`).
    pub show_hidden: Option<bool>,
    /// `nextCursor` from the previous page.
    pub cursor: Option<String>,
    pub page_size: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = Some(show);
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

/// Version and rendering options for document retrieval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentQuery {
    pub version_id: Option<String>,
    /// Return the documents as seen by this participant.
    pub participant_id: Option<String>,
    pub attach_supporting_documents: Option<bool>,
    pub attach_audit_report: Option<bool>,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    pub fn participant(mut self, participant_id: impl Into<String>) -> Self {
        self.participant_id = Some(participant_id.into());
        self
    }

    pub fn attach_supporting_documents(mut self, attach: bool) -> Self {
        self.attach_supporting_documents = Some(attach);
        self
    }

    pub fn attach_audit_report(mut self, attach: bool) -> Self {
        self.attach_audit_report = Some(attach);
        self
    }
}
