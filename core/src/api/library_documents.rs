//! Library documents: templates stored in the account's library.

use crate::api::ListQuery;
use crate::client::{Conditional, SignClient};
use crate::error::Result;
use crate::http::{HttpMethod, MEDIA_TYPE_PDF};
use crate::models::{LibraryDocumentFiles, LibraryDocumentInfo, LibraryDocuments};
use crate::operation::{Call, Operation, RequestOptions};
use crate::transport::Transport;

pub const GET_LIBRARY_DOCUMENTS: Operation =
    Operation::new("get_library_documents", HttpMethod::Get, "/libraryDocuments");
pub const GET_LIBRARY_DOCUMENT_INFO: Operation = Operation::new(
    "get_library_document_info",
    HttpMethod::Get,
    "/libraryDocuments/{libraryDocumentId}",
);
pub const GET_LIBRARY_DOCUMENT_DOCUMENTS: Operation = Operation::new(
    "get_library_document_documents",
    HttpMethod::Get,
    "/libraryDocuments/{libraryDocumentId}/documents",
);
pub const GET_LIBRARY_DOCUMENT_COMBINED_DOCUMENT: Operation = Operation::new(
    "get_library_document_combined_document",
    HttpMethod::Get,
    "/libraryDocuments/{libraryDocumentId}/combinedDocument",
)
.accepting(MEDIA_TYPE_PDF);
pub const GET_LIBRARY_DOCUMENT_AUDIT_TRAIL: Operation = Operation::new(
    "get_library_document_audit_trail",
    HttpMethod::Get,
    "/libraryDocuments/{libraryDocumentId}/auditTrail",
)
.accepting(MEDIA_TYPE_PDF);

#[derive(Debug)]
pub struct LibraryDocumentsApi<'a, T> {
    client: &'a SignClient<T>,
}

impl<'a, T: Transport> LibraryDocumentsApi<'a, T> {
    pub fn new(client: &'a SignClient<T>) -> Self {
        Self { client }
    }

    /// `query.show_hidden` is not used by this listing.
    pub fn get_library_documents(
        &self,
        query: &ListQuery,
        options: &RequestOptions,
    ) -> Result<LibraryDocuments> {
        self.client.execute_json(
            Call::new(&GET_LIBRARY_DOCUMENTS)
                .query("cursor", query.cursor.as_deref())
                .query("pageSize", query.page_size)
                .identity(options),
        )
    }

    pub fn get_library_document_info(
        &self,
        library_document_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<LibraryDocumentInfo>> {
        self.client.execute_json_conditional(
            Call::new(&GET_LIBRARY_DOCUMENT_INFO)
                .path("libraryDocumentId", library_document_id)
                .conditional(options),
        )
    }

    pub fn get_library_document_documents(
        &self,
        library_document_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<LibraryDocumentFiles>> {
        self.client.execute_json_conditional(
            Call::new(&GET_LIBRARY_DOCUMENT_DOCUMENTS)
                .path("libraryDocumentId", library_document_id)
                .conditional(options),
        )
    }

    pub fn get_library_document_combined_document(
        &self,
        library_document_id: &str,
        attach_audit_report: Option<bool>,
        options: &RequestOptions,
    ) -> Result<Conditional<Vec<u8>>> {
        self.client.execute_bytes_conditional(
            Call::new(&GET_LIBRARY_DOCUMENT_COMBINED_DOCUMENT)
                .path("libraryDocumentId", library_document_id)
                .query("attachAuditReport", attach_audit_report)
                .conditional(options),
        )
    }

    pub fn get_library_document_audit_trail(
        &self,
        library_document_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<Vec<u8>>> {
        self.client.execute_bytes_conditional(
            Call::new(&GET_LIBRARY_DOCUMENT_AUDIT_TRAIL)
                .path("libraryDocumentId", library_document_id)
                .conditional(options),
        )
    }
}
