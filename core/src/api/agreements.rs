//! Agreements: documents sent out for signature.

use crate::api::{DocumentQuery, ListQuery};
use crate::client::{Conditional, SignClient};
use crate::error::Result;
use crate::http::{HttpMethod, MEDIA_TYPE_CSV, MEDIA_TYPE_PDF};
use crate::models::{
    AgreementCreationResponse, AgreementDocuments, AgreementInfo, AgreementStateInfo, MembersInfo,
    UserAgreements,
};
use crate::operation::{Call, Operation, RequestOptions};
use crate::transport::Transport;

pub const GET_AGREEMENTS: Operation = Operation::new("get_agreements", HttpMethod::Get, "/agreements");
pub const CREATE_AGREEMENT: Operation =
    Operation::new("create_agreement", HttpMethod::Post, "/agreements");
pub const GET_AGREEMENT_INFO: Operation =
    Operation::new("get_agreement_info", HttpMethod::Get, "/agreements/{agreementId}");
pub const UPDATE_AGREEMENT: Operation =
    Operation::new("update_agreement", HttpMethod::Put, "/agreements/{agreementId}");
pub const UPDATE_AGREEMENT_STATE: Operation = Operation::new(
    "update_agreement_state",
    HttpMethod::Put,
    "/agreements/{agreementId}/state",
);
pub const GET_AGREEMENT_MEMBERS: Operation = Operation::new(
    "get_agreement_members",
    HttpMethod::Get,
    "/agreements/{agreementId}/members",
);
pub const GET_AGREEMENT_DOCUMENTS: Operation = Operation::new(
    "get_agreement_documents",
    HttpMethod::Get,
    "/agreements/{agreementId}/documents",
);
pub const GET_AGREEMENT_DOCUMENT: Operation = Operation::new(
    "get_agreement_document",
    HttpMethod::Get,
    "/agreements/{agreementId}/documents/{documentId}",
)
.accepting(MEDIA_TYPE_PDF);
pub const GET_AGREEMENT_COMBINED_DOCUMENT: Operation = Operation::new(
    "get_agreement_combined_document",
    HttpMethod::Get,
    "/agreements/{agreementId}/combinedDocument",
)
.accepting(MEDIA_TYPE_PDF);
pub const GET_AGREEMENT_AUDIT_TRAIL: Operation = Operation::new(
    "get_agreement_audit_trail",
    HttpMethod::Get,
    "/agreements/{agreementId}/auditTrail",
)
.accepting(MEDIA_TYPE_PDF);
pub const GET_AGREEMENT_FORM_DATA: Operation = Operation::new(
    "get_agreement_form_data",
    HttpMethod::Get,
    "/agreements/{agreementId}/formData",
)
.accepting(MEDIA_TYPE_CSV);
pub const DELETE_AGREEMENT_DOCUMENTS: Operation = Operation::new(
    "delete_agreement_documents",
    HttpMethod::Delete,
    "/agreements/{agreementId}/documents",
);

/// Operations on `/agreements`.
#[derive(Debug)]
pub struct AgreementsApi<'a, T> {
    client: &'a SignClient<T>,
}

impl<'a, T: Transport> AgreementsApi<'a, T> {
    pub fn new(client: &'a SignClient<T>) -> Self {
        Self { client }
    }

    pub fn get_agreements(&self, query: &ListQuery, options: &RequestOptions) -> Result<UserAgreements> {
        self.client.execute_json(
            Call::new(&GET_AGREEMENTS)
                .query("showHiddenAgreements", query.show_hidden)
                .query("cursor", query.cursor.as_deref())
                .query("pageSize", query.page_size)
                .identity(options),
        )
    }

    pub fn create_agreement(
        &self,
        agreement_info: &AgreementInfo,
        options: &RequestOptions,
    ) -> Result<AgreementCreationResponse> {
        self.client.execute_json(
            Call::new(&CREATE_AGREEMENT)
                .body("agreementInfo", agreement_info)
                .identity(options),
        )
    }

    pub fn get_agreement_info(
        &self,
        agreement_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<AgreementInfo>> {
        self.client.execute_json_conditional(
            Call::new(&GET_AGREEMENT_INFO)
                .path("agreementId", agreement_id)
                .conditional(options),
        )
    }

    /// Only allowed while the agreement is in DRAFT or AUTHORING.
    pub fn update_agreement(
        &self,
        if_match: &str,
        agreement_id: &str,
        agreement_info: &AgreementInfo,
        options: &RequestOptions,
    ) -> Result<()> {
        self.client.execute_empty(
            Call::new(&UPDATE_AGREEMENT)
                .if_match(if_match)
                .path("agreementId", agreement_id)
                .body("agreementInfo", agreement_info)
                .identity(options),
        )
    }

    pub fn update_agreement_state(
        &self,
        if_match: &str,
        agreement_id: &str,
        agreement_state_info: &AgreementStateInfo,
        options: &RequestOptions,
    ) -> Result<()> {
        self.client.execute_empty(
            Call::new(&UPDATE_AGREEMENT_STATE)
                .if_match(if_match)
                .path("agreementId", agreement_id)
                .body("agreementStateInfo", agreement_state_info)
                .identity(options),
        )
    }

    pub fn get_agreement_members(
        &self,
        agreement_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<MembersInfo>> {
        self.client.execute_json_conditional(
            Call::new(&GET_AGREEMENT_MEMBERS)
                .path("agreementId", agreement_id)
                .conditional(options),
        )
    }

    pub fn get_agreement_documents(
        &self,
        agreement_id: &str,
        query: &DocumentQuery,
        options: &RequestOptions,
    ) -> Result<Conditional<AgreementDocuments>> {
        self.client.execute_json_conditional(
            Call::new(&GET_AGREEMENT_DOCUMENTS)
                .path("agreementId", agreement_id)
                .query("versionId", query.version_id.as_deref())
                .query("participantId", query.participant_id.as_deref())
                .conditional(options),
        )
    }

    pub fn get_agreement_document(
        &self,
        agreement_id: &str,
        document_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<Vec<u8>>> {
        self.client.execute_bytes_conditional(
            Call::new(&GET_AGREEMENT_DOCUMENT)
                .path("agreementId", agreement_id)
                .path("documentId", document_id)
                .conditional(options),
        )
    }

    pub fn get_agreement_combined_document(
        &self,
        agreement_id: &str,
        query: &DocumentQuery,
        options: &RequestOptions,
    ) -> Result<Conditional<Vec<u8>>> {
        self.client.execute_bytes_conditional(
            Call::new(&GET_AGREEMENT_COMBINED_DOCUMENT)
                .path("agreementId", agreement_id)
                .query("versionId", query.version_id.as_deref())
                .query("participantId", query.participant_id.as_deref())
                .query("attachSupportingDocuments", query.attach_supporting_documents)
                .query("attachAuditReport", query.attach_audit_report)
                .conditional(options),
        )
    }

    pub fn get_agreement_audit_trail(
        &self,
        agreement_id: &str,
        options: &RequestOptions,
    ) -> Result<Conditional<Vec<u8>>> {
        self.client.execute_bytes_conditional(
            Call::new(&GET_AGREEMENT_AUDIT_TRAIL)
                .path("agreementId", agreement_id)
                .conditional(options),
        )
    }

    /// Form field values as CSV.
    pub fn get_agreement_form_data(
        &self,
        agreement_id: &str,
        options: &RequestOptions,
    ) -> Result<Vec<u8>> {
        self.client.execute_bytes(
            Call::new(&GET_AGREEMENT_FORM_DATA)
                .path("agreementId", agreement_id)
                .identity(options),
        )
    }

    /// Removes the documents of a completed agreement, keeping its record.
    pub fn delete_agreement_documents(
        &self,
        agreement_id: &str,
        options: &RequestOptions,
    ) -> Result<()> {
        self.client.execute_empty(
            Call::new(&DELETE_AGREEMENT_DOCUMENTS)
                .path("agreementId", agreement_id)
                .identity(options),
        )
    }
}
