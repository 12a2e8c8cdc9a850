//! Request and response payloads.
//!
//! Field names follow the service's camelCase JSON. Optional properties are
//! `Option`s and are left out of serialized output when `None`; properties
//! the client does not know are ignored when decoding.

pub mod agreements;
pub mod common;
pub mod events;
pub mod library_documents;
pub mod webhooks;
pub mod widgets;

pub use agreements::{
    AgreementCancellationInfo, AgreementCreationResponse, AgreementDocuments, AgreementInfo,
    AgreementState, AgreementStateInfo, SignatureType, UserAgreement, UserAgreements,
};
pub use common::{
    AgreementStatus, CcInfo, DetailedParticipantInfo, DetailedParticipantSetInfo, Document,
    ErrorResponse, ExternalId, FileInfo, MembersInfo, Note, PageInfo, ParticipantRole,
    ParticipantSetInfo, ParticipantSetMemberInfo, PhoneInfo, PostSignOption, SecurityOption,
    SupportingDocument, UrlFileInfo, VaultingInfo, Visibility, VisibilityInfo,
};
pub use events::{
    intent_verification_header, parse_webhook_event, AgreementEvent, ApplicableUser, DeviceInfo,
    DeviceLocation, DocumentsInfo, EventCc, ParticipantSetsInfo, SignedDocumentInfo, WebhookEvent,
};
pub use library_documents::{
    LibraryDocument, LibraryDocumentFiles, LibraryDocumentInfo, LibraryDocumentState,
    LibraryDocuments, SharingMode, TemplateType,
};
pub use webhooks::{
    UserWebhook, UserWebhooks, WebhookAgreementEvents, WebhookConditionalParams,
    WebhookCreationResponse, WebhookInfo, WebhookResourceType, WebhookScope, WebhookState,
    WebhookStateInfo, WebhookUrlInfo,
};
pub use widgets::{
    CommonViewConfiguration, DetailedWidgetParticipantSetInfo, UserWidget, UserWidgets,
    WidgetAgreement, WidgetAgreements, WidgetCreationInfoV6, WidgetCreationResponse,
    WidgetDocuments, WidgetEvent, WidgetEventList, WidgetInactiveInfo, WidgetInfo,
    WidgetMembersInfo, WidgetParticipantSetInfo, WidgetRedirectionInfo, WidgetState,
    WidgetStateInfo, WidgetView, WidgetViewInfo, WidgetViewName, WidgetViews,
};
