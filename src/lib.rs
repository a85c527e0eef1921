//! Veristat: issuance and verification of status (revocation/suspension)
//! lists for W3C Verifiable Credentials anchored on DIDs.
//!
//! The core data structure is a compressed bitstring status list with a
//! deterministic base64url wire encoding; the protocol layered on top checks
//! an individual credential's status against a remotely hosted, signed
//! status list credential. Signing, signature verification and DID
//! resolution are external collaborators behind traits.
pub use veristat_api::api::StatusAPI;
pub use veristat_api::VeristatAPI;
pub use veristat_core::bitstring::{BitOrder, Bitstring, BitstringError};
pub use veristat_core::issuer::{
    build_status_entry, build_status_subject, issue_status_list_credential, new_status_list,
    new_status_list_credential, CredentialSigner, IssuerError,
};
pub use veristat_core::status::{
    CredentialStatusEntry, StatusEntryType, StatusError, StatusListCredential,
    StatusListCredentialSubject, StatusPurpose, StatusSubjectType,
};
pub use veristat_core::status_list::{StatusList, StatusListError};
pub use veristat_core::verifier::{
    check_credential_status, status_entries, CredentialStatusError, CredentialVerifier,
    DocumentLoader, DocumentLoaderError, StatusCheck, VerificationOutcome,
};
pub use veristat_http::cache::CachedDocumentLoader;
pub use veristat_http::loader::HttpDocumentLoader;
