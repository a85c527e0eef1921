//! Status list credential issuance.
use crate::status::{
    CredentialStatusEntry, StatusEntryType, StatusListCredential, StatusListCredentialSubject,
    StatusPurpose,
};
use crate::status_list::{StatusList, StatusListError};
use crate::{DEFAULT_LIST_LENGTH, VERIFIABLE_CREDENTIAL_TYPE};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// An error relating to status list credential issuance.
#[derive(Error, Debug)]
pub enum IssuerError {
    /// Wrapped error from the external signer, forwarded unchanged.
    #[error("signer error: {0}")]
    Signer(String),
    /// Wrapped error for a status list encoding failure.
    #[error("failed to encode status list: {0}")]
    StatusList(#[from] StatusListError),
}

/// External collaborator producing a signed credential from an assembled
/// status list credential. Signer failures are reported via
/// [`IssuerError::Signer`] and forwarded by issuance unchanged.
#[async_trait]
pub trait CredentialSigner: Send + Sync {
    /// Signs a status list credential, returning the signed document.
    async fn sign(&self, credential: &StatusListCredential) -> Result<Value, IssuerError>;
}

/// Constructs a fresh zeroed status list of the default length.
pub fn new_status_list() -> Result<StatusList, StatusListError> {
    StatusList::new(DEFAULT_LIST_LENGTH)
}

/// Encodes a status list and assembles the credential subject payload to be
/// embedded in a status list credential. Does not sign.
pub fn build_status_subject(
    list: &StatusList,
    id: &str,
    family: StatusEntryType,
    purpose: StatusPurpose,
) -> Result<StatusListCredentialSubject, IssuerError> {
    Ok(StatusListCredentialSubject {
        id: Some(id.to_string()),
        type_: Some(family.subject_type().to_string()),
        status_purpose: Some(purpose.to_string()),
        encoded_list: Some(list.encode()?),
    })
}

/// Assembles an unsigned status list credential envelope around a list,
/// ready to be handed to the external signer and hosted at `id`.
pub fn new_status_list_credential(
    list: &StatusList,
    id: &str,
    family: StatusEntryType,
    purpose: StatusPurpose,
    issuer: &str,
) -> Result<StatusListCredential, IssuerError> {
    let subject = build_status_subject(list, &format!("{id}#list"), family, purpose)?;
    Ok(StatusListCredential {
        context: json!(family.contexts()),
        id: Some(id.to_string()),
        type_: vec![
            VERIFIABLE_CREDENTIAL_TYPE.to_string(),
            family.credential_type().to_string(),
        ],
        issuer: Some(Value::String(issuer.to_string())),
        issuance_date: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        credential_subject: subject,
        proof: None,
        additional_properties: Map::new(),
    })
}

/// Constructs the status reference to embed in a subject credential, pointing
/// at slot `index` of the list credential hosted at `status_list_credential`.
pub fn build_status_entry(
    index: usize,
    family: StatusEntryType,
    purpose: StatusPurpose,
    status_list_credential: &str,
) -> CredentialStatusEntry {
    CredentialStatusEntry {
        id: Some(format!("{status_list_credential}#{index}")),
        type_: family.to_string(),
        status_purpose: purpose.to_string(),
        status_list_index: index.to_string(),
        status_list_credential: status_list_credential.to_string(),
    }
}

/// Assembles a status list credential and hands it to the external signer,
/// forwarding any signer error unchanged.
pub async fn issue_status_list_credential(
    list: &StatusList,
    id: &str,
    family: StatusEntryType,
    purpose: StatusPurpose,
    issuer: &str,
    signer: &dyn CredentialSigner,
) -> Result<Value, IssuerError> {
    let credential = new_status_list_credential(list, id, family, purpose, issuer)?;
    signer.sign(&credential).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CREDENTIALS_V1_CONTEXT, STATUS_LIST_2021_CONTEXT};

    const TEST_LIST_ID: &str = "https://example.com/credentials/status/3";
    const TEST_ISSUER_DID: &str = "did:example:12345";

    struct FailingSigner;

    #[async_trait]
    impl CredentialSigner for FailingSigner {
        async fn sign(&self, _credential: &StatusListCredential) -> Result<Value, IssuerError> {
            Err(IssuerError::Signer("keystore offline".to_string()))
        }
    }

    struct PassthroughSigner;

    #[async_trait]
    impl CredentialSigner for PassthroughSigner {
        async fn sign(&self, credential: &StatusListCredential) -> Result<Value, IssuerError> {
            let mut signed = credential.clone();
            signed.proof = Some(json!({"type": "TestSignature2021"}));
            serde_json::to_value(signed).map_err(|e| IssuerError::Signer(e.to_string()))
        }
    }

    #[test]
    fn build_subject_embeds_encoded_list() {
        let mut list = StatusList::new(16).unwrap();
        list.set_status(1, true).unwrap();
        let subject = build_status_subject(
            &list,
            "https://example.com/credentials/status/3#list",
            StatusEntryType::StatusList2021Entry,
            StatusPurpose::Revocation,
        )
        .unwrap();
        assert_eq!(subject.type_.as_deref(), Some("StatusList2021"));
        assert_eq!(subject.status_purpose.as_deref(), Some("revocation"));
        let decoded = StatusList::decode(subject.encoded_list.as_deref().unwrap()).unwrap();
        assert!(decoded.get_status(1).unwrap());
        assert!(!decoded.get_status(0).unwrap());
    }

    #[test]
    fn new_credential_carries_contexts_and_types() {
        let list = new_status_list().unwrap();
        assert_eq!(list.len(), DEFAULT_LIST_LENGTH);
        let credential = new_status_list_credential(
            &list,
            TEST_LIST_ID,
            StatusEntryType::StatusList2021Entry,
            StatusPurpose::Suspension,
            TEST_ISSUER_DID,
        )
        .unwrap();
        assert_eq!(
            credential.context,
            json!([CREDENTIALS_V1_CONTEXT, STATUS_LIST_2021_CONTEXT])
        );
        assert_eq!(
            credential.type_,
            vec!["VerifiableCredential", "StatusList2021Credential"]
        );
        assert_eq!(credential.id.as_deref(), Some(TEST_LIST_ID));
        assert_eq!(
            credential.issuer,
            Some(Value::String(TEST_ISSUER_DID.to_string()))
        );
        assert!(credential.issuance_date.is_some());
        assert_eq!(
            credential.credential_subject.id.as_deref(),
            Some("https://example.com/credentials/status/3#list")
        );
        assert!(credential.proof.is_none());
    }

    #[test]
    fn build_entry_references_list_slot() {
        let entry = build_status_entry(
            94567,
            StatusEntryType::StatusList2021Entry,
            StatusPurpose::Revocation,
            TEST_LIST_ID,
        );
        assert_eq!(entry.type_, "StatusList2021Entry");
        assert_eq!(entry.status_purpose, "revocation");
        assert_eq!(entry.status_list_index, "94567");
        assert_eq!(entry.status_list_credential, TEST_LIST_ID);
        assert_eq!(
            entry.id.as_deref(),
            Some("https://example.com/credentials/status/3#94567")
        );
    }

    #[tokio::test]
    async fn issue_hands_credential_to_signer() {
        let list = StatusList::new(16).unwrap();
        let signed = issue_status_list_credential(
            &list,
            TEST_LIST_ID,
            StatusEntryType::StatusList2021Entry,
            StatusPurpose::Revocation,
            TEST_ISSUER_DID,
            &PassthroughSigner,
        )
        .await
        .unwrap();
        assert_eq!(signed["id"], TEST_LIST_ID);
        assert_eq!(signed["proof"]["type"], "TestSignature2021");
    }

    #[tokio::test]
    async fn issue_forwards_signer_error_unchanged() {
        let list = StatusList::new(16).unwrap();
        let err = issue_status_list_credential(
            &list,
            TEST_LIST_ID,
            StatusEntryType::StatusList2021Entry,
            StatusPurpose::Revocation,
            TEST_ISSUER_DID,
            &FailingSigner,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, IssuerError::Signer(_)));
        assert_eq!(err.to_string(), "signer error: keystore offline");
    }
}
