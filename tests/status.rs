//! End-to-end status list issuance and verification through the facade.
use async_trait::async_trait;
use serde_json::{json, Value};
use veristat::{
    build_status_entry, check_credential_status, issue_status_list_credential,
    CachedDocumentLoader, CredentialSigner, CredentialStatusError, CredentialVerifier,
    DocumentLoader, DocumentLoaderError, IssuerError, StatusEntryType, StatusList,
    StatusListCredential, StatusPurpose, VerificationOutcome,
};

const TEST_LIST_URL: &str = "https://example.com/credentials/status/3";
const TEST_ISSUER_DID: &str = "did:example:12345";

// Signer attaching a stub proof, standing in for the external suite.
struct StubSigner;

#[async_trait]
impl CredentialSigner for StubSigner {
    async fn sign(&self, credential: &StatusListCredential) -> Result<Value, IssuerError> {
        let mut signed = credential.clone();
        signed.proof = Some(json!({"type": "StubSignature2021"}));
        serde_json::to_value(signed).map_err(|e| IssuerError::Signer(e.to_string()))
    }
}

// Loader serving a single hosted document.
struct SingleDocumentLoader {
    url: String,
    document: Value,
}

#[async_trait]
impl DocumentLoader for SingleDocumentLoader {
    async fn fetch_document(&self, url: &str) -> Result<Value, DocumentLoaderError> {
        if url == self.url {
            Ok(self.document.clone())
        } else {
            Err(DocumentLoaderError::NotFound(url.to_string()))
        }
    }
}

// Verifier accepting any document carrying a proof.
struct StubVerifier;

#[async_trait]
impl CredentialVerifier for StubVerifier {
    async fn verify_credential(&self, credential: &StatusListCredential) -> VerificationOutcome {
        if credential.proof.is_some() {
            VerificationOutcome::verified()
        } else {
            VerificationOutcome::failed("no proof present")
        }
    }
}

#[tokio::test]
async fn issue_host_and_check_status() {
    // Issue a list with slot 1 revoked.
    let mut list = StatusList::new(131_072).unwrap();
    list.set_status(1, true).unwrap();
    let signed = issue_status_list_credential(
        &list,
        TEST_LIST_URL,
        StatusEntryType::StatusList2021Entry,
        StatusPurpose::Revocation,
        TEST_ISSUER_DID,
        &StubSigner,
    )
    .await
    .unwrap();

    // Host it and check the status of the revoked and an untouched slot,
    // through the session-scoped cache.
    let loader = CachedDocumentLoader::new(SingleDocumentLoader {
        url: TEST_LIST_URL.to_string(),
        document: signed,
    });

    let entry = build_status_entry(
        1,
        StatusEntryType::StatusList2021Entry,
        StatusPurpose::Revocation,
        TEST_LIST_URL,
    );
    let result = check_credential_status(&entry, &loader, &StubVerifier)
        .await
        .unwrap();
    assert!(result.status);
    assert_eq!(result.purpose, StatusPurpose::Revocation);

    let entry = build_status_entry(
        0,
        StatusEntryType::StatusList2021Entry,
        StatusPurpose::Revocation,
        TEST_LIST_URL,
    );
    let result = check_credential_status(&entry, &loader, &StubVerifier)
        .await
        .unwrap();
    assert!(!result.status);
    assert!(loader.is_cached(TEST_LIST_URL));
}

#[tokio::test]
async fn purpose_mismatch_across_documents_is_rejected() {
    let list = StatusList::new(131_072).unwrap();
    let signed = issue_status_list_credential(
        &list,
        TEST_LIST_URL,
        StatusEntryType::StatusList2021Entry,
        StatusPurpose::Revocation,
        TEST_ISSUER_DID,
        &StubSigner,
    )
    .await
    .unwrap();
    let loader = SingleDocumentLoader {
        url: TEST_LIST_URL.to_string(),
        document: signed,
    };

    let entry = build_status_entry(
        1,
        StatusEntryType::StatusList2021Entry,
        StatusPurpose::Suspension,
        TEST_LIST_URL,
    );
    let err = check_credential_status(&entry, &loader, &StubVerifier)
        .await
        .unwrap_err();
    assert!(matches!(err, CredentialStatusError::Consistency(_)));
}
