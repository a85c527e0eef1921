//! Status verification against a remotely hosted, signed status list credential.
use crate::status::{
    assert_allowed_entry_type, assert_allowed_purpose, assert_index_within_range,
    assert_purpose_matches, assert_status_list_index, assert_subject_shape,
    CredentialStatusEntry, StatusError, StatusListCredential, StatusPurpose,
};
use crate::status_list::{StatusList, StatusListError};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// An error relating to document retrieval.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentLoaderError {
    /// No document at the given URL.
    #[error("document not found at: {0}")]
    NotFound(String),
    /// Network-level retrieval failure.
    #[error("failed to retrieve document: {0}")]
    Network(String),
    /// Unexpected (non-2xx) response status.
    #[error("unexpected response status {status} for: {url}")]
    ResponseStatus {
        /// The HTTP status code received.
        status: u16,
        /// The requested URL.
        url: String,
    },
    /// Response body that does not parse as JSON.
    #[error("malformed document at {url}: {reason}")]
    Malformed {
        /// The requested URL.
        url: String,
        /// The underlying parse failure.
        reason: String,
    },
}

/// External collaborator retrieving remote JSON documents over HTTP.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Retrieves the JSON document hosted at `url`.
    async fn fetch_document(&self, url: &str) -> Result<Value, DocumentLoaderError>;
}

/// Outcome of external signature verification of a status list credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// Whether the credential verified successfully.
    pub verified: bool,
    /// Diagnostic message accompanying a failed verification.
    pub error: Option<String>,
}

impl VerificationOutcome {
    /// A successful verification outcome.
    pub fn verified() -> Self {
        Self {
            verified: true,
            error: None,
        }
    }

    /// A failed verification outcome carrying a diagnostic message.
    pub fn failed(error: &str) -> Self {
        Self {
            verified: false,
            error: Some(error.to_string()),
        }
    }
}

/// External collaborator authenticating a fetched status list credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verifies the proof(s) on a status list credential.
    async fn verify_credential(&self, credential: &StatusListCredential) -> VerificationOutcome;
}

/// An error relating to a credential status check. Each variant is one
/// failure class of the verification protocol; callers branch on the
/// variant, with the message preserved as a diagnostic.
#[derive(Error, Debug)]
pub enum CredentialStatusError {
    /// Malformed credential status entry (type, purpose or index field).
    /// Raised before any network access.
    #[error("malformed credential status entry: {0}")]
    Shape(StatusError),
    /// The status list credential could not be retrieved or parsed.
    #[error("status list credential not found: {0}")]
    Fetch(DocumentLoaderError),
    /// Mismatch between the entry and the fetched status list credential.
    #[error("inconsistent status list credential: {0}")]
    Consistency(StatusError),
    /// Status list index outside the bounds of the fetched list.
    #[error("status list index out of range 0-{max}: {index}")]
    Range {
        /// The requested index.
        index: usize,
        /// The largest valid index.
        max: usize,
    },
    /// The fetched status list credential failed signature verification.
    #[error("failed to verify status list credential: {0}")]
    Authentication(String),
    /// The encoded list could not be decoded.
    #[error("cannot decode encoded list: {0}")]
    Decode(StatusListError),
}

/// Successful status check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCheck {
    /// The bit value at the entry's index.
    pub status: bool,
    /// The purpose the bit encodes.
    pub purpose: StatusPurpose,
}

/// Extracts the credential status entries embedded in a credential, accepting
/// both a single entry object and an array of entries.
pub fn status_entries(credential: &Value) -> Result<Vec<CredentialStatusEntry>, CredentialStatusError> {
    let status = credential
        .get("credentialStatus")
        .ok_or(CredentialStatusError::Shape(
            StatusError::MissingCredentialStatus,
        ))?;
    let parse = |value: &Value| -> Result<CredentialStatusEntry, CredentialStatusError> {
        serde_json::from_value(value.clone())
            .map_err(|e| CredentialStatusError::Shape(StatusError::MalformedEntry(e.to_string())))
    };
    match status {
        Value::Array(entries) => entries.iter().map(parse).collect(),
        entry @ Value::Object(_) => Ok(vec![parse(entry)?]),
        other => Err(CredentialStatusError::Shape(StatusError::MalformedEntry(
            other.to_string(),
        ))),
    }
}

/// Checks the revocation/suspension status referenced by a credential status
/// entry against the remotely hosted status list credential.
///
/// The protocol runs in strict order, any failure short-circuiting to a
/// terminal error:
/// 1. validate the entry shape (no network access on failure);
/// 2. fetch the status list credential from the entry's URL;
/// 3. cross-check the fetched subject's type and purpose against the entry;
/// 4. decode the list and range-check the entry's index;
/// 5. authenticate the fetched credential via the external verifier;
/// 6. read the bit at the index.
///
/// All failures are returned values; verification never panics.
pub async fn check_credential_status(
    entry: &CredentialStatusEntry,
    loader: &dyn DocumentLoader,
    verifier: &dyn CredentialVerifier,
) -> Result<StatusCheck, CredentialStatusError> {
    // 1. Entry shape.
    let entry_type =
        assert_allowed_entry_type(&entry.type_).map_err(CredentialStatusError::Shape)?;
    let purpose =
        assert_allowed_purpose(&entry.status_purpose).map_err(CredentialStatusError::Shape)?;
    let index =
        assert_status_list_index(&entry.status_list_index).map_err(CredentialStatusError::Shape)?;

    // 2. Fetch.
    let document = loader
        .fetch_document(&entry.status_list_credential)
        .await
        .map_err(CredentialStatusError::Fetch)?;
    let credential: StatusListCredential =
        serde_json::from_value(document).map_err(|e| {
            CredentialStatusError::Fetch(DocumentLoaderError::Malformed {
                url: entry.status_list_credential.clone(),
                reason: e.to_string(),
            })
        })?;

    // 3. Cross-check subject shape and purpose.
    let (subject_purpose, encoded_list) =
        assert_subject_shape(&credential.credential_subject, entry_type.subject_type())
            .map_err(CredentialStatusError::Consistency)?;
    assert_purpose_matches(subject_purpose, purpose)
        .map_err(CredentialStatusError::Consistency)?;

    // 4. Decode and range-check against the declared length.
    let status_list =
        StatusList::decode(encoded_list).map_err(CredentialStatusError::Decode)?;
    assert_index_within_range(&status_list, index).map_err(|err| match err {
        StatusError::IndexOutOfRange { index, max } => CredentialStatusError::Range { index, max },
        other => CredentialStatusError::Shape(other),
    })?;

    // 5. Authenticate.
    let outcome = verifier.verify_credential(&credential).await;
    if !outcome.verified {
        return Err(CredentialStatusError::Authentication(
            outcome
                .error
                .unwrap_or_else(|| "unknown verification failure".to_string()),
        ));
    }

    // 6. Read the bit.
    let status = status_list.get_status(index).map_err(|err| match err {
        StatusListError::OutOfRange { index, max } => CredentialStatusError::Range { index, max },
        other => CredentialStatusError::Decode(other),
    })?;
    Ok(StatusCheck { status, purpose })
}
