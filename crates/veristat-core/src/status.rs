//! Credential status wire types and the validation layer enforcing their invariants.
use crate::status_list::StatusList;
use crate::{CREDENTIALS_V1_CONTEXT, CREDENTIALS_V2_CONTEXT, STATUS_LIST_2021_CONTEXT};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An error relating to the shape or consistency of credential status data.
///
/// The message text of each variant is part of the contract: callers and
/// tests branch on the variant and match on the message content.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StatusError {
    /// Credential status type outside the supported closed set.
    #[error("unsupported credential status type: {0}")]
    UnsupportedType(String),
    /// Status purpose outside the supported closed set.
    #[error("unsupported status purpose: {0}")]
    UnsupportedPurpose(String),
    /// Textual status list index that does not parse as a non-negative integer.
    #[error("invalid status list index: not a number: {0}")]
    NonNumericIndex(String),
    /// Index outside the bounds of the status list.
    #[error("status list index out of range 0-{max}: {index}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The largest valid index.
        max: usize,
    },
    /// No credentialStatus field in the credential under check.
    #[error("no credential status found in credential")]
    MissingCredentialStatus,
    /// credentialStatus entry that does not parse as a status entry.
    #[error("malformed credential status entry: {0}")]
    MalformedEntry(String),
    /// Status list credential subject with no type field.
    #[error("missing status list credential subject type")]
    MissingSubjectType,
    /// Status list credential subject type differing from the expected type.
    #[error("unexpected status list credential subject type: expected {expected}, found {found}")]
    UnexpectedSubjectType {
        /// The subject type implied by the referencing entry.
        expected: String,
        /// The subject type found in the fetched credential.
        found: String,
    },
    /// Status list credential subject with no status purpose.
    #[error("missing status purpose in status list credential subject")]
    MissingSubjectPurpose,
    /// Status list credential subject with a missing or empty encoded list.
    #[error("missing encoded list in status list credential subject")]
    MissingEncodedList,
    /// Purpose mismatch between the entry and the fetched status list credential.
    #[error("purpose does not match the purpose in the referenced status list: expected {expected}, found {found}")]
    PurposeMismatch {
        /// The purpose declared by the referencing entry.
        expected: StatusPurpose,
        /// The purpose declared by the fetched credential subject.
        found: StatusPurpose,
    },
}

/// The semantic meaning of a set status bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPurpose {
    /// A set bit permanently revokes the credential.
    Revocation,
    /// A set bit temporarily suspends the credential.
    Suspension,
}

impl fmt::Display for StatusPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusPurpose::Revocation => write!(f, "revocation"),
            StatusPurpose::Suspension => write!(f, "suspension"),
        }
    }
}

impl FromStr for StatusPurpose {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revocation" => Ok(StatusPurpose::Revocation),
            "suspension" => Ok(StatusPurpose::Suspension),
            other => Err(StatusError::UnsupportedPurpose(other.to_string())),
        }
    }
}

/// The supported credential status entry types, one per status list family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEntryType {
    /// Entry referencing a StatusList2021 credential.
    StatusList2021Entry,
    /// Entry referencing a Bitstring Status List credential.
    BitstringStatusListEntry,
}

impl StatusEntryType {
    /// The credential subject type of the referenced status list credential.
    pub fn subject_type(&self) -> StatusSubjectType {
        match self {
            StatusEntryType::StatusList2021Entry => StatusSubjectType::StatusList2021,
            StatusEntryType::BitstringStatusListEntry => StatusSubjectType::BitstringStatusList,
        }
    }

    /// The credential type of the referenced status list credential.
    pub fn credential_type(&self) -> &'static str {
        match self {
            StatusEntryType::StatusList2021Entry => "StatusList2021Credential",
            StatusEntryType::BitstringStatusListEntry => "BitstringStatusListCredential",
        }
    }

    /// The JSON-LD contexts of the referenced status list credential.
    pub fn contexts(&self) -> Vec<&'static str> {
        match self {
            StatusEntryType::StatusList2021Entry => {
                vec![CREDENTIALS_V1_CONTEXT, STATUS_LIST_2021_CONTEXT]
            }
            StatusEntryType::BitstringStatusListEntry => vec![CREDENTIALS_V2_CONTEXT],
        }
    }
}

impl fmt::Display for StatusEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEntryType::StatusList2021Entry => write!(f, "StatusList2021Entry"),
            StatusEntryType::BitstringStatusListEntry => write!(f, "BitstringStatusListEntry"),
        }
    }
}

impl FromStr for StatusEntryType {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "StatusList2021Entry" => Ok(StatusEntryType::StatusList2021Entry),
            "BitstringStatusListEntry" => Ok(StatusEntryType::BitstringStatusListEntry),
            other => Err(StatusError::UnsupportedType(other.to_string())),
        }
    }
}

/// The supported status list credential subject types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusSubjectType {
    /// Subject of a StatusList2021 credential.
    StatusList2021,
    /// Subject of a Bitstring Status List credential.
    BitstringStatusList,
}

impl fmt::Display for StatusSubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusSubjectType::StatusList2021 => write!(f, "StatusList2021"),
            StatusSubjectType::BitstringStatusList => write!(f, "BitstringStatusList"),
        }
    }
}

/// The status reference embedded in a subject credential, in wire form.
///
/// Fields are carried as text and validated eagerly by the assertion
/// functions below before any further processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialStatusEntry {
    /// URI of the status entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Entry type, expected within the [`StatusEntryType`] closed set.
    #[serde(rename = "type")]
    pub type_: String,
    /// Status purpose, expected within the [`StatusPurpose`] closed set.
    pub status_purpose: String,
    /// Index of the credential's slot, as a decimal string.
    pub status_list_index: String,
    /// URL of the hosted status list credential.
    pub status_list_credential: String,
}

/// The subject payload of a hosted status list credential, in wire form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusListCredentialSubject {
    /// URI of the subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Subject type, expected to equal the family's subject type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Status purpose of every bit in the encoded list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_purpose: Option<String>,
    /// The compressed, encoded status list text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_list: Option<String>,
}

/// The hosted, signed status list credential envelope.
///
/// Additional properties (including any proof) are carried through
/// unaltered so the external verifier sees the document as fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusListCredential {
    /// JSON-LD contexts.
    #[serde(rename = "@context")]
    pub context: Value,
    /// URI of the credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Credential types.
    #[serde(rename = "type")]
    pub type_: Vec<String>,
    /// Issuer of the credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<Value>,
    /// Issuance date of the credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuance_date: Option<String>,
    /// The status list subject payload.
    pub credential_subject: StatusListCredentialSubject,
    /// Proof attached by the external signer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Value>,
    /// Any further properties of the fetched document.
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}

/// Asserts that `purpose` belongs to the supported closed set.
pub fn assert_allowed_purpose(purpose: &str) -> Result<StatusPurpose, StatusError> {
    purpose.parse()
}

/// Asserts that `type_` belongs to the supported closed set of entry types.
pub fn assert_allowed_entry_type(type_: &str) -> Result<StatusEntryType, StatusError> {
    type_.parse()
}

/// Asserts that a textual status list index parses as a non-negative integer.
pub fn assert_status_list_index(index: &str) -> Result<usize, StatusError> {
    index
        .parse::<usize>()
        .map_err(|_| StatusError::NonNumericIndex(index.to_string()))
}

/// Asserts that `index` addresses a slot of `status_list`, reporting the
/// valid bounds on violation.
pub fn assert_index_within_range(
    status_list: &StatusList,
    index: usize,
) -> Result<(), StatusError> {
    if index >= status_list.len() {
        return Err(StatusError::IndexOutOfRange {
            index,
            max: status_list.len() - 1,
        });
    }
    Ok(())
}

/// Asserts the shape of a fetched status list credential subject: the
/// expected subject type, an allowed purpose and a non-empty encoded list.
/// Each missing or invalid field raises its own distinct error; no partially
/// validated subject escapes.
pub fn assert_subject_shape<'a>(
    subject: &'a StatusListCredentialSubject,
    expected_type: StatusSubjectType,
) -> Result<(StatusPurpose, &'a str), StatusError> {
    let found_type = subject
        .type_
        .as_deref()
        .ok_or(StatusError::MissingSubjectType)?;
    if found_type != expected_type.to_string() {
        return Err(StatusError::UnexpectedSubjectType {
            expected: expected_type.to_string(),
            found: found_type.to_string(),
        });
    }
    let purpose = subject
        .status_purpose
        .as_deref()
        .ok_or(StatusError::MissingSubjectPurpose)?
        .parse()?;
    let encoded_list = subject
        .encoded_list
        .as_deref()
        .filter(|encoded| !encoded.is_empty())
        .ok_or(StatusError::MissingEncodedList)?;
    Ok((purpose, encoded_list))
}

/// Asserts cross-document purpose consistency between a fetched subject and
/// the referencing entry.
pub fn assert_purpose_matches(
    subject_purpose: StatusPurpose,
    entry_purpose: StatusPurpose,
) -> Result<(), StatusError> {
    if subject_purpose != entry_purpose {
        return Err(StatusError::PurposeMismatch {
            expected: entry_purpose,
            found: subject_purpose,
        });
    }
    Ok(())
}
