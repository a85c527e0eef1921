//! API traits for status list issuance and credential status checking.
use crate::errors::VeristatAPIError;
use async_trait::async_trait;
use futures::{stream, StreamExt};
use serde_json::Value;
use veristat_core::issuer::{issue_status_list_credential, CredentialSigner};
use veristat_core::status::{CredentialStatusEntry, StatusEntryType, StatusPurpose};
use veristat_core::status_list::StatusList;
use veristat_core::verifier::{
    check_credential_status, status_entries, CredentialStatusError, CredentialVerifier,
    DocumentLoader, StatusCheck,
};

/// Concurrency limit for multi-entry status checks (rate limiting for loader
/// requests).
const CONCURRENT_CHECKS: usize = 5;

/// API for credential status functionality.
#[async_trait]
pub trait StatusAPI {
    /// Issues a status list credential by handing the assembled envelope to
    /// the external signer.
    async fn issue_status_list(
        list: &StatusList,
        id: &str,
        family: StatusEntryType,
        purpose: StatusPurpose,
        issuer: &str,
        signer: &dyn CredentialSigner,
    ) -> Result<Value, VeristatAPIError> {
        Ok(issue_status_list_credential(list, id, family, purpose, issuer, signer).await?)
    }

    /// Checks the status referenced by a single credential status entry.
    async fn check_status(
        entry: &CredentialStatusEntry,
        loader: &dyn DocumentLoader,
        verifier: &dyn CredentialVerifier,
    ) -> Result<StatusCheck, VeristatAPIError> {
        Ok(check_credential_status(entry, loader, verifier).await?)
    }

    /// Checks every credential status entry embedded in a credential,
    /// concurrently. Each check owns its own decoded status list, so no
    /// coordination is required between them; per-entry outcomes are returned
    /// in entry order.
    async fn check_credential(
        credential: &Value,
        loader: &dyn DocumentLoader,
        verifier: &dyn CredentialVerifier,
    ) -> Result<Vec<Result<StatusCheck, CredentialStatusError>>, VeristatAPIError> {
        let entries = status_entries(credential)?;
        let checks: Vec<_> = entries
            .iter()
            .map(|entry| check_credential_status(entry, loader, verifier))
            .collect();
        let results: Vec<Result<StatusCheck, CredentialStatusError>> = stream::iter(checks)
            .buffered(CONCURRENT_CHECKS)
            .collect()
            .await;
        Ok(results)
    }
}
