//! Error type and conversions.
use thiserror::Error;
use veristat_core::issuer::IssuerError;
use veristat_core::status_list::StatusListError;
use veristat_core::verifier::CredentialStatusError;

/// Veristat API error type.
#[derive(Error, Debug)]
pub enum VeristatAPIError {
    /// Wrapped credential status error.
    #[error("Credential status error: {0}")]
    CredentialStatus(#[from] CredentialStatusError),
    /// Wrapped issuer error.
    #[error("Issuer error: {0}")]
    Issuer(#[from] IssuerError),
    /// Wrapped status list error.
    #[error("Status list error: {0}")]
    StatusList(#[from] StatusListError),
}
