//! API for credential status issuance and verification.
pub mod api;
pub mod errors;
use crate::api::StatusAPI;

/// A type for implementing API traits on.
pub struct VeristatAPI;

impl StatusAPI for VeristatAPI {}
