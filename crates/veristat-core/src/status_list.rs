//! Status list semantics over a [`Bitstring`] with the protocol-constant bit order.
use crate::bitstring::{BitOrder, Bitstring, BitstringError};
use thiserror::Error;

/// An error relating to a [`StatusList`].
#[derive(Error, Debug)]
pub enum StatusListError {
    /// Status list constructed with an unusable length.
    #[error("status list length must be a positive integer: {0}")]
    InvalidLength(usize),
    /// Index access outside the bounds of the status list.
    #[error("status list index out of range 0-{max}: {index}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The largest valid index.
        max: usize,
    },
    /// Wrapped error for an encoding failure.
    #[error("failed to encode status list: {0}")]
    Encode(BitstringError),
    /// Wrapped error for encoded list text that is not valid compressed bit data.
    #[error("cannot decode encoded list: {0}")]
    Decode(BitstringError),
}

/// A status list assigning one boolean status slot per credential index.
///
/// The bit ordering is fixed to [`BitOrder::LeftToRight`]: index 0 is the
/// most significant bit of byte 0. This is a protocol constant, not a
/// configuration point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusList {
    bitstring: Bitstring,
}

impl StatusList {
    /// Constructs a status list of `length` zeroed entries.
    pub fn new(length: usize) -> Result<Self, StatusListError> {
        let bitstring = Bitstring::new(length, BitOrder::LeftToRight)
            .map_err(|_| StatusListError::InvalidLength(length))?;
        Ok(Self { bitstring })
    }

    /// Reconstructs a status list from a raw byte buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, StatusListError> {
        let bitstring = Bitstring::from_bytes(bytes, BitOrder::LeftToRight)
            .map_err(|_| StatusListError::InvalidLength(0))?;
        Ok(Self { bitstring })
    }

    /// The number of status slots.
    pub fn len(&self) -> usize {
        self.bitstring.len()
    }

    /// Whether the list holds no slots. Always false for a constructed list.
    pub fn is_empty(&self) -> bool {
        self.bitstring.is_empty()
    }

    /// Sets the status of the credential slot at `index`.
    pub fn set_status(&mut self, index: usize, status: bool) -> Result<(), StatusListError> {
        self.bitstring
            .set(index, status)
            .map_err(|_| self.out_of_range(index))
    }

    /// Reads the status of the credential slot at `index`.
    pub fn get_status(&self, index: usize) -> Result<bool, StatusListError> {
        self.bitstring
            .get(index)
            .map_err(|_| self.out_of_range(index))
    }

    fn out_of_range(&self, index: usize) -> StatusListError {
        StatusListError::OutOfRange {
            index,
            max: self.len() - 1,
        }
    }

    /// Encodes the list as base64url (no padding) of its gzipped byte buffer.
    /// A pure function of the bit contents: identical bits encode identically.
    pub fn encode(&self) -> Result<String, StatusListError> {
        self.bitstring.encode().map_err(StatusListError::Encode)
    }

    /// Decodes encoded list text back into a status list.
    ///
    /// The declared bit length is not part of the wire text, so the decoded
    /// list length is the byte-buffer length times eight.
    pub fn decode(encoded_list: &str) -> Result<Self, StatusListError> {
        let bytes = Bitstring::decode(encoded_list).map_err(StatusListError::Decode)?;
        Self::from_bytes(bytes)
    }
}
