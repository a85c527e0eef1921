//! Fixed-length, byte-backed bit vector with a compressed, URL-safe text encoding.
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use thiserror::Error;

/// An error relating to a [`Bitstring`].
#[derive(Error, Debug)]
pub enum BitstringError {
    /// Bitstring constructed with an unusable length.
    #[error("bitstring length must be a positive integer: {0}")]
    InvalidLength(usize),
    /// Position access outside the bounds of the bitstring.
    #[error("position out of range 0-{max}: {position}")]
    OutOfRange {
        /// The requested position.
        position: usize,
        /// The largest addressable position.
        max: usize,
    },
    /// Wrapped error for a gzip compression failure.
    #[error("failed to compress bitstring: {0}")]
    Compression(std::io::Error),
    /// Wrapped error for a gzip decompression failure.
    #[error("failed to decompress encoded bitstring: {0}")]
    Decompression(std::io::Error),
    /// Wrapped error for a base64url decoding failure.
    #[error("failed to decode base64url text: {0}")]
    Decoding(base64::DecodeError),
}

/// Mapping of bit index 0 onto the most- or least-significant bit within a byte.
///
/// The historical `littleEndianBits` flag of earlier tooling named the same
/// concept: `littleEndianBits = true` corresponds to [`BitOrder::LeftToRight`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BitOrder {
    /// Bit index 0 is the most significant bit of byte 0.
    #[default]
    LeftToRight,
    /// Bit index 0 is the least significant bit of byte 0.
    RightToLeft,
}

/// A fixed-length bit vector backed by a byte buffer.
///
/// The length is immutable after construction; individual bits are mutable in
/// place. Constructed either zeroed from a bit length ([`Bitstring::new`]) or
/// wrapping an existing buffer ([`Bitstring::from_bytes`]), never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstring {
    length: usize,
    bits: Vec<u8>,
    bit_order: BitOrder,
}

impl Bitstring {
    /// Constructs a zeroed bitstring holding `length` bits.
    pub fn new(length: usize, bit_order: BitOrder) -> Result<Self, BitstringError> {
        if length == 0 {
            return Err(BitstringError::InvalidLength(length));
        }
        Ok(Self {
            length,
            bits: vec![0u8; (length + 7) / 8],
            bit_order,
        })
    }

    /// Constructs a bitstring wrapping an existing byte buffer, with
    /// `length = bytes.len() * 8`.
    pub fn from_bytes(bytes: Vec<u8>, bit_order: BitOrder) -> Result<Self, BitstringError> {
        if bytes.is_empty() {
            return Err(BitstringError::InvalidLength(0));
        }
        Ok(Self {
            length: bytes.len() * 8,
            bits: bytes,
            bit_order,
        })
    }

    /// Constructs a bitstring from a buffer using the legacy `littleEndianBits`
    /// flag, where `true` maps onto [`BitOrder::LeftToRight`].
    #[deprecated(note = "use `from_bytes` with an explicit `BitOrder`")]
    pub fn from_bytes_little_endian_bits(
        bytes: Vec<u8>,
        little_endian_bits: bool,
    ) -> Result<Self, BitstringError> {
        let bit_order = if little_endian_bits {
            BitOrder::LeftToRight
        } else {
            BitOrder::RightToLeft
        };
        Self::from_bytes(bytes, bit_order)
    }

    /// The number of addressable bits.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the bitstring holds no bits. Always false for a constructed
    /// bitstring, provided for completeness of the container interface.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The ordering convention mapping bit indices onto bits within bytes.
    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    /// The raw backing bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Reads the bit at `position`.
    pub fn get(&self, position: usize) -> Result<bool, BitstringError> {
        let (byte_index, shift) = self.address(position)?;
        Ok(self.bits[byte_index] & (1 << shift) != 0)
    }

    /// Writes the bit at `position`. The boolean type check of dynamically
    /// typed implementations is statically guaranteed here.
    pub fn set(&mut self, position: usize, value: bool) -> Result<(), BitstringError> {
        let (byte_index, shift) = self.address(position)?;
        if value {
            self.bits[byte_index] |= 1 << shift;
        } else {
            self.bits[byte_index] &= !(1 << shift);
        }
        Ok(())
    }

    /// Maps a bit position onto its byte index and bit shift, enforcing the
    /// range invariant `0 <= position < length`.
    fn address(&self, position: usize) -> Result<(usize, u32), BitstringError> {
        if position >= self.length {
            return Err(BitstringError::OutOfRange {
                position,
                max: self.length - 1,
            });
        }
        let shift = match self.bit_order {
            BitOrder::LeftToRight => 7 - (position % 8) as u32,
            BitOrder::RightToLeft => (position % 8) as u32,
        };
        Ok((position / 8, shift))
    }

    /// Gzip-compresses the raw byte buffer. Deterministic for identical input.
    pub fn compress(&self) -> Result<Vec<u8>, BitstringError> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&self.bits)
            .map_err(BitstringError::Compression)?;
        encoder.finish().map_err(BitstringError::Compression)
    }

    /// Gunzips a compressed buffer back into raw bytes.
    pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, BitstringError> {
        let mut decoder = GzDecoder::new(bytes);
        let mut buffer = Vec::new();
        decoder
            .read_to_end(&mut buffer)
            .map_err(BitstringError::Decompression)?;
        Ok(buffer)
    }

    /// Encodes the buffer as base64url (no padding) of its gzip compression.
    pub fn encode(&self) -> Result<String, BitstringError> {
        Ok(base64::encode_config(
            self.compress()?,
            base64::URL_SAFE_NO_PAD,
        ))
    }

    /// Decodes base64url (no padding) text back into the raw byte buffer,
    /// distinguishing base64 failures from decompression failures.
    pub fn decode(text: &str) -> Result<Vec<u8>, BitstringError> {
        let compressed = base64::decode_config(text, base64::URL_SAFE_NO_PAD)
            .map_err(BitstringError::Decoding)?;
        Self::decompress(&compressed)
    }
}
