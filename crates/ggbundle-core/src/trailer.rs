//! Bundle trailer binary format
//!
//! A bundle is `[server bytes][payload bytes][trailer]`, where the trailer
//! occupies the last 20 bytes of the file:
//!
//! ```text
//! payload_offset : u64   byte offset of the payload from the start of the file
//! payload_size   : u64   byte length of the payload
//! magic          : u32   0x47475546 ("GGUF")
//! ```
//!
//! All integer fields are encoded **little-endian** regardless of host byte
//! order. There is no padding before or after the trailer, so for a
//! well-formed bundle of total length `L`,
//! `payload_offset + payload_size + TRAILER_SIZE == L`.
//!
//! This layout is the compatibility surface shared with any runtime that
//! extracts the embedded payload; a reader locates the payload by reading
//! the last [`TRAILER_SIZE`] bytes, checking [`BUNDLE_MAGIC`], and then
//! reading `payload_size` bytes at `payload_offset`.

use std::io::{Read, Write};
use std::ops::Range;

use crate::error::BundleError;

/// Magic number identifying a bundle trailer: the ASCII bytes "GGUF"
/// packed into a u32 (`0x47475546`).
pub const BUNDLE_MAGIC: u32 = 0x4747_5546;

/// Size of the encoded trailer in bytes (8 + 8 + 4).
pub const TRAILER_SIZE: usize = 20;

/// The fixed-size record appended to the end of every bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    /// Byte offset of the payload from the start of the bundle; always
    /// equal to the byte length of the server executable.
    pub payload_offset: u64,
    /// Byte length of the payload.
    pub payload_size: u64,
    /// Format sentinel (must be [`BUNDLE_MAGIC`]).
    pub magic: u32,
}

impl Trailer {
    /// Create a trailer describing a payload of `payload_size` bytes
    /// starting at `payload_offset`.
    pub fn new(payload_offset: u64, payload_size: u64) -> Self {
        Self {
            payload_offset,
            payload_size,
            magic: BUNDLE_MAGIC,
        }
    }

    /// Encode to a writer in little-endian format.
    pub fn encode(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writer.write_all(&self.payload_offset.to_le_bytes())?;
        writer.write_all(&self.payload_size.to_le_bytes())?;
        writer.write_all(&self.magic.to_le_bytes())?;
        Ok(())
    }

    /// Decode from a reader.
    pub fn decode(reader: &mut impl Read) -> std::io::Result<Self> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        let payload_offset = u64::from_le_bytes(buf);

        reader.read_exact(&mut buf)?;
        let payload_size = u64::from_le_bytes(buf);

        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        let magic = u32::from_le_bytes(buf);

        Ok(Self {
            payload_offset,
            payload_size,
            magic,
        })
    }

    /// Encode to a fixed-size byte array.
    pub fn to_bytes(&self) -> [u8; TRAILER_SIZE] {
        let mut buf = [0u8; TRAILER_SIZE];
        buf[0..8].copy_from_slice(&self.payload_offset.to_le_bytes());
        buf[8..16].copy_from_slice(&self.payload_size.to_le_bytes());
        buf[16..20].copy_from_slice(&self.magic.to_le_bytes());
        buf
    }

    /// Decode from a fixed-size byte array.
    pub fn from_bytes(buf: &[u8; TRAILER_SIZE]) -> Self {
        let mut offset_bytes = [0u8; 8];
        offset_bytes.copy_from_slice(&buf[0..8]);
        let mut size_bytes = [0u8; 8];
        size_bytes.copy_from_slice(&buf[8..16]);
        let mut magic_bytes = [0u8; 4];
        magic_bytes.copy_from_slice(&buf[16..20]);

        Self {
            payload_offset: u64::from_le_bytes(offset_bytes),
            payload_size: u64::from_le_bytes(size_bytes),
            magic: u32::from_le_bytes(magic_bytes),
        }
    }

    /// Check the magic number.
    pub fn validate(&self) -> Result<(), BundleError> {
        if self.magic != BUNDLE_MAGIC {
            return Err(BundleError::NotABundle {
                reason: format!("invalid trailer magic 0x{:08x}", self.magic),
            });
        }
        Ok(())
    }

    /// Byte range the payload occupies within the bundle.
    pub fn payload_range(&self) -> Range<u64> {
        self.payload_offset..self.payload_offset + self.payload_size
    }
}
