// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snapshot file header and footer.
//!
//! The header is 32 bytes of fixed-size fields, read before anything else.
//! It says how long each section is, so the reader can check the total file
//! size before decoding a single posting.
//!
//! The footer is 8 bytes: a CRC32 over everything before it, plus the header
//! magic reversed. A bad footer means a torn or corrupted write.

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "LEXS" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x4C, 0x45, 0x58, 0x53];

/// Footer magic: "SXEL"
pub const FOOTER_MAGIC: [u8; 4] = [0x53, 0x58, 0x45, 0x4C];

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (a snapshot file is still untrusted input)
// ============================================================================

/// Maximum file size: 2 GiB
pub const MAX_FILE_SIZE: usize = 2 * 1024 * 1024 * 1024;

/// Maximum number of documents
pub const MAX_DOC_COUNT: u32 = 100_000_000;

/// Maximum number of fields
pub const MAX_FIELD_COUNT: u32 = 1_024;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

// ============================================================================
// HEADER
// ============================================================================

/// Fixed-size snapshot header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u8,
    pub generation: u64,
    pub doc_count: u32,
    pub field_count: u32,
    pub stored_len: u32,
    pub fields_len: u32,
}

impl SnapshotHeader {
    // 4 (magic) + 1 (version) + 3 (reserved) + 8 (generation) + 4*4 (u32s) = 32
    pub const SIZE: usize = 32;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[0u8; 3])?; // reserved
        w.write_all(&self.generation.to_le_bytes())?;
        w.write_all(&self.doc_count.to_le_bytes())?;
        w.write_all(&self.field_count.to_le_bytes())?;
        w.write_all(&self.stored_len.to_le_bytes())?;
        w.write_all(&self.fields_len.to_le_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected LEXS, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 28]; // 32 - 4 (magic)
        r.read_exact(&mut buf)?;

        let u32_at = |i: usize| u32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
        let mut generation = [0u8; 8];
        generation.copy_from_slice(&buf[4..12]);

        Ok(Self {
            version: buf[0],
            // buf[1..4] is reserved
            generation: u64::from_le_bytes(generation),
            doc_count: u32_at(12),
            field_count: u32_at(16),
            stored_len: u32_at(20),
            fields_len: u32_at(24),
        })
    }

    /// Size of the whole file this header describes, footer included.
    pub fn total_size(&self) -> usize {
        Self::SIZE + self.stored_len as usize + self.fields_len as usize + SnapshotFooter::SIZE
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFooter {
    /// CRC32 of header + all sections (everything before the footer)
    pub crc32: u32,
}

impl SnapshotFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "File too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected SXEL, got {:?}", magic),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
