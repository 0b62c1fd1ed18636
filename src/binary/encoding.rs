// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint, length-prefixed strings, front coding.
//!
//! Varint for integers that are usually small (doc deltas, term frequencies,
//! lengths). Front compression for the sorted term dictionary, where
//! neighbours share long prefixes after stemming.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>
//!
//! - **Front Compression**: Witten, Moffat, Bell (1999): "Managing Gigabytes",
//!   §3.3 "Front Coding".

use std::io;

use super::header::MAX_VARINT_BYTES;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Fails on an empty buffer, a buffer that ends mid-varint, or a varint
/// longer than MAX_VARINT_BYTES.
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty buffer for varint",
        ));
    }

    let mut result: u64 = 0;
    let mut shift = 0;

    for (i, &byte) in bytes.iter().take(MAX_VARINT_BYTES).enumerate() {
        let low = u64::from(byte & 0x7F);
        if shift == 63 && low > 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Varint overflows u64",
            ));
        }
        result |= low << shift;
        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }
        shift += 7;
    }

    if bytes.len() >= MAX_VARINT_BYTES {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

/// Length-prefixed UTF-8 string.
pub fn encode_str(value: &str, buf: &mut Vec<u8>) {
    encode_varint(value.len() as u64, buf);
    buf.extend_from_slice(value.as_bytes());
}

// ============================================================================
// FRONT CODING
// ============================================================================

/// Calculate the common prefix length between two byte slices.
fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Append `term` front-coded against `prev`.
///
/// Format: [shared_prefix_len: varint][suffix_len: varint][suffix: bytes]
pub fn encode_front_coded(prev: &str, term: &str, out: &mut Vec<u8>) {
    let bytes = term.as_bytes();
    let shared = common_prefix_len(prev.as_bytes(), bytes);
    let suffix = &bytes[shared..];

    encode_varint(shared as u64, out);
    encode_varint(suffix.len() as u64, out);
    out.extend_from_slice(suffix);
}

/// Encode sorted terms with front compression.
///
/// - "cat"     -> [0][3]["cat"]
/// - "catalog" -> [3][4]["alog"]
/// - "dog"     -> [0][3]["dog"]
pub fn encode_terms<'a>(terms: impl IntoIterator<Item = &'a str>, out: &mut Vec<u8>) {
    let mut prev = "";
    for term in terms {
        encode_front_coded(prev, term, out);
        prev = term;
    }
}

// ============================================================================
// READER
// ============================================================================

/// Bounds-checked cursor over one section.
#[derive(Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos == self.bytes.len()
    }

    pub fn varint(&mut self) -> io::Result<u64> {
        let (value, consumed) = decode_varint(&self.bytes[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    pub fn u32(&mut self) -> io::Result<u32> {
        let value = self.varint()?;
        u32::try_from(value).map_err(|_| invalid(format!("Value {} does not fit in u32", value)))
    }

    /// A count of items that each take at least one byte. Anything larger
    /// than the remaining input is corrupt, which caps allocations.
    pub fn count(&mut self) -> io::Result<usize> {
        let count = self.varint()?;
        let remaining = self.remaining();
        if count > remaining as u64 {
            return Err(invalid(format!(
                "Count {} exceeds available bytes {}",
                count, remaining
            )));
        }
        Ok(count as usize)
    }

    pub fn bytes(&mut self, len: usize) -> io::Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("Truncated: need {} bytes, have {}", len, self.remaining()),
                )
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn string(&mut self) -> io::Result<String> {
        let len = self.count()?;
        let bytes = self.bytes(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|e| invalid(format!("Invalid UTF-8: {}", e)))
    }

    /// Read one front-coded term, given the previous one.
    pub fn front_coded(&mut self, prev: &str) -> io::Result<String> {
        let shared = self.varint()? as usize;
        if shared > prev.len() {
            return Err(invalid(format!(
                "Invalid shared prefix length {} (prev term len {})",
                shared,
                prev.len()
            )));
        }
        let suffix_len = self.count()?;
        let suffix = self.bytes(suffix_len)?;

        let mut term = prev.as_bytes()[..shared].to_vec();
        term.extend_from_slice(suffix);
        String::from_utf8(term).map_err(|e| invalid(format!("Invalid UTF-8 in term: {}", e)))
    }
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
