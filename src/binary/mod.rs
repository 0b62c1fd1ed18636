// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk snapshot format.
//!
//! A committed snapshot can be persisted so a restarted process serves the
//! last good index immediately instead of waiting for a rebuild. The file is
//! written to a temporary sibling, fsynced, then renamed over the old one, so
//! the path always holds either the previous complete snapshot or the new one.
//!
//! # Security Considerations
//!
//! Snapshot files are parsed as untrusted input:
//! - All size fields are validated against MAX_* constants
//! - Every count is checked against the bytes remaining before allocating
//! - CRC32 footer detects corruption/truncation
//! - The decoded snapshot goes through `Snapshot::validate` before use
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (32 bytes)                                          │
//! │   magic: [u8; 4] = "LEXS"                                  │
//! │   version: u8 = 1, reserved: [u8; 3]                       │
//! │   generation: u64                                          │
//! │   doc_count: u32, field_count: u32                         │
//! │   stored_len: u32, fields_len: u32                         │
//! ├────────────────────────────────────────────────────────────┤
//! │ STORED (per doc: count, then (name, value) strings)        │
//! ├────────────────────────────────────────────────────────────┤
//! │ FIELDS (per field, by name):                               │
//! │   name, doc_count lengths, term_count,                     │
//! │   per term (sorted, front-coded):                          │
//! │     doc_freq, then (doc_id delta, term_freq) varints       │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "SXEL"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod encoding;
mod header;

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use encoding::{
    decode_varint, encode_front_coded, encode_str, encode_terms, encode_varint, ByteReader,
};
pub use header::{
    SnapshotFooter, SnapshotHeader, FOOTER_MAGIC, MAGIC, MAX_DOC_COUNT, MAX_FIELD_COUNT,
    MAX_FILE_SIZE, VERSION,
};

use crate::error::{Error, Result};
use crate::index::{FieldIndex, Snapshot, StoredDocument};
use crate::types::{DocId, Posting, PostingList};

fn format_error(context: &str, err: io::Error) -> Error {
    Error::Format(format!("{}: {}", context, err))
}

fn section_len(len: usize, name: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::Format(format!("{} section too large ({} bytes)", name, len)))
}

// ============================================================================
// ENCODE
// ============================================================================

fn encode_stored(stored: &[StoredDocument], buf: &mut Vec<u8>) {
    for doc in stored {
        encode_varint(doc.len() as u64, buf);
        for (name, value) in doc.fields() {
            encode_str(name, buf);
            encode_str(value, buf);
        }
    }
}

fn encode_field(name: &str, index: &FieldIndex, buf: &mut Vec<u8>) {
    encode_str(name, buf);
    for &length in &index.lengths {
        encode_varint(u64::from(length), buf);
    }

    let terms = index.sorted_terms();
    encode_varint(terms.len() as u64, buf);

    let mut prev: &str = "";
    for term in terms {
        encode_front_coded(prev, term, buf);

        if let Some(list) = index.postings(term) {
            encode_varint(list.len() as u64, buf);
            let mut last = 0u32;
            for posting in list {
                encode_varint(u64::from(posting.doc_id.get() - last), buf);
                encode_varint(u64::from(posting.term_freq), buf);
                last = posting.doc_id.get();
            }
        }
        prev = term;
    }
}

/// Serialize `snapshot` into the v1 format.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>> {
    let mut stored = Vec::new();
    encode_stored(&snapshot.stored, &mut stored);

    let mut fields = Vec::new();
    for (name, index) in snapshot.fields() {
        encode_field(name, index, &mut fields);
    }

    let doc_count = u32::try_from(snapshot.doc_count())
        .ok()
        .filter(|&n| n <= MAX_DOC_COUNT)
        .ok_or_else(|| Error::Format(format!("too many documents: {}", snapshot.doc_count())))?;

    let header = SnapshotHeader {
        version: VERSION,
        generation: snapshot.generation(),
        doc_count,
        field_count: section_len(snapshot.fields.len(), "field")?,
        stored_len: section_len(stored.len(), "stored")?,
        fields_len: section_len(fields.len(), "fields")?,
    };

    let mut out = Vec::with_capacity(header.total_size());
    header.write(&mut out)?;
    out.extend_from_slice(&stored);
    out.extend_from_slice(&fields);
    let crc32 = SnapshotFooter::compute_crc32(&out);
    SnapshotFooter { crc32 }.write(&mut out)?;
    Ok(out)
}

// ============================================================================
// DECODE
// ============================================================================

fn decode_stored(bytes: &[u8], doc_count: usize) -> io::Result<Vec<StoredDocument>> {
    let mut reader = ByteReader::new(bytes);
    if doc_count > reader.remaining() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} documents cannot fit in {} bytes", doc_count, bytes.len()),
        ));
    }

    let mut stored = Vec::with_capacity(doc_count);
    for _ in 0..doc_count {
        let n = reader.count()?;
        let mut fields = Vec::with_capacity(n);
        for _ in 0..n {
            let name = reader.string()?;
            let value = reader.string()?;
            fields.push((name, value));
        }
        stored.push(StoredDocument::new(fields));
    }
    if !reader.is_exhausted() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Trailing bytes after stored documents",
        ));
    }
    Ok(stored)
}

fn decode_postings(reader: &mut ByteReader<'_>) -> io::Result<PostingList> {
    let doc_freq = reader.count()?;
    let mut postings = Vec::with_capacity(doc_freq);
    let mut last = 0u32;
    for i in 0..doc_freq {
        let delta = reader.u32()?;
        let doc_id = if i == 0 {
            delta
        } else {
            last.checked_add(delta).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "Doc id delta overflows u32")
            })?
        };
        let term_freq = reader.u32()?;
        postings.push(Posting {
            doc_id: DocId(doc_id),
            term_freq,
        });
        last = doc_id;
    }
    Ok(PostingList { postings, doc_freq })
}

fn decode_fields(
    bytes: &[u8],
    field_count: usize,
    doc_count: usize,
) -> io::Result<BTreeMap<String, FieldIndex>> {
    let mut reader = ByteReader::new(bytes);
    let mut fields = BTreeMap::new();

    for _ in 0..field_count {
        let name = reader.string()?;
        if doc_count > reader.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated lengths for field '{}'", name),
            ));
        }
        let lengths = (0..doc_count)
            .map(|_| reader.u32())
            .collect::<io::Result<Vec<u32>>>()?;

        let term_count = reader.count()?;
        let mut terms = HashMap::with_capacity(term_count);
        let mut prev = String::new();
        for _ in 0..term_count {
            let term = reader.front_coded(&prev)?;
            if !prev.is_empty() && term <= prev {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Terms of field '{}' out of order at '{}'", name, term),
                ));
            }
            let list = decode_postings(&mut reader)?;
            terms.insert(term.clone(), list);
            prev = term;
        }

        if fields
            .insert(name.clone(), FieldIndex::new(terms, lengths))
            .is_some()
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Duplicate field '{}'", name),
            ));
        }
    }

    if !reader.is_exhausted() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Trailing bytes after fields",
        ));
    }
    Ok(fields)
}

/// Parse a v1 snapshot file. The result is structurally decoded but not yet
/// validated; callers should run `Snapshot::validate`.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot> {
    if bytes.len() > MAX_FILE_SIZE {
        return Err(Error::Format(format!(
            "file too large: {} bytes (max {})",
            bytes.len(),
            MAX_FILE_SIZE
        )));
    }
    if bytes.len() < SnapshotHeader::SIZE + SnapshotFooter::SIZE {
        return Err(Error::Format(format!("file too short: {} bytes", bytes.len())));
    }

    let footer = SnapshotFooter::read(bytes).map_err(|e| format_error("footer", e))?;
    let content = &bytes[..bytes.len() - SnapshotFooter::SIZE];
    let actual = SnapshotFooter::compute_crc32(content);
    if actual != footer.crc32 {
        return Err(Error::Format(format!(
            "CRC32 mismatch: expected {:08x}, got {:08x}",
            footer.crc32, actual
        )));
    }

    let header = SnapshotHeader::read(&mut &bytes[..]).map_err(|e| format_error("header", e))?;
    if header.version != VERSION {
        return Err(Error::Format(format!(
            "unsupported version {} (expected {})",
            header.version, VERSION
        )));
    }
    if header.doc_count > MAX_DOC_COUNT {
        return Err(Error::Format(format!("doc count {} exceeds limit", header.doc_count)));
    }
    if header.field_count > MAX_FIELD_COUNT {
        return Err(Error::Format(format!("field count {} exceeds limit", header.field_count)));
    }
    if header.total_size() != bytes.len() {
        return Err(Error::Format(format!(
            "size mismatch: header describes {} bytes, file has {}",
            header.total_size(),
            bytes.len()
        )));
    }

    let stored_start = SnapshotHeader::SIZE;
    let fields_start = stored_start + header.stored_len as usize;
    let fields_end = fields_start + header.fields_len as usize;

    let doc_count = header.doc_count as usize;
    let stored = decode_stored(&bytes[stored_start..fields_start], doc_count)
        .map_err(|e| format_error("stored section", e))?;
    let fields = decode_fields(
        &bytes[fields_start..fields_end],
        header.field_count as usize,
        doc_count,
    )
    .map_err(|e| format_error("fields section", e))?;

    Ok(Snapshot::from_parts(header.generation, fields, stored))
}

// ============================================================================
// STORE
// ============================================================================

/// A snapshot file on disk, replaced atomically on every save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Persist the rename itself. Not every filesystem supports this.
    #[cfg(unix)]
    fn sync_parent(&self) {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let _ = File::open(parent).and_then(|dir| dir.sync_all());
        }
    }

    #[cfg(not(unix))]
    fn sync_parent(&self) {}

    /// Write `snapshot` to `<path>.tmp`, fsync, then rename over `<path>`.
    ///
    /// On error the file at `path` is whatever it was before.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let bytes = encode_snapshot(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        let written = File::create(&temp).and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        });
        if let Err(err) = written {
            let _ = fs::remove_file(&temp);
            return Err(err.into());
        }
        fs::rename(&temp, &self.path)?;
        self.sync_parent();

        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            generation = snapshot.generation(),
            "persisted snapshot"
        );
        Ok(())
    }

    /// Load and validate the persisted snapshot. `Ok(None)` when there is no
    /// file yet.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let snapshot = decode_snapshot(&bytes)?;
        snapshot.validate()?;
        info!(
            path = %self.path.display(),
            generation = snapshot.generation(),
            docs = snapshot.doc_count(),
            "loaded snapshot"
        );
        Ok(Some(snapshot))
    }
}
