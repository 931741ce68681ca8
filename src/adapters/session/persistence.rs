//! # Workspace Persistence Layer
//!
//! Serialization and deserialization of a whole session as one unit.
//!
//! ## Format
//!
//! ```text
//! [Preamble: 12 bytes]
//!   - Magic: "GSW\0" (4 bytes)
//!   - Version: u32 (4 bytes)
//!   - Part count: u32 (4 bytes, always 3)
//!
//! [Parts: variable, in order common header, header, workspace]
//!   For each part:
//!     - Length: u64 (8 bytes)
//!     - Body: bincode, fixed-width integers (length bytes)
//! ```
//!
//! All integers are little-endian. Anything else (short input, wrong
//! magic, unknown version, wrong part count, undecodable body, trailing
//! bytes) is rejected as `SessionError::Format`. A value serde cannot
//! write, such as a non-UTF-8 path, fails encoding with `SessionError::Encode`.
//!
//! Files are written to a temporary sibling first and renamed into place,
//! so a reader never observes a partially written unit under the final name.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::error::{SessionError, SessionResult};
use super::header::{CommonHeader, Header};
use crate::core::{Entity, Identified};

/// Magic bytes for the workspace file format
const MAGIC: &[u8; 4] = b"GSW\0";

/// Current format version
pub const FORMAT_VERSION: u32 = 1;

/// Number of top-level parts in a unit
const PART_COUNT: u32 = 3;

const PREAMBLE_LEN: usize = 12;

/// A decoded unit
#[derive(Debug, Clone)]
pub struct SavedUnit {
    pub common_header: CommonHeader,
    pub header: Header,
    pub workspace: Vec<Entity>,
}

fn encode_part<T: Serialize + ?Sized>(buf: &mut Vec<u8>, part: &T, label: &str) -> SessionResult<()> {
    let body = bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .serialize(part)
        .map_err(|e| SessionError::Encode(format!("{}: {}", label, e)))?;
    buf.write_all(&(body.len() as u64).to_le_bytes())?;
    buf.write_all(&body)?;
    Ok(())
}

/// Serialize the three parts into one unit
pub fn encode(
    common_header: &CommonHeader,
    header: &Header,
    workspace: &[Entity],
) -> SessionResult<Vec<u8>> {
    let mut buf = Vec::new();

    // Preamble
    buf.write_all(MAGIC)?;
    buf.write_all(&FORMAT_VERSION.to_le_bytes())?;
    buf.write_all(&PART_COUNT.to_le_bytes())?;

    // Parts
    encode_part(&mut buf, common_header, "common header")?;
    encode_part(&mut buf, header, "header")?;
    encode_part(&mut buf, workspace, "workspace")?;

    Ok(buf)
}

/// Reads length-prefixed parts off a byte slice
struct PartReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PartReader<'a> {
    fn take(&mut self, len: usize, label: &str) -> SessionResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| SessionError::format(format!("truncated {}", label)))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn u32(&mut self, label: &str) -> SessionResult<u32> {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(self.take(4, label)?);
        Ok(u32::from_le_bytes(bytes))
    }

    fn u64(&mut self, label: &str) -> SessionResult<u64> {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(self.take(8, label)?);
        Ok(u64::from_le_bytes(bytes))
    }

    fn part<T: DeserializeOwned>(&mut self, label: &str) -> SessionResult<T> {
        let len = self.u64(label)?;
        let len = usize::try_from(len)
            .map_err(|_| SessionError::format(format!("{} length {} too large", label, len)))?;
        let body = self.take(len, label)?;
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_limit(len as u64)
            .deserialize(body)
            .map_err(|e| SessionError::format(format!("cannot decode {}: {}", label, e)))
    }

    fn is_exhausted(&self) -> bool {
        self.pos == self.data.len()
    }
}

/// Deserialize a unit, validating its structure
pub fn decode(data: &[u8]) -> SessionResult<SavedUnit> {
    if data.len() < PREAMBLE_LEN {
        return Err(SessionError::format("file too short for a preamble"));
    }
    let mut reader = PartReader { data, pos: 0 };

    if reader.take(4, "magic")? != MAGIC {
        return Err(SessionError::format("invalid magic bytes"));
    }

    let version = reader.u32("version")?;
    if version != FORMAT_VERSION {
        return Err(SessionError::format(format!("unsupported version {}", version)));
    }

    let parts = reader.u32("part count")?;
    if parts != PART_COUNT {
        return Err(SessionError::format(format!(
            "expected {} top-level parts, found {}",
            PART_COUNT, parts
        )));
    }

    let common_header: CommonHeader = reader.part("common header")?;
    let header: Header = reader.part("header")?;
    let workspace: Vec<Entity> = reader.part("workspace")?;

    if !reader.is_exhausted() {
        return Err(SessionError::format("trailing bytes after workspace"));
    }

    let mut seen = HashSet::with_capacity(workspace.len());
    if let Some(dup) = workspace.iter().find(|e| !seen.insert(e.uid())) {
        return Err(SessionError::format(format!("duplicate uid {} in workspace", dup.uid())));
    }

    Ok(SavedUnit {
        common_header,
        header,
        workspace,
    })
}

/// Write `bytes` to `path` through a temporary sibling and a rename
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = temp_sibling(path);

    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workspace".to_string());
    path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
}
