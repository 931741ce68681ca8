//! # Session
//!
//! Owns a workspace of domain objects plus its headers, and saves or
//! restores all of it as one unit.
//!
//! - Workspace: ordered entities, uid unique across members
//! - Header: free-form metadata, `filename`/`savedate` written on save
//! - Common header: version markers fixed at creation
//!
//! Every mutator takes `&mut self`, so the guard and the effect inside
//! `save_to_file` and `load_file` cannot interleave with another mutation of
//! the same session.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut session = Session::new();
//! session.append(Vector::new(vec![1.0, 2.0], "offset"))?;
//! session.save_to_file(Some(Path::new("work/part.gsw")), false)?;
//!
//! let mut restored = Session::new();
//! restored.load_file(Some(Path::new("work/part.gsw")), false)?;
//! let hits = restored.search_by_name("ofset");
//! ```

mod error;
mod header;
mod persistence;

pub use error::{SessionError, SessionResult};
pub use header::{
    CommonHeader, Header, HeaderValue, FILENAME_KEY, FORMAT_VERSION_KEY, LIBRARY_VERSION_KEY,
    SAVEDATE_KEY,
};
pub use persistence::{decode, encode, SavedUnit, FORMAT_VERSION};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::core::similarity::Similarity;
use crate::core::{Contour, Entity, Identified, SessionConfig, Uid};
use crate::ports::Lookup;

/// A workspace with its headers
#[derive(Debug, Clone)]
pub struct Session {
    workspace: Vec<Entity>,
    header: Header,
    common_header: CommonHeader,
    config: SessionConfig,
}

impl Session {
    /// Empty session with default configuration
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            workspace: Vec::new(),
            header: Header::new(),
            common_header: CommonHeader::current(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Objects in insertion order
    pub fn workspace(&self) -> &[Entity] {
        &self.workspace
    }

    pub fn len(&self) -> usize {
        self.workspace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspace.is_empty()
    }

    pub fn get_mut(&mut self, uid: Uid) -> Option<&mut Entity> {
        self.workspace.iter_mut().find(|e| e.uid() == uid)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Replace the header wholesale
    pub fn set_header(&mut self, header: Header) {
        self.header = header;
    }

    pub fn clear_header(&mut self) {
        self.header = Header::new();
    }

    pub fn common_header(&self) -> &CommonHeader {
        &self.common_header
    }

    /// Empty contour searching and comparing like the session
    pub fn new_contour(&self, name: impl Into<String>) -> Contour {
        Contour::new(name).with_config(&self.config)
    }

    /// Add an object at the end of the workspace
    ///
    /// Fails with `DuplicateUid` when the uid is already present.
    pub fn append(&mut self, obj: impl Into<Entity>) -> SessionResult<Uid> {
        let entity = obj.into();
        let uid = entity.uid();
        if self.contains(uid) {
            return Err(SessionError::DuplicateUid(uid));
        }
        debug!(%uid, kind = entity.kind(), "appending to workspace");
        self.workspace.push(entity);
        Ok(uid)
    }

    /// Remove the entry sharing `obj`'s uid
    pub fn delete<O: Identified + ?Sized>(&mut self, obj: &O) -> SessionResult<Entity> {
        self.delete_uid(obj.uid())
    }

    pub fn delete_uid(&mut self, uid: Uid) -> SessionResult<Entity> {
        let index = self
            .workspace
            .iter()
            .position(|e| e.uid() == uid)
            .ok_or(SessionError::NotFound(uid))?;
        debug!(%uid, index, "deleting from workspace");
        Ok(self.workspace.remove(index))
    }

    /// Remove every object; headers are untouched
    pub fn wipe_workspace(&mut self) {
        debug!(count = self.workspace.len(), "wiping workspace");
        self.workspace.clear();
    }

    /// Merge entries into the header, overwriting existing keys
    pub fn add_to_header<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<HeaderValue>,
    {
        self.header.merge(entries);
    }

    fn resolve_path(&self, path: Option<&Path>) -> SessionResult<PathBuf> {
        match path {
            Some(p) => Ok(p.to_path_buf()),
            None => self
                .header
                .filename()
                .map(Path::to_path_buf)
                .ok_or(SessionError::MissingFilename),
        }
    }

    /// Encode the session as it stands, without touching the filesystem
    pub fn to_bytes(&self) -> SessionResult<Vec<u8>> {
        encode(&self.common_header, &self.header, &self.workspace)
    }

    /// Build a session from an encoded unit
    pub fn from_bytes(data: &[u8]) -> SessionResult<Self> {
        let mut session = Self::new();
        session.replace_with(decode(data)?);
        Ok(session)
    }

    fn replace_with(&mut self, unit: SavedUnit) {
        self.common_header = unit.common_header;
        self.header = unit.header;
        self.workspace = unit.workspace;
    }

    /// Save headers and workspace to one file
    ///
    /// The target is `path`, or the header's `filename` when `path` is
    /// `None`. The written header carries the resolved `filename` and a
    /// fresh `savedate`; the in-memory header is updated only once the file
    /// is in place. Missing parent directories are created.
    pub fn save_to_file(&mut self, path: Option<&Path>, overwrite: bool) -> SessionResult<PathBuf> {
        let target = self.resolve_path(path)?;
        if target.exists() && !overwrite {
            return Err(SessionError::FileAlreadyExists(target));
        }
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut header = self.header.clone();
        header.stamp_save(&target, Utc::now());
        let bytes = encode(&self.common_header, &header, &self.workspace)?;
        persistence::write_atomically(&target, &bytes)?;

        self.header = header;
        info!(
            path = %target.display(),
            objects = self.workspace.len(),
            bytes = bytes.len(),
            "saved workspace"
        );
        Ok(target)
    }

    /// Replace headers and workspace with the contents of a file
    ///
    /// A non-empty workspace is only replaced when `overwrite` is set. The
    /// path resolves as in `save_to_file`. Nothing changes on failure.
    pub fn load_file(&mut self, path: Option<&Path>, overwrite: bool) -> SessionResult<PathBuf> {
        if !self.workspace.is_empty() && !overwrite {
            return Err(SessionError::WorkspaceNotEmpty {
                len: self.workspace.len(),
            });
        }
        let source = self.resolve_path(path)?;
        let data = fs::read(&source)?;
        let unit = decode(&data).map_err(|e| {
            error!(path = %source.display(), error = %e, "rejected workspace file");
            e
        })?;

        if !self.workspace.is_empty() {
            warn!(
                discarded = self.workspace.len(),
                path = %source.display(),
                "overwriting non-empty workspace"
            );
        }
        self.replace_with(unit);
        info!(
            path = %source.display(),
            objects = self.workspace.len(),
            "loaded workspace"
        );
        Ok(source)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookup for Session {
    type Item = Entity;

    fn members(&self) -> &[Entity] {
        &self.workspace
    }

    fn fuzzy_threshold(&self) -> u8 {
        self.config.fuzzy_threshold
    }

    fn similarity(&self) -> &dyn Similarity {
        self.config.similarity.as_ref()
    }
}
