//! Session error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::{GeometryError, Uid};

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("No object with uid {0} in workspace")]
    NotFound(Uid),

    #[error("Workspace already holds an object with uid {0}")]
    DuplicateUid(Uid),

    #[error("No filename given and none stored in the header")]
    MissingFilename,

    #[error("File '{}' already exists. Set overwrite to replace it", .0.display())]
    FileAlreadyExists(PathBuf),

    #[error("Workspace is not empty ({len} objects). Set overwrite to replace it")]
    WorkspaceNotEmpty { len: usize },

    #[error("Saved workspace is not in the expected format: {0}")]
    Format(String),

    #[error("Cannot encode session: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        SessionError::Format(msg.into())
    }
}
