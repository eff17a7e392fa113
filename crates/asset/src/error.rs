//! Errors produced while loading and converting OBJ data.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Which per-vertex attribute a face index refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Attribute {
    Position,
    TexCoord,
    Normal,
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Attribute::Position => "position",
            Attribute::TexCoord => "texcoord",
            Attribute::Normal => "normal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("OBJ file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to open OBJ file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Malformed OBJ line {line} ('{text}'): {reason}")]
    MalformedLine {
        line: usize,
        text: String,
        reason: String,
    },

    /// Relative (negative) indices are rejected rather than resolved.
    #[error("Unsupported relative index '{token}' on line {line}")]
    UnsupportedIndexForm { line: usize, token: String },

    #[error(
        "Face {face} corner {corner}: {attribute} index {index} out of range (len={len})"
    )]
    IndexOutOfRange {
        face: usize,
        corner: usize,
        attribute: Attribute,
        index: u32,
        len: usize,
    },

    #[error("Too many vertices in OBJ (>{})", u32::MAX)]
    TooManyVertices,
}

impl ObjError {
    pub(crate) fn malformed(line: usize, text: &str, reason: impl Into<String>) -> Self {
        ObjError::MalformedLine {
            line,
            text: text.to_owned(),
            reason: reason.into(),
        }
    }

    /// Line number the error was raised on, if it came from the parser.
    pub fn line(&self) -> Option<usize> {
        match self {
            ObjError::Io { line, .. }
            | ObjError::MalformedLine { line, .. }
            | ObjError::UnsupportedIndexForm { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type ObjResult<T> = Result<T, ObjError>;
