//! Input artifacts: classification and loading
//!
//! An analysis root is either a directory or a single artifact. Every
//! artifact is classified into a closed set of kinds, and each kind has
//! exactly one loading strategy that yields loadable compiled units:
//!
//! ```text
//! path ──classify──▶ ArtifactKind ──load_units──▶ Vec<CompiledUnit>
//!   .java  → SourceUnit       → compile, then the sibling .class
//!   .class → CompiledUnit     → itself
//!   .jar   → Archive          → every *.class entry
//!   other  → EmbeddedArchive  → bytes from the first "PK" onwards, as an archive
//! ```

mod classify;
mod compiler;
mod loader;

pub use classify::{classify, contains_archive_signature, ARCHIVE_SIGNATURE};
pub use compiler::{CompileOutcome, Compiler, JavacCompiler};
pub use loader::{load_units, UnitLoader};

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SOURCE_SUFFIX: &str = ".java";
pub const COMPILED_SUFFIX: &str = ".class";
pub const ARCHIVE_SUFFIX: &str = ".jar";

/// The closed set of recognised artifact kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Directory,
    SourceUnit,
    CompiledUnit,
    Archive,
    EmbeddedArchive,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Directory => write!(f, "directory"),
            ArtifactKind::SourceUnit => write!(f, "source unit"),
            ArtifactKind::CompiledUnit => write!(f, "compiled unit"),
            ArtifactKind::Archive => write!(f, "archive"),
            ArtifactKind::EmbeddedArchive => write!(f, "embedded archive"),
        }
    }
}

/// A loadable compiled unit: raw class-file bytes plus where they came from
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    /// Dotted qualified-name hint (`a/b/C.class` inside an archive → `a.b.C`)
    pub name: String,
    /// Artifact the unit was loaded from
    pub origin: PathBuf,
    pub bytes: Vec<u8>,
}

impl CompiledUnit {
    pub fn new(name: impl Into<String>, origin: &Path, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            origin: origin.to_path_buf(),
            bytes,
        }
    }
}

/// Errors raised while classifying, loading or extracting one artifact
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Unsupported artifact: {}", path.display())]
    UnsupportedArtifact { path: PathBuf },

    #[error("Compilation failed for {name}: {reason}")]
    CompileError { name: String, reason: String },

    #[error("Extraction failed for {name}: {reason}")]
    ExtractionError { name: String, reason: String },

    #[error("No embedded archive found in {}", path.display())]
    NoArchiveFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn extraction(name: impl Into<String>, reason: impl ToString) -> Self {
        ArtifactError::ExtractionError {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Short machine-friendly kind label
    pub fn kind(&self) -> &'static str {
        match self {
            ArtifactError::UnsupportedArtifact { .. } => "UnsupportedArtifact",
            ArtifactError::CompileError { .. } => "CompileError",
            ArtifactError::ExtractionError { .. } => "ExtractionError",
            ArtifactError::NoArchiveFound { .. } => "NoArchiveFound",
            ArtifactError::Io { .. } => "Io",
        }
    }
}

pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// File name of a path as a display string
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
