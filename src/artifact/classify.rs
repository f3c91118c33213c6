//! Artifact classification by name suffix and byte signature

use super::{
    display_name, ArtifactError, ArtifactKind, ArtifactResult, ARCHIVE_SUFFIX, COMPILED_SUFFIX,
    SOURCE_SUFFIX,
};
use memchr::memmem;
use std::path::Path;
use tracing::debug;

/// Two-byte marker that starts a ZIP local header / central structure
pub const ARCHIVE_SIGNATURE: &[u8] = b"PK";

/// Classify a filesystem entry.
///
/// Directories win over suffixes. Suffixes are matched case-insensitively.
/// Anything else is scanned for [`ARCHIVE_SIGNATURE`]; the scan reads the
/// whole file, so it costs O(file size).
pub fn classify(path: &Path) -> ArtifactResult<ArtifactKind> {
    if path.is_dir() {
        return Ok(ArtifactKind::Directory);
    }

    let name = display_name(path).to_lowercase();

    if name.ends_with(SOURCE_SUFFIX) {
        return Ok(ArtifactKind::SourceUnit);
    }
    if name.ends_with(COMPILED_SUFFIX) {
        return Ok(ArtifactKind::CompiledUnit);
    }
    if name.ends_with(ARCHIVE_SUFFIX) {
        return Ok(ArtifactKind::Archive);
    }

    let bytes = std::fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
    if contains_archive_signature(&bytes) {
        debug!("{} carries an embedded archive signature", path.display());
        return Ok(ArtifactKind::EmbeddedArchive);
    }

    Err(ArtifactError::UnsupportedArtifact {
        path: path.to_path_buf(),
    })
}

/// Offset of the first archive signature, if any
pub(crate) fn find_archive_signature(bytes: &[u8]) -> Option<usize> {
    memmem::find(bytes, ARCHIVE_SIGNATURE)
}

pub fn contains_archive_signature(bytes: &[u8]) -> bool {
    find_archive_signature(bytes).is_some()
}
