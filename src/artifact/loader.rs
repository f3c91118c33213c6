//! Unit loading: one strategy per artifact kind

use super::classify::find_archive_signature;
use super::{
    display_name, ArtifactError, ArtifactKind, ArtifactResult, CompiledUnit, Compiler,
    JavacCompiler, COMPILED_SUFFIX,
};
use std::collections::HashSet;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Upper bound on the buffer reserved up front for one archive entry; the
/// declared size is read from the archive and not trusted beyond this
const MAX_ENTRY_PREALLOC: u64 = 1 << 20;

/// Loads compiled units from artifacts, compiling sources on demand
#[derive(Clone)]
pub struct UnitLoader {
    compiler: Arc<dyn Compiler>,
}

impl UnitLoader {
    pub fn new(compiler: Arc<dyn Compiler>) -> Self {
        Self { compiler }
    }

    pub fn load(&self, path: &Path, kind: ArtifactKind) -> ArtifactResult<Vec<CompiledUnit>> {
        load_units(path, kind, self.compiler.as_ref())
    }
}

impl Default for UnitLoader {
    fn default() -> Self {
        Self::new(Arc::new(JavacCompiler::default()))
    }
}

/// Produce the compiled units contained in one classified artifact.
pub fn load_units(
    path: &Path,
    kind: ArtifactKind,
    compiler: &dyn Compiler,
) -> ArtifactResult<Vec<CompiledUnit>> {
    match kind {
        ArtifactKind::Directory => Err(ArtifactError::UnsupportedArtifact {
            path: path.to_path_buf(),
        }),
        ArtifactKind::SourceUnit => load_source(path, compiler).map(|unit| vec![unit]),
        ArtifactKind::CompiledUnit => load_class_file(path).map(|unit| vec![unit]),
        ArtifactKind::Archive => {
            let file = std::fs::File::open(path).map_err(|e| ArtifactError::io(path, e))?;
            read_archive(path, std::io::BufReader::new(file))
        }
        ArtifactKind::EmbeddedArchive => load_embedded(path),
    }
}

fn load_source(path: &Path, compiler: &dyn Compiler) -> ArtifactResult<CompiledUnit> {
    let name = display_name(path);
    let outcome = compiler.compile(path);
    if !outcome.is_success() {
        return Err(ArtifactError::CompileError {
            name,
            reason: outcome.reason(),
        });
    }

    let compiled = path.with_extension(COMPILED_SUFFIX.trim_start_matches('.'));
    if !compiled.is_file() {
        return Err(ArtifactError::extraction(
            name,
            format!("compiler produced no {}", display_name(&compiled)),
        ));
    }
    debug!("Compiled {} -> {}", path.display(), compiled.display());
    load_class_file(&compiled)
}

fn load_class_file(path: &Path) -> ArtifactResult<CompiledUnit> {
    let bytes = std::fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(CompiledUnit::new(stem, path, bytes))
}

fn load_embedded(path: &Path) -> ArtifactResult<Vec<CompiledUnit>> {
    let bytes = std::fs::read(path).map_err(|e| ArtifactError::io(path, e))?;
    let offset = find_archive_signature(&bytes).ok_or_else(|| ArtifactError::NoArchiveFound {
        path: path.to_path_buf(),
    })?;
    debug!(
        "Embedded archive in {} starts at byte {} of {}",
        path.display(),
        offset,
        bytes.len()
    );
    let sliced = bytes[offset..].to_vec();
    read_archive(path, Cursor::new(sliced))
}

/// Enumerate every compiled-unit entry of an archive.
///
/// Entry paths are slash-delimited; the unit name is the dotted form
/// without the suffix. Each internal path is loaded at most once.
fn read_archive<R: Read + Seek>(path: &Path, reader: R) -> ArtifactResult<Vec<CompiledUnit>> {
    let archive_name = display_name(path);
    let mut archive = zip::ZipArchive::new(reader)
        .map_err(|e| ArtifactError::extraction(&archive_name, e))?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut units = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ArtifactError::extraction(&archive_name, e))?;
        if entry.is_dir() {
            continue;
        }
        let entry_name = entry.name().to_string();
        if !entry_name.ends_with(COMPILED_SUFFIX) {
            continue;
        }
        if !seen.insert(entry_name.clone()) {
            debug!("Skipping duplicate archive entry {}", entry_name);
            continue;
        }

        let mut bytes = Vec::with_capacity(entry.size().min(MAX_ENTRY_PREALLOC) as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| ArtifactError::extraction(format!("{}!{}", archive_name, entry_name), e))?;

        let qualified = entry_name
            .trim_end_matches(COMPILED_SUFFIX)
            .replace('/', ".");
        units.push(CompiledUnit::new(qualified, path, bytes));
    }

    info!("Loaded {} compiled units from {}", units.len(), archive_name);
    Ok(units)
}
