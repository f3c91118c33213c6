//! Structural extraction from compiled units
//!
//! Compiled units are JVM class files. The extractor decodes the class
//! header and members, then walks each method body to recover the facts
//! the code graph needs:
//!
//! ```text
//! CompiledUnit.bytes
//!   └─ classfile::ClassFile::parse   constant pool, header, fields, methods
//!        ├─ descriptor::parameter_types   simple parameter names
//!        └─ bytecode::scan                calls, field accesses, branches
//!             └─ ClassModel
//! ```
//!
//! Units without `Code` or `LineNumberTable` attributes degrade to the
//! method defaults (no calls, no accesses, 0 lines, complexity 1).

pub mod bytecode;
pub mod classfile;
pub mod descriptor;

#[cfg(test)]
pub(crate) mod testing;

pub use classfile::{ClassFile, ClassFileError};

use crate::artifact::{ArtifactError, ArtifactResult, CompiledUnit};
use crate::models::{ClassModel, MethodModel, ROOT_TYPE};
use tracing::{debug, trace};

/// Extract the structural model of one compiled unit.
pub fn extract(unit: &CompiledUnit) -> ArtifactResult<ClassModel> {
    let model = parse_class(&unit.bytes).map_err(|e| ArtifactError::extraction(&unit.name, e))?;
    if !unit.name.is_empty() && !model.name.ends_with(&unit.name) {
        debug!(
            "Unit {} from {} declares class {}",
            unit.name,
            unit.origin.display(),
            model.name
        );
    }
    Ok(model)
}

/// Decode raw class-file bytes into a [`ClassModel`].
pub fn parse_class(bytes: &[u8]) -> Result<ClassModel, ClassFileError> {
    let class = ClassFile::parse(bytes)?;

    let mut model = ClassModel::new(class.this_class.clone())
        .with_attributes(class.fields.iter().map(|f| f.name.clone()));
    model.super_class = Some(
        class
            .super_class
            .clone()
            .unwrap_or_else(|| ROOT_TYPE.to_string()),
    );
    model.interfaces = class.interfaces.iter().cloned().collect();

    for method in &class.methods {
        // Constructors and static initialisers are not declared methods
        if method.name.starts_with('<') {
            continue;
        }

        let mut m = MethodModel::new(method.name.clone())
            .with_parameters(descriptor::parameter_types(&method.descriptor)?);

        if let Some(code) = &method.code {
            let facts = bytecode::scan(&code.code, &class.pool)?;
            let cc = bytecode::complexity(code, &facts);
            let lines = &code.line_numbers;
            let (loc, start) = match (lines.iter().min(), lines.iter().max()) {
                (Some(&lo), Some(&hi)) => (u32::from(hi - lo) + 1, Some(u32::from(lo))),
                _ => (0, None),
            };
            m = m
                .with_calls(facts.called_methods)
                .with_accesses(facts.accessed_fields)
                .with_size(loc, cc);
            m.line_start = start;
        }

        model = model.with_method(m);
    }

    trace!(
        "Extracted {} ({} fields, {} methods)",
        model.name,
        model.attributes.len(),
        model.methods.len()
    );
    Ok(model)
}
