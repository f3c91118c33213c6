//! Method descriptor decoding into simple parameter type names

use super::classfile::{ClassFileError, ClassFileResult};

/// Parameter types of a method descriptor such as `(ILjava/util/List;[J)V`,
/// as simple names: `["int", "List", "long[]"]`.
pub fn parameter_types(descriptor: &str) -> ClassFileResult<Vec<String>> {
    let bad = || ClassFileError::BadDescriptor(descriptor.to_string());

    let inner = descriptor
        .strip_prefix('(')
        .and_then(|rest| rest.split_once(')'))
        .map(|(params, _ret)| params)
        .ok_or_else(bad)?;

    let mut types = Vec::new();
    let mut rest = inner;
    while !rest.is_empty() {
        let (name, tail) = field_type(rest).ok_or_else(bad)?;
        types.push(name);
        rest = tail;
    }
    Ok(types)
}

/// Decode one field type from the front of `input`
fn field_type(input: &str) -> Option<(String, &str)> {
    let dims = input.bytes().take_while(|&b| b == b'[').count();
    let rest = &input[dims..];
    let first = rest.chars().next()?;

    let (base, tail) = match first {
        'L' => {
            let end = rest.find(';')?;
            (simple_name(&rest[1..end]).to_string(), &rest[end + 1..])
        }
        _ => (primitive(first)?.to_string(), &rest[1..]),
    };

    Some((format!("{}{}", base, "[]".repeat(dims)), tail))
}

fn primitive(code: char) -> Option<&'static str> {
    Some(match code {
        'B' => "byte",
        'C' => "char",
        'D' => "double",
        'F' => "float",
        'I' => "int",
        'J' => "long",
        'S' => "short",
        'Z' => "boolean",
        _ => return None,
    })
}

/// `java/util/Map$Entry` → `Entry`
fn simple_name(binary: &str) -> &str {
    let last = binary.rsplit('/').next().unwrap_or(binary);
    last.rsplit('$').next().unwrap_or(last)
}
