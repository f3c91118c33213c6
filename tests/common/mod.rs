//! Shared fixtures for integration tests

#![allow(dead_code)]

#[path = "../../src/parsers/testing.rs"]
pub mod testing;

use std::io::Write;
use std::path::Path;
use testing::{op_u2, ClassBuilder, MethodSpec, OP_GETFIELD, OP_INVOKEVIRTUAL, OP_RETURN};

/// A class with one field and one getter-style method
pub fn simple_class(name: &str) -> Vec<u8> {
    let mut b = ClassBuilder::new(name);
    b.field("value", "I");
    let field = b.field_ref(name, "value", "I");
    let mut code = op_u2(OP_GETFIELD, field);
    code.push(OP_RETURN);
    b.method(MethodSpec::new("getValue", "()I").code(code).lines(&[3]));
    b.build()
}

/// `shop/Customer`: three fields and a getter
pub fn customer_class() -> Vec<u8> {
    let mut b = ClassBuilder::new("shop/Customer");
    b.field("street", "Ljava/lang/String;");
    b.field("city", "Ljava/lang/String;");
    b.field("zip", "Ljava/lang/String;");
    let street = b.field_ref("shop/Customer", "street", "Ljava/lang/String;");
    let mut code = op_u2(OP_GETFIELD, street);
    code.push(OP_RETURN);
    b.method(MethodSpec::new("getStreet", "()Ljava/lang/String;").code(code));
    b.build()
}

/// `shop/Order`: `label` reads one own field and three of Customer's;
/// `a` calls `b` calls `c`.
pub fn order_class() -> Vec<u8> {
    let mut b = ClassBuilder::new("shop/Order");
    b.field("id", "J");

    let own = b.field_ref("shop/Order", "id", "J");
    let street = b.field_ref("shop/Customer", "street", "Ljava/lang/String;");
    let city = b.field_ref("shop/Customer", "city", "Ljava/lang/String;");
    let zip = b.field_ref("shop/Customer", "zip", "Ljava/lang/String;");
    let mut label = Vec::new();
    for index in [own, street, city, zip] {
        label.extend(op_u2(OP_GETFIELD, index));
    }
    label.push(OP_RETURN);
    b.method(
        MethodSpec::new("label", "(Lshop/Customer;)Ljava/lang/String;")
            .code(label)
            .lines(&[10, 11, 12, 14]),
    );

    let call_b = b.method_ref("shop/Order", "b", "()V");
    let call_c = b.method_ref("shop/Order", "c", "()V");
    let mut a = op_u2(OP_INVOKEVIRTUAL, call_b);
    a.push(OP_RETURN);
    let mut bb = op_u2(OP_INVOKEVIRTUAL, call_c);
    bb.push(OP_RETURN);
    b.method(MethodSpec::new("a", "()V").code(a));
    b.method(MethodSpec::new("b", "()V").code(bb));
    b.method(MethodSpec::new("c", "()V").code(vec![OP_RETURN]));
    b.build()
}

/// Write `bytes` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, bytes: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, bytes).expect("write fixture");
}

/// Zip `entries` into an in-memory jar
pub fn jar_bytes(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        zip.start_file(*name, zip::write::FileOptions::default())
            .expect("start entry");
        zip.write_all(bytes).expect("write entry");
    }
    zip.finish().expect("finish jar").into_inner()
}
