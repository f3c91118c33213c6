//! Minimal class-file writer for test fixtures.
//!
//! Only depends on std so integration tests can include it by path.

#![allow(dead_code)]

use std::collections::HashMap;

pub const OP_RETURN: u8 = 0xb1;
pub const OP_GETFIELD: u8 = 0xb4;
pub const OP_PUTFIELD: u8 = 0xb5;
pub const OP_GETSTATIC: u8 = 0xb2;
pub const OP_INVOKEVIRTUAL: u8 = 0xb6;
pub const OP_INVOKESPECIAL: u8 = 0xb7;
pub const OP_INVOKESTATIC: u8 = 0xb8;
pub const OP_INVOKEINTERFACE: u8 = 0xb9;
pub const OP_IFEQ: u8 = 0x99;
pub const OP_GOTO: u8 = 0xa7;

/// One method to emit
#[derive(Debug, Clone)]
pub struct MethodSpec {
    name: String,
    descriptor: String,
    code: Option<Vec<u8>>,
    handlers: Vec<Option<String>>,
    lines: Vec<u16>,
}

impl MethodSpec {
    pub fn new(name: &str, descriptor: &str) -> Self {
        Self {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            code: None,
            handlers: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn code(mut self, code: Vec<u8>) -> Self {
        self.code = Some(code);
        self
    }

    /// Exception handler; `None` is a `finally` block
    pub fn handler(mut self, catch_type: Option<&str>) -> Self {
        self.handlers.push(catch_type.map(str::to_string));
        if self.code.is_none() {
            self.code = Some(vec![OP_RETURN]);
        }
        self
    }

    pub fn lines(mut self, lines: &[u16]) -> Self {
        self.lines = lines.to_vec();
        if self.code.is_none() {
            self.code = Some(vec![OP_RETURN]);
        }
        self
    }
}

/// Builds a version-52 class file with an interned constant pool
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    pool: Vec<Vec<u8>>,
    utf8_index: HashMap<String, u16>,
    class_index: HashMap<String, u16>,
    access_flags: u16,
    name: String,
    super_name: Option<String>,
    interfaces: Vec<String>,
    fields: Vec<(String, String)>,
    methods: Vec<MethodSpec>,
}

impl ClassBuilder {
    /// `name` is the binary name, e.g. `com/acme/Order`
    pub fn new(name: &str) -> Self {
        Self {
            pool: Vec::new(),
            utf8_index: HashMap::new(),
            class_index: HashMap::new(),
            access_flags: 0x0021,
            name: name.to_string(),
            super_name: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn access_flags(&mut self, flags: u16) -> &mut Self {
        self.access_flags = flags;
        self
    }

    pub fn super_class(&mut self, name: &str) -> &mut Self {
        self.super_name = Some(name.to_string());
        self
    }

    pub fn no_super_class(&mut self) -> &mut Self {
        self.super_name = None;
        self
    }

    pub fn interface(&mut self, name: &str) -> &mut Self {
        self.interfaces.push(name.to_string());
        self
    }

    pub fn field(&mut self, name: &str, descriptor: &str) -> &mut Self {
        self.fields.push((name.to_string(), descriptor.to_string()));
        self
    }

    pub fn method(&mut self, method: MethodSpec) -> &mut Self {
        self.methods.push(method);
        self
    }

    fn push(&mut self, entry: Vec<u8>) -> u16 {
        self.pool.push(entry);
        self.pool.len() as u16
    }

    pub fn utf8(&mut self, value: &str) -> u16 {
        if let Some(&index) = self.utf8_index.get(value) {
            return index;
        }
        let mut entry = vec![1u8];
        entry.extend((value.len() as u16).to_be_bytes());
        entry.extend(value.as_bytes());
        let index = self.push(entry);
        self.utf8_index.insert(value.to_string(), index);
        index
    }

    pub fn class_ref(&mut self, name: &str) -> u16 {
        if let Some(&index) = self.class_index.get(name) {
            return index;
        }
        let name_index = self.utf8(name);
        let mut entry = vec![7u8];
        entry.extend(name_index.to_be_bytes());
        let index = self.push(entry);
        self.class_index.insert(name.to_string(), index);
        index
    }

    fn member_ref(&mut self, tag: u8, owner: &str, name: &str, descriptor: &str) -> u16 {
        let class_index = self.class_ref(owner);
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let mut nat = vec![12u8];
        nat.extend(name_index.to_be_bytes());
        nat.extend(descriptor_index.to_be_bytes());
        let nat_index = self.push(nat);
        let mut entry = vec![tag];
        entry.extend(class_index.to_be_bytes());
        entry.extend(nat_index.to_be_bytes());
        self.push(entry)
    }

    pub fn field_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(9, owner, name, descriptor)
    }

    pub fn method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(10, owner, name, descriptor)
    }

    pub fn interface_method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(11, owner, name, descriptor)
    }

    /// Occupies two pool slots
    pub fn long_constant(&mut self, value: i64) -> u16 {
        let mut entry = vec![5u8];
        entry.extend(value.to_be_bytes());
        let index = self.push(entry);
        self.pool.push(Vec::new());
        index
    }

    pub fn build(&mut self) -> Vec<u8> {
        let name = self.name.clone();
        let this_index = self.class_ref(&name);
        let super_index = match self.super_name.clone() {
            Some(name) => self.class_ref(&name),
            None => 0,
        };
        let mut interface_indices = Vec::new();
        for interface in self.interfaces.clone() {
            interface_indices.push(self.class_ref(&interface));
        }

        let mut fields = Vec::new();
        for (name, descriptor) in self.fields.clone() {
            fields.extend(0x0002u16.to_be_bytes());
            fields.extend(self.utf8(&name).to_be_bytes());
            fields.extend(self.utf8(&descriptor).to_be_bytes());
            fields.extend(0u16.to_be_bytes());
        }

        let mut methods = Vec::new();
        for spec in self.methods.clone() {
            methods.extend(0x0001u16.to_be_bytes());
            methods.extend(self.utf8(&spec.name).to_be_bytes());
            methods.extend(self.utf8(&spec.descriptor).to_be_bytes());
            match &spec.code {
                None => methods.extend(0u16.to_be_bytes()),
                Some(code) => {
                    methods.extend(1u16.to_be_bytes());
                    let attr = self.code_attribute(code, &spec);
                    methods.extend(self.utf8("Code").to_be_bytes());
                    methods.extend((attr.len() as u32).to_be_bytes());
                    methods.extend(attr);
                }
            }
        }

        let mut out = Vec::new();
        out.extend(0xCAFE_BABEu32.to_be_bytes());
        out.extend(0u16.to_be_bytes());
        out.extend(52u16.to_be_bytes());
        out.extend((self.pool.len() as u16 + 1).to_be_bytes());
        for entry in &self.pool {
            out.extend(entry);
        }
        out.extend(self.access_flags.to_be_bytes());
        out.extend(this_index.to_be_bytes());
        out.extend(super_index.to_be_bytes());
        out.extend((interface_indices.len() as u16).to_be_bytes());
        for index in interface_indices {
            out.extend(index.to_be_bytes());
        }
        out.extend((self.fields.len() as u16).to_be_bytes());
        out.extend(fields);
        out.extend((self.methods.len() as u16).to_be_bytes());
        out.extend(methods);
        out.extend(0u16.to_be_bytes());
        out
    }

    fn code_attribute(&mut self, code: &[u8], spec: &MethodSpec) -> Vec<u8> {
        let mut attr = Vec::new();
        attr.extend(8u16.to_be_bytes());
        attr.extend(8u16.to_be_bytes());
        attr.extend((code.len() as u32).to_be_bytes());
        attr.extend(code);

        attr.extend((spec.handlers.len() as u16).to_be_bytes());
        for handler in &spec.handlers {
            let catch_type = match handler {
                Some(name) => self.class_ref(name),
                None => 0,
            };
            attr.extend(0u16.to_be_bytes());
            attr.extend((code.len() as u16).to_be_bytes());
            attr.extend(0u16.to_be_bytes());
            attr.extend(catch_type.to_be_bytes());
        }

        if spec.lines.is_empty() {
            attr.extend(0u16.to_be_bytes());
        } else {
            attr.extend(1u16.to_be_bytes());
            attr.extend(self.utf8("LineNumberTable").to_be_bytes());
            attr.extend((2 + 4 * spec.lines.len() as u32).to_be_bytes());
            attr.extend((spec.lines.len() as u16).to_be_bytes());
            for (pc, line) in spec.lines.iter().enumerate() {
                attr.extend((pc as u16).to_be_bytes());
                attr.extend(line.to_be_bytes());
            }
        }
        attr
    }
}

/// Encode `opcode index_hi index_lo`
pub fn op_u2(opcode: u8, index: u16) -> Vec<u8> {
    let [hi, lo] = index.to_be_bytes();
    vec![opcode, hi, lo]
}
