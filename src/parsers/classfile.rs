//! JVM class-file reader
//!
//! Reads just enough of the format to recover structure: the constant pool,
//! class header, fields, methods and each method's `Code` attribute with its
//! exception table and `LineNumberTable`. Everything else is skipped by length.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;
use thiserror::Error;

pub const MAGIC: u32 = 0xCAFE_BABE;

const ACC_MODULE: u16 = 0x8000;

/// Errors raised while decoding a malformed compiled unit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassFileError {
    #[error("not a class file (magic 0x{0:08X})")]
    BadMagic(u32),

    #[error("truncated class file at offset {offset}")]
    Truncated { offset: u64 },

    #[error("invalid constant pool reference #{index}")]
    BadConstant { index: u16 },

    #[error("unknown constant pool tag {tag} at #{index}")]
    UnknownTag { tag: u8, index: u16 },

    #[error("unknown opcode 0x{opcode:02X} at pc {pc}")]
    UnknownOpcode { opcode: u8, pc: usize },

    #[error("malformed instruction at pc {pc}")]
    BadInstruction { pc: usize },

    #[error("malformed descriptor '{0}'")]
    BadDescriptor(String),

    #[error("module descriptor, not a class")]
    ModuleDescriptor,
}

pub type ClassFileResult<T> = Result<T, ClassFileError>;

#[derive(Debug, Clone)]
enum Constant {
    /// Slot 0 and the upper half of 8-byte constants
    Unusable,
    Utf8(String),
    Class {
        name_index: u16,
    },
    /// Fieldref, Methodref and InterfaceMethodref
    MemberRef {
        name_and_type_index: u16,
    },
    NameAndType {
        name_index: u16,
    },
    Other,
}

#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn get(&self, index: u16) -> ClassFileResult<&Constant> {
        self.entries
            .get(index as usize)
            .ok_or(ClassFileError::BadConstant { index })
    }

    pub fn utf8(&self, index: u16) -> ClassFileResult<&str> {
        match self.get(index)? {
            Constant::Utf8(s) => Ok(s),
            _ => Err(ClassFileError::BadConstant { index }),
        }
    }

    /// Binary class name with `/` turned into `.`
    pub fn class_name(&self, index: u16) -> ClassFileResult<String> {
        match self.get(index)? {
            Constant::Class { name_index } => Ok(self.utf8(*name_index)?.replace('/', ".")),
            _ => Err(ClassFileError::BadConstant { index }),
        }
    }

    /// Simple member name behind a field or method reference
    pub fn member_name(&self, index: u16) -> ClassFileResult<&str> {
        let nat = match self.get(index)? {
            Constant::MemberRef {
                name_and_type_index,
            } => *name_and_type_index,
            _ => return Err(ClassFileError::BadConstant { index }),
        };
        match self.get(nat)? {
            Constant::NameAndType { name_index } => self.utf8(*name_index),
            _ => Err(ClassFileError::BadConstant { index: nat }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }
}

#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
}

#[derive(Debug, Clone, Default)]
pub struct CodeAttribute {
    pub code: Vec<u8>,
    /// `catch_type` of every exception-table entry (0 for `finally`)
    pub handler_catch_types: Vec<u16>,
    /// Source lines from `LineNumberTable`, in table order
    pub line_numbers: Vec<u16>,
}

#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub code: Option<CodeAttribute>,
}

/// A decoded class file
#[derive(Debug, Clone)]
pub struct ClassFile {
    pub major_version: u16,
    pub access_flags: u16,
    pub this_class: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    pub pool: ConstantPool,
}

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> ClassFileResult<Self> {
        let mut r = Reader::new(bytes);

        let magic = r.u4()?;
        if magic != MAGIC {
            return Err(ClassFileError::BadMagic(magic));
        }
        let _minor = r.u2()?;
        let major_version = r.u2()?;

        let pool = read_constant_pool(&mut r)?;

        let access_flags = r.u2()?;
        if access_flags & ACC_MODULE != 0 {
            return Err(ClassFileError::ModuleDescriptor);
        }
        let this_class = pool.class_name(r.u2()?)?;
        let super_class = match r.u2()? {
            0 => None,
            index => Some(pool.class_name(index)?),
        };

        let interface_count = r.u2()?;
        let mut interfaces = Vec::with_capacity(interface_count as usize);
        for _ in 0..interface_count {
            interfaces.push(pool.class_name(r.u2()?)?);
        }

        let field_count = r.u2()?;
        let mut fields = Vec::with_capacity(field_count as usize);
        for _ in 0..field_count {
            let access_flags = r.u2()?;
            let name = pool.utf8(r.u2()?)?.to_string();
            let descriptor = pool.utf8(r.u2()?)?.to_string();
            skip_attributes(&mut r)?;
            fields.push(FieldInfo {
                access_flags,
                name,
                descriptor,
            });
        }

        let method_count = r.u2()?;
        let mut methods = Vec::with_capacity(method_count as usize);
        for _ in 0..method_count {
            let access_flags = r.u2()?;
            let name = pool.utf8(r.u2()?)?.to_string();
            let descriptor = pool.utf8(r.u2()?)?.to_string();
            let mut code = None;
            let attribute_count = r.u2()?;
            for _ in 0..attribute_count {
                let attr_name = pool.utf8(r.u2()?)?;
                let len = r.u4()? as usize;
                if attr_name == "Code" {
                    let body = r.bytes(len)?;
                    code = Some(read_code_attribute(body, &pool)?);
                } else {
                    r.skip(len)?;
                }
            }
            methods.push(MethodInfo {
                access_flags,
                name,
                descriptor,
                code,
            });
        }

        // Class-level attributes carry nothing we use.

        Ok(Self {
            major_version,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            pool,
        })
    }
}

fn read_constant_pool(r: &mut Reader<'_>) -> ClassFileResult<ConstantPool> {
    let count = r.u2()?;
    let mut entries = Vec::with_capacity(count as usize);
    entries.push(Constant::Unusable);

    let mut index: u16 = 1;
    while index < count {
        let tag = r.u1()?;
        let constant = match tag {
            1 => {
                let len = r.u2()? as usize;
                Constant::Utf8(String::from_utf8_lossy(r.bytes(len)?).into_owned())
            }
            3 | 4 => {
                r.skip(4)?;
                Constant::Other
            }
            5 | 6 => {
                r.skip(8)?;
                entries.push(Constant::Other);
                entries.push(Constant::Unusable);
                index = index.saturating_add(2);
                continue;
            }
            7 => Constant::Class {
                name_index: r.u2()?,
            },
            8 | 16 | 19 | 20 => {
                r.skip(2)?;
                Constant::Other
            }
            9..=11 => {
                let _class_index = r.u2()?;
                Constant::MemberRef {
                    name_and_type_index: r.u2()?,
                }
            }
            12 => {
                let name_index = r.u2()?;
                let _descriptor_index = r.u2()?;
                Constant::NameAndType { name_index }
            }
            15 => {
                r.skip(3)?;
                Constant::Other
            }
            17 | 18 => {
                r.skip(4)?;
                Constant::Other
            }
            _ => return Err(ClassFileError::UnknownTag { tag, index }),
        };
        entries.push(constant);
        index += 1;
    }

    Ok(ConstantPool { entries })
}

fn read_code_attribute(body: &[u8], pool: &ConstantPool) -> ClassFileResult<CodeAttribute> {
    let mut r = Reader::new(body);
    let _max_stack = r.u2()?;
    let _max_locals = r.u2()?;
    let code_len = r.u4()? as usize;
    let code = r.bytes(code_len)?.to_vec();

    let handler_count = r.u2()?;
    let mut handler_catch_types = Vec::with_capacity(handler_count as usize);
    for _ in 0..handler_count {
        r.skip(6)?; // start_pc, end_pc, handler_pc
        handler_catch_types.push(r.u2()?);
    }

    let mut line_numbers = Vec::new();
    let attribute_count = r.u2()?;
    for _ in 0..attribute_count {
        let name = pool.utf8(r.u2()?)?;
        let len = r.u4()? as usize;
        if name == "LineNumberTable" {
            let table = r.bytes(len)?;
            let mut t = Reader::new(table);
            let entries = t.u2()?;
            for _ in 0..entries {
                let _start_pc = t.u2()?;
                line_numbers.push(t.u2()?);
            }
        } else {
            r.skip(len)?;
        }
    }

    Ok(CodeAttribute {
        code,
        handler_catch_types,
        line_numbers,
    })
}

fn skip_attributes(r: &mut Reader<'_>) -> ClassFileResult<()> {
    let count = r.u2()?;
    for _ in 0..count {
        let _name = r.u2()?;
        let len = r.u4()? as usize;
        r.skip(len)?;
    }
    Ok(())
}

/// Big-endian cursor that reports truncation with the failing offset
struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    fn truncated(&self) -> ClassFileError {
        ClassFileError::Truncated {
            offset: self.cursor.position(),
        }
    }

    fn u1(&mut self) -> ClassFileResult<u8> {
        self.cursor.read_u8().map_err(|_| self.truncated())
    }

    fn u2(&mut self) -> ClassFileResult<u16> {
        self.cursor
            .read_u16::<BigEndian>()
            .map_err(|_| self.truncated())
    }

    fn u4(&mut self) -> ClassFileResult<u32> {
        self.cursor
            .read_u32::<BigEndian>()
            .map_err(|_| self.truncated())
    }

    fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    fn bytes(&mut self, n: usize) -> ClassFileResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(self.truncated());
        }
        let start = self.cursor.position() as usize;
        let data: &'a [u8] = *self.cursor.get_ref();
        self.cursor.set_position((start + n) as u64);
        Ok(&data[start..start + n])
    }

    fn skip(&mut self, n: usize) -> ClassFileResult<()> {
        self.bytes(n).map(|_| ())
    }
}
