//! Instruction walker over a method's `Code` array
//!
//! Recovers the body facts the graph needs: invoked method names, referenced
//! field names, and decision points for cyclomatic complexity. Instructions
//! are decoded only far enough to know their length and operands.

use super::classfile::{ClassFileError, ClassFileResult, CodeAttribute, ConstantPool};
use byteorder::{BigEndian, ByteOrder};

const TABLESWITCH: u8 = 0xaa;
const LOOKUPSWITCH: u8 = 0xab;
const WIDE: u8 = 0xc4;
const IINC: u8 = 0x84;

/// Facts about one method body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyFacts {
    /// Invoked method names, first-seen order, no duplicates
    pub called_methods: Vec<String>,
    /// Referenced field names, first-seen order, no duplicates
    pub accessed_fields: Vec<String>,
    /// Conditional branches plus switch case labels
    pub branch_points: u32,
}

impl BodyFacts {
    fn note_call(&mut self, name: &str) {
        if name.starts_with('<') {
            return;
        }
        if !self.called_methods.iter().any(|m| m == name) {
            self.called_methods.push(name.to_string());
        }
    }

    fn note_field(&mut self, name: &str) {
        if !self.accessed_fields.iter().any(|f| f == name) {
            self.accessed_fields.push(name.to_string());
        }
    }
}

/// Cyclomatic complexity: one plus every decision point, where typed
/// exception handlers count and `finally` handlers do not.
pub fn complexity(code: &CodeAttribute, facts: &BodyFacts) -> u32 {
    let handlers = code
        .handler_catch_types
        .iter()
        .filter(|&&catch_type| catch_type != 0)
        .count() as u32;
    1 + facts.branch_points + handlers
}

/// Walk every instruction in `code`.
pub fn scan(code: &[u8], pool: &ConstantPool) -> ClassFileResult<BodyFacts> {
    let mut facts = BodyFacts::default();
    let mut pc = 0usize;

    while pc < code.len() {
        let opcode = code[pc];
        let (length, case_labels) = instruction_length(code, pc)?;
        if pc + length > code.len() {
            return Err(ClassFileError::BadInstruction { pc });
        }

        match opcode {
            // ifeq..if_acmpne, ifnull, ifnonnull
            0x99..=0xa6 | 0xc6 | 0xc7 => facts.branch_points += 1,
            TABLESWITCH | LOOKUPSWITCH => facts.branch_points += case_labels,
            // getstatic, putstatic, getfield, putfield
            0xb2..=0xb5 => facts.note_field(pool.member_name(operand_u2(code, pc))?),
            // invokevirtual, invokespecial, invokestatic, invokeinterface
            0xb6..=0xb9 => facts.note_call(pool.member_name(operand_u2(code, pc))?),
            _ => {}
        }

        pc += length;
    }

    Ok(facts)
}

fn operand_u2(code: &[u8], pc: usize) -> u16 {
    BigEndian::read_u16(&code[pc + 1..pc + 3])
}

fn read_i32(code: &[u8], at: usize, pc: usize) -> ClassFileResult<i32> {
    code.get(at..at + 4)
        .map(BigEndian::read_i32)
        .ok_or(ClassFileError::BadInstruction { pc })
}

/// Byte length of the instruction at `pc`, plus its switch case-label count.
fn instruction_length(code: &[u8], pc: usize) -> ClassFileResult<(usize, u32)> {
    let opcode = code[pc];
    let length = match opcode {
        0x10 | 0x12 | 0x15..=0x19 | 0x36..=0x3a | 0xa9 | 0xbc => 2,
        0x11 | 0x13 | 0x14 | IINC | 0x99..=0xa8 | 0xb2..=0xb8 | 0xbb | 0xbd | 0xc0 | 0xc1
        | 0xc6 | 0xc7 => 3,
        0xc5 => 4,
        0xb9 | 0xba | 0xc8 | 0xc9 => 5,
        WIDE => match code.get(pc + 1) {
            Some(&IINC) => 6,
            Some(_) => 4,
            None => return Err(ClassFileError::BadInstruction { pc }),
        },
        TABLESWITCH => {
            let base = pc + 1 + padding(pc);
            let low = read_i32(code, base + 4, pc)?;
            let high = read_i32(code, base + 8, pc)?;
            if high < low {
                return Err(ClassFileError::BadInstruction { pc });
            }
            let labels = (high as i64 - low as i64 + 1) as usize;
            return Ok((base + 12 + 4 * labels - pc, labels as u32));
        }
        LOOKUPSWITCH => {
            let base = pc + 1 + padding(pc);
            let pairs = read_i32(code, base + 4, pc)?;
            if pairs < 0 {
                return Err(ClassFileError::BadInstruction { pc });
            }
            let pairs = pairs as usize;
            return Ok((base + 8 + 8 * pairs - pc, pairs as u32));
        }
        0x00..=0xc9 => 1,
        _ => return Err(ClassFileError::UnknownOpcode { opcode, pc }),
    };
    Ok((length, 0))
}

/// Switch operands start on a 4-byte boundary relative to the code start
fn padding(pc: usize) -> usize {
    (4 - (pc + 1) % 4) % 4
}
