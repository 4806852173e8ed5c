//! Program representation and decoding
//!
//! A [`Program`] is the flat integer encoding handed to the interpreter:
//!
//! ```text
//! PUSH 3  PUSH 4  ADD  PUSH 5  SUB
//!  0  3    0  4    1    0  5    2
//! ```
//!
//! `PUSH` occupies two elements (opcode, operand); `ADD` and `SUB` occupy one.
//! Decoding is a closed match over [`Opcode`]: any other value is rejected with
//! [`ExecutionError::UnknownOpcode`] instead of being skipped.

use crate::interpreter::constants::{ADD, PUSH, SUBTRACT};
use crate::interpreter::errors::ExecutionError;
use std::fmt;

/// Opcode tags understood by the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Push,
    Add,
    Subtract,
}

impl Opcode {
    /// Encoded integer value of this opcode
    pub fn code(self) -> i64 {
        match self {
            Opcode::Push => PUSH,
            Opcode::Add => ADD,
            Opcode::Subtract => SUBTRACT,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Push => "PUSH",
            Opcode::Add => "ADD",
            Opcode::Subtract => "SUB",
        }
    }

    /// Number of stack values the instruction consumes
    pub fn arity(self) -> usize {
        match self {
            Opcode::Push => 0,
            Opcode::Add | Opcode::Subtract => 2,
        }
    }

    /// Number of program elements the encoded instruction occupies
    pub fn width(self) -> usize {
        match self {
            Opcode::Push => 2,
            Opcode::Add | Opcode::Subtract => 1,
        }
    }
}

impl TryFrom<i64> for Opcode {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            PUSH => Ok(Opcode::Push),
            ADD => Ok(Opcode::Add),
            SUBTRACT => Ok(Opcode::Subtract),
            other => Err(other),
        }
    }
}

/// A decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Push(i64),
    Add,
    Subtract,
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Push(_) => Opcode::Push,
            Instruction::Add => Opcode::Add,
            Instruction::Subtract => Opcode::Subtract,
        }
    }

    pub fn width(&self) -> usize {
        self.opcode().width()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(value) => write!(f, "{} {}", Opcode::Push.mnemonic(), value),
            other => write!(f, "{}", other.opcode().mnemonic()),
        }
    }
}

/// An encoded program
///
/// The encoding is never mutated after construction, so the same program can
/// be executed any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    code: Vec<i64>,
}

/// Result of disassembling a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Successfully decoded instructions with their program counter
    pub instructions: Vec<(usize, Instruction)>,
    /// Decode failure that stopped the listing, if any
    pub error: Option<ExecutionError>,
}

impl Program {
    pub fn new(code: Vec<i64>) -> Self {
        Program { code }
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.code
    }

    /// Decode the instruction starting at `pc`
    ///
    /// # Panics
    ///
    /// Panics if `pc >= self.len()`. The interpreter only decodes while its
    /// program counter is in bounds.
    pub fn decode_at(&self, pc: usize) -> Result<Instruction, ExecutionError> {
        let value = self.code[pc];
        let opcode =
            Opcode::try_from(value).map_err(|value| ExecutionError::UnknownOpcode { value, pc })?;

        match opcode {
            Opcode::Push => {
                let operand = self
                    .code
                    .get(pc + 1)
                    .copied()
                    .ok_or(ExecutionError::MalformedProgram { pc })?;
                Ok(Instruction::Push(operand))
            }
            Opcode::Add => Ok(Instruction::Add),
            Opcode::Subtract => Ok(Instruction::Subtract),
        }
    }

    /// Decode the whole program without executing it
    pub fn disassemble(&self) -> Listing {
        let mut instructions = Vec::new();
        let mut pc = 0;

        while pc < self.code.len() {
            match self.decode_at(pc) {
                Ok(instruction) => {
                    instructions.push((pc, instruction));
                    pc += instruction.width();
                }
                Err(e) => {
                    return Listing {
                        instructions,
                        error: Some(e),
                    };
                }
            }
        }

        Listing {
            instructions,
            error: None,
        }
    }
}

impl From<Vec<i64>> for Program {
    fn from(code: Vec<i64>) -> Self {
        Program::new(code)
    }
}

impl From<&[i64]> for Program {
    fn from(code: &[i64]) -> Self {
        Program::new(code.to_vec())
    }
}

impl FromIterator<i64> for Program {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Program::new(iter.into_iter().collect())
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        let mut code = Vec::new();
        for instruction in iter {
            code.push(instruction.opcode().code());
            if let Instruction::Push(value) = instruction {
                code.push(value);
            }
        }
        Program::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_push_reads_operand() {
        let program = Program::from(vec![PUSH, -9]);
        assert_eq!(program.decode_at(0), Ok(Instruction::Push(-9)));
    }

    #[test]
    fn test_decode_trailing_push_is_malformed() {
        let program = Program::from(vec![PUSH, 1, PUSH]);
        assert_eq!(
            program.decode_at(2),
            Err(ExecutionError::MalformedProgram { pc: 2 })
        );
    }

    #[test]
    fn test_decode_rejects_unknown_values() {
        let program = Program::from(vec![ADD, 7]);
        assert_eq!(
            program.decode_at(1),
            Err(ExecutionError::UnknownOpcode { value: 7, pc: 1 })
        );
    }

    #[test]
    fn test_push_operand_is_not_decoded_as_opcode() {
        // Operand 1 would decode as ADD if the counter only advanced by one
        let program = Program::from(vec![PUSH, ADD, PUSH, SUBTRACT]);
        let listing = program.disassemble();

        assert_eq!(
            listing.instructions,
            vec![(0, Instruction::Push(1)), (2, Instruction::Push(2))]
        );
        assert!(listing.error.is_none());
    }

    #[test]
    fn test_disassemble_stops_at_first_error() {
        let program = Program::from(vec![PUSH, 3, 42, ADD]);
        let listing = program.disassemble();

        assert_eq!(listing.instructions, vec![(0, Instruction::Push(3))]);
        assert_eq!(
            listing.error,
            Some(ExecutionError::UnknownOpcode { value: 42, pc: 2 })
        );
    }

    #[test]
    fn test_instructions_encode_to_flat_program() {
        let program: Program = [
            Instruction::Push(3),
            Instruction::Push(4),
            Instruction::Add,
            Instruction::Push(5),
            Instruction::Subtract,
        ]
        .into_iter()
        .collect();

        assert_eq!(program.as_slice(), &[0, 3, 0, 4, 1, 0, 5, 2]);
    }

    #[test]
    fn test_instruction_display() {
        assert_eq!(Instruction::Push(-4).to_string(), "PUSH -4");
        assert_eq!(Instruction::Subtract.to_string(), "SUB");
    }
}
