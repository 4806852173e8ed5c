//! Execution error types for the bytecode interpreter
//!
//! This module defines [`ExecutionError`], which represents every way a single
//! execution can fail, whether while decoding the program or while running it.
//!
//! All execution errors are terminal for the current run only: the interpreter
//! returns them to the caller and keeps no partial result.

use crate::program::Opcode;
use std::fmt;

/// Errors that can occur while executing a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// An arithmetic instruction found fewer values than it consumes
    StackUnderflow {
        opcode: Opcode,
        depth: usize,
        pc: usize,
    },

    /// A push onto a full operand stack
    StackOverflow { capacity: usize, pc: usize },

    /// A `Push` opcode is the last element of the program
    MalformedProgram { pc: usize },

    /// An encoded value outside the opcode set
    UnknownOpcode { value: i64, pc: usize },

    /// Checked arithmetic overflowed the integer range
    IntegerOverflow {
        opcode: Opcode,
        left: i64,
        right: i64,
        pc: usize,
    },

    /// The program finished with nothing on the stack
    EmptyResult,

    /// Snapshot history limit exceeded (traced runs only)
    SnapshotLimitExceeded { current: usize, limit: usize },
}

impl ExecutionError {
    /// Program counter of the faulting instruction, if the error has one
    pub fn pc(&self) -> Option<usize> {
        match self {
            ExecutionError::StackUnderflow { pc, .. } => Some(*pc),
            ExecutionError::StackOverflow { pc, .. } => Some(*pc),
            ExecutionError::MalformedProgram { pc } => Some(*pc),
            ExecutionError::UnknownOpcode { pc, .. } => Some(*pc),
            ExecutionError::IntegerOverflow { pc, .. } => Some(*pc),
            ExecutionError::EmptyResult => None,
            ExecutionError::SnapshotLimitExceeded { .. } => None,
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::StackUnderflow { opcode, depth, pc } => {
                write!(
                    f,
                    "Stack underflow at pc {}: {} needs {} value{}, stack holds {}",
                    pc,
                    opcode.mnemonic(),
                    opcode.arity(),
                    if opcode.arity() == 1 { "" } else { "s" },
                    depth
                )
            }
            ExecutionError::StackOverflow { capacity, pc } => {
                write!(
                    f,
                    "Stack overflow at pc {}: capacity of {} slots exhausted",
                    pc, capacity
                )
            }
            ExecutionError::MalformedProgram { pc } => {
                write!(f, "Malformed program: PUSH at pc {} has no operand", pc)
            }
            ExecutionError::UnknownOpcode { value, pc } => {
                write!(f, "Unknown opcode {} at pc {}", value, pc)
            }
            ExecutionError::IntegerOverflow {
                opcode,
                left,
                right,
                pc,
            } => {
                write!(
                    f,
                    "Integer overflow at pc {}: {} {} {}",
                    pc,
                    left,
                    opcode.mnemonic(),
                    right
                )
            }
            ExecutionError::EmptyResult => {
                write!(f, "Program finished with an empty stack")
            }
            ExecutionError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
        }
    }
}

impl std::error::Error for ExecutionError {}
