//! Bytecode interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: The fetch-decode-execute loop ([`engine::Interpreter`])
//! - [`errors`]: Execution error types
//! - [`constants`]: Opcode encodings and default limits
//!
//! # Execution Model
//!
//! The program counter starts at 0 and advances by the width of each decoded
//! instruction (2 for `PUSH`, 1 for `ADD`/`SUB`). Binary operators pop `right`
//! first, then `left`, and push `left op right`. Execution stops once the
//! counter reaches the end of the program; the top of the stack is the result.

pub mod constants;
pub mod engine;
pub mod errors;

pub use engine::{execute, Interpreter};
pub use errors::ExecutionError;
