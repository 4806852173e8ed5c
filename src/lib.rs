//! # Introduction
//!
//! stacktop executes programs for a minimal stack machine encoded as a flat
//! sequence of integers and reports the value left on top of the operand
//! stack. A recorded trace of the run can be stepped through forward and
//! backward in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! [i64] → Program → Interpreter → Result<i64, ExecutionError>
//!                              ↘ Trace (Snapshots) → TUI
//! ```
//!
//! 1. [`program`] — opcode set, instruction decoding and disassembly.
//! 2. [`interpreter`] — the fetch-decode-execute loop and its error taxonomy.
//! 3. [`memory`] — the capacity-bounded [`memory::stack::OperandStack`].
//! 4. [`snapshot`] — per-instruction [`snapshot::Snapshot`]s with a memory
//!    limit, collected into a [`snapshot::Trace`].
//! 5. [`ui`] — ratatui-based step-through viewer; not part of the stable
//!    library API.
//!
//! ## Instruction set
//!
//! | Code | Mnemonic | Encoding      | Effect                          |
//! |------|----------|---------------|---------------------------------|
//! | 0    | `PUSH`   | `0, operand`  | push operand                    |
//! | 1    | `ADD`    | `1`           | pop right, pop left, push l + r |
//! | 2    | `SUB`    | `2`           | pop right, pop left, push l - r |
//!
//! ```
//! use stacktop::interpreter::execute;
//! use stacktop::program::Program;
//!
//! let program = Program::from(vec![0, 3, 0, 4, 1, 0, 5, 2]);
//! assert_eq!(execute(&program), Ok(2));
//! ```

pub mod interpreter;
pub mod memory;
pub mod program;
pub mod snapshot;
pub mod ui;
