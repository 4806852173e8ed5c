//! Memory model for the bytecode interpreter
//!
//! The interpreter has no heap and no variables; its only storage is the
//! [`stack::OperandStack`], created fresh for every execution.

pub mod stack;
