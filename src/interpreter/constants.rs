// Constants for the bytecode interpreter

/// Encoded value of the `Push` opcode (followed by one operand element)
pub const PUSH: i64 = 0;

/// Encoded value of the `Add` opcode
pub const ADD: i64 = 1;

/// Encoded value of the `Subtract` opcode
pub const SUBTRACT: i64 = 2;

/// Default number of operand stack slots
pub const STACK_CAPACITY: usize = 100;

/// Default snapshot history budget for traced runs (64 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;
