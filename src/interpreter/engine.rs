// Execution engine for the bytecode interpreter

use crate::interpreter::constants::STACK_CAPACITY;
use crate::interpreter::errors::ExecutionError;
use crate::memory::stack::OperandStack;
use crate::program::{Instruction, Opcode, Program};
use crate::snapshot::{Snapshot, SnapshotManager, Trace};

/// Executes encoded programs
///
/// The interpreter only holds configuration. Every call to
/// [`Interpreter::execute`] or [`Interpreter::trace`] builds its own program
/// counter and operand stack and drops them on return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpreter {
    stack_capacity: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter with the default stack capacity
    pub fn new() -> Self {
        Interpreter {
            stack_capacity: STACK_CAPACITY,
        }
    }

    /// Create an interpreter whose operand stack holds at most `capacity` values
    pub fn with_stack_capacity(capacity: usize) -> Self {
        Interpreter {
            stack_capacity: capacity,
        }
    }

    pub fn stack_capacity(&self) -> usize {
        self.stack_capacity
    }

    /// Run the program to completion and return the top of the stack
    pub fn execute(&self, program: &Program) -> Result<i64, ExecutionError> {
        let mut machine = Machine::new(program, self.stack_capacity);
        while !machine.is_finished() {
            machine.step()?;
        }
        machine.result()
    }

    /// Run the program while recording a snapshot at every instruction boundary
    ///
    /// The outcome matches [`Interpreter::execute`] for the same program unless
    /// the history outgrows `snapshot_limit` bytes.
    pub fn trace(&self, program: &Program, snapshot_limit: usize) -> Trace {
        let mut snapshots = SnapshotManager::new(snapshot_limit);
        let outcome = self.record(program, &mut snapshots);

        Trace {
            program: program.clone(),
            snapshots,
            outcome,
        }
    }

    fn record(
        &self,
        program: &Program,
        snapshots: &mut SnapshotManager,
    ) -> Result<i64, ExecutionError> {
        let mut machine = Machine::new(program, self.stack_capacity);
        take_snapshot(snapshots, &machine, None)?;

        while !machine.is_finished() {
            let executed = machine.step()?;
            take_snapshot(snapshots, &machine, Some(executed))?;
        }

        machine.result()
    }
}

/// Run `program` with a default interpreter
pub fn execute(program: &Program) -> Result<i64, ExecutionError> {
    Interpreter::new().execute(program)
}

fn take_snapshot(
    snapshots: &mut SnapshotManager,
    machine: &Machine<'_>,
    executed: Option<Instruction>,
) -> Result<(), ExecutionError> {
    let snapshot = Snapshot::new(machine.pc, executed, machine.stack.as_slice());
    snapshots
        .push(snapshot)
        .map_err(|_| ExecutionError::SnapshotLimitExceeded {
            current: snapshots.memory_usage(),
            limit: snapshots.memory_limit(),
        })
}

/// Per-execution state: program counter and operand stack
struct Machine<'p> {
    program: &'p Program,
    pc: usize,
    stack: OperandStack,
}

impl<'p> Machine<'p> {
    fn new(program: &'p Program, stack_capacity: usize) -> Self {
        Machine {
            program,
            pc: 0,
            stack: OperandStack::new(stack_capacity),
        }
    }

    fn is_finished(&self) -> bool {
        self.pc >= self.program.len()
    }

    /// Decode and execute the instruction at the program counter
    fn step(&mut self) -> Result<Instruction, ExecutionError> {
        let instruction = self.program.decode_at(self.pc)?;

        match instruction {
            Instruction::Push(value) => {
                self.stack
                    .push(value)
                    .map_err(|_| ExecutionError::StackOverflow {
                        capacity: self.stack.capacity(),
                        pc: self.pc,
                    })?;
            }
            Instruction::Add => self.apply_binary_op(Opcode::Add, i64::checked_add)?,
            Instruction::Subtract => self.apply_binary_op(Opcode::Subtract, i64::checked_sub)?,
        }

        self.pc += instruction.width();
        Ok(instruction)
    }

    /// Pop `right` then `left` and push `op(left, right)`
    fn apply_binary_op(
        &mut self,
        opcode: Opcode,
        op: fn(i64, i64) -> Option<i64>,
    ) -> Result<(), ExecutionError> {
        let pc = self.pc;
        let depth = self.stack.len();
        let underflow = || ExecutionError::StackUnderflow { opcode, depth, pc };

        // Check depth up front so a failing instruction leaves the stack untouched
        if depth < opcode.arity() {
            return Err(underflow());
        }

        let right = self.stack.pop().ok_or_else(underflow)?;
        let left = self.stack.pop().ok_or_else(underflow)?;

        let Some(result) = op(left, right) else {
            self.restore(left, right);
            return Err(ExecutionError::IntegerOverflow {
                opcode,
                left,
                right,
                pc: self.pc,
            });
        };

        self.stack
            .push(result)
            .map_err(|_| ExecutionError::StackOverflow {
                capacity: self.stack.capacity(),
                pc: self.pc,
            })
    }

    fn restore(&mut self, left: i64, right: i64) {
        // Two slots were just freed, so these pushes cannot fail
        let _ = self.stack.push(left);
        let _ = self.stack.push(right);
    }

    fn result(&self) -> Result<i64, ExecutionError> {
        self.stack.peek().ok_or(ExecutionError::EmptyResult)
    }
}
