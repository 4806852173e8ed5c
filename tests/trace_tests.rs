use stacktop::interpreter::constants::{ADD, PUSH, SUBTRACT};
use stacktop::interpreter::engine::Interpreter;
use stacktop::interpreter::errors::ExecutionError;
use stacktop::program::{Instruction, Program};

#[test]
fn test_trace_records_every_instruction_boundary() {
    let program = Program::from(vec![PUSH, 3, PUSH, 4, ADD, PUSH, 5, SUBTRACT]);
    let interpreter = Interpreter::new();
    let trace = interpreter.trace(&program, 1024 * 1024);

    assert_eq!(trace.outcome, interpreter.execute(&program));
    // Initial state plus one snapshot per instruction
    assert_eq!(trace.snapshots.len(), 6);

    let pcs: Vec<usize> = (0..trace.snapshots.len())
        .filter_map(|i| trace.snapshots.get(i))
        .map(|s| s.pc)
        .collect();
    assert_eq!(pcs, vec![0, 2, 4, 5, 7, 8]);

    let first = trace.snapshots.get(0).unwrap();
    assert!(first.stack.is_empty());
    assert_eq!(first.executed, None);

    let after_add = trace.snapshots.get(3).unwrap();
    assert_eq!(after_add.executed, Some(Instruction::Add));
    assert_eq!(after_add.stack, vec![7]);

    let last = trace.snapshots.last().unwrap();
    assert_eq!(last.executed, Some(Instruction::Subtract));
    assert_eq!(last.top(), Some(2));
}

#[test]
fn test_trace_of_failing_program_keeps_partial_history() {
    let program = Program::from(vec![PUSH, 1, PUSH, 2, ADD, ADD]);
    let interpreter = Interpreter::new();
    let trace = interpreter.trace(&program, 1024 * 1024);

    assert_eq!(trace.outcome, interpreter.execute(&program));
    assert!(!trace.is_success());
    assert!(matches!(
        trace.outcome,
        Err(ExecutionError::StackUnderflow { pc: 5, depth: 1, .. })
    ));
    assert_eq!(trace.snapshots.len(), 4);
    assert_eq!(trace.snapshots.last().unwrap().stack, vec![3]);
}

#[test]
fn test_trace_of_empty_program() {
    let trace = Interpreter::new().trace(&Program::default(), 1024);

    assert_eq!(trace.snapshots.len(), 1);
    assert_eq!(trace.outcome, Err(ExecutionError::EmptyResult));
}

#[test]
fn test_trace_snapshot_limit() {
    let program = Program::from(vec![PUSH, 1, PUSH, 2, PUSH, 3]);
    let trace = Interpreter::new().trace(&program, 1);

    assert!(trace.snapshots.is_empty());
    assert_eq!(
        trace.outcome,
        Err(ExecutionError::SnapshotLimitExceeded {
            current: 0,
            limit: 1,
        })
    );
}

#[test]
fn test_trace_pc_index_finds_instruction_states() {
    let program = Program::from(vec![PUSH, 6, PUSH, 2, SUBTRACT]);
    let trace = Interpreter::new().trace(&program, 1024 * 1024);

    let before_sub = trace.snapshots.index_of_pc(4).unwrap();
    assert_eq!(trace.snapshots.get(before_sub).unwrap().stack, vec![6, 2]);
    assert_eq!(trace.snapshots.index_of_pc(1), None);
}
