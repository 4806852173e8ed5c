// Integration tests for the bytecode interpreter

use stacktop::interpreter::constants::{ADD, PUSH, SUBTRACT};
use stacktop::interpreter::engine::Interpreter;
use stacktop::interpreter::errors::ExecutionError;
use stacktop::interpreter::execute;
use stacktop::program::{Instruction, Opcode, Program};

const SAMPLE_PAIRS: [(i64, i64); 7] = [
    (0, 0),
    (3, 4),
    (4, 3),
    (-8, 5),
    (12, -30),
    (i64::MAX, 0),
    (i64::MIN + 1, -1),
];

#[test]
fn test_push_push_add_yields_sum() {
    for (a, b) in SAMPLE_PAIRS {
        let program = Program::from(vec![PUSH, a, PUSH, b, ADD]);
        assert_eq!(execute(&program), Ok(a + b), "{} + {}", a, b);
    }
}

#[test]
fn test_push_push_subtract_yields_first_minus_second() {
    for (a, b) in SAMPLE_PAIRS {
        let program = Program::from(vec![PUSH, a, PUSH, b, SUBTRACT]);
        assert_eq!(execute(&program), Ok(a - b), "{} - {}", a, b);
    }

    // Swapping the pushes flips the sign
    let forward = Program::from(vec![PUSH, 2, PUSH, 9, SUBTRACT]);
    let backward = Program::from(vec![PUSH, 9, PUSH, 2, SUBTRACT]);
    assert_eq!(execute(&forward), Ok(-7));
    assert_eq!(execute(&backward), Ok(7));
}

#[test]
fn test_chained_operations_compose_on_the_stack() {
    let program = Program::from(vec![PUSH, 3, PUSH, 4, ADD, PUSH, 5, SUBTRACT]);
    assert_eq!(execute(&program), Ok(2));

    // 10 - (4 - 1) with the inner expression evaluated first
    let nested = Program::from(vec![PUSH, 10, PUSH, 4, PUSH, 1, SUBTRACT, SUBTRACT]);
    assert_eq!(execute(&nested), Ok(7));
}

#[test]
fn test_add_on_empty_stack_underflows() {
    let program = Program::from(vec![ADD]);
    assert_eq!(
        execute(&program),
        Err(ExecutionError::StackUnderflow {
            opcode: Opcode::Add,
            depth: 0,
            pc: 0,
        })
    );
}

#[test]
fn test_subtract_with_one_value_underflows() {
    let program = Program::from(vec![PUSH, 5, SUBTRACT]);
    assert!(matches!(
        execute(&program),
        Err(ExecutionError::StackUnderflow {
            opcode: Opcode::Subtract,
            depth: 1,
            ..
        })
    ));
}

#[test]
fn test_empty_program_has_no_result() {
    let program = Program::from(Vec::new());
    assert_eq!(execute(&program), Err(ExecutionError::EmptyResult));
}

#[test]
fn test_single_push_is_a_valid_result() {
    let program = Program::from(vec![PUSH, 7]);
    assert_eq!(execute(&program), Ok(7));
}

#[test]
fn test_push_without_operand_is_malformed() {
    assert_eq!(
        execute(&Program::from(vec![PUSH])),
        Err(ExecutionError::MalformedProgram { pc: 0 })
    );
    assert_eq!(
        execute(&Program::from(vec![PUSH, 1, PUSH, 2, ADD, PUSH])),
        Err(ExecutionError::MalformedProgram { pc: 5 })
    );
}

#[test]
fn test_unknown_opcode_is_rejected() {
    for value in [3, -1, 99] {
        let program = Program::from(vec![PUSH, 1, value]);
        assert_eq!(
            execute(&program),
            Err(ExecutionError::UnknownOpcode { value, pc: 2 })
        );
    }
}

#[test]
fn test_push_operand_matching_an_opcode_is_data() {
    // Operands 1 and 2 must not be decoded as ADD/SUB
    let program = Program::from(vec![PUSH, ADD, PUSH, SUBTRACT, ADD]);
    assert_eq!(execute(&program), Ok(3));
}

#[test]
fn test_repeated_execution_is_stable() {
    let program = Program::from(vec![PUSH, 3, PUSH, 4, ADD, PUSH, 5, SUBTRACT]);
    let interpreter = Interpreter::new();

    let first = interpreter.execute(&program);
    let second = interpreter.execute(&program);

    assert_eq!(first, Ok(2));
    assert_eq!(first, second);
    assert_eq!(program.as_slice(), &[PUSH, 3, PUSH, 4, ADD, PUSH, 5, SUBTRACT]);
}

#[test]
fn test_failed_run_does_not_leak_into_next_run() {
    let interpreter = Interpreter::new();
    let failing = Program::from(vec![PUSH, 1, PUSH, 2, PUSH, 3, ADD, ADD, ADD]);
    let single = Program::from(vec![PUSH, 8]);

    assert!(interpreter.execute(&failing).is_err());
    assert_eq!(interpreter.execute(&single), Ok(8));
}

#[test]
fn test_stack_overflow_at_default_capacity() {
    let interpreter = Interpreter::new();
    let capacity = interpreter.stack_capacity();
    let program: Program = (0..=capacity as i64)
        .map(Instruction::Push)
        .collect();

    assert_eq!(
        interpreter.execute(&program),
        Err(ExecutionError::StackOverflow {
            capacity,
            pc: capacity * 2,
        })
    );
}

#[test]
fn test_integer_overflow_is_reported() {
    let program = Program::from(vec![PUSH, i64::MIN, PUSH, 1, SUBTRACT]);
    assert_eq!(
        execute(&program),
        Err(ExecutionError::IntegerOverflow {
            opcode: Opcode::Subtract,
            left: i64::MIN,
            right: 1,
            pc: 4,
        })
    );
}

#[test]
fn test_error_messages_name_the_fault() {
    let underflow = execute(&Program::from(vec![ADD])).unwrap_err();
    assert_eq!(
        underflow.to_string(),
        "Stack underflow at pc 0: ADD needs 2 values, stack holds 0"
    );
    assert_eq!(underflow.pc(), Some(0));

    let empty = execute(&Program::from(Vec::new())).unwrap_err();
    assert_eq!(empty.to_string(), "Program finished with an empty stack");
    assert_eq!(empty.pc(), None);
}
