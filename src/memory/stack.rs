//! Operand stack implementation
//!
//! [`OperandStack`] is a capacity-bounded LIFO of integers. Storage grows from
//! empty, so only values that were actually pushed are ever visible; a push
//! past the capacity is reported instead of written.

/// Operand stack for one execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperandStack {
    values: Vec<i64>,
    capacity: usize,
}

impl OperandStack {
    pub fn new(capacity: usize) -> Self {
        OperandStack {
            values: Vec::new(),
            capacity,
        }
    }

    /// Push a value, returns `Err(value)` if the stack is full
    pub fn push(&mut self, value: i64) -> Result<(), i64> {
        if self.values.len() >= self.capacity {
            return Err(value);
        }
        self.values.push(value);
        Ok(())
    }

    /// Pop the top value
    pub fn pop(&mut self) -> Option<i64> {
        self.values.pop()
    }

    /// Get the top value without removing it
    pub fn peek(&self) -> Option<i64> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stack contents from bottom to top (for snapshots and UI display)
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }
}
