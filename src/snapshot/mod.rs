// Snapshot management for step-through execution

use crate::interpreter::errors::ExecutionError;
use crate::program::{Instruction, Program};
use rustc_hash::FxHashMap;
use std::mem::size_of;

/// Fixed per-snapshot overhead used by the size estimate
const SNAPSHOT_OVERHEAD: usize = 64;

/// Snapshot of machine state at an instruction boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Program counter of the next instruction to decode
    pub pc: usize,
    /// Instruction that produced this state (`None` for the initial state)
    pub executed: Option<Instruction>,
    /// Operand stack from bottom to top
    pub stack: Vec<i64>,
}

impl Snapshot {
    pub fn new(pc: usize, executed: Option<Instruction>, stack: &[i64]) -> Self {
        Snapshot {
            pc,
            executed,
            stack: stack.to_vec(),
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        SNAPSHOT_OVERHEAD + self.stack.len() * size_of::<i64>()
    }

    pub fn top(&self) -> Option<i64> {
        self.stack.last().copied()
    }
}

/// Manages execution history for stepping
#[derive(Debug, Default)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    /// First snapshot index reached at each program counter
    pc_index: FxHashMap<usize, usize>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            pc_index: FxHashMap::default(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.pc_index
            .entry(snapshot.pc)
            .or_insert(self.snapshots.len());
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Index of the first snapshot whose next instruction is at `pc`
    pub fn index_of_pc(&self, pc: usize) -> Option<usize> {
        self.pc_index.get(&pc).copied()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

/// A recorded execution: the program, its history and how it ended
#[derive(Debug)]
pub struct Trace {
    pub program: Program,
    pub snapshots: SnapshotManager,
    pub outcome: Result<i64, ExecutionError>,
}

impl Trace {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
