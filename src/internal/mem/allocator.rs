use serde::{Deserialize, Serialize};

use crate::internal::process::process::Pid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "pid", rename_all = "snake_case")]
pub enum Slot {
    Free,
    Owned(Pid),
}

/// Fixed-size slot table keyed by address.
pub trait MemoryAllocator: Send {
    /// Writes `pid` into the slot at `address`. Occupied slots are
    /// overwritten; out-of-range addresses leave the table untouched.
    fn allocate(&mut self, pid: Pid, address: i64) -> Result<(), AllocError>;

    /// Read-back of a single slot; `None` when out of range.
    fn slot(&self, address: i64) -> Option<Slot>;

    fn size(&self) -> usize;
}

#[derive(Debug, Clone)]
pub struct SlotTable {
    slots: Vec<Slot>,
}

impl SlotTable {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![Slot::Free; size],
        }
    }

    /// Addresses currently owned by `pid`, ascending.
    pub fn owned_by(&self, pid: Pid) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| **slot == Slot::Owned(pid))
            .map(|(address, _)| address)
            .collect()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    fn index(&self, address: i64) -> Option<usize> {
        usize::try_from(address)
            .ok()
            .filter(|&index| index < self.slots.len())
    }
}

impl MemoryAllocator for SlotTable {
    fn allocate(&mut self, pid: Pid, address: i64) -> Result<(), AllocError> {
        let size = self.slots.len();
        let index = self.index(address).ok_or_else(|| {
            tracing::warn!(pid, address, size, "Memory allocation failed");
            AllocError::OutOfRange { pid, address, size }
        })?;

        if let Slot::Owned(previous) = self.slots[index] {
            tracing::debug!(address, previous, pid, "Overwriting occupied slot");
        }
        self.slots[index] = Slot::Owned(pid);
        tracing::debug!(pid, address, "Memory allocated");
        Ok(())
    }

    fn slot(&self, address: i64) -> Option<Slot> {
        self.index(address).map(|index| self.slots[index])
    }

    fn size(&self) -> usize {
        self.slots.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    #[error("Memory allocation failed: address {address} for process {pid} outside table of size {size}")]
    OutOfRange { pid: Pid, address: i64, size: usize },
}
