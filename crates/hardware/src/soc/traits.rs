//! Physical memory access trait.
//!
//! This module defines `PhysMemory`, the seam between the MMU and whatever
//! backs physical addresses. It provides:
//! 1. **PTE Reads:** Word reads used by the page-table walker at each level.
//! 2. **PTE Updates:** Word writes used to set the Accessed and Dirty bits.
//!
//! Accesses report failures as `BusError` so the walker can turn them into
//! access faults instead of inventing a translation.

use crate::common::{BusError, PhysAddr};

/// Word-granular access to physical memory.
pub trait PhysMemory {
    /// Reads a little-endian 32-bit word at `paddr`.
    ///
    /// # Errors
    ///
    /// Returns a `BusError` if `paddr` is unbacked or misaligned.
    fn read_u32(&mut self, paddr: PhysAddr) -> Result<u32, BusError>;

    /// Writes a little-endian 32-bit word at `paddr`.
    ///
    /// # Errors
    ///
    /// Returns a `BusError` if `paddr` is unbacked or misaligned.
    fn write_u32(&mut self, paddr: PhysAddr, val: u32) -> Result<(), BusError>;
}
