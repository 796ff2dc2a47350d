//! Physical System Memory.
//!
//! This module implements a flat RAM region mapped at a physical base
//! address. It provides:
//! 1. **Storage:** A zero-filled byte buffer sized at construction.
//! 2. **Word Access:** Little-endian 32-bit reads and writes via `PhysMemory`.
//! 3. **Image Loading:** Bulk byte writes for page tables and binaries.

use crate::common::{BusError, PhysAddr};
use crate::config::MemoryConfig;
use crate::soc::traits::PhysMemory;

/// Flat RAM mapped at `[base, base + size)`.
#[derive(Clone, Debug)]
pub struct Memory {
    /// Backing bytes.
    data: Vec<u8>,
    /// The physical address of `data[0]`.
    base: u32,
}

impl Memory {
    /// Creates zero-filled memory of `size` bytes starting at `base`.
    pub fn new(base: u32, size: usize) -> Self {
        Self {
            data: vec![0; size],
            base,
        }
    }

    /// Creates memory from the `memory` section of a configuration.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.ram_base, config.ram_size)
    }

    /// Returns the physical base address.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Returns the size in bytes.
    pub const fn size(&self) -> usize {
        self.data.len()
    }

    /// Translates a physical range into an index into `data`.
    fn offset(&self, paddr: PhysAddr, len: usize) -> Result<usize, BusError> {
        let offset = paddr
            .val()
            .checked_sub(self.base)
            .ok_or_else(|| BusError::Unmapped(paddr.val()))? as usize;
        if offset
            .checked_add(len)
            .is_some_and(|end| end <= self.data.len())
        {
            Ok(offset)
        } else {
            Err(BusError::Unmapped(paddr.val()))
        }
    }

    /// Copies `bytes` into memory starting at `paddr`.
    ///
    /// # Errors
    ///
    /// Returns `BusError::Unmapped` if any byte of the range is outside the region.
    pub fn write_bytes(&mut self, paddr: PhysAddr, bytes: &[u8]) -> Result<(), BusError> {
        let offset = self.offset(paddr, bytes.len())?;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Returns `len` bytes starting at `paddr`.
    ///
    /// # Errors
    ///
    /// Returns `BusError::Unmapped` if any byte of the range is outside the region.
    pub fn read_bytes(&self, paddr: PhysAddr, len: usize) -> Result<&[u8], BusError> {
        let offset = self.offset(paddr, len)?;
        Ok(&self.data[offset..offset + len])
    }
}

impl PhysMemory for Memory {
    fn read_u32(&mut self, paddr: PhysAddr) -> Result<u32, BusError> {
        if !paddr.val().is_multiple_of(4) {
            return Err(BusError::Misaligned {
                addr: paddr.val(),
                width: 4,
            });
        }
        let offset = self.offset(paddr, 4)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.data[offset..offset + 4]);
        Ok(u32::from_le_bytes(word))
    }

    fn write_u32(&mut self, paddr: PhysAddr, val: u32) -> Result<(), BusError> {
        if !paddr.val().is_multiple_of(4) {
            return Err(BusError::Misaligned {
                addr: paddr.val(),
                width: 4,
            });
        }
        let offset = self.offset(paddr, 4)?;
        self.data[offset..offset + 4].copy_from_slice(&val.to_le_bytes());
        Ok(())
    }
}
