//! Trap and error definitions.
//!
//! This module defines the error handling types of the emulator core. It provides:
//! 1. **Trap Representation:** The synchronous exceptions address translation can raise.
//! 2. **Bus Errors:** Failures of physical memory accesses made by the page-table walker.
//! 3. **Configuration Errors:** Problems loading or validating a `Config`.
//!
//! A TLB miss is not an error: permission mismatches inside the TLB surface as
//! misses and the page-table walk decides which trap, if any, to raise.

use thiserror::Error;

use super::data::AccessType;

/// RISC-V traps raised by address translation.
///
/// The associated value is the faulting virtual address, which the trap
/// handler would place in `stval`/`mtval`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Trap {
    /// Instruction access fault: a PTE fetched during an instruction
    /// translation was not backed by memory.
    #[error("InstructionAccessFault({0:#x})")]
    InstructionAccessFault(u32),

    /// Load access fault: a PTE fetched during a load translation was not
    /// backed by memory.
    #[error("LoadAccessFault({0:#x})")]
    LoadAccessFault(u32),

    /// Store/AMO access fault: a PTE fetched or updated during a store
    /// translation was not backed by memory.
    #[error("StoreAccessFault({0:#x})")]
    StoreAccessFault(u32),

    /// Instruction page fault.
    #[error("InstructionPageFault({0:#x})")]
    InstructionPageFault(u32),

    /// Load page fault.
    #[error("LoadPageFault({0:#x})")]
    LoadPageFault(u32),

    /// Store/AMO page fault.
    #[error("StorePageFault({0:#x})")]
    StorePageFault(u32),
}

impl Trap {
    /// Builds the page fault matching `access`.
    pub const fn page_fault(access: AccessType, addr: u32) -> Self {
        match access {
            AccessType::Fetch => Self::InstructionPageFault(addr),
            AccessType::Read => Self::LoadPageFault(addr),
            AccessType::Write => Self::StorePageFault(addr),
        }
    }

    /// Builds the access fault matching `access`.
    pub const fn access_fault(access: AccessType, addr: u32) -> Self {
        match access {
            AccessType::Fetch => Self::InstructionAccessFault(addr),
            AccessType::Read => Self::LoadAccessFault(addr),
            AccessType::Write => Self::StoreAccessFault(addr),
        }
    }

    /// Returns the exception code written to `mcause`/`scause`.
    pub const fn cause(self) -> u32 {
        match self {
            Self::InstructionAccessFault(_) => 1,
            Self::LoadAccessFault(_) => 5,
            Self::StoreAccessFault(_) => 7,
            Self::InstructionPageFault(_) => 12,
            Self::LoadPageFault(_) => 13,
            Self::StorePageFault(_) => 15,
        }
    }

    /// Returns the faulting virtual address.
    pub const fn tval(self) -> u32 {
        match self {
            Self::InstructionAccessFault(addr)
            | Self::LoadAccessFault(addr)
            | Self::StoreAccessFault(addr)
            | Self::InstructionPageFault(addr)
            | Self::LoadPageFault(addr)
            | Self::StorePageFault(addr) => addr,
        }
    }
}

/// Failure of a physical memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BusError {
    /// No memory backs the physical address.
    #[error("physical address {0:#010x} is not backed by memory")]
    Unmapped(u32),

    /// The address is not aligned to the access width.
    #[error("misaligned {width}-byte access at {addr:#010x}")]
    Misaligned {
        /// Faulting physical address.
        addr: u32,
        /// Access width in bytes.
        width: u32,
    },
}

/// Errors produced while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration text is not valid JSON for `Config`.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// A translation set was configured with no entries.
    #[error("{set} capacity must be at least one entry")]
    ZeroTlbCapacity {
        /// Which set (`"itlb"` or `"dtlb"`).
        set: &'static str,
    },

    /// Main memory was configured with zero bytes.
    #[error("ram_size must be non-zero")]
    ZeroRamSize,
}
