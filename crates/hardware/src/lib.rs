//! RISC-V emulator memory-management core.
//!
//! This crate implements the address-translation path of a 32-bit RISC-V emulator:
//! 1. **TLB:** Independent instruction and data translation sets with FIFO eviction.
//! 2. **MMU:** Sv32 translation (TLB lookup, page-table walk on miss, refill).
//! 3. **Architecture:** Privilege modes and the SATP/SSTATUS fields translation depends on.
//! 4. **Memory:** The physical-memory seam page-table walks read through, plus flat RAM.
//! 5. **Support:** Configuration, error types, and translation statistics.

/// Common types and constants (addresses, access types, rights, errors).
pub mod common;
/// Emulator configuration (defaults, JSON loading, validation).
pub mod config;
/// CPU core state relevant to translation (privilege, CSRs, MMU, TLB).
pub mod core;
/// Physical memory (the `PhysMemory` trait and flat RAM).
pub mod soc;
/// Translation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Memory management unit; owns both TLB sets and drives page-table walks.
pub use crate::core::units::mmu::Mmu;
/// Translation lookaside buffer controller.
pub use crate::core::units::mmu::tlb::{Tlb, TlbKind};
