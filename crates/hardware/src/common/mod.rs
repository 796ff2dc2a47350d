//! Common utilities and types used throughout the emulator core.
//!
//! This module provides the building blocks shared by the MMU, the TLB and the
//! memory model. It includes:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Constants:** Sv32 page geometry and page-table-entry bit positions.
//! 3. **Memory Access:** Access kinds, access rights and page-size tiers.
//! 4. **Error Handling:** Trap, bus and configuration error types.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Sv32 paging constants.
pub mod constants;

/// Memory access type, access rights and page level definitions.
pub mod data;

/// Error types and trap definitions.
pub mod error;

pub use addr::{PhysAddr, VirtAddr};
pub use constants::{PAGE_SHIFT, SUPERPAGE_SHIFT};
pub use data::{AccessRights, AccessType, PageLevel};
pub use error::{BusError, ConfigError, Trap};
